/// Parser for pacman's block-structured metadata files.
///
/// The format: a `%SECTION%` header line, one value per following line,
/// blank-line terminated. Local `desc`/`files` files and sync archive
/// entries all use it.
use std::collections::HashMap;

/// A parsed metadata block file.
#[derive(Debug, Clone, Default)]
pub struct Desc {
    sections: HashMap<String, Vec<String>>,
}

impl Desc {
    /// Parse one or more concatenated block files.
    ///
    /// Parsing is total: lines outside any section are ignored, and a
    /// repeated section extends the earlier one — which is how a local
    /// package's `desc` and `files` parse as one logical record.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut sections: HashMap<String, Vec<String>> = HashMap::new();
        let mut current: Option<String> = None;

        for line in text.lines() {
            let line = line.trim_end_matches('\r');
            if line.is_empty() {
                current = None;
            } else if line.len() > 2 && line.starts_with('%') && line.ends_with('%') {
                let name = line[1..line.len() - 1].to_owned();
                sections.entry(name.clone()).or_default();
                current = Some(name);
            } else if let Some(name) = &current {
                if let Some(values) = sections.get_mut(name) {
                    values.push(line.to_owned());
                }
            }
        }

        Self { sections }
    }

    /// First value of a section, if the section has any.
    #[must_use]
    pub fn scalar(&self, section: &str) -> Option<&str> {
        self.sections
            .get(section)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// All values of a section; empty when absent.
    #[must_use]
    pub fn list(&self, section: &str) -> &[String] {
        self.sections.get(section).map_or(&[], Vec::as_slice)
    }

    /// First value parsed as an integer; unparseable values read as absent.
    #[must_use]
    pub fn integer(&self, section: &str) -> Option<i64> {
        self.scalar(section).and_then(|value| value.parse().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
%NAME%
foo

%VERSION%
1.2-3

%DEPENDS%
glibc>=2.33
zlib

%BUILDDATE%
1700000000
";

    #[test]
    fn test_scalar_and_list() {
        let desc = Desc::parse(SAMPLE);
        assert_eq!(desc.scalar("NAME"), Some("foo"));
        assert_eq!(desc.scalar("VERSION"), Some("1.2-3"));
        assert_eq!(desc.list("DEPENDS"), ["glibc>=2.33", "zlib"]);
        assert_eq!(desc.integer("BUILDDATE"), Some(1_700_000_000));
    }

    #[test]
    fn test_absent_section() {
        let desc = Desc::parse(SAMPLE);
        assert_eq!(desc.scalar("URL"), None);
        assert!(desc.list("LICENSE").is_empty());
        assert_eq!(desc.integer("CSIZE"), None);
    }

    #[test]
    fn test_repeated_section_extends() {
        let desc = Desc::parse("%FILES%\nusr/\n\n%FILES%\nusr/bin/foo\n");
        assert_eq!(desc.list("FILES"), ["usr/", "usr/bin/foo"]);
    }

    #[test]
    fn test_concatenated_files() {
        let joined = format!("{SAMPLE}\n%FILES%\nusr/bin/foo\n");
        let desc = Desc::parse(&joined);
        assert_eq!(desc.scalar("NAME"), Some("foo"));
        assert_eq!(desc.list("FILES"), ["usr/bin/foo"]);
    }

    #[test]
    fn test_unparseable_integer_reads_absent() {
        let desc = Desc::parse("%CSIZE%\nnot-a-number\n");
        assert_eq!(desc.integer("CSIZE"), None);
    }

    #[test]
    fn test_stray_lines_ignored() {
        let desc = Desc::parse("stray\n%NAME%\nfoo\n");
        assert_eq!(desc.scalar("NAME"), Some("foo"));
    }

    #[test]
    fn test_crlf_tolerated() {
        let desc = Desc::parse("%NAME%\r\nfoo\r\n");
        assert_eq!(desc.scalar("NAME"), Some("foo"));
    }
}
