/// pacman.conf-style configuration parsing.
use std::fs;
use std::path::{Path, PathBuf};

use super::errors::DbError;

/// Resolved database configuration.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Filesystem root the installation is relative to.
    pub root: PathBuf,
    /// Directory holding the `local/` and `sync/` databases.
    pub db_path: PathBuf,
    /// Sync repository names, in file order.
    pub sync_repos: Vec<String>,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("/"),
            db_path: PathBuf::from("/var/lib/pacman"),
            sync_repos: Vec::new(),
        }
    }
}

impl DbConfig {
    /// Load configuration from a pacman.conf-style file.
    ///
    /// Every section other than `[options]` names a sync repository, in
    /// file order, duplicates ignored. `RootDir` and `DBPath` under
    /// `[options]` override the defaults; every other key (and all bare
    /// keys such as `Color`) is ignored.
    ///
    /// # Errors
    ///
    /// `DbError::ConfigRead` when the file cannot be read;
    /// `DbError::ConfigParse` with a line number on a malformed section
    /// header.
    pub fn load(path: &Path) -> Result<Self, DbError> {
        let text = fs::read_to_string(path).map_err(|source| DbError::ConfigRead {
            path: path.to_owned(),
            source,
        })?;
        Self::parse(&text, path)
    }

    fn parse(text: &str, path: &Path) -> Result<Self, DbError> {
        let mut config = Self::default();
        let mut section: Option<String> = None;

        for (index, raw) in text.lines().enumerate() {
            let line = match raw.find('#') {
                Some(at) => &raw[..at],
                None => raw,
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if line.starts_with('[') {
                let name = line
                    .strip_suffix(']')
                    .map(|body| body[1..].trim())
                    .filter(|name| !name.is_empty());
                let Some(name) = name else {
                    return Err(DbError::ConfigParse {
                        path: path.to_owned(),
                        line: index + 1,
                        reason: format!("malformed section header `{line}`"),
                    });
                };
                if name != "options" && !config.sync_repos.iter().any(|repo| repo == name) {
                    config.sync_repos.push(name.to_owned());
                }
                section = Some(name.to_owned());
            } else if let Some((key, value)) = line.split_once('=') {
                if section.as_deref() == Some("options") {
                    match key.trim() {
                        "RootDir" => config.root = PathBuf::from(value.trim()),
                        "DBPath" => config.db_path = PathBuf::from(value.trim()),
                        _ => {}
                    }
                }
            }
            // Bare keys (Color, CheckSpace, ...) fall through untouched.
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    const SAMPLE: &str = "\
# global options
[options]
RootDir = /mnt
DBPath  = /mnt/var/lib/pacman
Color

[core]
Server = https://mirror.example/core/os/x86_64

[extra]  # trailing comment
Server = https://mirror.example/extra/os/x86_64

[core]
Server = https://mirror2.example/core/os/x86_64
";

    #[test]
    fn test_parse_sections_and_keys() {
        let config = DbConfig::parse(SAMPLE, Path::new("pacman.conf")).unwrap();
        assert_eq!(config.root, PathBuf::from("/mnt"));
        assert_eq!(config.db_path, PathBuf::from("/mnt/var/lib/pacman"));
        assert_eq!(config.sync_repos, ["core", "extra"]);
    }

    #[test]
    fn test_options_is_not_a_repo() {
        let config = DbConfig::parse("[options]\n", Path::new("c")).unwrap();
        assert!(config.sync_repos.is_empty());
    }

    #[test]
    fn test_defaults() {
        let config = DbConfig::parse("", Path::new("c")).unwrap();
        assert_eq!(config.root, PathBuf::from("/"));
        assert_eq!(config.db_path, PathBuf::from("/var/lib/pacman"));
    }

    #[test]
    fn test_keys_outside_options_ignored() {
        let config =
            DbConfig::parse("[core]\nDBPath = /elsewhere\n", Path::new("c")).unwrap();
        assert_eq!(config.db_path, PathBuf::from("/var/lib/pacman"));
    }

    #[test]
    fn test_malformed_header_reports_line() {
        let err = DbConfig::parse("[options]\n[broken\n", Path::new("c")).unwrap_err();
        match err {
            DbError::ConfigParse { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pacman.conf");
        let mut file = fs::File::create(&path).unwrap();
        write!(file, "[options]\nDBPath = /tmp/db\n\n[core]\n").unwrap();
        let config = DbConfig::load(&path).unwrap();
        assert_eq!(config.db_path, PathBuf::from("/tmp/db"));
        assert_eq!(config.sync_repos, ["core"]);
    }

    #[test]
    fn test_load_missing_file() {
        let err = DbConfig::load(Path::new("/nonexistent/pacman.conf")).unwrap_err();
        assert!(matches!(err, DbError::ConfigRead { .. }));
    }
}
