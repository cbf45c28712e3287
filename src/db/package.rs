/// Owned package records and dependency-string helpers.
use super::desc::Desc;
use super::errors::DbError;

/// A single package record, owned by its repository.
///
/// Fields follow the database sections they are read from; sync-only
/// fields (filename, download size) are absent for local packages and vice
/// versa (install date, file list).
#[derive(Debug, Clone, Default)]
pub struct Package {
    /// Package name.
    pub name: String,
    /// Full version string (`epoch:pkgver-pkgrel`).
    pub version: String,
    /// Archive filename (sync databases only).
    pub filename: Option<String>,
    /// One-line description.
    pub description: Option<String>,
    /// Upstream project URL.
    pub url: Option<String>,
    /// Packager identity.
    pub packager: Option<String>,
    /// MD5 checksum, or SHA-256 when the database carries no MD5.
    pub checksum: Option<String>,
    /// Target architecture.
    pub architecture: Option<String>,
    /// Build timestamp, seconds since the epoch.
    pub build_date: Option<i64>,
    /// Install timestamp (local database only).
    pub install_date: Option<i64>,
    /// Download size in bytes (sync databases only).
    pub download_size: Option<u64>,
    /// Installed size in bytes.
    pub install_size: Option<u64>,
    /// Whether the package carries an install-time scriptlet.
    pub has_scriptlet: bool,
    /// License identifiers.
    pub licenses: Vec<String>,
    /// Group memberships.
    pub groups: Vec<String>,
    /// Dependency strings, name plus optional version constraint.
    pub depends: Vec<String>,
    /// Optional-dependency descriptors.
    pub opt_depends: Vec<String>,
    /// Conflicting package names.
    pub conflicts: Vec<String>,
    /// Provided capabilities, name plus optional version.
    pub provides: Vec<String>,
    /// Replaced package names.
    pub replaces: Vec<String>,
    /// Installed file paths (local database only).
    pub files: Vec<String>,
    /// Backup entries, kept raw as `path<TAB>hash`.
    pub backup: Vec<String>,
    /// Name of the owning repository.
    pub repository: String,
}

impl Package {
    /// Build a package from a parsed metadata block.
    ///
    /// `entry` is the database directory name, used only for error
    /// reporting.
    ///
    /// # Errors
    ///
    /// `DbError::MalformedEntry` when the block lacks `%NAME%` or
    /// `%VERSION%`.
    pub fn from_desc(
        desc: &Desc,
        repository: &str,
        entry: &str,
        has_scriptlet: bool,
    ) -> Result<Self, DbError> {
        let malformed = |reason: &str| DbError::MalformedEntry {
            repository: repository.to_owned(),
            entry: entry.to_owned(),
            reason: reason.to_owned(),
        };
        let name = desc
            .scalar("NAME")
            .ok_or_else(|| malformed("missing %NAME%"))?
            .to_owned();
        let version = desc
            .scalar("VERSION")
            .ok_or_else(|| malformed("missing %VERSION%"))?
            .to_owned();

        Ok(Self {
            name,
            version,
            filename: desc.scalar("FILENAME").map(str::to_owned),
            description: desc.scalar("DESC").map(str::to_owned),
            url: desc.scalar("URL").map(str::to_owned),
            packager: desc.scalar("PACKAGER").map(str::to_owned),
            checksum: desc
                .scalar("MD5SUM")
                .or_else(|| desc.scalar("SHA256SUM"))
                .map(str::to_owned),
            architecture: desc.scalar("ARCH").map(str::to_owned),
            build_date: desc.integer("BUILDDATE"),
            install_date: desc.integer("INSTALLDATE"),
            download_size: desc.integer("CSIZE").and_then(|n| u64::try_from(n).ok()),
            // Sync databases carry %ISIZE%; the local database stores the
            // installed size under %SIZE%.
            install_size: desc
                .integer("ISIZE")
                .or_else(|| desc.integer("SIZE"))
                .and_then(|n| u64::try_from(n).ok()),
            has_scriptlet,
            licenses: desc.list("LICENSE").to_vec(),
            groups: desc.list("GROUPS").to_vec(),
            depends: desc.list("DEPENDS").to_vec(),
            opt_depends: desc.list("OPTDEPENDS").to_vec(),
            conflicts: desc.list("CONFLICTS").to_vec(),
            provides: desc.list("PROVIDES").to_vec(),
            replaces: desc.list("REPLACES").to_vec(),
            files: desc.list("FILES").to_vec(),
            backup: desc.list("BACKUP").to_vec(),
            repository: repository.to_owned(),
        })
    }
}

/// Slice a dependency or provision string down to its bare name.
///
/// Truncation happens at the first `<`, `>`, or `=`. Applying it twice is
/// the same as applying it once.
#[must_use]
pub fn strip_constraint(dep: &str) -> &str {
    match dep.find(['<', '>', '=']) {
        Some(at) => &dep[..at],
        None => dep,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_desc_sync_fields() {
        let desc = Desc::parse(
            "%FILENAME%\nfoo-1.2-3-x86_64.pkg.tar.zst\n\n%NAME%\nfoo\n\n%VERSION%\n1.2-3\n\n\
             %CSIZE%\n2048\n\n%ISIZE%\n8192\n\n%MD5SUM%\nabc123\n",
        );
        let pkg = Package::from_desc(&desc, "core", "foo-1.2-3", false).unwrap();
        assert_eq!(pkg.name, "foo");
        assert_eq!(pkg.filename.as_deref(), Some("foo-1.2-3-x86_64.pkg.tar.zst"));
        assert_eq!(pkg.download_size, Some(2048));
        assert_eq!(pkg.install_size, Some(8192));
        assert_eq!(pkg.checksum.as_deref(), Some("abc123"));
        assert_eq!(pkg.repository, "core");
    }

    #[test]
    fn test_from_desc_local_size_fallback() {
        let desc = Desc::parse("%NAME%\nfoo\n\n%VERSION%\n1.2-3\n\n%SIZE%\n4096\n");
        let pkg = Package::from_desc(&desc, "local", "foo-1.2-3", true).unwrap();
        assert_eq!(pkg.install_size, Some(4096));
        assert_eq!(pkg.download_size, None);
        assert!(pkg.has_scriptlet);
    }

    #[test]
    fn test_checksum_sha256_fallback() {
        let desc = Desc::parse("%NAME%\nfoo\n\n%VERSION%\n1-1\n\n%SHA256SUM%\ndeadbeef\n");
        let pkg = Package::from_desc(&desc, "core", "foo-1-1", false).unwrap();
        assert_eq!(pkg.checksum.as_deref(), Some("deadbeef"));
    }

    #[test]
    fn test_missing_name_is_malformed() {
        let desc = Desc::parse("%VERSION%\n1-1\n");
        let err = Package::from_desc(&desc, "core", "broken", false).unwrap_err();
        assert!(matches!(err, DbError::MalformedEntry { .. }));
    }

    #[test]
    fn test_strip_constraint() {
        assert_eq!(strip_constraint("glibc>=2.33"), "glibc");
        assert_eq!(strip_constraint("zlib"), "zlib");
        assert_eq!(strip_constraint("foo=1.0"), "foo");
        assert_eq!(strip_constraint("bar<2"), "bar");
        assert_eq!(strip_constraint("=weird"), "");
    }
}
