/// Local (installed) database loading.
use std::fs;
use std::path::Path;

use super::Repository;
use super::desc::Desc;
use super::errors::DbError;
use super::package::Package;

/// Name of the repository backing the installed package set.
pub const LOCAL_REPO: &str = "local";

/// Load the local database from `<db_path>/local`.
///
/// Each subdirectory is one installed package: a `desc` file plus an
/// optional `files` list; an `install` file marks the scriptlet flag.
/// Non-directory entries (`ALPM_DB_VERSION`) are skipped. Packages come
/// back sorted by name so output order is stable across filesystems.
///
/// # Errors
///
/// `DbError::Missing` when `local/` does not exist; `DbError::EntryRead`
/// and `DbError::MalformedEntry` for unreadable or invalid entries.
pub fn load(db_path: &Path) -> Result<Repository, DbError> {
    let dir = db_path.join("local");
    if !dir.is_dir() {
        return Err(DbError::Missing { path: dir });
    }
    let read_err = |path: &Path, source| DbError::EntryRead {
        path: path.to_owned(),
        source,
    };

    let mut packages = Vec::new();
    for entry in fs::read_dir(&dir).map_err(|source| read_err(&dir, source))? {
        let entry = entry.map_err(|source| read_err(&dir, source))?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }

        let desc_path = path.join("desc");
        let mut text = fs::read_to_string(&desc_path)
            .map_err(|source| read_err(&desc_path, source))?;
        let files_path = path.join("files");
        if files_path.is_file() {
            let files = fs::read_to_string(&files_path)
                .map_err(|source| read_err(&files_path, source))?;
            text.push('\n');
            text.push_str(&files);
        }
        let has_scriptlet = path.join("install").is_file();

        let entry_name = entry.file_name().to_string_lossy().into_owned();
        packages.push(Package::from_desc(
            &Desc::parse(&text),
            LOCAL_REPO,
            &entry_name,
            has_scriptlet,
        )?);
    }

    packages.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(Repository::new(LOCAL_REPO, packages))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    fn write_entry(local: &Path, dir: &str, desc: &str, files: Option<&str>, install: bool) {
        let entry = local.join(dir);
        fs::create_dir_all(&entry).unwrap();
        fs::write(entry.join("desc"), desc).unwrap();
        if let Some(files) = files {
            fs::write(entry.join("files"), files).unwrap();
        }
        if install {
            fs::write(entry.join("install"), "post_install() { :; }\n").unwrap();
        }
    }

    #[test]
    fn test_load_merges_desc_and_files() {
        let root = tempfile::tempdir().unwrap();
        let local = root.path().join("local");
        fs::create_dir_all(&local).unwrap();
        let mut version_file = fs::File::create(local.join("ALPM_DB_VERSION")).unwrap();
        writeln!(version_file, "9").unwrap();

        write_entry(
            &local,
            "zlib-1.3-1",
            "%NAME%\nzlib\n\n%VERSION%\n1.3-1\n\n%SIZE%\n1024\n",
            None,
            false,
        );
        write_entry(
            &local,
            "foo-1.2-3",
            "%NAME%\nfoo\n\n%VERSION%\n1.2-3\n\n%INSTALLDATE%\n1700000000\n",
            Some("%FILES%\nusr/\nusr/bin/foo\n\n%BACKUP%\netc/foo.conf\tabc123\n"),
            true,
        );

        let repo = load(root.path()).unwrap();
        assert_eq!(repo.name(), "local");
        // Sorted by name; the stray version file is skipped.
        let names: Vec<&str> = repo.packages().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["foo", "zlib"]);

        let foo = repo.package("foo").unwrap();
        assert_eq!(foo.install_date, Some(1_700_000_000));
        assert_eq!(foo.files, ["usr/", "usr/bin/foo"]);
        assert_eq!(foo.backup, ["etc/foo.conf\tabc123"]);
        assert!(foo.has_scriptlet);
        assert!(!repo.package("zlib").unwrap().has_scriptlet);
    }

    #[test]
    fn test_missing_local_dir_is_fatal() {
        let root = tempfile::tempdir().unwrap();
        let err = load(root.path()).unwrap_err();
        assert!(matches!(err, DbError::Missing { .. }));
    }

    #[test]
    fn test_entry_without_desc_is_fatal() {
        let root = tempfile::tempdir().unwrap();
        let local = root.path().join("local");
        fs::create_dir_all(local.join("broken-1-1")).unwrap();
        let err = load(root.path()).unwrap_err();
        assert!(matches!(err, DbError::EntryRead { .. }));
    }
}
