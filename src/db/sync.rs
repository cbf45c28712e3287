/// Sync database loading.
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use flate2::read::GzDecoder;
use tar::Archive;

use super::Repository;
use super::desc::Desc;
use super::errors::DbError;
use super::package::Package;

/// Load one sync database from `<db_path>/sync/<name>.db`.
///
/// The archive is a tar of `<pkgdir>/desc` entries (the legacy layout
/// splits a `depends` file out alongside), optionally gzip-compressed.
/// Every file under one package directory parses as a single metadata
/// block. Entries come back sorted by directory name.
///
/// # Errors
///
/// `DbError::Missing` when the archive does not exist; `DbError::SyncRead`
/// and `DbError::MalformedEntry` for unreadable or invalid content.
pub fn load(db_path: &Path, name: &str) -> Result<Repository, DbError> {
    let path = db_path.join("sync").join(format!("{name}.db"));
    if !path.is_file() {
        return Err(DbError::Missing { path });
    }
    let sync_err = |source| DbError::SyncRead {
        path: path.clone(),
        source,
    };

    let file = File::open(&path).map_err(sync_err)?;
    let mut reader = BufReader::new(file);
    let gzipped = reader.fill_buf().map_err(sync_err)?.starts_with(&[0x1f, 0x8b]);
    let reader: Box<dyn Read> = if gzipped {
        Box::new(GzDecoder::new(reader))
    } else {
        Box::new(reader)
    };

    let mut blocks: BTreeMap<String, String> = BTreeMap::new();
    let mut archive = Archive::new(reader);
    for entry in archive.entries().map_err(sync_err)? {
        let mut entry = entry.map_err(sync_err)?;
        let pkgdir = {
            let entry_path = entry.path().map_err(sync_err)?;
            let Some(parent) = entry_path
                .parent()
                .filter(|parent| !parent.as_os_str().is_empty())
            else {
                // Directory markers and top-level files carry no metadata.
                continue;
            };
            parent.to_string_lossy().into_owned()
        };
        let mut text = String::new();
        entry.read_to_string(&mut text).map_err(sync_err)?;
        let block = blocks.entry(pkgdir).or_default();
        block.push_str(&text);
        block.push('\n');
    }

    let mut packages = Vec::with_capacity(blocks.len());
    for (entry_name, text) in &blocks {
        packages.push(Package::from_desc(
            &Desc::parse(text),
            name,
            entry_name,
            false,
        )?);
    }
    Ok(Repository::new(name, packages))
}
