/// Errors from the package-database layer.
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Typed errors from configuration and database loading.
///
/// Every variant is fatal: the driver never starts rendering after any of
/// these, so no partial output can follow them.
#[derive(Debug, Error)]
pub enum DbError {
    /// The configuration file could not be read.
    #[error("cannot read config file {}: {source}", path.display())]
    ConfigRead {
        /// Path of the configuration file.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },

    /// The configuration file is malformed.
    #[error("{}:{line}: {reason}", path.display())]
    ConfigParse {
        /// Path of the configuration file.
        path: PathBuf,
        /// One-based line number of the offending line.
        line: usize,
        /// What was wrong with it.
        reason: String,
    },

    /// The database directory or archive does not exist.
    #[error("database path {} does not exist", path.display())]
    Missing {
        /// The missing path.
        path: PathBuf,
    },

    /// A database entry could not be read.
    #[error("cannot read database entry {}: {source}", path.display())]
    EntryRead {
        /// Path of the unreadable entry.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },

    /// A database entry is structurally invalid.
    #[error("malformed entry `{entry}` in repository [{repository}]: {reason}")]
    MalformedEntry {
        /// Name of the repository holding the entry.
        repository: String,
        /// The entry's directory name.
        entry: String,
        /// What was wrong with it.
        reason: String,
    },

    /// A sync database archive could not be read.
    #[error("cannot read sync database {}: {source}", path.display())]
    SyncRead {
        /// Path of the archive.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
}
