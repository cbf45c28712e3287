/// Package-database layer: configuration, local and sync loading, lookup.
///
/// The rest of the crate only ever sees [`Database`], [`Repository`], and
/// [`Package`] values; all on-disk parsing stays behind this module.
pub mod config;
pub mod desc;
pub mod errors;
pub mod local;
pub mod package;
pub mod sync;

pub use config::DbConfig;
pub use errors::DbError;
pub use package::{Package, strip_constraint};

/// Which database set a session searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchScope {
    /// The local (installed) package set.
    Local,
    /// All configured sync repositories.
    Sync,
}

/// A named repository with exact-name package lookup.
#[derive(Debug, Clone)]
pub struct Repository {
    name: String,
    packages: Vec<Package>,
}

impl Repository {
    /// Assemble a repository from already-loaded packages.
    #[must_use]
    pub fn new(name: &str, packages: Vec<Package>) -> Self {
        Self {
            name: name.to_owned(),
            packages,
        }
    }

    /// The repository's stable name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Exact-name lookup.
    #[must_use]
    pub fn package(&self, name: &str) -> Option<&Package> {
        self.packages.iter().find(|package| package.name == name)
    }

    /// Every package, in load order.
    #[must_use]
    pub fn packages(&self) -> &[Package] {
        &self.packages
    }
}

/// A read-only database session: an ordered list of repositories, opened
/// once for the process lifetime.
#[derive(Debug, Clone)]
pub struct Database {
    repositories: Vec<Repository>,
}

impl Database {
    /// Assemble a session from pre-loaded repositories.
    #[must_use]
    pub fn new(repositories: Vec<Repository>) -> Self {
        Self { repositories }
    }

    /// Open a session from disk for the given scope.
    ///
    /// # Errors
    ///
    /// Any loader failure; opening is all-or-nothing.
    pub fn open(config: &DbConfig, scope: SearchScope) -> Result<Self, DbError> {
        let repositories = match scope {
            SearchScope::Local => vec![local::load(&config.db_path)?],
            SearchScope::Sync => config
                .sync_repos
                .iter()
                .map(|name| sync::load(&config.db_path, name))
                .collect::<Result<Vec<_>, _>>()?,
        };
        Ok(Self::new(repositories))
    }

    /// The session's repositories, in search order.
    #[must_use]
    pub fn repositories(&self) -> &[Repository] {
        &self.repositories
    }

    /// Names of the packages that depend on `package`, in session order.
    ///
    /// A dependency matches when its bare name equals the package's name
    /// or one of its provided capability names.
    #[must_use]
    pub fn required_by(&self, package: &Package) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for repository in &self.repositories {
            for candidate in repository.packages() {
                let requires = candidate.depends.iter().any(|dep| {
                    let dep = strip_constraint(dep);
                    dep == package.name
                        || package
                            .provides
                            .iter()
                            .any(|provision| strip_constraint(provision) == dep)
                });
                if requires && !names.iter().any(|known| known == &candidate.name) {
                    names.push(candidate.name.clone());
                }
            }
        }
        names
    }
}
