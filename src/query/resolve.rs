/// Target parsing and first-match package resolution.
use crate::db::{Package, Repository};

/// A parsed command-line target: optional repository qualifier plus name.
///
/// Transient — borrowed from one argv entry and discarded after
/// resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetSpec<'a> {
    /// Repository the target is pinned to, when given as `repo/name`.
    pub repository: Option<&'a str>,
    /// Bare package name.
    pub name: &'a str,
}

impl<'a> TargetSpec<'a> {
    /// Split a raw target at the first `/`.
    #[must_use]
    pub fn parse(raw: &'a str) -> Self {
        match raw.split_once('/') {
            Some((repository, name)) => Self {
                repository: Some(repository),
                name,
            },
            None => Self {
                repository: None,
                name: raw,
            },
        }
    }
}

/// Find the first package matching `spec` across `repositories`.
///
/// Repositories are scanned in caller order. With a qualifier, a
/// repository whose name differs is skipped without being queried; the
/// first match ends the scan. Absence is not an error here — the driver
/// decides how to report it.
#[must_use]
pub fn resolve<'a>(spec: TargetSpec<'_>, repositories: &'a [Repository]) -> Option<&'a Package> {
    repositories
        .iter()
        .filter(|repo| spec.repository.is_none_or(|qualifier| qualifier == repo.name()))
        .find_map(|repo| repo.package(spec.name))
}
