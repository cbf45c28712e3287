/// Field tokens and per-package field extraction.
use std::borrow::Cow;

use crate::db::{Database, Package, strip_constraint};

/// A package field addressable from a format string.
///
/// One variant per `%x` token (alphabet `BCDEFGLNOPRSabdfiklmnoprsuv`).
/// `%%` is not a field — the tokenizer turns it into a literal segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// `%f` — package archive filename (sync databases only).
    Filename,
    /// `%n` — package name.
    Name,
    /// `%v` — full version string.
    Version,
    /// `%d` — one-line description.
    Description,
    /// `%u` — upstream project URL.
    Url,
    /// `%p` — packager identity.
    Packager,
    /// `%s` — checksum.
    Checksum,
    /// `%a` — target architecture.
    Architecture,
    /// `%i` — "yes"/"no": install-time scriptlet present.
    Scriptlet,
    /// `%r` — owning repository name.
    Repository,
    /// `%b` — build timestamp.
    BuildDate,
    /// `%l` — install timestamp (local database only).
    InstallDate,
    /// `%k` — download size.
    DownloadSize,
    /// `%m` — installed size.
    InstallSize,
    /// `%N` — reverse-dependency names, computed over the session.
    RequiredBy,
    /// `%L` — license identifiers.
    Licenses,
    /// `%G` — group memberships.
    Groups,
    /// `%E` — dependency names with constraints stripped.
    DependsShort,
    /// `%D` — full dependency strings.
    Depends,
    /// `%O` — optional-dependency descriptors.
    OptDepends,
    /// `%C` — conflicting package names.
    Conflicts,
    /// `%S` — provided capabilities with constraints stripped.
    ProvidesShort,
    /// `%P` — provided capabilities, full.
    Provides,
    /// `%R` — replaced package names.
    Replaces,
    /// `%F` — installed file paths (local database only).
    Files,
    /// `%B` — backup entries (`path<TAB>hash`).
    Backup,
}

impl Field {
    /// Map a one-letter format token to its field.
    #[must_use]
    pub fn from_token(token: char) -> Option<Self> {
        Some(match token {
            'f' => Self::Filename,
            'n' => Self::Name,
            'v' => Self::Version,
            'd' => Self::Description,
            'u' => Self::Url,
            'p' => Self::Packager,
            's' => Self::Checksum,
            'a' => Self::Architecture,
            'i' => Self::Scriptlet,
            'r' => Self::Repository,
            'b' => Self::BuildDate,
            'l' => Self::InstallDate,
            'k' => Self::DownloadSize,
            'm' => Self::InstallSize,
            'N' => Self::RequiredBy,
            'L' => Self::Licenses,
            'G' => Self::Groups,
            'E' => Self::DependsShort,
            'D' => Self::Depends,
            'O' => Self::OptDepends,
            'C' => Self::Conflicts,
            'S' => Self::ProvidesShort,
            'P' => Self::Provides,
            'R' => Self::Replaces,
            'F' => Self::Files,
            'B' => Self::Backup,
            _ => return None,
        })
    }
}

/// An extracted field value, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue<'a> {
    /// Scalar text; `None` when the record has no value for the field.
    Scalar(Option<Cow<'a, str>>),
    /// Seconds since the epoch; `None` when absent or zero.
    Time(Option<i64>),
    /// A byte count, rendered as kibibytes with two decimals.
    Size(u64),
    /// Ordered list elements; may be empty.
    List(Vec<Cow<'a, str>>),
}

/// Extract `field` from `package`.
///
/// Reverse dependencies are the only field computed against the rest of
/// the session, which is why the database is part of the signature. Sizes
/// read as zero when the database carries no value, matching how they are
/// rendered downstream.
#[must_use]
pub fn extract<'a>(package: &'a Package, database: &Database, field: Field) -> FieldValue<'a> {
    match field {
        Field::Filename => scalar(package.filename.as_deref()),
        Field::Name => scalar(Some(&package.name)),
        Field::Version => scalar(Some(&package.version)),
        Field::Description => scalar(package.description.as_deref()),
        Field::Url => scalar(package.url.as_deref()),
        Field::Packager => scalar(package.packager.as_deref()),
        Field::Checksum => scalar(package.checksum.as_deref()),
        Field::Architecture => scalar(package.architecture.as_deref()),
        Field::Scriptlet => scalar(Some(if package.has_scriptlet { "yes" } else { "no" })),
        Field::Repository => scalar(Some(&package.repository)),
        Field::BuildDate => FieldValue::Time(package.build_date.filter(|&t| t != 0)),
        Field::InstallDate => FieldValue::Time(package.install_date.filter(|&t| t != 0)),
        Field::DownloadSize => FieldValue::Size(package.download_size.unwrap_or(0)),
        Field::InstallSize => FieldValue::Size(package.install_size.unwrap_or(0)),
        Field::RequiredBy => FieldValue::List(
            database
                .required_by(package)
                .into_iter()
                .map(Cow::Owned)
                .collect(),
        ),
        Field::Licenses => list(&package.licenses),
        Field::Groups => list(&package.groups),
        Field::DependsShort => short_list(&package.depends),
        Field::Depends => list(&package.depends),
        Field::OptDepends => list(&package.opt_depends),
        Field::Conflicts => list(&package.conflicts),
        Field::ProvidesShort => short_list(&package.provides),
        Field::Provides => list(&package.provides),
        Field::Replaces => list(&package.replaces),
        Field::Files => list(&package.files),
        Field::Backup => list(&package.backup),
    }
}

fn scalar(value: Option<&str>) -> FieldValue<'_> {
    FieldValue::Scalar(value.map(Cow::Borrowed))
}

fn list(items: &[String]) -> FieldValue<'_> {
    FieldValue::List(items.iter().map(|s| Cow::Borrowed(s.as_str())).collect())
}

/// List form with each element truncated at its first comparison operator.
/// Pure slicing over the stored strings; nothing is mutated in place.
fn short_list(items: &[String]) -> FieldValue<'_> {
    FieldValue::List(
        items
            .iter()
            .map(|s| Cow::Borrowed(strip_constraint(s)))
            .collect(),
    )
}
