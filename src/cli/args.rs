/// CLI argument definitions via clap derive.
use std::path::PathBuf;

use clap::Parser;

use crate::db::SearchScope;

/// pacfmt — print pacman package metadata using printf-style format strings.
#[derive(Debug, Parser)]
#[command(
    name = "pacfmt",
    about = "Print pacman package metadata using printf-style format strings",
    version,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Format string applied to every package, e.g. "%n %v\n".
    ///
    /// %-tokens substitute package fields and \-escapes insert literal
    /// characters; the whole string is validated before any lookup runs.
    #[arg(value_name = "FORMAT")]
    pub format: String,

    /// Packages to print, optionally qualified as "repo/name".
    #[arg(value_name = "TARGET")]
    pub targets: Vec<String>,

    /// Search the local (installed) database. Default.
    #[arg(short = 'Q', long = "local", conflicts_with = "sync")]
    pub local: bool,

    /// Search all configured sync repositories.
    #[arg(short = 'S', long = "sync")]
    pub sync: bool,

    /// Separator printed after each package (escape sequences allowed).
    #[arg(short, long, value_name = "STRING", default_value = "\\n")]
    pub delim: String,

    /// Separator printed between list elements (escape sequences allowed).
    #[arg(short, long, value_name = "STRING", default_value = "  ")]
    pub listdelim: String,

    /// strftime-style pattern for timestamp fields.
    #[arg(short, long, value_name = "FMT", default_value = "%c")]
    pub timefmt: String,

    /// Report missing packages and print "None" for empty fields.
    #[arg(short, long)]
    pub verbose: bool,

    /// Repository configuration file.
    #[arg(long, value_name = "FILE", default_value = "/etc/pacman.conf")]
    pub config: PathBuf,

    /// Package database directory (overrides DBPath from the config file).
    #[arg(long, value_name = "DIR")]
    pub dbpath: Option<PathBuf>,
}

impl Cli {
    /// Database scope selected by the repo flags.
    ///
    /// `-Q` and `-S` conflict at parse time; local is the default when
    /// neither is given.
    #[must_use]
    pub fn scope(&self) -> SearchScope {
        if self.sync && !self.local {
            SearchScope::Sync
        } else {
            SearchScope::Local
        }
    }
}
