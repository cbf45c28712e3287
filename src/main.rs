#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! pacfmt — print pacman package metadata using printf-style format strings.

mod cli;
mod db;
mod format;
mod query;

use std::io::{self, Write};
use std::process;

use anyhow::Context;
use clap::Parser;

use cli::Cli;
use db::{Database, DbConfig};
use format::{FormatString, RenderContext};

fn main() {
    // Help and argument errors (including -Q/-S together) exit 1; nothing
    // is ever queried first.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            process::exit(1);
        }
    };

    match run(&cli) {
        Ok(code) => process::exit(code),
        Err(err) => {
            eprintln!("error: {err:#}");
            process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<i32> {
    // Format validation happens before the database is touched; a bad
    // token rejects the run with no partial output.
    let format = FormatString::parse(&cli.format)?;
    let ctx = RenderContext::new(&cli.delim, &cli.listdelim, &cli.timefmt, cli.verbose);

    let mut config = DbConfig::load(&cli.config)
        .with_context(|| format!("reading {}", cli.config.display()))?;
    if let Some(dbpath) = &cli.dbpath {
        config.db_path.clone_from(dbpath);
    }

    let database = Database::open(&config, cli.scope()).context("opening package database")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let code = query::run(&mut out, &database, &cli.targets, &format, &ctx)?;
    out.flush()?;
    Ok(code)
}
