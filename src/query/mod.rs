/// Driver: target iteration, record emission, exit aggregation.
pub mod resolve;

pub use resolve::{TargetSpec, resolve};

use std::io::{self, Write};

use crate::db::Database;
use crate::format::{FormatString, RenderContext, render};

/// Render every target against the opened database.
///
/// Targets are processed strictly in argv order, so output interleaving is
/// deterministic. Unresolved targets are reported to stderr only under
/// `--verbose` and collapse into a single nonzero exit code no matter how
/// many fail; they never abort processing of later targets.
///
/// # Errors
///
/// Returns any writer error; resolution failures are not errors.
pub fn run<W: Write>(
    out: &mut W,
    database: &Database,
    targets: &[String],
    format: &FormatString,
    ctx: &RenderContext,
) -> io::Result<i32> {
    let mut failed = false;
    for target in targets {
        let spec = TargetSpec::parse(target);
        match resolve(spec, database.repositories()) {
            Some(package) => render(out, package, database, format, ctx)?,
            None => {
                if ctx.verbose {
                    eprintln!("error: package '{}' not found", spec.name);
                }
                failed = true;
            }
        }
    }
    Ok(i32::from(failed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{Package, Repository};

    fn pkg(name: &str, version: &str) -> Package {
        Package {
            name: name.to_owned(),
            version: version.to_owned(),
            repository: "core".to_owned(),
            ..Package::default()
        }
    }

    fn database() -> Database {
        Database::new(vec![Repository::new(
            "core",
            vec![pkg("foo", "1.2-3"), pkg("bar", "2-1")],
        )])
    }

    fn run_str(targets: &[&str], verbose: bool) -> (String, i32) {
        let database = database();
        let format = FormatString::parse("%n %v").unwrap();
        let ctx = RenderContext::new("\\n", "  ", "%c", verbose);
        let mut out = Vec::new();
        let targets: Vec<String> = targets.iter().map(|&t| t.to_owned()).collect();
        let code = run(&mut out, &database, &targets, &format, &ctx).unwrap();
        (String::from_utf8(out).unwrap(), code)
    }

    #[test]
    fn test_all_resolved_exits_zero() {
        let (output, code) = run_str(&["foo", "bar"], false);
        assert_eq!(output, "foo 1.2-3\nbar 2-1\n");
        assert_eq!(code, 0);
    }

    #[test]
    fn test_argv_order_preserved() {
        let (output, _) = run_str(&["bar", "foo"], false);
        assert_eq!(output, "bar 2-1\nfoo 1.2-3\n");
    }

    #[test]
    fn test_failures_clamp_to_one() {
        let (output, code) = run_str(&["missing", "also-missing", "foo"], false);
        assert_eq!(output, "foo 1.2-3\n");
        assert_eq!(code, 1);
    }

    #[test]
    fn test_failure_with_verbose_still_renders_rest() {
        let (output, code) = run_str(&["missing", "foo"], true);
        assert_eq!(output, "foo 1.2-3\n");
        assert_eq!(code, 1);
    }

    #[test]
    fn test_zero_targets_is_success() {
        let (output, code) = run_str(&[], false);
        assert_eq!(output, "");
        assert_eq!(code, 0);
    }
}
