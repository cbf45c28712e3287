/// Format-string rendering against resolved package records.
use std::fmt::Write as _;
use std::io::{self, Write};

use chrono::{Local, TimeZone};

use super::escape;
use super::fields::{FieldValue, extract};
use super::tokens::{FormatString, Segment};
use crate::db::{Database, Package};

/// Immutable per-invocation rendering configuration.
///
/// Constructed once from the resolved options and shared read-only across
/// every target render; nothing here changes after construction.
#[derive(Debug, Clone)]
pub struct RenderContext {
    /// Decoded separator written after each record.
    pub delim: String,
    /// Decoded separator written between list elements.
    pub list_delim: String,
    /// strftime-style pattern for timestamp fields.
    pub time_fmt: String,
    /// Report unresolved targets; render empty fields as "None".
    pub verbose: bool,
}

impl RenderContext {
    /// Build a context from raw option values, decoding both delimiters.
    #[must_use]
    pub fn new(delim: &str, list_delim: &str, time_fmt: &str, verbose: bool) -> Self {
        Self {
            delim: escape::decode(delim),
            list_delim: escape::decode(list_delim),
            time_fmt: time_fmt.to_owned(),
            verbose,
        }
    }
}

/// Render one package through `format`, then write the record delimiter.
///
/// A single left-to-right pass over the segments; no field value is
/// buffered beyond its own rendering.
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn render<W: Write>(
    out: &mut W,
    package: &Package,
    database: &Database,
    format: &FormatString,
    ctx: &RenderContext,
) -> io::Result<()> {
    let mut buf = [0u8; 4];
    for segment in format.segments() {
        match segment {
            Segment::Literal(text) => out.write_all(text.as_bytes())?,
            Segment::Escape(letter) => {
                if let Some(c) = escape::decoded(*letter) {
                    out.write_all(c.encode_utf8(&mut buf).as_bytes())?;
                }
            }
            Segment::Field(field) => write_field(out, extract(package, database, *field), ctx)?,
        }
    }
    out.write_all(ctx.delim.as_bytes())
}

fn write_field<W: Write>(out: &mut W, value: FieldValue<'_>, ctx: &RenderContext) -> io::Result<()> {
    match value {
        FieldValue::Scalar(Some(text)) => out.write_all(text.as_bytes()),
        FieldValue::Scalar(None) | FieldValue::Time(None) => write_none(out, ctx),
        FieldValue::Time(Some(stamp)) => write_time(out, stamp, ctx),
        FieldValue::Size(bytes) => write_size(out, bytes),
        FieldValue::List(items) if items.is_empty() => write_none(out, ctx),
        FieldValue::List(items) => {
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.write_all(ctx.list_delim.as_bytes())?;
                }
                out.write_all(item.as_bytes())?;
            }
            Ok(())
        }
    }
}

fn write_none<W: Write>(out: &mut W, ctx: &RenderContext) -> io::Result<()> {
    if ctx.verbose { out.write_all(b"None") } else { Ok(()) }
}

#[allow(clippy::cast_precision_loss)]
fn write_size<W: Write>(out: &mut W, bytes: u64) -> io::Result<()> {
    write!(out, "{:.2} K", bytes as f64 / 1024.0)
}

fn write_time<W: Write>(out: &mut W, stamp: i64, ctx: &RenderContext) -> io::Result<()> {
    let Some(local) = Local.timestamp_opt(stamp, 0).single() else {
        return Ok(());
    };
    // A pattern chrono cannot format must not abort the record; the field
    // renders empty instead.
    let mut text = String::new();
    if write!(text, "{}", local.format(&ctx.time_fmt)).is_ok() {
        out.write_all(text.as_bytes())?;
    }
    Ok(())
}
