/// Format-string tokenization and validation.
use super::errors::FormatError;
use super::fields::Field;

/// Characters accepted after `\`. `f` validates but decodes to nothing.
const ESCAPE_TOKENS: &str = "\"\\abefnrtv";

/// One segment of a validated format string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Verbatim text, copied to the output as-is.
    Literal(String),
    /// A `%x` field substitution.
    Field(Field),
    /// A `\x` escape, decoded at render time.
    Escape(char),
}

/// A validated, immutable sequence of format segments.
///
/// Produced once per invocation by [`FormatString::parse`] and shared
/// read-only across every target render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatString {
    segments: Vec<Segment>,
}

impl FormatString {
    /// Tokenize and validate a raw format string.
    ///
    /// The whole string is scanned before any package is queried; a bad
    /// token anywhere rejects the entire run with no partial output. `%%`
    /// tokenizes into a literal percent sign. A `%` or `\` as the final
    /// character is an error — the scan never reads past the end.
    ///
    /// # Errors
    ///
    /// `FormatError::BadFieldToken` / `BadEscapeToken` for a character
    /// outside the respective alphabet, `FormatError::Trailing` for a
    /// dangling marker.
    pub fn parse(raw: &str) -> Result<Self, FormatError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = raw.char_indices();

        while let Some((position, c)) = chars.next() {
            match c {
                '%' => match chars.next() {
                    None => return Err(FormatError::Trailing { marker: '%', position }),
                    Some((_, '%')) => literal.push('%'),
                    Some((_, token)) => match Field::from_token(token) {
                        Some(field) => {
                            flush(&mut segments, &mut literal);
                            segments.push(Segment::Field(field));
                        }
                        None => return Err(FormatError::BadFieldToken { token, position }),
                    },
                },
                '\\' => match chars.next() {
                    None => return Err(FormatError::Trailing { marker: '\\', position }),
                    Some((_, token)) if ESCAPE_TOKENS.contains(token) => {
                        flush(&mut segments, &mut literal);
                        segments.push(Segment::Escape(token));
                    }
                    Some((_, token)) => {
                        return Err(FormatError::BadEscapeToken { token, position });
                    }
                },
                other => literal.push(other),
            }
        }

        flush(&mut segments, &mut literal);
        Ok(Self { segments })
    }

    /// The validated segments, in source order.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }
}

fn flush(segments: &mut Vec<Segment>, literal: &mut String) {
    if !literal.is_empty() {
        segments.push(Segment::Literal(std::mem::take(literal)));
    }
}
