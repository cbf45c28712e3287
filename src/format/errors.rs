/// Errors from format-string validation.
use thiserror::Error;

/// A format string that failed validation.
///
/// Validation runs to completion before any repository is opened, so none
/// of these can occur after output has started.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    /// A `%` introduced a character outside the field-token alphabet.
    #[error("bad token in format string: %{token} (at byte {position})")]
    BadFieldToken {
        /// The offending character.
        token: char,
        /// Byte offset of the `%` marker.
        position: usize,
    },

    /// A `\` introduced a character outside the escape alphabet.
    #[error("bad token in format string: \\{token} (at byte {position})")]
    BadEscapeToken {
        /// The offending character.
        token: char,
        /// Byte offset of the `\` marker.
        position: usize,
    },

    /// The format string ended with a bare `%` or `\`.
    #[error("format string ends inside a token: {marker} (at byte {position})")]
    Trailing {
        /// The marker left dangling at the end of the string.
        marker: char,
        /// Byte offset of the marker.
        position: usize,
    },
}
