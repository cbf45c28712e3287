/// Backslash-escape decoding for format strings and delimiter options.
///
/// The recognized escape letters are the validator's alphabet minus `f`:
/// `\f` passes validation (it is part of the accepted alphabet) but decodes
/// to nothing, so an escape the decoder does not know is dropped rather
/// than copied through or treated as an error.

/// Decode a single escape letter to its literal character.
///
/// Returns `None` for letters outside the decode table; callers emit
/// nothing in that case.
#[must_use]
pub fn decoded(letter: char) -> Option<char> {
    match letter {
        '\\' => Some('\\'),
        '"' => Some('"'),
        'a' => Some('\x07'),
        'b' => Some('\x08'),
        'e' => Some('\x1b'),
        'n' => Some('\n'),
        'r' => Some('\r'),
        't' => Some('\t'),
        'v' => Some('\x0b'),
        _ => None,
    }
}

/// Decode every backslash-escape pair in `input`, passing other characters
/// through verbatim.
///
/// Used for the `--delim` and `--listdelim` options, which are decoded once
/// at startup. Unknown pairs and a trailing lone backslash are dropped.
#[must_use]
pub fn decode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(d) = chars.next().and_then(decoded) {
                out.push(d);
            }
        } else {
            out.push(c);
        }
    }
    out
}
