//! Lossy reduction of arbitrary text to the single-byte range the PDF
//! fonts can encode.

/// Typographic characters swapped for ASCII before filtering.
const SUBSTITUTIONS: [(char, char); 4] = [
    ('\u{2013}', '-'),
    ('\u{2019}', '\''),
    ('\u{201C}', '"'),
    ('\u{201D}', '"'),
];

/// Highest code point (exclusive) that survives sanitization
pub const CODE_POINT_LIMIT: u32 = 256;

/// Substitute the four typographic characters, then drop everything at or
/// above U+0100. Nothing is transliterated; accented letters outside
/// Latin-1, math symbols and emoji simply disappear.
pub fn sanitize(text: &str) -> String {
    text.chars()
        .map(substitute)
        .filter(|c| (*c as u32) < CODE_POINT_LIMIT)
        .collect()
}

fn substitute(c: char) -> char {
    SUBSTITUTIONS
        .iter()
        .find(|(from, _)| *from == c)
        .map(|(_, to)| *to)
        .unwrap_or(c)
}
