use super::table::{lookup, FALLBACK_GLYPH};

/// Transliterate text into Braille, one output unit per input character.
///
/// Each character is folded to lowercase and looked up in the code table.
/// Characters without an entry become [`FALLBACK_GLYPH`]. So do characters
/// whose lowercase form spans more than one character, which keeps the output
/// aligned with the input.
///
/// The output is not valid input for a second pass: Braille cells are not in
/// the table, so transliterating twice turns every letter into `?`.
pub fn transliterate(input: &str) -> String {
    let mut out = String::with_capacity(input.len() * 3);
    for c in input.chars() {
        out.push_str(fold(c).and_then(lookup).unwrap_or(FALLBACK_GLYPH));
    }
    out
}

fn fold(c: char) -> Option<char> {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(single), None) => Some(single),
        _ => None,
    }
}
