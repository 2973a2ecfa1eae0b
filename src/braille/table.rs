// Fixed character-to-glyph code table
// Letters map to single Grade 1 Braille cells (U+2800 block); a handful of
// punctuation and whitespace characters map to themselves.

/// Glyph emitted for any character that has no entry in [`CODE_TABLE`].
pub const FALLBACK_GLYPH: &str = "?";

/// The code table. Keys are lowercase and unique.
pub static CODE_TABLE: &[(char, &str)] = &[
    ('a', "⠁"),
    ('b', "⠃"),
    ('c', "⠉"),
    ('d', "⠙"),
    ('e', "⠑"),
    ('f', "⠋"),
    ('g', "⠛"),
    ('h', "⠓"),
    ('i', "⠊"),
    ('j', "⠚"),
    ('k', "⠅"),
    ('l', "⠇"),
    ('m', "⠍"),
    ('n', "⠝"),
    ('o', "⠕"),
    ('p', "⠏"),
    ('q', "⠟"),
    ('r', "⠗"),
    ('s', "⠎"),
    ('t', "⠞"),
    ('u', "⠥"),
    ('v', "⠧"),
    ('w', "⠺"),
    ('x', "⠭"),
    ('y', "⠽"),
    ('z', "⠵"),
    // Pass-through
    (' ', " "),
    ('.', "."),
    (',', ","),
    ('?', "?"),
    ('!', "!"),
    ('\n', "\n"),
];

/// Look up the glyph for a character exactly as given (no case folding).
pub fn lookup(c: char) -> Option<&'static str> {
    CODE_TABLE
        .iter()
        .find(|(key, _)| *key == c)
        .map(|(_, glyph)| *glyph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_keys_are_unique() {
        let keys: HashSet<char> = CODE_TABLE.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys.len(), CODE_TABLE.len());
    }

    #[test]
    fn test_letter_glyphs_are_braille_cells() {
        for (key, glyph) in CODE_TABLE.iter().filter(|(k, _)| k.is_ascii_lowercase()) {
            let mut chars = glyph.chars();
            let cell = chars.next().unwrap();
            assert!(chars.next().is_none(), "{key} maps to more than one cell");
            assert!(
                ('\u{2801}'..='\u{28FF}').contains(&cell),
                "{key} maps outside the Braille block"
            );
        }
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert_eq!(lookup('a'), Some("⠁"));
        assert_eq!(lookup('A'), None);
        assert_eq!(lookup('\''), None);
    }
}
