// Braille transliteration
// Character-by-character substitution of text into Unicode Braille cells

mod table;
mod transliterate;

pub use table::{lookup, CODE_TABLE, FALLBACK_GLYPH};
pub use transliterate::transliterate;
