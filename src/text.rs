// Cleanup applied to raw OCR output before it is shown, spoken or transliterated

/// Trim the ends and collapse every run of whitespace into a single space.
pub fn normalize_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Whether normalized text is long enough to be worth reading out.
/// OCR on an empty scene tends to produce a stray character or two.
pub fn is_worth_reading(clean: &str, min_chars: usize) -> bool {
    clean.chars().count() >= min_chars
}
