//! Bring raw transcripts and target sentences to one comparable form.

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

lazy_static::lazy_static! {
    static ref PUNCTUATION: Regex = Regex::new(r"\p{P}+").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Normalize a raw string for word comparison.
///
/// Applies, in order:
/// 1. Unicode NFC composition, so precomposed and decomposed diacritics
///    compare equal ("ả" vs "a" + U+0309)
/// 2. Lowercase
/// 3. Removal of every Unicode punctuation character
/// 4. Whitespace runs collapsed to one space, ends trimmed
///
/// Punctuation is removed rather than replaced, so "con,mèo" becomes
/// "conmèo".
pub fn normalize(raw: &str) -> String {
    let composed: String = raw.nfc().collect();
    let lowered = composed.to_lowercase();
    let stripped = PUNCTUATION.replace_all(&lowered, "");
    WHITESPACE.replace_all(stripped.trim(), " ").into_owned()
}
