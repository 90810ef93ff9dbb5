//! Tokenizer interface and backends.
//!
//! Splits normalized text into word tokens:
//! - UnicodeWordTokenizer: UAX #29 word boundaries (default)
//! - WhitespaceTokenizer: plain whitespace split

use unicode_segmentation::UnicodeSegmentation;

use crate::error::ConfigError;

/// Word tokenizer backend.
pub trait Tokenizer: Send + Sync {
    /// Backend name for config/display.
    fn name(&self) -> &str;

    /// Split normalized text into non-empty word tokens, in order.
    ///
    /// Must be deterministic: the aligner consumes tokens by position.
    fn tokenize(&self, normalized: &str) -> Vec<String>;
}

/// Unicode word-boundary segmentation.
///
/// Stands in for a platform locale tokenizer. Vietnamese separates
/// syllables with spaces, so each syllable becomes one token.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeWordTokenizer;

impl Tokenizer for UnicodeWordTokenizer {
    fn name(&self) -> &str {
        "unicode"
    }

    fn tokenize(&self, normalized: &str) -> Vec<String> {
        normalized
            .split_word_bounds()
            .filter(|segment| !segment.trim().is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Whitespace-delimited tokens, for scripts where UAX #29 splits too finely.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceTokenizer;

impl Tokenizer for WhitespaceTokenizer {
    fn name(&self) -> &str {
        "whitespace"
    }

    fn tokenize(&self, normalized: &str) -> Vec<String> {
        normalized.split_whitespace().map(str::to_string).collect()
    }
}

/// Get a tokenizer backend by name.
///
/// Names:
/// - "unicode": UAX #29 word boundaries.
/// - "whitespace": split on Unicode whitespace.
pub fn get_tokenizer(name: &str) -> Result<Box<dyn Tokenizer>, ConfigError> {
    match name {
        "unicode" => Ok(Box::new(UnicodeWordTokenizer)),
        "whitespace" => Ok(Box::new(WhitespaceTokenizer)),
        _ => Err(ConfigError::UnknownTokenizer {
            name: name.to_string(),
        }),
    }
}
