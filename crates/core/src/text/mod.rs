//! Text preparation: normalization and word tokenization.

pub mod normalize;
pub mod tokenize;

pub use normalize::normalize;
pub use tokenize::{get_tokenizer, Tokenizer, UnicodeWordTokenizer, WhitespaceTokenizer};
