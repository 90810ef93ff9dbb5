//! Public entry point: grade a reading attempt against the target text.
//!
//! Pipeline per call: normalize → tokenize → align → classify → score.
//! The engine holds only read-only configuration and can be shared across
//! threads by reference.

use std::collections::BTreeSet;

use crate::compare::align::align;
use crate::compare::classify::classify;
use crate::compare::feedback::{accuracy, feedback_for};
use crate::compare::similarity::SimilarityJudge;
use crate::config::{EngineConfig, FeedbackMessages};
use crate::error::ConfigError;
use crate::text::normalize::normalize;
use crate::text::tokenize::{get_tokenizer, Tokenizer, UnicodeWordTokenizer};
use crate::types::{AlignmentOp, ComparisonResult, TextMistake};

/// Text comparison engine.
pub struct ComparisonEngine {
    judge: SimilarityJudge,
    tokenizer: Box<dyn Tokenizer>,
    feedback: FeedbackMessages,
}

impl ComparisonEngine {
    /// Build from a config, resolving the tokenizer by name.
    pub fn new(config: &EngineConfig) -> Result<Self, ConfigError> {
        let tokenizer = get_tokenizer(&config.tokenizer)?;
        Self::with_tokenizer(config, tokenizer)
    }

    /// Build with a caller-supplied tokenizer (locale-specific segmenters).
    /// The config's `tokenizer` name is ignored.
    pub fn with_tokenizer(
        config: &EngineConfig,
        tokenizer: Box<dyn Tokenizer>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        log::debug!(
            "Comparison engine: tokenizer '{}', {} confusion pairs, max edit distance {}",
            tokenizer.name(),
            config.confusion_pairs.len(),
            config.max_edit_distance
        );
        Ok(Self {
            judge: SimilarityJudge::from_config(config),
            tokenizer,
            feedback: config.feedback.clone(),
        })
    }

    pub fn judge(&self) -> &SimilarityJudge {
        &self.judge
    }

    pub fn tokenizer_name(&self) -> &str {
        self.tokenizer.name()
    }

    /// Normalized word tokens of a raw string.
    pub fn tokens(&self, raw: &str) -> Vec<String> {
        self.tokenizer.tokenize(&normalize(raw))
    }

    /// Word alignment of two raw strings.
    pub fn align_texts(&self, original: &str, spoken: &str) -> Vec<AlignmentOp> {
        align(&self.tokens(original), &self.tokens(spoken), &self.judge)
    }

    /// Grade `spoken` against `original`.
    pub fn compare_texts(&self, original: &str, spoken: &str) -> ComparisonResult {
        let original_tokens = self.tokens(original);
        let spoken_tokens = self.tokens(spoken);
        log::debug!(
            "Comparing {} original token(s) against {} spoken token(s)",
            original_tokens.len(),
            spoken_tokens.len()
        );

        let mistakes = self.mistakes_for(&original_tokens, &spoken_tokens);
        let accuracy = accuracy(original_tokens.len(), mistakes.len());
        let matched_words = self.matched_words(&original_tokens, &spoken_tokens);
        let feedback = feedback_for(accuracy, &self.feedback);

        ComparisonResult {
            original_text: original.to_string(),
            spoken_text: spoken.to_string(),
            accuracy,
            mistakes,
            matched_words,
            feedback,
            original_word_count: original_tokens.len(),
        }
    }

    /// The `mistakes` field of [`Self::compare_texts`].
    pub fn identify_mistakes(&self, original: &str, spoken: &str) -> Vec<TextMistake> {
        self.mistakes_for(&self.tokens(original), &self.tokens(spoken))
    }

    /// The `accuracy` field of [`Self::compare_texts`].
    pub fn calculate_accuracy(&self, original: &str, spoken: &str) -> f64 {
        let original_tokens = self.tokens(original);
        let mistakes = self.mistakes_for(&original_tokens, &self.tokens(spoken));
        accuracy(original_tokens.len(), mistakes.len())
    }

    /// Feedback text for an existing result's accuracy.
    pub fn generate_feedback(&self, result: &ComparisonResult) -> String {
        feedback_for(result.accuracy, &self.feedback)
    }

    /// Grade many `(original, spoken)` pairs, in input order.
    pub fn compare_batch<S: AsRef<str>>(&self, pairs: &[(S, S)]) -> Vec<ComparisonResult> {
        pairs
            .iter()
            .map(|(original, spoken)| self.compare_texts(original.as_ref(), spoken.as_ref()))
            .collect()
    }

    /// Nothing to read means nothing to get wrong: extra words against an
    /// empty original are not reported.
    fn mistakes_for(&self, original: &[String], spoken: &[String]) -> Vec<TextMistake> {
        if original.is_empty() {
            return Vec::new();
        }
        classify(&align(original, spoken, &self.judge), &self.judge)
    }

    /// Original tokens with a similar spoken token anywhere, regardless of
    /// alignment. Used for highlighting only; can disagree with `mistakes`.
    fn matched_words(&self, original: &[String], spoken: &[String]) -> BTreeSet<String> {
        original
            .iter()
            .filter(|o| spoken.iter().any(|s| self.judge.are_similar(o, s)))
            .cloned()
            .collect()
    }
}

impl Default for ComparisonEngine {
    fn default() -> Self {
        let config = EngineConfig::default();
        Self {
            judge: SimilarityJudge::from_config(&config),
            tokenizer: Box::new(UnicodeWordTokenizer),
            feedback: config.feedback,
        }
    }
}

impl std::fmt::Debug for ComparisonEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComparisonEngine")
            .field("judge", &self.judge)
            .field("tokenizer", &self.tokenizer.name())
            .finish()
    }
}
