//! Grades a learner's spoken or handwritten rendition of a target sentence
//! against the original text.

pub mod compare;
pub mod config;
pub mod error;
pub mod text;
pub mod types;

pub use compare::ComparisonEngine;
pub use config::{ConfusionPair, EngineConfig, FeedbackMessages};
pub use error::ConfigError;
pub use text::Tokenizer;
pub use types::{
    AlignmentOp, ComparisonResult, MistakeSeverity, MistakeSummary, MistakeType,
    PerformanceBand, TextMistake,
};
