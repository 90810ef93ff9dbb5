//! Reading comparison: word similarity, alignment, mistake classification
//! and scoring.

pub mod align;
pub mod classify;
pub mod engine;
pub mod feedback;
pub mod similarity;

pub use engine::ComparisonEngine;
pub use similarity::{levenshtein_distance, SimilarityJudge};
