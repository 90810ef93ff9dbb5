//! Turn alignment ops into typed, severity-scored reading mistakes.

use crate::compare::similarity::{levenshtein_distance, SimilarityJudge};
use crate::types::{AlignmentOp, MistakeSeverity, MistakeType, TextMistake};

/// Classify every non-match op. Positions index into `ops`.
pub fn classify(ops: &[AlignmentOp], judge: &SimilarityJudge) -> Vec<TextMistake> {
    ops.iter()
        .enumerate()
        .filter_map(|(position, op)| classify_op(position, op, judge))
        .collect()
}

fn classify_op(position: usize, op: &AlignmentOp, judge: &SimilarityJudge) -> Option<TextMistake> {
    let (expected_word, actual_word, mistake_type, severity) = match op {
        AlignmentOp::Match { .. } => return None,
        AlignmentOp::Deletion { original } => (
            original.clone(),
            String::new(),
            MistakeType::Omission,
            MistakeSeverity::Moderate,
        ),
        AlignmentOp::Insertion { spoken } => (
            String::new(),
            spoken.clone(),
            MistakeType::Insertion,
            MistakeSeverity::Minor,
        ),
        AlignmentOp::Substitution { original, spoken } => {
            let mistake_type = if judge.phonetically_linked(original, spoken) {
                MistakeType::Mispronunciation
            } else {
                MistakeType::Substitution
            };
            let distance = levenshtein_distance(original, spoken);
            (
                original.clone(),
                spoken.clone(),
                mistake_type,
                MistakeSeverity::from_distance(distance),
            )
        }
    };

    Some(TextMistake {
        position,
        expected_word,
        actual_word,
        mistake_type,
        severity,
    })
}
