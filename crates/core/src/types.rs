use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// One step of the word alignment between original and spoken tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum AlignmentOp {
    /// Tokens judged similar. Both are kept since similar is not identical.
    Match { original: String, spoken: String },
    Substitution { original: String, spoken: String },
    /// Original token with no spoken counterpart
    Deletion { original: String },
    /// Spoken token with no original counterpart
    Insertion { spoken: String },
}

impl AlignmentOp {
    /// Original-side token, if this op consumes one.
    pub fn original(&self) -> Option<&str> {
        match self {
            Self::Match { original, .. }
            | Self::Substitution { original, .. }
            | Self::Deletion { original } => Some(original),
            Self::Insertion { .. } => None,
        }
    }

    /// Spoken-side token, if this op consumes one.
    pub fn spoken(&self) -> Option<&str> {
        match self {
            Self::Match { spoken, .. }
            | Self::Substitution { spoken, .. }
            | Self::Insertion { spoken } => Some(spoken),
            Self::Deletion { .. } => None,
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self, Self::Match { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MistakeType {
    Substitution,
    Omission,
    Insertion,
    Mispronunciation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MistakeSeverity {
    Minor,
    Moderate,
    Major,
}

impl MistakeSeverity {
    /// Severity for a word-for-word swap, from the character edit distance
    /// between the two words.
    pub fn from_distance(distance: usize) -> Self {
        match distance {
            0 | 1 => Self::Minor,
            2 => Self::Moderate,
            _ => Self::Major,
        }
    }
}

/// A single reading mistake located in the alignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextMistake {
    /// Index into the alignment sequence (matches included)
    pub position: usize,
    /// Word from the original text; empty for insertions
    pub expected_word: String,
    /// Word the learner produced; empty for omissions
    pub actual_word: String,
    pub mistake_type: MistakeType,
    pub severity: MistakeSeverity,
}

/// Accuracy range used to pick feedback text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceBand {
    Excellent,
    Good,
    Fair,
    NeedsImprovement,
}

impl PerformanceBand {
    pub const EXCELLENT_MIN: f64 = 0.95;
    pub const GOOD_MIN: f64 = 0.85;
    pub const FAIR_MIN: f64 = 0.70;

    pub fn from_accuracy(accuracy: f64) -> Self {
        if accuracy >= Self::EXCELLENT_MIN {
            Self::Excellent
        } else if accuracy >= Self::GOOD_MIN {
            Self::Good
        } else if accuracy >= Self::FAIR_MIN {
            Self::Fair
        } else {
            Self::NeedsImprovement
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::NeedsImprovement => "needs_improvement",
        }
    }
}

/// Per-type mistake counts for scoring consumers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MistakeSummary {
    pub substitutions: usize,
    pub omissions: usize,
    pub insertions: usize,
    pub mispronunciations: usize,
    /// Original words not charged with a mistake (floored at zero)
    pub correct_words: usize,
}

impl MistakeSummary {
    pub fn total(&self) -> usize {
        self.substitutions + self.omissions + self.insertions + self.mispronunciations
    }
}

/// Outcome of grading one reading attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// Raw original text as passed in
    pub original_text: String,
    /// Raw spoken/handwritten text as passed in
    pub spoken_text: String,
    /// Fraction of original words read correctly, in [0, 1]
    pub accuracy: f64,
    pub mistakes: Vec<TextMistake>,
    /// Original tokens with a similar counterpart anywhere in the spoken text
    pub matched_words: BTreeSet<String>,
    pub feedback: String,
    /// Number of tokens in the normalized original text
    pub original_word_count: usize,
}

impl ComparisonResult {
    pub fn band(&self) -> PerformanceBand {
        PerformanceBand::from_accuracy(self.accuracy)
    }

    pub fn mistake_summary(&self) -> MistakeSummary {
        let mut summary = MistakeSummary::default();
        for mistake in &self.mistakes {
            match mistake.mistake_type {
                MistakeType::Substitution => summary.substitutions += 1,
                MistakeType::Omission => summary.omissions += 1,
                MistakeType::Insertion => summary.insertions += 1,
                MistakeType::Mispronunciation => summary.mispronunciations += 1,
            }
        }
        summary.correct_words = self.original_word_count.saturating_sub(self.mistakes.len());
        summary
    }

    /// Serialize for JSON output.
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "original": self.original_text,
            "spoken": self.spoken_text,
            "accuracy": self.accuracy,
            "band": self.band().label(),
            "feedback": self.feedback,
            "mistakes": self.mistakes,
            "matched_words": self.matched_words,
            "summary": self.mistake_summary(),
        })
    }
}
