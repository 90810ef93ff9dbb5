//! Word similarity: exact match, bounded edit distance, phonetic confusions.

use unicode_normalization::UnicodeNormalization;

use crate::config::{ConfusionPair, EngineConfig};

/// Character-level Levenshtein distance (unit insert/delete/substitute).
///
/// Counts Unicode scalar values, so NFC-composed Vietnamese vowels with
/// tone marks are one character each.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    strsim::levenshtein(a, b)
}

/// Decides whether two tokens count as the same word.
///
/// Immutable after construction. The aligner and the classifier must share
/// one judge so that alignment and classification agree.
#[derive(Debug, Clone)]
pub struct SimilarityJudge {
    confusion_pairs: Vec<ConfusionPair>,
    max_edit_distance: usize,
}

impl SimilarityJudge {
    pub fn new(confusion_pairs: Vec<ConfusionPair>, max_edit_distance: usize) -> Self {
        Self {
            confusion_pairs,
            max_edit_distance,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.confusion_pairs.clone(), config.max_edit_distance)
    }

    pub fn max_edit_distance(&self) -> usize {
        self.max_edit_distance
    }

    /// True if `spoken` should be accepted as a reading of `original`.
    ///
    /// Checks, in order: equality, edit distance within the threshold,
    /// then each confusion pair `(left, right)`: `left -> right` applied to
    /// `a` equals `b`, or `right -> left` applied to `b` equals `a`.
    pub fn are_similar(&self, a: &str, b: &str) -> bool {
        if a == b {
            return true;
        }
        if levenshtein_distance(a, b) <= self.max_edit_distance {
            return true;
        }
        self.phonetic_equivalent(a, b)
    }

    /// Confusion-table check on its own (step 3 of [`Self::are_similar`]).
    pub fn phonetic_equivalent(&self, a: &str, b: &str) -> bool {
        self.confusion_pairs.iter().any(|pair| {
            (a.contains(pair.left.as_str()) && a.replace(&pair.left, &pair.right) == b)
                || (b.contains(pair.right.as_str()) && b.replace(&pair.right, &pair.left) == a)
        })
    }

    /// True if `b` is `a` read with a confused opening consonant.
    ///
    /// The table lists onset confusions, so a pair only applies to the start
    /// of the word: `a` must begin with one side and `b` with the other.
    /// After swapping the onset, the two words may differ only in tone marks
    /// ("giữa" read as "dựa"). Any other difference is a different word.
    pub fn phonetically_linked(&self, a: &str, b: &str) -> bool {
        let target = strip_tone_marks(b);
        self.confusion_pairs.iter().any(|pair| {
            [(&pair.left, &pair.right), (&pair.right, &pair.left)]
                .into_iter()
                .any(|(from, to)| match a.strip_prefix(from.as_str()) {
                    Some(rest) if b.starts_with(to.as_str()) => {
                        strip_tone_marks(&format!("{to}{rest}")) == target
                    }
                    _ => false,
                })
        })
    }
}

/// Vietnamese tone marks as combining characters: huyền, sắc, ngã, hỏi, nặng.
/// Vowel quality marks (circumflex, breve, horn) are not tones and stay.
const TONE_MARKS: [char; 5] = ['\u{0300}', '\u{0301}', '\u{0303}', '\u{0309}', '\u{0323}'];

fn strip_tone_marks(word: &str) -> String {
    word.nfd().filter(|c| !TONE_MARKS.contains(c)).nfc().collect()
}

impl Default for SimilarityJudge {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn judge_with(pairs: &[(&str, &str)]) -> SimilarityJudge {
        SimilarityJudge::new(
            pairs.iter().map(|(l, r)| ConfusionPair::new(l, r)).collect(),
            2,
        )
    }

    #[test]
    fn test_levenshtein_basic() {
        assert_eq!(levenshtein_distance("", ""), 0);
        assert_eq!(levenshtein_distance("mèo", ""), 3);
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
        assert_eq!(levenshtein_distance("thảm", "ghế"), 3);
    }

    #[test]
    fn test_levenshtein_counts_chars_not_bytes() {
        // "ả" and "a" differ by one character, several bytes
        assert_eq!(levenshtein_distance("thảm", "tham"), 1);
        assert_eq!(levenshtein_distance("ngồi", "ngôi"), 1);
    }

    #[test]
    fn test_similar_exact() {
        let judge = SimilarityJudge::default();
        assert!(judge.are_similar("mèo", "mèo"));
        assert!(judge.are_similar("", ""));
    }

    #[test]
    fn test_similar_within_distance() {
        let judge = SimilarityJudge::default();
        assert!(judge.are_similar("trời", "chời"));
        assert!(judge.are_similar("ngồi", "ngôi"));
        assert!(!judge.are_similar("thảm", "ghế"));
        assert!(!judge.are_similar("mèo", "ngồi"));
    }

    #[test]
    fn test_similar_threshold_configurable() {
        let strict = SimilarityJudge::new(Vec::new(), 0);
        assert!(!strict.are_similar("ngồi", "ngôi"));
        assert!(strict.are_similar("ngồi", "ngồi"));
    }

    #[test]
    fn test_phonetic_equivalent_beyond_distance() {
        let judge = judge_with(&[("ngh", "x")]);
        // distance("nghe", "xe") == 3, rescued only by the confusion pair
        assert_eq!(levenshtein_distance("nghe", "xe"), 3);
        assert!(judge.are_similar("nghe", "xe"));
    }

    #[test]
    fn test_phonetic_equivalent_orientation() {
        let judge = judge_with(&[("ngh", "x")]);
        assert!(judge.phonetic_equivalent("nghe", "xe"));
        // Neither check maps an original "x" onto a spoken "ngh"
        assert!(!judge.phonetic_equivalent("xe", "nghe"));
    }

    #[test]
    fn test_phonetic_equivalent_replaces_all() {
        let judge = judge_with(&[("s", "x")]);
        assert!(judge.phonetic_equivalent("sass", "xaxx"));
    }

    #[test]
    fn test_phonetically_linked() {
        let judge = SimilarityJudge::default();
        // gi -> d, then only the tone differs
        assert!(judge.phonetically_linked("giữa", "dựa"));
        assert!(judge.phonetically_linked("xinh", "sính"));
        assert!(!judge.phonetically_linked("thảm", "ghế"));
    }

    #[test]
    fn test_phonetically_linked_rejects_other_words() {
        let judge = SimilarityJudge::default();
        // Onsets are a confusion pair but the rest of the word differs
        assert!(!judge.phonetically_linked("con", "không"));
        assert!(!judge.phonetically_linked("cá", "kẹo"));
        assert!(!judge.phonetically_linked("sông", "xanh"));
        assert!(!judge.phonetically_linked("trường", "chuối"));
    }

    #[test]
    fn test_phonetically_linked_onset_only() {
        let judge = judge_with(&[("s", "x")]);
        // "s" inside the word is not an onset
        assert!(!judge.phonetically_linked("tôs", "tôx"));
        assert!(judge.phonetically_linked("sa", "xà"));
    }

    #[test]
    fn test_strip_tone_marks_keeps_vowel_quality() {
        assert_eq!(strip_tone_marks("dựa"), "dưa");
        assert_eq!(strip_tone_marks("trường"), "trương");
        assert_eq!(strip_tone_marks("ngồi"), "ngôi");
        assert_eq!(strip_tone_marks("thảm"), "tham");
    }

    #[test]
    fn test_default_uses_config_table() {
        let judge = SimilarityJudge::default();
        assert_eq!(judge.confusion_pairs.len(), 6);
        assert_eq!(judge.max_edit_distance(), 2);
    }
}
