//! Engine configuration: phonetic confusion table, tokenizer choice,
//! similarity threshold and feedback text.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::PerformanceBand;

lazy_static::lazy_static! {
    /// Vietnamese sound spellings that young readers commonly swap.
    static ref VIETNAMESE_CONFUSIONS: Vec<ConfusionPair> = [
        ("d", "gi"),
        ("tr", "ch"),
        ("s", "x"),
        ("f", "ph"),
        ("c", "k"),
        ("qu", "kw"),
    ]
    .iter()
    .map(|(l, r)| ConfusionPair::new(l, r))
    .collect();

    static ref DEFAULT_CONFIG: EngineConfig = EngineConfig {
        tokenizer: "unicode".to_string(),
        max_edit_distance: EngineConfig::DEFAULT_MAX_EDIT_DISTANCE,
        confusion_pairs: VIETNAMESE_CONFUSIONS.clone(),
        feedback: FeedbackMessages::default(),
    };
}

/// Two spellings of one sound, substitutable in either direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionPair {
    pub left: String,
    pub right: String,
}

impl ConfusionPair {
    pub fn new(left: &str, right: &str) -> Self {
        Self {
            left: left.to_string(),
            right: right.to_string(),
        }
    }
}

/// Encouragement text per performance band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackMessages {
    pub excellent: String,
    pub good: String,
    pub fair: String,
    pub needs_improvement: String,
}

impl Default for FeedbackMessages {
    fn default() -> Self {
        Self {
            excellent: "Xuất sắc! Con đọc rất chính xác!".to_string(),
            good: "Tốt lắm! Con đọc gần đúng hết rồi!".to_string(),
            fair: "Khá tốt! Con luyện thêm một chút nữa nhé!".to_string(),
            needs_improvement: "Cố gắng lên! Con hãy thử đọc lại nhé!".to_string(),
        }
    }
}

impl FeedbackMessages {
    pub fn for_band(&self, band: PerformanceBand) -> &str {
        match band {
            PerformanceBand::Excellent => &self.excellent,
            PerformanceBand::Good => &self.good,
            PerformanceBand::Fair => &self.fair,
            PerformanceBand::NeedsImprovement => &self.needs_improvement,
        }
    }
}

/// Read-only settings for a [`crate::compare::ComparisonEngine`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Tokenizer backend name, see [`crate::text::tokenize::get_tokenizer`]
    pub tokenizer: String,
    /// Largest character edit distance at which two words still count as
    /// the same word
    pub max_edit_distance: usize,
    pub confusion_pairs: Vec<ConfusionPair>,
    pub feedback: FeedbackMessages,
}

impl EngineConfig {
    pub const DEFAULT_MAX_EDIT_DISTANCE: usize = 2;

    /// Load and validate a JSON config file. Missing fields take defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        let config: Self = serde_json::from_str(&data).map_err(|e| ConfigError::json(path, e))?;
        config.validate()?;
        log::debug!(
            "Loaded config from {} ({} confusion pairs, tokenizer '{}')",
            path.display(),
            config.confusion_pairs.len(),
            config.tokenizer
        );
        Ok(config)
    }

    /// Reject confusion pairs with an empty side or listed twice (in either
    /// orientation).
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen: HashSet<(&str, &str)> = HashSet::new();
        for (index, pair) in self.confusion_pairs.iter().enumerate() {
            if pair.left.is_empty() || pair.right.is_empty() {
                return Err(ConfigError::EmptyConfusionPair { index });
            }
            let key = if pair.left <= pair.right {
                (pair.left.as_str(), pair.right.as_str())
            } else {
                (pair.right.as_str(), pair.left.as_str())
            };
            if !seen.insert(key) {
                return Err(ConfigError::DuplicateConfusionPair {
                    left: pair.left.clone(),
                    right: pair.right.clone(),
                });
            }
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        DEFAULT_CONFIG.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.tokenizer, "unicode");
        assert_eq!(config.max_edit_distance, 2);
        assert_eq!(config.confusion_pairs.len(), 6);
        assert!(config.confusion_pairs.contains(&ConfusionPair::new("tr", "ch")));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_feedback_for_band() {
        let messages = FeedbackMessages::default();
        assert_eq!(messages.for_band(PerformanceBand::Excellent), messages.excellent);
        assert_eq!(
            messages.for_band(PerformanceBand::NeedsImprovement),
            messages.needs_improvement
        );
        assert_ne!(messages.good, messages.fair);
    }

    #[test]
    fn test_validate_empty_side() {
        let config = EngineConfig {
            confusion_pairs: vec![ConfusionPair::new("s", "x"), ConfusionPair::new("", "z")],
            ..EngineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyConfusionPair { index: 1 })
        ));
    }

    #[test]
    fn test_validate_duplicate_reversed() {
        let config = EngineConfig {
            confusion_pairs: vec![ConfusionPair::new("s", "x"), ConfusionPair::new("x", "s")],
            ..EngineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DuplicateConfusionPair { .. })
        ));
    }

    #[test]
    fn test_load_partial_file() {
        let file = write_config(
            r#"{
                "max_edit_distance": 1,
                "confusion_pairs": [{"left": "ph", "right": "f"}]
            }"#,
        );
        let config = EngineConfig::load(file.path()).unwrap();
        assert_eq!(config.max_edit_distance, 1);
        assert_eq!(config.confusion_pairs, vec![ConfusionPair::new("ph", "f")]);
        // Untouched fields keep their defaults
        assert_eq!(config.tokenizer, "unicode");
        assert_eq!(config.feedback, FeedbackMessages::default());
    }

    #[test]
    fn test_load_ignores_unknown_keys() {
        let file = write_config(r#"{"locale": "vi", "tokenizer": "whitespace"}"#);
        let config = EngineConfig::load(file.path()).unwrap();
        assert_eq!(config.tokenizer, "whitespace");
    }

    #[test]
    fn test_load_invalid_json() {
        let file = write_config("{ not json");
        assert!(matches!(
            EngineConfig::load(file.path()),
            Err(ConfigError::Json { .. })
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = EngineConfig::load(Path::new("/nonexistent/readalong.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/readalong.json"));
    }

    #[test]
    fn test_load_rejects_invalid_pairs() {
        let file = write_config(r#"{"confusion_pairs": [{"left": "d", "right": ""}]}"#);
        assert!(matches!(
            EngineConfig::load(file.path()),
            Err(ConfigError::EmptyConfusionPair { index: 0 })
        ));
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = EngineConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: EngineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
