//! Accuracy scoring and feedback text.

use crate::config::FeedbackMessages;
use crate::types::PerformanceBand;

/// Share of original words not charged with a mistake.
///
/// Insertions count as mistakes too, so an over-long but otherwise perfect
/// reading scores below 1.0. No original words scores 1.0.
pub fn accuracy(original_word_count: usize, mistake_count: usize) -> f64 {
    if original_word_count == 0 {
        return 1.0;
    }
    let correct = original_word_count.saturating_sub(mistake_count);
    correct as f64 / original_word_count as f64
}

/// Feedback text for the band `accuracy` falls in.
pub fn feedback_for(accuracy: f64, messages: &FeedbackMessages) -> String {
    let band = PerformanceBand::from_accuracy(accuracy);
    log::debug!("accuracy {:.3} -> band {}", accuracy, band.label());
    messages.for_band(band).to_string()
}
