//! Confidence scoring
//!
//! Confidence in a fused assessment grows with the evidence behind it. Two
//! policies are available:
//!
//! 1. **Modality count** (default): 1 modality → 0.65, 2 → 0.80, 3 → 0.92
//! 2. **Classifier availability**: 0.85 when the text sentiment came from the
//!    classifier, 0.65 otherwise
//!
//! # Example
//!
//! ```
//! use mindguard::analysis::confidence::{compute_confidence, ConfidencePolicy};
//! use mindguard::analysis::result::ActiveModalities;
//!
//! let active = ActiveModalities::new(true, true, false);
//! let confidence = compute_confidence(ConfidencePolicy::ModalityCount, &active, None);
//! assert_eq!(confidence, 0.80);
//! ```

use serde::{Deserialize, Serialize};

use super::result::ActiveModalities;
use crate::features::text::SentimentSource;

/// Confidence with one active modality
pub const SINGLE_MODALITY_CONFIDENCE: f32 = 0.65;

/// Confidence with two active modalities
pub const DUAL_MODALITY_CONFIDENCE: f32 = 0.80;

/// Confidence with all three modalities
pub const FULL_MODALITY_CONFIDENCE: f32 = 0.92;

/// Confidence when the sentiment classifier answered (classifier policy)
pub const CLASSIFIER_CONFIDENCE: f32 = 0.85;

/// How assessment confidence is derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConfidencePolicy {
    /// Scale with the number of active modalities
    #[default]
    ModalityCount,
    /// Depend only on whether the sentiment classifier answered
    ClassifierAvailability,
}

/// Compute confidence for a fused assessment
///
/// # Arguments
///
/// * `policy` - Which rule to apply
/// * `active` - Modalities that contributed to the fusion
/// * `sentiment_source` - Where the text sentiment came from, if text was analyzed
///
/// # Returns
///
/// Confidence in [0, 1]; 0 when no modality is active
pub fn compute_confidence(
    policy: ConfidencePolicy,
    active: &ActiveModalities,
    sentiment_source: Option<SentimentSource>,
) -> f32 {
    if active.is_empty() {
        return 0.0;
    }

    match policy {
        ConfidencePolicy::ModalityCount => match active.count() {
            1 => SINGLE_MODALITY_CONFIDENCE,
            2 => DUAL_MODALITY_CONFIDENCE,
            _ => FULL_MODALITY_CONFIDENCE,
        },
        ConfidencePolicy::ClassifierAvailability => {
            if active.text && sentiment_source == Some(SentimentSource::Classifier) {
                CLASSIFIER_CONFIDENCE
            } else {
                SINGLE_MODALITY_CONFIDENCE
            }
        }
    }
}
