//! Complete assessment
//!
//! Bundles fusion, alerts, recommendations, explanation and metadata into the
//! single structure handed to presentation layers.

use serde::{Deserialize, Serialize};

use super::alerts::{generate_alerts, generate_recommendations, Alert, Recommendation};
use super::confidence::ConfidencePolicy;
use super::explain::{explain, Explanation};
use super::fusion::fuse;
use super::metadata::{AssessmentMetadata, CLASSIFIER_FALLBACK_WARNING};
use super::result::FusionResult;
use crate::features::audio::AudioIndicators;
use crate::features::image::ImageIndicators;
use crate::features::text::{SentimentSource, TextIndicators};

/// Fused assessment with everything derived from it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    /// Fused risk
    pub fusion: FusionResult,
    /// Prioritized alerts
    pub alerts: Vec<Alert>,
    /// Categorized recommendations
    pub recommendations: Vec<Recommendation>,
    /// Feature importance, decision path, counterfactuals
    pub explanation: Explanation,
    /// Version, methods and warnings
    pub metadata: AssessmentMetadata,
}

/// Build a complete assessment from whichever modalities are present
///
/// # Returns
///
/// `None` when no modality is present
pub fn assess(
    text: Option<&TextIndicators>,
    audio: Option<&AudioIndicators>,
    image: Option<&ImageIndicators>,
    policy: ConfidencePolicy,
) -> Option<Assessment> {
    let fusion = fuse(text, audio, image, policy)?;

    let risk_indicators = text.map_or(&[][..], |t| t.risk_indicators.as_slice());
    let alerts = generate_alerts(&fusion, risk_indicators);
    let recommendations = generate_recommendations(&fusion);
    let explanation = explain(&fusion, text);

    let mut metadata = AssessmentMetadata::default();
    if let Some(t) = text {
        metadata.methods_used.push("lexicon_scan".to_string());
        match t.sentiment_source {
            SentimentSource::Classifier => {
                metadata.methods_used.push("sentiment_classifier".to_string())
            }
            SentimentSource::Fallback => {
                metadata.warnings.push(CLASSIFIER_FALLBACK_WARNING.to_string())
            }
        }
    }
    if audio.is_some() {
        metadata.methods_used.push("rms_zero_crossing".to_string());
    }
    if image.is_some() {
        metadata.methods_used.push("region_statistics".to_string());
    }
    metadata.methods_used.push(
        match policy {
            ConfidencePolicy::ModalityCount => "modality_count_confidence",
            ConfidencePolicy::ClassifierAvailability => "classifier_availability_confidence",
        }
        .to_string(),
    );

    Some(Assessment {
        fusion,
        alerts,
        recommendations,
        explanation,
        metadata,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::result::RiskLevel;

    #[test]
    fn test_empty_assessment() {
        assert!(assess(None, None, None, ConfidencePolicy::ModalityCount).is_none());
    }

    #[test]
    fn test_audio_only_assessment() {
        let audio = AudioIndicators::neutral();
        let assessment = assess(None, Some(&audio), None, ConfidencePolicy::ModalityCount).unwrap();

        assert_eq!(assessment.fusion.risk_level, RiskLevel::Low);
        assert_eq!(assessment.alerts.len(), 1);
        assert_eq!(assessment.alerts[0].id, "stable");
        assert_eq!(assessment.recommendations.len(), 4);
        assert!(assessment.metadata.warnings.is_empty());
        assert!(assessment
            .metadata
            .methods_used
            .contains(&"rms_zero_crossing".to_string()));
    }

    #[test]
    fn test_serialized_shape() {
        let image = ImageIndicators::neutral();
        let assessment = assess(None, None, Some(&image), ConfidencePolicy::ModalityCount).unwrap();
        let json = serde_json::to_value(&assessment).unwrap();

        assert!(json["fusion"]["overallRisk"].is_number());
        assert!(json["explanation"]["decisionPath"].is_array());
        assert_eq!(
            json["metadata"]["algorithmVersion"],
            env!("CARGO_PKG_VERSION")
        );
    }
}
