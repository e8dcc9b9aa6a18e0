//! Assessment explanations
//!
//! Turns a fusion result into three human-readable views: which features
//! weighed most, the steps that led to the classification, and what would
//! change the outcome.

use serde::{Deserialize, Serialize};

use super::result::{FusionResult, Modality};
use crate::features::text::{SentimentLabel, TextIndicators};

/// Importance of one input feature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureImportance {
    /// Feature name
    pub feature: String,
    /// Importance in [0, 1]
    pub value: f32,
    /// Modality the feature belongs to
    pub modality: Modality,
}

/// A "what if" statement and its estimated effect on the 0-100 risk score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counterfactual {
    /// Observed condition
    pub original: String,
    /// Hypothetical change
    pub change: String,
    /// Estimated score change (negative lowers risk)
    pub impact: i32,
}

/// Explanation of a fused assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Explanation {
    /// Features of active modalities, most important first
    pub feature_importance: Vec<FeatureImportance>,
    /// Ordered reasoning steps
    pub decision_path: Vec<String>,
    /// Changes that would lower the risk
    pub counterfactuals: Vec<Counterfactual>,
}

fn importance(feature: &str, value: f32, modality: Modality) -> FeatureImportance {
    FeatureImportance {
        feature: feature.to_string(),
        value,
        modality,
    }
}

fn counterfactual(original: &str, change: &str, impact: i32) -> Counterfactual {
    Counterfactual {
        original: original.to_string(),
        change: change.to_string(),
        impact,
    }
}

/// Build the explanation for a fusion result
///
/// # Arguments
///
/// * `fusion` - Fused assessment
/// * `text` - Text indicators, when text was analyzed; without them the text
///   features fall back to fixed reference values
pub fn explain(fusion: &FusionResult, text: Option<&TextIndicators>) -> Explanation {
    let active = fusion.active_modalities;
    let has_indicators = text.is_some_and(|t| !t.risk_indicators.is_empty());

    let mut feature_importance = Vec::new();
    if active.text {
        let negative_sentiment = match text {
            Some(t) if t.sentiment.label == SentimentLabel::Negative => t.sentiment.score,
            _ => 0.1,
        };
        feature_importance.extend([
            importance("Negative Sentiment Score", negative_sentiment, Modality::Text),
            importance(
                "Stress Indicators",
                text.map_or(0.3, |t| t.emotions.stress),
                Modality::Text,
            ),
            importance(
                "Depression Keywords",
                text.map_or(0.2, |t| t.emotions.depression),
                Modality::Text,
            ),
            importance(
                "Risk Phrases Detected",
                if has_indicators { 0.8 } else { 0.1 },
                Modality::Text,
            ),
        ]);
    }
    if active.audio {
        feature_importance.extend([
            importance("Voice Energy Level", fusion.breakdown.audio, Modality::Audio),
            importance("Speech Pace Variation", 0.4, Modality::Audio),
        ]);
    }
    if active.facial {
        feature_importance.extend([
            importance("Negative Facial Expression", fusion.breakdown.facial, Modality::Facial),
            importance("Eye Contact Pattern", 0.3, Modality::Facial),
        ]);
    }
    // Stable sort keeps insertion order among equal values
    feature_importance.sort_by(|a, b| b.value.total_cmp(&a.value));

    let names: Vec<&str> = active.iter().map(Modality::name).collect();
    let mut decision_path = vec![format!(
        "Input received from {} {}: {}",
        names.len(),
        if names.len() == 1 { "modality" } else { "modalities" },
        names.join(", ")
    )];
    if active.text {
        decision_path.push(
            "Text scored by lexicon scan and sentiment → stress, depression, anxiety".to_string(),
        );
    }
    if active.audio {
        decision_path.push(
            "Audio scored by RMS energy and zero-crossing rate → energy, pitch, tempo".to_string(),
        );
    }
    if active.facial {
        decision_path.push(
            "Facial image scored by region brightness and edge density → expression distribution"
                .to_string(),
        );
    }
    if names.len() > 1 {
        decision_path.push("Weighted fusion computed across active modalities".to_string());
    }
    decision_path.push(format!("Risk score calculated: {}/100", fusion.risk_score()));
    decision_path.push(format!(
        "Final classification: {} risk",
        fusion.risk_level.name().to_uppercase()
    ));

    let mut counterfactuals = Vec::new();
    if active.text {
        counterfactuals.push(counterfactual(
            "Negative sentiment detected",
            "If sentiment were positive",
            -25,
        ));
        if has_indicators {
            counterfactuals.push(counterfactual(
                "High-risk keywords present",
                "If no risk keywords detected",
                -40,
            ));
        }
    }
    if active.audio {
        counterfactuals.push(counterfactual(
            "Stressed voice patterns",
            "If calm voice patterns",
            -15,
        ));
    }
    if active.facial {
        counterfactuals.push(counterfactual(
            "Negative facial expression",
            "If neutral/happy expression",
            -10,
        ));
    }

    Explanation {
        feature_importance,
        decision_path,
        counterfactuals,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::result::{ActiveModalities, ModalityScores, RiskLevel};

    fn fusion(active: ActiveModalities) -> FusionResult {
        FusionResult {
            overall_risk: 0.456,
            risk_level: RiskLevel::Moderate,
            breakdown: ModalityScores::new(0.0, 0.35, 0.5),
            weights: ModalityScores::ZERO,
            confidence: 0.8,
            active_modalities: active,
        }
    }

    #[test]
    fn test_audio_and_facial_explanation() {
        let explanation = explain(&fusion(ActiveModalities::new(false, true, true)), None);

        let features: Vec<&str> = explanation
            .feature_importance
            .iter()
            .map(|f| f.feature.as_str())
            .collect();
        assert_eq!(
            features,
            vec![
                "Negative Facial Expression",
                "Speech Pace Variation",
                "Voice Energy Level",
                "Eye Contact Pattern"
            ]
        );

        assert_eq!(
            explanation.decision_path.first().map(String::as_str),
            Some("Input received from 2 modalities: Audio, Facial")
        );
        assert_eq!(explanation.decision_path.len(), 6);
        assert_eq!(
            explanation.decision_path[4],
            "Risk score calculated: 46/100"
        );
        assert_eq!(
            explanation.decision_path[5],
            "Final classification: MODERATE risk"
        );

        let impacts: Vec<i32> = explanation.counterfactuals.iter().map(|c| c.impact).collect();
        assert_eq!(impacts, vec![-15, -10]);
    }

    #[test]
    fn test_single_modality_has_no_fusion_step() {
        let explanation = explain(&fusion(ActiveModalities::new(false, true, false)), None);
        assert_eq!(
            explanation.decision_path[0],
            "Input received from 1 modality: Audio"
        );
        assert_eq!(explanation.decision_path.len(), 4);
        assert!(explanation
            .feature_importance
            .iter()
            .all(|f| f.modality == Modality::Audio));
    }

    #[test]
    fn test_text_without_indicators_uses_reference_values() {
        let explanation = explain(&fusion(ActiveModalities::new(true, false, false)), None);
        let values: Vec<f32> = explanation.feature_importance.iter().map(|f| f.value).collect();
        assert_eq!(values, vec![0.3, 0.2, 0.1, 0.1]);
        assert_eq!(explanation.counterfactuals.len(), 1);
    }
}
