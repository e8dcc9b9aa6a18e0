//! Multi-modal risk fusion
//!
//! Each present modality is reduced to a single risk in [0, 1], then the risks
//! are combined with weights chosen by which modalities are present:
//!
//! | present              | text | audio | facial |
//! |----------------------|------|-------|--------|
//! | one modality         | 1.0  | 1.0   | 1.0    |
//! | text + audio         | 0.60 | 0.40  | -      |
//! | text + facial        | 0.60 | -     | 0.40   |
//! | audio + facial       | -    | 0.55  | 0.45   |
//! | text + audio + facial| 0.50 | 0.25  | 0.25   |
//!
//! Any crisis-level phrase in the text forces the `Critical` level regardless
//! of the numeric score.

use super::confidence::{compute_confidence, ConfidencePolicy};
use super::result::{ActiveModalities, FusionResult, ModalityScores, RiskLevel};
use crate::features::audio::AudioIndicators;
use crate::features::image::ImageIndicators;
use crate::features::text::{SentimentLabel, TextIndicators};
use crate::preprocessing::normalization::{clamp_unit, sanitize_risk};

/// Risk added per matched lexicon entry
const RISK_PER_INDICATOR: f32 = 0.15;

/// Weights indexed by presence mask (text = 1, audio = 2, facial = 4)
const WEIGHT_TABLE: [ModalityScores; 8] = [
    ModalityScores::ZERO,
    ModalityScores::new(1.0, 0.0, 0.0),
    ModalityScores::new(0.0, 1.0, 0.0),
    ModalityScores::new(0.6, 0.4, 0.0),
    ModalityScores::new(0.0, 0.0, 1.0),
    ModalityScores::new(0.6, 0.0, 0.4),
    ModalityScores::new(0.0, 0.55, 0.45),
    ModalityScores::new(0.5, 0.25, 0.25),
];

/// Fusion weights for a set of active modalities
///
/// Weights of active modalities sum to 1; inactive modalities get 0.
pub fn weights_for(active: &ActiveModalities) -> ModalityScores {
    WEIGHT_TABLE[active.mask() as usize]
}

/// Risk contributed by the text modality
pub fn text_risk(text: &TextIndicators) -> f32 {
    let negative_score = match text.sentiment.label {
        SentimentLabel::Negative => text.sentiment.score,
        _ => (1.0 - text.sentiment.score) * 0.5,
    };

    let emotions = &text.emotions;
    let mut risk = emotions.stress * 0.3
        + emotions.depression * 0.3
        + emotions.anxiety * 0.2
        + negative_score * 0.2;

    if !text.risk_indicators.is_empty() {
        risk = (risk + text.risk_indicators.len() as f32 * RISK_PER_INDICATOR).min(1.0);
    }

    sanitize_risk(risk)
}

/// Risk contributed by the audio modality
pub fn audio_risk(audio: &AudioIndicators) -> f32 {
    let e = &audio.emotions;
    sanitize_risk(e.stressed * 0.35 + e.sad * 0.30 + e.anxious * 0.25 + (1.0 - e.calm) * 0.10)
}

/// Risk contributed by the facial modality
pub fn facial_risk(image: &ImageIndicators) -> f32 {
    let x = &image.expressions;
    sanitize_risk(
        x.sad * 0.3 + x.angry * 0.2 + x.fearful * 0.25 + x.disgusted * 0.1 + (1.0 - x.happy) * 0.15,
    )
}

/// Fuse whichever modalities are present into one assessment
///
/// # Arguments
///
/// * `text` - Text indicators, if text was analyzed
/// * `audio` - Audio indicators, if audio was analyzed
/// * `image` - Facial indicators, if an image was analyzed
/// * `policy` - Confidence policy
///
/// # Returns
///
/// `None` when no modality is present
///
/// # Example
///
/// ```
/// use mindguard::analysis::confidence::ConfidencePolicy;
/// use mindguard::analysis::fusion::fuse;
/// use mindguard::analysis::result::RiskLevel;
/// use mindguard::features::audio::AudioIndicators;
///
/// let audio = AudioIndicators::neutral();
/// let result = fuse(None, Some(&audio), None, ConfidencePolicy::ModalityCount).unwrap();
/// assert_eq!(result.weights.audio, 1.0);
/// assert_eq!(result.risk_level, RiskLevel::Low);
/// ```
pub fn fuse(
    text: Option<&TextIndicators>,
    audio: Option<&AudioIndicators>,
    image: Option<&ImageIndicators>,
    policy: ConfidencePolicy,
) -> Option<FusionResult> {
    let active = ActiveModalities::new(text.is_some(), audio.is_some(), image.is_some());
    if active.is_empty() {
        log::debug!("Fusion skipped: no modality present");
        return None;
    }

    let breakdown = ModalityScores::new(
        text.map_or(0.0, text_risk),
        audio.map_or(0.0, audio_risk),
        image.map_or(0.0, facial_risk),
    );
    let weights = weights_for(&active);
    let overall_risk = clamp_unit(breakdown.dot(&weights));

    let crisis_phrase = text.is_some_and(TextIndicators::has_high_risk);
    let risk_level = if crisis_phrase {
        RiskLevel::Critical
    } else {
        RiskLevel::from_score(overall_risk)
    };

    let confidence = compute_confidence(policy, &active, text.map(|t| t.sentiment_source));

    log::debug!(
        "Fusion: mask={:03b}, breakdown=({:.3}, {:.3}, {:.3}), overall={:.3}, level={}, confidence={:.2}{}",
        active.mask(),
        breakdown.text,
        breakdown.audio,
        breakdown.facial,
        overall_risk,
        risk_level,
        confidence,
        if crisis_phrase { " (crisis phrase override)" } else { "" }
    );

    Some(FusionResult {
        overall_risk,
        risk_level,
        breakdown,
        weights,
        confidence,
        active_modalities: active,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::audio::AudioEmotions;
    use crate::features::image::ExpressionScores;
    use crate::features::text::{
        RiskIndicator, Sentiment, SentimentSource, Severity, TextEmotions,
    };

    fn text(label: SentimentLabel, score: f32, indicators: Vec<RiskIndicator>) -> TextIndicators {
        TextIndicators {
            sentiment: Sentiment::new(label, score),
            sentiment_source: SentimentSource::Classifier,
            emotions: TextEmotions {
                stress: 0.5,
                depression: 0.5,
                anxiety: 0.5,
                positivity: 0.2,
            },
            keywords: vec![],
            risk_indicators: indicators,
        }
    }

    #[test]
    fn test_no_modalities() {
        assert!(fuse(None, None, None, ConfidencePolicy::ModalityCount).is_none());
    }

    #[test]
    fn test_weight_table_sums_to_one() {
        for mask in 1u8..8 {
            let active = ActiveModalities::new(mask & 1 != 0, mask & 2 != 0, mask & 4 != 0);
            let weights = weights_for(&active);
            assert!((weights.sum() - 1.0).abs() < 1e-6, "mask {:03b}", mask);
            for m in crate::analysis::result::Modality::ALL {
                if !active.contains(m) {
                    assert_eq!(weights.get(m), 0.0);
                }
            }
        }
    }

    #[test]
    fn test_text_risk_formula() {
        // 0.5*0.3 + 0.5*0.3 + 0.5*0.2 + 0.9*0.2
        let t = text(SentimentLabel::Negative, 0.9, vec![]);
        assert!((text_risk(&t) - 0.58).abs() < 1e-6);

        // Positive 0.8 contributes (1 - 0.8) * 0.5 = 0.1
        let t = text(SentimentLabel::Positive, 0.8, vec![]);
        assert!((text_risk(&t) - 0.42).abs() < 1e-6);
    }

    #[test]
    fn test_indicators_raise_text_risk_and_cap() {
        let one = vec![RiskIndicator::new(Severity::Low, "tired")];
        let t = text(SentimentLabel::Negative, 0.9, one);
        assert!((text_risk(&t) - 0.73).abs() < 1e-6);

        let many = vec![RiskIndicator::new(Severity::Low, "tired"); 5];
        let t = text(SentimentLabel::Negative, 0.9, many);
        assert_eq!(text_risk(&t), 1.0);
    }

    #[test]
    fn test_neutral_audio_risk() {
        // 0.3*0.35 + 0.1*0.30 + 0.1*0.25 + 0.5*0.10
        let risk = audio_risk(&AudioIndicators::neutral());
        assert!((risk - 0.21).abs() < 1e-6);
    }

    #[test]
    fn test_neutral_facial_risk() {
        // 0.1*0.3 + 0.05*0.2 + 0.02*0.25 + 0.02*0.1 + 0.9*0.15
        let risk = facial_risk(&ImageIndicators::neutral());
        assert!((risk - 0.182).abs() < 1e-6);
    }

    #[test]
    fn test_non_finite_risk_is_zero() {
        let audio = AudioIndicators {
            emotions: AudioEmotions {
                calm: f32::NAN,
                stressed: 0.5,
                sad: 0.5,
                anxious: 0.5,
            },
            ..AudioIndicators::neutral()
        };
        assert_eq!(audio_risk(&audio), 0.0);

        let image = ImageIndicators::from_scores(ExpressionScores::from_array([
            0.0,
            0.0,
            f32::INFINITY,
            0.0,
            0.0,
            0.0,
            0.0,
        ]));
        assert_eq!(facial_risk(&image), 0.0);
    }

    #[test]
    fn test_crisis_phrase_forces_critical() {
        let t = TextIndicators {
            emotions: TextEmotions::default(),
            ..text(
                SentimentLabel::Positive,
                1.0,
                vec![RiskIndicator::new(Severity::High, "suicide")],
            )
        };
        let result = fuse(Some(&t), None, None, ConfidencePolicy::ModalityCount).unwrap();
        assert!(result.overall_risk < 0.8);
        assert_eq!(result.risk_level, RiskLevel::Critical);
    }

    #[test]
    fn test_three_modalities() {
        let t = text(SentimentLabel::Negative, 0.9, vec![]);
        let a = AudioIndicators::neutral();
        let i = ImageIndicators::neutral();
        let result = fuse(Some(&t), Some(&a), Some(&i), ConfidencePolicy::ModalityCount).unwrap();

        let expected = 0.58 * 0.5 + 0.21 * 0.25 + 0.182 * 0.25;
        assert!((result.overall_risk - expected).abs() < 1e-5);
        assert_eq!(result.risk_level, RiskLevel::Moderate);
        assert_eq!(result.confidence, 0.92);
        assert_eq!(result.active_modalities.mask(), 0b111);
    }

    #[test]
    fn test_absent_modality_breakdown_is_zero() {
        let a = AudioIndicators::neutral();
        let result = fuse(None, Some(&a), None, ConfidencePolicy::ModalityCount).unwrap();
        assert_eq!(result.breakdown.text, 0.0);
        assert_eq!(result.breakdown.facial, 0.0);
        assert!((result.overall_risk - 0.21).abs() < 1e-6);
        assert_eq!(result.confidence, 0.65);
    }
}
