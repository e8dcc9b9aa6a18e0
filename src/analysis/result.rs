//! Fusion result types

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the three analysis channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    /// Free text
    Text,
    /// Recorded voice
    Audio,
    /// Captured face image
    Facial,
}

impl Modality {
    /// All modalities in reporting order
    pub const ALL: [Modality; 3] = [Modality::Text, Modality::Audio, Modality::Facial];

    /// Capitalized display name
    pub fn name(self) -> &'static str {
        match self {
            Modality::Text => "Text",
            Modality::Audio => "Audio",
            Modality::Facial => "Facial",
        }
    }

    /// Bit used in the presence mask
    pub fn bit(self) -> u8 {
        match self {
            Modality::Text => 0b001,
            Modality::Audio => 0b010,
            Modality::Facial => 0b100,
        }
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Risk classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// overall risk < 0.35
    Low,
    /// 0.35 <= overall risk < 0.6
    Moderate,
    /// 0.6 <= overall risk < 0.8
    High,
    /// overall risk >= 0.8, or a crisis phrase was detected
    Critical,
}

impl RiskLevel {
    /// Lower bound of `Moderate`
    pub const MODERATE_THRESHOLD: f32 = 0.35;
    /// Lower bound of `High`
    pub const HIGH_THRESHOLD: f32 = 0.6;
    /// Lower bound of `Critical`
    pub const CRITICAL_THRESHOLD: f32 = 0.8;

    /// Classify a score by threshold alone (no keyword override)
    ///
    /// # Example
    ///
    /// ```
    /// use mindguard::analysis::result::RiskLevel;
    ///
    /// assert_eq!(RiskLevel::from_score(0.34), RiskLevel::Low);
    /// assert_eq!(RiskLevel::from_score(0.35), RiskLevel::Moderate);
    /// assert_eq!(RiskLevel::from_score(0.8), RiskLevel::Critical);
    /// ```
    pub fn from_score(score: f32) -> Self {
        if score >= Self::CRITICAL_THRESHOLD {
            RiskLevel::Critical
        } else if score >= Self::HIGH_THRESHOLD {
            RiskLevel::High
        } else if score >= Self::MODERATE_THRESHOLD {
            RiskLevel::Moderate
        } else {
            RiskLevel::Low
        }
    }

    /// Lower-case name
    pub fn name(self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Moderate => "moderate",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A value per modality (used for both breakdown and weights)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ModalityScores {
    /// Text value
    pub text: f32,
    /// Audio value
    pub audio: f32,
    /// Facial value
    pub facial: f32,
}

impl ModalityScores {
    /// All zeros
    pub const ZERO: ModalityScores = ModalityScores::new(0.0, 0.0, 0.0);

    /// Create from (text, audio, facial)
    pub const fn new(text: f32, audio: f32, facial: f32) -> Self {
        Self {
            text,
            audio,
            facial,
        }
    }

    /// Value for one modality
    pub fn get(&self, modality: Modality) -> f32 {
        match modality {
            Modality::Text => self.text,
            Modality::Audio => self.audio,
            Modality::Facial => self.facial,
        }
    }

    /// Sum over all modalities
    pub fn sum(&self) -> f32 {
        self.text + self.audio + self.facial
    }

    /// Element-wise product summed (weighted combination)
    pub fn dot(&self, other: &ModalityScores) -> f32 {
        self.text * other.text + self.audio * other.audio + self.facial * other.facial
    }
}

/// Which modalities were analyzed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ActiveModalities {
    /// Text was analyzed
    pub text: bool,
    /// Audio was analyzed
    pub audio: bool,
    /// Facial image was analyzed
    pub facial: bool,
}

impl ActiveModalities {
    /// Create from presence flags
    pub fn new(text: bool, audio: bool, facial: bool) -> Self {
        Self {
            text,
            audio,
            facial,
        }
    }

    /// Whether one modality is active
    pub fn contains(&self, modality: Modality) -> bool {
        match modality {
            Modality::Text => self.text,
            Modality::Audio => self.audio,
            Modality::Facial => self.facial,
        }
    }

    /// Presence bitmask (text = 1, audio = 2, facial = 4)
    pub fn mask(&self) -> u8 {
        self.iter().fold(0, |mask, m| mask | m.bit())
    }

    /// Number of active modalities
    pub fn count(&self) -> usize {
        self.iter().count()
    }

    /// True if nothing was analyzed
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Active modalities in reporting order
    pub fn iter(&self) -> impl Iterator<Item = Modality> + '_ {
        Modality::ALL.into_iter().filter(move |&m| self.contains(m))
    }
}

/// Fused multi-modal risk assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FusionResult {
    /// Weighted combination of per-modality risks, in [0, 1]
    pub overall_risk: f32,

    /// Classification of `overall_risk`, with the crisis-phrase override applied
    pub risk_level: RiskLevel,

    /// Per-modality risk (0 for modalities not analyzed)
    pub breakdown: ModalityScores,

    /// Per-modality weight (sums to 1 over active modalities, 0 otherwise)
    pub weights: ModalityScores,

    /// Confidence in the assessment (0.0-1.0)
    pub confidence: f32,

    /// Which modalities contributed
    pub active_modalities: ActiveModalities,
}

impl FusionResult {
    /// Check if confidence is high (>= 0.7)
    pub fn is_high_confidence(&self) -> bool {
        self.confidence >= 0.7
    }

    /// Check if confidence is low (< 0.5)
    pub fn is_low_confidence(&self) -> bool {
        self.confidence < 0.5
    }

    /// Human-readable confidence level: "High", "Medium", or "Low"
    pub fn confidence_level(&self) -> &'static str {
        if self.is_high_confidence() {
            "High"
        } else if self.is_low_confidence() {
            "Low"
        } else {
            "Medium"
        }
    }

    /// Overall risk on a 0-100 scale, rounded
    pub fn risk_score(&self) -> u32 {
        (self.overall_risk * 100.0).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_level_thresholds() {
        assert_eq!(RiskLevel::from_score(0.0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(0.5999), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_score(0.6), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(0.7999), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(1.0), RiskLevel::Critical);
    }

    #[test]
    fn test_risk_level_ordering() {
        assert!(RiskLevel::Low < RiskLevel::Moderate);
        assert!(RiskLevel::High < RiskLevel::Critical);
    }

    #[test]
    fn test_active_mask_and_count() {
        let active = ActiveModalities::new(true, false, true);
        assert_eq!(active.mask(), 0b101);
        assert_eq!(active.count(), 2);
        assert_eq!(
            active.iter().collect::<Vec<_>>(),
            vec![Modality::Text, Modality::Facial]
        );
        assert!(ActiveModalities::default().is_empty());
    }

    #[test]
    fn test_modality_scores_dot() {
        let risk = ModalityScores::new(0.8, 0.2, 0.0);
        let weights = ModalityScores::new(0.6, 0.4, 0.0);
        assert!((risk.dot(&weights) - 0.56).abs() < 1e-6);
    }

    #[test]
    fn test_serialized_field_names() {
        let result = FusionResult {
            overall_risk: 0.5,
            risk_level: RiskLevel::Moderate,
            breakdown: ModalityScores::new(0.5, 0.5, 0.5),
            weights: ModalityScores::new(0.5, 0.25, 0.25),
            confidence: 0.92,
            active_modalities: ActiveModalities::new(true, true, true),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["riskLevel"], "moderate");
        assert_eq!(json["activeModalities"]["facial"], true);
        assert!(json["overallRisk"].is_number());
        assert_eq!(result.confidence_level(), "High");
        assert_eq!(result.risk_score(), 50);
    }
}
