//! Alerts and recommendations
//!
//! Both are pure functions of a fusion result. Alert rules are evaluated
//! independently, so one assessment can raise several alerts; they are
//! emitted in rule order, most severe first.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::result::{FusionResult, Modality, RiskLevel};
use crate::features::text::RiskIndicator;

/// Per-modality risk above which a modality alert is raised
const TEXT_ALERT_THRESHOLD: f32 = 0.5;
const AUDIO_ALERT_THRESHOLD: f32 = 0.5;
const FACIAL_ALERT_THRESHOLD: f32 = 0.4;

/// Alert severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    /// Possible crisis
    Critical,
    /// Elevated risk
    High,
    /// Worth attention
    Medium,
    /// Informational
    Info,
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AlertLevel::Critical => "critical",
            AlertLevel::High => "high",
            AlertLevel::Medium => "medium",
            AlertLevel::Info => "info",
        })
    }
}

/// A prioritized alert
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    /// Stable identifier
    pub id: String,
    /// Severity
    pub level: AlertLevel,
    /// Short title
    pub title: String,
    /// Explanation
    pub message: String,
    /// Suggested action, for alerts that need one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

impl Alert {
    fn new(id: &str, level: AlertLevel, title: &str, message: &str) -> Self {
        Self {
            id: id.to_string(),
            level,
            title: title.to_string(),
            message: message.to_string(),
            action: None,
        }
    }

    fn with_action(mut self, action: &str) -> Self {
        self.action = Some(action.to_string());
        self
    }
}

/// When a recommendation should be acted on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecommendationCategory {
    /// Act now
    Immediate,
    /// Within days to weeks
    ShortTerm,
    /// Ongoing habits
    LongTerm,
}

/// A categorized recommendation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Stable identifier
    pub id: String,
    /// Time horizon
    pub category: RecommendationCategory,
    /// Short title
    pub title: String,
    /// Details
    pub description: String,
    /// Display icon
    pub icon: String,
}

impl Recommendation {
    fn new(
        id: &str,
        category: RecommendationCategory,
        title: &str,
        description: &str,
        icon: &str,
    ) -> Self {
        Self {
            id: id.to_string(),
            category,
            title: title.to_string(),
            description: description.to_string(),
            icon: icon.to_string(),
        }
    }
}

/// Generate alerts for a fusion result
///
/// # Arguments
///
/// * `fusion` - Fused assessment
/// * `risk_indicators` - Text risk indicators (empty if text was not analyzed)
pub fn generate_alerts(fusion: &FusionResult, risk_indicators: &[RiskIndicator]) -> Vec<Alert> {
    let mut alerts = Vec::new();
    let level = fusion.risk_level;
    let crisis_phrase = risk_indicators.iter().any(RiskIndicator::is_high);

    if crisis_phrase || level == RiskLevel::Critical {
        alerts.push(
            Alert::new(
                "crisis",
                AlertLevel::Critical,
                "CRISIS ALERT",
                "High-risk indicators detected suggesting potential crisis situation.",
            )
            .with_action("Contact crisis intervention team immediately"),
        );
    }

    if level == RiskLevel::High {
        alerts.push(
            Alert::new(
                "high-risk",
                AlertLevel::High,
                "High Risk Detected",
                "Multiple indicators suggest elevated mental health risk.",
            )
            .with_action("Schedule urgent professional consultation"),
        );
    }

    let modality_alerts = [
        (
            Modality::Text,
            TEXT_ALERT_THRESHOLD,
            "text-risk",
            "Concerning Language Patterns",
            "Text analysis reveals negative sentiment and stress indicators.",
        ),
        (
            Modality::Audio,
            AUDIO_ALERT_THRESHOLD,
            "audio-risk",
            "Voice Stress Indicators",
            "Audio analysis shows signs of emotional distress.",
        ),
        (
            Modality::Facial,
            FACIAL_ALERT_THRESHOLD,
            "facial-risk",
            "Negative Facial Expressions",
            "Facial analysis indicates distressed emotional state.",
        ),
    ];
    for (modality, threshold, id, title, message) in modality_alerts {
        if fusion.active_modalities.contains(modality) && fusion.breakdown.get(modality) > threshold
        {
            alerts.push(Alert::new(id, AlertLevel::Medium, title, message));
        }
    }

    match level {
        RiskLevel::Low => alerts.push(Alert::new(
            "stable",
            AlertLevel::Info,
            "Stable Status",
            "No immediate concerns detected. Continue regular monitoring.",
        )),
        RiskLevel::Moderate => alerts.push(Alert::new(
            "moderate",
            AlertLevel::Medium,
            "Moderate Risk",
            "Some indicators suggest mild to moderate mental health concern.",
        )),
        RiskLevel::High | RiskLevel::Critical => {}
    }

    log::debug!("Generated {} alerts for {} risk", alerts.len(), level);
    alerts
}

/// Generate recommendations for a fusion result
///
/// Self-care and the three long-term habits are always included.
pub fn generate_recommendations(fusion: &FusionResult) -> Vec<Recommendation> {
    use RecommendationCategory::*;

    let mut recommendations = Vec::new();
    let level = fusion.risk_level;

    if matches!(level, RiskLevel::Critical | RiskLevel::High) {
        recommendations.push(Recommendation::new(
            "crisis-line",
            Immediate,
            "Contact Crisis Helpline",
            "National Suicide Prevention Lifeline: 988 (US) or local emergency services",
            "📞",
        ));
        recommendations.push(Recommendation::new(
            "professional",
            Immediate,
            "Seek Professional Help",
            "Schedule an appointment with a mental health professional immediately",
            "👨‍⚕️",
        ));
    }

    if matches!(level, RiskLevel::Moderate | RiskLevel::High) {
        recommendations.push(Recommendation::new(
            "therapist",
            ShortTerm,
            "Connect with a Therapist",
            "Consider speaking with a licensed therapist about your feelings",
            "🧠",
        ));
        recommendations.push(Recommendation::new(
            "support",
            ShortTerm,
            "Reach Out to Support Network",
            "Talk to trusted friends, family, or support groups",
            "👥",
        ));
    }

    recommendations.extend([
        Recommendation::new(
            "self-care",
            ShortTerm,
            "Practice Self-Care",
            "Engage in activities that promote relaxation and well-being",
            "🧘",
        ),
        Recommendation::new(
            "sleep",
            LongTerm,
            "Improve Sleep Hygiene",
            "Maintain regular sleep schedule and create a restful environment",
            "😴",
        ),
        Recommendation::new(
            "exercise",
            LongTerm,
            "Regular Physical Activity",
            "Exercise has proven benefits for mental health",
            "🏃",
        ),
        Recommendation::new(
            "mindfulness",
            LongTerm,
            "Mindfulness & Meditation",
            "Practice daily mindfulness exercises to reduce stress",
            "🧘‍♀️",
        ),
    ]);

    recommendations
}
