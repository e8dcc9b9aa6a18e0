//! Text indicator extraction
//!
//! Combines the lexicon scan with a sentiment judgment:
//!
//! ```text
//! negativity = score           if NEGATIVE
//!            = 1 - score       otherwise
//! stress     = min(1, risk * 0.10 + negativity * 0.40)
//! depression = min(1, risk * 0.12 + negativity * 0.35)
//! anxiety    = min(1, risk * 0.08 + negativity * 0.30)
//! positivity = clamp01((1 - negativity) * 0.70 + boost)
//! ```
//!
//! where `risk` is the summed severity weight of all lexicon matches.

use serde::{Deserialize, Serialize};

use super::keywords::extract_keywords;
use super::lexicon::{scan, RiskIndicator};
use super::sentiment::{ClassifierHandle, Sentiment, SentimentSource};
use crate::config::AnalysisConfig;
use crate::preprocessing::normalization::clamp_unit;

/// Emotion-like scores derived from text, each in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TextEmotions {
    /// Stress score
    pub stress: f32,
    /// Depression score
    pub depression: f32,
    /// Anxiety score
    pub anxiety: f32,
    /// Positivity score
    pub positivity: f32,
}

/// Everything the text modality contributes to an assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextIndicators {
    /// Sentiment judgment (neutral if the classifier could not answer)
    pub sentiment: Sentiment,

    /// Whether `sentiment` came from the classifier or the fallback
    pub sentiment_source: SentimentSource,

    /// Emotion scores
    pub emotions: TextEmotions,

    /// Up to five distinct long tokens, in order of appearance
    pub keywords: Vec<String>,

    /// Matched risk lexicon entries, tagged by severity
    pub risk_indicators: Vec<RiskIndicator>,
}

impl TextIndicators {
    /// True if any crisis-level phrase matched
    pub fn has_high_risk(&self) -> bool {
        self.risk_indicators.iter().any(RiskIndicator::is_high)
    }
}

/// Extract text indicators
///
/// Never fails: if the classifier is loading, failed, errors, panics, or exceeds the
/// configured time budget, sentiment falls back to `{NEUTRAL, 0.5}` and the
/// problem is only logged. Blank text skips the classifier entirely.
///
/// # Arguments
///
/// * `text` - Free text, any length
/// * `classifier` - Sentiment classifier capability
/// * `config` - Keyword limits and classifier time budget
///
/// # Example
///
/// ```
/// use mindguard::features::text::extractor::extract_text_indicators;
/// use mindguard::features::text::sentiment::ClassifierHandle;
/// use mindguard::AnalysisConfig;
///
/// let indicators = extract_text_indicators(
///     "I want to end it all",
///     &ClassifierHandle::loading(),
///     &AnalysisConfig::default(),
/// );
/// assert!(indicators.has_high_risk());
/// ```
pub fn extract_text_indicators(
    text: &str,
    classifier: &ClassifierHandle,
    config: &AnalysisConfig,
) -> TextIndicators {
    log::debug!("Extracting text indicators from {} chars", text.chars().count());

    let lexicon = scan(text);

    let (sentiment, sentiment_source) = if text.trim().is_empty() {
        (Sentiment::neutral(), SentimentSource::Fallback)
    } else {
        match classifier.classify(text, config.classifier_timeout) {
            Ok(sentiment) => (sentiment, SentimentSource::Classifier),
            Err(e) => {
                log::warn!("Falling back to neutral sentiment: {}", e);
                (Sentiment::neutral(), SentimentSource::Fallback)
            }
        }
    };

    let negativity = sentiment.negativity();
    let risk = lexicon.risk_level as f32;

    let emotions = TextEmotions {
        stress: clamp_unit(risk * 0.10 + negativity * 0.40),
        depression: clamp_unit(risk * 0.12 + negativity * 0.35),
        anxiety: clamp_unit(risk * 0.08 + negativity * 0.30),
        positivity: clamp_unit((1.0 - negativity) * 0.70 + lexicon.positivity_boost),
    };

    let keywords = extract_keywords(text, config.keyword_limit, config.min_keyword_chars);

    log::debug!(
        "Text indicators: risk_level={}, indicators={}, sentiment={:?}/{:.3}, stress={:.3}, depression={:.3}, anxiety={:.3}, positivity={:.3}",
        lexicon.risk_level,
        lexicon.indicators.len(),
        sentiment.label,
        sentiment.score,
        emotions.stress,
        emotions.depression,
        emotions.anxiety,
        emotions.positivity
    );

    TextIndicators {
        sentiment,
        sentiment_source,
        emotions,
        keywords,
        risk_indicators: lexicon.indicators,
    }
}
