//! Text indicator extraction
//!
//! Lexicon scan + sentiment → stress, depression, anxiety, positivity and a
//! severity-tagged list of risk indicators.

pub mod extractor;
pub mod keywords;
pub mod lexicon;
pub mod sentiment;

pub use extractor::{extract_text_indicators, TextEmotions, TextIndicators};
pub use lexicon::{RiskIndicator, Severity};
pub use sentiment::{
    ClassifierHandle, ClassifierState, Sentiment, SentimentClassifier, SentimentLabel,
    SentimentSource,
};
