//! Error types for the risk assessment engine
//!
//! Scoring itself never fails: every extractor and the fusion engine always
//! produce a well-formed value. These errors only surface at the edges that can
//! be rejected before scoring starts (capture buffers, configuration) and from
//! sentiment classifier implementations, whose failures the text extractor
//! absorbs.

use std::fmt;

/// Errors that can occur around an assessment
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// Invalid input parameters (malformed capture buffer, bad dimensions)
    InvalidInput(String),

    /// Sentiment classifier has not finished loading, or failed to load
    ClassifierUnavailable(String),

    /// Sentiment classifier was available but the classification call failed
    ClassifierFailed(String),

    /// Configuration value out of range
    InvalidConfig(String),

    /// Numerical error (NaN, infinity, out-of-range intermediate)
    NumericalError(String),
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            AnalysisError::ClassifierUnavailable(msg) => {
                write!(f, "Sentiment classifier unavailable: {}", msg)
            }
            AnalysisError::ClassifierFailed(msg) => {
                write!(f, "Sentiment classification failed: {}", msg)
            }
            AnalysisError::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
            AnalysisError::NumericalError(msg) => write!(f, "Numerical error: {}", msg),
        }
    }
}

impl std::error::Error for AnalysisError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = AnalysisError::InvalidInput("zero width".to_string());
        assert_eq!(err.to_string(), "Invalid input: zero width");

        let err = AnalysisError::ClassifierUnavailable("still loading".to_string());
        assert!(err.to_string().contains("still loading"));
    }
}
