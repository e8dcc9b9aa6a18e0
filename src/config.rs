//! Configuration parameters for risk assessment

use std::time::Duration;

use crate::analysis::confidence::ConfidencePolicy;
use crate::error::AnalysisError;

/// Assessment configuration parameters
///
/// The defaults reproduce the reference heuristics exactly; changing them is
/// mostly useful for tests and experiments.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    // Text
    /// Maximum number of keywords reported per text (default: 5)
    pub keyword_limit: usize,

    /// Tokens must be strictly longer than this many characters to count as
    /// keywords (default: 4)
    pub min_keyword_chars: usize,

    /// Time budget for a ready sentiment classifier (default: 2 s)
    ///
    /// The call runs on a helper thread and the extractor falls back to
    /// neutral sentiment once the budget is exhausted. `None` calls the
    /// classifier inline with no bound.
    pub classifier_timeout: Option<Duration>,

    // Image
    /// Luma delta between horizontal neighbours that counts as an edge
    /// (default: 20.0)
    pub edge_threshold: f32,

    /// Half-width of the uniform jitter added to each raw expression score
    /// (default: 0.02)
    pub noise_amplitude: f32,

    /// Lower bound applied to each jittered expression score (default: 0.01)
    pub noise_floor: f32,

    // Fusion
    /// How fusion confidence is derived (default: by active modality count)
    pub confidence_policy: ConfidencePolicy,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            keyword_limit: 5,
            min_keyword_chars: 4,
            classifier_timeout: Some(Duration::from_secs(2)),
            edge_threshold: 20.0,
            noise_amplitude: 0.02,
            noise_floor: 0.01,
            confidence_policy: ConfidencePolicy::ModalityCount,
        }
    }
}

impl AnalysisConfig {
    /// Check that every parameter is usable
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidConfig` naming the first offending field.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if !self.edge_threshold.is_finite() || self.edge_threshold < 0.0 {
            return Err(AnalysisError::InvalidConfig(format!(
                "edge_threshold must be a non-negative number, got {}",
                self.edge_threshold
            )));
        }

        if !self.noise_amplitude.is_finite() || !(0.0..=0.5).contains(&self.noise_amplitude) {
            return Err(AnalysisError::InvalidConfig(format!(
                "noise_amplitude must be within [0, 0.5], got {}",
                self.noise_amplitude
            )));
        }

        // Normalization divides by the score total, so the floor must stay positive.
        if !self.noise_floor.is_finite() || self.noise_floor <= 0.0 || self.noise_floor >= 1.0 {
            return Err(AnalysisError::InvalidConfig(format!(
                "noise_floor must be within (0, 1), got {}",
                self.noise_floor
            )));
        }

        if let Some(timeout) = self.classifier_timeout {
            if timeout.is_zero() {
                return Err(AnalysisError::InvalidConfig(
                    "classifier_timeout must be non-zero when set".to_string(),
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(AnalysisConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_noise_floor() {
        let config = AnalysisConfig {
            noise_floor: 0.0,
            ..AnalysisConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("noise_floor"));
    }

    #[test]
    fn test_rejects_nan_edge_threshold() {
        let config = AnalysisConfig {
            edge_threshold: f32::NAN,
            ..AnalysisConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_classifier_budget_is_bounded() {
        assert_eq!(
            AnalysisConfig::default().classifier_timeout,
            Some(Duration::from_secs(2))
        );
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let config = AnalysisConfig {
            classifier_timeout: Some(Duration::ZERO),
            ..AnalysisConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(AnalysisError::InvalidConfig(_))
        ));
    }
}
