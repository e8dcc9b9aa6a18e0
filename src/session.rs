//! Analyzer and assessment session
//!
//! [`Analyzer`] owns everything the extractors need (configuration, the
//! sentiment classifier, the image noise source). [`Session`] keeps the latest
//! indicators per modality and re-fuses from scratch after every update, so
//! the assessment always reflects the most recent input of each kind.
//!
//! # Example
//!
//! ```
//! use mindguard::{Analyzer, AnalysisConfig, Session};
//! use mindguard::features::image::NoNoise;
//!
//! let analyzer = Analyzer::new(AnalysisConfig::default())?.with_noise(NoNoise);
//! let mut session = Session::new(analyzer);
//!
//! let first = session.submit_text("I feel hopeless and tired");
//! assert_eq!(first.fusion.active_modalities.count(), 1);
//!
//! let second = session.submit_audio(&[0.0; 1024]);
//! assert_eq!(second.fusion.active_modalities.count(), 2);
//! # Ok::<(), mindguard::AnalysisError>(())
//! ```

use std::fmt;

use crate::analysis::assessment::{assess, Assessment};
use crate::config::AnalysisConfig;
use crate::error::AnalysisError;
use crate::features::audio::{extract_audio_indicators, AudioIndicators};
use crate::features::image::{extract_image_indicators, ImageIndicators, NoiseSource, SeededNoise};
use crate::features::text::{extract_text_indicators, ClassifierHandle, TextIndicators};
use crate::io::ImageFrame;

/// Runs the three extractors with shared configuration and capabilities
pub struct Analyzer {
    config: AnalysisConfig,
    classifier: ClassifierHandle,
    noise: Box<dyn NoiseSource + Send>,
}

impl fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Analyzer")
            .field("config", &self.config)
            .field("classifier", &self.classifier)
            .finish_non_exhaustive()
    }
}

impl Analyzer {
    /// Create an analyzer with a loading classifier and entropy-seeded noise
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidConfig` if `config` fails validation.
    pub fn new(config: AnalysisConfig) -> Result<Self, AnalysisError> {
        config.validate()?;
        Ok(Self {
            config,
            classifier: ClassifierHandle::loading(),
            noise: Box::new(SeededNoise::from_entropy()),
        })
    }

    /// Use the given sentiment classifier
    pub fn with_classifier(mut self, classifier: ClassifierHandle) -> Self {
        self.classifier = classifier;
        self
    }

    /// Use the given noise source for image jitter
    pub fn with_noise<N: NoiseSource + Send + 'static>(mut self, noise: N) -> Self {
        self.noise = Box::new(noise);
        self
    }

    /// Configuration in use
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Sentiment classifier handle
    pub fn classifier(&self) -> &ClassifierHandle {
        &self.classifier
    }

    /// Mutable classifier handle, for lifecycle updates after construction
    pub fn classifier_mut(&mut self) -> &mut ClassifierHandle {
        &mut self.classifier
    }

    /// Extract text indicators
    pub fn analyze_text(&self, text: &str) -> TextIndicators {
        extract_text_indicators(text, &self.classifier, &self.config)
    }

    /// Extract audio indicators (empty input yields the neutral set)
    pub fn analyze_audio(&self, samples: &[f32]) -> AudioIndicators {
        extract_audio_indicators(Some(samples))
    }

    /// Extract facial indicators
    pub fn analyze_image(&mut self, frame: &ImageFrame) -> ImageIndicators {
        extract_image_indicators(Some(frame), &mut *self.noise, &self.config)
    }

    /// One-shot assessment over whichever inputs are present
    ///
    /// # Returns
    ///
    /// `None` when every input is `None`
    pub fn assess(
        &mut self,
        text: Option<&str>,
        audio: Option<&[f32]>,
        image: Option<&ImageFrame>,
    ) -> Option<Assessment> {
        let text = text.map(|t| self.analyze_text(t));
        let audio = audio.map(|a| self.analyze_audio(a));
        let image = image.map(|i| self.analyze_image(i));
        assess(
            text.as_ref(),
            audio.as_ref(),
            image.as_ref(),
            self.config.confidence_policy,
        )
    }
}

/// Latest indicators per modality, re-fused on every update
#[derive(Debug)]
pub struct Session {
    analyzer: Analyzer,
    text: Option<TextIndicators>,
    audio: Option<AudioIndicators>,
    image: Option<ImageIndicators>,
}

impl Session {
    /// Start an empty session
    pub fn new(analyzer: Analyzer) -> Self {
        Self {
            analyzer,
            text: None,
            audio: None,
            image: None,
        }
    }

    /// Analyze text, replacing the previous text result
    pub fn submit_text(&mut self, text: &str) -> Assessment {
        self.text = Some(self.analyzer.analyze_text(text));
        self.current()
    }

    /// Analyze a recording, replacing the previous audio result
    pub fn submit_audio(&mut self, samples: &[f32]) -> Assessment {
        self.audio = Some(self.analyzer.analyze_audio(samples));
        self.current()
    }

    /// Analyze a frame, replacing the previous facial result
    pub fn submit_image(&mut self, frame: &ImageFrame) -> Assessment {
        self.image = Some(self.analyzer.analyze_image(frame));
        self.current()
    }

    // Only called right after a submit, so at least one modality is present.
    fn current(&self) -> Assessment {
        self.assessment()
            .expect("a submitted modality is always present")
    }

    /// Drop every modality result
    pub fn clear(&mut self) {
        log::debug!("Clearing session");
        self.text = None;
        self.audio = None;
        self.image = None;
    }

    /// Re-fuse the current state (`None` if nothing has been submitted)
    pub fn assessment(&self) -> Option<Assessment> {
        assess(
            self.text.as_ref(),
            self.audio.as_ref(),
            self.image.as_ref(),
            self.analyzer.config().confidence_policy,
        )
    }

    /// Latest text indicators
    pub fn text(&self) -> Option<&TextIndicators> {
        self.text.as_ref()
    }

    /// Latest audio indicators
    pub fn audio(&self) -> Option<&AudioIndicators> {
        self.audio.as_ref()
    }

    /// Latest facial indicators
    pub fn image(&self) -> Option<&ImageIndicators> {
        self.image.as_ref()
    }

    /// The analyzer, e.g. to mark the classifier ready mid-session
    pub fn analyzer_mut(&mut self) -> &mut Analyzer {
        &mut self.analyzer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::result::RiskLevel;
    use crate::features::image::NoNoise;
    use crate::features::text::{ClassifierState, Sentiment, SentimentLabel, SentimentSource};

    fn session() -> Session {
        let analyzer = Analyzer::new(AnalysisConfig::default())
            .unwrap()
            .with_noise(NoNoise);
        Session::new(analyzer)
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = AnalysisConfig {
            noise_amplitude: 2.0,
            ..AnalysisConfig::default()
        };
        assert!(Analyzer::new(config).is_err());
    }

    #[test]
    fn test_empty_session_has_no_assessment() {
        assert!(session().assessment().is_none());
    }

    #[test]
    fn test_submit_replaces_modality() {
        let mut session = session();
        let crisis = session.submit_text("I want to kill myself");
        assert_eq!(crisis.fusion.risk_level, RiskLevel::Critical);

        let calm = session.submit_text("I feel good today");
        assert_ne!(calm.fusion.risk_level, RiskLevel::Critical);
        assert_eq!(calm.fusion.active_modalities.count(), 1);
    }

    #[test]
    fn test_every_submit_returns_fresh_assessment() {
        let mut session = session();
        let frame = ImageFrame::solid(8, 8, [90, 90, 90]).unwrap();

        assert_eq!(session.submit_image(&frame).fusion.active_modalities.count(), 1);
        assert_eq!(session.submit_audio(&[0.2; 128]).fusion.active_modalities.count(), 2);
        let latest = session.submit_text("long week");
        assert_eq!(latest.fusion.active_modalities.count(), 3);
        assert_eq!(session.assessment(), Some(latest));
    }

    #[test]
    fn test_clear_drops_everything() {
        let mut session = session();
        session.submit_audio(&[0.1; 256]);
        let frame = ImageFrame::solid(8, 8, [128, 128, 128]).unwrap();
        session.submit_image(&frame);
        assert_eq!(
            session.assessment().unwrap().fusion.active_modalities.count(),
            2
        );

        session.clear();
        assert!(session.assessment().is_none());
        assert!(session.audio().is_none());
    }

    #[test]
    fn test_classifier_becomes_ready_mid_session() {
        let mut session = session();
        let before = session.submit_text("some words here");
        assert_eq!(before.metadata.warnings.len(), 1);

        let ready = ClassifierHandle::from_fn(|_| Ok(Sentiment::new(SentimentLabel::Negative, 0.9)));
        session
            .analyzer_mut()
            .classifier_mut()
            .set_state(ready.state().clone());

        let after = session.submit_text("some words here");
        assert!(after.metadata.warnings.is_empty());
        assert_eq!(
            session.text().map(|t| t.sentiment_source),
            Some(SentimentSource::Classifier)
        );
        assert!(matches!(
            session.analyzer_mut().classifier().state(),
            ClassifierState::Ready(_)
        ));
    }
}
