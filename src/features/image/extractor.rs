//! Facial expression extraction
//!
//! Pixel statistics stand in for a facial expression model:
//!
//! 1. Global luma mean ("brightness") and standard deviation ("contrast"),
//!    plus mean red and blue for a warmth estimate
//! 2. Forehead / eyes / mouth band brightness and edge density
//! 3. Fixed additive rules map those metrics to seven raw expression scores
//! 4. Each raw score is jittered by the injected noise source and floored
//! 5. Scores are normalized to sum to 1; the dominant expression is the arg-max
//!
//! # Example
//!
//! ```
//! use mindguard::features::image::{extract_image_indicators, NoNoise};
//! use mindguard::io::ImageFrame;
//! use mindguard::AnalysisConfig;
//!
//! let frame = ImageFrame::solid(64, 48, [180, 140, 120])?;
//! let indicators = extract_image_indicators(Some(&frame), &mut NoNoise, &AnalysisConfig::default());
//! assert!((indicators.expressions.total() - 1.0).abs() < 1e-5);
//! # Ok::<(), mindguard::AnalysisError>(())
//! ```

use serde::{Deserialize, Serialize};

use super::expressions::{Expression, ExpressionScores};
use super::noise::NoiseSource;
use super::regions::{face_regions, FaceRegions};
use crate::config::AnalysisConfig;
use crate::io::ImageFrame;
use crate::preprocessing::luma::LumaPlane;

/// Contrast (luma std-dev) that maps to 1.0
const CONTRAST_SCALE: f32 = 80.0;

/// Edge ratio multiplier before clamping to 1.0
const EDGE_SCALE: f32 = 15.0;

/// Everything the facial modality contributes to an assessment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageIndicators {
    /// Expression weights, summing to 1
    pub expressions: ExpressionScores,
    /// Arg-max of `expressions`
    pub dominant_expression: Expression,
}

impl ImageIndicators {
    /// Fixed output for a missing frame
    pub fn neutral() -> Self {
        Self::from_scores(ExpressionScores {
            neutral: 0.7,
            happy: 0.1,
            sad: 0.1,
            angry: 0.05,
            fearful: 0.02,
            disgusted: 0.02,
            surprised: 0.01,
        })
    }

    /// Wrap a distribution, deriving the dominant expression from it
    pub fn from_scores(expressions: ExpressionScores) -> Self {
        Self {
            dominant_expression: expressions.dominant(),
            expressions,
        }
    }
}

/// Normalized frame metrics feeding the expression rules
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameMetrics {
    /// Global brightness in [0, 1]
    pub brightness: f32,
    /// Contrast in [0, 1]
    pub contrast: f32,
    /// (mean R - mean B) / 255, positive for warm frames
    pub warmth: f32,
    /// Eye-band edge density in [0, 1]
    pub eye_edges: f32,
    /// Mouth-band edge density in [0, 1]
    pub mouth_edges: f32,
    /// Mouth-band brightness in [0, 1]
    pub mouth_brightness: f32,
    /// Forehead-band raw edge ratio (unscaled)
    pub forehead_edges: f32,
    /// Forehead-band brightness in [0, 1]
    pub forehead_brightness: f32,
}

/// Compute the normalized metrics for a frame
pub fn frame_metrics(frame: &ImageFrame, edge_threshold: f32) -> FrameMetrics {
    let plane = LumaPlane::from_frame(frame);
    let (mean_luma, std_dev) = plane.mean_and_std_dev();

    let pixels = frame.pixel_count() as f64;
    let (r_total, b_total) = frame
        .pixels()
        .fold((0.0f64, 0.0f64), |(r, b), px| (r + px[0] as f64, b + px[2] as f64));
    let warmth = ((r_total / pixels - b_total / pixels) / 255.0) as f32;

    let FaceRegions {
        forehead,
        eyes,
        mouth,
    } = face_regions(&plane, edge_threshold);

    FrameMetrics {
        brightness: mean_luma / 255.0,
        contrast: (std_dev / CONTRAST_SCALE).min(1.0),
        warmth,
        eye_edges: (eyes.edges * EDGE_SCALE).min(1.0),
        mouth_edges: (mouth.edges * EDGE_SCALE).min(1.0),
        mouth_brightness: mouth.brightness / 255.0,
        forehead_edges: forehead.edges,
        forehead_brightness: forehead.brightness / 255.0,
    }
}

#[inline]
fn bonus(condition: bool, amount: f32) -> f32 {
    if condition {
        amount
    } else {
        0.0
    }
}

/// Raw (un-normalized, un-jittered) expression scores
pub fn raw_expression_scores(m: &FrameMetrics) -> ExpressionScores {
    ExpressionScores {
        neutral: 0.25 + (1.0 - m.contrast) * 0.2 + (1.0 - m.eye_edges) * 0.15,
        happy: 0.1
            + bonus(m.mouth_brightness > 0.55, 0.25)
            + bonus(m.warmth > 0.05, 0.15)
            + bonus(m.brightness > 0.5, 0.1),
        sad: 0.1
            + bonus(m.brightness < 0.45, 0.25)
            + bonus(m.warmth < -0.02, 0.15)
            + bonus(m.mouth_edges < 0.3, 0.1),
        angry: 0.08
            + bonus(m.contrast > 0.5, 0.2)
            + bonus(m.eye_edges > 0.5, 0.15)
            + bonus(m.warmth > 0.1, 0.1),
        fearful: 0.05 + bonus(m.eye_edges > 0.6, 0.2) + bonus(m.forehead_edges > 0.04, 0.1),
        disgusted: 0.05 + bonus(m.contrast > 0.6, 0.1) + bonus(m.mouth_edges > 0.5, 0.1),
        surprised: 0.05
            + bonus(m.eye_edges > 0.5, 0.15)
            + bonus(m.mouth_brightness > 0.6, 0.15)
            + bonus(m.forehead_brightness > 0.55, 0.1),
    }
}

/// Extract the facial expression distribution from a captured frame
///
/// # Arguments
///
/// * `frame` - Captured RGBA frame; `None` yields [`ImageIndicators::neutral`]
/// * `noise` - Jitter source; pass `NoNoise` or a seeded source for
///   reproducible output
/// * `config` - Edge threshold and jitter parameters
pub fn extract_image_indicators<N: NoiseSource + ?Sized>(
    frame: Option<&ImageFrame>,
    noise: &mut N,
    config: &AnalysisConfig,
) -> ImageIndicators {
    let Some(frame) = frame else {
        log::debug!("No frame, using neutral expression distribution");
        return ImageIndicators::neutral();
    };

    let metrics = frame_metrics(frame, config.edge_threshold);
    let raw = raw_expression_scores(&metrics);

    let mut jittered = raw.to_array();
    for score in jittered.iter_mut() {
        *score = (*score + noise.jitter(config.noise_amplitude)).max(config.noise_floor);
    }

    let expressions = ExpressionScores::from_array(jittered).normalized();
    let indicators = ImageIndicators::from_scores(expressions);

    log::debug!(
        "Image indicators: {}x{}, brightness={:.3}, contrast={:.3}, warmth={:.3}, eye_edges={:.3}, mouth_edges={:.3}, dominant={}",
        frame.width(),
        frame.height(),
        metrics.brightness,
        metrics.contrast,
        metrics.warmth,
        metrics.eye_edges,
        metrics.mouth_edges,
        indicators.dominant_expression
    );

    indicators
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::image::noise::{NoNoise, SeededNoise};

    fn metrics() -> FrameMetrics {
        FrameMetrics {
            brightness: 0.4,
            contrast: 0.0,
            warmth: 0.0,
            eye_edges: 0.0,
            mouth_edges: 0.0,
            mouth_brightness: 0.4,
            forehead_edges: 0.0,
            forehead_brightness: 0.4,
        }
    }

    #[test]
    fn test_missing_frame_is_neutral() {
        let indicators = extract_image_indicators(None, &mut NoNoise, &AnalysisConfig::default());
        assert_eq!(indicators.dominant_expression, Expression::Neutral);
        assert_eq!(indicators.expressions.neutral, 0.7);
        assert!((indicators.expressions.total() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_raw_scores_for_dark_flat_frame() {
        let raw = raw_expression_scores(&metrics());
        // neutral: 0.25 + 0.2 + 0.15
        assert!((raw.neutral - 0.6).abs() < 1e-6);
        assert!((raw.happy - 0.1).abs() < 1e-6);
        // sad: 0.1 + 0.25 (dark) + 0.1 (flat mouth)
        assert!((raw.sad - 0.45).abs() < 1e-6);
        assert!((raw.angry - 0.08).abs() < 1e-6);
        assert!((raw.fearful - 0.05).abs() < 1e-6);
        assert!((raw.disgusted - 0.05).abs() < 1e-6);
        assert!((raw.surprised - 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_raw_scores_for_bright_warm_smile() {
        let m = FrameMetrics {
            brightness: 0.6,
            warmth: 0.08,
            mouth_brightness: 0.62,
            mouth_edges: 0.4,
            forehead_brightness: 0.6,
            ..metrics()
        };
        let raw = raw_expression_scores(&m);
        // happy: 0.1 + 0.25 + 0.15 + 0.1
        assert!((raw.happy - 0.6).abs() < 1e-6);
        // surprised: 0.05 + 0.15 (mouth) + 0.1 (forehead)
        assert!((raw.surprised - 0.3).abs() < 1e-6);
        assert!((raw.sad - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_dark_flat_frame() {
        let frame = ImageFrame::solid(64, 64, [40, 40, 40]).unwrap();
        let indicators =
            extract_image_indicators(Some(&frame), &mut NoNoise, &AnalysisConfig::default());

        // Uniform dark grey: neutral 0.6, sad 0.45 (dark + flat mouth), total 1.38
        assert_eq!(indicators.dominant_expression, Expression::Neutral);
        assert!((indicators.expressions.sad - 0.45 / 1.38).abs() < 1e-4);
        assert!(indicators.expressions.sad > indicators.expressions.happy);
    }

    #[test]
    fn test_distribution_sums_to_one_with_noise() {
        let frame = ImageFrame::solid(32, 32, [200, 160, 140]).unwrap();
        let mut noise = SeededNoise::from_seed(3);
        for _ in 0..20 {
            let indicators =
                extract_image_indicators(Some(&frame), &mut noise, &AnalysisConfig::default());
            assert!((indicators.expressions.total() - 1.0).abs() < 1e-5);
            assert_eq!(
                indicators.dominant_expression,
                indicators.expressions.dominant()
            );
        }
    }

    #[test]
    fn test_seeded_noise_is_reproducible() {
        let frame = ImageFrame::solid(16, 16, [120, 110, 100]).unwrap();
        let config = AnalysisConfig::default();
        let a = extract_image_indicators(Some(&frame), &mut SeededNoise::from_seed(9), &config);
        let b = extract_image_indicators(Some(&frame), &mut SeededNoise::from_seed(9), &config);
        assert_eq!(a, b);
    }
}
