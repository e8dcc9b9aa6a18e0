//! Facial expression extraction
//!
//! Luma, contrast, warmth and face-band edge statistics → a 7-way expression
//! distribution and its dominant expression.

pub mod expressions;
pub mod extractor;
pub mod noise;
pub mod regions;

pub use expressions::{Expression, ExpressionScores};
pub use extractor::{extract_image_indicators, ImageIndicators};
pub use noise::{NoNoise, NoiseSource, SeededNoise};
