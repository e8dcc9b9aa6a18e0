//! # MindGuard
//!
//! A multi-modal mental-health risk scoring engine. Free text, a recorded
//! voice buffer and a captured face image are each reduced to normalized
//! indicators, then fused into one explainable risk assessment.
//!
//! ## Features
//!
//! - **Text**: severity-tagged lexicon scan plus an injectable sentiment classifier
//! - **Audio**: RMS energy and zero-crossing rate mapped to calm / stressed / sad / anxious
//! - **Image**: face-region brightness and edge statistics mapped to seven expressions
//! - **Fusion**: presence-dependent weighting, risk classification, confidence
//! - **Output**: alerts, recommendations and an explanation, all serde-serializable
//!
//! ## Quick Start
//!
//! ```
//! use mindguard::{Analyzer, AnalysisConfig};
//! use mindguard::features::image::NoNoise;
//!
//! let mut analyzer = Analyzer::new(AnalysisConfig::default())?.with_noise(NoNoise);
//!
//! let assessment = analyzer
//!     .assess(Some("I feel so tired and stressed lately"), Some(&[0.0; 4096]), None)
//!     .expect("two modalities present");
//!
//! println!(
//!     "Risk: {:.2} ({}) confidence {:.2}",
//!     assessment.fusion.overall_risk, assessment.fusion.risk_level, assessment.fusion.confidence
//! );
//! # Ok::<(), mindguard::AnalysisError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Input → Extractors (text / audio / image) → Fusion → Alerts, Recommendations, Explanation
//! ```
//!
//! Every stage is a pure function of its inputs except the injected sentiment
//! classifier and the image noise source.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod config;
pub mod error;
pub mod features;
pub mod io;
pub mod preprocessing;
pub mod session;

// Re-export main types
pub use analysis::assessment::{assess, Assessment};
pub use analysis::fusion::fuse;
pub use analysis::result::{FusionResult, RiskLevel};
pub use config::AnalysisConfig;
pub use error::AnalysisError;
pub use io::{ImageFrame, SampleBuffer};
pub use session::{Analyzer, Session};
