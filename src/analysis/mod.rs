//! Fusion and assessment
//!
//! Combines per-modality indicators into the final assessment:
//! - Fusion (weights, risk level)
//! - Confidence scoring
//! - Alerts and recommendations
//! - Explanation
//! - Result types and metadata

pub mod alerts;
pub mod assessment;
pub mod confidence;
pub mod explain;
pub mod fusion;
pub mod metadata;
pub mod result;

pub use alerts::{Alert, AlertLevel, Recommendation, RecommendationCategory};
pub use assessment::{assess, Assessment};
pub use confidence::ConfidencePolicy;
pub use explain::{Counterfactual, Explanation, FeatureImportance};
pub use fusion::fuse;
pub use metadata::AssessmentMetadata;
pub use result::{ActiveModalities, FusionResult, Modality, ModalityScores, RiskLevel};
