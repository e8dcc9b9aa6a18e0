//! Assessment metadata

use serde::{Deserialize, Serialize};

/// Warning recorded when text sentiment fell back to neutral
pub const CLASSIFIER_FALLBACK_WARNING: &str =
    "sentiment classifier unavailable, neutral sentiment used";

/// Assessment metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentMetadata {
    /// Algorithm version
    pub algorithm_version: String,

    /// Methods used
    pub methods_used: Vec<String>,

    /// Degradations that did not stop the assessment
    pub warnings: Vec<String>,
}

impl Default for AssessmentMetadata {
    fn default() -> Self {
        Self {
            algorithm_version: env!("CARGO_PKG_VERSION").to_string(),
            methods_used: vec![],
            warnings: vec![],
        }
    }
}
