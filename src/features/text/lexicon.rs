//! Risk and positivity lexicons
//!
//! Three disjoint severity lexicons plus a positivity lexicon. Matching is a
//! plain substring test against the lower-cased text, so multi-word phrases
//! ("kill myself") and word fragments ("sad" inside "saddened") both count.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// High-severity phrases (weight 3)
pub const HIGH_RISK_TERMS: &[&str] = &[
    "suicide",
    "kill myself",
    "end it all",
    "no reason to live",
    "want to die",
    "better off dead",
];

/// Medium-severity phrases (weight 2)
pub const MEDIUM_RISK_TERMS: &[&str] = &[
    "hopeless",
    "worthless",
    "nobody cares",
    "can't go on",
    "exhausted",
    "giving up",
    "alone",
    "isolated",
];

/// Low-severity terms (weight 1)
pub const LOW_RISK_TERMS: &[&str] = &[
    "stressed",
    "anxious",
    "worried",
    "tired",
    "sad",
    "overwhelmed",
    "frustrated",
    "depressed",
];

/// Positivity terms (+0.1 each)
pub const POSITIVE_TERMS: &[&str] = &[
    "happy",
    "grateful",
    "hopeful",
    "excited",
    "good",
    "great",
    "wonderful",
    "amazing",
    "better",
    "improving",
];

/// Positivity boost per matched positive term
pub const POSITIVITY_BOOST_PER_TERM: f32 = 0.1;

/// Severity of a matched risk term
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Crisis language
    High,
    /// Hopelessness / isolation language
    Medium,
    /// General distress language
    Low,
}

impl Severity {
    /// All severities, in scan order
    pub const ALL: [Severity; 3] = [Severity::High, Severity::Medium, Severity::Low];

    /// Contribution of one match to the running risk level
    pub fn weight(self) -> u32 {
        match self {
            Severity::High => 3,
            Severity::Medium => 2,
            Severity::Low => 1,
        }
    }

    /// Tag prefixed to indicator strings
    pub fn tag(self) -> &'static str {
        match self {
            Severity::High => "HIGH RISK",
            Severity::Medium => "MEDIUM",
            Severity::Low => "LOW",
        }
    }

    /// Lexicon for this severity
    pub fn terms(self) -> &'static [&'static str] {
        match self {
            Severity::High => HIGH_RISK_TERMS,
            Severity::Medium => MEDIUM_RISK_TERMS,
            Severity::Low => LOW_RISK_TERMS,
        }
    }
}

/// A lexicon-triggered risk flag
///
/// Serializes as its tagged string form, e.g. `HIGH RISK: "end it all"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct RiskIndicator {
    /// Severity of the matched term
    pub severity: Severity,
    /// The lexicon entry that matched
    pub term: String,
}

impl RiskIndicator {
    /// Create an indicator for a matched term
    pub fn new(severity: Severity, term: impl Into<String>) -> Self {
        Self {
            severity,
            term: term.into(),
        }
    }

    /// True for crisis-level indicators, which force a critical classification
    pub fn is_high(&self) -> bool {
        self.severity == Severity::High
    }
}

impl fmt::Display for RiskIndicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: \"{}\"", self.severity.tag(), self.term)
    }
}

impl FromStr for RiskIndicator {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        for severity in Severity::ALL {
            let Some(rest) = s.strip_prefix(severity.tag()) else {
                continue;
            };
            let term = rest
                .strip_prefix(": \"")
                .and_then(|r| r.strip_suffix('"'))
                .ok_or_else(|| {
                    AnalysisError::InvalidInput(format!("Malformed risk indicator: {}", s))
                })?;
            return Ok(RiskIndicator {
                severity,
                term: term.to_string(),
            });
        }

        Err(AnalysisError::InvalidInput(format!(
            "Unknown risk indicator tag: {}",
            s
        )))
    }
}

impl From<RiskIndicator> for String {
    fn from(indicator: RiskIndicator) -> Self {
        indicator.to_string()
    }
}

impl TryFrom<String> for RiskIndicator {
    type Error = AnalysisError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Result of scanning text against the lexicons
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LexiconScan {
    /// Matched indicators: high first, then medium, then low, each in lexicon order
    pub indicators: Vec<RiskIndicator>,
    /// Sum of severity weights over all matches
    pub risk_level: u32,
    /// Accumulated positivity boost (unclamped)
    pub positivity_boost: f32,
}

/// Scan text against all lexicons
///
/// # Example
///
/// ```
/// use mindguard::features::text::lexicon::scan;
///
/// let result = scan("I feel so alone and tired");
/// assert_eq!(result.risk_level, 3); // alone (2) + tired (1)
/// assert_eq!(result.indicators[0].to_string(), "MEDIUM: \"alone\"");
/// ```
pub fn scan(text: &str) -> LexiconScan {
    let lower = text.to_lowercase();
    let mut result = LexiconScan::default();

    for severity in Severity::ALL {
        for &term in severity.terms() {
            if lower.contains(term) {
                result.indicators.push(RiskIndicator {
                    severity,
                    term: term.to_string(),
                });
                result.risk_level += severity.weight();
            }
        }
    }

    result.positivity_boost = POSITIVE_TERMS
        .iter()
        .filter(|&&term| lower.contains(term))
        .count() as f32
        * POSITIVITY_BOOST_PER_TERM;

    result
}
