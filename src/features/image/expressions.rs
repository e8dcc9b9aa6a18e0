//! Facial expression distribution

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::preprocessing::normalization::normalize_sum;

/// The seven recognised expressions, in enumeration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Expression {
    /// Neutral face
    Neutral,
    /// Happy
    Happy,
    /// Sad
    Sad,
    /// Angry
    Angry,
    /// Fearful
    Fearful,
    /// Disgusted
    Disgusted,
    /// Surprised
    Surprised,
}

impl Expression {
    /// All expressions in enumeration order (also the tie-break order)
    pub const ALL: [Expression; 7] = [
        Expression::Neutral,
        Expression::Happy,
        Expression::Sad,
        Expression::Angry,
        Expression::Fearful,
        Expression::Disgusted,
        Expression::Surprised,
    ];

    /// Lower-case name
    pub fn name(self) -> &'static str {
        match self {
            Expression::Neutral => "neutral",
            Expression::Happy => "happy",
            Expression::Sad => "sad",
            Expression::Angry => "angry",
            Expression::Fearful => "fearful",
            Expression::Disgusted => "disgusted",
            Expression::Surprised => "surprised",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Weights over the seven expressions
///
/// Once normalized the weights sum to 1. Serializes as a map keyed by
/// expression name.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExpressionScores {
    /// Neutral weight
    pub neutral: f32,
    /// Happy weight
    pub happy: f32,
    /// Sad weight
    pub sad: f32,
    /// Angry weight
    pub angry: f32,
    /// Fearful weight
    pub fearful: f32,
    /// Disgusted weight
    pub disgusted: f32,
    /// Surprised weight
    pub surprised: f32,
}

impl ExpressionScores {
    /// Build from an array in enumeration order
    pub fn from_array(values: [f32; 7]) -> Self {
        Self {
            neutral: values[0],
            happy: values[1],
            sad: values[2],
            angry: values[3],
            fearful: values[4],
            disgusted: values[5],
            surprised: values[6],
        }
    }

    /// Values in enumeration order
    pub fn to_array(&self) -> [f32; 7] {
        [
            self.neutral,
            self.happy,
            self.sad,
            self.angry,
            self.fearful,
            self.disgusted,
            self.surprised,
        ]
    }

    /// Weight of one expression
    pub fn get(&self, expression: Expression) -> f32 {
        self.to_array()[expression.index()]
    }

    /// Sum of all weights
    pub fn total(&self) -> f32 {
        self.to_array().iter().sum()
    }

    /// Copy scaled to sum to 1 (unchanged if the total is not positive)
    pub fn normalized(&self) -> Self {
        let mut values = self.to_array();
        if let Err(e) = normalize_sum(&mut values) {
            log::warn!("Expression scores left unnormalized: {}", e);
        }
        Self::from_array(values)
    }

    /// Highest-weighted expression; ties go to the earliest in enumeration order
    pub fn dominant(&self) -> Expression {
        let mut best = Expression::Neutral;
        let mut best_score = f32::NEG_INFINITY;
        for expression in Expression::ALL {
            let score = self.get(expression);
            if score > best_score {
                best = expression;
                best_score = score;
            }
        }
        best
    }

    /// (expression, weight) pairs in enumeration order
    pub fn iter(&self) -> impl Iterator<Item = (Expression, f32)> + '_ {
        Expression::ALL.into_iter().map(move |e| (e, self.get(e)))
    }
}
