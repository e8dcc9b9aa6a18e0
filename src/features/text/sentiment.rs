//! Sentiment classifier capability
//!
//! The text extractor does not own a model. It is handed a [`ClassifierHandle`]
//! that is either still loading, ready, or permanently failed, and falls back
//! to a neutral judgment whenever the classifier cannot answer.
//!
//! # Example
//!
//! ```
//! use mindguard::features::text::sentiment::{ClassifierHandle, Sentiment, SentimentLabel};
//!
//! let handle = ClassifierHandle::from_fn(|text| {
//!     let label = if text.contains("awful") {
//!         SentimentLabel::Negative
//!     } else {
//!         SentimentLabel::Positive
//!     };
//!     Ok(Sentiment::new(label, 0.9))
//! });
//!
//! let sentiment = handle.classify("an awful day", None)?;
//! assert_eq!(sentiment.label, SentimentLabel::Negative);
//! # Ok::<(), mindguard::AnalysisError>(())
//! ```

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;
use crate::preprocessing::normalization::clamp_unit;

/// Binary sentiment label (plus the neutral fallback)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SentimentLabel {
    /// Positive judgment
    Positive,
    /// Negative judgment
    Negative,
    /// No judgment available
    Neutral,
}

/// A sentiment judgment with its score in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    /// Predicted label
    pub label: SentimentLabel,
    /// Classifier score for the label
    pub score: f32,
}

impl Sentiment {
    /// Create a judgment, clamping the score to [0, 1]
    pub fn new(label: SentimentLabel, score: f32) -> Self {
        Self {
            label,
            score: clamp_unit(score),
        }
    }

    /// The fallback used whenever no classifier answer is available
    pub const fn neutral() -> Self {
        Self {
            label: SentimentLabel::Neutral,
            score: 0.5,
        }
    }

    /// True for a NEGATIVE label
    pub fn is_negative(&self) -> bool {
        self.label == SentimentLabel::Negative
    }

    /// How negative the text reads: the score for NEGATIVE, its complement otherwise
    pub fn negativity(&self) -> f32 {
        if self.is_negative() {
            self.score
        } else {
            1.0 - self.score
        }
    }
}

impl Default for Sentiment {
    fn default() -> Self {
        Self::neutral()
    }
}

/// Where a text's sentiment came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentSource {
    /// Answered by the injected classifier
    Classifier,
    /// Neutral default (classifier loading, failed, timed out, or input blank)
    Fallback,
}

/// A text sentiment classifier
///
/// Implementations may be slow or fail; callers never see those failures
/// because the text extractor degrades to [`Sentiment::neutral`].
pub trait SentimentClassifier: Send + Sync {
    /// Classify a piece of text
    fn classify(&self, text: &str) -> Result<Sentiment, AnalysisError>;
}

impl<F> SentimentClassifier for F
where
    F: Fn(&str) -> Result<Sentiment, AnalysisError> + Send + Sync,
{
    fn classify(&self, text: &str) -> Result<Sentiment, AnalysisError> {
        self(text)
    }
}

/// Lifecycle state of the classifier capability
#[derive(Clone)]
pub enum ClassifierState {
    /// Not ready yet; may become ready later
    Loading,
    /// Ready to classify
    Ready(Arc<dyn SentimentClassifier>),
    /// Loading failed; will not become ready
    Failed(String),
}

impl std::fmt::Debug for ClassifierState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClassifierState::Loading => write!(f, "Loading"),
            ClassifierState::Ready(_) => write!(f, "Ready(..)"),
            ClassifierState::Failed(reason) => f.debug_tuple("Failed").field(reason).finish(),
        }
    }
}

/// Handle to the (optional) sentiment classifier
#[derive(Debug, Clone)]
pub struct ClassifierHandle {
    state: ClassifierState,
}

impl Default for ClassifierHandle {
    fn default() -> Self {
        Self::loading()
    }
}

impl ClassifierHandle {
    /// A classifier that has not finished loading
    pub fn loading() -> Self {
        Self {
            state: ClassifierState::Loading,
        }
    }

    /// A ready classifier
    pub fn ready<C>(classifier: C) -> Self
    where
        C: SentimentClassifier + 'static,
    {
        Self {
            state: ClassifierState::Ready(Arc::new(classifier)),
        }
    }

    /// A ready classifier backed by a closure
    pub fn from_fn<F>(classify: F) -> Self
    where
        F: Fn(&str) -> Result<Sentiment, AnalysisError> + Send + Sync + 'static,
    {
        Self::ready(classify)
    }

    /// A classifier that failed to load
    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            state: ClassifierState::Failed(reason.into()),
        }
    }

    /// Current state
    pub fn state(&self) -> &ClassifierState {
        &self.state
    }

    /// True once the classifier can answer
    pub fn is_ready(&self) -> bool {
        matches!(self.state, ClassifierState::Ready(_))
    }

    /// Move to a new lifecycle state (e.g. when background loading completes)
    pub fn set_state(&mut self, state: ClassifierState) {
        log::debug!("Sentiment classifier state -> {:?}", state);
        self.state = state;
    }

    /// Classify text, optionally bounded by a time budget
    ///
    /// A loading classifier is never waited on. With a `timeout`, the call
    /// runs on a helper thread; if the budget runs out, the thread is left to
    /// finish on its own and its answer is discarded.
    ///
    /// # Errors
    ///
    /// - `ClassifierUnavailable` if loading or failed
    /// - `ClassifierFailed` if the classifier errors, panics, times out, or
    ///   returns a non-finite score
    pub fn classify(
        &self,
        text: &str,
        timeout: Option<Duration>,
    ) -> Result<Sentiment, AnalysisError> {
        let classifier = match &self.state {
            ClassifierState::Loading => {
                return Err(AnalysisError::ClassifierUnavailable(
                    "classifier is still loading".to_string(),
                ))
            }
            ClassifierState::Failed(reason) => {
                return Err(AnalysisError::ClassifierUnavailable(reason.clone()))
            }
            ClassifierState::Ready(classifier) => classifier,
        };

        let sentiment = match timeout {
            None => classify_inline(classifier.as_ref(), text)?,
            Some(budget) => classify_with_budget(Arc::clone(classifier), text, budget)?,
        };

        if !sentiment.score.is_finite() {
            return Err(AnalysisError::ClassifierFailed(format!(
                "classifier returned non-finite score {}",
                sentiment.score
            )));
        }

        Ok(Sentiment::new(sentiment.label, sentiment.score))
    }
}

fn classify_inline(
    classifier: &dyn SentimentClassifier,
    text: &str,
) -> Result<Sentiment, AnalysisError> {
    panic::catch_unwind(AssertUnwindSafe(|| classifier.classify(text)))
        .unwrap_or_else(|payload| Err(AnalysisError::ClassifierFailed(panic_message(&*payload))))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    let detail = payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string payload");
    format!("classifier panicked: {}", detail)
}

fn classify_with_budget(
    classifier: Arc<dyn SentimentClassifier>,
    text: &str,
    budget: Duration,
) -> Result<Sentiment, AnalysisError> {
    let (tx, rx) = mpsc::channel();
    let owned = text.to_string();

    thread::spawn(move || {
        // The receiver may be gone if we already timed out.
        let _ = tx.send(classifier.classify(&owned));
    });

    match rx.recv_timeout(budget) {
        Ok(result) => result,
        Err(mpsc::RecvTimeoutError::Timeout) => Err(AnalysisError::ClassifierFailed(format!(
            "no answer within {:?}",
            budget
        ))),
        Err(mpsc::RecvTimeoutError::Disconnected) => Err(AnalysisError::ClassifierFailed(
            "classifier thread exited without an answer".to_string(),
        )),
    }
}
