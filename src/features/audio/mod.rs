//! Voice indicator extraction
//!
//! RMS energy and zero-crossing rate → energy, pitch, tempo and calm /
//! stressed / sad / anxious scores.

pub mod extractor;

pub use extractor::{extract_audio_indicators, AudioEmotions, AudioIndicators};
