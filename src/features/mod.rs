//! Feature extraction modules
//!
//! One extractor per modality, each turning raw input into normalized
//! indicator scores:
//! - Text (lexicon scan + sentiment)
//! - Audio (RMS energy + zero-crossing rate)
//! - Image (luma / edge statistics over face regions)

pub mod audio;
pub mod image;
pub mod text;
