//! Capture input types
//!
//! The shapes recording and camera plumbing hand to the extractors.

pub mod frame;
pub mod sample_buffer;

pub use frame::ImageFrame;
pub use sample_buffer::SampleBuffer;
