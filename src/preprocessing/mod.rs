//! Input preprocessing modules
//!
//! This module contains utilities for preparing raw input for feature extraction:
//! - Numeric normalization (unit clamping, NaN absorption, sum normalization)
//! - Luma conversion for captured frames

pub mod luma;
pub mod normalization;
