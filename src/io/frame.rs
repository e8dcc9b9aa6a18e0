//! Captured still-image frames

use crate::error::AnalysisError;

/// Bytes per RGBA pixel
pub const BYTES_PER_PIXEL: usize = 4;

/// A decoded RGBA frame, row-major, 8 bits per channel
///
/// This is the shape camera or upload plumbing hands to the image extractor.
/// Construction validates that the buffer matches the dimensions, so the
/// extractor can index pixels without bounds surprises.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFrame {
    width: usize,
    height: usize,
    rgba: Vec<u8>,
}

impl ImageFrame {
    /// Wrap an RGBA buffer
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidInput` if either dimension is zero or the
    /// buffer length is not `width * height * 4`.
    pub fn new(width: usize, height: usize, rgba: Vec<u8>) -> Result<Self, AnalysisError> {
        if width == 0 || height == 0 {
            return Err(AnalysisError::InvalidInput(format!(
                "Frame dimensions must be non-zero, got {}x{}",
                width, height
            )));
        }

        let expected = width
            .checked_mul(height)
            .and_then(|pixels| pixels.checked_mul(BYTES_PER_PIXEL))
            .ok_or_else(|| {
                AnalysisError::InvalidInput(format!("Frame {}x{} is too large", width, height))
            })?;

        if rgba.len() != expected {
            return Err(AnalysisError::InvalidInput(format!(
                "RGBA buffer has {} bytes, expected {} for {}x{}",
                rgba.len(),
                expected,
                width,
                height
            )));
        }

        Ok(Self { width, height, rgba })
    }

    /// Frame filled with a single color
    pub fn solid(width: usize, height: usize, rgb: [u8; 3]) -> Result<Self, AnalysisError> {
        let pixels = width.saturating_mul(height);
        let mut rgba = Vec::with_capacity(pixels.saturating_mul(BYTES_PER_PIXEL));
        for _ in 0..pixels {
            rgba.extend_from_slice(&[rgb[0], rgb[1], rgb[2], 255]);
        }
        Self::new(width, height, rgba)
    }

    /// Frame width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Frame height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total pixel count
    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// Iterate RGB channels of every pixel in row-major order
    pub fn pixels(&self) -> impl Iterator<Item = [u8; 3]> + '_ {
        self.rgba
            .chunks_exact(BYTES_PER_PIXEL)
            .map(|px| [px[0], px[1], px[2]])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_zero_dimensions() {
        let result = ImageFrame::new(0, 10, vec![]);
        assert!(matches!(result, Err(AnalysisError::InvalidInput(_))));
    }

    #[test]
    fn test_rejects_mismatched_buffer() {
        let result = ImageFrame::new(2, 2, vec![0; 15]);
        assert!(result.is_err());
    }

    #[test]
    fn test_pixel_access() {
        let rgba = vec![
            1, 2, 3, 255, 4, 5, 6, 255, //
            7, 8, 9, 255, 10, 11, 12, 255,
        ];
        let frame = ImageFrame::new(2, 2, rgba).unwrap();
        let pixels: Vec<[u8; 3]> = frame.pixels().collect();
        assert_eq!(pixels, vec![[1, 2, 3], [4, 5, 6], [7, 8, 9], [10, 11, 12]]);
    }

    #[test]
    fn test_solid_frame() {
        let frame = ImageFrame::solid(3, 2, [200, 100, 50]).unwrap();
        assert_eq!(frame.pixel_count(), 6);
        assert!(frame.pixels().all(|px| px == [200, 100, 50]));
    }
}
