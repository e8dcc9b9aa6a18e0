//! RGB to luma conversion
//!
//! Uses the ITU-R BT.601 weights: `Y = 0.299 R + 0.587 G + 0.114 B`.

use crate::io::ImageFrame;

/// Luma of a single RGB pixel, in [0, 255]
#[inline]
pub fn luma(rgb: [u8; 3]) -> f32 {
    0.299 * rgb[0] as f32 + 0.587 * rgb[1] as f32 + 0.114 * rgb[2] as f32
}

/// Row-major luma plane of a frame
#[derive(Debug, Clone)]
pub struct LumaPlane {
    width: usize,
    height: usize,
    values: Vec<f32>,
}

impl LumaPlane {
    /// Convert every pixel of a frame
    pub fn from_frame(frame: &ImageFrame) -> Self {
        let values: Vec<f32> = frame.pixels().map(luma).collect();
        Self {
            width: frame.width(),
            height: frame.height(),
            values,
        }
    }

    /// Plane width
    pub fn width(&self) -> usize {
        self.width
    }

    /// Plane height
    pub fn height(&self) -> usize {
        self.height
    }

    /// Luma at (x, y)
    #[inline]
    pub fn at(&self, x: usize, y: usize) -> f32 {
        self.values[y * self.width + x]
    }

    /// Mean luma and population standard deviation
    ///
    /// Accumulates in f64; a VGA frame has enough pixels to lose precision
    /// in an f32 running sum.
    pub fn mean_and_std_dev(&self) -> (f32, f32) {
        if self.values.is_empty() {
            return (0.0, 0.0);
        }

        let n = self.values.len() as f64;
        let mean = self.values.iter().map(|&v| v as f64).sum::<f64>() / n;
        let variance = self
            .values
            .iter()
            .map(|&v| {
                let d = v as f64 - mean;
                d * d
            })
            .sum::<f64>()
            / n;
        (mean as f32, variance.sqrt() as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_luma_weights() {
        assert!((luma([255, 255, 255]) - 255.0).abs() < 1e-3);
        assert_eq!(luma([0, 0, 0]), 0.0);
        assert!((luma([100, 0, 0]) - 29.9).abs() < 1e-4);
    }

    #[test]
    fn test_uniform_plane_has_zero_deviation() {
        let frame = ImageFrame::solid(4, 4, [120, 120, 120]).unwrap();
        let plane = LumaPlane::from_frame(&frame);
        let (mean, std_dev) = plane.mean_and_std_dev();
        assert!((mean - 120.0).abs() < 1e-3);
        assert!(std_dev.abs() < 1e-3);
    }

    #[test]
    fn test_two_level_plane_deviation() {
        // Half black, half white: mean 127.5, deviation 127.5
        let mut rgba = Vec::new();
        for i in 0..4 {
            let v = if i % 2 == 0 { 0 } else { 255 };
            rgba.extend_from_slice(&[v, v, v, 255]);
        }
        let frame = ImageFrame::new(2, 2, rgba).unwrap();
        let (mean, std_dev) = LumaPlane::from_frame(&frame).mean_and_std_dev();
        assert!((mean - 127.5).abs() < 1e-2);
        assert!((std_dev - 127.5).abs() < 1e-2);
    }
}
