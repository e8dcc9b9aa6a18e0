//! Face-region statistics
//!
//! A captured frame is assumed to be roughly face-centred. Three horizontal
//! bands inside the central half of the frame stand in for facial regions:
//!
//! | region   | rows          |
//! |----------|---------------|
//! | forehead | 10% .. 30%    |
//! | eyes     | 30% .. 50%    |
//! | mouth    | 55% .. 80%    |
//!
//! Columns span 25% .. 75% of the width. Bounds are computed in f64 and
//! floored to whole pixels.

use crate::preprocessing::luma::LumaPlane;

/// Brightness reported for a region that contains no pixels
const EMPTY_REGION_BRIGHTNESS: f32 = 128.0;

/// A rectangular pixel region, half-open on both axes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    /// First column
    pub x_start: usize,
    /// One past the last column
    pub x_end: usize,
    /// First row
    pub y_start: usize,
    /// One past the last row
    pub y_end: usize,
}

impl Region {
    /// Region from fractional bounds of a `width` x `height` frame
    pub fn from_fractions(
        width: usize,
        height: usize,
        x: (f64, f64),
        y: (f64, f64),
    ) -> Self {
        let floor = |fraction: f64, extent: usize| (extent as f64 * fraction).floor() as usize;
        Self {
            x_start: floor(x.0, width),
            x_end: floor(x.1, width),
            y_start: floor(y.0, height),
            y_end: floor(y.1, height),
        }
    }
}

/// Mean brightness and edge density of a region
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionStats {
    /// Mean luma in [0, 255] (128 for an empty region)
    pub brightness: f32,
    /// Fraction of pixels whose luma differs from the left neighbour by more
    /// than the edge threshold (0 for an empty region)
    pub edges: f32,
}

/// The three face regions of a frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceRegions {
    /// Upper band
    pub forehead: RegionStats,
    /// Middle band
    pub eyes: RegionStats,
    /// Lower band
    pub mouth: RegionStats,
}

/// Central column span shared by all face regions
const CENTER_COLUMNS: (f64, f64) = (0.25, 0.75);

/// Row span of the forehead band
pub const FOREHEAD_ROWS: (f64, f64) = (0.10, 0.30);

/// Row span of the eyes band
pub const EYES_ROWS: (f64, f64) = (0.30, 0.50);

/// Row span of the mouth band
pub const MOUTH_ROWS: (f64, f64) = (0.55, 0.80);

/// Compute statistics for a single region
///
/// Edges are horizontal gradients only: each pixel after the first column of
/// the region is compared with its left neighbour.
pub fn region_stats(plane: &LumaPlane, region: Region, edge_threshold: f32) -> RegionStats {
    let x_end = region.x_end.min(plane.width());
    let y_end = region.y_end.min(plane.height());

    let mut sum = 0.0f64;
    let mut count = 0usize;
    let mut edge_count = 0usize;

    for y in region.y_start..y_end {
        for x in region.x_start..x_end {
            let value = plane.at(x, y);
            sum += value as f64;
            count += 1;

            if x > region.x_start && (value - plane.at(x - 1, y)).abs() > edge_threshold {
                edge_count += 1;
            }
        }
    }

    if count == 0 {
        return RegionStats {
            brightness: EMPTY_REGION_BRIGHTNESS,
            edges: 0.0,
        };
    }

    RegionStats {
        brightness: (sum / count as f64) as f32,
        edges: edge_count as f32 / count as f32,
    }
}

/// Compute forehead, eyes and mouth statistics
pub fn face_regions(plane: &LumaPlane, edge_threshold: f32) -> FaceRegions {
    let (w, h) = (plane.width(), plane.height());
    let band = |rows| Region::from_fractions(w, h, CENTER_COLUMNS, rows);

    FaceRegions {
        forehead: region_stats(plane, band(FOREHEAD_ROWS), edge_threshold),
        eyes: region_stats(plane, band(EYES_ROWS), edge_threshold),
        mouth: region_stats(plane, band(MOUTH_ROWS), edge_threshold),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::ImageFrame;

    fn striped_frame(width: usize, height: usize) -> ImageFrame {
        // Alternating black/white columns: every horizontal step is an edge
        let mut rgba = Vec::with_capacity(width * height * 4);
        for _y in 0..height {
            for x in 0..width {
                let v = if x % 2 == 0 { 0 } else { 255 };
                rgba.extend_from_slice(&[v, v, v, 255]);
            }
        }
        ImageFrame::new(width, height, rgba).unwrap()
    }

    #[test]
    fn test_region_bounds_are_floored() {
        let region = Region::from_fractions(10, 10, CENTER_COLUMNS, MOUTH_ROWS);
        assert_eq!(
            region,
            Region {
                x_start: 2,
                x_end: 7,
                y_start: 5,
                y_end: 8
            }
        );
    }

    #[test]
    fn test_uniform_frame_has_no_edges() {
        let frame = ImageFrame::solid(40, 40, [90, 90, 90]).unwrap();
        let plane = LumaPlane::from_frame(&frame);
        let regions = face_regions(&plane, 20.0);

        assert!((regions.eyes.brightness - 90.0).abs() < 1e-3);
        assert_eq!(regions.eyes.edges, 0.0);
        assert_eq!(regions.forehead.edges, 0.0);
    }

    #[test]
    fn test_striped_frame_edge_ratio() {
        let frame = striped_frame(40, 40);
        let plane = LumaPlane::from_frame(&frame);
        let stats = region_stats(
            &plane,
            Region {
                x_start: 10,
                x_end: 30,
                y_start: 0,
                y_end: 1,
            },
            20.0,
        );
        // 20 pixels, 19 comparisons, all edges
        assert!((stats.edges - 19.0 / 20.0).abs() < 1e-6);
    }

    #[test]
    fn test_empty_region_defaults() {
        // A 1x1 frame floors every band to zero rows
        let frame = ImageFrame::solid(1, 1, [10, 10, 10]).unwrap();
        let plane = LumaPlane::from_frame(&frame);
        let regions = face_regions(&plane, 20.0);
        assert_eq!(regions.mouth.brightness, 128.0);
        assert_eq!(regions.mouth.edges, 0.0);
    }
}
