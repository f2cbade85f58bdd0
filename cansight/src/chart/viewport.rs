//! Device-pixel-ratio aware canvas sizing.

use iced::{Point, Size};

/// Logical canvas size plus the device pixel ratio it is displayed at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Layout box in logical (device-independent) pixels.
    pub logical: Size,
    /// Device pixel ratio; always finite and positive.
    pub scale_factor: f32,
}

impl Viewport {
    /// Adapt a layout box to a device pixel ratio.
    ///
    /// Non-finite or non-positive ratios fall back to 1, and negative or
    /// non-finite dimensions collapse to 0.
    pub fn new(logical: Size, scale_factor: f32) -> Self {
        let scale_factor = if scale_factor.is_finite() && scale_factor > 0.0 {
            scale_factor
        } else {
            1.0
        };

        Self {
            logical: Size::new(sanitize(logical.width), sanitize(logical.height)),
            scale_factor,
        }
    }

    /// Size of the backing buffer in physical pixels.
    pub fn backing_size(&self) -> (u32, u32) {
        (
            (self.logical.width * self.scale_factor).round() as u32,
            (self.logical.height * self.scale_factor).round() as u32,
        )
    }

    /// Uniform scale applied so drawing commands can stay in logical units.
    pub fn transform_scale(&self) -> f32 {
        self.scale_factor
    }

    /// Map a logical point into backing-buffer coordinates.
    pub fn to_physical(&self, point: Point) -> Point {
        Point::new(point.x * self.scale_factor, point.y * self.scale_factor)
    }

    /// Map a backing-buffer point back into logical coordinates.
    pub fn to_logical(&self, point: Point) -> Point {
        Point::new(point.x / self.scale_factor, point.y / self.scale_factor)
    }
}

fn sanitize(dimension: f32) -> f32 {
    if dimension.is_finite() && dimension > 0.0 {
        dimension
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backing_size_follows_ratio() {
        let viewport = Viewport::new(Size::new(800.0, 200.0), 2.0);
        assert_eq!(viewport.backing_size(), (1600, 400));
        assert_eq!(viewport.transform_scale(), 2.0);

        let viewport = Viewport::new(Size::new(801.0, 250.0), 1.5);
        assert_eq!(viewport.backing_size(), (1202, 375));
    }

    #[test]
    fn test_invalid_ratio_falls_back_to_one() {
        for ratio in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let viewport = Viewport::new(Size::new(800.0, 200.0), ratio);
            assert_eq!(viewport.scale_factor, 1.0);
            assert_eq!(viewport.backing_size(), (800, 200));
        }
    }

    #[test]
    fn test_degenerate_layout_box() {
        let viewport = Viewport::new(Size::new(-10.0, f32::NAN), 2.0);
        assert_eq!(viewport.logical, Size::new(0.0, 0.0));
        assert_eq!(viewport.backing_size(), (0, 0));
    }

    #[test]
    fn test_point_mapping() {
        let viewport = Viewport::new(Size::new(800.0, 200.0), 2.0);
        let physical = viewport.to_physical(Point::new(60.0, 20.0));
        assert_eq!(physical, Point::new(120.0, 40.0));
        assert_eq!(viewport.to_logical(physical), Point::new(60.0, 20.0));
    }
}
