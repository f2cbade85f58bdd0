//! Plot-area geometry.

use iced::Size;

/// Default logical canvas width.
pub const DEFAULT_WIDTH: f32 = 800.0;
/// Default logical canvas height.
pub const DEFAULT_HEIGHT: f32 = 200.0;

/// Space reserved around the plot area for labels, title and legend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Padding {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

/// Padding used by every chart.
pub const CHART_PADDING: Padding = Padding {
    top: 20.0,
    right: 20.0,
    bottom: 40.0,
    left: 60.0,
};

/// The rectangle series are drawn into, in logical canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl PlotArea {
    /// Compute the plot area of a canvas of the given logical size.
    ///
    /// Returns `None` when the padding leaves no room to plot.
    pub fn from_size(size: Size, padding: Padding) -> Option<Self> {
        let width = size.width - padding.left - padding.right;
        let height = size.height - padding.top - padding.bottom;

        if width <= 0.0 || height <= 0.0 || !width.is_finite() || !height.is_finite() {
            return None;
        }

        Some(Self {
            left: padding.left,
            top: padding.top,
            width,
            height,
        })
    }

    /// Plot area of a canvas using [`CHART_PADDING`].
    pub fn for_canvas(size: Size) -> Option<Self> {
        Self::from_size(size, CHART_PADDING)
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Whether `x` lies within the horizontal extent (edges included).
    pub fn contains_x(&self, x: f32) -> bool {
        x >= self.left && x <= self.right()
    }

    /// Horizontal distance between two consecutive points.
    pub fn x_step(&self, point_count: usize) -> f32 {
        self.width / point_count.saturating_sub(1).max(1) as f32
    }

    /// Horizontal position of the point at `index`.
    pub fn x_for_index(&self, index: usize, point_count: usize) -> f32 {
        self.left + index as f32 * self.x_step(point_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plot_area_default_canvas() {
        let plot = PlotArea::for_canvas(Size::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)).unwrap();
        assert_eq!(plot.left, 60.0);
        assert_eq!(plot.top, 20.0);
        assert_eq!(plot.width, 720.0);
        assert_eq!(plot.height, 140.0);
        assert_eq!(plot.right(), 780.0);
        assert_eq!(plot.bottom(), 160.0);
    }

    #[test]
    fn test_plot_area_too_small() {
        assert!(PlotArea::for_canvas(Size::new(80.0, 200.0)).is_none());
        assert!(PlotArea::for_canvas(Size::new(800.0, 60.0)).is_none());
    }

    #[test]
    fn test_x_positions() {
        let plot = PlotArea::for_canvas(Size::new(580.0, 200.0)).unwrap();
        assert_eq!(plot.width, 500.0);

        assert_eq!(plot.x_for_index(0, 3), 60.0);
        assert_eq!(plot.x_for_index(1, 3), 310.0);
        assert_eq!(plot.x_for_index(2, 3), 560.0);

        // A lone point sits on the left edge.
        assert_eq!(plot.x_for_index(0, 1), 60.0);
        assert_eq!(plot.x_step(1), 500.0);
        assert_eq!(plot.x_step(0), 500.0);
    }

    #[test]
    fn test_contains_x_includes_edges() {
        let plot = PlotArea::for_canvas(Size::new(580.0, 200.0)).unwrap();
        assert!(plot.contains_x(60.0));
        assert!(plot.contains_x(560.0));
        assert!(!plot.contains_x(59.9));
        assert!(!plot.contains_x(560.1));
    }
}
