//! Per-metric linear value scale.

use super::layout::PlotArea;

/// Number of intervals between Y-axis ticks.
pub const TICK_INTERVALS: usize = 5;

/// Linear mapping from metric values to vertical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    pub min: f64,
    pub max: f64,
    /// `max - min`, floored to 1 for flat series.
    pub range: f64,
    pub pixels_per_unit: f64,
}

impl Scale {
    /// Fit a scale to the given values over a plot of `plot_height` pixels.
    ///
    /// Returns `None` when there are no values.
    pub fn fit(values: impl IntoIterator<Item = f64>, plot_height: f32) -> Option<Self> {
        let (min, max) = values
            .into_iter()
            .fold(None, |bounds: Option<(f64, f64)>, v| match bounds {
                None => Some((v, v)),
                Some((min, max)) => Some((min.min(v), max.max(v))),
            })?;

        let range = if max - min == 0.0 { 1.0 } else { max - min };

        Some(Self {
            min,
            max,
            range,
            pixels_per_unit: f64::from(plot_height) / range,
        })
    }

    /// Vertical pixel of `value`; larger values sit higher.
    pub fn y(&self, value: f64, plot: &PlotArea) -> f32 {
        let offset = (value - self.min) * self.pixels_per_unit;
        (f64::from(plot.top) + f64::from(plot.height) - offset) as f32
    }

    /// Value printed at tick `tick` (0 = top = max, 5 = bottom = min).
    pub fn tick_value(&self, tick: usize) -> f64 {
        let steps_from_bottom = TICK_INTERVALS - tick.min(TICK_INTERVALS);
        self.min + (self.range / TICK_INTERVALS as f64) * steps_from_bottom as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iced::Size;

    fn plot() -> PlotArea {
        PlotArea::for_canvas(Size::new(800.0, 200.0)).unwrap()
    }

    #[test]
    fn test_fit_min_max() {
        let scale = Scale::fit([5.0, -2.0, 8.0], 140.0).unwrap();
        assert_eq!(scale.min, -2.0);
        assert_eq!(scale.max, 8.0);
        assert_eq!(scale.range, 10.0);
        assert_eq!(scale.pixels_per_unit, 14.0);
    }

    #[test]
    fn test_fit_empty() {
        assert!(Scale::fit(std::iter::empty(), 140.0).is_none());
    }

    #[test]
    fn test_flat_series_range_floor() {
        let plot = plot();
        let scale = Scale::fit([42.0, 42.0, 42.0], plot.height).unwrap();

        assert_eq!(scale.range, 1.0);
        let y = scale.y(42.0, &plot);
        assert!(y.is_finite());
        assert_eq!(y, plot.bottom());
    }

    #[test]
    fn test_extremes_map_to_plot_edges() {
        let plot = plot();
        let scale = Scale::fit([0.0, 50.0, 100.0], plot.height).unwrap();

        assert!((scale.y(100.0, &plot) - plot.top).abs() < 1e-4);
        assert!((scale.y(0.0, &plot) - plot.bottom()).abs() < 1e-4);
        assert!((scale.y(50.0, &plot) - (plot.top + plot.height / 2.0)).abs() < 1e-4);
    }

    #[test]
    fn test_tick_values() {
        let scale = Scale::fit([10.0, 20.0], 140.0).unwrap();
        let ticks: Vec<f64> = (0..=TICK_INTERVALS).map(|i| scale.tick_value(i)).collect();
        assert_eq!(ticks, vec![20.0, 18.0, 16.0, 14.0, 12.0, 10.0]);
    }
}
