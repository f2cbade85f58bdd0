//! Grid, axis and series renderers.

use iced::{Point, Size};

use cansight_common::{MetricDescriptor, Sample};

use super::format::to_fixed;
use super::layout::PlotArea;
use super::scale::{Scale, TICK_INTERVALS};
use super::scene::{DrawCommand, FontWeight, Paint, Scene, measure_text};
use super::viewport::Viewport;
use super::window::{Window, extract};

const VERTICAL_GRID_INTERVALS: usize = 10;
const GRID_WIDTH: f32 = 1.0;
const SERIES_WIDTH: f32 = 2.0;
const MARKER_RADIUS: f32 = 3.0;

const LABEL_SIZE: f32 = 12.0;
const TITLE_SIZE: f32 = 14.0;
const TITLE_BASELINE: f32 = 15.0;
const TICK_LABEL_X: f32 = 5.0;
const TICK_LABEL_OFFSET: f32 = 4.0;
const UNIT_GAP: f32 = 10.0;

const LEGEND_ENTRY_WIDTH: f32 = 120.0;
const LEGEND_SWATCH: f32 = 10.0;
const LEGEND_LABEL_OFFSET: f32 = 15.0;

/// Which metrics a chart shows and how.
#[derive(Debug, Clone, Copy)]
pub enum ChartRequest<'a> {
    /// One metric with tick labels, title and unit.
    Single(&'a MetricDescriptor),
    /// Several metrics on a shared plot area, each with its own scale.
    Overlay(&'a [MetricDescriptor]),
}

impl<'a> ChartRequest<'a> {
    /// The requested metrics in drawing order.
    pub fn metrics(&self) -> &'a [MetricDescriptor] {
        match self {
            ChartRequest::Single(metric) => std::slice::from_ref(*metric),
            ChartRequest::Overlay(metrics) => metrics,
        }
    }

    pub fn is_overlay(&self) -> bool {
        matches!(self, ChartRequest::Overlay(_))
    }
}

/// Render one chart into a display list.
///
/// Nothing but the initial clear is emitted when the window is empty, no
/// metric is requested, or the viewport leaves no plot area.
pub fn render(samples: &[Sample], request: ChartRequest<'_>, viewport: Viewport) -> Scene {
    let mut scene = Scene::new(viewport);

    let Some(plot) = PlotArea::for_canvas(viewport.logical) else {
        return scene;
    };

    let window = extract(samples, request.metrics());
    if window.is_empty() {
        return scene;
    }

    for (metric_index, metric) in window.metrics().iter().enumerate() {
        let Some(scale) = Scale::fit(window.values(metric_index), plot.height) else {
            continue;
        };

        if metric_index == 0 {
            draw_grid(&mut scene, &plot);
        }

        draw_series(&mut scene, &plot, &window, metric_index, metric, &scale);

        if let ChartRequest::Single(_) = request {
            draw_axis(&mut scene, &plot, metric, &scale);
        }
    }

    if request.is_overlay() && window.metrics().len() > 1 {
        draw_legend(&mut scene, &plot, window.metrics());
    }

    tracing::trace!(
        points = window.len(),
        metrics = window.metrics().len(),
        commands = scene.commands.len(),
        "Rendered chart"
    );

    scene
}

/// Six horizontal and eleven vertical gridlines across the plot area.
fn draw_grid(scene: &mut Scene, plot: &PlotArea) {
    for i in 0..=TICK_INTERVALS {
        let y = plot.top + (plot.height / TICK_INTERVALS as f32) * i as f32;
        scene.push(DrawCommand::Line {
            from: Point::new(plot.left, y),
            to: Point::new(plot.right(), y),
            paint: Paint::Grid,
            width: GRID_WIDTH,
        });
    }

    for i in 0..=VERTICAL_GRID_INTERVALS {
        let x = plot.left + (plot.width / VERTICAL_GRID_INTERVALS as f32) * i as f32;
        scene.push(DrawCommand::Line {
            from: Point::new(x, plot.top),
            to: Point::new(x, plot.bottom()),
            paint: Paint::Grid,
            width: GRID_WIDTH,
        });
    }
}

fn draw_series(
    scene: &mut Scene,
    plot: &PlotArea,
    window: &Window<'_>,
    metric_index: usize,
    metric: &MetricDescriptor,
    scale: &Scale,
) {
    let count = window.len();
    let points: Vec<Point> = window
        .values(metric_index)
        .enumerate()
        .map(|(i, value)| Point::new(plot.x_for_index(i, count), scale.y(value, plot)))
        .collect();

    let paint = Paint::Series(metric.color.clone());

    scene.push(DrawCommand::Polyline {
        points: points.clone(),
        paint: paint.clone(),
        width: SERIES_WIDTH,
    });

    for center in points {
        scene.push(DrawCommand::Circle {
            center,
            radius: MARKER_RADIUS,
            paint: paint.clone(),
        });
    }
}

/// Tick labels, title and unit for single-metric charts.
fn draw_axis(scene: &mut Scene, plot: &PlotArea, metric: &MetricDescriptor, scale: &Scale) {
    for i in 0..=TICK_INTERVALS {
        let y = plot.top + (plot.height / TICK_INTERVALS as f32) * i as f32;
        scene.push(DrawCommand::Text {
            content: to_fixed(scale.tick_value(i), 1),
            position: Point::new(TICK_LABEL_X, y + TICK_LABEL_OFFSET),
            size: LABEL_SIZE,
            weight: FontWeight::Normal,
            paint: Paint::Label,
        });
    }

    scene.push(DrawCommand::Text {
        content: metric.label.clone(),
        position: Point::new(plot.left, TITLE_BASELINE),
        size: TITLE_SIZE,
        weight: FontWeight::Bold,
        paint: Paint::Series(metric.color.clone()),
    });

    let title_width = measure_text(&metric.label, TITLE_SIZE, FontWeight::Bold);
    scene.push(DrawCommand::Text {
        content: metric.unit.clone(),
        position: Point::new(plot.left + title_width + UNIT_GAP, TITLE_BASELINE),
        size: LABEL_SIZE,
        weight: FontWeight::Normal,
        paint: Paint::Muted,
    });
}

fn draw_legend(scene: &mut Scene, plot: &PlotArea, metrics: &[MetricDescriptor]) {
    for (i, metric) in metrics.iter().enumerate() {
        let x = plot.left + i as f32 * LEGEND_ENTRY_WIDTH;
        let paint = Paint::Series(metric.color.clone());

        scene.push(DrawCommand::Rect {
            top_left: Point::new(x, TITLE_BASELINE - LEGEND_SWATCH),
            size: Size::new(LEGEND_SWATCH, LEGEND_SWATCH),
            paint: paint.clone(),
        });
        scene.push(DrawCommand::Text {
            content: metric.label.clone(),
            position: Point::new(x + LEGEND_LABEL_OFFSET, TITLE_BASELINE),
            size: LABEL_SIZE,
            weight: FontWeight::Normal,
            paint,
        });
    }
}
