use iced::{Point, Size};

use cansight_common::{MetricDescriptor, Sample};

use crate::chart::HideToken;
use crate::view::graphs::GraphMode;

/// Messages for the CanSight application.
#[derive(Debug, Clone)]
pub enum Message {
    /// A sample arrived from the feed.
    SampleReceived(Sample),

    /// The feed started delivering samples.
    FeedConnected,

    /// The feed stopped or failed to start.
    FeedDisconnected(String),

    /// Switch between individual, overlay and quad layouts.
    SetGraphMode(GraphMode),

    /// Toggle the taller individual charts.
    ToggleFullView,

    /// Add or remove a metric from the overlay chart.
    ToggleOverlayMetric(String),

    /// Pick the metric shown in one quad slot.
    SetQuadMetric(usize, MetricChoice),

    /// Pointer or touch input over a chart canvas.
    ChartPointer(ChartId, PointerEvent),

    /// A touch tooltip's auto-hide timer fired.
    TooltipExpired(ChartId, HideToken),

    /// The main window was resized (logical size).
    WindowResized(Size),
}

/// Identifies one chart canvas on screen.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ChartId {
    /// Individual chart of the metric with this key.
    Individual(String),
    /// The overlay chart.
    Overlay,
    /// One of the four quad slots.
    Quad(usize),
}

/// Input reported by a chart canvas, in canvas-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Moved { position: Point, canvas: Size },
    Left,
    Tapped { position: Point, canvas: Size },
}

/// A pick list entry for the quad selectors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricChoice {
    pub key: String,
    pub label: String,
}

impl From<&MetricDescriptor> for MetricChoice {
    fn from(metric: &MetricDescriptor) -> Self {
        Self {
            key: metric.key.clone(),
            label: metric.label.clone(),
        }
    }
}

impl std::fmt::Display for MetricChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label)
    }
}
