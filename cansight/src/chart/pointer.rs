//! Pointer and touch resolution for chart tooltips.
//!
//! The resolver is a two-state machine (tooltip hidden / shown). Desktop
//! pointers show the tooltip while hovering the plot area; touch taps show it
//! until an auto-hide timer fires. The host schedules that timer and reports
//! back with the [`HideToken`] it was given, so a newer tap always supersedes
//! the timers of earlier taps.

use std::time::Duration;

use iced::{Point, Size};

use cansight_common::{MetricDescriptor, Sample};

use super::layout::PlotArea;
use super::window::extract;

/// Logical window widths at or below this use touch input.
pub const TOUCH_BREAKPOINT: f32 = 768.0;

/// How long a tapped tooltip stays visible.
pub const TOUCH_HIDE_DELAY: Duration = Duration::from_millis(3000);

/// Tap tooltips are lifted by this much so the finger does not cover them.
pub const TOUCH_TOOLTIP_LIFT: f32 = 100.0;

/// Active input style, chosen from the window width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Mouse hover with leave-to-hide.
    #[default]
    Pointer,
    /// Single taps with timed auto-hide.
    Touch,
}

impl InputMode {
    pub fn from_window_width(width: f32) -> Self {
        if width <= TOUCH_BREAKPOINT {
            InputMode::Touch
        } else {
            InputMode::Pointer
        }
    }
}

/// Tooltip contents and placement, in canvas coordinates.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TooltipState {
    pub visible: bool,
    pub position: Point,
    pub lines: Vec<String>,
}

impl TooltipState {
    fn show(&mut self, position: Point, lines: Vec<String>) {
        self.visible = true;
        self.position = position;
        self.lines = lines;
    }

    fn hide(&mut self) {
        *self = Self::default();
    }
}

/// Identifies one scheduled auto-hide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HideToken(u64);

/// Owns the tooltip of one chart.
#[derive(Debug, Clone, Default)]
pub struct PointerResolver {
    mode: InputMode,
    tooltip: TooltipState,
    generation: u64,
    pending_hide: Option<HideToken>,
}

impl PointerResolver {
    pub fn new(mode: InputMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn tooltip(&self) -> &TooltipState {
        &self.tooltip
    }

    /// Switch input mode. Any visible tooltip and pending auto-hide is dropped.
    pub fn set_mode(&mut self, mode: InputMode) {
        if self.mode != mode {
            self.mode = mode;
            self.dismiss();
        }
    }

    /// Hide the tooltip and forget any pending auto-hide.
    pub fn dismiss(&mut self) {
        self.tooltip.hide();
        self.pending_hide = None;
    }

    /// Handle a pointer move at `position` over a canvas of `canvas` size.
    ///
    /// Outside the plot range the tooltip is hidden; an index past the end of
    /// the window leaves it untouched. Ignored in touch mode.
    pub fn pointer_moved(
        &mut self,
        position: Point,
        canvas: Size,
        samples: &[Sample],
        metrics: &[MetricDescriptor],
    ) {
        if self.mode != InputMode::Pointer {
            return;
        }

        match resolve(position.x, canvas, samples, metrics) {
            Resolution::Outside => self.tooltip.hide(),
            Resolution::OutOfBounds => {}
            Resolution::Hit(lines) => self.tooltip.show(position, lines),
        }
    }

    /// Handle the pointer leaving the canvas. Ignored in touch mode.
    pub fn pointer_left(&mut self) {
        if self.mode == InputMode::Pointer {
            self.tooltip.hide();
        }
    }

    /// Handle a tap. Returns the token of the auto-hide the host must
    /// schedule after [`TOUCH_HIDE_DELAY`], or `None` if nothing was shown.
    pub fn tapped(
        &mut self,
        position: Point,
        canvas: Size,
        samples: &[Sample],
        metrics: &[MetricDescriptor],
    ) -> Option<HideToken> {
        if self.mode != InputMode::Touch {
            return None;
        }

        let Resolution::Hit(lines) = resolve(position.x, canvas, samples, metrics) else {
            return None;
        };

        self.tooltip.show(
            Point::new(position.x, position.y - TOUCH_TOOLTIP_LIFT),
            lines,
        );

        self.generation += 1;
        let token = HideToken(self.generation);
        self.pending_hide = Some(token);
        Some(token)
    }

    /// An auto-hide timer fired. Only the latest scheduled one hides the
    /// tooltip; returns whether it did.
    pub fn hide_expired(&mut self, token: HideToken) -> bool {
        if self.pending_hide != Some(token) {
            return false;
        }
        self.pending_hide = None;
        self.tooltip.hide();
        true
    }
}

enum Resolution {
    /// x lies outside the plot range, or there is nothing to show.
    Outside,
    /// The rounded index is past the last sample.
    OutOfBounds,
    Hit(Vec<String>),
}

/// Nearest window index for a canvas-local `x`, or `None` outside the plot.
pub fn nearest_index(x: f32, plot: &PlotArea, window_len: usize) -> Option<usize> {
    if window_len == 0 || !plot.contains_x(x) {
        return None;
    }
    Some(((x - plot.left) / plot.x_step(window_len)).round() as usize)
}

fn resolve(
    x: f32,
    canvas: Size,
    samples: &[Sample],
    metrics: &[MetricDescriptor],
) -> Resolution {
    let Some(plot) = PlotArea::for_canvas(canvas) else {
        return Resolution::Outside;
    };

    let window = extract(samples, metrics);
    let Some(index) = nearest_index(x, &plot, window.len()) else {
        return Resolution::Outside;
    };

    let Some(point) = window.point(index) else {
        return Resolution::OutOfBounds;
    };

    let lines = metrics
        .iter()
        .zip(&point.readings)
        .map(|(metric, reading)| format!("{}: {} {}", metric.label, reading.display(), metric.unit))
        .collect();

    Resolution::Hit(lines)
}
