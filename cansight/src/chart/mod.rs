//! Chart rendering and interaction engine.
//!
//! A render pass is a pure function of the sample history, the requested
//! metrics and the viewport:
//!
//! ```text
//! samples ─► window::extract ─► scale ─► render::{grid, axis, series} ─► Scene
//! ```
//!
//! The resulting [`Scene`] is a display list in logical pixels that a backend
//! (the iced canvas in [`crate::view::chart`]) replays onto its surface.
//! Pointer and touch input goes through [`pointer::PointerResolver`], which
//! reuses the same windowing to build tooltip content.

pub mod format;
pub mod layout;
pub mod pointer;
pub mod render;
pub mod scale;
pub mod scene;
pub mod viewport;
pub mod window;

pub use format::to_fixed;
pub use layout::{CHART_PADDING, DEFAULT_HEIGHT, DEFAULT_WIDTH, Padding, PlotArea};
pub use pointer::{HideToken, InputMode, PointerResolver, TOUCH_HIDE_DELAY, TooltipState};
pub use render::{ChartRequest, render};
pub use scale::Scale;
pub use scene::{DrawCommand, FontWeight, Paint, Scene};
pub use viewport::Viewport;
pub use window::{DataPoint, Reading, WINDOW_CAP, Window, extract};
