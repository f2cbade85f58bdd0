//! Display list produced by a render pass.

use iced::{Point, Size};

use super::viewport::Viewport;

/// What to paint with. Metric colors stay opaque tokens until a backend
/// resolves them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Paint {
    /// Low-opacity gridlines.
    Grid,
    /// Axis tick labels.
    Label,
    /// Secondary text (units).
    Muted,
    /// A metric's descriptor color.
    Series(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

/// A single drawing primitive in logical pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Clear the whole surface.
    Clear,
    /// Straight line segment.
    Line {
        from: Point,
        to: Point,
        paint: Paint,
        width: f32,
    },
    /// Connected straight segments through `points`.
    Polyline {
        points: Vec<Point>,
        paint: Paint,
        width: f32,
    },
    /// Filled circle.
    Circle {
        center: Point,
        radius: f32,
        paint: Paint,
    },
    /// Filled axis-aligned rectangle.
    Rect {
        top_left: Point,
        size: Size,
        paint: Paint,
    },
    /// Text whose baseline starts at `position`.
    Text {
        content: String,
        position: Point,
        size: f32,
        weight: FontWeight,
        paint: Paint,
    },
}

/// The output of one render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub viewport: Viewport,
    pub commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            commands: vec![DrawCommand::Clear],
        }
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    /// Whether anything besides the initial clear was drawn.
    pub fn is_blank(&self) -> bool {
        self.commands
            .iter()
            .all(|c| matches!(c, DrawCommand::Clear))
    }

    /// Iterate over all text commands' contents.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { content, .. } => Some(content.as_str()),
            _ => None,
        })
    }
}

/// Approximate advance width of `text` at `size` pixels.
///
/// The engine has no font rasterizer; an average glyph advance of 0.6 em
/// (0.65 em for bold) is close enough to place a unit after a title.
pub fn measure_text(text: &str, size: f32, weight: FontWeight) -> f32 {
    let advance = match weight {
        FontWeight::Normal => 0.6,
        FontWeight::Bold => 0.65,
    };
    text.chars().count() as f32 * size * advance
}
