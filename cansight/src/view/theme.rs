//! Colors for chart drawing.
//!
//! The chart engine hands out [`Paint`] tokens; this module is the only place
//! that turns them (and metric color strings) into iced colors.

use iced::{Color, Theme};

use crate::chart::Paint;

/// Used when a metric color token cannot be parsed.
pub const FALLBACK_SERIES: Color = Color {
    r: 0.2,
    g: 0.7,
    b: 1.0,
    a: 1.0,
};

/// Resolves chart paints against the current theme.
pub struct ChartColors<'a> {
    theme: &'a Theme,
}

impl<'a> ChartColors<'a> {
    /// Create a new ChartColors from a theme reference.
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }

    /// Get the extended palette from the theme.
    fn palette(&self) -> &iced::theme::palette::Extended {
        self.theme.extended_palette()
    }

    /// Canvas background behind the plot.
    pub fn background(&self) -> Color {
        self.palette().background.weak.color
    }

    /// Gridlines: the text color at 10% opacity.
    pub fn grid(&self) -> Color {
        Color {
            a: 0.1,
            ..self.palette().background.base.text
        }
    }

    /// Axis labels.
    pub fn label(&self) -> Color {
        self.palette().background.base.text
    }

    /// Units and other secondary text.
    pub fn muted(&self) -> Color {
        Color {
            a: 0.7,
            ..self.palette().background.strong.text
        }
    }

    /// Tooltip box fill.
    pub fn tooltip_background(&self) -> Color {
        Color::from_rgba(0.0, 0.0, 0.0, 0.9)
    }

    /// Tooltip box outline.
    pub fn tooltip_border(&self) -> Color {
        Color::from_rgba8(34, 197, 94, 0.3)
    }

    /// Tooltip text.
    pub fn tooltip_text(&self) -> Color {
        Color::WHITE
    }

    /// Resolve a paint token.
    pub fn resolve(&self, paint: &Paint) -> Color {
        match paint {
            Paint::Grid => self.grid(),
            Paint::Label => self.label(),
            Paint::Muted => self.muted(),
            Paint::Series(token) => parse_color(token).unwrap_or(FALLBACK_SERIES),
        }
    }
}

/// Parse a `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa` color token.
pub fn parse_color(token: &str) -> Option<Color> {
    let token = token.trim();
    let hex = token.strip_prefix('#')?;
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    token.parse::<Color>().ok()
}
