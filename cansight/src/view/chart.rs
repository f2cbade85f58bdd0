//! Chart canvas: replays engine scenes onto an iced canvas and forwards
//! pointer and touch input.

use iced::mouse;
use iced::touch;
use iced::widget::canvas::{self, Cache, Canvas, Frame, Geometry, Path, Stroke, Text};
use iced::{Element, Font, Length, Point, Rectangle, Renderer, Size, Theme};

use cansight_common::{MetricDescriptor, Sample};

use crate::chart::scene::measure_text;
use crate::chart::{
    ChartRequest, DrawCommand, FontWeight, InputMode, PlotArea, PointerResolver, Scene,
    TooltipState, Viewport, render,
};
use crate::message::{ChartId, Message, PointerEvent};

use super::theme::ChartColors;

const TOOLTIP_TEXT_SIZE: f32 = 12.0;
const TOOLTIP_LINE_HEIGHT: f32 = 16.0;
const TOOLTIP_PADDING: f32 = 8.0;
const TOOLTIP_GAP: f32 = 10.0;

/// Per-chart state kept by the application between render passes.
pub struct ChartPanel {
    /// Tooltip state machine.
    pub resolver: PointerResolver,
    /// Cached geometry of the last render pass.
    cache: Cache,
}

impl std::fmt::Debug for ChartPanel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChartPanel")
            .field("resolver", &self.resolver)
            .finish_non_exhaustive()
    }
}

impl Default for ChartPanel {
    fn default() -> Self {
        Self::new(InputMode::default())
    }
}

impl ChartPanel {
    pub fn new(mode: InputMode) -> Self {
        Self {
            resolver: PointerResolver::new(mode),
            cache: Cache::new(),
        }
    }

    /// Force a full render pass on the next draw.
    pub fn invalidate(&self) {
        self.cache.clear();
    }
}

/// Canvas program drawing one chart.
pub struct ChartCanvas<'a> {
    id: ChartId,
    panel: &'a ChartPanel,
    samples: &'a [Sample],
    metrics: Vec<MetricDescriptor>,
    overlay: bool,
    scale_factor: f32,
}

impl<'a> ChartCanvas<'a> {
    /// A single-metric chart (title, unit and tick labels).
    pub fn single(
        id: ChartId,
        panel: &'a ChartPanel,
        samples: &'a [Sample],
        metric: Option<MetricDescriptor>,
    ) -> Self {
        Self {
            id,
            panel,
            samples,
            metrics: metric.into_iter().collect(),
            overlay: false,
            scale_factor: 1.0,
        }
    }

    /// Several metrics on one plot with a legend.
    pub fn overlay(
        id: ChartId,
        panel: &'a ChartPanel,
        samples: &'a [Sample],
        metrics: Vec<MetricDescriptor>,
    ) -> Self {
        Self {
            id,
            panel,
            samples,
            metrics,
            overlay: true,
            scale_factor: 1.0,
        }
    }

    /// Set the device pixel ratio used to adapt the viewport.
    pub fn with_scale_factor(mut self, scale_factor: f32) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    fn request(&self) -> ChartRequest<'_> {
        match self.metrics.first() {
            Some(metric) if !self.overlay => ChartRequest::Single(metric),
            _ => ChartRequest::Overlay(&self.metrics),
        }
    }

    /// Wrap this chart in a canvas element of the given logical height.
    pub fn view(self, height: f32) -> Element<'a, Message> {
        Canvas::new(self)
            .width(Length::Fill)
            .height(Length::Fixed(height))
            .into()
    }
}

/// Hover bookkeeping so a leave is reported once.
#[derive(Debug, Clone, Default)]
pub struct ChartInteraction {
    hovering: bool,
}

impl<'a> canvas::Program<Message> for ChartCanvas<'a> {
    type State = ChartInteraction;

    fn update(
        &self,
        interaction: &mut Self::State,
        event: &canvas::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<canvas::Action<Message>> {
        let pointer_event = match event {
            canvas::Event::Mouse(mouse::Event::CursorMoved { .. }) => {
                match cursor.position_in(bounds) {
                    Some(position) => {
                        interaction.hovering = true;
                        PointerEvent::Moved {
                            position,
                            canvas: bounds.size(),
                        }
                    }
                    None if interaction.hovering => {
                        interaction.hovering = false;
                        PointerEvent::Left
                    }
                    None => return None,
                }
            }
            canvas::Event::Mouse(mouse::Event::CursorLeft) if interaction.hovering => {
                interaction.hovering = false;
                PointerEvent::Left
            }
            canvas::Event::Touch(touch::Event::FingerPressed { position, .. })
                if bounds.contains(*position) =>
            {
                PointerEvent::Tapped {
                    position: Point::new(position.x - bounds.x, position.y - bounds.y),
                    canvas: bounds.size(),
                }
            }
            _ => return None,
        };

        Some(canvas::Action::publish(Message::ChartPointer(
            self.id.clone(),
            pointer_event,
        )))
    }

    fn draw(
        &self,
        _interaction: &Self::State,
        renderer: &Renderer,
        theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let colors = ChartColors::new(theme);

        // The cache is keyed by size, so a resize always re-renders.
        let chart = self.panel.cache.draw(renderer, bounds.size(), |frame| {
            let viewport = Viewport::new(frame.size(), self.scale_factor);
            let scene = render(self.samples, self.request(), viewport);
            paint_scene(frame, &scene, &colors);
        });

        let mut geometries = vec![chart];

        let tooltip = self.panel.resolver.tooltip();
        if tooltip.visible {
            let mut frame = Frame::new(renderer, bounds.size());
            draw_tooltip(&mut frame, tooltip, &colors);
            geometries.push(frame.into_geometry());
        }

        geometries
    }

    fn mouse_interaction(
        &self,
        _interaction: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        let over_plot = cursor
            .position_in(bounds)
            .zip(PlotArea::for_canvas(bounds.size()))
            .is_some_and(|(position, plot)| plot.contains_x(position.x));

        if over_plot {
            mouse::Interaction::Crosshair
        } else {
            mouse::Interaction::default()
        }
    }
}

/// Replay a scene onto a frame. Coordinates are logical; iced applies the
/// window scale factor itself.
fn paint_scene(frame: &mut Frame, scene: &Scene, colors: &ChartColors<'_>) {
    for command in &scene.commands {
        match command {
            DrawCommand::Clear => {
                frame.fill_rectangle(Point::ORIGIN, frame.size(), colors.background());
            }
            DrawCommand::Line {
                from,
                to,
                paint,
                width,
            } => {
                frame.stroke(
                    &Path::line(*from, *to),
                    Stroke::default()
                        .with_color(colors.resolve(paint))
                        .with_width(*width),
                );
            }
            DrawCommand::Polyline {
                points,
                paint,
                width,
            } => {
                let Some((first, rest)) = points.split_first() else {
                    continue;
                };
                let mut builder = canvas::path::Builder::new();
                builder.move_to(*first);
                for point in rest {
                    builder.line_to(*point);
                }
                frame.stroke(
                    &builder.build(),
                    Stroke::default()
                        .with_color(colors.resolve(paint))
                        .with_width(*width),
                );
            }
            DrawCommand::Circle {
                center,
                radius,
                paint,
            } => {
                frame.fill(&Path::circle(*center, *radius), colors.resolve(paint));
            }
            DrawCommand::Rect {
                top_left,
                size,
                paint,
            } => {
                frame.fill_rectangle(*top_left, *size, colors.resolve(paint));
            }
            DrawCommand::Text {
                content,
                position,
                size,
                weight,
                paint,
            } => {
                // Scene text is baseline-anchored; iced text is top-anchored.
                frame.fill_text(Text {
                    content: content.clone(),
                    position: Point::new(position.x, position.y - size),
                    color: colors.resolve(paint),
                    size: (*size).into(),
                    font: font_for(*weight),
                    ..Text::default()
                });
            }
        }
    }
}

fn font_for(weight: FontWeight) -> Font {
    match weight {
        FontWeight::Normal => Font::DEFAULT,
        FontWeight::Bold => Font {
            weight: iced::font::Weight::Bold,
            ..Font::DEFAULT
        },
    }
}

/// Draw the tooltip box centred above its anchor, kept inside the canvas.
fn draw_tooltip(frame: &mut Frame, tooltip: &TooltipState, colors: &ChartColors<'_>) {
    let text_width = tooltip
        .lines
        .iter()
        .map(|line| measure_text(line, TOOLTIP_TEXT_SIZE, FontWeight::Normal))
        .fold(0.0, f32::max);

    let box_size = Size::new(
        text_width + TOOLTIP_PADDING * 2.0,
        tooltip.lines.len() as f32 * TOOLTIP_LINE_HEIGHT + TOOLTIP_PADDING * 2.0,
    );
    let top_left = tooltip_origin(tooltip.position, box_size, frame.size());

    frame.fill_rectangle(top_left, box_size, colors.tooltip_background());
    frame.stroke(
        &Path::rectangle(top_left, box_size),
        Stroke::default()
            .with_color(colors.tooltip_border())
            .with_width(1.0),
    );

    for (i, line) in tooltip.lines.iter().enumerate() {
        frame.fill_text(Text {
            content: line.clone(),
            position: Point::new(
                top_left.x + TOOLTIP_PADDING,
                top_left.y + TOOLTIP_PADDING + i as f32 * TOOLTIP_LINE_HEIGHT,
            ),
            color: colors.tooltip_text(),
            size: TOOLTIP_TEXT_SIZE.into(),
            ..Text::default()
        });
    }
}

/// Top-left corner of a tooltip box anchored above `anchor`.
fn tooltip_origin(anchor: Point, box_size: Size, canvas: Size) -> Point {
    let x = anchor.x - box_size.width / 2.0;
    let y = anchor.y - box_size.height - TOOLTIP_GAP;

    Point::new(
        x.min(canvas.width - box_size.width).max(0.0),
        y.min(canvas.height - box_size.height).max(0.0),
    )
}
