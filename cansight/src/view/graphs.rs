//! Graph layouts: individual charts, one overlay chart, or a 2×2 quad.

use std::collections::HashMap;

use iced::widget::{Column, Row, button, column, container, pick_list, row, text};
use iced::{Alignment, Element, Length};

use cansight_common::{MetricDescriptor, Sample, find_metric};

use crate::chart::{HideToken, InputMode};
use crate::message::{ChartId, Message, MetricChoice, PointerEvent};

use super::chart::{ChartCanvas, ChartPanel};

/// Individual chart height.
pub const INDIVIDUAL_HEIGHT: f32 = 200.0;
/// Individual chart height in full view.
pub const FULL_VIEW_HEIGHT: f32 = 300.0;
/// Overlay chart height.
pub const OVERLAY_HEIGHT: f32 = 400.0;
/// Quad chart height.
pub const QUAD_HEIGHT: f32 = 250.0;

/// Metrics shown in the quad slots unless the user picks others.
pub const DEFAULT_QUAD_METRICS: [&str; 4] = ["DcBusVolt", "Mtrspd", "AcCurrMeaRms", "MtrTemp"];

/// Active graph layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GraphMode {
    #[default]
    Individual,
    Overlay,
    Quad,
}

impl GraphMode {
    pub const ALL: [GraphMode; 3] = [GraphMode::Individual, GraphMode::Overlay, GraphMode::Quad];

    pub fn label(&self) -> &'static str {
        match self {
            GraphMode::Individual => "Individual",
            GraphMode::Overlay => "Overlay",
            GraphMode::Quad => "Quad",
        }
    }
}

/// Layout selection plus the per-chart panels.
#[derive(Debug)]
pub struct GraphsState {
    pub mode: GraphMode,
    pub full_view: bool,
    /// Overlay metric keys; rendered in catalog order regardless of toggle order.
    pub overlay_selection: Vec<String>,
    pub quad_selection: [String; 4],
    input_mode: InputMode,
    panels: HashMap<ChartId, ChartPanel>,
}

impl GraphsState {
    pub fn new(catalog: &[MetricDescriptor], input_mode: InputMode) -> Self {
        let panels = catalog
            .iter()
            .map(|metric| ChartId::Individual(metric.key.clone()))
            .chain(std::iter::once(ChartId::Overlay))
            .chain((0..4).map(ChartId::Quad))
            .map(|id| (id, ChartPanel::new(input_mode)))
            .collect();

        Self {
            mode: GraphMode::default(),
            full_view: false,
            overlay_selection: Vec::new(),
            quad_selection: default_quad(catalog),
            input_mode,
            panels,
        }
    }

    pub fn input_mode(&self) -> InputMode {
        self.input_mode
    }

    pub fn panel(&self, id: &ChartId) -> Option<&ChartPanel> {
        self.panels.get(id)
    }

    /// Metrics drawn by a chart.
    pub fn metrics_for(&self, id: &ChartId, catalog: &[MetricDescriptor]) -> Vec<MetricDescriptor> {
        match id {
            ChartId::Individual(key) => find_metric(catalog, key).cloned().into_iter().collect(),
            ChartId::Overlay => catalog
                .iter()
                .filter(|metric| self.overlay_selection.contains(&metric.key))
                .cloned()
                .collect(),
            ChartId::Quad(slot) => self
                .quad_selection
                .get(*slot)
                .and_then(|key| find_metric(catalog, key))
                .cloned()
                .into_iter()
                .collect(),
        }
    }

    /// Drop all cached chart geometry so the next draw re-renders.
    pub fn invalidate(&self) {
        for panel in self.panels.values() {
            panel.invalidate();
        }
    }

    /// Apply a new input mode to every chart.
    pub fn set_input_mode(&mut self, mode: InputMode) {
        if self.input_mode == mode {
            return;
        }
        tracing::debug!(?mode, "Input mode changed");
        self.input_mode = mode;
        for panel in self.panels.values_mut() {
            panel.resolver.set_mode(mode);
        }
    }

    pub fn set_mode(&mut self, mode: GraphMode) {
        tracing::debug!(mode = mode.label(), "Graph mode changed");
        self.mode = mode;
        self.invalidate();
    }

    pub fn toggle_full_view(&mut self) {
        self.full_view = !self.full_view;
        self.invalidate();
    }

    pub fn toggle_overlay_metric(&mut self, key: String) {
        if let Some(pos) = self.overlay_selection.iter().position(|k| *k == key) {
            self.overlay_selection.remove(pos);
        } else {
            self.overlay_selection.push(key);
        }
        self.dismiss(&ChartId::Overlay);
    }

    pub fn set_quad_metric(&mut self, slot: usize, key: String) {
        if let Some(selected) = self.quad_selection.get_mut(slot) {
            *selected = key;
            self.dismiss(&ChartId::Quad(slot));
        }
    }

    /// Route canvas input to the chart's resolver. Returns the auto-hide
    /// token to schedule when a tap showed a tooltip.
    pub fn handle_pointer(
        &mut self,
        id: &ChartId,
        event: PointerEvent,
        catalog: &[MetricDescriptor],
        samples: &[Sample],
    ) -> Option<HideToken> {
        let metrics = self.metrics_for(id, catalog);
        let panel = self.panels.get_mut(id)?;

        match event {
            PointerEvent::Moved { position, canvas } => {
                panel
                    .resolver
                    .pointer_moved(position, canvas, samples, &metrics);
                None
            }
            PointerEvent::Left => {
                panel.resolver.pointer_left();
                None
            }
            PointerEvent::Tapped { position, canvas } => {
                panel.resolver.tapped(position, canvas, samples, &metrics)
            }
        }
    }

    /// Returns whether the tooltip was hidden.
    pub fn hide_expired(&mut self, id: &ChartId, token: HideToken) -> bool {
        self.panels
            .get_mut(id)
            .is_some_and(|panel| panel.resolver.hide_expired(token))
    }

    fn dismiss(&mut self, id: &ChartId) {
        if let Some(panel) = self.panels.get_mut(id) {
            panel.resolver.dismiss();
            panel.invalidate();
        }
    }
}

/// Default quad keys, falling back to the leading catalog entries when a
/// default metric is missing from the catalog.
pub fn default_quad(catalog: &[MetricDescriptor]) -> [String; 4] {
    std::array::from_fn(|slot| {
        let preferred = DEFAULT_QUAD_METRICS[slot];
        if find_metric(catalog, preferred).is_some() {
            preferred.to_string()
        } else {
            catalog
                .get(slot)
                .map(|metric| metric.key.clone())
                .unwrap_or_default()
        }
    })
}

/// Render the active graph layout.
pub fn graphs_view<'a>(
    state: &'a GraphsState,
    catalog: &'a [MetricDescriptor],
    samples: &'a [Sample],
    scale_factor: f32,
) -> Element<'a, Message> {
    let body = match state.mode {
        GraphMode::Individual => individual_view(state, catalog, samples, scale_factor),
        GraphMode::Overlay => overlay_view(state, catalog, samples, scale_factor),
        GraphMode::Quad => quad_view(state, catalog, samples, scale_factor),
    };

    column![mode_bar(state), body].spacing(15).into()
}

fn mode_bar(state: &GraphsState) -> Element<'_, Message> {
    let mut bar = Row::new().spacing(8).align_y(Alignment::Center);

    for mode in GraphMode::ALL {
        bar = bar.push(
            button(text(mode.label()).size(14))
                .on_press(Message::SetGraphMode(mode))
                .style(if state.mode == mode {
                    button::primary
                } else {
                    button::secondary
                }),
        );
    }

    if state.mode == GraphMode::Individual {
        let label = if state.full_view {
            "Compact View"
        } else {
            "Full View"
        };
        bar = bar.push(
            button(text(label).size(14))
                .on_press(Message::ToggleFullView)
                .style(button::secondary),
        );
    }

    bar.into()
}

fn individual_view<'a>(
    state: &'a GraphsState,
    catalog: &'a [MetricDescriptor],
    samples: &'a [Sample],
    scale_factor: f32,
) -> Element<'a, Message> {
    let height = if state.full_view {
        FULL_VIEW_HEIGHT
    } else {
        INDIVIDUAL_HEIGHT
    };
    let per_row = match state.input_mode {
        InputMode::Touch => 1,
        InputMode::Pointer => 2,
    };

    let mut rows = Column::new().spacing(15);
    for chunk in catalog.chunks(per_row) {
        let mut current_row = Row::new().spacing(15);
        for metric in chunk {
            let id = ChartId::Individual(metric.key.clone());
            if let Some(panel) = state.panel(&id) {
                let chart = ChartCanvas::single(id, panel, samples, Some(metric.clone()))
                    .with_scale_factor(scale_factor)
                    .view(height);
                current_row = current_row.push(container(chart).width(Length::FillPortion(1)));
            }
        }
        rows = rows.push(current_row);
    }

    rows.into()
}

fn overlay_view<'a>(
    state: &'a GraphsState,
    catalog: &'a [MetricDescriptor],
    samples: &'a [Sample],
    scale_factor: f32,
) -> Element<'a, Message> {
    let toggles = catalog
        .iter()
        .fold(Row::new().spacing(6), |toggles, metric| {
            let selected = state.overlay_selection.contains(&metric.key);
            toggles.push(
                button(text(metric.label.as_str()).size(12))
                    .on_press(Message::ToggleOverlayMetric(metric.key.clone()))
                    .style(if selected {
                        button::primary
                    } else {
                        button::secondary
                    }),
            )
        })
        .wrap();

    let metrics = state.metrics_for(&ChartId::Overlay, catalog);
    let chart: Element<'a, Message> = match state.panel(&ChartId::Overlay) {
        Some(panel) if !metrics.is_empty() => {
            ChartCanvas::overlay(ChartId::Overlay, panel, samples, metrics)
                .with_scale_factor(scale_factor)
                .view(OVERLAY_HEIGHT)
        }
        _ => container(text("Select metrics to overlay").size(14))
            .center_x(Length::Fill)
            .center_y(Length::Fixed(OVERLAY_HEIGHT))
            .into(),
    };

    column![toggles, chart].spacing(15).into()
}

fn quad_view<'a>(
    state: &'a GraphsState,
    catalog: &'a [MetricDescriptor],
    samples: &'a [Sample],
    scale_factor: f32,
) -> Element<'a, Message> {
    let choices: Vec<MetricChoice> = catalog.iter().map(MetricChoice::from).collect();

    let slot_view = |slot: usize| -> Element<'a, Message> {
        let id = ChartId::Quad(slot);
        let metric = state
            .quad_selection
            .get(slot)
            .and_then(|key| find_metric(catalog, key));

        let picker = pick_list(
            choices.clone(),
            metric.map(MetricChoice::from),
            move |choice: MetricChoice| Message::SetQuadMetric(slot, choice),
        )
        .text_size(13)
        .width(Length::Fixed(200.0));

        let mut slot_column = Column::new().spacing(8).push(picker);
        if let Some(panel) = state.panel(&id) {
            slot_column = slot_column.push(
                ChartCanvas::single(id, panel, samples, metric.cloned())
                    .with_scale_factor(scale_factor)
                    .view(QUAD_HEIGHT),
            );
        }

        container(slot_column).width(Length::FillPortion(1)).into()
    };

    column![
        row![slot_view(0), slot_view(1)].spacing(15),
        row![slot_view(2), slot_view(3)].spacing(15),
    ]
    .spacing(15)
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cansight_common::default_catalog;
    use iced::{Point, Size};

    fn samples() -> Vec<Sample> {
        (0..5)
            .map(|i| {
                Sample::new(format!("t{}", i))
                    .with_field("measurement617", "DcBusVolt", 300.0 + i as f64 * 10.0)
                    .with_field("temp616", "MtrTemp", 40.0)
            })
            .collect()
    }

    #[test]
    fn test_new_state_defaults() {
        let catalog = default_catalog();
        let state = GraphsState::new(&catalog, InputMode::Pointer);

        assert_eq!(state.mode, GraphMode::Individual);
        assert!(!state.full_view);
        assert!(state.overlay_selection.is_empty());
        assert_eq!(
            state.quad_selection,
            ["DcBusVolt", "Mtrspd", "AcCurrMeaRms", "MtrTemp"].map(String::from)
        );
        for metric in &catalog {
            assert!(state.panel(&ChartId::Individual(metric.key.clone())).is_some());
        }
        assert!(state.panel(&ChartId::Overlay).is_some());
        assert!(state.panel(&ChartId::Quad(3)).is_some());
        assert!(state.panel(&ChartId::Quad(4)).is_none());
    }

    #[test]
    fn test_default_quad_falls_back_to_catalog_order() {
        let catalog = vec![
            MetricDescriptor::new("A", "A", "g", "#fff", ""),
            MetricDescriptor::new("Mtrspd", "Speed", "g", "#fff", "RPM"),
        ];
        assert_eq!(default_quad(&catalog), ["A", "Mtrspd", "", ""].map(String::from));
    }

    #[test]
    fn test_overlay_metrics_follow_catalog_order() {
        let catalog = default_catalog();
        let mut state = GraphsState::new(&catalog, InputMode::Pointer);

        state.toggle_overlay_metric("MtrTemp".to_string());
        state.toggle_overlay_metric("CtlrTemp1".to_string());
        state.toggle_overlay_metric("DcBusVolt".to_string());
        state.toggle_overlay_metric("MtrTemp".to_string());

        let keys: Vec<_> = state
            .metrics_for(&ChartId::Overlay, &catalog)
            .into_iter()
            .map(|m| m.key)
            .collect();
        assert_eq!(keys, vec!["CtlrTemp1", "DcBusVolt"]);
    }

    #[test]
    fn test_quad_metric_selection() {
        let catalog = default_catalog();
        let mut state = GraphsState::new(&catalog, InputMode::Pointer);

        state.set_quad_metric(2, "Brake".to_string());
        assert_eq!(state.metrics_for(&ChartId::Quad(2), &catalog)[0].key, "Brake");

        state.set_quad_metric(9, "Brake".to_string());
        assert!(state.metrics_for(&ChartId::Quad(9), &catalog).is_empty());
    }

    #[test]
    fn test_pointer_routing_and_tap_expiry() {
        let catalog = default_catalog();
        let samples = samples();
        let id = ChartId::Individual("DcBusVolt".to_string());
        let canvas = Size::new(800.0, 200.0);

        let mut state = GraphsState::new(&catalog, InputMode::Pointer);
        let moved = PointerEvent::Moved {
            position: Point::new(60.0, 100.0),
            canvas,
        };
        assert!(state.handle_pointer(&id, moved, &catalog, &samples).is_none());
        assert_eq!(
            state.panel(&id).unwrap().resolver.tooltip().lines,
            vec!["DC Bus Voltage: 300.00 V"]
        );

        state.set_input_mode(InputMode::Touch);
        assert!(!state.panel(&id).unwrap().resolver.tooltip().visible);

        let tap = PointerEvent::Tapped {
            position: Point::new(780.0, 150.0),
            canvas,
        };
        let token = state.handle_pointer(&id, tap, &catalog, &samples).unwrap();
        assert!(state.panel(&id).unwrap().resolver.tooltip().visible);
        assert!(state.hide_expired(&id, token));
        assert!(!state.panel(&id).unwrap().resolver.tooltip().visible);
    }

    #[test]
    fn test_overlay_change_dismisses_overlay_tooltip() {
        let catalog = default_catalog();
        let samples = samples();
        let mut state = GraphsState::new(&catalog, InputMode::Pointer);
        state.toggle_overlay_metric("DcBusVolt".to_string());

        let moved = PointerEvent::Moved {
            position: Point::new(300.0, 100.0),
            canvas: Size::new(800.0, 400.0),
        };
        state.handle_pointer(&ChartId::Overlay, moved, &catalog, &samples);
        assert!(state.panel(&ChartId::Overlay).unwrap().resolver.tooltip().visible);

        state.toggle_overlay_metric("MtrTemp".to_string());
        assert!(!state.panel(&ChartId::Overlay).unwrap().resolver.tooltip().visible);
    }
}
