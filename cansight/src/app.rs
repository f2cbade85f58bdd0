//! CanSight Iced application.

use iced::widget::{column, container, rule, scrollable};
use iced::{Element, Length, Size, Subscription, Task, Theme};

use cansight_common::{DashboardConfig, MetricDescriptor, Sample, SampleStore};

use crate::chart::{InputMode, TOUCH_HIDE_DELAY};
use crate::message::Message;
use crate::subscription::{feed_subscription, resize_subscription};
use crate::view::graphs::{GraphsState, graphs_view};
use crate::view::header::{FeedStatus, header_view};

/// The main CanSight application.
pub struct CanSight {
    /// Loaded configuration.
    config: DashboardConfig,
    /// Rolling sample history.
    store: SampleStore,
    /// Layout selection and per-chart state.
    graphs: GraphsState,
    /// Feed connection state.
    feed: FeedStatus,
    /// Last known logical window size.
    window_size: Size,
}

impl CanSight {
    /// Create the application state from a validated configuration.
    pub fn new(config: DashboardConfig) -> Self {
        let window_size = Size::new(config.display.window_width, config.display.window_height);
        let input_mode = InputMode::from_window_width(window_size.width);

        Self {
            store: SampleStore::with_capacity(config.history_capacity),
            graphs: GraphsState::new(&config.catalog, input_mode),
            feed: FeedStatus::default(),
            window_size,
            config,
        }
    }

    /// Boot the application (called by iced::application).
    pub fn boot(config: DashboardConfig) -> (Self, Task<Message>) {
        (Self::new(config), Task::none())
    }

    /// Get the window title.
    pub fn title(&self) -> String {
        if self.store.is_empty() {
            "CanSight".to_string()
        } else {
            format!("CanSight - {} samples", self.store.len())
        }
    }

    /// Handle incoming messages.
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::SampleReceived(sample) => {
                self.store.push(sample);
                self.graphs.invalidate();
            }

            Message::FeedConnected => {
                tracing::info!(mode = ?self.config.feed.mode, "Feed connected");
                self.feed.connected = true;
                self.feed.last_error = None;
            }

            Message::FeedDisconnected(error) => {
                tracing::warn!(error = %error, "Feed disconnected");
                self.feed.connected = false;
                self.feed.last_error = Some(error);
            }

            Message::SetGraphMode(mode) => {
                self.graphs.set_mode(mode);
            }

            Message::ToggleFullView => {
                self.graphs.toggle_full_view();
            }

            Message::ToggleOverlayMetric(key) => {
                self.graphs.toggle_overlay_metric(key);
            }

            Message::SetQuadMetric(slot, choice) => {
                self.graphs.set_quad_metric(slot, choice.key);
            }

            Message::ChartPointer(id, event) => {
                let token = self.graphs.handle_pointer(
                    &id,
                    event,
                    &self.config.catalog,
                    self.store.as_slice(),
                );

                if let Some(token) = token {
                    return Task::perform(tokio::time::sleep(TOUCH_HIDE_DELAY), move |_| {
                        Message::TooltipExpired(id, token)
                    });
                }
            }

            Message::TooltipExpired(id, token) => {
                if !self.graphs.hide_expired(&id, token) {
                    tracing::trace!(?id, "Ignoring superseded tooltip timer");
                }
            }

            Message::WindowResized(size) => {
                self.window_size = size;
                self.graphs
                    .set_input_mode(InputMode::from_window_width(size.width));
            }
        }

        Task::none()
    }

    /// Create subscriptions for the sample feed and window resizes.
    pub fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            feed_subscription(self.config.feed.clone()),
            resize_subscription(),
        ])
    }

    /// Render the view.
    pub fn view(&self) -> Element<'_, Message> {
        let header = header_view(&self.feed, self.store.len(), self.store.latest());
        let graphs = graphs_view(
            &self.graphs,
            &self.config.catalog,
            self.store.as_slice(),
            self.scale_factor(),
        );

        let content = column![header, rule::horizontal(1), scrollable(graphs)]
            .spacing(10)
            .padding(20);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    /// Get the application theme.
    pub fn theme(&self) -> Theme {
        Theme::Dark
    }

    /// Window scale factor from the display configuration.
    ///
    /// Non-finite or non-positive ratios fall back to 1.
    pub fn scale_factor(&self) -> f32 {
        let ratio = self.config.display.scale_factor;
        if ratio.is_finite() && ratio > 0.0 {
            ratio
        } else {
            1.0
        }
    }

    pub fn samples(&self) -> &[Sample] {
        self.store.as_slice()
    }

    pub fn catalog(&self) -> &[MetricDescriptor] {
        &self.config.catalog
    }

    pub fn graphs(&self) -> &GraphsState {
        &self.graphs
    }

    pub fn feed_status(&self) -> &FeedStatus {
        &self.feed
    }

    pub fn window_size(&self) -> Size {
        self.window_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::{ChartId, MetricChoice, PointerEvent};
    use crate::view::graphs::GraphMode;
    use iced::Point;

    fn app() -> CanSight {
        let config = DashboardConfig {
            history_capacity: 3,
            ..DashboardConfig::default()
        };
        CanSight::new(config)
    }

    fn volt_sample(i: usize) -> Sample {
        Sample::new(format!("t{}", i)).with_field("measurement617", "DcBusVolt", 300.0 + i as f64)
    }

    #[test]
    fn test_scale_factor_comes_from_display_config() {
        assert_eq!(app().scale_factor(), 1.0);

        let mut config = DashboardConfig::default();
        config.display.scale_factor = 2.0;
        assert_eq!(CanSight::new(config).scale_factor(), 2.0);

        for ratio in [0.0, -1.5, f32::NAN] {
            let mut config = DashboardConfig::default();
            config.display.scale_factor = ratio;
            assert_eq!(CanSight::new(config).scale_factor(), 1.0);
        }
    }

    #[test]
    fn test_samples_are_capped_by_history_capacity() {
        let mut app = app();
        for i in 0..5 {
            let _ = app.update(Message::SampleReceived(volt_sample(i)));
        }

        let timestamps: Vec<_> = app.samples().iter().map(|s| s.timestamp.as_str()).collect();
        assert_eq!(timestamps, vec!["t2", "t3", "t4"]);
        assert_eq!(app.title(), "CanSight - 3 samples");
    }

    #[test]
    fn test_feed_status_transitions() {
        let mut app = app();
        let _ = app.update(Message::FeedDisconnected("file not found".to_string()));
        assert!(!app.feed_status().connected);
        assert_eq!(app.feed_status().last_error.as_deref(), Some("file not found"));

        let _ = app.update(Message::FeedConnected);
        assert_eq!(
            *app.feed_status(),
            FeedStatus {
                connected: true,
                last_error: None
            }
        );
    }

    #[test]
    fn test_initial_input_mode_follows_configured_width() {
        assert_eq!(app().graphs().input_mode(), InputMode::Pointer);

        let mut config = DashboardConfig::default();
        config.display.window_width = 400.0;
        assert_eq!(CanSight::new(config).graphs().input_mode(), InputMode::Touch);
    }

    #[test]
    fn test_resize_switches_input_mode_and_clears_tooltip() {
        let mut app = app();
        for i in 0..3 {
            let _ = app.update(Message::SampleReceived(volt_sample(i)));
        }

        let id = ChartId::Individual("DcBusVolt".to_string());
        let _ = app.update(Message::ChartPointer(
            id.clone(),
            PointerEvent::Moved {
                position: Point::new(300.0, 100.0),
                canvas: Size::new(800.0, 200.0),
            },
        ));
        assert!(app.graphs().panel(&id).unwrap().resolver.tooltip().visible);

        let _ = app.update(Message::WindowResized(Size::new(600.0, 900.0)));
        assert_eq!(app.window_size(), Size::new(600.0, 900.0));
        assert_eq!(app.graphs().input_mode(), InputMode::Touch);
        assert!(!app.graphs().panel(&id).unwrap().resolver.tooltip().visible);
    }

    #[test]
    fn test_layout_messages() {
        let mut app = app();

        let _ = app.update(Message::SetGraphMode(GraphMode::Quad));
        let _ = app.update(Message::SetQuadMetric(
            1,
            MetricChoice {
                key: "Brake".to_string(),
                label: "Brake Status".to_string(),
            },
        ));
        assert_eq!(app.graphs().mode, GraphMode::Quad);
        assert_eq!(app.graphs().quad_selection[1], "Brake");

        let _ = app.update(Message::ToggleOverlayMetric("MtrTemp".to_string()));
        assert_eq!(app.graphs().overlay_selection, vec!["MtrTemp"]);

        let _ = app.update(Message::ToggleFullView);
        assert!(app.graphs().full_view);
    }
}
