//! Dashboard header: title, feed status, and sample counters.

use iced::widget::{Column, row, text};
use iced::{Alignment, Color, Element, Theme};

use cansight_common::Sample;

use crate::message::Message;

use super::formatting::{format_sample_count, format_sample_time};

/// Feed connection state shown in the header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedStatus {
    pub connected: bool,
    pub last_error: Option<String>,
}

/// Render the header.
pub fn header_view<'a>(
    status: &'a FeedStatus,
    sample_count: usize,
    latest: Option<&'a Sample>,
) -> Element<'a, Message> {
    let title = text("CanSight").size(24);

    let status_text = if status.connected {
        text("Connected")
            .size(14)
            .style(|_theme: &Theme| text::Style {
                color: Some(Color::from_rgb(0.2, 0.8, 0.2)),
            })
    } else {
        text("Disconnected")
            .size(14)
            .style(|_theme: &Theme| text::Style {
                color: Some(Color::from_rgb(0.8, 0.2, 0.2)),
            })
    };

    let count = text(format_sample_count(sample_count)).size(14);

    let last = match latest {
        Some(sample) => format!("Last sample: {}", format_sample_time(&sample.timestamp)),
        None => "Waiting for samples...".to_string(),
    };

    let header_row = row![title, status_text, count, text(last).size(14)]
        .spacing(20)
        .align_y(Alignment::Center);

    let mut header_col = Column::new().push(header_row);

    if let Some(ref error) = status.last_error {
        header_col = header_col.push(text(format!("Error: {}", error)).size(12).style(
            |_theme: &Theme| text::Style {
                color: Some(Color::from_rgb(0.8, 0.2, 0.2)),
            },
        ));
    }

    header_col.spacing(5).into()
}
