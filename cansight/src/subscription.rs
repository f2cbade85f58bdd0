use std::path::Path;
use std::time::Duration;

use iced::Subscription;

use cansight_common::{FeedConfig, FeedMode, decode_history};

use crate::demo::DemoSimulator;
use crate::message::Message;

/// Create the sample feed subscription for the configured mode.
///
/// The subscription is keyed by the feed configuration, so changing it
/// restarts the feed.
pub fn feed_subscription(config: FeedConfig) -> Subscription<Message> {
    Subscription::run_with(config, move |config| {
        let config = config.clone();
        async_stream::stream! {
            let interval = Duration::from_millis(config.interval_ms.max(1));

            match config.mode {
                FeedMode::Demo => {
                    let mut simulator = match config.seed {
                        Some(seed) => DemoSimulator::with_seed(seed),
                        None => DemoSimulator::new(),
                    };

                    tracing::info!(
                        interval_ms = config.interval_ms,
                        seed = ?config.seed,
                        "Demo feed started"
                    );
                    yield Message::FeedConnected;

                    loop {
                        yield Message::SampleReceived(simulator.next_sample());
                        tokio::time::sleep(interval).await;
                    }
                }
                FeedMode::Replay => {
                    let Some(path) = config.path.clone() else {
                        tracing::error!("Replay feed has no history file");
                        yield Message::FeedDisconnected("No replay file configured".to_string());
                        return;
                    };

                    let samples = match read_history(&path).await {
                        Ok(samples) => samples,
                        Err(e) => {
                            tracing::error!(
                                path = %path.display(),
                                error = %e,
                                "Failed to load replay file"
                            );
                            yield Message::FeedDisconnected(e.to_string());
                            return;
                        }
                    };

                    tracing::info!(
                        path = %path.display(),
                        samples = samples.len(),
                        "Replay feed started"
                    );
                    yield Message::FeedConnected;

                    for sample in samples {
                        yield Message::SampleReceived(sample);
                        tokio::time::sleep(interval).await;
                    }

                    tracing::info!(path = %path.display(), "Replay finished");
                }
            }
        }
    })
}

async fn read_history(path: &Path) -> anyhow::Result<Vec<cansight_common::Sample>> {
    let data = tokio::fs::read(path).await?;
    Ok(decode_history(&data)?)
}

/// Report logical window sizes so the app can pick its input mode.
pub fn resize_subscription() -> Subscription<Message> {
    iced::window::resize_events().map(|(_id, size)| Message::WindowResized(size))
}
