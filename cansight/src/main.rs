//! CanSight - live telemetry charts for a CAN motor controller.
//!
//! Plots the rolling sample history from the demo simulator or a recorded
//! history file as individual, overlay or quad chart layouts.

use clap::Parser;
use iced::application;

use cansight::CanSight;
use cansight::cli::{Args, resolve_config};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = resolve_config(&args)?;

    cansight_common::init_tracing(&config.logging)?;

    tracing::info!(
        feed = ?config.feed.mode,
        history_capacity = config.history_capacity,
        metrics = config.catalog.len(),
        "Starting CanSight"
    );

    let window_size = (config.display.window_width, config.display.window_height);

    application(
        move || CanSight::boot(config.clone()),
        CanSight::update,
        CanSight::view,
    )
    .title(CanSight::title)
    .subscription(CanSight::subscription)
    .theme(CanSight::theme)
    .scale_factor(CanSight::scale_factor)
    .window_size(window_size)
    .run()
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
