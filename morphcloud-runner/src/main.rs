//! Headless morphcloud driver.
//!
//! Run with: `cargo run -p morphcloud-runner --release -- [config.json]`
//!
//! Drives a coordinator with a scripted synthetic hand and logs what the cloud
//! is doing. Set `RUST_LOG=debug` to see shape switches and pinch edges.

mod config;
mod script;

use config::RunnerConfig;
use morphcloud::color::to_hex;
use morphcloud::{ConfigError, Coordinator, FrameClock, HandStatus};
use script::SyntheticHand;
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            info!(%path, "loading configuration");
            RunnerConfig::load(&path)
        }
        None => Ok(RunnerConfig::default()),
    };

    let result = config.and_then(|config| run(&config));
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "run aborted");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &RunnerConfig) -> Result<(), ConfigError> {
    let clock = match config.fixed_delta {
        Some(delta) => FrameClock::fixed(delta),
        None => FrameClock::new(),
    };
    let mut coordinator = Coordinator::with_clock(&config.simulation, clock)?;
    let mut feed = coordinator.feed();
    let hand = SyntheticHand::new(config.script.clone());

    let mut changes = config.script.shape_changes.clone();
    changes.sort_by(|a, b| a.at.total_cmp(&b.at));
    let mut changes = changes.into_iter().peekable();

    let mut last_status = None;
    for frame in 0..config.frames {
        let t = coordinator.clock().elapsed();

        while let Some(change) = changes.next_if(|c| c.at <= t) {
            match coordinator.request_shape(&change.shape) {
                Ok(kind) => info!(t, shape = %kind, "shape requested"),
                Err(e) => warn!(t, error = %e, "shape request rejected"),
            }
        }

        if frame % config.detector_every == 0 {
            let sample = hand.sample(t);
            feed.push(sample.as_deref());
        }

        let (status, shape, closed_strength, color) = {
            let out = coordinator.frame();
            (out.status, out.shape, out.closed_strength, out.color)
        };

        if last_status != Some(status) && status != HandStatus::Love {
            info!(frame, status = status.text(), "tracking");
        }
        if status == HandStatus::Love {
            info!(frame, status = status.text(), color = %to_hex(color), "pinch");
        }
        last_status = Some(status);

        if frame % config.report_every == 0 {
            let simulator = coordinator.simulator();
            let offset = simulator.group_offset();
            info!(
                frame,
                t = coordinator.clock().elapsed(),
                %shape,
                closed = closed_strength,
                centroid = ?simulator.centroid(),
                offset = ?offset,
                settle = simulator.max_target_error(),
                color = %to_hex(color),
                "report"
            );
        }
    }

    let simulator = coordinator.simulator();
    info!(
        frames = simulator.frame(),
        shape = %simulator.shape(),
        settle = simulator.max_target_error(),
        "run complete"
    );
    Ok(())
}
