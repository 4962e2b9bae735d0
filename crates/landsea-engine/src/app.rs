//! Headless game loop.
//!
//! Drives a [`GameSession`] for a configured number of ticks, logs what
//! happens, and emits a final JSON snapshot.

use std::fs;
use std::io::Write;

use anyhow::{Context, Result};
use landsea_gameplay::{GameSession, InputState, SessionEvent, SessionSnapshot};
use tracing::{debug, info};

use crate::config::LandseaConfig;
use crate::timing::FixedStep;

/// Runs a session to completion and returns its final snapshot.
pub fn simulate(config: &LandseaConfig) -> SessionSnapshot {
    let mut session = GameSession::new(config.session.clone());
    let dt = config.tick_dt();
    let total = config.total_ticks();
    let status_every = status_interval_ticks(config);
    let mut input = InputState::default();
    let mut collisions = 0u64;

    info!("Simulating {total} ticks at {} Hz", config.runner.tick_rate);

    for tick in 0..total {
        let events = session.tick(dt, &input);
        input = next_input(config, &events);
        collisions += events
            .iter()
            .filter(|e| matches!(e, SessionEvent::Collided))
            .count() as u64;
        log_events(&events);

        if status_every > 0 && (tick + 1) % status_every == 0 {
            log_status(&session.snapshot());
        }
    }

    info!("Simulation finished after {total} ticks, {collisions} collisions");
    session.snapshot()
}

/// Runs the configured session, pacing against the wall clock when asked.
pub fn run(config: &LandseaConfig) -> Result<()> {
    let snapshot = if config.runner.realtime {
        run_realtime(config)
    } else {
        simulate(config)
    };

    let json = serde_json::to_string_pretty(&snapshot).context("encoding snapshot")?;
    match &config.runner.snapshot_path {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("writing snapshot to {path}"))?;
            info!("Snapshot written to {path}");
        },
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}").context("writing snapshot to stdout")?;
        },
    }
    Ok(())
}

fn run_realtime(config: &LandseaConfig) -> SessionSnapshot {
    let mut session = GameSession::new(config.session.clone());
    let mut step = FixedStep::new(config.runner.tick_rate);
    let total = config.total_ticks();
    let status_every = status_interval_ticks(config);
    let mut input = InputState::default();
    let mut done = 0u64;

    info!("Running {total} ticks in real time");
    while done < total {
        let frame_dt = step.delta_time();
        let due = step.accumulate(frame_dt);
        for _ in 0..due {
            if done >= total {
                break;
            }
            let events = session.tick(step.fixed_dt(), &input);
            input = next_input(config, &events);
            log_events(&events);
            done += 1;
            if status_every > 0 && done % status_every == 0 {
                log_status(&session.snapshot());
            }
        }
        step.sleep_remainder();
    }
    session.snapshot()
}

fn status_interval_ticks(config: &LandseaConfig) -> u64 {
    (config.runner.status_interval_secs * config.runner.tick_rate as f32).round() as u64
}

/// Input for the next tick. The runner only ever presses kick-off, and only
/// right after the hull touched land.
fn next_input(config: &LandseaConfig, events: &[SessionEvent]) -> InputState {
    InputState {
        kick: config.runner.auto_kick && events.contains(&SessionEvent::Collided),
        ..InputState::default()
    }
}

fn log_events(events: &[SessionEvent]) {
    for event in events {
        match event {
            SessionEvent::WeatherChanged(state) => info!("Weather: {}", state.display_name()),
            SessionEvent::ItemLost(stack) => info!("Lost {} {}", stack.count, stack.item),
            other => debug!("{other:?}"),
        }
    }
}

fn log_status(snapshot: &SessionSnapshot) {
    info!(
        "{} | boat ({:.0}, {:.0}) speed {:.1} | wind {:.0} | {} | {} chunks",
        snapshot.clock,
        snapshot.boat.position.x,
        snapshot.boat.position.y,
        snapshot.boat.velocity.length(),
        snapshot.wind.length(),
        snapshot.weather,
        snapshot.loaded_chunks
    );
}
