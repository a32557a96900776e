//! # Freeze Demo
//!
//! Headless run of the freeze effect, paced in real time:
//!
//! - `walker` is frozen for 100 ticks and keeps trying to walk away
//! - `watcher` is frozen until released, may look around, and disconnects
//!   at tick 60
//!
//! ```bash
//! RUST_LOG=debug ./freeze_demo [config.toml]
//! ```

use stasis::{HostEvent, Simulation, SimulationConfig, TickReport};
use stasis_core::{Location, MotionAttributes, TickLoop};
use tracing_subscriber::filter::EnvFilter;

/// Ticks to simulate.
const RUN_TICKS: u64 = 120;
/// Walker freeze duration.
const WALKER_FREEZE: i32 = 100;
/// Tick the watcher leaves at.
const WATCHER_LEAVES: u64 = 60;

fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config() -> SimulationConfig {
    let Some(path) = std::env::args().nth(1) else {
        return SimulationConfig::default();
    };
    match SimulationConfig::from_file(&path) {
        Ok(config) => config,
        Err(error) => {
            tracing::error!(%path, %error, "failed to load config");
            std::process::exit(1);
        }
    }
}

fn main() {
    init_logging();

    let config = load_config();
    let mut pacer = TickLoop::new(config.tick_rate);
    let mut sim = match Simulation::new(config) {
        Ok(sim) => sim,
        Err(error) => {
            tracing::error!(%error, "failed to start simulation");
            std::process::exit(1);
        }
    };

    let spawn = Location::new(0.0, 64.0, 0.0);
    let walker = sim.spawn(MotionAttributes::DEFAULT, spawn);
    let watcher = sim.spawn(MotionAttributes::DEFAULT, Location::new(4.0, 64.0, 0.0));

    let frozen = sim
        .freeze(walker, WALKER_FREEZE, false)
        .and_then(|()| sim.freeze(watcher, -1, true));
    if let Err(error) = frozen {
        tracing::error!(%error, "failed to freeze demo entities");
        std::process::exit(1);
    }

    let events = sim.sender();
    let mut totals = TickReport::default();

    while sim.current_tick() < RUN_TICKS {
        while pacer.should_tick() && sim.current_tick() < RUN_TICKS {
            let started = pacer.begin_tick();
            let next = sim.current_tick() + 1;

            #[allow(clippy::cast_precision_loss)]
            let step = Location::new(next as f32 * 0.1, 64.0, 0.0);
            events.send(HostEvent::Move { entity: walker, to: step });
            events.send(HostEvent::ToggleFlight { entity: walker, flying: false });
            if next == WATCHER_LEAVES {
                events.send(HostEvent::Disconnect { entity: watcher });
            }

            let report = sim.step();
            if report.expired > 0 || report.released_on_disconnect > 0 {
                tracing::info!(
                    tick = report.tick,
                    expired = report.expired,
                    disconnected = report.released_on_disconnect,
                    "freezes released"
                );
            }
            totals.events += report.events;
            totals.moves_reverted += report.moves_reverted;
            totals.flights_cancelled += report.flights_cancelled;
            totals.expired += report.expired;
            totals.released_on_disconnect += report.released_on_disconnect;

            pacer.end_tick(started);
        }
        pacer.wait_for_next_tick();
    }

    let stats = pacer.stats();
    tracing::info!(
        ticks = sim.current_tick(),
        events = totals.events,
        moves_reverted = totals.moves_reverted,
        flights_cancelled = totals.flights_cancelled,
        expired = totals.expired,
        disconnected = totals.released_on_disconnect,
        still_frozen = sim.freeze_registry().frozen_count(),
        avg_tick_us = stats.avg_tick_us,
        late_ticks = stats.late_ticks,
        "demo finished"
    );
    for entity in sim.freeze_registry().frozen() {
        tracing::info!(%entity, "still frozen at shutdown");
    }
}
