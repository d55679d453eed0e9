use crate::config::Settings;
use crate::sim::{SleepPacer, Simulation, StopSignal};
use crate::terminal::{KeyPacer, TerminalSession};
use anyhow::Result;
use std::io::{self, IsTerminal};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG: &str = "warn";

/// `RUST_LOG` if it parses, otherwise warnings only.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG))
}

pub(crate) fn run() -> Result<()> {
    // stdout carries the frames; diagnostics go to stderr
    let filter = log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref());
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .init();

    let settings = Settings::default();
    let mut sim = Simulation::new(settings);
    let stop = StopSignal::new();
    tracing::info!("double pendulum starting");

    let res = if io::stdout().is_terminal() {
        let mut term = TerminalSession::begin()?;
        let res = sim.run(&mut term.writer(), &mut KeyPacer, &stop);
        term.end()?;
        res
    } else {
        // piped: plain frames forever, like the bare animation
        sim.run(&mut io::stdout().lock(), &mut SleepPacer, &stop)
    };

    if let Some(fault) = sim.fault() {
        tracing::warn!(%fault, "pendulum went non-finite during the run");
    }
    tracing::info!(
        frames = sim.frames(),
        energy = sim.state().energy(),
        "double pendulum finished"
    );
    res
}
