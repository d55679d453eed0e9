use crate::config::Settings;
use crate::frame::FrameBuffer;
use crate::integrator::advance;
use crate::pendulum::{create_initial_state, PendulumFault, PendulumState};
use crate::render::Renderer;
use anyhow::Result;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Shared flag that ends [`Simulation::run`] at the next frame boundary.
#[derive(Clone, Debug, Default)]
pub(crate) struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    pub(crate) fn new() -> Self {
        Self::default()
    }
    pub(crate) fn stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }
    pub(crate) fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Waits out the gap between frames.
pub(crate) trait Pacer {
    fn pause(&mut self, period: Duration, stop: &StopSignal) -> Result<()>;
}

/// Plain sleep, no input.
pub(crate) struct SleepPacer;

impl Pacer for SleepPacer {
    fn pause(&mut self, period: Duration, _stop: &StopSignal) -> Result<()> {
        std::thread::sleep(period);
        Ok(())
    }
}

pub(crate) struct Simulation {
    settings: Settings,
    state: PendulumState,
    buffer: FrameBuffer,
    renderer: Renderer,
    frames: u64,
    fault: Option<PendulumFault>,
}

impl Simulation {
    pub(crate) fn new(settings: Settings) -> Self {
        let state = create_initial_state(&settings);
        let buffer = FrameBuffer::new(settings.width, settings.height);
        let renderer = Renderer::new(&settings);
        Self {
            settings,
            state,
            buffer,
            renderer,
            frames: 0,
            fault: None,
        }
    }

    pub(crate) fn state(&self) -> &PendulumState {
        &self.state
    }

    pub(crate) fn frames(&self) -> u64 {
        self.frames
    }

    /// First numerical fault seen, if any. Reported, never corrected.
    pub(crate) fn fault(&self) -> Option<PendulumFault> {
        self.fault
    }

    /// Integrate one frame's worth of sub-steps.
    pub(crate) fn step_frame(&mut self) {
        let dt = self.settings.sub_step_secs();
        for _ in 0..self.settings.steps_per_frame {
            self.state = advance(self.state, dt);
        }
        self.frames += 1;

        if self.fault.is_none() {
            if let Err(fault) = self.state.check_finite() {
                tracing::warn!(frame = self.frames, %fault, "numerically unstable");
                self.fault = Some(fault);
            }
        }
    }

    /// Integrate and draw one frame.
    pub(crate) fn run_frame<W: Write>(&mut self, out: &mut W) -> Result<()> {
        self.step_frame();
        self.renderer.render(&self.state, &mut self.buffer, out)?;
        tracing::trace!(frame = self.frames, energy = self.state.energy(), "frame");
        Ok(())
    }

    /// {integrate, render, pause} until `stop` is raised.
    pub(crate) fn run<W: Write, P: Pacer>(
        &mut self,
        out: &mut W,
        pacer: &mut P,
        stop: &StopSignal,
    ) -> Result<()> {
        let period = self.settings.frame_period();
        while !stop.is_stopped() {
            self.run_frame(out)?;
            pacer.pause(period, stop)?;
        }
        tracing::info!(frames = self.frames, "simulation stopped");
        Ok(())
    }
}
