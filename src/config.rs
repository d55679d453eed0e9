use std::time::Duration;

pub(crate) const SCREEN_WIDTH: usize = 80;
pub(crate) const SCREEN_HEIGHT: usize = 20;
// characters are about twice as tall as they are wide
pub(crate) const X_SCALE: f32 = 2.0;
pub(crate) const TIME_PER_STEP_US: u64 = 1000;
pub(crate) const STEPS_PER_FRAME: u32 = 100;

#[derive(Clone, Debug)]
pub(crate) struct Settings {
    pub(crate) width: usize,
    pub(crate) height: usize,
    pub(crate) x_scale: f32,
    pub(crate) time_per_step_us: u64,
    pub(crate) steps_per_frame: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            x_scale: X_SCALE,
            time_per_step_us: TIME_PER_STEP_US,
            steps_per_frame: STEPS_PER_FRAME,
        }
    }
}

impl Settings {
    /// Physics increment per sub-step, in seconds.
    pub(crate) fn sub_step_secs(&self) -> f32 {
        self.time_per_step_us as f32 / 1_000_000.0
    }

    /// Sleep between rendered frames.
    pub(crate) fn frame_period(&self) -> Duration {
        Duration::from_micros(self.time_per_step_us * self.steps_per_frame as u64)
    }
}
