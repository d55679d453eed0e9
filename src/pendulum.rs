use crate::config::Settings;
use std::f32::consts::PI;
use thiserror::Error;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct Vec2 {
    pub(crate) x: f32,
    pub(crate) y: f32,
}
impl Vec2 {
    pub(crate) fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
    pub(crate) fn add(self, o: Self) -> Self {
        Self::new(self.x + o.x, self.y + o.y)
    }
    pub(crate) fn mul(self, k: f32) -> Self {
        Self::new(self.x * k, self.y * k)
    }
    /// Unit vector of an arm hanging at `angle` from straight down (y grows downward).
    pub(crate) fn from_angle(angle: f32) -> Self {
        Self::new(angle.sin(), angle.cos())
    }
}

/// Fixed physical parameters, set once when the pendulum is built.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct PendulumParams {
    pub(crate) hook: Vec2,
    pub(crate) gravity: f32,
    pub(crate) dampening: f32, // per sub-step multiplier on angular velocity
    pub(crate) length1: f32,
    pub(crate) length2: f32,
    pub(crate) mass1: f32,
    pub(crate) mass2: f32,
}

impl PendulumParams {
    /// Hook a quarter of the way across and a third of the way down, in whole cells.
    pub(crate) fn for_screen(width: usize, height: usize) -> Self {
        Self {
            hook: Vec2::new((width / 4) as f32, (height / 3) as f32),
            gravity: 9.81,
            dampening: 1.0,
            length1: 8.0,
            length2: 6.0,
            mass1: 4.0,
            mass2: 4.0,
        }
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub(crate) enum PendulumFault {
    #[error("pendulum state is no longer finite (angles {angle1}, {angle2}; velocities {velocity1}, {velocity2})")]
    NonFinite {
        angle1: f32,
        angle2: f32,
        velocity1: f32,
        velocity2: f32,
    },
}

/// One snapshot of the double pendulum.
///
/// `bob1` and `bob2` are derived from the angles. Anything that changes an angle
/// goes through [`PendulumState::refresh_positions`] before the state is handed out.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct PendulumState {
    pub(crate) params: PendulumParams,
    pub(crate) angle1: f32,
    pub(crate) angle2: f32,
    pub(crate) angular_velocity1: f32,
    pub(crate) angular_velocity2: f32,
    pub(crate) bob1: Vec2,
    pub(crate) bob2: Vec2,
}

/// The starting pose: upper arm at 135°, lower arm horizontal, both at rest.
pub(crate) fn create_initial_state(settings: &Settings) -> PendulumState {
    let params = PendulumParams::for_screen(settings.width, settings.height);
    PendulumState::at_rest(params, 3.0 * PI / 4.0, 2.0 * PI / 4.0)
}

impl PendulumState {
    pub(crate) fn at_rest(params: PendulumParams, angle1: f32, angle2: f32) -> Self {
        let mut state = Self {
            params,
            angle1,
            angle2,
            angular_velocity1: 0.0,
            angular_velocity2: 0.0,
            bob1: params.hook,
            bob2: params.hook,
        };
        state.refresh_positions();
        state
    }

    /// Bob positions implied by the current angles.
    pub(crate) fn project(&self) -> (Vec2, Vec2) {
        let p = &self.params;
        let bob1 = p.hook.add(Vec2::from_angle(self.angle1).mul(p.length1));
        let bob2 = bob1.add(Vec2::from_angle(self.angle2).mul(p.length2));
        (bob1, bob2)
    }

    pub(crate) fn refresh_positions(&mut self) {
        let (bob1, bob2) = self.project();
        self.bob1 = bob1;
        self.bob2 = bob2;
    }

    /// Kinetic plus potential energy. Height is measured upward from the hook,
    /// so a bob below the hook has negative potential.
    pub(crate) fn energy(&self) -> f32 {
        let p = &self.params;
        let (a1, a2) = (self.angle1, self.angle2);
        let (w1, w2) = (self.angular_velocity1, self.angular_velocity2);

        let v1_sq = (p.length1 * w1).powi(2);
        let v2_sq = v1_sq
            + (p.length2 * w2).powi(2)
            + 2.0 * p.length1 * p.length2 * w1 * w2 * (a1 - a2).cos();
        let kinetic = 0.5 * p.mass1 * v1_sq + 0.5 * p.mass2 * v2_sq;

        let y1 = p.length1 * a1.cos();
        let y2 = y1 + p.length2 * a2.cos();
        let potential = -p.gravity * (p.mass1 * y1 + p.mass2 * y2);

        kinetic + potential
    }

    /// Reports a numerical blow-up. The integrator never calls this itself.
    pub(crate) fn check_finite(&self) -> Result<(), PendulumFault> {
        let all_finite = [
            self.angle1,
            self.angle2,
            self.angular_velocity1,
            self.angular_velocity2,
        ]
        .iter()
        .all(|v| v.is_finite());
        if all_finite {
            Ok(())
        } else {
            Err(PendulumFault::NonFinite {
                angle1: self.angle1,
                angle2: self.angle2,
                velocity1: self.angular_velocity1,
                velocity2: self.angular_velocity2,
            })
        }
    }
}
