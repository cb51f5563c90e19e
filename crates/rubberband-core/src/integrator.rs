//! Shared physics integrator for fling decay and spring-back.
//!
//! One tagged integrator drives both animation shapes: a ballistic fling
//! whose velocity decays exponentially, and a fixed-duration spring-back
//! easing a displaced offset to exactly zero. Callers advance it with
//! discrete frame ticks and poll the current sample.

/// Exponential fling velocity decay rate, per second. At 2.3 the velocity
/// halves roughly every 300 ms, comparable to a platform scroller's
/// friction. Empirical feel tuning, not derived.
pub const FLING_DECAY_RATE: f64 = 2.3;

/// Velocity magnitude (units per second) below which a fling counts as
/// finished.
pub const FLING_STOP_VELOCITY: f64 = 1.0;

/// Fixed spring-back duration.
pub const SPRING_BACK_DURATION_MS: u32 = 250;

/// Controls the viscous fluid effect (how much of it).
pub const VISCOUS_FLUID_SCALE: f64 = 8.0;

/// The viscous-fluid ease-out curve, normalized so `f(0) = 0` and
/// `f(1) = 1`: fast initial motion, slow settle, strictly monotonic.
fn viscous_fluid(t: f64) -> f64 {
    viscous_fluid_raw(t) / viscous_fluid_raw(1.0)
}

fn viscous_fluid_raw(t: f64) -> f64 {
    let x = t * VISCOUS_FLUID_SCALE;
    if x < 1.0 {
        x - (1.0 - (-x).exp())
    } else {
        // 1/e, the curve value where the two branches meet.
        let start = (-1.0f64).exp();
        start + (1.0 - (1.0 - x).exp()) * (1.0 - start)
    }
}

#[derive(Debug, Clone)]
enum Mode {
    /// Ballistic decay from an initial velocity. Position accumulates
    /// without bounds; only the decay shape is read by callers.
    Fling { velocity: f64, position: f64 },
    /// Ease from a displaced start position to exactly zero over
    /// [`SPRING_BACK_DURATION_MS`].
    SpringBack { start: f64, elapsed_ms: u32 },
}

/// A tick-driven physics simulation with fling and spring-back modes.
#[derive(Debug, Clone)]
pub struct FlingIntegrator {
    mode: Mode,
}

impl FlingIntegrator {
    /// Start a fling from rest position with the given signed velocity
    /// (units per second).
    pub fn fling(initial_velocity: f64) -> Self {
        Self {
            mode: Mode::Fling {
                velocity: initial_velocity,
                position: 0.0,
            },
        }
    }

    /// Start a spring-back from `start` toward zero, with zero initial
    /// velocity.
    pub fn spring_back(start: i32) -> Self {
        Self {
            mode: Mode::SpringBack {
                start: f64::from(start),
                elapsed_ms: 0,
            },
        }
    }

    /// Advance by `dt_ms` and compute the next sample. Returns true while
    /// motion continues.
    pub fn tick(&mut self, dt_ms: u32) -> bool {
        match &mut self.mode {
            Mode::Fling { velocity, position } => {
                let dt = f64::from(dt_ms) / 1000.0;
                *velocity *= (-FLING_DECAY_RATE * dt).exp();
                *position += *velocity * dt;
            }
            Mode::SpringBack { elapsed_ms, .. } => {
                *elapsed_ms = (*elapsed_ms + dt_ms).min(SPRING_BACK_DURATION_MS);
            }
        }
        !self.is_finished()
    }

    /// Current position sample, truncated toward zero.
    ///
    /// A finished spring-back reads exactly 0.
    pub fn value(&self) -> i32 {
        match &self.mode {
            Mode::Fling { position, .. } => *position as i32,
            Mode::SpringBack { start, elapsed_ms } => {
                if *elapsed_ms >= SPRING_BACK_DURATION_MS {
                    return 0;
                }
                let t = f64::from(*elapsed_ms) / f64::from(SPRING_BACK_DURATION_MS);
                (start - start * viscous_fluid(t)) as i32
            }
        }
    }

    /// Current signed velocity. Zero once finished, and zero in
    /// spring-back mode (the spring-back is position-driven).
    pub fn velocity(&self) -> f64 {
        match &self.mode {
            Mode::Fling { velocity, .. } if !self.is_finished() => *velocity,
            _ => 0.0,
        }
    }

    /// Whether the simulation has converged.
    pub fn is_finished(&self) -> bool {
        match &self.mode {
            Mode::Fling { velocity, .. } => velocity.abs() < FLING_STOP_VELOCITY,
            Mode::SpringBack { elapsed_ms, .. } => *elapsed_ms >= SPRING_BACK_DURATION_MS,
        }
    }
}
