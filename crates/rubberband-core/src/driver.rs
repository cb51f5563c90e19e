//! Animation phase sequencing: mock fling, bounce decay, spring-back.
//!
//! One phase runs at a time. Every phase change bumps a generation
//! counter; a [`FrameToken`] from a superseded phase makes `tick` a
//! guarded no-op, so a stale frame callback can never move the offset.

use crate::integrator::FlingIntegrator;
use crate::translation::TranslationState;

/// Per-frame geometric decay base for the bounce velocity. The square-law
/// exponent (`0.85^(2k)` on frame `k`) keeps the visible bounce brief.
/// Empirical feel tuning, not derived.
pub const BOUNCE_DECAY_BASE: f64 = 0.85;

/// Displacement per frame (device-independent units) below which the
/// bounce stops feeding the offset and hands over to the spring-back.
pub const BOUNCE_STOP_DISTANCE: f64 = 1.0;

/// Which animation phase is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationPhase {
    Idle,
    /// Replaying a fling the child consumed, to keep a live velocity
    /// estimate. Does not move the offset.
    MockFling,
    /// Velocity-driven overscroll growth after a fling hit the boundary.
    BounceDecay,
    /// Easing a displaced offset back to rest.
    SpringBack,
}

/// Identity of one scheduled frame callback. Obtained when a phase
/// starts; presented back on every tick. Superseded tokens no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameToken(u64);

/// Outcome of one animation tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// The token was superseded; nothing was touched.
    Stale,
    /// The animation advanced and wants another frame, identified by the
    /// contained token (a new one when the phase handed over).
    Continue(FrameToken),
    /// The active phase ran to completion.
    Finished,
}

#[derive(Debug)]
enum PhaseState {
    Idle,
    MockFling {
        integrator: FlingIntegrator,
    },
    BounceDecay {
        velocity: f64,
        frame: u32,
        offset: f64,
    },
    SpringBack {
        integrator: FlingIntegrator,
    },
}

/// The animation state machine driving overscroll phases between frames.
#[derive(Debug)]
pub struct AnimationDriver {
    phase: PhaseState,
    generation: u64,
}

impl Default for AnimationDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationDriver {
    pub fn new() -> Self {
        Self {
            phase: PhaseState::Idle,
            generation: 0,
        }
    }

    /// The active phase discriminant.
    pub fn phase(&self) -> AnimationPhase {
        match self.phase {
            PhaseState::Idle => AnimationPhase::Idle,
            PhaseState::MockFling { .. } => AnimationPhase::MockFling,
            PhaseState::BounceDecay { .. } => AnimationPhase::BounceDecay,
            PhaseState::SpringBack { .. } => AnimationPhase::SpringBack,
        }
    }

    /// Token for the currently scheduled frame, if any phase is active.
    /// The host keeps requesting frames while this is `Some`.
    pub fn frame_token(&self) -> Option<FrameToken> {
        match self.phase {
            PhaseState::Idle => None,
            _ => Some(FrameToken(self.generation)),
        }
    }

    /// Begin decaying a velocity estimate for a fling the child consumed.
    pub fn start_mock_fling(&mut self, velocity: f64) -> FrameToken {
        log::debug!("mock fling: velocity:{velocity}");
        self.enter(PhaseState::MockFling {
            integrator: FlingIntegrator::fling(velocity),
        })
    }

    /// Signed velocity estimate of a live mock fling. Zero once the
    /// integrator converged; `None` outside the mock-fling phase.
    pub fn mock_fling_velocity(&self) -> Option<f64> {
        match &self.phase {
            PhaseState::MockFling { integrator } => Some(integrator.velocity()),
            _ => None,
        }
    }

    /// Begin the velocity-driven bounce, accumulating from the current
    /// virtual offset.
    pub fn start_bounce(&mut self, velocity: f64, from_offset: i32) -> FrameToken {
        log::debug!("bounce: velocity:{velocity} from:{from_offset}");
        self.enter(PhaseState::BounceDecay {
            velocity,
            frame: 0,
            offset: f64::from(from_offset),
        })
    }

    /// Begin easing a displaced offset back to rest. A rest offset needs
    /// no spring-back and returns `None`.
    pub fn start_spring_back(&mut self, from_offset: i32) -> Option<FrameToken> {
        if from_offset == 0 {
            return None;
        }
        log::debug!("spring back: from:{from_offset}");
        Some(self.enter(PhaseState::SpringBack {
            integrator: FlingIntegrator::spring_back(from_offset),
        }))
    }

    /// Cancel whatever phase is running, leaving the offset as it is.
    /// Any outstanding token becomes stale.
    pub fn abort(&mut self) {
        if !matches!(self.phase, PhaseState::Idle) {
            log::debug!("abort animation");
            self.enter(PhaseState::Idle);
        }
    }

    /// Advance the active phase by `dt_ms`, writing offsets into `state`.
    ///
    /// A token from a superseded phase returns [`Tick::Stale`] without
    /// touching anything; a stale callback firing once more is harmless.
    pub fn tick(&mut self, token: FrameToken, dt_ms: u32, state: &mut TranslationState) -> Tick {
        if token.0 != self.generation {
            return Tick::Stale;
        }
        if dt_ms == 0 {
            return match self.phase {
                PhaseState::Idle => Tick::Finished,
                _ => Tick::Continue(token),
            };
        }

        match std::mem::replace(&mut self.phase, PhaseState::Idle) {
            PhaseState::Idle => Tick::Finished,
            PhaseState::MockFling { mut integrator } => {
                if integrator.tick(dt_ms) {
                    self.phase = PhaseState::MockFling { integrator };
                    Tick::Continue(token)
                } else {
                    self.generation += 1;
                    Tick::Finished
                }
            }
            PhaseState::BounceDecay {
                mut velocity,
                mut frame,
                mut offset,
            } => {
                frame += 1;
                velocity *= BOUNCE_DECAY_BASE.powi((frame * 2) as i32);
                let step = velocity * (f64::from(dt_ms) / 1000.0);

                if step.abs() >= BOUNCE_STOP_DISTANCE {
                    offset += step;
                    state.translate_to(offset as i32);
                    self.phase = PhaseState::BounceDecay {
                        velocity,
                        frame,
                        offset,
                    };
                    Tick::Continue(token)
                } else {
                    // Out of velocity: ease back from wherever we are.
                    self.generation += 1;
                    match self.start_spring_back(state.virtual_offset()) {
                        Some(next) => Tick::Continue(next),
                        None => Tick::Finished,
                    }
                }
            }
            PhaseState::SpringBack { mut integrator } => {
                let alive = integrator.tick(dt_ms);
                state.translate_to(integrator.value());
                if alive {
                    self.phase = PhaseState::SpringBack { integrator };
                    Tick::Continue(token)
                } else {
                    self.generation += 1;
                    Tick::Finished
                }
            }
        }
    }

    fn enter(&mut self, phase: PhaseState) -> FrameToken {
        self.generation += 1;
        self.phase = phase;
        FrameToken(self.generation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: u32 = 16;

    fn state_with_max(max: i32) -> TranslationState {
        let mut state = TranslationState::new();
        state.set_max_distance(max);
        state
    }

    #[test]
    fn starts_idle() {
        let driver = AnimationDriver::new();
        assert_eq!(driver.phase(), AnimationPhase::Idle);
        assert!(driver.frame_token().is_none());
    }

    #[test]
    fn mock_fling_never_moves_the_offset() {
        let mut driver = AnimationDriver::new();
        let mut state = state_with_max(200);
        let token = driver.start_mock_fling(-2000.0);
        for _ in 0..20 {
            match driver.tick(token, DT, &mut state) {
                Tick::Continue(_) | Tick::Finished => {}
                Tick::Stale => panic!("token went stale unexpectedly"),
            }
        }
        assert!(state.is_at_rest());
    }

    #[test]
    fn mock_fling_velocity_decays() {
        let mut driver = AnimationDriver::new();
        let mut state = state_with_max(200);
        let token = driver.start_mock_fling(-2000.0);
        let v0 = driver.mock_fling_velocity().unwrap();
        driver.tick(token, DT, &mut state);
        let v1 = driver.mock_fling_velocity().unwrap();
        assert!(v1.abs() < v0.abs());
        assert!(v1 < 0.0, "sign must be preserved");
    }

    #[test]
    fn mock_fling_runs_to_completion() {
        let mut driver = AnimationDriver::new();
        let mut state = state_with_max(200);
        let token = driver.start_mock_fling(500.0);
        let mut ticks = 0;
        loop {
            match driver.tick(token, DT, &mut state) {
                Tick::Continue(_) => ticks += 1,
                Tick::Finished => break,
                Tick::Stale => panic!("unexpected stale tick"),
            }
            assert!(ticks < 10_000, "mock fling never converged");
        }
        assert_eq!(driver.phase(), AnimationPhase::Idle);
        // The completed phase's token no longer works.
        assert_eq!(driver.tick(token, DT, &mut state), Tick::Stale);
    }

    #[test]
    fn bounce_follows_the_decay_recurrence() {
        // v0=500 at 16 ms frames: the recurrence predicts offsets
        // 5, 8, 9, then hand-over.
        let mut driver = AnimationDriver::new();
        let mut state = state_with_max(200);
        let mut token = driver.start_bounce(500.0, 0);

        let mut velocity = 500.0f64;
        let mut offset = 0.0f64;
        let mut frame = 0u32;
        loop {
            frame += 1;
            velocity *= BOUNCE_DECAY_BASE.powi((frame * 2) as i32);
            let step = velocity * (f64::from(DT) / 1000.0);
            let tick = driver.tick(token, DT, &mut state);
            if step.abs() >= BOUNCE_STOP_DISTANCE {
                offset += step;
                assert_eq!(state.virtual_offset(), offset as i32);
                assert_eq!(driver.phase(), AnimationPhase::BounceDecay);
                match tick {
                    Tick::Continue(next) => token = next,
                    other => panic!("expected Continue, got {other:?}"),
                }
            } else {
                // Velocity exhausted: spring-back from the exact offset.
                assert_eq!(driver.phase(), AnimationPhase::SpringBack);
                assert_eq!(state.virtual_offset(), offset as i32);
                break;
            }
        }
        assert_eq!(frame, 4);
        assert_eq!(state.virtual_offset(), 9);
    }

    #[test]
    fn bounce_hand_over_token_differs() {
        let mut driver = AnimationDriver::new();
        let mut state = state_with_max(200);
        let token = driver.start_bounce(500.0, 0);
        let mut current = token;
        loop {
            match driver.tick(current, DT, &mut state) {
                Tick::Continue(next) => {
                    if driver.phase() == AnimationPhase::SpringBack {
                        assert_ne!(next, token, "hand-over must mint a new token");
                        // The bounce token is dead after the hand-over.
                        assert_eq!(driver.tick(token, DT, &mut state), Tick::Stale);
                        return;
                    }
                    current = next;
                }
                other => panic!("expected Continue, got {other:?}"),
            }
        }
    }

    #[test]
    fn bounce_negative_velocity_pulls_negative() {
        let mut driver = AnimationDriver::new();
        let mut state = state_with_max(200);
        let token = driver.start_bounce(-800.0, 0);
        driver.tick(token, DT, &mut state);
        assert!(state.virtual_offset() < 0);
    }

    #[test]
    fn full_bounce_settles_back_to_rest() {
        let mut driver = AnimationDriver::new();
        let mut state = state_with_max(200);
        let mut token = driver.start_bounce(500.0, 0);
        let mut ticks = 0;
        loop {
            match driver.tick(token, DT, &mut state) {
                Tick::Continue(next) => token = next,
                Tick::Finished => break,
                Tick::Stale => panic!("unexpected stale tick"),
            }
            ticks += 1;
            assert!(ticks < 1000, "bounce+spring-back never settled");
        }
        assert!(state.is_at_rest());
        assert_eq!(state.actual_offset(), 0);
        assert_eq!(driver.phase(), AnimationPhase::Idle);
    }

    #[test]
    fn spring_back_writes_samples_directly() {
        let mut driver = AnimationDriver::new();
        let mut state = state_with_max(200);
        state.translate_to(150);
        let token = driver.start_spring_back(150).unwrap();

        let mut prev = 150;
        let mut ticks = 0;
        loop {
            match driver.tick(token, DT, &mut state) {
                Tick::Continue(_) => {}
                Tick::Finished => break,
                Tick::Stale => panic!("unexpected stale tick"),
            }
            let v = state.virtual_offset();
            assert!(v < prev || v == 0, "|offset| must shrink: {prev} -> {v}");
            assert!(v >= 0, "spring-back overshot zero");
            prev = v;
            ticks += 1;
            assert!(ticks < 100, "spring-back never converged");
        }
        assert_eq!(state.virtual_offset(), 0);
        assert_eq!(state.actual_offset(), 0);
        assert_eq!(driver.phase(), AnimationPhase::Idle);
    }

    #[test]
    fn spring_back_from_rest_is_refused() {
        let mut driver = AnimationDriver::new();
        assert!(driver.start_spring_back(0).is_none());
        assert_eq!(driver.phase(), AnimationPhase::Idle);
    }

    #[test]
    fn abort_leaves_offset_in_place() {
        let mut driver = AnimationDriver::new();
        let mut state = state_with_max(200);
        let token = driver.start_bounce(500.0, 0);
        driver.tick(token, DT, &mut state);
        let displaced = state.virtual_offset();
        assert_ne!(displaced, 0);

        driver.abort();
        assert_eq!(driver.phase(), AnimationPhase::Idle);
        assert_eq!(state.virtual_offset(), displaced);
    }

    #[test]
    fn stale_token_is_a_guarded_no_op() {
        let mut driver = AnimationDriver::new();
        let mut state = state_with_max(200);
        let old = driver.start_bounce(500.0, 0);
        driver.tick(old, DT, &mut state);
        let displaced = state.virtual_offset();

        // A new phase supersedes the bounce; its callback fires once more.
        let _new = driver.start_spring_back(displaced).unwrap();
        assert_eq!(driver.tick(old, DT, &mut state), Tick::Stale);
        assert_eq!(state.virtual_offset(), displaced);
        assert_eq!(driver.phase(), AnimationPhase::SpringBack);
    }

    #[test]
    fn abort_invalidates_outstanding_token() {
        let mut driver = AnimationDriver::new();
        let mut state = state_with_max(200);
        let token = driver.start_mock_fling(1000.0);
        driver.abort();
        assert_eq!(driver.tick(token, DT, &mut state), Tick::Stale);
    }

    #[test]
    fn zero_dt_keeps_the_phase_alive() {
        let mut driver = AnimationDriver::new();
        let mut state = state_with_max(200);
        let token = driver.start_bounce(500.0, 0);
        assert_eq!(driver.tick(token, 0, &mut state), Tick::Continue(token));
        assert_eq!(driver.phase(), AnimationPhase::BounceDecay);
        assert!(state.is_at_rest());
    }

    #[test]
    fn starting_a_phase_supersedes_the_previous_one() {
        let mut driver = AnimationDriver::new();
        let first = driver.start_mock_fling(1000.0);
        let second = driver.start_bounce(400.0, 0);
        assert_ne!(first, second);
        assert_eq!(driver.phase(), AnimationPhase::BounceDecay);
        assert_eq!(driver.frame_token(), Some(second));
    }
}
