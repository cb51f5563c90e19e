//! The nested-scroll protocol adapter.
//!
//! [`OverscrollController`] sits between a host container and its nested
//! scrollable child: per scroll or fling event it decides how much the
//! overscroll core consumes and what flows through to the child, and on
//! release it sequences the bounce and spring-back animations. The host
//! renders [`actual_offset`](OverscrollController::actual_offset) and
//! drives [`tick`](OverscrollController::tick) from its frame scheduler
//! while [`frame_token`](OverscrollController::frame_token) is `Some`.

use rubberband_types::{Axis, OverscrollConfig, Result, RubberbandError, ScrollChild};

use crate::driver::{AnimationDriver, AnimationPhase, FrameToken, Tick};
use crate::translation::TranslationState;

/// Where a scroll stream originates. Touch streams damp through the
/// consumption algorithm; fling streams only steer the animation phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollSource {
    Touch,
    Fling,
}

/// Observer of offset changes: `(axis, virtual, actual)`, fired
/// synchronously from whichever call changed the offset.
pub type OverscrollListener = Box<dyn FnMut(Axis, i32, i32)>;

/// Rubber-band overscroll controller for one nested scrollable child.
pub struct OverscrollController<C: ScrollChild> {
    axis: Axis,
    distance_factor: f32,
    min_fling_velocity: f64,
    viewport_extent: u32,
    child: C,
    state: TranslationState,
    driver: AnimationDriver,
    listeners: Vec<OverscrollListener>,
    touch_active: bool,
    fling_active: bool,
}

impl<C: ScrollChild + std::fmt::Debug> std::fmt::Debug for OverscrollController<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverscrollController")
            .field("axis", &self.axis)
            .field("distance_factor", &self.distance_factor)
            .field("min_fling_velocity", &self.min_fling_velocity)
            .field("viewport_extent", &self.viewport_extent)
            .field("child", &self.child)
            .field("state", &self.state)
            .field("driver", &self.driver)
            .field("listeners", &self.listeners.len())
            .field("touch_active", &self.touch_active)
            .field("fling_active", &self.fling_active)
            .finish()
    }
}

impl<C: ScrollChild> OverscrollController<C> {
    /// Build a controller over a designated scroll child.
    ///
    /// Rejects invalid configuration and a child that is already
    /// detached; both are fatal setup errors, not silently repaired.
    pub fn new(config: OverscrollConfig, child: C) -> Result<Self> {
        config.validate()?;
        if !child.is_attached() {
            return Err(RubberbandError::Setup(
                "designated scroll child is detached".into(),
            ));
        }
        Ok(Self {
            axis: config.axis,
            distance_factor: config.overscroll_distance_factor,
            min_fling_velocity: config.min_fling_velocity,
            viewport_extent: 0,
            child,
            state: TranslationState::new(),
            driver: AnimationDriver::new(),
            listeners: Vec::new(),
            touch_active: false,
            fling_active: false,
        })
    }

    /// The governed axis.
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Undamped accumulated displacement.
    pub fn virtual_offset(&self) -> i32 {
        self.state.virtual_offset()
    }

    /// Damped displacement for the host to render.
    pub fn actual_offset(&self) -> i32 {
        self.state.actual_offset()
    }

    /// Current maximum rendered overscroll distance.
    pub fn max_overscroll_distance(&self) -> i32 {
        self.state.max_distance()
    }

    /// Active animation phase.
    pub fn phase(&self) -> AnimationPhase {
        self.driver.phase()
    }

    /// Token for the next animation frame, while one is wanted.
    pub fn frame_token(&self) -> Option<FrameToken> {
        self.driver.frame_token()
    }

    /// Register an offset observer.
    pub fn add_overscroll_listener(&mut self, listener: impl FnMut(Axis, i32, i32) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// The host's viewport extent on the governed axis changed (layout).
    /// Recomputes the maximum overscroll distance.
    pub fn set_viewport_extent(&mut self, extent: u32) {
        self.viewport_extent = extent;
        self.recompute_max_distance();
    }

    /// Switch the governed axis, recomputing the overscroll distance.
    pub fn set_axis(&mut self, axis: Axis) {
        self.axis = axis;
        self.recompute_max_distance();
    }

    /// Change the distance factor. Negative values are rejected at the
    /// boundary, never clamped.
    pub fn set_overscroll_distance_factor(&mut self, factor: f32) -> Result<()> {
        if factor < 0.0 {
            return Err(RubberbandError::Config(format!(
                "factor cannot be negative: {factor}"
            )));
        }
        if (factor - self.distance_factor).abs() > f32::EPSILON {
            self.distance_factor = factor;
            self.recompute_max_distance();
        }
        Ok(())
    }

    /// A nested scroll stream starts. Returns whether this controller
    /// participates. A touch stream aborts any running animation
    /// unconditionally, leaving the offset where it is.
    pub fn start_scroll(&mut self, axes: Axis, source: ScrollSource) -> bool {
        if !self.child.is_attached() {
            return false;
        }
        let accepted = self.axis.intersects(axes);
        log::debug!("start scroll: axes:{axes:?} source:{source:?} accepted:{accepted}");
        if accepted {
            match source {
                ScrollSource::Touch => {
                    self.touch_active = true;
                    self.driver.abort();
                }
                ScrollSource::Fling => self.fling_active = true,
            }
        }
        accepted
    }

    /// A delta is about to reach the child. Returns how much this
    /// controller consumed (recovery toward rest happens here, before
    /// the child scrolls).
    pub fn on_pre_scroll(&mut self, delta: i32, source: ScrollSource) -> i32 {
        self.consume(delta, source)
    }

    /// The child scrolled and left `unconsumed` behind. Touch remainders
    /// grow the overscroll; a fling remainder at the boundary converts a
    /// live mock fling into a bounce.
    pub fn on_post_scroll(&mut self, unconsumed: i32, source: ScrollSource) -> i32 {
        match source {
            ScrollSource::Touch => self.consume(unconsumed, source),
            ScrollSource::Fling => {
                if unconsumed != 0 && self.child.is_attached() {
                    self.bounce_from_mock_fling();
                }
                0
            }
        }
    }

    /// The child is about to fling. Intercepts (returns true, starting
    /// the spring-back) exactly when the offset is displaced, so the
    /// child never flings out of an overscrolled position.
    pub fn on_pre_fling(&mut self, velocity: f64) -> bool {
        if !self.child.is_attached() {
            return false;
        }
        log::debug!(
            "pre-fling: velocity:{velocity} virtual:{}",
            self.state.virtual_offset()
        );
        self.spring_back()
    }

    /// The child flung. When it consumed the fling itself, replay the
    /// velocity as a mock fling so a later boundary hit still knows how
    /// fast the content was moving. The sign flips: translation opposes
    /// the scroll direction.
    pub fn on_fling(&mut self, velocity: f64, consumed_by_child: bool) {
        if !self.child.is_attached() {
            return;
        }
        log::debug!("fling: velocity:{velocity} consumed:{consumed_by_child}");
        if consumed_by_child {
            self.driver.start_mock_fling(-velocity);
        }
    }

    /// A scroll stream stopped. Once every stream is gone and the offset
    /// is displaced, ease it back to rest.
    pub fn stop_scroll(&mut self, source: ScrollSource) {
        if !self.child.is_attached() {
            return;
        }
        match source {
            ScrollSource::Touch => self.touch_active = false,
            ScrollSource::Fling => self.fling_active = false,
        }
        log::debug!(
            "stop scroll: source:{source:?} touch:{} fling:{} virtual:{}",
            self.touch_active,
            self.fling_active,
            self.state.virtual_offset()
        );
        if !self.touch_active && !self.fling_active {
            self.spring_back();
        }
    }

    /// Advance the active animation phase by `dt_ms`. The host calls
    /// this from its frame callback with the token it was handed;
    /// superseded callbacks no-op as [`Tick::Stale`].
    pub fn tick(&mut self, token: FrameToken, dt_ms: u32) -> Tick {
        if !self.child.is_attached() {
            self.driver.abort();
            return Tick::Finished;
        }
        let before = (self.state.virtual_offset(), self.state.actual_offset());
        let tick = self.driver.tick(token, dt_ms, &mut self.state);
        self.notify_if_changed(before);
        tick
    }

    fn consume(&mut self, delta: i32, source: ScrollSource) -> i32 {
        // Fling deltas never damp directly; they only matter once the
        // child reports a boundary hit in on_post_scroll.
        if source == ScrollSource::Fling || !self.child.is_attached() {
            return 0;
        }
        let capability = self.child.capability(self.axis);
        let before = (self.state.virtual_offset(), self.state.actual_offset());
        let consumed = self.state.apply_delta(delta, capability);
        self.notify_if_changed(before);
        log::trace!("consume: delta:{delta} consumed:{consumed}");
        consumed
    }

    /// A fling the child consumed has hit its boundary: capture the
    /// decayed velocity estimate and, if it is still a real fling,
    /// convert it into a bounce.
    fn bounce_from_mock_fling(&mut self) {
        if self.driver.phase() != AnimationPhase::MockFling {
            return;
        }
        let velocity = self.driver.mock_fling_velocity().unwrap_or(0.0);
        self.driver.abort();
        if velocity.abs() >= self.min_fling_velocity {
            self.driver.start_bounce(velocity, self.state.virtual_offset());
        }
    }

    fn spring_back(&mut self) -> bool {
        self.driver
            .start_spring_back(self.state.virtual_offset())
            .is_some()
    }

    fn recompute_max_distance(&mut self) {
        let max_distance = match self.axis {
            Axis::None => 0,
            Axis::Horizontal | Axis::Vertical => {
                (self.viewport_extent as f32 * self.distance_factor) as i32
            }
        };
        log::debug!("max overscroll distance: {max_distance}");
        let before = (self.state.virtual_offset(), self.state.actual_offset());
        self.state.set_max_distance(max_distance);
        self.notify_if_changed(before);
    }

    fn notify_if_changed(&mut self, before: (i32, i32)) {
        let after = (self.state.virtual_offset(), self.state.actual_offset());
        if after != before {
            for listener in &mut self.listeners {
                listener(self.axis, after.0, after.1);
            }
        }
    }
}
