//! rubberband-core: rubber-band overscroll for nested scrollable children.
//!
//! When a nested scrollable child reaches a content boundary, continued
//! drag or fling input is redirected into a damped translation away from
//! the rest position, followed by a spring-back animation once input ends.
//! The crate is host-agnostic: deltas and velocities arrive as already
//! resolved scalars, the host renders the actual offset and drives the
//! frame loop.

// Re-exports from rubberband-types (foundation types and traits).
pub use rubberband_types::axis;
pub use rubberband_types::capability;
pub use rubberband_types::config;
pub use rubberband_types::error;

pub mod controller;
pub mod damping;
pub mod driver;
pub mod integrator;
pub mod translation;

#[cfg(test)]
pub(crate) mod test_utils;

pub use controller::{OverscrollController, ScrollSource};
pub use driver::{AnimationDriver, AnimationPhase, FrameToken, Tick};
pub use integrator::FlingIntegrator;
pub use rubberband_types::{
    Axis, OverscrollConfig, Result, RubberbandError, ScrollCapability, ScrollChild,
};
pub use translation::TranslationState;
