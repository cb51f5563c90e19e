//! Shared test utilities for rubberband-core tests.
//!
//! Provides a [`MockChild`] whose scroll capability and attachment are
//! flipped from the test through a shared handle while the controller
//! owns the child.

use std::cell::Cell;
use std::rc::Rc;

use rubberband_types::{Axis, ScrollCapability, ScrollChild};

#[derive(Debug)]
struct MockChildState {
    forward: Cell<bool>,
    backward: Cell<bool>,
    attached: Cell<bool>,
    capability_queries: Cell<usize>,
}

/// A scroll child controlled by the test via [`MockChildHandle`].
#[derive(Debug)]
pub struct MockChild {
    state: Rc<MockChildState>,
}

/// Test-side handle to a [`MockChild`] owned elsewhere.
#[derive(Clone)]
pub struct MockChildHandle {
    state: Rc<MockChildState>,
}

impl MockChild {
    /// A child with the given scroll room, attached.
    pub fn new(forward: bool, backward: bool) -> (Self, MockChildHandle) {
        let state = Rc::new(MockChildState {
            forward: Cell::new(forward),
            backward: Cell::new(backward),
            attached: Cell::new(true),
            capability_queries: Cell::new(0),
        });
        (
            Self {
                state: Rc::clone(&state),
            },
            MockChildHandle { state },
        )
    }

    /// A child at its backward boundary (e.g. a list at the top).
    pub fn at_backward_boundary() -> (Self, MockChildHandle) {
        Self::new(true, false)
    }

    /// A child with room in both directions.
    pub fn scrollable() -> (Self, MockChildHandle) {
        Self::new(true, true)
    }
}

impl MockChildHandle {
    pub fn set_capability(&self, forward: bool, backward: bool) {
        self.state.forward.set(forward);
        self.state.backward.set(backward);
    }

    pub fn detach(&self) {
        self.state.attached.set(false);
    }

    #[allow(dead_code)]
    pub fn reattach(&self) {
        self.state.attached.set(true);
    }

    /// How many times the controller sampled the capability.
    pub fn capability_queries(&self) -> usize {
        self.state.capability_queries.get()
    }
}

impl ScrollChild for MockChild {
    fn capability(&self, _axis: Axis) -> ScrollCapability {
        self.state
            .capability_queries
            .set(self.state.capability_queries.get() + 1);
        ScrollCapability {
            forward: self.state.forward.get(),
            backward: self.state.backward.get(),
        }
    }

    fn is_attached(&self) -> bool {
        self.state.attached.get()
    }
}
