//! The seam between the overscroll core and the host's scrollable child.
//!
//! The host implements [`ScrollChild`] on whatever handle reaches its list
//! or scroll widget; the core queries it before deciding whether a delta is
//! absorbed as overscroll or passed through.

use serde::{Deserialize, Serialize};

use crate::axis::Axis;

/// What the child's content can still do on one axis, sampled per step.
///
/// `forward` is the direction of growing content offset (down for a
/// vertical list, right for a horizontal one); `backward` the opposite.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrollCapability {
    /// Content can still advance in the positive (forward) direction.
    pub forward: bool,
    /// Content can still advance in the negative (backward) direction.
    pub backward: bool,
}

impl ScrollCapability {
    /// Capability of a child with scroll room in both directions.
    pub fn both() -> Self {
        Self {
            forward: true,
            backward: true,
        }
    }

    /// Capability of a child pinned at a boundary in every direction
    /// (content fits the viewport).
    pub fn neither() -> Self {
        Self {
            forward: false,
            backward: false,
        }
    }
}

/// A nested scrollable child, as seen from the overscroll controller.
pub trait ScrollChild {
    /// Scroll capability of the child's content on the given axis.
    fn capability(&self, axis: Axis) -> ScrollCapability;

    /// False once the child has been removed from the host hierarchy.
    /// Every controller operation degrades to a no-op while detached.
    fn is_attached(&self) -> bool {
        true
    }
}
