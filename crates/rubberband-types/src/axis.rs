//! Scroll axis selection.

use serde::{Deserialize, Serialize};

/// The single axis an overscroll controller governs.
///
/// Axes are mutually exclusive: a controller damps either horizontal or
/// vertical motion, never both. `None` accepts no scroll at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    None,
    Horizontal,
    #[default]
    Vertical,
}

impl Axis {
    /// Whether a nested-scroll start on `other` involves this axis.
    ///
    /// `None` never matches, including against itself.
    pub fn intersects(self, other: Axis) -> bool {
        self != Axis::None && self == other
    }
}
