//! Virtual/actual translation bookkeeping for the governed axis.
//!
//! `virtual` is the undamped accumulated displacement, the invertible
//! source of truth; `actual` is the damped value the host renders,
//! bounded by the maximum overscroll distance.

use rubberband_types::ScrollCapability;

use crate::damping;

/// Translation offset state for one axis.
#[derive(Debug, Clone, Default)]
pub struct TranslationState {
    virtual_offset: i32,
    actual_offset: i32,
    max_distance: i32,
}

impl TranslationState {
    /// State at rest with no overscroll room yet (no layout).
    pub fn new() -> Self {
        Self::default()
    }

    /// Undamped accumulated displacement.
    pub fn virtual_offset(&self) -> i32 {
        self.virtual_offset
    }

    /// Damped displacement the host renders.
    pub fn actual_offset(&self) -> i32 {
        self.actual_offset
    }

    /// Maximum rendered overscroll distance.
    pub fn max_distance(&self) -> i32 {
        self.max_distance
    }

    /// Whether the offset sits at the rest position.
    pub fn is_at_rest(&self) -> bool {
        self.virtual_offset == 0
    }

    /// Update the maximum overscroll distance (layout changed) and keep
    /// `actual == damp(virtual)` consistent. A collapsed layout
    /// (`max_distance <= 0`) resets the offset to rest. Returns whether
    /// anything the host renders changed.
    pub fn set_max_distance(&mut self, max_distance: i32) -> bool {
        self.max_distance = max_distance.max(0);
        if self.max_distance == 0 {
            return self.translate_to(0);
        }
        let actual = self.quantize(self.virtual_offset);
        if actual == self.actual_offset {
            return false;
        }
        self.actual_offset = actual;
        true
    }

    /// Apply a raw scroll delta and report how much of it this state
    /// consumed (so the caller does not also hand it to the child).
    ///
    /// The delta grows the overscroll when the child cannot advance in the
    /// delta's direction, recovers toward rest (clamped so it never
    /// crosses zero in one step) when the child can advance but the offset
    /// is displaced the other way, and passes through untouched otherwise.
    /// `consumed == old_virtual - new_virtual`.
    pub fn apply_delta(&mut self, delta: i32, capability: ScrollCapability) -> i32 {
        if delta == 0 || self.max_distance <= 0 {
            return 0;
        }

        let current = self.virtual_offset;
        let new = if delta < 0 {
            if !capability.backward {
                // Content pinned at the backward boundary: pull further out.
                current - delta
            } else if current < 0 {
                // Displaced the other way: recover, but never past rest.
                (current - delta).min(0)
            } else {
                current
            }
        } else if !capability.forward {
            current - delta
        } else if current > 0 {
            (current - delta).max(0)
        } else {
            current
        };

        if new != current {
            self.translate_to(new);
        }
        current - new
    }

    /// Write the virtual offset directly, bypassing delta consumption
    /// (animation phases use this). Returns true when the offset actually
    /// changed, the edge on which hosts re-render and observers fire.
    pub fn translate_to(&mut self, offset: i32) -> bool {
        if offset == self.virtual_offset {
            return false;
        }
        self.virtual_offset = offset;
        self.actual_offset = self.quantize(offset);
        log::trace!(
            "translate: virtual:{} actual:{}",
            self.virtual_offset,
            self.actual_offset
        );
        true
    }

    fn quantize(&self, offset: i32) -> i32 {
        damping::damp(f64::from(offset), f64::from(self.max_distance)).round() as i32
    }
}
