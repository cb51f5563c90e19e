//! Foundation types for the rubberband overscroll library.
//!
//! This crate contains the host-agnostic types shared by the rubberband
//! crates: the scroll axis, the scroll-child seam trait, configuration,
//! and error types. The physics core never sees raw platform input.

pub mod axis;
pub mod capability;
pub mod config;
pub mod error;

pub use axis::Axis;
pub use capability::{ScrollCapability, ScrollChild};
pub use config::OverscrollConfig;
pub use error::{Result, RubberbandError};
