//! # Seiscope Media
//!
//! Elastic media for the Seiscope kernels. Every computation starts from a
//! [`LayeredMedium`](medium::LayeredMedium): one homogeneous layer over a
//! homogeneous half-space, validated once at construction so that
//! downstream code can assume positive parameters and a non-empty trapping
//! band $\beta_1 < c < \beta_2$.
//!
//! ## Modules
//!
//! - [`medium`] — The validated medium record and its error type.
//! - [`presets`] — Named crust, ocean and site models.

pub mod medium;
pub mod presets;

pub use medium::{LayeredMedium, MediumError, MediumSpec};
