//! # Seiscope Core
//!
//! Numerical kernels behind the Seiscope seismology visualisations: Love-wave
//! dispersion in a layer over a half-space, and far-field radiation from a
//! moment-tensor source.
//!
//! ## Architecture
//!
//! Surface-wave solvers implement [`solver::SurfaceWaveSolver`], which finds
//! the trapped modes of a [`seiscope_media::LayeredMedium`] and evaluates
//! their superposed displacement. The Love-wave implementation
//! ([`solver::love::LoveSolver`]) follows the pipeline
//!
//! ```text
//! LayeredMedium → DispersionRelation → find_modes → ModeSet → compute_displacement
//! ```
//!
//! All stages are deterministic pure functions.
//!
//! ## Modules
//!
//! - [`types`] — Modes, mode sets and displacement grids.
//! - [`solver`] — Solver trait and the Love-wave dispersion, root search and eigenfunctions.
//! - [`fields`] — Displacement snapshots on a regular grid.
//! - [`radiation`] — Moment-tensor P/S radiation patterns.
//! - [`config`] — TOML study configuration.
//! - [`study`] — Study runner and dispersion sweeps.

pub mod config;
pub mod fields;
pub mod radiation;
pub mod solver;
pub mod study;
pub mod types;
