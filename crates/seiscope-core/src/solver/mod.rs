//! Surface-wave solver abstraction and implementations.
//!
//! The [`SurfaceWaveSolver`] trait is the seam between a medium and the
//! modes and wavefields it supports. Love waves in a layer over a half-space
//! are the implemented case.

pub mod love;

use seiscope_media::{LayeredMedium, MediumError};
use thiserror::Error;

use crate::types::{DisplacementGrid, FieldGrid, ModeSet};

/// Errors from the numerical kernels.
#[derive(Debug, Error)]
pub enum SolverError {
    #[error("Invalid medium: {0}")]
    Configuration(#[from] MediumError),

    #[error("Mode {index} not found (mode set holds {available} mode(s))")]
    UnknownMode { index: usize, available: usize },

    #[error("Mode set was computed at {modes_hz} Hz but the medium is excited at {medium_hz} Hz")]
    FrequencyMismatch { modes_hz: f64, medium_hz: f64 },

    #[error("Invalid grid: {0}")]
    InvalidGrid(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Interface shared by surface-wave solvers.
pub trait SurfaceWaveSolver {
    /// Find all trapped modes of `medium` at its excitation frequency.
    fn find_modes(&self, medium: &LayeredMedium) -> Result<ModeSet, SolverError>;

    /// Superpose the modes listed in `selection` (1-based indices into
    /// `modes`) on `grid` at time `time`.
    fn displacement_field(
        &self,
        medium: &LayeredMedium,
        modes: &ModeSet,
        selection: &[usize],
        grid: &FieldGrid,
        time: f64,
    ) -> Result<DisplacementGrid, SolverError>;

    /// Human-readable name of the solver.
    fn method_name(&self) -> &str;
}
