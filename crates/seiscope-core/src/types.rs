//! Core types shared across the Seiscope kernels.
//!
//! This module defines the data passed between pipeline stages: the modes
//! found by the root search, the grid layout used for field snapshots, and
//! the sampled displacement itself.

use ndarray::Array2;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::solver::love::dispersion::DispersionRelation;
use crate::solver::love::eigenfunction::Eigenfunction;

/// A single Love mode at a fixed frequency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mode {
    /// Mode number, 1 for the fundamental.
    pub index: usize,
    /// Phase velocity $c$ (km/s), strictly inside $(\beta_1, \beta_2)$.
    pub phase_velocity: f64,
    /// Horizontal slowness $p = 1/c$ (s/km).
    pub slowness: f64,
    /// $|F(1/c)|$ at the accepted root.
    pub residual: f64,
}

impl Mode {
    /// Depth-dependent eigenfunction of this mode in the given medium.
    ///
    /// `relation` must be built from the medium the mode was found in.
    pub fn eigenfunction(&self, relation: &DispersionRelation) -> Eigenfunction {
        Eigenfunction::new(relation, self.phase_velocity)
    }
}

/// Why a bracketed root was discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectionReason {
    /// $|F|$ above the residual tolerance (e.g. a sign change across a singularity).
    ResidualTooLarge,
    /// $|\operatorname{Im} F|$ above the imaginary tolerance.
    ImaginaryResidual,
    /// Phase velocity not strictly inside $(\beta_1, \beta_2)$.
    OutsideBand,
}

/// A candidate root that failed verification. Reported, never fatal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RejectedRoot {
    pub phase_velocity: f64,
    pub residual: Complex64,
    pub reason: RejectionReason,
}

/// All trapped modes found at one frequency, ordered by ascending phase velocity.
///
/// An empty set is a valid outcome (e.g. zero frequency).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeSet {
    /// Frequency (Hz) at which the modes were computed.
    pub frequency_hz: f64,
    /// Accepted modes; `modes[i].index == i + 1`.
    pub modes: Vec<Mode>,
    /// Candidates discarded during verification.
    #[serde(default)]
    pub rejected: Vec<RejectedRoot>,
}

impl ModeSet {
    pub fn empty(frequency_hz: f64) -> Self {
        Self {
            frequency_hz,
            modes: Vec::new(),
            rejected: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.modes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }

    /// Look up a mode by its 1-based index.
    pub fn get(&self, index: usize) -> Option<&Mode> {
        index.checked_sub(1).and_then(|i| self.modes.get(i))
    }

    /// The fundamental mode, if any.
    pub fn fundamental(&self) -> Option<&Mode> {
        self.modes.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Mode> {
        self.modes.iter()
    }

    /// `(index, phase_velocity)` pairs in mode order.
    pub fn phase_velocities(&self) -> Vec<(usize, f64)> {
        self.modes.iter().map(|m| (m.index, m.phase_velocity)).collect()
    }
}

/// Sampling layout for a displacement snapshot.
///
/// Depth $z$ is measured downward from the free surface. The layer is sampled
/// on $[0, H]$ and the half-space on $[H, H + \text{half\_space\_depth}]$, so
/// both grids contain the interface row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldGrid {
    /// Horizontal extent $[0, x_{\max}]$ (km).
    pub x_max: f64,
    /// Number of horizontal samples.
    pub nx: usize,
    /// Number of depth samples in the layer.
    pub nz_layer: usize,
    /// Depth of half-space shown below the interface (km).
    pub half_space_depth: f64,
    /// Number of depth samples in the half-space.
    pub nz_half_space: usize,
}

impl Default for FieldGrid {
    fn default() -> Self {
        Self {
            x_max: 400.0,
            nx: 100,
            nz_layer: 50,
            half_space_depth: 100.0,
            nz_half_space: 50,
        }
    }
}

/// Superposed SH displacement on a [`FieldGrid`] at one instant.
///
/// Both arrays are indexed `[depth, distance]`.
#[derive(Debug, Clone)]
pub struct DisplacementGrid {
    /// Time of the snapshot (s).
    pub time: f64,
    /// Horizontal sample positions (km).
    pub x: Vec<f64>,
    /// Layer depths (km), from 0 to H.
    pub z_layer: Vec<f64>,
    /// Half-space depths (km), from H downward.
    pub z_half_space: Vec<f64>,
    /// Displacement in the layer, shape `(nz_layer, nx)`.
    pub layer: Array2<f64>,
    /// Displacement in the half-space, shape `(nz_half_space, nx)`.
    pub half_space: Array2<f64>,
    /// Indices of the superposed modes.
    pub modes: Vec<usize>,
}

impl DisplacementGrid {
    /// Largest absolute displacement over both grids, for symmetric colour scales.
    pub fn max_abs(&self) -> f64 {
        self.layer
            .iter()
            .chain(self.half_space.iter())
            .map(|v| v.abs())
            .fold(0.0_f64, f64::max)
    }
}
