//! Displacement snapshots from a set of Love modes.
//!
//! The SH wave equation is linear, so the field of several modes is the sum
//! of their individual eigenfunctions:
//!
//! $$
//! u(x, z, t) = \sum_{n \in S} u^{(n)}(x, z, t).
//! $$

use log::debug;
use ndarray::Array2;

use crate::solver::love::dispersion::DispersionRelation;
use crate::solver::love::eigenfunction::Eigenfunction;
use crate::solver::SolverError;
use crate::types::{DisplacementGrid, FieldGrid, ModeSet};

/// `n` evenly spaced values from `start` to `end` inclusive (`[start]` if `n == 1`).
fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    let step = if n > 1 { (end - start) / (n - 1) as f64 } else { 0.0 };
    (0..n).map(|i| start + step * i as f64).collect()
}

fn validate_grid(grid: &FieldGrid) -> Result<(), SolverError> {
    if grid.nx == 0 || grid.nz_layer == 0 || grid.nz_half_space == 0 {
        return Err(SolverError::InvalidGrid(format!(
            "sample counts must be positive (nx={}, nz_layer={}, nz_half_space={})",
            grid.nx, grid.nz_layer, grid.nz_half_space
        )));
    }
    if !(grid.x_max >= 0.0 && grid.x_max.is_finite()) {
        return Err(SolverError::InvalidGrid(format!(
            "x_max must be non-negative and finite, got {}",
            grid.x_max
        )));
    }
    if !(grid.half_space_depth > 0.0 && grid.half_space_depth.is_finite()) {
        return Err(SolverError::InvalidGrid(format!(
            "half_space_depth must be positive and finite, got {}",
            grid.half_space_depth
        )));
    }
    Ok(())
}

/// Evaluate the superposed displacement of the selected modes.
///
/// # Arguments
/// * `relation` - Dispersion relation of the medium the modes belong to.
/// * `modes` - Mode set from the root search.
/// * `selection` - 1-based mode indices to superpose; duplicates are ignored.
///   An empty selection yields zero grids.
/// * `grid` - Sampling layout.
/// * `time` - Snapshot time (s).
///
/// # Errors
/// [`SolverError::FrequencyMismatch`] if `modes` was found at another
/// frequency than `relation`, [`SolverError::UnknownMode`] for an index not
/// in `modes`, [`SolverError::InvalidGrid`] for an unusable layout.
pub fn compute_displacement(
    relation: &DispersionRelation,
    modes: &ModeSet,
    selection: &[usize],
    grid: &FieldGrid,
    time: f64,
) -> Result<DisplacementGrid, SolverError> {
    let relation_hz = relation.omega() / (2.0 * std::f64::consts::PI);
    let scale = relation_hz.abs().max(modes.frequency_hz.abs()).max(f64::MIN_POSITIVE);
    if (relation_hz - modes.frequency_hz).abs() > 1e-12 * scale {
        return Err(SolverError::FrequencyMismatch {
            modes_hz: modes.frequency_hz,
            medium_hz: relation_hz,
        });
    }
    validate_grid(grid)?;
    if !time.is_finite() {
        return Err(SolverError::InvalidInput(format!("time must be finite, got {}", time)));
    }

    let mut indices = selection.to_vec();
    indices.sort_unstable();
    indices.dedup();

    let eigenfunctions: Vec<Eigenfunction> = indices
        .iter()
        .map(|&index| {
            modes
                .get(index)
                .map(|mode| mode.eigenfunction(relation))
                .ok_or(SolverError::UnknownMode { index, available: modes.len() })
        })
        .collect::<Result<_, _>>()?;

    let h = relation.thickness();
    let x = linspace(0.0, grid.x_max, grid.nx);
    let z_layer = linspace(0.0, h, grid.nz_layer);
    let z_half_space = linspace(h, h + grid.half_space_depth, grid.nz_half_space);

    let mut layer = Array2::<f64>::zeros((grid.nz_layer, grid.nx));
    let mut half_space = Array2::<f64>::zeros((grid.nz_half_space, grid.nx));

    for ef in &eigenfunctions {
        // Profiles depend only on depth and the phase only on x, so the
        // complex factors are computed once per row and column.
        let phases: Vec<_> = x.iter().map(|&xi| ef.phase(xi, time)).collect();

        for (k, &z) in z_layer.iter().enumerate() {
            let profile = ef.layer_profile(z);
            for (i, phase) in phases.iter().enumerate() {
                layer[[k, i]] += (profile * phase).re;
            }
        }
        for (k, &z) in z_half_space.iter().enumerate() {
            let profile = ef.half_space_profile(z);
            for (i, phase) in phases.iter().enumerate() {
                half_space[[k, i]] += (profile * phase).re;
            }
        }
    }

    debug!(
        "displacement snapshot t={:.3} s: modes {:?} on {}x({}+{}) samples",
        time, indices, grid.nx, grid.nz_layer, grid.nz_half_space
    );

    Ok(DisplacementGrid {
        time,
        x,
        z_layer,
        z_half_space,
        layer,
        half_space,
        modes: indices,
    })
}
