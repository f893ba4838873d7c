//! Study runner: ties medium, mode search and field evaluation together.
//!
//! Recomputation is always an explicit call. Changing a parameter means
//! building a new [`LayeredMedium`] and running the stages again.

use log::info;
use seiscope_media::LayeredMedium;

use crate::config::StudyConfig;
use crate::solver::love::roots::SearchParams;
use crate::solver::love::LoveSolver;
use crate::solver::{SolverError, SurfaceWaveSolver};
use crate::types::{DisplacementGrid, ModeSet};

/// Results of one study run.
#[derive(Debug, Clone)]
pub struct StudyOutput {
    pub medium: LayeredMedium,
    pub modes: ModeSet,
    /// Present when the configuration asks for a snapshot.
    pub displacement: Option<DisplacementGrid>,
}

/// Run a study from a parsed configuration.
pub fn run_study(config: &StudyConfig) -> Result<StudyOutput, SolverError> {
    let medium = config.medium.build()?;
    let solver = LoveSolver::new(config.search);

    info!(
        "{}: H={} km, beta1={} km/s, beta2={} km/s, f={} Hz",
        solver.method_name(),
        medium.thickness(),
        medium.layer_velocity(),
        medium.half_space_velocity(),
        medium.frequency()
    );

    let modes = solver.find_modes(&medium)?;
    for mode in modes.iter() {
        info!("  mode {}: c = {:.6} km/s", mode.index, mode.phase_velocity);
    }
    if !modes.rejected.is_empty() {
        info!("  {} candidate root(s) rejected", modes.rejected.len());
    }

    let displacement = match &config.field {
        Some(field) => {
            let selection: Vec<usize> = if field.modes.is_empty() {
                modes.iter().map(|m| m.index).collect()
            } else {
                field.modes.clone()
            };
            let grid = solver.displacement_field(&medium, &modes, &selection, &field.grid(), field.time)?;
            info!(
                "  displacement snapshot at t={} s, max |u| = {:.3e}",
                grid.time,
                grid.max_abs()
            );
            Some(grid)
        }
        None => None,
    };

    Ok(StudyOutput { medium, modes, displacement })
}

/// Mode sets of `medium` at each frequency in `frequencies` (Hz).
///
/// The phase velocity of mode *n* across the returned sets is its
/// dispersion curve; a mode first appears above its cutoff frequency.
pub fn dispersion_curves(
    medium: &LayeredMedium,
    frequencies: &[f64],
    search: &SearchParams,
) -> Result<Vec<ModeSet>, SolverError> {
    let solver = LoveSolver::new(*search);
    let sets = frequencies
        .iter()
        .map(|&f| {
            let excited = medium.with_frequency(f)?;
            solver.find_modes(&excited)
        })
        .collect::<Result<Vec<_>, _>>()?;

    info!(
        "dispersion sweep: {} frequencies, up to {} mode(s)",
        sets.len(),
        sets.iter().map(ModeSet::len).max().unwrap_or(0)
    );
    Ok(sets)
}
