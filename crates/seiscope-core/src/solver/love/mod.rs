//! Love waves in a single layer over a half-space.
//!
//! The pipeline is
//! [`LayeredMedium`] → [`DispersionRelation`](dispersion::DispersionRelation)
//! → [`find_modes`](roots::find_modes) → [`ModeSet`] →
//! [`compute_displacement`](crate::fields::compute_displacement).
//!
//! Every stage is a pure function of its inputs; rebuilding after a parameter
//! change means calling the stages again.

pub mod dispersion;
pub mod eigenfunction;
pub mod roots;

use log::debug;
use seiscope_media::LayeredMedium;

use self::dispersion::DispersionRelation;
use self::roots::SearchParams;
use super::{SolverError, SurfaceWaveSolver};
use crate::types::{DisplacementGrid, FieldGrid, ModeSet};

/// Love-wave solver, holding the root-search configuration.
#[derive(Debug, Clone, Default)]
pub struct LoveSolver {
    pub search: SearchParams,
}

impl LoveSolver {
    pub fn new(search: SearchParams) -> Self {
        Self { search }
    }
}

impl SurfaceWaveSolver for LoveSolver {
    fn find_modes(&self, medium: &LayeredMedium) -> Result<ModeSet, SolverError> {
        let relation = DispersionRelation::new(medium);
        let modes = roots::find_modes(&relation, &self.search)?;
        debug!(
            "{}: {} mode(s) at {:.4} Hz",
            self.method_name(),
            modes.len(),
            medium.frequency()
        );
        Ok(modes)
    }

    fn displacement_field(
        &self,
        medium: &LayeredMedium,
        modes: &ModeSet,
        selection: &[usize],
        grid: &FieldGrid,
        time: f64,
    ) -> Result<DisplacementGrid, SolverError> {
        let relation = DispersionRelation::new(medium);
        crate::fields::compute_displacement(&relation, modes, selection, grid, time)
    }

    fn method_name(&self) -> &str {
        "Love waves (layer over half-space)"
    }
}
