//! Named layer-over-half-space models used in the teaching material.
//!
//! | Identifier | H (km) | β₁ / β₂ (km/s) | ρ₁ / ρ₂ (g/cm³) | f (Hz) |
//! |------------|--------|----------------|-----------------|--------|
//! | `crust_over_mantle` | 35 | 3.5 / 4.5 | 2.6 / 3.4 | 0.08 |
//! | `oceanic_crust` | 7 | 3.7 / 4.6 | 2.9 / 3.3 | 0.1 |
//! | `sediment_over_bedrock` | 0.05 | 0.3 / 1.5 | 1.8 / 2.5 | 5.0 |
//!
//! At 0.08 Hz the continental model supports the fundamental mode and, just
//! above its cutoff, the first higher mode.

use crate::medium::{LayeredMedium, MediumError};

/// Identifiers accepted by [`preset`].
pub const PRESET_IDS: [&str; 3] = ["crust_over_mantle", "oceanic_crust", "sediment_over_bedrock"];

/// Continental crust over upper mantle.
pub fn crust_over_mantle() -> LayeredMedium {
    LayeredMedium::from_trusted(35.0, 3.5, 4.5, 2.6, 3.4, 0.08)
}

/// Thin oceanic crust over mantle.
pub fn oceanic_crust() -> LayeredMedium {
    LayeredMedium::from_trusted(7.0, 3.7, 4.6, 2.9, 3.3, 0.1)
}

/// Soft sediment over bedrock, an engineering-scale site model.
pub fn sediment_over_bedrock() -> LayeredMedium {
    LayeredMedium::from_trusted(0.05, 0.3, 1.5, 1.8, 2.5, 5.0)
}

/// Look up a preset by identifier.
pub fn preset(id: &str) -> Result<LayeredMedium, MediumError> {
    match id {
        "crust_over_mantle" => Ok(crust_over_mantle()),
        "oceanic_crust" => Ok(oceanic_crust()),
        "sediment_over_bedrock" => Ok(sediment_over_bedrock()),
        other => Err(MediumError::UnknownPreset(other.to_string())),
    }
}
