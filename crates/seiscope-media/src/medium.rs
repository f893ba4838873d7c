//! A single elastic layer over an elastic half-space.
//!
//! [`LayeredMedium`] is the input record for every Love-wave computation: a
//! top layer of thickness $H$ with shear velocity $\beta_1$ and density
//! $\rho_1$, resting on a half-space with $\beta_2$ and $\rho_2$, excited at
//! frequency $f$.
//!
//! Units follow the usual teaching convention: km, km/s, g/cm³ and Hz. Only
//! ratios of shear moduli enter the dispersion relation, so density units
//! cancel as long as both layers use the same one.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while building a medium.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MediumError {
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f64 },

    #[error("{name} must be finite, got {value}")]
    NonFinite { name: &'static str, value: f64 },

    #[error("frequency must be non-negative, got {0} Hz")]
    NegativeFrequency(f64),

    #[error(
        "half-space shear velocity ({half_space} km/s) must exceed the layer velocity \
         ({layer} km/s) for trapped Love modes to exist"
    )]
    NoTrappingBand { layer: f64, half_space: f64 },

    #[error("unknown medium preset '{0}'")]
    UnknownPreset(String),
}

/// Unvalidated medium parameters, as read from a configuration file.
///
/// Call [`MediumSpec::build`] to obtain a [`LayeredMedium`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MediumSpec {
    /// Layer thickness $H$ (km).
    pub thickness_km: f64,
    /// Shear velocity of the top layer $\beta_1$ (km/s).
    pub layer_velocity: f64,
    /// Shear velocity of the half-space $\beta_2$ (km/s).
    pub half_space_velocity: f64,
    /// Density of the top layer $\rho_1$ (g/cm³).
    pub layer_density: f64,
    /// Density of the half-space $\rho_2$ (g/cm³).
    pub half_space_density: f64,
    /// Excitation frequency $f$ (Hz).
    #[serde(default)]
    pub frequency_hz: f64,
}

impl MediumSpec {
    /// Validate the parameters and build an immutable medium.
    pub fn build(self) -> Result<LayeredMedium, MediumError> {
        LayeredMedium::new(
            self.thickness_km,
            self.layer_velocity,
            self.half_space_velocity,
            self.layer_density,
            self.half_space_density,
            self.frequency_hz,
        )
    }
}

/// A validated layer-over-half-space model.
///
/// Fields are private so that every instance satisfies the construction
/// checks: all lengths, velocities and densities are finite and positive,
/// the frequency is finite and non-negative, and $\beta_1 < \beta_2$.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MediumSpec", into = "MediumSpec")]
pub struct LayeredMedium {
    thickness: f64,
    beta1: f64,
    beta2: f64,
    rho1: f64,
    rho2: f64,
    frequency: f64,
}

impl LayeredMedium {
    /// Build a medium, validating every parameter.
    ///
    /// # Arguments
    /// * `thickness_km` - Layer thickness $H$.
    /// * `beta1`, `beta2` - Shear velocities of the layer and half-space (km/s).
    /// * `rho1`, `rho2` - Densities of the layer and half-space.
    /// * `frequency_hz` - Excitation frequency $f \ge 0$.
    pub fn new(
        thickness_km: f64,
        beta1: f64,
        beta2: f64,
        rho1: f64,
        rho2: f64,
        frequency_hz: f64,
    ) -> Result<Self, MediumError> {
        check_positive("layer thickness", thickness_km)?;
        check_positive("layer shear velocity", beta1)?;
        check_positive("half-space shear velocity", beta2)?;
        check_positive("layer density", rho1)?;
        check_positive("half-space density", rho2)?;

        if !frequency_hz.is_finite() {
            return Err(MediumError::NonFinite { name: "frequency", value: frequency_hz });
        }
        if frequency_hz < 0.0 {
            return Err(MediumError::NegativeFrequency(frequency_hz));
        }
        if beta2 <= beta1 {
            return Err(MediumError::NoTrappingBand { layer: beta1, half_space: beta2 });
        }

        Ok(Self {
            thickness: thickness_km,
            beta1,
            beta2,
            rho1,
            rho2,
            frequency: frequency_hz,
        })
    }

    /// Construct from constants already known to satisfy the checks in [`Self::new`].
    pub(crate) const fn from_trusted(
        thickness: f64,
        beta1: f64,
        beta2: f64,
        rho1: f64,
        rho2: f64,
        frequency: f64,
    ) -> Self {
        Self { thickness, beta1, beta2, rho1, rho2, frequency }
    }

    /// The same medium excited at a different frequency.
    pub fn with_frequency(&self, frequency_hz: f64) -> Result<Self, MediumError> {
        Self::new(
            self.thickness,
            self.beta1,
            self.beta2,
            self.rho1,
            self.rho2,
            frequency_hz,
        )
    }

    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    pub fn layer_velocity(&self) -> f64 {
        self.beta1
    }

    pub fn half_space_velocity(&self) -> f64 {
        self.beta2
    }

    pub fn layer_density(&self) -> f64 {
        self.rho1
    }

    pub fn half_space_density(&self) -> f64 {
        self.rho2
    }

    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    /// Angular frequency $\omega = 2\pi f$ (rad/s).
    pub fn omega(&self) -> f64 {
        2.0 * std::f64::consts::PI * self.frequency
    }

    /// Shear modulus of the layer, $\mu_1 = \rho_1 \beta_1^2$.
    pub fn shear_modulus_layer(&self) -> f64 {
        self.rho1 * self.beta1 * self.beta1
    }

    /// Shear modulus of the half-space, $\mu_2 = \rho_2 \beta_2^2$.
    pub fn shear_modulus_half_space(&self) -> f64 {
        self.rho2 * self.beta2 * self.beta2
    }

    /// Horizontal slowness band $(1/\beta_2, 1/\beta_1)$ of trapped modes (s/km).
    pub fn slowness_band(&self) -> (f64, f64) {
        (1.0 / self.beta2, 1.0 / self.beta1)
    }
}

impl TryFrom<MediumSpec> for LayeredMedium {
    type Error = MediumError;

    fn try_from(spec: MediumSpec) -> Result<Self, Self::Error> {
        spec.build()
    }
}

impl From<LayeredMedium> for MediumSpec {
    fn from(medium: LayeredMedium) -> Self {
        Self {
            thickness_km: medium.thickness,
            layer_velocity: medium.beta1,
            half_space_velocity: medium.beta2,
            layer_density: medium.rho1,
            half_space_density: medium.rho2,
            frequency_hz: medium.frequency,
        }
    }
}

fn check_positive(name: &'static str, value: f64) -> Result<(), MediumError> {
    if !value.is_finite() {
        return Err(MediumError::NonFinite { name, value });
    }
    if value <= 0.0 {
        return Err(MediumError::NonPositive { name, value });
    }
    Ok(())
}
