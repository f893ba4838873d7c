//! SH displacement of a single Love mode.
//!
//! For a mode with phase velocity $c$ ($p = 1/c$):
//!
//! $$
//! u_1(x, z, t) = \operatorname{Re}\left[\left(e^{-\omega\eta_1 z} + e^{\omega\eta_1 z}\right)
//!   e^{i\omega(t - x/c)}\right], \qquad 0 \le z \le H,
//! $$
//!
//! $$
//! u_2(x, z, t) = \operatorname{Re}\left[\hat A_2^{(\tau)} e^{-\omega\eta_2 (z - H)}
//!   e^{i\omega(t - x/c)}\right], \qquad z \ge H,
//! $$
//!
//! with unit layer amplitudes and $\hat A_2^{(\tau)}$ from traction continuity.

use num_complex::Complex64;

use super::dispersion::DispersionRelation;

/// Evaluates one mode's displacement at arbitrary $(x, z, t)$.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Eigenfunction {
    omega: f64,
    thickness: f64,
    phase_velocity: f64,
    eta1: Complex64,
    eta2: Complex64,
    interface_amplitude: Complex64,
}

impl Eigenfunction {
    /// Build the eigenfunction at phase velocity `c` using the same
    /// $\mu_1, \mu_2, H, \omega$ as `relation`.
    pub fn new(relation: &DispersionRelation, c: f64) -> Self {
        let p = 1.0 / c;
        Self {
            omega: relation.omega(),
            thickness: relation.thickness(),
            phase_velocity: c,
            eta1: relation.layer_slowness(p),
            eta2: relation.half_space_slowness(p),
            interface_amplitude: relation.traction_amplitude(p),
        }
    }

    pub fn phase_velocity(&self) -> f64 {
        self.phase_velocity
    }

    /// Half-space amplitude at the interface, $\hat A_2^{(\tau)}$.
    pub fn interface_amplitude(&self) -> Complex64 {
        self.interface_amplitude
    }

    /// Complex depth profile in the layer ($0 \le z \le H$).
    pub fn layer_profile(&self, z: f64) -> Complex64 {
        let arg = self.omega * self.eta1 * z;
        (-arg).exp() + arg.exp()
    }

    /// Complex depth profile in the half-space ($z \ge H$).
    pub fn half_space_profile(&self, z: f64) -> Complex64 {
        self.interface_amplitude * (-self.omega * self.eta2 * (z - self.thickness)).exp()
    }

    /// Horizontal travelling-wave factor $e^{i\omega(t - x/c)}$.
    pub fn phase(&self, x: f64, t: f64) -> Complex64 {
        Complex64::new(0.0, self.omega * (t - x / self.phase_velocity)).exp()
    }

    /// Observable displacement in the layer.
    pub fn layer_displacement(&self, x: f64, z: f64, t: f64) -> f64 {
        (self.layer_profile(z) * self.phase(x, t)).re
    }

    /// Observable displacement in the half-space.
    pub fn half_space_displacement(&self, x: f64, z: f64, t: f64) -> f64 {
        (self.half_space_profile(z) * self.phase(x, t)).re
    }

    /// Observable displacement at depth `z` (km, positive down), picking the
    /// layer or half-space expression from `z`.
    pub fn displacement(&self, x: f64, z: f64, t: f64) -> f64 {
        if z <= self.thickness {
            self.layer_displacement(x, z, t)
        } else {
            self.half_space_displacement(x, z, t)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use seiscope_media::LayeredMedium;

    fn relation() -> DispersionRelation {
        let medium = LayeredMedium::new(35.0, 3.5, 4.5, 2.6, 3.4, 0.08).unwrap();
        DispersionRelation::new(&medium)
    }

    #[test]
    fn test_layer_profile_is_standing_wave() {
        // eta1 = i nu1 inside the band, so the profile is 2 cos(omega nu1 z)
        let rel = relation();
        let c = 4.0;
        let ef = Eigenfunction::new(&rel, c);
        let nu1 = (1.0 / (3.5 * 3.5) - 1.0 / (c * c)).sqrt();
        for &z in &[0.0, 10.0, 20.0, 35.0] {
            let expected = 2.0 * (rel.omega() * nu1 * z).cos();
            let got = ef.layer_profile(z);
            assert_abs_diff_eq!(got.re, expected, epsilon = 1e-12);
            assert_abs_diff_eq!(got.im, 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_half_space_decays_with_depth() {
        let rel = relation();
        let ef = Eigenfunction::new(&rel, 4.2);
        let a = ef.half_space_profile(40.0).norm();
        let b = ef.half_space_profile(80.0).norm();
        let c = ef.half_space_profile(160.0).norm();
        assert!(a > b && b > c, "|u2| should decay: {} {} {}", a, b, c);
    }

    #[test]
    fn test_wave_travels_at_phase_velocity() {
        let rel = relation();
        let ef = Eigenfunction::new(&rel, 4.0);
        let (x, z, t, dt) = (50.0, 12.0, 3.0, 7.5);
        assert_abs_diff_eq!(
            ef.displacement(x, z, t),
            ef.displacement(x + 4.0 * dt, z, t + dt),
            epsilon = 1e-10
        );
    }
}
