//! Love-wave dispersion relation for a layer over a half-space.
//!
//! With horizontal slowness $p = 1/c$ the SH displacement in each medium is a
//! sum of vertically travelling exponentials $e^{\pm\omega\eta z}$ times the
//! horizontal phase $e^{i\omega(t - px)}$, where the vertical slowness is
//!
//! $$
//! \eta_j(p) = \sqrt{p^2 - 1/\beta_j^2}.
//! $$
//!
//! The stress-free surface forces equal up- and down-going amplitudes in the
//! layer ($A_1 = B_1 = 1$). Writing the half-space field as
//! $\hat A_2 e^{-\omega\eta_2 (z - H)}$ (no up-going term), continuity at
//! $z = H$ gives two independent expressions for $\hat A_2$:
//!
//! $$
//! \hat A_2^{(\tau)} = -\frac{2\mu_1\eta_1\sinh(\omega\eta_1 H)}{\mu_2\eta_2},
//! \qquad
//! \hat A_2^{(u)} = 2\cosh(\omega\eta_1 H),
//! $$
//!
//! from traction and displacement continuity respectively. Their difference
//! $F(p) = \hat A_2^{(\tau)} - \hat A_2^{(u)}$ vanishes exactly on a mode.
//! Inside the trapping band $\eta_1$ is imaginary and $\eta_2$ real, so $F$ is
//! real there and reduces to the classical
//! $\tan(\omega\nu_1 H) = \mu_2\eta_2 / (\mu_1\nu_1)$ with $\nu_1 = |\eta_1|$.

use num_complex::Complex64;
use seiscope_media::LayeredMedium;

/// The dispersion function $F(p)$ closed over one medium.
///
/// Holds only scalars, so rebuilding it after a parameter change is free.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DispersionRelation {
    thickness: f64,
    omega: f64,
    beta1: f64,
    beta2: f64,
    mu1: f64,
    mu2: f64,
}

impl DispersionRelation {
    pub fn new(medium: &LayeredMedium) -> Self {
        Self {
            thickness: medium.thickness(),
            omega: medium.omega(),
            beta1: medium.layer_velocity(),
            beta2: medium.half_space_velocity(),
            mu1: medium.shear_modulus_layer(),
            mu2: medium.shear_modulus_half_space(),
        }
    }

    /// Vertical slowness $\sqrt{p^2 - 1/\beta^2}$ with the branch picked from
    /// the sign of the radicand.
    ///
    /// A non-negative radicand gives the non-negative real root (evanescent
    /// in depth); a negative one gives $i\sqrt{1/\beta^2 - p^2}$ (oscillatory).
    /// This is the $\varepsilon \to 0^+$ limit of $\sqrt{p^2 - 1/\beta^2 + i\varepsilon}$.
    pub fn vertical_slowness(p: f64, beta: f64) -> Complex64 {
        let radicand = p * p - 1.0 / (beta * beta);
        if radicand >= 0.0 {
            Complex64::new(radicand.sqrt(), 0.0)
        } else {
            Complex64::new(0.0, (-radicand).sqrt())
        }
    }

    /// $\eta_1(p)$ in the top layer.
    pub fn layer_slowness(&self, p: f64) -> Complex64 {
        Self::vertical_slowness(p, self.beta1)
    }

    /// $\eta_2(p)$ in the half-space.
    pub fn half_space_slowness(&self, p: f64) -> Complex64 {
        Self::vertical_slowness(p, self.beta2)
    }

    /// Interface amplitude $\hat A_2$ implied by traction continuity at $z = H$.
    ///
    /// Singular at $p = 1/\beta_2$ where $\eta_2 = 0$.
    pub fn traction_amplitude(&self, p: f64) -> Complex64 {
        let eta1 = self.layer_slowness(p);
        let eta2 = self.half_space_slowness(p);
        let arg = self.omega * self.thickness * eta1;
        -2.0 * self.mu1 * eta1 * arg.sinh() / (self.mu2 * eta2)
    }

    /// Interface amplitude $\hat A_2$ implied by displacement continuity at $z = H$.
    pub fn displacement_amplitude(&self, p: f64) -> Complex64 {
        let eta1 = self.layer_slowness(p);
        2.0 * (self.omega * self.thickness * eta1).cosh()
    }

    /// Residual $F(p)$; zero for a Love mode with slowness `p`.
    ///
    /// Defined for any `p > 0`, but only meaningful for mode search inside
    /// [`slowness_band`](Self::slowness_band).
    pub fn residual(&self, p: f64) -> Complex64 {
        self.traction_amplitude(p) - self.displacement_amplitude(p)
    }

    /// Residual at phase velocity `c` (km/s), i.e. $F(1/c)$.
    pub fn residual_at_velocity(&self, c: f64) -> Complex64 {
        self.residual(1.0 / c)
    }

    /// Open slowness interval $(1/\beta_2, 1/\beta_1)$ of trapped modes.
    pub fn slowness_band(&self) -> (f64, f64) {
        (1.0 / self.beta2, 1.0 / self.beta1)
    }

    /// Velocity band $(\beta_1, \beta_2)$.
    pub fn velocity_band(&self) -> (f64, f64) {
        (self.beta1, self.beta2)
    }

    pub fn omega(&self) -> f64 {
        self.omega
    }

    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    /// Shear moduli $(\mu_1, \mu_2)$.
    pub fn shear_moduli(&self) -> (f64, f64) {
        (self.mu1, self.mu2)
    }
}
