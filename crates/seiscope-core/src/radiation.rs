//! Far-field P and S radiation from a point moment-tensor source.
//!
//! In a homogeneous whole space the far-field displacement of a source with
//! moment tensor $M_{pq}$ observed along unit direction $\boldsymbol\gamma$ at
//! distance $r$ is (Aki & Richards, eq. 4.29)
//!
//! $$
//! u_i^P = \frac{\gamma_i\gamma_p\gamma_q M_{pq}}{4\pi\rho\alpha^3 r}, \qquad
//! u_i^S = \frac{(\delta_{ip} - \gamma_i\gamma_p)\gamma_q M_{pq}}{4\pi\rho\beta^3 r},
//! $$
//!
//! per unit moment rate. P motion is radial and S motion is transverse to
//! $\boldsymbol\gamma$.
//!
//! Axes follow the Aki & Richards convention: x north, y east, z down.
//!
//! # Reference
//! Aki & Richards, *Quantitative Seismology*, 2nd ed. (2002), §4.2–4.4.

use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

use crate::solver::SolverError;

/// Body-wave type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WaveType {
    P,
    S,
}

/// Cartesian axis (x north, y east, z down).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// Scalar quantity sampled by [`compute_radiation_pattern`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Projection {
    /// Length of the radiation vector.
    Magnitude,
    /// Signed Cartesian component.
    Component(Axis),
}

/// A symmetric seismic moment tensor (N·m, or any consistent unit).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MomentTensor {
    matrix: Matrix3<f64>,
}

impl MomentTensor {
    /// Build from the six independent components.
    pub fn new(mxx: f64, myy: f64, mzz: f64, mxy: f64, mxz: f64, myz: f64) -> Self {
        Self {
            matrix: Matrix3::new(
                mxx, mxy, mxz, //
                mxy, myy, myz, //
                mxz, myz, mzz,
            ),
        }
    }

    /// Wrap a full matrix, rejecting asymmetric input.
    pub fn from_matrix(matrix: Matrix3<f64>) -> Result<Self, SolverError> {
        let scale = matrix.abs().max().max(f64::MIN_POSITIVE);
        if (matrix - matrix.transpose()).abs().max() > 1e-12 * scale {
            return Err(SolverError::InvalidInput(
                "moment tensor must be symmetric".into(),
            ));
        }
        Ok(Self { matrix })
    }

    /// Double-couple source on a fault of given strike, dip and rake (radians).
    ///
    /// Uses Aki & Richards Box 4.4.
    pub fn double_couple(strike: f64, dip: f64, rake: f64, m0: f64) -> Self {
        let (ss, cs) = strike.sin_cos();
        let (s2s, c2s) = (2.0 * strike).sin_cos();
        let (sd, cd) = dip.sin_cos();
        let (s2d, c2d) = (2.0 * dip).sin_cos();
        let (sr, cr) = rake.sin_cos();

        let mxx = -m0 * (sd * cr * s2s + s2d * sr * ss * ss);
        let mxy = m0 * (sd * cr * c2s + 0.5 * s2d * sr * s2s);
        let mxz = -m0 * (cd * cr * cs + c2d * sr * ss);
        let myy = m0 * (sd * cr * s2s - s2d * sr * cs * cs);
        let myz = -m0 * (cd * cr * ss - c2d * sr * cs);
        let mzz = m0 * s2d * sr;

        Self::new(mxx, myy, mzz, mxy, mxz, myz)
    }

    /// Isotropic (explosive) source.
    pub fn explosion(m0: f64) -> Self {
        Self { matrix: Matrix3::identity() * m0 }
    }

    pub fn matrix(&self) -> &Matrix3<f64> {
        &self.matrix
    }

    pub fn trace(&self) -> f64 {
        self.matrix.trace()
    }

    /// Scalar moment $M_0 = \sqrt{\tfrac12 \sum_{pq} M_{pq}^2}$.
    pub fn scalar_moment(&self) -> f64 {
        (0.5 * self.matrix.norm_squared()).sqrt()
    }
}

/// Elastic properties of the whole space around the source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadiationMedium {
    /// P-wave velocity $\alpha$.
    pub vp: f64,
    /// S-wave velocity $\beta$.
    pub vs: f64,
    /// Density $\rho$.
    pub rho: f64,
}

impl RadiationMedium {
    fn validate(&self) -> Result<(), SolverError> {
        if !(self.vp > 0.0 && self.vs > 0.0 && self.rho > 0.0) {
            return Err(SolverError::InvalidInput(format!(
                "radiation medium must be positive (vp={}, vs={}, rho={})",
                self.vp, self.vs, self.rho
            )));
        }
        Ok(())
    }

    pub fn velocity(&self, wave: WaveType) -> f64 {
        match wave {
            WaveType::P => self.vp,
            WaveType::S => self.vs,
        }
    }
}

/// Unit direction for polar angle `theta` (from +z, i.e. straight down) and
/// azimuth `phi` (from +x towards +y).
pub fn direction(theta: f64, phi: f64) -> Vector3<f64> {
    let (st, ct) = theta.sin_cos();
    let (sp, cp) = phi.sin_cos();
    Vector3::new(st * cp, st * sp, ct)
}

/// Radiation-pattern vector along unit direction `gamma`.
///
/// P: $\boldsymbol\gamma(\boldsymbol\gamma\cdot M\boldsymbol\gamma)$;
/// S: $M\boldsymbol\gamma - \boldsymbol\gamma(\boldsymbol\gamma\cdot M\boldsymbol\gamma)$.
pub fn radiation_vector(
    tensor: &MomentTensor,
    wave: WaveType,
    gamma: &Vector3<f64>,
) -> Vector3<f64> {
    let m_gamma = tensor.matrix * gamma;
    let radial = gamma.dot(&m_gamma);
    match wave {
        WaveType::P => gamma * radial,
        WaveType::S => m_gamma - gamma * radial,
    }
}

/// Far-field displacement amplitude per unit moment rate at distance `r`.
pub fn far_field_amplitude(
    tensor: &MomentTensor,
    wave: WaveType,
    medium: &RadiationMedium,
    r: f64,
    gamma: &Vector3<f64>,
) -> Result<Vector3<f64>, SolverError> {
    medium.validate()?;
    if !(r > 0.0 && r.is_finite()) {
        return Err(SolverError::InvalidInput(format!(
            "source distance must be positive, got {}",
            r
        )));
    }
    let norm = gamma.norm();
    if !(norm > 0.0 && norm.is_finite()) {
        return Err(SolverError::InvalidInput("direction must be non-zero".into()));
    }

    let v = medium.velocity(wave);
    let scale = 1.0 / (4.0 * std::f64::consts::PI * medium.rho * v.powi(3) * r);
    Ok(radiation_vector(tensor, wave, &(gamma / norm)) * scale)
}

fn project(v: &Vector3<f64>, projection: Projection) -> f64 {
    match projection {
        Projection::Magnitude => v.norm(),
        Projection::Component(axis) => v[axis.index()],
    }
}

/// Radiation pattern sampled on the unit sphere.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RadiationPatternMap {
    pub wave: WaveType,
    pub projection: Projection,
    /// Polar angles θ ∈ [0, π], one per sample.
    pub theta: Vec<f64>,
    /// Azimuths φ ∈ [0, 2π), one per sample.
    pub phi: Vec<f64>,
    /// Projected radiation-pattern value at each (θ, φ).
    pub amplitude: Vec<f64>,
    pub n_theta: usize,
    pub n_phi: usize,
}

impl RadiationPatternMap {
    /// Value at grid position `(it, ip)`, or `None` outside the grid.
    pub fn at(&self, it: usize, ip: usize) -> Option<f64> {
        if it >= self.n_theta || ip >= self.n_phi {
            return None;
        }
        self.amplitude.get(it * self.n_phi + ip).copied()
    }
}

/// Sample the radiation pattern of `tensor` at `n_theta × n_phi` directions.
///
/// Samples are stored θ-major: index `it * n_phi + ip`.
pub fn compute_radiation_pattern(
    tensor: &MomentTensor,
    wave: WaveType,
    projection: Projection,
    n_theta: usize,
    n_phi: usize,
) -> Result<RadiationPatternMap, SolverError> {
    use std::f64::consts::PI;

    if n_theta == 0 || n_phi == 0 {
        return Err(SolverError::InvalidGrid(format!(
            "radiation pattern needs at least one sample per angle (n_theta={}, n_phi={})",
            n_theta, n_phi
        )));
    }

    let n = n_theta * n_phi;
    let mut theta_vals = Vec::with_capacity(n);
    let mut phi_vals = Vec::with_capacity(n);
    let mut amplitude = Vec::with_capacity(n);

    for it in 0..n_theta {
        let theta = PI * it as f64 / (n_theta - 1).max(1) as f64;
        for ip in 0..n_phi {
            let phi = 2.0 * PI * ip as f64 / n_phi as f64;
            let v = radiation_vector(tensor, wave, &direction(theta, phi));

            theta_vals.push(theta);
            phi_vals.push(phi);
            amplitude.push(project(&v, projection));
        }
    }

    Ok(RadiationPatternMap {
        wave,
        projection,
        theta: theta_vals,
        phi: phi_vals,
        amplitude,
        n_theta,
        n_phi,
    })
}
