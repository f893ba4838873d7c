//! Derivative-free search for Love modes inside the trapping band.
//!
//! The open slowness band $(1/\beta_2, 1/\beta_1)$ is mapped onto an angle
//! $\theta \in (0, \pi/2)$ through
//!
//! $$
//! \eta_2 = K\sin\theta, \qquad \nu_1 = K\cos\theta, \qquad
//! K = \sqrt{1/\beta_1^2 - 1/\beta_2^2},
//! $$
//!
//! so $p(\theta) = \sqrt{1/\beta_2^2 + K^2\sin^2\theta}$. Uniform samples in
//! $\theta$ crowd towards both band edges, where a uniform grid in $p$ would
//! miss modes that have only just passed their cutoff (a higher mode at
//! cutoff has $\eta_2 \to 0$, i.e. $p \to 1/\beta_2$ quadratically).
//!
//! Each sign change of $\operatorname{Re} F$ between neighbouring samples is
//! refined by bisection, then checked against $|F|$ and $|\operatorname{Im} F|$.
//!
//! The gap between the lower band edge and the first sample is handled
//! separately. As $\theta \to 0^+$,
//!
//! $$
//! F \approx \frac{2\mu_1 \sin(\omega H K)}{\mu_2\,\theta},
//! $$
//!
//! so a mode just past its cutoff shows up as a first sample whose sign
//! disagrees with $\sin(\omega H K)$.

use log::{debug, warn};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use seiscope_media::MediumError;

use super::dispersion::DispersionRelation;
use crate::solver::SolverError;
use crate::types::{Mode, ModeSet, RejectedRoot, RejectionReason};

/// Tuning for the mode search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    /// Number of interior samples of the band.
    pub samples: usize,
    /// Upper bound on bisection steps per bracket.
    pub max_bisections: usize,
    /// Accept a root only if $|F(1/c)|$ is below this.
    pub residual_tolerance: f64,
    /// Accept a root only if $|\operatorname{Im} F(1/c)|$ is below this.
    pub imaginary_tolerance: f64,
    /// Roots closer than this in phase velocity (km/s) count as one.
    pub min_separation: f64,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            samples: 4000,
            max_bisections: 200,
            residual_tolerance: 1e-6,
            imaginary_tolerance: 1e-9,
            min_separation: 1e-6,
        }
    }
}

impl SearchParams {
    pub fn validate(&self) -> Result<(), SolverError> {
        if self.samples < 2 {
            return Err(SolverError::InvalidInput(format!(
                "search needs at least 2 samples, got {}",
                self.samples
            )));
        }
        if self.max_bisections == 0 {
            return Err(SolverError::InvalidInput("max_bisections must be positive".into()));
        }
        for (name, value) in [
            ("residual_tolerance", self.residual_tolerance),
            ("imaginary_tolerance", self.imaginary_tolerance),
        ] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(SolverError::InvalidInput(format!(
                    "{} must be positive and finite, got {}",
                    name, value
                )));
            }
        }
        if !(self.min_separation >= 0.0 && self.min_separation.is_finite()) {
            return Err(SolverError::InvalidInput(format!(
                "min_separation must be non-negative, got {}",
                self.min_separation
            )));
        }
        Ok(())
    }
}

/// Sample `f` at `samples` interior points of `(a, b)` and return the
/// sub-intervals across which it changes sign.
///
/// Pairs involving a non-finite value are skipped. A sample that is exactly
/// zero yields a degenerate bracket `(x, x)`.
pub fn bracket_sign_changes<F: Fn(f64) -> f64>(
    f: F,
    a: f64,
    b: f64,
    samples: usize,
) -> Vec<(f64, f64)> {
    let step = (b - a) / (samples + 1) as f64;
    let points: Vec<(f64, f64)> = (1..=samples)
        .map(|k| {
            let x = a + step * k as f64;
            (x, f(x))
        })
        .collect();

    let mut brackets = Vec::new();
    for pair in points.windows(2) {
        let (xa, fa) = pair[0];
        let (xb, fb) = pair[1];
        if !fa.is_finite() || !fb.is_finite() {
            continue;
        }
        if fa == 0.0 {
            brackets.push((xa, xa));
        } else if fa * fb < 0.0 {
            brackets.push((xa, xb));
        }
    }
    brackets
}

/// Bisect a sign-change bracket of `f` down to machine precision or
/// `max_iter` steps, whichever comes first.
pub fn bisect<F: Fn(f64) -> f64>(f: F, a: f64, b: f64, max_iter: usize) -> f64 {
    let (mut lo, mut hi) = (a, b);
    let mut f_lo = f(lo);
    if f_lo == 0.0 {
        return lo;
    }

    for _ in 0..max_iter {
        let mid = 0.5 * (lo + hi);
        if mid <= lo || mid >= hi {
            break;
        }
        let f_mid = f(mid);
        if f_mid == 0.0 {
            return mid;
        }
        if f_lo * f_mid < 0.0 {
            hi = mid;
        } else {
            lo = mid;
            f_lo = f_mid;
        }
    }

    0.5 * (lo + hi)
}

/// Halvings tried when closing in on the lower band edge.
const EDGE_HALVINGS: usize = 64;

/// Bracket a root of `f` in `(0, first)` given the sign of `f` as its
/// argument tends to zero.
///
/// Returns `None` when `f(first)` agrees with `limit_sign` or either is zero.
/// Otherwise `first` is halved until `f` takes the limiting sign, skipping
/// non-finite values.
pub fn edge_bracket<F: Fn(f64) -> f64>(f: F, limit_sign: f64, first: f64) -> Option<(f64, f64)> {
    let f_first = f(first);
    if !f_first.is_finite() || limit_sign == 0.0 || f_first == 0.0 || limit_sign * f_first > 0.0 {
        return None;
    }

    let mut hi = first;
    let mut lo = 0.5 * first;
    for _ in 0..EDGE_HALVINGS {
        let value = f(lo);
        if value == 0.0 {
            return Some((lo, lo));
        }
        if value.is_finite() {
            if value * f_first < 0.0 {
                return Some((lo, hi));
            }
            hi = lo;
        }
        lo *= 0.5;
    }
    None
}

/// Check a candidate phase velocity against the band and the residual
/// tolerances.
///
/// Returns the residual $F(1/c)$ together with the reason for rejecting the
/// candidate, if any.
pub fn verify_root(
    relation: &DispersionRelation,
    c: f64,
    params: &SearchParams,
) -> (Complex64, Option<RejectionReason>) {
    let (beta1, beta2) = relation.velocity_band();
    let residual = relation.residual_at_velocity(c);

    let reason = if !(c > beta1 && c < beta2) {
        Some(RejectionReason::OutsideBand)
    } else if residual.im.abs() >= params.imaginary_tolerance {
        Some(RejectionReason::ImaginaryResidual)
    } else if residual.norm() >= params.residual_tolerance {
        Some(RejectionReason::ResidualTooLarge)
    } else {
        None
    };
    (residual, reason)
}

/// Find every trapped Love mode of `relation`.
///
/// # Errors
/// * [`SolverError::Configuration`] if $\beta_2 \le \beta_1$.
/// * [`SolverError::InvalidInput`] if `params` is unusable.
///
/// Finding no modes is not an error.
pub fn find_modes(
    relation: &DispersionRelation,
    params: &SearchParams,
) -> Result<ModeSet, SolverError> {
    params.validate()?;

    let (beta1, beta2) = relation.velocity_band();
    if beta2 <= beta1 {
        return Err(MediumError::NoTrappingBand { layer: beta1, half_space: beta2 }.into());
    }

    let frequency_hz = relation.omega() / (2.0 * std::f64::consts::PI);
    if relation.omega() == 0.0 {
        // F is identically -2 in the band; the limiting mode c -> beta2 is excluded.
        debug!("zero frequency: no trapped Love modes");
        return Ok(ModeSet::empty(frequency_hz));
    }

    let inv_b2_sq = 1.0 / (beta2 * beta2);
    let k_sq = 1.0 / (beta1 * beta1) - inv_b2_sq;
    let slowness_at = |theta: f64| {
        let s = theta.sin();
        (inv_b2_sq + k_sq * s * s).sqrt()
    };
    let real_residual = |theta: f64| relation.residual(slowness_at(theta)).re;

    let mut brackets = bracket_sign_changes(
        real_residual,
        0.0,
        std::f64::consts::FRAC_PI_2,
        params.samples,
    );
    let first = std::f64::consts::FRAC_PI_2 / (params.samples + 1) as f64;
    let edge_sign = (relation.omega() * relation.thickness() * k_sq.sqrt()).sin();
    if let Some(bracket) = edge_bracket(real_residual, edge_sign, first) {
        debug!("f={:.4} Hz: root between band edge and first sample", frequency_hz);
        brackets.insert(0, bracket);
    }
    debug!(
        "f={:.4} Hz: {} sign change(s) over {} samples",
        frequency_hz,
        brackets.len(),
        params.samples
    );

    let mut accepted: Vec<(f64, f64)> = Vec::with_capacity(brackets.len());
    let mut rejected = Vec::new();

    for (lo, hi) in brackets {
        let theta = bisect(real_residual, lo, hi, params.max_bisections);
        let c = 1.0 / slowness_at(theta);
        let (residual, reason) = verify_root(relation, c, params);

        match reason {
            None => accepted.push((c, residual.norm())),
            Some(reason) => {
                warn!(
                    "discarding candidate root c={:.6} km/s at f={:.4} Hz: {:?} (F = {:.3e})",
                    c, frequency_hz, reason, residual
                );
                rejected.push(RejectedRoot { phase_velocity: c, residual, reason });
            }
        }
    }

    accepted.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut modes: Vec<Mode> = Vec::with_capacity(accepted.len());
    for (c, residual) in accepted {
        if let Some(last) = modes.last() {
            if c - last.phase_velocity < params.min_separation {
                continue;
            }
        }
        modes.push(Mode {
            index: modes.len() + 1,
            phase_velocity: c,
            slowness: 1.0 / c,
            residual,
        });
    }

    debug!("f={:.4} Hz: {} mode(s) accepted", frequency_hz, modes.len());

    Ok(ModeSet { frequency_hz, modes, rejected })
}
