//! Integration tests for the Love-wave pipeline.
//!
//! Covers the documented crust/mantle example, the band and residual
//! guarantees of the mode search, cutoff behaviour over a frequency sweep,
//! and the displacement snapshots built from the modes.

use approx::{assert_abs_diff_eq, assert_relative_eq};

use seiscope_core::fields::compute_displacement;
use seiscope_core::solver::love::dispersion::DispersionRelation;
use seiscope_core::solver::love::roots::{find_modes, SearchParams};
use seiscope_core::solver::love::LoveSolver;
use seiscope_core::solver::{SolverError, SurfaceWaveSolver};
use seiscope_core::study::dispersion_curves;
use seiscope_core::types::{FieldGrid, ModeSet, RejectionReason};
use seiscope_media::{presets, LayeredMedium, MediumError};

// ─────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn crust(f: f64) -> LayeredMedium {
    LayeredMedium::new(35.0, 3.5, 4.5, 2.6, 3.4, f).unwrap()
}

fn modes_of(medium: &LayeredMedium) -> ModeSet {
    LoveSolver::default().find_modes(medium).unwrap()
}

/// Cutoff frequency of mode `n` (1-based): f_n = (n - 1) / (2 H K).
fn cutoff_hz(medium: &LayeredMedium, n: usize) -> f64 {
    let b1 = medium.layer_velocity();
    let b2 = medium.half_space_velocity();
    let k = (1.0 / (b1 * b1) - 1.0 / (b2 * b2)).sqrt();
    (n - 1) as f64 / (2.0 * medium.thickness() * k)
}

// ─────────────────────────────────────────────────────────────
// Mode search
// ─────────────────────────────────────────────────────────────

#[test]
fn test_crust_over_mantle_example() {
    init_logging();
    let medium = crust(0.08);
    let modes = modes_of(&medium);

    // Fundamental plus the first higher mode, which has just passed cutoff
    assert_eq!(modes.len(), 2, "modes: {:?}", modes.phase_velocities());
    let fundamental = modes.fundamental().unwrap();
    assert_eq!(fundamental.index, 1);
    assert!(fundamental.phase_velocity > 3.5 && fundamental.phase_velocity < 4.5);
    assert_relative_eq!(fundamental.phase_velocity, 3.634_476_7, epsilon = 1e-6);

    let first_higher = modes.get(2).unwrap();
    assert!(first_higher.phase_velocity > fundamental.phase_velocity);
    assert!(first_higher.phase_velocity < 4.5);
    assert!(modes.rejected.is_empty());
}

#[test]
fn test_modes_lie_inside_band_with_small_residual() {
    init_logging();
    let tol = 1e-6;
    for id in presets::PRESET_IDS {
        let base = presets::preset(id).unwrap();
        for scale in [0.5, 1.0, 2.0, 4.0] {
            let medium = base.with_frequency(base.frequency() * scale).unwrap();
            let relation = DispersionRelation::new(&medium);
            let modes = modes_of(&medium);
            let (b1, b2) = (medium.layer_velocity(), medium.half_space_velocity());

            for mode in modes.iter() {
                let c = mode.phase_velocity;
                assert!(c > b1 && c < b2, "{}: c={} outside ({}, {})", id, c, b1, b2);
                let f = relation.residual(1.0 / c);
                assert!(f.norm() < tol, "{}: |F(1/c)| = {:e}", id, f.norm());
                assert!(f.im.abs() < tol, "{}: |Im F(1/c)| = {:e}", id, f.im);
            }
        }
    }
}

#[test]
fn test_modes_sorted_indexed_and_separated() {
    let medium = crust(0.4);
    let params = SearchParams::default();
    let modes = find_modes(&DispersionRelation::new(&medium), &params).unwrap();
    assert!(modes.len() >= 5);

    for (i, pair) in modes.modes.windows(2).enumerate() {
        assert_eq!(pair[0].index, i + 1);
        assert_eq!(pair[1].index, i + 2);
        assert!(pair[1].phase_velocity - pair[0].phase_velocity >= params.min_separation);
    }
}

#[test]
fn test_min_separation_merges_close_roots() {
    let medium = crust(0.4);
    let relation = DispersionRelation::new(&medium);
    let all = find_modes(&relation, &SearchParams::default()).unwrap();

    // Six or so modes share a 1 km/s band, so some neighbours are closer than 0.2
    let params = SearchParams { min_separation: 0.2, ..Default::default() };
    let merged = find_modes(&relation, &params).unwrap();
    assert!(merged.len() < all.len(), "{} vs {}", merged.len(), all.len());
    assert!(!merged.is_empty());
    assert_eq!(merged.fundamental(), all.fundamental());

    for (i, mode) in merged.iter().enumerate() {
        assert_eq!(mode.index, i + 1);
        assert!(all.iter().any(|m| m.phase_velocity == mode.phase_velocity));
    }
    for pair in merged.modes.windows(2) {
        assert!(pair[1].phase_velocity - pair[0].phase_velocity >= 0.2);
    }
}

#[test]
fn test_mode_found_just_past_cutoff() {
    init_logging();
    let fc = cutoff_hz(&crust(0.08), 2);
    let medium = crust(fc * (1.0 + 1e-4));
    let modes = modes_of(&medium);

    // The root lies between the band edge and the first scan sample
    assert_eq!(
        modes.len(),
        2,
        "modes: {:?}, rejected: {:?}",
        modes.phase_velocities(),
        modes.rejected
    );
    let higher = modes.get(2).unwrap();
    assert!(higher.phase_velocity > 4.499 && higher.phase_velocity < 4.5);
    assert!(higher.residual < SearchParams::default().residual_tolerance);

    // Just below cutoff the same mode must not appear
    let below = modes_of(&crust(fc * (1.0 - 1e-4)));
    assert_eq!(below.len(), 1);
}

#[test]
fn test_failed_candidates_are_reported_not_returned() {
    init_logging();
    let medium = crust(0.08);
    let params = SearchParams { residual_tolerance: 1e-300, ..Default::default() };
    let modes = find_modes(&DispersionRelation::new(&medium), &params).unwrap();

    assert!(modes.is_empty());
    assert_eq!(modes.rejected.len(), 2);
    for root in &modes.rejected {
        assert_eq!(root.reason, RejectionReason::ResidualTooLarge);
        assert!(root.phase_velocity > 3.5 && root.phase_velocity < 4.5);
        assert!(root.residual.norm() >= 1e-300);
    }
    let slowest = modes.rejected[0].phase_velocity.min(modes.rejected[1].phase_velocity);
    assert_relative_eq!(slowest, 3.634_476_7, epsilon = 1e-6);

    // The default tolerances keep both
    let kept = modes_of(&medium);
    assert_eq!(kept.len(), 2);
    assert!(kept.rejected.is_empty());
}

#[test]
fn test_mode_count_matches_cutoffs() {
    let medium = crust(0.3);
    let modes = modes_of(&medium);
    let expected = (1..20).take_while(|&n| cutoff_hz(&medium, n) < 0.3).count();
    assert_eq!(modes.len(), expected);

    // Just below and just above the second-mode cutoff
    let fc = cutoff_hz(&medium, 2);
    assert_eq!(modes_of(&crust(fc * 0.97)).len(), 1);
    assert_eq!(modes_of(&crust(fc * 1.03)).len(), 2);
}

#[test]
fn test_mode_count_non_decreasing_with_frequency() {
    init_logging();
    let medium = crust(0.0);
    let frequencies: Vec<f64> = (0..=40).map(|i| 0.005 * i as f64).collect();
    let sets = dispersion_curves(&medium, &frequencies, &SearchParams::default()).unwrap();

    let counts: Vec<usize> = sets.iter().map(ModeSet::len).collect();
    for pair in counts.windows(2) {
        assert!(pair[1] >= pair[0], "mode count decreased: {:?}", counts);
    }
    assert_eq!(counts[0], 0);
    assert_eq!(*counts.last().unwrap(), 3);
}

#[test]
fn test_fundamental_mode_is_dispersive() {
    // Low frequencies sample the half-space (c -> beta2), high ones the layer (c -> beta1)
    let medium = crust(0.0);
    let sets = dispersion_curves(&medium, &[0.01, 0.05, 0.2, 1.0], &SearchParams::default()).unwrap();
    let c: Vec<f64> = sets.iter().map(|s| s.fundamental().unwrap().phase_velocity).collect();
    for pair in c.windows(2) {
        assert!(pair[1] < pair[0], "fundamental velocity should decrease: {:?}", c);
    }
    assert!(c[0] > 4.3);
    assert!(c[3] < 3.6);
}

#[test]
fn test_zero_frequency_gives_empty_mode_set() {
    let modes = modes_of(&crust(0.0));
    assert!(modes.is_empty());
    assert!(modes.fundamental().is_none());
    assert_eq!(modes.frequency_hz, 0.0);
}

#[test]
fn test_pipeline_is_deterministic() {
    let medium = crust(0.15);
    assert_eq!(modes_of(&medium), modes_of(&medium));
}

#[test]
fn test_equal_velocities_is_configuration_error() {
    let err = LayeredMedium::new(35.0, 4.0, 4.0, 2.6, 3.4, 0.08).unwrap_err();
    assert!(matches!(err, MediumError::NoTrappingBand { .. }));

    let solver_err: SolverError = err.into();
    assert!(matches!(solver_err, SolverError::Configuration(_)));
}

#[test]
fn test_mode_set_json_round_trip() {
    let modes = modes_of(&crust(0.08));
    let json = serde_json::to_string(&modes).unwrap();
    let back: ModeSet = serde_json::from_str(&json).unwrap();
    assert_eq!(back.len(), modes.len());
    for (a, b) in modes.iter().zip(back.iter()) {
        assert_eq!(a.index, b.index);
        assert_relative_eq!(a.phase_velocity, b.phase_velocity, epsilon = 1e-15);
    }
}

// ─────────────────────────────────────────────────────────────
// Displacement field
// ─────────────────────────────────────────────────────────────

fn small_grid() -> FieldGrid {
    FieldGrid {
        x_max: 200.0,
        nx: 21,
        nz_layer: 15,
        half_space_depth: 80.0,
        nz_half_space: 11,
    }
}

#[test]
fn test_displacement_grid_shapes() {
    let medium = crust(0.08);
    let modes = modes_of(&medium);
    let grid = LoveSolver::default()
        .displacement_field(&medium, &modes, &[1, 2], &small_grid(), 0.0)
        .unwrap();

    assert_eq!(grid.layer.dim(), (15, 21));
    assert_eq!(grid.half_space.dim(), (11, 21));
    assert_eq!(grid.x.len(), 21);
    assert_abs_diff_eq!(grid.z_layer[14], 35.0, epsilon = 1e-12);
    assert_abs_diff_eq!(grid.z_half_space[0], 35.0, epsilon = 1e-12);
    assert_abs_diff_eq!(grid.z_half_space[10], 115.0, epsilon = 1e-12);
    assert_eq!(grid.modes, vec![1, 2]);
    assert!(grid.max_abs() > 0.0);
}

#[test]
fn test_displacement_continuous_at_interface() {
    let medium = crust(0.08);
    let modes = modes_of(&medium);
    let relation = DispersionRelation::new(&medium);

    for sel in [vec![1], vec![2], vec![1, 2]] {
        let grid = compute_displacement(&relation, &modes, &sel, &small_grid(), 4.0).unwrap();
        let top = grid.layer.row(grid.layer.nrows() - 1);
        let bottom = grid.half_space.row(0);
        for (u1, u2) in top.iter().zip(bottom.iter()) {
            assert_abs_diff_eq!(*u1, *u2, epsilon = 1e-8);
        }
    }
}

#[test]
fn test_free_surface_has_zero_traction() {
    let medium = crust(0.08);
    let modes = modes_of(&medium);
    let relation = DispersionRelation::new(&medium);
    let dz = 1e-4;
    for mode in modes.iter() {
        let ef = mode.eigenfunction(&relation);
        for &x in &[0.0, 37.0, 120.0] {
            let du_dz = (ef.displacement(x, dz, 1.0) - ef.displacement(x, 0.0, 1.0)) / dz;
            assert!(du_dz.abs() < 1e-5, "mode {}: du/dz(0) = {:e}", mode.index, du_dz);
        }
    }
}

#[test]
fn test_superposition_is_linear() {
    let medium = crust(0.08);
    let modes = modes_of(&medium);
    let relation = DispersionRelation::new(&medium);
    let grid = small_grid();

    let both = compute_displacement(&relation, &modes, &[2, 1, 2], &grid, 2.5).unwrap();
    let one = compute_displacement(&relation, &modes, &[1], &grid, 2.5).unwrap();
    let two = compute_displacement(&relation, &modes, &[2], &grid, 2.5).unwrap();

    assert_eq!(both.modes, vec![1, 2]);
    let sum = &one.layer + &two.layer;
    for (a, b) in both.layer.iter().zip(sum.iter()) {
        assert_abs_diff_eq!(*a, *b, epsilon = 1e-12);
    }
}

#[test]
fn test_empty_selection_gives_zero_field() {
    let medium = crust(0.08);
    let modes = modes_of(&medium);
    let relation = DispersionRelation::new(&medium);
    let grid = compute_displacement(&relation, &modes, &[], &small_grid(), 0.0).unwrap();
    assert_eq!(grid.max_abs(), 0.0);
}

#[test]
fn test_unknown_mode_and_frequency_mismatch() {
    let medium = crust(0.08);
    let modes = modes_of(&medium);
    let solver = LoveSolver::default();

    let err = solver
        .displacement_field(&medium, &modes, &[3], &small_grid(), 0.0)
        .unwrap_err();
    assert!(matches!(err, SolverError::UnknownMode { index: 3, available: 2 }));

    let err = solver
        .displacement_field(&medium, &modes, &[0], &small_grid(), 0.0)
        .unwrap_err();
    assert!(matches!(err, SolverError::UnknownMode { index: 0, .. }));

    let other = crust(0.1);
    let err = solver
        .displacement_field(&other, &modes, &[1], &small_grid(), 0.0)
        .unwrap_err();
    assert!(matches!(err, SolverError::FrequencyMismatch { .. }));
}
