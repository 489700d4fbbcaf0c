//! Property-based tests for the closed-form models.

use felbeam::kinematics::{beta_gamma_from_energy_with, energy_from_beta_gamma_with};
use felbeam::units::ev_to_j;
use felbeam::{BeamPhysics, LaserParameters, ParticleSpecies};
use proptest::prelude::*;

const GAMMA_45_MEV: f64 = 1.0 + 45.0 / 0.51099895;

proptest! {
    /// E → βγ → E recovers the kinetic energy for any positive rest energy.
    #[test]
    fn beta_gamma_round_trip(energy in 0.01f64..1e4, rest in 0.1f64..10.0) {
        let bg = beta_gamma_from_energy_with(energy, rest).unwrap();
        let back = energy_from_beta_gamma_with(bg, rest).unwrap();
        prop_assert!(((back - energy) / energy).abs() < 1e-9,
            "E = {energy}, E0 = {rest}, back = {back}");
    }

    /// Scaling βγ/g by k scales path length and excursion by √k.
    #[test]
    fn alpha_scaling_is_square_root(
        bg in 0.1f64..1e3,
        g in 0.01f64..10.0,
        k in 0.01f64..100.0,
    ) {
        let physics = BeamPhysics::new();
        let s = physics.path_length(bg, g).unwrap();
        let x = physics.max_excursion(bg, g).unwrap();

        let s_k = physics.path_length(k * bg, g).unwrap();
        let x_k = physics.max_excursion(bg, g / k).unwrap();
        prop_assert!((s_k / s - k.sqrt()).abs() < 1e-9 * k.sqrt());
        prop_assert!((x_k / x - k.sqrt()).abs() < 1e-9 * k.sqrt());
    }

    /// Power is non-negative and proportional to repetition rate.
    #[test]
    fn power_linear_in_rep_rate(
        current in 0.0f64..1.0,
        duration in 1e-7f64..1e-5,
        rep in 1.0f64..100.0,
        energy in 1.0f64..100.0,
    ) {
        let physics = BeamPhysics::new();
        let rows = physics
            .power_table(&[current], &[duration], &[rep, 2.0 * rep], &[energy], 1e-3, &ParticleSpecies::ELECTRON)
            .unwrap();
        prop_assert_eq!(rows.len(), 2);
        prop_assert!(rows[0].power_w >= 0.0);
        prop_assert!((rows[1].power_w - 2.0 * rows[0].power_w).abs() <= 1e-12 * rows[1].power_w.max(1e-300));
    }

    /// A higher threshold never admits a larger fraction of photons.
    #[test]
    fn fraction_non_increasing(a in 0.0f64..2e4, b in 0.0f64..2e4) {
        let physics = BeamPhysics::new();
        let e_l = LaserParameters::default().photon_energy_j();
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };

        let f_lo = physics.fraction_above_threshold(GAMMA_45_MEV, e_l, ev_to_j(lo)).unwrap();
        let f_hi = physics.fraction_above_threshold(GAMMA_45_MEV, e_l, ev_to_j(hi)).unwrap();
        prop_assert!((0.0..=1.0).contains(&f_lo));
        prop_assert!(f_hi <= f_lo + 1e-12, "f({hi}) = {f_hi} > f({lo}) = {f_lo}");
    }

    /// The yield stays finite however small the overlap area.
    #[test]
    fn yield_is_finite(area in 0.0f64..1e-6) {
        let physics = BeamPhysics::new();
        let y = physics.ics_yield_per_pulse(4.3e12, 1.5e17, area);
        prop_assert!(y.is_finite() && y > 0.0);
    }
}
