//! Relativistic conversions and bunch bookkeeping shared by every model.

use std::f64::consts::PI;

use crate::constants::{
    ELECTRON_REST_ENERGY_MEV, ELEMENTARY_CHARGE, MEV_TO_J, PLANCK, SPEED_OF_LIGHT,
};
use crate::error::{require_positive, Result};

/// Lorentz factor γ = 1 + E/E₀.
pub fn gamma_from_kinetic_energy(kinetic_energy_mev: f64, rest_energy_mev: f64) -> Result<f64> {
    let rest = require_positive("rest energy", rest_energy_mev)?;
    Ok(1.0 + kinetic_energy_mev / rest)
}

/// β = sqrt(1 − 1/γ²), clipped at zero for γ ≤ 1.
pub fn beta_from_gamma(gamma: f64) -> f64 {
    (1.0 - 1.0 / (gamma * gamma)).max(0.0).sqrt()
}

/// Returns (γ, β) for a kinetic energy and rest energy, both in MeV.
pub fn relativistic_parameters(kinetic_energy_mev: f64, rest_energy_mev: f64) -> Result<(f64, f64)> {
    let gamma = gamma_from_kinetic_energy(kinetic_energy_mev, rest_energy_mev)?;
    Ok((gamma, beta_from_gamma(gamma)))
}

/// Momentum times c (MeV): pc = sqrt(E² + 2·E·E₀).
pub fn momentum_pc(kinetic_energy_mev: f64, rest_energy_mev: f64) -> f64 {
    (kinetic_energy_mev * kinetic_energy_mev + 2.0 * kinetic_energy_mev * rest_energy_mev).sqrt()
}

/// Rest energy (MeV) of a mass (kg).
pub fn rest_energy_from_mass(mass_kg: f64) -> f64 {
    mass_kg * SPEED_OF_LIGHT * SPEED_OF_LIGHT / MEV_TO_J
}

/// Non-finite and negative values map to zero.
#[inline]
fn clamp_non_negative(x: f64) -> f64 {
    if x.is_finite() { x.max(0.0) } else { 0.0 }
}

/// Normalized momentum βγ of a particle with the given kinetic energy.
///
/// Negative or non-finite energies are treated as zero. Fails with
/// [`FelError::Domain`](crate::FelError::Domain) unless the rest energy is
/// positive. Pairs with [`energy_from_beta_gamma_with`].
pub fn beta_gamma_from_energy_with(kinetic_energy_mev: f64, rest_energy_mev: f64) -> Result<f64> {
    let rest = require_positive("rest energy", rest_energy_mev)?;
    Ok(beta_gamma_unchecked(kinetic_energy_mev, rest))
}

/// Kinetic energy (MeV) from βγ: E = (sqrt(1 + βγ²) − 1)·E₀.
pub fn energy_from_beta_gamma_with(beta_gamma: f64, rest_energy_mev: f64) -> Result<f64> {
    let rest = require_positive("rest energy", rest_energy_mev)?;
    Ok(energy_unchecked(beta_gamma, rest))
}

fn beta_gamma_unchecked(kinetic_energy_mev: f64, rest_energy_mev: f64) -> f64 {
    let e = clamp_non_negative(kinetic_energy_mev);
    let gamma = 1.0 + e / rest_energy_mev;
    beta_from_gamma(gamma) * gamma
}

fn energy_unchecked(beta_gamma: f64, rest_energy_mev: f64) -> f64 {
    let bg = clamp_non_negative(beta_gamma);
    let gamma = (1.0 + bg * bg).sqrt();
    (gamma - 1.0) * rest_energy_mev
}

/// Electron βγ from kinetic energy (MeV).
pub fn beta_gamma_from_energy(kinetic_energy_mev: f64) -> f64 {
    beta_gamma_unchecked(kinetic_energy_mev, ELECTRON_REST_ENERGY_MEV)
}

/// Electron kinetic energy (MeV) from βγ.
pub fn energy_from_beta_gamma(beta_gamma: f64) -> f64 {
    energy_unchecked(beta_gamma, ELECTRON_REST_ENERGY_MEV)
}

pub fn beta_gamma_from_energy_all(energies_mev: &[f64]) -> Vec<f64> {
    energies_mev.iter().map(|&e| beta_gamma_from_energy(e)).collect()
}

pub fn energy_from_beta_gamma_all(beta_gammas: &[f64]) -> Vec<f64> {
    beta_gammas.iter().map(|&bg| energy_from_beta_gamma(bg)).collect()
}

/// Photon energy (J) for a wavelength in µm.
pub fn photon_energy_from_wavelength(wavelength_um: f64) -> f64 {
    PLANCK * SPEED_OF_LIGHT / (wavelength_um * 1e-6)
}

/// Number of electrons in a bunch of the given charge (pC).
pub fn electrons_per_bunch(bunch_charge_pc: f64) -> f64 {
    bunch_charge_pc * 1e-12 / ELEMENTARY_CHARGE
}

/// RF buckets filled during a macropulse.
pub fn bunches_per_macropulse(macropulse_us: f64, rf_frequency_hz: f64) -> f64 {
    macropulse_us * 1e-6 * rf_frequency_hz
}

/// Average current (A) of `electrons` spread over a macropulse.
pub fn macropulse_current(electrons: f64, macropulse_us: f64) -> f64 {
    electrons * ELEMENTARY_CHARGE / (macropulse_us * 1e-6)
}

/// Effective overlap area (m²) of two round Gaussian spots: 2π·σx·σy.
pub fn gaussian_overlap_area(sigma_x_um: f64, sigma_y_um: f64) -> f64 {
    2.0 * PI * (sigma_x_um * 1e-6) * (sigma_y_um * 1e-6)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FelError;

    #[test]
    fn test_gamma_rejects_bad_rest_energy() {
        assert!(matches!(
            gamma_from_kinetic_energy(45.0, 0.0),
            Err(FelError::Domain { .. })
        ));
        assert!(matches!(
            gamma_from_kinetic_energy(45.0, -1.0),
            Err(FelError::Domain { .. })
        ));
        assert!(gamma_from_kinetic_energy(45.0, f64::NAN).is_err());
    }

    #[test]
    fn test_beta_gamma_clamps() {
        assert_eq!(beta_gamma_from_energy(-3.0), 0.0);
        assert_eq!(beta_gamma_from_energy(f64::NAN), 0.0);
        assert_eq!(beta_gamma_from_energy(f64::INFINITY), 0.0);
        assert_eq!(energy_from_beta_gamma(-1.0), 0.0);
    }

    #[test]
    fn test_momentum_ultrarelativistic() {
        let pc = momentum_pc(45.0, 0.511);
        assert!((pc - 45.508).abs() < 1e-3, "pc = {pc}");
    }

    #[test]
    fn test_bunch_bookkeeping() {
        // 60 pC bunches over 4 µs at 2.856 GHz
        let n_bunch = bunches_per_macropulse(4.0, 2.856e9);
        assert!((n_bunch - 11424.0).abs() < 1e-6);
        let n_e = electrons_per_bunch(60.0) * n_bunch;
        let current = macropulse_current(n_e, 4.0);
        assert!((current - 0.17136).abs() < 1e-9, "I = {current}");
    }

    #[test]
    fn test_empty_sequences() {
        assert!(beta_gamma_from_energy_all(&[]).is_empty());
        assert!(energy_from_beta_gamma_all(&[]).is_empty());
    }
}
