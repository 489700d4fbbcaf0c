//! Runtime configuration for the beam models.
//!
//! Every struct here defaults to the compile-time values in
//! [`crate::constants`], and all of them are `#[serde(default)]`, so a TOML
//! document only has to name the values it overrides:
//!
//! ```toml
//! [tolerances]
//! log_floor = 1e-10
//!
//! [alpha_magnet]
//! nominal_current = 15.0
//! ```

use std::f64::consts::PI;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::{FelError, Result};

/// Physical constants carried into each model.
///
/// The defaults are CODATA 2018; overriding them is meant for comparison
/// against older reference calculations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConstants {
    pub elementary_charge: f64,
    pub speed_of_light: f64,
    pub planck: f64,
    pub vacuum_permittivity: f64,
    pub avogadro: f64,
    pub electron_mass: f64,
    pub proton_mass: f64,
    pub atomic_mass_unit: f64,
    pub electron_rest_energy_mev: f64,

    // ── Alpha magnet ──
    pub alpha_theta_deg: f64,
    pub alpha_s_coeff: f64,
    pub alpha_x_coeff: f64,
}

impl Default for PhysicsConstants {
    fn default() -> Self {
        PhysicsConstants {
            elementary_charge: ELEMENTARY_CHARGE,
            speed_of_light: SPEED_OF_LIGHT,
            planck: PLANCK,
            vacuum_permittivity: VACUUM_PERMITTIVITY,
            avogadro: AVOGADRO,
            electron_mass: ELECTRON_MASS,
            proton_mass: PROTON_MASS,
            atomic_mass_unit: ATOMIC_MASS_UNIT,
            electron_rest_energy_mev: ELECTRON_REST_ENERGY_MEV,
            alpha_theta_deg: ALPHA_THETA_DEG,
            alpha_s_coeff: ALPHA_S_COEFF,
            alpha_x_coeff: ALPHA_X_COEFF,
        }
    }
}

impl PhysicsConstants {
    pub fn mev_to_j(&self) -> f64 {
        self.elementary_charge * 1e6
    }

    /// Electron rest energy (J)
    pub fn me_c2_j(&self) -> f64 {
        self.electron_mass * self.speed_of_light * self.speed_of_light
    }

    /// Classical electron radius (m)
    pub fn classical_electron_radius(&self) -> f64 {
        self.elementary_charge * self.elementary_charge
            / (4.0 * PI * self.vacuum_permittivity * self.me_c2_j())
    }

    /// Total Thomson cross section (m²)
    pub fn thomson_cross_section(&self) -> f64 {
        let r_e = self.classical_electron_radius();
        (8.0 * PI / 3.0) * r_e * r_e
    }

    pub fn alpha_theta_rad(&self) -> f64 {
        self.alpha_theta_deg.to_radians()
    }
}

/// Clamping floors for the numeric edge cases.
///
/// These are guards against non-positive logarithms and near-zero
/// denominators, not physically derived quantities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tolerances {
    /// Minimum argument of the stopping-power logarithm
    pub log_floor: f64,
    /// Minimum stopping power (MeV/mm) used as a range denominator
    pub stopping_power_floor: f64,
    /// Minimum β² used as a stopping-power denominator
    pub beta_squared_floor: f64,
    /// Minimum laser/electron overlap area (m²)
    pub overlap_area_floor: f64,
    /// Minimum βγ in the alpha magnet sweeps
    pub beta_gamma_floor: f64,
    /// Minimum width of the deposition profile (cm)
    pub profile_width_floor: f64,
    /// γ² is kept at least `1 + gamma_squared_margin` when deriving β
    pub gamma_squared_margin: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Tolerances {
            log_floor: 1e-12,
            stopping_power_floor: 1e-12,
            beta_squared_floor: 1e-16,
            overlap_area_floor: 1e-30,
            beta_gamma_floor: 1e-12,
            profile_width_floor: 1e-6,
            gamma_squared_margin: 1e-15,
        }
    }
}

/// Convergence settings for the built-in adaptive quadrature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuadratureConfig {
    pub abs_tolerance: f64,
    pub rel_tolerance: f64,
    pub max_subdivisions: usize,
}

impl Default for QuadratureConfig {
    fn default() -> Self {
        QuadratureConfig {
            abs_tolerance: 1.49e-8,
            rel_tolerance: 1.49e-8,
            max_subdivisions: 50,
        }
    }
}

/// Alpha magnet excitation: g = gradient_per_current · I.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlphaMagnetConfig {
    /// (T/m)/A
    pub gradient_per_current: f64,
    /// A
    pub nominal_current: f64,
}

impl Default for AlphaMagnetConfig {
    fn default() -> Self {
        AlphaMagnetConfig {
            gradient_per_current: ALPHA_GRADIENT_PER_AMP,
            nominal_current: ALPHA_NOMINAL_CURRENT,
        }
    }
}

/// Transverse RMS beam size at the target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeamSpot {
    pub sigma_x_m: f64,
    pub sigma_y_m: f64,
}

impl Default for BeamSpot {
    fn default() -> Self {
        BeamSpot {
            sigma_x_m: 1e-3,
            sigma_y_m: 10e-3,
        }
    }
}

impl BeamSpot {
    /// Area of the 6σ × 6σ ellipse (m²)
    pub fn deposit_area_m2(&self) -> f64 {
        PI * (6.0 * self.sigma_x_m) * (6.0 * self.sigma_y_m)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FelConfig {
    pub constants: PhysicsConstants,
    pub tolerances: Tolerances,
    pub quadrature: QuadratureConfig,
    pub alpha_magnet: AlphaMagnetConfig,
    pub beam_spot: BeamSpot,
}

impl FelConfig {
    /// Parse a TOML document; missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: FelConfig =
            toml::from_str(text).map_err(|e| FelError::Config(e.to_string()))?;
        config.validate()?;
        debug!("loaded configuration: {config:?}");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("constants.elementary_charge", self.constants.elementary_charge),
            ("constants.speed_of_light", self.constants.speed_of_light),
            ("constants.planck", self.constants.planck),
            (
                "constants.vacuum_permittivity",
                self.constants.vacuum_permittivity,
            ),
            ("constants.avogadro", self.constants.avogadro),
            ("constants.electron_mass", self.constants.electron_mass),
            ("constants.proton_mass", self.constants.proton_mass),
            ("constants.atomic_mass_unit", self.constants.atomic_mass_unit),
            (
                "constants.electron_rest_energy_mev",
                self.constants.electron_rest_energy_mev,
            ),
            ("constants.alpha_s_coeff", self.constants.alpha_s_coeff),
            ("constants.alpha_x_coeff", self.constants.alpha_x_coeff),
            ("tolerances.log_floor", self.tolerances.log_floor),
            (
                "tolerances.stopping_power_floor",
                self.tolerances.stopping_power_floor,
            ),
            (
                "tolerances.beta_squared_floor",
                self.tolerances.beta_squared_floor,
            ),
            (
                "tolerances.overlap_area_floor",
                self.tolerances.overlap_area_floor,
            ),
            ("tolerances.beta_gamma_floor", self.tolerances.beta_gamma_floor),
            (
                "tolerances.profile_width_floor",
                self.tolerances.profile_width_floor,
            ),
            (
                "tolerances.gamma_squared_margin",
                self.tolerances.gamma_squared_margin,
            ),
            ("quadrature.abs_tolerance", self.quadrature.abs_tolerance),
            ("quadrature.rel_tolerance", self.quadrature.rel_tolerance),
            ("beam_spot.sigma_x_m", self.beam_spot.sigma_x_m),
            ("beam_spot.sigma_y_m", self.beam_spot.sigma_y_m),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(FelError::Config(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        if self.quadrature.max_subdivisions == 0 {
            return Err(FelError::Config(
                "quadrature.max_subdivisions must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
