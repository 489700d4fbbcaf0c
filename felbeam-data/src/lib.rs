#![no_std]

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

/// Charge carried by one macropulse at a given current and pulse length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChargeSample {
    pub current_a: f64,
    pub pulse_duration_us: f64,
    pub charge_pc: f64,
}

/// Heating rate of one catalogue material under a given beam.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialTemperatureRise {
    pub material: String,
    /// Temperature rise rate (°C/s)
    pub rate_c_per_s: f64,
}

/// One row of the beam power sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerDepositionResult {
    pub energy_mev: f64,
    pub current_ma: f64,
    pub rep_rate_hz: f64,
    pub pulse_duration_us: f64,
    pub power_w: f64,
    pub temperature_rise: Vec<MaterialTemperatureRise>,
}

impl PowerDepositionResult {
    /// Temperature rise rate for a material by name (case-insensitive).
    pub fn temperature_rise_for(&self, material: &str) -> Option<f64> {
        self.temperature_rise
            .iter()
            .find(|t| t.material.eq_ignore_ascii_case(material))
            .map(|t| t.rate_c_per_s)
    }
}

/// Penetration depth estimate for one beam energy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeSample {
    pub material: String,
    pub energy_mev: f64,
    pub penetration_depth_cm: f64,
    /// Only reported by the analytic model.
    pub stopping_power_mev_per_mm: Option<f64>,
}

/// Relative dose against depth, normalized to a unit peak.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepositionProfile {
    pub material: String,
    pub energy_mev: f64,
    pub range_cm: f64,
    pub depth_cm: Vec<f64>,
    pub relative_dose: Vec<f64>,
}

/// Summary of an inverse Compton scattering setup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComptonYieldReport {
    pub gamma: f64,
    pub electron_current_ma: f64,
    pub electrons_total: f64,
    pub laser_photons: f64,
    pub overlap_area_m2: f64,
    pub photons_per_pulse: f64,
    pub photons_per_second: f64,
    pub photon_energy_max_ev: f64,
    /// `None` when no quadrature capability was available.
    pub fraction_above_threshold: Option<f64>,
    pub photons_above_threshold_per_second: Option<f64>,
}

/// Thomson angular distribution sampled on `0..5/γ`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AngularDistribution {
    pub theta_rad: Vec<f64>,
    /// (1/σ_T)·(dσ/dΩ)·sinθ
    pub normalized_cross_section: Vec<f64>,
    pub photon_energy_kev: Vec<f64>,
}

/// Scattered photon energy spectrum, normalized to unit area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotonSpectrum {
    pub energy_kev: Vec<f64>,
    pub density: Vec<f64>,
}

/// Alpha magnet extents at one beam energy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExcursionSample {
    pub energy_mev: f64,
    pub beta_gamma: f64,
    pub path_length_m: f64,
    pub max_excursion_m: f64,
    pub vertical_excursion_m: f64,
}

/// Timing compression sensitivity at one beam energy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimingSensitivitySample {
    pub energy_mev: f64,
    pub beta_gamma: f64,
    /// ds/d(βγ) in metres per unit βγ
    pub ds_dbeta_gamma_m: f64,
    pub dt_de_ps_per_kev: f64,
    /// (dt per keV) / T_RF, in per-mille
    pub timing_permille: f64,
    /// (1 keV)/E, in per-mille
    pub energy_spread_permille: f64,
}

/// Energy at which the path length matches the operating value for one current.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OperatingPoint {
    pub current_a: f64,
    pub gradient_t_per_m: f64,
    pub beta_gamma: f64,
    pub energy_mev: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatingReference {
    pub path_length_m: f64,
    pub max_excursion_m: f64,
    pub vertical_excursion_m: f64,
    pub points: Vec<OperatingPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub const ORIGIN: Point2 = Point2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Point2 { x, y }
    }
}

/// Mirror-symmetric rosette branches in the bend plane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosetteBranches {
    pub upper: Vec<Point2>,
    pub lower: Vec<Point2>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryGeometry {
    pub energy_mev: f64,
    pub current_a: f64,
    pub path_length_m: f64,
    pub max_excursion_m: f64,
    pub vertical_excursion_m: f64,
    pub branches: RosetteBranches,
}

/// Straight entrance and exit legs of the alpha magnet, both starting at the
/// origin and extending into x < 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuideLines {
    pub entrance: Vec<Point2>,
    pub exit: Vec<Point2>,
}
