//! WASM bindings for felbeam.
//!
//! Build with:
//! ```sh
//! wasm-pack build -p felbeam-wasm
//! ```
//!
//! Records are returned as plain JS objects; polylines are also available
//! as interleaved `[x0, y0, x1, y1, ...]` `Float64Array`s. Every binding
//! uses the configuration last installed with [`configure`], or the
//! defaults.

use std::cell::RefCell;

use js_sys::Float64Array;
use serde::Serialize;
use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;

use felbeam::felbeam_data::Point2;
use felbeam::kinematics;
use felbeam::{BeamPhysics, BeamPulseParameters, FelConfig, LaserParameters, ParticleSpecies};

thread_local! {
    static PHYSICS: RefCell<BeamPhysics> = RefCell::new(BeamPhysics::new());
}

fn physics() -> BeamPhysics {
    PHYSICS.with(|p| p.borrow().clone())
}

fn err(e: felbeam::FelError) -> JsError {
    JsError::new(&e.to_string())
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsError::new(&e.to_string()))
}

/// `undefined` and `null` fall back to the record's defaults.
fn from_js_or_default<T: DeserializeOwned + Default>(value: JsValue) -> Result<T, JsError> {
    if value.is_undefined() || value.is_null() {
        return Ok(T::default());
    }
    serde_wasm_bindgen::from_value(value).map_err(|e| JsError::new(&e.to_string()))
}

fn flatten(points: &[Point2]) -> Float64Array {
    let flat: Vec<f64> = points.iter().flat_map(|p| [p.x, p.y]).collect();
    Float64Array::from(flat.as_slice())
}

// ── Kinematics ──

#[wasm_bindgen]
pub fn beta_gamma_from_energy(energy_mev: f64) -> f64 {
    kinematics::beta_gamma_from_energy(energy_mev)
}

#[wasm_bindgen]
pub fn energy_from_beta_gamma(beta_gamma: f64) -> f64 {
    kinematics::energy_from_beta_gamma(beta_gamma)
}

/// Returns `[gamma, beta]` for a particle name or `"A,Z"` isotope.
#[wasm_bindgen]
pub fn relativistic_parameters(energy_mev: f64, particle: &str) -> Result<Vec<f64>, JsError> {
    let species = ParticleSpecies::parse(particle).map_err(err)?;
    let (gamma, beta) =
        kinematics::relativistic_parameters(energy_mev, species.rest_energy_mev).map_err(err)?;
    Ok(vec![gamma, beta])
}

#[wasm_bindgen]
pub fn particle(spec: &str) -> Result<JsValue, JsError> {
    to_js(&ParticleSpecies::parse(spec).map_err(err)?)
}

// ── Materials and deposition ──

#[wasm_bindgen]
pub fn material_names() -> Vec<String> {
    physics()
        .materials()
        .names()
        .into_iter()
        .map(String::from)
        .collect()
}

#[wasm_bindgen]
pub fn material(name: &str) -> Result<JsValue, JsError> {
    to_js(physics().material(name).map_err(err)?)
}

#[wasm_bindgen]
pub fn charge_per_macropulse(currents_a: &[f64], durations_s: &[f64]) -> Result<JsValue, JsError> {
    to_js(&physics().charge_per_macropulse(currents_a, durations_s))
}

/// Power and heating sweep; `particle` is a name or `"A,Z"` isotope.
#[wasm_bindgen]
pub fn power_table(
    currents_a: &[f64],
    durations_s: &[f64],
    rep_rates_hz: &[f64],
    energies_mev: &[f64],
    penetration_depth_m: f64,
    particle: &str,
) -> Result<JsValue, JsError> {
    let species = ParticleSpecies::parse(particle).map_err(err)?;
    let rows = physics()
        .power_table(
            currents_a,
            durations_s,
            rep_rates_hz,
            energies_mev,
            penetration_depth_m,
            &species,
        )
        .map_err(err)?;
    to_js(&rows)
}

#[wasm_bindgen]
pub fn range_empirical(material: &str, energies_mev: &[f64]) -> Result<JsValue, JsError> {
    to_js(&physics().range_empirical(material, energies_mev).map_err(err)?)
}

#[wasm_bindgen]
pub fn range_analytic(material: &str, energies_mev: &[f64]) -> Result<JsValue, JsError> {
    to_js(&physics().range_analytic(material, energies_mev).map_err(err)?)
}

#[wasm_bindgen]
pub fn deposition_profile(energy_mev: f64, material: &str) -> Result<JsValue, JsError> {
    to_js(&physics().deposition_profile(energy_mev, material).map_err(err)?)
}

// ── Inverse Compton scattering ──

/// Yield summary. `beam` and `laser` are partial parameter objects; missing
/// fields take the default operating point.
#[wasm_bindgen]
pub fn quick_report(beam: JsValue, laser: JsValue, threshold_ev: f64) -> Result<JsValue, JsError> {
    let beam: BeamPulseParameters = from_js_or_default(beam)?;
    let laser: LaserParameters = from_js_or_default(laser)?;
    to_js(&physics().quick_report(&beam, &laser, threshold_ev).map_err(err)?)
}

#[wasm_bindgen]
pub fn angular_distribution(gamma: f64, wavelength_um: f64, samples: usize) -> Result<JsValue, JsError> {
    let laser_photon_j = kinematics::photon_energy_from_wavelength(wavelength_um);
    to_js(
        &physics()
            .angular_distribution(gamma, laser_photon_j, samples)
            .map_err(err)?,
    )
}

#[wasm_bindgen]
pub fn photon_spectrum(
    gamma: f64,
    wavelength_um: f64,
    theta_samples: usize,
    bins: usize,
) -> Result<JsValue, JsError> {
    let laser_photon_j = kinematics::photon_energy_from_wavelength(wavelength_um);
    to_js(
        &physics()
            .photon_spectrum(gamma, laser_photon_j, theta_samples, bins)
            .map_err(err)?,
    )
}

// ── Alpha magnet ──

#[wasm_bindgen]
pub fn trajectory_geometry(energy_mev: f64, current_a: f64) -> Result<JsValue, JsError> {
    to_js(&physics().trajectory_geometry(energy_mev, current_a).map_err(err)?)
}

/// One rosette branch as an interleaved xy array; `branch` is "upper" or
/// "lower".
#[wasm_bindgen]
pub fn rosette_polyline(energy_mev: f64, current_a: f64, branch: &str) -> Result<Float64Array, JsError> {
    let geometry = physics().trajectory_geometry(energy_mev, current_a).map_err(err)?;
    match branch.to_lowercase().as_str() {
        "upper" => Ok(flatten(&geometry.branches.upper)),
        "lower" => Ok(flatten(&geometry.branches.lower)),
        _ => Err(JsError::new(&format!("unknown rosette branch: {branch}"))),
    }
}

#[wasm_bindgen]
pub fn excursion_sweep(energies_mev: &[f64], current_a: f64) -> Result<JsValue, JsError> {
    to_js(&physics().excursion_sweep(energies_mev, current_a).map_err(err)?)
}

#[wasm_bindgen]
pub fn timing_compression_sensitivity(
    energies_mev: &[f64],
    current_a: f64,
    rf_frequency_hz: f64,
) -> Result<JsValue, JsError> {
    to_js(
        &physics()
            .timing_compression_sensitivity(energies_mev, current_a, rf_frequency_hz)
            .map_err(err)?,
    )
}

#[wasm_bindgen]
pub fn operating_reference(path_length_m: f64, currents_a: &[f64]) -> Result<JsValue, JsError> {
    to_js(&physics().operating_reference(path_length_m, currents_a).map_err(err)?)
}

/// Entrance (`"entrance"`) or exit (`"exit"`) leg as an interleaved xy array.
#[wasm_bindgen]
pub fn guide_polyline(length_m: f64, samples: usize, leg: &str) -> Result<Float64Array, JsError> {
    let guides = physics().entrance_exit_guides(length_m, samples).map_err(err)?;
    match leg.to_lowercase().as_str() {
        "entrance" => Ok(flatten(&guides.entrance)),
        "exit" => Ok(flatten(&guides.exit)),
        _ => Err(JsError::new(&format!("unknown guide leg: {leg}"))),
    }
}

// ── Configuration ──

/// Parse and validate a TOML configuration, returning it with defaults
/// filled in. Does not change the active configuration.
#[wasm_bindgen]
pub fn parse_config(toml: &str) -> Result<JsValue, JsError> {
    to_js(&FelConfig::from_toml_str(toml).map_err(err)?)
}

/// Install a TOML configuration for all later calls. An invalid document
/// leaves the active configuration unchanged.
#[wasm_bindgen]
pub fn configure(toml: &str) -> Result<JsValue, JsError> {
    let config = FelConfig::from_toml_str(toml).map_err(err)?;
    let configured = BeamPhysics::from_config(&config).map_err(err)?;
    PHYSICS.with(|p| *p.borrow_mut() = configured);
    to_js(&config)
}

/// Restore the default configuration.
#[wasm_bindgen]
pub fn reset_config() {
    PHYSICS.with(|p| *p.borrow_mut() = BeamPhysics::new());
}

