//! Beam power, target heating and penetration depth.

use std::f64::consts::PI;

use log::debug;

use felbeam_data::{
    ChargeSample, DepositionProfile, MaterialTemperatureRise, PowerDepositionResult, RangeSample,
};

use crate::error::{require_positive, Result};
use crate::grid::linspace;
use crate::particles::ParticleSpecies;
use crate::physics::BeamPhysics;

/// Samples in a deposition profile.
const PROFILE_SAMPLES: usize = 200;

/// Negative and non-finite sweep values are treated as zero.
#[inline]
fn non_negative(x: f64) -> f64 {
    if x.is_finite() { x.max(0.0) } else { 0.0 }
}

/// Evenly spaced currents (A) from zero up to `max_current_a`.
pub fn current_linspace(max_current_a: f64, n: usize) -> Vec<f64> {
    linspace(0.0, non_negative(max_current_a), n)
}

impl BeamPhysics {
    /// Charge per macropulse, Q = I·t, for every (duration, current) pair.
    ///
    /// Currents in A, durations in s; charge is reported in pC.
    pub fn charge_per_macropulse(&self, currents_a: &[f64], durations_s: &[f64]) -> Vec<ChargeSample> {
        durations_s
            .iter()
            .flat_map(|&t| {
                currents_a.iter().map(move |&i| ChargeSample {
                    current_a: i,
                    pulse_duration_us: t * 1e6,
                    charge_pc: i * t * 1e12,
                })
            })
            .collect()
    }

    /// Beam power and heating rate for every (energy, rep rate, duration,
    /// current) combination, enumerated in that nesting order.
    ///
    /// The heated volume is the 6σ beam ellipse times `penetration_depth_m`.
    /// Every catalogue material gets a temperature rise entry.
    ///
    /// # Arguments
    /// * `currents_a` - Macropulse currents (A)
    /// * `durations_s` - Macropulse durations (s)
    /// * `rep_rates_hz` - Macropulse repetition rates (Hz)
    /// * `energies_mev` - Kinetic energies per particle (MeV)
    /// * `penetration_depth_m` - Depth of the heated volume (m)
    /// * `species` - Beam particle; its charge converts Q to a particle count
    pub fn power_table(
        &self,
        currents_a: &[f64],
        durations_s: &[f64],
        rep_rates_hz: &[f64],
        energies_mev: &[f64],
        penetration_depth_m: f64,
        species: &ParticleSpecies,
    ) -> Result<Vec<PowerDepositionResult>> {
        let depth = require_positive("penetration depth", penetration_depth_m)?;
        let charge = require_positive("particle charge", species.charge_c.abs())?;
        let volume_m3 = self.beam_spot().deposit_area_m2() * depth;
        let mev_to_j = self.constants().mev_to_j();

        // Heat capacity of the deposit volume, J/K, per material
        let heat_sinks: Vec<(&str, f64)> = self
            .materials()
            .iter()
            .map(|m| (m.name.as_str(), volume_m3 * m.density * m.specific_heat))
            .collect();

        let rows = energies_mev.len() * rep_rates_hz.len() * durations_s.len() * currents_a.len();
        debug!("power table: {rows} rows over {} materials", heat_sinks.len());

        let mut results = Vec::with_capacity(rows);
        for &energy in energies_mev {
            let energy = non_negative(energy);
            for &rep_rate in rep_rates_hz {
                let rep_rate = non_negative(rep_rate);
                for &duration in durations_s {
                    let duration = non_negative(duration);
                    for &current in currents_a {
                        let current = non_negative(current);
                        let particles = current * duration / charge;
                        let energy_per_pulse_j = particles * energy * mev_to_j;
                        let power_w = energy_per_pulse_j * rep_rate;

                        let temperature_rise = heat_sinks
                            .iter()
                            .map(|&(name, heat_capacity)| MaterialTemperatureRise {
                                material: name.to_string(),
                                rate_c_per_s: power_w / heat_capacity,
                            })
                            .collect();

                        results.push(PowerDepositionResult {
                            energy_mev: energy,
                            current_ma: current * 1e3,
                            rep_rate_hz: rep_rate,
                            pulse_duration_us: duration * 1e6,
                            power_w,
                            temperature_rise,
                        });
                    }
                }
            }
        }
        Ok(results)
    }

    /// Empirical power-law range, R = 0.1·E^1.5/ρ (cm, with ρ in g/cm³).
    ///
    /// A fast, low-fidelity cross-check for [`BeamPhysics::range_analytic`].
    pub fn range_empirical(&self, material: &str, energies_mev: &[f64]) -> Result<Vec<RangeSample>> {
        let props = self.material(material)?;
        let rho = props.density_g_cm3();
        Ok(energies_mev
            .iter()
            .map(|&e| RangeSample {
                material: props.name.clone(),
                energy_mev: e,
                penetration_depth_cm: 0.1 * non_negative(e).powf(1.5) / rho,
                stopping_power_mev_per_mm: None,
            })
            .collect())
    }

    /// Range from a Bethe-type electronic stopping power, R = E/S.
    ///
    /// S = 4π·r_e²·m_e c²·n_e/β² · [ln(2 m_e c² β²γ²/I) − β²]. The logarithm
    /// argument, β² and S are floored by the configured tolerances, so
    /// energies at or below zero give a zero range instead of an error.
    pub fn range_analytic(&self, material: &str, energies_mev: &[f64]) -> Result<Vec<RangeSample>> {
        let props = self.material(material)?;
        let k = self.constants();
        let tol = self.tolerances();

        let me_c2 = k.me_c2_j();
        let mev_to_j = k.mev_to_j();
        let r_e = k.classical_electron_radius();
        let n_e = props.electron_density(k.avogadro);
        let ionization_j = props.ionization_potential * k.elementary_charge;
        // J/m per unit of the bracketed log term, before the 1/β² factor
        let prefactor = 4.0 * PI * r_e * r_e * me_c2 * n_e;

        Ok(energies_mev
            .iter()
            .map(|&e| {
                let energy = non_negative(e);
                let gamma = 1.0 + energy * mev_to_j / me_c2;
                let beta2 = 1.0 - 1.0 / (gamma * gamma);

                let log_arg = (2.0 * me_c2 * beta2 * gamma * gamma / ionization_j).max(tol.log_floor);
                let stopping_j_per_m =
                    prefactor / beta2.max(tol.beta_squared_floor) * (log_arg.ln() - beta2);
                let stopping_mev_per_mm =
                    (stopping_j_per_m / mev_to_j / 1000.0).max(tol.stopping_power_floor);

                let range_mm = energy / stopping_mev_per_mm;
                RangeSample {
                    material: props.name.clone(),
                    energy_mev: e,
                    penetration_depth_cm: (range_mm / 10.0).max(0.0),
                    stopping_power_mev_per_mm: Some(stopping_mev_per_mm),
                }
            })
            .collect())
    }

    /// Relative dose against depth for a single beam energy.
    ///
    /// A unimodal profile centred on the analytic range with a width of 20 %
    /// of the range, sampled from the surface to `max(R + 2, 2)` cm and
    /// normalized to a unit peak.
    pub fn deposition_profile(&self, energy_mev: f64, material: &str) -> Result<DepositionProfile> {
        let shape = self.profile_shape()?;
        let range = self.range_analytic(material, &[energy_mev])?;
        let sample = &range[0];
        let range_cm = sample.penetration_depth_cm;

        let depth_cm = linspace(0.0, (range_cm + 2.0).max(2.0), PROFILE_SAMPLES);
        let width = (0.2 * range_cm).max(self.tolerances().profile_width_floor);

        let mut relative_dose: Vec<f64> = depth_cm
            .iter()
            .map(|&x| shape.density(x, range_cm, width))
            .collect();
        let peak = relative_dose.iter().copied().fold(0.0_f64, f64::max);
        let scale = if peak > 0.0 { peak } else { 1.0 };
        for v in &mut relative_dose {
            *v /= scale;
        }

        Ok(DepositionProfile {
            material: sample.material.clone(),
            energy_mev,
            range_cm,
            depth_cm,
            relative_dose,
        })
    }
}
