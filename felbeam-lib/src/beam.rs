//! Caller-supplied beam and laser parameter records.

use serde::{Deserialize, Serialize};

use crate::constants::RF_FREQUENCY_DEFAULT;
use crate::kinematics::{
    bunches_per_macropulse, electrons_per_bunch, gaussian_overlap_area, macropulse_current,
    photon_energy_from_wavelength,
};

/// Electron macropulse structure. Derived quantities are computed on demand.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeamPulseParameters {
    pub bunch_charge_pc: f64,
    pub rf_frequency_hz: f64,
    pub macropulse_duration_us: f64,
    pub repetition_rate_hz: f64,
    pub kinetic_energy_mev: f64,
}

impl Default for BeamPulseParameters {
    fn default() -> Self {
        BeamPulseParameters {
            bunch_charge_pc: 60.0,
            rf_frequency_hz: RF_FREQUENCY_DEFAULT,
            macropulse_duration_us: 4.0,
            repetition_rate_hz: 10.0,
            kinetic_energy_mev: 45.0,
        }
    }
}

impl BeamPulseParameters {
    pub fn bunches_per_macropulse(&self) -> f64 {
        bunches_per_macropulse(self.macropulse_duration_us, self.rf_frequency_hz)
    }

    pub fn electrons_per_bunch(&self) -> f64 {
        electrons_per_bunch(self.bunch_charge_pc)
    }

    pub fn electrons_total(&self) -> f64 {
        self.electrons_per_bunch() * self.bunches_per_macropulse()
    }

    /// Average current over the macropulse (A).
    pub fn macropulse_current(&self) -> f64 {
        macropulse_current(self.electrons_total(), self.macropulse_duration_us)
    }
}

/// Interaction laser pulse.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaserParameters {
    pub wavelength_um: f64,
    pub pulse_energy_mj: f64,
    /// RMS spot size at the interaction point, shared with the electron beam
    pub spot_sigma_um: f64,
}

impl Default for LaserParameters {
    fn default() -> Self {
        LaserParameters {
            wavelength_um: 3.0,
            pulse_energy_mj: 10.0,
            spot_sigma_um: 30.0,
        }
    }
}

impl LaserParameters {
    /// Single photon energy (J).
    pub fn photon_energy_j(&self) -> f64 {
        photon_energy_from_wavelength(self.wavelength_um)
    }

    pub fn photons_per_pulse(&self) -> f64 {
        self.pulse_energy_mj * 1e-3 / self.photon_energy_j()
    }

    pub fn overlap_area_m2(&self) -> f64 {
        gaussian_overlap_area(self.spot_sigma_um, self.spot_sigma_um)
    }
}
