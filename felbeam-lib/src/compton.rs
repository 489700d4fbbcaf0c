//! Inverse Compton scattering of a laser pulse off the electron bunch, in
//! the Thomson limit.

use std::f64::consts::PI;

use log::warn;

use felbeam_data::{AngularDistribution, ComptonYieldReport, PhotonSpectrum};

use crate::beam::{BeamPulseParameters, LaserParameters};
use crate::error::{require_positive, Result};
use crate::grid::linspace;
use crate::kinematics::gamma_from_kinetic_energy;
use crate::physics::BeamPhysics;

impl BeamPhysics {
    /// Scattered photons per pulse: σ_T·N_e·N_γ/A, with A floored to avoid
    /// the zero-area singularity.
    pub fn ics_yield_per_pulse(&self, electrons: f64, photons: f64, overlap_area_m2: f64) -> f64 {
        let area = overlap_area_m2.max(self.tolerances().overlap_area_floor);
        self.constants().thomson_cross_section() * electrons * photons / area
    }

    /// Thomson differential cross section dσ/dΩ = r_e²(1 + cos²θ)/2 (m²/sr).
    pub fn thomson_dsigma_domega(&self, theta: f64) -> f64 {
        let r_e = self.constants().classical_electron_radius();
        let c = theta.cos();
        0.5 * r_e * r_e * (1.0 + c * c)
    }

    pub fn thomson_dsigma_domega_all(&self, thetas: &[f64]) -> Vec<f64> {
        thetas.iter().map(|&t| self.thomson_dsigma_domega(t)).collect()
    }

    /// Electron recoil parameter ξ = 4γE_L/(m_e c²).
    pub fn recoil_factor(&self, gamma: f64, laser_photon_j: f64) -> f64 {
        4.0 * gamma * laser_photon_j / self.constants().me_c2_j()
    }

    /// Compton edge (J): 4γ²E_L/(1 + ξ).
    pub fn photon_energy_max(&self, gamma: f64, laser_photon_j: f64) -> f64 {
        4.0 * gamma * gamma * laser_photon_j / (1.0 + self.recoil_factor(gamma, laser_photon_j))
    }

    /// Scattered photon energy (J) at angle θ from the beam axis.
    pub fn photon_energy_vs_angle(&self, gamma: f64, laser_photon_j: f64, theta: f64) -> f64 {
        let xi = self.recoil_factor(gamma, laser_photon_j);
        4.0 * gamma * gamma * laser_photon_j / (1.0 + xi + gamma * gamma * theta * theta)
    }

    /// Largest angle at which scattered photons still reach `threshold_j`.
    ///
    /// `None` when even the on-axis photons fall short of the threshold,
    /// including a threshold exactly at the Compton edge.
    pub fn threshold_angle(&self, gamma: f64, laser_photon_j: f64, threshold_j: f64) -> Option<f64> {
        if threshold_j <= 0.0 {
            return Some(PI);
        }
        // the radicand rounds to a tiny positive value at the edge itself
        if threshold_j >= self.photon_energy_max(gamma, laser_photon_j) {
            return None;
        }
        let radicand = 4.0 * gamma * gamma * laser_photon_j / threshold_j
            - 1.0
            - self.recoil_factor(gamma, laser_photon_j);
        if radicand > 0.0 {
            Some(radicand.sqrt() / gamma)
        } else {
            None
        }
    }

    /// Threshold fraction per unit azimuth: ∫ sinθ·(dσ/dΩ) dθ / σ_T from 0 to
    /// the threshold angle (capped at π).
    ///
    /// Returns exactly zero without integrating when the threshold is at or
    /// above the Compton edge. A zero threshold gives 1/(2π); see
    /// [`BeamPhysics::total_fraction_above_threshold`] for the fraction of
    /// the full cross section.
    pub fn fraction_above_threshold(
        &self,
        gamma: f64,
        laser_photon_j: f64,
        threshold_j: f64,
    ) -> Result<f64> {
        require_positive("gamma", gamma)?;
        require_positive("laser photon energy", laser_photon_j)?;

        let Some(theta_t) = self.threshold_angle(gamma, laser_photon_j, threshold_j) else {
            return Ok(0.0);
        };
        let quadrature = self.quadrature()?;

        let k = self.constants();
        let r_e = k.classical_electron_radius();
        let scale = 0.5 * r_e * r_e / k.thomson_cross_section();
        let integrand = |theta: f64| {
            let c = theta.cos();
            scale * (1.0 + c * c) * theta.sin()
        };

        let estimate = quadrature.integrate(&integrand, 0.0, theta_t.min(PI))?;
        Ok(estimate.value.clamp(0.0, 1.0 / (2.0 * PI)))
    }

    /// Fraction of the total Thomson cross section scattered into photons
    /// above `threshold_j`, integrated over azimuth. Lies in [0, 1].
    pub fn total_fraction_above_threshold(
        &self,
        gamma: f64,
        laser_photon_j: f64,
        threshold_j: f64,
    ) -> Result<f64> {
        let per_azimuth = self.fraction_above_threshold(gamma, laser_photon_j, threshold_j)?;
        Ok((2.0 * PI * per_azimuth).min(1.0))
    }

    /// One-shot yield summary for a beam/laser pair.
    ///
    /// When the integration capability has been removed the threshold fields
    /// are `None`; integration failures are returned as errors.
    pub fn quick_report(
        &self,
        beam: &BeamPulseParameters,
        laser: &LaserParameters,
        threshold_ev: f64,
    ) -> Result<ComptonYieldReport> {
        let k = self.constants();
        let gamma = gamma_from_kinetic_energy(beam.kinetic_energy_mev, k.electron_rest_energy_mev)?;
        require_positive("macropulse duration", beam.macropulse_duration_us)?;
        require_positive("laser wavelength", laser.wavelength_um)?;

        let electrons_total = beam.electrons_total();
        let current_a = beam.macropulse_current();

        let laser_photon_j = laser.photon_energy_j();
        let laser_photons = laser.photons_per_pulse();
        let overlap_area_m2 = laser.overlap_area_m2();

        let photons_per_pulse = self.ics_yield_per_pulse(electrons_total, laser_photons, overlap_area_m2);
        let photons_per_second = photons_per_pulse * beam.repetition_rate_hz;
        let photon_energy_max_ev =
            self.photon_energy_max(gamma, laser_photon_j) / k.elementary_charge;

        let fraction = if self.has_quadrature() {
            Some(self.fraction_above_threshold(
                gamma,
                laser_photon_j,
                threshold_ev * k.elementary_charge,
            )?)
        } else {
            warn!("no quadrature capability; threshold yield omitted from report");
            None
        };

        Ok(ComptonYieldReport {
            gamma,
            electron_current_ma: current_a * 1e3,
            electrons_total,
            laser_photons,
            overlap_area_m2,
            photons_per_pulse,
            photons_per_second,
            photon_energy_max_ev,
            fraction_above_threshold: fraction,
            photons_above_threshold_per_second: fraction.map(|f| f * photons_per_second),
        })
    }

    /// Angular distribution over `0..5/γ` with `samples` points.
    pub fn angular_distribution(
        &self,
        gamma: f64,
        laser_photon_j: f64,
        samples: usize,
    ) -> Result<AngularDistribution> {
        require_positive("gamma", gamma)?;
        let sigma_t = self.constants().thomson_cross_section();
        let e_charge = self.constants().elementary_charge;

        let theta_rad = linspace(0.0, 5.0 / gamma, samples);
        let normalized_cross_section = theta_rad
            .iter()
            .map(|&t| self.thomson_dsigma_domega(t) * t.sin() / sigma_t)
            .collect();
        let photon_energy_kev = theta_rad
            .iter()
            .map(|&t| self.photon_energy_vs_angle(gamma, laser_photon_j, t) / e_charge / 1e3)
            .collect();

        Ok(AngularDistribution {
            theta_rad,
            normalized_cross_section,
            photon_energy_kev,
        })
    }

    /// Photon energy spectrum (1/σ_T)·dσ/dE_γ, histogrammed into `bins` bins
    /// from zero to the Compton edge and normalized to unit area.
    pub fn photon_spectrum(
        &self,
        gamma: f64,
        laser_photon_j: f64,
        theta_samples: usize,
        bins: usize,
    ) -> Result<PhotonSpectrum> {
        require_positive("gamma", gamma)?;
        require_positive("laser photon energy", laser_photon_j)?;
        if theta_samples < 2 || bins == 0 {
            return Ok(PhotonSpectrum {
                energy_kev: Vec::new(),
                density: Vec::new(),
            });
        }

        let e_charge = self.constants().elementary_charge;
        let thetas = linspace(0.0, 5.0 / gamma, theta_samples);
        let d_theta = thetas[1] - thetas[0];

        let e_max_kev = self.photon_energy_max(gamma, laser_photon_j) / e_charge / 1e3;
        let width = e_max_kev / bins as f64;

        let mut density = vec![0.0_f64; bins];
        for &t in &thetas {
            let e_kev = self.photon_energy_vs_angle(gamma, laser_photon_j, t) / e_charge / 1e3;
            let weight = self.thomson_dsigma_domega(t) * t.sin() * d_theta;
            // the top edge belongs to the last bin
            let idx = ((e_kev / width) as usize).min(bins - 1);
            density[idx] += weight;
        }

        let area: f64 = density.iter().sum::<f64>() * width;
        if area > 0.0 {
            for v in &mut density {
                *v /= area;
            }
        }

        let energy_kev = (0..bins).map(|i| (i as f64 + 0.5) * width).collect();
        Ok(PhotonSpectrum { energy_kev, density })
    }
}
