//! Alpha magnet: path length and excursion scaling, bunch timing
//! compression, and the rosette trajectory in the bend plane.

use log::debug;

use felbeam_data::{
    ExcursionSample, GuideLines, OperatingPoint, OperatingReference, Point2, RosetteBranches,
    TimingSensitivitySample, TrajectoryGeometry,
};

use crate::error::{require_non_negative, require_positive, FelError, Result};
use crate::grid::linspace;
use crate::kinematics::{beta_gamma_from_energy_with, energy_from_beta_gamma_with};
use crate::physics::BeamPhysics;

/// Samples per Bézier segment of the rosette.
const BEZIER_SAMPLES: usize = 200;

fn check_scaling_inputs(beta_gamma: f64, gradient: f64) -> Result<()> {
    require_positive("field gradient", gradient)?;
    require_non_negative("beta*gamma", beta_gamma)?;
    Ok(())
}

/// Cubic Bézier curve through control points `p`, sampled at `n` evenly
/// spaced parameter values including both ends.
fn cubic_bezier(p: [Point2; 4], n: usize) -> impl Iterator<Item = Point2> {
    linspace(0.0, 1.0, n).into_iter().map(move |t| {
        let u = 1.0 - t;
        let (b0, b1, b2, b3) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
        Point2::new(
            b0 * p[0].x + b1 * p[1].x + b2 * p[2].x + b3 * p[3].x,
            b0 * p[0].y + b1 * p[1].y + b2 * p[2].y + b3 * p[3].y,
        )
    })
}

impl BeamPhysics {
    /// Quadrupole field gradient (T/m) at excitation current `current_a`.
    pub fn field_gradient(&self, current_a: f64) -> f64 {
        self.alpha_magnet().gradient_per_current * current_a
    }

    /// Path length inside the magnet, s = S·√(βγ/g) (m).
    pub fn path_length(&self, beta_gamma: f64, gradient: f64) -> Result<f64> {
        check_scaling_inputs(beta_gamma, gradient)?;
        Ok(self.constants().alpha_s_coeff * (beta_gamma / gradient).sqrt())
    }

    /// Maximum excursion along the magnet axis, x = X·√(βγ/g) (m).
    pub fn max_excursion(&self, beta_gamma: f64, gradient: f64) -> Result<f64> {
        check_scaling_inputs(beta_gamma, gradient)?;
        Ok(self.constants().alpha_x_coeff * (beta_gamma / gradient).sqrt())
    }

    pub fn vertical_excursion(&self, max_excursion_m: f64) -> f64 {
        max_excursion_m * (0.5 * self.constants().alpha_theta_rad()).tan()
    }

    /// ds/d(βγ) = (S/2)/√g · βγ^(−1/2).
    pub fn d_path_length_d_momentum(&self, beta_gamma: f64, gradient: f64) -> Result<f64> {
        require_positive("field gradient", gradient)?;
        require_positive("beta*gamma", beta_gamma)?;
        Ok(0.5 * self.constants().alpha_s_coeff / gradient.sqrt() / beta_gamma.sqrt())
    }

    /// Arrival-time slope dt/dE through the magnet for each energy, compared
    /// with the RF period.
    ///
    /// Uses the closed-form relation of Eq. 13.43 in the design report,
    /// ds/d(βγ) = X/√g/√βγ. The per-mille timing metric is
    /// `1e-3·(dt/dE)/T_RF` with dt/dE in ps/keV and T_RF in ps; the reference
    /// column is the relative energy spread of a 1 keV slice, in per-mille.
    ///
    /// # Arguments
    /// * `energies_mev` - Kinetic energies (MeV), all positive
    /// * `current_a` - Alpha magnet excitation current (A)
    /// * `rf_frequency_hz` - Linac RF frequency (Hz)
    pub fn timing_compression_sensitivity(
        &self,
        energies_mev: &[f64],
        current_a: f64,
        rf_frequency_hz: f64,
    ) -> Result<Vec<TimingSensitivitySample>> {
        let gradient = require_positive("field gradient", self.field_gradient(current_a))?;
        let rf = require_positive("RF frequency", rf_frequency_hz)?;
        let k = self.constants();
        let tol = self.tolerances();
        let mc2 = k.electron_rest_energy_mev;
        let c = k.speed_of_light;
        let rf_period_ps = 1e12 / rf;

        energies_mev
            .iter()
            .map(|&energy| {
                let energy = require_positive("kinetic energy", energy)?;
                let gamma = 1.0 + energy / mc2;
                let gamma2 = (gamma * gamma).max(1.0 + tol.gamma_squared_margin);
                let beta = (1.0 - 1.0 / gamma2).sqrt();
                let beta_gamma = beta_gamma_from_energy_with(energy, mc2)?.max(tol.beta_gamma_floor);

                let s = k.alpha_s_coeff * (beta_gamma / gradient).sqrt();
                let ds_dbg = k.alpha_x_coeff / gradient.sqrt() / beta_gamma.sqrt();
                let dbg_de = 1.0 / (beta * mc2);
                let dbeta_de = 1.0 / (beta * gamma * gamma * gamma * mc2);

                // s/MeV
                let dt_de = ds_dbg * dbg_de / (beta * c) - s * dbeta_de / (beta * beta * c);
                let dt_de_ps_per_kev = dt_de * 1e9;

                Ok(TimingSensitivitySample {
                    energy_mev: energy,
                    beta_gamma,
                    ds_dbeta_gamma_m: ds_dbg,
                    dt_de_ps_per_kev,
                    timing_permille: 1e-3 * dt_de_ps_per_kev / rf_period_ps,
                    energy_spread_permille: 1e-3 * (1e-3 / energy),
                })
            })
            .collect()
    }

    /// Rosette-shaped trajectory through the magnet.
    ///
    /// Each branch leaves the origin along the bend angle, turns at the apex
    /// `(x_max, ±y_max)` and comes back to the origin, drawn as two cubic
    /// Bézier segments. `control_length` defaults to `x_max / 2`.
    pub fn rosette_trajectory(
        &self,
        max_excursion_m: f64,
        vertical_excursion_m: f64,
        control_length: Option<f64>,
    ) -> Result<RosetteBranches> {
        let x_max = require_non_negative("max excursion", max_excursion_m)?;
        let y_max = require_non_negative("vertical excursion", vertical_excursion_m)?;
        let l = match control_length {
            Some(l) => require_non_negative("control length", l)?,
            None => 0.5 * x_max,
        };

        let theta = self.constants().alpha_theta_rad();
        let (dx, dy) = (l * theta.cos(), l * theta.sin());
        let o = Point2::ORIGIN;
        let offset = |p: Point2, sx: f64, sy: f64| Point2::new(p.x + sx, p.y + sy);

        let branch = |apex: Point2, out_dy: f64| -> Vec<Point2> {
            let outward = [o, offset(o, dx, out_dy), offset(apex, -dx, -out_dy), apex];
            let back = [apex, offset(apex, -dx, out_dy), offset(o, dx, -out_dy), o];
            cubic_bezier(outward, BEZIER_SAMPLES)
                .chain(cubic_bezier(back, BEZIER_SAMPLES))
                .collect()
        };

        Ok(RosetteBranches {
            upper: branch(Point2::new(x_max, y_max), dy),
            lower: branch(Point2::new(x_max, -y_max), -dy),
        })
    }

    /// Path length, excursions and rosette for one beam energy and current.
    pub fn trajectory_geometry(&self, energy_mev: f64, current_a: f64) -> Result<TrajectoryGeometry> {
        let energy = require_non_negative("kinetic energy", energy_mev)?;
        let gradient = self.field_gradient(current_a);
        let beta_gamma =
            beta_gamma_from_energy_with(energy, self.constants().electron_rest_energy_mev)?;

        let path_length_m = self.path_length(beta_gamma, gradient)?;
        let max_excursion_m = self.max_excursion(beta_gamma, gradient)?;
        let vertical_excursion_m = self.vertical_excursion(max_excursion_m);
        let branches = self.rosette_trajectory(max_excursion_m, vertical_excursion_m, None)?;

        Ok(TrajectoryGeometry {
            energy_mev: energy,
            current_a,
            path_length_m,
            max_excursion_m,
            vertical_excursion_m,
            branches,
        })
    }

    /// Path length and excursions against beam energy at a fixed current.
    pub fn excursion_sweep(&self, energies_mev: &[f64], current_a: f64) -> Result<Vec<ExcursionSample>> {
        let gradient = require_positive("field gradient", self.field_gradient(current_a))?;
        let mc2 = self.constants().electron_rest_energy_mev;
        debug!("excursion sweep: {} energies at {current_a} A", energies_mev.len());

        energies_mev
            .iter()
            .map(|&energy| {
                let beta_gamma = beta_gamma_from_energy_with(energy, mc2)?;
                let max_excursion_m = self.max_excursion(beta_gamma, gradient)?;
                Ok(ExcursionSample {
                    energy_mev: energy,
                    beta_gamma,
                    path_length_m: self.path_length(beta_gamma, gradient)?,
                    max_excursion_m,
                    vertical_excursion_m: self.vertical_excursion(max_excursion_m),
                })
            })
            .collect()
    }

    /// Beam energy that gives path length `path_length_m` at each current.
    ///
    /// The excursions depend only on the path length, so they are shared by
    /// every operating point.
    pub fn operating_reference(&self, path_length_m: f64, currents_a: &[f64]) -> Result<OperatingReference> {
        let s_op = require_positive("path length", path_length_m)?;
        let k = self.constants();
        let ratio = s_op / k.alpha_s_coeff;
        let max_excursion_m = k.alpha_x_coeff * ratio;

        let points = currents_a
            .iter()
            .map(|&current_a| {
                let gradient = self.field_gradient(current_a);
                if !(gradient.is_finite() && gradient > 0.0) {
                    return Err(FelError::domain(
                        "field gradient",
                        format!("must be positive, got {gradient} at {current_a} A"),
                    ));
                }
                let beta_gamma = gradient * ratio * ratio;
                Ok(OperatingPoint {
                    current_a,
                    gradient_t_per_m: gradient,
                    beta_gamma,
                    energy_mev: energy_from_beta_gamma_with(beta_gamma, k.electron_rest_energy_mev)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(OperatingReference {
            path_length_m: s_op,
            max_excursion_m,
            vertical_excursion_m: self.vertical_excursion(max_excursion_m),
            points,
        })
    }

    /// Straight entrance (+θ) and exit (−θ) legs of length `length_m`, each
    /// sampled with `samples` points from the origin outward.
    pub fn entrance_exit_guides(&self, length_m: f64, samples: usize) -> Result<GuideLines> {
        let length = require_non_negative("guide length", length_m)?;
        let theta = self.constants().alpha_theta_rad();
        let (ux, uy) = (-theta.cos(), theta.sin());

        let leg = |sy: f64| -> Vec<Point2> {
            linspace(0.0, length, samples)
                .into_iter()
                .map(|d| Point2::new(d * ux, sy * d * uy))
                .collect()
        };

        Ok(GuideLines {
            entrance: leg(1.0),
            exit: leg(-1.0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bezier_endpoints() {
        let p = [
            Point2::ORIGIN,
            Point2::new(1.0, 1.0),
            Point2::new(2.0, 1.0),
            Point2::new(3.0, 0.0),
        ];
        let pts: Vec<Point2> = cubic_bezier(p, 11).collect();
        assert_eq!(pts.len(), 11);
        assert_eq!(pts[0], Point2::ORIGIN);
        assert!((pts[10].x - 3.0).abs() < 1e-12);
        assert!(pts[10].y.abs() < 1e-12);
        // symmetric control polygon peaks at t = 1/2 with y = 3/4
        assert!((pts[5].y - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_scaling_inputs_rejected() {
        assert!(check_scaling_inputs(1.0, 0.0).is_err());
        assert!(check_scaling_inputs(-1.0, 1.0).is_err());
        assert!(check_scaling_inputs(f64::NAN, 1.0).is_err());
        assert!(check_scaling_inputs(0.0, 1.0).is_ok());
    }
}
