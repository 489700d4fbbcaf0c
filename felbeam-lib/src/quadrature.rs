//! Numeric integration capability.
//!
//! Models that need a definite integral take a [`Quadrature`] rather than a
//! concrete routine, so the integrator can be swapped or removed on the
//! [`crate::BeamPhysics`] façade.

use log::warn;

use crate::config::QuadratureConfig;
use crate::error::{FelError, Result};

/// Result of a definite integral.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadratureEstimate {
    pub value: f64,
    pub abs_error: f64,
    pub subdivisions: usize,
}

pub trait Quadrature: Send + Sync {
    /// Integrate `f` over `[a, b]`.
    fn integrate(&self, f: &dyn Fn(f64) -> f64, a: f64, b: f64) -> Result<QuadratureEstimate>;
}

// 15-point Kronrod abscissae on [0, 1]; the odd entries are the 7-point
// Gauss abscissae.
const XGK: [f64; 8] = [
    0.991_455_371_120_812_6,
    0.949_107_912_342_758_5,
    0.864_864_423_359_769_1,
    0.741_531_185_599_394_4,
    0.586_087_235_467_691_1,
    0.405_845_151_377_397_2,
    0.207_784_955_007_898_5,
    0.0,
];

const WGK: [f64; 8] = [
    0.022_935_322_010_529_22,
    0.063_092_092_629_978_55,
    0.104_790_010_322_250_2,
    0.140_653_259_715_525_9,
    0.169_004_726_639_267_9,
    0.190_350_578_064_785_4,
    0.204_432_940_075_298_9,
    0.209_482_141_084_727_8,
];

const WG: [f64; 4] = [
    0.129_484_966_168_869_7,
    0.279_705_391_489_276_7,
    0.381_830_050_505_118_9,
    0.417_959_183_673_469_4,
];

/// One Gauss–Kronrod 7/15 panel: (integral, error estimate).
fn gauss_kronrod_15(f: &dyn Fn(f64) -> f64, a: f64, b: f64) -> (f64, f64) {
    let center = 0.5 * (a + b);
    let half = 0.5 * (b - a);

    let fc = f(center);
    let mut kronrod = fc * WGK[7];
    let mut gauss = fc * WG[3];

    for j in 0..7 {
        let dx = half * XGK[j];
        let pair = f(center - dx) + f(center + dx);
        kronrod += WGK[j] * pair;
        if j % 2 == 1 {
            gauss += WG[j / 2] * pair;
        }
    }

    (kronrod * half, ((kronrod - gauss) * half).abs())
}

#[derive(Debug, Clone, Copy)]
struct Panel {
    a: f64,
    b: f64,
    value: f64,
    error: f64,
}

/// Globally adaptive Gauss–Kronrod integrator.
///
/// The panel with the largest error estimate is bisected until the summed
/// error meets `max(abs_tolerance, rel_tolerance·|I|)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussKronrod {
    pub abs_tolerance: f64,
    pub rel_tolerance: f64,
    pub max_subdivisions: usize,
}

impl Default for GaussKronrod {
    fn default() -> Self {
        Self::from(QuadratureConfig::default())
    }
}

impl From<QuadratureConfig> for GaussKronrod {
    fn from(config: QuadratureConfig) -> Self {
        GaussKronrod {
            abs_tolerance: config.abs_tolerance,
            rel_tolerance: config.rel_tolerance,
            max_subdivisions: config.max_subdivisions,
        }
    }
}

impl Quadrature for GaussKronrod {
    fn integrate(&self, f: &dyn Fn(f64) -> f64, a: f64, b: f64) -> Result<QuadratureEstimate> {
        let failure = |reason: String| {
            warn!("quadrature failed on [{a}, {b}]: {reason}");
            FelError::NumericIntegration {
                lower: a,
                upper: b,
                reason,
            }
        };

        if !(a.is_finite() && b.is_finite()) {
            return Err(failure("integration limits must be finite".to_string()));
        }
        if a == b {
            return Ok(QuadratureEstimate {
                value: 0.0,
                abs_error: 0.0,
                subdivisions: 0,
            });
        }

        let (value, error) = gauss_kronrod_15(f, a, b);
        let mut panels = vec![Panel { a, b, value, error }];

        loop {
            let total: f64 = panels.iter().map(|p| p.value).sum();
            let total_error: f64 = panels.iter().map(|p| p.error).sum();

            if !(total.is_finite() && total_error.is_finite()) {
                return Err(failure("integrand produced a non-finite value".to_string()));
            }
            if total_error <= self.abs_tolerance.max(self.rel_tolerance * total.abs()) {
                return Ok(QuadratureEstimate {
                    value: total,
                    abs_error: total_error,
                    subdivisions: panels.len() - 1,
                });
            }
            if panels.len() > self.max_subdivisions {
                return Err(failure(format!(
                    "error estimate {total_error:e} after {} subdivisions",
                    self.max_subdivisions
                )));
            }

            let worst = panels
                .iter()
                .enumerate()
                .max_by(|(_, p), (_, q)| p.error.total_cmp(&q.error))
                .map(|(i, _)| i)
                .unwrap_or(0);
            let panel = panels.swap_remove(worst);
            let mid = 0.5 * (panel.a + panel.b);
            for (lo, hi) in [(panel.a, mid), (mid, panel.b)] {
                let (value, error) = gauss_kronrod_15(f, lo, hi);
                panels.push(Panel {
                    a: lo,
                    b: hi,
                    value,
                    error,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polynomial_exact() {
        let q = GaussKronrod::default();
        let est = q.integrate(&|x| 3.0 * x * x, 0.0, 2.0).unwrap();
        assert!((est.value - 8.0).abs() < 1e-12);
        assert_eq!(est.subdivisions, 0);
    }

    #[test]
    fn test_sine() {
        let q = GaussKronrod::default();
        let est = q.integrate(&f64::sin, 0.0, std::f64::consts::PI).unwrap();
        assert!((est.value - 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_reversed_and_empty_interval() {
        let q = GaussKronrod::default();
        let est = q.integrate(&|x| x, 1.0, 0.0).unwrap();
        assert!((est.value + 0.5).abs() < 1e-12);
        assert_eq!(q.integrate(&|x| x, 1.0, 1.0).unwrap().value, 0.0);
    }

    #[test]
    fn test_sharp_peak_needs_subdivision() {
        let q = GaussKronrod {
            max_subdivisions: 200,
            ..GaussKronrod::default()
        };
        let est = q.integrate(&|x| 1.0 / (1e-2 + x * x), -1.0, 1.0).unwrap();
        let exact = 2.0 / 0.1 * 10.0f64.atan();
        assert!((est.value - exact).abs() / exact < 1e-7, "{} vs {exact}", est.value);
        assert!(est.subdivisions > 0);
    }

    #[test]
    fn test_non_convergence_is_error() {
        let q = GaussKronrod {
            max_subdivisions: 2,
            ..GaussKronrod::default()
        };
        let err = q.integrate(&|x| (1.0 / x).sin(), 1e-6, 1.0).unwrap_err();
        assert!(matches!(err, FelError::NumericIntegration { .. }));
    }

    #[test]
    fn test_non_finite_integrand_is_error() {
        let q = GaussKronrod::default();
        let err = q.integrate(&|_| f64::NAN, 0.0, 1.0).unwrap_err();
        assert!(matches!(err, FelError::NumericIntegration { .. }));
    }
}
