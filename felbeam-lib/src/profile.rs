//! Unimodal shape capability used for deposition profiles.

use std::f64::consts::PI;

pub trait ProfileShape: Send + Sync {
    /// Density at `x` of a profile centred on `center` with spread `width`.
    fn density(&self, x: f64, center: f64, width: f64) -> f64;
}

/// Normal distribution probability density.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GaussianShape;

impl ProfileShape for GaussianShape {
    fn density(&self, x: f64, center: f64, width: f64) -> f64 {
        let z = (x - center) / width;
        (-0.5 * z * z).exp() / (width * (2.0 * PI).sqrt())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gaussian_peak_and_symmetry() {
        let g = GaussianShape;
        let peak = g.density(2.0, 2.0, 0.5);
        assert!((peak - 1.0 / (0.5 * (2.0 * PI).sqrt())).abs() < 1e-12);
        assert!((g.density(1.5, 2.0, 0.5) - g.density(2.5, 2.0, 0.5)).abs() < 1e-15);
        assert!(g.density(1.0, 2.0, 0.5) < peak);
    }
}
