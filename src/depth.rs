//! Column density and optical-depth conversion.
//!
//! Turns a raw absorption-coefficient array (cm^2 / molecule, one entry per
//! wavenumber) into the optical depth of a 1 km slab of atmosphere. The
//! column number density comes from integrating the ISA density profile
//! over the slab with double-exponential quadrature.

use crate::atmosphere;
use crate::constants::{CM2_TO_M2, MEAN_MOLECULAR_MASS_AIR, PPM_TO_FRACTION};

/// Absolute error target handed to the quadrature routine. Column densities
/// are O(1e28) particles / m^2, so this is a ~1e-12 relative tolerance; the
/// double-exponential rule converges well past it for the smooth ISA
/// density profile.
const QUADRATURE_TARGET_ERROR: f64 = 1e16;

/// Number of air molecules per m^3 at the given altitude (m), assuming an
/// ideal gas of mean dry-air composition.
///
/// # Panics
///
/// Panics if `altitude_m` is outside the atmosphere model range.
pub fn number_density(altitude_m: f64) -> f64 {
    atmosphere::density(altitude_m) / MEAN_MOLECULAR_MASS_AIR
}

/// Number of air molecules in a 1 m^2 column between two altitudes (m),
/// by quadrature of [`number_density`].
///
/// Any numeric failure inside the integrator propagates to the caller
/// unhandled; a degenerate zero-width slab integrates to ~0.
pub fn column_density(alt_0: f64, alt_1: f64) -> f64 {
    quadrature::integrate(number_density, alt_0, alt_1, QUADRATURE_TARGET_ERROR).integral
}

/// Optical depth of a single gas between two altitudes, per wavenumber.
///
/// `abs_coef` holds absorption cross sections in cm^2 / molecule as produced
/// by the line-shape provider; the result is dimensionless optical depth
/// (tau), one value per input entry.
///
/// The ppm scaling deliberately uses [`PPM_TO_FRACTION`] = 1e-9 to stay
/// value-compatible with previously generated stores; the 1e-4 factor
/// converts the cm^2 cross sections to m^2.
pub fn optical_depth(alt_0: f64, alt_1: f64, ppm_conc: f64, abs_coef: &[f64]) -> Vec<f64> {
    let particles = column_density(alt_0, alt_1) * ppm_conc * PPM_TO_FRACTION;
    abs_coef.iter().map(|k| particles * k * CM2_TO_M2).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn sea_level_number_density() {
        // Loschmidt-like value for air at 288.15 K: ~2.55e25 m^-3
        let n = number_density(0.0);
        assert!((n - 2.55e25).abs() / 2.55e25 < 0.01, "n(0) = {n}");
    }

    #[test]
    fn column_density_of_first_slab() {
        // ~1 km of near-surface air: a bit under n(0) * 1000 because
        // density falls with altitude
        let column = column_density(0.0, 1000.0);
        let upper_bound = number_density(0.0) * 1000.0;
        assert!(column > 0.9 * upper_bound && column < upper_bound);
    }

    #[test]
    fn zero_width_slab_gives_zero_depth() {
        let coefs = vec![1e-20, 5e-22, 3.4e-19];
        for tau in optical_depth(500.0, 500.0, 411_000.0, &coefs) {
            assert!(tau.abs() < 1e-12, "tau = {tau}");
        }
    }

    #[test]
    fn preserves_input_shape() {
        let coefs = vec![1e-20; 17];
        assert_eq!(optical_depth(0.0, 1000.0, 1893.0, &coefs).len(), 17);
        assert!(optical_depth(0.0, 1000.0, 1893.0, &[]).is_empty());
    }

    #[test]
    fn linear_in_coefficient() {
        let base = optical_depth(500.0, 1500.0, 327.0, &[2e-21]);
        let doubled = optical_depth(500.0, 1500.0, 327.0, &[4e-21]);
        assert!((doubled[0] - 2.0 * base[0]).abs() / doubled[0] < 1e-12);
    }

    proptest! {
        #[test]
        fn linear_in_ppm(k in 1e-3..1e3f64, ppm in 1.0..1e6f64, coef in 1e-25..1e-18f64) {
            let one = optical_depth(500.0, 1500.0, ppm, &[coef]);
            let scaled = optical_depth(500.0, 1500.0, k * ppm, &[coef]);
            let expected = k * one[0];
            prop_assert!((scaled[0] - expected).abs() <= 1e-9 * expected.abs());
        }
    }
}
