//! Voigt line-shape profile.
//!
//! The Voigt profile is the convolution of a Doppler (Gaussian) and a
//! pressure-broadening (Lorentzian) profile. It is evaluated through the
//! real part of the complex probability function w(z), approximated with
//! Humlicek's four-region rational method (JQSRT 27, 1982), which keeps the
//! relative error below ~1e-4 everywhere, ample for a precomputed lookup
//! table.

use num_complex::Complex64;
use std::f64::consts::{LN_2, PI};

/// Voigt profile value (1 / cm^-1) at `delta_nu` cm^-1 from line center.
///
/// `alpha_d` is the Doppler half width at half maximum and `gamma_l` the
/// Lorentz half width at half maximum, both in cm^-1. The profile is
/// normalized to unit area over wavenumber. A vanishing Doppler width
/// degenerates to the plain Lorentzian.
pub fn voigt_profile(delta_nu: f64, alpha_d: f64, gamma_l: f64) -> f64 {
    if alpha_d <= f64::EPSILON {
        return gamma_l / (PI * (delta_nu * delta_nu + gamma_l * gamma_l));
    }
    let sqrt_ln2 = LN_2.sqrt();
    let x = sqrt_ln2 * delta_nu / alpha_d;
    let y = sqrt_ln2 * gamma_l / alpha_d;
    let k = humlicek_w4(Complex64::new(x, y)).re;
    k * sqrt_ln2 / (alpha_d * PI.sqrt())
}

/// Humlicek (1982) w4 approximation of the complex probability function
/// w(z) = exp(-z^2) erfc(-iz) for Im(z) >= 0.
///
/// Region boundaries and polynomial coefficients are retained from the
/// original Fortran.
fn humlicek_w4(z: Complex64) -> Complex64 {
    let x = z.re;
    let y = z.im;
    let t = Complex64::new(y, -x);
    let s = x.abs() + y;

    if s >= 15.0 {
        // Region I
        t * 0.5641896 / (0.5 + t * t)
    } else if s >= 5.5 {
        // Region II
        let u = t * t;
        t * (1.410474 + u * 0.5641896) / (0.75 + u * (3.0 + u))
    } else if y >= 0.195 * x.abs() - 0.176 {
        // Region III
        (16.4955 + t * (20.20933 + t * (11.96482 + t * (3.778987 + t * 0.5642236))))
            / (16.4955
                + t * (38.82363 + t * (39.27121 + t * (21.69274 + t * (6.699398 + t)))))
    } else {
        // Region IV
        let u = t * t;
        u.exp()
            - t * (36183.31
                - u * (3321.9905
                    - u * (1540.787
                        - u * (219.0313 - u * (35.76683 - u * (1.320522 - u * 0.56419))))))
                / (32066.6
                    - u * (24322.84
                        - u * (9022.228
                            - u * (2186.181
                                - u * (364.2191 - u * (61.57037 - u * (1.841439 - u)))))))
    }
}
