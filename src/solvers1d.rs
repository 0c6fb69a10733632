//! 1D root finding used by the quantile functions without a closed-form
//! inverse CDF.
//!
//! Brent's method over a documented fixed bracket; bracket failure and
//! iteration exhaustion are reported as errors rather than approximate
//! results.

use crate::errors::{Error, Result};
use crate::fail;

const MAX_ITERATIONS: usize = 100;
const DEFAULT_ACCURACY: f64 = 1.0e-12;

/// Brent's method for finding a root of `f(x)` in `[x_min, x_max]`.
///
/// Combines bisection, secant, and inverse quadratic interpolation.
/// Requires `f(x_min)` and `f(x_max)` to have opposite signs.
pub fn brent<F>(f: F, x_min: f64, x_max: f64, accuracy: f64) -> Result<f64>
where
    F: Fn(f64) -> f64,
{
    let acc = if accuracy > 0.0 {
        accuracy
    } else {
        DEFAULT_ACCURACY
    };
    let mut a = x_min;
    let mut b = x_max;
    let mut fa = f(a);
    let mut fb = f(b);

    if fa * fb > 0.0 {
        fail!("Brent: f({a}) and f({b}) must have opposite signs");
    }
    if fa == 0.0 {
        return Ok(a);
    }
    if fb == 0.0 {
        return Ok(b);
    }

    let mut c = b;
    let mut fc = fb;
    let mut d = b - a;
    let mut e = d;

    for _ in 0..MAX_ITERATIONS {
        if fb * fc > 0.0 {
            c = a;
            fc = fa;
            d = b - a;
            e = d;
        }
        if fc.abs() < fb.abs() {
            a = b;
            b = c;
            c = a;
            fa = fb;
            fb = fc;
            fc = fa;
        }
        let tol = 2.0 * f64::EPSILON * b.abs() + 0.5 * acc;
        let xm = 0.5 * (c - b);
        if xm.abs() <= tol || fb == 0.0 {
            return Ok(b);
        }
        if e.abs() >= tol && fa.abs() > fb.abs() {
            let s = fb / fa;
            let (p, q) = if a == c {
                let p = 2.0 * xm * s;
                let q = 1.0 - s;
                (p, q)
            } else {
                let q = fa / fc;
                let r = fb / fc;
                let p = s * (2.0 * xm * q * (q - r) - (b - a) * (r - 1.0));
                let q = (q - 1.0) * (r - 1.0) * (s - 1.0);
                (p, q)
            };
            let (p, q) = if p > 0.0 { (p, -q) } else { (-p, q) };
            if 2.0 * p < (3.0 * xm * q - (tol * q).abs()) && 2.0 * p < (e * q).abs() {
                e = d;
                d = p / q;
            } else {
                d = xm;
                e = d;
            }
        } else {
            d = xm;
            e = d;
        }
        a = b;
        fa = fb;
        b += if d.abs() > tol {
            d
        } else if xm > 0.0 {
            tol
        } else {
            -tol
        };
        fb = f(b);
    }
    Err(Error::NoConvergence {
        iterations: MAX_ITERATIONS,
        context: "Brent solver",
    })
}

/// Invert a CDF by Brent root finding on `cdf(x) - p` over `[lo, hi]`.
///
/// The bracket must contain the quantile for every parameter tuple the
/// calling distribution documents as supported; a bracket that misses the
/// root propagates as a numerical error.
pub(crate) fn invert_cdf<F>(cdf: F, lo: f64, hi: f64, p: f64) -> Result<f64>
where
    F: Fn(f64) -> f64,
{
    brent(|x| cdf(x) - p, lo, hi, DEFAULT_ACCURACY)
}
