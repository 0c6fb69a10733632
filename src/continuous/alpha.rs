//! Alpha distribution.

use rand::Rng;
use rand_distr::Open01;

use crate::distribution::{ContinuousDistribution, Distribution, Interval};
use crate::ensure_param;
use crate::errors::{check_probability, Result};
use crate::special;

/// Alpha distribution with shape `alpha` and scale `beta`.
///
/// Density (x > 0):
///
/// f(x) = β / (x² Φ(α)) · φ(α − β/x)
///
/// where φ and Φ are the standard normal density and CDF. The CDF is
/// `Φ(α − β/x) / Φ(α)` and the quantile inverts it in closed form through
/// the normal quantile.
///
/// The distribution has no finite moments: `mean` and `var` are formally
/// infinite (`INFINITY`), `skewness` and `kurtosis` are undefined (`NAN`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Alpha {
    alpha: f64,
    beta: f64,
}

impl Alpha {
    /// Create an Alpha distribution, validating `alpha > 0` and `beta > 0`.
    pub fn new(alpha: f64, beta: f64) -> Result<Self> {
        ensure_param!(alpha.is_finite() && alpha > 0.0, "alpha", alpha, "alpha > 0");
        ensure_param!(beta.is_finite() && beta > 0.0, "beta", beta, "beta > 0");
        Ok(Self::new_unchecked(alpha, beta))
    }

    /// Create without validating parameters.
    ///
    /// Evaluation with invalid parameters yields meaningless results; this
    /// is the documented opt-out for callers that have already validated.
    pub fn new_unchecked(alpha: f64, beta: f64) -> Self {
        Self { alpha, beta }
    }

    /// Shape parameter α.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Scale parameter β.
    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Parameter tuple `(alpha, beta)`.
    pub fn params(&self) -> (f64, f64) {
        (self.alpha, self.beta)
    }

    fn phi_alpha(&self) -> f64 {
        special::norm_cdf(self.alpha)
    }
}

impl Distribution for Alpha {
    fn name(&self) -> &'static str {
        "Alpha"
    }

    fn support(&self) -> Interval {
        Interval::open(0.0, f64::INFINITY)
    }

    fn mean(&self) -> f64 {
        f64::INFINITY
    }

    fn var(&self) -> f64 {
        f64::INFINITY
    }

    fn median(&self) -> f64 {
        self.beta / (self.alpha - special::norm_ppf(0.5 * self.phi_alpha()))
    }

    fn mode(&self) -> f64 {
        let a = self.alpha;
        self.beta * ((a * a + 8.0).sqrt() - a) / 4.0
    }

    fn skewness(&self) -> f64 {
        f64::NAN
    }

    fn kurtosis(&self) -> f64 {
        f64::NAN
    }
}

impl ContinuousDistribution for Alpha {
    fn pdf(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        let z = self.alpha - self.beta / x;
        self.beta / (x * x * self.phi_alpha()) * special::norm_pdf(z)
    }

    fn ln_pdf(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return f64::NEG_INFINITY;
        }
        let z = self.alpha - self.beta / x;
        self.beta.ln() - 2.0 * x.ln() - self.phi_alpha().ln() + special::ln_norm_pdf(z)
    }

    fn cdf(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        special::norm_cdf(self.alpha - self.beta / x) / self.phi_alpha()
    }

    fn quantile(&self, p: f64) -> Result<f64> {
        check_probability(p)?;
        if p == 0.0 {
            return Ok(0.0);
        }
        if p == 1.0 {
            return Ok(f64::INFINITY);
        }
        // p·Φ(α) < Φ(α), so the argument of Φ⁻¹ stays below α and the
        // denominator stays positive.
        Ok(self.beta / (self.alpha - special::norm_ppf(p * self.phi_alpha())))
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let u: f64 = rng.sample(Open01);
        self.beta / (self.alpha - special::norm_ppf(u * self.phi_alpha()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_validates() {
        assert!(Alpha::new(1.0, 1.0).is_ok());
        assert!(Alpha::new(0.0, 1.0).is_err());
        assert!(Alpha::new(1.0, -2.0).is_err());
        assert!(Alpha::new(f64::NAN, 1.0).is_err());
    }

    #[test]
    fn cdf_bounds_and_monotonicity() {
        let d = Alpha::new(2.5, 1.5).unwrap();
        assert_eq!(d.cdf(0.0), 0.0);
        assert_eq!(d.cdf(-1.0), 0.0);
        let mut prev = 0.0;
        for i in 1..200 {
            let x = i as f64 * 0.25;
            let c = d.cdf(x);
            assert!((0.0..=1.0).contains(&c));
            assert!(c >= prev, "CDF not monotone at {x}");
            prev = c;
        }
        assert!((d.cdf(1e9) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn quantile_roundtrip() {
        let d = Alpha::new(3.0, 2.0).unwrap();
        for p in [0.05, 0.3, 0.5, 0.7, 0.95] {
            let x = d.quantile(p).unwrap();
            assert!((d.cdf(x) - p).abs() < 1e-8, "p={p}");
        }
        assert!(d.quantile(-0.1).is_err());
        assert!(d.quantile(1.1).is_err());
    }

    #[test]
    fn log_density_consistency() {
        let d = Alpha::new(2.0, 1.0).unwrap();
        for x in [0.1, 0.5, 1.0, 3.0, 10.0] {
            assert!(
                (d.ln_pdf(x).exp() - d.pdf(x)).abs() < 1e-12 * d.pdf(x).max(1.0),
                "x={x}"
            );
        }
        assert_eq!(d.ln_pdf(-1.0), f64::NEG_INFINITY);
    }

    #[test]
    fn mode_maximizes_density() {
        let d = Alpha::new(2.0, 3.0).unwrap();
        let m = d.mode();
        assert!(d.pdf(m) > d.pdf(m * 0.9));
        assert!(d.pdf(m) > d.pdf(m * 1.1));
    }

    #[test]
    fn moments_are_infinite() {
        let d = Alpha::new(1.0, 1.0).unwrap();
        assert!(d.mean().is_infinite());
        assert!(d.var().is_infinite());
        assert!(d.skewness().is_nan());
    }
}
