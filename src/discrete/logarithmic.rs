//! Logarithmic (log-series) distribution.

use num_complex::Complex64;
use rand::Rng;
use rand_distr::Open01;

use crate::discrete::{cdf_by_summation, quantile_search, series_moments};
use crate::distribution::{DiscreteDistribution, Distribution, Interval};
use crate::ensure_param;
use crate::errors::{Error, Result};

/// Logarithmic (log-series) distribution with parameter `p` in (0, 1).
///
/// `P(X = k) = −p^k / (k ln(1 − p))` for k ≥ 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Logarithmic {
    p: f64,
    // −ln(1 − p), cached normalizer.
    ln_norm: f64,
}

impl Logarithmic {
    /// Create a logarithmic distribution, validating `0 < p < 1`.
    pub fn new(p: f64) -> Result<Self> {
        ensure_param!(p.is_finite() && 0.0 < p && p < 1.0, "p", p, "0 < p < 1");
        Ok(Self::new_unchecked(p))
    }

    /// Create without validating parameters (documented opt-out).
    pub fn new_unchecked(p: f64) -> Self {
        Self {
            p,
            ln_norm: -(-p).ln_1p(),
        }
    }

    /// Shape parameter p.
    pub fn p(&self) -> f64 {
        self.p
    }

    /// Parameter tuple `(p,)`.
    pub fn params(&self) -> (f64,) {
        (self.p,)
    }
}

impl Distribution for Logarithmic {
    fn name(&self) -> &'static str {
        "Logarithmic"
    }

    fn support(&self) -> Interval {
        Interval::closed(1.0, f64::INFINITY)
    }

    fn mean(&self) -> f64 {
        self.p / ((1.0 - self.p) * self.ln_norm)
    }

    fn var(&self) -> f64 {
        let p = self.p;
        let l = -self.ln_norm; // ln(1 − p)
        -p * (p + l) / ((1.0 - p) * (1.0 - p) * l * l)
    }

    fn median(&self) -> f64 {
        self.quantile(0.5).map(|k| k as f64).unwrap_or(f64::NAN)
    }

    fn mode(&self) -> f64 {
        1.0
    }

    fn skewness(&self) -> f64 {
        series_moments(|k| self.pmf(k), 1, None).skewness
    }

    fn kurtosis(&self) -> f64 {
        series_moments(|k| self.pmf(k), 1, None).kurtosis
    }

    fn mgf(&self, t: f64) -> Result<f64> {
        if t >= -self.p.ln() {
            return Err(Error::Domain(format!(
                "mgf of the Logarithmic distribution requires t < -ln p, got {t}"
            )));
        }
        Ok((-self.p * t.exp()).ln_1p() / (-self.p).ln_1p())
    }

    fn cf(&self, t: f64) -> Result<Complex64> {
        let z = Complex64::new(1.0, 0.0) - self.p * Complex64::new(0.0, t).exp();
        Ok(z.ln() / (-self.p).ln_1p())
    }
}

impl DiscreteDistribution for Logarithmic {
    fn pmf(&self, k: i64) -> f64 {
        if k < 1 {
            return 0.0;
        }
        (k as f64 * self.p.ln()).exp() / (k as f64 * self.ln_norm)
    }

    fn ln_pmf(&self, k: i64) -> f64 {
        if k < 1 {
            return f64::NEG_INFINITY;
        }
        k as f64 * self.p.ln() - (k as f64).ln() - self.ln_norm.ln()
    }

    fn cdf(&self, k: i64) -> f64 {
        cdf_by_summation(|j| self.pmf(j), 1, k)
    }

    fn quantile(&self, p: f64) -> Result<i64> {
        quantile_search(|k| self.cdf(k), 1, None, p)
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> i64 {
        let u: f64 = rng.sample(Open01);
        let mut acc = 0.0;
        let mut k = 1;
        loop {
            acc += self.pmf(k);
            if acc >= u || 1.0 - acc < 1e-12 {
                return k;
            }
            k += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_validates() {
        assert!(Logarithmic::new(0.5).is_ok());
        assert!(Logarithmic::new(0.0).is_err());
        assert!(Logarithmic::new(1.0).is_err());
    }

    #[test]
    fn mass_sums_to_one() {
        let d = Logarithmic::new(0.7).unwrap();
        let total: f64 = (1..500).map(|k| d.pmf(k)).sum();
        assert!((total - 1.0).abs() < 1e-12, "got {total}");
    }

    #[test]
    fn closed_moments_match_series() {
        let d = Logarithmic::new(0.4).unwrap();
        let m = series_moments(|k| d.pmf(k), 1, None);
        assert!((d.mean() - m.mean).abs() < 1e-10);
        assert!((d.var() - m.var).abs() < 1e-9);
    }

    #[test]
    fn mgf_domain() {
        let d = Logarithmic::new(0.5).unwrap();
        assert!(d.mgf(0.0).is_ok());
        assert!((d.mgf(0.0).unwrap() - 1.0).abs() < 1e-14);
        // −ln 0.5 ≈ 0.693: beyond the radius of convergence.
        assert!(d.mgf(0.7).is_err());
    }

    #[test]
    fn quantile_is_generalized_inverse() {
        let d = Logarithmic::new(0.8).unwrap();
        for p in [0.2, 0.5, 0.9, 0.99] {
            let k = d.quantile(p).unwrap();
            assert!(d.cdf(k) >= p);
            if k > 1 {
                assert!(d.cdf(k - 1) < p);
            }
        }
        assert_eq!(d.quantile(0.0).unwrap(), 1);
    }

    #[test]
    fn log_mass_consistency() {
        let d = Logarithmic::new(0.6).unwrap();
        for k in [1, 2, 10, 100] {
            let pmf = d.pmf(k);
            assert!((d.ln_pmf(k).exp() - pmf).abs() <= 1e-13 * pmf.max(1e-300));
        }
    }
}
