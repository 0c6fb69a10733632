//! Borel distribution.

use rand::Rng;
use rand_distr::Open01;
use statrs::function::gamma::ln_gamma;

use crate::discrete::{cdf_by_summation, quantile_search, series_moments};
use crate::distribution::{DiscreteDistribution, Distribution, Interval};
use crate::ensure_param;
use crate::errors::Result;

/// Borel distribution with branching parameter `mu` in `[0, 1)`.
///
/// Mass function (k ≥ 1): `P(X = k) = e^{−μk} (μk)^{k−1} / k!` — the total
/// progeny of a Galton–Watson process with Poisson(μ) offspring. The CDF is
/// computed by direct summation (O(k) per call); the quantile by bracket
/// doubling and integer bisection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Borel {
    mu: f64,
}

impl Borel {
    /// Create a Borel distribution, validating `0 <= mu < 1`.
    pub fn new(mu: f64) -> Result<Self> {
        ensure_param!(mu.is_finite() && (0.0..1.0).contains(&mu), "mu", mu, "0 <= mu < 1");
        Ok(Self::new_unchecked(mu))
    }

    /// Create without validating parameters (documented opt-out).
    pub fn new_unchecked(mu: f64) -> Self {
        Self { mu }
    }

    /// Branching parameter μ.
    pub fn mu(&self) -> f64 {
        self.mu
    }

    /// Parameter tuple `(mu,)`.
    pub fn params(&self) -> (f64,) {
        (self.mu,)
    }
}

impl Distribution for Borel {
    fn name(&self) -> &'static str {
        "Borel"
    }

    fn support(&self) -> Interval {
        Interval::closed(1.0, f64::INFINITY)
    }

    fn mean(&self) -> f64 {
        1.0 / (1.0 - self.mu)
    }

    fn var(&self) -> f64 {
        self.mu / (1.0 - self.mu).powi(3)
    }

    fn median(&self) -> f64 {
        self.quantile(0.5).map(|k| k as f64).unwrap_or(f64::NAN)
    }

    fn mode(&self) -> f64 {
        // P(1) = e^{−μ} dominates P(2) = μe^{−2μ} for every μ < 1.
        1.0
    }

    fn skewness(&self) -> f64 {
        series_moments(|k| self.pmf(k), 1, None).skewness
    }

    fn kurtosis(&self) -> f64 {
        series_moments(|k| self.pmf(k), 1, None).kurtosis
    }
}

impl DiscreteDistribution for Borel {
    fn pmf(&self, k: i64) -> f64 {
        self.ln_pmf(k).exp()
    }

    fn ln_pmf(&self, k: i64) -> f64 {
        if k < 1 {
            return f64::NEG_INFINITY;
        }
        if k == 1 {
            // (μk)^{k−1} = 1; avoids 0·ln 0 at μ = 0.
            return -self.mu;
        }
        let kf = k as f64;
        -self.mu * kf + (kf - 1.0) * (self.mu * kf).ln() - ln_gamma(kf + 1.0)
    }

    fn cdf(&self, k: i64) -> f64 {
        cdf_by_summation(|j| self.pmf(j), 1, k)
    }

    fn quantile(&self, p: f64) -> Result<i64> {
        quantile_search(|k| self.cdf(k), 1, None, p)
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> i64 {
        // Inverse transform by sequential search; O(mean) expected steps.
        // The accumulated-mass guard keeps the walk finite even when the
        // floating-point sum saturates just below the uniform draw.
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
        assert!(Borel::new(0.0).is_ok());
        assert!(Borel::new(0.9).is_ok());
        assert!(Borel::new(1.0).is_err());
        assert!(Borel::new(-0.1).is_err());
    }

    #[test]
    fn degenerate_at_zero() {
        let d = Borel::new(0.0).unwrap();
        assert!((d.pmf(1) - 1.0).abs() < 1e-15);
        assert_eq!(d.pmf(2), 0.0);
        assert_eq!(d.mean(), 1.0);
    }

    #[test]
    fn mass_sums_to_one() {
        let d = Borel::new(0.5).unwrap();
        let total: f64 = (1..400).map(|k| d.pmf(k)).sum();
        assert!((total - 1.0).abs() < 1e-10, "got {total}");
    }

    #[test]
    fn closed_moments_match_series() {
        let d = Borel::new(0.4).unwrap();
        let m = series_moments(|k| d.pmf(k), 1, None);
        assert!((d.mean() - m.mean).abs() < 1e-8, "{} vs {}", d.mean(), m.mean);
        assert!((d.var() - m.var).abs() < 1e-6, "{} vs {}", d.var(), m.var);
    }

    #[test]
    fn quantile_is_generalized_inverse() {
        let d = Borel::new(0.3).unwrap();
        for p in [0.1, 0.5, 0.9, 0.99] {
            let k = d.quantile(p).unwrap();
            assert!(d.cdf(k) >= p, "p={p}");
            if k > 1 {
                assert!(d.cdf(k - 1) < p, "p={p}");
            }
        }
    }

    #[test]
    fn pmf_zero_below_support() {
        let d = Borel::new(0.5).unwrap();
        assert_eq!(d.pmf(0), 0.0);
        assert_eq!(d.pmf(-3), 0.0);
        assert_eq!(d.cdf(0), 0.0);
        assert_eq!(d.ln_pmf(0), f64::NEG_INFINITY);
    }
}
