//! Beta-binomial distribution.

use rand::Rng;
use rand_distr::Distribution as _;
use statrs::function::beta::ln_beta;
use statrs::function::factorial::ln_binomial;

use crate::discrete::{cdf_by_summation, quantile_search, series_moments};
use crate::distribution::{DiscreteDistribution, Distribution, Interval};
use crate::ensure_param;
use crate::errors::Result;

/// Beta-binomial distribution: `Binomial(n, p)` with `p ~ Beta(α, β)`.
///
/// Mass function (0 ≤ k ≤ n):
///
/// P(X = k) = C(n, k) · B(k + α, n − k + β) / B(α, β)
///
/// Sampling follows the same hierarchy: a Beta draw for the success
/// probability, then a Binomial draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BetaBinomial {
    n: u64,
    alpha: f64,
    beta: f64,
}

impl BetaBinomial {
    /// Create a beta-binomial distribution, validating `alpha > 0` and
    /// `beta > 0`.
    pub fn new(n: u64, alpha: f64, beta: f64) -> Result<Self> {
        ensure_param!(alpha.is_finite() && alpha > 0.0, "alpha", alpha, "alpha > 0");
        ensure_param!(beta.is_finite() && beta > 0.0, "beta", beta, "beta > 0");
        Ok(Self::new_unchecked(n, alpha, beta))
    }

    /// Create without validating parameters (documented opt-out).
    pub fn new_unchecked(n: u64, alpha: f64, beta: f64) -> Self {
        Self { n, alpha, beta }
    }

    /// Number of trials n.
    pub fn trials(&self) -> u64 {
        self.n
    }

    /// First shape parameter α.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Second shape parameter β.
    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Parameter tuple `(n, alpha, beta)`.
    pub fn params(&self) -> (u64, f64, f64) {
        (self.n, self.alpha, self.beta)
    }
}

impl Distribution for BetaBinomial {
    fn name(&self) -> &'static str {
        "BetaBinomial"
    }

    fn support(&self) -> Interval {
        Interval::closed(0.0, self.n as f64)
    }

    fn mean(&self) -> f64 {
        self.n as f64 * self.alpha / (self.alpha + self.beta)
    }

    fn var(&self) -> f64 {
        let (n, a, b) = (self.n as f64, self.alpha, self.beta);
        let s = a + b;
        n * a * b * (s + n) / (s * s * (s + 1.0))
    }

    fn median(&self) -> f64 {
        self.quantile(0.5).map(|k| k as f64).unwrap_or(f64::NAN)
    }

    fn mode(&self) -> f64 {
        // The mass can be U-shaped for α, β < 1, so scan the whole support.
        let mut best = 0i64;
        let mut best_p = self.pmf(0);
        for k in 1..=self.n as i64 {
            let p = self.pmf(k);
            if p > best_p {
                best = k;
                best_p = p;
            }
        }
        best as f64
    }

    fn skewness(&self) -> f64 {
        let (n, a, b) = (self.n as f64, self.alpha, self.beta);
        let s = a + b;
        (s + 2.0 * n) * (b - a) / (s + 2.0)
            * ((1.0 + s) / (n * a * b * (n + s))).sqrt()
    }

    fn kurtosis(&self) -> f64 {
        // Exact finite summation over the support.
        series_moments(|k| self.pmf(k), 0, Some(self.n as i64)).kurtosis
    }
}

impl DiscreteDistribution for BetaBinomial {
    fn pmf(&self, k: i64) -> f64 {
        self.ln_pmf(k).exp()
    }

    fn ln_pmf(&self, k: i64) -> f64 {
        if k < 0 || k > self.n as i64 {
            return f64::NEG_INFINITY;
        }
        let kf = k as f64;
        ln_binomial(self.n, k as u64)
            + ln_beta(kf + self.alpha, self.n as f64 - kf + self.beta)
            - ln_beta(self.alpha, self.beta)
    }

    fn cdf(&self, k: i64) -> f64 {
        if k < 0 {
            return 0.0;
        }
        if k >= self.n as i64 {
            return 1.0;
        }
        cdf_by_summation(|j| self.pmf(j), 0, k)
    }

    fn quantile(&self, p: f64) -> Result<i64> {
        quantile_search(|k| self.cdf(k), 0, Some(self.n as i64), p)
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> i64 {
        let p: f64 = rand_distr::Beta::new(self.alpha, self.beta)
            .expect("valid parameters")
            .sample(rng);
        rand_distr::Binomial::new(self.n, p)
            .expect("valid parameters")
            .sample(rng) as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_validates() {
        assert!(BetaBinomial::new(10, 1.0, 1.0).is_ok());
        assert!(BetaBinomial::new(10, 0.0, 1.0).is_err());
        assert!(BetaBinomial::new(10, 1.0, -1.0).is_err());
    }

    #[test]
    fn uniform_special_case() {
        // α = β = 1 gives the discrete uniform on {0..n}.
        let d = BetaBinomial::new(4, 1.0, 1.0).unwrap();
        for k in 0..=4 {
            assert!((d.pmf(k) - 0.2).abs() < 1e-12, "k={k}");
        }
    }

    #[test]
    fn mass_sums_to_one() {
        let d = BetaBinomial::new(20, 2.0, 3.5).unwrap();
        let total: f64 = (0..=20).map(|k| d.pmf(k)).sum();
        assert!((total - 1.0).abs() < 1e-12, "got {total}");
        assert_eq!(d.cdf(20), 1.0);
        assert_eq!(d.cdf(25), 1.0);
    }

    #[test]
    fn closed_moments_match_series() {
        let d = BetaBinomial::new(15, 2.0, 3.0).unwrap();
        let m = series_moments(|k| d.pmf(k), 0, Some(15));
        assert!((d.mean() - m.mean).abs() < 1e-10);
        assert!((d.var() - m.var).abs() < 1e-9);
        assert!((d.skewness() - m.skewness).abs() < 1e-8);
    }

    #[test]
    fn quantile_is_generalized_inverse() {
        let d = BetaBinomial::new(30, 0.5, 0.5).unwrap();
        for p in [0.05, 0.5, 0.95] {
            let k = d.quantile(p).unwrap();
            assert!(d.cdf(k) >= p);
            if k > 0 {
                assert!(d.cdf(k - 1) < p);
            }
        }
        assert_eq!(d.quantile(1.0).unwrap(), 30);
    }

    #[test]
    fn boundary_behavior() {
        let d = BetaBinomial::new(5, 2.0, 2.0).unwrap();
        assert_eq!(d.pmf(-1), 0.0);
        assert_eq!(d.pmf(6), 0.0);
        assert_eq!(d.cdf(-1), 0.0);
    }
}
