//! Discrete Weibull distribution (type I).

use rand::Rng;
use rand_distr::Open01;

use crate::discrete::{mode_by_scan, quantile_search, series_moments};
use crate::distribution::{DiscreteDistribution, Distribution, Interval};
use crate::ensure_param;
use crate::errors::{check_probability, Result};

/// Discrete Weibull distribution with scale `q` in (0, 1) and shape
/// `beta > 0`.
///
/// `P(X = k) = q^{k^β} − q^{(k+1)^β}` for k ≥ 0, so the CDF and quantile
/// are closed. Moments have no closed form and use capped series summation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiscreteWeibull {
    q: f64,
    beta: f64,
}

impl DiscreteWeibull {
    /// Create a discrete Weibull distribution, validating `0 < q < 1` and
    /// `beta > 0`.
    pub fn new(q: f64, beta: f64) -> Result<Self> {
        ensure_param!(q.is_finite() && 0.0 < q && q < 1.0, "q", q, "0 < q < 1");
        ensure_param!(beta.is_finite() && beta > 0.0, "beta", beta, "beta > 0");
        Ok(Self::new_unchecked(q, beta))
    }

    /// Create without validating parameters (documented opt-out).
    pub fn new_unchecked(q: f64, beta: f64) -> Self {
        Self { q, beta }
    }

    /// Scale parameter q (the survival at 0 boundary: P(X ≥ 1) = q).
    pub fn q(&self) -> f64 {
        self.q
    }

    /// Shape parameter β.
    pub fn shape(&self) -> f64 {
        self.beta
    }

    /// Parameter tuple `(q, beta)`.
    pub fn params(&self) -> (f64, f64) {
        (self.q, self.beta)
    }

    /// `P(X ≥ k) = q^{k^β}`.
    fn survival_at(&self, k: f64) -> f64 {
        (k.powf(self.beta) * self.q.ln()).exp()
    }
}

impl Distribution for DiscreteWeibull {
    fn name(&self) -> &'static str {
        "DiscreteWeibull"
    }

    fn support(&self) -> Interval {
        Interval::closed(0.0, f64::INFINITY)
    }

    fn mean(&self) -> f64 {
        series_moments(|k| self.pmf(k), 0, None).mean
    }

    fn var(&self) -> f64 {
        series_moments(|k| self.pmf(k), 0, None).var
    }

    fn median(&self) -> f64 {
        self.quantile(0.5).map(|k| k as f64).unwrap_or(f64::NAN)
    }

    fn mode(&self) -> f64 {
        mode_by_scan(|k| self.pmf(k), 0) as f64
    }

    fn skewness(&self) -> f64 {
        series_moments(|k| self.pmf(k), 0, None).skewness
    }

    fn kurtosis(&self) -> f64 {
        series_moments(|k| self.pmf(k), 0, None).kurtosis
    }
}

impl DiscreteDistribution for DiscreteWeibull {
    fn pmf(&self, k: i64) -> f64 {
        if k < 0 {
            return 0.0;
        }
        let kf = k as f64;
        self.survival_at(kf) - self.survival_at(kf + 1.0)
    }

    fn ln_pmf(&self, k: i64) -> f64 {
        if k < 0 {
            return f64::NEG_INFINITY;
        }
        let kf = k as f64;
        let lnq = self.q.ln();
        let gap = ((kf + 1.0).powf(self.beta) - kf.powf(self.beta)) * lnq;
        // q^{k^β} (1 − q^{(k+1)^β − k^β}) in log space.
        kf.powf(self.beta) * lnq + (-gap.exp_m1()).ln()
    }

    fn cdf(&self, k: i64) -> f64 {
        if k < 0 {
            return 0.0;
        }
        1.0 - self.survival_at(k as f64 + 1.0)
    }

    fn quantile(&self, p: f64) -> Result<i64> {
        check_probability(p)?;
        if p == 0.0 {
            return Ok(0);
        }
        if p == 1.0 {
            // The survival term underflows at finite k, so the search
            // terminates.
            return quantile_search(|k| self.cdf(k), 0, None, p);
        }
        let t = ((1.0 - p).ln() / self.q.ln()).powf(1.0 / self.beta);
        let mut k = (t - 1.0).ceil().max(0.0) as i64;
        // Fix up floating error at the lattice boundary.
        while k > 0 && self.cdf(k - 1) >= p {
            k -= 1;
        }
        while self.cdf(k) < p {
            k += 1;
        }
        Ok(k)
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> i64 {
        let u: f64 = rng.sample(Open01);
        let t = (u.ln() / self.q.ln()).powf(1.0 / self.beta);
        (t - 1.0).ceil().max(0.0) as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_validates() {
        assert!(DiscreteWeibull::new(0.5, 1.0).is_ok());
        assert!(DiscreteWeibull::new(0.0, 1.0).is_err());
        assert!(DiscreteWeibull::new(1.0, 1.0).is_err());
        assert!(DiscreteWeibull::new(0.5, 0.0).is_err());
    }

    #[test]
    fn geometric_special_case() {
        // β = 1: P(X = k) = q^k (1 − q).
        let d = DiscreteWeibull::new(0.3, 1.0).unwrap();
        for k in 0..10 {
            let expected = 0.3_f64.powi(k as i32) * 0.7;
            assert!((d.pmf(k) - expected).abs() < 1e-14, "k={k}");
        }
        // Geometric mean q/(1−q).
        assert!((d.mean() - 0.3 / 0.7).abs() < 1e-10);
    }

    #[test]
    fn mass_sums_to_one() {
        let d = DiscreteWeibull::new(0.8, 0.7).unwrap();
        let total: f64 = (0..100_000).map(|k| d.pmf(k)).sum();
        assert!((total - 1.0).abs() < 1e-9, "got {total}");
    }

    #[test]
    fn closed_quantile_is_generalized_inverse() {
        let d = DiscreteWeibull::new(0.9, 1.5).unwrap();
        for p in [0.01, 0.3, 0.5, 0.9, 0.999] {
            let k = d.quantile(p).unwrap();
            assert!(d.cdf(k) >= p, "p={p}, k={k}");
            if k > 0 {
                assert!(d.cdf(k - 1) < p, "p={p}, k={k}");
            }
        }
    }

    #[test]
    fn log_mass_consistency() {
        let d = DiscreteWeibull::new(0.6, 2.0).unwrap();
        for k in [0, 1, 2, 5] {
            let pmf = d.pmf(k);
            assert!((d.ln_pmf(k).exp() - pmf).abs() <= 1e-12 * pmf.max(1e-300), "k={k}");
        }
    }

    #[test]
    fn boundary_behavior() {
        let d = DiscreteWeibull::new(0.5, 1.0).unwrap();
        assert_eq!(d.pmf(-1), 0.0);
        assert_eq!(d.cdf(-1), 0.0);
        assert!((d.cdf(0) - 0.5).abs() < 1e-15);
    }
}
