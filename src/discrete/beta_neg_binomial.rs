//! Beta-negative-binomial distribution.

use rand::Rng;
use rand_distr::Distribution as _;
use statrs::function::beta::ln_beta;
use statrs::function::gamma::ln_gamma;

use crate::discrete::{cdf_by_log_summation, mode_by_scan, quantile_search};
use crate::distribution::{DiscreteDistribution, Distribution, Interval};
use crate::ensure_param;
use crate::errors::Result;

/// Beta-negative-binomial distribution: `NegativeBinomial(r, p)` with
/// `p ~ Beta(α, β)`.
///
/// Mass function (k ≥ 0, failures before the r-th success):
///
/// P(X = k) = Γ(r + k) / (k! Γ(r)) · B(α + r, β + k) / B(α, β)
///
/// The tail decays like `k^{−α−1}`, so the CDF summation is carried out in
/// log space via a streaming log-sum-exp, and the j-th moment exists only
/// for `α > j` (`NAN` otherwise): mean needs `α > 1`, variance `α > 2`,
/// skewness `α > 3`, kurtosis `α > 4`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BetaNegBinomial {
    r: f64,
    alpha: f64,
    beta: f64,
}

impl BetaNegBinomial {
    /// Create a beta-negative-binomial distribution, validating `r > 0`,
    /// `alpha > 0` and `beta > 0`.
    pub fn new(r: f64, alpha: f64, beta: f64) -> Result<Self> {
        ensure_param!(r.is_finite() && r > 0.0, "r", r, "r > 0");
        ensure_param!(alpha.is_finite() && alpha > 0.0, "alpha", alpha, "alpha > 0");
        ensure_param!(beta.is_finite() && beta > 0.0, "beta", beta, "beta > 0");
        Ok(Self::new_unchecked(r, alpha, beta))
    }

    /// Create without validating parameters (documented opt-out).
    pub fn new_unchecked(r: f64, alpha: f64, beta: f64) -> Self {
        Self { r, alpha, beta }
    }

    /// Number of successes r.
    pub fn successes(&self) -> f64 {
        self.r
    }

    /// First shape parameter α.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Second shape parameter β.
    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Parameter tuple `(r, alpha, beta)`.
    pub fn params(&self) -> (f64, f64, f64) {
        (self.r, self.alpha, self.beta)
    }

    /// Factorial moment `E[(X)_j] = r^{(j)} B(α − j, β + j)/B(α, β)` for
    /// `α > j`, else NAN.
    fn factorial_moment(&self, j: u32) -> f64 {
        let jf = j as f64;
        if self.alpha <= jf {
            return f64::NAN;
        }
        let mut rising = 0.0;
        for i in 0..j {
            rising += (self.r + i as f64).ln();
        }
        (rising + ln_beta(self.alpha - jf, self.beta + jf) - ln_beta(self.alpha, self.beta))
            .exp()
    }

    fn raw_moments(&self) -> [f64; 4] {
        let f1 = self.factorial_moment(1);
        let f2 = self.factorial_moment(2);
        let f3 = self.factorial_moment(3);
        let f4 = self.factorial_moment(4);
        [
            f1,
            f2 + f1,
            f3 + 3.0 * f2 + f1,
            f4 + 6.0 * f3 + 7.0 * f2 + f1,
        ]
    }
}

impl Distribution for BetaNegBinomial {
    fn name(&self) -> &'static str {
        "BetaNegBinomial"
    }

    fn support(&self) -> Interval {
        Interval::closed(0.0, f64::INFINITY)
    }

    fn mean(&self) -> f64 {
        self.factorial_moment(1)
    }

    fn var(&self) -> f64 {
        let [m1, m2, ..] = self.raw_moments();
        m2 - m1 * m1
    }

    fn median(&self) -> f64 {
        self.quantile(0.5).map(|k| k as f64).unwrap_or(f64::NAN)
    }

    fn mode(&self) -> f64 {
        mode_by_scan(|k| self.pmf(k), 0) as f64
    }

    fn skewness(&self) -> f64 {
        let [m1, m2, m3, _] = self.raw_moments();
        let var = m2 - m1 * m1;
        (m3 - 3.0 * m1 * m2 + 2.0 * m1 * m1 * m1) / var.powf(1.5)
    }

    fn kurtosis(&self) -> f64 {
        let [m1, m2, m3, m4] = self.raw_moments();
        let var = m2 - m1 * m1;
        let c4 = m4 - 4.0 * m1 * m3 + 6.0 * m1 * m1 * m2 - 3.0 * m1 * m1 * m1 * m1;
        c4 / (var * var) - 3.0
    }
}

impl DiscreteDistribution for BetaNegBinomial {
    fn pmf(&self, k: i64) -> f64 {
        self.ln_pmf(k).exp()
    }

    fn ln_pmf(&self, k: i64) -> f64 {
        if k < 0 {
            return f64::NEG_INFINITY;
        }
        let kf = k as f64;
        ln_gamma(self.r + kf) - ln_gamma(kf + 1.0) - ln_gamma(self.r)
            + ln_beta(self.alpha + self.r, self.beta + kf)
            - ln_beta(self.alpha, self.beta)
    }

    fn cdf(&self, k: i64) -> f64 {
        cdf_by_log_summation(|j| self.ln_pmf(j), 0, k)
    }

    fn quantile(&self, p: f64) -> Result<i64> {
        quantile_search(|k| self.cdf(k), 0, None, p)
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> i64 {
        // Three-stage hierarchy: Beta success probability, Gamma rate,
        // Poisson count.
        let p: f64 = rand_distr::Beta::new(self.alpha, self.beta)
            .expect("valid parameters")
            .sample(rng);
        // Keep the Gamma scale finite and positive at the Beta extremes.
        let p = p.clamp(1e-12, 1.0 - 1e-12);
        let g: f64 = rand_distr::Gamma::new(self.r, (1.0 - p) / p)
            .expect("valid parameters")
            .sample(rng);
        if g <= 0.0 {
            return 0;
        }
        let x: f64 = rand_distr::Poisson::new(g).expect("valid parameters").sample(rng);
        x as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_validates() {
        assert!(BetaNegBinomial::new(3.0, 2.0, 1.0).is_ok());
        assert!(BetaNegBinomial::new(0.0, 2.0, 1.0).is_err());
        assert!(BetaNegBinomial::new(3.0, -1.0, 1.0).is_err());
    }

    #[test]
    fn mass_sums_to_one() {
        let d = BetaNegBinomial::new(2.0, 5.0, 1.5).unwrap();
        let total: f64 = (0..5000).map(|k| d.pmf(k)).sum();
        assert!((total - 1.0).abs() < 1e-6, "got {total}");
    }

    #[test]
    fn mean_closed_form() {
        // E[X] = rβ/(α−1)
        let d = BetaNegBinomial::new(3.0, 4.0, 2.0).unwrap();
        assert!((d.mean() - 3.0 * 2.0 / 3.0).abs() < 1e-10, "mean {}", d.mean());
    }

    #[test]
    fn moment_existence_gates() {
        let d = BetaNegBinomial::new(2.0, 1.5, 1.0).unwrap();
        assert!(d.mean().is_finite());
        assert!(d.var().is_nan());

        let d = BetaNegBinomial::new(2.0, 0.5, 1.0).unwrap();
        assert!(d.mean().is_nan());
    }

    #[test]
    fn log_space_cdf_handles_underflow() {
        let d = BetaNegBinomial::new(5.0, 6.0, 3.0).unwrap();
        let c = d.cdf(2000);
        assert!((0.0..=1.0).contains(&c));
        assert!(c > 0.999, "cdf(2000) = {c}");
    }

    #[test]
    fn quantile_is_generalized_inverse() {
        let d = BetaNegBinomial::new(2.0, 3.0, 2.0).unwrap();
        for p in [0.1, 0.5, 0.9] {
            let k = d.quantile(p).unwrap();
            assert!(d.cdf(k) >= p);
            if k > 0 {
                assert!(d.cdf(k - 1) < p);
            }
        }
    }

    #[test]
    fn log_mass_consistency() {
        let d = BetaNegBinomial::new(2.5, 3.0, 1.5).unwrap();
        for k in [0, 1, 5, 50] {
            let pmf = d.pmf(k);
            assert!((d.ln_pmf(k).exp() - pmf).abs() <= 1e-15 * pmf.max(1.0));
        }
    }
}
