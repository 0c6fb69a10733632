//! Yule–Simon distribution.

use rand::Rng;
use rand_distr::Distribution as _;
use statrs::function::beta::ln_beta;

use crate::discrete::quantile_search;
use crate::distribution::{DiscreteDistribution, Distribution, Interval};
use crate::ensure_param;
use crate::errors::Result;

/// Yule–Simon distribution with shape `rho`.
///
/// `P(X = k) = ρ B(k, ρ + 1)` for k ≥ 1, with the closed survival form
/// `P(X > k) = k B(k, ρ + 1)`.
///
/// The tail decays like `k^{−ρ−1}`: the j-th moment requires `ρ > j`
/// (`NAN` otherwise). Sampling uses the exponential–geometric mixture
/// representation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YuleSimon {
    rho: f64,
}

impl YuleSimon {
    /// Create a Yule–Simon distribution, validating `rho > 0`.
    pub fn new(rho: f64) -> Result<Self> {
        ensure_param!(rho.is_finite() && rho > 0.0, "rho", rho, "rho > 0");
        Ok(Self::new_unchecked(rho))
    }

    /// Create without validating parameters (documented opt-out).
    pub fn new_unchecked(rho: f64) -> Self {
        Self { rho }
    }

    /// Shape parameter ρ.
    pub fn rho(&self) -> f64 {
        self.rho
    }

    /// Parameter tuple `(rho,)`.
    pub fn params(&self) -> (f64,) {
        (self.rho,)
    }

    /// `E[T^{−j}] = ρ/(ρ − j)` for the Beta(ρ, 1) success probability,
    /// defined for ρ > j.
    fn inv_beta_moment(&self, j: f64) -> f64 {
        if self.rho <= j {
            return f64::NAN;
        }
        self.rho / (self.rho - j)
    }

    fn raw_moments(&self) -> [f64; 4] {
        // Geometric (trials) moments mixed over the Beta success prob:
        // E[X]   = E[1/T]
        // E[X²]  = 2E[1/T²] − E[1/T]
        // E[X³]  = 6E[1/T³] − 6E[1/T²] + E[1/T]
        // E[X⁴]  = 24E[1/T⁴] − 36E[1/T³] + 14E[1/T²] − E[1/T]
        let e1 = self.inv_beta_moment(1.0);
        let e2 = self.inv_beta_moment(2.0);
        let e3 = self.inv_beta_moment(3.0);
        let e4 = self.inv_beta_moment(4.0);
        [
            e1,
            2.0 * e2 - e1,
            6.0 * e3 - 6.0 * e2 + e1,
            24.0 * e4 - 36.0 * e3 + 14.0 * e2 - e1,
        ]
    }
}

impl Distribution for YuleSimon {
    fn name(&self) -> &'static str {
        "YuleSimon"
    }

    fn support(&self) -> Interval {
        Interval::closed(1.0, f64::INFINITY)
    }

    fn mean(&self) -> f64 {
        self.inv_beta_moment(1.0)
    }

    fn var(&self) -> f64 {
        let [m1, m2, ..] = self.raw_moments();
        m2 - m1 * m1
    }

    fn median(&self) -> f64 {
        self.quantile(0.5).map(|k| k as f64).unwrap_or(f64::NAN)
    }

    fn mode(&self) -> f64 {
        1.0
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

impl DiscreteDistribution for YuleSimon {
    fn pmf(&self, k: i64) -> f64 {
        self.ln_pmf(k).exp()
    }

    fn ln_pmf(&self, k: i64) -> f64 {
        if k < 1 {
            return f64::NEG_INFINITY;
        }
        self.rho.ln() + ln_beta(k as f64, self.rho + 1.0)
    }

    fn cdf(&self, k: i64) -> f64 {
        if k < 1 {
            return 0.0;
        }
        let kf = k as f64;
        // P(X > k) = k B(k, ρ + 1)
        1.0 - (kf.ln() + ln_beta(kf, self.rho + 1.0)).exp()
    }

    fn quantile(&self, p: f64) -> Result<i64> {
        quantile_search(|k| self.cdf(k), 1, None, p)
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> i64 {
        let w: f64 = rand_distr::Exp::new(self.rho).expect("valid parameters").sample(rng);
        let t = (-w).exp().max(1e-300);
        // Failures before the first success, shifted to trials.
        let g = rand_distr::Geometric::new(t).expect("valid parameters").sample(rng);
        g as i64 + 1
    }
}
