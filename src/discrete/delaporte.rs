//! Delaporte distribution.

use rand::Rng;
use rand_distr::Distribution as _;
use statrs::function::gamma::ln_gamma;

use crate::discrete::{cdf_by_summation, mode_by_scan, quantile_search};
use crate::distribution::{DiscreteDistribution, Distribution, Interval};
use crate::ensure_param;
use crate::errors::Result;
use crate::special::LogSumExp;

/// Delaporte distribution: the sum of an independent
/// `NegativeBinomial(α, 1/(1+β))` and `Poisson(λ)` count.
///
/// The mass function is the convolution of the two components, summed in
/// log space; moments follow from the fact that cumulants of independent
/// sums add. Sampling is hierarchical: a Gamma(α, β) rate feeds a Poisson
/// draw, and an independent Poisson(λ) count is added.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Delaporte {
    alpha: f64,
    beta: f64,
    lambda: f64,
}

impl Delaporte {
    /// Create a Delaporte distribution, validating `alpha > 0`, `beta > 0`
    /// and `lambda > 0`.
    pub fn new(alpha: f64, beta: f64, lambda: f64) -> Result<Self> {
        ensure_param!(alpha.is_finite() && alpha > 0.0, "alpha", alpha, "alpha > 0");
        ensure_param!(beta.is_finite() && beta > 0.0, "beta", beta, "beta > 0");
        ensure_param!(lambda.is_finite() && lambda > 0.0, "lambda", lambda, "lambda > 0");
        Ok(Self::new_unchecked(alpha, beta, lambda))
    }

    /// Create without validating parameters (documented opt-out).
    pub fn new_unchecked(alpha: f64, beta: f64, lambda: f64) -> Self {
        Self {
            alpha,
            beta,
            lambda,
        }
    }

    /// Gamma shape α of the mixed component.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Gamma scale β of the mixed component.
    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Rate λ of the fixed Poisson component.
    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    /// Parameter tuple `(alpha, beta, lambda)`.
    pub fn params(&self) -> (f64, f64, f64) {
        (self.alpha, self.beta, self.lambda)
    }

    /// Log-mass of the negative binomial component (failures count).
    fn ln_nb(&self, j: i64) -> f64 {
        let jf = j as f64;
        ln_gamma(self.alpha + jf) - ln_gamma(self.alpha) - ln_gamma(jf + 1.0)
            + jf * (self.beta.ln() - self.beta.ln_1p())
            - self.alpha * self.beta.ln_1p()
    }

    /// Log-mass of the Poisson component.
    fn ln_pois(&self, i: i64) -> f64 {
        let inf = i as f64;
        -self.lambda + inf * self.lambda.ln() - ln_gamma(inf + 1.0)
    }
}

impl Distribution for Delaporte {
    fn name(&self) -> &'static str {
        "Delaporte"
    }

    fn support(&self) -> Interval {
        Interval::closed(0.0, f64::INFINITY)
    }

    fn mean(&self) -> f64 {
        self.lambda + self.alpha * self.beta
    }

    fn var(&self) -> f64 {
        self.lambda + self.alpha * self.beta * (1.0 + self.beta)
    }

    fn median(&self) -> f64 {
        self.quantile(0.5).map(|k| k as f64).unwrap_or(f64::NAN)
    }

    fn mode(&self) -> f64 {
        mode_by_scan(|k| self.pmf(k), 0) as f64
    }

    fn skewness(&self) -> f64 {
        // Third cumulants add: λ for the Poisson part,
        // αβ(1 + 3β + 2β²) for the negative binomial part.
        let b = self.beta;
        let k3 = self.lambda + self.alpha * b * (1.0 + 3.0 * b + 2.0 * b * b);
        k3 / self.var().powf(1.5)
    }

    fn kurtosis(&self) -> f64 {
        let b = self.beta;
        let k4 = self.lambda
            + self.alpha * b * (1.0 + 7.0 * b + 12.0 * b * b + 6.0 * b * b * b);
        let v = self.var();
        k4 / (v * v)
    }
}

impl DiscreteDistribution for Delaporte {
    fn pmf(&self, k: i64) -> f64 {
        self.ln_pmf(k).exp()
    }

    fn ln_pmf(&self, k: i64) -> f64 {
        if k < 0 {
            return f64::NEG_INFINITY;
        }
        let mut acc = LogSumExp::new();
        for j in 0..=k {
            acc.add(self.ln_nb(j) + self.ln_pois(k - j));
        }
        acc.value()
    }

    fn cdf(&self, k: i64) -> f64 {
        cdf_by_summation(|j| self.pmf(j), 0, k)
    }

    fn quantile(&self, p: f64) -> Result<i64> {
        quantile_search(|k| self.cdf(k), 0, None, p)
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> i64 {
        let g: f64 = rand_distr::Gamma::new(self.alpha, self.beta)
            .expect("valid parameters")
            .sample(rng);
        let mixed = if g > 0.0 {
            let x: f64 = rand_distr::Poisson::new(g).expect("valid parameters").sample(rng);
            x as i64
        } else {
            0
        };
        let fixed: f64 = rand_distr::Poisson::new(self.lambda)
            .expect("valid parameters")
            .sample(rng);
        mixed + fixed as i64
    }
}
