//! Birnbaum–Saunders (fatigue life) distribution.

use rand::Rng;
use rand_distr::StandardNormal;

use crate::distribution::{ContinuousDistribution, Distribution, Interval};
use crate::ensure_param;
use crate::errors::{check_probability, Result};
use crate::solvers1d;
use crate::special;

/// Birnbaum–Saunders distribution with shape `gamma` and scale `beta`.
///
/// CDF (x > 0):
///
/// F(x) = Φ( (√(x/β) − √(β/x)) / γ )
///
/// All moments are closed; the quantile inverts through the normal
/// quantile; the mode is the root of a cubic and is found numerically on
/// the bracket `(0, β]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BirnbaumSaunders {
    gamma: f64,
    beta: f64,
}

impl BirnbaumSaunders {
    /// Create a Birnbaum–Saunders distribution, validating `gamma > 0` and
    /// `beta > 0`.
    pub fn new(gamma: f64, beta: f64) -> Result<Self> {
        ensure_param!(gamma.is_finite() && gamma > 0.0, "gamma", gamma, "gamma > 0");
        ensure_param!(beta.is_finite() && beta > 0.0, "beta", beta, "beta > 0");
        Ok(Self::new_unchecked(gamma, beta))
    }

    /// Create without validating parameters (documented opt-out).
    pub fn new_unchecked(gamma: f64, beta: f64) -> Self {
        Self { gamma, beta }
    }

    /// Shape parameter γ.
    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    /// Scale parameter β.
    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Parameter tuple `(gamma, beta)`.
    pub fn params(&self) -> (f64, f64) {
        (self.gamma, self.beta)
    }

    /// ξ(x) = (√(x/β) − √(β/x)) / γ.
    fn xi(&self, x: f64) -> f64 {
        ((x / self.beta).sqrt() - (self.beta / x).sqrt()) / self.gamma
    }
}

impl Distribution for BirnbaumSaunders {
    fn name(&self) -> &'static str {
        "BirnbaumSaunders"
    }

    fn support(&self) -> Interval {
        Interval::open(0.0, f64::INFINITY)
    }

    fn mean(&self) -> f64 {
        self.beta * (1.0 + 0.5 * self.gamma * self.gamma)
    }

    fn var(&self) -> f64 {
        let g2 = self.gamma * self.gamma;
        (self.gamma * self.beta).powi(2) * (1.0 + 1.25 * g2)
    }

    fn median(&self) -> f64 {
        // ξ(β) = 0, so F(β) = 1/2 exactly.
        self.beta
    }

    fn mode(&self) -> f64 {
        // Stationary point of ln f; the derivative is positive as x → 0⁺
        // and negative at β, so the bracket (0, β] always works.
        let (g, b) = (self.gamma, self.beta);
        let d = |x: f64| {
            let s = (x / b).sqrt() + (b / x).sqrt();
            let sp = 0.5 / (x * b).sqrt() - 0.5 * b.sqrt() / x.powf(1.5);
            let xi = self.xi(x);
            let xip = s / (2.0 * g * x);
            -xi * xip + sp / s - 1.0 / x
        };
        solvers1d::brent(d, 1e-10 * b, b, 1e-12).unwrap_or(f64::NAN)
    }

    fn skewness(&self) -> f64 {
        let g2 = self.gamma * self.gamma;
        4.0 * self.gamma * (11.0 * g2 + 6.0) / (5.0 * g2 + 4.0).powf(1.5)
    }

    fn kurtosis(&self) -> f64 {
        // Derived from the exact raw moments of β/4·(γZ + √(γ²Z²+4))²;
        // a commonly reproduced variant carries 41 where 40 is correct.
        let g2 = self.gamma * self.gamma;
        6.0 * g2 * (93.0 * g2 + 40.0) / (5.0 * g2 + 4.0).powi(2)
    }
}

impl ContinuousDistribution for BirnbaumSaunders {
    fn pdf(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        let s = (x / self.beta).sqrt() + (self.beta / x).sqrt();
        special::norm_pdf(self.xi(x)) * s / (2.0 * self.gamma * x)
    }

    fn ln_pdf(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return f64::NEG_INFINITY;
        }
        let s = (x / self.beta).sqrt() + (self.beta / x).sqrt();
        special::ln_norm_pdf(self.xi(x)) + s.ln() - (2.0 * self.gamma * x).ln()
    }

    fn cdf(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        special::norm_cdf(self.xi(x))
    }

    fn sf(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 1.0;
        }
        special::norm_sf(self.xi(x))
    }

    fn quantile(&self, p: f64) -> Result<f64> {
        check_probability(p)?;
        if p == 0.0 {
            return Ok(0.0);
        }
        if p == 1.0 {
            return Ok(f64::INFINITY);
        }
        let w = 0.5 * self.gamma * special::norm_ppf(p);
        let r = w + (w * w + 1.0).sqrt();
        Ok(self.beta * r * r)
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let z: f64 = rng.sample(StandardNormal);
        let w = 0.5 * self.gamma * z;
        let r = w + (w * w + 1.0).sqrt();
        self.beta * r * r
    }
}
