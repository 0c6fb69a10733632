//! Crystal Ball distribution.

use rand::Rng;
use rand_distr::StandardNormal;
use statrs::function::erf::erf;

use crate::distribution::{ContinuousDistribution, Distribution, Interval};
use crate::ensure_param;
use crate::errors::{check_probability, Result};
use crate::integrals;
use crate::solvers1d;

/// Crystal Ball distribution: a Gaussian core with a power-law lower tail.
///
/// With `t = (x − μ)/σ`:
///
/// f(x) = N·exp(−t²/2)          for t > −α
/// f(x) = N·A(B − t)^{−m}       for t ≤ −α
///
/// where `A = (m/α)^m e^{−α²/2}` and `B = m/α − α` make the density
/// continuous at the junction by construction, and the normalization `N`
/// is fixed at construction. Requires `α > 0`, `m > 1`, `σ > 0`.
///
/// The quantile has no closed form and is found by Brent root finding on
/// the documented bracket `[μ − 10⁶σ, μ + 10⁶σ]`; for heavy tails
/// (small `m`) extreme lower probabilities can fall outside the bracket,
/// which propagates as a numerical error.
///
/// Mean and variance are evaluated by quadrature and require `m > 2` and
/// `m > 3` respectively (`NAN` otherwise); skewness and kurtosis likewise
/// require `m > 4` and `m > 5`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrystalBall {
    alpha: f64,
    m: f64,
    mu: f64,
    sigma: f64,
    // Cached at construction: tail coefficients and normalization.
    a: f64,
    b: f64,
    nsig: f64,
    tail_prob: f64,
}

const QUANTILE_BRACKET_SIGMAS: f64 = 1.0e6;

impl CrystalBall {
    /// Create a Crystal Ball distribution, validating `alpha > 0`, `m > 1`
    /// and `sigma > 0`.
    pub fn new(alpha: f64, m: f64, mu: f64, sigma: f64) -> Result<Self> {
        ensure_param!(alpha.is_finite() && alpha > 0.0, "alpha", alpha, "alpha > 0");
        ensure_param!(m.is_finite() && m > 1.0, "m", m, "m > 1");
        ensure_param!(mu.is_finite(), "mu", mu, "mu finite");
        ensure_param!(sigma.is_finite() && sigma > 0.0, "sigma", sigma, "sigma > 0");
        Ok(Self::new_unchecked(alpha, m, mu, sigma))
    }

    /// Create without validating parameters (documented opt-out).
    pub fn new_unchecked(alpha: f64, m: f64, mu: f64, sigma: f64) -> Self {
        let a = (m / alpha).powf(m) * (-0.5 * alpha * alpha).exp();
        let b = m / alpha - alpha;
        let c = m / (alpha * (m - 1.0)) * (-0.5 * alpha * alpha).exp();
        let d = (std::f64::consts::PI / 2.0).sqrt()
            * (1.0 + erf(alpha / std::f64::consts::SQRT_2));
        let nsig = 1.0 / (c + d);
        Self {
            alpha,
            m,
            mu,
            sigma,
            a,
            b,
            nsig,
            tail_prob: c * nsig,
        }
    }

    /// Junction parameter α (in standardized units).
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Power-law exponent m.
    pub fn power(&self) -> f64 {
        self.m
    }

    /// Location μ.
    pub fn mu(&self) -> f64 {
        self.mu
    }

    /// Scale σ.
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Parameter tuple `(alpha, m, mu, sigma)`.
    pub fn params(&self) -> (f64, f64, f64, f64) {
        (self.alpha, self.m, self.mu, self.sigma)
    }

    fn standardize(&self, x: f64) -> f64 {
        (x - self.mu) / self.sigma
    }

    fn numeric_moments(&self) -> Result<integrals::NumericMoments> {
        integrals::pdf_moments(
            |x| self.pdf(x),
            f64::NEG_INFINITY,
            f64::INFINITY,
            self.mu,
        )
    }
}

impl Distribution for CrystalBall {
    fn name(&self) -> &'static str {
        "CrystalBall"
    }

    fn support(&self) -> Interval {
        Interval::open(f64::NEG_INFINITY, f64::INFINITY)
    }

    fn mean(&self) -> f64 {
        if self.m <= 2.0 {
            return f64::NAN;
        }
        self.numeric_moments().map(|m| m.mean).unwrap_or(f64::NAN)
    }

    fn var(&self) -> f64 {
        if self.m <= 3.0 {
            return f64::NAN;
        }
        self.numeric_moments().map(|m| m.var).unwrap_or(f64::NAN)
    }

    fn median(&self) -> f64 {
        self.quantile(0.5).unwrap_or(f64::NAN)
    }

    fn mode(&self) -> f64 {
        self.mu
    }

    fn skewness(&self) -> f64 {
        if self.m <= 4.0 {
            return f64::NAN;
        }
        self.numeric_moments()
            .map(|m| m.skewness)
            .unwrap_or(f64::NAN)
    }

    fn kurtosis(&self) -> f64 {
        if self.m <= 5.0 {
            return f64::NAN;
        }
        self.numeric_moments()
            .map(|m| m.kurtosis)
            .unwrap_or(f64::NAN)
    }
}

impl ContinuousDistribution for CrystalBall {
    fn pdf(&self, x: f64) -> f64 {
        let t = self.standardize(x);
        let n = self.nsig / self.sigma;
        if t > -self.alpha {
            n * (-0.5 * t * t).exp()
        } else {
            n * self.a * (self.b - t).powf(-self.m)
        }
    }

    fn ln_pdf(&self, x: f64) -> f64 {
        let t = self.standardize(x);
        let ln_n = self.nsig.ln() - self.sigma.ln();
        if t > -self.alpha {
            ln_n - 0.5 * t * t
        } else {
            ln_n + self.a.ln() - self.m * (self.b - t).ln()
        }
    }

    fn cdf(&self, x: f64) -> f64 {
        let t = self.standardize(x);
        if t <= -self.alpha {
            self.nsig * self.a * (self.b - t).powf(1.0 - self.m) / (self.m - 1.0)
        } else {
            let gauss = (std::f64::consts::PI / 2.0).sqrt()
                * (erf(t / std::f64::consts::SQRT_2)
                    + erf(self.alpha / std::f64::consts::SQRT_2));
            (self.tail_prob + self.nsig * gauss).min(1.0)
        }
    }

    fn quantile(&self, p: f64) -> Result<f64> {
        check_probability(p)?;
        if p == 0.0 {
            return Ok(f64::NEG_INFINITY);
        }
        if p == 1.0 {
            return Ok(f64::INFINITY);
        }
        let lo = self.mu - QUANTILE_BRACKET_SIGMAS * self.sigma;
        let hi = self.mu + QUANTILE_BRACKET_SIGMAS * self.sigma;
        solvers1d::invert_cdf(|x| self.cdf(x), lo, hi, p)
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        // Two-candidate scheme: pick the regime by its exact probability,
        // then draw the tail by inverse transform (its conditional density
        // is the truncated power law) or the core by rejecting Gaussian
        // proposals that fall past the junction.
        let t = if rng.gen::<f64>() < self.tail_prob {
            let v: f64 = rng.sample(rand_distr::Open01);
            self.b - (self.b + self.alpha) * v.powf(1.0 / (1.0 - self.m))
        } else {
            loop {
                let z: f64 = rng.sample(StandardNormal);
                if z > -self.alpha {
                    break z;
                }
            }
        };
        self.mu + self.sigma * t
    }
}
