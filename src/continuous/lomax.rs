//! Lomax (Pareto type II) distribution.

use rand::Rng;
use rand_distr::Distribution as _;

use crate::distribution::{ContinuousDistribution, Distribution, Interval};
use crate::ensure_param;
use crate::errors::{check_probability, Result};

/// Lomax distribution with shape `alpha` and scale `lambda`.
///
/// CDF (x ≥ 0): `F(x) = 1 − (1 + x/λ)^{−α}`.
///
/// Moment conventions at the shape thresholds: the mean is `NAN` for
/// `α ≤ 1` (undefined), the variance is `INFINITY` for `1 < α ≤ 2` and
/// `NAN` for `α ≤ 1`, skewness and kurtosis require `α > 3` and `α > 4`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lomax {
    alpha: f64,
    lambda: f64,
}

impl Lomax {
    /// Create a Lomax distribution, validating `alpha > 0` and `lambda > 0`.
    pub fn new(alpha: f64, lambda: f64) -> Result<Self> {
        ensure_param!(alpha.is_finite() && alpha > 0.0, "alpha", alpha, "alpha > 0");
        ensure_param!(
            lambda.is_finite() && lambda > 0.0,
            "lambda",
            lambda,
            "lambda > 0"
        );
        Ok(Self::new_unchecked(alpha, lambda))
    }

    /// Create without validating parameters (documented opt-out).
    pub fn new_unchecked(alpha: f64, lambda: f64) -> Self {
        Self { alpha, lambda }
    }

    /// Shape parameter α.
    pub fn shape(&self) -> f64 {
        self.alpha
    }

    /// Scale parameter λ.
    pub fn scale(&self) -> f64 {
        self.lambda
    }

    /// Parameter tuple `(alpha, lambda)`.
    pub fn params(&self) -> (f64, f64) {
        (self.alpha, self.lambda)
    }
}

impl Distribution for Lomax {
    fn name(&self) -> &'static str {
        "Lomax"
    }

    fn support(&self) -> Interval {
        Interval::closed(0.0, f64::INFINITY)
    }

    fn mean(&self) -> f64 {
        if self.alpha > 1.0 {
            self.lambda / (self.alpha - 1.0)
        } else {
            f64::NAN
        }
    }

    fn var(&self) -> f64 {
        let a = self.alpha;
        if a > 2.0 {
            self.lambda * self.lambda * a / ((a - 1.0) * (a - 1.0) * (a - 2.0))
        } else if a > 1.0 {
            f64::INFINITY
        } else {
            f64::NAN
        }
    }

    fn median(&self) -> f64 {
        self.lambda * (2.0_f64.powf(1.0 / self.alpha) - 1.0)
    }

    fn mode(&self) -> f64 {
        0.0
    }

    fn skewness(&self) -> f64 {
        let a = self.alpha;
        if a > 3.0 {
            2.0 * (1.0 + a) / (a - 3.0) * ((a - 2.0) / a).sqrt()
        } else {
            f64::NAN
        }
    }

    fn kurtosis(&self) -> f64 {
        let a = self.alpha;
        if a > 4.0 {
            6.0 * (a * a * a + a * a - 6.0 * a - 2.0) / (a * (a - 3.0) * (a - 4.0))
        } else {
            f64::NAN
        }
    }

    fn entropy(&self) -> Result<f64> {
        Ok(1.0 + 1.0 / self.alpha + (self.lambda / self.alpha).ln())
    }
}

impl ContinuousDistribution for Lomax {
    fn pdf(&self, x: f64) -> f64 {
        if x < 0.0 {
            return 0.0;
        }
        self.alpha / self.lambda * (1.0 + x / self.lambda).powf(-(self.alpha + 1.0))
    }

    fn ln_pdf(&self, x: f64) -> f64 {
        if x < 0.0 {
            return f64::NEG_INFINITY;
        }
        self.alpha.ln() - self.lambda.ln() - (self.alpha + 1.0) * (x / self.lambda).ln_1p()
    }

    fn cdf(&self, x: f64) -> f64 {
        if x < 0.0 {
            return 0.0;
        }
        -(-self.alpha * (x / self.lambda).ln_1p()).exp_m1()
    }

    fn sf(&self, x: f64) -> f64 {
        if x < 0.0 {
            return 1.0;
        }
        (-self.alpha * (x / self.lambda).ln_1p()).exp()
    }

    fn quantile(&self, p: f64) -> Result<f64> {
        check_probability(p)?;
        if p == 1.0 {
            return Ok(f64::INFINITY);
        }
        Ok(self.lambda * (-(1.0 - p).ln() / self.alpha).exp_m1())
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        // Shifted Pareto draw.
        let pareto = rand_distr::Pareto::new(self.lambda, self.alpha).expect("valid parameters");
        pareto.sample(rng) - self.lambda
    }
}
