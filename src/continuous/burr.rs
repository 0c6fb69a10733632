//! Burr type XII distribution.

use rand::Rng;
use rand_distr::Open01;
use statrs::function::gamma::ln_gamma;

use crate::distribution::{ContinuousDistribution, Distribution, Interval};
use crate::ensure_param;
use crate::errors::{check_probability, Result};

/// Burr type XII distribution with shapes `c`, `k` and scale `lambda`.
///
/// CDF (x > 0): `F(x) = 1 − (1 + (x/λ)^c)^{−k}`.
///
/// The r-th raw moment exists iff `r < c·k`; moments beyond that threshold
/// are undefined and reported as `NAN`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Burr {
    c: f64,
    k: f64,
    lambda: f64,
}

impl Burr {
    /// Create a Burr XII distribution, validating that all three parameters
    /// are positive.
    pub fn new(c: f64, k: f64, lambda: f64) -> Result<Self> {
        ensure_param!(c.is_finite() && c > 0.0, "c", c, "c > 0");
        ensure_param!(k.is_finite() && k > 0.0, "k", k, "k > 0");
        ensure_param!(
            lambda.is_finite() && lambda > 0.0,
            "lambda",
            lambda,
            "lambda > 0"
        );
        Ok(Self::new_unchecked(c, k, lambda))
    }

    /// Unit-scale Burr XII.
    pub fn standard(c: f64, k: f64) -> Result<Self> {
        Self::new(c, k, 1.0)
    }

    /// Create without validating parameters (documented opt-out).
    pub fn new_unchecked(c: f64, k: f64, lambda: f64) -> Self {
        Self { c, k, lambda }
    }

    /// First shape parameter c.
    pub fn shape_c(&self) -> f64 {
        self.c
    }

    /// Second shape parameter k.
    pub fn shape_k(&self) -> f64 {
        self.k
    }

    /// Scale parameter λ.
    pub fn scale(&self) -> f64 {
        self.lambda
    }

    /// Parameter tuple `(c, k, lambda)`.
    pub fn params(&self) -> (f64, f64, f64) {
        (self.c, self.k, self.lambda)
    }

    /// `E[X^r] = λ^r Γ(k − r/c) Γ(1 + r/c) / Γ(k)` for `r < ck`, else NAN.
    fn raw_moment(&self, r: f64) -> f64 {
        if r >= self.c * self.k {
            return f64::NAN;
        }
        (r * self.lambda.ln() + ln_gamma(self.k - r / self.c) + ln_gamma(1.0 + r / self.c)
            - ln_gamma(self.k))
        .exp()
    }
}

impl Distribution for Burr {
    fn name(&self) -> &'static str {
        "Burr"
    }

    fn support(&self) -> Interval {
        Interval::open(0.0, f64::INFINITY)
    }

    fn mean(&self) -> f64 {
        self.raw_moment(1.0)
    }

    fn var(&self) -> f64 {
        let m1 = self.raw_moment(1.0);
        let m2 = self.raw_moment(2.0);
        m2 - m1 * m1
    }

    fn median(&self) -> f64 {
        self.lambda * (2.0_f64.powf(1.0 / self.k) - 1.0).powf(1.0 / self.c)
    }

    fn mode(&self) -> f64 {
        if self.c > 1.0 {
            self.lambda * ((self.c - 1.0) / (self.k * self.c + 1.0)).powf(1.0 / self.c)
        } else {
            0.0
        }
    }

    fn skewness(&self) -> f64 {
        let m1 = self.raw_moment(1.0);
        let m2 = self.raw_moment(2.0);
        let m3 = self.raw_moment(3.0);
        let var = m2 - m1 * m1;
        (m3 - 3.0 * m1 * m2 + 2.0 * m1 * m1 * m1) / var.powf(1.5)
    }

    fn kurtosis(&self) -> f64 {
        let m1 = self.raw_moment(1.0);
        let m2 = self.raw_moment(2.0);
        let m3 = self.raw_moment(3.0);
        let m4 = self.raw_moment(4.0);
        let var = m2 - m1 * m1;
        let c4 = m4 - 4.0 * m1 * m3 + 6.0 * m1 * m1 * m2 - 3.0 * m1 * m1 * m1 * m1;
        c4 / (var * var) - 3.0
    }
}

impl ContinuousDistribution for Burr {
    fn pdf(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        self.ln_pdf(x).exp()
    }

    fn ln_pdf(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return f64::NEG_INFINITY;
        }
        let u = x / self.lambda;
        self.c.ln() + self.k.ln() - self.lambda.ln() + (self.c - 1.0) * u.ln()
            - (self.k + 1.0) * u.powf(self.c).ln_1p()
    }

    fn cdf(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        -(-self.k * (x / self.lambda).powf(self.c).ln_1p()).exp_m1()
    }

    fn sf(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 1.0;
        }
        (-self.k * (x / self.lambda).powf(self.c).ln_1p()).exp()
    }

    fn quantile(&self, p: f64) -> Result<f64> {
        check_probability(p)?;
        if p == 0.0 {
            return Ok(0.0);
        }
        if p == 1.0 {
            return Ok(f64::INFINITY);
        }
        Ok(self.lambda * ((1.0 - p).powf(-1.0 / self.k) - 1.0).powf(1.0 / self.c))
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let u: f64 = rng.sample(Open01);
        self.lambda * (u.powf(-1.0 / self.k) - 1.0).powf(1.0 / self.c)
    }
}
