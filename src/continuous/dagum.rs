//! Dagum distribution.

use rand::Rng;
use rand_distr::Open01;
use statrs::function::gamma::ln_gamma;

use crate::distribution::{ContinuousDistribution, Distribution, Interval};
use crate::ensure_param;
use crate::errors::{check_probability, Result};
use crate::special::softplus;

/// Dagum distribution with shapes `p`, `a` and scale `b`.
///
/// CDF (x > 0): `F(x) = (1 + (x/b)^{−a})^{−p}`.
///
/// The r-th raw moment is `b^r Γ(p + r/a) Γ(1 − r/a) / Γ(p)` and exists
/// iff `r < a`; moments at or beyond that threshold are `NAN`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dagum {
    p: f64,
    a: f64,
    b: f64,
}

impl Dagum {
    /// Create a Dagum distribution, validating that all three parameters
    /// are positive.
    pub fn new(p: f64, a: f64, b: f64) -> Result<Self> {
        ensure_param!(p.is_finite() && p > 0.0, "p", p, "p > 0");
        ensure_param!(a.is_finite() && a > 0.0, "a", a, "a > 0");
        ensure_param!(b.is_finite() && b > 0.0, "b", b, "b > 0");
        Ok(Self::new_unchecked(p, a, b))
    }

    /// Create without validating parameters (documented opt-out).
    pub fn new_unchecked(p: f64, a: f64, b: f64) -> Self {
        Self { p, a, b }
    }

    /// First shape parameter p.
    pub fn shape_p(&self) -> f64 {
        self.p
    }

    /// Second shape parameter a.
    pub fn shape_a(&self) -> f64 {
        self.a
    }

    /// Scale parameter b.
    pub fn scale(&self) -> f64 {
        self.b
    }

    /// Parameter tuple `(p, a, b)`.
    pub fn params(&self) -> (f64, f64, f64) {
        (self.p, self.a, self.b)
    }

    fn raw_moment(&self, r: f64) -> f64 {
        if r >= self.a {
            return f64::NAN;
        }
        (r * self.b.ln() + ln_gamma(self.p + r / self.a) + ln_gamma(1.0 - r / self.a)
            - ln_gamma(self.p))
        .exp()
    }
}

impl Distribution for Dagum {
    fn name(&self) -> &'static str {
        "Dagum"
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
        self.b * (2.0_f64.powf(1.0 / self.p) - 1.0).powf(-1.0 / self.a)
    }

    fn mode(&self) -> f64 {
        if self.a * self.p > 1.0 {
            self.b * ((self.a * self.p - 1.0) / (self.a + 1.0)).powf(1.0 / self.a)
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

impl ContinuousDistribution for Dagum {
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
        let lu = x.ln() - self.b.ln();
        // f(x) = (ap/x) (x/b)^{ap} / (1 + (x/b)^a)^{p+1}
        self.a.ln() + self.p.ln() - x.ln() + self.a * self.p * lu
            - (self.p + 1.0) * softplus(self.a * lu)
    }

    fn cdf(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        (-self.p * softplus(-self.a * (x.ln() - self.b.ln()))).exp()
    }

    fn quantile(&self, p: f64) -> Result<f64> {
        check_probability(p)?;
        if p == 0.0 {
            return Ok(0.0);
        }
        if p == 1.0 {
            return Ok(f64::INFINITY);
        }
        Ok(self.b * (p.powf(-1.0 / self.p) - 1.0).powf(-1.0 / self.a))
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let u: f64 = rng.sample(Open01);
        self.b * (u.powf(-1.0 / self.p) - 1.0).powf(-1.0 / self.a)
    }
}
