//! Gompertz distribution.

use rand::Rng;
use rand_distr::Open01;

use crate::distribution::{ContinuousDistribution, Distribution, Interval};
use crate::ensure_param;
use crate::errors::{check_probability, Result};
use crate::integrals;

/// Gompertz distribution with shape `eta` and rate `b`.
///
/// CDF (x ≥ 0): `F(x) = 1 − exp(−η(e^{bx} − 1))`.
///
/// The quantile is closed. The mean involves the exponential integral and
/// is evaluated by quadrature here, as are the higher moments (the
/// literature variance closed form is not reliable and is deliberately not
/// transcribed).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gompertz {
    eta: f64,
    b: f64,
}

impl Gompertz {
    /// Create a Gompertz distribution, validating `eta > 0` and `b > 0`.
    pub fn new(eta: f64, b: f64) -> Result<Self> {
        ensure_param!(eta.is_finite() && eta > 0.0, "eta", eta, "eta > 0");
        ensure_param!(b.is_finite() && b > 0.0, "b", b, "b > 0");
        Ok(Self::new_unchecked(eta, b))
    }

    /// Create without validating parameters (documented opt-out).
    pub fn new_unchecked(eta: f64, b: f64) -> Self {
        Self { eta, b }
    }

    /// Shape parameter η.
    pub fn eta(&self) -> f64 {
        self.eta
    }

    /// Rate parameter b.
    pub fn rate(&self) -> f64 {
        self.b
    }

    /// Parameter tuple `(eta, b)`.
    pub fn params(&self) -> (f64, f64) {
        (self.eta, self.b)
    }

    fn numeric_moments(&self) -> Result<integrals::NumericMoments> {
        integrals::pdf_moments(|x| self.pdf(x), 0.0, f64::INFINITY, 1.0 / self.b)
    }
}

impl Distribution for Gompertz {
    fn name(&self) -> &'static str {
        "Gompertz"
    }

    fn support(&self) -> Interval {
        Interval::closed(0.0, f64::INFINITY)
    }

    fn mean(&self) -> f64 {
        self.numeric_moments().map(|m| m.mean).unwrap_or(f64::NAN)
    }

    fn var(&self) -> f64 {
        self.numeric_moments().map(|m| m.var).unwrap_or(f64::NAN)
    }

    fn median(&self) -> f64 {
        (std::f64::consts::LN_2 / self.eta).ln_1p() / self.b
    }

    fn mode(&self) -> f64 {
        if self.eta < 1.0 {
            (1.0 / self.eta).ln() / self.b
        } else {
            0.0
        }
    }

    fn skewness(&self) -> f64 {
        self.numeric_moments()
            .map(|m| m.skewness)
            .unwrap_or(f64::NAN)
    }

    fn kurtosis(&self) -> f64 {
        self.numeric_moments()
            .map(|m| m.kurtosis)
            .unwrap_or(f64::NAN)
    }
}

impl ContinuousDistribution for Gompertz {
    fn pdf(&self, x: f64) -> f64 {
        if x < 0.0 {
            return 0.0;
        }
        self.ln_pdf(x).exp()
    }

    fn ln_pdf(&self, x: f64) -> f64 {
        if x < 0.0 {
            return f64::NEG_INFINITY;
        }
        let bx = self.b * x;
        self.b.ln() + self.eta.ln() + bx - self.eta * bx.exp_m1()
    }

    fn cdf(&self, x: f64) -> f64 {
        if x < 0.0 {
            return 0.0;
        }
        -(-self.eta * (self.b * x).exp_m1()).exp_m1()
    }

    fn sf(&self, x: f64) -> f64 {
        if x < 0.0 {
            return 1.0;
        }
        (-self.eta * (self.b * x).exp_m1()).exp()
    }

    fn quantile(&self, p: f64) -> Result<f64> {
        check_probability(p)?;
        if p == 1.0 {
            return Ok(f64::INFINITY);
        }
        Ok((-(1.0 - p).ln() / self.eta).ln_1p() / self.b)
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let u: f64 = rng.sample(Open01);
        (-u.ln() / self.eta).ln_1p() / self.b
    }
}
