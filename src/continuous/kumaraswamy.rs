//! Kumaraswamy distribution.

use rand::Rng;
use rand_distr::Open01;
use statrs::function::beta::ln_beta;

use crate::distribution::{ContinuousDistribution, Distribution, Interval};
use crate::ensure_param;
use crate::errors::{check_probability, Result};

/// Kumaraswamy distribution on (0, 1) with shapes `a` and `b`.
///
/// `F(x) = 1 − (1 − x^a)^b`; all raw moments are `b·B(1 + r/a, b)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kumaraswamy {
    a: f64,
    b: f64,
}

impl Kumaraswamy {
    /// Create a Kumaraswamy distribution, validating `a > 0` and `b > 0`.
    pub fn new(a: f64, b: f64) -> Result<Self> {
        ensure_param!(a.is_finite() && a > 0.0, "a", a, "a > 0");
        ensure_param!(b.is_finite() && b > 0.0, "b", b, "b > 0");
        Ok(Self::new_unchecked(a, b))
    }

    /// Create without validating parameters (documented opt-out).
    pub fn new_unchecked(a: f64, b: f64) -> Self {
        Self { a, b }
    }

    /// First shape parameter a.
    pub fn shape_a(&self) -> f64 {
        self.a
    }

    /// Second shape parameter b.
    pub fn shape_b(&self) -> f64 {
        self.b
    }

    /// Parameter tuple `(a, b)`.
    pub fn params(&self) -> (f64, f64) {
        (self.a, self.b)
    }

    /// `E[X^r] = b B(1 + r/a, b)`.
    fn raw_moment(&self, r: f64) -> f64 {
        (self.b.ln() + ln_beta(1.0 + r / self.a, self.b)).exp()
    }
}

impl Distribution for Kumaraswamy {
    fn name(&self) -> &'static str {
        "Kumaraswamy"
    }

    fn support(&self) -> Interval {
        Interval::open(0.0, 1.0)
    }

    fn mean(&self) -> f64 {
        self.raw_moment(1.0)
    }

    fn var(&self) -> f64 {
        let m1 = self.raw_moment(1.0);
        self.raw_moment(2.0) - m1 * m1
    }

    fn median(&self) -> f64 {
        (1.0 - 2.0_f64.powf(-1.0 / self.b)).powf(1.0 / self.a)
    }

    /// The mode is interior only for `a ≥ 1`, `b ≥ 1` with `(a, b) ≠ (1, 1)`;
    /// otherwise the density is unbounded at an endpoint or flat and `NAN`
    /// is returned.
    fn mode(&self) -> f64 {
        if self.a >= 1.0 && self.b >= 1.0 && !(self.a == 1.0 && self.b == 1.0) {
            ((self.a - 1.0) / (self.a * self.b - 1.0)).powf(1.0 / self.a)
        } else {
            f64::NAN
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

impl ContinuousDistribution for Kumaraswamy {
    fn pdf(&self, x: f64) -> f64 {
        if x <= 0.0 || x >= 1.0 {
            return 0.0;
        }
        self.a * self.b * x.powf(self.a - 1.0) * (1.0 - x.powf(self.a)).powf(self.b - 1.0)
    }

    fn ln_pdf(&self, x: f64) -> f64 {
        if x <= 0.0 || x >= 1.0 {
            return f64::NEG_INFINITY;
        }
        self.a.ln() + self.b.ln() + (self.a - 1.0) * x.ln()
            + (self.b - 1.0) * (-x.powf(self.a)).ln_1p()
    }

    fn cdf(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        if x >= 1.0 {
            return 1.0;
        }
        -(self.b * (-x.powf(self.a)).ln_1p()).exp_m1()
    }

    fn quantile(&self, p: f64) -> Result<f64> {
        check_probability(p)?;
        Ok((1.0 - (1.0 - p).powf(1.0 / self.b)).powf(1.0 / self.a))
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let u: f64 = rng.sample(Open01);
        (1.0 - u.powf(1.0 / self.b)).powf(1.0 / self.a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_validates() {
        assert!(Kumaraswamy::new(2.0, 3.0).is_ok());
        assert!(Kumaraswamy::new(0.0, 3.0).is_err());
        assert!(Kumaraswamy::new(2.0, -1.0).is_err());
    }

    #[test]
    fn uniform_special_case() {
        // Kumaraswamy(1, 1) is Uniform(0, 1).
        let d = Kumaraswamy::new(1.0, 1.0).unwrap();
        assert!((d.pdf(0.3) - 1.0).abs() < 1e-14);
        assert!((d.cdf(0.7) - 0.7).abs() < 1e-14);
        assert!((d.mean() - 0.5).abs() < 1e-12);
        assert!((d.var() - 1.0 / 12.0).abs() < 1e-12);
        assert!(d.mode().is_nan());
    }

    #[test]
    fn quantile_roundtrip() {
        let d = Kumaraswamy::new(2.0, 5.0).unwrap();
        for p in [0.0, 0.1, 0.5, 0.9, 1.0] {
            let x = d.quantile(p).unwrap();
            assert!((d.cdf(x) - p).abs() < 1e-12, "p={p}");
        }
    }

    #[test]
    fn boundary_behavior() {
        let d = Kumaraswamy::new(2.0, 2.0).unwrap();
        assert_eq!(d.pdf(0.0), 0.0);
        assert_eq!(d.pdf(1.0), 0.0);
        assert_eq!(d.pdf(-0.5), 0.0);
        assert_eq!(d.cdf(1.0), 1.0);
        assert_eq!(d.cdf(1.5), 1.0);
        assert_eq!(d.ln_pdf(1.2), f64::NEG_INFINITY);
    }

    #[test]
    fn moments_match_quadrature() {
        let d = Kumaraswamy::new(2.0, 3.0).unwrap();
        let m = crate::integrals::pdf_moments(|x| d.pdf(x), 0.0, 1.0, 0.5).unwrap();
        assert!((d.mean() - m.mean).abs() < 1e-8);
        assert!((d.var() - m.var).abs() < 1e-8);
        assert!((d.skewness() - m.skewness).abs() < 1e-6);
        assert!((d.kurtosis() - m.kurtosis).abs() < 1e-5);
    }

    #[test]
    fn mode_interior() {
        let d = Kumaraswamy::new(2.0, 2.0).unwrap();
        let m = d.mode();
        assert!((m - (1.0_f64 / 3.0).sqrt()).abs() < 1e-12);
        assert!(d.pdf(m) >= d.pdf(m - 0.01));
        assert!(d.pdf(m) >= d.pdf(m + 0.01));
    }
}
