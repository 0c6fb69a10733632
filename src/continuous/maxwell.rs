//! Maxwell–Boltzmann distribution.

use rand::Rng;
use rand_distr::Distribution as _;
use statrs::distribution::ContinuousCDF;
use statrs::function::gamma::gamma_lr;

use crate::distribution::{ContinuousDistribution, Distribution, Interval};
use crate::ensure_param;
use crate::errors::{check_probability, Result};

const EULER_MASCHERONI: f64 = 0.577_215_664_901_532_9;

/// Maxwell–Boltzmann distribution with scale `a`.
///
/// `X²/(2a²)` is Gamma(3/2, 1); the CDF and quantile delegate to the
/// regularized incomplete gamma and the statrs Gamma inverse CDF.
#[derive(Debug, Clone, PartialEq)]
pub struct Maxwell {
    a: f64,
    // X² ~ Gamma(3/2, rate 1/(2a²)), cached for cdf/quantile.
    gamma: statrs::distribution::Gamma,
}

impl Maxwell {
    /// Create a Maxwell distribution, validating `a > 0`.
    pub fn new(a: f64) -> Result<Self> {
        ensure_param!(a.is_finite() && a > 0.0, "a", a, "a > 0");
        Ok(Self::new_unchecked(a))
    }

    /// Create without validating parameters (documented opt-out).
    pub fn new_unchecked(a: f64) -> Self {
        let gamma = statrs::distribution::Gamma::new(1.5, 0.5 / (a * a))
            .expect("valid parameters");
        Self { a, gamma }
    }

    /// Scale parameter a.
    pub fn scale(&self) -> f64 {
        self.a
    }

    /// Parameter tuple `(a,)`.
    pub fn params(&self) -> (f64,) {
        (self.a,)
    }
}

impl Distribution for Maxwell {
    fn name(&self) -> &'static str {
        "Maxwell"
    }

    fn support(&self) -> Interval {
        Interval::closed(0.0, f64::INFINITY)
    }

    fn mean(&self) -> f64 {
        2.0 * self.a * (2.0 / std::f64::consts::PI).sqrt()
    }

    fn var(&self) -> f64 {
        self.a * self.a * (3.0 * std::f64::consts::PI - 8.0) / std::f64::consts::PI
    }

    fn median(&self) -> f64 {
        self.quantile(0.5).unwrap_or(f64::NAN)
    }

    fn mode(&self) -> f64 {
        std::f64::consts::SQRT_2 * self.a
    }

    fn skewness(&self) -> f64 {
        let denom = 3.0 * std::f64::consts::PI - 8.0;
        2.0 * std::f64::consts::SQRT_2 * (16.0 - 5.0 * std::f64::consts::PI)
            / denom.powf(1.5)
    }

    fn kurtosis(&self) -> f64 {
        let pi = std::f64::consts::PI;
        let denom = 3.0 * pi - 8.0;
        4.0 * (-96.0 + 40.0 * pi - 3.0 * pi * pi) / (denom * denom)
    }

    fn entropy(&self) -> Result<f64> {
        Ok((self.a * (2.0 * std::f64::consts::PI).sqrt()).ln() + EULER_MASCHERONI - 0.5)
    }
}

impl ContinuousDistribution for Maxwell {
    fn pdf(&self, x: f64) -> f64 {
        if x < 0.0 {
            return 0.0;
        }
        let a = self.a;
        (2.0 / std::f64::consts::PI).sqrt() * x * x * (-0.5 * x * x / (a * a)).exp()
            / (a * a * a)
    }

    fn ln_pdf(&self, x: f64) -> f64 {
        if x < 0.0 {
            return f64::NEG_INFINITY;
        }
        if x == 0.0 {
            return f64::NEG_INFINITY;
        }
        let a = self.a;
        0.5 * (2.0 / std::f64::consts::PI).ln() + 2.0 * x.ln()
            - 0.5 * x * x / (a * a)
            - 3.0 * a.ln()
    }

    fn cdf(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        gamma_lr(1.5, 0.5 * x * x / (self.a * self.a))
    }

    fn quantile(&self, p: f64) -> Result<f64> {
        check_probability(p)?;
        if p == 0.0 {
            return Ok(0.0);
        }
        if p == 1.0 {
            return Ok(f64::INFINITY);
        }
        Ok(self.gamma.inverse_cdf(p).sqrt())
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let g: f64 = rand_distr::Gamma::new(1.5, 1.0)
            .expect("valid parameters")
            .sample(rng);
        self.a * (2.0 * g).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_validates() {
        assert!(Maxwell::new(1.0).is_ok());
        assert!(Maxwell::new(0.0).is_err());
        assert!(Maxwell::new(f64::NAN).is_err());
    }

    #[test]
    fn moments_match_quadrature() {
        let d = Maxwell::new(1.5).unwrap();
        let m = crate::integrals::pdf_moments(|x| d.pdf(x), 0.0, f64::INFINITY, 1.5).unwrap();
        assert!((d.mean() - m.mean).abs() < 1e-7);
        assert!((d.var() - m.var).abs() < 1e-7);
        assert!((d.skewness() - m.skewness).abs() < 1e-5);
        assert!((d.kurtosis() - m.kurtosis).abs() < 1e-4);
    }

    #[test]
    fn quantile_roundtrip() {
        let d = Maxwell::new(2.0).unwrap();
        for p in [0.01, 0.25, 0.5, 0.75, 0.99] {
            let x = d.quantile(p).unwrap();
            assert!((d.cdf(x) - p).abs() < 1e-6, "p={p}");
        }
    }

    #[test]
    fn mode_maximizes_density() {
        let d = Maxwell::new(1.0).unwrap();
        let m = d.mode();
        assert!(d.pdf(m) > d.pdf(m - 0.05));
        assert!(d.pdf(m) > d.pdf(m + 0.05));
    }

    #[test]
    fn log_density_consistency() {
        let d = Maxwell::new(1.0).unwrap();
        for x in [0.1, 1.0, 3.0, 10.0] {
            let pdf = d.pdf(x);
            assert!((d.ln_pdf(x).exp() - pdf).abs() <= 1e-13 * pdf.max(1.0), "x={x}");
        }
    }
}
