//! Nakagami-m distribution.

use rand::Rng;
use rand_distr::Distribution as _;
use statrs::distribution::ContinuousCDF;
use statrs::function::gamma::{gamma_lr, ln_gamma};

use crate::distribution::{ContinuousDistribution, Distribution, Interval};
use crate::ensure_param;
use crate::errors::{check_probability, Result};

/// Nakagami distribution with shape `m ≥ 1/2` and spread `omega > 0`.
///
/// `X² ~ Gamma(m, rate m/Ω)`; raw moments are
/// `E[X^r] = Γ(m + r/2)/Γ(m) · (Ω/m)^{r/2}`.
#[derive(Debug, Clone, PartialEq)]
pub struct Nakagami {
    m: f64,
    omega: f64,
    gamma: statrs::distribution::Gamma,
}

impl Nakagami {
    /// Create a Nakagami distribution, validating `m >= 1/2` and
    /// `omega > 0`.
    pub fn new(m: f64, omega: f64) -> Result<Self> {
        ensure_param!(m.is_finite() && m >= 0.5, "m", m, "m >= 1/2");
        ensure_param!(omega.is_finite() && omega > 0.0, "omega", omega, "omega > 0");
        Ok(Self::new_unchecked(m, omega))
    }

    /// Create without validating parameters (documented opt-out).
    pub fn new_unchecked(m: f64, omega: f64) -> Self {
        let gamma =
            statrs::distribution::Gamma::new(m, m / omega).expect("valid parameters");
        Self { m, omega, gamma }
    }

    /// Shape parameter m.
    pub fn shape(&self) -> f64 {
        self.m
    }

    /// Spread parameter Ω.
    pub fn spread(&self) -> f64 {
        self.omega
    }

    /// Parameter tuple `(m, omega)`.
    pub fn params(&self) -> (f64, f64) {
        (self.m, self.omega)
    }

    fn raw_moment(&self, r: f64) -> f64 {
        (ln_gamma(self.m + 0.5 * r) - ln_gamma(self.m)
            + 0.5 * r * (self.omega / self.m).ln())
        .exp()
    }
}

impl Distribution for Nakagami {
    fn name(&self) -> &'static str {
        "Nakagami"
    }

    fn support(&self) -> Interval {
        Interval::open(0.0, f64::INFINITY)
    }

    fn mean(&self) -> f64 {
        self.raw_moment(1.0)
    }

    fn var(&self) -> f64 {
        let m1 = self.raw_moment(1.0);
        self.omega - m1 * m1
    }

    fn median(&self) -> f64 {
        self.quantile(0.5).unwrap_or(f64::NAN)
    }

    fn mode(&self) -> f64 {
        ((2.0 * self.m - 1.0) * self.omega / (2.0 * self.m)).sqrt()
    }

    fn skewness(&self) -> f64 {
        let m1 = self.raw_moment(1.0);
        let m2 = self.omega;
        let m3 = self.raw_moment(3.0);
        let var = m2 - m1 * m1;
        (m3 - 3.0 * m1 * m2 + 2.0 * m1 * m1 * m1) / var.powf(1.5)
    }

    fn kurtosis(&self) -> f64 {
        let m1 = self.raw_moment(1.0);
        let m2 = self.omega;
        let m3 = self.raw_moment(3.0);
        let m4 = self.raw_moment(4.0);
        let var = m2 - m1 * m1;
        let c4 = m4 - 4.0 * m1 * m3 + 6.0 * m1 * m1 * m2 - 3.0 * m1 * m1 * m1 * m1;
        c4 / (var * var) - 3.0
    }
}

impl ContinuousDistribution for Nakagami {
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
        let (m, omega) = (self.m, self.omega);
        std::f64::consts::LN_2 + m * m.ln() - ln_gamma(m) - m * omega.ln()
            + (2.0 * m - 1.0) * x.ln()
            - m * x * x / omega
    }

    fn cdf(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        gamma_lr(self.m, self.m * x * x / self.omega)
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
        let g: f64 = rand_distr::Gamma::new(self.m, self.omega / self.m)
            .expect("valid parameters")
            .sample(rng);
        g.sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_validates() {
        assert!(Nakagami::new(0.5, 1.0).is_ok());
        assert!(Nakagami::new(0.4, 1.0).is_err());
        assert!(Nakagami::new(1.0, 0.0).is_err());
    }

    #[test]
    fn half_normal_special_case() {
        // m = 1/2, Ω = 1 is the half-normal |N(0,1)|.
        let d = Nakagami::new(0.5, 1.0).unwrap();
        let expected = (2.0 / std::f64::consts::PI).sqrt();
        assert!((d.mean() - expected).abs() < 1e-12);
        assert!((d.pdf(1.0) - expected * (-0.5_f64).exp()).abs() < 1e-12);
    }

    #[test]
    fn spread_is_second_moment() {
        let d = Nakagami::new(2.0, 3.0).unwrap();
        assert!((d.raw_moment(2.0) - 3.0).abs() < 1e-10);
        assert!((d.var() + d.mean().powi(2) - 3.0).abs() < 1e-10);
    }

    #[test]
    fn quantile_roundtrip() {
        let d = Nakagami::new(1.5, 2.0).unwrap();
        for p in [0.01, 0.25, 0.5, 0.75, 0.99] {
            let x = d.quantile(p).unwrap();
            assert!((d.cdf(x) - p).abs() < 1e-6, "p={p}");
        }
    }

    #[test]
    fn moments_match_quadrature() {
        let d = Nakagami::new(2.0, 1.0).unwrap();
        let m = crate::integrals::pdf_moments(|x| d.pdf(x), 0.0, f64::INFINITY, 1.0).unwrap();
        assert!((d.mean() - m.mean).abs() < 1e-7);
        assert!((d.var() - m.var).abs() < 1e-7);
        assert!((d.skewness() - m.skewness).abs() < 1e-5);
        assert!((d.kurtosis() - m.kurtosis).abs() < 1e-4);
    }

    #[test]
    fn log_density_consistency() {
        let d = Nakagami::new(1.0, 1.0).unwrap();
        for x in [0.05, 0.5, 1.5, 4.0] {
            let pdf = d.pdf(x);
            assert!((d.ln_pdf(x).exp() - pdf).abs() <= 1e-13 * pdf.max(1.0), "x={x}");
        }
    }
}
