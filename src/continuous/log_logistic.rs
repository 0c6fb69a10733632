//! Log-logistic (Fisk) distribution.

use rand::Rng;
use rand_distr::Open01;

use crate::distribution::{ContinuousDistribution, Distribution, Interval};
use crate::ensure_param;
use crate::errors::{check_probability, Result};
use crate::special::softplus;

/// Log-logistic (Fisk) distribution with scale `alpha` and shape `beta`.
///
/// CDF (x > 0): `F(x) = 1 / (1 + (x/α)^{−β})`.
///
/// `E[X^r] = α^r (rπ/β) / sin(rπ/β)` for `r < β`, `NAN` otherwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogLogistic {
    alpha: f64,
    beta: f64,
}

impl LogLogistic {
    /// Create a log-logistic distribution, validating `alpha > 0` and
    /// `beta > 0`.
    pub fn new(alpha: f64, beta: f64) -> Result<Self> {
        ensure_param!(alpha.is_finite() && alpha > 0.0, "alpha", alpha, "alpha > 0");
        ensure_param!(beta.is_finite() && beta > 0.0, "beta", beta, "beta > 0");
        Ok(Self::new_unchecked(alpha, beta))
    }

    /// Create without validating parameters (documented opt-out).
    pub fn new_unchecked(alpha: f64, beta: f64) -> Self {
        Self { alpha, beta }
    }

    /// Scale parameter α (equals the median).
    pub fn scale(&self) -> f64 {
        self.alpha
    }

    /// Shape parameter β.
    pub fn shape(&self) -> f64 {
        self.beta
    }

    /// Parameter tuple `(alpha, beta)`.
    pub fn params(&self) -> (f64, f64) {
        (self.alpha, self.beta)
    }

    fn raw_moment(&self, r: f64) -> f64 {
        if r >= self.beta {
            return f64::NAN;
        }
        let theta = r * std::f64::consts::PI / self.beta;
        self.alpha.powf(r) * theta / theta.sin()
    }
}

impl Distribution for LogLogistic {
    fn name(&self) -> &'static str {
        "LogLogistic"
    }

    fn support(&self) -> Interval {
        Interval::open(0.0, f64::INFINITY)
    }

    fn mean(&self) -> f64 {
        self.raw_moment(1.0)
    }

    fn var(&self) -> f64 {
        let m1 = self.raw_moment(1.0);
        self.raw_moment(2.0) - m1 * m1
    }

    fn median(&self) -> f64 {
        self.alpha
    }

    fn mode(&self) -> f64 {
        if self.beta > 1.0 {
            self.alpha * ((self.beta - 1.0) / (self.beta + 1.0)).powf(1.0 / self.beta)
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

impl ContinuousDistribution for LogLogistic {
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
        let lu = x.ln() - self.alpha.ln();
        self.beta.ln() - self.alpha.ln() + (self.beta - 1.0) * lu
            - 2.0 * softplus(self.beta * lu)
    }

    fn cdf(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        (-softplus(-self.beta * (x.ln() - self.alpha.ln()))).exp()
    }

    fn quantile(&self, p: f64) -> Result<f64> {
        check_probability(p)?;
        if p == 0.0 {
            return Ok(0.0);
        }
        if p == 1.0 {
            return Ok(f64::INFINITY);
        }
        Ok(self.alpha * (p / (1.0 - p)).powf(1.0 / self.beta))
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let u: f64 = rng.sample(Open01);
        self.alpha * (u / (1.0 - u)).powf(1.0 / self.beta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_validates() {
        assert!(LogLogistic::new(1.0, 2.0).is_ok());
        assert!(LogLogistic::new(0.0, 2.0).is_err());
        assert!(LogLogistic::new(1.0, f64::NAN).is_err());
    }

    #[test]
    fn median_is_scale() {
        let d = LogLogistic::new(3.0, 2.0).unwrap();
        assert!((d.cdf(3.0) - 0.5).abs() < 1e-14);
    }

    #[test]
    fn quantile_roundtrip() {
        let d = LogLogistic::new(2.0, 3.0).unwrap();
        for p in [0.01, 0.25, 0.5, 0.75, 0.99] {
            let x = d.quantile(p).unwrap();
            assert!((d.cdf(x) - p).abs() < 1e-12, "p={p}");
        }
    }

    #[test]
    fn moment_existence_threshold() {
        let d = LogLogistic::new(1.0, 1.5).unwrap();
        assert!(d.mean().is_finite());
        assert!(d.var().is_nan());

        let d = LogLogistic::new(1.0, 0.5).unwrap();
        assert!(d.mean().is_nan());
    }

    #[test]
    fn mean_matches_quadrature() {
        let d = LogLogistic::new(2.0, 4.0).unwrap();
        let numeric = crate::integrals::TanhSinh::default_params()
            .integrate_half_line_up(|x| x * d.pdf(x), 0.0)
            .unwrap();
        assert!((d.mean() - numeric).abs() < 1e-5, "{} vs {numeric}", d.mean());
    }

    #[test]
    fn log_density_consistency() {
        let d = LogLogistic::new(1.0, 2.0).unwrap();
        for x in [1e-4, 0.5, 1.0, 50.0, 1e5] {
            let pdf = d.pdf(x);
            assert!((d.ln_pdf(x).exp() - pdf).abs() <= 1e-13 * pdf.max(1.0), "x={x}");
        }
    }
}
