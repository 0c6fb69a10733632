//! Bhattacharjee distribution (normal + uniform convolution).

use num_complex::Complex64;
use rand::Rng;
use rand_distr::StandardNormal;

use crate::distribution::{ContinuousDistribution, Distribution, Interval};
use crate::ensure_param;
use crate::errors::{check_probability, Result};
use crate::solvers1d;
use crate::special;

/// Bhattacharjee distribution: the sum of an independent `Normal(μ, σ)` and
/// `Uniform(−b, b)`.
///
/// Density:
///
/// f(x) = [Φ((x−μ+b)/σ) − Φ((x−μ−b)/σ)] / (2b)
///
/// The CDF is closed through G(z) = zΦ(z) + φ(z); the quantile is found by
/// Brent root finding over `[μ − b − 40σ, μ + b + 40σ]`, which encloses all
/// probabilities representable in double precision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bhattacharjee {
    mu: f64,
    sigma: f64,
    b: f64,
}

impl Bhattacharjee {
    /// Create a Bhattacharjee distribution, validating `sigma > 0` and
    /// `b > 0`.
    pub fn new(mu: f64, sigma: f64, b: f64) -> Result<Self> {
        ensure_param!(mu.is_finite(), "mu", mu, "mu finite");
        ensure_param!(sigma.is_finite() && sigma > 0.0, "sigma", sigma, "sigma > 0");
        ensure_param!(b.is_finite() && b > 0.0, "b", b, "b > 0");
        Ok(Self::new_unchecked(mu, sigma, b))
    }

    /// Create without validating parameters (documented opt-out).
    pub fn new_unchecked(mu: f64, sigma: f64, b: f64) -> Self {
        Self { mu, sigma, b }
    }

    /// Location μ.
    pub fn mu(&self) -> f64 {
        self.mu
    }

    /// Normal component scale σ.
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Uniform component half-width b.
    pub fn half_width(&self) -> f64 {
        self.b
    }

    /// Parameter tuple `(mu, sigma, b)`.
    pub fn params(&self) -> (f64, f64, f64) {
        (self.mu, self.sigma, self.b)
    }

    /// G(z) = zΦ(z) + φ(z), the antiderivative of Φ.
    fn big_g(z: f64) -> f64 {
        z * special::norm_cdf(z) + special::norm_pdf(z)
    }
}

impl Distribution for Bhattacharjee {
    fn name(&self) -> &'static str {
        "Bhattacharjee"
    }

    fn support(&self) -> Interval {
        Interval::open(f64::NEG_INFINITY, f64::INFINITY)
    }

    fn mean(&self) -> f64 {
        self.mu
    }

    fn var(&self) -> f64 {
        self.sigma * self.sigma + self.b * self.b / 3.0
    }

    fn median(&self) -> f64 {
        self.mu
    }

    fn mode(&self) -> f64 {
        self.mu
    }

    fn skewness(&self) -> f64 {
        0.0
    }

    fn kurtosis(&self) -> f64 {
        // Fourth central moment of the convolution:
        // 3σ⁴ + 2σ²b² + b⁴/5.
        let s2 = self.sigma * self.sigma;
        let b2 = self.b * self.b;
        let m4 = 3.0 * s2 * s2 + 2.0 * s2 * b2 + b2 * b2 / 5.0;
        let v = s2 + b2 / 3.0;
        m4 / (v * v) - 3.0
    }

    fn mgf(&self, t: f64) -> Result<f64> {
        if t == 0.0 {
            return Ok(1.0);
        }
        let bt = self.b * t;
        Ok((self.mu * t + 0.5 * self.sigma * self.sigma * t * t).exp() * bt.sinh() / bt)
    }

    fn cf(&self, t: f64) -> Result<Complex64> {
        if t == 0.0 {
            return Ok(Complex64::new(1.0, 0.0));
        }
        let bt = self.b * t;
        let gauss = Complex64::new(
            -0.5 * self.sigma * self.sigma * t * t,
            self.mu * t,
        )
        .exp();
        Ok(gauss * (bt.sin() / bt))
    }
}

impl ContinuousDistribution for Bhattacharjee {
    fn pdf(&self, x: f64) -> f64 {
        let z1 = (x - self.mu + self.b) / self.sigma;
        let z2 = (x - self.mu - self.b) / self.sigma;
        // Difference of survival functions in the upper tail avoids the
        // cancellation of two values near 1.
        let diff = if x <= self.mu {
            special::norm_cdf(z1) - special::norm_cdf(z2)
        } else {
            special::norm_sf(z2) - special::norm_sf(z1)
        };
        diff / (2.0 * self.b)
    }

    fn ln_pdf(&self, x: f64) -> f64 {
        self.pdf(x).ln()
    }

    fn cdf(&self, x: f64) -> f64 {
        let z1 = (x - self.mu + self.b) / self.sigma;
        let z2 = (x - self.mu - self.b) / self.sigma;
        let v = self.sigma * (Self::big_g(z1) - Self::big_g(z2)) / (2.0 * self.b);
        v.clamp(0.0, 1.0)
    }

    fn quantile(&self, p: f64) -> Result<f64> {
        check_probability(p)?;
        if p == 0.0 {
            return Ok(f64::NEG_INFINITY);
        }
        if p == 1.0 {
            return Ok(f64::INFINITY);
        }
        let lo = self.mu - self.b - 40.0 * self.sigma;
        let hi = self.mu + self.b + 40.0 * self.sigma;
        solvers1d::invert_cdf(|x| self.cdf(x), lo, hi, p)
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let z: f64 = rng.sample(StandardNormal);
        let u = rng.gen_range(-self.b..=self.b);
        self.mu + self.sigma * z + u
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_validates() {
        assert!(Bhattacharjee::new(0.0, 1.0, 1.0).is_ok());
        assert!(Bhattacharjee::new(0.0, 0.0, 1.0).is_err());
        assert!(Bhattacharjee::new(0.0, 1.0, -1.0).is_err());
        assert!(Bhattacharjee::new(f64::INFINITY, 1.0, 1.0).is_err());
    }

    #[test]
    fn symmetric_about_mu() {
        let d = Bhattacharjee::new(2.0, 1.0, 0.5).unwrap();
        for dx in [0.1, 0.5, 1.0, 3.0] {
            assert!((d.pdf(2.0 + dx) - d.pdf(2.0 - dx)).abs() < 1e-14, "dx={dx}");
        }
        assert!((d.cdf(2.0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn cdf_is_antiderivative_of_pdf() {
        let d = Bhattacharjee::new(0.0, 1.0, 1.0).unwrap();
        let h = 1e-5;
        for x in [-2.0, -0.5, 0.0, 0.7, 2.5] {
            let numeric = (d.cdf(x + h) - d.cdf(x - h)) / (2.0 * h);
            assert!((numeric - d.pdf(x)).abs() < 1e-8, "x={x}");
        }
    }

    #[test]
    fn quantile_roundtrip() {
        let d = Bhattacharjee::new(-1.0, 2.0, 1.5).unwrap();
        for p in [0.01, 0.25, 0.5, 0.75, 0.99] {
            let x = d.quantile(p).unwrap();
            assert!((d.cdf(x) - p).abs() < 1e-9, "p={p}");
        }
    }

    #[test]
    fn variance_combines_components() {
        let d = Bhattacharjee::new(0.0, 2.0, 3.0).unwrap();
        assert!((d.var() - (4.0 + 3.0)).abs() < 1e-12);
        assert_eq!(d.skewness(), 0.0);
        // Between the uniform (−1.2) and the normal (0) excess kurtosis.
        let k = d.kurtosis();
        assert!(k < 0.0 && k > -1.2, "kurtosis {k}");
    }

    #[test]
    fn mgf_at_zero_is_one() {
        let d = Bhattacharjee::new(1.0, 1.0, 2.0).unwrap();
        assert_eq!(d.mgf(0.0).unwrap(), 1.0);
        // Small-t expansion: M(t) ≈ 1 + μt + (μ² + var)t²/2
        let t = 1e-4;
        let expected = 1.0 + t + (1.0 + d.var()) * t * t / 2.0;
        assert!((d.mgf(t).unwrap() - expected).abs() < 1e-10);
    }
}
