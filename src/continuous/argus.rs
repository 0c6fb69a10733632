//! ARGUS distribution.

use rand::Rng;
use rand_distr::Distribution as _;

use crate::distribution::{ContinuousDistribution, Distribution, Interval};
use crate::ensure_param;
use crate::errors::{check_probability, Result};
use crate::integrals;
use crate::solvers1d;
use crate::special;

/// ARGUS distribution with curvature `chi` and cut-off `c`.
///
/// Density (0 < x < c, u = x/c):
///
/// f(x) = χ³ / (√(2π) Ψ(χ)) · (x/c²) √(1−u²) · exp(−χ²(1−u²)/2)
///
/// with Ψ(χ) = Φ(χ) − χφ(χ) − 1/2. The CDF is closed through Ψ; the
/// quantile has no closed form and is found by Brent root finding on the
/// bracket `[0, c]`, which always contains the root.
///
/// The mean involves a Bessel function and is evaluated by quadrature here,
/// as are the higher standardized moments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Argus {
    chi: f64,
    c: f64,
}

impl Argus {
    /// Create an ARGUS distribution, validating `chi > 0` and `c > 0`.
    pub fn new(chi: f64, c: f64) -> Result<Self> {
        ensure_param!(chi.is_finite() && chi > 0.0, "chi", chi, "chi > 0");
        ensure_param!(c.is_finite() && c > 0.0, "c", c, "c > 0");
        Ok(Self::new_unchecked(chi, c))
    }

    /// Create without validating parameters (documented opt-out).
    pub fn new_unchecked(chi: f64, c: f64) -> Self {
        Self { chi, c }
    }

    /// Curvature parameter χ.
    pub fn chi(&self) -> f64 {
        self.chi
    }

    /// Cut-off parameter c (the upper end of the support).
    pub fn cut_off(&self) -> f64 {
        self.c
    }

    /// Parameter tuple `(chi, c)`.
    pub fn params(&self) -> (f64, f64) {
        (self.chi, self.c)
    }

    /// Ψ(χ) = Φ(χ) − χφ(χ) − 1/2.
    fn psi(chi: f64) -> f64 {
        special::norm_cdf(chi) - chi * special::norm_pdf(chi) - 0.5
    }

    fn numeric_moments(&self) -> Result<integrals::NumericMoments> {
        integrals::pdf_moments(|x| self.pdf(x), 0.0, self.c, 0.5 * self.c)
    }
}

impl Distribution for Argus {
    fn name(&self) -> &'static str {
        "Argus"
    }

    fn support(&self) -> Interval {
        Interval::open(0.0, self.c)
    }

    fn mean(&self) -> f64 {
        self.numeric_moments().map(|m| m.mean).unwrap_or(f64::NAN)
    }

    fn var(&self) -> f64 {
        self.numeric_moments().map(|m| m.var).unwrap_or(f64::NAN)
    }

    fn median(&self) -> f64 {
        self.quantile(0.5).unwrap_or(f64::NAN)
    }

    fn mode(&self) -> f64 {
        // Stationary point of ln f: χ²u⁴ + (2 − χ²)u² − 1 = 0 in u = x/c.
        let chi2 = self.chi * self.chi;
        let u2 = ((chi2 - 2.0) + (chi2 * chi2 + 4.0).sqrt()) / (2.0 * chi2);
        self.c * u2.sqrt()
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

impl ContinuousDistribution for Argus {
    fn pdf(&self, x: f64) -> f64 {
        if x <= 0.0 || x >= self.c {
            return 0.0;
        }
        let u = x / self.c;
        let one_m_u2 = 1.0 - u * u;
        let chi = self.chi;
        special::INV_SQRT_2PI * chi.powi(3) / Self::psi(chi) * (x / (self.c * self.c))
            * one_m_u2.sqrt()
            * (-0.5 * chi * chi * one_m_u2).exp()
    }

    fn ln_pdf(&self, x: f64) -> f64 {
        if x <= 0.0 || x >= self.c {
            return f64::NEG_INFINITY;
        }
        let u = x / self.c;
        let one_m_u2 = 1.0 - u * u;
        let chi = self.chi;
        3.0 * chi.ln() - special::LN_SQRT_2PI - Self::psi(chi).ln() + x.ln()
            - 2.0 * self.c.ln()
            + 0.5 * one_m_u2.ln()
            - 0.5 * chi * chi * one_m_u2
    }

    fn cdf(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        if x >= self.c {
            return 1.0;
        }
        let u = x / self.c;
        let arg = self.chi * (1.0 - u * u).sqrt();
        1.0 - Self::psi(arg) / Self::psi(self.chi)
    }

    fn quantile(&self, p: f64) -> Result<f64> {
        check_probability(p)?;
        if p == 0.0 {
            return Ok(0.0);
        }
        if p == 1.0 {
            return Ok(self.c);
        }
        solvers1d::invert_cdf(|x| self.cdf(x), 0.0, self.c, p)
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        // x = c √(1 − 2G/χ²) with G ~ Gamma(3/2, 1) conditioned on
        // G ≤ χ²/2; the acceptance probability is positive for every valid
        // χ, so the rejection loop terminates with probability one.
        let gamma = rand_distr::Gamma::new(1.5, 1.0).expect("valid parameters");
        let half_chi2 = 0.5 * self.chi * self.chi;
        loop {
            let g = gamma.sample(rng);
            if g <= half_chi2 {
                return self.c * (1.0 - g / half_chi2).sqrt();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_validates() {
        assert!(Argus::new(1.0, 1.0).is_ok());
        assert!(Argus::new(0.0, 1.0).is_err());
        assert!(Argus::new(1.0, 0.0).is_err());
    }

    #[test]
    fn density_zero_outside_support() {
        let d = Argus::new(2.0, 3.0).unwrap();
        assert_eq!(d.pdf(0.0), 0.0);
        assert_eq!(d.pdf(3.0), 0.0);
        assert_eq!(d.pdf(4.0), 0.0);
        assert_eq!(d.ln_pdf(3.5), f64::NEG_INFINITY);
        assert!(d.pdf(1.5) > 0.0);
    }

    #[test]
    fn cdf_boundaries() {
        let d = Argus::new(1.0, 2.0).unwrap();
        assert_eq!(d.cdf(0.0), 0.0);
        assert_eq!(d.cdf(2.0), 1.0);
        assert!((d.cdf(1.999_999) - 1.0).abs() < 1e-4);
    }

    #[test]
    fn density_integrates_to_one() {
        let d = Argus::new(2.5, 1.0).unwrap();
        let total = crate::integrals::TanhSinh::default_params()
            .integrate(|x| d.pdf(x), 0.0, 1.0)
            .unwrap();
        assert!((total - 1.0).abs() < 1e-8, "got {total}");
    }

    #[test]
    fn quantile_roundtrip() {
        let d = Argus::new(2.0, 5.0).unwrap();
        for p in [0.05, 0.25, 0.5, 0.75, 0.95] {
            let x = d.quantile(p).unwrap();
            assert!((d.cdf(x) - p).abs() < 1e-9, "p={p}");
        }
    }

    #[test]
    fn log_density_consistency() {
        let d = Argus::new(1.5, 2.0).unwrap();
        for x in [0.2, 0.8, 1.4, 1.9] {
            let rel = (d.ln_pdf(x).exp() - d.pdf(x)).abs() / d.pdf(x);
            assert!(rel < 1e-12, "x={x}");
        }
    }

    #[test]
    fn mode_maximizes_density() {
        let d = Argus::new(2.0, 1.0).unwrap();
        let m = d.mode();
        assert!(m > 0.0 && m < 1.0);
        assert!(d.pdf(m) >= d.pdf(m - 0.01));
        assert!(d.pdf(m) >= d.pdf(m + 0.01));
    }

    #[test]
    fn mean_between_bounds() {
        let d = Argus::new(1.0, 2.0).unwrap();
        let mu = d.mean();
        assert!(mu > 0.0 && mu < 2.0, "mean {mu}");
        assert!(d.var() > 0.0);
    }
}
