//! Conway–Maxwell–Poisson distribution.

use rand::Rng;
use rand_distr::Open01;
use statrs::function::gamma::ln_gamma;

use crate::discrete::{cdf_by_summation, mode_by_scan, quantile_search, series_moments};
use crate::distribution::{DiscreteDistribution, Distribution, Interval};
use crate::ensure_param;
use crate::errors::{Error, Result};
use crate::special::{ln_bessel_i0, LogSumExp};

/// Conway–Maxwell–Poisson distribution with rate `lambda` and dispersion
/// `nu`.
///
/// Mass function (k ≥ 0): `P(X = k) = λ^k / (k!)^ν / Z(λ, ν)` with the
/// normalization series `Z(λ, ν) = Σ_j λ^j / (j!)^ν`.
///
/// `ln Z` is evaluated once at construction: closed forms for ν = 0
/// (geometric, requires λ < 1), ν = 1 (Poisson) and ν = 2 (`I₀(2√λ)`),
/// otherwise a truncated series in log space with a relative-term stopping
/// rule and a hard iteration cap — cap exhaustion fails construction rather
/// than returning a wrong normalizer.
///
/// Moments have no closed form and are computed by capped series summation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConwayMaxwellPoisson {
    lambda: f64,
    nu: f64,
    ln_z: f64,
}

/// Relative-term tolerance of the general normalization series.
const Z_SERIES_TOL: f64 = 1e-16;

/// Hard iteration cap of the general normalization series.
const Z_SERIES_CAP: usize = 10_000;

impl ConwayMaxwellPoisson {
    /// Create a Conway–Maxwell–Poisson distribution, validating
    /// `lambda > 0`, `nu >= 0`, and `lambda < 1` when `nu == 0`.
    pub fn new(lambda: f64, nu: f64) -> Result<Self> {
        ensure_param!(lambda.is_finite() && lambda > 0.0, "lambda", lambda, "lambda > 0");
        ensure_param!(nu.is_finite() && nu >= 0.0, "nu", nu, "nu >= 0");
        if nu == 0.0 {
            ensure_param!(lambda < 1.0, "lambda", lambda, "lambda < 1 when nu == 0");
        }
        let ln_z = Self::ln_normalizer(lambda, nu)?;
        Ok(Self { lambda, nu, ln_z })
    }

    /// Create without validating parameters (documented opt-out).
    ///
    /// The normalization series is still evaluated and must converge.
    pub fn new_unchecked(lambda: f64, nu: f64) -> Self {
        let ln_z = Self::ln_normalizer(lambda, nu)
            .expect("normalization series converges for supported parameters");
        Self { lambda, nu, ln_z }
    }

    /// Rate parameter λ.
    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    /// Dispersion parameter ν.
    pub fn nu(&self) -> f64 {
        self.nu
    }

    /// Parameter tuple `(lambda, nu)`.
    pub fn params(&self) -> (f64, f64) {
        (self.lambda, self.nu)
    }

    /// `ln Z(λ, ν)`: closed forms for ν ∈ {0, 1, 2}, truncated series
    /// otherwise.
    fn ln_normalizer(lambda: f64, nu: f64) -> Result<f64> {
        if nu == 1.0 {
            return Ok(lambda);
        }
        if nu == 0.0 {
            return Ok(-(-lambda).ln_1p());
        }
        if nu == 2.0 {
            return Ok(ln_bessel_i0(2.0 * lambda.sqrt()));
        }
        let ln_lambda = lambda.ln();
        let mut acc = LogSumExp::new();
        // Terms rise to a peak near λ^{1/ν} and then fall; stop once past
        // the peak and the newest term is negligible relative to the sum.
        let peak = lambda.powf(1.0 / nu).ceil() as usize;
        for j in 0..Z_SERIES_CAP {
            let ln_term = j as f64 * ln_lambda - nu * ln_gamma(j as f64 + 1.0);
            acc.add(ln_term);
            if j > peak && ln_term - acc.value() < Z_SERIES_TOL.ln() {
                return Ok(acc.value());
            }
        }
        Err(Error::NoConvergence {
            iterations: Z_SERIES_CAP,
            context: "Conway-Maxwell-Poisson normalization series",
        })
    }
}

impl Distribution for ConwayMaxwellPoisson {
    fn name(&self) -> &'static str {
        "ConwayMaxwellPoisson"
    }

    fn support(&self) -> Interval {
        Interval::closed(0.0, f64::INFINITY)
    }

    fn mean(&self) -> f64 {
        series_moments(|k| self.pmf(k), 0, None).mean
    }

    fn var(&self) -> f64 {
        series_moments(|k| self.pmf(k), 0, None).var
    }

    fn median(&self) -> f64 {
        self.quantile(0.5).map(|k| k as f64).unwrap_or(f64::NAN)
    }

    fn mode(&self) -> f64 {
        mode_by_scan(|k| self.pmf(k), 0) as f64
    }

    fn skewness(&self) -> f64 {
        series_moments(|k| self.pmf(k), 0, None).skewness
    }

    fn kurtosis(&self) -> f64 {
        series_moments(|k| self.pmf(k), 0, None).kurtosis
    }
}

impl DiscreteDistribution for ConwayMaxwellPoisson {
    fn pmf(&self, k: i64) -> f64 {
        self.ln_pmf(k).exp()
    }

    fn ln_pmf(&self, k: i64) -> f64 {
        if k < 0 {
            return f64::NEG_INFINITY;
        }
        let kf = k as f64;
        kf * self.lambda.ln() - self.nu * ln_gamma(kf + 1.0) - self.ln_z
    }

    fn cdf(&self, k: i64) -> f64 {
        cdf_by_summation(|j| self.pmf(j), 0, k)
    }

    fn quantile(&self, p: f64) -> Result<i64> {
        quantile_search(|k| self.cdf(k), 0, None, p)
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> i64 {
        let u: f64 = rng.sample(Open01);
        let mut acc = 0.0;
        let mut k = 0;
        loop {
            acc += self.pmf(k);
            if acc >= u || 1.0 - acc < 1e-12 {
                return k;
            }
            k += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_validates() {
        assert!(ConwayMaxwellPoisson::new(2.0, 1.5).is_ok());
        assert!(ConwayMaxwellPoisson::new(0.0, 1.0).is_err());
        assert!(ConwayMaxwellPoisson::new(2.0, -0.5).is_err());
        // Geometric fast path needs λ < 1.
        assert!(ConwayMaxwellPoisson::new(1.5, 0.0).is_err());
        assert!(ConwayMaxwellPoisson::new(0.5, 0.0).is_ok());
    }

    #[test]
    fn poisson_fast_path() {
        use statrs::distribution::{Discrete, Poisson};
        let d = ConwayMaxwellPoisson::new(3.5, 1.0).unwrap();
        let pois = Poisson::new(3.5).unwrap();
        for k in 0..20 {
            assert!((d.pmf(k) - pois.pmf(k as u64)).abs() < 1e-14, "k={k}");
        }
    }

    #[test]
    fn geometric_fast_path() {
        // ν = 0: P(X = k) = (1 − λ) λ^k.
        let d = ConwayMaxwellPoisson::new(0.4, 0.0).unwrap();
        for k in 0..10 {
            let expected = 0.6 * 0.4_f64.powi(k as i32);
            assert!((d.pmf(k) - expected).abs() < 1e-14, "k={k}");
        }
    }

    #[test]
    fn bessel_fast_path_matches_series() {
        // ν = 2 closed form vs the general series at a nearby ν.
        let d2 = ConwayMaxwellPoisson::new(2.0, 2.0).unwrap();
        let total: f64 = (0..200).map(|k| d2.pmf(k)).sum();
        assert!((total - 1.0).abs() < 1e-12, "got {total}");
    }

    #[test]
    fn general_series_mass_sums_to_one() {
        let d = ConwayMaxwellPoisson::new(4.0, 1.7).unwrap();
        let total: f64 = (0..200).map(|k| d.pmf(k)).sum();
        assert!((total - 1.0).abs() < 1e-10, "got {total}");
    }

    #[test]
    fn underdispersed_vs_overdispersed() {
        // ν > 1 is underdispersed relative to Poisson, ν < 1 overdispersed.
        let under = ConwayMaxwellPoisson::new(3.0, 2.0).unwrap();
        assert!(under.var() < under.mean());
        let over = ConwayMaxwellPoisson::new(3.0, 0.5).unwrap();
        assert!(over.var() > over.mean());
    }

    #[test]
    fn quantile_is_generalized_inverse() {
        let d = ConwayMaxwellPoisson::new(2.5, 1.3).unwrap();
        for p in [0.1, 0.5, 0.9, 0.999] {
            let k = d.quantile(p).unwrap();
            assert!(d.cdf(k) >= p);
            if k > 0 {
                assert!(d.cdf(k - 1) < p);
            }
        }
    }
}
