//! Zero-inflated count distributions.
//!
//! ZIP, ZINB and ZIB share one structure: a point mass at zero with weight
//! `pi`, plus `1 − pi` times a named base count distribution. The mixture
//! logic — mass, CDF, quantile, moments via base factorial moments, the
//! Bernoulli-gated sampler, mgf/cf — is written once in [`ZeroInflated`]
//! and instantiated over the three statrs base distributions.

use num_complex::Complex64;
use rand::Rng;
use rand_distr::Distribution as _;
use statrs::distribution::{Binomial, Discrete, DiscreteCDF, NegativeBinomial, Poisson};

use crate::discrete::{mode_by_scan, quantile_search};
use crate::distribution::{DiscreteDistribution, Distribution, Interval};
use crate::ensure_param;
use crate::errors::{Error, Result};

// ── Base contract ────────────────────────────────────────────────────────────

/// The slice of a count distribution's behavior the mixture needs.
trait CountBase {
    fn pmf(&self, k: u64) -> f64;
    fn ln_pmf(&self, k: u64) -> f64;
    fn cdf(&self, k: u64) -> f64;
    /// Upper end of the base support, if bounded.
    fn upper(&self) -> Option<i64>;
    /// Factorial moments `E[(X)_j]`, j = 1..4.
    fn factorial_moments(&self) -> [f64; 4];
    fn mgf(&self, t: f64) -> Result<f64>;
    fn cf(&self, t: f64) -> Complex64;
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> i64;
}

#[derive(Debug, Clone, PartialEq)]
struct PoissonBase {
    dist: Poisson,
    lambda: f64,
}

impl CountBase for PoissonBase {
    fn pmf(&self, k: u64) -> f64 {
        self.dist.pmf(k)
    }

    fn ln_pmf(&self, k: u64) -> f64 {
        self.dist.ln_pmf(k)
    }

    fn cdf(&self, k: u64) -> f64 {
        self.dist.cdf(k)
    }

    fn upper(&self) -> Option<i64> {
        None
    }

    fn factorial_moments(&self) -> [f64; 4] {
        let l = self.lambda;
        [l, l * l, l * l * l, l * l * l * l]
    }

    fn mgf(&self, t: f64) -> Result<f64> {
        Ok((self.lambda * t.exp_m1()).exp())
    }

    fn cf(&self, t: f64) -> Complex64 {
        let eit = Complex64::new(0.0, t).exp();
        (self.lambda * (eit - 1.0)).exp()
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> i64 {
        let x: f64 = rand_distr::Poisson::new(self.lambda)
            .expect("valid parameters")
            .sample(rng);
        x as i64
    }
}

#[derive(Debug, Clone, PartialEq)]
struct BinomialBase {
    dist: Binomial,
    n: u64,
    p: f64,
}

impl CountBase for BinomialBase {
    fn pmf(&self, k: u64) -> f64 {
        self.dist.pmf(k)
    }

    fn ln_pmf(&self, k: u64) -> f64 {
        self.dist.ln_pmf(k)
    }

    fn cdf(&self, k: u64) -> f64 {
        self.dist.cdf(k)
    }

    fn upper(&self) -> Option<i64> {
        Some(self.n as i64)
    }

    fn factorial_moments(&self) -> [f64; 4] {
        let n = self.n as f64;
        let mut out = [0.0; 4];
        let mut falling = 1.0;
        for (j, slot) in out.iter_mut().enumerate() {
            falling *= (n - j as f64).max(0.0) * self.p;
            *slot = falling;
        }
        out
    }

    fn mgf(&self, t: f64) -> Result<f64> {
        Ok((1.0 - self.p + self.p * t.exp()).powf(self.n as f64))
    }

    fn cf(&self, t: f64) -> Complex64 {
        let eit = Complex64::new(0.0, t).exp();
        (Complex64::new(1.0 - self.p, 0.0) + self.p * eit).powf(self.n as f64)
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> i64 {
        rand_distr::Binomial::new(self.n, self.p)
            .expect("valid parameters")
            .sample(rng) as i64
    }
}

#[derive(Debug, Clone, PartialEq)]
struct NegBinomialBase {
    dist: NegativeBinomial,
    r: f64,
    p: f64,
}

impl CountBase for NegBinomialBase {
    fn pmf(&self, k: u64) -> f64 {
        self.dist.pmf(k)
    }

    fn ln_pmf(&self, k: u64) -> f64 {
        self.dist.ln_pmf(k)
    }

    fn cdf(&self, k: u64) -> f64 {
        self.dist.cdf(k)
    }

    fn upper(&self) -> Option<i64> {
        None
    }

    fn factorial_moments(&self) -> [f64; 4] {
        // E[(X)_j] = r(r+1)...(r+j−1) ((1−p)/p)^j for the failures count.
        let q = (1.0 - self.p) / self.p;
        let mut out = [0.0; 4];
        let mut rising = 1.0;
        for (j, slot) in out.iter_mut().enumerate() {
            rising *= (self.r + j as f64) * q;
            *slot = rising;
        }
        out
    }

    fn mgf(&self, t: f64) -> Result<f64> {
        if (1.0 - self.p) * t.exp() >= 1.0 {
            return Err(Error::Domain(format!(
                "mgf of the negative binomial base requires (1-p)e^t < 1, got t = {t}"
            )));
        }
        Ok((self.p / (1.0 - (1.0 - self.p) * t.exp())).powf(self.r))
    }

    fn cf(&self, t: f64) -> Complex64 {
        let eit = Complex64::new(0.0, t).exp();
        (self.p / (Complex64::new(1.0, 0.0) - (1.0 - self.p) * eit)).powf(self.r)
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> i64 {
        if self.p >= 1.0 {
            // Degenerate: every trial succeeds, no failures.
            return 0;
        }
        let g: f64 = rand_distr::Gamma::new(self.r, (1.0 - self.p) / self.p)
            .expect("valid parameters")
            .sample(rng);
        if g <= 0.0 {
            return 0;
        }
        let x: f64 = rand_distr::Poisson::new(g).expect("valid parameters").sample(rng);
        x as i64
    }
}

// ── Shared mixture core ──────────────────────────────────────────────────────

/// Point mass at zero with weight `pi`, plus `1 − pi` times the base.
#[derive(Debug, Clone, PartialEq)]
struct ZeroInflated<B> {
    pi: f64,
    base: B,
}

impl<B: CountBase> ZeroInflated<B> {
    fn pmf(&self, k: i64) -> f64 {
        if k < 0 {
            return 0.0;
        }
        let base = (1.0 - self.pi) * self.base.pmf(k as u64);
        if k == 0 {
            self.pi + base
        } else {
            base
        }
    }

    fn ln_pmf(&self, k: i64) -> f64 {
        if k < 0 {
            return f64::NEG_INFINITY;
        }
        if k == 0 {
            return self.pmf(0).ln();
        }
        if self.pi >= 1.0 {
            return f64::NEG_INFINITY;
        }
        (1.0 - self.pi).ln() + self.base.ln_pmf(k as u64)
    }

    fn cdf(&self, k: i64) -> f64 {
        if k < 0 {
            return 0.0;
        }
        (self.pi + (1.0 - self.pi) * self.base.cdf(k as u64)).min(1.0)
    }

    fn quantile(&self, p: f64) -> Result<i64> {
        quantile_search(|k| self.cdf(k), 0, self.base.upper(), p)
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> i64 {
        if rng.gen_bool(self.pi) {
            0
        } else {
            self.base.sample(rng)
        }
    }

    fn raw_moments(&self) -> [f64; 4] {
        let [f1, f2, f3, f4] = self.base.factorial_moments();
        let w = 1.0 - self.pi;
        [
            w * f1,
            w * (f2 + f1),
            w * (f3 + 3.0 * f2 + f1),
            w * (f4 + 6.0 * f3 + 7.0 * f2 + f1),
        ]
    }

    fn mean(&self) -> f64 {
        self.raw_moments()[0]
    }

    fn var(&self) -> f64 {
        let [m1, m2, ..] = self.raw_moments();
        m2 - m1 * m1
    }

    fn skewness(&self) -> f64 {
        let [m1, m2, m3, _] = self.raw_moments();
        let var = m2 - m1 * m1;
        (m3 - 3.0 * m1 * m2 + 2.0 * m1 * m1 * m1) / var.powf(1.5)
    }

    fn kurtosis(&self) -> f64 {
        let [m1, m2, m3, m4] = self.raw_moments();
        let var = m2 - m1 * m1;
        let c4 = m4 - 4.0 * m1 * m3 + 6.0 * m1 * m1 * m2 - 3.0 * m1 * m1 * m1 * m1;
        c4 / (var * var) - 3.0
    }

    fn median(&self) -> f64 {
        self.quantile(0.5).map(|k| k as f64).unwrap_or(f64::NAN)
    }

    fn mode(&self) -> f64 {
        // The mass can be bimodal: the inflated zero against the base mode.
        let interior = mode_by_scan(|k| self.pmf(k), 1);
        if self.pmf(0) >= self.pmf(interior) {
            0.0
        } else {
            interior as f64
        }
    }

    fn mgf(&self, t: f64) -> Result<f64> {
        Ok(self.pi + (1.0 - self.pi) * self.base.mgf(t)?)
    }

    fn cf(&self, t: f64) -> Complex64 {
        Complex64::new(self.pi, 0.0) + (1.0 - self.pi) * self.base.cf(t)
    }
}

// ── Macro gluing the three public types to the shared core ──────────────────

macro_rules! delegate_zero_inflated {
    ($ty:ident, $name:literal) => {
        impl Distribution for $ty {
            fn name(&self) -> &'static str {
                $name
            }

            fn support(&self) -> Interval {
                match self.inner.base.upper() {
                    Some(n) => Interval::closed(0.0, n as f64),
                    None => Interval::closed(0.0, f64::INFINITY),
                }
            }

            fn mean(&self) -> f64 {
                self.inner.mean()
            }

            fn var(&self) -> f64 {
                self.inner.var()
            }

            fn median(&self) -> f64 {
                self.inner.median()
            }

            fn mode(&self) -> f64 {
                self.inner.mode()
            }

            fn skewness(&self) -> f64 {
                self.inner.skewness()
            }

            fn kurtosis(&self) -> f64 {
                self.inner.kurtosis()
            }

            fn mgf(&self, t: f64) -> Result<f64> {
                self.inner.mgf(t)
            }

            fn cf(&self, t: f64) -> Result<Complex64> {
                Ok(self.inner.cf(t))
            }
        }

        impl DiscreteDistribution for $ty {
            fn pmf(&self, k: i64) -> f64 {
                self.inner.pmf(k)
            }

            fn ln_pmf(&self, k: i64) -> f64 {
                self.inner.ln_pmf(k)
            }

            fn cdf(&self, k: i64) -> f64 {
                self.inner.cdf(k)
            }

            fn quantile(&self, p: f64) -> Result<i64> {
                self.inner.quantile(p)
            }

            fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> i64 {
                self.inner.sample(rng)
            }
        }
    };
}

// ── Zero-inflated Poisson ────────────────────────────────────────────────────

/// Zero-inflated Poisson: point mass at 0 with weight `pi`, else
/// `Poisson(lambda)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ZeroInflatedPoisson {
    inner: ZeroInflated<PoissonBase>,
}

impl ZeroInflatedPoisson {
    /// Create a zero-inflated Poisson distribution, validating
    /// `lambda > 0` and `0 <= pi <= 1`.
    pub fn new(lambda: f64, pi: f64) -> Result<Self> {
        ensure_param!(lambda.is_finite() && lambda > 0.0, "lambda", lambda, "lambda > 0");
        ensure_param!((0.0..=1.0).contains(&pi), "pi", pi, "0 <= pi <= 1");
        Ok(Self::new_unchecked(lambda, pi))
    }

    /// Create without validating parameters (documented opt-out).
    pub fn new_unchecked(lambda: f64, pi: f64) -> Self {
        Self {
            inner: ZeroInflated {
                pi,
                base: PoissonBase {
                    dist: Poisson::new(lambda).expect("valid parameters"),
                    lambda,
                },
            },
        }
    }

    /// Rate λ of the Poisson component.
    pub fn lambda(&self) -> f64 {
        self.inner.base.lambda
    }

    /// Zero-inflation weight π.
    pub fn pi(&self) -> f64 {
        self.inner.pi
    }

    /// Parameter tuple `(lambda, pi)`.
    pub fn params(&self) -> (f64, f64) {
        (self.lambda(), self.pi())
    }
}

delegate_zero_inflated!(ZeroInflatedPoisson, "ZeroInflatedPoisson");

// ── Zero-inflated binomial ───────────────────────────────────────────────────

/// Zero-inflated binomial: point mass at 0 with weight `pi`, else
/// `Binomial(n, p)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ZeroInflatedBinomial {
    inner: ZeroInflated<BinomialBase>,
}

impl ZeroInflatedBinomial {
    /// Create a zero-inflated binomial distribution, validating
    /// `0 <= p <= 1` and `0 <= pi <= 1`.
    pub fn new(n: u64, p: f64, pi: f64) -> Result<Self> {
        ensure_param!((0.0..=1.0).contains(&p), "p", p, "0 <= p <= 1");
        ensure_param!((0.0..=1.0).contains(&pi), "pi", pi, "0 <= pi <= 1");
        Ok(Self::new_unchecked(n, p, pi))
    }

    /// Create without validating parameters (documented opt-out).
    pub fn new_unchecked(n: u64, p: f64, pi: f64) -> Self {
        Self {
            inner: ZeroInflated {
                pi,
                base: BinomialBase {
                    dist: Binomial::new(p, n).expect("valid parameters"),
                    n,
                    p,
                },
            },
        }
    }

    /// Number of trials n.
    pub fn trials(&self) -> u64 {
        self.inner.base.n
    }

    /// Success probability p.
    pub fn p(&self) -> f64 {
        self.inner.base.p
    }

    /// Zero-inflation weight π.
    pub fn pi(&self) -> f64 {
        self.inner.pi
    }

    /// Parameter tuple `(n, p, pi)`.
    pub fn params(&self) -> (u64, f64, f64) {
        (self.trials(), self.p(), self.pi())
    }
}

delegate_zero_inflated!(ZeroInflatedBinomial, "ZeroInflatedBinomial");

// ── Zero-inflated negative binomial ──────────────────────────────────────────

/// Zero-inflated negative binomial: point mass at 0 with weight `pi`, else
/// `NegativeBinomial(r, p)` (failures before the r-th success).
#[derive(Debug, Clone, PartialEq)]
pub struct ZeroInflatedNegBinomial {
    inner: ZeroInflated<NegBinomialBase>,
}

impl ZeroInflatedNegBinomial {
    /// Create a zero-inflated negative binomial distribution, validating
    /// `r > 0`, `0 < p <= 1` and `0 <= pi <= 1`.
    pub fn new(r: f64, p: f64, pi: f64) -> Result<Self> {
        ensure_param!(r.is_finite() && r > 0.0, "r", r, "r > 0");
        ensure_param!(0.0 < p && p <= 1.0, "p", p, "0 < p <= 1");
        ensure_param!((0.0..=1.0).contains(&pi), "pi", pi, "0 <= pi <= 1");
        Ok(Self::new_unchecked(r, p, pi))
    }

    /// Create without validating parameters (documented opt-out).
    pub fn new_unchecked(r: f64, p: f64, pi: f64) -> Self {
        Self {
            inner: ZeroInflated {
                pi,
                base: NegBinomialBase {
                    dist: NegativeBinomial::new(r, p).expect("valid parameters"),
                    r,
                    p,
                },
            },
        }
    }

    /// Number of successes r.
    pub fn successes(&self) -> f64 {
        self.inner.base.r
    }

    /// Success probability p.
    pub fn p(&self) -> f64 {
        self.inner.base.p
    }

    /// Zero-inflation weight π.
    pub fn pi(&self) -> f64 {
        self.inner.pi
    }

    /// Parameter tuple `(r, p, pi)`.
    pub fn params(&self) -> (f64, f64, f64) {
        (self.successes(), self.p(), self.pi())
    }
}

delegate_zero_inflated!(ZeroInflatedNegBinomial, "ZeroInflatedNegBinomial");
