//! Zipf distribution over a finite range.

use rand::Rng;
use rand_distr::Open01;

use crate::discrete::quantile_search;
use crate::distribution::{DiscreteDistribution, Distribution, Interval};
use crate::ensure_param;
use crate::errors::Result;
use crate::special::generalized_harmonic;

/// Zipf distribution over `{1, ..., n}` with exponent `s ≥ 0`.
///
/// `P(X = k) = k^{−s} / H(n, s)` with the generalized harmonic number
/// `H(n, s) = Σ_{j≤n} j^{−s}` cached at construction. The CDF accumulates
/// the same terms in the same order, so `cdf(n) == 1.0` exactly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Zipf {
    n: u64,
    s: f64,
    h_n: f64,
}

impl Zipf {
    /// Create a Zipf distribution, validating `n >= 1` and `s >= 0`.
    pub fn new(n: u64, s: f64) -> Result<Self> {
        ensure_param!(n >= 1, "n", n, "n >= 1");
        ensure_param!(s.is_finite() && s >= 0.0, "s", s, "s >= 0");
        Ok(Self::new_unchecked(n, s))
    }

    /// Create without validating parameters (documented opt-out).
    pub fn new_unchecked(n: u64, s: f64) -> Self {
        Self {
            n,
            s,
            h_n: generalized_harmonic(n, s),
        }
    }

    /// Number of elements n.
    pub fn elements(&self) -> u64 {
        self.n
    }

    /// Exponent s.
    pub fn exponent(&self) -> f64 {
        self.s
    }

    /// Parameter tuple `(n, s)`.
    pub fn params(&self) -> (u64, f64) {
        (self.n, self.s)
    }

    /// `E[X^r] = H(n, s − r) / H(n, s)`.
    fn raw_moment(&self, r: f64) -> f64 {
        generalized_harmonic(self.n, self.s - r) / self.h_n
    }
}

impl Distribution for Zipf {
    fn name(&self) -> &'static str {
        "Zipf"
    }

    fn support(&self) -> Interval {
        Interval::closed(1.0, self.n as f64)
    }

    fn mean(&self) -> f64 {
        self.raw_moment(1.0)
    }

    fn var(&self) -> f64 {
        let m1 = self.raw_moment(1.0);
        self.raw_moment(2.0) - m1 * m1
    }

    fn median(&self) -> f64 {
        self.quantile(0.5).map(|k| k as f64).unwrap_or(f64::NAN)
    }

    /// 1 for `s > 0`; `NAN` for `s == 0` (all outcomes equally likely).
    fn mode(&self) -> f64 {
        if self.s > 0.0 {
            1.0
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

    fn entropy(&self) -> Result<f64> {
        // −Σ p_k ln p_k = ln H + (s/H) Σ k^{−s} ln k
        let mut weighted = 0.0;
        for k in 1..=self.n {
            weighted += (k as f64).powf(-self.s) * (k as f64).ln();
        }
        Ok(self.h_n.ln() + self.s * weighted / self.h_n)
    }
}

impl DiscreteDistribution for Zipf {
    fn pmf(&self, k: i64) -> f64 {
        if k < 1 || k > self.n as i64 {
            return 0.0;
        }
        (k as f64).powf(-self.s) / self.h_n
    }

    fn ln_pmf(&self, k: i64) -> f64 {
        if k < 1 || k > self.n as i64 {
            return f64::NEG_INFINITY;
        }
        -self.s * (k as f64).ln() - self.h_n.ln()
    }

    fn cdf(&self, k: i64) -> f64 {
        if k < 1 {
            return 0.0;
        }
        if k >= self.n as i64 {
            return 1.0;
        }
        // Same accumulation order as the normalizer, so the ratio is exact
        // at the upper end of the support.
        generalized_harmonic(k as u64, self.s) / self.h_n
    }

    fn quantile(&self, p: f64) -> Result<i64> {
        quantile_search(|k| self.cdf(k), 1, Some(self.n as i64), p)
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> i64 {
        let u: f64 = rng.sample(Open01);
        let target = u * self.h_n;
        let mut acc = 0.0;
        for k in 1..self.n {
            acc += (k as f64).powf(-self.s);
            if acc >= target {
                return k as i64;
            }
        }
        self.n as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_validates() {
        assert!(Zipf::new(10, 1.0).is_ok());
        assert!(Zipf::new(0, 1.0).is_err());
        assert!(Zipf::new(10, -0.5).is_err());
    }

    #[test]
    fn all_mass_on_support() {
        let d = Zipf::new(10, 1.0).unwrap();
        assert_eq!(d.cdf(10), 1.0);
        assert_eq!(d.cdf(11), 1.0);
        assert_eq!(d.pmf(0), 0.0);
        assert_eq!(d.pmf(11), 0.0);
        let total: f64 = (1..=10).map(|k| d.pmf(k)).sum();
        assert!((total - 1.0).abs() < 1e-14);
    }

    #[test]
    fn pmf_ratios_follow_power_law() {
        let d = Zipf::new(100, 2.0).unwrap();
        assert!((d.pmf(2) / d.pmf(1) - 0.25).abs() < 1e-14);
        assert!((d.pmf(4) / d.pmf(2) - 0.25).abs() < 1e-14);
    }

    #[test]
    fn uniform_when_s_zero() {
        let d = Zipf::new(5, 0.0).unwrap();
        for k in 1..=5 {
            assert!((d.pmf(k) - 0.2).abs() < 1e-15);
        }
        assert!((d.mean() - 3.0).abs() < 1e-12);
        assert!(d.mode().is_nan());
    }

    #[test]
    fn quantile_is_generalized_inverse() {
        let d = Zipf::new(10, 1.0).unwrap();
        for p in [0.1, 0.35, 0.5, 0.9, 1.0] {
            let k = d.quantile(p).unwrap();
            assert!(d.cdf(k) >= p);
            if k > 1 {
                assert!(d.cdf(k - 1) < p);
            }
        }
    }

    #[test]
    fn entropy_matches_direct_sum() {
        let d = Zipf::new(20, 1.5).unwrap();
        let direct: f64 = (1..=20)
            .map(|k| {
                let p = d.pmf(k);
                -p * p.ln()
            })
            .sum();
        assert!((d.entropy().unwrap() - direct).abs() < 1e-12);
    }
}
