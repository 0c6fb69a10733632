//! The common contract satisfied by every distribution in this crate.
//!
//! Three traits split the contract the way the ecosystem's generic
//! algorithms consume it: [`Distribution`] carries support and moments,
//! [`ContinuousDistribution`] and [`DiscreteDistribution`] add evaluation
//! and sampling over real and integer arguments respectively.
//!
//! Moment conventions: `mean`/`var`/`skewness`/`kurtosis` return `f64::NAN`
//! when the moment is undefined for the instance's parameters and
//! `±INFINITY` when it is formally infinite; the choice at each parameter
//! threshold is documented on the implementing type. `kurtosis` is always
//! the *excess* kurtosis. `entropy`, `mgf` and `cf` default to
//! [`Error::NotImplemented`] and are overridden only where a closed form
//! exists.

use num_complex::Complex64;
use rand::Rng;

use crate::errors::{Error, Result};

// ── Support ──────────────────────────────────────────────────────────────────

/// The interval a random variable occupies, with openness flags.
///
/// Bounds may depend on the instance's parameters and are recomputed per
/// call. For discrete distributions the support is the set of integers
/// inside the interval (Rademacher further restricts it to `{-1, +1}`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    /// Lower bound (may be `-INFINITY`).
    pub lower: f64,
    /// Upper bound (may be `INFINITY`).
    pub upper: f64,
    /// Whether `lower` itself belongs to the support.
    pub lower_closed: bool,
    /// Whether `upper` itself belongs to the support.
    pub upper_closed: bool,
}

impl Interval {
    /// Closed interval `[lower, upper]`.
    pub const fn closed(lower: f64, upper: f64) -> Self {
        Self {
            lower,
            upper,
            lower_closed: true,
            upper_closed: true,
        }
    }

    /// Open interval `(lower, upper)`.
    pub const fn open(lower: f64, upper: f64) -> Self {
        Self {
            lower,
            upper,
            lower_closed: false,
            upper_closed: false,
        }
    }

    /// Left-open interval `(lower, upper]`.
    pub const fn left_open(lower: f64, upper: f64) -> Self {
        Self {
            lower,
            upper,
            lower_closed: false,
            upper_closed: true,
        }
    }

    /// Right-open interval `[lower, upper)`.
    pub const fn right_open(lower: f64, upper: f64) -> Self {
        Self {
            lower,
            upper,
            lower_closed: true,
            upper_closed: false,
        }
    }

    /// Whether `x` lies inside the interval, respecting openness.
    pub fn contains(&self, x: f64) -> bool {
        if x.is_nan() {
            return false;
        }
        let above = if self.lower_closed {
            x >= self.lower
        } else {
            x > self.lower
        };
        let below = if self.upper_closed {
            x <= self.upper
        } else {
            x < self.upper
        };
        above && below
    }
}

// ── Distribution ─────────────────────────────────────────────────────────────

/// Parameter-independent contract: support and moments.
pub trait Distribution {
    /// Human-readable distribution name, used in error messages.
    fn name(&self) -> &'static str;

    /// The support as an interval with openness flags.
    fn support(&self) -> Interval;

    /// Whether `x` lies within the support.
    fn in_support(&self, x: f64) -> bool {
        self.support().contains(x)
    }

    /// Expected value, `NAN` if undefined, `±INFINITY` if formally infinite.
    fn mean(&self) -> f64;

    /// Variance, with the same `NAN`/`INFINITY` conventions as [`mean`].
    ///
    /// [`mean`]: Distribution::mean
    fn var(&self) -> f64;

    /// Standard deviation.
    fn std(&self) -> f64 {
        self.var().sqrt()
    }

    /// Median. For discrete types this is the generalized inverse at 1/2.
    fn median(&self) -> f64;

    /// Mode. `NAN` when no unique mode exists.
    fn mode(&self) -> f64;

    /// Skewness, `NAN` if undefined.
    fn skewness(&self) -> f64;

    /// Excess kurtosis, `NAN` if undefined.
    fn kurtosis(&self) -> f64;

    /// Differential (continuous) or Shannon (discrete) entropy.
    fn entropy(&self) -> Result<f64> {
        Err(Error::NotImplemented(format!(
            "entropy is not available for the {} distribution",
            self.name()
        )))
    }

    /// Moment generating function `E[e^{tX}]`.
    fn mgf(&self, t: f64) -> Result<f64> {
        let _ = t;
        Err(Error::NotImplemented(format!(
            "mgf is not available for the {} distribution",
            self.name()
        )))
    }

    /// Characteristic function `E[e^{itX}]`.
    fn cf(&self, t: f64) -> Result<Complex64> {
        let _ = t;
        Err(Error::NotImplemented(format!(
            "cf is not available for the {} distribution",
            self.name()
        )))
    }
}

// ── Continuous ───────────────────────────────────────────────────────────────

/// Evaluation and sampling over real-valued support.
pub trait ContinuousDistribution: Distribution {
    /// Probability density at `x`; 0 outside the support.
    fn pdf(&self, x: f64) -> f64;

    /// Natural log of the density; `-INFINITY` outside the support.
    ///
    /// Implemented directly in log space wherever the plain density would
    /// underflow, so that `exp(ln_pdf(x))` agrees with `pdf(x)`.
    fn ln_pdf(&self, x: f64) -> f64;

    /// Cumulative distribution function `P(X <= x)`.
    fn cdf(&self, x: f64) -> f64;

    /// Survival function `P(X > x)`.
    fn sf(&self, x: f64) -> f64 {
        1.0 - self.cdf(x)
    }

    /// Quantile (inverse CDF) at probability `p`.
    ///
    /// Fails with [`Error::InvalidProbability`] for `p` outside `[0, 1]`,
    /// and with a numerical error if a root-finding quantile cannot bracket
    /// the root.
    fn quantile(&self, p: f64) -> Result<f64>;

    /// Draw one variate using the caller's engine.
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64;

    /// Draw `n` independent variates.
    fn sample_n<R: Rng + ?Sized>(&self, rng: &mut R, n: usize) -> Vec<f64> {
        (0..n).map(|_| self.sample(rng)).collect()
    }
}

// ── Discrete ─────────────────────────────────────────────────────────────────

/// Evaluation and sampling over integer support.
pub trait DiscreteDistribution: Distribution {
    /// Probability mass at `k`; 0 outside the support.
    fn pmf(&self, k: i64) -> f64;

    /// Natural log of the mass; `-INFINITY` for probability-zero points.
    fn ln_pmf(&self, k: i64) -> f64;

    /// Cumulative distribution function `P(X <= k)`.
    fn cdf(&self, k: i64) -> f64;

    /// Survival function `P(X > k)`.
    fn sf(&self, k: i64) -> f64 {
        1.0 - self.cdf(k)
    }

    /// Generalized inverse CDF: the smallest integer `k` with
    /// `cdf(k) >= p`.
    ///
    /// `p = 0` returns the lower end of the support. Fails with
    /// [`Error::InvalidProbability`] for `p` outside `[0, 1]` and with
    /// [`Error::NoConvergence`] if the geometric bracket expansion hits its
    /// cap before enclosing the quantile.
    fn quantile(&self, p: f64) -> Result<i64>;

    /// Draw one variate using the caller's engine.
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> i64;

    /// Draw `n` independent variates.
    fn sample_n<R: Rng + ?Sized>(&self, rng: &mut R, n: usize) -> Vec<i64> {
        (0..n).map(|_| self.sample(rng)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_openness() {
        let i = Interval::left_open(0.0, f64::INFINITY);
        assert!(!i.contains(0.0));
        assert!(i.contains(1e-300));
        assert!(i.contains(1e300));
        assert!(!i.contains(-1.0));
        assert!(!i.contains(f64::NAN));

        let c = Interval::closed(1.0, 10.0);
        assert!(c.contains(1.0));
        assert!(c.contains(10.0));
        assert!(!c.contains(10.5));
    }
}
