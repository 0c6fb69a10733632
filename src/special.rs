//! Special-function helpers shared across the distributions.
//!
//! Everything statrs provides is delegated to
//! `statrs::function::{gamma, beta, erf, factorial}`; this module only adds
//! the standard-normal building blocks used by several continuous families,
//! a streaming log-sum-exp accumulator for log-space series summation, and
//! the modified Bessel function `I0` / generalized harmonic numbers that
//! statrs does not expose.

use statrs::function::erf;

/// `ln(sqrt(2π))`.
pub(crate) const LN_SQRT_2PI: f64 = 0.918_938_533_204_672_7;

/// `1/sqrt(2π)`.
pub(crate) const INV_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

// ── Standard normal ──────────────────────────────────────────────────────────

/// Standard normal density φ(x).
#[inline]
pub(crate) fn norm_pdf(x: f64) -> f64 {
    INV_SQRT_2PI * (-0.5 * x * x).exp()
}

/// Log of the standard normal density.
#[inline]
pub(crate) fn ln_norm_pdf(x: f64) -> f64 {
    -0.5 * x * x - LN_SQRT_2PI
}

/// Standard normal CDF Φ(x), via the complementary error function.
#[inline]
pub(crate) fn norm_cdf(x: f64) -> f64 {
    0.5 * erf::erfc(-x / std::f64::consts::SQRT_2)
}

/// Standard normal survival function 1 − Φ(x).
#[inline]
pub(crate) fn norm_sf(x: f64) -> f64 {
    0.5 * erf::erfc(x / std::f64::consts::SQRT_2)
}

/// Standard normal quantile Φ⁻¹(p) for p in (0, 1).
#[inline]
pub(crate) fn norm_ppf(p: f64) -> f64 {
    std::f64::consts::SQRT_2 * erf::erf_inv(2.0 * p - 1.0)
}

/// `ln(1 + e^y)` without overflow.
#[inline]
pub(crate) fn softplus(y: f64) -> f64 {
    if y > 0.0 {
        y + (-y).exp().ln_1p()
    } else {
        y.exp().ln_1p()
    }
}

// ── Log-sum-exp ──────────────────────────────────────────────────────────────

/// Streaming log-sum-exp accumulator.
///
/// Adds terms in log space and returns `ln Σ exp(term)` without overflow or
/// catastrophic cancellation, rescaling against the running maximum.
#[derive(Debug, Clone)]
pub(crate) struct LogSumExp {
    max: f64,
    sum: f64,
}

impl LogSumExp {
    pub(crate) fn new() -> Self {
        Self {
            max: f64::NEG_INFINITY,
            sum: 0.0,
        }
    }

    /// Add a term given as its natural log.
    pub(crate) fn add(&mut self, ln_term: f64) {
        if ln_term == f64::NEG_INFINITY {
            return;
        }
        if ln_term <= self.max {
            self.sum += (ln_term - self.max).exp();
        } else {
            self.sum = self.sum * (self.max - ln_term).exp() + 1.0;
            self.max = ln_term;
        }
    }

    /// `ln Σ exp(term)` over everything added so far; `-INFINITY` if empty.
    pub(crate) fn value(&self) -> f64 {
        if self.max == f64::NEG_INFINITY {
            f64::NEG_INFINITY
        } else {
            self.max + self.sum.ln()
        }
    }
}

// ── Modified Bessel I0 ───────────────────────────────────────────────────────

/// `ln I₀(x)` for x ≥ 0: power series for small arguments, the standard
/// asymptotic expansion beyond.
pub(crate) fn ln_bessel_i0(x: f64) -> f64 {
    debug_assert!(x >= 0.0);
    if x < 20.0 {
        // Σ (x²/4)^k / (k!)²
        let q = 0.25 * x * x;
        let mut term = 1.0;
        let mut sum = 1.0;
        let mut k = 1.0;
        while term > sum * 1e-17 {
            term *= q / (k * k);
            sum += term;
            k += 1.0;
        }
        sum.ln()
    } else {
        let inv = 1.0 / x;
        x - 0.5 * (2.0 * std::f64::consts::PI * x).ln()
            + (1.0 + inv * (0.125 + inv * (9.0 / 128.0 + inv * 75.0 / 1024.0))).ln()
    }
}

// ── Generalized harmonic numbers ─────────────────────────────────────────────

/// `H(n, s) = Σ_{k=1..n} k^{-s}`, the Zipf normalizer.
pub(crate) fn generalized_harmonic(n: u64, s: f64) -> f64 {
    let mut sum = 0.0;
    for k in 1..=n {
        sum += (k as f64).powf(-s);
    }
    sum
}
