//! Discrete probability distributions.
//!
//! Shared numeric machinery for the family lives here: the generalized
//! inverse-CDF search (geometric bracket doubling + integer bisection), the
//! capped series summation used for moments without closed forms, and the
//! unimodal mode scan. Summation CDFs are O(k) per call; the tails involved
//! are light enough that this is the documented cost model rather than an
//! accident.

mod beta_binomial;
mod beta_neg_binomial;
mod borel;
mod conway_maxwell;
mod delaporte;
mod discrete_weibull;
mod logarithmic;
mod rademacher;
mod yule;
mod zero_inflated;
mod zipf;

pub use beta_binomial::BetaBinomial;
pub use beta_neg_binomial::BetaNegBinomial;
pub use borel::Borel;
pub use conway_maxwell::ConwayMaxwellPoisson;
pub use delaporte::Delaporte;
pub use discrete_weibull::DiscreteWeibull;
pub use logarithmic::Logarithmic;
pub use rademacher::Rademacher;
pub use yule::YuleSimon;
pub use zero_inflated::{ZeroInflatedBinomial, ZeroInflatedNegBinomial, ZeroInflatedPoisson};
pub use zipf::Zipf;

use crate::errors::{Error, Result};
use crate::special::LogSumExp;

/// Cap on the geometric bracket expansion of the quantile search.
const QUANTILE_BRACKET_CAP: i64 = 1 << 52;

/// Iteration cap for series-summed moments.
const SERIES_CAP: i64 = 1_000_000;

/// Generalized inverse CDF over the integer lattice: the smallest `k >=
/// lower` with `cdf(k) >= p`.
///
/// The upper bracket starts one step above `lower` and doubles until it
/// encloses the quantile (clamped to `upper` for bounded supports), then
/// integer bisection finds the tie-break point. Failure to bracket within
/// the cap is a computation error, not an approximate answer.
pub(crate) fn quantile_search<F>(cdf: F, lower: i64, upper: Option<i64>, p: f64) -> Result<i64>
where
    F: Fn(i64) -> f64,
{
    crate::errors::check_probability(p)?;
    if p == 0.0 {
        return Ok(lower);
    }

    // Expand the upper bracket geometrically.
    let mut step = 1i64;
    let mut hi = lower;
    loop {
        if let Some(ub) = upper {
            if hi >= ub {
                hi = ub;
                break;
            }
        }
        if cdf(hi) >= p {
            break;
        }
        if step > QUANTILE_BRACKET_CAP {
            return Err(Error::NoConvergence {
                iterations: 52,
                context: "discrete quantile bracket expansion",
            });
        }
        hi = match upper {
            Some(ub) => (lower + step).min(ub),
            None => lower + step,
        };
        step *= 2;
    }

    // Bisect for the smallest k with cdf(k) >= p.
    let mut lo = lower;
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if cdf(mid) >= p {
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }
    Ok(lo)
}

/// Direct summation CDF: `Σ_{k=lower..x} pmf(k)`, clamped to `[0, 1]`.
pub(crate) fn cdf_by_summation<F>(pmf: F, lower: i64, x: i64) -> f64
where
    F: Fn(i64) -> f64,
{
    if x < lower {
        return 0.0;
    }
    let mut sum = 0.0;
    for k in lower..=x {
        let p = pmf(k);
        sum += p;
        if sum >= 1.0 {
            return 1.0;
        }
        // Past the bulk the remaining tail is negligible; stop early so
        // queries far beyond the mass stay cheap.
        if sum > 0.5 && p < sum * 1e-18 {
            break;
        }
    }
    sum.min(1.0)
}

/// Log-space summation CDF: `exp(logsumexp_{k=lower..x} ln_pmf(k))`.
///
/// Used where individual terms underflow before the partial sum does.
pub(crate) fn cdf_by_log_summation<F>(ln_pmf: F, lower: i64, x: i64) -> f64
where
    F: Fn(i64) -> f64,
{
    if x < lower {
        return 0.0;
    }
    let mut acc = LogSumExp::new();
    for k in lower..=x {
        let lp = ln_pmf(k);
        acc.add(lp);
        let running = acc.value();
        if running >= 0.0 {
            return 1.0;
        }
        if running > -0.6 && lp - running < -41.0 {
            break;
        }
    }
    acc.value().exp().min(1.0)
}

/// Moments obtained by summing the mass function.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SeriesMoments {
    pub mean: f64,
    pub var: f64,
    pub skewness: f64,
    pub kurtosis: f64,
}

/// Sum raw moments `E[X^r]`, r = 1..4, upward from `lower` until the
/// accumulated mass reaches `1 - 1e-13` (or the upper support bound / the
/// iteration cap), then convert to central/standardized form. Intended for
/// light-tailed families whose moment series converge; existence conditions
/// are gated by the caller.
pub(crate) fn series_moments<F>(pmf: F, lower: i64, upper: Option<i64>) -> SeriesMoments
where
    F: Fn(i64) -> f64,
{
    let mut mass = 0.0;
    let mut m1 = 0.0;
    let mut m2 = 0.0;
    let mut m3 = 0.0;
    let mut m4 = 0.0;
    let mut k = lower;
    while mass < 1.0 - 1e-13 && k - lower < SERIES_CAP && upper.map_or(true, |u| k <= u) {
        let p = pmf(k);
        let x = k as f64;
        mass += p;
        m1 += x * p;
        m2 += x * x * p;
        m3 += x * x * x * p;
        m4 += x * x * x * x * p;
        k += 1;
    }
    let var = m2 - m1 * m1;
    let c3 = m3 - 3.0 * m1 * m2 + 2.0 * m1 * m1 * m1;
    let c4 = m4 - 4.0 * m1 * m3 + 6.0 * m1 * m1 * m2 - 3.0 * m1 * m1 * m1 * m1;
    SeriesMoments {
        mean: m1,
        var,
        skewness: c3 / var.powf(1.5),
        kurtosis: c4 / (var * var) - 3.0,
    }
}

/// Mode of a unimodal mass function: walk upward from `lower` while the
/// mass is still rising.
pub(crate) fn mode_by_scan<F>(pmf: F, lower: i64) -> i64
where
    F: Fn(i64) -> f64,
{
    let mut k = lower;
    let mut current = pmf(k);
    while k - lower < SERIES_CAP {
        let next = pmf(k + 1);
        if next <= current {
            break;
        }
        current = next;
        k += 1;
    }
    k
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantile_search_geometric() {
        // Geometric on {0, 1, ...} with p = 1/2: cdf(k) = 1 - 2^{-(k+1)}
        let cdf = |k: i64| 1.0 - 0.5_f64.powi(k as i32 + 1);
        assert_eq!(quantile_search(cdf, 0, None, 0.0).unwrap(), 0);
        assert_eq!(quantile_search(cdf, 0, None, 0.5).unwrap(), 0);
        assert_eq!(quantile_search(cdf, 0, None, 0.6).unwrap(), 1);
        assert_eq!(quantile_search(cdf, 0, None, 0.99).unwrap(), 6);
        assert!(quantile_search(cdf, 0, None, 1.5).is_err());
    }

    #[test]
    fn quantile_search_bounded_support() {
        // Uniform on {1..6}
        let cdf = |k: i64| (k.clamp(0, 6) as f64) / 6.0;
        assert_eq!(quantile_search(cdf, 1, Some(6), 1.0).unwrap(), 6);
        assert_eq!(quantile_search(cdf, 1, Some(6), 0.5).unwrap(), 3);
    }

    #[test]
    fn series_moments_poisson() {
        use statrs::distribution::{Discrete, Poisson};
        let pois = Poisson::new(4.0).unwrap();
        let m = series_moments(|k| pois.pmf(k as u64), 0, None);
        assert!((m.mean - 4.0).abs() < 1e-9, "mean {}", m.mean);
        assert!((m.var - 4.0).abs() < 1e-9, "var {}", m.var);
        // Poisson skewness = λ^{-1/2}, excess kurtosis = 1/λ
        assert!((m.skewness - 0.5).abs() < 1e-8, "skew {}", m.skewness);
        assert!((m.kurtosis - 0.25).abs() < 1e-7, "kurt {}", m.kurtosis);
    }

    #[test]
    fn mode_scan_poisson() {
        use statrs::distribution::{Discrete, Poisson};
        let pois = Poisson::new(6.3).unwrap();
        assert_eq!(mode_by_scan(|k| pois.pmf(k as u64), 0), 6);
    }
}
