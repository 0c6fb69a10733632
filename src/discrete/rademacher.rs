//! Rademacher distribution.

use num_complex::Complex64;
use rand::Rng;

use crate::distribution::{DiscreteDistribution, Distribution, Interval};
use crate::errors::{check_probability, Result};

/// Rademacher distribution: ±1 with probability 1/2 each.
///
/// The parameter-free boundary case of the discrete contract; everything is
/// closed form. There is no unique mode (`NAN`), and the median under the
/// generalized-inverse convention is −1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rademacher;

impl Rademacher {
    /// Create a Rademacher distribution (no parameters to validate).
    pub fn new() -> Self {
        Self
    }

    /// Parameter tuple (empty).
    pub fn params(&self) {}
}

impl Distribution for Rademacher {
    fn name(&self) -> &'static str {
        "Rademacher"
    }

    fn support(&self) -> Interval {
        Interval::closed(-1.0, 1.0)
    }

    fn in_support(&self, x: f64) -> bool {
        x == -1.0 || x == 1.0
    }

    fn mean(&self) -> f64 {
        0.0
    }

    fn var(&self) -> f64 {
        1.0
    }

    fn median(&self) -> f64 {
        -1.0
    }

    fn mode(&self) -> f64 {
        f64::NAN
    }

    fn skewness(&self) -> f64 {
        0.0
    }

    fn kurtosis(&self) -> f64 {
        -2.0
    }

    fn entropy(&self) -> Result<f64> {
        Ok(std::f64::consts::LN_2)
    }

    fn mgf(&self, t: f64) -> Result<f64> {
        Ok(t.cosh())
    }

    fn cf(&self, t: f64) -> Result<Complex64> {
        Ok(Complex64::new(t.cos(), 0.0))
    }
}

impl DiscreteDistribution for Rademacher {
    fn pmf(&self, k: i64) -> f64 {
        if k == -1 || k == 1 {
            0.5
        } else {
            0.0
        }
    }

    fn ln_pmf(&self, k: i64) -> f64 {
        if k == -1 || k == 1 {
            -std::f64::consts::LN_2
        } else {
            f64::NEG_INFINITY
        }
    }

    fn cdf(&self, k: i64) -> f64 {
        if k < -1 {
            0.0
        } else if k < 1 {
            0.5
        } else {
            1.0
        }
    }

    fn quantile(&self, p: f64) -> Result<i64> {
        check_probability(p)?;
        Ok(if p <= 0.5 { -1 } else { 1 })
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> i64 {
        if rng.gen::<bool>() {
            1
        } else {
            -1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_point_contract() {
        let d = Rademacher::new();
        assert_eq!(d.cdf(-2), 0.0);
        assert_eq!(d.cdf(-1), 0.5);
        assert_eq!(d.cdf(0), 0.5);
        assert_eq!(d.cdf(1), 1.0);
        assert_eq!(d.mean(), 0.0);
        assert_eq!(d.var(), 1.0);
        assert_eq!(d.pmf(0), 0.0);
        assert_eq!(d.pmf(1), 0.5);
    }

    #[test]
    fn support_is_two_points() {
        let d = Rademacher::new();
        assert!(d.in_support(1.0));
        assert!(d.in_support(-1.0));
        assert!(!d.in_support(0.0));
        assert!(!d.in_support(0.5));
    }

    #[test]
    fn quantile_ties() {
        let d = Rademacher::new();
        assert_eq!(d.quantile(0.0).unwrap(), -1);
        assert_eq!(d.quantile(0.5).unwrap(), -1);
        assert_eq!(d.quantile(0.500_001).unwrap(), 1);
        assert_eq!(d.quantile(1.0).unwrap(), 1);
        assert!(d.quantile(1.5).is_err());
    }

    #[test]
    fn transforms() {
        let d = Rademacher::new();
        assert!((d.mgf(0.7).unwrap() - 0.7_f64.cosh()).abs() < 1e-15);
        assert!((d.cf(0.7).unwrap().re - 0.7_f64.cos()).abs() < 1e-15);
        assert_eq!(d.cf(0.7).unwrap().im, 0.0);
        assert!((d.entropy().unwrap() - std::f64::consts::LN_2).abs() < 1e-15);
    }
}
