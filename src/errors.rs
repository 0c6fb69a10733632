//! Error types and the `ensure_param!` / `fail!` convenience macros.
//!
//! A single `thiserror`-derived enum covers the whole library: parameter
//! validation at construction, probability-domain checks, and numerical
//! failures (bracket expansion, series truncation, root finding).

use thiserror::Error;

/// The top-level error type used throughout extradistr.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// A distribution parameter violated its documented constraint.
    #[error("invalid parameter '{name}' = {value}: must satisfy {constraint}")]
    InvalidParameter {
        /// Name of the offending parameter.
        name: &'static str,
        /// The rejected value.
        value: f64,
        /// The violated predicate, e.g. `"shape > 0"`.
        constraint: &'static str,
    },

    /// A probability argument was outside `[0, 1]`.
    #[error("invalid probability {0}: must be in [0, 1]")]
    InvalidProbability(f64),

    /// An argument other than a probability was outside its documented domain.
    #[error("domain error: {0}")]
    Domain(String),

    /// The requested operation has no implementation for this distribution.
    #[error("not implemented: {0}")]
    NotImplemented(String),

    /// An iterative numerical method exhausted its iteration budget.
    #[error("{context} did not converge after {iterations} iterations")]
    NoConvergence {
        /// Iterations performed before giving up.
        iterations: usize,
        /// Description of the failing computation.
        context: &'static str,
    },

    /// General numerical failure (e.g. a root-finding bracket that does not
    /// contain the root).
    #[error("{0}")]
    Numerical(String),
}

/// Shorthand `Result` type used throughout extradistr.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Validate a single construction parameter.
///
/// Returns `Err(Error::InvalidParameter { .. })` naming the parameter and the
/// violated predicate if `$cond` is false.
///
/// # Example
/// ```
/// use extradistr::{ensure_param, errors::Result};
/// fn positive(shape: f64) -> Result<f64> {
///     ensure_param!(shape > 0.0, "shape", shape, "shape > 0");
///     Ok(shape)
/// }
/// assert!(positive(1.0).is_ok());
/// assert!(positive(-1.0).is_err());
/// ```
#[macro_export]
macro_rules! ensure_param {
    ($cond:expr, $name:expr, $value:expr, $constraint:expr) => {
        if !$cond {
            return Err($crate::errors::Error::InvalidParameter {
                name: $name,
                value: $value as f64,
                constraint: $constraint,
            });
        }
    };
}

/// Return `Err(Error::Numerical(...))` immediately.
#[macro_export]
macro_rules! fail {
    ($($msg:tt)*) => {
        return Err($crate::errors::Error::Numerical(format!($($msg)*)))
    };
}

/// Check a probability argument, mapping out-of-range and NaN values to
/// [`Error::InvalidProbability`].
pub(crate) fn check_probability(p: f64) -> Result<()> {
    if p.is_nan() || !(0.0..=1.0).contains(&p) {
        return Err(Error::InvalidProbability(p));
    }
    Ok(())
}
