//! Tanh-sinh (double-exponential) quadrature.
//!
//! Used for the moments that lack elementary closed forms (Argus,
//! Benktander, Gompertz, CrystalBall). The tanh-sinh transform maps
//! `[-1, 1]` to the real line via `x = tanh(π/2 · sinh t)`, concentrating
//! evaluation points near the endpoints, which also makes it effective for
//! the half-line substitutions used for unbounded supports.

use crate::errors::Result;

/// Tanh-sinh quadrature with a relative stopping rule.
#[derive(Debug, Clone)]
pub(crate) struct TanhSinh {
    relative_tolerance: f64,
    max_refinements: usize,
}

impl TanhSinh {
    /// Default parameters: relative tolerance `√ε`, 15 refinements.
    pub(crate) fn default_params() -> Self {
        Self {
            relative_tolerance: f64::EPSILON.sqrt(),
            max_refinements: 15,
        }
    }

    /// Integrate `f` on the finite interval `[a, b]`.
    pub(crate) fn integrate<F: Fn(f64) -> f64>(&self, f: F, a: f64, b: f64) -> Result<f64> {
        if a == b {
            return Ok(0.0);
        }

        // Map [a, b] → [−1, 1]: x = (a+b)/2 + (b−a)/2 · u
        let mid = 0.5 * (a + b);
        let half = 0.5 * (b - a);
        let pi_half = std::f64::consts::FRAC_PI_2;

        let mut prev_integral = f64::MAX;
        let mut h = 1.0_f64;

        for level in 0..=self.max_refinements {
            let mut sum = f(mid) * pi_half;

            let mut k = 1;
            loop {
                let t = k as f64 * h;
                let (contribution, negligible) = evaluate_pair(&f, mid, half, pi_half, t);
                sum += contribution;
                if negligible || k > 500 {
                    break;
                }
                k += 1;
            }

            let integral = sum * h * half;

            if level > 0
                && prev_integral != f64::MAX
                && prev_integral != 0.0
                && (integral - prev_integral).abs()
                    < self.relative_tolerance * prev_integral.abs()
            {
                return Ok(integral);
            }

            prev_integral = integral;
            h *= 0.5;
        }

        // Best estimate even if the tolerance was not reached.
        Ok(prev_integral)
    }

    /// Integrate `f` on `[a, ∞)` via `x = a + u/(1−u)`.
    pub(crate) fn integrate_half_line_up<F: Fn(f64) -> f64>(&self, f: F, a: f64) -> Result<f64> {
        self.integrate(
            |u| {
                let x = a + u / (1.0 - u);
                let fx = f(x);
                if fx == 0.0 {
                    0.0
                } else {
                    fx / ((1.0 - u) * (1.0 - u))
                }
            },
            0.0,
            1.0,
        )
    }

    /// Integrate `f` on `(-∞, b]` via `x = b − u/(1−u)`.
    pub(crate) fn integrate_half_line_down<F: Fn(f64) -> f64>(&self, f: F, b: f64) -> Result<f64> {
        self.integrate(
            |u| {
                let x = b - u / (1.0 - u);
                let fx = f(x);
                if fx == 0.0 {
                    0.0
                } else {
                    fx / ((1.0 - u) * (1.0 - u))
                }
            },
            0.0,
            1.0,
        )
    }

    /// Integrate over a possibly unbounded support, splitting doubly
    /// infinite domains at `split`.
    pub(crate) fn integrate_support<F: Fn(f64) -> f64>(
        &self,
        f: F,
        lower: f64,
        upper: f64,
        split: f64,
    ) -> Result<f64> {
        match (lower.is_finite(), upper.is_finite()) {
            (true, true) => self.integrate(f, lower, upper),
            (true, false) => self.integrate_half_line_up(f, lower),
            (false, true) => self.integrate_half_line_down(f, upper),
            (false, false) => Ok(self.integrate_half_line_down(&f, split)?
                + self.integrate_half_line_up(&f, split)?),
        }
    }
}

/// One symmetric pair of tanh-sinh abscissas at parameter `t`.
fn evaluate_pair<F: Fn(f64) -> f64>(
    f: &F,
    mid: f64,
    half: f64,
    pi_half: f64,
    t: f64,
) -> (f64, bool) {
    let sinh_t = t.sinh();
    let cosh_arg = (pi_half * sinh_t).cosh();
    let weight = pi_half * t.cosh() / (cosh_arg * cosh_arg);
    if !weight.is_finite() || weight < 1e-300 {
        return (0.0, true);
    }
    let u = (pi_half * sinh_t).tanh();
    let contribution = weight * (f(mid + half * u) + f(mid - half * u));
    (contribution, contribution.abs() < 1e-300)
}

// ── Moments via quadrature ───────────────────────────────────────────────────

/// Mean, variance, skewness, and excess kurtosis computed by quadrature.
#[derive(Debug, Clone, Copy)]
pub(crate) struct NumericMoments {
    pub mean: f64,
    pub var: f64,
    pub skewness: f64,
    pub kurtosis: f64,
}

/// All four standardized moments of a density over `[lower, upper]`.
pub(crate) fn pdf_moments<F: Fn(f64) -> f64 + Copy>(
    pdf: F,
    lower: f64,
    upper: f64,
    split: f64,
) -> Result<NumericMoments> {
    let quad = TanhSinh::default_params();
    let mean = quad.integrate_support(|x| x * pdf(x), lower, upper, split)?;
    let var = quad.integrate_support(
        |x| {
            let d = x - mean;
            d * d * pdf(x)
        },
        lower,
        upper,
        split,
    )?;
    let m3 = quad.integrate_support(
        |x| {
            let d = x - mean;
            d * d * d * pdf(x)
        },
        lower,
        upper,
        split,
    )?;
    let m4 = quad.integrate_support(
        |x| {
            let d = x - mean;
            let d2 = d * d;
            d2 * d2 * pdf(x)
        },
        lower,
        upper,
        split,
    )?;
    Ok(NumericMoments {
        mean,
        var,
        skewness: m3 / var.powf(1.5),
        kurtosis: m4 / (var * var) - 3.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::special::norm_pdf;

    #[test]
    fn integrates_polynomial() {
        let quad = TanhSinh::default_params();
        // ∫₀¹ x² dx = 1/3
        let v = quad.integrate(|x| x * x, 0.0, 1.0).unwrap();
        assert!((v - 1.0 / 3.0).abs() < 1e-10, "got {v}");
    }

    #[test]
    fn handles_endpoint_singularity() {
        let quad = TanhSinh::default_params();
        // ∫₀¹ 1/√x dx = 2
        let v = quad.integrate(|x| 1.0 / x.sqrt(), 0.0, 1.0).unwrap();
        assert!((v - 2.0).abs() < 1e-8, "got {v}");
    }

    #[test]
    fn half_line_exponential() {
        let quad = TanhSinh::default_params();
        // ∫₀^∞ e^{-x} dx = 1
        let v = quad.integrate_half_line_up(|x| (-x).exp(), 0.0).unwrap();
        assert!((v - 1.0).abs() < 1e-9, "got {v}");
    }

    #[test]
    fn standard_normal_moments() {
        let m = pdf_moments(norm_pdf, f64::NEG_INFINITY, f64::INFINITY, 0.0).unwrap();
        assert!(m.mean.abs() < 1e-9, "mean {}", m.mean);
        assert!((m.var - 1.0).abs() < 1e-8, "var {}", m.var);
        assert!(m.skewness.abs() < 1e-7, "skew {}", m.skewness);
        assert!(m.kurtosis.abs() < 1e-6, "kurt {}", m.kurtosis);
    }
}
