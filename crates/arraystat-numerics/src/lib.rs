//! Numerical primitives for the arraystat hypothesis tests.
//!
//! Every primitive reports whether its iterative scheme converged alongside the
//! value it computed, so callers never have to consult shared state to learn
//! whether a result can be trusted.
//!
//! - [`beta`]: log-gamma and the regularized incomplete beta function `I_x(a, b)`
//! - [`ks`]: two-sample Kolmogorov-Smirnov statistic and its asymptotic probability
//!
//! # Examples
//!
//! ```
//! use arraystat_numerics::beta::beta_incomplete;
//!
//! // I_x(1, 1) is the uniform CDF.
//! let p = beta_incomplete(1.0, 1.0, 0.25);
//! assert!(p.success);
//! assert!((p.value - 0.25).abs() < 1e-12);
//! ```

pub mod beta;
pub mod ks;

/// A probability returned by a numerical primitive together with its convergence flag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Probability {
    /// The computed value. Only meaningful when `success` is `true`.
    pub value: f64,
    /// `false` if the arguments were out of domain or the iteration did not converge.
    pub success: bool,
}

impl Probability {
    /// A value produced by a converged computation.
    #[must_use]
    pub const fn converged(value: f64) -> Self {
        Self {
            value,
            success: true,
        }
    }

    /// A failed computation carrying the best available fallback value.
    #[must_use]
    pub const fn failed(value: f64) -> Self {
        Self {
            value,
            success: false,
        }
    }
}
