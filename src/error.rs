//! Error types shared by the sampler and the integrator.

use thiserror::Error;

/// Everything that can go wrong while sampling or integrating.
///
/// Neither variant is recovered from inside the algorithms: a bad argument is
/// rejected before the first random draw, and a broken model function aborts
/// the run at the sample where it broke.
#[derive(Debug, Error)]
pub enum McError {
    /// A sample count, domain size, or step size outside its valid range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The density or integrand produced a value the algorithm cannot use.
    #[error("evaluation failed at x = {x}: got {value}")]
    EvaluationFailure { x: f64, value: f64 },

    /// Writing results to disk failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, McError>;

impl McError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        McError::InvalidArgument(msg.into())
    }

    /// Returns `true` for [`McError::InvalidArgument`].
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, McError::InvalidArgument(_))
    }

    /// Returns `true` for [`McError::EvaluationFailure`].
    pub fn is_evaluation_failure(&self) -> bool {
        matches!(self, McError::EvaluationFailure { .. })
    }
}

/// Converts a caller-supplied sample count into a positive `usize`.
///
/// Zero, negative counts, and counts that do not fit in a `usize` are all
/// [`McError::InvalidArgument`].
pub fn sample_count<N>(n: N) -> Result<usize>
where
    N: num_traits::ToPrimitive + std::fmt::Display + Copy,
{
    match n.to_usize() {
        Some(n) if n > 0 => Ok(n),
        _ => Err(McError::invalid(format!(
            "sample count must be a positive integer, got {n}"
        ))),
    }
}
