use std::error::Error;
use std::fmt;

/// Errors surfaced by the objective. All of them propagate synchronously to
/// the harness; nothing is retried or suppressed at this layer.
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectiveError {
    /// Bad configuration value (e.g. `test_size` outside (0, 1)) or
    /// inconsistent input shapes.
    InvalidParameter(String),
    /// A class is too small to be represented in every subset at the
    /// requested split fraction.
    InsufficientData { label: i32, count: usize },
    /// Metric computation cannot proceed (probability matrix shape mismatch,
    /// unknown class, or a degenerate single-class test subset).
    MetricComputation(String),
    /// The majority-class baseline failed to fit.
    BaselineConstruction(String),
}

impl fmt::Display for ObjectiveError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ObjectiveError::InvalidParameter(msg) => {
                write!(f, "invalid parameter: {}", msg)
            }
            ObjectiveError::InsufficientData { label, count } => write!(
                f,
                "class {} has only {} member(s), too few to appear in every subset",
                label, count
            ),
            ObjectiveError::MetricComputation(msg) => {
                write!(f, "metric computation failed: {}", msg)
            }
            ObjectiveError::BaselineConstruction(msg) => {
                write!(f, "baseline construction failed: {}", msg)
            }
        }
    }
}

impl Error for ObjectiveError {}
