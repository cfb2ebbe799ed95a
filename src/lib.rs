//! tabular-objective: a classification objective for tabular-data
//! benchmarking harnesses.
//!
//! Given a labeled dataset and an opaque preprocessing transform, the
//! objective deterministically partitions the data into stratified
//! train/validation/test subsets, hands the training subset to an external
//! solver, and scores the solver's fitted model with accuracy, balanced
//! accuracy, and ROC-AUC, emitting a single convergence scalar
//! (`1 − test accuracy`) for the harness to track.
//!
//! The design favors small, testable modules: the partitioner and metric
//! functions are plain functions over `ndarray` types, and the solver/model
//! boundary is a capability trait so any fitted object satisfying it is
//! interchangeable.
pub mod config;
pub mod data_handling;
pub mod error;
pub mod io;
pub mod metrics;
pub mod models;
pub mod objective;
pub mod preprocessing;

pub use config::{ObjectiveConfig, ParameterGrid};
pub use data_handling::{partition, DataPartition, Dataset};
pub use error::ObjectiveError;
pub use metrics::Metrics;
pub use objective::{ClassificationObjective, SolverInput};

/// Initialize env_logger for binaries and examples. Respects
/// `TABULAR_OBJECTIVE_LOG`, defaulting to errors only.
pub fn init_logging() {
    let _ = env_logger::Builder::default()
        .filter_level(log::LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("TABULAR_OBJECTIVE_LOG", "error"))
        .try_init();
}
