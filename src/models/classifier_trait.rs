use ndarray::{Array1, Array2};

use crate::error::ObjectiveError;
use crate::metrics::accuracy;

/// Capability set of a fitted model as seen by the evaluator: accuracy
/// scoring, hard label predictions, per-class probability estimates, and the
/// class-to-column ordering of the probability output. Any solver-produced
/// object satisfying this trait is interchangeable.
pub trait FittedModel {
    /// The model's classes, one per probability column, in column order.
    fn classes(&self) -> &[i32];

    /// Hard label predictions for each row of `x`.
    fn predict(&self, x: &Array2<f64>) -> Result<Vec<i32>, ObjectiveError>;

    /// Probability estimates, one row per sample and one column per class.
    fn predict_proba(&self, x: &Array2<f64>) -> Result<Array2<f64>, ObjectiveError>;

    /// Classification accuracy of the model on `(x, y)`.
    fn score(&self, x: &Array2<f64>, y: &Array1<i32>) -> Result<f64, ObjectiveError> {
        accuracy(y, &self.predict(x)?)
    }
}

/// A trainable classifier, the piece a solver fits behind the preprocessor.
/// Implementations hold fitted state internally after `fit`.
pub trait ClassifierModel {
    fn fit(&mut self, x: &Array2<f64>, y: &Array1<i32>) -> Result<(), ObjectiveError>;

    fn predict(&self, x: &Array2<f64>) -> Result<Vec<i32>, ObjectiveError>;

    fn predict_proba(&self, x: &Array2<f64>) -> Result<Array2<f64>, ObjectiveError>;

    /// Classes seen during fit, in probability-column order.
    fn classes(&self) -> &[i32];

    /// Optional human readable name for the model.
    fn name(&self) -> &str {
        "classifier"
    }
}
