use ndarray::{Array1, Array2};

use crate::error::ObjectiveError;
use crate::models::classifier_trait::{ClassifierModel, FittedModel};
use crate::preprocessing::{Preprocessor, Transform};

/// A fitted preprocessor + classifier pair. The preprocessor is fitted on
/// the training features only; the resulting transform is applied to every
/// matrix the pipeline sees afterwards.
pub struct Pipeline {
    transform: Box<dyn Transform>,
    classifier: Box<dyn ClassifierModel>,
}

impl Pipeline {
    /// Fit `classifier` on the preprocessed training data.
    ///
    /// # Arguments
    ///
    /// * `preprocessor` - The unfitted preprocessing recipe.
    /// * `classifier` - The classifier to fit behind the transform.
    /// * `x`, `y` - Training features and labels.
    pub fn fit(
        preprocessor: &dyn Preprocessor,
        mut classifier: Box<dyn ClassifierModel>,
        x: &Array2<f64>,
        y: &Array1<i32>,
    ) -> Result<Self, ObjectiveError> {
        let transform = preprocessor.fit(x).map_err(|e| {
            ObjectiveError::BaselineConstruction(format!(
                "fitting preprocessor '{}' failed: {}",
                preprocessor.name(),
                e
            ))
        })?;
        let x_transformed = transform.transform(x);
        classifier.fit(&x_transformed, y)?;
        log::debug!(
            "pipeline fit: {} + {} on {} samples",
            preprocessor.name(),
            classifier.name(),
            y.len()
        );
        Ok(Pipeline {
            transform,
            classifier,
        })
    }
}

impl FittedModel for Pipeline {
    fn classes(&self) -> &[i32] {
        self.classifier.classes()
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Vec<i32>, ObjectiveError> {
        self.classifier.predict(&self.transform.transform(x))
    }

    fn predict_proba(&self, x: &Array2<f64>) -> Result<Array2<f64>, ObjectiveError> {
        self.classifier.predict_proba(&self.transform.transform(x))
    }
}
