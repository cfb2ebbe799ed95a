use ndarray::{Array1, Array2};

use crate::data_handling::class_counts;
use crate::error::ObjectiveError;
use crate::models::classifier_trait::ClassifierModel;

/// Constant-prediction baseline: always predicts the most frequent training
/// class, and emits the training class priors as probabilities (one column
/// per class seen during fit, in ascending label order).
#[derive(Debug, Clone, Default)]
pub struct MajorityClassClassifier {
    classes: Vec<i32>,
    priors: Vec<f64>,
    majority: Option<i32>,
}

impl MajorityClassClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    fn fitted_majority(&self) -> Result<i32, ObjectiveError> {
        self.majority.ok_or_else(|| {
            ObjectiveError::MetricComputation(
                "majority classifier used before fit".to_string(),
            )
        })
    }
}

impl ClassifierModel for MajorityClassClassifier {
    fn fit(&mut self, x: &Array2<f64>, y: &Array1<i32>) -> Result<(), ObjectiveError> {
        if x.nrows() != y.len() {
            return Err(ObjectiveError::InvalidParameter(format!(
                "feature matrix has {} rows but label vector has {} entries",
                x.nrows(),
                y.len()
            )));
        }
        let counts = class_counts(y);
        if counts.is_empty() {
            return Err(ObjectiveError::InvalidParameter(
                "cannot fit on empty labels".to_string(),
            ));
        }
        let n = y.len() as f64;
        self.classes = counts.keys().copied().collect();
        self.priors = counts.values().map(|&c| c as f64 / n).collect();
        // Ties resolve to the smallest label (first in class order).
        let (majority, _) = counts
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then(b.0.cmp(a.0)))
            .map(|(&label, &count)| (label, count))
            .unwrap_or((0, 0));
        self.majority = Some(majority);
        log::debug!(
            "majority baseline fit: {} classes, predicting {}",
            self.classes.len(),
            majority
        );
        Ok(())
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Vec<i32>, ObjectiveError> {
        let majority = self.fitted_majority()?;
        Ok(vec![majority; x.nrows()])
    }

    fn predict_proba(&self, x: &Array2<f64>) -> Result<Array2<f64>, ObjectiveError> {
        self.fitted_majority()?;
        let mut proba = Array2::zeros((x.nrows(), self.priors.len()));
        for mut row in proba.rows_mut() {
            for (c, &p) in self.priors.iter().enumerate() {
                row[c] = p;
            }
        }
        Ok(proba)
    }

    fn classes(&self) -> &[i32] {
        &self.classes
    }

    fn name(&self) -> &str {
        "majority_class"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn predicts_most_frequent_class() {
        let x = Array2::zeros((5, 2));
        let y = array![1, 1, 1, 2, 2];
        let mut clf = MajorityClassClassifier::new();
        clf.fit(&x, &y).unwrap();
        assert_eq!(clf.predict(&x).unwrap(), vec![1; 5]);
        assert_eq!(clf.classes(), &[1, 2]);
    }

    #[test]
    fn priors_are_training_frequencies() {
        let x = Array2::zeros((4, 1));
        let y = array![0, 0, 0, 1];
        let mut clf = MajorityClassClassifier::new();
        clf.fit(&x, &y).unwrap();
        let proba = clf.predict_proba(&x).unwrap();
        assert_eq!(proba.dim(), (4, 2));
        assert!((proba[(0, 0)] - 0.75).abs() < 1e-12);
        assert!((proba[(0, 1)] - 0.25).abs() < 1e-12);
    }

    #[test]
    fn tie_resolves_to_smallest_label() {
        let x = Array2::zeros((4, 1));
        let y = array![3, 3, 1, 1];
        let mut clf = MajorityClassClassifier::new();
        clf.fit(&x, &y).unwrap();
        assert_eq!(clf.predict(&x).unwrap()[0], 1);
    }

    #[test]
    fn unfitted_use_is_an_error() {
        let clf = MajorityClassClassifier::new();
        assert!(clf.predict(&Array2::zeros((2, 1))).is_err());
    }
}
