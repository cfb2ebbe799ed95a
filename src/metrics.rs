//! Classification metrics: accuracy, balanced accuracy, and ROC-AUC.
//!
//! ROC-AUC is computed with the tie-corrected rank statistic (Mann–Whitney),
//! which equals the trapezoidal area under the ROC curve. The multi-class
//! path is a one-vs-rest macro average over the classes present in the test
//! labels.

use std::collections::BTreeMap;

use ndarray::{Array1, Array2};
use serde::Serialize;

use crate::data_handling::class_counts;
use crate::error::ObjectiveError;

/// Metrics reported for one evaluated model. `value` is the convergence
/// scalar tracked by the harness; smaller is better.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Metrics {
    pub score_test: f64,
    pub score_val: f64,
    pub score_train: f64,
    pub balanced_accuracy: f64,
    pub roc_auc_score: f64,
    pub value: f64,
}

impl Metrics {
    /// Export as a name → scalar map, the shape the harness consumes.
    pub fn to_map(&self) -> BTreeMap<&'static str, f64> {
        let mut map = BTreeMap::new();
        map.insert("score_test", self.score_test);
        map.insert("score_val", self.score_val);
        map.insert("score_train", self.score_train);
        map.insert("balanced_accuracy", self.balanced_accuracy);
        map.insert("roc_auc_score", self.roc_auc_score);
        map.insert("value", self.value);
        map
    }
}

/// Fraction of correctly predicted labels.
pub fn accuracy(y_true: &Array1<i32>, y_pred: &[i32]) -> Result<f64, ObjectiveError> {
    if y_true.len() != y_pred.len() {
        return Err(ObjectiveError::MetricComputation(format!(
            "label vector has {} entries but predictions have {}",
            y_true.len(),
            y_pred.len()
        )));
    }
    if y_true.is_empty() {
        return Ok(0.0);
    }
    let correct = y_true
        .iter()
        .zip(y_pred.iter())
        .filter(|(t, p)| t == p)
        .count();
    Ok(correct as f64 / y_true.len() as f64)
}

/// Unweighted mean of per-class recall over the classes present in `y_true`.
pub fn balanced_accuracy(y_true: &Array1<i32>, y_pred: &[i32]) -> Result<f64, ObjectiveError> {
    if y_true.len() != y_pred.len() {
        return Err(ObjectiveError::MetricComputation(format!(
            "label vector has {} entries but predictions have {}",
            y_true.len(),
            y_pred.len()
        )));
    }
    let counts = class_counts(y_true);
    if counts.is_empty() {
        return Err(ObjectiveError::MetricComputation(
            "cannot compute balanced accuracy on empty labels".to_string(),
        ));
    }
    let mut recall_sum = 0.0;
    for (&label, &count) in &counts {
        let correct = y_true
            .iter()
            .zip(y_pred.iter())
            .filter(|(&t, &p)| t == label && p == label)
            .count();
        recall_sum += correct as f64 / count as f64;
    }
    Ok(recall_sum / counts.len() as f64)
}

/// ROC-AUC on the test labels, branching on label cardinality.
///
/// With exactly two distinct labels the score uses only the probability
/// column of the larger label (the conventional positive class, column 1 in
/// sorted class order). With more than two, the one-vs-rest macro average is
/// taken over the full probability matrix. A single distinct label is
/// degenerate and raises a `MetricComputation` error.
///
/// # Arguments
///
/// * `y_true` - Test labels.
/// * `proba` - Probability estimates, one row per sample and one column per
///   model class.
/// * `classes` - The model's class-to-column ordering.
pub fn roc_auc(
    y_true: &Array1<i32>,
    proba: &Array2<f64>,
    classes: &[i32],
) -> Result<f64, ObjectiveError> {
    if proba.nrows() != y_true.len() {
        return Err(ObjectiveError::MetricComputation(format!(
            "probability matrix has {} rows but there are {} test labels",
            proba.nrows(),
            y_true.len()
        )));
    }
    let observed: Vec<i32> = class_counts(y_true).into_keys().collect();
    if observed.len() < 2 {
        return Err(ObjectiveError::MetricComputation(
            "test subset contains a single class; ROC-AUC is undefined".to_string(),
        ));
    }
    if proba.ncols() < observed.len() {
        return Err(ObjectiveError::MetricComputation(format!(
            "probability matrix has {} columns but {} classes were observed",
            proba.ncols(),
            observed.len()
        )));
    }

    if observed.len() == 2 {
        let positive = observed[1];
        let column = class_column(classes, positive)?;
        let scores: Vec<f64> = proba.column(column).to_vec();
        binary_roc_auc(y_true, &scores, positive)
    } else {
        // One-vs-rest macro average over the observed classes.
        let mut total = 0.0;
        for &label in &observed {
            let column = class_column(classes, label)?;
            let scores: Vec<f64> = proba.column(column).to_vec();
            total += binary_roc_auc(y_true, &scores, label)?;
        }
        Ok(total / observed.len() as f64)
    }
}

/// Binary ROC-AUC of `scores` against membership in `positive`, using
/// average ranks for tied scores.
pub fn binary_roc_auc(
    y_true: &Array1<i32>,
    scores: &[f64],
    positive: i32,
) -> Result<f64, ObjectiveError> {
    let n = y_true.len();
    if scores.len() != n {
        return Err(ObjectiveError::MetricComputation(format!(
            "score vector has {} entries but there are {} labels",
            scores.len(),
            n
        )));
    }
    let n_pos = y_true.iter().filter(|&&t| t == positive).count();
    let n_neg = n - n_pos;
    if n_pos == 0 || n_neg == 0 {
        return Err(ObjectiveError::MetricComputation(
            "ROC-AUC requires both positive and negative samples".to_string(),
        ));
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| {
        scores[a]
            .partial_cmp(&scores[b])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    // Average 1-based ranks within tie groups, then sum ranks of positives.
    let mut rank_sum_pos = 0.0;
    let mut i = 0;
    while i < n {
        let mut j = i;
        while j + 1 < n && scores[order[j + 1]] == scores[order[i]] {
            j += 1;
        }
        let avg_rank = (i + j + 2) as f64 / 2.0;
        for &idx in &order[i..=j] {
            if y_true[idx] == positive {
                rank_sum_pos += avg_rank;
            }
        }
        i = j + 1;
    }

    let auc = (rank_sum_pos - (n_pos * (n_pos + 1)) as f64 / 2.0)
        / (n_pos as f64 * n_neg as f64);
    Ok(auc)
}

fn class_column(classes: &[i32], label: i32) -> Result<usize, ObjectiveError> {
    classes.iter().position(|&c| c == label).ok_or_else(|| {
        ObjectiveError::MetricComputation(format!(
            "class {} observed in test labels is unknown to the model",
            label
        ))
    })
}
