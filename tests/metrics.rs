//! Integration tests for metric computation: branch selection between the
//! binary and one-vs-rest ROC-AUC paths, and range invariants.

use ndarray::{array, Array2};

use tabular_objective::metrics::{accuracy, balanced_accuracy, binary_roc_auc, roc_auc, Metrics};
use tabular_objective::ObjectiveError;

// ---------------------------------------------------------------------------
// Binary branch
// ---------------------------------------------------------------------------

#[test]
fn binary_branch_uses_positive_class_column_only() {
    let y = array![0, 1, 0, 1];
    // Column 0 is deliberately garbage; only column 1 (the positive class)
    // may influence the score.
    let proba = array![
        [0.9, 0.1],
        [0.3, 0.9],
        [0.1, 0.8],
        [0.2, 0.7],
    ];
    let auc = roc_auc(&y, &proba, &[0, 1]).unwrap();
    // Reference: positives {0.9, 0.7} vs negatives {0.1, 0.8};
    // 3 of 4 pairs correctly ordered.
    assert!((auc - 0.75).abs() < 1e-12);
}

#[test]
fn binary_branch_follows_model_class_ordering() {
    // Same scores, but the model orders its columns [1, 0]; the positive
    // class 1 now lives in column 0.
    let y = array![0, 1, 0, 1];
    let proba = array![
        [0.1, 0.9],
        [0.9, 0.3],
        [0.8, 0.1],
        [0.7, 0.2],
    ];
    let auc = roc_auc(&y, &proba, &[1, 0]).unwrap();
    assert!((auc - 0.75).abs() < 1e-12);
}

#[test]
fn perfect_separation_scores_one() {
    let y = array![0, 0, 1, 1];
    let proba = array![[0.9, 0.1], [0.8, 0.2], [0.2, 0.8], [0.1, 0.9]];
    let auc = roc_auc(&y, &proba, &[0, 1]).unwrap();
    assert!((auc - 1.0).abs() < 1e-12);
}

// ---------------------------------------------------------------------------
// One-vs-rest branch
// ---------------------------------------------------------------------------

#[test]
fn three_class_branch_is_macro_ovr() {
    let y = array![0, 1, 2, 0, 1, 2];
    // Probabilities that rank each class's own samples on top.
    let proba = array![
        [0.8, 0.1, 0.1],
        [0.1, 0.8, 0.1],
        [0.1, 0.1, 0.8],
        [0.7, 0.2, 0.1],
        [0.2, 0.7, 0.1],
        [0.1, 0.2, 0.7],
    ];
    let auc = roc_auc(&y, &proba, &[0, 1, 2]).unwrap();
    // Every one-vs-rest problem is perfectly separated.
    assert!((auc - 1.0).abs() < 1e-12);

    // Hand-checked macro average on a partially-wrong matrix.
    let proba = array![
        [0.8, 0.1, 0.1],
        [0.1, 0.8, 0.1],
        [0.8, 0.1, 0.1], // class 2 sample scored as class 0
        [0.7, 0.2, 0.1],
        [0.2, 0.7, 0.1],
        [0.1, 0.2, 0.7],
    ];
    let auc = roc_auc(&y, &proba, &[0, 1, 2]).unwrap();
    let ovr0 = binary_roc_auc(&y, &proba.column(0).to_vec(), 0).unwrap();
    let ovr1 = binary_roc_auc(&y, &proba.column(1).to_vec(), 1).unwrap();
    let ovr2 = binary_roc_auc(&y, &proba.column(2).to_vec(), 2).unwrap();
    assert!((auc - (ovr0 + ovr1 + ovr2) / 3.0).abs() < 1e-12);
    assert!(auc < 1.0);
}

// ---------------------------------------------------------------------------
// Degenerate and malformed inputs
// ---------------------------------------------------------------------------

#[test]
fn single_class_test_subset_is_an_error() {
    let y = array![1, 1, 1, 1];
    let proba = Array2::from_elem((4, 2), 0.5);
    let err = roc_auc(&y, &proba, &[0, 1]).unwrap_err();
    assert!(matches!(err, ObjectiveError::MetricComputation(_)));
}

#[test]
fn probability_matrix_narrower_than_classes_is_an_error() {
    let y = array![0, 1, 2, 0];
    let proba = Array2::from_elem((4, 2), 0.5);
    assert!(roc_auc(&y, &proba, &[0, 1]).is_err());
}

#[test]
fn truncated_predictions_are_an_error_not_a_deflated_score() {
    let y = array![0, 1, 0, 1];
    let err = accuracy(&y, &[0, 1]).unwrap_err();
    assert!(matches!(err, ObjectiveError::MetricComputation(_)));
}

#[test]
fn unknown_test_class_is_an_error() {
    let y = array![0, 1, 5, 0];
    let proba = Array2::from_elem((4, 3), 1.0 / 3.0);
    let err = roc_auc(&y, &proba, &[0, 1, 2]).unwrap_err();
    assert!(matches!(err, ObjectiveError::MetricComputation(_)));
}

// ---------------------------------------------------------------------------
// Ranges and the metrics record
// ---------------------------------------------------------------------------

#[test]
fn metric_values_stay_in_unit_interval() {
    let y = array![0, 1, 0, 1, 0, 1];
    let pred = [0, 1, 1, 1, 0, 0];
    let bacc = balanced_accuracy(&y, &pred).unwrap();
    assert!((0.0..=1.0).contains(&bacc));

    let scores = [0.3, 0.6, 0.5, 0.9, 0.2, 0.4];
    let auc = binary_roc_auc(&y, &scores, 1).unwrap();
    assert!((0.0..=1.0).contains(&auc));
}

#[test]
fn metrics_map_exposes_the_fixed_keys() {
    let metrics = Metrics {
        score_test: 0.8,
        score_val: 0.75,
        score_train: 0.9,
        balanced_accuracy: 0.8,
        roc_auc_score: 0.85,
        value: 1.0 - 0.8,
    };
    let map = metrics.to_map();
    for key in [
        "score_test",
        "score_val",
        "score_train",
        "balanced_accuracy",
        "roc_auc_score",
        "value",
    ] {
        assert!(map.contains_key(key), "missing key {}", key);
    }
    assert!((map["value"] - (1.0 - map["score_test"])).abs() < 1e-9);
}
