//! The benchmark objective: partition once at construction, hand the train
//! subset to an external solver, score the solver's fitted model on the
//! held-out subsets.

use std::sync::Arc;

use ndarray::{Array1, Array2};

use crate::config::ObjectiveConfig;
use crate::data_handling::{class_counts, partition, DataPartition, Dataset};
use crate::error::ObjectiveError;
use crate::metrics::{balanced_accuracy, roc_auc, Metrics};
use crate::models::{FittedModel, MajorityClassClassifier, Pipeline};
use crate::preprocessing::Preprocessor;

/// Display name of the objective, used by harnesses for selection and
/// reporting.
pub const NAME: &str = "Classification";

/// The contract handed to an external solver: the training subset plus the
/// untouched preprocessor. The solver is expected to fit a pipeline
/// combining the preprocessor and a classifier on this data and hand back a
/// `FittedModel`.
pub struct SolverInput<'a> {
    pub x_train: &'a Array2<f64>,
    pub y_train: &'a Array1<i32>,
    pub preprocessor: Arc<dyn Preprocessor>,
}

/// A classification objective over one dataset and one configuration.
///
/// The partition is derived once at construction and held immutably for the
/// objective's lifetime; evaluation is a pure read on top of it. Independent
/// instances own their subsets and generator state exclusively, so a harness
/// may run many of them in parallel without coordination.
pub struct ClassificationObjective {
    config: ObjectiveConfig,
    partition: DataPartition,
    preprocessor: Arc<dyn Preprocessor>,
}

impl ClassificationObjective {
    /// Build the objective: validate the configuration and partition the
    /// dataset into train/validation/test subsets.
    pub fn new(
        config: ObjectiveConfig,
        dataset: &Dataset,
        preprocessor: Arc<dyn Preprocessor>,
    ) -> Result<Self, ObjectiveError> {
        config.validate()?;
        dataset.log_summary();
        let partition = partition(dataset, config.seed, config.test_size)?;
        Ok(ClassificationObjective {
            config,
            partition,
            preprocessor,
        })
    }

    pub fn config(&self) -> &ObjectiveConfig {
        &self.config
    }

    /// The stored subsets, exposed read-only.
    pub fn partition(&self) -> &DataPartition {
        &self.partition
    }

    /// The data a solver fits on. The preprocessor is shared by reference;
    /// its state is never touched by the objective.
    pub fn solver_input(&self) -> SolverInput<'_> {
        SolverInput {
            x_train: &self.partition.x_train,
            y_train: &self.partition.y_train,
            preprocessor: Arc::clone(&self.preprocessor),
        }
    }

    /// Score a solver-produced fitted model against the held-out subsets.
    ///
    /// Computes accuracy on all three subsets, balanced accuracy and
    /// ROC-AUC on the test subset, and the convergence scalar
    /// `value = 1 − score_test`. The model and the stored subsets are not
    /// mutated.
    pub fn evaluate(&self, model: &dyn FittedModel) -> Result<Metrics, ObjectiveError> {
        let p = &self.partition;
        let score_train = model.score(&p.x_train, &p.y_train)?;
        let score_val = model.score(&p.x_val, &p.y_val)?;
        let score_test = model.score(&p.x_test, &p.y_test)?;

        let test_pred = model.predict(&p.x_test)?;
        let bal_acc = balanced_accuracy(&p.y_test, &test_pred)?;

        let proba = model.predict_proba(&p.x_test)?;
        let roc = roc_auc(&p.y_test, &proba, model.classes())?;

        let metrics = Metrics {
            score_test,
            score_val,
            score_train,
            balanced_accuracy: bal_acc,
            roc_auc_score: roc,
            value: 1.0 - score_test,
        };
        log::info!(
            "evaluated model ({}): value={:.4}, test acc={:.4}, roc_auc={:.4}",
            self.config.parameter_label(),
            metrics.value,
            metrics.score_test,
            metrics.roc_auc_score
        );
        Ok(metrics)
    }

    /// A trivial fitted model for smoke-testing the evaluation path: the
    /// stored preprocessor composed with a majority-class classifier, fitted
    /// on the train subset. Its probability output keeps one column per
    /// class seen in training, so `evaluate` runs to completion.
    pub fn baseline(&self) -> Result<Pipeline, ObjectiveError> {
        let n_classes = class_counts(&self.partition.y_train).len();
        log::debug!("fitting majority baseline over {} classes", n_classes);
        Pipeline::fit(
            self.preprocessor.as_ref(),
            Box::new(MajorityClassClassifier::new()),
            &self.partition.x_train,
            &self.partition.y_train,
        )
        .map_err(|e| match e {
            err @ ObjectiveError::BaselineConstruction(_) => err,
            other => ObjectiveError::BaselineConstruction(other.to_string()),
        })
    }
}
