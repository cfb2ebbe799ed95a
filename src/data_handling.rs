//! Dataset container and deterministic stratified partitioning.
//!
//! The partitioner performs two successive stratified holdouts driven by a
//! single seeded generator: first the test carve-out, then the validation
//! carve-out from the remainder. The generator state left by the first split
//! feeds the second, so the full partition is a deterministic function of
//! `(dataset, seed, test_size)`.

use std::collections::BTreeMap;

use ndarray::{Array1, Array2, Axis};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::ObjectiveError;

/// A labeled tabular dataset: feature matrix `x` (n × d) and label vector
/// `y` (length n, categorical).
#[derive(Debug, Clone)]
pub struct Dataset {
    pub x: Array2<f64>,
    pub y: Array1<i32>,
}

impl Dataset {
    /// Create a dataset, validating that `x` and `y` agree on the number of
    /// samples and that the data is non-empty.
    pub fn new(x: Array2<f64>, y: Array1<i32>) -> Result<Self, ObjectiveError> {
        if x.nrows() != y.len() {
            return Err(ObjectiveError::InvalidParameter(format!(
                "feature matrix has {} rows but label vector has {} entries",
                x.nrows(),
                y.len()
            )));
        }
        if y.is_empty() {
            return Err(ObjectiveError::InvalidParameter(
                "dataset must contain at least one sample".to_string(),
            ));
        }
        Ok(Dataset { x, y })
    }

    pub fn n_samples(&self) -> usize {
        self.y.len()
    }

    pub fn n_features(&self) -> usize {
        self.x.ncols()
    }

    /// Per-class sample counts, keyed by label in ascending order.
    pub fn class_counts(&self) -> BTreeMap<i32, usize> {
        class_counts(&self.y)
    }

    pub fn log_summary(&self) {
        let counts = self.class_counts();
        log::info!(
            "dataset: {} samples, {} features, {} classes",
            self.n_samples(),
            self.n_features(),
            counts.len()
        );
        for (label, count) in &counts {
            log::debug!("class {}: {} samples", label, count);
        }
    }
}

/// The six arrays produced by the two-stage split.
#[derive(Debug, Clone)]
pub struct DataPartition {
    pub x_train: Array2<f64>,
    pub y_train: Array1<i32>,
    pub x_val: Array2<f64>,
    pub y_val: Array1<i32>,
    pub x_test: Array2<f64>,
    pub y_test: Array1<i32>,
}

/// Split a dataset into train/validation/test subsets with two sequential
/// stratified holdouts.
///
/// Both holdouts use the same fraction `test_size`; the validation subset is
/// therefore `test_size × (1 − test_size)` of the original dataset, not
/// `test_size`. The second holdout consumes the generator state left by the
/// first, so it is not independently reseeded.
///
/// # Arguments
///
/// * `dataset` - The full labeled dataset.
/// * `seed` - Seed for the pseudo-random generator driving both splits.
/// * `test_size` - Holdout fraction in (0, 1), reused for both splits.
///
/// # Returns
///
/// A `DataPartition` with all six subset arrays, rows in original dataset
/// order within each subset.
pub fn partition(
    dataset: &Dataset,
    seed: u64,
    test_size: f64,
) -> Result<DataPartition, ObjectiveError> {
    if !test_size.is_finite() || test_size <= 0.0 || test_size >= 1.0 {
        return Err(ObjectiveError::InvalidParameter(format!(
            "test_size must be in (0, 1), got {}",
            test_size
        )));
    }

    let mut rng = StdRng::seed_from_u64(seed);

    let (train_full_idx, test_idx) =
        stratified_holdout_indices(&dataset.y, test_size, &mut rng)?;

    let y_train_full = dataset.y.select(Axis(0), &train_full_idx);
    let (train_rel, val_rel) = stratified_holdout_indices(&y_train_full, test_size, &mut rng)?;

    // Map the second split back to original row indices.
    let train_idx: Vec<usize> = train_rel.iter().map(|&i| train_full_idx[i]).collect();
    let val_idx: Vec<usize> = val_rel.iter().map(|&i| train_full_idx[i]).collect();

    log::info!(
        "partition: {} train / {} val / {} test samples (seed={}, test_size={})",
        train_idx.len(),
        val_idx.len(),
        test_idx.len(),
        seed,
        test_size
    );

    Ok(DataPartition {
        x_train: dataset.x.select(Axis(0), &train_idx),
        y_train: dataset.y.select(Axis(0), &train_idx),
        x_val: dataset.x.select(Axis(0), &val_idx),
        y_val: dataset.y.select(Axis(0), &val_idx),
        x_test: dataset.x.select(Axis(0), &test_idx),
        y_test: dataset.y.select(Axis(0), &test_idx),
    })
}

/// Count samples per label, keyed in ascending label order.
pub fn class_counts(y: &Array1<i32>) -> BTreeMap<i32, usize> {
    let mut counts = BTreeMap::new();
    for &label in y.iter() {
        *counts.entry(label).or_insert(0) += 1;
    }
    counts
}

/// Select indices for one stratified holdout.
///
/// The total holdout size is `ceil(test_size * n)`. Each class contributes
/// `floor(count * test_size)` samples; the remaining slots go to the classes
/// with the largest fractional remainders (ties broken by ascending label).
/// Class member lists are shuffled with the shared generator, visiting
/// classes in ascending label order so state consumption is deterministic.
///
/// Returns `(kept_indices, holdout_indices)`, both sorted ascending.
fn stratified_holdout_indices(
    y: &Array1<i32>,
    test_size: f64,
    rng: &mut StdRng,
) -> Result<(Vec<usize>, Vec<usize>), ObjectiveError> {
    let n = y.len();
    let n_holdout = (test_size * n as f64).ceil() as usize;

    // Per-class index pools, in ascending label order.
    let mut pools: BTreeMap<i32, Vec<usize>> = BTreeMap::new();
    for (i, &label) in y.iter().enumerate() {
        pools.entry(label).or_default().push(i);
    }

    // Allocate holdout counts: floor per class, then distribute the
    // remaining slots by descending fractional remainder.
    let mut alloc: BTreeMap<i32, usize> = BTreeMap::new();
    let mut remainders: Vec<(i32, f64)> = Vec::with_capacity(pools.len());
    let mut assigned = 0usize;
    for (&label, members) in &pools {
        let exact = members.len() as f64 * test_size;
        let base = exact.floor() as usize;
        alloc.insert(label, base);
        remainders.push((label, exact - base as f64));
        assigned += base;
    }
    remainders.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.0.cmp(&b.0))
    });
    let mut leftover = n_holdout.saturating_sub(assigned);
    for (label, _) in &remainders {
        if leftover == 0 {
            break;
        }
        if let Some(count) = alloc.get_mut(label) {
            if *count < pools[label].len() {
                *count += 1;
                leftover -= 1;
            }
        }
    }

    // Every class must keep at least one member on each side of the split.
    for (&label, members) in &pools {
        let take = alloc[&label];
        if take == 0 || take >= members.len() {
            return Err(ObjectiveError::InsufficientData {
                label,
                count: members.len(),
            });
        }
    }

    let mut holdout = Vec::with_capacity(n_holdout);
    let mut kept = Vec::with_capacity(n - n_holdout);
    for (&label, members) in pools.iter_mut() {
        members.shuffle(rng);
        let take = alloc[&label];
        holdout.extend_from_slice(&members[..take]);
        kept.extend_from_slice(&members[take..]);
    }
    holdout.sort_unstable();
    kept.sort_unstable();

    log::trace!(
        "stratified holdout: kept {} / held out {} of {} samples",
        kept.len(),
        holdout.len(),
        n
    );

    Ok((kept, holdout))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn balanced_dataset(n: usize) -> Dataset {
        // Feature column doubles as a row id so subsets can be traced back.
        let x = Array2::from_shape_fn((n, 2), |(i, j)| (i * 2 + j) as f64);
        let y = Array1::from_shape_fn(n, |i| (i % 2) as i32);
        Dataset::new(x, y).unwrap()
    }

    #[test]
    fn mismatched_lengths_rejected() {
        let x = Array2::zeros((3, 2));
        let y = Array1::from_vec(vec![0, 1]);
        assert!(Dataset::new(x, y).is_err());
    }

    #[test]
    fn holdout_is_stratified() {
        let dataset = balanced_dataset(100);
        let mut rng = StdRng::seed_from_u64(0);
        let (kept, holdout) =
            stratified_holdout_indices(&dataset.y, 0.2, &mut rng).unwrap();
        assert_eq!(holdout.len(), 20);
        assert_eq!(kept.len(), 80);
        let held_y = dataset.y.select(Axis(0), &holdout);
        let counts = class_counts(&held_y);
        assert_eq!(counts[&0], 10);
        assert_eq!(counts[&1], 10);
    }

    #[test]
    fn tiny_class_fails() {
        let x = Array2::zeros((10, 1));
        let mut labels = vec![0; 9];
        labels.push(1); // one member only
        let dataset = Dataset::new(x, Array1::from_vec(labels)).unwrap();
        let err = partition(&dataset, 7, 0.2).unwrap_err();
        assert!(matches!(
            err,
            ObjectiveError::InsufficientData { label: 1, count: 1 }
        ));
    }

    #[test]
    fn bad_test_size_fails() {
        let dataset = balanced_dataset(20);
        assert!(partition(&dataset, 0, 0.0).is_err());
        assert!(partition(&dataset, 0, 1.0).is_err());
    }
}
