use serde::{Deserialize, Serialize};

use crate::error::ObjectiveError;

/// Configuration for a single objective instance.
///
/// `seed` owns the pseudo-random state for both stratified splits;
/// `test_size` is the holdout fraction reused for the test and validation
/// carve-outs.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
pub struct ObjectiveConfig {
    pub seed: u64,
    pub test_size: f64,
}

impl Default for ObjectiveConfig {
    fn default() -> Self {
        ObjectiveConfig {
            seed: 42,
            test_size: 0.2,
        }
    }
}

impl ObjectiveConfig {
    pub fn new(seed: u64, test_size: f64) -> Self {
        ObjectiveConfig { seed, test_size }
    }

    /// Validate the configuration. `test_size` must lie strictly inside
    /// (0, 1); any `u64` is a valid generator seed.
    pub fn validate(&self) -> Result<(), ObjectiveError> {
        if !self.test_size.is_finite() || self.test_size <= 0.0 || self.test_size >= 1.0 {
            return Err(ObjectiveError::InvalidParameter(format!(
                "test_size must be in (0, 1), got {}",
                self.test_size
            )));
        }
        Ok(())
    }

    /// Short label for harness display, e.g. `seed=42,test_size=0.200`.
    pub fn parameter_label(&self) -> String {
        format!("seed={},test_size={:.3}", self.seed, self.test_size)
    }
}

/// Declared parameter lists for a benchmark sweep. The harness considers the
/// cross product of every list, one `ObjectiveConfig` per combination.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ParameterGrid {
    pub seeds: Vec<u64>,
    pub test_sizes: Vec<f64>,
}

impl Default for ParameterGrid {
    fn default() -> Self {
        ParameterGrid {
            seeds: vec![42],
            test_sizes: vec![0.2],
        }
    }
}

impl ParameterGrid {
    /// Expand the grid into the cross product of configurations, in
    /// declaration order (seeds outer, test sizes inner).
    pub fn configurations(&self) -> Result<Vec<ObjectiveConfig>, ObjectiveError> {
        if self.seeds.is_empty() || self.test_sizes.is_empty() {
            return Err(ObjectiveError::InvalidParameter(
                "parameter grid must declare at least one seed and one test_size".to_string(),
            ));
        }
        let mut configs = Vec::with_capacity(self.seeds.len() * self.test_sizes.len());
        for &seed in &self.seeds {
            for &test_size in &self.test_sizes {
                let config = ObjectiveConfig::new(seed, test_size);
                config.validate()?;
                configs.push(config);
            }
        }
        Ok(configs)
    }
}
