//! CSV loading helpers for feature matrices and label vectors.

use std::path::Path;

use anyhow::Context;
use ndarray::{Array1, Array2};

use crate::data_handling::Dataset;

/// Read a headerless CSV of numeric features into an `(n_samples,
/// n_features)` matrix.
pub fn read_features_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Array2<f64>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path.as_ref())
        .with_context(|| format!("opening features file {}", path.as_ref().display()))?;

    let mut data = Vec::new();
    let mut n_features = None;
    for (row, result) in reader.records().enumerate() {
        let record = result?;
        let parsed: Vec<f64> = record
            .iter()
            .map(|field| field.trim().parse::<f64>())
            .collect::<Result<_, _>>()
            .with_context(|| format!("parsing feature row {}", row))?;
        match n_features {
            None => n_features = Some(parsed.len()),
            Some(expected) if expected != parsed.len() => {
                anyhow::bail!(
                    "row {} has {} fields, expected {}",
                    row,
                    parsed.len(),
                    expected
                );
            }
            _ => {}
        }
        data.push(parsed);
    }

    let n_samples = data.len();
    let n_features = n_features.unwrap_or(0);
    Array2::from_shape_vec(
        (n_samples, n_features),
        data.into_iter().flatten().collect(),
    )
    .map_err(Into::into)
}

/// Read a headerless single-column CSV of integer class labels.
pub fn read_labels_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Array1<i32>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path.as_ref())
        .with_context(|| format!("opening labels file {}", path.as_ref().display()))?;

    let labels: Vec<i32> = reader
        .records()
        .enumerate()
        .map(|(row, result)| {
            let record = result?;
            let field = record
                .get(0)
                .ok_or_else(|| anyhow::anyhow!("empty label row {}", row))?;
            field
                .trim()
                .parse::<i32>()
                .with_context(|| format!("parsing label row {}", row))
        })
        .collect::<anyhow::Result<_>>()?;

    Ok(Array1::from_vec(labels))
}

/// Load a dataset from separate feature and label files.
pub fn load_dataset<P: AsRef<Path>>(features: P, labels: P) -> anyhow::Result<Dataset> {
    let x = read_features_csv(features)?;
    let y = read_labels_csv(labels)?;
    Dataset::new(x, y).map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn round_trip_small_dataset() {
        let dir = std::env::temp_dir().join("tabular_objective_io_test");
        fs::create_dir_all(&dir).unwrap();
        let fx = dir.join("features.csv");
        let fy = dir.join("labels.csv");
        fs::write(&fx, "1.0,2.0\n3.0,4.0\n5.0,6.0\n").unwrap();
        fs::write(&fy, "0\n1\n0\n").unwrap();

        let dataset = load_dataset(&fx, &fy).unwrap();
        assert_eq!(dataset.n_samples(), 3);
        assert_eq!(dataset.n_features(), 2);
        assert_eq!(dataset.y.to_vec(), vec![0, 1, 0]);
        assert_eq!(dataset.x[(2, 1)], 6.0);
    }

    #[test]
    fn ragged_rows_rejected() {
        let dir = std::env::temp_dir().join("tabular_objective_io_ragged");
        fs::create_dir_all(&dir).unwrap();
        let fx = dir.join("features.csv");
        fs::write(&fx, "1.0,2.0\n3.0\n").unwrap();
        assert!(read_features_csv(&fx).is_err());
    }
}
