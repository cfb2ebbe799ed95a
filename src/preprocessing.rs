//! Preprocessing seam: opaque transform objects handed to solvers and
//! composed into pipelines.
//!
//! The objective never looks inside a preprocessor; it only requires the
//! `Preprocessor` capability (fit on training features, yielding a fitted
//! `Transform`). A standard mean/std scaler and an identity transform are
//! provided so the seam can be exercised without an external collaborator.

use ndarray::Array2;

/// An unfitted preprocessing recipe. Fitting on training features produces
/// an immutable `Transform` applied to every subset thereafter.
pub trait Preprocessor: Send + Sync {
    fn fit(&self, x: &Array2<f64>) -> anyhow::Result<Box<dyn Transform>>;

    /// Human readable name, used only for logging.
    fn name(&self) -> &str {
        "preprocessor"
    }
}

/// A fitted, stateless-to-apply feature transform.
pub trait Transform: Send + Sync {
    fn transform(&self, x: &Array2<f64>) -> Array2<f64>;
}

/// Per-column mean/std standardization.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardScaler;

/// Minimum stddev to avoid division by zero when transforming.
const MIN_STD: f64 = 1e-9;

/// The fitted state of a `StandardScaler`.
#[derive(Debug, Clone)]
pub struct FittedScaler {
    pub mean: Vec<f64>,
    pub std: Vec<f64>,
}

impl Preprocessor for StandardScaler {
    fn fit(&self, x: &Array2<f64>) -> anyhow::Result<Box<dyn Transform>> {
        let (nrows, ncols) = (x.nrows(), x.ncols());
        if nrows == 0 || ncols == 0 {
            anyhow::bail!("cannot fit a scaler on an empty matrix");
        }

        let mut mean = vec![0.0; ncols];
        for row in x.rows() {
            for (c, &v) in row.iter().enumerate() {
                mean[c] += v;
            }
        }
        for v in mean.iter_mut() {
            *v /= nrows as f64;
        }

        let mut std = vec![0.0; ncols];
        for row in x.rows() {
            for (c, &v) in row.iter().enumerate() {
                let d = v - mean[c];
                std[c] += d * d;
            }
        }
        for v in std.iter_mut() {
            *v = (*v / nrows as f64).sqrt().max(MIN_STD);
        }

        Ok(Box::new(FittedScaler { mean, std }))
    }

    fn name(&self) -> &str {
        "standard_scaler"
    }
}

impl Transform for FittedScaler {
    fn transform(&self, x: &Array2<f64>) -> Array2<f64> {
        let mut out = x.clone();
        for mut row in out.rows_mut() {
            for (c, v) in row.iter_mut().enumerate() {
                *v = (*v - self.mean[c]) / self.std[c];
            }
        }
        out
    }
}

/// Pass-through preprocessor.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl Preprocessor for Identity {
    fn fit(&self, _x: &Array2<f64>) -> anyhow::Result<Box<dyn Transform>> {
        Ok(Box::new(Identity))
    }

    fn name(&self) -> &str {
        "identity"
    }
}

impl Transform for Identity {
    fn transform(&self, x: &Array2<f64>) -> Array2<f64> {
        x.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn scaler_centers_and_scales() {
        let x = array![[1.0, 10.0], [3.0, 10.0], [5.0, 10.0]];
        let fitted = StandardScaler.fit(&x).unwrap();
        let z = fitted.transform(&x);
        // First column: mean 3, centered values sum to zero.
        let col0_sum: f64 = z.column(0).iter().sum();
        assert!(col0_sum.abs() < 1e-9);
        // Constant column maps to zero rather than dividing by zero.
        for &v in z.column(1).iter() {
            assert!(v.abs() < 1e-9);
        }
    }

    #[test]
    fn scaler_rejects_empty() {
        let x = Array2::<f64>::zeros((0, 3));
        assert!(StandardScaler.fit(&x).is_err());
    }

    #[test]
    fn identity_is_noop() {
        let x = array![[1.0, 2.0], [3.0, 4.0]];
        let fitted = Identity.fit(&x).unwrap();
        assert_eq!(fitted.transform(&x), x);
    }
}
