//! Ordinary least-squares linear regression.
//!
//! The fit is closed-form: build the normal equations `XᵀX θ = Xᵀy` over an
//! intercept-augmented design matrix and solve them with partial-pivot
//! Gaussian elimination. With 8 features the system is 9×9, so there is no
//! need for an iterative optimizer here.

use crate::model::ModelError;
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

/// Unfitted OLS linear regression.
///
/// Stateless; [`fit`](Self::fit) goes straight to a
/// [`FittedLinearRegression`] because the solve is one-shot.
#[derive(Clone, Copy, Debug, Default)]
pub struct LinearRegression;

impl LinearRegression {
    pub fn new() -> Self {
        Self
    }

    /// Fit `y ≈ X·w + b` by least squares.
    ///
    /// # Errors
    /// - [`ModelError::EmptyData`] when `x` has no rows or no columns.
    /// - [`ModelError::ShapeMismatch`] when row lengths are ragged or
    ///   `y.len() != x.len()`.
    /// - [`ModelError::Singular`] when `XᵀX` is not invertible (e.g. a
    ///   duplicated or constant-zero column).
    pub fn fit(&self, x: &[Vec<f64>], y: &[f64]) -> Result<FittedLinearRegression, ModelError> {
        let n_samples = x.len();
        if n_samples == 0 {
            return Err(ModelError::EmptyData("no rows to fit on".to_string()));
        }
        let n_features = x[0].len();
        if n_features == 0 {
            return Err(ModelError::EmptyData("rows have no features".to_string()));
        }
        if y.len() != n_samples {
            return Err(ModelError::ShapeMismatch {
                got: y.len(),
                expected: n_samples,
            });
        }

        // Design matrix with a trailing all-ones column for the intercept.
        let mut design = Array2::<f64>::zeros((n_samples, n_features + 1));
        for (i, row) in x.iter().enumerate() {
            if row.len() != n_features {
                return Err(ModelError::ShapeMismatch {
                    got: row.len(),
                    expected: n_features,
                });
            }
            for (j, &value) in row.iter().enumerate() {
                design[(i, j)] = value;
            }
            design[(i, n_features)] = 1.0;
        }
        let targets = Array1::from_vec(y.to_vec());

        let xtx = design.t().dot(&design);
        let xty = design.t().dot(&targets);
        let theta = solve(xtx, xty)?;

        let mut weights = theta.to_vec();
        let bias = weights.pop().unwrap_or(0.0);
        Ok(FittedLinearRegression { weights, bias })
    }
}

/// Solve `A·x = b` for a small symmetric positive system by Gaussian
/// elimination with partial pivoting.
fn solve(mut a: Array2<f64>, mut b: Array1<f64>) -> Result<Array1<f64>, ModelError> {
    let n = b.len();
    for col in 0..n {
        // Pivot on the largest remaining entry in this column.
        let mut pivot_row = col;
        for row in (col + 1)..n {
            if a[(row, col)].abs() > a[(pivot_row, col)].abs() {
                pivot_row = row;
            }
        }
        if a[(pivot_row, col)].abs() < 1e-10 {
            return Err(ModelError::Singular);
        }
        if pivot_row != col {
            for k in 0..n {
                let tmp = a[(col, k)];
                a[(col, k)] = a[(pivot_row, k)];
                a[(pivot_row, k)] = tmp;
            }
            b.swap(col, pivot_row);
        }

        for row in (col + 1)..n {
            let factor = a[(row, col)] / a[(col, col)];
            for k in col..n {
                a[(row, k)] -= factor * a[(col, k)];
            }
            b[row] -= factor * b[col];
        }
    }

    // Back substitution.
    let mut x = Array1::<f64>::zeros(n);
    for col in (0..n).rev() {
        let mut sum = b[col];
        for k in (col + 1)..n {
            sum -= a[(col, k)] * x[k];
        }
        x[col] = sum / a[(col, col)];
    }
    Ok(x)
}

/// Serializable parameters of a fitted linear model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinearParams {
    pub weights: Vec<f64>,
    pub bias: f64,
}

/// Fitted linear model: `predict(x) = w·x + b`.
#[derive(Clone, Debug)]
pub struct FittedLinearRegression {
    weights: Vec<f64>,
    bias: f64,
}

impl FittedLinearRegression {
    /// Number of features the model was fitted on.
    pub fn n_features(&self) -> usize {
        self.weights.len()
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    /// Predict on a single feature vector.
    ///
    /// # Errors
    /// Returns [`ModelError::ShapeMismatch`] if the input length disagrees
    /// with the fitted feature count.
    pub fn predict(&self, features: &[f64]) -> Result<f64, ModelError> {
        if features.len() != self.weights.len() {
            return Err(ModelError::ShapeMismatch {
                got: features.len(),
                expected: self.weights.len(),
            });
        }
        let dot: f64 = self
            .weights
            .iter()
            .zip(features.iter())
            .map(|(w, x)| w * x)
            .sum();
        Ok(dot + self.bias)
    }

    /// Predict on a batch of rows.
    pub fn predict_batch(&self, rows: &[Vec<f64>]) -> Result<Vec<f64>, ModelError> {
        rows.iter().map(|row| self.predict(row)).collect()
    }

    /// Extract parameters as a serializable representation.
    pub fn extract_params(&self) -> LinearParams {
        LinearParams {
            weights: self.weights.clone(),
            bias: self.bias,
        }
    }

    /// Reconstruct a fitted model from parameters.
    ///
    /// # Errors
    /// Returns [`ModelError::EmptyData`] for an empty weight vector.
    pub fn from_params(params: LinearParams) -> Result<Self, ModelError> {
        if params.weights.is_empty() {
            return Err(ModelError::EmptyData(
                "model params contain no weights".to_string(),
            ));
        }
        Ok(Self {
            weights: params.weights,
            bias: params.bias,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fit_known_plane() -> FittedLinearRegression {
        // y = 2*x1 + 3*x2 + 1, noise-free
        let x = vec![
            vec![1.0, 0.0],
            vec![0.0, 1.0],
            vec![1.0, 1.0],
            vec![2.0, 3.0],
            vec![4.0, 1.0],
        ];
        let y: Vec<f64> = x.iter().map(|r| 2.0 * r[0] + 3.0 * r[1] + 1.0).collect();
        LinearRegression::new().fit(&x, &y).unwrap()
    }

    #[test]
    fn test_fit_recovers_exact_coefficients() {
        let model = fit_known_plane();
        assert!((model.weights()[0] - 2.0).abs() < 1e-8);
        assert!((model.weights()[1] - 3.0).abs() < 1e-8);
        assert!((model.bias() - 1.0).abs() < 1e-8);
    }

    #[test]
    fn test_predict_single() {
        let model = fit_known_plane();
        let pred = model.predict(&[2.0, 2.0]).unwrap();
        assert!((pred - 11.0).abs() < 1e-8);
        assert!(pred.is_finite());
    }

    #[test]
    fn test_predict_batch_matches_single() {
        let model = fit_known_plane();
        let rows = vec![vec![0.0, 0.0], vec![1.0, 2.0]];
        let batch = model.predict_batch(&rows).unwrap();
        for (row, &expected) in rows.iter().zip(batch.iter()) {
            assert_eq!(model.predict(row).unwrap(), expected);
        }
    }

    #[test]
    fn test_predict_shape_mismatch() {
        let model = fit_known_plane();
        assert!(matches!(
            model.predict(&[1.0]),
            Err(ModelError::ShapeMismatch {
                got: 1,
                expected: 2
            })
        ));
    }

    #[test]
    fn test_fit_empty_is_error() {
        let result = LinearRegression::new().fit(&[], &[]);
        assert!(matches!(result, Err(ModelError::EmptyData(_))));
    }

    #[test]
    fn test_fit_ragged_rows_is_error() {
        let x = vec![vec![1.0, 2.0], vec![1.0]];
        let y = vec![1.0, 2.0];
        assert!(matches!(
            LinearRegression::new().fit(&x, &y),
            Err(ModelError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_fit_target_length_mismatch_is_error() {
        let x = vec![vec![1.0], vec![2.0]];
        let y = vec![1.0];
        assert!(matches!(
            LinearRegression::new().fit(&x, &y),
            Err(ModelError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_duplicated_column_is_singular() {
        // Two identical columns make XᵀX rank-deficient.
        let x = vec![
            vec![1.0, 1.0],
            vec![2.0, 2.0],
            vec![3.0, 3.0],
            vec![4.0, 4.0],
        ];
        let y = vec![1.0, 2.0, 3.0, 4.0];
        assert!(matches!(
            LinearRegression::new().fit(&x, &y),
            Err(ModelError::Singular)
        ));
    }

    #[test]
    fn test_params_roundtrip() {
        let model = fit_known_plane();
        let params = model.extract_params();
        let rebuilt = FittedLinearRegression::from_params(params).unwrap();

        assert_eq!(rebuilt.weights(), model.weights());
        assert_eq!(rebuilt.bias(), model.bias());
    }

    #[test]
    fn test_from_empty_params_is_error() {
        let params = LinearParams {
            weights: vec![],
            bias: 0.0,
        };
        assert!(FittedLinearRegression::from_params(params).is_err());
    }
}
