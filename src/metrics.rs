//! Metrics for evaluating regression models.

/// Metrics for evaluating regression models.
pub struct Metrics;

impl Metrics {
    /// Mean Squared Error: `mean((y_true - y_pred)^2)`. Lower is better.
    pub fn mse(y_true: &[f64], y_pred: &[f64]) -> f64 {
        assert_eq!(
            y_true.len(),
            y_pred.len(),
            "Arrays must have the same length"
        );

        if y_true.is_empty() {
            return 0.0;
        }

        let sum_sq: f64 = y_true
            .iter()
            .zip(y_pred.iter())
            .map(|(&t, &p)| (t - p).powi(2))
            .sum();

        sum_sq / y_true.len() as f64
    }

    /// Root Mean Squared Error, in the same units as the target.
    pub fn rmse(y_true: &[f64], y_pred: &[f64]) -> f64 {
        Self::mse(y_true, y_pred).sqrt()
    }

    /// Mean Absolute Error: `mean(|y_true - y_pred|)`. Lower is better.
    pub fn mae(y_true: &[f64], y_pred: &[f64]) -> f64 {
        assert_eq!(
            y_true.len(),
            y_pred.len(),
            "Arrays must have the same length"
        );

        if y_true.is_empty() {
            return 0.0;
        }

        let sum_abs: f64 = y_true
            .iter()
            .zip(y_pred.iter())
            .map(|(&t, &p)| (t - p).abs())
            .sum();

        sum_abs / y_true.len() as f64
    }

    /// R² (coefficient of determination): `1 - SS_res / SS_tot`.
    ///
    /// 1.0 is a perfect fit; values can go negative when the model is worse
    /// than predicting the mean.
    pub fn r_squared(y_true: &[f64], y_pred: &[f64]) -> f64 {
        assert_eq!(
            y_true.len(),
            y_pred.len(),
            "Arrays must have the same length"
        );

        if y_true.is_empty() {
            return 0.0;
        }

        let mean_true: f64 = y_true.iter().copied().sum::<f64>() / y_true.len() as f64;

        let ss_res: f64 = y_true
            .iter()
            .zip(y_pred.iter())
            .map(|(&t, &p)| (t - p).powi(2))
            .sum();

        let ss_tot: f64 = y_true.iter().map(|&t| (t - mean_true).powi(2)).sum();

        if ss_tot == 0.0 {
            // Constant target: perfect only if the predictions match it.
            return if ss_res == 0.0 { 1.0 } else { 0.0 };
        }

        1.0 - (ss_res / ss_tot)
    }

    /// Calculate all metrics at once.
    pub fn calculate_all(y_true: &[f64], y_pred: &[f64]) -> RegressionMetrics {
        RegressionMetrics {
            mse: Self::mse(y_true, y_pred),
            rmse: Self::rmse(y_true, y_pred),
            mae: Self::mae(y_true, y_pred),
            r_squared: Self::r_squared(y_true, y_pred),
        }
    }
}

/// Struct to hold all regression metrics.
#[derive(Debug, Clone, Copy)]
pub struct RegressionMetrics {
    pub mse: f64,
    pub rmse: f64,
    pub mae: f64,
    pub r_squared: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mse_perfect() {
        let y_true = vec![1.0, 2.0, 3.0, 4.0];
        let y_pred = vec![1.0, 2.0, 3.0, 4.0];
        assert!((Metrics::mse(&y_true, &y_pred) - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_mse_error() {
        let y_true = vec![1.0, 2.0, 3.0, 4.0];
        let y_pred = vec![2.0, 3.0, 4.0, 5.0];
        assert!((Metrics::mse(&y_true, &y_pred) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_rmse() {
        let y_true = vec![0.0, 0.0];
        let y_pred = vec![3.0, 3.0];
        assert!((Metrics::rmse(&y_true, &y_pred) - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_mae() {
        let y_true = vec![1.0, 2.0, 3.0, 4.0];
        let y_pred = vec![2.0, 3.0, 4.0, 5.0];
        assert!((Metrics::mae(&y_true, &y_pred) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_r_squared_perfect() {
        let y_true = vec![1.0, 2.0, 3.0, 4.0];
        let y_pred = vec![1.0, 2.0, 3.0, 4.0];
        assert!((Metrics::r_squared(&y_true, &y_pred) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_r_squared_constant_target() {
        let y_true = vec![2.0, 2.0, 2.0, 2.0];
        let y_pred = vec![2.0, 2.0, 2.0, 2.0];
        assert!((Metrics::r_squared(&y_true, &y_pred) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_calculate_all() {
        let y_true = vec![1.0, 2.0, 3.0, 4.0];
        let y_pred = vec![1.0, 2.0, 3.0, 4.0];
        let metrics = Metrics::calculate_all(&y_true, &y_pred);
        assert!((metrics.mse - 0.0).abs() < 1e-9);
        assert!((metrics.mae - 0.0).abs() < 1e-9);
        assert!((metrics.r_squared - 1.0).abs() < 1e-9);
    }
}
