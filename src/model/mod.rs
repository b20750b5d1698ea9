//! Regression models.
//!
//! One model lives here: ordinary least-squares linear regression, split
//! into an unfitted entry point ([`LinearRegression`]) and a fitted,
//! serializable predictor ([`FittedLinearRegression`]). The fitted model is
//! free of training state; it carries only the weight vector and intercept.

pub mod linear;

pub use linear::{FittedLinearRegression, LinearParams, LinearRegression};

use std::fmt;

/// Error type for model fitting and prediction.
#[derive(Debug)]
pub enum ModelError {
    /// No rows or no columns to fit on.
    EmptyData(String),
    /// Row length disagrees with the expected feature count.
    ShapeMismatch { got: usize, expected: usize },
    /// The normal equations are singular; OLS has no unique solution.
    Singular,
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::EmptyData(msg) => write!(f, "empty data: {msg}"),
            ModelError::ShapeMismatch { got, expected } => {
                write!(f, "shape mismatch: got {got} features, expected {expected}")
            }
            ModelError::Singular => {
                write!(f, "normal equations are singular, cannot solve OLS")
            }
        }
    }
}

impl std::error::Error for ModelError {}
