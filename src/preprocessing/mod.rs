//! Categorical preprocessing for the abalone pipeline.
//!
//! The only categorical column in this dataset is `Sex`, encoded with an
//! [`OrdinalEncoder`] that follows the fitted/unfitted split used by the
//! model in this crate: fitting produces a [`FittedOrdinalEncoder`] whose
//! learned mapping can be extracted as serializable params and rebuilt at
//! inference time. The same fitted mapping must be used on both sides of the
//! artifact boundary; the artifact module enforces that by bundling encoder
//! and model params together.

pub mod ordinal;

pub use ordinal::{FittedOrdinalEncoder, OrdinalEncoder, OrdinalEncoderParams};

use std::fmt;

/// Error type for preprocessing operations.
#[derive(Debug)]
pub enum PreprocessingError {
    /// Empty data provided where non-empty was required.
    EmptyData(String),
    /// A label not seen during fitting.
    UnknownCategory(String),
}

impl fmt::Display for PreprocessingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreprocessingError::EmptyData(msg) => write!(f, "empty data: {msg}"),
            PreprocessingError::UnknownCategory(label) => {
                write!(f, "unknown category {label:?}")
            }
        }
    }
}

impl std::error::Error for PreprocessingError {}
