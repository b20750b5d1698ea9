//! Ordinal encoding for categorical labels.
//!
//! Maps string categories to integer codes (0, 1, 2, ...). Fitting collects
//! the unique labels and sorts them, so the assigned codes are deterministic
//! regardless of input order. On the abalone sex column this yields F=0,
//! I=1, M=2.

use crate::preprocessing::PreprocessingError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Ordinal encoder for a single categorical column.
///
/// Carries no hyperparameters; it exists so the fit step mirrors the
/// fit/transform shape of the rest of the crate. Unknown labels at encode
/// time are always an error: the prediction form only offers labels the
/// encoder was fitted on.
#[derive(Clone, Copy, Debug, Default)]
pub struct OrdinalEncoder;

impl OrdinalEncoder {
    pub fn new() -> Self {
        Self
    }

    /// Fit the encoder on a column of labels.
    ///
    /// # Errors
    /// Returns [`PreprocessingError::EmptyData`] for an empty column.
    pub fn fit<S: AsRef<str>>(
        &self,
        labels: &[S],
    ) -> Result<FittedOrdinalEncoder, PreprocessingError> {
        if labels.is_empty() {
            return Err(PreprocessingError::EmptyData(
                "cannot fit OrdinalEncoder on an empty column".to_string(),
            ));
        }

        let mut categories: Vec<String> = labels
            .iter()
            .map(|l| l.as_ref().to_string())
            .collect::<std::collections::HashSet<_>>()
            .into_iter()
            .collect();
        categories.sort();

        Ok(FittedOrdinalEncoder::from_categories(categories))
    }
}

/// Serializable parameters of a fitted [`OrdinalEncoder`].
///
/// The code-to-category mapping is fully determined by the category order,
/// so only the sorted category list is persisted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrdinalEncoderParams {
    pub categories: Vec<String>,
}

/// Fitted ordinal encoder ready for inference.
#[derive(Clone, Debug)]
pub struct FittedOrdinalEncoder {
    categories: Vec<String>,
    mapping: HashMap<String, usize>,
}

impl FittedOrdinalEncoder {
    fn from_categories(categories: Vec<String>) -> Self {
        let mapping = categories
            .iter()
            .enumerate()
            .map(|(code, label)| (label.clone(), code))
            .collect();
        Self {
            categories,
            mapping,
        }
    }

    /// The category labels in code order.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Encode a single label to its numeric code.
    ///
    /// # Errors
    /// Returns [`PreprocessingError::UnknownCategory`] for labels not seen
    /// during fitting.
    pub fn encode(&self, label: &str) -> Result<f64, PreprocessingError> {
        self.mapping
            .get(label)
            .map(|&code| code as f64)
            .ok_or_else(|| PreprocessingError::UnknownCategory(label.to_string()))
    }

    /// Inverse of [`encode`](Self::encode): recover the label for a code.
    pub fn decode(&self, code: f64) -> Option<&str> {
        if code < 0.0 || code.fract() != 0.0 {
            return None;
        }
        self.categories.get(code as usize).map(String::as_str)
    }

    /// Encode a whole column.
    pub fn transform<S: AsRef<str>>(
        &self,
        labels: &[S],
    ) -> Result<Vec<f64>, PreprocessingError> {
        labels.iter().map(|l| self.encode(l.as_ref())).collect()
    }

    /// Extract learned parameters as a serializable representation.
    pub fn extract_params(&self) -> OrdinalEncoderParams {
        OrdinalEncoderParams {
            categories: self.categories.clone(),
        }
    }

    /// Reconstruct a fitted encoder from parameters.
    ///
    /// # Errors
    /// Returns [`PreprocessingError::EmptyData`] if the params hold no
    /// categories; an artifact like that cannot have come from a real fit.
    pub fn from_params(params: OrdinalEncoderParams) -> Result<Self, PreprocessingError> {
        if params.categories.is_empty() {
            return Err(PreprocessingError::EmptyData(
                "encoder params contain no categories".to_string(),
            ));
        }
        Ok(Self::from_categories(params.categories))
    }
}
