//! The training artifact: fitted model and fitted encoder as one unit.
//!
//! The encoder and the model are only meaningful together. A model applied
//! to differently-coded categories predicts garbage, so the two are bundled
//! into a single [`ModelArtifact`] struct and serialized as one bincode
//! blob. There is no way to persist or load one without the other.

use crate::model::{FittedLinearRegression, LinearParams};
use crate::preprocessing::{FittedOrdinalEncoder, OrdinalEncoderParams};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Well-known relative path the service loads from and training writes to.
pub const ARTIFACT_PATH: &str = "abalone_model.bin";

/// Error type for artifact persistence.
#[derive(Debug)]
pub enum ArtifactError {
    /// No artifact file at the given path; training has not run yet.
    NotFound(PathBuf),
    /// The file exists but does not decode to a valid bundle.
    Malformed(String),
    /// Any other file I/O failure.
    Io(String),
}

impl fmt::Display for ArtifactError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactError::NotFound(path) => {
                write!(
                    f,
                    "model artifact '{}' not found, run the training job first",
                    path.display()
                )
            }
            ArtifactError::Malformed(msg) => write!(f, "malformed artifact: {msg}"),
            ArtifactError::Io(msg) => write!(f, "artifact i/o error: {msg}"),
        }
    }
}

impl std::error::Error for ArtifactError {}

/// Serialized bundle of fitted model and fitted encoder parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    model: LinearParams,
    encoder: OrdinalEncoderParams,
}

impl ModelArtifact {
    /// Bundle a fitted model with the encoder it was trained against.
    pub fn bundle(model: &FittedLinearRegression, encoder: &FittedOrdinalEncoder) -> Self {
        Self {
            model: model.extract_params(),
            encoder: encoder.extract_params(),
        }
    }

    /// Write the bundle to `path`, overwriting any previous artifact.
    pub fn save_to_file(&self, path: &Path) -> Result<(), ArtifactError> {
        let bytes = bincode::serialize(self)
            .map_err(|e| ArtifactError::Malformed(e.to_string()))?;
        fs::write(path, bytes).map_err(|e| ArtifactError::Io(e.to_string()))
    }

    /// Read a bundle back from `path`.
    ///
    /// # Errors
    /// [`ArtifactError::NotFound`] when the file is absent,
    /// [`ArtifactError::Malformed`] when it does not decode.
    pub fn load_from_file(path: &Path) -> Result<Self, ArtifactError> {
        let bytes = fs::read(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ArtifactError::NotFound(path.to_path_buf()),
            _ => ArtifactError::Io(e.to_string()),
        })?;
        bincode::deserialize(&bytes).map_err(|e| ArtifactError::Malformed(e.to_string()))
    }

    /// Rebuild the fitted pair from the persisted parameters.
    ///
    /// # Errors
    /// [`ArtifactError::Malformed`] when either half fails validation
    /// (empty weights, empty category list).
    pub fn into_parts(
        self,
    ) -> Result<(FittedLinearRegression, FittedOrdinalEncoder), ArtifactError> {
        let model = FittedLinearRegression::from_params(self.model)
            .map_err(|e| ArtifactError::Malformed(e.to_string()))?;
        let encoder = FittedOrdinalEncoder::from_params(self.encoder)
            .map_err(|e| ArtifactError::Malformed(e.to_string()))?;
        Ok((model, encoder))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LinearRegression;
    use crate::preprocessing::OrdinalEncoder;

    fn fitted_pair() -> (FittedLinearRegression, FittedOrdinalEncoder) {
        let x = vec![vec![0.0, 1.0], vec![1.0, 0.0], vec![1.0, 1.0], vec![2.0, 3.0]];
        let y = vec![2.0, 1.0, 3.0, 8.0];
        let model = LinearRegression::new().fit(&x, &y).unwrap();
        let encoder = OrdinalEncoder::new().fit(&["M", "F", "I"]).unwrap();
        (model, encoder)
    }

    #[test]
    fn test_save_load_roundtrip() {
        let (model, encoder) = fitted_pair();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("abalone_model.bin");

        ModelArtifact::bundle(&model, &encoder)
            .save_to_file(&path)
            .unwrap();
        let (loaded_model, loaded_encoder) = ModelArtifact::load_from_file(&path)
            .unwrap()
            .into_parts()
            .unwrap();

        assert_eq!(loaded_model.weights(), model.weights());
        assert_eq!(loaded_model.bias(), model.bias());
        assert_eq!(loaded_encoder.categories(), encoder.categories());
    }

    #[test]
    fn test_save_overwrites_previous_artifact() {
        let (model, encoder) = fitted_pair();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("abalone_model.bin");

        std::fs::write(&path, b"stale artifact").unwrap();
        ModelArtifact::bundle(&model, &encoder)
            .save_to_file(&path)
            .unwrap();

        assert!(ModelArtifact::load_from_file(&path).is_ok());
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.bin");
        assert!(matches!(
            ModelArtifact::load_from_file(&path),
            Err(ArtifactError::NotFound(_))
        ));
    }

    #[test]
    fn test_garbage_bytes_are_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("abalone_model.bin");
        std::fs::write(&path, [0xffu8; 16]).unwrap();

        assert!(matches!(
            ModelArtifact::load_from_file(&path),
            Err(ArtifactError::Malformed(_))
        ));
    }

    #[test]
    fn test_empty_params_are_malformed() {
        let artifact = ModelArtifact {
            model: LinearParams {
                weights: vec![],
                bias: 0.0,
            },
            encoder: OrdinalEncoderParams { categories: vec![] },
        };
        assert!(matches!(
            artifact.into_parts(),
            Err(ArtifactError::Malformed(_))
        ));
    }
}
