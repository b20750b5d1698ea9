//! Prediction service core.
//!
//! [`Predictor`] owns the fitted model/encoder pair loaded from the
//! artifact and answers single-specimen predictions. It is read-only after
//! construction: the interactive binary loads it once per process and
//! reuses it for every request.

use crate::artifact::{ArtifactError, ModelArtifact};
use crate::data::Sex;
use crate::model::{FittedLinearRegression, ModelError};
use crate::preprocessing::{FittedOrdinalEncoder, PreprocessingError};
use std::fmt;
use std::path::Path;

/// Literal form defaults, taken from the classic example specimen.
pub const DEFAULT_SEX: Sex = Sex::Male;
pub const DEFAULT_LENGTH: f64 = 0.455;
pub const DEFAULT_DIAMETER: f64 = 0.365;
pub const DEFAULT_HEIGHT: f64 = 0.095;
pub const DEFAULT_WHOLE_WEIGHT: f64 = 0.514;
pub const DEFAULT_SHUCKED_WEIGHT: f64 = 0.224;
pub const DEFAULT_VISCERA_WEIGHT: f64 = 0.101;
pub const DEFAULT_SHELL_WEIGHT: f64 = 0.150;

/// One specimen's measurements, minus the ring count being predicted.
///
/// Numeric ranges are not validated; out-of-range values are passed through
/// and the model extrapolates silently.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpecimenInput {
    pub sex: Sex,
    pub length: f64,
    pub diameter: f64,
    pub height: f64,
    pub whole_weight: f64,
    pub shucked_weight: f64,
    pub viscera_weight: f64,
    pub shell_weight: f64,
}

impl Default for SpecimenInput {
    fn default() -> Self {
        Self {
            sex: DEFAULT_SEX,
            length: DEFAULT_LENGTH,
            diameter: DEFAULT_DIAMETER,
            height: DEFAULT_HEIGHT,
            whole_weight: DEFAULT_WHOLE_WEIGHT,
            shucked_weight: DEFAULT_SHUCKED_WEIGHT,
            viscera_weight: DEFAULT_VISCERA_WEIGHT,
            shell_weight: DEFAULT_SHELL_WEIGHT,
        }
    }
}

/// A predicted ring count and the age estimate derived from it.
#[derive(Clone, Copy, Debug)]
pub struct Prediction {
    pub rings: f64,
}

impl Prediction {
    /// Estimated age in years: rings + 1.5.
    pub fn age(&self) -> f64 {
        self.rings + 1.5
    }
}

/// Error type for a single prediction.
#[derive(Debug)]
pub enum PredictError {
    Encoding(PreprocessingError),
    Model(ModelError),
}

impl fmt::Display for PredictError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredictError::Encoding(e) => write!(f, "encoding failed: {e}"),
            PredictError::Model(e) => write!(f, "prediction failed: {e}"),
        }
    }
}

impl std::error::Error for PredictError {}

impl From<PreprocessingError> for PredictError {
    fn from(e: PreprocessingError) -> Self {
        PredictError::Encoding(e)
    }
}

impl From<ModelError> for PredictError {
    fn from(e: ModelError) -> Self {
        PredictError::Model(e)
    }
}

/// The loaded model/encoder pair, immutable for the process lifetime.
#[derive(Clone, Debug)]
pub struct Predictor {
    model: FittedLinearRegression,
    encoder: FittedOrdinalEncoder,
}

impl Predictor {
    pub fn new(model: FittedLinearRegression, encoder: FittedOrdinalEncoder) -> Self {
        Self { model, encoder }
    }

    /// Load the artifact bundle and rebuild the fitted pair.
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        let (model, encoder) = ModelArtifact::load_from_file(path)?.into_parts()?;
        Ok(Self::new(model, encoder))
    }

    /// Predict the ring count for one specimen.
    ///
    /// The feature vector is assembled in the fixed column order
    /// `{Sex, Length, Diameter, Height, WholeWeight, ShuckedWeight,
    /// VisceraWeight, ShellWeight}`; see [`crate::data::FEATURE_NAMES`].
    pub fn predict(&self, input: &SpecimenInput) -> Result<Prediction, PredictError> {
        let sex_code = self.encoder.encode(input.sex.label())?;
        let features = [
            sex_code,
            input.length,
            input.diameter,
            input.height,
            input.whole_weight,
            input.shucked_weight,
            input.viscera_weight,
            input.shell_weight,
        ];
        let rings = self.model.predict(&features)?;
        Ok(Prediction { rings })
    }
}
