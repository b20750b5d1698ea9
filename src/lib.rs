//! # abalone-age
//!
//! Predicts the age of an abalone specimen (via ring count) from eight
//! physical measurements, using an ordinal-encoded sex feature and an
//! ordinary least-squares linear regression fitted on the UCI Abalone
//! dataset.
//!
//! Two binaries share this library and communicate only through a single
//! serialized artifact file:
//!
//! - `train` — offline batch pipeline: fetch → encode → balance → split →
//!   fit → evaluate → write `abalone_model.bin`.
//! - `predict` — interactive form: load the artifact once, then answer any
//!   number of predictions in one session.
//!
//! ## Core Design Principles
//!
//! - **Fitted/unfitted separation**: the encoder and the model each have a
//!   stateless entry point and a fitted, serializable result type;
//!   prediction code can only exist on the fitted side.
//! - **Co-serialized pairing**: the fitted model and the fitted encoder are
//!   persisted as one [`artifact::ModelArtifact`] so they can never drift
//!   apart between training and serving.
//! - **Deterministic training**: all sampling and shuffling is seeded, so a
//!   rerun over the same data reproduces the same artifact byte for byte.
//!
//! ## Module Structure
//!
//! - `data` — record schema, CSV parsing, one-time dataset fetch
//! - `preprocessing` — ordinal encoding of the categorical sex column
//! - `split` — seeded train/test partitioning
//! - `model` — OLS linear regression (fit, predict, serializable params)
//! - `metrics` — regression evaluation (R², MAE, MSE, RMSE)
//! - `training` — the end-to-end pipeline and its report
//! - `artifact` — the bundled model+encoder file format
//! - `service` — per-request prediction on top of a loaded artifact

pub mod artifact;
pub mod data;
pub mod metrics;
pub mod model;
pub mod preprocessing;
pub mod service;
pub mod split;
pub mod training;

pub use artifact::{ArtifactError, ModelArtifact, ARTIFACT_PATH};
pub use data::{AbaloneTable, Sex};
pub use service::{Prediction, Predictor, SpecimenInput};
