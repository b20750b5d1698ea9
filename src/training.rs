//! The offline training pipeline.
//!
//! Step order follows the batch-job contract: fit the sex encoder, derive a
//! Young/Older balancing label from ring count, oversample the minority
//! group with a fixed seed, drop the label, split train/test, fit OLS,
//! evaluate on the held-out partition, and bundle model + encoder into one
//! artifact. Every error is fatal to the run and no artifact is written on
//! failure.
//!
//! The age-group label and the oversampler are deliberately private to this
//! module: the label is a one-off balancing device, never part of the data
//! model or the fitted model's feature space. Oversampling a regression
//! target through a classification-style resampler is unusual but
//! deliberate; changing it changes the fitted coefficients.

use crate::artifact::{ArtifactError, ModelArtifact};
use crate::data::{AbaloneTable, FEATURE_NAMES};
use crate::metrics::Metrics;
use crate::model::{LinearRegression, ModelError};
use crate::preprocessing::{OrdinalEncoder, PreprocessingError};
use crate::split::{train_test_split, SplitError};
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use std::path::Path;

/// Seed for minority-row duplication.
pub const RESAMPLE_SEED: u64 = 42;
/// Seed for the shuffled train/test split.
pub const SPLIT_SEED: u64 = 42;
/// Fraction of rows held out for evaluation.
pub const TEST_SIZE: f64 = 0.2;

/// Rings strictly above this are labelled Older for balancing.
const OLDER_RING_THRESHOLD: f64 = 12.0;

/// Error type for the training pipeline.
#[derive(Debug)]
pub enum TrainError {
    Preprocessing(PreprocessingError),
    Split(SplitError),
    Model(ModelError),
    Artifact(ArtifactError),
}

impl fmt::Display for TrainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrainError::Preprocessing(e) => write!(f, "preprocessing failed: {e}"),
            TrainError::Split(e) => write!(f, "train/test split failed: {e}"),
            TrainError::Model(e) => write!(f, "model fit failed: {e}"),
            TrainError::Artifact(e) => write!(f, "artifact write failed: {e}"),
        }
    }
}

impl std::error::Error for TrainError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TrainError::Preprocessing(e) => Some(e),
            TrainError::Split(e) => Some(e),
            TrainError::Model(e) => Some(e),
            TrainError::Artifact(e) => Some(e),
        }
    }
}

impl From<PreprocessingError> for TrainError {
    fn from(e: PreprocessingError) -> Self {
        TrainError::Preprocessing(e)
    }
}

impl From<SplitError> for TrainError {
    fn from(e: SplitError) -> Self {
        TrainError::Split(e)
    }
}

impl From<ModelError> for TrainError {
    fn from(e: ModelError) -> Self {
        TrainError::Model(e)
    }
}

impl From<ArtifactError> for TrainError {
    fn from(e: ArtifactError) -> Self {
        TrainError::Artifact(e)
    }
}

/// Evaluation summary of one training run.
#[derive(Debug, Clone, Copy)]
pub struct TrainReport {
    pub r_squared: f64,
    pub mae: f64,
    pub n_train: usize,
    pub n_test: usize,
}

/// Balancing label derived from ring count. Never leaves this module.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AgeGroup {
    Young,
    Older,
}

fn age_group(rings: f64) -> AgeGroup {
    if rings > OLDER_RING_THRESHOLD {
        AgeGroup::Older
    } else {
        AgeGroup::Young
    }
}

/// Equalize the two group counts by appending duplicated minority rows.
///
/// Every original row is kept. Extra rows are drawn uniformly with
/// replacement from the minority group using a seeded RNG, so the result is
/// reproducible. If one group is empty there is nothing to balance and the
/// rows come back unchanged.
fn oversample(rows: &[Vec<f64>], groups: &[AgeGroup], seed: u64) -> Vec<Vec<f64>> {
    debug_assert_eq!(rows.len(), groups.len());

    let young: Vec<usize> = (0..rows.len())
        .filter(|&i| groups[i] == AgeGroup::Young)
        .collect();
    let older: Vec<usize> = (0..rows.len())
        .filter(|&i| groups[i] == AgeGroup::Older)
        .collect();

    let (minority, majority) = if young.len() < older.len() {
        (&young, &older)
    } else {
        (&older, &young)
    };
    if minority.is_empty() || minority.len() == majority.len() {
        return rows.to_vec();
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut out = rows.to_vec();
    for _ in 0..(majority.len() - minority.len()) {
        let pick = minority[rng.random_range(0..minority.len())];
        out.push(rows[pick].clone());
    }
    out
}

/// Run the whole pipeline on a loaded table and write the artifact.
///
/// Returns the held-out evaluation so callers can report it without
/// capturing stdout.
pub fn run(table: &AbaloneTable, artifact_path: &Path) -> Result<TrainReport, TrainError> {
    let n_features = FEATURE_NAMES.len();

    // 1. Fit the encoder on the full raw sex column, then transform it.
    let encoder = OrdinalEncoder::new().fit(table.sex())?;
    let codes = encoder.transform(table.sex())?;

    // 2. Rows carry rings as a trailing column so oversampling duplicates
    // whole records, target included.
    let mut rows: Vec<Vec<f64>> = Vec::with_capacity(table.len());
    for i in 0..table.len() {
        let mut row = Vec::with_capacity(n_features + 1);
        row.push(codes[i]);
        row.extend_from_slice(&table.measurements()[i]);
        row.push(table.rings()[i]);
        rows.push(row);
    }

    // 3. Balance Young/Older, then discard the label for good.
    let groups: Vec<AgeGroup> = table.rings().iter().map(|&r| age_group(r)).collect();
    let balanced = oversample(&rows, &groups, RESAMPLE_SEED);
    info!(
        "oversampled {} records to {} balanced rows",
        rows.len(),
        balanced.len()
    );

    // 4. Features vs target.
    let features: Vec<Vec<f64>> = balanced.iter().map(|r| r[..n_features].to_vec()).collect();
    let target: Vec<f64> = balanced.iter().map(|r| r[n_features]).collect();

    // 5.-7. Split, fit, evaluate.
    let split = train_test_split(&features, &target, TEST_SIZE, SPLIT_SEED)?;
    info!(
        "fitting OLS on {} rows, holding out {}",
        split.x_train.len(),
        split.x_test.len()
    );
    let model = LinearRegression::new().fit(&split.x_train, &split.y_train)?;
    let predictions = model.predict_batch(&split.x_test)?;

    let report = TrainReport {
        r_squared: Metrics::r_squared(&split.y_test, &predictions),
        mae: Metrics::mae(&split.y_test, &predictions),
        n_train: split.x_train.len(),
        n_test: split.x_test.len(),
    };

    // 8. Persist model + encoder as one bundle.
    ModelArtifact::bundle(&model, &encoder).save_to_file(artifact_path)?;

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt::Write;

    #[test]
    fn test_age_group_boundary() {
        assert_eq!(age_group(12.0), AgeGroup::Young);
        assert_eq!(age_group(13.0), AgeGroup::Older);
        assert_eq!(age_group(0.0), AgeGroup::Young);
    }

    fn labelled_rows(young: usize, older: usize) -> (Vec<Vec<f64>>, Vec<AgeGroup>) {
        let mut rows = Vec::new();
        let mut groups = Vec::new();
        for i in 0..young {
            rows.push(vec![i as f64, 5.0]);
            groups.push(AgeGroup::Young);
        }
        for i in 0..older {
            rows.push(vec![(young + i) as f64, 15.0]);
            groups.push(AgeGroup::Older);
        }
        (rows, groups)
    }

    #[test]
    fn test_oversample_equalizes_group_counts() {
        let (rows, groups) = labelled_rows(10, 3);
        let balanced = oversample(&rows, &groups, RESAMPLE_SEED);
        assert_eq!(balanced.len(), 20);

        let older_count = balanced.iter().filter(|r| r[1] == 15.0).count();
        let young_count = balanced.iter().filter(|r| r[1] == 5.0).count();
        assert_eq!(older_count, young_count);
    }

    #[test]
    fn test_oversample_keeps_all_original_rows() {
        let (rows, groups) = labelled_rows(8, 2);
        let balanced = oversample(&rows, &groups, RESAMPLE_SEED);
        for row in &rows {
            assert!(balanced.contains(row));
        }
        // Appended rows are duplicates of existing minority rows.
        for row in &balanced[rows.len()..] {
            assert!(rows.contains(row));
            assert_eq!(row[1], 15.0);
        }
    }

    #[test]
    fn test_oversample_is_seeded() {
        let (rows, groups) = labelled_rows(30, 7);
        let a = oversample(&rows, &groups, RESAMPLE_SEED);
        let b = oversample(&rows, &groups, RESAMPLE_SEED);
        assert_eq!(a, b);
    }

    #[test]
    fn test_oversample_single_group_is_noop() {
        let (rows, groups) = labelled_rows(5, 0);
        let balanced = oversample(&rows, &groups, RESAMPLE_SEED);
        assert_eq!(balanced, rows);
    }

    #[test]
    fn test_oversample_balanced_input_is_noop() {
        let (rows, groups) = labelled_rows(4, 4);
        let balanced = oversample(&rows, &groups, RESAMPLE_SEED);
        assert_eq!(balanced, rows);
    }

    /// Synthetic table with varied measurements so the normal equations stay
    /// well conditioned.
    fn synthetic_table(n: usize) -> AbaloneTable {
        let mut csv = String::new();
        for i in 0..n {
            let sex = ["M", "F", "I"][i % 3];
            writeln!(
                csv,
                "{},{:.3},{:.3},{:.3},{:.3},{:.3},{:.3},{:.3},{}",
                sex,
                0.30 + 0.01 * ((i * i) % 11) as f64,
                0.20 + 0.01 * ((i * i * i) % 13) as f64,
                0.05 + 0.01 * ((i * 7) % 5) as f64,
                0.40 + 0.01 * ((i * i) % 17) as f64,
                0.15 + 0.01 * ((i * 5 + i * i) % 19) as f64,
                0.08 + 0.01 * ((i * 3 + i * i * i) % 23) as f64,
                0.10 + 0.01 * ((i * 11 + i * i) % 29) as f64,
                5 + i % 15,
            )
            .unwrap();
        }
        AbaloneTable::from_reader(csv.as_bytes()).unwrap()
    }

    #[test]
    fn test_run_writes_loadable_artifact() {
        let table = synthetic_table(60);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("abalone_model.bin");

        let report = run(&table, &path).unwrap();
        assert!(report.r_squared.is_finite());
        assert!(report.mae.is_finite());
        assert!(report.mae >= 0.0);
        assert!(report.n_train > report.n_test);

        let (model, encoder) = ModelArtifact::load_from_file(&path)
            .unwrap()
            .into_parts()
            .unwrap();
        assert_eq!(model.n_features(), FEATURE_NAMES.len());
        assert_eq!(encoder.categories(), &["F", "I", "M"]);
    }

    #[test]
    fn test_run_is_reproducible() {
        let table = synthetic_table(60);
        let dir = tempfile::tempdir().unwrap();
        let path_a = dir.path().join("a.bin");
        let path_b = dir.path().join("b.bin");

        let a = run(&table, &path_a).unwrap();
        let b = run(&table, &path_b).unwrap();
        assert_eq!(a.r_squared, b.r_squared);
        assert_eq!(a.mae, b.mae);

        let bytes_a = std::fs::read(&path_a).unwrap();
        let bytes_b = std::fs::read(&path_b).unwrap();
        assert_eq!(bytes_a, bytes_b);
    }
}
