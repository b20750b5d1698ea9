//! Seeded, shuffled train/test partitioning.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::fmt;

/// Error type for train/test splitting.
#[derive(Debug)]
pub enum SplitError {
    /// Feature and target lengths disagree.
    LengthMismatch { x: usize, y: usize },
    /// `test_size` outside the open interval (0, 1).
    BadTestSize(f64),
    /// Too few samples to populate both partitions.
    TooFewSamples(usize),
}

impl fmt::Display for SplitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SplitError::LengthMismatch { x, y } => {
                write!(f, "features have {x} rows but target has {y}")
            }
            SplitError::BadTestSize(v) => {
                write!(f, "test_size must be in (0, 1), got {v}")
            }
            SplitError::TooFewSamples(n) => {
                write!(f, "cannot split {n} samples into non-empty partitions")
            }
        }
    }
}

impl std::error::Error for SplitError {}

/// The four partitions produced by [`train_test_split`].
#[derive(Debug, Clone)]
pub struct Split {
    pub x_train: Vec<Vec<f64>>,
    pub x_test: Vec<Vec<f64>>,
    pub y_train: Vec<f64>,
    pub y_test: Vec<f64>,
}

/// Shuffle rows with a seeded RNG and split off a test fraction.
///
/// The test partition holds `ceil(n * test_size)` rows. The same inputs and
/// seed always produce identical partitions.
///
/// # Errors
/// See [`SplitError`].
pub fn train_test_split(
    x: &[Vec<f64>],
    y: &[f64],
    test_size: f64,
    seed: u64,
) -> Result<Split, SplitError> {
    if x.len() != y.len() {
        return Err(SplitError::LengthMismatch {
            x: x.len(),
            y: y.len(),
        });
    }
    if !(0.0..=1.0).contains(&test_size) || test_size == 0.0 || test_size == 1.0 {
        return Err(SplitError::BadTestSize(test_size));
    }

    let n = x.len();
    let n_test = (n as f64 * test_size).ceil() as usize;
    if n_test == 0 || n_test >= n {
        return Err(SplitError::TooFewSamples(n));
    }

    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let (test_idx, train_idx) = indices.split_at(n_test);

    Ok(Split {
        x_train: train_idx.iter().map(|&i| x[i].clone()).collect(),
        x_test: test_idx.iter().map(|&i| x[i].clone()).collect(),
        y_train: train_idx.iter().map(|&i| y[i]).collect(),
        y_test: test_idx.iter().map(|&i| y[i]).collect(),
    })
}
