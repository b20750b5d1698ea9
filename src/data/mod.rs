//! Abalone dataset access: record schema, CSV parsing and the one-time fetch.
//!
//! The UCI abalone file is a headerless CSV with nine columns:
//! `Sex,Length,Diameter,Height,WholeWeight,ShuckedWeight,VisceraWeight,ShellWeight,Rings`.
//! [`AbaloneTable`] stores the raw columns; encoding the `Sex` column into a
//! numeric feature is the job of the preprocessing module, not the loader.

pub mod fetch;

use std::fmt;
use std::io::Read;
use std::str::FromStr;

/// Feature column order shared by training and inference.
///
/// The fitted model's weight vector is indexed by this order; assembling an
/// input row in any other order produces garbage predictions.
pub const FEATURE_NAMES: [&str; 8] = [
    "Sex",
    "Length",
    "Diameter",
    "Height",
    "WholeWeight",
    "ShuckedWeight",
    "VisceraWeight",
    "ShellWeight",
];

/// Number of measurement columns (everything except `Sex` and `Rings`).
pub const N_MEASUREMENTS: usize = 7;

/// Error type for dataset loading and parsing.
#[derive(Debug)]
pub enum DataError {
    /// The dataset could not be fetched from the remote source.
    Fetch(String),
    /// The CSV reader failed (I/O or framing).
    Csv(String),
    /// A record had the wrong shape or an unparsable field.
    Parse { record: usize, message: String },
    /// The source contained no records.
    Empty,
    /// Local file I/O failed (cache read or write).
    Io(String),
    /// A sex label outside {M, F, I}.
    UnknownSex(String),
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataError::Fetch(msg) => write!(f, "dataset fetch failed: {msg}"),
            DataError::Csv(msg) => write!(f, "csv error: {msg}"),
            DataError::Parse { record, message } => {
                write!(f, "record {record}: {message}")
            }
            DataError::Empty => write!(f, "dataset contains no records"),
            DataError::Io(msg) => write!(f, "i/o error: {msg}"),
            DataError::UnknownSex(label) => {
                write!(f, "unknown sex label {label:?}, expected M, F or I")
            }
        }
    }
}

impl std::error::Error for DataError {}

impl From<csv::Error> for DataError {
    fn from(err: csv::Error) -> Self {
        DataError::Csv(err.to_string())
    }
}

impl From<std::io::Error> for DataError {
    fn from(err: std::io::Error) -> Self {
        DataError::Io(err.to_string())
    }
}

/// Sex of a specimen. Wire labels are the single letters used by the UCI file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sex {
    Female,
    Infant,
    Male,
}

impl Sex {
    /// The single-letter label as it appears in the dataset.
    pub fn label(&self) -> &'static str {
        match self {
            Sex::Female => "F",
            Sex::Infant => "I",
            Sex::Male => "M",
        }
    }
}

impl FromStr for Sex {
    type Err = DataError;

    /// Accepts the dataset letter or the full word, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "m" | "male" => Ok(Sex::Male),
            "f" | "female" => Ok(Sex::Female),
            "i" | "infant" => Ok(Sex::Infant),
            other => Err(DataError::UnknownSex(other.to_string())),
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Column store for raw abalone records.
///
/// `sex` holds the unencoded category labels; `measurements` holds the seven
/// numeric columns per row in [`FEATURE_NAMES`] order (minus `Sex`); `rings`
/// is the regression target.
#[derive(Debug, Clone)]
pub struct AbaloneTable {
    sex: Vec<String>,
    measurements: Vec<[f64; N_MEASUREMENTS]>,
    rings: Vec<f64>,
}

impl AbaloneTable {
    /// Parse the headerless UCI CSV from any reader.
    ///
    /// # Errors
    /// Returns [`DataError::Parse`] on a short record or unparsable numeric
    /// field, and [`DataError::Empty`] when the source has no records.
    /// Any malformed row aborts the load; the training job treats that as
    /// fatal and writes no artifact.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DataError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut sex = Vec::new();
        let mut measurements = Vec::new();
        let mut rings = Vec::new();

        for (idx, result) in rdr.records().enumerate() {
            let record = result?;
            if record.len() != 9 {
                return Err(DataError::Parse {
                    record: idx,
                    message: format!("expected 9 fields, got {}", record.len()),
                });
            }

            let label: Sex = record[0].parse()?;
            sex.push(label.label().to_string());

            let mut row = [0.0f64; N_MEASUREMENTS];
            for (col, slot) in row.iter_mut().enumerate() {
                let field = &record[col + 1];
                *slot = field.parse().map_err(|_| DataError::Parse {
                    record: idx,
                    message: format!(
                        "field {:?} is not a number for column {}",
                        field,
                        FEATURE_NAMES[col + 1]
                    ),
                })?;
            }
            measurements.push(row);

            let target = &record[8];
            rings.push(target.parse().map_err(|_| DataError::Parse {
                record: idx,
                message: format!("ring count {target:?} is not a number"),
            })?);
        }

        if sex.is_empty() {
            return Err(DataError::Empty);
        }

        Ok(Self {
            sex,
            measurements,
            rings,
        })
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.rings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rings.is_empty()
    }

    /// Raw sex labels, one per record.
    pub fn sex(&self) -> &[String] {
        &self.sex
    }

    /// The seven numeric measurement columns per record.
    pub fn measurements(&self) -> &[[f64; N_MEASUREMENTS]] {
        &self.measurements
    }

    /// Ring counts (regression target).
    pub fn rings(&self) -> &[f64] {
        &self.rings
    }
}
