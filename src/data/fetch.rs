//! One-time dataset fetch by fixed UCI identifier.
//!
//! The training job downloads the raw `abalone.data` CSV once and keeps a
//! copy on disk next to the artifact, so re-runs work offline. Delete the
//! cached file to force a fresh download.

use std::fs;
use std::path::Path;

use log::info;

use super::{AbaloneTable, DataError};

/// UCI ML repository dataset #1 (Abalone), raw CSV form.
pub const DATASET_URL: &str =
    "https://archive.ics.uci.edu/ml/machine-learning-databases/abalone/abalone.data";

/// Local cache of the downloaded CSV.
pub const CACHE_PATH: &str = "abalone.data";

impl From<reqwest::Error> for DataError {
    fn from(err: reqwest::Error) -> Self {
        DataError::Fetch(err.to_string())
    }
}

/// Load the abalone dataset, downloading it on first use.
///
/// # Errors
/// Any failure here (network, HTTP status, malformed CSV) is returned as a
/// [`DataError`]; the training job aborts on it without writing an artifact.
pub fn fetch_abalone() -> Result<AbaloneTable, DataError> {
    fetch_abalone_cached(Path::new(CACHE_PATH))
}

/// Same as [`fetch_abalone`] with an explicit cache location.
pub fn fetch_abalone_cached(cache: &Path) -> Result<AbaloneTable, DataError> {
    if cache.exists() {
        info!("loading cached dataset from {}", cache.display());
        let file = fs::File::open(cache)?;
        return AbaloneTable::from_reader(file);
    }

    info!("fetching dataset from {DATASET_URL}");
    let body = download(DATASET_URL)?;
    fs::write(cache, &body)?;
    AbaloneTable::from_reader(body.as_bytes())
}

/// Download a URL body as text, treating non-2xx statuses as fetch failures.
fn download(url: &str) -> Result<String, DataError> {
    let response = reqwest::blocking::get(url)?.error_for_status()?;
    Ok(response.text()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cached_file_is_used() {
        let dir = tempfile::tempdir().unwrap();
        let cache = dir.path().join("abalone.data");
        fs::write(
            &cache,
            "M,0.455,0.365,0.095,0.514,0.2245,0.101,0.15,15\n",
        )
        .unwrap();

        let table = fetch_abalone_cached(&cache).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.sex(), &["M"]);
    }

    #[test]
    fn test_corrupt_cache_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let cache = dir.path().join("abalone.data");
        fs::write(&cache, "not,a,valid,row\n").unwrap();

        assert!(fetch_abalone_cached(&cache).is_err());
    }
}
