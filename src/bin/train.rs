//! Offline training entry point.
//!
//! Runs once, under human supervision: fetches the dataset, trains the
//! model, prints the held-out evaluation and writes the artifact the
//! prediction form loads. Any failure aborts the job with a nonzero exit
//! and no artifact is written.

use abalone_age::data::fetch;
use abalone_age::{training, ARTIFACT_PATH};
use log::info;
use std::error::Error;
use std::path::Path;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    println!("Fetching data...");
    let table = fetch::fetch_abalone()?;
    info!("loaded {} records", table.len());

    let report = training::run(&table, Path::new(ARTIFACT_PATH))?;
    info!(
        "trained on {} rows, evaluated on {}",
        report.n_train, report.n_test
    );

    println!("R2 Score: {:.4}", report.r_squared);
    println!("Mean Absolute Error: {:.4}", report.mae);
    println!("Model and encoder saved successfully as {ARTIFACT_PATH}");

    Ok(())
}
