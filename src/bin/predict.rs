//! Interactive prediction form.
//!
//! Loads the artifact once per process and then serves any number of
//! sequential predictions. A missing or malformed artifact degrades the
//! form: every interaction reports the problem instead of predicting, and
//! the process keeps running.

use abalone_age::service::{
    DEFAULT_DIAMETER, DEFAULT_HEIGHT, DEFAULT_LENGTH, DEFAULT_SEX, DEFAULT_SHELL_WEIGHT,
    DEFAULT_SHUCKED_WEIGHT, DEFAULT_VISCERA_WEIGHT, DEFAULT_WHOLE_WEIGHT,
};
use abalone_age::{Predictor, Sex, SpecimenInput, ARTIFACT_PATH};
use log::warn;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::OnceLock;

/// Load-once handle. The artifact is read on first access and never again
/// for the lifetime of the process, loaded or not.
static PREDICTOR: OnceLock<Option<Predictor>> = OnceLock::new();

fn predictor() -> Option<&'static Predictor> {
    PREDICTOR
        .get_or_init(|| match Predictor::load(Path::new(ARTIFACT_PATH)) {
            Ok(p) => Some(p),
            Err(e) => {
                warn!("artifact load failed: {e}");
                None
            }
        })
        .as_ref()
}

fn main() -> io::Result<()> {
    env_logger::init();

    println!("Abalone Age Prediction");
    println!("Enter the abalone measurements below to predict its age.");
    println!();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        let Some(predictor) = predictor() else {
            println!(
                "Error: '{ARTIFACT_PATH}' not found. Please run the training job first."
            );
            if !another_round(&mut lines)? {
                break;
            }
            continue;
        };

        let Some(input) = read_form(&mut lines)? else {
            break;
        };

        match predictor.predict(&input) {
            Ok(prediction) => {
                println!();
                println!("Predicted Rings: {:.2}", prediction.rings);
                println!("Estimated Age: {:.1} years", prediction.age());
            }
            Err(e) => println!("Prediction failed: {e}"),
        }

        if !another_round(&mut lines)? {
            break;
        }
        println!();
    }

    Ok(())
}

type Lines<'a> = io::Lines<io::StdinLock<'a>>;

/// Next line from stdin, `None` on EOF.
fn next_line(lines: &mut Lines) -> io::Result<Option<String>> {
    match lines.next() {
        Some(line) => Ok(Some(line?)),
        None => Ok(None),
    }
}

/// Collect the full form. `None` means the input stream ended.
fn read_form(lines: &mut Lines) -> io::Result<Option<SpecimenInput>> {
    macro_rules! field {
        ($e:expr) => {
            match $e? {
                Some(v) => v,
                None => return Ok(None),
            }
        };
    }

    Ok(Some(SpecimenInput {
        sex: field!(prompt_sex(lines)),
        length: field!(prompt_f64(lines, "Length (mm)", DEFAULT_LENGTH)),
        diameter: field!(prompt_f64(lines, "Diameter (mm)", DEFAULT_DIAMETER)),
        height: field!(prompt_f64(lines, "Height (mm)", DEFAULT_HEIGHT)),
        whole_weight: field!(prompt_f64(lines, "Whole Weight (g)", DEFAULT_WHOLE_WEIGHT)),
        shucked_weight: field!(prompt_f64(
            lines,
            "Shucked Weight (g)",
            DEFAULT_SHUCKED_WEIGHT
        )),
        viscera_weight: field!(prompt_f64(
            lines,
            "Viscera Weight (g)",
            DEFAULT_VISCERA_WEIGHT
        )),
        shell_weight: field!(prompt_f64(lines, "Shell Weight (g)", DEFAULT_SHELL_WEIGHT)),
    }))
}

/// Three-option selector; empty input takes the default.
fn prompt_sex(lines: &mut Lines) -> io::Result<Option<Sex>> {
    loop {
        print!("Sex [M/F/I] (default {DEFAULT_SEX}): ");
        io::stdout().flush()?;
        let Some(line) = next_line(lines)? else {
            return Ok(None);
        };
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(Some(DEFAULT_SEX));
        }
        match trimmed.parse::<Sex>() {
            Ok(sex) => return Ok(Some(sex)),
            Err(_) => println!("Please enter M, F or I."),
        }
    }
}

/// Numeric input; empty takes the default, unparsable re-prompts.
fn prompt_f64(lines: &mut Lines, label: &str, default: f64) -> io::Result<Option<f64>> {
    loop {
        print!("{label} (default {default}): ");
        io::stdout().flush()?;
        let Some(line) = next_line(lines)? else {
            return Ok(None);
        };
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(Some(default));
        }
        match trimmed.parse::<f64>() {
            Ok(value) => return Ok(Some(value)),
            Err(_) => println!("Please enter a number."),
        }
    }
}

/// Returns false when the user wants to quit or stdin is closed.
fn another_round(lines: &mut Lines) -> io::Result<bool> {
    print!("Press Enter for another prediction, or 'q' to quit: ");
    io::stdout().flush()?;
    match next_line(lines)? {
        Some(line) => Ok(!line.trim().eq_ignore_ascii_case("q")),
        None => Ok(false),
    }
}
