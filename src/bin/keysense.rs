//! Keysense CLI - Command-line interface for the typing-session feature engine
//!
//! Commands:
//! - score: Derive the feature vector for one typing session
//! - features: Re-derive features for a stored session CSV (batch mode)
//! - sentence: Print reference sentences to type
//! - schema: Print the classifier feature column order

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use keysense::pipeline::{DifficultySource, SessionProcessor};
use keysense::store::{read_session_rows, write_feature_rows, FeatureRow};
use keysense::types::{FeatureVector, RawSessionInput, StressLabel};
use keysense::{SentencePicker, DEFAULT_SENTENCES, KEYSENSE_VERSION};

/// Keysense - Typing-session feature engine for keystroke-based stress inference
#[derive(Parser)]
#[command(name = "keysense")]
#[command(version = KEYSENSE_VERSION)]
#[command(about = "Turn typing sessions into stress-classifier feature vectors", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Derive the feature vector for one typing session
    Score {
        /// The sentence the user was asked to type
        #[arg(long)]
        reference: String,

        /// What the user actually typed
        #[arg(long)]
        typed: String,

        /// Elapsed seconds between start and submit
        #[arg(long)]
        time_taken: f64,

        /// Self-reported sleep hours (lenient: empty or unparsable means 0.0)
        #[arg(long, default_value = "")]
        sleep: String,

        /// Self-reported stress level (0 = Calm, 1 = Normal, 2 = Stressed)
        #[arg(long)]
        stress: Option<i64>,

        /// Print the full session record instead of only the feature vector
        #[arg(long)]
        full: bool,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Re-derive features for a stored session CSV (batch mode)
    Features {
        /// Input session CSV path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output feature CSV path (use - for stdout)
        #[arg(short, long)]
        output: PathBuf,

        /// Source for the difficulty_score column
        #[arg(long, default_value = "recomputed")]
        difficulty: DifficultyArg,
    },

    /// Print reference sentences to type
    Sentence {
        /// How many sentences to print (no immediate repeats)
        #[arg(long, default_value = "1")]
        count: usize,
    },

    /// Print the classifier feature column order
    Schema {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum DifficultyArg {
    /// Recompute from stored text (canonical)
    Recomputed,
    /// Copy the logged backspace_estimate column (parity with old batch output)
    Logged,
}

impl From<DifficultyArg> for DifficultySource {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Recomputed => DifficultySource::Recomputed,
            DifficultyArg::Logged => DifficultySource::LoggedEstimate,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), KeysenseCliError> {
    match cli.command {
        Commands::Score {
            reference,
            typed,
            time_taken,
            sleep,
            stress,
            full,
            pretty,
        } => cmd_score(reference, typed, time_taken, sleep, stress, full, pretty),

        Commands::Features {
            input,
            output,
            difficulty,
        } => cmd_features(&input, &output, difficulty.into()),

        Commands::Sentence { count } => cmd_sentence(count),

        Commands::Schema { json } => cmd_schema(json),
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_score(
    reference: String,
    typed: String,
    time_taken: f64,
    sleep: String,
    stress: Option<i64>,
    full: bool,
    pretty: bool,
) -> Result<(), KeysenseCliError> {
    let self_stress_level = stress.map(StressLabel::try_from).transpose()?;

    let raw = RawSessionInput {
        reference_text: reference,
        typed_text: typed,
        time_taken_sec: time_taken,
        sleep_hours_raw: sleep,
        self_stress_level,
    };

    let record = SessionProcessor::new().build(raw);

    let json = if full {
        to_json(&record, pretty)?
    } else {
        to_json(&record.features, pretty)?
    };
    println!("{json}");
    Ok(())
}

fn cmd_features(
    input: &Path,
    output: &Path,
    difficulty: DifficultySource,
) -> Result<(), KeysenseCliError> {
    let input_data = if input.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(input)?
    };

    let rows = read_session_rows(input_data.as_bytes())?;
    if rows.is_empty() {
        return Err(KeysenseCliError::NoSessions);
    }

    let processor = SessionProcessor::with_difficulty_source(difficulty);
    let mut feature_rows = Vec::with_capacity(rows.len());
    for row in &rows {
        let record = processor.rederive_row(row)?;
        feature_rows.push(FeatureRow::from_session(row, &record));
    }

    let mut out = Vec::new();
    write_feature_rows(&mut out, &feature_rows)?;

    if output.to_string_lossy() == "-" {
        io::stdout().write_all(&out)?;
    } else {
        fs::write(output, out)?;
    }
    Ok(())
}

fn cmd_sentence(count: usize) -> Result<(), KeysenseCliError> {
    let mut picker = SentencePicker::new();
    let mut rng = rand::thread_rng();
    for _ in 0..count {
        if let Some(sentence) = picker.pick(&DEFAULT_SENTENCES, &mut rng) {
            println!("{sentence}");
        }
    }
    Ok(())
}

fn cmd_schema(json: bool) -> Result<(), KeysenseCliError> {
    if json {
        println!("{}", serde_json::to_string(&FeatureVector::COLUMNS)?);
    } else {
        for column in FeatureVector::COLUMNS {
            println!("{column}");
        }
    }
    Ok(())
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<String, KeysenseCliError> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

enum KeysenseCliError {
    Io(io::Error),
    Feature(keysense::FeatureError),
    Json(serde_json::Error),
    NoSessions,
}

impl From<io::Error> for KeysenseCliError {
    fn from(e: io::Error) -> Self {
        KeysenseCliError::Io(e)
    }
}

impl From<keysense::FeatureError> for KeysenseCliError {
    fn from(e: keysense::FeatureError) -> Self {
        KeysenseCliError::Feature(e)
    }
}

impl From<serde_json::Error> for KeysenseCliError {
    fn from(e: serde_json::Error) -> Self {
        KeysenseCliError::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<KeysenseCliError> for CliError {
    fn from(e: KeysenseCliError) -> Self {
        match e {
            KeysenseCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            KeysenseCliError::Feature(e) => CliError {
                code: "FEATURE_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check that stored rows match the session schema".to_string()),
            },
            KeysenseCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check JSON syntax".to_string()),
            },
            KeysenseCliError::NoSessions => CliError {
                code: "NO_SESSIONS".to_string(),
                message: "No session rows found in input".to_string(),
                hint: Some("Ensure the input CSV has a header and at least one row".to_string()),
            },
        }
    }
}
