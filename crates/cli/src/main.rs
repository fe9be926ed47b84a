//! Complaint triage command-line entry point
//!
//! Configuration priority: env vars > config/{env}.yaml > config/default.yaml > defaults.
//! Logs go to stderr so that JSON output on stdout stays machine-readable.

mod mock;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{Read, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use complaint_triage_config::{load_settings, Settings};
use complaint_triage_core::{ClassificationResult, ComplaintRecord, IncomingComplaint};
use complaint_triage_text_processing::{ComplaintClassifier, ComplaintPipeline, KeywordClassifier};

/// Environment variable selecting `config/{env}`
const ENV_VAR: &str = "COMPLAINT_TRIAGE_ENV";

/// Rule-based customer complaint triage
#[derive(Parser)]
#[command(name = "complaint-triage", version)]
#[command(about = "Classify complaints, extract key information and score severity")]
struct Cli {
    /// Taxonomy file (JSON or YAML), overrides the configured one
    #[arg(long, global = true)]
    taxonomy: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a single complaint text and print its record
    Classify {
        /// Complaint text
        text: String,

        /// Include classification method and keyword scores
        #[arg(long)]
        explain: bool,
    },
    /// Process a JSON array of complaints
    Process {
        /// Input file, or `-` for stdin
        #[arg(short, long, default_value = "-")]
        input: String,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Generate mock complaints as a JSON array
    Generate {
        /// Number of complaints
        #[arg(short, long, default_value_t = 20)]
        count: usize,

        /// RNG seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let env = std::env::var(ENV_VAR).ok();
    let mut settings = match load_settings(env.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            // Tracing not yet initialized
            eprintln!("Warning: Failed to load config: {}. Using defaults.", e);
            Settings::default()
        }
    };
    if let Some(path) = cli.taxonomy.clone() {
        settings.taxonomy_path = Some(path);
    }

    init_tracing(&settings);
    tracing::debug!(
        environment = env.as_deref().unwrap_or("default"),
        taxonomy = ?settings.taxonomy_path,
        "Configuration loaded"
    );

    match cli.command {
        Commands::Classify { text, explain } => classify(&settings, &text, explain).await,
        Commands::Process { input, output } => process(&settings, &input, output).await,
        Commands::Generate {
            count,
            seed,
            output,
        } => generate(count, seed, output),
    }
}

fn init_tracing(settings: &Settings) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = &settings.observability.log_level;
        format!("complaint_triage={}", level).into()
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);
    let fmt_layer = if settings.observability.log_json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .boxed()
    };
    subscriber.with(fmt_layer).init();
}

fn build_classifier(settings: &Settings) -> Result<ComplaintClassifier> {
    ComplaintClassifier::from_settings(settings, None).context("Failed to build classifier")
}

async fn classify(settings: &Settings, text: &str, explain: bool) -> Result<()> {
    let engine = build_classifier(settings)?;

    let value = if explain {
        explain_classification(&engine, text).await
    } else {
        serde_json::to_value(engine.process(text).await)?
    };

    write_json(&value, None)
}

/// Record plus how it was classified, from a single classification call
async fn explain_classification(engine: &ComplaintClassifier, text: &str) -> serde_json::Value {
    let outcome = engine.classify_detailed(text).await;
    let record = ComplaintRecord::new(
        ClassificationResult::new(outcome.category.clone()),
        engine.extract_key_info(text),
    );
    let scores = KeywordClassifier::new().score(text, &engine.taxonomy());

    serde_json::json!({
        "record": record,
        "method": outcome.method,
        "confidence": outcome.confidence,
        "scores": scores,
    })
}

async fn process(settings: &Settings, input: &str, output: Option<PathBuf>) -> Result<()> {
    let raw = read_input(input)?;
    let complaints: Vec<IncomingComplaint> =
        serde_json::from_str(&raw).context("Input must be a JSON array of complaints")?;
    tracing::info!(count = complaints.len(), input, "Loaded complaints");

    let pipeline = ComplaintPipeline::new(Arc::new(build_classifier(settings)?));
    let processed = pipeline.process_batch(complaints).await;

    write_json(&processed, output)
}

fn generate(count: usize, seed: Option<u64>, output: Option<PathBuf>) -> Result<()> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let complaints = mock::generate_complaints(count, &mut rng, chrono::Utc::now());
    tracing::info!(count, "Generated mock complaints");

    write_json(&complaints, output)
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(input).with_context(|| format!("Failed to read {}", input))
    }
}

fn write_json<T: serde::Serialize + ?Sized>(value: &T, output: Option<PathBuf>) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    match output {
        Some(path) => {
            std::fs::write(&path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "Wrote output");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", json)?;
        }
    }
    Ok(())
}
