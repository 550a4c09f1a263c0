// Command-line entry point: turn a folder of documents into notes

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};
use colored::Colorize;
use docnotes::ai::{OpenAIClassifier, OpenAIFormatter, OpenAIRequestResolver};
use docnotes::{
    Classifier, Config, ExtensionClassifier, ExtractorRegistry, FileOutcome, Pipeline,
    PipelineConfig, PipelineRequest, RequestResolver, RunReport, SkipReason,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "docnotes", version, about = "Turn PDFs, images and voice memos into markdown notes")]
#[command(group(ArgGroup::new("source").required(true).args(["request", "input_dir"])))]
struct Cli {
    /// What to process, in plain words, e.g. "make notes from ~/Downloads/meeting"
    #[arg(num_args = 1..)]
    request: Vec<String>,

    /// Process this directory directly instead of interpreting a request
    #[arg(short, long)]
    input_dir: Option<PathBuf>,

    /// Write notes here instead of next to each input file
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Chat model for classification, formatting and request resolution
    #[arg(long, env = "DOCNOTES_MODEL")]
    model: Option<String>,

    /// Pick extractors by file extension instead of asking the model
    #[arg(long)]
    local_classifier: bool,

    /// Stop at the first file that fails
    #[arg(long)]
    fail_fast: bool,

    /// Reject notes that do not follow the template exactly
    #[arg(long)]
    strict_template: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,docnotes=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_env().context("Failed to load configuration")?;
    if let Some(model) = cli.model.clone() {
        config.model = model;
    }
    let client = config.openai_client()?;

    let request = match &cli.input_dir {
        Some(dir) => PipelineRequest::new(dir),
        None => {
            let instruction = cli.request.join(" ");
            OpenAIRequestResolver::new(client.clone())
                .with_model(&config.model)
                .resolve(&instruction)
                .await
                .with_context(|| format!("Failed to resolve request '{}'", instruction))?
        }
    };

    let classifier: Box<dyn Classifier> = if cli.local_classifier {
        Box::new(ExtensionClassifier::new())
    } else {
        Box::new(OpenAIClassifier::new(client.clone()).with_model(&config.model))
    };

    let mut pipeline_config = PipelineConfig::new();
    if let Some(dir) = &cli.output_dir {
        pipeline_config = pipeline_config.with_output_dir(dir);
    }
    if cli.fail_fast {
        pipeline_config = pipeline_config.fail_fast();
    }
    if cli.strict_template {
        pipeline_config = pipeline_config.strict_template();
    }

    let pipeline = Pipeline::new(
        classifier,
        ExtractorRegistry::with_defaults(client.clone(), &config.extractor_settings()),
        OpenAIFormatter::new(client).with_model(&config.model),
    )
    .with_config(pipeline_config);

    let report = pipeline
        .run(request.input_dir())
        .await
        .with_context(|| format!("Run over {} failed", request.input_dir().display()))?;

    print_summary(&report);
    Ok(())
}

fn print_summary(report: &RunReport) {
    println!();
    for (path, outcome) in &report.outcomes {
        let name = path.display();
        match outcome {
            FileOutcome::Written { format, output } => {
                println!("{} {} ({}) → {}", "saved".green(), name, format, output.display())
            }
            FileOutcome::Unclassified => println!("{} {} (no tool chosen)", "skip".yellow(), name),
            FileOutcome::Skipped(SkipReason::UnsupportedExtension(_)) => {
                println!("{} {} (file type not supported)", "skip".yellow(), name)
            }
            FileOutcome::Skipped(SkipReason::Directory) => {
                println!("{} {} (directory)", "skip".yellow(), name)
            }
        }
    }
    for failure in &report.failures {
        println!("{} {}: {}", "fail".red(), failure.path.display(), failure.error);
    }

    println!(
        "\n{} written, {} skipped, {} unclassified, {} failed",
        report.written_count(),
        report.skipped_count(),
        report.unclassified_count(),
        report.failures.len()
    );
}
