use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use callqa::{
    analyze_batch, call_id_for, list_transcript_files, read_transcript_file, render_report,
    write_result_json, Analyzer, AnalyzerConfig, BatchFailure, BatchReport, CallInput, Provider,
};

#[derive(Parser)]
#[command(name = "callqa")]
#[command(author, version, about = "QA analysis of customer-service call transcripts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum ProviderArg {
    Openai,
    Anthropic,
}

impl From<ProviderArg> for Provider {
    fn from(arg: ProviderArg) -> Self {
        match arg {
            ProviderArg::Openai => Provider::OpenAi,
            ProviderArg::Anthropic => Provider::Anthropic,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a single call transcript
    Analyze {
        /// Transcript file (speaker-labelled text or JSON utterance array)
        #[arg(short, long)]
        input: PathBuf,

        /// Call identifier (defaults to the file name)
        #[arg(long)]
        call_id: Option<String>,

        /// Write the analysis as JSON to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Model API provider
        #[arg(long, value_enum, default_value = "openai")]
        provider: ProviderArg,

        /// Model name (defaults to the provider's default)
        #[arg(long)]
        model: Option<String>,

        /// Skip the model and use keyword heuristics only
        #[arg(long)]
        heuristics_only: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Analyze every transcript in a directory
    Batch {
        /// Directory of .txt / .json transcripts
        #[arg(short, long)]
        dir: PathBuf,

        /// Output file for the batch report (JSON)
        #[arg(short, long)]
        output: PathBuf,

        /// Calls analyzed concurrently
        #[arg(long, default_value = "4")]
        workers: usize,

        /// Model API provider
        #[arg(long, value_enum, default_value = "openai")]
        provider: ProviderArg,

        /// Model name (defaults to the provider's default)
        #[arg(long)]
        model: Option<String>,

        /// Skip the model and use keyword heuristics only
        #[arg(long)]
        heuristics_only: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            input,
            call_id,
            output,
            provider,
            model,
            heuristics_only,
            verbose,
        } => {
            setup_logging(verbose);
            let analyzer = build_analyzer(provider.into(), model, heuristics_only);
            analyze_one(&analyzer, input, call_id, output).await
        }
        Commands::Batch {
            dir,
            output,
            workers,
            provider,
            model,
            heuristics_only,
            verbose,
        } => {
            setup_logging(verbose);
            let analyzer = build_analyzer(provider.into(), model, heuristics_only);
            analyze_dir(&analyzer, dir, output, workers).await
        }
    }
}

fn setup_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn build_analyzer(provider: Provider, model: Option<String>, heuristics_only: bool) -> Analyzer {
    let mut config = AnalyzerConfig::from_env(provider, model);
    if heuristics_only {
        config.force_heuristic = true;
    }
    Analyzer::new(config)
}

async fn analyze_one(
    analyzer: &Analyzer,
    input: PathBuf,
    call_id: Option<String>,
    output: Option<PathBuf>,
) -> Result<()> {
    info!("Loading transcript from {:?}", input);
    let transcript = read_transcript_file(&input).context("Failed to load input transcript")?;
    let call_id = call_id.unwrap_or_else(|| call_id_for(&input));

    let result = analyzer
        .analyze_transcript(&call_id, &transcript)
        .await
        .with_context(|| format!("Failed to analyze {:?}", input))?;

    print!("{}", render_report(&result));

    if let Some(path) = output {
        write_result_json(&result, &path)?;
        info!("Analysis written to {:?}", path);
    }

    Ok(())
}

async fn analyze_dir(
    analyzer: &Analyzer,
    dir: PathBuf,
    output: PathBuf,
    workers: usize,
) -> Result<()> {
    let files = list_transcript_files(&dir)?;
    info!("Found {} transcripts in {:?}", files.len(), dir);

    let mut inputs = Vec::with_capacity(files.len());
    let mut failures = Vec::new();

    for path in &files {
        let call_id = call_id_for(path);
        match read_transcript_file(path) {
            Ok(transcript) => inputs.push(CallInput {
                call_id,
                transcript,
            }),
            Err(e) => {
                warn!("Skipping {:?}: {:#}", path, e);
                failures.push(BatchFailure {
                    call_id,
                    error: format!("{:#}", e),
                });
            }
        }
    }

    let entries = analyze_batch(analyzer, inputs, workers).await;

    let mut results = Vec::with_capacity(entries.len());
    for entry in entries {
        match entry.result {
            Ok(result) => {
                print!("{}", render_report(&result));
                results.push(result);
            }
            Err(e) => {
                warn!("Call {} not analyzed: {}", entry.call_id, e);
                failures.push(BatchFailure {
                    call_id: entry.call_id,
                    error: e.to_string(),
                });
            }
        }
    }

    let report = BatchReport::new(analyzer.model_id().to_string(), results, failures);
    report.write_json(&output)?;

    info!(
        "Complete: {} analyzed, {} failed, report written to {:?}",
        report.results.len(),
        report.failures.len(),
        output
    );
    for (outcome, count) in &report.outcome_counts {
        info!("  {}: {}", outcome, count);
    }

    Ok(())
}
