//! Command-line titler for a directory of markdown notes.

use anyhow::{Context, Result};
use autotitle::summarize::{parse_sentences, prefilter};
use autotitle::{
    extract_context, DocumentHost, DocumentRef, FsHost, OpenAiOracle, OutputOrder,
    SelectionStrategy, Settings, Summarizer, SummarizerConfig, Titler,
};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;

#[derive(Parser)]
#[command(name = "autotitle")]
#[command(about = "Generate titles for markdown notes")]
#[command(version)]
struct Cli {
    /// Directory holding the notes
    #[arg(short, long, global = true, default_value = ".")]
    vault: PathBuf,

    /// Settings file (default: <vault>/.autotitle.json)
    #[arg(short, long, global = true)]
    settings: Option<PathBuf>,

    /// Number of key sentences sent to the model
    #[arg(short = 'k', long, global = true)]
    sentences: Option<usize>,

    /// Order of the selected sentences
    #[arg(long, global = true, value_enum, default_value_t = OrderArg::Occurrence)]
    order: OrderArg,

    /// Take the first sentences instead of ranking them
    #[arg(long, global = true)]
    lead: bool,

    /// Note file extension
    #[arg(long, global = true, default_value = "md")]
    extension: String,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the key sentences of a note without calling the model
    Summarize {
        /// Note name or path
        note: String,

        /// Score every sentence instead
        #[arg(long)]
        scores: bool,
    },

    /// Title one note
    Title {
        /// Note name or path
        note: String,
    },

    /// Title every note in the vault
    Batch,

    /// Title every note still named "Untitled"
    Untitled,
}

#[derive(Clone, Copy, ValueEnum)]
enum OrderArg {
    /// Most central sentence first
    Rank,
    /// Document order
    Occurrence,
}

impl From<OrderArg> for OutputOrder {
    fn from(order: OrderArg) -> Self {
        match order {
            OrderArg::Rank => OutputOrder::ByRank,
            OrderArg::Occurrence => OutputOrder::ByOccurrence,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr so command output stays pipeable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,autotitle=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_line_number(true),
        )
        .init();

    // Load .env file if present
    let _ = dotenvy::dotenv();

    match run(Cli::parse()).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            ExitCode::from(2)
        }
    }
}

/// Returns whether every requested note was handled.
async fn run(cli: Cli) -> Result<bool> {
    let path = config::settings_path(&cli.vault, cli.settings.as_deref());
    let mut settings = config::load_settings(&path)?;
    if let Some(k) = cli.sentences {
        settings.number_of_sentences = k;
    }
    settings.validate().context("Invalid settings")?;

    let engine = settings
        .summarizer_config()
        .with_order(cli.order.into())
        .with_strategy(if cli.lead {
            SelectionStrategy::LeadSentences
        } else {
            SelectionStrategy::TextRank
        });

    let json = cli.json;
    let host = FsHost::new(cli.vault.clone())
        .with_extension(cli.extension.clone())
        .with_notifier(move |message| {
            tracing::info!(target: "autotitle::notify", "{}", message);
            // Keep stdout clean for JSON
            if !json {
                println!("{} {}", "›".cyan(), message);
            }
        });

    match cli.command {
        Commands::Summarize { note, scores } => {
            let doc = resolve(&host, &note, &cli.extension)?;
            let summarizer = Summarizer::new(engine)?;
            summarize(&host, &summarizer, &doc, scores, json).await
        }
        Commands::Title { note } => {
            let doc = resolve(&host, &note, &cli.extension)?;
            let titler = titler(host, settings, engine)?;
            let outcome = titler.run(&doc).await;
            if json {
                if let Some(outcome) = &outcome {
                    print_json(outcome)?;
                }
            }
            Ok(outcome.is_some())
        }
        Commands::Batch => {
            let report = titler(host, settings, engine)?.title_open_documents().await?;
            if json {
                print_json(&report)?;
            }
            Ok(report.failed() == 0)
        }
        Commands::Untitled => {
            let report = titler(host, settings, engine)?.title_untitled().await?;
            if json {
                print_json(&report)?;
            }
            Ok(report.failed() == 0)
        }
    }
}

fn titler(
    host: FsHost,
    settings: Settings,
    engine: SummarizerConfig,
) -> Result<Titler<FsHost, OpenAiOracle>> {
    // The titler reports a missing key itself, so the oracle is built regardless.
    let oracle = OpenAiOracle::new(settings.api_key.clone()).with_model(settings.model_id.clone());
    Ok(Titler::new(host, oracle, settings)?.with_summarizer_config(engine)?)
}

async fn summarize(
    host: &FsHost,
    summarizer: &Summarizer,
    doc: &DocumentRef,
    scores: bool,
    json: bool,
) -> Result<bool> {
    let text = host
        .read(doc)
        .await
        .with_context(|| format!("Failed to read \"{}\"", doc.name))?;

    if scores {
        let filtered = prefilter(&text);
        let sentences = parse_sentences(&filtered);
        let summary = summarizer.summarize_sentences(sentences.clone());
        let selected = summary.positions();

        for (sentence, score) in sentences.iter().zip(&summary.scores) {
            let marker = if selected.contains(&sentence.position) { "*" } else { " " };
            println!(
                "{} {} {}",
                marker.green().bold(),
                format!("{:>8.4}", score).yellow(),
                sentence.text
            );
        }
        let status = if summary.converged {
            "converged"
        } else {
            "stopped at the iteration cap"
        };
        println!("{}", format!("{} iterations, {}", summary.iterations, status).dimmed());
        return Ok(true);
    }

    let extraction = extract_context(summarizer, &doc.name, &text)?;
    if json {
        print_json(&extraction)?;
        return Ok(true);
    }
    if extraction.is_fallback() {
        eprintln!("{}", "No qualifying sentences; showing the leading text".yellow());
    }
    println!("{}", extraction.context);
    Ok(true)
}

fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Accept either a path to a note or its name within the vault.
fn resolve(host: &FsHost, note: &str, extension: &str) -> Result<DocumentRef> {
    let path = Path::new(note);
    let doc = if path.is_file() {
        host.document(path)
    } else {
        let suffix = format!(".{}", extension.trim_start_matches('.'));
        host.document_named(note.strip_suffix(suffix.as_str()).unwrap_or(note))
    };
    doc.with_context(|| format!("Not a note: {}", note))
}
