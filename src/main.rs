use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use callcover::checklist::Checklist;
use callcover::config::Config;
use callcover::coverage::Evaluator;
use callcover::pipeline::batch::{self, BatchEntry, BatchOptions};
use callcover::text::Normalizer;

/// Callcover: question coverage scoring for call transcripts.
///
/// Checks which questions from a checklist a call handler actually asked,
/// using token overlap between each question and the transcript.
#[derive(Parser)]
#[command(name = "callcover", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score one transcript (.json segments or plain text) against a checklist
    Evaluate {
        /// Transcript file
        transcript: PathBuf,

        /// Checklist file (.json or one question per line). Defaults to the
        /// built-in case-entry questions.
        #[arg(long)]
        questions: Option<PathBuf>,

        /// Minimum score for a question to count as asked
        #[arg(long)]
        threshold: Option<f64>,

        /// Only score segments from this speaker (e.g. SPEAKER_01)
        #[arg(long)]
        speaker: Option<String>,

        /// Print the report as JSON instead of the colored summary
        #[arg(long)]
        json: bool,

        /// Print the rendered transcript before the report
        #[arg(long)]
        show_transcript: bool,

        /// Also write a markdown report to the report directory
        #[arg(long)]
        report: bool,
    },

    /// Score every transcript in a directory against a checklist
    Batch {
        /// Directory containing .json / .txt transcripts
        dir: PathBuf,

        /// Checklist file. Defaults to the built-in case-entry questions.
        #[arg(long)]
        questions: Option<PathBuf>,

        /// Minimum score for a question to count as asked
        #[arg(long)]
        threshold: Option<f64>,

        /// Only score segments from this speaker
        #[arg(long)]
        speaker: Option<String>,

        /// Print all reports as JSON instead of the summary table
        #[arg(long)]
        json: bool,

        /// Also write a markdown report to the report directory
        #[arg(long)]
        report: bool,
    },

    /// Show the normalized tokens of a piece of text
    Tokens {
        /// Text to normalize
        text: String,
    },

    /// Run the built-in dispatcher scenarios
    Demo,
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("callcover=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Evaluate {
            transcript,
            questions,
            threshold,
            speaker,
            json,
            show_transcript,
            report,
        } => {
            let config = Config::load()?;
            let checklist = load_checklist(questions.as_deref())?;
            let options = batch_options(&config, threshold, speaker);

            let loaded = callcover::transcript::Transcript::load(&transcript)?;
            if show_transcript && !json {
                println!("{}", "--- Transcript ---".bold());
                print!("{}", loaded.render());
                println!("{}", "-".repeat(18));
            }

            let entry = batch::evaluate_transcript(
                &transcript.display().to_string(),
                &loaded,
                &checklist,
                &options,
            );
            info!(
                transcript = %transcript.display(),
                asked = entry.report.asked_count,
                missed = entry.report.missed_count,
                "Transcript evaluated"
            );

            if json {
                println!("{}", serde_json::to_string_pretty(&entry.report)?);
            } else {
                callcover::output::terminal::display_report(&entry.report);
            }

            if report {
                write_markdown(&config, std::slice::from_ref(&entry))?;
            }
        }

        Commands::Batch {
            dir,
            questions,
            threshold,
            speaker,
            json,
            report,
        } => {
            let config = Config::load()?;
            let checklist = load_checklist(questions.as_deref())?;
            let options = batch_options(&config, threshold, speaker);

            if !json {
                println!(
                    "Grading transcripts in {} ({} questions)...",
                    dir.display(),
                    checklist.len()
                );
            }

            let entries = batch::run(&dir, &checklist, &options)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                callcover::output::terminal::display_batch_summary(&entries);
            }

            if report {
                write_markdown(&config, &entries)?;
            }
        }

        Commands::Tokens { text } => {
            let tokens = callcover::text::normalize(&text);
            callcover::output::terminal::display_tokens(&tokens);
        }

        Commands::Demo => {
            let outcomes = callcover::demo::run_cases();
            let total = outcomes.len();
            let mut ok = 0;

            for outcome in &outcomes {
                println!("\n{}", format!("===== CASE: {} =====", outcome.case.name).bold());
                println!("--- Transcript ({}) ---", outcome.case.label);
                println!("{}", outcome.case.transcript);
                callcover::output::terminal::display_report(&outcome.report);

                let status = if outcome.passed {
                    ok += 1;
                    "PASS".green().bold()
                } else {
                    "FAIL".red().bold()
                };
                println!("[{}] {}", status, outcome.case.name);
            }

            println!("\nRESULT: {ok}/{total} cases passed.");
            if ok != total {
                anyhow::bail!("{} demo case(s) failed", total - ok);
            }
        }
    }

    Ok(())
}

/// Load the checklist file, or fall back to the built-in case-entry questions.
fn load_checklist(path: Option<&Path>) -> Result<Checklist> {
    match path {
        Some(path) => {
            let checklist = Checklist::load(path)?;
            info!(path = %path.display(), questions = checklist.len(), "Loaded checklist");
            Ok(checklist)
        }
        None => Ok(Checklist::dispatcher_default()),
    }
}

/// Merge CLI flags over config values.
fn batch_options(config: &Config, threshold: Option<f64>, speaker: Option<String>) -> BatchOptions {
    let normalizer = Normalizer {
        token_limit: config.token_limit,
    };
    BatchOptions {
        evaluator: Evaluator::new(threshold.unwrap_or(config.threshold)).with_normalizer(normalizer),
        speaker: speaker.or_else(|| config.speaker.clone()),
    }
}

fn write_markdown(config: &Config, entries: &[BatchEntry]) -> Result<()> {
    let path = callcover::output::markdown::report_path(&config.report_dir, chrono::Utc::now());
    let written = callcover::output::markdown::generate_report(entries, &path.to_string_lossy())?;
    println!("\n{}", format!("Markdown report saved to: {written}").bold());
    Ok(())
}
