//! Moodjournal CLI
//!
//! Usage:
//!   moodjournal --text "your entry"            # Analyze only, nothing stored
//!   moodjournal --reflect "your entry"         # Full pipeline, entry stored
//!   moodjournal --insights                     # Pattern summary of the journal
//!   moodjournal --serve                        # HTTP API server
//!   moodjournal --text "entry" --json          # JSON output

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use moodjournal::config::JournalConfig;
use moodjournal::core::{run_server, EntryAnalyzer, Journal};
use moodjournal::error::Result;
use moodjournal::types::{PatternSummary, Submission};
use moodjournal::VERSION;

#[derive(Parser, Debug)]
#[command(
    name = "moodjournal",
    version = VERSION,
    about = "Reflective journal - emotion analysis, crisis triage and pattern insights",
    long_about = "Moodjournal scores each entry for sentiment and emotion, checks it\n\
                  for crisis language, asks a language model for a reflection and\n\
                  stores it. Past entries feed similarity search and pattern insights.\n\n\
                  Modes:\n  \
                  --text       Analyze one entry (nothing stored)\n  \
                  --reflect    Analyze, reflect and store one entry\n  \
                  --insights   Pattern summary of the stored journal\n  \
                  --serve      HTTP API server mode"
)]
struct Args {
    /// Entry to analyze without storing it
    #[arg(short, long)]
    text: Option<String>,

    /// Entry to run through the full pipeline and store
    #[arg(short, long)]
    reflect: Option<String>,

    /// Print the pattern summary of stored entries
    #[arg(short, long)]
    insights: bool,

    /// Run as HTTP API server
    #[arg(short, long)]
    serve: bool,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Database path (overrides config)
    #[arg(long)]
    db: Option<PathBuf>,

    /// Server address (overrides config)
    #[arg(long)]
    addr: Option<String>,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("moodjournal=info")),
        )
        .init();

    let args = Args::parse();
    if args.no_color {
        colored::control::set_override(false);
    }

    match run(args).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<ExitCode> {
    let mut config = match &args.config {
        Some(path) => JournalConfig::load(path)?,
        None => JournalConfig::default(),
    };
    if let Some(db) = &args.db {
        config.storage.db_path = db.clone();
    }
    if let Some(addr) = &args.addr {
        config.server.addr = addr.clone();
    }

    if args.serve {
        let addr = config.server.addr.clone();
        print_banner(&addr);
        run_server(&addr, Journal::open(config)?).await?;
    } else if let Some(text) = &args.reflect {
        let submission = Journal::open(config)?.submit(text).await?;
        print_submission(&submission, args.json)?;
    } else if let Some(text) = &args.text {
        let output = EntryAnalyzer::new(&config).analyze(text);
        if args.json {
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else if args.no_color {
            println!("{}", output.to_parseable_string());
        } else {
            println!("{}", output.to_terminal_string());
        }
    } else if args.insights {
        let summary = Journal::open(config)?.insights().await?;
        if args.json {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        } else {
            print_insights(&summary);
        }
    } else {
        Args::command().print_help()?;
        return Ok(ExitCode::from(2));
    }
    Ok(ExitCode::SUCCESS)
}

fn print_banner(addr: &str) {
    println!();
    println!("{}", format!("  Moodjournal API v{VERSION}").bold());
    println!("  listening on http://{addr}");
    println!("  POST /api/reflect  /api/analyze  /api/similar  /api/search");
    println!("  GET  /api/analytics  /api/insights  /api/dashboard  /api/trends  /health");
    println!();
}

fn print_submission(submission: &Submission, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(submission)?);
        return Ok(());
    }
    let c = submission.classification();
    println!(
        "{} ({:.0}%) | sentiment={:+.3}",
        c.emotion.bold(),
        c.confidence * 100.0,
        c.sentiment
    );

    match submission {
        Submission::Crisis { tier, resources, .. } => {
            println!(
                "{}",
                format!("Crisis language detected ({tier}). You don't have to face this alone.")
                    .color(tier.color())
                    .bold()
            );
            for (name, contact) in resources {
                println!("  {name}: {contact}");
            }
        }
        Submission::Reflected {
            reflection,
            severity,
            emoji,
            similar,
            ..
        } => {
            println!("{emoji} severity={}", severity.as_str().color(severity.color()));
            println!();
            println!("{}", reflection.reflection);
            println!("{} {}", "Summary:".dimmed(), reflection.summary);
            if !reflection.actionable_insight.is_empty() {
                println!("{} {}", "Try:".dimmed(), reflection.actionable_insight);
            }
            for f in &reflection.followups {
                println!("  ? {}", f.question);
            }
            if let Some(coping) = &reflection.coping_suggestion {
                println!("{} {}", "Coping:".dimmed(), coping);
            }
            if !similar.is_empty() {
                println!();
                println!("{}", "Similar past entries:".dimmed());
                for hit in similar {
                    println!("  [{:.2}] {} ({})", hit.score, hit.entry.emotion, hit.entry.timestamp.format("%Y-%m-%d"));
                }
            }
        }
        Submission::ReflectionUnavailable { severity, reason, .. } => {
            println!("severity={}", severity.as_str().color(severity.color()));
            println!("{} {}", "Reflection unavailable:".yellow(), reason);
            println!("The entry was saved.");
        }
    }
    Ok(())
}

fn print_insights(summary: &PatternSummary) {
    println!("{}", format!("Entries: {}", summary.total_entries).bold());
    if let Some(stats) = &summary.sentiment_stats {
        let std_dev = stats
            .std_dev
            .map(|s| format!("{s:.3}"))
            .unwrap_or_else(|| "n/a".to_string());
        println!(
            "Sentiment: mean {:+.3} | high {:+.3} | low {:+.3} | std {}",
            stats.average, stats.highest, stats.lowest, std_dev
        );
    }
    if !summary.emotion_frequency.is_empty() {
        println!("\n{}", "Emotions".underline());
        for c in &summary.emotion_frequency {
            println!("  {:<14} {}", c.emotion, c.count);
        }
    }
    if !summary.common_combinations.is_empty() {
        println!("\n{}", "Common combinations".underline());
        for c in &summary.common_combinations {
            println!("  {} + {:<10} {}", c.emotion, c.bucket, c.count);
        }
    }
    if !summary.transitions.is_empty() {
        println!("\n{}", "Transitions".underline());
        for t in &summary.transitions {
            println!("  {} -> {:<12} {}", t.from, t.to, t.count);
        }
    }
    if !summary.low_sentiment_words.is_empty() {
        println!("\n{}", "Words on low days".underline());
        let words: Vec<String> = summary
            .low_sentiment_words
            .iter()
            .map(|w| format!("{} ({})", w.word, w.count))
            .collect();
        println!("  {}", words.join(", "));
    }
}
