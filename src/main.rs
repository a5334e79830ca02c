mod catalog;
mod config;
mod error;
mod models;
mod planner;
mod session;
mod tui;

use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use catalog::CatalogLoader;
use config::Config;
use error::{AppError, Result};
use models::{JsonOutput, Status, ALL_SUBJECTS};
use session::Session;

#[derive(Parser)]
#[command(name = "study-assistant")]
#[command(about = "Simple study planner and topic recommender")]
#[command(version)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Path to a subjects CSV (subject,topic,difficulty)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Seed for the random source, for repeatable output
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all subjects and topics
    Catalog,

    /// List subject filter choices
    Subjects,

    /// Recommend random topics
    Recommend {
        /// Only recommend topics from this subject ("All" for any)
        #[arg(long, short)]
        subject: Option<String>,

        /// How many topics to recommend
        #[arg(long, short = 'n', default_value_t = 2, value_parser = clap::value_parser!(u32).range(1..=5))]
        count: u32,
    },

    /// Generate a day-by-day study plan
    Plan {
        /// Study hours per day (one topic per hour)
        #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u32).range(1..=6))]
        hours: u32,

        /// Days left until the exam
        #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(1..=60))]
        days: u32,
    },

    /// Mark topics and show which ones are weak
    Progress {
        /// Topic status assignment, e.g. --set Algebra=weak (repeatable)
        #[arg(long = "set", short, value_name = "TOPIC=STATUS")]
        set: Vec<String>,
    },

    /// Launch interactive terminal UI
    Tui,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let json = cli.json;

    if let Err(e) = run(cli) {
        if json {
            if let Ok(out) = serde_json::to_string(&JsonOutput::<()>::err(e.to_string())) {
                println!("{}", out);
            }
        }
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "study_assistant=debug"
    } else {
        "study_assistant=warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .init();
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.catalog.clone())?;
    debug!(
        secrets = ?config.secrets_path,
        api_key_configured = config.has_api_key(),
        "model API key is not used by any command"
    );

    let loader = CatalogLoader::new(&config.catalog_path);
    let catalog = loader.load()?;
    debug!(path = %loader.path().display(), rows = catalog.len(), "catalog ready");
    let mut rng = make_rng(cli.seed);

    match cli.command {
        Commands::Catalog => {
            if cli.json {
                println!("{}", serde_json::to_string(&JsonOutput::ok(catalog.rows()))?);
            } else {
                println!("{:<20} {:<32} DIFFICULTY", "SUBJECT", "TOPIC");
                println!("{}", "-".repeat(64));
                for row in catalog.rows() {
                    println!(
                        "{:<20} {:<32} {}",
                        truncate(&row.subject, 18),
                        truncate(&row.topic, 30),
                        row.difficulty
                    );
                }
            }
        }

        Commands::Subjects => {
            let mut choices = vec![ALL_SUBJECTS.to_string()];
            choices.extend(catalog.subjects());

            if cli.json {
                println!("{}", serde_json::to_string(&JsonOutput::ok(&choices))?);
            } else {
                for choice in choices {
                    println!("{}", choice);
                }
            }
        }

        Commands::Recommend { subject, count } => {
            let recs = planner::recommend(catalog, subject.as_deref(), count as usize, &mut rng);

            if cli.json {
                println!("{}", serde_json::to_string(&JsonOutput::ok(&recs))?);
            } else if recs.is_empty() {
                println!(
                    "No topics found for subject '{}'.",
                    subject.as_deref().unwrap_or(ALL_SUBJECTS)
                );
            } else {
                println!("{:<32} {:<20} DIFFICULTY", "TOPIC", "SUBJECT");
                println!("{}", "-".repeat(64));
                for row in recs {
                    println!(
                        "{:<32} {:<20} {}",
                        truncate(&row.topic, 30),
                        truncate(&row.subject, 18),
                        row.difficulty
                    );
                }
            }
        }

        Commands::Plan { hours, days } => {
            let plan = planner::make_plan(catalog, hours, days, &mut rng);

            if cli.json {
                println!("{}", serde_json::to_string(&JsonOutput::ok(&plan))?);
            } else {
                for (day, topics) in plan.iter() {
                    println!("Day {}: [{}]", day, topics.join(", "));
                }
            }
        }

        Commands::Progress { set } => {
            let session = Session::open()?;
            for assignment in &set {
                let (topic, status) = parse_assignment(assignment)?;
                session.set_progress(&topic, status)?;
                if !cli.json {
                    println!("Saved: {} = {}", topic, status);
                }
            }

            let progress = session.progress()?;
            let weak = planner::weak_topics(&progress);

            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string(&JsonOutput::ok(serde_json::json!({
                        "weak_topics": weak,
                        "progress": progress
                    })))?
                );
            } else {
                if !set.is_empty() {
                    println!();
                }
                println!("=== Weak Topics ===");
                for topic in weak.as_list() {
                    println!("  {}", topic);
                }
                println!();
                println!("=== Current Progress ===");
                if progress.is_empty() {
                    println!("  (none)");
                }
                for (topic, status) in progress.iter() {
                    println!("  {:<32} {}", truncate(topic, 30), status);
                }
            }
        }

        Commands::Tui => {
            tui::run(catalog.clone(), Session::open()?, rng)?;
        }
    }

    Ok(())
}

fn parse_assignment(raw: &str) -> Result<(String, Status)> {
    let (topic, status) = raw.rsplit_once('=').ok_or_else(|| {
        AppError::InvalidArgument(format!(
            "Invalid assignment '{}'. Use TOPIC=STATUS, e.g. Algebra=weak",
            raw
        ))
    })?;

    let topic = topic.trim();
    if topic.is_empty() {
        return Err(AppError::InvalidArgument(format!(
            "Missing topic in '{}'",
            raw
        )));
    }

    let status = Status::from_str(status).ok_or_else(|| {
        AppError::InvalidArgument(format!(
            "Invalid status '{}'. Use: weak, ok, or good",
            status.trim()
        ))
    })?;

    Ok((topic.to_string(), status))
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
