//! Terminal frontend for Wayfinder.
//!
//! Every subcommand goes through the same interaction layer a chat
//! transport would use; replies are printed with their buttons and the
//! tokens those buttons carry.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use wf_interact::AppConfig;

#[derive(Parser)]
#[command(
    name = "wf",
    about = "Wayfinder: oracles, moves, truths, and progress tracks for solo play",
    version,
    propagate_version = true
)]
struct Cli {
    /// Content library (JSON)
    #[arg(short, long, global = true, default_value = "content.json")]
    content: PathBuf,

    /// RNG seed for reproducible rolls
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Maximum length of interaction tokens
    #[arg(long, global = true, default_value_t = 100)]
    token_limit: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Roll an oracle, or show a table at a given row
    Oracle {
        /// Oracle id (see `wf search`)
        id: String,

        /// Show this row (0-based) instead of rolling
        #[arg(short, long)]
        row: Option<usize>,
    },

    /// Search oracles by title, alias, or category
    Search {
        /// Search query
        query: String,
    },

    /// Show a move
    Move {
        /// Move id (see `wf moves`)
        id: String,
    },

    /// Search moves by name or category
    Moves {
        /// Search query (default: list all)
        #[arg(default_value = "")]
        query: String,
    },

    /// Show every setting truth
    Truths,

    /// Start a progress track
    Progress {
        /// Track title
        title: String,

        /// Challenge rank (troublesome, dangerous, formidable, extreme, epic)
        rank: String,
    },

    /// Press a button or submit a modal by token
    Press {
        /// The token carried by the button or modal
        token: String,

        /// Modal field as key=value (repeatable)
        #[arg(short, long = "field", value_parser = commands::press::parse_field)]
        fields: Vec<(String, String)>,
    },

    /// Validate the content library
    Check,

    /// Interactive session: run commands and press buttons by number
    Play,
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "wf=info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    let mut config = AppConfig::default().with_token_limit(cli.token_limit);
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    let content = cli.content.as_path();

    let result = match cli.command {
        Commands::Oracle { id, row } => commands::oracle::run(content, config, &id, row),
        Commands::Search { query } => commands::search::oracles(content, config, &query),
        Commands::Move { id } => commands::moves::run(content, config, &id),
        Commands::Moves { query } => commands::search::moves(content, config, &query),
        Commands::Truths => commands::truths::run(content, config),
        Commands::Progress { title, rank } => commands::progress::run(config, &title, &rank),
        Commands::Press { token, fields } => commands::press::run(content, config, &token, fields),
        Commands::Check => commands::check::run(content),
        Commands::Play => commands::play::run(content, config),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
