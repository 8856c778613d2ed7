//! chemquiz: terminal chemistry quiz with persistent scores and levels.

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};
use quiz_core::model::QuizCategory;

mod commands;
mod config;

use config::{AppConfig, ConfigOverrides, StoreBackend};

#[derive(Parser)]
#[command(name = "chemquiz", version, about = "Chemistry quiz with scores, levels and achievements")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct GlobalArgs {
    /// Config file path (defaults to ./chemquiz.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Storage backend
    #[arg(long, global = true, env = "CHEMQUIZ_STORE", value_enum)]
    store: Option<StoreBackend>,

    /// Directory for the file backend
    #[arg(long, global = true, env = "CHEMQUIZ_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Database URL for the sqlite backend
    #[arg(long, global = true, env = "CHEMQUIZ_DB_URL")]
    db_url: Option<String>,

    /// Questions per session
    #[arg(long, global = true)]
    session_size: Option<u32>,

    /// Seconds an answer stays revealed
    #[arg(long, global = true)]
    reveal_seconds: Option<u64>,
}

impl GlobalArgs {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            store: self.store,
            data_dir: self.data_dir.clone(),
            db_url: self.db_url.clone(),
            session_size: self.session_size,
            reveal_seconds: self.reveal_seconds,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Play one quiz session
    Play {
        /// Category id (e.g. "general-chemistry"); prompts when omitted
        #[arg(long)]
        category: Option<QuizCategory>,
    },

    /// Show level, xp, achievements and per-category scores
    Stats,

    /// List quiz categories with question counts
    Categories,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("chemquiz=info,services=info")),
        )
        .init();

    if let Err(e) = run(Cli::parse()).await {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let Cli { global, command } = cli;
    let config = AppConfig::load(global.config.as_deref())?.with_overrides(global.overrides());
    tracing::debug!(?config, "resolved configuration");

    match command {
        Commands::Play { category } => commands::play::execute(&config, category).await,
        Commands::Stats => commands::stats::execute(&config).await,
        Commands::Categories => commands::categories::execute(&config).await,
    }
}
