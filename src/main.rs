use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod cli;
mod migrate;

/// mealgrid - weekly meal planning and shopping lists
#[derive(Parser)]
#[command(name = "mealgrid")]
#[command(about = "Weekly meal plans and shopping lists", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run database migrations
    Migrate,
    /// Drop database if exists and recreate with migrations
    Reset,
    /// Print a bearer token for a user
    Token {
        #[arg(long)]
        user: String,

        /// Lifetime in days (defaults to jwt.expiration_days)
        #[arg(long)]
        days: Option<i64>,
    },
    /// Manage a user's recipes
    Recipe {
        #[command(subcommand)]
        command: RecipeCommands,
    },
}

#[derive(Subcommand)]
enum RecipeCommands {
    /// Import recipes from a JSON array file
    Import {
        #[arg(long)]
        user: String,

        #[arg(long)]
        file: PathBuf,
    },
    /// List recipes, newest first
    List {
        #[arg(long)]
        user: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = mealgrid::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    mealgrid::observability::init_observability(
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
        config.observability.json,
    )?;

    match cli.command {
        Commands::Serve { host, port } => cli::server::serve(config, host, port).await,
        Commands::Migrate => migrate::migrate(&config).await,
        Commands::Reset => migrate::reset(&config).await,
        Commands::Token { user, days } => cli::token::mint(config, user, days),
        Commands::Recipe { command } => match command {
            RecipeCommands::Import { user, file } => cli::recipe::import(config, user, file).await,
            RecipeCommands::List { user } => cli::recipe::list(config, user).await,
        },
    }
}
