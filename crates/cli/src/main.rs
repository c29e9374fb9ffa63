//! kbchat CLI
//!
//! Main entry point for the kbchat command-line tool: a chat client for a
//! managed knowledge-base retrieve-and-generate service.

mod commands;

use clap::{Parser, Subcommand};
use commands::{AskCommand, ChatCommand};
use kbchat_core::{config::AppConfig, logging, AppResult};

/// kbchat - ask questions against a managed knowledge base
#[derive(Parser, Debug)]
#[command(name = "kbchat")]
#[command(about = "Chat client for a managed knowledge-base retrieval service", long_about = None)]
#[command(version)]
struct Cli {
    /// Knowledge-base identifier
    #[arg(short, long, global = true, env = "KB_ID")]
    kb_id: Option<String>,

    /// Service region
    #[arg(short, long, global = true, env = "AWS_REGION")]
    region: Option<String>,

    /// Service endpoint override (useful for gateways and tests)
    #[arg(long, global = true, env = "KBCHAT_ENDPOINT")]
    endpoint: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Ask a single question and print the answer
    Ask(AskCommand),

    /// Interactive chat session
    Chat(ChatCommand),
}

#[tokio::main]
async fn main() -> AppResult<()> {
    // .env first, so KB_ID and friends can live next to the binary in dev
    dotenvy::dotenv().ok();

    // Parse command-line arguments first (needed for logging config)
    let cli = Cli::parse();

    // Load base configuration from config file + environment
    let config = AppConfig::load()?;

    // Apply CLI overrides
    let config = config.with_overrides(
        cli.kb_id,
        cli.region,
        cli.endpoint,
        cli.log_level,
        cli.verbose,
        cli.no_color,
    );

    // Initialize logging with final configuration
    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    tracing::info!("kbchat starting");
    tracing::debug!("Region: {}", config.region);
    tracing::debug!("Endpoint: {}", config.service_endpoint());

    let command_name = match &cli.command {
        Commands::Ask(_) => "ask",
        Commands::Chat(_) => "chat",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    // Route to command handlers
    let result = match cli.command {
        Commands::Ask(cmd) => cmd.execute(&config).await,
        Commands::Chat(cmd) => cmd.execute(&config).await,
    };

    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}
