mod commands;
mod config;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::Settings;
use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "spamwatch")]
#[command(about = "Query and manage the SpamWatch ban list")]
struct Cli {
    /// Output format: table, json, csv or markdown
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// API token (defaults to $SPAMWATCH_TOKEN)
    #[arg(long, global = true)]
    token: Option<String>,

    /// API host (defaults to $SPAMWATCH_HOST or the public API)
    #[arg(long, global = true)]
    host: Option<String>,

    /// Request timeout in seconds (defaults to $SPAMWATCH_TIMEOUT or 30)
    #[arg(long, global = true)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the API version
    Version,
    /// Show API statistics
    Stats,
    /// Manage API tokens
    Tokens(commands::tokens::TokensArgs),
    /// Look up and manage bans
    Bans(commands::bans::BansArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("spamwatch=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let format = match cli.output.as_str() {
        "json" => OutputFormat::Json,
        "csv" => OutputFormat::Csv,
        "markdown" | "md" => OutputFormat::Markdown,
        _ => OutputFormat::Table,
    };

    let settings = Settings::resolve(cli.token.as_deref(), cli.host.as_deref(), cli.timeout)?;
    let client = settings.client()?;

    match &cli.command {
        Commands::Version => commands::info::version(&client).await?,
        Commands::Stats => commands::info::stats(&client).await?,
        Commands::Tokens(args) => commands::tokens::run(args, &client, &format).await?,
        Commands::Bans(args) => commands::bans::run(args, &client, &format).await?,
    }

    Ok(())
}
