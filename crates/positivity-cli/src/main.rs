mod db;
mod report;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "positivity-cli")]
#[command(about = "Generate upbeat analytics reports for Twitch channels")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch a channel from Twitch and print its report
    Report {
        /// Twitch login of the channel
        username: String,

        /// Also store the report in the database
        #[arg(long)]
        save: bool,

        /// Print single-line JSON instead of pretty-printed output
        #[arg(long)]
        compact: bool,
    },
    /// Print the newest stored report for a channel
    Show {
        /// Twitch login of the channel
        username: String,

        /// Print single-line JSON instead of pretty-printed output
        #[arg(long)]
        compact: bool,
    },
    /// Delete stored reports whose expiry has passed
    Cleanup,
    /// Apply pending database migrations
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = positivity_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Report {
            username,
            save,
            compact,
        } => report::run_report(&config, &username, save, compact).await,
        Commands::Show { username, compact } => {
            report::run_show(&config, &username, compact).await
        }
        Commands::Cleanup => db::run_cleanup(&config).await,
        Commands::Migrate => db::run_migrate(&config).await,
    }
}
