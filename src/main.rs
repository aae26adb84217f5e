use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use centime::app::AppContext;
use centime::cli::{commands, Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let mut ctx = AppContext::from_default_config()?;

    // Command-line flags override the config file.
    cli.apply_fetch_overrides(&mut ctx.config.fetch);

    match cli.command {
        Commands::Scrape { query } => {
            commands::scrape(&ctx, &query, cli.json).await?;
        }
        Commands::Analyze(args) => {
            commands::analyze(&ctx, args.into_subject(), cli.json).await?;
        }
        Commands::Query(args) => {
            commands::query(&args.into_subject());
        }
    }

    Ok(())
}
