//! Shepherd CLI binary.

use clap::Parser;
use shepherd::{
    RunOptions, Shepherd, ShepherdConfig, init_observability, open_ledger, run_scheduler,
};
use shepherd_core::SystemClock;
use std::sync::Arc;
use tracing::{info, warn};

mod cli;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Missing .env is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let config = ShepherdConfig::load(cli.config.as_deref())?;
    init_observability(config.logging())?;

    let options = RunOptions {
        dry_run: cli.dry_run,
        bearer_token: cli.bearer_token.clone(),
    };
    if options.dry_run {
        warn!("Dry run: nothing is published and usage is not saved");
    }

    match cli.command {
        Commands::CheckConfig => {
            for warning in config.validate()? {
                println!("warning: {}", warning);
            }
            println!("{}", config.to_toml()?);
            println!("Configuration OK");
        }

        Commands::Usage => {
            let mut ledger = open_ledger(&config, true, Arc::new(SystemClock)).await;
            println!("{}", ledger.summary().await);
        }

        Commands::Daily => {
            let mut shepherd = Shepherd::build(&config, options).await?;
            let report = shepherd.daily().await;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }

        Commands::Interact => {
            let mut shepherd = Shepherd::build(&config, options).await?;
            let replies = shepherd.interact().await;
            println!("Replied to {} accounts", replies);
        }

        Commands::Insights => {
            let mut shepherd = Shepherd::build(&config, options).await?;
            let posted = shepherd.insights().await;
            println!("Posted {} updates", posted);
        }

        Commands::Run => {
            let mut shepherd = Shepherd::build(&config, options).await?;
            info!("Scheduler started, press CTRL+C to stop");
            run_scheduler(&mut shepherd, async {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    warn!(error = %e, "Could not listen for CTRL+C");
                    std::future::pending::<()>().await;
                }
            })
            .await;
        }
    }

    Ok(())
}
