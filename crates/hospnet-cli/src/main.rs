mod pipeline;
mod report;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "hospnet-cli")]
#[command(about = "Ranks in-network hospitals by distance from a reference location")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Scrape all insurers, geocode every hospital, and export the ranked CSV.
    Run,
    /// Print the insurer names the portal currently lists.
    Insurers,
}

fn init_tracing(log_level: &str) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(log_level))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    dotenvy::dotenv().ok();

    match cli.command {
        Commands::Run => {
            let config = hospnet_core::load_app_config_from_env()?;
            init_tracing(&config.log_level)?;
            let geocoder = pipeline::build_geocoder(&config)?;
            let portal = pipeline::build_portal(&config.portal())?;
            let path = pipeline::run(&config, &geocoder, &portal).await?;
            println!("Data saved to {}", path.display());
        }
        // Listing insurers never geocodes, so it only needs the portal
        // settings (all defaulted) rather than the full run configuration.
        Commands::Insurers => {
            let config = hospnet_core::load_portal_config_from_env()?;
            init_tracing(&config.log_level)?;
            let portal = pipeline::build_portal(&config)?;
            for insurer in portal.list_insurers().await? {
                println!("{insurer}");
            }
        }
    }

    Ok(())
}
