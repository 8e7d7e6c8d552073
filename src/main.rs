use anyhow::Result;
use clap::Parser;
use dotenv::dotenv;
use soroban_deployer::cli::{Cli, Commands};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before anything reads the environment
    dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse();
    let verbosity = cli.verbosity();

    // Initialize logging with verbosity-aware level
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| verbosity.to_log_level().to_string().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let Cli { global, command, .. } = cli;

    // Execute command
    match command {
        Commands::Install(args) => {
            soroban_deployer::cli::commands::install(&global, args).await?;
        }
        Commands::Deploy(args) => {
            soroban_deployer::cli::commands::deploy(&global, args).await?;
        }
        Commands::DeployToken(args) => {
            soroban_deployer::cli::commands::deploy_token(&global, args).await?;
        }
        Commands::Invoke(args) => {
            soroban_deployer::cli::commands::invoke(&global, args).await?;
        }
        Commands::BumpInstance(args) => {
            soroban_deployer::cli::commands::bump_instance(&global, args).await?;
        }
        Commands::BumpCode(args) => {
            soroban_deployer::cli::commands::bump_code(&global, args).await?;
        }
        Commands::Airdrop(args) => {
            soroban_deployer::cli::commands::airdrop(&global, args).await?;
        }
        Commands::Setup(args) => {
            soroban_deployer::cli::commands::setup(&global, args).await?;
        }
    }

    Ok(())
}
