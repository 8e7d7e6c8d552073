//! Definitions of CLI arguments and commands for the deployer.

pub mod commands;

use crate::config::Network;
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;

#[derive(Parser)]
#[command(
    name = "soroban-deploy",
    version,
    about = "Deploy and drive Soroban smart contracts"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Increase log detail (-v, -vv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::Trace,
            }
        }
    }
}

/// Log detail selected with `-q`/`-v` flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
    Trace,
}

impl Verbosity {
    pub fn to_log_level(self) -> LevelFilter {
        match self {
            Verbosity::Quiet => LevelFilter::ERROR,
            Verbosity::Normal => LevelFilter::INFO,
            Verbosity::Verbose => LevelFilter::DEBUG,
            Verbosity::Trace => LevelFilter::TRACE,
        }
    }
}

/// Options shared by every command.
#[derive(Args)]
pub struct GlobalArgs {
    /// Target network
    #[arg(
        short,
        long,
        global = true,
        value_enum,
        default_value_t = Network::Testnet,
        env = "SOROBAN_NETWORK"
    )]
    pub network: Network,

    /// Directory holding the compiled, optimized wasm artifacts
    #[arg(
        long,
        global = true,
        default_value = "target/wasm32-unknown-unknown/release",
        env = "ARTIFACT_DIR"
    )]
    pub artifact_dir: PathBuf,

    /// Directory where per-network address books are kept
    #[arg(long, global = true, default_value = ".soroban", env = "ADDRESS_BOOK_DIR")]
    pub book_dir: PathBuf,
}

/// The possible CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Upload a compiled contract artifact and record its wasm hash
    Install(InstallArgs),
    /// Create a contract instance from an installed wasm hash
    Deploy(DeployArgs),
    /// Deploy a fresh token contract and print its ID
    DeployToken(DeployTokenArgs),
    /// Invoke a method on a deployed contract
    Invoke(InvokeArgs),
    /// Extend the TTL of a contract instance entry
    BumpInstance(BumpInstanceArgs),
    /// Extend the TTL of an uploaded wasm code entry
    BumpCode(BumpCodeArgs),
    /// Fund an account through friendbot
    Airdrop(AirdropArgs),
    /// Install, deploy and initialize the full contract family
    Setup(SetupArgs),
}

#[derive(Args)]
pub struct InstallArgs {
    /// Contract key (factory, pair, router, token)
    #[arg(short, long)]
    pub contract: String,
}

#[derive(Args)]
pub struct DeployArgs {
    /// Contract key the new instance is recorded under
    #[arg(short, long)]
    pub contract: String,

    /// Bytecode key to instantiate; defaults to the contract key
    #[arg(short, long)]
    pub wasm: Option<String>,
}

#[derive(Args)]
pub struct DeployTokenArgs {
    /// Bytecode key holding the token contract
    #[arg(short, long, default_value = "token")]
    pub wasm: String,
}

#[derive(Args)]
pub struct InvokeArgs {
    /// Contract key to invoke
    #[arg(short, long)]
    pub contract: String,

    /// Method name
    #[arg(short, long)]
    pub method: String,

    /// JSON array of arguments, e.g. '[{"type": "u32", "value": 7}]'
    #[arg(short, long)]
    pub args: Option<String>,

    /// Source secret key; defaults to the configured admin
    #[arg(long, env = "SOURCE_SECRET_KEY")]
    pub source: Option<String>,
}

#[derive(Args)]
pub struct BumpInstanceArgs {
    /// Contract key whose instance entry gets extended
    #[arg(short, long)]
    pub contract: String,
}

#[derive(Args)]
pub struct BumpCodeArgs {
    /// Bytecode key whose uploaded code entry gets extended
    #[arg(short, long)]
    pub wasm: String,
}

#[derive(Args)]
pub struct AirdropArgs {
    /// Public key to fund; defaults to the admin account
    #[arg(short, long)]
    pub account: Option<String>,
}

#[derive(Args)]
pub struct SetupArgs {
    /// Skip the friendbot funding step
    #[arg(long)]
    pub no_airdrop: bool,
}
