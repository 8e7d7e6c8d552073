//! Command handlers: wire configuration, the address book and the RPC client
//! into the operation modules, then print a short human summary. Everything
//! machine-readable lands in the address book, not on stdout.

use crate::address_book::AddressBook;
use crate::cli::{
    AirdropArgs, BumpCodeArgs, BumpInstanceArgs, DeployArgs, DeployTokenArgs, GlobalArgs,
    InstallArgs, InvokeArgs, SetupArgs,
};
use crate::config::Config;
use crate::keys::Keypair;
use crate::rpc::Client;
use crate::wasm::{ArtifactDir, CONTRACT_KEYS};
use crate::{ops, scval, Result};
use colored::Colorize;
use stellar_xdr::curr::{ScBytes, ScVal};

struct CommandContext {
    config: Config,
    rpc: Client,
    book: AddressBook,
    artifacts: ArtifactDir,
}

fn context(global: &GlobalArgs) -> Result<CommandContext> {
    let config = Config::load(global.network)?;
    let rpc = Client::new(&config.rpc_url);
    let book = AddressBook::load_or_create(global.network, &global.book_dir)?;
    let artifacts = ArtifactDir::new(&global.artifact_dir);
    Ok(CommandContext {
        config,
        rpc,
        book,
        artifacts,
    })
}

pub async fn install(global: &GlobalArgs, args: InstallArgs) -> Result<()> {
    let mut ctx = context(global)?;
    let admin = ctx.config.admin.clone();
    ops::install_contract(
        &ctx.rpc,
        &ctx.config,
        &mut ctx.book,
        &ctx.artifacts,
        &admin,
        &args.contract,
    )
    .await?;
    println!("{} {}", "installed".green().bold(), args.contract);
    Ok(())
}

pub async fn deploy(global: &GlobalArgs, args: DeployArgs) -> Result<()> {
    let mut ctx = context(global)?;
    let admin = ctx.config.admin.clone();
    let wasm_key = args.wasm.as_deref().unwrap_or(&args.contract);
    let contract_id = ops::deploy_contract(
        &ctx.rpc,
        &ctx.config,
        &mut ctx.book,
        &admin,
        &args.contract,
        wasm_key,
    )
    .await?;
    println!("{} {} at {}", "deployed".green().bold(), args.contract, contract_id);
    Ok(())
}

pub async fn deploy_token(global: &GlobalArgs, args: DeployTokenArgs) -> Result<()> {
    let ctx = context(global)?;
    let admin = ctx.config.admin.clone();
    let contract_id =
        ops::deploy_token(&ctx.rpc, &ctx.config, &ctx.book, &admin, &args.wasm).await?;
    println!("{} token at {}", "deployed".green().bold(), contract_id);
    Ok(())
}

pub async fn invoke(global: &GlobalArgs, args: InvokeArgs) -> Result<()> {
    // Arguments are validated before any configuration or network access.
    let parsed = match args.args.as_deref() {
        Some(raw) => scval::parse_args(raw)?,
        None => vec![],
    };

    let ctx = context(global)?;
    let source = match args.source.as_deref() {
        Some(secret) => Keypair::from_secret(secret)?,
        None => ctx.config.admin.clone(),
    };
    let outcome = ops::invoke_contract(
        &ctx.rpc,
        &ctx.config,
        &ctx.book,
        &source,
        &args.contract,
        &args.method,
        parsed,
    )
    .await?;
    println!(
        "{} {}.{} in tx {}",
        "invoked".green().bold(),
        args.contract,
        args.method,
        outcome.hash
    );
    Ok(())
}

pub async fn bump_instance(global: &GlobalArgs, args: BumpInstanceArgs) -> Result<()> {
    let ctx = context(global)?;
    let admin = ctx.config.admin.clone();
    ops::bump_contract_instance(&ctx.rpc, &ctx.config, &ctx.book, &admin, &args.contract).await?;
    println!("{} instance of {}", "bumped".green().bold(), args.contract);
    Ok(())
}

pub async fn bump_code(global: &GlobalArgs, args: BumpCodeArgs) -> Result<()> {
    let ctx = context(global)?;
    let admin = ctx.config.admin.clone();
    ops::bump_contract_code(&ctx.rpc, &ctx.config, &ctx.book, &admin, &args.wasm).await?;
    println!("{} code of {}", "bumped".green().bold(), args.wasm);
    Ok(())
}

pub async fn airdrop(global: &GlobalArgs, args: AirdropArgs) -> Result<()> {
    let ctx = context(global)?;
    let account = args
        .account
        .unwrap_or_else(|| ctx.config.admin.public_key());
    ops::airdrop_account(&ctx.rpc, &ctx.config, &account).await?;
    Ok(())
}

/// Full bootstrap: fund the deployer, install every artifact, deploy and
/// initialize the factory and router, then extend all TTLs.
pub async fn setup(global: &GlobalArgs, args: SetupArgs) -> Result<()> {
    let mut ctx = context(global)?;
    let admin = ctx.config.admin.clone();

    if !args.no_airdrop {
        ops::airdrop_account(&ctx.rpc, &ctx.config, &admin.public_key()).await?;
    }

    for key in CONTRACT_KEYS {
        ops::install_contract(
            &ctx.rpc,
            &ctx.config,
            &mut ctx.book,
            &ctx.artifacts,
            &admin,
            key,
        )
        .await?;
    }

    let factory_id = ops::deploy_contract(
        &ctx.rpc,
        &ctx.config,
        &mut ctx.book,
        &admin,
        "factory",
        "factory",
    )
    .await?;
    let pair_hash = ctx.book.wasm_hash("pair")?;
    ops::invoke_contract(
        &ctx.rpc,
        &ctx.config,
        &ctx.book,
        &admin,
        "factory",
        "initialize",
        vec![
            ScVal::Address(admin.sc_address()),
            ScVal::Bytes(ScBytes(pair_hash.to_vec().try_into()?)),
        ],
    )
    .await?;

    let router_id = ops::deploy_contract(
        &ctx.rpc,
        &ctx.config,
        &mut ctx.book,
        &admin,
        "router",
        "router",
    )
    .await?;
    ops::invoke_contract(
        &ctx.rpc,
        &ctx.config,
        &ctx.book,
        &admin,
        "router",
        "initialize",
        vec![ScVal::Address(scval::parse_address(&factory_id)?)],
    )
    .await?;

    for key in ["factory", "router"] {
        ops::bump_contract_instance(&ctx.rpc, &ctx.config, &ctx.book, &admin, key).await?;
    }
    for key in CONTRACT_KEYS {
        ops::bump_contract_code(&ctx.rpc, &ctx.config, &ctx.book, &admin, key).await?;
    }

    println!(
        "{} factory {} router {}",
        "setup complete".green().bold(),
        factory_id,
        router_id
    );
    Ok(())
}
