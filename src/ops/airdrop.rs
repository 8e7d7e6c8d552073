//! Friendbot funding for test networks.

use crate::config::Config;
use crate::rpc::Client;
use crate::Result;
use tracing::info;

/// Fund `account` through the network's friendbot.
///
/// Failures are logged and swallowed: the overwhelmingly common cause is the
/// account already existing, which is exactly the state the caller wants.
/// Networks without a friendbot (mainnet) are skipped outright.
#[tracing::instrument(skip_all, fields(account = account))]
pub async fn airdrop_account(rpc: &Client, config: &Config, account: &str) -> Result<()> {
    let Some(friendbot) = config.friendbot_url.as_deref() else {
        info!(network = %config.network, "no friendbot on this network, skipping airdrop");
        return Ok(());
    };

    info!("requesting airdrop");
    match rpc.fund_account(friendbot, account).await {
        Ok(()) => info!("funded"),
        Err(err) => info!(error = %err, "not funded, assuming the account already exists"),
    }
    Ok(())
}
