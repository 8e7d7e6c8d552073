//! Network presets and environment configuration.
//!
//! Every command resolves a [`Config`] first: pick the built-in defaults for
//! the chosen network, then let the environment override them. A `.env` file
//! is honored because `main` loads it before anything reads the environment.

use crate::keys::Keypair;
use crate::{DeployerError, Result};
use sha2::{Digest, Sha256};
use std::env;
use std::fmt;

/// Networks the deployer knows out of the box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Network {
    Standalone,
    Testnet,
    Futurenet,
    Mainnet,
}

impl Network {
    /// Default RPC endpoint, if the network has a well-known one.
    fn default_rpc_url(self) -> Option<&'static str> {
        match self {
            Network::Standalone => Some("http://localhost:8000/soroban/rpc"),
            Network::Testnet => Some("https://soroban-testnet.stellar.org"),
            Network::Futurenet => Some("https://rpc-futurenet.stellar.org"),
            // No canonical public endpoint; the operator must provide one.
            Network::Mainnet => None,
        }
    }

    fn default_passphrase(self) -> &'static str {
        match self {
            Network::Standalone => "Standalone Network ; February 2017",
            Network::Testnet => "Test SDF Network ; September 2015",
            Network::Futurenet => "Test SDF Future Network ; October 2022",
            Network::Mainnet => "Public Global Stellar Network ; September 2015",
        }
    }

    fn default_friendbot(self) -> Option<&'static str> {
        match self {
            Network::Standalone => Some("http://localhost:8000/friendbot"),
            Network::Testnet => Some("https://friendbot.stellar.org"),
            Network::Futurenet => Some("https://friendbot-futurenet.stellar.org"),
            Network::Mainnet => None,
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Network::Standalone => "standalone",
            Network::Testnet => "testnet",
            Network::Futurenet => "futurenet",
            Network::Mainnet => "mainnet",
        };
        write!(f, "{}", s)
    }
}

/// Resolved settings for one network.
pub struct Config {
    pub network: Network,
    pub rpc_url: String,
    pub passphrase: String,
    pub friendbot_url: Option<String>,
    /// Deployer account; signs every transaction unless a command overrides
    /// the source.
    pub admin: Keypair,
}

impl Config {
    /// Resolve the configuration for `network`.
    ///
    /// Environment overrides: `SOROBAN_RPC_URL`, `SOROBAN_NETWORK_PASSPHRASE`
    /// and `FRIENDBOT_URL`. The deployer secret comes from
    /// `ADMIN_SECRET_KEY` and is required.
    pub fn load(network: Network) -> Result<Self> {
        let rpc_url = env::var("SOROBAN_RPC_URL")
            .ok()
            .or_else(|| network.default_rpc_url().map(str::to_string))
            .ok_or_else(|| {
                DeployerError::Config(format!(
                    "no RPC URL known for {}; set SOROBAN_RPC_URL",
                    network
                ))
            })?;

        let passphrase = env::var("SOROBAN_NETWORK_PASSPHRASE")
            .unwrap_or_else(|_| network.default_passphrase().to_string());

        let friendbot_url = env::var("FRIENDBOT_URL")
            .ok()
            .or_else(|| network.default_friendbot().map(str::to_string));

        let secret = env::var("ADMIN_SECRET_KEY")
            .map_err(|_| DeployerError::Config("ADMIN_SECRET_KEY is not set".to_string()))?;
        let admin = Keypair::from_secret(&secret)?;

        Ok(Config {
            network,
            rpc_url,
            passphrase,
            friendbot_url,
            admin,
        })
    }

    /// SHA-256 of the network passphrase.
    ///
    /// This is the network ID that goes into contract ID preimages and
    /// transaction signature payloads.
    pub fn network_id(&self) -> [u8; 32] {
        Sha256::digest(self.passphrase.as_bytes()).into()
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::Keypair;

    fn config_for(network: Network) -> Config {
        Config {
            network,
            rpc_url: network.default_rpc_url().unwrap_or("http://example").to_string(),
            passphrase: network.default_passphrase().to_string(),
            friendbot_url: network.default_friendbot().map(str::to_string),
            admin: Keypair::random(),
        }
    }

    #[test]
    fn testnet_network_id_matches_known_value() {
        let config = config_for(Network::Testnet);
        assert_eq!(
            hex::encode(config.network_id()),
            "cee0302d59844d32bdca915c8203dd44b33fbb7edc19051ea37abedf28ecd472"
        );
    }

    #[test]
    fn mainnet_has_no_friendbot_and_no_default_rpc() {
        assert!(Network::Mainnet.default_friendbot().is_none());
        assert!(Network::Mainnet.default_rpc_url().is_none());
    }

    #[test]
    fn network_names_are_lowercase() {
        assert_eq!(Network::Standalone.to_string(), "standalone");
        assert_eq!(Network::Testnet.to_string(), "testnet");
        assert_eq!(Network::Futurenet.to_string(), "futurenet");
        assert_eq!(Network::Mainnet.to_string(), "mainnet");
    }

    #[test]
    fn network_id_depends_on_passphrase() {
        let testnet = config_for(Network::Testnet);
        let mainnet = config_for(Network::Mainnet);
        assert_ne!(testnet.network_id(), mainnet.network_id());
    }
}
