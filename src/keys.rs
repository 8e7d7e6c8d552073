//! Ed25519 keypairs and their strkey / XDR representations.

use crate::{DeployerError, Result};
use ed25519_dalek::{Signer, SigningKey, VerifyingKey};
use rand::RngCore;
use stellar_xdr::curr::{
    AccountId, DecoratedSignature, MuxedAccount, PublicKey, ScAddress, Signature, SignatureHint,
    Uint256,
};

/// A deployer identity: an ed25519 signing key plus its public half.
#[derive(Clone)]
pub struct Keypair {
    signing: SigningKey,
    verifying: VerifyingKey,
}

impl Keypair {
    /// Decode a strkey-encoded secret seed (`S...`).
    pub fn from_secret(secret: &str) -> Result<Self> {
        let seed = stellar_strkey::ed25519::PrivateKey::from_string(secret)
            .map_err(|_| DeployerError::Config("invalid secret key".to_string()))?;
        let signing = SigningKey::from_bytes(&seed.0);
        let verifying = signing.verifying_key();
        Ok(Keypair { signing, verifying })
    }

    /// Generate a fresh keypair from the OS entropy source.
    pub fn random() -> Self {
        let mut seed = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut seed);
        let signing = SigningKey::from_bytes(&seed);
        let verifying = signing.verifying_key();
        Keypair { signing, verifying }
    }

    /// Public key as a `G...` strkey.
    pub fn public_key(&self) -> String {
        stellar_strkey::ed25519::PublicKey(self.verifying.to_bytes()).to_string()
    }

    /// Secret seed as an `S...` strkey.
    pub fn secret_key(&self) -> String {
        stellar_strkey::ed25519::PrivateKey(self.signing.to_bytes()).to_string()
    }

    pub fn account_id(&self) -> AccountId {
        AccountId(PublicKey::PublicKeyTypeEd25519(Uint256(
            self.verifying.to_bytes(),
        )))
    }

    pub fn muxed_account(&self) -> MuxedAccount {
        MuxedAccount::Ed25519(Uint256(self.verifying.to_bytes()))
    }

    pub fn sc_address(&self) -> ScAddress {
        ScAddress::Account(self.account_id())
    }

    /// Sign a 32-byte payload hash.
    ///
    /// The hint is the last four bytes of the public key, which is how
    /// validators match a signature to a signer.
    pub fn sign_decorated(&self, payload_hash: &[u8; 32]) -> Result<DecoratedSignature> {
        let signature = self.signing.sign(payload_hash);
        let public = self.verifying.to_bytes();
        let hint = SignatureHint([public[28], public[29], public[30], public[31]]);
        Ok(DecoratedSignature {
            hint,
            signature: Signature(signature.to_bytes().to_vec().try_into()?),
        })
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
