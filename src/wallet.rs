//! Custodial wallet handle

use crate::client::ChainClient;
use crate::error::{Error, Result};
use crate::types::{BlockRef, PaymentInstruction, TransactionReceipt, WalletVersion};
use secrecy::{ExposeSecret, SecretString};

/// Number of words in a standard TON mnemonic
pub const MNEMONIC_WORDS: usize = 24;

/// Process-wide wallet credential
///
/// Created once at startup from the seed phrase. Submitting a transaction
/// advances the wallet's signing state on the daemon side, so
/// [`WalletHandle::send_many_wait_tx_hash`] takes `&mut self`: callers that
/// share the handle must put it behind a lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletHandle {
    wallet_id: String,
    address: String,
    version: WalletVersion,
}

impl WalletHandle {
    /// Wrap a wallet the daemon has already loaded
    pub fn new(
        wallet_id: impl Into<String>,
        address: impl Into<String>,
        version: WalletVersion,
    ) -> Self {
        Self {
            wallet_id: wallet_id.into(),
            address: address.into(),
            version,
        }
    }

    /// Load the wallet described by `seed_phrase` on the daemon
    pub async fn from_seed(
        client: &dyn ChainClient,
        seed_phrase: &SecretString,
        version: WalletVersion,
    ) -> Result<Self> {
        let words = seed_words(seed_phrase)?;
        if words.len() != MNEMONIC_WORDS {
            tracing::warn!(
                "Seed phrase has {} words, expected {}",
                words.len(),
                MNEMONIC_WORDS
            );
        }

        let info = client.wallet_from_seed(&words, version).await?;
        Ok(Self {
            wallet_id: info.wallet_id,
            address: info.address,
            version,
        })
    }

    pub fn wallet_id(&self) -> &str {
        &self.wallet_id
    }

    /// Wallet address as reported by the daemon
    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn version(&self) -> WalletVersion {
        self.version
    }

    /// Balance in nanotons at `block`
    pub async fn get_balance(&self, client: &dyn ChainClient, block: &BlockRef) -> Result<u64> {
        client.get_balance(&self.address, block).await
    }

    /// Submit all messages as one transaction and wait for its inclusion
    pub async fn send_many_wait_tx_hash(
        &mut self,
        client: &dyn ChainClient,
        messages: &[PaymentInstruction],
    ) -> Result<TransactionReceipt> {
        let hash = client
            .send_many_wait_tx_hash(&self.wallet_id, messages)
            .await?;
        Ok(TransactionReceipt::new(hash))
    }
}

/// Split a space-separated mnemonic into words
pub fn seed_words(seed_phrase: &SecretString) -> Result<Vec<String>> {
    let words: Vec<String> = seed_phrase
        .expose_secret()
        .split_whitespace()
        .map(str::to_string)
        .collect();
    if words.is_empty() {
        return Err(Error::Config("SEED_PHRASE env is empty".to_string()));
    }
    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockChainClient;
    use crate::rpc::WalletInfo;

    #[test]
    fn test_seed_words() {
        let phrase = SecretString::new("  alpha beta\tgamma \n".to_string());
        assert_eq!(seed_words(&phrase).unwrap(), vec!["alpha", "beta", "gamma"]);

        let empty = SecretString::new("   ".to_string());
        assert!(matches!(seed_words(&empty), Err(Error::Config(_))));
    }

    #[tokio::test]
    async fn test_from_seed_uses_configured_version() {
        let mut client = MockChainClient::new();
        client
            .expect_wallet_from_seed()
            .withf(|words, version| words.len() == 24 && *version == WalletVersion::V4R2)
            .times(1)
            .returning(|_, _| {
                Ok(WalletInfo {
                    wallet_id: "w-1".to_string(),
                    address: "UQABAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAZAm".to_string(),
                })
            });

        let phrase = SecretString::new(vec!["word"; 24].join(" "));
        let wallet = WalletHandle::from_seed(&client, &phrase, WalletVersion::V4R2)
            .await
            .unwrap();
        assert_eq!(wallet.wallet_id(), "w-1");
        assert_eq!(wallet.version(), WalletVersion::V4R2);
        assert_eq!(
            wallet.address(),
            "UQABAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAZAm"
        );
    }

    #[test]
    fn test_from_seed_propagates_daemon_error() {
        let mut client = MockChainClient::new();
        client
            .expect_wallet_from_seed()
            .returning(|_, _| Err(Error::Rpc("bad mnemonic".to_string())));

        let phrase = SecretString::new("one two".to_string());
        let result = tokio_test::block_on(WalletHandle::from_seed(
            &client,
            &phrase,
            WalletVersion::default(),
        ));
        assert!(matches!(result, Err(Error::Rpc(_))));
    }
}
