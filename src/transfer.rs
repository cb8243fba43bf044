//! Batch transfer orchestration
//!
//! A request runs through a fixed, linear pipeline:
//!
//! 1. parse the send mode
//! 2. decode and validate the `{address: amount}` body
//! 3. fetch the masterchain head
//! 4. check the wallet balance against the batch total
//! 5. encode the shared comment
//! 6. build one message per destination
//! 7. submit everything as one transaction and wait for inclusion
//!
//! Nothing is retried. The first failing step ends the request.
//!
//! # Example
//! ```no_run
//! use std::sync::Arc;
//! use ton_batch_sender::client::RpcClient;
//! use ton_batch_sender::transfer::{OrchestratorConfig, TransferOrchestrator};
//! use ton_batch_sender::wallet::WalletHandle;
//! use ton_batch_sender::WalletVersion;
//! use secrecy::SecretString;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Arc::new(RpcClient::new("http://127.0.0.1:8081/jsonrpc"));
//! let seed = SecretString::new("word ".repeat(24));
//! let wallet = WalletHandle::from_seed(&*client, &seed, WalletVersion::HighloadV2R2).await?;
//!
//! let orchestrator = TransferOrchestrator::new(client, wallet, OrchestratorConfig::default());
//! let response = orchestrator
//!     .send_transactions(Some("1"), Some("payout"), br#"{"UQABAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAZAm":"1.5"}"#)
//!     .await?;
//! println!("{} {}", response.tx_hash, response.link);
//! # Ok(())
//! # }
//! ```

use crate::address::parse_address;
use crate::amount::{parse_amount, total_amount};
use crate::balance::BalanceGuard;
use crate::batch::{build_messages, ensure_batch_size};
use crate::client::ChainClient;
use crate::error::{Error, Result};
use crate::types::{
    SendMode, TransactionReceipt, TransferEntry, TransferRequest, TransferResponse,
};
use crate::utils::format_ton;
use crate::wallet::WalletHandle;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

/// Default explorer prefix for transaction links
pub const DEFAULT_EXPLORER_URL: &str = "https://tonscan.org/tx/";

/// Default bound on the wait for on-chain confirmation
pub const DEFAULT_CONFIRMATION_TIMEOUT: Duration = Duration::from_secs(120);

/// Tunables for [`TransferOrchestrator`]
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    pub confirmation_timeout: Duration,
    pub explorer_url: String,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            confirmation_timeout: DEFAULT_CONFIRMATION_TIMEOUT,
            explorer_url: DEFAULT_EXPLORER_URL.to_string(),
        }
    }
}

/// Entry point for batch transfers
///
/// Owns the process-wide wallet. Requests may run concurrently up to the
/// submission step; submissions are serialized on the wallet lock.
///
/// The confirmation timeout starts before the wallet lock is taken, so time
/// spent queued behind another submission counts against it. A request that
/// times out while still queued has sent nothing.
pub struct TransferOrchestrator {
    client: Arc<dyn ChainClient>,
    /// Read-only copy of the wallet identity used for balance queries
    wallet_view: WalletHandle,
    wallet: Mutex<WalletHandle>,
    config: OrchestratorConfig,
}

impl TransferOrchestrator {
    pub fn new(
        client: Arc<dyn ChainClient>,
        wallet: WalletHandle,
        config: OrchestratorConfig,
    ) -> Self {
        Self {
            client,
            wallet_view: wallet.clone(),
            wallet: Mutex::new(wallet),
            config,
        }
    }

    pub fn wallet_address(&self) -> &str {
        self.wallet_view.address()
    }

    /// Handle one `sendTransactions` call from raw HTTP inputs
    ///
    /// # Arguments
    /// * `send_mode` - `send_mode` query parameter, decimal 0-255
    /// * `comment` - `comment` query parameter; absent means an empty comment
    /// * `body` - JSON object mapping destination addresses to TON amounts
    pub async fn send_transactions(
        &self,
        send_mode: Option<&str>,
        comment: Option<&str>,
        body: &[u8],
    ) -> Result<TransferResponse> {
        let send_mode = parse_send_mode(send_mode)?;
        tracing::info!("Send mode: {}", send_mode.0);
        tracing::info!("Comment: {:?}", comment.unwrap_or_default());

        let transfers = decode_transfers(body)?;
        tracing::info!("Transactions: {:?}", transfers);

        let request = TransferRequest {
            transfers,
            send_mode,
            comment: comment.map(str::to_string),
        };
        let receipt = self.execute(&request).await?;

        let response = TransferResponse {
            tx_hash: receipt.hash_base64(),
            link: receipt.explorer_link(&self.config.explorer_url),
        };
        tracing::info!("Transaction sent, hash: {}", response.tx_hash);
        tracing::info!("Explorer link: {}", response.link);
        Ok(response)
    }

    /// Run the balance check, build the batch and submit it
    pub async fn execute(&self, request: &TransferRequest) -> Result<TransactionReceipt> {
        let entries = validate_transfers(&request.transfers)?;
        let required = total_amount(entries.iter().map(|entry| entry.amount))?;

        let block = self
            .client
            .current_masterchain_info()
            .await
            .map_err(|e| Error::ChainUnavailable(format!("masterchain info: {}", e)))?;

        BalanceGuard::new(self.client.as_ref(), &self.wallet_view)
            .check(&block, required)
            .await?
            .into_result()?;

        let comment = self
            .client
            .create_comment_cell(request.comment.as_deref().unwrap_or_default())
            .await
            .map_err(|e| Error::CommentEncodingFailed(e.to_string()))?;

        let messages = build_messages(&entries, request.send_mode, &comment)?;

        tracing::info!(
            "Sending {} messages ({}) and waiting for confirmation...",
            messages.len(),
            format_ton(required)
        );

        let timeout = self.config.confirmation_timeout;
        let submission = async {
            let mut wallet = self.wallet.lock().await;
            wallet
                .send_many_wait_tx_hash(self.client.as_ref(), &messages)
                .await
        };
        match tokio::time::timeout(timeout, submission).await {
            Ok(Ok(receipt)) => Ok(receipt),
            Ok(Err(e)) => Err(Error::SubmissionFailed(e.to_string())),
            Err(_) => {
                tracing::warn!(
                    "Submission not confirmed within {:?}; the transaction may still be included",
                    timeout
                );
                Err(Error::SubmissionTimeout(timeout.as_secs()))
            }
        }
    }
}

/// Parse the `send_mode` query parameter
pub fn parse_send_mode(raw: Option<&str>) -> Result<SendMode> {
    raw.ok_or_else(|| Error::InvalidSendMode("send_mode is required".to_string()))?
        .parse()
}

/// Decode the request body into destination → amount pairs
pub fn decode_transfers(body: &[u8]) -> Result<BTreeMap<String, String>> {
    let transfers: BTreeMap<String, String> = serde_json::from_slice(body).map_err(|e| {
        tracing::warn!("Json decode err: {}", e);
        Error::MalformedRequest(e.to_string())
    })?;
    if transfers.is_empty() {
        return Err(Error::MalformedRequest("no transfers in request".to_string()));
    }
    Ok(transfers)
}

/// Validate every destination and amount, preserving key order
pub fn validate_transfers(transfers: &BTreeMap<String, String>) -> Result<Vec<TransferEntry>> {
    if transfers.is_empty() {
        return Err(Error::MalformedRequest("no transfers in request".to_string()));
    }
    ensure_batch_size(transfers.len())?;

    transfers
        .iter()
        .map(|(address, amount)| {
            Ok(TransferEntry {
                destination: parse_address(address)?,
                amount: parse_amount(amount)?,
            })
        })
        .collect()
}
