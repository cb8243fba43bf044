//! Client implementations for reaching the TON wallet daemon
use crate::error::{Error, Result};
use crate::rpc::{
    BalanceResult, CommentResult, GetBalanceParams, LiteserverConfig, RpcRequest, RpcResponse,
    SendManyParams, SendManyResult, WalletFromSeedParams, WalletInfo,
};
use crate::types::{BlockRef, CommentPayload, PaymentInstruction, WalletVersion};
use async_trait::async_trait;
use base64::Engine;
use rand::random;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Operations the batch sender needs from the chain.
///
/// Key derivation, signing, cell encoding and liteserver traffic all live
/// behind this trait. [`RpcClient`] is the production implementation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Add a liteserver to the connection pool.
    async fn add_connection(&self, liteserver: &LiteserverConfig) -> Result<()>;

    /// Derive and load a wallet from mnemonic words.
    async fn wallet_from_seed(&self, words: &[String], version: WalletVersion)
        -> Result<WalletInfo>;

    /// Current masterchain head.
    async fn current_masterchain_info(&self) -> Result<BlockRef>;

    /// Balance of `address` in nanotons at `block`.
    async fn get_balance(&self, address: &str, block: &BlockRef) -> Result<u64>;

    /// Encode a text comment into a message body cell.
    async fn create_comment_cell(&self, text: &str) -> Result<CommentPayload>;

    /// Sign and send all messages in one external message, then wait until the
    /// resulting transaction is included and return its hash.
    async fn send_many_wait_tx_hash(
        &self,
        wallet_id: &str,
        messages: &[PaymentInstruction],
    ) -> Result<Vec<u8>>;
}

/// JSON-RPC client for the wallet daemon.
///
/// The daemon owns the liteserver connection pool and the wallet keys; this
/// client only ships typed requests to it.
pub struct RpcClient {
    endpoint: String,
    http: reqwest::Client,
    auth: Option<String>,
}

impl RpcClient {
    /// Create a new RPC client without authentication.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            http: reqwest::Client::new(),
            auth: None,
        }
    }

    /// Create a new RPC client with HTTP basic authentication.
    pub fn with_auth(endpoint: impl Into<String>, username: String, password: String) -> Self {
        let mut client = Self::new(endpoint);
        let credentials = format!("{}:{}", username, password);
        client.auth = Some(base64::engine::general_purpose::STANDARD.encode(credentials));
        client
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Call a JSON-RPC method and deserialize the result into the requested type.
    pub async fn call<T, P>(&self, method: &str, params: P) -> Result<T>
    where
        T: DeserializeOwned,
        P: Serialize,
    {
        let params = serde_json::to_value(params)?;
        let request = RpcRequest {
            jsonrpc: "2.0".to_string(),
            id: random::<u64>(),
            method: method.to_string(),
            params,
        };
        tracing::debug!("RPC call {} (id {})", method, request.id);

        let mut req = self
            .http
            .post(&self.endpoint)
            .json(&request)
            .header("Content-Type", "application/json");

        if let Some(ref auth) = self.auth {
            req = req.header("Authorization", format!("Basic {}", auth));
        }

        let response = req.send().await?;

        if !response.status().is_success() {
            return Err(Error::Rpc(format!(
                "RPC request failed with status: {}",
                response.status()
            )));
        }

        let rpc_response: RpcResponse<T> = response.json().await?;

        if let Some(error) = rpc_response.error {
            return Err(Error::Rpc(format!(
                "RPC error {}: {}",
                error.code, error.message
            )));
        }

        rpc_response
            .result
            .ok_or_else(|| Error::Rpc("RPC response missing result".to_string()))
    }
}

#[async_trait]
impl ChainClient for RpcClient {
    async fn add_connection(&self, liteserver: &LiteserverConfig) -> Result<()> {
        let _: serde_json::Value = self.call("addConnection", liteserver).await?;
        Ok(())
    }

    async fn wallet_from_seed(
        &self,
        words: &[String],
        version: WalletVersion,
    ) -> Result<WalletInfo> {
        self.call("walletFromSeed", WalletFromSeedParams { words, version })
            .await
    }

    async fn current_masterchain_info(&self) -> Result<BlockRef> {
        self.call("getMasterchainInfo", serde_json::json!({})).await
    }

    async fn get_balance(&self, address: &str, block: &BlockRef) -> Result<u64> {
        let result: BalanceResult = self
            .call("getWalletBalance", GetBalanceParams { address, block })
            .await?;
        result
            .balance
            .parse::<u64>()
            .map_err(|e| Error::Rpc(format!("Invalid balance {:?}: {}", result.balance, e)))
    }

    async fn create_comment_cell(&self, text: &str) -> Result<CommentPayload> {
        let result: CommentResult = self
            .call("createCommentCell", serde_json::json!({ "text": text }))
            .await?;
        Ok(result.boc)
    }

    async fn send_many_wait_tx_hash(
        &self,
        wallet_id: &str,
        messages: &[PaymentInstruction],
    ) -> Result<Vec<u8>> {
        let result: SendManyResult = self
            .call("sendManyWaitTxHash", SendManyParams { wallet_id, messages })
            .await?;
        base64::engine::general_purpose::STANDARD
            .decode(&result.hash)
            .map_err(|e| Error::Rpc(format!("Invalid transaction hash {:?}: {}", result.hash, e)))
    }
}
