//! JSON-RPC wire types for the wallet daemon

use crate::types::{BlockRef, CommentPayload, PaymentInstruction, WalletVersion};
use serde::{Deserialize, Serialize};

/// RPC request structure
#[derive(Debug, Serialize)]
pub(crate) struct RpcRequest {
    pub jsonrpc: String,
    pub id: u64,
    pub method: String,
    pub params: serde_json::Value,
}

/// RPC response structure
#[derive(Debug, Deserialize)]
#[allow(dead_code)]
pub(crate) struct RpcResponse<T> {
    pub jsonrpc: String,
    pub id: u64,
    pub result: Option<T>,
    pub error: Option<RpcError>,
}

/// RPC error structure
#[derive(Debug, Deserialize)]
#[allow(dead_code)]
pub(crate) struct RpcError {
    pub code: i32,
    pub message: String,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

/// Liteserver the daemon should add to its connection pool
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LiteserverConfig {
    /// `host:port`
    pub address: String,
    /// Base64 ed25519 public key of the liteserver
    pub public_key: String,
}

/// Params for `walletFromSeed`
#[derive(Debug, Serialize)]
pub(crate) struct WalletFromSeedParams<'a> {
    pub words: &'a [String],
    pub version: WalletVersion,
}

/// Result of `walletFromSeed`
#[derive(Debug, Clone, Deserialize)]
pub struct WalletInfo {
    /// Daemon-side session id of the loaded wallet
    pub wallet_id: String,
    pub address: String,
}

/// Params for `getWalletBalance`
#[derive(Debug, Serialize)]
pub(crate) struct GetBalanceParams<'a> {
    pub address: &'a str,
    pub block: &'a BlockRef,
}

/// Result of `getWalletBalance`
#[derive(Debug, Deserialize)]
pub(crate) struct BalanceResult {
    /// Nanotons as a decimal string, as returned by the daemon
    pub balance: String,
}

/// Result of `createCommentCell`
#[derive(Debug, Deserialize)]
pub(crate) struct CommentResult {
    pub boc: CommentPayload,
}

/// Params for `sendManyWaitTxHash`
#[derive(Debug, Serialize)]
pub(crate) struct SendManyParams<'a> {
    pub wallet_id: &'a str,
    pub messages: &'a [PaymentInstruction],
}

/// Result of `sendManyWaitTxHash`
#[derive(Debug, Deserialize)]
pub(crate) struct SendManyResult {
    /// Standard base64 transaction hash
    pub hash: String,
}
