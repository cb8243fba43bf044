//! Common types and data structures for the TON batch sender

use crate::address::TonAddress;
use crate::error::{Error, Result};
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Number of nanotons in one TON
pub const NANOTONS_PER_TON: u64 = 1_000_000_000;

/// Wallet contract version used for the custodial wallet
///
/// Highload wallets accept many outbound messages per external message, which
/// is what batch payouts need. The version is a deployment choice and is read
/// from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum WalletVersion {
    #[default]
    #[serde(rename = "highload-v2r2")]
    HighloadV2R2,
    #[serde(rename = "highload-v3")]
    HighloadV3,
    #[serde(rename = "v3r2")]
    V3R2,
    #[serde(rename = "v4r2")]
    V4R2,
    #[serde(rename = "v5r1")]
    V5R1,
}

impl WalletVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            WalletVersion::HighloadV2R2 => "highload-v2r2",
            WalletVersion::HighloadV3 => "highload-v3",
            WalletVersion::V3R2 => "v3r2",
            WalletVersion::V4R2 => "v4r2",
            WalletVersion::V5R1 => "v5r1",
        }
    }
}

impl fmt::Display for WalletVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WalletVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "highload-v2r2" | "highloadv2r2" => Ok(WalletVersion::HighloadV2R2),
            "highload-v3" | "highloadv3" => Ok(WalletVersion::HighloadV3),
            "v3r2" => Ok(WalletVersion::V3R2),
            "v4r2" => Ok(WalletVersion::V4R2),
            "v5r1" => Ok(WalletVersion::V5R1),
            other => Err(Error::Config(format!("Unknown wallet version: {}", other))),
        }
    }
}

/// Send mode flags forwarded verbatim on every outbound message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SendMode(pub u8);

impl FromStr for SendMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        s.parse::<u8>()
            .map(SendMode)
            .map_err(|e| Error::InvalidSendMode(format!("{:?}: {}", s, e)))
    }
}

/// A batch transfer request as received over HTTP
///
/// Destinations are kept in a `BTreeMap`, so keys are unique and the batch is
/// always built in the same order for the same input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    pub transfers: BTreeMap<String, String>,
    pub send_mode: SendMode,
    pub comment: Option<String>,
}

/// A destination whose address and amount have both been validated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferEntry {
    pub destination: TonAddress,
    /// Amount in nanotons
    pub amount: u64,
}

/// Masterchain head reference returned by the chain daemon
///
/// Passed back verbatim when querying account state so that balance reads
/// are pinned to a specific block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockRef {
    pub workchain: i32,
    pub shard: String,
    pub seqno: u32,
    pub root_hash: String,
    pub file_hash: String,
}

/// Encoded comment cell (base64 BOC) attached to every message in a batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentPayload(pub String);

/// One outbound message in a batch transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentInstruction {
    pub destination: String,
    /// Amount in nanotons
    pub amount: u64,
    pub mode: SendMode,
    pub body: CommentPayload,
    /// Always false: funds are delivered even to uninitialized accounts
    pub bounce: bool,
}

/// Confirmation of an included transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionReceipt {
    pub hash: Vec<u8>,
}

impl TransactionReceipt {
    pub fn new(hash: Vec<u8>) -> Self {
        Self { hash }
    }

    /// Standard base64 hash, as returned to API callers
    pub fn hash_base64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(&self.hash)
    }

    /// Explorer link using the URL-safe base64 form of the hash
    pub fn explorer_link(&self, explorer_url: &str) -> String {
        format!(
            "{}{}",
            explorer_url,
            base64::engine::general_purpose::URL_SAFE.encode(&self.hash)
        )
    }
}

/// Successful response body of `POST /sendTransactions`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferResponse {
    #[serde(rename = "txHash")]
    pub tx_hash: String,
    pub link: String,
}

/// Utility functions for TON amounts
pub mod utils {
    use super::NANOTONS_PER_TON;

    /// Convert nanotons to TON
    ///
    /// Lossy; only meant for display and logging.
    pub fn nanotons_to_ton(nanotons: u64) -> f64 {
        nanotons as f64 / NANOTONS_PER_TON as f64
    }

    /// Format a nanoton amount as an exact decimal TON string
    ///
    /// # Example
    /// ```
    /// use ton_batch_sender::utils::format_ton;
    ///
    /// assert_eq!(format_ton(1_500_000_000), "1.5 TON");
    /// assert_eq!(format_ton(2_000_000_000), "2 TON");
    /// ```
    pub fn format_ton(nanotons: u64) -> String {
        let whole = nanotons / NANOTONS_PER_TON;
        let frac = nanotons % NANOTONS_PER_TON;
        if frac == 0 {
            return format!("{} TON", whole);
        }
        let frac = format!("{:09}", frac);
        format!("{}.{} TON", whole, frac.trim_end_matches('0'))
    }
}
