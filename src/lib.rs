//! # TON Batch Sender
//!
//! An HTTP service that pays many TON destinations from one custodial wallet
//! in a single transaction.
//!
//! A caller posts `{address: amount}` pairs together with a send mode and an
//! optional comment. The service checks that the wallet can cover the batch,
//! builds one outbound message per destination, submits them as one
//! transaction and answers with the confirmed hash and an explorer link.
//!
//! ## Features
//!
//! - **Exact amounts**: decimal TON strings are converted to nanotons with
//!   integer arithmetic
//! - **Balance guard**: batches the wallet cannot cover are refused before
//!   anything is signed
//! - **Serialized submissions**: one in-flight transaction per wallet
//! - **Bounded confirmation wait**: timeouts are reported separately from
//!   failures
//!
//! Key derivation, signing and liteserver access are handled by a wallet
//! daemon reached through [`client::ChainClient`].
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use ton_batch_sender::api;
//! use ton_batch_sender::client::RpcClient;
//! use ton_batch_sender::transfer::{OrchestratorConfig, TransferOrchestrator};
//! use ton_batch_sender::wallet::WalletHandle;
//! use ton_batch_sender::WalletVersion;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Arc::new(RpcClient::new("http://127.0.0.1:8081/jsonrpc"));
//! let seed = ton_batch_sender::config::seed_phrase_from_env()?;
//! let wallet = WalletHandle::from_seed(&*client, &seed, WalletVersion::HighloadV2R2).await?;
//!
//! let orchestrator = Arc::new(TransferOrchestrator::new(client, wallet, OrchestratorConfig::default()));
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8888").await?;
//! axum::serve(listener, api::router(orchestrator)).await?;
//! # Ok(())
//! # }
//! ```

pub mod address;
pub mod amount;
pub mod api;
pub mod balance;
pub mod batch;
pub mod client;
pub mod config;
pub mod error;
pub mod rpc;
pub mod transfer;
pub mod types;
pub mod wallet;

pub use error::{Error, Result};

/// Re-export commonly used types
pub use types::*;

/// Re-export utility functions
pub use types::utils;

/// Re-export the orchestrator entry point
pub use transfer::{OrchestratorConfig, TransferOrchestrator};
