//! Startup configuration
//!
//! Values come from command-line flags, falling back to environment variables
//! (optionally loaded from a `.env` file) and then to built-in defaults. The
//! seed phrase is only ever read from the environment.

use crate::error::{Error, Result};
use crate::rpc::LiteserverConfig;
use crate::transfer::{OrchestratorConfig, DEFAULT_EXPLORER_URL};
use crate::types::WalletVersion;
use clap::Parser;
use secrecy::SecretString;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

/// Environment variable holding the space-separated mnemonic
pub const SEED_PHRASE_ENV: &str = "SEED_PHRASE";

#[derive(Debug, Clone, Parser)]
#[command(name = "ton-batch-sender")]
#[command(about = "Pay many TON destinations in one highload wallet transaction", long_about = None)]
pub struct Config {
    /// Address the HTTP server listens on
    #[arg(long, env = "LISTEN_ADDR", default_value = "0.0.0.0:8888")]
    pub listen: SocketAddr,

    /// Wallet daemon JSON-RPC endpoint
    #[arg(long, env = "TON_RPC_URL", default_value = "http://127.0.0.1:8081/jsonrpc")]
    pub rpc_url: String,

    /// Wallet daemon RPC username
    #[arg(long, env = "TON_RPC_USER")]
    pub rpc_user: Option<String>,

    /// Wallet daemon RPC password
    #[arg(long, env = "TON_RPC_PASSWORD", hide_env_values = true)]
    pub rpc_password: Option<String>,

    /// Liteserver `host:port`
    #[arg(long, env = "LITESERVER_ADDR", default_value = "135.181.140.212:13206")]
    pub liteserver: String,

    /// Liteserver base64 public key
    #[arg(
        long,
        env = "LITESERVER_KEY",
        default_value = "K0t3+IWLOXHYMvMcrGZDPs+pn58a17LFbnXoQkKc2xw="
    )]
    pub liteserver_key: String,

    /// Wallet contract version (highload-v2r2, highload-v3, v3r2, v4r2, v5r1)
    #[arg(long, env = "WALLET_VERSION", default_value = "highload-v2r2")]
    pub wallet_version: WalletVersion,

    /// Seconds to wait for a submitted transaction to be included
    #[arg(long, env = "CONFIRMATION_TIMEOUT_SECS", default_value = "120")]
    pub confirmation_timeout_secs: u64,

    /// Explorer prefix for transaction links
    #[arg(long, env = "EXPLORER_URL", default_value = DEFAULT_EXPLORER_URL)]
    pub explorer_url: String,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    pub fn liteserver(&self) -> LiteserverConfig {
        LiteserverConfig {
            address: self.liteserver.clone(),
            public_key: self.liteserver_key.clone(),
        }
    }

    pub fn orchestrator(&self) -> OrchestratorConfig {
        OrchestratorConfig {
            confirmation_timeout: Duration::from_secs(self.confirmation_timeout_secs),
            explorer_url: self.explorer_url.clone(),
        }
    }

    /// Check values clap cannot validate on its own
    pub fn validate(&self) -> Result<()> {
        if self.confirmation_timeout_secs == 0 {
            return Err(Error::Config(
                "confirmation timeout must be at least one second".to_string(),
            ));
        }
        if !self.liteserver.contains(':') {
            return Err(Error::Config(format!(
                "liteserver must be host:port, got {:?}",
                self.liteserver
            )));
        }
        Ok(())
    }
}

/// Load `.env` from the working directory or its parents
///
/// A missing file is not an error. Must run before [`Config`] is parsed so
/// the loaded variables are visible to clap.
pub fn load_dotenv() -> Result<()> {
    dotenv_result(dotenvy::dotenv().map(|_| ()))
}

/// Load environment variables from a specific file
pub fn load_dotenv_from(path: impl AsRef<Path>) -> Result<()> {
    dotenv_result(dotenvy::from_path(path))
}

fn dotenv_result(result: std::result::Result<(), dotenvy::Error>) -> Result<()> {
    match result {
        Ok(()) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(Error::Config(format!("failed to load .env file: {}", e))),
    }
}

/// Read the wallet mnemonic from [`SEED_PHRASE_ENV`]
pub fn seed_phrase_from_env() -> Result<SecretString> {
    match std::env::var(SEED_PHRASE_ENV) {
        Ok(words) if !words.trim().is_empty() => Ok(SecretString::new(words)),
        _ => Err(Error::Config(format!("{} env is empty", SEED_PHRASE_ENV))),
    }
}
