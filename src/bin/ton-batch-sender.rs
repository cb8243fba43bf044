//! TON Batch Sender - HTTP service entry point
//!
//! Connects to the wallet daemon, loads the custodial wallet from
//! `SEED_PHRASE` and serves `POST /sendTransactions`. Any failure before the
//! listener is up aborts the process.

use anyhow::Context;
use clap::Parser;
use std::sync::Arc;
use ton_batch_sender::api;
use ton_batch_sender::client::{ChainClient, RpcClient};
use ton_batch_sender::config::{load_dotenv, seed_phrase_from_env, Config};
use ton_batch_sender::transfer::TransferOrchestrator;
use ton_batch_sender::wallet::WalletHandle;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv = load_dotenv();
    let config = Config::parse();

    let default_filter = if config.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .init();

    if let Err(e) = dotenv {
        tracing::warn!("{}", e);
    }
    config.validate()?;

    let client = match (&config.rpc_user, &config.rpc_password) {
        (Some(user), Some(password)) => {
            RpcClient::with_auth(&config.rpc_url, user.clone(), password.clone())
        }
        _ => RpcClient::new(&config.rpc_url),
    };
    tracing::info!("Wallet daemon: {}", client.endpoint());
    let client: Arc<dyn ChainClient> = Arc::new(client);

    client
        .add_connection(&config.liteserver())
        .await
        .with_context(|| format!("connection err: liteserver {}", config.liteserver))?;

    let seed = seed_phrase_from_env()?;
    let wallet = WalletHandle::from_seed(client.as_ref(), &seed, config.wallet_version)
        .await
        .context("FromSeed err")?;
    tracing::info!(
        "Wallet address: {} ({})",
        wallet.address(),
        wallet.version()
    );

    let orchestrator = Arc::new(TransferOrchestrator::new(
        client,
        wallet,
        config.orchestrator(),
    ));

    let listener = tokio::net::TcpListener::bind(config.listen)
        .await
        .with_context(|| format!("failed to bind {}", config.listen))?;
    tracing::info!("Listening on {}", config.listen);

    axum::serve(listener, api::router(orchestrator)).await?;
    Ok(())
}
