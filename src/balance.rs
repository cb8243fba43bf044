//! Balance check run before a batch is submitted
//!
//! The check is advisory. The balance can change between the read here and
//! the submission that follows, and nothing re-validates it inside the
//! submission lock.

use crate::client::ChainClient;
use crate::error::{Error, Result};
use crate::types::BlockRef;
use crate::utils::format_ton;
use crate::wallet::WalletHandle;

/// Outcome of a balance check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceDecision {
    Allow { available: u64, required: u64 },
    Deny { available: u64, required: u64 },
}

impl BalanceDecision {
    /// Compare a balance against the requested total; equal balances pass
    pub fn evaluate(available: u64, required: u64) -> Self {
        if available >= required {
            BalanceDecision::Allow {
                available,
                required,
            }
        } else {
            BalanceDecision::Deny {
                available,
                required,
            }
        }
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self, BalanceDecision::Allow { .. })
    }

    /// Turn a denial into [`Error::InsufficientBalance`]
    pub fn into_result(self) -> Result<()> {
        match self {
            BalanceDecision::Allow { .. } => Ok(()),
            BalanceDecision::Deny {
                available,
                required,
            } => Err(Error::InsufficientBalance {
                required,
                available,
            }),
        }
    }
}

/// Fetches the wallet balance and compares it with a requested spend
pub struct BalanceGuard<'a> {
    client: &'a dyn ChainClient,
    wallet: &'a WalletHandle,
}

impl<'a> BalanceGuard<'a> {
    pub fn new(client: &'a dyn ChainClient, wallet: &'a WalletHandle) -> Self {
        Self { client, wallet }
    }

    /// Check that the wallet holds at least `required` nanotons at `block`
    pub async fn check(&self, block: &BlockRef, required: u64) -> Result<BalanceDecision> {
        let available = self
            .wallet
            .get_balance(self.client, block)
            .await
            .map_err(|e| Error::ChainUnavailable(format!("balance fetch failed: {}", e)))?;

        let decision = BalanceDecision::evaluate(available, required);
        tracing::info!(
            "Wallet balance {}, requested {} ({})",
            format_ton(available),
            format_ton(required),
            if decision.is_allowed() { "allowed" } else { "denied" }
        );
        Ok(decision)
    }
}
