// SPDX-License-Identifier: AGPL-3.0-or-later

//! Confirmation waiting for submitted transactions.
//!
//! Polls the receipt and head block on an interval, bounded by a
//! caller-supplied deadline and a `CancellationToken`. Waiting never
//! blocks indefinitely when the network stalls.

use std::time::Duration;

use alloy::primitives::TxHash;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::backend::ContractBackend;
use super::types::TxInclusion;
use crate::error::ClientError;

/// Interval between inclusion polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(3);

/// Outcome of waiting for confirmations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationOutcome {
    /// The transaction reached the requested confirmation count.
    Confirmed {
        block_number: u64,
        confirmations: u64,
    },
    /// The transaction was included but the contract reverted it.
    Reverted { block_number: u64 },
    /// The deadline elapsed before the confirmation count was reached.
    TimedOut,
}

/// Wait until `tx_hash` has `confirmations` confirmations, the deadline
/// elapses, or the token is cancelled.
pub async fn await_confirmations<B: ContractBackend + Sync>(
    backend: &B,
    tx_hash: TxHash,
    confirmations: u64,
    deadline: Duration,
    cancel: &CancellationToken,
) -> Result<ConfirmationOutcome, ClientError> {
    let started = tokio::time::Instant::now();

    loop {
        if cancel.is_cancelled() {
            return Err(ClientError::Cancelled);
        }

        match backend.transaction_inclusion(tx_hash).await? {
            TxInclusion::Included {
                block_number,
                succeeded: false,
                ..
            } => {
                return Ok(ConfirmationOutcome::Reverted { block_number });
            }
            TxInclusion::Included {
                block_number,
                confirmations: seen,
                succeeded: true,
            } if seen >= confirmations => {
                info!(
                    tx_hash = %tx_hash,
                    block_number,
                    confirmations = seen,
                    "transaction confirmed"
                );
                return Ok(ConfirmationOutcome::Confirmed {
                    block_number,
                    confirmations: seen,
                });
            }
            TxInclusion::Included {
                confirmations: seen,
                ..
            } => {
                debug!(tx_hash = %tx_hash, seen, wanted = confirmations, "waiting for confirmations");
            }
            TxInclusion::Pending => {
                debug!(tx_hash = %tx_hash, "transaction pending");
            }
        }

        let remaining = deadline.saturating_sub(started.elapsed());
        if remaining.is_zero() {
            return Ok(ConfirmationOutcome::TimedOut);
        }

        tokio::select! {
            _ = tokio::time::sleep(DEFAULT_POLL_INTERVAL.min(remaining)) => {}
            _ = cancel.cancelled() => return Err(ClientError::Cancelled),
        }
    }
}
