// SPDX-License-Identifier: AGPL-3.0-or-later

//! Scan-mint-rescan orchestration.
//!
//! The sequencing policy shared by the top-level commands: scan the
//! signer's inventory, mint one token when it is empty, wait for the
//! mint to confirm, then re-scan. The confirmation wait completes
//! before the re-scan, so the second snapshot observes chain state at
//! least as fresh as the mint.

use std::time::Duration;

use alloy::primitives::Address;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::blockchain::confirm::{await_confirmations, ConfirmationOutcome};
use crate::blockchain::types::{Inventory, Submission, ROUTINE_CONFIRMATIONS};
use crate::blockchain::ContractBackend;
use crate::error::ClientError;
use crate::scanner::InventoryScanner;
use crate::submitter::Submitter;

/// Inventory snapshots around an optional mint.
#[derive(Debug, Clone)]
pub struct MintReport {
    /// Snapshot before any mint.
    pub before: Inventory,
    /// The mint submission, when one was needed.
    pub minted: Option<Submission>,
    /// Snapshot after the mint confirmed, or a copy of `before` when no
    /// mint was needed.
    pub after: Inventory,
}

/// Ensure `owner` holds at least one token, minting one if necessary.
pub async fn ensure_holdings<B: ContractBackend + Sync>(
    backend: &B,
    owner: Address,
    confirmation_deadline: Duration,
    cancel: &CancellationToken,
) -> Result<MintReport, ClientError> {
    let scanner = InventoryScanner::new(backend);

    let before = scanner.scan(owner).await?;
    info!(
        owner = %owner,
        balance = before.balance,
        tokens = ?before.tokens,
        "inventory before"
    );

    if !before.is_empty() {
        return Ok(MintReport {
            after: before.clone(),
            before,
            minted: None,
        });
    }

    let submission = Submitter::with_cancellation(backend, cancel.clone())
        .mint(owner)
        .await?;

    match await_confirmations(
        backend,
        submission.tx_hash,
        ROUTINE_CONFIRMATIONS,
        confirmation_deadline,
        cancel,
    )
    .await?
    {
        ConfirmationOutcome::Confirmed { .. } => {}
        ConfirmationOutcome::Reverted { block_number } => {
            return Err(ClientError::Reverted(format!(
                "mint {} reverted in block {block_number}",
                submission.tx_hash
            )));
        }
        ConfirmationOutcome::TimedOut => {
            return Err(ClientError::ConfirmationTimeout {
                tx_hash: submission.tx_hash.to_string(),
                waited_secs: confirmation_deadline.as_secs(),
            });
        }
    }

    let after = scanner.scan(owner).await?;
    info!(
        owner = %owner,
        balance = after.balance,
        tokens = ?after.tokens,
        "inventory after mint"
    );

    Ok(MintReport {
        before,
        minted: Some(submission),
        after,
    })
}
