// SPDX-License-Identifier: AGPL-3.0-or-later

//! Token inventory scanning.
//!
//! Reconstructs an address's holdings by querying `balanceOf` once and
//! then sweeping `ownerOf` over `0..totalSupply` in ascending order.
//! The sweep is O(totalSupply) external calls in the worst case and
//! dominates the cost of the whole client; the contract exposes no
//! enumeration index to do better against.

use alloy::primitives::{Address, U256};
use tracing::debug;

use crate::blockchain::types::Inventory;
use crate::blockchain::ContractBackend;
use crate::error::ClientError;

/// Termination policy for the ownership sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanPolicy {
    /// Stop once as many tokens as `balanceOf` reported are found.
    /// Correct only while ownership is stable during the scan.
    #[default]
    EarlyExit,
    /// Sweep all of `totalSupply` regardless of matches found.
    Exhaustive,
}

/// Scanner over a contract backend.
pub struct InventoryScanner<'a, B> {
    backend: &'a B,
    policy: ScanPolicy,
}

impl<'a, B: ContractBackend + Sync> InventoryScanner<'a, B> {
    /// Scanner with the default early-exit policy.
    pub fn new(backend: &'a B) -> Self {
        Self {
            backend,
            policy: ScanPolicy::default(),
        }
    }

    /// Scanner with an explicit termination policy.
    pub fn with_policy(backend: &'a B, policy: ScanPolicy) -> Self {
        Self { backend, policy }
    }

    /// Determine which token ids `owner` currently holds.
    ///
    /// Returns a complete snapshot or an error, never a partial result.
    /// A zero balance returns immediately without any ownership queries.
    pub async fn scan(&self, owner: Address) -> Result<Inventory, ClientError> {
        let balance = to_u64(self.backend.balance_of(owner).await?, "balanceOf")?;
        if balance == 0 {
            debug!(owner = %owner, "no tokens held, skipping ownership sweep");
            return Ok(Inventory::empty());
        }

        let supply = to_u64(self.backend.total_supply().await?, "totalSupply")?;
        let mut tokens = Vec::with_capacity(balance as usize);

        for token_id in 0..supply {
            let holder = self
                .backend
                .owner_of(U256::from(token_id))
                .await
                .map_err(|e| ClientError::ScanAborted {
                    token_id,
                    source: Box::new(e),
                })?;

            // Address equality is byte-level, so checksum casing cannot
            // cause a missed match.
            if holder == owner {
                tokens.push(token_id);
            }

            if self.policy == ScanPolicy::EarlyExit && tokens.len() as u64 == balance {
                break;
            }
        }

        debug!(
            owner = %owner,
            balance,
            found = tokens.len(),
            supply,
            "ownership scan complete"
        );

        Ok(Inventory { balance, tokens })
    }
}

// Out-of-range counts are contract-data anomalies, not transport
// failures, so they must not look retryable.
fn to_u64(value: U256, what: &str) -> Result<u64, ClientError> {
    u64::try_from(value)
        .map_err(|_| ClientError::InvalidAmount(format!("{what} returned {value}, out of u64 range")))
}
