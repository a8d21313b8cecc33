// SPDX-License-Identifier: AGPL-3.0-or-later

//! Chain-facing types and constants.

use std::str::FromStr;

use alloy::primitives::{Address, TxHash, U256};
use serde::Serialize;

use crate::error::ClientError;

/// Identifier of one non-fungible token. The contract assigns ids
/// contiguously from 0 to `totalSupply - 1`.
pub type TokenId = u64;

/// Confirmations waited for routine operations (mint, donations,
/// staking).
pub const ROUTINE_CONFIRMATIONS: u64 = 2;

/// Snapshot of one address's holdings at a point in time. Either
/// complete or absent, never partial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Inventory {
    /// Token count reported by `balanceOf`.
    pub balance: u64,
    /// Owned token ids in ascending order.
    pub tokens: Vec<TokenId>,
}

impl Inventory {
    /// Inventory of an address that holds nothing.
    pub fn empty() -> Self {
        Self {
            balance: 0,
            tokens: Vec::new(),
        }
    }

    /// True when the address holds no tokens.
    pub fn is_empty(&self) -> bool {
        self.balance == 0 && self.tokens.is_empty()
    }

    /// The token id in the first slot, if any.
    pub fn first_token(&self) -> Option<TokenId> {
        self.tokens.first().copied()
    }
}

/// Handle returned the instant the network accepts a submission, before
/// inclusion in a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// Transaction hash.
    pub tx_hash: TxHash,
    /// Payment attached to the call, if the operation carried one.
    pub value: Option<U256>,
}

/// Observed inclusion state of a submitted transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxInclusion {
    /// No receipt yet.
    Pending,
    /// Included in a block.
    Included {
        block_number: u64,
        confirmations: u64,
        succeeded: bool,
    },
}

/// A `Received(address, amount)` event emitted when the contract takes a
/// direct payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivedEvent {
    pub sender: Address,
    pub amount: U256,
    pub block_number: Option<u64>,
    pub tx_hash: Option<TxHash>,
}

/// Parse an account or contract address.
pub fn parse_address(input: &str) -> Result<Address, ClientError> {
    Address::from_str(input.trim())
        .map_err(|e| ClientError::InvalidAddress(format!("{input}: {e}")))
}
