// SPDX-License-Identifier: AGPL-3.0-or-later

//! Capability trait over the SocialFi contract's method surface.
//!
//! Scanner, submitter, and orchestration are generic over this trait, so
//! they run unchanged against the RPC-backed
//! [`super::contract::SocialFiContract`] and against an in-memory double
//! in tests.

use alloy::primitives::{Address, TxHash, U256};
use async_trait::async_trait;

use super::types::{ReceivedEvent, TxInclusion};
use crate::error::ClientError;

/// The SocialFi contract's method surface, as consumed by this client.
///
/// State-changing calls resolve as soon as the network accepts the
/// submission; inclusion is observed separately through
/// [`transaction_inclusion`](Self::transaction_inclusion).
#[async_trait]
pub trait ContractBackend {
    // Read-only queries.

    /// Number of tokens held by `owner`.
    async fn balance_of(&self, owner: Address) -> Result<U256, ClientError>;

    /// Total number of minted tokens.
    async fn total_supply(&self) -> Result<U256, ClientError>;

    /// Current owner of `token_id`.
    async fn owner_of(&self, token_id: U256) -> Result<Address, ClientError>;

    /// Current mint price quoted for `minter`.
    async fn price_to_mint(&self, minter: Address) -> Result<U256, ClientError>;

    // State-changing calls.

    /// Mint one token, attaching `value` as payment.
    async fn safe_mint(&self, value: U256) -> Result<TxHash, ClientError>;

    /// Donate `value` of native currency to `author`.
    async fn donate_eth(&self, author: Address, value: U256) -> Result<TxHash, ClientError>;

    /// Donate `amount` of the fungible token at `token` to `author`. No
    /// payment is attached to the call itself.
    async fn donate_token(
        &self,
        token: Address,
        amount: U256,
        author: Address,
    ) -> Result<TxHash, ClientError>;

    /// Stake an owned token.
    async fn stake(&self, token_id: U256) -> Result<TxHash, ClientError>;

    /// Unstake a previously staked token.
    async fn unstake(&self, token_id: U256) -> Result<TxHash, ClientError>;

    // Receipt and event observation.

    /// Observe the inclusion state of a submitted transaction.
    async fn transaction_inclusion(&self, tx_hash: TxHash) -> Result<TxInclusion, ClientError>;

    /// `Received` events emitted in the given block range, inclusive.
    async fn received_events(
        &self,
        from_block: u64,
        to_block: u64,
    ) -> Result<Vec<ReceivedEvent>, ClientError>;
}
