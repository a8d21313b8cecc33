// SPDX-License-Identifier: AGPL-3.0-or-later

//! Transaction submission.
//!
//! Each operation delegates the state change to the contract and
//! returns a [`Submission`] the instant the network accepts it.
//! Cancellation is honored before a send, never after: once broadcast,
//! a transaction cannot be withdrawn.

use alloy::primitives::{Address, U256};
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::amount::parse_ether;
use crate::blockchain::types::{Submission, TokenId};
use crate::blockchain::ContractBackend;
use crate::error::ClientError;

/// Submitter over a contract backend.
pub struct Submitter<'a, B> {
    backend: &'a B,
    cancel: CancellationToken,
}

impl<'a, B: ContractBackend + Sync> Submitter<'a, B> {
    /// Submitter without external cancellation.
    pub fn new(backend: &'a B) -> Self {
        Self {
            backend,
            cancel: CancellationToken::new(),
        }
    }

    /// Submitter that aborts before any send once `cancel` triggers.
    pub fn with_cancellation(backend: &'a B, cancel: CancellationToken) -> Self {
        Self { backend, cancel }
    }

    /// Quote the mint price for `minter` and mint one token paying
    /// exactly that quote.
    ///
    /// The price is read once; there is no re-query between the quote
    /// and the send, so the value attached is the value that was quoted.
    pub async fn mint(&self, minter: Address) -> Result<Submission, ClientError> {
        let price = self.backend.price_to_mint(minter).await?;

        self.ensure_not_cancelled()?;
        let tx_hash = self.backend.safe_mint(price).await?;

        info!(tx_hash = %tx_hash, price = %price, "mint submitted");
        Ok(Submission {
            tx_hash,
            value: Some(price),
        })
    }

    /// Donate native currency to `author`. `amount` is a decimal string
    /// converted with the 18-decimal ether scaling.
    pub async fn donate_native(
        &self,
        author: Address,
        amount: &str,
    ) -> Result<Submission, ClientError> {
        let value = parse_ether(amount)?;

        self.ensure_not_cancelled()?;
        let tx_hash = self.backend.donate_eth(author, value).await?;

        info!(tx_hash = %tx_hash, author = %author, value = %value, "native donation submitted");
        Ok(Submission {
            tx_hash,
            value: Some(value),
        })
    }

    /// Donate a fungible token amount to `author`. The call itself
    /// carries no payment.
    pub async fn donate_token(
        &self,
        token: Address,
        amount: &str,
        author: Address,
    ) -> Result<Submission, ClientError> {
        let scaled = parse_ether(amount)?;

        self.ensure_not_cancelled()?;
        let tx_hash = self.backend.donate_token(token, scaled, author).await?;

        info!(
            tx_hash = %tx_hash,
            token = %token,
            author = %author,
            amount = %scaled,
            "token donation submitted"
        );
        Ok(Submission {
            tx_hash,
            value: None,
        })
    }

    /// Stake an owned token.
    pub async fn stake(&self, token_id: TokenId) -> Result<Submission, ClientError> {
        self.ensure_not_cancelled()?;
        let tx_hash = self.backend.stake(U256::from(token_id)).await?;

        info!(tx_hash = %tx_hash, token_id, "stake submitted");
        Ok(Submission {
            tx_hash,
            value: None,
        })
    }

    /// Unstake a previously staked token.
    pub async fn unstake(&self, token_id: TokenId) -> Result<Submission, ClientError> {
        self.ensure_not_cancelled()?;
        let tx_hash = self.backend.unstake(U256::from(token_id)).await?;

        info!(tx_hash = %tx_hash, token_id, "unstake submitted");
        Ok(Submission {
            tx_hash,
            value: None,
        })
    }

    fn ensure_not_cancelled(&self) -> Result<(), ClientError> {
        if self.cancel.is_cancelled() {
            return Err(ClientError::Cancelled);
        }
        Ok(())
    }
}
