// SPDX-License-Identifier: AGPL-3.0-or-later

//! In-memory contract double for unit tests.
//!
//! `MockChain` implements [`ContractBackend`] over a mutex-guarded
//! state: a token ownership table, a mint price, a head block, and a
//! submission log. Tests can count calls, inject ownership-query
//! failures, stop block production, and force the next transaction to
//! revert.

use std::collections::HashMap;
use std::sync::Mutex;

use alloy::primitives::{Address, TxHash, U256};
use async_trait::async_trait;

use crate::blockchain::types::{ReceivedEvent, TxInclusion};
use crate::blockchain::ContractBackend;
use crate::error::ClientError;

/// Counters for every backend call made through the mock.
#[derive(Debug, Clone, Copy, Default)]
pub struct CallCounts {
    pub balance_of: usize,
    pub total_supply: usize,
    pub owner_of: usize,
    pub price_to_mint: usize,
    pub sends: usize,
    pub inclusion_polls: usize,
}

/// A state-changing call recorded by the mock, with the exact arguments
/// the submitter passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmittedCall {
    SafeMint { value: U256 },
    DonateEth { author: Address, value: U256 },
    DonateToken { token: Address, amount: U256, author: Address },
    Stake { token_id: U256 },
    Unstake { token_id: U256 },
}

#[derive(Debug, Clone, Copy)]
struct MockTx {
    block: Option<u64>,
    succeeded: bool,
}

struct MockState {
    signer: Address,
    owners: Vec<Address>,
    balance_overrides: HashMap<Address, u64>,
    price: U256,
    head_block: u64,
    txs: HashMap<TxHash, MockTx>,
    events: Vec<ReceivedEvent>,
    submitted: Vec<SubmittedCall>,
    calls: CallCounts,
    next_tx: u64,
    fail_owner_of_on_call: Option<usize>,
    next_tx_reverts: bool,
    auto_mine: bool,
}

/// In-memory chain and contract state.
pub struct MockChain {
    state: Mutex<MockState>,
}

impl MockChain {
    /// Fresh contract with no minted tokens.
    pub fn new(signer: Address) -> Self {
        Self::with_tokens(signer, Vec::new())
    }

    /// Contract with a pre-minted ownership table; index is the token id.
    pub fn with_tokens(signer: Address, owners: Vec<Address>) -> Self {
        Self {
            state: Mutex::new(MockState {
                signer,
                owners,
                balance_overrides: HashMap::new(),
                price: U256::from(100_000_000_000_000_000u64),
                head_block: 100,
                txs: HashMap::new(),
                events: Vec::new(),
                submitted: Vec::new(),
                calls: CallCounts::default(),
                next_tx: 0,
                fail_owner_of_on_call: None,
                next_tx_reverts: false,
                auto_mine: true,
            }),
        }
    }

    /// Set the quote returned by `priceToMint`.
    pub fn set_price(&self, price: U256) {
        self.state.lock().unwrap().price = price;
    }

    /// Report a fixed `balanceOf` for one address regardless of the
    /// ownership table, to model a stale or inconsistent contract view.
    pub fn override_balance(&self, owner: Address, balance: u64) {
        self.state
            .lock()
            .unwrap()
            .balance_overrides
            .insert(owner, balance);
    }

    /// Fail the nth `ownerOf` call (1-based) with a transport error.
    pub fn fail_owner_of_on_call(&self, nth: usize) {
        self.state.lock().unwrap().fail_owner_of_on_call = Some(nth);
    }

    /// Make the next submitted transaction revert on inclusion.
    pub fn set_next_tx_reverts(&self) {
        self.state.lock().unwrap().next_tx_reverts = true;
    }

    /// Stop block production: submitted transactions stay pending.
    pub fn set_auto_mine(&self, auto_mine: bool) {
        self.state.lock().unwrap().auto_mine = auto_mine;
    }

    /// Snapshot of the call counters.
    pub fn calls(&self) -> CallCounts {
        self.state.lock().unwrap().calls
    }

    /// Every state-changing call submitted so far, in order.
    pub fn submitted(&self) -> Vec<SubmittedCall> {
        self.state.lock().unwrap().submitted.clone()
    }
}

impl MockState {
    /// Record a submission and mine it unless block production is off.
    /// Returns the transaction hash and whether the state change applied.
    fn submit(&mut self, call: SubmittedCall) -> (TxHash, bool) {
        self.calls.sends += 1;
        self.submitted.push(call);

        self.next_tx += 1;
        let tx_hash = TxHash::from(U256::from(self.next_tx));

        let succeeded = !std::mem::take(&mut self.next_tx_reverts);
        let block = if self.auto_mine {
            Some(self.head_block + 1)
        } else {
            None
        };

        self.txs.insert(tx_hash, MockTx { block, succeeded });
        (tx_hash, succeeded && block.is_some())
    }

    fn record_received(&mut self, sender: Address, amount: U256, tx_hash: TxHash) {
        let block_number = self.txs.get(&tx_hash).and_then(|tx| tx.block);
        self.events.push(ReceivedEvent {
            sender,
            amount,
            block_number,
            tx_hash: Some(tx_hash),
        });
    }
}

#[async_trait]
impl ContractBackend for MockChain {
    async fn balance_of(&self, owner: Address) -> Result<U256, ClientError> {
        let mut state = self.state.lock().unwrap();
        state.calls.balance_of += 1;

        if let Some(balance) = state.balance_overrides.get(&owner) {
            return Ok(U256::from(*balance));
        }
        let held = state.owners.iter().filter(|held| **held == owner).count();
        Ok(U256::from(held))
    }

    async fn total_supply(&self) -> Result<U256, ClientError> {
        let mut state = self.state.lock().unwrap();
        state.calls.total_supply += 1;
        Ok(U256::from(state.owners.len()))
    }

    async fn owner_of(&self, token_id: U256) -> Result<Address, ClientError> {
        let mut state = self.state.lock().unwrap();
        state.calls.owner_of += 1;

        if state.fail_owner_of_on_call == Some(state.calls.owner_of) {
            return Err(ClientError::Rpc("injected ownerOf failure".to_string()));
        }

        let index = usize::try_from(token_id)
            .map_err(|_| ClientError::Reverted("ERC721: invalid token ID".to_string()))?;
        state
            .owners
            .get(index)
            .copied()
            .ok_or_else(|| ClientError::Reverted("ERC721: invalid token ID".to_string()))
    }

    async fn price_to_mint(&self, _minter: Address) -> Result<U256, ClientError> {
        let mut state = self.state.lock().unwrap();
        state.calls.price_to_mint += 1;
        Ok(state.price)
    }

    async fn safe_mint(&self, value: U256) -> Result<TxHash, ClientError> {
        let mut state = self.state.lock().unwrap();
        let (tx_hash, applied) = state.submit(SubmittedCall::SafeMint { value });
        if applied {
            let signer = state.signer;
            state.owners.push(signer);
            state.record_received(signer, value, tx_hash);
        }
        Ok(tx_hash)
    }

    async fn donate_eth(&self, author: Address, value: U256) -> Result<TxHash, ClientError> {
        let mut state = self.state.lock().unwrap();
        let (tx_hash, applied) = state.submit(SubmittedCall::DonateEth { author, value });
        if applied {
            let signer = state.signer;
            state.record_received(signer, value, tx_hash);
        }
        Ok(tx_hash)
    }

    async fn donate_token(
        &self,
        token: Address,
        amount: U256,
        author: Address,
    ) -> Result<TxHash, ClientError> {
        let mut state = self.state.lock().unwrap();
        let (tx_hash, _) = state.submit(SubmittedCall::DonateToken {
            token,
            amount,
            author,
        });
        Ok(tx_hash)
    }

    async fn stake(&self, token_id: U256) -> Result<TxHash, ClientError> {
        let mut state = self.state.lock().unwrap();
        let (tx_hash, _) = state.submit(SubmittedCall::Stake { token_id });
        Ok(tx_hash)
    }

    async fn unstake(&self, token_id: U256) -> Result<TxHash, ClientError> {
        let mut state = self.state.lock().unwrap();
        let (tx_hash, _) = state.submit(SubmittedCall::Unstake { token_id });
        Ok(tx_hash)
    }

    async fn transaction_inclusion(&self, tx_hash: TxHash) -> Result<TxInclusion, ClientError> {
        let mut state = self.state.lock().unwrap();
        state.calls.inclusion_polls += 1;

        // A block is produced per poll while block production is on.
        if state.auto_mine {
            state.head_block += 1;
        }

        let Some(tx) = state.txs.get(&tx_hash).copied() else {
            return Ok(TxInclusion::Pending);
        };
        let Some(block_number) = tx.block else {
            return Ok(TxInclusion::Pending);
        };

        Ok(TxInclusion::Included {
            block_number,
            confirmations: state.head_block.saturating_sub(block_number) + 1,
            succeeded: tx.succeeded,
        })
    }

    async fn received_events(
        &self,
        from_block: u64,
        to_block: u64,
    ) -> Result<Vec<ReceivedEvent>, ClientError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .events
            .iter()
            .filter(|event| {
                event
                    .block_number
                    .map(|block| block >= from_block && block <= to_block)
                    .unwrap_or(false)
            })
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signer() -> Address {
        Address::repeat_byte(0x11)
    }

    #[tokio::test]
    async fn mint_grows_the_supply_and_assigns_the_signer() {
        let chain = MockChain::new(signer());

        chain.safe_mint(U256::from(1)).await.unwrap();

        assert_eq!(chain.total_supply().await.unwrap(), U256::from(1));
        assert_eq!(chain.owner_of(U256::ZERO).await.unwrap(), signer());
    }

    #[tokio::test]
    async fn payable_calls_emit_received_events() {
        let chain = MockChain::new(signer());
        let value = U256::from(42);

        chain.donate_eth(Address::repeat_byte(0xab), value).await.unwrap();

        let events = chain.received_events(0, u64::MAX).await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].sender, signer());
        assert_eq!(events[0].amount, value);

        // Outside the emitting block's range nothing matches.
        let none = chain.received_events(0, 1).await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn confirmations_grow_with_each_poll() {
        let chain = MockChain::new(signer());
        let tx_hash = chain.safe_mint(U256::from(1)).await.unwrap();

        let first = chain.transaction_inclusion(tx_hash).await.unwrap();
        let second = chain.transaction_inclusion(tx_hash).await.unwrap();

        let TxInclusion::Included { confirmations: a, .. } = first else {
            panic!("expected inclusion");
        };
        let TxInclusion::Included { confirmations: b, .. } = second else {
            panic!("expected inclusion");
        };
        assert!(b > a);
    }
}
