// SPDX-License-Identifier: AGPL-3.0-or-later

//! SocialFi contract interactions.
//!
//! Read-only queries retry transport failures with exponential backoff.
//! State-changing calls are sent exactly once; a transport failure on a
//! send surfaces immediately so a transaction is never broadcast twice.

use std::future::Future;
use std::time::Duration;

use alloy::{
    primitives::{Address, TxHash, U256},
    providers::Provider,
    sol,
    sol_types::{Revert, SolError},
};
use async_trait::async_trait;

use super::backend::ContractBackend;
use super::types::{parse_address, ReceivedEvent, TxInclusion};
use crate::error::ClientError;

// Define the SocialFi interface using alloy's sol! macro
sol! {
    #[sol(rpc)]
    interface ISocialFi {
        function balanceOf(address owner) external view returns (uint256);
        function totalSupply() external view returns (uint256);
        function ownerOf(uint256 tokenId) external view returns (address);
        function priceToMint(address minter) external view returns (uint256);
        function safeMint() external payable;
        function donateEth(address author) external payable;
        function donateToken(address tokenAddress, uint256 amount, address author) external;
        function stake(uint256 tokenId) external;
        function unstake(uint256 tokenId) external;
        event Received(address sender, uint256 amount);
    }
}

/// Attempts made for a read-only query before giving up.
const READ_RETRY_ATTEMPTS: u32 = 3;

/// Delay before the first read retry; doubles per attempt.
const READ_RETRY_BASE_DELAY: Duration = Duration::from_millis(250);

/// SocialFi contract wrapper.
pub struct SocialFiContract<P> {
    contract: ISocialFi::ISocialFiInstance<P>,
    address: Address,
}

impl<P: Provider + Clone> SocialFiContract<P> {
    /// Create a new contract instance at `contract_address`.
    pub fn new(provider: &P, contract_address: &str) -> Result<Self, ClientError> {
        let address = parse_address(contract_address)?;
        let contract = ISocialFi::new(address, provider.clone());

        Ok(Self { contract, address })
    }

    /// The deployed contract address.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Current head block number.
    pub async fn block_number(&self) -> Result<u64, ClientError> {
        self.contract
            .provider()
            .get_block_number()
            .await
            .map_err(|e| ClientError::Rpc(e.to_string()))
    }
}

#[async_trait]
impl<P: Provider + Clone + Send + Sync> ContractBackend for SocialFiContract<P> {
    async fn balance_of(&self, owner: Address) -> Result<U256, ClientError> {
        retry_read("balanceOf", || async {
            self.contract
                .balanceOf(owner)
                .call()
                .await
                .map_err(map_contract_error)
        })
        .await
    }

    async fn total_supply(&self) -> Result<U256, ClientError> {
        retry_read("totalSupply", || async {
            self.contract
                .totalSupply()
                .call()
                .await
                .map_err(map_contract_error)
        })
        .await
    }

    async fn owner_of(&self, token_id: U256) -> Result<Address, ClientError> {
        retry_read("ownerOf", || async {
            self.contract
                .ownerOf(token_id)
                .call()
                .await
                .map_err(map_contract_error)
        })
        .await
    }

    async fn price_to_mint(&self, minter: Address) -> Result<U256, ClientError> {
        retry_read("priceToMint", || async {
            self.contract
                .priceToMint(minter)
                .call()
                .await
                .map_err(map_contract_error)
        })
        .await
    }

    async fn safe_mint(&self, value: U256) -> Result<TxHash, ClientError> {
        let pending = self
            .contract
            .safeMint()
            .value(value)
            .send()
            .await
            .map_err(map_contract_error)?;
        Ok(*pending.tx_hash())
    }

    async fn donate_eth(&self, author: Address, value: U256) -> Result<TxHash, ClientError> {
        let pending = self
            .contract
            .donateEth(author)
            .value(value)
            .send()
            .await
            .map_err(map_contract_error)?;
        Ok(*pending.tx_hash())
    }

    async fn donate_token(
        &self,
        token: Address,
        amount: U256,
        author: Address,
    ) -> Result<TxHash, ClientError> {
        let pending = self
            .contract
            .donateToken(token, amount, author)
            .send()
            .await
            .map_err(map_contract_error)?;
        Ok(*pending.tx_hash())
    }

    async fn stake(&self, token_id: U256) -> Result<TxHash, ClientError> {
        let pending = self
            .contract
            .stake(token_id)
            .send()
            .await
            .map_err(map_contract_error)?;
        Ok(*pending.tx_hash())
    }

    async fn unstake(&self, token_id: U256) -> Result<TxHash, ClientError> {
        let pending = self
            .contract
            .unstake(token_id)
            .send()
            .await
            .map_err(map_contract_error)?;
        Ok(*pending.tx_hash())
    }

    async fn transaction_inclusion(&self, tx_hash: TxHash) -> Result<TxInclusion, ClientError> {
        let provider = self.contract.provider();

        let receipt = provider
            .get_transaction_receipt(tx_hash)
            .await
            .map_err(|e| ClientError::Rpc(e.to_string()))?;

        let Some(receipt) = receipt else {
            return Ok(TxInclusion::Pending);
        };
        let Some(block_number) = receipt.block_number else {
            return Ok(TxInclusion::Pending);
        };

        let head = provider
            .get_block_number()
            .await
            .map_err(|e| ClientError::Rpc(e.to_string()))?;

        Ok(TxInclusion::Included {
            block_number,
            confirmations: head.saturating_sub(block_number) + 1,
            succeeded: receipt.status(),
        })
    }

    async fn received_events(
        &self,
        from_block: u64,
        to_block: u64,
    ) -> Result<Vec<ReceivedEvent>, ClientError> {
        let events = self
            .contract
            .Received_filter()
            .from_block(from_block)
            .to_block(to_block)
            .query()
            .await
            .map_err(|e| ClientError::Rpc(e.to_string()))?;

        Ok(events
            .into_iter()
            .map(|(event, log)| ReceivedEvent {
                sender: event.sender,
                amount: event.amount,
                block_number: log.block_number,
                tx_hash: log.transaction_hash,
            })
            .collect())
    }
}

/// Retry a read-only call on transport errors. Reverts and other
/// non-transport failures propagate on the first attempt.
async fn retry_read<T, F, Fut>(op: &'static str, mut call: F) -> Result<T, ClientError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ClientError>>,
{
    let mut delay = READ_RETRY_BASE_DELAY;
    let mut attempt = 1;

    loop {
        match call().await {
            Err(ClientError::Rpc(message)) if attempt < READ_RETRY_ATTEMPTS => {
                tracing::warn!(op, attempt, error = %message, "read call failed, retrying");
                tokio::time::sleep(delay).await;
                delay *= 2;
                attempt += 1;
            }
            other => return other,
        }
    }
}

/// Map an alloy contract error, surfacing the decoded revert reason when
/// the contract returned one.
fn map_contract_error(error: alloy::contract::Error) -> ClientError {
    match error.as_revert_data() {
        Some(data) => ClientError::Reverted(decode_revert_reason(&data)),
        None => ClientError::Rpc(error.to_string()),
    }
}

/// Decode a standard `Error(string)` revert payload, falling back to hex.
fn decode_revert_reason(data: &[u8]) -> String {
    match Revert::abi_decode(data) {
        Ok(revert) => revert.reason,
        Err(_) => format!("revert data 0x{}", alloy::hex::encode(data)),
    }
}
