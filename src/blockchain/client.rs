// SPDX-License-Identifier: AGPL-3.0-or-later

//! RPC client construction for the SocialFi contract.
//!
//! An explicit client object is built from injected [`Config`] (no
//! module-level singletons), holding a signing provider and the typed
//! contract instance.

use alloy::{
    network::{Ethereum, EthereumWallet},
    primitives::{Address, TxHash},
    providers::{
        fillers::{
            BlobGasFiller, ChainIdFiller, FillProvider, GasFiller, JoinFill, NonceFiller,
            WalletFiller,
        },
        Identity, ProviderBuilder, RootProvider,
    },
    signers::local::PrivateKeySigner,
};

use super::contract::SocialFiContract;
use crate::config::Config;
use crate::error::ClientError;

/// HTTP provider type with signing capabilities (all fillers plus wallet).
pub type SignerProvider = FillProvider<
    JoinFill<
        JoinFill<
            Identity,
            JoinFill<GasFiller, JoinFill<BlobGasFiller, JoinFill<NonceFiller, ChainIdFiller>>>,
        >,
        WalletFiller<EthereumWallet>,
    >,
    RootProvider<Ethereum>,
>;

/// Signing client bound to one SocialFi contract deployment.
pub struct SocialFiClient {
    contract: SocialFiContract<SignerProvider>,
    signer_address: Address,
    explorer_url: Option<String>,
}

impl SocialFiClient {
    /// Build a client from configuration: signer from the private key,
    /// wallet-filled HTTP provider from the RPC URL, typed contract
    /// instance at the configured address.
    pub fn connect(config: &Config) -> Result<Self, ClientError> {
        let url: url::Url = config
            .rpc_url
            .parse()
            .map_err(|e: url::ParseError| ClientError::InvalidRpcUrl(e.to_string()))?;

        let signer = Self::create_signer(&config.private_key)?;
        let signer_address = signer.address();
        let wallet = EthereumWallet::from(signer);

        let provider = ProviderBuilder::new().wallet(wallet).connect_http(url);
        let contract = SocialFiContract::new(&provider, &config.contract_address)?;

        Ok(Self {
            contract,
            signer_address,
            explorer_url: config.explorer_url.clone(),
        })
    }

    /// Create a signer from a hex private key, with or without a `0x`
    /// prefix.
    pub fn create_signer(private_key_hex: &str) -> Result<PrivateKeySigner, ClientError> {
        let trimmed = private_key_hex.trim().trim_start_matches("0x");

        let key_bytes = alloy::hex::decode(trimmed)
            .map_err(|e| ClientError::InvalidPrivateKey(e.to_string()))?;

        PrivateKeySigner::from_slice(&key_bytes)
            .map_err(|e| ClientError::InvalidPrivateKey(e.to_string()))
    }

    /// The typed contract instance.
    pub fn contract(&self) -> &SocialFiContract<SignerProvider> {
        &self.contract
    }

    /// Address of the configured signing key.
    pub fn signer_address(&self) -> Address {
        self.signer_address
    }

    /// Explorer link for a transaction, when an explorer is configured.
    pub fn explorer_tx_url(&self, tx_hash: TxHash) -> Option<String> {
        self.explorer_url
            .as_ref()
            .map(|base| format!("{}/tx/{tx_hash}", base.trim_end_matches('/')))
    }
}
