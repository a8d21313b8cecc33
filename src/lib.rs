// SPDX-License-Identifier: AGPL-3.0-or-later

//! SocialFi Client - token inventory scanning and transaction submission
//!
//! Client-side tooling for a deployed SocialFi NFT/donation contract.
//! All business state lives in the contract; this crate only queries it
//! and submits state-changing calls through a signing JSON-RPC provider.
//!
//! ## Modules
//!
//! - `blockchain` - contract backend trait, alloy client, confirmation waiting
//! - `scanner` - token inventory reconstruction by ownership sweep
//! - `submitter` - mint, donation, and staking submission
//! - `orchestrate` - scan-mint-rescan sequencing
//! - `amount` - exact decimal to smallest-unit conversion
//! - `config` - environment-driven configuration

pub mod amount;
pub mod blockchain;
pub mod config;
pub mod error;
pub mod orchestrate;
pub mod scanner;
pub mod submitter;

#[cfg(test)]
pub(crate) mod testing;
