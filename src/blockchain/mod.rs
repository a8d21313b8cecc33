// SPDX-License-Identifier: AGPL-3.0-or-later

//! Chain integration for the SocialFi contract.
//!
//! This module provides:
//! - The [`ContractBackend`] capability trait over the contract surface
//! - The alloy-backed [`contract::SocialFiContract`] implementation
//! - Client construction from configuration
//! - Confirmation waiting with deadline and cancellation

pub mod backend;
pub mod client;
pub mod confirm;
pub mod contract;
pub mod types;

pub use backend::ContractBackend;
pub use client::{SignerProvider, SocialFiClient};
pub use confirm::{await_confirmations, ConfirmationOutcome};
pub use types::*;
