// SPDX-License-Identifier: AGPL-3.0-or-later

//! Error type shared by all client operations.
//!
//! Variants follow the failure taxonomy of the client: configuration
//! problems are fatal at startup, transport failures are retryable for
//! read-only calls only, contract reverts are never retryable, and an
//! aborted ownership scan must never surface as a partial inventory.

use thiserror::Error;

/// Errors that can occur during client operations.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("missing environment variable {0}")]
    MissingEnv(&'static str),

    #[error("environment variable {0} is set but empty")]
    EmptyEnv(&'static str),

    #[error("invalid RPC URL: {0}")]
    InvalidRpcUrl(String),

    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// Transport or node failure. Read-only calls retry these with
    /// backoff; submissions surface them immediately so a state-changing
    /// call is never sent twice.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// The contract rejected the call, with the decoded revert reason
    /// when one was returned.
    #[error("contract reverted: {0}")]
    Reverted(String),

    /// An ownership enumeration failed mid-scan. The scan result is
    /// absent, never partial.
    #[error("ownership scan aborted at token {token_id}: {source}")]
    ScanAborted {
        token_id: u64,
        #[source]
        source: Box<ClientError>,
    },

    #[error("transaction {tx_hash} not confirmed within {waited_secs}s")]
    ConfirmationTimeout { tx_hash: String, waited_secs: u64 },

    /// The operation was cancelled before anything was broadcast. A
    /// transaction already sent to the network is never withdrawn.
    #[error("operation cancelled before submission")]
    Cancelled,
}
