// SPDX-License-Identifier: AGPL-3.0-or-later

//! # Runtime Configuration
//!
//! This module defines environment variable names and the typed
//! configuration loaded from them at startup. Required values are
//! validated non-empty before any signer or provider is constructed.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `SOCIALFI_RPC_URL` | JSON-RPC endpoint URL | Required |
//! | `SOCIALFI_PRIVATE_KEY` | Hex-encoded signing key (with or without `0x`) | Required |
//! | `SOCIALFI_CONTRACT_ADDRESS` | Deployed SocialFi contract address | Required |
//! | `SOCIALFI_EXPLORER_URL` | Block explorer base URL for log links | Optional |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info` |

use crate::error::ClientError;

/// Environment variable name for the JSON-RPC endpoint URL.
pub const RPC_URL_ENV: &str = "SOCIALFI_RPC_URL";

/// Environment variable name for the hex-encoded signing key.
pub const PRIVATE_KEY_ENV: &str = "SOCIALFI_PRIVATE_KEY";

/// Environment variable name for the deployed contract address.
pub const CONTRACT_ADDRESS_ENV: &str = "SOCIALFI_CONTRACT_ADDRESS";

/// Environment variable name for the optional block explorer base URL.
pub const EXPLORER_URL_ENV: &str = "SOCIALFI_EXPLORER_URL";

/// Client configuration, injected into [`crate::blockchain::SocialFiClient`]
/// rather than read from module-level globals.
#[derive(Debug, Clone)]
pub struct Config {
    /// JSON-RPC endpoint URL.
    pub rpc_url: String,
    /// Hex-encoded private key. Never logged.
    pub private_key: String,
    /// Deployed SocialFi contract address.
    pub contract_address: String,
    /// Block explorer base URL, used only to format transaction links.
    pub explorer_url: Option<String>,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an injected lookup, so tests do not
    /// have to mutate the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ClientError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        Ok(Self {
            rpc_url: required(&lookup, RPC_URL_ENV)?,
            private_key: required(&lookup, PRIVATE_KEY_ENV)?,
            contract_address: required(&lookup, CONTRACT_ADDRESS_ENV)?,
            explorer_url: lookup(EXPLORER_URL_ENV).filter(|v| !v.trim().is_empty()),
        })
    }
}

fn required<F>(lookup: &F, name: &'static str) -> Result<String, ClientError>
where
    F: Fn(&'static str) -> Option<String>,
{
    let value = lookup(name).ok_or(ClientError::MissingEnv(name))?;
    if value.trim().is_empty() {
        return Err(ClientError::EmptyEnv(name));
    }
    Ok(value)
}
