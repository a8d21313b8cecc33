// SPDX-License-Identifier: AGPL-3.0-or-later

//! Decimal amount conversion.
//!
//! Human-readable decimal amounts are converted to the chain's smallest
//! unit with plain string arithmetic, so canonical inputs convert
//! exactly and no float rounding drift can reach a payment value.

use alloy::primitives::U256;

use crate::error::ClientError;

/// Decimals of the native currency and of every token this client pays
/// with (the ether-like 10^18 scaling).
pub const ETHER_DECIMALS: u8 = 18;

/// Parse a human-readable amount into the smallest unit.
///
/// # Arguments
/// * `amount` - Amount as a decimal string (e.g. "1.5")
/// * `decimals` - Number of decimals of the target unit
pub fn parse_amount(amount: &str, decimals: u8) -> Result<U256, ClientError> {
    let parts: Vec<&str> = amount.trim().split('.').collect();

    if parts.len() > 2 {
        return Err(ClientError::InvalidAmount(format!(
            "`{amount}` is not a decimal number"
        )));
    }

    let whole = parts[0]
        .parse::<u128>()
        .map_err(|_| ClientError::InvalidAmount(format!("`{amount}` has an invalid whole part")))?;

    let decimal_part = if parts.len() == 2 {
        let dec_str = parts[1];
        if dec_str.len() > decimals as usize {
            return Err(ClientError::InvalidAmount(format!(
                "`{amount}` has more than {decimals} decimal places"
            )));
        }
        // Pad with zeros to match decimals
        let padded = format!("{dec_str:0<width$}", width = decimals as usize);
        padded.parse::<u128>().map_err(|_| {
            ClientError::InvalidAmount(format!("`{amount}` has an invalid fractional part"))
        })?
    } else {
        0u128
    };

    let multiplier = 10u128.pow(decimals as u32);
    let total = whole
        .checked_mul(multiplier)
        .and_then(|w| w.checked_add(decimal_part))
        .ok_or_else(|| ClientError::InvalidAmount(format!("`{amount}` overflows")))?;

    Ok(U256::from(total))
}

/// Parse an amount using the ether-like 18-decimal scaling.
pub fn parse_ether(amount: &str) -> Result<U256, ClientError> {
    parse_amount(amount, ETHER_DECIMALS)
}

/// Format a smallest-unit amount back to a human-readable string.
pub fn format_amount(amount: U256, decimals: u8) -> String {
    if amount.is_zero() {
        return "0".to_string();
    }

    let divisor = U256::from(10u64).pow(U256::from(decimals));
    let whole = amount / divisor;
    let remainder = amount % divisor;

    if remainder.is_zero() {
        whole.to_string()
    } else {
        let decimal_str = format!("{remainder:0>width$}", width = decimals as usize);
        let trimmed = decimal_str.trim_end_matches('0');
        if trimmed.is_empty() {
            whole.to_string()
        } else {
            format!("{whole}.{trimmed}")
        }
    }
}
