//! Native-currency amounts: the decimal text the user typed plus its wei value.

use crate::core::fields::contract;
use alloy_primitives::utils::{format_ether, parse_ether};
use alloy_primitives::U256;
use std::fmt;
use thiserror::Error;

/// A strictly positive amount of native currency.
///
/// The original decimal text is kept so confirmations echo exactly what the
/// user entered; `wei` is what goes on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EtherAmount {
    text: String,
    wei: U256,
}

/// Why a decimal string is not a usable amount.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("not a number")]
    NotANumber,
    #[error("must be greater than zero")]
    NotPositive,
    #[error("cannot be expressed in wei: {0}")]
    Unrepresentable(String),
}

impl EtherAmount {
    /// Parse a decimal string (e.g. `"1.5"`) into an amount.
    ///
    /// Rejects empty or non-numeric text, zero and negative values, and
    /// text the unit parser cannot represent in wei (exponent notation, or
    /// sub-wei values that round to zero).
    pub fn parse(raw: &str) -> Result<Self, AmountError> {
        let text = raw.trim();
        let number: f64 = text.parse().map_err(|_| AmountError::NotANumber)?;
        if !number.is_finite() {
            return Err(AmountError::NotANumber);
        }
        if number <= 0.0 {
            return Err(AmountError::NotPositive);
        }
        let wei = parse_ether(text).map_err(|e| AmountError::Unrepresentable(e.to_string()))?;
        if wei.is_zero() {
            return Err(AmountError::NotPositive);
        }
        Ok(Self { text: text.to_string(), wei })
    }

    pub fn text(&self) -> &str { &self.text }

    pub fn wei(&self) -> U256 { self.wei }

    /// The fixed registration payment.
    pub fn registration_fee() -> Self {
        Self::from_wei(U256::from(contract::REGISTRATION_FEE_WEI))
    }

    /// Amount for a known wei value, rendered without trailing zeros.
    pub fn from_wei(wei: U256) -> Self {
        let full = format_ether(wei);
        let text = match full.split_once('.') {
            Some((whole, frac)) if frac.trim_end_matches('0').is_empty() => whole.to_string(),
            Some((whole, frac)) => format!("{whole}.{}", frac.trim_end_matches('0')),
            None => full,
        };
        Self { text, wei }
    }
}

impl fmt::Display for EtherAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
