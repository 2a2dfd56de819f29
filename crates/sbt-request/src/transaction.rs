//! Native ETH transfer construction and JSON-RPC quantity helpers.

use crate::SbtError;
use alloy::hex;
use alloy::primitives::utils::parse_ether;
use alloy::primitives::{Address, U256};
use serde_json::{json, Value};

/// A plain value transfer as submitted through `eth_sendTransaction`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRequest {
    pub from: Address,
    pub to: Address,
    pub value: U256,
    pub gas: u64,
    pub gas_price: U256,
}

impl TransactionRequest {
    /// JSON-RPC transaction object with `0x` hex quantities.
    pub fn to_rpc(&self) -> Value {
        json!({
            "from": hex::encode_prefixed(self.from),
            "to": hex::encode_prefixed(self.to),
            "value": format_quantity(self.value),
            "gas": format_quantity(U256::from(self.gas)),
            "gasPrice": format_quantity(self.gas_price),
        })
    }
}

/// Convert a decimal ETH string (as displayed) to wei, 18 decimals.
pub fn eth_to_wei(amount: &str) -> Result<U256, SbtError> {
    let trimmed = amount.trim();
    if trimmed.is_empty() {
        return Err(SbtError::InvalidAmount("no amount displayed".to_string()));
    }
    parse_ether(trimmed).map_err(|e| SbtError::InvalidAmount(format!("{trimmed}: {e}")))
}

/// Minimal `0x` hex encoding used by JSON-RPC quantities.
pub fn format_quantity(value: U256) -> String {
    format!("0x{value:x}")
}

/// Parse a JSON-RPC hex quantity such as `"0x5208"`.
pub fn parse_quantity(s: &str) -> Result<U256, SbtError> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .ok_or_else(|| SbtError::Provider(format!("invalid quantity: {s}")))?;
    if digits.is_empty() {
        return Err(SbtError::Provider(format!("invalid quantity: {s}")));
    }
    U256::from_str_radix(digits, 16)
        .map_err(|e| SbtError::Provider(format!("invalid quantity {s}: {e}")))
}
