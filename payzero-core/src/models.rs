//! Shared data types for the client.

use serde::{Deserialize, Serialize};

/// Authenticated identity held by the session manager.
///
/// Created on successful authentication, cleared on logout, never persisted
/// by the core. The signing capability itself lives behind the wallet trait.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub email: String,
    pub address: String,
}

/// One claimed username. Immutable once registered; there is no rename or
/// delete operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsernameRecord {
    pub username: String,
    pub address: String,
}

/// Native and stablecoin balances as human-readable decimal strings.
///
/// Recomputed wholesale on each fetch; never partially updated.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub native: String,
    pub token: String,
}

impl Balance {
    pub fn zero() -> Self {
        Self {
            native: "0".to_string(),
            token: "0".to_string(),
        }
    }
}

/// Ephemeral send-form contents; cleared on completion or cancellation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransferRequest {
    pub recipient_input: String,
    pub amount: String,
}

/// Lifecycle of a broadcast transfer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransferStatus {
    /// Broadcast, transaction id captured, confirmation pending.
    Submitted,
    /// Reported mined by the chain provider.
    Confirmed,
    /// Failed before or after broadcast.
    Failed,
}

/// Outcome of a broadcast transfer, retained only for display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransferResult {
    pub tx_hash: String,
    pub status: TransferStatus,
}

/// Payload encoded into the receive-side QR code.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceivePayload {
    pub username: String,
    pub address: String,
    /// Requested amount, or `null` for "any amount".
    pub amount: Option<String>,
}

impl ReceivePayload {
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn receive_payload_encodes_null_amount() {
        let payload = ReceivePayload {
            username: "mama_janet".to_string(),
            address: "0xabc".to_string(),
            amount: None,
        };
        let json = payload.to_json().unwrap();
        assert!(json.contains("\"amount\":null"));

        let parsed: ReceivePayload = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, payload);
    }
}
