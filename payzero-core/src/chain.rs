//! Chain-provider boundary.
//!
//! Balance reads, transfer broadcast, and confirmation tracking against the
//! target network. The `RpcProvider` here is read-only: like a block-explorer
//! executor it can query balances and watch a transaction, but broadcasting a
//! transfer requires the signing capability held by the wallet provider.

use crate::wallet::Signer;
use crate::Result;
use async_trait::async_trait;

/// External chain-provider collaborator.
///
/// Amounts cross this boundary as base-unit integers; decimal display
/// conversion is the caller's job.
#[async_trait]
pub trait ChainProvider: Send + Sync {
    /// Native-asset balance of an address, in base units.
    async fn native_balance(&self, address: &str) -> Result<u128>;

    /// `balanceOf(address)` on a token contract, in base units.
    async fn token_balance(&self, token: &str, address: &str) -> Result<u128>;

    /// Submit a token transfer signed by the given capability and return the
    /// transaction hash immediately, before confirmation.
    async fn submit_transfer(
        &self,
        token: &str,
        to: &str,
        amount: u128,
        signer: &dyn Signer,
    ) -> Result<String>;

    /// Suspend until the transaction is mined. Returns an error if the chain
    /// reports the transaction failed.
    async fn await_confirmation(&self, tx_hash: &str) -> Result<()>;
}

#[cfg(feature = "http-rpc")]
pub use rpc::RpcProvider;

#[cfg(feature = "http-rpc")]
mod rpc {
    use super::ChainProvider;
    use crate::config::ChainConfig;
    use crate::wallet::Signer;
    use crate::{PayzeroError, Result};
    use async_trait::async_trait;
    use serde::Deserialize;
    use serde_json::json;
    use std::time::Duration;

    /// Selector for `balanceOf(address)`.
    const BALANCE_OF_SELECTOR: &str = "0x70a08231";
    /// Polling cadence and bound for confirmation watching.
    const POLL_INTERVAL: Duration = Duration::from_secs(2);
    const MAX_POLL_ATTEMPTS: u32 = 90;

    #[derive(Deserialize)]
    struct RpcResponse<T> {
        result: Option<T>,
        error: Option<RpcErrorBody>,
    }

    #[derive(Deserialize)]
    struct RpcErrorBody {
        code: i64,
        message: String,
    }

    #[derive(Deserialize)]
    struct TxReceipt {
        status: Option<String>,
    }

    /// Read-only JSON-RPC chain provider.
    pub struct RpcProvider {
        config: ChainConfig,
        client: reqwest::Client,
    }

    impl RpcProvider {
        pub fn new(config: ChainConfig) -> Result<Self> {
            let client = reqwest::Client::builder()
                .timeout(Duration::from_secs(config.timeout_secs))
                .build()
                .map_err(|e| PayzeroError::chain(format!("failed to build HTTP client: {}", e)))?;
            Ok(Self { config, client })
        }

        async fn call<T: serde::de::DeserializeOwned>(
            &self,
            method: &str,
            params: serde_json::Value,
        ) -> Result<T> {
            let body = json!({
                "jsonrpc": "2.0",
                "id": 1,
                "method": method,
                "params": params,
            });
            let response: RpcResponse<T> = self
                .client
                .post(&self.config.rpc_url)
                .json(&body)
                .send()
                .await
                .map_err(|e| PayzeroError::chain(format!("{} request failed: {}", method, e)))?
                .json()
                .await
                .map_err(|e| PayzeroError::chain(format!("{} response malformed: {}", method, e)))?;

            if let Some(err) = response.error {
                return Err(PayzeroError::chain(format!(
                    "{} error {}: {}",
                    method, err.code, err.message
                )));
            }
            response
                .result
                .ok_or_else(|| PayzeroError::chain(format!("{} returned no result", method)))
        }
    }

    /// Parse a `0x`-prefixed hex quantity into base units.
    fn parse_quantity(hex_value: &str) -> Result<u128> {
        let digits = hex_value.trim_start_matches("0x").trim_start_matches('0');
        if digits.is_empty() {
            return Ok(0);
        }
        if digits.len() > 32 {
            return Err(PayzeroError::chain("balance exceeds supported range"));
        }
        u128::from_str_radix(digits, 16)
            .map_err(|e| PayzeroError::chain(format!("invalid hex quantity: {}", e)))
    }

    /// ABI-encode an address as a left-padded 32-byte word.
    fn pad_address(address: &str) -> String {
        let stripped = address.trim_start_matches("0x").to_lowercase();
        format!("{:0>64}", stripped)
    }

    #[async_trait]
    impl ChainProvider for RpcProvider {
        async fn native_balance(&self, address: &str) -> Result<u128> {
            let balance: String = self
                .call("eth_getBalance", json!([address, "latest"]))
                .await?;
            parse_quantity(&balance)
        }

        async fn token_balance(&self, token: &str, address: &str) -> Result<u128> {
            let data = format!("{}{}", BALANCE_OF_SELECTOR, pad_address(address));
            let result: String = self
                .call(
                    "eth_call",
                    json!([{ "to": token, "data": data }, "latest"]),
                )
                .await?;
            parse_quantity(&result)
        }

        async fn submit_transfer(
            &self,
            _token: &str,
            _to: &str,
            _amount: u128,
            _signer: &dyn Signer,
        ) -> Result<String> {
            // Broadcasting needs the wallet provider's signer; this provider
            // only reads the chain.
            Err(PayzeroError::chain(
                "transfer submission is handled by the wallet provider",
            ))
        }

        async fn await_confirmation(&self, tx_hash: &str) -> Result<()> {
            for _ in 0..MAX_POLL_ATTEMPTS {
                let receipt: Option<TxReceipt> = self
                    .call("eth_getTransactionReceipt", json!([tx_hash]))
                    .await?;
                if let Some(receipt) = receipt {
                    return match receipt.status.as_deref() {
                        Some("0x1") => Ok(()),
                        other => Err(PayzeroError::chain(format!(
                            "transaction failed on chain (status {})",
                            other.unwrap_or("unknown")
                        ))),
                    };
                }
                tokio::time::sleep(POLL_INTERVAL).await;
            }
            Err(PayzeroError::chain("confirmation timed out"))
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn parses_hex_quantities() {
            assert_eq!(parse_quantity("0x0").unwrap(), 0);
            assert_eq!(parse_quantity("0x").unwrap(), 0);
            assert_eq!(parse_quantity("0xde0b6b3a7640000").unwrap(), 10u128.pow(18));
            // Full 32-byte word from eth_call
            assert_eq!(
                parse_quantity(
                    "0x00000000000000000000000000000000000000000000000000000000017d7840"
                )
                .unwrap(),
                25_000_000
            );
        }

        #[test]
        fn pads_addresses_to_a_word() {
            let padded = pad_address("0x036CbD53842c5426634e7929541eC2318f3dCF7e");
            assert_eq!(padded.len(), 64);
            assert!(padded.starts_with("000000000000000000000000"));
            assert!(padded.ends_with("f3dcf7e"));
        }
    }
}
