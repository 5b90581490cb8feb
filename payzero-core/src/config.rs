//! Network configuration presets.
//!
//! The client targets a single fixed network. The preset carries everything
//! the chain-facing services need: RPC endpoint, chain id, the stablecoin
//! contract, decimal precisions, and the block explorer for receipts.

/// Configuration for the target chain and stablecoin contract.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChainConfig {
    /// JSON-RPC endpoint URL.
    pub rpc_url: String,
    /// EVM chain id.
    pub chain_id: u64,
    /// Stablecoin (USDC) contract address.
    pub token_address: String,
    /// Display ticker for the native asset.
    pub native_symbol: String,
    /// Display ticker for the stablecoin.
    pub token_symbol: String,
    /// Base-unit precision of the native asset.
    pub native_decimals: u32,
    /// Base-unit precision of the stablecoin.
    pub token_decimals: u32,
    /// Block explorer base URL.
    pub explorer_url: String,
    /// HTTP timeout for RPC calls, in seconds.
    pub timeout_secs: u64,
}

impl ChainConfig {
    /// Base Sepolia testnet with the canonical USDC deployment.
    pub fn base_sepolia() -> Self {
        Self {
            rpc_url: "https://sepolia.base.org".to_string(),
            chain_id: 84532,
            token_address: "0x036CbD53842c5426634e7929541eC2318f3dCF7e".to_string(),
            native_symbol: "ETH".to_string(),
            token_symbol: "USDC".to_string(),
            native_decimals: 18,
            token_decimals: 6,
            explorer_url: "https://sepolia.basescan.org".to_string(),
            timeout_secs: 30,
        }
    }

    /// Explorer URL for a transaction hash.
    pub fn tx_url(&self, tx_hash: &str) -> String {
        format!("{}/tx/{}", self.explorer_url.trim_end_matches('/'), tx_hash)
    }

    /// Faucet for acquiring testnet funds.
    pub fn faucet_url(&self) -> &'static str {
        "https://www.alchemy.com/faucets/base-sepolia"
    }
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self::base_sepolia()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_sepolia_preset() {
        let config = ChainConfig::base_sepolia();
        assert_eq!(config.chain_id, 84532);
        assert_eq!(config.native_decimals, 18);
        assert_eq!(config.token_decimals, 6);
        assert!(config.token_address.starts_with("0x"));
    }

    #[test]
    fn tx_url_joins_cleanly() {
        let mut config = ChainConfig::base_sepolia();
        config.explorer_url = "https://sepolia.basescan.org/".to_string();
        assert_eq!(
            config.tx_url("0xabc"),
            "https://sepolia.basescan.org/tx/0xabc"
        );
    }
}
