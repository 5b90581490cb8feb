//! Balance queries.
//!
//! Two independent reads against the chain provider, joined so both complete
//! before the balance is considered updated. A failure in either read fails
//! the fetch as a whole; callers keep the prior balance (stale but
//! consistent, never partially overwritten).

use crate::chain::ChainProvider;
use crate::config::ChainConfig;
use crate::models::Balance;
use crate::{units, Result};
use std::sync::Arc;

pub struct BalanceService {
    provider: Arc<dyn ChainProvider>,
    config: ChainConfig,
}

impl BalanceService {
    pub fn new(provider: Arc<dyn ChainProvider>, config: ChainConfig) -> Self {
        Self { provider, config }
    }

    /// Fetch native and stablecoin balances for an address, normalized to
    /// decimal display strings.
    pub async fn fetch(&self, address: &str) -> Result<Balance> {
        let (native, token) = tokio::join!(
            self.provider.native_balance(address),
            self.provider
                .token_balance(&self.config.token_address, address),
        );
        let balance = Balance {
            native: units::format_units(native?, self.config.native_decimals),
            token: units::format_units(token?, self.config.token_decimals),
        };
        tracing::debug!(address = %address, native = %balance.native, token = %balance.token, "fetched balances");
        Ok(balance)
    }
}
