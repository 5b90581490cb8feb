//! Balance display with fiat conversion.

use crate::ui;
use anyhow::Result;
use payzero_core::Fiat;
use std::path::Path;

pub async fn run(storage_dir: &Path, currency: Option<String>, network: bool) -> Result<()> {
    let mut app = super::restored_app(storage_dir).await?;
    super::require_session(&app)?;

    if let Some(code) = currency {
        let fiat: Fiat = code.parse()?;
        app.set_currency(fiat);
    }

    if network {
        return network_balance(&app).await;
    }

    let spinner = ui::spinner("Fetching balances...");
    app.refresh_balances().await;
    spinner.finish_and_clear();

    super::print_home(&app);
    ui::separator();
    ui::info(&format!(
        "Get testnet tokens: {}",
        ui::link(app.config().faucet_url())
    ));
    Ok(())
}

/// Read the session address's balances from the real network.
#[cfg(feature = "http-rpc")]
async fn network_balance(app: &payzero_core::App) -> Result<()> {
    use payzero_core::{chain::RpcProvider, BalanceService};
    use std::sync::Arc;

    let session = app
        .state()
        .session
        .clone()
        .ok_or_else(|| anyhow::anyhow!("Not logged in"))?;
    let config = app.config().clone();
    let service = BalanceService::new(Arc::new(RpcProvider::new(config.clone())?), config);

    let spinner = ui::spinner("Querying Base Sepolia...");
    let balance = service.fetch(&session.address).await;
    spinner.finish_and_clear();

    let balance = balance?;
    ui::header("On-chain Balance (Base Sepolia)");
    ui::field("Address", &session.address);
    ui::field("ETH", &balance.native);
    ui::field("USDC", &balance.token);
    Ok(())
}

#[cfg(not(feature = "http-rpc"))]
async fn network_balance(_app: &payzero_core::App) -> Result<()> {
    anyhow::bail!("Rebuild with the 'http-rpc' feature to query the real network")
}
