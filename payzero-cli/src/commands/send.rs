//! Send flow: recipient and amount, confirmation, submission, settlement.

use crate::ui;
use anyhow::{anyhow, Result};
use payzero_core::models::TransferStatus;
use std::path::Path;

pub async fn run(
    storage_dir: &Path,
    to: Option<String>,
    amount: Option<String>,
    yes: bool,
) -> Result<()> {
    let mut app = super::restored_app(storage_dir).await?;
    super::require_session(&app)?;

    app.open_send();

    let to = match to {
        Some(to) => to,
        None => ui::input("To (@username or 0x...)")?,
    };
    let amount = match amount {
        Some(amount) => amount,
        None => ui::input("Amount (USDC)")?,
    };
    app.set_recipient(to.clone());
    app.set_amount(amount.clone());
    app.continue_to_confirm().map_err(|e| anyhow!(e.message()))?;

    ui::header("Confirm Payment");
    ui::field("To", &to);
    ui::field("Amount", &ui::amount(&amount, "USDC"));
    ui::field("Network", "Base Sepolia");
    ui::field("Fee", "~$0.001");

    if !yes && !ui::confirm("Send this payment?", true)? {
        ui::info("Cancelled.");
        return Ok(());
    }

    let spinner = ui::spinner("Submitting transfer...");
    let submission = app.send_payment().await;
    spinner.finish_and_clear();

    let result = match submission {
        Ok(result) => result,
        Err(err) => {
            ui::error(&err.message());
            return Err(anyhow!(err.message()));
        }
    };

    ui::success(&format!("Sent {} to {}", ui::amount(&amount, "USDC"), to));
    ui::field("Tx", &ui::short_address(&result.tx_hash));
    ui::field("Explorer", &ui::link(&app.config().tx_url(&result.tx_hash)));

    let spinner = ui::spinner("Waiting for confirmation...");
    let status = app.settle_pending(&result).await;
    spinner.finish_and_clear();

    match status {
        TransferStatus::Confirmed => ui::success("Confirmed on-chain"),
        TransferStatus::Failed => {
            ui::warning("The network did not confirm this transfer. Check the explorer link.")
        }
        TransferStatus::Submitted => {}
    }

    app.dismiss_success();
    Ok(())
}
