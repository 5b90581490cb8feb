//! Receive view: QR payload for this account, optionally with an amount.

use crate::ui;
use anyhow::{anyhow, Context, Result};
use std::path::Path;

pub async fn run(storage_dir: &Path, amount: Option<String>) -> Result<()> {
    let mut app = super::restored_app(storage_dir).await?;
    super::require_session(&app)?;

    if let Some(amount) = amount {
        app.set_amount(amount);
    }
    app.open_receive().map_err(|e| anyhow!(e.message()))?;

    let state = app.state();
    ui::header("Receive");
    if let Some(username) = &state.username {
        ui::field("Share", &ui::handle(username));
    }
    if let Some(session) = &state.session {
        ui::field("Address", &session.address);
    }
    if let Some(payload) = &state.qr_payload {
        ui::qr_code(payload).context("failed to render QR code")?;
        ui::info("Scan the code or share your @username to get paid.");
    }
    Ok(())
}
