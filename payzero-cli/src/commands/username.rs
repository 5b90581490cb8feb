//! Claim a username for the authenticated address.

use crate::ui;
use anyhow::{anyhow, Result};
use std::path::Path;

pub async fn run(storage_dir: &Path, name: Option<String>) -> Result<()> {
    let mut app = super::restored_app(storage_dir).await?;
    super::require_session(&app)?;

    if let Some(existing) = &app.state().username {
        ui::info(&format!("Already registered as {}", ui::handle(existing)));
        return Ok(());
    }

    let name = match name {
        Some(name) => name,
        None => ui::input("Username (3-20 chars, letters/numbers/_)")?,
    };
    app.register_username(&name)
        .await
        .map_err(|e| anyhow!(e.message()))?;

    ui::success(&format!(
        "Created {}",
        ui::handle(app.state().username.as_deref().unwrap_or(&name))
    ));
    Ok(())
}
