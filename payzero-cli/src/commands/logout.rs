//! End the current session.

use crate::ui;
use anyhow::Result;
use std::path::Path;

pub async fn run(storage_dir: &Path) -> Result<()> {
    let mut app = super::restored_app(storage_dir).await?;

    if app.state().session.is_none() {
        ui::info("Not logged in.");
        return Ok(());
    }

    app.logout().await;
    ui::success("Logged out.");
    Ok(())
}
