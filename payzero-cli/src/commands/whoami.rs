//! Show the current account.

use crate::ui;
use anyhow::Result;
use std::path::Path;

pub async fn run(storage_dir: &Path) -> Result<()> {
    let app = super::restored_app(storage_dir).await?;
    super::require_session(&app)?;

    let state = app.state();
    ui::header("Current Account");
    if let Some(session) = &state.session {
        ui::field("Email", &session.email);
        ui::field("Address", &session.address);
    }
    match &state.username {
        Some(username) => {
            ui::field("Username", &ui::handle(username));
            ui::info(&format!("Share {} to receive payments", ui::handle(username)));
        }
        None => ui::warning("No username yet. Run 'payzero username <name>'."),
    }
    Ok(())
}
