//! Email login and username onboarding.

use crate::demo::DemoChain;
use crate::ui;
use anyhow::{anyhow, Result};
use payzero_core::AppView;
use std::path::Path;

pub async fn run(storage_dir: &Path, email: Option<String>) -> Result<()> {
    let mut app = super::restored_app(storage_dir).await?;

    if app.state().session.is_some() {
        let email = app.state().session.as_ref().map(|s| s.email.clone());
        ui::info(&format!(
            "Already logged in as {}. Run 'payzero logout' to switch accounts.",
            email.unwrap_or_default()
        ));
        return Ok(());
    }

    let email = match email {
        Some(email) => email,
        None => ui::input("Email")?,
    };

    let spinner = ui::spinner("Sending magic link...");
    let login = app.login_with_email(&email).await;
    spinner.finish_and_clear();
    login.map_err(|e| anyhow!(e.message()))?;
    ui::success(&format!("Logged in as {}", email.trim()));

    // Demo accounts join the ledger with testnet-like seed funds
    if let Some(session) = app.state().session.clone() {
        DemoChain::new(storage_dir).ensure_funded(&session.address)?;
    }

    if app.state().view == AppView::AwaitingUsername {
        ui::info("Choose a username so people can send you money.");
        loop {
            let username = ui::input("Username (3-20 chars, letters/numbers/_)")?;
            match app.register_username(&username).await {
                Ok(()) => {
                    ui::success(&format!(
                        "Created {}",
                        ui::handle(app.state().username.as_deref().unwrap_or(&username))
                    ));
                    break;
                }
                Err(err) => ui::error(&err.message()),
            }
        }
    }

    app.refresh_balances().await;
    super::print_home(&app);
    ui::separator();
    ui::info(&format!(
        "Get testnet tokens: {}",
        ui::link(app.config().faucet_url())
    ));
    Ok(())
}
