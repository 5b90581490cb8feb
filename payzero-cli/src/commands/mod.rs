//! CLI command implementations

pub mod balance;
pub mod login;
pub mod logout;
pub mod receive;
pub mod send;
pub mod username;
pub mod whoami;

use crate::demo::{DemoChain, DemoWallet};
use anyhow::{bail, Result};
use payzero_core::{App, ChainConfig, JsonFileStore};
use std::path::Path;
use std::sync::Arc;

/// Path of the shared username directory snapshot.
fn directory_path(storage_dir: &Path) -> std::path::PathBuf {
    storage_dir.join("users.json")
}

/// Build the application over the demo collaborators and restore any
/// existing session.
pub async fn restored_app(storage_dir: &Path) -> Result<App> {
    let wallet = Arc::new(DemoWallet::new(storage_dir));
    let chain = Arc::new(DemoChain::new(storage_dir));
    let store = Arc::new(JsonFileStore::new(directory_path(storage_dir)));

    let mut app = App::new(wallet, chain, store, ChainConfig::base_sepolia());
    app.initialize().await;
    Ok(app)
}

/// Fail with a login hint unless a session is active.
pub fn require_session(app: &App) -> Result<()> {
    if app.state().session.is_none() {
        bail!("Not logged in. Run 'payzero login <email>' first.");
    }
    Ok(())
}

/// Print the home summary: account, balances, and the fiat headline.
pub fn print_home(app: &App) {
    use crate::ui;
    use payzero_core::currency;

    let state = app.state();
    let config = app.config();
    let fiat = state.currency;
    let total = currency::total_usd(&state.balance.native, &state.balance.token);

    ui::header("PayZero");
    if let Some(username) = &state.username {
        ui::field("Account", &ui::handle(username));
    }
    if let Some(session) = &state.session {
        ui::field("Address", &ui::short_address(&session.address));
    }
    ui::field(
        "Balance",
        &format!(
            "{} | {}",
            ui::amount(&state.balance.native, &config.native_symbol),
            ui::amount(&state.balance.token, &config.token_symbol),
        ),
    );
    ui::field(
        "Total",
        &format!(
            "{}{} {}",
            fiat.symbol(),
            currency::convert(&total.to_string(), fiat),
            fiat.code()
        ),
    );
}
