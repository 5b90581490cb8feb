//! Top-level application controller.
//!
//! `App` owns the collaborators and the state container, and drives every
//! view transition by dispatching events through the pure reducer. All
//! suspension points live here: session restore, email login, balance fetch,
//! and transfer submission/settlement. A single-in-flight guard refuses to
//! start a new suspended operation while one is already loading.

use crate::balance::BalanceService;
use crate::chain::ChainProvider;
use crate::config::ChainConfig;
use crate::currency::Fiat;
use crate::directory::{DirectoryStore, UsernameDirectory};
use crate::models::{ReceivePayload, Session, TransferRequest, TransferResult, TransferStatus};
use crate::state::{reduce, AppEvent, AppState};
use crate::transfer::TransferOrchestrator;
use crate::wallet::WalletAuth;
use crate::{PayzeroError, Result};
use std::sync::Arc;

pub struct App {
    auth: Arc<dyn WalletAuth>,
    balances: BalanceService,
    orchestrator: TransferOrchestrator,
    directory: UsernameDirectory,
    config: ChainConfig,
    state: AppState,
}

impl App {
    pub fn new(
        auth: Arc<dyn WalletAuth>,
        chain: Arc<dyn ChainProvider>,
        store: Arc<dyn DirectoryStore>,
        config: ChainConfig,
    ) -> Self {
        Self {
            auth,
            balances: BalanceService::new(chain.clone(), config.clone()),
            orchestrator: TransferOrchestrator::new(chain, config.clone()),
            directory: UsernameDirectory::new(store),
            config,
            state: AppState::new(),
        }
    }

    /// Current state snapshot.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    pub fn directory(&self) -> &UsernameDirectory {
        &self.directory
    }

    fn dispatch(&mut self, event: AppEvent) {
        self.state = reduce(std::mem::take(&mut self.state), event);
    }

    /// Single-in-flight guard: refuse to start a suspended operation while
    /// another is loading. A broadcast transfer stays in flight until
    /// [`App::settle_pending`] records its terminal status.
    fn begin_operation(&mut self) -> Result<()> {
        if self.state.loading {
            return Err(PayzeroError::validation(
                "Another operation is in progress",
            ));
        }
        self.dispatch(AppEvent::LoadingStarted);
        Ok(())
    }

    /// Attempt to restore an existing session on startup.
    ///
    /// Restore failure is non-fatal: the view stays at Welcome with a
    /// surfaced message. No active session just means Welcome.
    pub async fn initialize(&mut self) {
        match self.auth.is_session_active().await {
            Ok(false) => {}
            Ok(true) => {
                if let Err(err) = self.load_session().await {
                    self.dispatch(AppEvent::RestoreFailed {
                        message: err.message(),
                    });
                }
            }
            Err(err) => {
                self.dispatch(AppEvent::RestoreFailed {
                    message: err.message(),
                });
            }
        }
    }

    /// Log in with a passwordless email link.
    pub async fn login_with_email(&mut self, email: &str) -> Result<()> {
        let email = email.trim();
        if email.is_empty() {
            let err = PayzeroError::validation("Enter email");
            self.dispatch(AppEvent::AuthFailed {
                message: err.message(),
            });
            return Err(err);
        }
        self.begin_operation()?;

        if let Err(err) = self.auth.send_login_link(email).await {
            let err = PayzeroError::auth(format!("Login failed: {}", err.message()));
            self.dispatch(AppEvent::AuthFailed {
                message: err.message(),
            });
            return Err(err);
        }

        if let Err(err) = self.load_session().await {
            self.dispatch(AppEvent::AuthFailed {
                message: err.message(),
            });
            return Err(err);
        }
        Ok(())
    }

    /// Populate the session from the wallet provider and route to Home or
    /// AwaitingUsername depending on whether the address has a username.
    async fn load_session(&mut self) -> Result<()> {
        let metadata = self.auth.identity_metadata().await?;
        let signer = self.auth.signing_handle().await?;
        self.dispatch(AppEvent::SessionEstablished {
            session: Session {
                email: metadata.email,
                address: signer.address(),
            },
        });
        self.resolve_username_for_session().await
    }

    /// Reverse-scan the directory for the session address.
    async fn resolve_username_for_session(&mut self) -> Result<()> {
        let address = self.session_address()?;
        match self.directory.reverse_lookup(&address).await? {
            Some(username) => {
                self.dispatch(AppEvent::UsernameAttached { username });
                self.refresh_balances().await;
            }
            None => self.dispatch(AppEvent::UsernameRequired),
        }
        Ok(())
    }

    /// Claim a username for the authenticated address.
    pub async fn register_username(&mut self, username: &str) -> Result<()> {
        let address = self.session_address()?;
        match self.directory.register(username, &address).await {
            Ok(claimed) => {
                self.dispatch(AppEvent::UsernameAttached { username: claimed });
                self.refresh_balances().await;
                Ok(())
            }
            Err(err) => {
                self.dispatch(AppEvent::UsernameRejected {
                    message: err.message(),
                });
                Err(err)
            }
        }
    }

    /// Fetch both balances for the session address.
    ///
    /// Failures are logged and swallowed; the prior balance stays in place
    /// rather than blocking navigation.
    pub async fn refresh_balances(&mut self) {
        let Ok(address) = self.session_address() else {
            return;
        };
        match self.balances.fetch(&address).await {
            Ok(balance) => self.dispatch(AppEvent::BalanceUpdated { balance }),
            Err(err) => {
                tracing::warn!(error = %err, "balance fetch failed, keeping prior balance");
            }
        }
    }

    pub fn set_currency(&mut self, currency: Fiat) {
        self.dispatch(AppEvent::CurrencySelected { currency });
    }

    pub fn set_recipient(&mut self, value: impl Into<String>) {
        self.dispatch(AppEvent::RecipientChanged {
            value: value.into(),
        });
    }

    pub fn set_amount(&mut self, value: impl Into<String>) {
        self.dispatch(AppEvent::AmountChanged {
            value: value.into(),
        });
    }

    pub fn open_send(&mut self) {
        self.dispatch(AppEvent::SendOpened);
    }

    /// Continue from Send to Confirm. Pure presence check on both fields;
    /// semantic validation happens on submission.
    pub fn continue_to_confirm(&mut self) -> Result<()> {
        if !TransferOrchestrator::inputs_present(&self.transfer_request()) {
            return Err(PayzeroError::validation("Enter recipient and amount"));
        }
        self.dispatch(AppEvent::ConfirmOpened);
        Ok(())
    }

    /// Submit the transfer from the Confirm view.
    ///
    /// On success the view moves to Success optimistically with the captured
    /// transaction hash, and the transfer counts as in flight until
    /// [`App::settle_pending`] runs; starting another operation before then
    /// is refused. On failure the view stays at Confirm with the message
    /// surfaced and loading cleared, so the user may retry or go back.
    pub async fn send_payment(&mut self) -> Result<TransferResult> {
        if self.state.session.is_none() {
            return Err(PayzeroError::auth("Not logged in"));
        }
        self.begin_operation()?;

        let request = self.transfer_request();
        let signer = match self.auth.signing_handle().await {
            Ok(signer) => signer,
            Err(err) => {
                self.dispatch(AppEvent::TransferFailed {
                    message: err.message(),
                });
                return Err(err);
            }
        };

        match self
            .orchestrator
            .submit(&request, &self.directory, signer.as_ref())
            .await
        {
            Ok(result) => {
                self.dispatch(AppEvent::TransferSubmitted {
                    tx_hash: result.tx_hash.clone(),
                });
                Ok(result)
            }
            Err(err) => {
                self.dispatch(AppEvent::TransferFailed {
                    message: err.message(),
                });
                Err(err)
            }
        }
    }

    /// Await confirmation of a submitted transfer and refresh balances once
    /// it lands. The view has already advanced; the terminal status is
    /// recorded separately so a late failure stays observable.
    pub async fn settle_pending(&mut self, result: &TransferResult) -> TransferStatus {
        let status = self.orchestrator.settle(result).await;
        self.dispatch(AppEvent::TransferSettled { status });
        if status == TransferStatus::Confirmed {
            self.refresh_balances().await;
        }
        status
    }

    /// Open the receive view with the QR payload for this account. The
    /// current amount field, when set, becomes the requested amount.
    pub fn open_receive(&mut self) -> Result<()> {
        let address = self.session_address()?;
        let username = self
            .state
            .username
            .clone()
            .ok_or_else(|| PayzeroError::auth("No username registered"))?;
        let amount = match self.state.amount.trim() {
            "" => None,
            amount => Some(amount.to_string()),
        };
        let payload = ReceivePayload {
            username,
            address,
            amount,
        }
        .to_json()?;
        self.dispatch(AppEvent::ReceiveOpened { payload });
        Ok(())
    }

    pub fn go_back(&mut self) {
        self.dispatch(AppEvent::WentBack);
    }

    pub fn dismiss_success(&mut self) {
        self.dispatch(AppEvent::SuccessDismissed);
    }

    /// Invalidate the session with the wallet provider and reset to Welcome.
    pub async fn logout(&mut self) {
        if let Err(err) = self.auth.invalidate_session().await {
            tracing::warn!(error = %err, "session invalidation failed, clearing locally");
        }
        self.dispatch(AppEvent::LoggedOut);
    }

    fn transfer_request(&self) -> TransferRequest {
        TransferRequest {
            recipient_input: self.state.recipient.clone(),
            amount: self.state.amount.clone(),
        }
    }

    fn session_address(&self) -> Result<String> {
        self.state
            .session
            .as_ref()
            .map(|s| s.address.clone())
            .ok_or_else(|| PayzeroError::auth("Not logged in"))
    }
}
