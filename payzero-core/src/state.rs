//! Application state and transitions.
//!
//! The full UI-relevant state lives in one `AppState` value, and every
//! transition is a pure total function from (state, event) to a new state, so
//! a session can be replayed deterministically in tests. The view field is
//! the single source of truth for which screen is active.
//!
//! `loading` spans each suspended operation from start to its terminal
//! transition; a broadcast transfer counts as in flight until it settles, so
//! the Success view can show while `loading` still refuses a second
//! operation. `error` is cleared whenever a new operation starts or a view
//! opens fresh.

use crate::currency::Fiat;
use crate::models::{Balance, Session, TransferStatus};

/// The active screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AppView {
    #[default]
    Welcome,
    AwaitingUsername,
    Home,
    Send,
    Confirm,
    Success,
    Receive,
}

/// Full UI-relevant state container.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AppState {
    pub view: AppView,
    pub session: Option<Session>,
    pub username: Option<String>,
    pub balance: Balance,
    pub currency: Fiat,
    pub recipient: String,
    pub amount: String,
    pub qr_payload: Option<String>,
    pub tx_hash: Option<String>,
    pub transfer_status: Option<TransferStatus>,
    pub error: Option<String>,
    pub loading: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            balance: Balance::zero(),
            ..Default::default()
        }
    }
}

/// Everything that can happen to the state: user actions and async results.
#[derive(Clone, Debug, PartialEq)]
pub enum AppEvent {
    /// An async operation against the session started.
    LoadingStarted,
    /// Session restore found nothing usable; non-fatal.
    RestoreFailed { message: String },
    /// The wallet provider resolved an authenticated session.
    SessionEstablished { session: Session },
    /// Login or another auth operation failed.
    AuthFailed { message: String },
    /// The session address already has a registered username.
    UsernameAttached { username: String },
    /// The session address has no username yet.
    UsernameRequired,
    /// Username registration was rejected.
    UsernameRejected { message: String },
    /// Both balance reads completed.
    BalanceUpdated { balance: Balance },
    /// Display currency picked on the home view.
    CurrencySelected { currency: Fiat },
    RecipientChanged { value: String },
    AmountChanged { value: String },
    SendOpened,
    ConfirmOpened,
    /// Transfer broadcast; hash captured before confirmation. The transfer
    /// stays in flight until settlement.
    TransferSubmitted { tx_hash: String },
    /// Transfer failed before leaving the confirm view.
    TransferFailed { message: String },
    /// Confirmation settled; the in-flight window closes.
    TransferSettled { status: TransferStatus },
    ReceiveOpened { payload: String },
    /// Fixed reverse edge: Send->Home, Confirm->Send, Receive->Home.
    WentBack,
    /// Done on the success view; clears the send form.
    SuccessDismissed,
    LoggedOut,
}

/// Pure transition function.
pub fn reduce(state: AppState, event: AppEvent) -> AppState {
    let mut next = state;
    match event {
        AppEvent::LoadingStarted => {
            next.loading = true;
            next.error = None;
        }
        AppEvent::RestoreFailed { message } => {
            next.view = AppView::Welcome;
            next.error = Some(message);
            next.loading = false;
        }
        AppEvent::SessionEstablished { session } => {
            next.session = Some(session);
        }
        AppEvent::AuthFailed { message } => {
            next.error = Some(message);
            next.loading = false;
        }
        AppEvent::UsernameAttached { username } => {
            next.username = Some(username);
            next.view = AppView::Home;
            next.error = None;
            next.loading = false;
        }
        AppEvent::UsernameRequired => {
            next.view = AppView::AwaitingUsername;
            next.loading = false;
        }
        AppEvent::UsernameRejected { message } => {
            next.error = Some(message);
            next.loading = false;
        }
        AppEvent::BalanceUpdated { balance } => {
            next.balance = balance;
        }
        AppEvent::CurrencySelected { currency } => {
            next.currency = currency;
        }
        AppEvent::RecipientChanged { value } => {
            next.recipient = value;
        }
        AppEvent::AmountChanged { value } => {
            next.amount = value;
        }
        AppEvent::SendOpened => {
            next.view = AppView::Send;
            next.error = None;
        }
        AppEvent::ConfirmOpened => {
            next.view = AppView::Confirm;
            next.error = None;
        }
        AppEvent::TransferSubmitted { tx_hash } => {
            // Optimistic: the view advances while confirmation is pending,
            // and loading stays set until settlement
            next.tx_hash = Some(tx_hash);
            next.transfer_status = Some(TransferStatus::Submitted);
            next.view = AppView::Success;
            next.error = None;
        }
        AppEvent::TransferFailed { message } => {
            // The user stays on Confirm and may retry or go back
            next.error = Some(message);
            next.loading = false;
        }
        AppEvent::TransferSettled { status } => {
            next.transfer_status = Some(status);
            next.loading = false;
        }
        AppEvent::ReceiveOpened { payload } => {
            next.qr_payload = Some(payload);
            next.view = AppView::Receive;
            next.error = None;
        }
        AppEvent::WentBack => {
            next.view = match next.view {
                AppView::Send => AppView::Home,
                AppView::Confirm => AppView::Send,
                AppView::Receive => AppView::Home,
                other => other,
            };
        }
        AppEvent::SuccessDismissed => {
            next.view = AppView::Home;
            next.amount.clear();
            next.recipient.clear();
        }
        AppEvent::LoggedOut => {
            next = AppState {
                currency: next.currency,
                ..AppState::new()
            };
        }
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn home_state() -> AppState {
        let mut state = AppState::new();
        state.view = AppView::Home;
        state.session = Some(Session {
            email: "a@b.c".into(),
            address: "0xAAA".into(),
        });
        state.username = Some("alice".into());
        state
    }

    #[test]
    fn reduce_is_deterministic() {
        let state = home_state();
        let event = AppEvent::SendOpened;
        assert_eq!(
            reduce(state.clone(), event.clone()),
            reduce(state, event)
        );
    }

    #[test]
    fn loading_spans_submission_until_settlement() {
        let mut state = home_state();
        state.loading = true;
        let state = reduce(
            state,
            AppEvent::TransferSubmitted {
                tx_hash: "0x123".into(),
            },
        );
        // The view advanced but the transfer is still in flight
        assert!(state.loading);
        assert_eq!(state.view, AppView::Success);

        let state = reduce(
            state,
            AppEvent::TransferSettled {
                status: TransferStatus::Confirmed,
            },
        );
        assert!(!state.loading);
    }

    #[test]
    fn loading_cleared_on_failure() {
        let mut state = home_state();
        state.view = AppView::Confirm;
        state.loading = true;
        let state = reduce(
            state,
            AppEvent::TransferFailed {
                message: "Username not found".into(),
            },
        );
        assert!(!state.loading);
        assert_eq!(state.view, AppView::Confirm);
        assert_eq!(state.error.as_deref(), Some("Username not found"));
    }

    #[test]
    fn back_edges_are_fixed() {
        for (from, to) in [
            (AppView::Send, AppView::Home),
            (AppView::Confirm, AppView::Send),
            (AppView::Receive, AppView::Home),
            (AppView::Home, AppView::Home),
        ] {
            let mut state = home_state();
            state.view = from;
            assert_eq!(reduce(state, AppEvent::WentBack).view, to);
        }
    }

    #[test]
    fn back_preserves_form_data() {
        let mut state = home_state();
        state.view = AppView::Confirm;
        state.recipient = "@bob".into();
        state.amount = "10".into();
        let state = reduce(state, AppEvent::WentBack);
        assert_eq!(state.recipient, "@bob");
        assert_eq!(state.amount, "10");
    }

    #[test]
    fn success_dismiss_clears_form() {
        let mut state = home_state();
        state.view = AppView::Success;
        state.recipient = "@bob".into();
        state.amount = "10".into();
        let state = reduce(state, AppEvent::SuccessDismissed);
        assert_eq!(state.view, AppView::Home);
        assert!(state.recipient.is_empty());
        assert!(state.amount.is_empty());
    }

    #[test]
    fn logout_resets_but_keeps_currency() {
        let mut state = home_state();
        state.currency = Fiat::Ngn;
        state.loading = true;
        let state = reduce(state, AppEvent::LoggedOut);
        assert_eq!(state.view, AppView::Welcome);
        assert!(state.session.is_none());
        assert!(state.username.is_none());
        assert!(!state.loading);
        assert_eq!(state.currency, Fiat::Ngn);
    }

    #[test]
    fn loading_start_clears_stale_error() {
        let mut state = home_state();
        state.error = Some("old".into());
        let state = reduce(state, AppEvent::LoadingStarted);
        assert!(state.loading);
        assert!(state.error.is_none());
    }
}
