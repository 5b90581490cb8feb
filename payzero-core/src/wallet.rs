//! Wallet-authentication boundary.
//!
//! The wallet provider turns an email login into a session that carries a
//! signing capability bound to one address. Custody, key management, and the
//! actual cryptography live entirely behind these traits.

use crate::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Identity metadata reported by the wallet provider for the active session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IdentityMetadata {
    pub email: String,
}

/// Opaque signing capability bound to one address.
///
/// Transfer authorization happens inside the provider that issued the handle;
/// the core only ever sees the bound address.
pub trait Signer: Send + Sync {
    /// The address this capability can sign for.
    fn address(&self) -> String;
}

/// External wallet-authentication collaborator.
#[async_trait]
pub trait WalletAuth: Send + Sync {
    /// Whether a previously established session can be restored.
    async fn is_session_active(&self) -> Result<bool>;

    /// Send a passwordless login link and suspend until the session is ready
    /// or the provider reports an error.
    async fn send_login_link(&self, email: &str) -> Result<()>;

    /// Identity metadata for the active session.
    async fn identity_metadata(&self) -> Result<IdentityMetadata>;

    /// The signing capability of the active session.
    async fn signing_handle(&self) -> Result<Arc<dyn Signer>>;

    /// Invalidate the active session.
    async fn invalidate_session(&self) -> Result<()>;
}
