//! File-backed demo collaborators.
//!
//! The CLI runs against a local stand-in for the wallet provider and the
//! chain: the session is a JSON file, the address is derived from the email
//! digest, and balances live in a JSON ledger that new accounts join with
//! testnet-like seed funds. Transaction hashes are deterministic digests, and
//! confirmation lands after a short simulated delay. Build with `http-rpc`
//! for read-only access to the real network instead.

use async_trait::async_trait;
use payzero_core::testing::{address_for_email, StaticSigner};
use payzero_core::{ChainProvider, IdentityMetadata, PayzeroError, Signer, WalletAuth};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Seed funds for a new demo account: 0.05 ETH and 25 USDC in base units.
const SEED_NATIVE: u128 = 50_000_000_000_000_000;
const SEED_TOKEN: u128 = 25_000_000;

/// Simulated confirmation delay.
const CONFIRMATION_DELAY: Duration = Duration::from_millis(400);

#[derive(Serialize, Deserialize)]
struct StoredSession {
    email: String,
}

/// Wallet-auth stand-in persisting the session to `session.json`.
pub struct DemoWallet {
    session_path: PathBuf,
}

impl DemoWallet {
    pub fn new(storage_dir: impl AsRef<Path>) -> Self {
        Self {
            session_path: storage_dir.as_ref().join("session.json"),
        }
    }

    fn load_session(&self) -> payzero_core::Result<Option<StoredSession>> {
        if !self.session_path.exists() {
            return Ok(None);
        }
        let json = std::fs::read_to_string(&self.session_path)?;
        Ok(Some(serde_json::from_str(&json)?))
    }

    fn active_email(&self) -> payzero_core::Result<String> {
        self.load_session()?
            .map(|s| s.email)
            .ok_or_else(|| PayzeroError::auth("no active session"))
    }
}

#[async_trait]
impl WalletAuth for DemoWallet {
    async fn is_session_active(&self) -> payzero_core::Result<bool> {
        Ok(self.load_session()?.is_some())
    }

    async fn send_login_link(&self, email: &str) -> payzero_core::Result<()> {
        // The real provider emails a magic link here; the demo trusts the
        // address immediately.
        if let Some(parent) = self.session_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let session = StoredSession {
            email: email.to_string(),
        };
        std::fs::write(&self.session_path, serde_json::to_string_pretty(&session)?)?;
        tracing::debug!(email = %email, "demo session established");
        Ok(())
    }

    async fn identity_metadata(&self) -> payzero_core::Result<IdentityMetadata> {
        Ok(IdentityMetadata {
            email: self.active_email()?,
        })
    }

    async fn signing_handle(&self) -> payzero_core::Result<Arc<dyn Signer>> {
        let email = self.active_email()?;
        Ok(Arc::new(StaticSigner::new(address_for_email(&email))))
    }

    async fn invalidate_session(&self) -> payzero_core::Result<()> {
        if self.session_path.exists() {
            std::fs::remove_file(&self.session_path)?;
        }
        Ok(())
    }
}

#[derive(Serialize, Deserialize, Clone, Default)]
struct Account {
    native: u128,
    token: u128,
}

#[derive(Serialize, Deserialize, Clone)]
struct LedgerTransfer {
    tx_hash: String,
    from: String,
    to: String,
    amount: u128,
}

#[derive(Serialize, Deserialize, Default)]
struct Ledger {
    accounts: HashMap<String, Account>,
    transfers: Vec<LedgerTransfer>,
}

/// Chain stand-in with a JSON balance ledger.
pub struct DemoChain {
    ledger_path: PathBuf,
}

impl DemoChain {
    pub fn new(storage_dir: impl AsRef<Path>) -> Self {
        Self {
            ledger_path: storage_dir.as_ref().join("ledger.json"),
        }
    }

    /// Seed a new account with demo funds; existing accounts are untouched.
    pub fn ensure_funded(&self, address: &str) -> payzero_core::Result<()> {
        let mut ledger = self.load()?;
        let key = address.to_lowercase();
        if !ledger.accounts.contains_key(&key) {
            ledger.accounts.insert(
                key,
                Account {
                    native: SEED_NATIVE,
                    token: SEED_TOKEN,
                },
            );
            self.save(&ledger)?;
        }
        Ok(())
    }

    fn load(&self) -> payzero_core::Result<Ledger> {
        if !self.ledger_path.exists() {
            return Ok(Ledger::default());
        }
        let json = std::fs::read_to_string(&self.ledger_path)?;
        Ok(serde_json::from_str(&json)?)
    }

    fn save(&self, ledger: &Ledger) -> payzero_core::Result<()> {
        if let Some(parent) = self.ledger_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.ledger_path, serde_json::to_string_pretty(ledger)?)?;
        Ok(())
    }

    fn account(&self, address: &str) -> payzero_core::Result<Account> {
        let ledger = self.load()?;
        Ok(ledger
            .accounts
            .get(&address.to_lowercase())
            .cloned()
            .unwrap_or_default())
    }
}

#[async_trait]
impl ChainProvider for DemoChain {
    async fn native_balance(&self, address: &str) -> payzero_core::Result<u128> {
        Ok(self.account(address)?.native)
    }

    async fn token_balance(&self, _token: &str, address: &str) -> payzero_core::Result<u128> {
        Ok(self.account(address)?.token)
    }

    async fn submit_transfer(
        &self,
        _token: &str,
        to: &str,
        amount: u128,
        signer: &dyn Signer,
    ) -> payzero_core::Result<String> {
        let from = signer.address().to_lowercase();
        let to_key = to.to_lowercase();

        let mut ledger = self.load()?;
        let sender = ledger.accounts.entry(from.clone()).or_default();
        if sender.token < amount {
            return Err(PayzeroError::chain("transfer amount exceeds balance"));
        }
        sender.token -= amount;
        ledger.accounts.entry(to_key.clone()).or_default().token += amount;

        let digest = Sha256::digest(
            format!("{}|{}|{}|{}", from, to_key, amount, ledger.transfers.len()).as_bytes(),
        );
        let tx_hash = format!("0x{}", hex::encode(digest));
        ledger.transfers.push(LedgerTransfer {
            tx_hash: tx_hash.clone(),
            from,
            to: to_key,
            amount,
        });
        self.save(&ledger)?;
        Ok(tx_hash)
    }

    async fn await_confirmation(&self, tx_hash: &str) -> payzero_core::Result<()> {
        tokio::time::sleep(CONFIRMATION_DELAY).await;
        let ledger = self.load()?;
        if ledger.transfers.iter().any(|t| t.tx_hash == tx_hash) {
            Ok(())
        } else {
            Err(PayzeroError::chain("unknown transaction"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn session_round_trip() {
        let temp = tempfile::tempdir().unwrap();
        let wallet = DemoWallet::new(temp.path());

        assert!(!wallet.is_session_active().await.unwrap());
        wallet.send_login_link("alice@example.com").await.unwrap();
        assert!(wallet.is_session_active().await.unwrap());
        assert_eq!(
            wallet.identity_metadata().await.unwrap().email,
            "alice@example.com"
        );

        // The signing handle is bound to the email-derived address
        let signer = wallet.signing_handle().await.unwrap();
        assert_eq!(signer.address(), address_for_email("alice@example.com"));

        wallet.invalidate_session().await.unwrap();
        assert!(!wallet.is_session_active().await.unwrap());
    }

    #[tokio::test]
    async fn transfers_move_ledger_balances() {
        let temp = tempfile::tempdir().unwrap();
        let chain = DemoChain::new(temp.path());
        chain.ensure_funded("0xAAA").unwrap();

        let signer = StaticSigner::new("0xAAA");
        let tx_hash = chain
            .submit_transfer("0xUSDC", "0xBBB", 10_000_000, &signer)
            .await
            .unwrap();

        assert_eq!(chain.token_balance("0xUSDC", "0xAAA").await.unwrap(), SEED_TOKEN - 10_000_000);
        assert_eq!(chain.token_balance("0xUSDC", "0xBBB").await.unwrap(), 10_000_000);
        chain.await_confirmation(&tx_hash).await.unwrap();

        // Seeding again must not reset the spent balance
        chain.ensure_funded("0xAAA").unwrap();
        assert_eq!(chain.token_balance("0xUSDC", "0xAAA").await.unwrap(), SEED_TOKEN - 10_000_000);
    }

    #[tokio::test]
    async fn overdraft_is_rejected() {
        let temp = tempfile::tempdir().unwrap();
        let chain = DemoChain::new(temp.path());
        chain.ensure_funded("0xAAA").unwrap();

        let signer = StaticSigner::new("0xAAA");
        let err = chain
            .submit_transfer("0xUSDC", "0xBBB", SEED_TOKEN + 1, &signer)
            .await
            .unwrap_err();
        assert!(matches!(err, PayzeroError::Chain(_)));
    }
}
