//! In-memory collaborator implementations for tests and demos.
//!
//! These mocks simulate the wallet-auth and chain-provider collaborators
//! without any network access: a scripted session with an address derived
//! from the email digest, and an in-memory ledger that moves balances and
//! fabricates deterministic transaction hashes.

use crate::directory::DirectoryStore;
use crate::models::UsernameRecord;
use crate::wallet::{IdentityMetadata, Signer, WalletAuth};
use crate::{chain::ChainProvider, PayzeroError, Result};
use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

/// Derive a stable demo address from an email.
pub fn address_for_email(email: &str) -> String {
    let digest = Sha256::digest(email.trim().to_lowercase().as_bytes());
    format!("0x{}", hex::encode(&digest[..20]))
}

/// Signing capability bound to a fixed address.
pub struct StaticSigner {
    address: String,
}

impl StaticSigner {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
        }
    }
}

impl Signer for StaticSigner {
    fn address(&self) -> String {
        self.address.clone()
    }
}

/// Scripted wallet-auth collaborator.
#[derive(Default)]
pub struct MockWalletAuth {
    active_email: RwLock<Option<String>>,
    fail_login: RwLock<Option<String>>,
    fail_restore: AtomicBool,
}

impl MockWalletAuth {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an already-established session, as after a reload.
    pub fn with_active_session(email: &str) -> Self {
        let auth = Self::new();
        *auth.active_email.write().unwrap() = Some(email.to_string());
        auth
    }

    /// Make the next login attempt fail with the given provider message.
    pub fn fail_next_login(&self, message: &str) {
        *self.fail_login.write().unwrap() = Some(message.to_string());
    }

    /// Make session restore unreachable.
    pub fn fail_restore(&self) {
        self.fail_restore.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl WalletAuth for MockWalletAuth {
    async fn is_session_active(&self) -> Result<bool> {
        if self.fail_restore.load(Ordering::SeqCst) {
            return Err(PayzeroError::auth("wallet provider unreachable"));
        }
        Ok(self.active_email.read().unwrap().is_some())
    }

    async fn send_login_link(&self, email: &str) -> Result<()> {
        if let Some(message) = self.fail_login.write().unwrap().take() {
            return Err(PayzeroError::auth(message));
        }
        *self.active_email.write().unwrap() = Some(email.to_string());
        Ok(())
    }

    async fn identity_metadata(&self) -> Result<IdentityMetadata> {
        let email = self.active_email.read().unwrap().clone();
        email
            .map(|email| IdentityMetadata { email })
            .ok_or_else(|| PayzeroError::auth("no active session"))
    }

    async fn signing_handle(&self) -> Result<Arc<dyn Signer>> {
        let email = self.active_email.read().unwrap().clone();
        let email = email.ok_or_else(|| PayzeroError::auth("no active session"))?;
        Ok(Arc::new(StaticSigner::new(address_for_email(&email))))
    }

    async fn invalidate_session(&self) -> Result<()> {
        *self.active_email.write().unwrap() = None;
        Ok(())
    }
}

/// One transfer recorded by the mock chain.
#[derive(Clone, Debug)]
pub struct RecordedTransfer {
    pub token: String,
    pub from: String,
    pub to: String,
    pub amount: u128,
    pub tx_hash: String,
}

#[derive(Default)]
struct LedgerEntry {
    native: u128,
    token: u128,
}

/// In-memory chain collaborator with a balance ledger.
#[derive(Default)]
pub struct MockChainProvider {
    ledger: RwLock<HashMap<String, LedgerEntry>>,
    transfers: RwLock<Vec<RecordedTransfer>>,
    nonce: AtomicU64,
    fail_reads: AtomicBool,
    fail_submit: RwLock<Option<String>>,
    fail_confirmation: AtomicBool,
}

impl MockChainProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an address's native and token balances, in base units.
    pub fn seed(&self, address: &str, native: u128, token: u128) {
        let mut ledger = self.ledger.write().unwrap();
        ledger.insert(address.to_lowercase(), LedgerEntry { native, token });
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make the next submission fail with the given message.
    pub fn fail_next_submit(&self, message: &str) {
        *self.fail_submit.write().unwrap() = Some(message.to_string());
    }

    /// Make confirmations report the transaction as failed.
    pub fn fail_confirmations(&self, fail: bool) {
        self.fail_confirmation.store(fail, Ordering::SeqCst);
    }

    /// The most recent transfer that reached the chain.
    pub fn last_transfer(&self) -> Option<RecordedTransfer> {
        self.transfers.read().unwrap().last().cloned()
    }

    pub fn transfer_count(&self) -> usize {
        self.transfers.read().unwrap().len()
    }
}

#[async_trait]
impl ChainProvider for MockChainProvider {
    async fn native_balance(&self, address: &str) -> Result<u128> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(PayzeroError::chain("rpc unavailable"));
        }
        let ledger = self.ledger.read().unwrap();
        Ok(ledger
            .get(&address.to_lowercase())
            .map(|e| e.native)
            .unwrap_or(0))
    }

    async fn token_balance(&self, _token: &str, address: &str) -> Result<u128> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(PayzeroError::chain("rpc unavailable"));
        }
        let ledger = self.ledger.read().unwrap();
        Ok(ledger
            .get(&address.to_lowercase())
            .map(|e| e.token)
            .unwrap_or(0))
    }

    async fn submit_transfer(
        &self,
        token: &str,
        to: &str,
        amount: u128,
        signer: &dyn Signer,
    ) -> Result<String> {
        if let Some(message) = self.fail_submit.write().unwrap().take() {
            return Err(PayzeroError::chain(message));
        }
        let from = signer.address().to_lowercase();
        let nonce = self.nonce.fetch_add(1, Ordering::SeqCst);

        {
            let mut ledger = self.ledger.write().unwrap();
            let sender = ledger.entry(from.clone()).or_default();
            if sender.token < amount {
                return Err(PayzeroError::chain("transfer amount exceeds balance"));
            }
            sender.token -= amount;
            ledger.entry(to.to_lowercase()).or_default().token += amount;
        }

        let digest = Sha256::digest(format!("{}|{}|{}|{}", from, to, amount, nonce).as_bytes());
        let tx_hash = format!("0x{}", hex::encode(digest));

        self.transfers.write().unwrap().push(RecordedTransfer {
            token: token.to_string(),
            from,
            to: to.to_string(),
            amount,
            tx_hash: tx_hash.clone(),
        });
        Ok(tx_hash)
    }

    async fn await_confirmation(&self, tx_hash: &str) -> Result<()> {
        if self.fail_confirmation.load(Ordering::SeqCst) {
            return Err(PayzeroError::chain("transaction failed on chain"));
        }
        let known = self
            .transfers
            .read()
            .unwrap()
            .iter()
            .any(|t| t.tx_hash == tx_hash);
        if !known {
            return Err(PayzeroError::chain("unknown transaction"));
        }
        Ok(())
    }
}

/// In-memory directory store.
#[derive(Default)]
pub struct MemoryDirectoryStore {
    records: RwLock<Vec<UsernameRecord>>,
}

impl MemoryDirectoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DirectoryStore for MemoryDirectoryStore {
    async fn load(&self) -> Result<Vec<UsernameRecord>> {
        Ok(self.records.read().unwrap().clone())
    }

    async fn save(&self, records: &[UsernameRecord]) -> Result<()> {
        *self.records.write().unwrap() = records.to_vec();
        Ok(())
    }
}
