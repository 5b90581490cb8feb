//! Local username directory.
//!
//! Maps claimed usernames to wallet addresses. The backing store holds a
//! single whole-directory snapshot with overwrite semantics, so a register is
//! one atomic save and no partial-write state is ever observable. Concurrent
//! registers from independent processes race last-writer-wins; there is no
//! cross-process locking.

use crate::models::UsernameRecord;
use crate::{PayzeroError, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Persistence boundary for the directory: one logical key, whole-value
/// overwrite.
#[async_trait]
pub trait DirectoryStore: Send + Sync {
    /// Load the full directory snapshot. A missing store is an empty directory.
    async fn load(&self) -> Result<Vec<UsernameRecord>>;
    /// Overwrite the full directory snapshot.
    async fn save(&self, records: &[UsernameRecord]) -> Result<()>;
}

/// JSON file store for the directory snapshot.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl DirectoryStore for JsonFileStore {
    async fn load(&self) -> Result<Vec<UsernameRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let json = tokio::fs::read_to_string(&self.path).await?;
        Ok(serde_json::from_str(&json)?)
    }

    async fn save(&self, records: &[UsernameRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string_pretty(records)?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }
}

/// Check a normalized username against the allowed pattern: 3-20 lowercase
/// letters, digits, or underscores.
fn validate_username(username: &str) -> Result<()> {
    let valid_chars = username
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
    if username.len() < 3 || username.len() > 20 || !valid_chars {
        return Err(PayzeroError::validation(
            "3-20 chars (letters/numbers/_)",
        ));
    }
    Ok(())
}

/// Username-to-address directory with uniqueness enforcement.
pub struct UsernameDirectory {
    store: Arc<dyn DirectoryStore>,
}

impl UsernameDirectory {
    pub fn new(store: Arc<dyn DirectoryStore>) -> Self {
        Self { store }
    }

    /// Claim a username for an address.
    ///
    /// The username is normalized to lowercase before validation. Fails with
    /// a validation error on a bad pattern and a conflict error if the name
    /// is already taken; the directory is unchanged on any failure.
    pub async fn register(&self, username: &str, address: &str) -> Result<String> {
        let username = username.trim().to_lowercase();
        validate_username(&username)?;

        let mut records = self.store.load().await?;
        if records.iter().any(|r| r.username == username) {
            return Err(PayzeroError::Conflict("Username taken".to_string()));
        }

        records.push(UsernameRecord {
            username: username.clone(),
            address: address.to_string(),
        });
        self.store.save(&records).await?;
        tracing::debug!(username = %username, "registered username");
        Ok(username)
    }

    /// Case-insensitive exact-match lookup of a username's address.
    pub async fn lookup(&self, username: &str) -> Result<Option<String>> {
        let username = username.to_lowercase();
        let records = self.store.load().await?;
        Ok(records
            .iter()
            .find(|r| r.username == username)
            .map(|r| r.address.clone()))
    }

    /// First username registered for an address, comparing hex addresses
    /// case-insensitively. Multiple usernames may map to one address;
    /// insertion order wins.
    pub async fn reverse_lookup(&self, address: &str) -> Result<Option<String>> {
        let records = self.store.load().await?;
        Ok(records
            .iter()
            .find(|r| r.address.eq_ignore_ascii_case(address))
            .map(|r| r.username.clone()))
    }

    /// Whether any username is registered for the address.
    pub async fn contains_address(&self, address: &str) -> Result<bool> {
        Ok(self.reverse_lookup(address).await?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryDirectoryStore;

    fn directory() -> UsernameDirectory {
        UsernameDirectory::new(Arc::new(MemoryDirectoryStore::new()))
    }

    #[tokio::test]
    async fn register_and_lookup() {
        let dir = directory();
        dir.register("mama_janet", "0xAAA").await.unwrap();
        assert_eq!(dir.lookup("mama_janet").await.unwrap().unwrap(), "0xAAA");
        // Lookup is case-insensitive
        assert_eq!(dir.lookup("MAMA_Janet").await.unwrap().unwrap(), "0xAAA");
    }

    #[tokio::test]
    async fn register_normalizes_case() {
        let dir = directory();
        let claimed = dir.register("Alice_99", "0xAAA").await.unwrap();
        assert_eq!(claimed, "alice_99");
    }

    #[tokio::test]
    async fn invalid_patterns_rejected() {
        let dir = directory();
        for bad in ["ab", "a".repeat(21).as_str(), "has space", "dot.name", ""] {
            let err = dir.register(bad, "0xAAA").await.unwrap_err();
            assert!(matches!(err, PayzeroError::Validation(_)), "{:?}", bad);
        }
        // Nothing was written
        assert!(dir.lookup("ab").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_register_conflicts() {
        let dir = directory();
        dir.register("bob", "0xAAA").await.unwrap();
        let err = dir.register("BOB", "0xBBB").await.unwrap_err();
        assert!(matches!(err, PayzeroError::Conflict(_)));
        // First claim still holds
        assert_eq!(dir.lookup("bob").await.unwrap().unwrap(), "0xAAA");
    }

    #[tokio::test]
    async fn reverse_lookup_is_insertion_ordered() {
        let dir = directory();
        dir.register("first", "0xAbC1").await.unwrap();
        dir.register("second", "0xABC1").await.unwrap();
        // Case-insensitive address compare, earliest registration wins
        assert_eq!(dir.reverse_lookup("0xabc1").await.unwrap().unwrap(), "first");
        assert!(dir.contains_address("0xABC1").await.unwrap());
        assert!(!dir.contains_address("0xDDD").await.unwrap());
    }

    #[tokio::test]
    async fn file_store_round_trip() {
        let temp = tempfile::tempdir().unwrap();
        let store = Arc::new(JsonFileStore::new(temp.path().join("users.json")));
        let dir = UsernameDirectory::new(store.clone());

        dir.register("carol", "0xCCC").await.unwrap();

        // A fresh directory over the same file sees the record
        let dir2 = UsernameDirectory::new(store);
        assert_eq!(dir2.lookup("carol").await.unwrap().unwrap(), "0xCCC");
    }
}
