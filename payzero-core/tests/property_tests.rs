//! Property tests for the username directory and recipient resolver.

use payzero_core::testing::MemoryDirectoryStore;
use payzero_core::{resolve_recipient, PayzeroError, UsernameDirectory};
use proptest::prelude::*;
use std::sync::Arc;

fn directory() -> UsernameDirectory {
    UsernameDirectory::new(Arc::new(MemoryDirectoryStore::new()))
}

/// Mirrors the allowed username pattern: `^[a-z0-9_]{3,20}$`.
fn matches_pattern(name: &str) -> bool {
    (3..=20).contains(&name.len())
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

proptest! {
    #[test]
    fn valid_usernames_always_register(name in "[a-z0-9_]{3,20}") {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let dir = directory();
            dir.register(&name, "0xAAA").await.unwrap();
            prop_assert_eq!(dir.lookup(&name).await.unwrap(), Some("0xAAA".to_string()));
            Ok(())
        })?;
    }

    #[test]
    fn invalid_usernames_never_register(name in "\\PC{0,30}") {
        prop_assume!(!matches_pattern(&name.trim().to_lowercase()));
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let dir = directory();
            let err = dir.register(&name, "0xAAA").await.unwrap_err();
            prop_assert!(matches!(err, PayzeroError::Validation(_)));
            // Directory unchanged
            prop_assert_eq!(dir.reverse_lookup("0xAAA").await.unwrap(), None);
            Ok(())
        })?;
    }

    #[test]
    fn second_claim_always_conflicts(name in "[a-z0-9_]{3,20}") {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let dir = directory();
            dir.register(&name, "0x111").await.unwrap();
            let err = dir.register(&name, "0x222").await.unwrap_err();
            prop_assert!(matches!(err, PayzeroError::Conflict(_)));
            // First claim still holds
            prop_assert_eq!(dir.lookup(&name).await.unwrap(), Some("0x111".to_string()));
            Ok(())
        })?;
    }

    #[test]
    fn resolver_never_returns_partial_results(input in "\\PC{0,40}") {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let dir = directory();
            dir.register("bob", "0xB0B").await.unwrap();
            match resolve_recipient(&input, &dir).await {
                // Any success is a concrete address: bob's, or the input itself
                Ok(address) => prop_assert!(
                    address == "0xB0B" || address == input.trim()
                ),
                Err(err) => prop_assert!(matches!(
                    err,
                    PayzeroError::Validation(_) | PayzeroError::NotFound(_)
                )),
            }
            Ok(())
        })?;
    }
}
