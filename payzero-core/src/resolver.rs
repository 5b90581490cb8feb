//! Recipient resolution.
//!
//! Turns a user-entered recipient string into a concrete destination address:
//! `@name` goes through the username directory, `0x...` is taken verbatim
//! (no checksum validation beyond the prefix), anything else is rejected.

use crate::directory::UsernameDirectory;
use crate::{PayzeroError, Result};

/// Resolve a recipient input to a destination address.
///
/// Pure with respect to a directory snapshot: the same input against the same
/// directory always yields the same result, and never a partial one.
pub async fn resolve_recipient(input: &str, directory: &UsernameDirectory) -> Result<String> {
    let input = input.trim();
    if let Some(name) = input.strip_prefix('@') {
        return directory
            .lookup(&name.to_lowercase())
            .await?
            .ok_or_else(|| PayzeroError::NotFound("Username not found".to_string()));
    }
    if input.starts_with("0x") {
        return Ok(input.to_string());
    }
    Err(PayzeroError::validation("Use @username or 0x..."))
}
