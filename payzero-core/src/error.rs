//! Error types for PayZero operations.
//!
//! Every failure an action can produce maps to exactly one variant, and every
//! variant renders as a single human-readable message suitable for attaching
//! to the current view. No error is fatal to the process.

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, PayzeroError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PayzeroError {
    /// Malformed user input (empty email, bad username pattern, malformed
    /// recipient, unparseable amount).
    #[error("{0}")]
    Validation(String),

    /// Username already taken.
    #[error("{0}")]
    Conflict(String),

    /// Unknown username.
    #[error("{0}")]
    NotFound(String),

    /// Wallet-auth collaborator failure.
    #[error("{0}")]
    Auth(String),

    /// Balance fetch or transfer failure from the chain provider.
    #[error("{0}")]
    Chain(String),

    /// Directory store failure.
    #[error("storage error: {0}")]
    Storage(String),

    /// Serialization/deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl PayzeroError {
    /// The message string surfaced to the user on the current view.
    pub fn message(&self) -> String {
        self.to_string()
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Auth(msg.into())
    }

    pub fn chain(msg: impl Into<String>) -> Self {
        Self::Chain(msg.into())
    }
}

impl From<serde_json::Error> for PayzeroError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

impl From<std::io::Error> for PayzeroError {
    fn from(e: std::io::Error) -> Self {
        Self::Storage(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_facing_messages_are_verbatim() {
        let err = PayzeroError::NotFound("Username not found".into());
        assert_eq!(err.message(), "Username not found");

        let err = PayzeroError::Validation("Use @username or 0x...".into());
        assert_eq!(err.message(), "Use @username or 0x...");
    }

    #[test]
    fn storage_errors_are_prefixed() {
        let err = PayzeroError::Storage("disk full".into());
        assert_eq!(err.message(), "storage error: disk full");
    }
}
