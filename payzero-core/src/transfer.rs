//! Transfer orchestration.
//!
//! Validates and submits a stablecoin transfer and tracks its lifecycle:
//! `Idle -> Validating -> Resolving -> Submitting -> AwaitingConfirmation ->
//! {Confirmed, Failed}`. Submission is optimistic: the transaction hash is
//! captured and returned as soon as the transfer is broadcast, and
//! confirmation is settled afterwards. There is no retry; every failure
//! requires explicit re-initiation.

use crate::chain::ChainProvider;
use crate::config::ChainConfig;
use crate::directory::UsernameDirectory;
use crate::models::{TransferRequest, TransferResult, TransferStatus};
use crate::resolver::resolve_recipient;
use crate::wallet::Signer;
use crate::{units, PayzeroError, Result};
use std::sync::Arc;

/// Lifecycle phase of the current transfer attempt.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TransferPhase {
    #[default]
    Idle,
    Validating,
    Resolving,
    Submitting,
    AwaitingConfirmation,
    Confirmed,
    Failed,
}

pub struct TransferOrchestrator {
    provider: Arc<dyn ChainProvider>,
    config: ChainConfig,
    phase: TransferPhase,
}

impl TransferOrchestrator {
    pub fn new(provider: Arc<dyn ChainProvider>, config: ChainConfig) -> Self {
        Self {
            provider,
            config,
            phase: TransferPhase::Idle,
        }
    }

    pub fn phase(&self) -> TransferPhase {
        self.phase
    }

    /// Entry guard for the Send view's Continue action: both fields present.
    /// Presence only; semantic validation happens in `submit`.
    pub fn inputs_present(request: &TransferRequest) -> bool {
        !request.recipient_input.trim().is_empty() && !request.amount.trim().is_empty()
    }

    /// Validate, resolve, and broadcast a transfer.
    ///
    /// Returns the optimistic result with the transaction hash as soon as the
    /// broadcast succeeds, leaving the orchestrator awaiting confirmation.
    /// Any failure lands in `Failed` with the originating error propagated
    /// verbatim.
    pub async fn submit(
        &mut self,
        request: &TransferRequest,
        directory: &UsernameDirectory,
        signer: &dyn Signer,
    ) -> Result<TransferResult> {
        match self.run_submit(request, directory, signer).await {
            Ok(result) => {
                self.phase = TransferPhase::AwaitingConfirmation;
                Ok(result)
            }
            Err(err) => {
                self.phase = TransferPhase::Failed;
                Err(err)
            }
        }
    }

    async fn run_submit(
        &mut self,
        request: &TransferRequest,
        directory: &UsernameDirectory,
        signer: &dyn Signer,
    ) -> Result<TransferResult> {
        self.phase = TransferPhase::Validating;
        if request.recipient_input.trim().is_empty() {
            return Err(PayzeroError::validation("Enter recipient"));
        }
        let amount = units::parse_units(&request.amount, self.config.token_decimals)?;

        self.phase = TransferPhase::Resolving;
        let to = resolve_recipient(&request.recipient_input, directory).await?;

        self.phase = TransferPhase::Submitting;
        let tx_hash = self
            .provider
            .submit_transfer(&self.config.token_address, &to, amount, signer)
            .await?;
        tracing::debug!(tx_hash = %tx_hash, to = %to, amount, "transfer broadcast");

        Ok(TransferResult {
            tx_hash,
            status: TransferStatus::Submitted,
        })
    }

    /// Suspend until the broadcast transfer is mined.
    ///
    /// Returns the terminal status rather than an error for a late on-chain
    /// failure, so callers can observe a post-broadcast revert distinctly
    /// from a submission failure.
    pub async fn settle(&mut self, result: &TransferResult) -> TransferStatus {
        match self.provider.await_confirmation(&result.tx_hash).await {
            Ok(()) => {
                self.phase = TransferPhase::Confirmed;
                TransferStatus::Confirmed
            }
            Err(err) => {
                tracing::warn!(tx_hash = %result.tx_hash, error = %err, "transfer failed after broadcast");
                self.phase = TransferPhase::Failed;
                TransferStatus::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MemoryDirectoryStore, MockChainProvider, StaticSigner};

    fn setup() -> (TransferOrchestrator, UsernameDirectory, Arc<MockChainProvider>) {
        let chain = Arc::new(MockChainProvider::new());
        let orchestrator =
            TransferOrchestrator::new(chain.clone(), ChainConfig::base_sepolia());
        let directory = UsernameDirectory::new(Arc::new(MemoryDirectoryStore::new()));
        (orchestrator, directory, chain)
    }

    #[test]
    fn entry_guard_requires_both_fields() {
        let present = |r: &str, a: &str| {
            TransferOrchestrator::inputs_present(&TransferRequest {
                recipient_input: r.to_string(),
                amount: a.to_string(),
            })
        };
        assert!(present("@bob", "10"));
        assert!(!present("", "10"));
        assert!(!present("@bob", ""));
        assert!(!present("  ", " "));
    }

    #[tokio::test]
    async fn submit_resolves_and_broadcasts() {
        let (mut orchestrator, directory, chain) = setup();
        directory.register("bob", "0xB0B").await.unwrap();
        chain.seed("0xAAA", 0, 25_000_000);
        let signer = StaticSigner::new("0xAAA");

        let request = TransferRequest {
            recipient_input: "@bob".to_string(),
            amount: "10".to_string(),
        };
        let result = orchestrator
            .submit(&request, &directory, &signer)
            .await
            .unwrap();

        assert!(!result.tx_hash.is_empty());
        assert_eq!(result.status, TransferStatus::Submitted);
        assert_eq!(orchestrator.phase(), TransferPhase::AwaitingConfirmation);
        // Base units reached the provider: 10 USDC at 6 decimals
        assert_eq!(chain.last_transfer().unwrap().amount, 10_000_000);
    }

    #[tokio::test]
    async fn unknown_recipient_fails_at_resolving() {
        let (mut orchestrator, directory, _chain) = setup();
        let signer = StaticSigner::new("0xAAA");
        let request = TransferRequest {
            recipient_input: "@ghost".to_string(),
            amount: "10".to_string(),
        };
        let err = orchestrator
            .submit(&request, &directory, &signer)
            .await
            .unwrap_err();
        assert_eq!(err.message(), "Username not found");
        assert_eq!(orchestrator.phase(), TransferPhase::Failed);
    }

    #[tokio::test]
    async fn bad_amount_fails_at_validating() {
        let (mut orchestrator, directory, _chain) = setup();
        let signer = StaticSigner::new("0xAAA");
        let request = TransferRequest {
            recipient_input: "0xB0B".to_string(),
            amount: "ten".to_string(),
        };
        let err = orchestrator
            .submit(&request, &directory, &signer)
            .await
            .unwrap_err();
        assert!(matches!(err, PayzeroError::Validation(_)));
        assert_eq!(orchestrator.phase(), TransferPhase::Failed);
    }

    #[tokio::test]
    async fn settle_reaches_confirmed() {
        let (mut orchestrator, directory, chain) = setup();
        chain.seed("0xAAA", 0, 25_000_000);
        let signer = StaticSigner::new("0xAAA");
        let request = TransferRequest {
            recipient_input: "0xB0B".to_string(),
            amount: "1".to_string(),
        };
        let result = orchestrator
            .submit(&request, &directory, &signer)
            .await
            .unwrap();

        let status = orchestrator.settle(&result).await;
        assert_eq!(status, TransferStatus::Confirmed);
        assert_eq!(orchestrator.phase(), TransferPhase::Confirmed);
    }
}
