//! PayZero core library.
//!
//! Application state machine and local transaction orchestration for a
//! peer-to-peer payment client: email login through an external wallet
//! provider, a locally persisted username directory, recipient resolution,
//! stablecoin balance display, and the transfer submission/confirmation
//! lifecycle. Rendering and the collaborator implementations live outside
//! this crate, behind the traits in [`wallet`], [`chain`], and [`directory`].

pub mod app;
pub mod balance;
pub mod chain;
pub mod config;
pub mod currency;
pub mod directory;
pub mod error;
pub mod models;
pub mod resolver;
pub mod state;
pub mod testing;
pub mod transfer;
pub mod units;
pub mod wallet;

pub use app::App;
pub use balance::BalanceService;
pub use chain::ChainProvider;
pub use config::ChainConfig;
pub use currency::Fiat;
pub use directory::{DirectoryStore, JsonFileStore, UsernameDirectory};
pub use error::{PayzeroError, Result};
pub use models::{
    Balance, ReceivePayload, Session, TransferRequest, TransferResult, TransferStatus,
    UsernameRecord,
};
pub use resolver::resolve_recipient;
pub use state::{reduce, AppEvent, AppState, AppView};
pub use transfer::{TransferOrchestrator, TransferPhase};
pub use wallet::{IdentityMetadata, Signer, WalletAuth};
