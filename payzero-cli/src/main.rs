//! PayZero CLI
//!
//! Send and receive stablecoin payments by @username on Base Sepolia.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod demo;
mod ui;

#[derive(Parser)]
#[command(name = "payzero")]
#[command(about = "PayZero - send money like a text message", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Custom storage directory (can also be set via PAYZERO_DIR env var)
    #[arg(long, global = true)]
    storage_dir: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in with an email address
    Login {
        /// Email to log in with (prompted if omitted)
        email: Option<String>,
    },

    /// Show the current account
    Whoami,

    /// Claim a username
    Username {
        /// Username to claim (prompted if omitted)
        name: Option<String>,
    },

    /// Show balances and the fiat total
    Balance {
        /// Display currency (USD, NGN, MAD, EUR, GBP)
        #[arg(short, long)]
        currency: Option<String>,

        /// Query the real network instead of the demo ledger
        #[arg(long)]
        network: bool,
    },

    /// Send USDC to a @username or 0x address
    Send {
        /// Recipient: @username or 0x address (prompted if omitted)
        to: Option<String>,

        /// Amount in USDC (prompted if omitted)
        amount: Option<String>,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Show a QR code for receiving payments
    Receive {
        /// Requested amount in USDC
        #[arg(short, long)]
        amount: Option<String>,
    },

    /// End the current session
    Logout,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("payzero_cli=debug,payzero_core=debug")
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter("payzero_cli=info,payzero_core=warn")
            .init();
    }

    // Setup storage directory
    let storage_dir = if let Some(dir) = cli.storage_dir {
        std::path::PathBuf::from(dir)
    } else if let Ok(dir) = std::env::var("PAYZERO_DIR") {
        std::path::PathBuf::from(dir)
    } else {
        dirs::data_local_dir()
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join("payzero")
    };

    match cli.command {
        Commands::Login { email } => {
            commands::login::run(&storage_dir, email).await?;
        }
        Commands::Whoami => {
            commands::whoami::run(&storage_dir).await?;
        }
        Commands::Username { name } => {
            commands::username::run(&storage_dir, name).await?;
        }
        Commands::Balance { currency, network } => {
            commands::balance::run(&storage_dir, currency, network).await?;
        }
        Commands::Send { to, amount, yes } => {
            commands::send::run(&storage_dir, to, amount, yes).await?;
        }
        Commands::Receive { amount } => {
            commands::receive::run(&storage_dir, amount).await?;
        }
        Commands::Logout => {
            commands::logout::run(&storage_dir).await?;
        }
    }

    Ok(())
}
