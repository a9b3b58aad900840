//! CLI definitions for the Station E2E driver.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Station E2E CLI.
#[derive(Parser)]
#[command(name = "station-e2e")]
#[command(about = "Drive the Station wallet extension through its UI")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/station.toml", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Recover the primary wallet on a fresh extension
    Setup,

    /// Create a new wallet and answer the mnemonic quiz
    CreateWallet {
        /// Wallet name
        #[arg(long)]
        name: String,
    },

    /// Recover a second wallet from SEED_PHRASE_TWO
    RecoverWallet,

    /// Import a wallet from PRIVATE_KEY
    ImportPrivateKey {
        /// Submit a malformed key and expect the form to reject it
        #[arg(long, conflicts_with = "wrong_password")]
        invalid_key: bool,

        /// Submit a wrong password and expect an error
        #[arg(long)]
        wrong_password: bool,
    },

    /// Check the add-wallet menu lists every option
    VerifyManageWallets,

    /// Run an evaluation scenario against the home page
    Evaluate {
        #[arg(value_enum)]
        target: EvaluateTarget,
    },

    /// Create a multisig wallet
    CreateMultisig {
        /// Signer address (repeat for each signer)
        #[arg(long = "address", required = true)]
        addresses: Vec<String>,

        /// Signatures required
        #[arg(long)]
        threshold: usize,

        /// Wallet name
        #[arg(long, default_value = "Test multisig 1")]
        name: String,
    },

    /// Validate the configuration file and exit
    CheckConfig,
}

#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum EvaluateTarget {
    MainPage,
    Settings,
    ManageWallet,
    ManageAssets,
    Send,
}
