// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Command line utility for IOTA address derivation and bundle signing

use clap::Parser;
use log::{debug, info, LevelFilter};

use ledger_iota::{
    iota_core::{consts::SECRET_BYTES, Security},
    request::{BundleResponse, MessageRequest, TransferRequest},
    Wallet,
};

mod helpers;
use helpers::*;

/// IOTA signing command line utility
#[derive(Clone, PartialEq, Debug, Parser)]
struct Options {
    /// BIP-0039 mnemonic for seed derivation
    #[clap(long, env = "IOTA_MNEMONIC", conflicts_with = "secret")]
    mnemonic: Option<String>,

    /// BIP-0039 passphrase
    #[clap(long, env = "IOTA_PASSPHRASE", default_value = "")]
    passphrase: String,

    /// Hex-encoded 64-byte secret (in place of a mnemonic)
    #[clap(long)]
    secret: Option<HexData<SECRET_BYTES>>,

    /// Subcommand to execute
    #[clap(subcommand)]
    cmd: Actions,

    /// Enable verbose logging
    #[clap(long, default_value = "info")]
    log_level: LevelFilter,
}

#[derive(Clone, PartialEq, Debug, Parser)]
#[non_exhaustive]
enum Actions {
    /// Derive addresses
    Address {
        /// First address index
        #[clap(long, default_value = "0")]
        index: u32,

        /// Number of addresses to derive
        #[clap(long, default_value = "1")]
        count: u32,

        /// Security level (1-3)
        #[clap(long, default_value = "2", value_parser = parse_security)]
        security: Security,

        /// Output file (`.json`), stdout if omitted
        #[clap(long)]
        output: Option<String>,
    },

    /// Sign a standard transfer from a JSON request
    Transfer {
        /// Transfer request file (`.json`)
        #[clap(long)]
        input: String,

        /// Output file (`.json`), stdout if omitted
        #[clap(long)]
        output: Option<String>,
    },

    /// Sign a zero-value message
    Message {
        /// Signing address index
        #[clap(long, default_value = "0")]
        index: u32,

        /// Transaction tag
        #[clap(long, default_value = "")]
        tag: String,

        /// Bundle timestamp, current time if omitted
        #[clap(long)]
        timestamp: Option<u32>,

        /// ASCII message
        message: String,

        /// Output file (`.json`), stdout if omitted
        #[clap(long)]
        output: Option<String>,
    },
}

fn parse_security(s: &str) -> Result<Security, String> {
    let v = s.parse::<u8>().map_err(|e| e.to_string())?;
    Security::new(v).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let args = Options::parse();

    // Setup logging
    simplelog::SimpleLogger::init(args.log_level, simplelog::Config::default())?;

    // Load wallet
    let w = match (&args.mnemonic, &args.secret) {
        (Some(m), _) => Wallet::from_mnemonic(m, &args.passphrase)?,
        (None, Some(s)) => Wallet::from_secret(s.as_ref()),
        (None, None) => return Err(anyhow::anyhow!("mnemonic or secret required")),
    };

    // Execute command
    execute(w, args.cmd).await?;

    Ok(())
}

/// Execute a command with the provided wallet
async fn execute(w: Wallet, cmd: Actions) -> anyhow::Result<()> {
    debug!("Executing command: {:?}", cmd);

    match cmd {
        Actions::Address {
            index,
            count,
            security,
            output,
        } => {
            info!(
                "deriving {} addresses from index {} (security: {})",
                count, index, security
            );

            let a = tokio::task::spawn_blocking(move || w.addresses(index, count, security))
                .await?;

            write_output(output.as_deref(), &a).await?;
        }
        Actions::Transfer { input, output } => {
            // Read in transfer request
            let req: TransferRequest = read_input(&input).await?;

            info!(
                "signing transfer of {} to {}",
                req.transfer_amount, req.receiving_address
            );

            // Signing is compute bound, run off the executor
            let b = tokio::task::spawn_blocking(move || w.transfer(&req)).await??;

            info!("bundle hash: {}", b.bundle_hash);

            write_output(output.as_deref(), &BundleResponse::from(&b)).await?;
        }
        Actions::Message {
            index,
            tag,
            timestamp,
            message,
            output,
        } => {
            let req = MessageRequest {
                index,
                timestamp: match timestamp {
                    Some(t) => t,
                    None => now()?,
                },
                tag,
                message,
            };

            info!("signing message from index {}", req.index);

            let b = tokio::task::spawn_blocking(move || w.message(&req)).await??;

            info!("bundle hash: {}", b.bundle_hash);

            write_output(output.as_deref(), &BundleResponse::from(&b)).await?;
        }
    }

    Ok(())
}
