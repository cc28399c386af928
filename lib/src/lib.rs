// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Ledger IOTA API Library (and CLI)
//!
//! Host-side wrapper around [`ledger_iota_core`], deriving a wallet seed
//! from a BIP-0039 mnemonic (or raw secret) and signing standard transfers
//! and messages described by JSON requests.
//!
//! ```no_run
//! use ledger_iota::{request::TransferRequest, Wallet};
//!
//! let w = Wallet::from_mnemonic("abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about", "")?;
//!
//! let req: TransferRequest = serde_json::from_str(r#"{
//!     "receiving_address": "RECEIVER9999999999999999999999999999999999999999999999999999999999999999999999999",
//!     "input_address_index": 0,
//!     "timestamp": 1500000000,
//!     "transfer_amount": 400,
//!     "balance": 1000
//! }"#)?;
//!
//! let bundle = w.transfer(&req)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

/// Re-export `ledger-iota-core` for consumers
pub use ledger_iota_core::{self as iota_core};

mod error;
pub use error::Error;

pub mod request;

mod wallet;
pub use wallet::Wallet;
