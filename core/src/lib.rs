// Copyright (c) 2022-2023 The MobileCoin Foundation

//! IOTA hardware wallet signing core
//!
//! This provides seed expansion, one-time key / address derivation and
//! bundle signing for execution on hardware wallets, with no heap allocation
//! and optional `std` support.
//!
//! ## Operations
//!
//! ### Seed expansion
//!
//! A 64 byte secret (typically a BIP-0039 seed) is expanded to a wallet
//! [`Seed`][seed::Seed] with [`derive_seed`][seed::derive_seed].
//!
//! ### Address derivation
//!
//! Addresses are derived from a seed, key index and
//! [`Security`][address::Security] level with
//! [`derive_address`][address::derive_address], and may be rendered with a
//! checksum using [`Address::with_checksum`][address::Address::with_checksum].
//!
//! ### Signing transfers
//!
//! 1. Build a [`TxDetails`][transfer::TxDetails] describing the receiving
//!    address, amount, input balance and input key index
//! 2. Call [`sign_standard_transfer`][transfer::sign_standard_transfer] to
//!    fetch a [`SignedBundle`][transfer::SignedBundle] containing the bundle hash
//!    and serialized transaction records (last index first)
//!
//! Zero-value message bundles are built with
//! [`build_signed_message`][transfer::build_signed_message], arbitrary
//! bundles with [`prepare_transfers`][transfer::prepare_transfers].
//!
//! Note that one-time keys must never sign more than one bundle.
//!

#![cfg_attr(not(feature = "std"), no_std)]

pub mod consts;

mod error;
pub use error::Error;

pub mod conv;

pub mod kerl;

pub mod seed;

pub mod address;

pub mod bundle;

pub mod signing;

pub mod transfer;

pub use address::{derive_address, Address, Security};
pub use seed::{derive_seed, Seed};
pub use transfer::{
    build_signed_message, prepare_transfers, sign_standard_transfer, SignedBundle, TxDetails,
    TxInput, TxObject, TxOutput, TxRecord,
};
