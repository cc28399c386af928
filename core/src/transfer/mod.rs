// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Transfer construction and signing
//!
//! [prepare_transfers] assembles a bundle from a set of outputs and inputs,
//! applies the tag increment, signs each input and serializes every
//! transaction to a 2673 tryte record.
//! [sign_standard_transfer] and [build_signed_message] provide the two
//! pre-configured bundle shapes used by wallets.

use heapless::Vec;

use crate::{
    address::Address,
    consts::{MAX_TXS, NUM_HASH_TRYTES, SIGNATURE_TRYTES, TAG_TRYTES, TX_TRYTES},
    conv::Trytes,
};

mod tx;
pub use tx::TxObject;

mod builder;
pub use builder::prepare_transfers;

mod ops;
pub use ops::{build_signed_message, sign_standard_transfer, TRANSFER_SECURITY};

/// Serialized transaction record
pub type TxRecord = Trytes<TX_TRYTES>;

/// Bundle output
#[derive(Clone, PartialEq, Debug)]
pub struct TxOutput {
    /// Receiving address
    pub address: Address,
    /// Value transferred
    pub value: i64,
    /// Message (placed in the signature / message fragment)
    pub message: Trytes<SIGNATURE_TRYTES>,
    /// Transaction tag
    pub tag: Trytes<TAG_TRYTES>,
}

/// Bundle input, spending the full balance of a derived address
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct TxInput {
    /// Address balance
    pub balance: u64,
    /// Key index of the spending address
    pub key_index: u32,
}

/// Standard transfer request, sending `transfer_amount` from the address at
/// `input_address_index` to `receiving_address` with the remainder returned
/// to the next address index
#[derive(Clone, PartialEq, Debug)]
pub struct TxDetails {
    pub receiving_address: Address,
    pub input_address_index: u32,
    pub timestamp: u32,
    pub transfer_amount: u64,
    pub balance: u64,
    pub tag: Trytes<TAG_TRYTES>,
}

/// Signed bundle
#[derive(Clone, PartialEq, Debug)]
pub struct SignedBundle {
    /// Bundle hash
    pub bundle_hash: Trytes<NUM_HASH_TRYTES>,
    /// Obsolete tag increment applied to the first transaction
    pub tag_increment: u32,
    /// Serialized records, last index first
    pub records: Vec<TxRecord, MAX_TXS>,
}
