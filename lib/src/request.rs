// Copyright (c) 2022-2023 The MobileCoin Foundation

//! JSON request and response objects

use serde::{Deserialize, Serialize};

use ledger_iota_core::{
    consts::TAG_TRYTES, conv::Trytes, Address, SignedBundle, TxDetails,
};

use crate::Error;

/// Standard transfer request
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct TransferRequest {
    /// Receiving address, 81 trytes or 90 with checksum
    pub receiving_address: String,
    /// Index of the (fully spent) input address
    pub input_address_index: u32,
    /// Bundle timestamp (seconds)
    pub timestamp: u32,
    /// Value to transfer
    pub transfer_amount: u64,
    /// Input address balance
    pub balance: u64,
    /// Transaction tag (up to 27 trytes)
    #[serde(default)]
    pub tag: String,
}

impl TransferRequest {
    /// Parse request into core [`TxDetails`]
    pub fn details(&self) -> Result<TxDetails, Error> {
        let receiving_address = Address::from_trytes(self.receiving_address.as_bytes())
            .map_err(|e| Error::InvalidField("receiving_address", e))?;

        Ok(TxDetails {
            receiving_address,
            input_address_index: self.input_address_index,
            timestamp: self.timestamp,
            transfer_amount: self.transfer_amount,
            balance: self.balance,
            tag: parse_tag(&self.tag)?,
        })
    }
}

/// Signed message request
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct MessageRequest {
    /// Index of the signing address
    pub index: u32,
    /// Bundle timestamp (seconds)
    pub timestamp: u32,
    /// Transaction tag (up to 27 trytes)
    #[serde(default)]
    pub tag: String,
    /// ASCII message
    pub message: String,
}

impl MessageRequest {
    pub fn tag(&self) -> Result<Trytes<TAG_TRYTES>, Error> {
        parse_tag(&self.tag)
    }
}

/// Derived address
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct AddressInfo {
    pub index: u32,
    pub security: u8,
    /// Address with checksum
    pub address: String,
}

/// Signed bundle response
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct BundleResponse {
    pub bundle_hash: String,
    pub tag_increment: u32,
    /// Transaction records, last index first
    pub records: Vec<String>,
}

impl From<&SignedBundle> for BundleResponse {
    fn from(b: &SignedBundle) -> Self {
        Self {
            bundle_hash: b.bundle_hash.to_string(),
            tag_increment: b.tag_increment,
            records: b.records.iter().map(|r| r.to_string()).collect(),
        }
    }
}

fn parse_tag(tag: &str) -> Result<Trytes<TAG_TRYTES>, Error> {
    Trytes::from_str_padded(tag).map_err(|e| Error::InvalidField("tag", e))
}
