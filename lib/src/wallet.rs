// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Host-side wallet, wrapping a [`Seed`] for address derivation and signing

use bip39::{Language, Mnemonic};
use log::debug;
use zeroize::Zeroize;

use ledger_iota_core::{
    build_signed_message, consts::SECRET_BYTES, derive_address, derive_seed,
    sign_standard_transfer, Address, Security, Seed, SignedBundle,
};

use crate::{
    request::{AddressInfo, MessageRequest, TransferRequest},
    Error,
};

/// Wallet, holding an expanded seed
///
/// The seed is zeroized when the wallet is dropped.
pub struct Wallet {
    seed: Seed,
}

impl Wallet {
    /// Create a wallet from a BIP-0039 mnemonic and (optional, may be empty)
    /// passphrase
    pub fn from_mnemonic(phrase: &str, passphrase: &str) -> Result<Self, Error> {
        let m = Mnemonic::from_phrase(phrase, Language::English)
            .map_err(|e| Error::Mnemonic(e.to_string()))?;

        let s = bip39::Seed::new(&m, passphrase);

        let mut secret = [0u8; SECRET_BYTES];
        secret.copy_from_slice(s.as_bytes());

        let w = Self::from_secret(&secret);
        secret.zeroize();

        Ok(w)
    }

    /// Create a wallet from a hex encoded 64-byte secret
    pub fn from_hex(secret: &str) -> Result<Self, Error> {
        let mut b = [0u8; SECRET_BYTES];
        hex::decode_to_slice(secret, &mut b)?;

        let w = Self::from_secret(&b);
        b.zeroize();

        Ok(w)
    }

    /// Create a wallet from a 64-byte secret
    pub fn from_secret(secret: &[u8; SECRET_BYTES]) -> Self {
        Self {
            seed: derive_seed(secret),
        }
    }

    /// Fetch the wallet seed
    pub fn seed(&self) -> &Seed {
        &self.seed
    }

    /// Derive the address at `index`
    pub fn address(&self, index: u32, security: Security) -> Address {
        derive_address(&self.seed, index, security)
    }

    /// Derive `count` consecutive addresses starting at `index`, stopping
    /// at the last key index (`u32::MAX`)
    pub fn addresses(&self, index: u32, count: u32, security: Security) -> Vec<AddressInfo> {
        if count == 0 {
            return vec![];
        }

        (index..=index.saturating_add(count - 1))
            .map(|i| AddressInfo {
                index: i,
                security: security.into(),
                address: self.address(i, security).with_checksum().to_string(),
            })
            .collect()
    }

    /// Sign a standard transfer
    pub fn transfer(&self, req: &TransferRequest) -> Result<SignedBundle, Error> {
        let tx = req.details()?;

        debug!(
            "transfer {} of {} from index {}",
            tx.transfer_amount, tx.balance, tx.input_address_index
        );

        let b = sign_standard_transfer(&self.seed, &tx)?;

        Ok(b)
    }

    /// Sign a zero-value message
    pub fn message(&self, req: &MessageRequest) -> Result<SignedBundle, Error> {
        let tag = req.tag()?;

        debug!("message from index {}: '{}'", req.index, req.message);

        let b = build_signed_message(
            &self.seed,
            req.index,
            &tag,
            req.timestamp,
            req.message.as_bytes(),
        )?;

        Ok(b)
    }
}

impl From<Seed> for Wallet {
    fn from(seed: Seed) -> Self {
        Self { seed }
    }
}
