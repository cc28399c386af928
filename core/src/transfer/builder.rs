// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Bundle preparation pipeline
//!
//! Preparation runs as a series of stages over an owned set of
//! [TxObject]s, each stage consuming the previous one:
//!
//! 1. [Draft], transaction objects with addresses, values and indices assigned
//! 2. [Hashed], bundle hash computed with the tag increment applied
//! 3. [Signed], signature fragments written for every input
//!
//! after which records are serialized in descending index order.

use heapless::Vec;
use zeroize::Zeroize;

use super::{SignedBundle, TxInput, TxObject, TxOutput};
use crate::{
    address::{derive_address, Security},
    bundle::Bundle,
    consts::{
        FRAGMENT_BYTES, MAX_TXS, NUM_HASH_BYTES, NUM_HASH_TRYTES, SIGNATURE_TRYTES, TAG_TRYTES,
    },
    conv::{bytes_add_u32, bytes_to_trytes, trytes_to_bytes, Trytes},
    seed::Seed,
    signing::Signer,
    Error,
};

/// Prepare and sign a bundle spending `inputs` to `outputs`
///
/// Each input contributes `security` transactions, the first carrying the
/// negated balance followed by zero-valued meta transactions sharing the
/// same address.
///
/// Outputs and inputs are expected to balance, this is not checked here.
pub fn prepare_transfers(
    seed: &Seed,
    security: Security,
    outputs: &[TxOutput],
    inputs: &[TxInput],
    timestamp: u32,
) -> Result<SignedBundle, Error> {
    let draft = Draft::new(seed, security, outputs, inputs, timestamp)?;

    let hashed = draft.hash()?;

    let signed = hashed.sign()?;

    signed.serialize()
}

/// Transaction objects prior to hashing
struct Draft<'a> {
    seed: &'a Seed,
    security: Security,
    inputs: &'a [TxInput],
    num_outputs: usize,
    txs: Vec<TxObject, MAX_TXS>,
}

/// Transaction objects with bundle hash set, prior to signing
struct Hashed<'a> {
    draft: Draft<'a>,
    bundle_hash: Trytes<NUM_HASH_TRYTES>,
    normalized_hash: [i8; NUM_HASH_TRYTES],
    tag_increment: u32,
}

/// Completed transaction objects
struct Signed {
    txs: Vec<TxObject, MAX_TXS>,
    bundle_hash: Trytes<NUM_HASH_TRYTES>,
    tag_increment: u32,
}

impl<'a> Draft<'a> {
    fn new(
        seed: &'a Seed,
        security: Security,
        outputs: &[TxOutput],
        inputs: &'a [TxInput],
        timestamp: u32,
    ) -> Result<Self, Error> {
        let num_txs = outputs.len() + inputs.len() * security.fragments();
        if num_txs == 0 {
            return Err(Error::EmptyBundle);
        }
        if num_txs > MAX_TXS {
            return Err(Error::TooManyTransactions);
        }

        let last_index = (num_txs - 1) as u32;

        #[cfg(feature = "log")]
        log::debug!(
            "preparing bundle ({} outputs, {} inputs, security: {})",
            outputs.len(),
            inputs.len(),
            security
        );

        let mut txs: Vec<TxObject, MAX_TXS> = Vec::new();

        for o in outputs {
            let tx = TxObject {
                signature_message_fragment: o.message,
                address: o.address,
                value: o.value,
                obsolete_tag: o.tag,
                timestamp,
                current_index: txs.len() as u32,
                last_index,
                tag: o.tag,
                ..Default::default()
            };
            txs.push(tx).map_err(|_| Error::TooManyTransactions)?;
        }

        for i in inputs {
            let balance = i64::try_from(i.balance).map_err(|_| Error::ValueOverflow)?;
            let address = derive_address(seed, i.key_index, security);

            // Primary input followed by meta transactions
            for j in 0..security.fragments() {
                let tx = TxObject {
                    address,
                    value: if j == 0 { -balance } else { 0 },
                    timestamp,
                    current_index: txs.len() as u32,
                    last_index,
                    ..Default::default()
                };
                txs.push(tx).map_err(|_| Error::TooManyTransactions)?;
            }
        }

        Ok(Self {
            seed,
            security,
            inputs,
            num_outputs: outputs.len(),
            txs,
        })
    }

    #[cfg_attr(feature = "noinline", inline(never))]
    fn hash(mut self) -> Result<Hashed<'a>, Error> {
        let mut bundle = Bundle::new(self.txs.len() as u32 - 1)?;

        for tx in self.txs.iter() {
            bundle.add_tx(&tx.address, tx.value, &tx.obsolete_tag, tx.timestamp)?;
        }

        let tag_increment = bundle.finalize()?;

        if let Some(tx) = self.txs.first_mut() {
            tx.obsolete_tag = increment_tag(&tx.obsolete_tag, tag_increment)?;
        }

        let mut h = [0u8; NUM_HASH_TRYTES];
        bytes_to_trytes(bundle.hash()?, &mut h)?;
        let bundle_hash = Trytes::from_raw(h);

        for tx in self.txs.iter_mut() {
            tx.bundle = bundle_hash;
        }

        #[cfg(feature = "log")]
        log::debug!("bundle hash: {}", bundle_hash);

        Ok(Hashed {
            normalized_hash: bundle.normalized_hash()?,
            bundle_hash,
            tag_increment,
            draft: self,
        })
    }
}

impl<'a> Hashed<'a> {
    #[cfg_attr(feature = "noinline", inline(never))]
    fn sign(self) -> Result<Signed, Error> {
        let Hashed {
            draft,
            bundle_hash,
            normalized_hash,
            tag_increment,
        } = self;
        let Draft {
            seed,
            security,
            inputs,
            num_outputs,
            mut txs,
        } = draft;

        let mut fragment = [0u8; FRAGMENT_BYTES];
        let mut trytes = [0u8; SIGNATURE_TRYTES];

        for (i, input) in inputs.iter().enumerate() {
            let mut signer = Signer::new(seed, input.key_index, security, &normalized_hash);
            let base = num_outputs + i * security.fragments();

            // One fragment per primary / meta transaction
            for tx in txs[base..][..security.fragments()].iter_mut() {
                signer.next_fragment(&mut fragment)?;
                bytes_to_trytes(&fragment, &mut trytes)?;
                tx.signature_message_fragment = Trytes::from_raw(trytes);
            }
        }

        fragment.zeroize();

        Ok(Signed {
            txs,
            bundle_hash,
            tag_increment,
        })
    }
}

impl Signed {
    fn serialize(self) -> Result<SignedBundle, Error> {
        let mut records: Vec<_, MAX_TXS> = Vec::new();

        for tx in self.txs.iter().rev() {
            records
                .push(tx.to_record()?)
                .map_err(|_| Error::TooManyTransactions)?;
        }

        Ok(SignedBundle {
            bundle_hash: self.bundle_hash,
            tag_increment: self.tag_increment,
            records,
        })
    }
}

/// Add `n` to a tag, treating it as the leading trytes of a full chunk
pub(crate) fn increment_tag(
    tag: &Trytes<TAG_TRYTES>,
    n: u32,
) -> Result<Trytes<TAG_TRYTES>, Error> {
    let extended = Trytes::<NUM_HASH_TRYTES>::from_slice_padded(tag.as_bytes())?;

    let mut b = [0u8; NUM_HASH_BYTES];
    trytes_to_bytes(extended.as_bytes(), &mut b)?;

    bytes_add_u32(&mut b, n);

    let mut t = [0u8; NUM_HASH_TRYTES];
    bytes_to_trytes(&b, &mut t)?;

    Trytes::from_raw(t).prefix()
}
