// Copyright (c) 2022-2023 The MobileCoin Foundation

use super::{prepare_transfers, SignedBundle, TxDetails, TxInput, TxOutput};
use crate::{
    address::{derive_address, Security},
    consts::{SIGNATURE_TRYTES, TAG_TRYTES, TRYTE_ZERO},
    conv::{ascii_to_trytes, Trytes},
    seed::Seed,
    Error,
};

/// Security level used for standard transfers and messages
pub const TRANSFER_SECURITY: Security = Security::Medium;

/// Sign a standard transfer
///
/// Builds a bundle with two outputs, `transfer_amount` to the receiving
/// address and the remainder to the address at `input_address_index + 1`,
/// spending the full balance of the address at `input_address_index`.
#[cfg_attr(feature = "noinline", inline(never))]
pub fn sign_standard_transfer(seed: &Seed, tx: &TxDetails) -> Result<SignedBundle, Error> {
    if tx.transfer_amount > tx.balance {
        return Err(Error::InsufficientBalance);
    }

    let amount = i64::try_from(tx.transfer_amount).map_err(|_| Error::ValueOverflow)?;
    let remainder =
        i64::try_from(tx.balance - tx.transfer_amount).map_err(|_| Error::ValueOverflow)?;

    let remainder_index = tx
        .input_address_index
        .checked_add(1)
        .ok_or(Error::IndexOverflow)?;

    #[cfg(feature = "log")]
    log::info!(
        "signing transfer of {} from index {} (remainder: {} to index {})",
        amount,
        tx.input_address_index,
        remainder,
        remainder_index
    );

    let outputs = [
        TxOutput {
            address: tx.receiving_address,
            value: amount,
            message: Trytes::zero(),
            tag: tx.tag,
        },
        TxOutput {
            address: derive_address(seed, remainder_index, TRANSFER_SECURITY),
            value: remainder,
            message: Trytes::zero(),
            tag: tx.tag,
        },
    ];

    let inputs = [TxInput {
        balance: tx.balance,
        key_index: tx.input_address_index,
    }];

    prepare_transfers(seed, TRANSFER_SECURITY, &outputs, &inputs, tx.timestamp)
}

/// Build a zero-valued bundle carrying an ASCII message from the address at
/// `index` to itself
///
/// Messages are encoded at two trytes per byte and must fit in a single
/// message fragment, longer messages return [Error::MessageTooLong].
#[cfg_attr(feature = "noinline", inline(never))]
pub fn build_signed_message(
    seed: &Seed,
    index: u32,
    tag: &Trytes<TAG_TRYTES>,
    timestamp: u32,
    message: &[u8],
) -> Result<SignedBundle, Error> {
    let mut m = [TRYTE_ZERO; SIGNATURE_TRYTES];
    ascii_to_trytes(message, &mut m)?;

    #[cfg(feature = "log")]
    log::info!(
        "signing {} byte message from index {}",
        message.len(),
        index
    );

    let outputs = [TxOutput {
        address: derive_address(seed, index, TRANSFER_SECURITY),
        value: 0,
        message: Trytes::try_from(&m[..])?,
        tag: *tag,
    }];

    let inputs = [TxInput {
        balance: 0,
        key_index: index,
    }];

    prepare_transfers(seed, TRANSFER_SECURITY, &outputs, &inputs, timestamp)
}
