// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Protocol geometry and sizing constants

use static_assertions::const_assert_eq;

/// Trits per hash / chunk
pub const NUM_HASH_TRITS: usize = 243;

/// Trytes per hash / chunk
pub const NUM_HASH_TRYTES: usize = 81;

/// Bytes per hash / chunk (384-bit two's complement encoding)
pub const NUM_HASH_BYTES: usize = 48;

/// Bytes in the externally derived secret used to expand the seed
pub const SECRET_BYTES: usize = 64;

/// Chunks in a single key / signature fragment
pub const NUM_FRAGMENT_CHUNKS: usize = 27;

/// Bytes in a single key / signature fragment
pub const FRAGMENT_BYTES: usize = NUM_FRAGMENT_CHUNKS * NUM_HASH_BYTES;

/// Zero tryte character, used for padding and unset fields
pub const TRYTE_ZERO: u8 = b'9';

/// Maximum tryte value
pub const MAX_TRYTE_VALUE: i8 = 13;

/// Minimum tryte value
pub const MIN_TRYTE_VALUE: i8 = -13;

/// Hash rounds applied to each private key chunk to form its digest
pub const NUM_CHAIN_ROUNDS: usize = (MAX_TRYTE_VALUE - MIN_TRYTE_VALUE) as usize;

/// Checksum trytes appended to a rendered address
pub const CHECKSUM_TRYTES: usize = 9;

/// Rendered address with checksum
pub const ADDRESS_CHECKSUM_TRYTES: usize = NUM_HASH_TRYTES + CHECKSUM_TRYTES;

/// Maximum number of transactions in a single bundle
pub const MAX_TXS: usize = 8;

// Transaction record field widths (in trytes)

pub const SIGNATURE_TRYTES: usize = 2187;
pub const ADDRESS_TRYTES: usize = NUM_HASH_TRYTES;
pub const VALUE_TRYTES: usize = 27;
pub const TAG_TRYTES: usize = 27;
pub const TIMESTAMP_TRYTES: usize = 9;
pub const INDEX_TRYTES: usize = 9;
pub const BUNDLE_TRYTES: usize = NUM_HASH_TRYTES;
pub const TX_HASH_TRYTES: usize = NUM_HASH_TRYTES;
pub const NONCE_TRYTES: usize = 27;

/// Serialized transaction record width
pub const TX_TRYTES: usize = 2673;

const_assert_eq!(SIGNATURE_TRYTES, NUM_FRAGMENT_CHUNKS * NUM_HASH_TRYTES);
const_assert_eq!(NUM_CHAIN_ROUNDS, 26);

const_assert_eq!(
    TX_TRYTES,
    SIGNATURE_TRYTES
        + ADDRESS_TRYTES
        + VALUE_TRYTES
        + TAG_TRYTES
        + TIMESTAMP_TRYTES
        + 2 * INDEX_TRYTES
        + BUNDLE_TRYTES
        + 2 * TX_HASH_TRYTES
        + TAG_TRYTES
        + 3 * TIMESTAMP_TRYTES
        + NONCE_TRYTES
);

// Bundle essence chunk: value ‖ obsolete tag ‖ timestamp ‖ current index ‖ last index
const_assert_eq!(
    NUM_HASH_TRITS,
    3 * (VALUE_TRYTES + TAG_TRYTES) + 3 * 27
);
