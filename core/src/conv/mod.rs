// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Balanced ternary encodings
//!
//! Values move between three representations:
//!
//! - trits, balanced ternary digits in `{-1, 0, 1}`, least significant first
//! - trytes, groups of three trits rendered over [`TRYTE_ALPHABET`]
//! - 48 byte chunks, the big-endian two's complement encoding of a 243 trit
//!   integer with the last trit forced to zero, as consumed by the hash engine

use zeroize::Zeroize;

use crate::{
    consts::{NUM_HASH_BYTES, NUM_HASH_TRITS, NUM_HASH_TRYTES},
    Error,
};

mod bigint;
use bigint::BigInt;

mod trytes;
pub use trytes::Trytes;

/// Tryte alphabet, `9` encodes zero, `A..M` encode 1..13 and `N..Z` encode -13..-1
pub const TRYTE_ALPHABET: &[u8; 27] = b"9ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Fetch the value of a tryte character
pub fn tryte_value(c: u8) -> Result<i8, Error> {
    match c {
        b'9' => Ok(0),
        b'A'..=b'M' => Ok((c - b'A') as i8 + 1),
        b'N'..=b'Z' => Ok((c - b'N') as i8 - 13),
        _ => Err(Error::InvalidTryte),
    }
}

/// Fetch the character for a tryte value in `[-13, 13]`
pub fn tryte_char(v: i8) -> u8 {
    debug_assert!((-13..=13).contains(&v));
    TRYTE_ALPHABET[v.rem_euclid(27) as usize]
}

/// Check a string only contains tryte characters
pub fn is_trytes(s: &[u8]) -> bool {
    s.iter().all(|c| tryte_value(*c).is_ok())
}

/// Expand tryte characters to trits, `trits` must hold `3 * trytes.len()` entries
pub fn trytes_to_trits(trytes: &[u8], trits: &mut [i8]) -> Result<(), Error> {
    if trits.len() != trytes.len() * 3 {
        return Err(Error::InvalidLength);
    }

    for (c, t) in trytes.iter().zip(trits.chunks_exact_mut(3)) {
        let mut v = tryte_value(*c)?;
        for x in t.iter_mut() {
            let r = balanced_rem(v as i32);
            *x = r;
            v = (v - r) / 3;
        }
    }

    Ok(())
}

/// Collapse trits to tryte characters, `trits` must hold `3 * trytes.len()` entries
pub fn trits_to_trytes(trits: &[i8], trytes: &mut [u8]) -> Result<(), Error> {
    if trits.len() != trytes.len() * 3 {
        return Err(Error::InvalidLength);
    }

    for (t, c) in trits.chunks_exact(3).zip(trytes.iter_mut()) {
        *c = tryte_char(t[0] + 3 * t[1] + 9 * t[2]);
    }

    Ok(())
}

/// Decode a 48 byte chunk to 243 trits
pub fn bytes_to_trits(bytes: &[u8; NUM_HASH_BYTES], trits: &mut [i8; NUM_HASH_TRITS]) {
    let mut v = bigint::from_bytes(bytes);

    let negative = bigint::is_negative(&v);
    if negative {
        bigint::negate(&mut v);
    }

    for t in trits.iter_mut() {
        *t = match bigint::div3(&mut v) {
            2 => {
                bigint::add_u32(&mut v, 1);
                -1
            }
            r => r as i8,
        };

        if negative {
            *t = -*t;
        }
    }

    v.zeroize();
}

/// Encode 243 trits to a 48 byte chunk, the last trit is ignored
pub fn trits_to_bytes(trits: &[i8; NUM_HASH_TRITS], bytes: &mut [u8; NUM_HASH_BYTES]) {
    let mut v: BigInt = [0u32; bigint::BIGINT_LENGTH];

    for t in trits[..NUM_HASH_TRITS - 1].iter().rev() {
        bigint::mul3(&mut v);
        match *t {
            1 => bigint::add_u32(&mut v, 1),
            -1 => bigint::sub_u32(&mut v, 1),
            _ => (),
        }
    }

    bigint::to_bytes(&v, bytes);
    v.zeroize();
}

/// Render one or more 48 byte chunks as trytes (81 per chunk)
pub fn bytes_to_trytes(bytes: &[u8], trytes: &mut [u8]) -> Result<(), Error> {
    if bytes.len() % NUM_HASH_BYTES != 0
        || trytes.len() != bytes.len() / NUM_HASH_BYTES * NUM_HASH_TRYTES
    {
        return Err(Error::InvalidLength);
    }

    let mut trits = [0i8; NUM_HASH_TRITS];
    let mut chunk = [0u8; NUM_HASH_BYTES];

    for (b, t) in bytes
        .chunks_exact(NUM_HASH_BYTES)
        .zip(trytes.chunks_exact_mut(NUM_HASH_TRYTES))
    {
        chunk.copy_from_slice(b);
        bytes_to_trits(&chunk, &mut trits);
        trits_to_trytes(&trits, t)?;
    }

    trits.zeroize();
    chunk.zeroize();

    Ok(())
}

/// Parse trytes (81 per chunk) to one or more 48 byte chunks
pub fn trytes_to_bytes(trytes: &[u8], bytes: &mut [u8]) -> Result<(), Error> {
    if trytes.len() % NUM_HASH_TRYTES != 0
        || bytes.len() != trytes.len() / NUM_HASH_TRYTES * NUM_HASH_BYTES
    {
        return Err(Error::InvalidLength);
    }

    let mut trits = [0i8; NUM_HASH_TRITS];
    let mut chunk = [0u8; NUM_HASH_BYTES];

    for (t, b) in trytes
        .chunks_exact(NUM_HASH_TRYTES)
        .zip(bytes.chunks_exact_mut(NUM_HASH_BYTES))
    {
        trytes_to_trits(t, &mut trits)?;
        trits_to_bytes(&trits, &mut chunk);
        b.copy_from_slice(&chunk);
    }

    trits.zeroize();
    chunk.zeroize();

    Ok(())
}

/// Decode a 48 byte chunk to tryte values (used for hash normalization)
pub fn bytes_to_tryte_values(bytes: &[u8; NUM_HASH_BYTES], values: &mut [i8; NUM_HASH_TRYTES]) {
    let mut trits = [0i8; NUM_HASH_TRITS];
    bytes_to_trits(bytes, &mut trits);

    for (t, v) in trits.chunks_exact(3).zip(values.iter_mut()) {
        *v = t[0] + 3 * t[1] + 9 * t[2];
    }
}

/// Encode a signed integer as balanced trits, returns false where the value
/// does not fit in the provided number of trits
pub fn int64_to_trits(value: i64, trits: &mut [i8]) -> bool {
    let mut v = value as i128;

    for t in trits.iter_mut() {
        let r = (v + 1).rem_euclid(3) - 1;
        *t = r as i8;
        v = (v - r) / 3;
    }

    v == 0
}

/// Decode balanced trits to a signed integer, returns `None` on overflow
pub fn trits_to_int64(trits: &[i8]) -> Option<i64> {
    let mut v: i128 = 0;

    for t in trits.iter().rev() {
        v = v.checked_mul(3)?.checked_add(*t as i128)?;
    }

    i64::try_from(v).ok()
}

/// Encode an integer as trytes, returns false if the value does not fit
pub fn int64_to_trytes(value: i64, trytes: &mut [u8]) -> bool {
    let mut v = value as i128;

    for c in trytes.iter_mut() {
        let r = (v + 13).rem_euclid(27) - 13;
        *c = tryte_char(r as i8);
        v = (v - r) / 27;
    }

    v == 0
}

/// Decode trytes to an integer
pub fn trytes_to_int64(trytes: &[u8]) -> Result<i64, Error> {
    if !is_trytes(trytes) {
        return Err(Error::InvalidTryte);
    }

    let mut v: i128 = 0;

    for c in trytes.iter().rev() {
        let t = tryte_value(*c)? as i128;
        v = v
            .checked_mul(27)
            .and_then(|v| v.checked_add(t))
            .ok_or(Error::ValueOverflow)?;
    }

    i64::try_from(v).map_err(|_| Error::ValueOverflow)
}

/// Encode ASCII bytes as trytes, two per byte (`b % 27` then `b / 27`),
/// returning the number of trytes written
pub fn ascii_to_trytes(ascii: &[u8], trytes: &mut [u8]) -> Result<usize, Error> {
    let n = ascii.len() * 2;
    if n > trytes.len() {
        return Err(Error::MessageTooLong);
    }

    for (b, t) in ascii.iter().zip(trytes.chunks_exact_mut(2)) {
        t[0] = TRYTE_ALPHABET[(*b % 27) as usize];
        t[1] = TRYTE_ALPHABET[(*b / 27) as usize];
    }

    Ok(n)
}

/// Add a small integer to a chunk, re-normalising so the last trit is zero
pub fn bytes_add_u32(bytes: &mut [u8; NUM_HASH_BYTES], n: u32) {
    let mut v = bigint::from_bytes(bytes);

    bigint::add_u32(&mut v, n);
    bigint::set_last_trit_zero(&mut v);

    bigint::to_bytes(&v, bytes);
    v.zeroize();
}

/// Force the last trit of a chunk to zero, returns whether the chunk was modified
pub fn bytes_set_last_trit_zero(bytes: &mut [u8; NUM_HASH_BYTES]) -> bool {
    let mut v = bigint::from_bytes(bytes);

    let modified = bigint::set_last_trit_zero(&mut v);
    if modified {
        bigint::to_bytes(&v, bytes);
    }

    v.zeroize();
    modified
}

/// Balanced remainder in {-1, 0, 1}
fn balanced_rem(v: i32) -> i8 {
    ((v + 1).rem_euclid(3) - 1) as i8
}
