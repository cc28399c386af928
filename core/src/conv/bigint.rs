// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Fixed width (384-bit) two's complement integer helpers
//!
//! Chunks are exchanged with the hash engine as big-endian byte buffers,
//! internally these are operated on as little-endian `u32` limbs.
//! All arithmetic wraps modulo 2^384.

use core::cmp::Ordering;

use byteorder::{BigEndian, ByteOrder};

use crate::consts::NUM_HASH_BYTES;

/// Number of 32-bit limbs per chunk
pub(crate) const BIGINT_LENGTH: usize = NUM_HASH_BYTES / 4;

/// Little-endian limb representation of a chunk
pub(crate) type BigInt = [u32; BIGINT_LENGTH];

/// 3^242, the weight of the last trit in a chunk
pub(crate) const POW3_242: BigInt = pow3(242);

/// (3^242 - 1) / 2, the largest magnitude representable with 242 balanced trits
pub(crate) const HALF_3: BigInt = half_minus_one(POW3_242);

const fn pow3(exp: u32) -> BigInt {
    let mut v = [0u32; BIGINT_LENGTH];
    v[0] = 1;

    let mut e = 0;
    while e < exp {
        let mut carry = 0u64;
        let mut i = 0;
        while i < BIGINT_LENGTH {
            let x = v[i] as u64 * 3 + carry;
            v[i] = x as u32;
            carry = x >> 32;
            i += 1;
        }
        e += 1;
    }

    v
}

// Computes (v - 1) / 2 for odd v
const fn half_minus_one(v: BigInt) -> BigInt {
    let mut r = v;
    r[0] -= 1;

    let mut i = 0;
    while i < BIGINT_LENGTH {
        let hi = if i + 1 < BIGINT_LENGTH { r[i + 1] << 31 } else { 0 };
        r[i] = (r[i] >> 1) | hi;
        i += 1;
    }

    r
}

/// Load big-endian chunk bytes
pub(crate) fn from_bytes(bytes: &[u8; NUM_HASH_BYTES]) -> BigInt {
    let mut v = [0u32; BIGINT_LENGTH];
    for (i, l) in v.iter_mut().enumerate() {
        let o = (BIGINT_LENGTH - 1 - i) * 4;
        *l = BigEndian::read_u32(&bytes[o..o + 4]);
    }
    v
}

/// Store as big-endian chunk bytes
pub(crate) fn to_bytes(v: &BigInt, bytes: &mut [u8; NUM_HASH_BYTES]) {
    for (i, l) in v.iter().enumerate() {
        let o = (BIGINT_LENGTH - 1 - i) * 4;
        BigEndian::write_u32(&mut bytes[o..o + 4], *l);
    }
}

pub(crate) fn is_negative(v: &BigInt) -> bool {
    v[BIGINT_LENGTH - 1] & 0x8000_0000 != 0
}

pub(crate) fn negate(v: &mut BigInt) {
    for l in v.iter_mut() {
        *l = !*l;
    }
    add_u32(v, 1);
}

pub(crate) fn add_u32(v: &mut BigInt, n: u32) {
    let mut carry = n as u64;
    for l in v.iter_mut() {
        if carry == 0 {
            break;
        }
        let s = *l as u64 + carry;
        *l = s as u32;
        carry = s >> 32;
    }
}

pub(crate) fn sub_u32(v: &mut BigInt, n: u32) {
    let mut borrow = n;
    for l in v.iter_mut() {
        if borrow == 0 {
            break;
        }
        let (r, o) = l.overflowing_sub(borrow);
        *l = r;
        borrow = o as u32;
    }
}

pub(crate) fn add(a: &mut BigInt, b: &BigInt) {
    let mut carry = 0u64;
    for (x, y) in a.iter_mut().zip(b.iter()) {
        let s = *x as u64 + *y as u64 + carry;
        *x = s as u32;
        carry = s >> 32;
    }
}

pub(crate) fn sub(a: &mut BigInt, b: &BigInt) {
    let mut borrow = false;
    for (x, y) in a.iter_mut().zip(b.iter()) {
        let (r1, o1) = x.overflowing_sub(*y);
        let (r2, o2) = r1.overflowing_sub(borrow as u32);
        *x = r2;
        borrow = o1 | o2;
    }
}

/// Unsigned comparison
pub(crate) fn cmp(a: &BigInt, b: &BigInt) -> Ordering {
    for (x, y) in a.iter().rev().zip(b.iter().rev()) {
        match x.cmp(y) {
            Ordering::Equal => continue,
            o => return o,
        }
    }
    Ordering::Equal
}

pub(crate) fn mul3(v: &mut BigInt) {
    let mut carry = 0u64;
    for l in v.iter_mut() {
        let x = *l as u64 * 3 + carry;
        *l = x as u32;
        carry = x >> 32;
    }
}

/// Unsigned division by three, returning the remainder
pub(crate) fn div3(v: &mut BigInt) -> u32 {
    let mut rem = 0u64;
    for l in v.iter_mut().rev() {
        let cur = (rem << 32) | *l as u64;
        *l = (cur / 3) as u32;
        rem = cur % 3;
    }
    rem as u32
}

/// Shift the value by ±3^242 so that it is representable with 242 balanced trits
/// (i.e. the 243rd trit is zero), returns whether an adjustment was applied
pub(crate) fn set_last_trit_zero(v: &mut BigInt) -> bool {
    if is_negative(v) {
        let mut m = *v;
        negate(&mut m);

        if cmp(&m, &HALF_3) == Ordering::Greater {
            add(v, &POW3_242);
            return true;
        }
    } else if cmp(v, &HALF_3) == Ordering::Greater {
        sub(v, &POW3_242);
        return true;
    }

    false
}
