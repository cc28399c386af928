// Copyright (c) 2022-2023 The MobileCoin Foundation

//! One-time key and address derivation
//!
//! Each (seed, index) pair selects a key sponge from which `security`
//! fragments of 27 key chunks are squeezed. Every key chunk is reduced
//! through [NUM_CHAIN_ROUNDS] hash rounds, each fragment is digested and the
//! digests are hashed once more to form the address.

use core::fmt;

use num_enum::{IntoPrimitive, TryFromPrimitive};
use strum::{Display, EnumIter};
use zeroize::Zeroize;

use crate::{
    consts::{
        ADDRESS_CHECKSUM_TRYTES, CHECKSUM_TRYTES, NUM_CHAIN_ROUNDS, NUM_FRAGMENT_CHUNKS,
        NUM_HASH_BYTES, NUM_HASH_TRYTES,
    },
    conv::{bytes_add_u32, bytes_to_trytes, trytes_to_bytes, Trytes},
    kerl::{kerl_hash, Kerl},
    seed::Seed,
    Error,
};

/// Address security level, the number of key fragments composing a key
#[derive(
    Copy, Clone, PartialEq, Eq, Debug, Display, EnumIter, IntoPrimitive, TryFromPrimitive,
)]
#[repr(u8)]
pub enum Security {
    Low = 1,
    Medium = 2,
    High = 3,
}

impl Security {
    /// Parse a security level, rejecting values outside `[1, 3]`
    pub fn new(level: u8) -> Result<Self, Error> {
        Self::try_from_primitive(level).map_err(|_| Error::InvalidSecurity)
    }

    /// Number of key / signature fragments
    pub fn fragments(&self) -> usize {
        *self as usize
    }
}

impl Default for Security {
    fn default() -> Self {
        Self::Medium
    }
}

/// Address, a single 48 byte chunk
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct Address([u8; NUM_HASH_BYTES]);

impl Address {
    pub const fn from_bytes(bytes: [u8; NUM_HASH_BYTES]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; NUM_HASH_BYTES] {
        &self.0
    }

    /// Parse an address from 81 trytes, or 90 trytes including a checksum
    pub fn from_trytes(trytes: &[u8]) -> Result<Self, Error> {
        let (addr, checksum) = match trytes.len() {
            NUM_HASH_TRYTES => (trytes, None),
            ADDRESS_CHECKSUM_TRYTES => (
                &trytes[..NUM_HASH_TRYTES],
                Some(&trytes[NUM_HASH_TRYTES..]),
            ),
            _ => return Err(Error::InvalidLength),
        };

        let mut a = Self([0u8; NUM_HASH_BYTES]);
        trytes_to_bytes(addr, &mut a.0)?;

        // Rendering discards the (always zero) last trit, require canonical input
        if a.to_trytes().as_bytes()[..] != addr[..] {
            return Err(Error::InvalidTryte);
        }

        match checksum {
            Some(c) if a.checksum().as_bytes()[..] != c[..] => Err(Error::InvalidChecksum),
            _ => Ok(a),
        }
    }

    /// Render address as 81 trytes
    pub fn to_trytes(&self) -> Trytes<NUM_HASH_TRYTES> {
        let mut t = [0u8; NUM_HASH_TRYTES];
        let _ = bytes_to_trytes(&self.0, &mut t);
        Trytes::from_raw(t)
    }

    /// Compute the address checksum, the last 9 trytes of the hashed address
    pub fn checksum(&self) -> Trytes<CHECKSUM_TRYTES> {
        let mut h = [0u8; NUM_HASH_BYTES];
        kerl_hash(&self.0, &mut h);

        let mut t = [0u8; NUM_HASH_TRYTES];
        let _ = bytes_to_trytes(&h, &mut t);

        let mut c = [0u8; CHECKSUM_TRYTES];
        c.copy_from_slice(&t[NUM_HASH_TRYTES - CHECKSUM_TRYTES..]);
        Trytes::from_raw(c)
    }

    /// Render address as 90 trytes with appended checksum
    pub fn with_checksum(&self) -> Trytes<ADDRESS_CHECKSUM_TRYTES> {
        let mut t = [0u8; ADDRESS_CHECKSUM_TRYTES];
        t[..NUM_HASH_TRYTES].copy_from_slice(self.to_trytes().as_bytes());
        t[NUM_HASH_TRYTES..].copy_from_slice(self.checksum().as_bytes());
        Trytes::from_raw(t)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_trytes())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_trytes())
    }
}

/// Render an address with checksum (90 trytes)
pub fn address_with_checksum(address: &Address) -> Trytes<ADDRESS_CHECKSUM_TRYTES> {
    address.with_checksum()
}

/// Key sponge for a single (seed, index) pair, emits private key chunks in order
pub(crate) struct KeySponge {
    kerl: Kerl,
    state: [u8; NUM_HASH_BYTES],
}

impl KeySponge {
    pub(crate) fn new(seed: &Seed, index: u32) -> Self {
        // Scratch copy, the caller's seed is never modified
        let mut sub_seed = *seed.as_bytes();
        bytes_add_u32(&mut sub_seed, index);

        let mut kerl = Kerl::new();
        kerl.absorb_chunk(&sub_seed);
        kerl.squeeze_final_chunk(&mut sub_seed);
        kerl.absorb_chunk(&sub_seed);

        sub_seed.zeroize();

        Self {
            kerl,
            state: [0u8; NUM_HASH_BYTES],
        }
    }

    /// Squeeze the next private key chunk
    pub(crate) fn next_chunk(&mut self, chunk: &mut [u8; NUM_HASH_BYTES]) {
        self.kerl.state_squeeze_chunk(&mut self.state, chunk);
        self.kerl.reinitialize(&self.state);
    }
}

impl Drop for KeySponge {
    fn drop(&mut self) {
        self.state.zeroize();
        self.kerl.reset();
    }
}

/// Hash a chunk in place `rounds` times using the provided scratch sponge
pub(crate) fn hash_chain(chunk: &mut [u8; NUM_HASH_BYTES], rounds: usize, round: &mut Kerl) {
    for _ in 0..rounds {
        round.absorb_chunk(chunk);
        round.squeeze_final_chunk(chunk);
    }
}

/// Derive the address for a given seed, key index and security level
#[cfg_attr(feature = "noinline", inline(never))]
pub fn derive_address(seed: &Seed, index: u32, security: Security) -> Address {
    let mut key = KeySponge::new(seed, index);

    let mut round = Kerl::new();
    let mut digest = Kerl::new();
    let mut addr = Kerl::new();

    let mut chunk = [0u8; NUM_HASH_BYTES];
    let mut fragment_digest = [0u8; NUM_HASH_BYTES];

    for _ in 0..security.fragments() {
        for _ in 0..NUM_FRAGMENT_CHUNKS {
            key.next_chunk(&mut chunk);
            hash_chain(&mut chunk, NUM_CHAIN_ROUNDS, &mut round);
            digest.absorb_chunk(&chunk);
        }

        // Fragment digests are absorbed in order, equivalent to absorbing their concatenation
        digest.squeeze_final_chunk(&mut fragment_digest);
        addr.absorb_chunk(&fragment_digest);
    }

    chunk.zeroize();

    let mut a = Address([0u8; NUM_HASH_BYTES]);
    addr.squeeze_final_chunk(&mut a.0);

    #[cfg(feature = "log")]
    log::debug!("derived address {} (index: {}, security: {})", a, index, security);

    a
}
