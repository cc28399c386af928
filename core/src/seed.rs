// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Wallet seed handling and expansion from an externally derived secret

use core::fmt;

use zeroize::Zeroize;

use crate::{
    consts::{NUM_HASH_BYTES, NUM_HASH_TRYTES, SECRET_BYTES},
    conv::{bytes_to_trytes, trytes_to_bytes, Trytes},
    kerl::Kerl,
    Error,
};

/// Offset between successive absorption windows over the secret
const WINDOW_STRIDE: usize = 16;

/// Number of windows absorbed during expansion
const NUM_WINDOWS: usize = SECRET_BYTES / WINDOW_STRIDE;

/// Wallet seed (a single 48 byte chunk), zeroized on drop
#[derive(Clone, PartialEq, Eq)]
pub struct Seed([u8; NUM_HASH_BYTES]);

impl Seed {
    /// Create a seed from chunk bytes
    pub fn from_bytes(bytes: &[u8; NUM_HASH_BYTES]) -> Self {
        Self(*bytes)
    }

    /// Parse a seed from exactly 81 tryte characters
    pub fn from_trytes(trytes: &[u8]) -> Result<Self, Error> {
        if trytes.len() != NUM_HASH_TRYTES {
            return Err(Error::InvalidLength);
        }

        let mut s = Self([0u8; NUM_HASH_BYTES]);
        trytes_to_bytes(trytes, &mut s.0)?;

        Ok(s)
    }

    /// Render the seed as trytes
    pub fn to_trytes(&self) -> Trytes<NUM_HASH_TRYTES> {
        let mut t = [0u8; NUM_HASH_TRYTES];

        // Lengths are fixed so conversion can not fail
        let _ = bytes_to_trytes(&self.0, &mut t);

        Trytes::from_raw(t)
    }

    /// Access seed chunk bytes
    pub fn as_bytes(&self) -> &[u8; NUM_HASH_BYTES] {
        &self.0
    }

    /// Expand a 64 byte secret (eg. a BIP-39 seed) into a wallet seed
    pub fn derive(secret: &[u8; SECRET_BYTES]) -> Self {
        derive_seed(secret)
    }
}

/// Expand a 64 byte secret into a wallet seed
///
/// The secret is treated as a ring of four 16 byte blocks, with four
/// overlapping 48 byte windows (starting at blocks 0, 1, 2 and 3) absorbed in
/// order before a single chunk is squeezed.
#[cfg_attr(feature = "noinline", inline(never))]
pub fn derive_seed(secret: &[u8; SECRET_BYTES]) -> Seed {
    let mut k = Kerl::new();
    let mut window = [0u8; NUM_HASH_BYTES];

    for w in 0..NUM_WINDOWS {
        for (i, b) in window.iter_mut().enumerate() {
            *b = secret[(w * WINDOW_STRIDE + i) % SECRET_BYTES];
        }
        k.absorb_chunk(&window);
    }

    let mut s = Seed([0u8; NUM_HASH_BYTES]);
    k.squeeze_final_chunk(&mut s.0);

    window.zeroize();

    s
}

impl Zeroize for Seed {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl Drop for Seed {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Seed(<redacted>)")
    }
}
