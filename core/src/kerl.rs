// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Kerl sponge, Keccak-384 over 48 byte chunks
//!
//! Squeezed chunks always have their last trit forced to zero so that they
//! remain valid 242 trit values.
//! Multi-chunk squeezing is performed with [Kerl::state_squeeze_chunk] and
//! [Kerl::reinitialize], re-absorbing the complemented digest as the next
//! sponge state.

use sha3::{Digest, Keccak384};
use zeroize::Zeroize;

use crate::{conv::bytes_set_last_trit_zero, consts::NUM_HASH_BYTES};

/// Kerl sponge instance
#[derive(Clone)]
pub struct Kerl {
    sha: Keccak384,
}

impl Default for Kerl {
    fn default() -> Self {
        Self::new()
    }
}

impl Kerl {
    /// Create a new (empty) sponge
    pub fn new() -> Self {
        Self {
            sha: Keccak384::new(),
        }
    }

    /// Reset sponge to the empty state
    pub fn reset(&mut self) {
        Digest::reset(&mut self.sha);
    }

    /// Absorb a single chunk
    pub fn absorb_chunk(&mut self, chunk: &[u8; NUM_HASH_BYTES]) {
        self.sha.update(chunk);
    }

    /// Absorb a sequence of chunks
    pub fn absorb_bytes(&mut self, bytes: &[u8]) {
        debug_assert_eq!(bytes.len() % NUM_HASH_BYTES, 0);
        self.sha.update(bytes);
    }

    /// Squeeze a single chunk, resetting the sponge
    pub fn squeeze_final_chunk(&mut self, out: &mut [u8; NUM_HASH_BYTES]) {
        let mut d = self.sha.finalize_reset();

        out.copy_from_slice(&d);
        bytes_set_last_trit_zero(out);

        d.as_mut_slice().zeroize();
    }

    /// Squeeze a chunk while capturing the state needed to continue squeezing
    ///
    /// On return the sponge is reset, callers must [Kerl::reinitialize] with
    /// `state` to fetch the next chunk.
    pub fn state_squeeze_chunk(
        &mut self,
        state: &mut [u8; NUM_HASH_BYTES],
        out: &mut [u8; NUM_HASH_BYTES],
    ) {
        let mut d = self.sha.finalize_reset();

        for (s, b) in state.iter_mut().zip(d.iter()) {
            *s = !*b;
        }

        out.copy_from_slice(&d);
        bytes_set_last_trit_zero(out);

        d.as_mut_slice().zeroize();
    }

    /// Reset the sponge and absorb a previously captured state
    pub fn reinitialize(&mut self, state: &[u8; NUM_HASH_BYTES]) {
        self.reset();
        self.absorb_chunk(state);
    }
}

/// Hash a single chunk
pub fn kerl_hash(input: &[u8; NUM_HASH_BYTES], out: &mut [u8; NUM_HASH_BYTES]) {
    let mut k = Kerl::new();
    k.absorb_chunk(input);
    k.squeeze_final_chunk(out);
}
