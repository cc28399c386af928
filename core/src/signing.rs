// Copyright (c) 2022-2023 The MobileCoin Foundation

//! One-time signature fragment generation
//!
//! Chunk `j` of signature fragment `f` is the matching private key chunk
//! hashed `13 - normalized_hash[27 * f + j]` times, so that a verifier may
//! complete the remaining rounds and recover the address digest.

use zeroize::Zeroize;

use crate::{
    address::{hash_chain, KeySponge, Security},
    consts::{
        FRAGMENT_BYTES, MAX_TRYTE_VALUE, NUM_FRAGMENT_CHUNKS, NUM_HASH_BYTES, NUM_HASH_TRYTES,
    },
    kerl::Kerl,
    seed::Seed,
    Error,
};

/// Signer for a single input, emitting one fragment per security level
pub struct Signer {
    key: KeySponge,
    round: Kerl,
    security: Security,
    normalized_hash: [i8; NUM_HASH_TRYTES],
    fragment: usize,
}

impl Signer {
    /// Create a signer for the key at `key_index`, over a normalized bundle hash
    pub fn new(
        seed: &Seed,
        key_index: u32,
        security: Security,
        normalized_hash: &[i8; NUM_HASH_TRYTES],
    ) -> Self {
        Self {
            key: KeySponge::new(seed, key_index),
            round: Kerl::new(),
            security,
            normalized_hash: *normalized_hash,
            fragment: 0,
        }
    }

    /// Number of fragments remaining
    pub fn remaining(&self) -> usize {
        self.security.fragments() - self.fragment
    }

    /// Compute the next signature fragment (27 chunks)
    #[cfg_attr(feature = "noinline", inline(never))]
    pub fn next_fragment(&mut self, out: &mut [u8; FRAGMENT_BYTES]) -> Result<(), Error> {
        if self.remaining() == 0 {
            return Err(Error::InvalidState);
        }

        let offset = self.fragment * NUM_FRAGMENT_CHUNKS;
        let mut chunk = [0u8; NUM_HASH_BYTES];

        for (j, o) in out.chunks_exact_mut(NUM_HASH_BYTES).enumerate() {
            let rounds = MAX_TRYTE_VALUE - self.normalized_hash[offset + j];

            self.key.next_chunk(&mut chunk);
            hash_chain(&mut chunk, rounds as usize, &mut self.round);

            o.copy_from_slice(&chunk);
        }

        chunk.zeroize();
        self.fragment += 1;

        Ok(())
    }
}
