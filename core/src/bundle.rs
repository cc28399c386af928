// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Bundle canonicalizer
//!
//! Accumulates the essence of each transaction in a bundle, searches for an
//! obsolete tag increment such that the normalized bundle hash contains no
//! maximum (`M`, 13) trytes, and exposes the resulting (normalized) hash for
//! signing.
//!
//! Usage is strictly ordered, [Bundle::add_tx] for each transaction, then
//! [Bundle::finalize], after which [Bundle::hash] and
//! [Bundle::normalized_hash] become available.

use heapless::Vec;
use strum::{Display, EnumIter};

use crate::{
    address::Address,
    consts::{
        MAX_TRYTE_VALUE, MAX_TXS, MIN_TRYTE_VALUE, NUM_FRAGMENT_CHUNKS, NUM_HASH_BYTES,
        NUM_HASH_TRITS, NUM_HASH_TRYTES, TAG_TRYTES,
    },
    conv::{
        bytes_to_trits, bytes_to_tryte_values, int64_to_trits, trits_to_bytes, trytes_to_trits,
        Trytes,
    },
    kerl::Kerl,
    Error,
};

/// Trit offsets within a transaction essence chunk
const VALUE_OFFSET: usize = 0;
const TAG_OFFSET: usize = 81;
const TIMESTAMP_OFFSET: usize = 162;
const CURRENT_INDEX_OFFSET: usize = 189;
const LAST_INDEX_OFFSET: usize = 216;

/// Chunks per transaction (address, essence)
const TX_CHUNKS: usize = 2;

/// Bundle canonicalizer states
#[derive(Copy, Clone, PartialEq, Eq, Debug, Display, EnumIter)]
pub enum BundleState {
    /// Accepting transactions
    Building,
    /// Hash computed, tag increment applied
    Finalized,
}

/// Bundle canonicalizer
pub struct Bundle {
    state: BundleState,
    last_index: u32,
    chunks: Vec<[u8; NUM_HASH_BYTES], { MAX_TXS * TX_CHUNKS }>,
    hash: [u8; NUM_HASH_BYTES],
}

impl Bundle {
    /// Create a new bundle containing `last_index + 1` transactions
    pub fn new(last_index: u32) -> Result<Self, Error> {
        if last_index as usize >= MAX_TXS {
            return Err(Error::TooManyTransactions);
        }

        Ok(Self {
            state: BundleState::Building,
            last_index,
            chunks: Vec::new(),
            hash: [0u8; NUM_HASH_BYTES],
        })
    }

    /// Fetch canonicalizer state
    pub fn state(&self) -> BundleState {
        self.state
    }

    /// Fetch the number of transactions added
    pub fn len(&self) -> usize {
        self.chunks.len() / TX_CHUNKS
    }

    /// Check whether no transactions have been added
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Add the next transaction to the bundle
    pub fn add_tx(
        &mut self,
        address: &Address,
        value: i64,
        obsolete_tag: &Trytes<TAG_TRYTES>,
        timestamp: u32,
    ) -> Result<(), Error> {
        if self.state != BundleState::Building {
            return Err(Error::InvalidState);
        }

        let current_index = self.len() as u32;
        if current_index > self.last_index {
            return Err(Error::TooManyTransactions);
        }

        let mut trits = [0i8; NUM_HASH_TRITS];

        if !int64_to_trits(value, &mut trits[VALUE_OFFSET..TAG_OFFSET]) {
            return Err(Error::ValueOverflow);
        }
        trytes_to_trits(
            obsolete_tag.as_bytes(),
            &mut trits[TAG_OFFSET..TIMESTAMP_OFFSET],
        )?;

        // u32 values always fit in 27 trits
        int64_to_trits(
            timestamp as i64,
            &mut trits[TIMESTAMP_OFFSET..CURRENT_INDEX_OFFSET],
        );
        int64_to_trits(
            current_index as i64,
            &mut trits[CURRENT_INDEX_OFFSET..LAST_INDEX_OFFSET],
        );
        int64_to_trits(self.last_index as i64, &mut trits[LAST_INDEX_OFFSET..]);

        let mut essence = [0u8; NUM_HASH_BYTES];
        trits_to_bytes(&trits, &mut essence);

        self.chunks
            .push(*address.as_bytes())
            .map_err(|_| Error::TooManyTransactions)?;
        self.chunks
            .push(essence)
            .map_err(|_| Error::TooManyTransactions)?;

        Ok(())
    }

    /// Compute the bundle hash, returning the number of increments applied
    /// to the first transaction's obsolete tag
    #[cfg_attr(feature = "noinline", inline(never))]
    pub fn finalize(&mut self) -> Result<u32, Error> {
        if self.state != BundleState::Building {
            return Err(Error::InvalidState);
        }
        if self.is_empty() {
            return Err(Error::EmptyBundle);
        }
        if self.len() != self.last_index as usize + 1 {
            return Err(Error::InvalidState);
        }

        let mut kerl = Kerl::new();
        let mut normalized = [0i8; NUM_HASH_TRYTES];
        let mut tag_increment = 0u32;

        loop {
            for c in self.chunks.iter() {
                kerl.absorb_chunk(c);
            }
            kerl.squeeze_final_chunk(&mut self.hash);

            normalize_hash(&self.hash, &mut normalized);
            if !normalized.contains(&MAX_TRYTE_VALUE) {
                break;
            }

            self.increment_tag();
            tag_increment = tag_increment.wrapping_add(1);
        }

        self.state = BundleState::Finalized;

        #[cfg(feature = "log")]
        log::debug!(
            "bundle finalized ({} txs, tag increment: {})",
            self.len(),
            tag_increment
        );

        Ok(tag_increment)
    }

    /// Fetch the bundle hash
    pub fn hash(&self) -> Result<&[u8; NUM_HASH_BYTES], Error> {
        match self.state {
            BundleState::Finalized => Ok(&self.hash),
            _ => Err(Error::InvalidState),
        }
    }

    /// Fetch the normalized bundle hash
    pub fn normalized_hash(&self) -> Result<[i8; NUM_HASH_TRYTES], Error> {
        let h = self.hash()?;

        let mut n = [0i8; NUM_HASH_TRYTES];
        normalize_hash(h, &mut n);

        Ok(n)
    }

    // Increment the first trit of the first transaction's obsolete tag,
    // carrying within the tag field
    fn increment_tag(&mut self) {
        let essence = &mut self.chunks[1];

        let mut trits = [0i8; NUM_HASH_TRITS];
        bytes_to_trits(essence, &mut trits);

        for t in trits[TAG_OFFSET..TIMESTAMP_OFFSET].iter_mut() {
            if *t == 1 {
                *t = -1;
            } else {
                *t += 1;
                break;
            }
        }

        trits_to_bytes(&trits, essence);
    }
}

/// Normalize a bundle hash to tryte values such that each 27 tryte fragment
/// sums to zero
pub fn normalize_hash(hash: &[u8; NUM_HASH_BYTES], normalized: &mut [i8; NUM_HASH_TRYTES]) {
    bytes_to_tryte_values(hash, normalized);

    for fragment in normalized.chunks_exact_mut(NUM_FRAGMENT_CHUNKS) {
        let mut sum: i32 = fragment.iter().map(|v| *v as i32).sum();

        while sum > 0 {
            match fragment.iter_mut().find(|v| **v > MIN_TRYTE_VALUE) {
                Some(v) => *v -= 1,
                None => break,
            }
            sum -= 1;
        }

        while sum < 0 {
            match fragment.iter_mut().find(|v| **v < MAX_TRYTE_VALUE) {
                Some(v) => *v += 1,
                None => break,
            }
            sum += 1;
        }
    }
}

#[cfg(test)]
mod test {
    use rand::Rng;

    use super::*;
    use crate::conv::{bytes_to_trytes, trytes_to_bytes};

    fn address(s: &str) -> Address {
        Address::from_trytes(Trytes::<81>::from_str_padded(s).unwrap().as_bytes()).unwrap()
    }

    #[test]
    fn normalized_fragments_sum_to_zero() {
        let mut rng = rand::thread_rng();

        for _ in 0..32 {
            let mut h = [0u8; NUM_HASH_BYTES];
            rng.fill(&mut h[..]);
            crate::conv::bytes_set_last_trit_zero(&mut h);

            let mut n = [0i8; NUM_HASH_TRYTES];
            normalize_hash(&h, &mut n);

            for f in n.chunks_exact(NUM_FRAGMENT_CHUNKS) {
                assert_eq!(f.iter().map(|v| *v as i32).sum::<i32>(), 0);
                assert!(f.iter().all(|v| (MIN_TRYTE_VALUE..=MAX_TRYTE_VALUE).contains(v)));
            }
        }
    }

    #[test]
    fn normalize_shifts_leading_values() {
        // First fragment "A" + 26 * "9" sums to 1, the leading tryte absorbs the shift
        let mut t = [b'9'; NUM_HASH_TRYTES];
        t[0] = b'A';
        let mut h = [0u8; NUM_HASH_BYTES];
        trytes_to_bytes(&t, &mut h).unwrap();

        let mut n = [0i8; NUM_HASH_TRYTES];
        normalize_hash(&h, &mut n);
        assert!(n.iter().all(|v| *v == 0));
    }

    #[test]
    fn state_ordering() {
        assert!(matches!(
            Bundle::new(MAX_TXS as u32),
            Err(Error::TooManyTransactions)
        ));

        let mut b = Bundle::new(1).unwrap();
        assert_eq!(b.state(), BundleState::Building);
        assert_eq!(b.finalize(), Err(Error::EmptyBundle));
        assert_eq!(b.hash(), Err(Error::InvalidState));

        let a = address("A");
        let tag = Trytes::zero();

        b.add_tx(&a, 10, &tag, 0).unwrap();
        assert_eq!(b.finalize(), Err(Error::InvalidState));

        b.add_tx(&a, -10, &tag, 0).unwrap();
        assert_eq!(b.add_tx(&a, 0, &tag, 0), Err(Error::TooManyTransactions));

        b.finalize().unwrap();
        assert_eq!(b.state(), BundleState::Finalized);
        assert!(b.hash().is_ok());
        assert_eq!(b.add_tx(&a, 0, &tag, 0), Err(Error::InvalidState));
        assert_eq!(b.finalize(), Err(Error::InvalidState));

        let n = b.normalized_hash().unwrap();
        assert!(!n.contains(&MAX_TRYTE_VALUE));
    }

    #[test]
    fn tag_increment() {
        // One output, one security level 2 input (with meta transaction)
        let mut b = Bundle::new(2).unwrap();
        let ts = 1_500_000_000;

        let input = address(
            "MDVNFHFBM9XJFXTPIUTYOZLMVPUDWCQOFDLLDRYSSTWGZXOTXKZSBQPYZUEPXZWTXL9URBUGZNUJHIF9A",
        );

        b.add_tx(
            &address("RECEIVER"),
            100,
            &Trytes::from_str_padded("T").unwrap(),
            ts,
        )
        .unwrap();
        b.add_tx(&input, -100, &Trytes::zero(), ts).unwrap();
        b.add_tx(&input, 0, &Trytes::zero(), ts).unwrap();

        assert_eq!(b.finalize(), Ok(156));

        let mut t = [0u8; NUM_HASH_TRYTES];
        bytes_to_trytes(b.hash().unwrap(), &mut t).unwrap();
        assert_eq!(
            core::str::from_utf8(&t).unwrap(),
            "KHPOALNBOLLNWXWVALIWAKUOGIATOWYHGKKGTQ9XFHKBOAZPQUPK9UCHCVNVLDPLRZWJPBLYWLOEGIVUD"
        );
    }
}
