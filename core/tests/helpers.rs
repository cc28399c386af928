#![allow(unused)]

use rand::Rng;

use ledger_iota_core::{
    bundle::normalize_hash,
    consts::{
        FRAGMENT_BYTES, MAX_TRYTE_VALUE, NUM_FRAGMENT_CHUNKS, NUM_HASH_BYTES, NUM_HASH_TRYTES,
        SECRET_BYTES, SIGNATURE_TRYTES,
    },
    conv::{trytes_to_bytes, Trytes},
    derive_seed,
    kerl::Kerl,
    Address, Seed, SignedBundle, TxObject,
};

pub const MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

pub const SEED: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZ9ABCDEFGHIJKLMNOPQRSTUVWXYZ9ABCDEFGHIJKLMNOPQRSTUVWXYZ9";

pub const TIMESTAMP: u32 = 1_500_000_000;

pub const RECEIVER: &str = "RECEIVER";

pub fn setup() {
    let _ = simplelog::SimpleLogger::init(log::LevelFilter::Debug, Default::default());
}

/// Fixed test seed
pub fn seed() -> Seed {
    Seed::from_trytes(SEED.as_bytes()).unwrap()
}

/// Seed expanded from a random secret
pub fn random_seed() -> Seed {
    let mut secret = [0u8; SECRET_BYTES];
    rand::thread_rng().fill(&mut secret[..]);
    derive_seed(&secret)
}

/// Fixed receiving address
pub fn receiver() -> Address {
    Address::from_trytes(
        Trytes::<NUM_HASH_TRYTES>::from_str_padded(RECEIVER)
            .unwrap()
            .as_bytes(),
    )
    .unwrap()
}

/// Decode signed records, returning transactions in index order
pub fn decode(bundle: &SignedBundle) -> Vec<TxObject> {
    let mut txs: Vec<_> = bundle
        .records
        .iter()
        .map(|r| TxObject::from_record(r).unwrap())
        .collect();

    txs.reverse();
    txs
}

/// Complete the hash chains of a set of signature fragments, recovering
/// the signing address
pub fn recover_address(
    bundle_hash: &Trytes<NUM_HASH_TRYTES>,
    fragments: &[&Trytes<SIGNATURE_TRYTES>],
) -> Address {
    let mut h = [0u8; NUM_HASH_BYTES];
    trytes_to_bytes(bundle_hash.as_bytes(), &mut h).unwrap();

    let mut normalized = [0i8; NUM_HASH_TRYTES];
    normalize_hash(&h, &mut normalized);

    let mut round = Kerl::new();
    let mut digest = Kerl::new();
    let mut addr = Kerl::new();

    for (f, s) in fragments.iter().enumerate() {
        let mut b = [0u8; FRAGMENT_BYTES];
        trytes_to_bytes(s.as_bytes(), &mut b).unwrap();

        for (j, c) in b.chunks_exact(NUM_HASH_BYTES).enumerate() {
            let mut chunk = [0u8; NUM_HASH_BYTES];
            chunk.copy_from_slice(c);

            let rounds = MAX_TRYTE_VALUE + normalized[f * NUM_FRAGMENT_CHUNKS + j];
            for _ in 0..rounds {
                round.absorb_chunk(&chunk);
                round.squeeze_final_chunk(&mut chunk);
            }

            digest.absorb_chunk(&chunk);
        }

        let mut d = [0u8; NUM_HASH_BYTES];
        digest.squeeze_final_chunk(&mut d);
        addr.absorb_chunk(&d);
    }

    let mut a = [0u8; NUM_HASH_BYTES];
    addr.squeeze_final_chunk(&mut a);

    Address::from_bytes(a)
}
