//! Bundle preparation and standard transfer signing

use strum::IntoEnumIterator;

use ledger_iota_core::{
    bundle::{Bundle, BundleState},
    consts::{MAX_TXS, TX_TRYTES},
    conv::{bytes_to_trytes, Trytes},
    derive_address, prepare_transfers, sign_standard_transfer, Error, Security, TxDetails,
    TxInput, TxObject, TxOutput,
};

mod helpers;
use helpers::*;

fn output(value: i64, tag: &str) -> TxOutput {
    TxOutput {
        address: receiver(),
        value,
        message: Trytes::zero(),
        tag: Trytes::from_str_padded(tag).unwrap(),
    }
}

#[test]
fn single_input_bundle() -> anyhow::Result<()> {
    setup();

    let s = seed();
    let inputs = [TxInput {
        balance: 100,
        key_index: 0,
    }];

    let b = prepare_transfers(&s, Security::Medium, &[output(100, "T")], &inputs, TIMESTAMP)?;

    assert_eq!(
        b.bundle_hash.as_str(),
        "KHPOALNBOLLNWXWVALIWAKUOGIATOWYHGKKGTQ9XFHKBOAZPQUPK9UCHCVNVLDPLRZWJPBLYWLOEGIVUD"
    );
    assert_eq!(b.tag_increment, 156);
    assert_eq!(b.records.len(), 3);

    // Records are emitted last index first
    let txs = decode(&b);
    let input_address = derive_address(&s, 0, Security::Medium);

    let out = &txs[0];
    assert_eq!(out.address, receiver());
    assert_eq!(out.value, 100);
    assert_eq!(out.obsolete_tag.as_str(), "NF9999999999999999999999999");
    assert_eq!(out.tag.as_str(), "T99999999999999999999999999");
    assert!(out.signature_message_fragment.is_zero());

    let r = b.records[2].as_str();
    assert_eq!(&r[2268..2295], "SD9999999999999999999999999");
    assert_eq!(&r[2322..2349], "OEXNOXD99999999999B99999999");

    for (i, tx) in txs[1..].iter().enumerate() {
        assert_eq!(tx.address, input_address);
        assert_eq!(tx.value, if i == 0 { -100 } else { 0 });
        assert!(tx.tag.is_zero());
        assert!(tx.obsolete_tag.is_zero());
        assert!(!tx.signature_message_fragment.is_zero());
    }

    // Signature fragments complete to the input address
    let fragments = [
        &txs[1].signature_message_fragment,
        &txs[2].signature_message_fragment,
    ];
    assert_eq!(recover_address(&b.bundle_hash, &fragments), input_address);

    Ok(())
}

#[test]
fn standard_transfer() -> anyhow::Result<()> {
    setup();

    let s = seed();
    let tx = TxDetails {
        receiving_address: receiver(),
        input_address_index: 0,
        timestamp: TIMESTAMP,
        transfer_amount: 400,
        balance: 1000,
        tag: Trytes::from_str_padded("LEDGER")?,
    };

    let b = sign_standard_transfer(&s, &tx)?;

    assert_eq!(
        b.bundle_hash.as_str(),
        "XI9XGJZFBUUBNAFUZAZWIZCZKJHBYGFLUQRRLW9HKIGWFITTXF9BSOJBHSUWKFWHIUBRBWPKKRLLIXTAC"
    );
    assert_eq!(b.tag_increment, 244);
    assert_eq!(b.records.len(), 4);

    let txs = decode(&b);

    assert_eq!(txs[0].address, receiver());
    assert_eq!(txs[0].value, 400);
    assert_eq!(txs[0].obsolete_tag.as_str(), "MNEGER999999999999999999999");
    assert_eq!(txs[0].tag.as_str(), "LEDGER999999999999999999999");

    // Remainder to the next index
    assert_eq!(txs[1].address, derive_address(&s, 1, Security::Medium));
    assert_eq!(txs[1].value, 600);
    assert_eq!(txs[1].obsolete_tag, txs[1].tag);

    assert_eq!(txs[2].value, -1000);
    assert_eq!(txs[3].value, 0);
    assert_eq!(txs[2].address, derive_address(&s, 0, Security::Medium));

    Ok(())
}

#[test]
fn standard_transfer_errors() {
    setup();

    let s = seed();
    let mut tx = TxDetails {
        receiving_address: receiver(),
        input_address_index: 0,
        timestamp: TIMESTAMP,
        transfer_amount: 1001,
        balance: 1000,
        tag: Trytes::zero(),
    };

    assert_eq!(
        sign_standard_transfer(&s, &tx),
        Err(Error::InsufficientBalance)
    );

    tx.transfer_amount = 10;
    tx.input_address_index = u32::MAX;
    assert_eq!(sign_standard_transfer(&s, &tx), Err(Error::IndexOverflow));

    tx.input_address_index = 0;
    tx.balance = u64::MAX;
    assert_eq!(sign_standard_transfer(&s, &tx), Err(Error::ValueOverflow));
}

#[test]
fn value_conservation_and_geometry() {
    setup();

    for security in Security::iter() {
        let s = random_seed();

        let a = rand::random::<u32>() as u64 + 1;
        let b = rand::random::<u32>() as u64;
        let inputs = [
            TxInput {
                balance: a,
                key_index: 3,
            },
            TxInput {
                balance: b,
                key_index: 9,
            },
        ];
        let outputs = [output((a + b) as i64 - 1, "GEOMETRY"), output(1, "")];

        let num_txs = outputs.len() + inputs.len() * security.fragments();
        if num_txs > MAX_TXS {
            assert_eq!(
                prepare_transfers(&s, security, &outputs, &inputs, TIMESTAMP),
                Err(Error::TooManyTransactions)
            );
            continue;
        }

        let bundle = prepare_transfers(&s, security, &outputs, &inputs, TIMESTAMP).unwrap();
        assert_eq!(bundle.records.len(), num_txs);

        // Strictly descending index order on the wire
        for (i, r) in bundle.records.iter().enumerate() {
            assert_eq!(r.as_bytes().len(), TX_TRYTES);

            let tx = TxObject::from_record(r).unwrap();
            assert_eq!(tx.current_index as usize, num_txs - 1 - i);
            assert_eq!(tx.last_index as usize, num_txs - 1);
            assert_eq!(tx.timestamp, TIMESTAMP);
            assert_eq!(tx.bundle, bundle.bundle_hash);
            assert!(tx.trunk_transaction.is_zero());
            assert!(tx.branch_transaction.is_zero());
            assert!(tx.nonce.is_zero());
        }

        let txs = decode(&bundle);
        assert_eq!(txs.iter().map(|t| t.value).sum::<i64>(), 0);

        // One signature fragment per input transaction
        for (i, input) in inputs.iter().enumerate() {
            let base = outputs.len() + i * security.fragments();
            let fragments: Vec<_> = txs[base..][..security.fragments()]
                .iter()
                .map(|t| &t.signature_message_fragment)
                .collect();

            assert_eq!(
                recover_address(&bundle.bundle_hash, &fragments),
                derive_address(&s, input.key_index, security)
            );
        }
    }
}

#[test]
fn tag_increment_replay() {
    setup();

    let s = random_seed();
    let inputs = [TxInput {
        balance: 42,
        key_index: rand::random::<u8>() as u32,
    }];

    let signed =
        prepare_transfers(&s, Security::Low, &[output(42, "REPLAY")], &inputs, TIMESTAMP).unwrap();
    let txs = decode(&signed);

    // Re-hashing the emitted transactions (with the incremented tag)
    // requires no further increments and yields the emitted bundle hash
    let mut b = Bundle::new(txs.len() as u32 - 1).unwrap();
    for tx in txs.iter() {
        b.add_tx(&tx.address, tx.value, &tx.obsolete_tag, tx.timestamp)
            .unwrap();
    }

    assert_eq!(b.finalize(), Ok(0));
    assert_eq!(b.state(), BundleState::Finalized);

    let mut h = [0u8; 81];
    bytes_to_trytes(b.hash().unwrap(), &mut h).unwrap();
    assert_eq!(&h, signed.bundle_hash.as_bytes());

    // The un-incremented tag requires the reported increment
    let mut b = Bundle::new(txs.len() as u32 - 1).unwrap();
    for (i, tx) in txs.iter().enumerate() {
        let tag = match i {
            0 => Trytes::from_str_padded("REPLAY").unwrap(),
            _ => tx.obsolete_tag,
        };
        b.add_tx(&tx.address, tx.value, &tag, tx.timestamp).unwrap();
    }
    assert_eq!(b.finalize(), Ok(signed.tag_increment));
}

#[test]
fn security_fragments() {
    setup();

    let s = seed();

    for security in Security::iter() {
        let inputs = [TxInput {
            balance: 0,
            key_index: 1,
        }];

        let b = prepare_transfers(&s, security, &[output(0, "")], &inputs, TIMESTAMP).unwrap();
        assert_eq!(b.records.len(), 1 + security.fragments());

        let txs = decode(&b);
        let signed = txs[1..]
            .iter()
            .filter(|t| !t.signature_message_fragment.is_zero())
            .count();
        assert_eq!(signed, security.fragments());
    }

    assert_eq!(Security::new(0), Err(Error::InvalidSecurity));
    assert_eq!(Security::new(4), Err(Error::InvalidSecurity));
}
