//! Zero-value signed messages

use ledger_iota_core::{
    build_signed_message, consts::SIGNATURE_TRYTES, conv::Trytes, derive_address, Error,
    Security,
};

mod helpers;
use helpers::*;

#[test]
fn signed_message() -> anyhow::Result<()> {
    setup();

    let s = seed();
    let tag = Trytes::from_str_padded("MSG")?;

    let b = build_signed_message(&s, 3, &tag, TIMESTAMP, b"hello world")?;

    assert_eq!(
        b.bundle_hash.as_str(),
        "9FQZINEEQJTHLAHTLXFNLSJZEDURBCDVKA9ASCETYWWSLFA9XWGGEEUMTVFHVJGCKVCBKZTDDXFUUQRAC"
    );
    assert_eq!(b.tag_increment, 46);
    assert_eq!(b.records.len(), 3);

    let txs = decode(&b);
    let own = derive_address(&s, 3, Security::Medium);

    // Message output to the signing address
    assert_eq!(txs[0].address, own);
    assert_eq!(txs[0].value, 0);
    assert_eq!(txs[0].tag, tag);
    assert_eq!(txs[0].obsolete_tag.as_str(), "EUG999999999999999999999999");

    let m = txs[0].signature_message_fragment.as_str();
    assert!(m.starts_with("WCTC9D9DCDEAKDCDFD9DSC"));
    assert!(m[22..].bytes().all(|c| c == b'9'));

    for tx in &txs[1..] {
        assert_eq!(tx.address, own);
        assert_eq!(tx.value, 0);
    }

    let fragments = [
        &txs[1].signature_message_fragment,
        &txs[2].signature_message_fragment,
    ];
    assert_eq!(recover_address(&b.bundle_hash, &fragments), own);

    Ok(())
}

#[test]
fn message_limits() {
    setup();

    let s = seed();
    let tag = Trytes::zero();

    // Two trytes per byte, filling a single fragment
    let max = [b'A'; SIGNATURE_TRYTES / 2];
    let b = build_signed_message(&s, 0, &tag, TIMESTAMP, &max).unwrap();

    let txs = decode(&b);
    assert!(txs[0]
        .signature_message_fragment
        .as_str()
        .starts_with("KBKBKB"));

    let long = [b'A'; SIGNATURE_TRYTES / 2 + 1];
    assert_eq!(
        build_signed_message(&s, 0, &tag, TIMESTAMP, &long),
        Err(Error::MessageTooLong)
    );
}

#[test]
fn empty_message() {
    setup();

    let s = random_seed();

    let b = build_signed_message(&s, 7, &Trytes::zero(), TIMESTAMP, b"").unwrap();
    let txs = decode(&b);

    assert!(txs[0].signature_message_fragment.is_zero());
    assert_eq!(txs.iter().map(|t| t.last_index).max(), Some(2));
    assert_eq!(txs[0].address, derive_address(&s, 7, Security::Medium));
}
