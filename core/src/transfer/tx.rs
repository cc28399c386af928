// Copyright (c) 2022-2023 The MobileCoin Foundation

use encdec::{DecodeOwned, Encode};

use super::TxRecord;
use crate::{
    address::Address,
    consts::{
        ADDRESS_TRYTES, BUNDLE_TRYTES, INDEX_TRYTES, NONCE_TRYTES, NUM_HASH_BYTES,
        SIGNATURE_TRYTES, TAG_TRYTES, TIMESTAMP_TRYTES, TX_HASH_TRYTES, TX_TRYTES, VALUE_TRYTES,
    },
    conv::{int64_to_trytes, trytes_to_int64, Trytes},
    Error,
};

/// Transaction object, mutated in place while a bundle is prepared
///
/// ## Encoding
///
/// Records are encoded as 2673 tryte characters, fields in order:
///
/// ```text
/// | field                             | trytes |
/// |-----------------------------------|--------|
/// | signature / message fragment      |   2187 |
/// | address                           |     81 |
/// | value                             |     27 |
/// | obsolete tag                      |     27 |
/// | timestamp                         |      9 |
/// | current index                     |      9 |
/// | last index                        |      9 |
/// | bundle hash                       |     81 |
/// | trunk transaction                 |     81 |
/// | branch transaction                |     81 |
/// | tag                               |     27 |
/// | attachment timestamp              |      9 |
/// | attachment timestamp lower bound  |      9 |
/// | attachment timestamp upper bound  |      9 |
/// | nonce                             |     27 |
/// ```
///
/// Integer fields are balanced ternary, least significant tryte first.
#[derive(Clone, PartialEq, Debug)]
pub struct TxObject {
    pub signature_message_fragment: Trytes<SIGNATURE_TRYTES>,
    pub address: Address,
    pub value: i64,
    pub obsolete_tag: Trytes<TAG_TRYTES>,
    pub timestamp: u32,
    pub current_index: u32,
    pub last_index: u32,
    pub bundle: Trytes<BUNDLE_TRYTES>,
    pub trunk_transaction: Trytes<TX_HASH_TRYTES>,
    pub branch_transaction: Trytes<TX_HASH_TRYTES>,
    pub tag: Trytes<TAG_TRYTES>,
    pub attachment_timestamp: u32,
    pub attachment_timestamp_lower_bound: u32,
    pub attachment_timestamp_upper_bound: u32,
    pub nonce: Trytes<NONCE_TRYTES>,
}

impl Default for TxObject {
    /// Protocol defaults, zero (`9`) hashes and tags, zero integers
    fn default() -> Self {
        Self {
            signature_message_fragment: Trytes::zero(),
            address: Address::from_bytes([0u8; NUM_HASH_BYTES]),
            value: 0,
            obsolete_tag: Trytes::zero(),
            timestamp: 0,
            current_index: 0,
            last_index: 0,
            bundle: Trytes::zero(),
            trunk_transaction: Trytes::zero(),
            branch_transaction: Trytes::zero(),
            tag: Trytes::zero(),
            attachment_timestamp: 0,
            attachment_timestamp_lower_bound: 0,
            attachment_timestamp_upper_bound: 0,
            nonce: Trytes::zero(),
        }
    }
}

impl TxObject {
    /// Serialize to a wire record
    pub fn to_record(&self) -> Result<TxRecord, Error> {
        let mut r = [0u8; TX_TRYTES];
        self.encode(&mut r)?;
        Ok(Trytes::from_raw(r))
    }

    /// Parse a wire record
    pub fn from_record(record: &TxRecord) -> Result<Self, Error> {
        let (tx, _n) = Self::decode_owned(record.as_bytes())?;
        Ok(tx)
    }
}

/// Sequential writer over a tryte buffer
struct Writer<'a> {
    buff: &'a mut [u8],
    index: usize,
}

impl<'a> Writer<'a> {
    fn trytes(&mut self, t: &[u8]) {
        self.buff[self.index..][..t.len()].copy_from_slice(t);
        self.index += t.len();
    }

    fn int(&mut self, v: i64, width: usize) -> Result<(), Error> {
        if !int64_to_trytes(v, &mut self.buff[self.index..][..width]) {
            return Err(Error::ValueOverflow);
        }
        self.index += width;
        Ok(())
    }
}

/// Sequential reader over a tryte buffer
struct Reader<'a> {
    buff: &'a [u8],
    index: usize,
}

impl<'a> Reader<'a> {
    fn take(&mut self, width: usize) -> &'a [u8] {
        let t = &self.buff[self.index..][..width];
        self.index += width;
        t
    }

    fn trytes<const N: usize>(&mut self) -> Result<Trytes<N>, Error> {
        Trytes::try_from(self.take(N))
    }

    fn int(&mut self, width: usize) -> Result<i64, Error> {
        trytes_to_int64(self.take(width))
    }

    fn u32(&mut self, width: usize) -> Result<u32, Error> {
        u32::try_from(self.int(width)?).map_err(|_| Error::ValueOverflow)
    }
}

impl Encode for TxObject {
    type Error = Error;

    fn encode_len(&self) -> Result<usize, Self::Error> {
        Ok(TX_TRYTES)
    }

    fn encode(&self, buff: &mut [u8]) -> Result<usize, Self::Error> {
        if buff.len() < TX_TRYTES {
            return Err(Error::InvalidLength);
        }

        let mut w = Writer { buff, index: 0 };

        w.trytes(self.signature_message_fragment.as_bytes());
        w.trytes(self.address.to_trytes().as_bytes());
        w.int(self.value, VALUE_TRYTES)?;
        w.trytes(self.obsolete_tag.as_bytes());
        w.int(self.timestamp as i64, TIMESTAMP_TRYTES)?;
        w.int(self.current_index as i64, INDEX_TRYTES)?;
        w.int(self.last_index as i64, INDEX_TRYTES)?;
        w.trytes(self.bundle.as_bytes());
        w.trytes(self.trunk_transaction.as_bytes());
        w.trytes(self.branch_transaction.as_bytes());
        w.trytes(self.tag.as_bytes());
        w.int(self.attachment_timestamp as i64, TIMESTAMP_TRYTES)?;
        w.int(self.attachment_timestamp_lower_bound as i64, TIMESTAMP_TRYTES)?;
        w.int(self.attachment_timestamp_upper_bound as i64, TIMESTAMP_TRYTES)?;
        w.trytes(self.nonce.as_bytes());

        debug_assert_eq!(w.index, TX_TRYTES);

        Ok(TX_TRYTES)
    }
}

impl DecodeOwned for TxObject {
    type Output = Self;

    type Error = Error;

    fn decode_owned(buff: &[u8]) -> Result<(Self::Output, usize), Self::Error> {
        if buff.len() < TX_TRYTES {
            return Err(Error::InvalidLength);
        }

        let mut r = Reader { buff, index: 0 };

        let tx = Self {
            signature_message_fragment: r.trytes()?,
            address: Address::from_trytes(r.take(ADDRESS_TRYTES))?,
            value: r.int(VALUE_TRYTES)?,
            obsolete_tag: r.trytes()?,
            timestamp: r.u32(TIMESTAMP_TRYTES)?,
            current_index: r.u32(INDEX_TRYTES)?,
            last_index: r.u32(INDEX_TRYTES)?,
            bundle: r.trytes()?,
            trunk_transaction: r.trytes()?,
            branch_transaction: r.trytes()?,
            tag: r.trytes()?,
            attachment_timestamp: r.u32(TIMESTAMP_TRYTES)?,
            attachment_timestamp_lower_bound: r.u32(TIMESTAMP_TRYTES)?,
            attachment_timestamp_upper_bound: r.u32(TIMESTAMP_TRYTES)?,
            nonce: r.trytes()?,
        };

        Ok((tx, r.index))
    }
}
