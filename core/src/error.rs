// Copyright (c) 2022-2023 The MobileCoin Foundation

/// Signing core errors
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "thiserror", derive(thiserror::Error))]
#[repr(u8)]
pub enum Error {
    /// Security level outside of [1, 3]
    #[cfg_attr(feature = "thiserror", error("Invalid security level"))]
    InvalidSecurity = 0x00,

    /// Invalid argument length
    #[cfg_attr(feature = "thiserror", error("Invalid argument length"))]
    InvalidLength = 0x01,

    /// Character outside of the tryte alphabet
    #[cfg_attr(feature = "thiserror", error("Invalid tryte character"))]
    InvalidTryte = 0x02,

    /// Bundle exceeds [`MAX_TXS`][crate::consts::MAX_TXS] transactions
    #[cfg_attr(feature = "thiserror", error("Too many transactions in bundle"))]
    TooManyTransactions = 0x03,

    /// Bundle has no transactions
    #[cfg_attr(feature = "thiserror", error("Bundle contains no transactions"))]
    EmptyBundle = 0x04,

    /// Operation invoked out of order
    #[cfg_attr(feature = "thiserror", error("invalid state"))]
    InvalidState = 0x05,

    /// Message does not fit in a single fragment
    #[cfg_attr(feature = "thiserror", error("message exceeds fragment length"))]
    MessageTooLong = 0x06,

    /// Transfer amount exceeds input balance
    #[cfg_attr(feature = "thiserror", error("insufficient balance"))]
    InsufficientBalance = 0x07,

    /// Value not representable as a signed 64-bit integer
    #[cfg_attr(feature = "thiserror", error("value overflow"))]
    ValueOverflow = 0x08,

    /// Key index overflow
    #[cfg_attr(feature = "thiserror", error("key index overflow"))]
    IndexOverflow = 0x09,

    /// Address checksum mismatch
    #[cfg_attr(feature = "thiserror", error("invalid address checksum"))]
    InvalidChecksum = 0x0a,
}

impl From<encdec::Error> for Error {
    fn from(_e: encdec::Error) -> Self {
        Error::InvalidLength
    }
}
