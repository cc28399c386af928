// Copyright (c) 2022-2023 The MobileCoin Foundation

use core::fmt;

use zeroize::Zeroize;

use super::is_trytes;
use crate::{consts::TRYTE_ZERO, Error};

/// Fixed width tryte string
///
/// Contents are always drawn from [`TRYTE_ALPHABET`][super::TRYTE_ALPHABET],
/// shorter inputs are right-padded with `9` (zero) where padding constructors
/// are used.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Trytes<const N: usize>([u8; N]);

impl<const N: usize> Trytes<N> {
    /// All zero (`9`) trytes
    pub const fn zero() -> Self {
        Self([TRYTE_ZERO; N])
    }

    /// Create from a (possibly shorter) string, right-padding with `9`
    pub fn from_str_padded(s: &str) -> Result<Self, Error> {
        Self::from_slice_padded(s.as_bytes())
    }

    /// Create from a (possibly shorter) slice, right-padding with `9`
    pub fn from_slice_padded(s: &[u8]) -> Result<Self, Error> {
        if s.len() > N {
            return Err(Error::InvalidLength);
        }
        if !is_trytes(s) {
            return Err(Error::InvalidTryte);
        }

        let mut v = Self::zero();
        v.0[..s.len()].copy_from_slice(s);

        Ok(v)
    }

    /// Fetch raw tryte characters
    pub fn as_bytes(&self) -> &[u8; N] {
        &self.0
    }

    /// Fetch trytes as a string slice
    pub fn as_str(&self) -> &str {
        // Contents are always ASCII
        core::str::from_utf8(&self.0).unwrap_or_default()
    }

    /// Fetch the leading `M` trytes
    pub fn prefix<const M: usize>(&self) -> Result<Trytes<M>, Error> {
        if M > N {
            return Err(Error::InvalidLength);
        }

        let mut v = Trytes::<M>::zero();
        v.0.copy_from_slice(&self.0[..M]);
        Ok(v)
    }

    /// Check whether all trytes are `9`
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|c| *c == TRYTE_ZERO)
    }

    pub(crate) fn from_raw(raw: [u8; N]) -> Self {
        debug_assert!(is_trytes(&raw));
        Self(raw)
    }
}

impl<const N: usize> Default for Trytes<N> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<const N: usize> TryFrom<&[u8]> for Trytes<N> {
    type Error = Error;

    /// Create from a slice of exactly `N` tryte characters
    fn try_from(s: &[u8]) -> Result<Self, Self::Error> {
        if s.len() != N {
            return Err(Error::InvalidLength);
        }
        Self::from_slice_padded(s)
    }
}

impl<const N: usize> TryFrom<&str> for Trytes<N> {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::try_from(s.as_bytes())
    }
}

impl<const N: usize> core::str::FromStr for Trytes<N> {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s)
    }
}

impl<const N: usize> AsRef<[u8]> for Trytes<N> {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl<const N: usize> fmt::Display for Trytes<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<const N: usize> fmt::Debug for Trytes<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Trytes<{}>({})", N, self.as_str())
    }
}

impl<const N: usize> Zeroize for Trytes<N> {
    fn zeroize(&mut self) {
        self.0 = [TRYTE_ZERO; N];
    }
}
