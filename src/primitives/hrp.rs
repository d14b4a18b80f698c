// Written by Clark Moody and the rust-bitcoin developers.
// SPDX-License-Identifier: MIT

//! Provides an `Hrp` type that represents the human-readable part of a bech32 encoded string.
//!
//! > The human-readable part, which is intended to convey the type of data, or anything else that
//! > is relevant to the reader. This part MUST contain 1 to 83 US-ASCII characters, with each
//! > character having a value in the range [33-126]. HRP validity may be further restricted by
//! > specific applications.
//!
//! The upper bound on the length is not checked here, it follows from the limit on the length of
//! the whole encoded string.
//!
//! ref: [BIP-173](https://github.com/bitcoin/bips/blob/master/bip-0173.mediawiki#user-content-Bech32)

use alloc::string::{String, ToString};
use core::fmt;
use core::iter::FusedIterator;
use core::str::FromStr;

/// The human-readable part (human readable prefix before the '1' separator).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Hrp<'s> {
    /// Lowercase human-readable part.
    Lower(&'s str),
    /// Uppercase human-readable part.
    Upper(&'s str),
    /// Human-readable part without any cased characters (digits and symbols only).
    Caseless(&'s str),
}

impl<'s> Hrp<'s> {
    /// Parses the human-readable part checking it is valid as defined by [BIP-173].
    ///
    /// This does _not_ check that the `hrp` is an in-use HRP within Bitcoin (eg, "bc"), it only
    /// checks that it is non-empty, that every character is in the range [33-126] and that the
    /// case is consistent.
    ///
    /// [BIP-173]: <https://github.com/bitcoin/bips/blob/master/bip-0173.mediawiki>
    pub fn parse(hrp: &'s str) -> Result<Self, Error> {
        use Error::*;

        if hrp.is_empty() {
            return Err(Empty);
        }

        let mut has_lower: bool = false;
        let mut has_upper: bool = false;
        for c in hrp.chars() {
            if !c.is_ascii() {
                return Err(NonAsciiChar(c));
            }
            let b = c as u8;
            // Valid subset of ASCII
            if !(33..=126).contains(&b) {
                return Err(InvalidAsciiByte(b));
            }

            if b.is_ascii_lowercase() {
                has_lower = true;
            } else if b.is_ascii_uppercase() {
                has_upper = true;
            };

            if has_lower && has_upper {
                return Err(MixedCase);
            }
        }

        if has_lower {
            return Ok(Hrp::Lower(hrp));
        }

        if has_upper {
            return Ok(Hrp::Upper(hrp));
        }

        Ok(Hrp::Caseless(hrp))
    }

    /// Returns a reference to the inner human-readable part, in its original case.
    pub fn as_str(&self) -> &'s str {
        match *self {
            Self::Upper(s) | Self::Lower(s) | Self::Caseless(s) => s,
        }
    }

    /// Returns the human-readable part as a lowercase string.
    pub fn to_lowercase(&self) -> String {
        match *self {
            Self::Upper(upper) => upper.to_ascii_lowercase(),
            Self::Lower(s) | Self::Caseless(s) => s.to_string(),
        }
    }

    /// True if this human-readable part contains uppercase characters.
    ///
    /// Strings encoded with an uppercase HRP are uppercase throughout.
    pub fn is_uppercase(&self) -> bool { matches!(self, Self::Upper(_)) }

    /// Creates a lowercase iterator over the bytes (ASCII characters) of this HRP.
    ///
    /// This is the form of the HRP that is fed into the checksum.
    pub fn iter(&self) -> LowercaseIter<'s> { LowercaseIter { iter: self.as_str().bytes() } }

    /// Returns the length (number of characters) of the human-readable part.
    ///
    /// Guaranteed to be at least 1.
    pub fn len(&self) -> usize { self.as_str().len() }

    /// The human-readable part is guaranteed to be non-empty.
    pub fn is_empty(&self) -> bool { false }
}

impl fmt::Display for Hrp<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { f.write_str(self.as_str()) }
}

/// Iterator over the human-readable part, as lowercase ASCII values.
pub struct LowercaseIter<'s> {
    iter: core::str::Bytes<'s>,
}

impl<'s> Iterator for LowercaseIter<'s> {
    type Item = u8;
    fn next(&mut self) -> Option<u8> { self.iter.next().map(|c| c.to_ascii_lowercase()) }

    fn size_hint(&self) -> (usize, Option<usize>) { (self.len(), Some(self.len())) }
}

impl<'s> ExactSizeIterator for LowercaseIter<'s> {
    fn len(&self) -> usize { self.iter.len() }
}

impl<'s> FusedIterator for LowercaseIter<'s> {}

/// The human-readable parts of the segwit networks as specified in [BIP-173].
///
/// Signet shares the "tb" prefix with testnet so it does not get its own entry.
///
/// [BIP-173]: <https://github.com/bitcoin/bips/blob/master/bip-0173.mediawiki>
#[derive(Copy, PartialEq, Eq, Clone, Hash, Debug)]
#[non_exhaustive]
pub enum KnownHrp {
    /// Mainnet - "bc".
    Mainnet,
    /// Testnet and signet - "tb".
    Testnet,
    /// Regtest - "bcrt".
    Regtest,
}

impl KnownHrp {
    /// Returns the lowercase prefix for this network.
    pub fn as_str(self) -> &'static str {
        use KnownHrp::*;

        match self {
            Mainnet => "bc",
            Testnet => "tb",
            Regtest => "bcrt",
        }
    }
}

/// Parses a [`KnownHrp`] from a string, accepting all-lowercase or all-uppercase input.
///
/// # Examples
///
/// ```
/// # use core::str::FromStr;
/// # use bech32_segwit::primitives::hrp::KnownHrp;
/// assert!(KnownHrp::from_str("randomvalidhrp").is_err());
/// assert_eq!(KnownHrp::from_str("bc").expect("bc is valid"), KnownHrp::Mainnet);
/// assert_eq!(KnownHrp::from_str("TB").expect("uppercase is valid also"), KnownHrp::Testnet);
/// ```
impl FromStr for KnownHrp {
    type Err = UnknownHrpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use KnownHrp::*;

        match s {
            "bc" | "BC" => Ok(Mainnet),
            "tb" | "TB" => Ok(Testnet),
            "bcrt" | "BCRT" => Ok(Regtest),
            _ => Err(UnknownHrpError(s.to_string())),
        }
    }
}

impl fmt::Display for KnownHrp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { f.write_str(self.as_str()) }
}

impl From<KnownHrp> for Hrp<'static> {
    fn from(hrp: KnownHrp) -> Self { Self::Lower(hrp.as_str()) }
}

/// Error if string is not a known segwit HRP.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownHrpError(String);

impl fmt::Display for UnknownHrpError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} is not a known segwit HRP", self.0)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for UnknownHrpError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> { None }
}

/// Errors encountered while checking the human-readable part as defined by [BIP-173].
///
/// [BIP-173]: <https://github.com/bitcoin/bips/blob/master/bip-0173.mediawiki#user-content-Bech32>
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The human-readable part is empty.
    Empty,
    /// Found a non-ASCII character.
    NonAsciiChar(char),
    /// Invalid byte (not within acceptable US-ASCII range).
    InvalidAsciiByte(u8),
    /// The human-readable part cannot mix upper and lower case.
    MixedCase,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Error::*;

        match *self {
            Empty => write!(f, "hrp is empty, must have at least 1 character"),
            NonAsciiChar(c) => write!(f, "found non-ASCII character: {}", c),
            InvalidAsciiByte(b) => write!(f, "byte value is not valid US-ASCII: \'{:x}\'", b),
            MixedCase => write!(f, "hrp cannot mix upper and lower case"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        use Error::*;

        match *self {
            Empty | NonAsciiChar(_) | InvalidAsciiByte(_) | MixedCase => None,
        }
    }
}
