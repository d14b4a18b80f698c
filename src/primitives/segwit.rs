// SPDX-License-Identifier: MIT

//! Segregated Witness functionality - useful for enforcing parts of [`BIP-173`] and [`BIP-350`].
//!
//! [BIP-173]: <https://github.com/bitcoin/bips/blob/master/bip-0173.mediawiki>
//! [BIP-350]: <https://github.com/bitcoin/bips/blob/master/bip-0350.mediawiki>

use core::convert::TryFrom;
use core::fmt;

use crate::primitives::checksum::Variant;
use crate::primitives::gf32::Fe32;

/// The minimum witness program length, in bytes.
pub const MIN_WITNESS_PROGRAM_LENGTH: usize = 2;

/// The maximum witness program length, in bytes.
pub const MAX_WITNESS_PROGRAM_LENGTH: usize = 40;

/// Version of a segwit output, the first data character of a segwit address.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum WitnessVersion {
    /// Initial version, P2WPKH and P2WSH outputs.
    V0 = 0,
    /// Version 1, taproot.
    V1 = 1,
    /// Version 2.
    V2 = 2,
    /// Version 3.
    V3 = 3,
    /// Version 4.
    V4 = 4,
    /// Version 5.
    V5 = 5,
    /// Version 6.
    V6 = 6,
    /// Version 7.
    V7 = 7,
    /// Version 8.
    V8 = 8,
    /// Version 9.
    V9 = 9,
    /// Version 10.
    V10 = 10,
    /// Version 11.
    V11 = 11,
    /// Version 12.
    V12 = 12,
    /// Version 13.
    V13 = 13,
    /// Version 14.
    V14 = 14,
    /// Version 15.
    V15 = 15,
    /// Version 16.
    V16 = 16,
}

impl WitnessVersion {
    /// Returns the witness version as a number.
    pub fn to_num(self) -> u8 { self as u8 }

    /// Returns the witness version as the quintet that leads the address data.
    pub fn to_fe(self) -> Fe32 { Fe32::from_low_5_bits(self.to_num()) }

    /// The checksum variant an address of this version must use.
    ///
    /// BIP-350: "Version 0 outputs (specifically, P2WPKH and P2WSH addresses) continue to use
    /// Bech32 as specified in BIP173. Addresses for segregated witness outputs version 1 through
    /// 16 use Bech32m."
    pub fn variant(self) -> Variant {
        match self {
            WitnessVersion::V0 => Variant::Bech32,
            _ => Variant::Bech32m,
        }
    }
}

impl fmt::Display for WitnessVersion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { fmt::Display::fmt(&self.to_num(), f) }
}

impl From<WitnessVersion> for u8 {
    fn from(version: WitnessVersion) -> u8 { version.to_num() }
}

impl TryFrom<u8> for WitnessVersion {
    type Error = InvalidWitnessVersionError;

    fn try_from(num: u8) -> Result<Self, Self::Error> {
        use WitnessVersion::*;

        Ok(match num {
            0 => V0,
            1 => V1,
            2 => V2,
            3 => V3,
            4 => V4,
            5 => V5,
            6 => V6,
            7 => V7,
            8 => V8,
            9 => V9,
            10 => V10,
            11 => V11,
            12 => V12,
            13 => V13,
            14 => V14,
            15 => V15,
            16 => V16,
            invalid => return Err(InvalidWitnessVersionError(invalid)),
        })
    }
}

impl TryFrom<Fe32> for WitnessVersion {
    type Error = InvalidWitnessVersionError;

    fn try_from(fe: Fe32) -> Result<Self, Self::Error> { Self::try_from(fe.to_u8()) }
}

#[cfg(feature = "serde")]
impl serde::Serialize for WitnessVersion {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.to_num())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for WitnessVersion {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let num = <u8 as serde::Deserialize>::deserialize(deserializer)?;
        WitnessVersion::try_from(num).map_err(serde::de::Error::custom)
    }
}

/// Returns true if `length` represents a valid witness program length for `witness_version`.
pub fn is_valid_witness_program_length(length: usize, witness_version: WitnessVersion) -> bool {
    validate_witness_program_length(length, witness_version).is_ok()
}

/// Validates the segwit witness program `length` rules for witness `version`.
///
/// Every program is 2 to 40 bytes long, a version 0 program is exactly 20 (P2WPKH) or 32 (P2WSH)
/// bytes long. ref: [BIP-141](https://github.com/bitcoin/bips/blob/master/bip-0141.mediawiki#user-content-Witness_program)
pub fn validate_witness_program_length(
    length: usize,
    version: WitnessVersion,
) -> Result<(), WitnessLengthError> {
    use WitnessLengthError::*;

    if length < MIN_WITNESS_PROGRAM_LENGTH {
        return Err(TooShort(length));
    }
    if length > MAX_WITNESS_PROGRAM_LENGTH {
        return Err(TooLong(length));
    }
    if version == WitnessVersion::V0 && length != 20 && length != 32 {
        return Err(InvalidSegwitV0(length));
    }
    Ok(())
}

/// Number does not represent a valid witness version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidWitnessVersionError(pub(crate) u8);

impl InvalidWitnessVersionError {
    /// Returns the number that is not a valid witness version.
    pub fn invalid_version(&self) -> u8 { self.0 }
}

impl fmt::Display for InvalidWitnessVersionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "invalid witness version {}, must be between 0 and 16 inclusive", self.0)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InvalidWitnessVersionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> { None }
}

/// Witness program invalid because of incorrect length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum WitnessLengthError {
    /// The witness data is too short.
    TooShort(usize),
    /// The witness data is too long.
    TooLong(usize),
    /// The segwit v0 witness is not 20 or 32 bytes long.
    InvalidSegwitV0(usize),
}

impl fmt::Display for WitnessLengthError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use WitnessLengthError::*;

        match *self {
            TooShort(len) => write!(f, "witness program is {} bytes long, less than 2", len),
            TooLong(len) => write!(f, "witness program is {} bytes long, more than 40", len),
            InvalidSegwitV0(len) =>
                write!(f, "the segwit v0 witness is {} bytes long, not 20 or 32", len),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for WitnessLengthError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        use WitnessLengthError::*;

        match *self {
            TooShort(_) | TooLong(_) | InvalidSegwitV0(_) => None,
        }
    }
}
