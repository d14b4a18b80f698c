// Written by Clark Moody and the rust-bitcoin developers.
// SPDX-License-Identifier: MIT

//! Encoding and decoding of the Bech32 format.
//!
//! Bech32 is an encoding scheme that is easy to use for humans and efficient to encode in QR codes.
//!
//! A Bech32 string consists of a human-readable part (HRP), a separator (the character `'1'`), and
//! a data part. A checksum at the end of the string provides error detection to prevent mistakes
//! when the string is written off or read out loud.
//!
//! Two checksum algorithms exist: the original bech32 defined in [BIP-173] and the improved
//! bech32m defined in [BIP-350]. Decoding determines which one a string uses.
//!
//! The [`segwit`] module builds segregated witness addresses on top of the generic codec.
//!
//! # Examples
//!
//! ```
//! use bech32_segwit::Variant;
//!
//! let encoded = bech32_segwit::encode("bech32", &[0x00, 0x01, 0x02], Variant::Bech32)
//!     .expect("valid hrp and data");
//! assert_eq!(encoded, "bech321qpz4nc4pe");
//!
//! let (hrp, data, variant) = bech32_segwit::decode(&encoded).expect("valid string");
//! assert_eq!(hrp, "bech32");
//! assert_eq!(data.iter().map(|fe| fe.to_u8()).collect::<Vec<u8>>(), vec![0x00, 0x01, 0x02]);
//! assert_eq!(variant, Variant::Bech32);
//! ```
//!
//! [BIP-173]: <https://github.com/bitcoin/bips/blob/master/bip-0173.mediawiki>
//! [BIP-350]: <https://github.com/bitcoin/bips/blob/master/bip-0350.mediawiki>

#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]
// Coding conventions
#![deny(missing_docs)]
#![deny(non_upper_case_globals)]
#![deny(non_camel_case_types)]
#![deny(non_snake_case)]
#![deny(unused_mut)]

extern crate alloc;

#[macro_use]
mod error;
pub mod primitives;
pub mod segwit;

use alloc::string::String;
use alloc::vec::Vec;
use core::convert::TryFrom;
use core::fmt;

use crate::primitives::checksum::{self, CHECKSUM_LENGTH};
use crate::primitives::gf32;
use crate::primitives::hrp;
use crate::primitives::hrpstring::{Parsed, SEP};

#[rustfmt::skip]                // Keep public re-exports separate.
#[doc(inline)]
pub use {
    crate::primitives::checksum::Variant,
    crate::primitives::convert::convert_bits,
    crate::primitives::gf32::Fe32,
    crate::primitives::hrp::Hrp,
    crate::primitives::hrpstring::{Error as DecodeError, MAX_STRING_LENGTH, MIN_STRING_LENGTH},
};

/// Encodes `data` as a bech32 string with the given human-readable part and checksum `variant`.
///
/// Every element of `data` must be a quintet, i.e. less than 32. The output is uppercase if `hrp`
/// is uppercase and lowercase otherwise.
///
/// # Errors
///
/// * The HRP is empty, contains characters outside US-ASCII [33-126], or mixes case.
/// * The encoded string would be longer than 90 characters.
/// * Some data value is 32 or greater.
pub fn encode(hrp: &str, data: &[u8], variant: Variant) -> Result<String, EncodeError> {
    let hrp = Hrp::parse(hrp)?;
    check_encoded_length(&hrp, data.len())?;

    let data = data.iter().map(|&v| Fe32::try_from(v)).collect::<Result<Vec<Fe32>, _>>()?;
    Ok(encode_unchecked(&hrp, &data, variant))
}

/// Encodes already range-checked quintets as a bech32 string.
///
/// # Errors
///
/// If the encoded string would be longer than 90 characters.
pub fn encode_fes(hrp: Hrp, data: &[Fe32], variant: Variant) -> Result<String, EncodeError> {
    check_encoded_length(&hrp, data.len())?;
    Ok(encode_unchecked(&hrp, data, variant))
}

/// Encodes quintets whose encoded length has already been checked.
fn encode_unchecked(hrp: &Hrp, data: &[Fe32], variant: Variant) -> String {
    let checksum = checksum::create_checksum(hrp, data, variant);
    let mut encoded = String::with_capacity(hrp.len() + 1 + data.len() + CHECKSUM_LENGTH);
    encoded.push_str(hrp.as_str());
    encoded.push(SEP);
    let upper = hrp.is_uppercase();
    for fe in data.iter().chain(checksum.iter()) {
        let c = fe.to_char();
        encoded.push(if upper { c.to_ascii_uppercase() } else { c });
    }
    encoded
}

/// Decodes a bech32 string, detecting which checksum variant it uses.
///
/// # Returns
///
/// The lowercase human-readable part, the data quintets with the checksum removed, and the
/// checksum variant.
///
/// # Errors
///
/// If the string is malformed (see [`DecodeError`]) or its checksum is valid for neither variant.
pub fn decode(s: &str) -> Result<(String, Vec<Fe32>, Variant), DecodeError> {
    finish_decode(Parsed::new(s)?)
}

/// Decodes a bech32 string without enforcing the 90 character limit.
///
/// Intended for protocols such as lightning BOLT 11 whose strings exceed the limit, all other
/// checks are applied as for [`decode`].
pub fn decode_lenient(s: &str) -> Result<(String, Vec<Fe32>, Variant), DecodeError> {
    finish_decode(Parsed::new_lenient(s)?)
}

fn finish_decode(parsed: Parsed) -> Result<(String, Vec<Fe32>, Variant), DecodeError> {
    let variant = parsed.validate_checksum()?;
    let hrp = parsed.hrp().to_lowercase();
    Ok((hrp, parsed.into_data(), variant))
}

/// Checks that `hrp`, the separator, `data_len` quintets and the checksum fit in 90 characters.
fn check_encoded_length(hrp: &Hrp, data_len: usize) -> Result<(), EncodeError> {
    let len = hrp.len() + 1 + data_len + CHECKSUM_LENGTH;
    if len > MAX_STRING_LENGTH {
        return Err(EncodeError::TooLong(len));
    }
    Ok(())
}

/// An error while encoding a bech32 string.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EncodeError {
    /// Human-readable part is invalid.
    Hrp(hrp::Error),
    /// The encoded string would exceed 90 characters.
    TooLong(usize),
    /// Some data value is not a quintet.
    InvalidDataValue(gf32::TryFromError),
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use EncodeError::*;

        match *self {
            Hrp(ref e) => write_err!(f, "invalid human-readable part"; e),
            TooLong(len) => write!(
                f,
                "encoded string would be {} characters long, must be <= {}",
                len, MAX_STRING_LENGTH
            ),
            InvalidDataValue(ref e) => write_err!(f, "invalid data"; e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EncodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        use EncodeError::*;

        match *self {
            Hrp(ref e) => Some(e),
            InvalidDataValue(ref e) => Some(e),
            TooLong(_) => None,
        }
    }
}

impl From<hrp::Error> for EncodeError {
    fn from(e: hrp::Error) -> Self { EncodeError::Hrp(e) }
}

impl From<gf32::TryFromError> for EncodeError {
    fn from(e: gf32::TryFromError) -> Self { EncodeError::InvalidDataValue(e) }
}
