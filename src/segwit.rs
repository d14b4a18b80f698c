// Written by the rust-bitcoin developers.
// SPDX-License-Identifier: MIT

//! Encoding and decoding of addresses for segregated witness outputs.
//!
//! A segwit address is a restricted form of bech32 defined in [BIP-173] and [BIP-350]. The first
//! data character is the witness version, the remaining characters are the witness program
//! regrouped from bytes into quintets.
//!
//! From [BIP-350]:
//!
//! > To generate an address for a segregated witness output:
//! >
//! > * If its witness version is 0, encode it using Bech32.
//! > * If its witness version is 1 or higher, encode it using Bech32m.
//!
//! Decoding enforces the same rule, a version 0 address checksummed with bech32m (or a later
//! version checksummed with bech32) is rejected.
//!
//! # Examples
//!
//! ```
//! use bech32_segwit::segwit::{self, KnownHrp, WitnessVersion};
//!
//! // Works for segwit version 0 addresses.
//! let addr = "bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4";
//! let (witness_version, program) = segwit::decode("bc", addr).expect("valid address");
//! assert_eq!(witness_version, WitnessVersion::V0);
//! assert_eq!(segwit::encode(KnownHrp::Mainnet.as_str(), 0, &program), Ok(addr.to_string()));
//!
//! // Works for taproot (segwit version 1) addresses.
//! let addr = "bc1p0xlxvlhemja6c4dqv22uapctqupfhlxm9h8z3k2e72q4k9hcz7vqzk5jj0";
//! let (witness_version, program) = segwit::decode("bc", addr).expect("valid address");
//! assert_eq!(witness_version, WitnessVersion::V1);
//! assert_eq!(segwit::encode("bc", 1, &program), Ok(addr.to_string()));
//! ```
//!
//! [BIP-173]: <https://github.com/bitcoin/bips/blob/master/bip-0173.mediawiki>
//! [BIP-350]: <https://github.com/bitcoin/bips/blob/master/bip-0350.mediawiki>

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::convert::TryFrom;
use core::fmt;

use crate::primitives::checksum::{Variant, CHECKSUM_LENGTH};
use crate::primitives::convert::{self, bytes_to_fes, fes_to_bytes};
use crate::primitives::hrp::Hrp;
use crate::primitives::hrpstring;

#[rustfmt::skip]                // Keep public re-exports separate.
#[doc(inline)]
pub use {
    crate::primitives::hrp::KnownHrp,
    crate::primitives::segwit::{
        InvalidWitnessVersionError, WitnessLengthError, WitnessVersion,
        MAX_WITNESS_PROGRAM_LENGTH, MIN_WITNESS_PROGRAM_LENGTH,
    },
};

/// Opcode pushing the number 1 onto the stack, `OP_1..=OP_16` are contiguous.
const OP_1: u8 = 0x51;

/// Opcode pushing an empty array, used for witness version 0.
const OP_0: u8 = 0x00;

/// Encodes a segwit address.
///
/// The checksum variant is implied by `witness_version`: bech32 for version 0, bech32m otherwise.
///
/// # Errors
///
/// * `witness_version` is not in the range 0..=16.
/// * `program` is not 2 to 40 bytes long, or not 20 or 32 bytes long for version 0.
/// * `hrp` is invalid or the address would be longer than 90 characters.
pub fn encode(hrp: &str, witness_version: u8, program: &[u8]) -> Result<String, EncodeError> {
    let version = WitnessVersion::try_from(witness_version)?;
    crate::primitives::segwit::validate_witness_program_length(program.len(), version)?;

    let hrp = Hrp::parse(hrp).map_err(crate::EncodeError::from)?;

    let mut data = Vec::with_capacity(1 + (program.len() * 8 + 4) / 5);
    data.push(version.to_fe());
    data.extend(bytes_to_fes(program));

    Ok(crate::encode_fes(hrp, &data, version.variant())?)
}

/// Decodes a segwit address, checking that it was created for the network prefix `hrp`.
///
/// `hrp` is compared case-insensitively.
///
/// # Returns
///
/// The witness version and the witness program. Note that the witness version is _not_ present in
/// the program.
///
/// # Errors
///
/// If the address is not valid bech32, is for another human-readable part, or does not follow the
/// segwit rules for witness version, checksum variant, padding, and program length.
pub fn decode(hrp: &str, address: &str) -> Result<(WitnessVersion, Vec<u8>), DecodeError> {
    let (found, data, variant) = crate::decode(address)?;

    if !found.eq_ignore_ascii_case(hrp) {
        return Err(DecodeError::HrpMismatch { expected: hrp.to_string(), found });
    }

    let (first, rest) = data.split_first().ok_or(DecodeError::MissingWitnessVersion)?;
    let version = WitnessVersion::try_from(*first)?;
    if version.variant() != variant {
        return Err(DecodeError::VariantMismatch { version, variant });
    }

    let program = fes_to_bytes(rest)?;
    crate::primitives::segwit::validate_witness_program_length(program.len(), version)?;

    Ok((version, program))
}

/// Decodes a segwit address as [`decode`] does, on failure also locating the characters at fault.
///
/// Characters are located for invalid characters, a misplaced separator, an out of range witness
/// version (the version character), bad padding (the last character before the checksum), and
/// a failed checksum when exactly one character was substituted.
///
/// # Examples
///
/// ```
/// use bech32_segwit::segwit;
///
/// // The 'q' at position 10 was mistyped as an 'x'.
/// let err = segwit::check("bc", "bc1qw508d6xejxtdg4y5r3zarvary0c5xw7kv8f3t4").unwrap_err();
/// assert_eq!(err.positions(), &[10]);
/// ```
pub fn check(hrp: &str, address: &str) -> Result<(WitnessVersion, Vec<u8>), CheckError> {
    decode(hrp, address).map_err(|error| {
        let positions = error_positions(address, &error);
        CheckError { error, positions }
    })
}

/// Returns the positions, in characters, of the characters of `address` that caused `error`.
fn error_positions(address: &str, error: &DecodeError) -> Vec<usize> {
    use hrpstring::Error as Bech32Error;

    match *error {
        DecodeError::Bech32(Bech32Error::InvalidHrp(_))
        | DecodeError::Bech32(Bech32Error::InvalidBech32Char(_)) =>
            hrpstring::invalid_char_positions(address),
        DecodeError::Bech32(Bech32Error::SeparatorMisplaced(pos)) => vec![pos],
        DecodeError::Bech32(Bech32Error::InvalidChecksum) => locate_substitutions(address),
        DecodeError::VariantMismatch { version, .. } => hrpstring::Parsed::new(address)
            .ok()
            .and_then(|parsed| parsed.error_positions(version.variant()))
            .unwrap_or_default(),
        // Past the bech32 layer the address is known to be ASCII and to contain the separator.
        DecodeError::WitnessVersion(_) => match address.rfind(hrpstring::SEP) {
            Some(sep) => vec![sep + 1],
            None => Vec::new(),
        },
        DecodeError::Padding(_) => vec![address.len() - 1 - CHECKSUM_LENGTH],
        _ => Vec::new(),
    }
}

/// Locates a single substituted character in an address whose checksum failed.
///
/// Tries the variant implied by the witness version character first, since the substituted
/// character may well be the witness version itself.
fn locate_substitutions(address: &str) -> Vec<usize> {
    let parsed = match hrpstring::Parsed::new(address) {
        Ok(parsed) => parsed,
        Err(_) => return Vec::new(),
    };
    let variants = match parsed.data().first() {
        Some(fe) if fe.to_u8() != 0 => [Variant::Bech32m, Variant::Bech32],
        _ => [Variant::Bech32, Variant::Bech32m],
    };
    variants.iter().find_map(|&v| parsed.error_positions(v)).unwrap_or_default()
}

/// A witness version paired with a witness program of valid length.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WitnessProgram {
    version: WitnessVersion,
    program: Vec<u8>,
}

impl WitnessProgram {
    /// Creates a new witness program, checking the program length against `version`.
    pub fn new(version: WitnessVersion, program: Vec<u8>) -> Result<Self, WitnessLengthError> {
        crate::primitives::segwit::validate_witness_program_length(program.len(), version)?;
        Ok(WitnessProgram { version, program })
    }

    /// Returns the witness version.
    pub fn version(&self) -> WitnessVersion { self.version }

    /// Returns the witness program.
    pub fn program(&self) -> &[u8] { &self.program }

    /// Consumes the witness program, returning the version and program bytes.
    pub fn into_parts(self) -> (WitnessVersion, Vec<u8>) { (self.version, self.program) }

    /// Encodes this witness program as an address for the network prefix `hrp`.
    pub fn to_address(&self, hrp: &str) -> Result<String, EncodeError> {
        encode(hrp, self.version.to_num(), &self.program)
    }

    /// Decodes an address for the network prefix `hrp`, see [`decode`].
    pub fn from_address(hrp: &str, address: &str) -> Result<Self, DecodeError> {
        let (version, program) = decode(hrp, address)?;
        Ok(WitnessProgram { version, program })
    }

    /// Returns the output script locking to this witness program.
    ///
    /// The script is the version opcode (`OP_0` or `OP_1` to `OP_16`), a push of the program
    /// length, and the program itself.
    pub fn script_pubkey(&self) -> Vec<u8> {
        let opcode = match self.version {
            WitnessVersion::V0 => OP_0,
            v => OP_1 + v.to_num() - 1,
        };
        let mut script = Vec::with_capacity(2 + self.program.len());
        script.push(opcode);
        script.push(self.program.len() as u8);
        script.extend_from_slice(&self.program);
        script
    }

    /// Parses an output script of the form produced by [`WitnessProgram::script_pubkey`].
    pub fn from_script_pubkey(script: &[u8]) -> Result<Self, ScriptPubkeyError> {
        if script.len() < 2 + MIN_WITNESS_PROGRAM_LENGTH {
            return Err(ScriptPubkeyError::TooShort(script.len()));
        }

        let declared = usize::from(script[1]);
        let actual = script.len() - 2;
        if declared != actual {
            return Err(ScriptPubkeyError::InvalidLengthByte { declared, actual });
        }

        let version = match script[0] {
            OP_0 => WitnessVersion::V0,
            op @ OP_1..=0x60 => WitnessVersion::try_from(op - OP_1 + 1)
                .map_err(|_| ScriptPubkeyError::InvalidVersionOpcode(op))?,
            op => return Err(ScriptPubkeyError::InvalidVersionOpcode(op)),
        };

        Ok(WitnessProgram::new(version, script[2..].to_vec())?)
    }
}

/// An error while encoding a segwit address.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EncodeError {
    /// Invalid witness version (must be 0-16 inclusive).
    WitnessVersion(InvalidWitnessVersionError),
    /// Invalid witness length.
    WitnessLength(WitnessLengthError),
    /// Error while encoding the bech32 string.
    Bech32(crate::EncodeError),
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use EncodeError::*;

        match *self {
            WitnessVersion(ref e) => write_err!(f, "witness version"; e),
            WitnessLength(ref e) => write_err!(f, "witness length"; e),
            Bech32(ref e) => write_err!(f, "bech32 encoding"; e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EncodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        use EncodeError::*;

        match *self {
            WitnessVersion(ref e) => Some(e),
            WitnessLength(ref e) => Some(e),
            Bech32(ref e) => Some(e),
        }
    }
}

impl From<InvalidWitnessVersionError> for EncodeError {
    fn from(e: InvalidWitnessVersionError) -> Self { EncodeError::WitnessVersion(e) }
}

impl From<WitnessLengthError> for EncodeError {
    fn from(e: WitnessLengthError) -> Self { EncodeError::WitnessLength(e) }
}

impl From<crate::EncodeError> for EncodeError {
    fn from(e: crate::EncodeError) -> Self { EncodeError::Bech32(e) }
}

/// An error while decoding a segwit address.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecodeError {
    /// The address is not a valid bech32 string.
    Bech32(hrpstring::Error),
    /// The address is for a different human-readable part.
    HrpMismatch {
        /// The human-readable part the caller asked for.
        expected: String,
        /// The human-readable part of the address, lowercased.
        found: String,
    },
    /// The data part is empty, there is no witness version.
    MissingWitnessVersion,
    /// Invalid witness version (must be 0-16 inclusive).
    WitnessVersion(InvalidWitnessVersionError),
    /// The checksum variant does not match the one required by the witness version.
    VariantMismatch {
        /// The witness version of the address.
        version: WitnessVersion,
        /// The checksum variant the address was encoded with.
        variant: Variant,
    },
    /// The witness program quintets do not convert cleanly to bytes.
    Padding(convert::Error),
    /// Invalid witness length.
    WitnessLength(WitnessLengthError),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use DecodeError::*;

        match *self {
            Bech32(ref e) => write_err!(f, "bech32 decoding"; e),
            HrpMismatch { ref expected, ref found } => write!(
                f,
                "human-readable part mismatch, expected {} found {}",
                expected, found
            ),
            MissingWitnessVersion => write!(f, "the witness version is missing"),
            WitnessVersion(ref e) => write_err!(f, "witness version"; e),
            VariantMismatch { version, variant } => write!(
                f,
                "witness version {} must use {} but the address uses {}",
                version,
                version.variant(),
                variant
            ),
            Padding(ref e) => write_err!(f, "witness program padding"; e),
            WitnessLength(ref e) => write_err!(f, "witness length"; e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        use DecodeError::*;

        match *self {
            Bech32(ref e) => Some(e),
            WitnessVersion(ref e) => Some(e),
            Padding(ref e) => Some(e),
            WitnessLength(ref e) => Some(e),
            HrpMismatch { .. } | MissingWitnessVersion | VariantMismatch { .. } => None,
        }
    }
}

impl From<hrpstring::Error> for DecodeError {
    fn from(e: hrpstring::Error) -> Self { DecodeError::Bech32(e) }
}

impl From<InvalidWitnessVersionError> for DecodeError {
    fn from(e: InvalidWitnessVersionError) -> Self { DecodeError::WitnessVersion(e) }
}

impl From<convert::Error> for DecodeError {
    fn from(e: convert::Error) -> Self { DecodeError::Padding(e) }
}

impl From<WitnessLengthError> for DecodeError {
    fn from(e: WitnessLengthError) -> Self { DecodeError::WitnessLength(e) }
}

/// A segwit decoding error together with the positions of the characters that caused it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckError {
    error: DecodeError,
    positions: Vec<usize>,
}

impl CheckError {
    /// Returns the decoding error.
    pub fn error(&self) -> &DecodeError { &self.error }

    /// Returns the positions of the faulty characters, counted in characters from the start of
    /// the address.
    ///
    /// Empty if the error is not tied to particular characters or they could not be located.
    pub fn positions(&self) -> &[usize] { &self.positions }

    /// Consumes the error, returning the decoding error.
    pub fn into_error(self) -> DecodeError { self.error }
}

impl fmt::Display for CheckError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.positions.is_empty() {
            write_err!(f, "invalid segwit address"; self.error)
        } else {
            write_err!(f, "invalid segwit address, check the characters at {:?}", self.positions; self.error)
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CheckError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> { Some(&self.error) }
}

impl From<CheckError> for DecodeError {
    fn from(e: CheckError) -> Self { e.error }
}

/// An output script that is not a witness program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScriptPubkeyError {
    /// The script is too short to hold a version opcode, a length and a program.
    TooShort(usize),
    /// The length byte does not match the number of bytes that follow it.
    InvalidLengthByte {
        /// The length pushed by the script.
        declared: usize,
        /// The number of bytes after the length byte.
        actual: usize,
    },
    /// The first opcode is not `OP_0` or `OP_1` to `OP_16`.
    InvalidVersionOpcode(u8),
    /// Invalid witness length.
    WitnessLength(WitnessLengthError),
}

impl fmt::Display for ScriptPubkeyError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use ScriptPubkeyError::*;

        match *self {
            TooShort(len) => write!(f, "script is {} bytes long, too short for a witness program", len),
            InvalidLengthByte { declared, actual } =>
                write!(f, "script pushes {} bytes but {} bytes follow", declared, actual),
            InvalidVersionOpcode(op) => write!(f, "opcode {:#04x} is not a witness version", op),
            WitnessLength(ref e) => write_err!(f, "witness length"; e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ScriptPubkeyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        use ScriptPubkeyError::*;

        match *self {
            WitnessLength(ref e) => Some(e),
            TooShort(_) | InvalidLengthByte { .. } | InvalidVersionOpcode(_) => None,
        }
    }
}

impl From<WitnessLengthError> for ScriptPubkeyError {
    fn from(e: WitnessLengthError) -> Self { ScriptPubkeyError::WitnessLength(e) }
}
