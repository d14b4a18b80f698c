// Written by the Andrew Poelstra and the rust-bitcoin developers.
// SPDX-License-Identifier: MIT

//! Decoding of HRP strings as specified by [BIP-173] (bech32) and [BIP-350] (bech32m).
//!
//! HRP string format: `<hrp> 1 <data> <checksum>`
//!
//! * **hrp**: Human Readable Part, may itself contain '1' characters.
//! * **data**: zero or more bech32 characters.
//! * **checksum**: six bech32 characters, a BCH code checksum.
//!
//! The separator is the _last_ '1' in the string since '1' is not in the bech32 alphabet.
//!
//! [BIP-173]: <https://github.com/bitcoin/bips/blob/master/bip-0173.mediawiki>
//! [BIP-350]: <https://github.com/bitcoin/bips/blob/master/bip-0350.mediawiki>

use alloc::vec::Vec;
use core::fmt;

use crate::primitives::checksum::{self, Variant, CHECKSUM_LENGTH};
use crate::primitives::correction::Corrector;
use crate::primitives::gf32::Fe32;
use crate::primitives::hrp::{self, Hrp};

/// Separator between the hrp and payload (as defined by BIP-173).
pub const SEP: char = '1';

/// Maximum length of an encoded string, as defined by BIP-173.
pub const MAX_STRING_LENGTH: usize = 90;

/// Minimum length of an encoded string: one HRP character, the separator, and the checksum.
pub const MIN_STRING_LENGTH: usize = 1 + 1 + CHECKSUM_LENGTH;

/// An HRP string that has been parsed from an ordinary checksummed string.
///
/// Parsing checks the length, case, separator placement and every character of the string but
/// does not validate the checksum in any way, use [`Parsed::validate_checksum`] for that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parsed<'s> {
    /// The human-readable part.
    hrp: Hrp<'s>,
    /// The data part, including the trailing checksum.
    data_chk: Vec<Fe32>,
}

impl<'s> Parsed<'s> {
    /// Parses an HRP string enforcing the 90 character limit.
    pub fn new(s: &'s str) -> Result<Self, Error> { Self::parse(s, Some(MAX_STRING_LENGTH)) }

    /// Parses an HRP string without enforcing the 90 character limit (e.g. for lightning BOLT 11).
    ///
    /// All other checks are applied as for [`Parsed::new`].
    pub fn new_lenient(s: &'s str) -> Result<Self, Error> { Self::parse(s, None) }

    fn parse(s: &'s str, max_len: Option<usize>) -> Result<Self, Error> {
        check_case(s)?;

        // Ensure overall length is within bounds, counting characters rather than bytes.
        let len = s.chars().count();
        if let Some(max) = max_len {
            if len > max {
                return Err(Error::TooLong(len));
            }
        }
        if len < MIN_STRING_LENGTH {
            return Err(Error::TooShort(len));
        }

        let sep_pos = s.rfind(SEP).ok_or(Error::MissingSeparator)?;
        let (raw_hrp, raw_data) = (&s[..sep_pos], &s[sep_pos + 1..]);
        if raw_hrp.is_empty() || raw_data.chars().count() < CHECKSUM_LENGTH {
            return Err(Error::SeparatorMisplaced(raw_hrp.chars().count()));
        }

        let hrp = Hrp::parse(raw_hrp)?;
        let data_chk = raw_data
            .chars()
            .map(|c| Fe32::from_char(c).map_err(|_| Error::InvalidBech32Char(c)))
            .collect::<Result<Vec<Fe32>, Error>>()?;

        Ok(Parsed { hrp, data_chk })
    }

    /// Validates the checksum against both variants.
    ///
    /// # Returns
    ///
    /// The variant whose checksum matched. No string can be valid under both variants since their
    /// target residues differ.
    pub fn validate_checksum(&self) -> Result<Variant, Error> {
        Variant::from_residue(checksum::residue(&self.hrp, &self.data_chk))
            .ok_or(Error::InvalidChecksum)
    }

    /// Returns a context for locating errors, if the checksum is invalid for `variant`.
    ///
    /// Returns `None` if the string carries a valid `variant` checksum.
    pub fn correction_context(&self, variant: Variant) -> Option<Corrector> {
        let residue = checksum::residue(&self.hrp, &self.data_chk) ^ variant.target_residue();
        if residue == 0 {
            None
        } else {
            Some(Corrector::new(residue, self.data_chk.len()))
        }
    }

    /// Locates the characters that were substituted, assuming the string was meant to carry a
    /// `variant` checksum.
    ///
    /// # Returns
    ///
    /// The positions, counted in characters from the start of the string, of the faulty
    /// characters in ascending order. Empty if the checksum is valid. `None` if the errors cannot
    /// be located, see [`Corrector::bch_errors`].
    pub fn error_positions(&self, variant: Variant) -> Option<Vec<usize>> {
        let ctx = match self.correction_context(variant) {
            Some(ctx) => ctx,
            None => return Some(Vec::new()),
        };
        // The HRP is ASCII so its length in bytes is its length in characters.
        let last = self.hrp.len() + self.data_chk.len();
        let mut positions = ctx.bch_errors()?.map(|(idx, _)| last - idx).collect::<Vec<usize>>();
        positions.sort_unstable();
        Some(positions)
    }

    /// Returns the human-readable part, in the case it was parsed in.
    pub fn hrp(&self) -> Hrp<'s> { self.hrp }

    /// Returns the data part excluding the checksum.
    pub fn data(&self) -> &[Fe32] { &self.data_chk[..self.data_chk.len() - CHECKSUM_LENGTH] }

    /// Returns the checksum quintets.
    pub fn checksum(&self) -> &[Fe32] { &self.data_chk[self.data_chk.len() - CHECKSUM_LENGTH..] }

    /// Consumes the parsed string, returning the data part with the checksum stripped.
    pub fn into_data(mut self) -> Vec<Fe32> {
        self.data_chk.truncate(self.data_chk.len() - CHECKSUM_LENGTH);
        self.data_chk
    }
}

/// Returns the positions of the characters of `s` that are invalid where they appear.
///
/// Those are HRP characters outside US-ASCII [33-126] and data characters outside the bech32
/// alphabet, the two are told apart by the last separator. Positions count characters, not bytes.
pub fn invalid_char_positions(s: &str) -> Vec<usize> {
    let sep = s.rfind(SEP).map(|pos| s[..pos].chars().count());
    s.chars()
        .enumerate()
        .filter(|&(i, c)| match sep {
            Some(sep) if i == sep => false,
            Some(sep) if i > sep => Fe32::from_char(c).is_err(),
            _ => !c.is_ascii() || !(33..=126).contains(&(c as u8)),
        })
        .map(|(i, _)| i)
        .collect()
}

/// Checks that the whole string has consistent casing (hrp, data, and checksum).
fn check_case(s: &str) -> Result<(), Error> {
    let mut has_upper = false;
    let mut has_lower = false;
    for ch in s.chars() {
        if ch.is_ascii_uppercase() {
            has_upper = true;
        } else if ch.is_ascii_lowercase() {
            has_lower = true;
        }
        if has_upper && has_lower {
            return Err(Error::MixedCase);
        }
    }
    Ok(())
}

/// Errors types for Bech32 (hrpstring) decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// Human-readable part is invalid.
    InvalidHrp(hrp::Error),
    /// The whole string must be of one case.
    MixedCase,
    /// The string is longer than 90 characters, holds the length in characters.
    TooLong(usize),
    /// The string is too short to hold an HRP, the separator and a checksum.
    TooShort(usize),
    /// String does not contain the separator character.
    MissingSeparator,
    /// The separator leaves an empty HRP or fewer than six data characters.
    SeparatorMisplaced(usize),
    /// Some part of the string contains a character that is not a valid bech32 character.
    InvalidBech32Char(char),
    /// The checksum is valid for neither bech32 nor bech32m.
    InvalidChecksum,
}

impl From<hrp::Error> for Error {
    fn from(e: hrp::Error) -> Self { Error::InvalidHrp(e) }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Error::*;

        match *self {
            InvalidHrp(ref e) => write_err!(f, "invalid human-readable part"; e),
            MixedCase => write!(f, "mixed-case strings not allowed"),
            TooLong(len) => write!(
                f,
                "string is too long, found {} characters, must be <= {}",
                len, MAX_STRING_LENGTH
            ),
            TooShort(len) => write!(
                f,
                "string is too short, found {} characters, must be >= {}",
                len, MIN_STRING_LENGTH
            ),
            MissingSeparator => write!(f, "missing human-readable separator, \"{}\"", SEP),
            SeparatorMisplaced(pos) =>
                write!(f, "separator at position {} leaves no room for the hrp or checksum", pos),
            InvalidBech32Char(c) => write!(f, "invalid bech32 character {:?}", c),
            InvalidChecksum => write!(f, "invalid checksum"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        use Error::*;

        match *self {
            InvalidHrp(ref e) => Some(e),
            MixedCase
            | TooLong(_)
            | TooShort(_)
            | MissingSeparator
            | SeparatorMisplaced(_)
            | InvalidBech32Char(_)
            | InvalidChecksum => None,
        }
    }
}
