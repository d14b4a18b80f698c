// Written by Clark Moody and the rust-bitcoin developers.
// SPDX-License-Identifier: MIT

//! The quintet, an integer in the range `0..32`.
//!
//! Every character of a bech32 data part encodes exactly one quintet. The type maintains the
//! invariant that its inner value is never greater than 31, so anything holding an [`Fe32`] has
//! already been range checked.
//!
//! Quintets are also the elements of the field GF32, which is the base field of the bech32
//! checksum code. The arithmetic here is what error location is built on.

use core::convert::TryFrom;
use core::{fmt, ops};

/// Encoding character set. Maps data value -> char
const CHARS_LOWER: [char; 32] = [
    'q', 'p', 'z', 'r', 'y', '9', 'x', '8', //  +0
    'g', 'f', '2', 't', 'v', 'd', 'w', '0', //  +8
    's', '3', 'j', 'n', '5', '4', 'k', 'h', // +16
    'c', 'e', '6', 'm', 'u', 'a', '7', 'l', // +24
];

/// Mapping from bech32 character (either case) to numeric value.
#[rustfmt::skip]
const CHARS_INV: [i8; 128] = [
    -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
    -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
    -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
    15, -1, 10, 17, 21, 20, 26, 30,  7,  5, -1, -1, -1, -1, -1, -1,
    -1, 29, -1, 24, 13, 25,  9,  8, 23, -1, 18, 22, 31, 27, 19, -1,
     1,  0,  3, 16, 11, 28, 12, 14,  6,  4,  2, -1, -1, -1, -1, -1,
    -1, 29, -1, 24, 13, 25,  9,  8, 23, -1, 18, 22, 31, 27, 19, -1,
     1,  0,  3, 16, 11, 28, 12, 14,  6,  4,  2, -1, -1, -1, -1, -1,
];

/// Logarithm table of each bech32 element, as a power of alpha = Z.
///
/// Includes Q as 0 but this is false; you need to exclude Q because it has no discrete log.
#[rustfmt::skip]
const LOG: [isize; 32] = [
     0,  0,  1, 14,  2, 28, 15, 22,
     3,  5, 29, 26, 16,  7, 23, 11,
     4, 25,  6, 10, 30, 13, 27, 21,
    17, 18,  8, 19, 24,  9, 12, 20,
];

/// Mapping of powers of 2 to the numeric value of the element.
#[rustfmt::skip]
const LOG_INV: [u8; 31] = [
     1,  2,  4,  8, 16,  9, 18, 13,
    26, 29, 19, 15, 30, 21,  3,  6,
    12, 24, 25, 27, 31, 23,  7, 14,
    28, 17, 11, 22,  5, 10, 20,
];

/// An integer in the range `0..32`, i.e. a single bech32 data character.
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fe32(u8);

impl Fe32 {
    /// The zero element of GF32, character 'q'.
    pub const Q: Fe32 = Fe32(0);
    /// The one element of GF32, character 'p'.
    pub const P: Fe32 = Fe32(1);
    /// The quintet 2, character 'z'.
    pub const Z: Fe32 = Fe32(2);
    /// The quintet 3, character 'r'.
    pub const R: Fe32 = Fe32(3);
    /// The quintet 4, character 'y'.
    pub const Y: Fe32 = Fe32(4);
    /// The quintet 5, character '9'.
    pub const _9: Fe32 = Fe32(5);
    /// The quintet 6, character 'x'.
    pub const X: Fe32 = Fe32(6);
    /// The quintet 7, character '8'.
    pub const _8: Fe32 = Fe32(7);
    /// The quintet 8, character 'g'.
    pub const G: Fe32 = Fe32(8);
    /// The quintet 9, character 'f'.
    pub const F: Fe32 = Fe32(9);
    /// The quintet 10, character '2'.
    pub const _2: Fe32 = Fe32(10);
    /// The quintet 11, character 't'.
    pub const T: Fe32 = Fe32(11);
    /// The quintet 12, character 'v'.
    pub const V: Fe32 = Fe32(12);
    /// The quintet 13, character 'd'.
    pub const D: Fe32 = Fe32(13);
    /// The quintet 14, character 'w'.
    pub const W: Fe32 = Fe32(14);
    /// The quintet 15, character '0'.
    pub const _0: Fe32 = Fe32(15);
    /// The quintet 16, character 's'.
    pub const S: Fe32 = Fe32(16);
    /// The quintet 17, character '3'.
    pub const _3: Fe32 = Fe32(17);
    /// The quintet 18, character 'j'.
    pub const J: Fe32 = Fe32(18);
    /// The quintet 19, character 'n'.
    pub const N: Fe32 = Fe32(19);
    /// The quintet 20, character '5'.
    pub const _5: Fe32 = Fe32(20);
    /// The quintet 21, character '4'.
    pub const _4: Fe32 = Fe32(21);
    /// The quintet 22, character 'k'.
    pub const K: Fe32 = Fe32(22);
    /// The quintet 23, character 'h'.
    pub const H: Fe32 = Fe32(23);
    /// The quintet 24, character 'c'.
    pub const C: Fe32 = Fe32(24);
    /// The quintet 25, character 'e'.
    pub const E: Fe32 = Fe32(25);
    /// The quintet 26, character '6'.
    pub const _6: Fe32 = Fe32(26);
    /// The quintet 27, character 'm'.
    pub const M: Fe32 = Fe32(27);
    /// The quintet 28, character 'u'.
    pub const U: Fe32 = Fe32(28);
    /// The quintet 29, character 'a'.
    pub const A: Fe32 = Fe32(29);
    /// The quintet 30, character '7'.
    pub const _7: Fe32 = Fe32(30);
    /// The quintet 31, character 'l'.
    pub const L: Fe32 = Fe32(31);

    /// Creates a quintet from a bech32 character, ignoring case.
    ///
    /// # Errors
    ///
    /// If `c` is not one of the 32 characters of the bech32 alphabet.
    pub fn from_char(c: char) -> Result<Fe32, InvalidCharError> {
        if !c.is_ascii() {
            return Err(InvalidCharError(c));
        }
        // c < 128 since it is in the ASCII range, CHARS_INV.len() == 128.
        let num_value = CHARS_INV[usize::from(c as u8)];
        if num_value < 0 {
            return Err(InvalidCharError(c));
        }
        Ok(Fe32(num_value as u8))
    }

    /// Creates a quintet from the low five bits of `value`, masking off the rest.
    pub fn from_low_5_bits(value: u8) -> Fe32 { Fe32(value & 0x1f) }

    /// Returns the lowercase bech32 character for this quintet.
    pub fn to_char(self) -> char { CHARS_LOWER[usize::from(self.0)] }

    /// Returns the inner value.
    pub fn to_u8(self) -> u8 { self.0 }

    fn _add(&self, other: &Fe32) -> Fe32 { Fe32(self.0 ^ other.0) }

    // Subtraction is the same as addition in a char-2 field.
    fn _sub(&self, other: &Fe32) -> Fe32 { self._add(other) }

    fn _mul(&self, other: &Fe32) -> Fe32 {
        if self.0 == 0 || other.0 == 0 {
            Fe32(0)
        } else {
            let log1 = LOG[self.0 as usize];
            let log2 = LOG[other.0 as usize];
            Fe32(LOG_INV[((log1 + log2) % 31) as usize])
        }
    }

    fn _div(&self, other: &Fe32) -> Fe32 {
        if self.0 == 0 {
            Fe32(0)
        } else if other.0 == 0 {
            panic!("Attempt to divide {} by 0 in GF32", self);
        } else {
            let log1 = LOG[self.0 as usize];
            let log2 = LOG[other.0 as usize];
            Fe32(LOG_INV[((31 + log1 - log2) % 31) as usize])
        }
    }
}

macro_rules! impl_op {
    ($op:ident, $op_fn:ident, $op_assign:ident, $op_assign_fn:ident, $inner:ident) => {
        impl ops::$op<Fe32> for Fe32 {
            type Output = Fe32;
            #[inline]
            fn $op_fn(self, other: Fe32) -> Fe32 { self.$inner(&other) }
        }

        impl ops::$op<&Fe32> for Fe32 {
            type Output = Fe32;
            #[inline]
            fn $op_fn(self, other: &Fe32) -> Fe32 { self.$inner(other) }
        }

        impl ops::$op_assign<Fe32> for Fe32 {
            #[inline]
            fn $op_assign_fn(&mut self, other: Fe32) { *self = self.$inner(&other); }
        }
    };
}
impl_op!(Add, add, AddAssign, add_assign, _add);
impl_op!(Sub, sub, SubAssign, sub_assign, _sub);
impl_op!(Mul, mul, MulAssign, mul_assign, _mul);
impl_op!(Div, div, DivAssign, div_assign, _div);

impl fmt::Debug for Fe32 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "Fe32({})", self.0) }
}

impl fmt::Display for Fe32 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { fmt::Display::fmt(&self.to_char(), f) }
}

impl From<Fe32> for u8 {
    fn from(fe: Fe32) -> u8 { fe.0 }
}

impl TryFrom<u8> for Fe32 {
    type Error = TryFromError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value > 31 {
            Err(TryFromError(value))
        } else {
            Ok(Fe32(value))
        }
    }
}

impl TryFrom<char> for Fe32 {
    type Error = InvalidCharError;

    fn try_from(c: char) -> Result<Self, Self::Error> { Fe32::from_char(c) }
}

/// A data value outside the range `0..32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TryFromError(pub(crate) u8);

impl TryFromError {
    /// Returns the value that was out of range.
    pub fn invalid_value(&self) -> u8 { self.0 }
}

impl fmt::Display for TryFromError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "invalid data value {}, must be less than 32", self.0)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TryFromError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> { None }
}

/// A character that is not part of the bech32 alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidCharError(pub(crate) char);

impl InvalidCharError {
    /// Returns the offending character.
    pub fn invalid_char(&self) -> char { self.0 }
}

impl fmt::Display for InvalidCharError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "invalid bech32 character {:?}", self.0)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InvalidCharError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> { None }
}
