// SPDX-License-Identifier: MIT

//! Conversion between integer sequences of different bit widths.
//!
//! Bits are regrouped most significant first, so converting 8-bit bytes to 5-bit quintets and
//! back is lossless provided the reverse conversion does not pad.

use alloc::vec::Vec;
use core::fmt;

use crate::primitives::gf32::Fe32;

/// Convert between bit sizes.
///
/// Treats `data` as a sequence of `from` bit wide unsigned integers and regroups them into `to`
/// bit wide unsigned integers.
///
/// If `pad` is true any leftover bits are zero-padded into one final value. If `pad` is false the
/// leftover bits must be fewer than `from` and must all be zero.
///
/// # Errors
///
/// * `Error::InvalidInputValue` if any element of `data` is out of range for `from` bits.
/// * `Error::ExcessPaddingBits` if `pad == false` and `from` or more bits are left over.
/// * `Error::NonZeroPadding` if `pad == false` and the leftover bits are not `0`.
///
/// # Panics
///
/// Function will panic if attempting to convert `from` or `to` a bit size that
/// is 0 or larger than 8 bits.
///
/// # Examples
///
/// ```rust
/// use bech32_segwit::convert_bits;
/// let base5 = convert_bits(&[0xffu8], 8, 5, true);
/// assert_eq!(base5.unwrap(), vec![0x1f, 0x1c]);
/// ```
pub fn convert_bits<T>(data: &[T], from: u32, to: u32, pad: bool) -> Result<Vec<u8>, Error>
where
    T: Into<u8> + Copy,
{
    if from > 8 || to > 8 || from == 0 || to == 0 {
        panic!("convert_bits `from` and `to` parameters 0 or greater than 8");
    }
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    let mut ret: Vec<u8> = Vec::with_capacity((data.len() * from as usize + to as usize - 1) / to as usize);
    let maxv: u32 = (1 << to) - 1;
    for value in data {
        let v: u32 = u32::from(Into::<u8>::into(*value));
        if (v >> from) != 0 {
            // Input value exceeds `from` bit size
            return Err(Error::InvalidInputValue(v as u8));
        }
        // Only the bits not yet emitted are kept, the accumulator never exceeds 15 bits.
        acc = ((acc << from) | v) & 0x7fff;
        bits += from;
        while bits >= to {
            bits -= to;
            ret.push(((acc >> bits) & maxv) as u8);
        }
    }
    if pad {
        if bits > 0 {
            ret.push(((acc << (to - bits)) & maxv) as u8);
        }
    } else if bits >= from {
        return Err(Error::ExcessPaddingBits(bits));
    } else if ((acc << (to - bits)) & maxv) != 0 {
        return Err(Error::NonZeroPadding);
    }
    Ok(ret)
}

/// Converts bytes to quintets, zero-padding the final quintet.
///
/// This conversion cannot fail, every byte fits in 8 bits and padding is allowed.
pub fn bytes_to_fes(bytes: &[u8]) -> Vec<Fe32> {
    convert_bits(bytes, 8, 5, true)
        .expect("both error conditions are impossible (padding allowed, input is 8 bits)")
        .into_iter()
        .map(Fe32::from_low_5_bits)
        .collect()
}

/// Converts quintets back to bytes, rejecting non-zero or over-long padding.
pub fn fes_to_bytes(fes: &[Fe32]) -> Result<Vec<u8>, Error> { convert_bits(fes, 5, 8, false) }

/// Errors from regrouping bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// Some input value does not fit in the source bit width.
    InvalidInputValue(u8),
    /// The number of leftover bits is at least the source bit width, a whole input value would be
    /// dropped.
    ExcessPaddingBits(u32),
    /// The leftover padding bits are not all zero.
    NonZeroPadding,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Error::*;

        match *self {
            InvalidInputValue(v) => write!(f, "input value {} exceeds the source bit width", v),
            ExcessPaddingBits(n) => write!(f, "too many padding bits ({})", n),
            NonZeroPadding => write!(f, "non-zero padding"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        use Error::*;

        match *self {
            InvalidInputValue(_) | ExcessPaddingBits(_) | NonZeroPadding => None,
        }
    }
}
