// SPDX-License-Identifier: MIT

//! The extension field GF1024 over GF32.
//!
//! Locating errors in the bech32 BCH code requires working over the degree-2 extension of GF32,
//! since that is where the roots of the generator polynomial live. An element is written as
//! `a0 + a1 * zeta`, where `zeta` is a root of the defining polynomial `x^2 + x + 1`.

use core::{fmt, ops};

use crate::primitives::gf32::Fe32;

/// An element of the field of order 1024.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Fe1024 {
    /// The polynomial representation of the element in "little-endian" order;
    /// that is, the element is the sum `inner[i] * EXT_ELEM^i`.
    inner: [Fe32; 2],
}

impl Fe1024 {
    /// The zero element of the field.
    pub const ZERO: Self = Self::new([Fe32::Q, Fe32::Q]);

    /// The one element of the field.
    pub const ONE: Self = Self::new([Fe32::P, Fe32::Q]);

    /// The order of the multiplicative group of the field.
    pub const MULTIPLICATIVE_ORDER: usize = 1023;

    /// The defining polynomial, written as the value of `zeta^2`.
    ///
    /// We use `zeta^2 = zeta + 1`. The choice does not matter beyond fixing a representation,
    /// every degree-2 irreducible polynomial gives an isomorphic field.
    pub const POLYNOMIAL: Self = Self::new([Fe32::P, Fe32::P]);

    /// The element zeta such that the extension field is defined as `GF32[zeta]`.
    ///
    /// Alternately, the image of x in the mapping `GF32[x]/p(x) -> <the field>`
    pub const EXT_ELEM: Self = Self::new([Fe32::Q, Fe32::P]);

    /// Constructs a new extension-field element given a polynomial representation
    /// of the element in terms of the base field.
    pub const fn new(inner: [Fe32; 2]) -> Self { Self { inner } }

    /// Returns the element as a member of the base field, if it is one.
    pub fn to_base(self) -> Option<Fe32> {
        if self.inner[1] == Fe32::Q {
            Some(self.inner[0])
        } else {
            None
        }
    }

    /// Computes the multiplicative inverse of the element.
    ///
    /// # Panics
    ///
    /// If the element is zero.
    pub fn multiplicative_inverse(self) -> Self {
        // Aliases to make the below equations easier to read
        let a0 = self.inner[0];
        let a1 = self.inner[1];
        let p0 = Self::POLYNOMIAL.inner[0];
        let p1 = Self::POLYNOMIAL.inner[1];

        // Inverse of the 2x2 multiplication matrix defined by a0, a1.
        let det = (a0 * a0) + (p1 * a0 * a1) + (p0 * a1 * a1);
        Self::new([(a0 + p1 * a1) / det, (Fe32::Q - a1) / det])
    }

    /// Raises the element to the power `n`, which may be negative.
    pub fn powi(self, n: i64) -> Self {
        let order = Self::MULTIPLICATIVE_ORDER as i64;
        let mut n = ((n % order) + order) % order;
        let mut base = self;
        let mut acc = Self::ONE;
        while n > 0 {
            if n & 1 == 1 {
                acc = acc * base;
            }
            base = base * base;
            n >>= 1;
        }
        acc
    }

    /// Returns the smallest positive `n` such that the element raised to `n` is one.
    ///
    /// # Panics
    ///
    /// If the element is zero.
    pub fn multiplicative_order(self) -> usize {
        assert_ne!(self, Self::ZERO, "zero has no multiplicative order");
        // The order divides 1023 = 3 * 11 * 31.
        [1, 3, 11, 31, 33, 93, 341, 1023]
            .iter()
            .copied()
            .find(|&d| self.powi(d as i64) == Self::ONE)
            .unwrap_or(Self::MULTIPLICATIVE_ORDER)
    }

    fn _add(&self, other: &Self) -> Self {
        Self::new([self.inner[0] + other.inner[0], self.inner[1] + other.inner[1]])
    }

    fn _mul(&self, other: &Self) -> Self {
        let (a0, a1) = (self.inner[0], self.inner[1]);
        let (b0, b1) = (other.inner[0], other.inner[1]);
        // The zeta^2 term is reduced using the defining polynomial.
        let sq = a1 * b1;
        Self::new([
            a0 * b0 + sq * Self::POLYNOMIAL.inner[0],
            a0 * b1 + a1 * b0 + sq * Self::POLYNOMIAL.inner[1],
        ])
    }
}

impl From<Fe32> for Fe1024 {
    fn from(fe: Fe32) -> Self { Self::new([fe, Fe32::Q]) }
}

impl fmt::Debug for Fe1024 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { fmt::Display::fmt(self, f) }
}

impl fmt::Display for Fe1024 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.inner[0], self.inner[1])
    }
}

impl ops::Add for Fe1024 {
    type Output = Self;
    #[inline]
    fn add(self, other: Self) -> Self { self._add(&other) }
}

// Subtraction is the same as addition in a char-2 field.
impl ops::Sub for Fe1024 {
    type Output = Self;
    #[inline]
    fn sub(self, other: Self) -> Self { self._add(&other) }
}

impl ops::Mul for Fe1024 {
    type Output = Self;
    #[inline]
    fn mul(self, other: Self) -> Self { self._mul(&other) }
}

impl ops::Div for Fe1024 {
    type Output = Self;
    #[inline]
    fn div(self, other: Self) -> Self { self._mul(&other.multiplicative_inverse()) }
}

impl ops::AddAssign for Fe1024 {
    #[inline]
    fn add_assign(&mut self, other: Self) { *self = self._add(&other); }
}

impl ops::MulAssign for Fe1024 {
    #[inline]
    fn mul_assign(&mut self, other: Self) { *self = self._mul(&other); }
}

impl core::iter::Sum for Fe1024 {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self { iter.fold(Self::ZERO, |acc, x| acc + x) }
}

#[cfg(test)]
mod tests {
    use core::convert::TryFrom;

    use super::*;

    fn fe(v: u8) -> Fe32 { Fe32::try_from(v).unwrap() }

    #[test]
    fn gf1024_div() {
        for a0 in 0..32 {
            for a1 in 0..32 {
                let gf1 = Fe1024::new([fe(a0), fe(a1)]);
                if gf1 == Fe1024::ZERO {
                    continue;
                }
                assert_eq!(gf1 / gf1, Fe1024::ONE);
            }
        }

        const ITERS: u8 = 10; // max 32.
        for a0 in 0..ITERS {
            for a1 in 0..ITERS {
                for b0 in 0..ITERS {
                    for b1 in 0..ITERS {
                        let gf1 = Fe1024::new([fe(a0), fe(a1)]);
                        let gf2 = Fe1024::new([fe(b0), fe(b1)]);
                        if gf1 == Fe1024::ZERO {
                            continue;
                        }
                        let rat = gf2 / gf1;
                        assert_eq!(rat * gf1, gf2);
                        assert_eq!(gf1 * rat, gf2);
                    }
                }
            }
        }
    }

    #[test]
    fn gf1024_mult() {
        // Check that all ext field elements to the power of 1024 are themselves
        for j in 0..32 {
            for i in 0..32 {
                let mut sq = Fe1024::new([fe(i), fe(j)]);
                for _ in 0..10 {
                    sq = sq * sq;
                }
                assert_eq!(sq, Fe1024::new([fe(i), fe(j)]));
            }
        }

        assert_eq!(Fe1024::EXT_ELEM * Fe1024::EXT_ELEM, Fe1024::POLYNOMIAL);
    }

    #[test]
    fn gf1024_mult_inverse() {
        assert_eq!(Fe1024::ONE.multiplicative_inverse(), Fe1024::ONE);

        for i in 0..32 {
            for j in 0..32 {
                if i != 0 || j != 0 {
                    let fe1024 = Fe1024::new([fe(i), fe(j)]);
                    assert_eq!(fe1024.multiplicative_inverse().multiplicative_inverse(), fe1024);
                }
            }
        }
        assert_eq!(
            Fe1024::new([Fe32::P, Fe32::X]).multiplicative_inverse(),
            Fe1024::new([Fe32::_7, Fe32::F]),
        );
    }

    #[test]
    fn gf1024_powi() {
        // A "random" element
        let elem = Fe1024::new([Fe32::K, Fe32::L]);
        assert_eq!(elem.powi(2), elem * elem);
        assert_eq!(elem.powi(3), elem * elem * elem);
        assert_eq!(elem.powi(0), Fe1024::ONE);
        assert_eq!(elem.powi(-1), elem.multiplicative_inverse());

        assert_eq!(elem.multiplicative_order(), 1023);
        assert_eq!(elem.powi(3).multiplicative_order(), 341);
        assert_eq!(elem.powi(341).multiplicative_order(), 3);
    }

    #[test]
    fn base_field_embedding() {
        assert_eq!(Fe1024::from(Fe32::K).to_base(), Some(Fe32::K));
        assert_eq!(Fe1024::EXT_ELEM.to_base(), None);
        assert_eq!(Fe1024::from(Fe32::K) * Fe1024::from(Fe32::L), Fe1024::from(Fe32::K * Fe32::L));
    }
}
