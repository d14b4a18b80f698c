// SPDX-License-Identifier: MIT

//! Degree-6 [BCH] code checksum shared by bech32 and bech32m.
//!
//! Both variants use the same generator polynomial, they differ only in the residue that a valid
//! codeword leaves behind. Computing a checksum and verifying one are therefore the same
//! computation, see [`Variant::target_residue`].
//!
//! [BCH]: <https://en.wikipedia.org/wiki/BCH_code>

use core::fmt;

use crate::primitives::gf32::Fe32;
use crate::primitives::hrp::Hrp;

/// The number of characters in the checksum.
pub const CHECKSUM_LENGTH: usize = 6;

// Bech32[m] generator coefficients, copied from Bitcoin Core src/bech32.cpp
const GEN: [u32; 5] = [0x3b6a_57b2, 0x2650_8e6d, 0x1ea1_19fa, 0x3d42_33dd, 0x2a14_62b3];

/// The bech32 residue, defined in BIP-173.
const BECH32_CONST: u32 = 1;
/// The bech32m residue, defined in BIP-350.
const BECH32M_CONST: u32 = 0x2bc8_30a3;

/// The checksum algorithm used to encode a string.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Variant {
    /// The original bech32 described in [BIP-173](https://github.com/bitcoin/bips/blob/master/bip-0173.mediawiki).
    Bech32,
    /// The improved bech32m variant described in [BIP-350](https://github.com/bitcoin/bips/blob/master/bip-0350.mediawiki).
    Bech32m,
}

impl Variant {
    /// The residue, modulo the generator polynomial, that a valid codeword of this variant has.
    pub const fn target_residue(self) -> u32 {
        match self {
            Variant::Bech32 => BECH32_CONST,
            Variant::Bech32m => BECH32M_CONST,
        }
    }

    /// Returns the variant whose target residue is `residue`, if any.
    pub fn from_residue(residue: u32) -> Option<Variant> {
        match residue {
            BECH32_CONST => Some(Variant::Bech32),
            BECH32M_CONST => Some(Variant::Bech32m),
            _ => None,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Variant::Bech32 => f.write_str("bech32"),
            Variant::Bech32m => f.write_str("bech32m"),
        }
    }
}

/// A checksum engine, which can be used to compute or verify a checksum.
///
/// Holds the running polymod midstate, a 30 bit accumulator. Use this to verify a checksum, feed
/// it the data to be checksummed using the `Self::input_*` methods then compare
/// [`Self::residue`] against [`Variant::target_residue`].
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Engine {
    residue: u32,
}

impl Default for Engine {
    fn default() -> Self { Self::new() }
}

impl Engine {
    /// Constructs a new checksum engine with no data input.
    pub fn new() -> Self { Engine { residue: 1 } }

    /// Feeds `hrp` into the checksum engine.
    ///
    /// The HRP is expanded to the high three bits of each (lowercased) character, a zero
    /// separator, then the low five bits of each character.
    pub fn input_hrp(&mut self, hrp: &Hrp) {
        for c in hrp.iter() {
            self.input_fe(Fe32::from_low_5_bits(c >> 5));
        }
        self.input_fe(Fe32::Q);
        for c in hrp.iter() {
            self.input_fe(Fe32::from_low_5_bits(c));
        }
    }

    /// Adds a single quintet to the checksum engine.
    pub fn input_fe(&mut self, fe: Fe32) {
        let b = self.residue >> 25;
        self.residue = (self.residue & 0x01ff_ffff) << 5 ^ u32::from(fe.to_u8());
        for (i, gen) in GEN.iter().enumerate() {
            if (b >> i) & 1 == 1 {
                self.residue ^= gen;
            }
        }
    }

    /// Inputs the six zero quintets that stand in for the checksum while it is being computed.
    pub fn input_checksum_placeholder(&mut self) {
        for _ in 0..CHECKSUM_LENGTH {
            self.input_fe(Fe32::Q);
        }
    }

    /// Returns the current residue.
    pub fn residue(&self) -> u32 { self.residue }
}

/// Computes the polymod residue of `hrp` followed by `data`.
///
/// For a string whose `data` ends in a valid checksum this is the target residue of the variant
/// that produced it.
pub fn residue(hrp: &Hrp, data: &[Fe32]) -> u32 {
    let mut engine = Engine::new();
    engine.input_hrp(hrp);
    for &fe in data {
        engine.input_fe(fe);
    }
    engine.residue()
}

/// Computes the checksum for `hrp` and `data`, most significant quintet first.
pub fn create_checksum(hrp: &Hrp, data: &[Fe32], variant: Variant) -> [Fe32; CHECKSUM_LENGTH] {
    let mut engine = Engine::new();
    engine.input_hrp(hrp);
    for &fe in data {
        engine.input_fe(fe);
    }
    engine.input_checksum_placeholder();

    let plm = engine.residue() ^ variant.target_residue();
    let mut checksum = [Fe32::Q; CHECKSUM_LENGTH];
    for (p, fe) in checksum.iter_mut().enumerate() {
        *fe = Fe32::from_low_5_bits((plm >> (5 * (5 - p))) as u8);
    }
    checksum
}

/// Returns true if `data_with_checksum` ends in a valid `variant` checksum for `hrp`.
pub fn verify_checksum(hrp: &Hrp, data_with_checksum: &[Fe32], variant: Variant) -> bool {
    residue(hrp, data_with_checksum) == variant.target_residue()
}

#[cfg(test)]
mod tests {
    use core::convert::TryFrom;

    use super::*;

    fn fes(s: &str) -> Vec<Fe32> { s.chars().map(|c| Fe32::from_char(c).unwrap()).collect() }

    /// Unpacks the `i`th quintet of a packed 30 bit value.
    fn unpack(packed: u32, i: usize) -> u8 { ((packed >> (5 * i)) & 0x1f) as u8 }

    #[test]
    fn generator_shifts_are_consistent() {
        // GF32 is defined by extending GF2 with a root of x^5 + x^3 + 1 = 0 which when written as
        // bit coefficients is 41 = 0. Hence xoring (adding, in GF32) by 41 is the way to reduce x^5.
        for i in 1..5 {
            for j in 0..CHECKSUM_LENGTH {
                let last = unpack(GEN[i - 1], j);
                let curr = unpack(GEN[i], j);
                assert_eq!(
                    curr,
                    (last << 1) ^ if last & 0x10 == 0x10 { 41 } else { 0 },
                    "element {} of generator << 2^{} was incorrectly computed",
                    j,
                    i,
                );
            }
        }
    }

    #[test]
    fn known_checksums() {
        let hrp = Hrp::parse("a").unwrap();
        assert_eq!(create_checksum(&hrp, &[], Variant::Bech32).to_vec(), fes("2uel5l"));
        assert_eq!(create_checksum(&hrp, &[], Variant::Bech32m).to_vec(), fes("lqfn3a"));
    }

    #[test]
    fn checksum_is_computed_over_lowercase_hrp() {
        let lower = Hrp::parse("abcdef").unwrap();
        let upper = Hrp::parse("ABCDEF").unwrap();
        let data = fes("qpzry9x8gf2tvdw0s3jn54khce6mua7l");
        for &variant in &[Variant::Bech32, Variant::Bech32m] {
            assert_eq!(
                create_checksum(&lower, &data, variant),
                create_checksum(&upper, &data, variant)
            );
        }
    }

    #[test]
    fn verify_detects_variant() {
        let hrp = Hrp::parse("abcdef").unwrap();
        let mut data = fes("l7aum6echk45nj3s0wdvt2fg8x9yrzpq");
        data.extend_from_slice(&fes("zd3ryx"));

        assert!(verify_checksum(&hrp, &data, Variant::Bech32m));
        assert!(!verify_checksum(&hrp, &data, Variant::Bech32));
        assert_eq!(Variant::from_residue(residue(&hrp, &data)), Some(Variant::Bech32m));
    }

    #[test]
    fn create_then_verify() {
        let hrp = Hrp::parse("split").unwrap();
        let mut data = (0..32).map(|i| Fe32::try_from(i as u8).unwrap()).collect::<Vec<_>>();
        for &variant in &[Variant::Bech32, Variant::Bech32m] {
            let checksum = create_checksum(&hrp, &data, variant);
            let len = data.len();
            data.extend_from_slice(&checksum);
            assert!(verify_checksum(&hrp, &data, variant));
            data.truncate(len);
        }
    }

    #[test]
    fn residue_lookup() {
        assert_eq!(Variant::from_residue(1), Some(Variant::Bech32));
        assert_eq!(Variant::from_residue(0x2bc830a3), Some(Variant::Bech32m));
        assert_eq!(Variant::from_residue(0), None);
        assert_eq!(Variant::Bech32m.target_residue(), 0x2bc830a3);
    }
}
