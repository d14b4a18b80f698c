// SPDX-License-Identifier: MIT

//! Error Correction
//!
//! Implements the Berlekamp-Massey algorithm to locate errors, with Forney's
//! equation to identify the error values, in a BCH-encoded string.
//!
//! The bech32 generator polynomial has the three consecutive roots `alpha^24`, `alpha^25` and
//! `alpha^26` in GF1024, where `alpha = 1 + 6 * zeta` has order 1023. Three syndromes suffice to
//! locate a single substituted character. Since the code has minimum distance 5 on strings of up
//! to 90 characters, a located error is the only way to explain the residue with fewer than four
//! substitutions, and strings with two or three substitutions are reported as unlocatable rather
//! than mis-corrected.

use alloc::vec::{self, Vec};

use crate::primitives::checksum::CHECKSUM_LENGTH;
use crate::primitives::gf32::Fe32;
use crate::primitives::gf32_ext::Fe1024;

/// The element whose consecutive powers are roots of the bech32 generator polynomial.
const ROOT_GENERATOR: Fe1024 = Fe1024::new([Fe32::P, Fe32::X]);

/// First exponent of [`ROOT_GENERATOR`] that is a root of the generator polynomial.
const FIRST_ROOT_EXPONENT: i64 = 24;

/// Number of consecutive roots of the generator polynomial.
const ROOT_COUNT: usize = 3;

/// An error-correction context for a string whose checksum failed.
///
/// Constructed by [`Parsed::correction_context`], which computes the residue the string leaves
/// relative to the target of the expected checksum variant.
///
/// [`Parsed::correction_context`]: crate::primitives::hrpstring::Parsed::correction_context
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Corrector {
    /// The residue polynomial, constant term first.
    residue: [Fe32; CHECKSUM_LENGTH],
    /// The number of characters in the data part, including the checksum.
    data_len: usize,
}

impl Corrector {
    /// Constructs a corrector from a residue, already xored with the target residue, and the
    /// number of data characters (including the checksum) that errors may be located in.
    pub fn new(residue: u32, data_len: usize) -> Self {
        let mut poly = [Fe32::Q; CHECKSUM_LENGTH];
        for (i, fe) in poly.iter_mut().enumerate() {
            *fe = Fe32::from_low_5_bits((residue >> (5 * i)) as u8);
        }
        Corrector { residue: poly, data_len }
    }

    /// Returns an iterator over the errors in the string.
    ///
    /// Yields pairs `(idx, fe)` where `idx` is the index of the faulty character counting from
    /// the **end** of the string (the last checksum character has index 0) and `fe` is the value
    /// that must be added to the character to correct it.
    ///
    /// Returns `None` if the errors cannot be located, which happens whenever more than one
    /// character was substituted.
    pub fn bch_errors(&self) -> Option<ErrorIterator> {
        let syndromes = self.syndromes();
        if syndromes.iter().all(|&s| s == Fe1024::ZERO) {
            return None;
        }

        let locator = berlekamp_massey(&syndromes);
        let n_errors = locator.len() - 1;
        if 2 * n_errors > ROOT_COUNT {
            return None;
        }

        // Chien search. A root `alpha^-idx` of the locator is an error at index `idx`.
        let mut positions = Vec::with_capacity(n_errors);
        let mut base = Fe1024::ONE;
        for i in 0..Fe1024::MULTIPLICATIVE_ORDER {
            if evaluate(&locator, base) == Fe1024::ZERO {
                positions.push((Fe1024::MULTIPLICATIVE_ORDER - i) % Fe1024::MULTIPLICATIVE_ORDER);
            }
            base *= ROOT_GENERATOR;
        }
        if positions.len() != n_errors {
            return None;
        }

        // Forney's equation, omega(x) = S(x) * lambda(x) mod x^ROOT_COUNT.
        let mut omega = [Fe1024::ZERO; ROOT_COUNT];
        for (i, &s) in syndromes.iter().enumerate() {
            for (j, &l) in locator.iter().enumerate().take(ROOT_COUNT - i) {
                omega[i + j] += s * l;
            }
        }
        // Formal derivative, only odd powers survive in characteristic 2.
        let derivative = locator
            .iter()
            .enumerate()
            .skip(1)
            .map(|(n, &c)| if n % 2 == 1 { c } else { Fe1024::ZERO })
            .collect::<Vec<Fe1024>>();

        let mut errors = Vec::with_capacity(n_errors);
        for idx in positions {
            if idx >= self.data_len {
                return None;
            }
            let x_inv = ROOT_GENERATOR.powi(-(idx as i64));
            let denominator = evaluate(&derivative, x_inv);
            if denominator == Fe1024::ZERO {
                return None;
            }
            let x_pow = ROOT_GENERATOR.powi(idx as i64 * (1 - FIRST_ROOT_EXPONENT));
            let value = x_pow * evaluate(&omega, x_inv) / denominator;
            // A substitution adds a GF32 value, anything else means we located nonsense.
            match value.to_base() {
                Some(fe) if fe != Fe32::Q => errors.push((idx, fe)),
                _ => return None,
            }
        }
        errors.sort_by_key(|&(idx, _)| idx);

        Some(ErrorIterator { inner: errors.into_iter() })
    }

    /// Evaluates the residue at the consecutive roots of the generator polynomial.
    fn syndromes(&self) -> [Fe1024; ROOT_COUNT] {
        let mut syndromes = [Fe1024::ZERO; ROOT_COUNT];
        for (i, syndrome) in syndromes.iter_mut().enumerate() {
            let root = ROOT_GENERATOR.powi(FIRST_ROOT_EXPONENT + i as i64);
            let poly = self.residue.iter().map(|&fe| Fe1024::from(fe)).collect::<Vec<Fe1024>>();
            *syndrome = evaluate(&poly, root);
        }
        syndromes
    }
}

/// An iterator over the errors located by [`Corrector::bch_errors`].
#[derive(Clone, Debug)]
pub struct ErrorIterator {
    inner: vec::IntoIter<(usize, Fe32)>,
}

impl Iterator for ErrorIterator {
    type Item = (usize, Fe32);
    fn next(&mut self) -> Option<Self::Item> { self.inner.next() }
    fn size_hint(&self) -> (usize, Option<usize>) { self.inner.size_hint() }
}

impl ExactSizeIterator for ErrorIterator {}

/// Evaluates a polynomial, given constant term first, at `elem`.
fn evaluate(poly: &[Fe1024], elem: Fe1024) -> Fe1024 {
    let mut res = Fe1024::ZERO;
    for &fe in poly.iter().rev() {
        res *= elem;
        res += fe;
    }
    res
}

/// Finds the shortest linear-feedback shift register generating `initial_contents`.
///
/// Returns its connection polynomial, constant term (always one) first.
fn berlekamp_massey(initial_contents: &[Fe1024]) -> Vec<Fe1024> {
    // Step numbers taken from Massey 1969 "Shift-register synthesis and BCH decoding"
    // PDF: https://crypto.stanford.edu/~mironov/cs359/massey.pdf
    //
    // `conn` and `old_conn` are `C(D)` and `B(D)` respectively.
    let mut conn = Vec::with_capacity(1 + initial_contents.len());
    let mut old_conn = Vec::with_capacity(1 + initial_contents.len());
    let mut old_d = Fe1024::ONE; // `b` in the paper
    let mut x = 1;

    conn.push(Fe1024::ONE);
    old_conn.push(Fe1024::ONE);

    for n in 0..initial_contents.len() {
        // Step 2: the discrepancy between what the current register computes and the
        // actual next value.
        let d = conn
            .iter()
            .zip(initial_contents[..=n].iter().rev())
            .map(|(&a, &b)| a * b)
            .sum::<Fe1024>();

        if d == Fe1024::ZERO {
            // Step 3
            x += 1;
        } else {
            let db_inv = d / old_d;
            let poly_add_length = old_conn.len() + x;
            if poly_add_length <= conn.len() {
                // Step 4
                for i in 0..old_conn.len() {
                    conn[i + x] += db_inv * old_conn[i];
                }
                x += 1;
            } else {
                // Step 5
                let tmp = conn.clone();
                conn.resize(poly_add_length, Fe1024::ZERO);
                for i in 0..old_conn.len() {
                    conn[i + x] += db_inv * old_conn[i];
                }
                old_conn = tmp;
                old_d = d;
                x = 1;
            }
        }
    }
    conn
}
