// -*- mode: rust; -*-
//
// This file is part of ed25519-ristretto.
// Copyright (c) 2016-2021 isis agora lovecruft
// Copyright (c) 2016-2019 Henry de Valence
// See LICENSE for licensing information.
//
// Authors:
// - isis agora lovecruft <isis@patternsinthevoid.net>
// - Henry de Valence <hdevalence@hdevalence.ca>

//! Field arithmetic modulo \\(p = 2\^{255} - 19\\).
//!
//! A `FieldElement` wraps an arbitrary-precision integer kept canonically
//! reduced into \\([0, p)\\).  Operations defined in terms of other field
//! operations, such as inversion or square roots, live here alongside the
//! basic ring operations.
//!
//! Unlike a fixed-limb representation, big-integer arithmetic is not
//! constant time; see the crate-level documentation for the timing model.

use core::ops::{Add, Mul, Neg, Sub};

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Signed, Zero};
use once_cell::sync::Lazy;
use subtle::Choice;

use crate::constants;
use crate::encoding;
use crate::errors::CurveError;

/// The field modulus \\(p = 2\^{255} - 19\\).
pub(crate) static FIELD_P: Lazy<BigUint> =
    Lazy::new(|| (BigUint::one() << 255u32) - BigUint::from(19u32));

/// An element of the field \\( \mathbb Z / (2\^{255} - 19)\\).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldElement(BigUint);

impl FieldElement {
    /// The additive identity.
    pub fn zero() -> FieldElement {
        FieldElement(BigUint::zero())
    }

    /// The multiplicative identity.
    pub fn one() -> FieldElement {
        FieldElement(BigUint::one())
    }

    /// `-1 mod p`, i.e. `p - 1`.
    pub fn minus_one() -> FieldElement {
        FieldElement(&*FIELD_P - BigUint::one())
    }

    /// Construct a field element from an integer, reducing mod `p`.
    pub(crate) fn from_biguint(n: BigUint) -> FieldElement {
        FieldElement(n % &*FIELD_P)
    }

    /// Construct a field element from a small integer.
    pub(crate) fn from_u64(n: u64) -> FieldElement {
        FieldElement::from_biguint(BigUint::from(n))
    }

    /// Load a field element from 32 little-endian bytes, ignoring bit 255
    /// and reducing mod `p`.
    pub(crate) fn from_bytes_255(bytes: &[u8; 32]) -> FieldElement {
        FieldElement::from_biguint(encoding::biguint_from_bytes_255_le(bytes))
    }

    /// The canonical 32-byte little-endian encoding of this element.
    pub fn to_bytes(&self) -> [u8; 32] {
        encoding::bytes32_le(&self.0)
    }

    /// Borrow the canonical integer representative.
    pub(crate) fn as_biguint(&self) -> &BigUint {
        &self.0
    }

    /// Determine whether this element is negative in the sense used by
    /// the ed25519 paper: an element is negative if the low bit of its
    /// canonical representative is set.
    pub(crate) fn is_negative(&self) -> Choice {
        Choice::from(self.0.is_odd() as u8)
    }

    /// Determine whether this element is zero.
    pub(crate) fn is_zero(&self) -> Choice {
        Choice::from(<BigUint as Zero>::is_zero(&self.0) as u8)
    }

    /// Compute `self^2`.
    pub fn square(&self) -> FieldElement {
        self * self
    }

    /// Compute `self^(2^k)` by `k` successive squarings.
    pub(crate) fn pow2k(&self, k: u32) -> FieldElement {
        debug_assert!(k > 0);
        let mut r = self.clone();
        for _ in 0..k {
            r = r.square();
        }
        r
    }

    /// Raise this field element to the power \\((p-5)/8 = 2\^{252} - 3\\).
    ///
    /// Helper for `sqrt_ratio`, which folds an inversion and a square
    /// root into one exponentiation.  The chain below builds exponents of
    /// the form \\(2\^k - 1\\) and must not be reordered: decompression
    /// and Ristretto test vectors pin its output exactly.
    #[rustfmt::skip] // keep alignment of explanatory comments
    fn pow_p58(&self) -> FieldElement {
        //                                        exponent
        let x2   = self.square();              // 2
        let b2   = &x2 * self;                 // 3 = 2^2 - 1
        let b4   = &b2.pow2k(2) * &b2;         // 2^4 - 1
        let b5   = &b4.pow2k(1) * self;        // 2^5 - 1
        let b10  = &b5.pow2k(5) * &b5;         // 2^10 - 1
        let b20  = &b10.pow2k(10) * &b10;      // 2^20 - 1
        let b40  = &b20.pow2k(20) * &b20;      // 2^40 - 1
        let b80  = &b40.pow2k(40) * &b40;      // 2^80 - 1
        let b160 = &b80.pow2k(80) * &b80;      // 2^160 - 1
        let b240 = &b160.pow2k(80) * &b80;     // 2^240 - 1
        let b250 = &b240.pow2k(10) * &b10;     // 2^250 - 1
        &b250.pow2k(2) * self                  // 2^252 - 3
    }

    /// Given nonzero `self`, compute its multiplicative inverse by the
    /// extended Euclidean algorithm.
    ///
    /// Fails on zero input; there is no Fermat fallback.
    pub fn invert(&self) -> Result<FieldElement, CurveError> {
        invert_mod(&self.0, &FIELD_P).map(FieldElement)
    }

    /// Given a slice of field elements, replace each with its inverse.
    ///
    /// Montgomery's trick: all inverses cost one field inversion plus
    /// roughly `3(n-1)` multiplications.  Zero entries are skipped and
    /// left as zero.
    pub fn batch_invert(inputs: &mut [FieldElement]) {
        // Montgomery's Trick and Fast Implementation of Masked AES
        // Genelle, Prouff and Quisquater
        // Section 3.2
        let n = inputs.len();
        let mut scratch = vec![FieldElement::one(); n];

        let mut acc = FieldElement::one();

        for (input, scratch) in inputs.iter().zip(scratch.iter_mut()) {
            *scratch = acc.clone();
            if !bool::from(input.is_zero()) {
                acc = &acc * input;
            }
        }

        // acc is a product of nonzero elements of a prime field.
        debug_assert!(!bool::from(acc.is_zero()));
        let mut acc = acc.invert().expect("product of nonzero field elements is nonzero");

        for (input, scratch) in inputs.iter_mut().rev().zip(scratch.into_iter().rev()) {
            if bool::from(input.is_zero()) {
                continue;
            }
            let tmp = &acc * input;
            *input = &acc * &scratch;
            acc = tmp;
        }
    }

    /// Given field elements `u` and `v`, compute either `sqrt(u/v)` or
    /// `sqrt(i*u/v)`, where `i = sqrt(-1)`.
    ///
    /// This function always returns the nonnegative square root.
    ///
    /// # Return
    ///
    /// - `(Choice(1), +sqrt(u/v))  ` if `v` is nonzero and `u/v` is square;
    /// - `(Choice(1), zero)        ` if `u` is zero;
    /// - `(Choice(0), zero)        ` if `v` is zero and `u` is nonzero;
    /// - `(Choice(0), +sqrt(i*u/v))` if `u/v` is nonsquare (so `i*u/v` is square).
    pub fn sqrt_ratio(u: &FieldElement, v: &FieldElement) -> (Choice, FieldElement) {
        // To compute 1/sqrt(a), note that
        //    1/b = a^(p-1 - (p+3)/8) = a^3 (a^7)^((p-5)/8),
        // so the candidate root of u/v is
        //    r = (u v^3) (u v^7)^((p-5)/8),
        // which merges the inversion, the square root, and the square
        // test into a single exponentiation.  Then v r^2 lands in
        // {u, -u, u*i, -u*i}, which tells us which of sqrt(u/v) and
        // sqrt(i*u/v) exists and how r must be adjusted to reach it.
        let v3 = &v.square() * v;
        let v7 = &v3.square() * v;
        let mut r = &(u * &v3) * &(u * &v7).pow_p58();
        let check = v * &r.square();

        let i = &*constants::SQRT_M1;

        let minus_u = -u;
        let correct_sign_sqrt = check == *u;
        let flipped_sign_sqrt = check == minus_u;
        let flipped_sign_sqrt_i = check == &minus_u * i;

        if flipped_sign_sqrt || flipped_sign_sqrt_i {
            r = &r * i;
        }

        // Choose the nonnegative square root.
        if bool::from(r.is_negative()) {
            r = -&r;
        }

        let was_nonzero_square = correct_sign_sqrt | flipped_sign_sqrt;

        (Choice::from(was_nonzero_square as u8), r)
    }

    /// Attempt to compute `sqrt(1/self)`.
    ///
    /// Convenience wrapper around `sqrt_ratio`.
    pub fn invsqrt(&self) -> (Choice, FieldElement) {
        FieldElement::sqrt_ratio(&FieldElement::one(), self)
    }
}

/// Invert `a` modulo `m` by the extended Euclidean algorithm.
///
/// Fails when `a` is zero mod `m`, when `m` is zero, or when
/// `gcd(a, m) != 1`.
pub(crate) fn invert_mod(a: &BigUint, m: &BigUint) -> Result<BigUint, CurveError> {
    if <BigUint as Zero>::is_zero(m) {
        return Err(CurveError::InvalidArgument("modulus must be positive"));
    }
    let a = a % m;
    if <BigUint as Zero>::is_zero(&a) {
        return Err(CurveError::InvalidArgument("zero has no inverse"));
    }

    let m_signed = BigInt::from(m.clone());
    let mut r_prev = BigInt::from(a);
    let mut r = m_signed.clone();
    let mut s_prev = BigInt::one();
    let mut s = BigInt::zero();

    while !<BigInt as Zero>::is_zero(&r) {
        let q = &r_prev / &r;
        let r_next = &r_prev - &q * &r;
        r_prev = core::mem::replace(&mut r, r_next);
        let s_next = &s_prev - &q * &s;
        s_prev = core::mem::replace(&mut s, s_next);
    }

    if !<BigInt as One>::is_one(&r_prev) {
        return Err(CurveError::InvalidArgument("element is not invertible"));
    }

    let inv = s_prev.mod_floor(&m_signed);
    debug_assert!(!inv.is_negative());
    inv.to_biguint()
        .ok_or(CurveError::InvalidArgument("element is not invertible"))
}

impl<'a, 'b> Add<&'b FieldElement> for &'a FieldElement {
    type Output = FieldElement;
    fn add(self, rhs: &'b FieldElement) -> FieldElement {
        FieldElement((&self.0 + &rhs.0) % &*FIELD_P)
    }
}

impl<'a, 'b> Sub<&'b FieldElement> for &'a FieldElement {
    type Output = FieldElement;
    fn sub(self, rhs: &'b FieldElement) -> FieldElement {
        FieldElement((&self.0 + &*FIELD_P - &rhs.0) % &*FIELD_P)
    }
}

impl<'a, 'b> Mul<&'b FieldElement> for &'a FieldElement {
    type Output = FieldElement;
    fn mul(self, rhs: &'b FieldElement) -> FieldElement {
        FieldElement((&self.0 * &rhs.0) % &*FIELD_P)
    }
}

impl<'a> Neg for &'a FieldElement {
    type Output = FieldElement;
    fn neg(self) -> FieldElement {
        FieldElement((&*FIELD_P - &self.0) % &*FIELD_P)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn invert_roundtrips() {
        for n in 1u64..32 {
            let x = FieldElement::from_u64(n);
            let xinv = x.invert().unwrap();
            assert_eq!(&x * &xinv, FieldElement::one());
        }
    }

    #[test]
    fn invert_rejects_zero() {
        assert!(FieldElement::zero().invert().is_err());
    }

    #[test]
    fn pow_p58_matches_modpow() {
        let exp = (&*FIELD_P - BigUint::from(5u32)) >> 2u32 >> 1u32;
        for n in [2u64, 3, 5, 486662, 121665] {
            let x = FieldElement::from_u64(n);
            let expected = FieldElement(x.0.modpow(&exp, &FIELD_P));
            assert_eq!(x.pow_p58(), expected);
        }
    }

    #[test]
    fn batch_invert_matches_nonbatched() {
        let mut elems: Vec<FieldElement> = [2u64, 97, 0, 121666, 5, 0]
            .iter()
            .map(|&n| FieldElement::from_u64(n))
            .collect();
        let singles: Vec<FieldElement> = elems.clone();
        FieldElement::batch_invert(&mut elems);
        for (batched, original) in elems.iter().zip(singles.iter()) {
            if bool::from(original.is_zero()) {
                assert!(bool::from(batched.is_zero()));
            } else {
                assert_eq!(*batched, original.invert().unwrap());
            }
        }
    }

    #[test]
    fn batch_invert_empty() {
        FieldElement::batch_invert(&mut []);
    }

    #[test]
    fn sqrt_ratio_behavior() {
        let zero = FieldElement::zero();
        let one = FieldElement::one();
        let i = &*constants::SQRT_M1;
        let two = &one + &one; // 2 is nonsquare mod p.
        let four = &two + &two; // 4 is square mod p.

        // 0/0 should return (1, 0) since u is 0
        let (choice, sqrt) = FieldElement::sqrt_ratio(&zero, &zero);
        assert!(bool::from(choice));
        assert_eq!(sqrt, zero);
        assert!(!bool::from(sqrt.is_negative()));

        // 1/0 should return (0, 0) since v is 0, u is nonzero
        let (choice, sqrt) = FieldElement::sqrt_ratio(&one, &zero);
        assert!(!bool::from(choice));
        assert_eq!(sqrt, zero);

        // 2/1 is nonsquare, so we expect (0, sqrt(i*2))
        let (choice, sqrt) = FieldElement::sqrt_ratio(&two, &one);
        assert!(!bool::from(choice));
        assert_eq!(sqrt.square(), &two * i);
        assert!(!bool::from(sqrt.is_negative()));

        // 4/1 is square, so we expect (1, sqrt(4))
        let (choice, sqrt) = FieldElement::sqrt_ratio(&four, &one);
        assert!(bool::from(choice));
        assert_eq!(sqrt.square(), four);
        assert!(!bool::from(sqrt.is_negative()));

        // 1/4 is square, so we expect (1, 1/sqrt(4))
        let (choice, sqrt) = FieldElement::sqrt_ratio(&one, &four);
        assert!(bool::from(choice));
        assert_eq!(&sqrt.square() * &four, one);
    }

    #[test]
    fn negation_parity() {
        let two = FieldElement::from_u64(2);
        assert!(!bool::from(two.is_negative()));
        // p - 2 is odd, hence "negative".
        assert!(bool::from((-&two).is_negative()));
        assert_eq!(-&(-&two), two);
    }

    #[test]
    fn encoding_is_canonical() {
        // 2^255 - 18 encodes the same element as 1.
        let mut almost_p = [0xffu8; 32];
        almost_p[0] = 0xee;
        almost_p[31] = 0x7f;
        let one = FieldElement::from_bytes_255(&almost_p);
        assert_eq!(one, FieldElement::one());
        assert_eq!(one.to_bytes()[0], 1);
    }
}
