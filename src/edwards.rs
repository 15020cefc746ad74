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

// We allow non snake_case names because coordinates in projective space are
// traditionally denoted by the capitalisation of their respective
// counterparts in affine space.  Yeah, you heard me, rustc, I'm gonna have my
// affine and projective cakes and eat both of them too.
#![allow(non_snake_case)]

//! Group operations for Curve25519, in Edwards form.
//!
//! ## Curve overview
//!
//! Curve25519 in twisted Edwards form is the curve
//! $$
//! -x\^2 + y\^2 = 1 + d x\^2 y\^2
//! $$
//! over \\(\mathbb F\_{2\^{255} - 19}\\) with
//! \\(d = -121665/121666\\).
//!
//! Points are kept in two shapes:
//!
//! * `AffinePoint`: the pair \\((x, y)\\), plus the window-size advice
//!   and cached precomputation used by fixed-base scalar multiplication;
//! * `EdwardsPoint`: extended twisted Edwards coordinates
//!   \\((X : Y : Z : T)\\) with \\(x = X/Z\\), \\(y = Y/Z\\),
//!   \\(xy = T/Z\\), in which addition and doubling need no inversions.
//!
//! The compressed wire format is `CompressedEdwardsY`: the 32-byte
//! little-endian encoding of \\(y\\), with the sign of \\(x\\) in bit 255
//! (RFC 8032 §5.1.3).
//!
//! ## Scalar multiplication
//!
//! Two ladders are provided.  The wNAF ladder behind the `*` operators
//! recodes the scalar into signed windows against a table of odd
//! multiples, accumulating a balancing dummy register so the sequence of
//! group operations is independent of the scalar's bit pattern.  The
//! `mul_vartime` ladder is a plain double-and-add that leaks the scalar
//! through timing, and is reserved for public inputs such as signature
//! verification.

use core::fmt::Debug;
use core::ops::{Add, Mul, Neg, Sub};

use std::sync::Arc;

use num_bigint::BigUint;
use num_traits::Zero;
use once_cell::sync::OnceCell;

use crate::constants;
use crate::encoding;
use crate::errors::CurveError;
use crate::field::{FieldElement, FIELD_P};
use crate::scalar::{Scalar, GROUP_ORDER};
use crate::traits::Identity;

// ------------------------------------------------------------------------
// Compressed points
// ------------------------------------------------------------------------

/// In "Edwards y" / "Ed25519" format, the curve point \\((x,y)\\) is
/// determined by the \\(y\\)-coordinate and the sign of \\(x\\).
///
/// The first 255 bits of a `CompressedEdwardsY` represent the
/// \\(y\\)-coordinate.  The high bit of the 32nd byte gives the sign of
/// \\(x\\).
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct CompressedEdwardsY(pub [u8; 32]);

impl Debug for CompressedEdwardsY {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "CompressedEdwardsY: {:?}", self.as_bytes())
    }
}

impl CompressedEdwardsY {
    /// View this `CompressedEdwardsY` as an array of bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Copy the bytes of this `CompressedEdwardsY`.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// Construct a `CompressedEdwardsY` from a slice of bytes.
    ///
    /// Fails unless the slice is exactly 32 bytes long.
    pub fn from_slice(bytes: &[u8]) -> Result<CompressedEdwardsY, CurveError> {
        if bytes.len() != 32 {
            return Err(CurveError::InvalidEncoding("expected 32 bytes"));
        }
        let mut tmp = [0u8; 32];
        tmp.copy_from_slice(bytes);
        Ok(CompressedEdwardsY(tmp))
    }

    /// Attempt to decompress to an `AffinePoint`, per RFC 8032 §5.1.3.
    ///
    /// # Return
    ///
    /// - `Err(OutOfRange)` when the encoded \\(y \geq p\\);
    /// - `Err(NotOnCurve)` when the recovered \\(x\^2\\) has no root;
    /// - the decoded point otherwise.  No on-curve check beyond the
    ///   square-root test is performed.
    pub fn decompress(&self) -> Result<AffinePoint, CurveError> {
        let y_int = encoding::biguint_from_bytes_255_le(&self.0);
        if y_int >= *FIELD_P {
            return Err(CurveError::OutOfRange("y coordinate must be below the field modulus"));
        }
        let sign_bit = (self.0[31] >> 7) == 1;

        let y = FieldElement::from_biguint(y_int);
        let yy = y.square();
        let one = FieldElement::one();
        // x^2 = (y^2 - 1) / (d y^2 + 1); the denominator is never zero
        // since -1/d is nonsquare.
        let u = &yy - &one;
        let v = &(&yy * &*constants::EDWARDS_D) + &one;
        let (is_valid, mut x) = FieldElement::sqrt_ratio(&u, &v);
        if !bool::from(is_valid) {
            return Err(CurveError::NotOnCurve);
        }

        // sqrt_ratio returned the nonnegative root; flip to match the
        // encoded sign of x.
        if bool::from(x.is_negative()) != sign_bit {
            x = -&x;
        }
        Ok(AffinePoint::from_coordinates(x, y))
    }
}

// ------------------------------------------------------------------------
// Affine points
// ------------------------------------------------------------------------

/// An affine point \\((x, y)\\) on the curve.
///
/// Besides its coordinates, an `AffinePoint` carries the window-size
/// advice for the wNAF ladder and owns the table of precomputed multiples
/// built for that window.  The table is built on first use, shared by
/// clones, dropped with the point, and discarded whenever the window
/// size changes.
#[derive(Clone)]
pub struct AffinePoint {
    pub(crate) x: FieldElement,
    pub(crate) y: FieldElement,
    window_size: u8,
    table: OnceCell<Arc<Vec<EdwardsPoint>>>,
}

impl Debug for AffinePoint {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "AffinePoint{{\n\tx: {:?},\n\ty: {:?}\n}}", &self.x, &self.y)
    }
}

impl PartialEq for AffinePoint {
    fn eq(&self, other: &AffinePoint) -> bool {
        self.x == other.x && self.y == other.y
    }
}

impl Eq for AffinePoint {}

impl Default for AffinePoint {
    fn default() -> AffinePoint {
        AffinePoint::identity()
    }
}

impl Identity for AffinePoint {
    fn identity() -> AffinePoint {
        AffinePoint::from_coordinates(FieldElement::zero(), FieldElement::one())
    }
}

/// The wNAF ladder needs 256 divisible by the window width, and a window
/// beyond 16 bits would ask for a table that cannot fit in memory.
fn validate_window_size(w: u8) -> Result<(), CurveError> {
    if w == 0 || w > 16 || 256 % (w as usize) != 0 {
        return Err(CurveError::InvalidArgument("window size must be 1, 2, 4, 8, or 16"));
    }
    Ok(())
}

impl AffinePoint {
    /// Create a point from raw coordinates.
    ///
    /// No on-curve verification is performed; validation happens through
    /// `CompressedEdwardsY::decompress`.
    pub(crate) fn from_coordinates(x: FieldElement, y: FieldElement) -> AffinePoint {
        AffinePoint {
            x,
            y,
            window_size: 1,
            table: OnceCell::new(),
        }
    }

    pub(crate) fn with_window(x: FieldElement, y: FieldElement, window_size: u8) -> AffinePoint {
        AffinePoint {
            x,
            y,
            window_size,
            table: OnceCell::new(),
        }
    }

    /// Borrow the affine \\(x\\)-coordinate.
    pub fn x(&self) -> &FieldElement {
        &self.x
    }

    /// Borrow the affine \\(y\\)-coordinate.
    pub fn y(&self) -> &FieldElement {
        &self.y
    }

    /// Compress this point into `CompressedEdwardsY` format.
    pub fn compress(&self) -> CompressedEdwardsY {
        let mut s = self.y.to_bytes();
        s[31] ^= self.x.is_negative().unwrap_u8() << 7;
        CompressedEdwardsY(s)
    }

    /// Convert to extended coordinates.
    pub fn to_extended(&self) -> EdwardsPoint {
        EdwardsPoint {
            X: self.x.clone(),
            Y: self.y.clone(),
            Z: FieldElement::one(),
            T: &self.x * &self.y,
        }
    }

    /// The window width currently advised for the wNAF ladder.
    pub fn window_size(&self) -> u8 {
        self.window_size
    }

    /// Change the wNAF window width, discarding any cached table so the
    /// next multiplication rebuilds it at the new width.
    pub fn set_window_size(&mut self, window_size: u8) -> Result<(), CurveError> {
        validate_window_size(window_size)?;
        self.window_size = window_size;
        self.table = OnceCell::new();
        Ok(())
    }

    /// Return a copy of this point with the given window width and its
    /// precomputation table already built.
    ///
    /// Dropping the returned point releases the table.
    pub fn precompute(&self, window_size: u8) -> Result<AffinePoint, CurveError> {
        validate_window_size(window_size)?;
        let mut point = self.clone();
        point.window_size = window_size;
        point.table = OnceCell::new();
        // A throwaway multiplication by one populates the table.
        let _ = point.mul_window(&Scalar::one());
        Ok(point)
    }

    /// Fixed-base scalar multiplication through the cached window table.
    pub(crate) fn mul_window(&self, scalar: &Scalar) -> EdwardsPoint {
        let w = self.window_size as usize;
        if w == 1 {
            // Width-one tables are cheap to rebuild and are not cached.
            let table = self.to_extended().precompute_window(1);
            return wnaf_mul(&table, 1, scalar);
        }
        let table = self.table.get_or_init(|| {
            let raw = self.to_extended().precompute_window(w);
            // Normalizing to Z = 1 lets every ladder lookup skip the
            // projective bookkeeping.
            Arc::new(EdwardsPoint::normalize(&raw))
        });
        wnaf_mul(&table[..], w, scalar)
    }

    /// Multiply by a scalar, returning the affine result.
    pub fn multiply(&self, scalar: &Scalar) -> AffinePoint {
        self.mul_window(scalar).to_affine()
    }
}

// ------------------------------------------------------------------------
// Extended points
// ------------------------------------------------------------------------

/// An `EdwardsPoint` represents a point on the Edwards form of Curve25519
/// in extended twisted Edwards coordinates \\((X : Y : Z : T)\\) with
/// \\(Z \neq 0\\) and \\(XY = ZT\\).
#[derive(Clone)]
pub struct EdwardsPoint {
    pub(crate) X: FieldElement,
    pub(crate) Y: FieldElement,
    pub(crate) Z: FieldElement,
    pub(crate) T: FieldElement,
}

impl Debug for EdwardsPoint {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "EdwardsPoint{{\n\tX: {:?},\n\tY: {:?},\n\tZ: {:?},\n\tT: {:?}\n}}",
            &self.X, &self.Y, &self.Z, &self.T
        )
    }
}

impl Identity for EdwardsPoint {
    fn identity() -> EdwardsPoint {
        EdwardsPoint {
            X: FieldElement::zero(),
            Y: FieldElement::one(),
            Z: FieldElement::one(),
            T: FieldElement::zero(),
        }
    }
}

impl Default for EdwardsPoint {
    fn default() -> EdwardsPoint {
        EdwardsPoint::identity()
    }
}

impl PartialEq for EdwardsPoint {
    /// Projective equality: \\(X\_1 Z\_2 = X\_2 Z\_1\\) and
    /// \\(Y\_1 Z\_2 = Y\_2 Z\_1\\).
    fn eq(&self, other: &EdwardsPoint) -> bool {
        &self.X * &other.Z == &other.X * &self.Z && &self.Y * &other.Z == &other.Y * &self.Z
    }
}

impl Eq for EdwardsPoint {}

impl EdwardsPoint {
    /// Convert to affine coordinates.
    pub fn to_affine(&self) -> AffinePoint {
        // Z is nonzero for every representable point.
        let z_inv = self.Z.invert().expect("extended point must have nonzero Z");
        self.to_affine_with_inv(&z_inv)
    }

    fn to_affine_with_inv(&self, z_inv: &FieldElement) -> AffinePoint {
        AffinePoint::from_coordinates(&self.X * z_inv, &self.Y * z_inv)
    }

    /// Convert a batch of points to affine coordinates with a single
    /// field inversion.
    pub fn to_affine_batch(points: &[EdwardsPoint]) -> Vec<AffinePoint> {
        let mut z_coordinates: Vec<FieldElement> =
            points.iter().map(|point| point.Z.clone()).collect();
        FieldElement::batch_invert(&mut z_coordinates);
        points
            .iter()
            .zip(z_coordinates.iter())
            .map(|(point, z_inv)| point.to_affine_with_inv(z_inv))
            .collect()
    }

    /// Rescale a batch of points so every `Z` is one.
    ///
    /// Applied to precompute tables and to the ladder's result pair, so
    /// later operations see pre-reduced coordinates.
    pub(crate) fn normalize(points: &[EdwardsPoint]) -> Vec<EdwardsPoint> {
        EdwardsPoint::to_affine_batch(points)
            .iter()
            .map(AffinePoint::to_extended)
            .collect()
    }

    /// Point doubling, using the `dbl-2008-hwcd` formulas.
    pub fn double(&self) -> EdwardsPoint {
        let A = self.X.square();
        let B = self.Y.square();
        let two = FieldElement::from_u64(2);
        let C = &two * &self.Z.square();
        let D = &*constants::EDWARDS_A * &A;
        let E = &(&(&self.X + &self.Y).square() - &A) - &B;
        let G = &D + &B;
        let F = &G - &C;
        let H = &D - &B;
        EdwardsPoint {
            X: &E * &F,
            Y: &G * &H,
            Z: &F * &G,
            T: &E * &H,
        }
    }

    /// Compute \\([2\^k] P \\) by successive doublings.
    pub fn mul_by_pow_2(&self, k: u32) -> EdwardsPoint {
        let mut r = self.clone();
        for _ in 0..k {
            r = r.double();
        }
        r
    }

    /// Multiply by the cofactor: return \\([8]P\\).
    pub fn mul_by_cofactor(&self) -> EdwardsPoint {
        self.mul_by_pow_2(3)
    }

    /// Variable-time scalar multiplication on `n mod l`.
    ///
    /// # Warning
    ///
    /// The running time leaks the scalar.  This is for use with *public*
    /// inputs only, such as the scalars of a signature being verified.
    /// Zero is rejected rather than mapped to the identity.
    pub fn mul_vartime(&self, n: &BigUint) -> Result<EdwardsPoint, CurveError> {
        if n.is_zero() {
            return Err(CurveError::InvalidArgument("scalar must be a positive integer"));
        }
        Ok(self.mul_biguint_vartime(n))
    }

    /// Right-to-left double-and-add, reading `n mod l` bit by bit.
    pub(crate) fn mul_biguint_vartime(&self, n: &BigUint) -> EdwardsPoint {
        let mut k = n % &*GROUP_ORDER;
        let mut q = EdwardsPoint::identity();
        let mut addend = self.clone();
        while !k.is_zero() {
            if k.bit(0) {
                q = &q + &addend;
            }
            addend = addend.double();
            k >>= 1usize;
        }
        q
    }

    /// Build the table of window multiples serving the wNAF ladder.
    ///
    /// For each of the `256/w + 1` windows this stores the multiples
    /// \\(P, 2P, \ldots, 2\^{w-1} P\\) of the window's base point, then
    /// doubles the last entry into the next window's base.
    pub(crate) fn precompute_window(&self, w: usize) -> Vec<EdwardsPoint> {
        let window_size = 1usize << (w - 1);
        let windows = 256 / w + 1;
        let mut points = Vec::with_capacity(windows * window_size);
        let mut p = self.clone();
        for _ in 0..windows {
            let mut base = p.clone();
            points.push(base.clone());
            for _ in 1..window_size {
                base = &base + &p;
                points.push(base.clone());
            }
            p = base.double();
        }
        points
    }
}

/// The wNAF ladder over a precomputed window table.
///
/// The scalar is consumed `w` bits at a time and recoded into the signed
/// range \\([-2\^{w-1}, 2\^{w-1}]\\), carrying into the next window when
/// the upper half is used; the extra 257th window absorbs the final
/// carry.  A zero window accumulates a table entry into the dummy
/// register `f` (negated on alternate windows so the dummies cancel
/// structural bias), keeping the sequence of group operations identical
/// for every scalar.
fn wnaf_mul(table: &[EdwardsPoint], w: usize, scalar: &Scalar) -> EdwardsPoint {
    let window_size = 1usize << (w - 1);
    let windows = 256 / w + 1;
    let mask = BigUint::from((1u32 << w) - 1);

    let mut n = scalar.as_biguint().clone();
    let mut p = EdwardsPoint::identity();
    let mut f = EdwardsPoint::identity();

    for window in 0..windows {
        let offset = window * window_size;
        let mut wbits = (&n & &mask).iter_u64_digits().next().unwrap_or(0) as i64;
        n >>= w;
        if wbits > window_size as i64 {
            wbits -= 1i64 << w;
            n += 1u32;
        }
        if wbits == 0 {
            let mut dummy = table[offset].clone();
            if window % 2 == 1 {
                dummy = -&dummy;
            }
            f = &f + &dummy;
        } else {
            let mut cached = table[offset + wbits.unsigned_abs() as usize - 1].clone();
            if wbits < 0 {
                cached = -&cached;
            }
            p = &p + &cached;
        }
    }
    debug_assert!(n.is_zero());

    let mut pair = EdwardsPoint::normalize(&[p, f]);
    pair.truncate(1);
    pair.swap_remove(0)
}

// ------------------------------------------------------------------------
// Group operations
// ------------------------------------------------------------------------

impl<'a, 'b> Add<&'b EdwardsPoint> for &'a EdwardsPoint {
    type Output = EdwardsPoint;
    /// Point addition, using the unified `add-2008-hwcd-4` formulas.
    fn add(self, other: &'b EdwardsPoint) -> EdwardsPoint {
        let A = &(&self.Y - &self.X) * &(&other.Y + &other.X);
        let B = &(&self.Y + &self.X) * &(&other.Y - &other.X);
        let F = &B - &A;
        if bool::from(F.is_zero()) {
            // The formulas degenerate when the points coincide.
            return self.double();
        }
        let two = FieldElement::from_u64(2);
        let C = &(&self.Z * &two) * &other.T;
        let D = &(&self.T * &two) * &other.Z;
        let E = &D + &C;
        let G = &B + &A;
        let H = &D - &C;
        EdwardsPoint {
            X: &E * &F,
            Y: &G * &H,
            Z: &F * &G,
            T: &E * &H,
        }
    }
}

impl<'a, 'b> Sub<&'b EdwardsPoint> for &'a EdwardsPoint {
    type Output = EdwardsPoint;
    fn sub(self, other: &'b EdwardsPoint) -> EdwardsPoint {
        self + &-other
    }
}

impl<'a> Neg for &'a EdwardsPoint {
    type Output = EdwardsPoint;
    fn neg(self) -> EdwardsPoint {
        EdwardsPoint {
            X: -&self.X,
            Y: self.Y.clone(),
            Z: self.Z.clone(),
            T: -&self.T,
        }
    }
}

impl<'a, 'b> Mul<&'b Scalar> for &'a EdwardsPoint {
    type Output = EdwardsPoint;
    /// Scalar multiplication through the wNAF ladder at window width one.
    fn mul(self, scalar: &'b Scalar) -> EdwardsPoint {
        let table = self.precompute_window(1);
        wnaf_mul(&table, 1, scalar)
    }
}

impl<'a, 'b> Mul<&'b EdwardsPoint> for &'a Scalar {
    type Output = EdwardsPoint;
    fn mul(self, point: &'b EdwardsPoint) -> EdwardsPoint {
        point * self
    }
}

impl<'a, 'b> Mul<&'b Scalar> for &'a AffinePoint {
    type Output = EdwardsPoint;
    /// Scalar multiplication through this point's cached window table.
    fn mul(self, scalar: &'b Scalar) -> EdwardsPoint {
        self.mul_window(scalar)
    }
}

impl<'a, 'b> Mul<&'b AffinePoint> for &'a Scalar {
    type Output = EdwardsPoint;
    fn mul(self, point: &'b AffinePoint) -> EdwardsPoint {
        point.mul_window(self)
    }
}

impl<'a, 'b> Add<&'b AffinePoint> for &'a AffinePoint {
    type Output = AffinePoint;
    fn add(self, other: &'b AffinePoint) -> AffinePoint {
        (&self.to_extended() + &other.to_extended()).to_affine()
    }
}

impl<'a, 'b> Sub<&'b AffinePoint> for &'a AffinePoint {
    type Output = AffinePoint;
    fn sub(self, other: &'b AffinePoint) -> AffinePoint {
        (&self.to_extended() - &other.to_extended()).to_affine()
    }
}

impl<'a> Neg for &'a AffinePoint {
    type Output = AffinePoint;
    fn neg(self) -> AffinePoint {
        AffinePoint::from_coordinates(-&self.x, self.y.clone())
    }
}

// ------------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::traits::IsIdentity;

    /// The compressed Ed25519 basepoint.
    static BASE_CMPRSSD_HEX: &str =
        "5866666666666666666666666666666666666666666666666666666666666666";

    fn base() -> AffinePoint {
        constants::ED25519_BASEPOINT_POINT.clone()
    }

    #[test]
    fn basepoint_compresses_to_known_bytes() {
        assert_eq!(hex::encode(base().compress().as_bytes()), BASE_CMPRSSD_HEX);
    }

    #[test]
    fn basepoint_roundtrip() {
        let decompressed = base().compress().decompress().unwrap();
        assert_eq!(decompressed, base());
    }

    #[test]
    fn decompress_rejects_y_above_modulus() {
        let bytes = [0xffu8; 32];
        assert_eq!(
            CompressedEdwardsY(bytes).decompress().unwrap_err(),
            CurveError::OutOfRange("y coordinate must be below the field modulus"),
        );
    }

    #[test]
    fn from_slice_rejects_wrong_length() {
        let bytes = hex::decode("aaaaaaaaaaaaaaaabbbbbbbbbbbbbbbbbc").unwrap();
        assert_eq!(
            CompressedEdwardsY::from_slice(&bytes).unwrap_err(),
            CurveError::InvalidEncoding("expected 32 bytes"),
        );
    }

    #[test]
    fn two_torsion_decodes_and_dies_under_cofactor() {
        let bytes =
            hex::decode("ecffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff7f")
                .unwrap();
        let point = CompressedEdwardsY::from_slice(&bytes)
            .unwrap()
            .decompress()
            .unwrap();
        assert!(point.to_extended().mul_by_cofactor().is_identity());
    }

    #[test]
    fn addition_matches_doubling() {
        let B = base().to_extended();
        assert_eq!(&B + &B, B.double());
    }

    #[test]
    fn identity_is_neutral() {
        let B = base().to_extended();
        let O = EdwardsPoint::identity();
        assert_eq!(&B + &O, B);
        assert_eq!(&O + &B, B);
        assert_eq!(&B - &B, O);
    }

    #[test]
    fn scalar_mul_distributes_over_addition() {
        let B = base().to_extended();
        let a = Scalar::from(2_236_086_653u64);
        let b = Scalar::from(123_456_789u64);
        let lhs = &B * &(&a + &b);
        let rhs = &(&B * &a) + &(&B * &b);
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn scalar_mul_is_associative_with_scalar_mul() {
        let B = base().to_extended();
        let a = Scalar::from(97u64);
        let b = Scalar::from(123_456_789u64);
        assert_eq!(&(&B * &a) * &b, &B * &(&a * &b));
    }

    #[test]
    fn zero_and_one_scalars() {
        let B = base().to_extended();
        assert!((&B * &Scalar::zero()).is_identity());
        assert_eq!(&B * &Scalar::one(), B);
    }

    #[test]
    fn group_order_annihilates_basepoint() {
        let l = Scalar::from_biguint_mod_order(&GROUP_ORDER);
        assert!(l.is_zero());
        assert!((&base().to_extended() * &l).is_identity());
    }

    #[test]
    fn vartime_agrees_with_wnaf() {
        let B = base().to_extended();
        let k = BigUint::from(8_675_309_253_553u64);
        let vartime = B.mul_vartime(&k).unwrap();
        let fixed = &B * &Scalar::from_biguint_mod_order(&k);
        assert_eq!(vartime, fixed);
    }

    #[test]
    fn vartime_rejects_zero() {
        let B = base().to_extended();
        assert!(B.mul_vartime(&BigUint::zero()).is_err());
    }

    #[test]
    fn window_size_does_not_change_results() {
        let k = Scalar::from(2_236_086_653_287_957u64);
        let expected = base().to_extended().mul_biguint_vartime(k.as_biguint());
        for w in [1u8, 2, 4, 8] {
            let mut point = base();
            point.set_window_size(w).unwrap();
            assert_eq!(&point * &k, expected, "window {}", w);
        }
    }

    #[test]
    fn precompute_returns_configured_point() {
        let precomputed = base().precompute(8).unwrap();
        assert_eq!(precomputed.window_size(), 8);
        assert_eq!(precomputed, base());
    }

    #[test]
    fn precompute_rejects_bad_window() {
        assert_eq!(
            base().precompute(7).unwrap_err(),
            CurveError::InvalidArgument("window size must be 1, 2, 4, 8, or 16"),
        );
        assert!(base().precompute(0).is_err());
        assert!(base().precompute(32).is_err());
    }

    #[test]
    fn batch_normalization_preserves_points() {
        let B = base().to_extended();
        let points = vec![B.double(), B.mul_by_pow_2(4), EdwardsPoint::identity()];
        let normalized = EdwardsPoint::normalize(&points);
        for (normal, original) in normalized.iter().zip(points.iter()) {
            assert_eq!(normal.Z, FieldElement::one());
            assert_eq!(normal, original);
        }
    }

    #[test]
    fn affine_negation() {
        let B = base();
        let minus_B = -&B;
        assert_eq!(&B - &B, AffinePoint::identity());
        assert_eq!((&B.to_extended() + &minus_B.to_extended()), EdwardsPoint::identity());
    }
}
