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

//! This module contains various constants (such as curve parameters
//! and useful field elements like `sqrt(-1)`), as well as the 8-torsion
//! subgroup used by tests and cofactor handling.
//!
//! Most of the constants are given with
//! `LONG_DESCRIPTIVE_UPPER_CASE_NAMES`, but they can be brought into
//! scope using a `let` binding:
//!
//! ```
//! use ed25519_ristretto::constants;
//!
//! let B = &constants::ED25519_BASEPOINT_POINT;
//! let l = &constants::BASEPOINT_ORDER;
//! ```

#![allow(non_snake_case)]

use num_bigint::BigUint;
use once_cell::sync::Lazy;

use crate::edwards::{AffinePoint, CompressedEdwardsY, EdwardsPoint};
use crate::field::{FieldElement, FIELD_P};
use crate::ristretto::RistrettoPoint;
use crate::scalar::GROUP_ORDER;

fn field_constant(decimal: &str) -> FieldElement {
    let n = BigUint::parse_bytes(decimal.as_bytes(), 10).expect("well-formed decimal literal");
    FieldElement::from_biguint(n)
}

/// The field modulus, \\(p = 2\^{255} - 19\\).
pub static FIELD_MODULUS: Lazy<BigUint> = Lazy::new(|| FIELD_P.clone());

/// The order of the prime-order subgroup,
/// \\(\ell = 2\^{252} + 27742317777372353535851937790883648493\\).
pub static BASEPOINT_ORDER: Lazy<BigUint> = Lazy::new(|| GROUP_ORDER.clone());

/// The cofactor of the curve, \\(h = 8\\).
pub const COFACTOR: u8 = 8;

/// The Edwards curve parameter `a`, which is \\(-1 \bmod p\\).
pub static EDWARDS_A: Lazy<FieldElement> = Lazy::new(FieldElement::minus_one);

/// The Edwards curve parameter `d`, equal to \\(-121665/121666 \bmod p\\).
pub static EDWARDS_D: Lazy<FieldElement> = Lazy::new(|| {
    field_constant("37095705934669439343138083508754565189542113879843219016388785533085940283555")
});

/// Precomputed value of one of the square roots of -1 (mod p).
pub static SQRT_M1: Lazy<FieldElement> = Lazy::new(|| {
    field_constant("19681161376707505956807079304988542015446066515923890162744021073123829784752")
});

/// `= sqrt(a*d - 1)`, where `a = -1 (mod p)`, `d` are the Edwards curve
/// parameters.
pub static SQRT_AD_MINUS_ONE: Lazy<FieldElement> = Lazy::new(|| {
    field_constant("25063068953384623474111414158702152701244531502492656460079210482610430750235")
});

/// `= 1/sqrt(a-d)`, where `a = -1 (mod p)`, `d` are the Edwards curve
/// parameters.
pub static INVSQRT_A_MINUS_D: Lazy<FieldElement> = Lazy::new(|| {
    field_constant("54469307008909316920995813868745141605393597292927456921205312896311721017578")
});

/// `= 1 - d^2 (mod p)`, used by the Ristretto Elligator map.
pub static ONE_MINUS_D_SQ: Lazy<FieldElement> = Lazy::new(|| {
    field_constant("1159843021668779879193775521855586647937357759715417654439879720876111806838")
});

/// `= (d - 1)^2 (mod p)`, used by the Ristretto Elligator map.
pub static D_MINUS_ONE_SQ: Lazy<FieldElement> = Lazy::new(|| {
    field_constant("40440834346308536858101042469323190826248399146238708352240133220865137265952")
});

/// Basepoint has y = 4/5.
///
/// The sign bit is 0 since the basepoint has x chosen to be positive.
pub const ED25519_BASEPOINT_COMPRESSED: CompressedEdwardsY = CompressedEdwardsY([
    0x58, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66,
    0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66,
    0x66, 0x66,
]);

/// The Ed25519 basepoint, advised at window width 8 so fixed-base scalar
/// multiplication through it uses a shared precomputed table.
pub static ED25519_BASEPOINT_POINT: Lazy<AffinePoint> = Lazy::new(|| {
    let x = field_constant(
        "15112221349535400772501151409588531511454012693041857206046113283949847762202",
    );
    let y = field_constant(
        "46316835694926478169428394003475163141307993866256225615783033603165251855960",
    );
    AffinePoint::with_window(x, y, 8)
});

/// The Ed25519 basepoint, as a `RistrettoPoint`.
pub static RISTRETTO_BASEPOINT_POINT: Lazy<RistrettoPoint> =
    Lazy::new(|| RistrettoPoint(ED25519_BASEPOINT_POINT.to_extended()));

/// The compressed forms of the 8-torsion subgroup \\(\mathcal E[8]\\),
/// kept as hex literals so tests can exercise decoding against them.
pub const EIGHT_TORSION_COMPRESSED: [&str; 8] = [
    "0100000000000000000000000000000000000000000000000000000000000000",
    "c7176a703d4dd84fba3c0b760d10670f2a2053fa2c39ccc64ec7fd7792ac037a",
    "0000000000000000000000000000000000000000000000000000000000000080",
    "26e8958fc2b227b045c3f489f2ef98f0d5dfac05d3c63339b13802886d53fc05",
    "ecffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff7f",
    "26e8958fc2b227b045c3f489f2ef98f0d5dfac05d3c63339b13802886d53fc85",
    "0000000000000000000000000000000000000000000000000000000000000000",
    "c7176a703d4dd84fba3c0b760d10670f2a2053fa2c39ccc64ec7fd7792ac03fa",
];

/// The 8-torsion subgroup, decoded.
pub static EIGHT_TORSION: Lazy<[EdwardsPoint; 8]> = Lazy::new(|| {
    let decode = |s: &str| -> EdwardsPoint {
        let bytes = hex::decode(s).expect("well-formed torsion literal");
        CompressedEdwardsY::from_slice(&bytes)
            .expect("torsion literal is 32 bytes")
            .decompress()
            .expect("torsion literal decodes")
            .to_extended()
    };
    [
        decode(EIGHT_TORSION_COMPRESSED[0]),
        decode(EIGHT_TORSION_COMPRESSED[1]),
        decode(EIGHT_TORSION_COMPRESSED[2]),
        decode(EIGHT_TORSION_COMPRESSED[3]),
        decode(EIGHT_TORSION_COMPRESSED[4]),
        decode(EIGHT_TORSION_COMPRESSED[5]),
        decode(EIGHT_TORSION_COMPRESSED[6]),
        decode(EIGHT_TORSION_COMPRESSED[7]),
    ]
});

#[cfg(test)]
mod test {
    use super::*;
    use crate::traits::IsIdentity;

    /// Test that SQRT_M1 is a square root of -1.
    #[test]
    fn test_sqrt_minus_one() {
        let minus_one = FieldElement::minus_one();
        let sqrt_m1_sq = &*SQRT_M1 * &*SQRT_M1;
        assert_eq!(minus_one, sqrt_m1_sq);
        assert!(!bool::from(SQRT_M1.is_negative()));
    }

    #[test]
    fn test_d_vs_ratio() {
        // d = -121665/121666
        let a = FieldElement::from_u64(121665);
        let b = FieldElement::from_u64(121666);
        let d = &(-&a) * &b.invert().unwrap();
        assert_eq!(d, *EDWARDS_D);
    }

    #[test]
    fn test_sqrt_ad_minus_one() {
        let one = FieldElement::one();
        let ad_minus_one = &(&*EDWARDS_A * &*EDWARDS_D) - &one;
        assert_eq!(SQRT_AD_MINUS_ONE.square(), ad_minus_one);
    }

    #[test]
    fn test_invsqrt_a_minus_d() {
        let a_minus_d = &*EDWARDS_A - &*EDWARDS_D;
        let product = &INVSQRT_A_MINUS_D.square() * &a_minus_d;
        assert_eq!(product, FieldElement::one());
    }

    #[test]
    fn test_elligator_constants() {
        let one = FieldElement::one();
        let d_sq = EDWARDS_D.square();
        assert_eq!(&one - &d_sq, *ONE_MINUS_D_SQ);
        let d_minus_one = &*EDWARDS_D - &one;
        assert_eq!(d_minus_one.square(), *D_MINUS_ONE_SQ);
    }

    #[test]
    fn test_basepoint_decompresses_to_basepoint() {
        let decompressed = ED25519_BASEPOINT_COMPRESSED.decompress().unwrap();
        assert_eq!(decompressed, *ED25519_BASEPOINT_POINT);
        assert_eq!(ED25519_BASEPOINT_POINT.compress(), ED25519_BASEPOINT_COMPRESSED);
    }

    #[test]
    fn test_basepoint_is_on_curve() {
        // -x^2 + y^2 = 1 + d x^2 y^2
        let B = &*ED25519_BASEPOINT_POINT;
        let x_sq = B.to_extended().X.square();
        let y_sq = B.to_extended().Y.square();
        let lhs = &(&*EDWARDS_A * &x_sq) + &y_sq;
        let rhs = &FieldElement::one() + &(&*EDWARDS_D * &(&x_sq * &y_sq));
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn test_eight_torsion() {
        for torsion_point in EIGHT_TORSION.iter() {
            assert!(torsion_point.mul_by_pow_2(3).is_identity());
        }
    }

    #[test]
    fn test_four_torsion() {
        for torsion_point in EIGHT_TORSION.iter().step_by(2) {
            assert!(torsion_point.mul_by_pow_2(2).is_identity());
        }
    }

    #[test]
    fn test_two_torsion() {
        for torsion_point in EIGHT_TORSION.iter().step_by(4) {
            assert!(torsion_point.mul_by_pow_2(1).is_identity());
        }
    }
}
