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

//! Arithmetic on scalars (integers mod the group order).
//!
//! The group order is the prime
//! $$
//! \ell = 2\^{252} + 27742317777372353535851937790883648493,
//! $$
//! the order of the prime-order subgroup generated by the Ed25519
//! basepoint.  A `Scalar` holds its canonical representative in
//! \\([0, \ell)\\).

use core::ops::{Add, Mul, Sub};

use num_bigint::BigUint;
use num_traits::{One, Zero};
use once_cell::sync::Lazy;

use crate::encoding;
use crate::errors::CurveError;

/// The order \\(\ell\\) of the prime-order subgroup.
pub(crate) static GROUP_ORDER: Lazy<BigUint> = Lazy::new(|| {
    (BigUint::one() << 252u32) + BigUint::from(27_742_317_777_372_353_535_851_937_790_883_648_493u128)
});

/// An integer mod the group order, holding its canonical representative.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scalar(BigUint);

impl Scalar {
    /// The scalar zero.
    pub fn zero() -> Scalar {
        Scalar(BigUint::zero())
    }

    /// The scalar one.
    pub fn one() -> Scalar {
        Scalar(BigUint::one())
    }

    /// Construct a scalar by reducing a 256-bit little-endian integer
    /// mod \\(\ell\\).
    pub fn from_bytes_mod_order(bytes: [u8; 32]) -> Scalar {
        Scalar(encoding::biguint_from_bytes_le(&bytes) % &*GROUP_ORDER)
    }

    /// Construct a scalar by reducing a 512-bit little-endian integer
    /// mod \\(\ell\\).
    ///
    /// This is how hash outputs become scalars: both the deterministic
    /// nonce and the Fiat-Shamir challenge are SHA-512 digests reduced
    /// this way.
    pub fn from_bytes_mod_order_wide(bytes: &[u8; 64]) -> Scalar {
        Scalar(encoding::biguint_from_bytes_le(bytes) % &*GROUP_ORDER)
    }

    /// Attempt to construct a scalar from a canonical 32-byte
    /// little-endian representation.
    ///
    /// Fails when the value is \\(\geq \ell\\); used for the `s` half of
    /// a signature, which is invalid unless already reduced.
    pub fn from_canonical_bytes(bytes: [u8; 32]) -> Result<Scalar, CurveError> {
        let n = encoding::biguint_from_bytes_le(&bytes);
        if n >= *GROUP_ORDER {
            return Err(CurveError::OutOfRange("scalar must be below the group order"));
        }
        Ok(Scalar(n))
    }

    /// Construct a scalar by reducing an arbitrary-precision integer
    /// mod \\(\ell\\).
    pub fn from_biguint_mod_order(n: &BigUint) -> Scalar {
        Scalar(n % &*GROUP_ORDER)
    }

    /// The canonical 32-byte little-endian encoding of this scalar.
    pub fn to_bytes(&self) -> [u8; 32] {
        encoding::bytes32_le(&self.0)
    }

    /// Borrow the canonical integer representative.
    pub(crate) fn as_biguint(&self) -> &BigUint {
        &self.0
    }

    /// Test whether this scalar is zero.
    pub fn is_zero(&self) -> bool {
        <BigUint as Zero>::is_zero(&self.0)
    }
}

impl From<u64> for Scalar {
    fn from(n: u64) -> Scalar {
        Scalar(BigUint::from(n) % &*GROUP_ORDER)
    }
}

impl<'a, 'b> Add<&'b Scalar> for &'a Scalar {
    type Output = Scalar;
    fn add(self, rhs: &'b Scalar) -> Scalar {
        Scalar((&self.0 + &rhs.0) % &*GROUP_ORDER)
    }
}

impl<'a, 'b> Sub<&'b Scalar> for &'a Scalar {
    type Output = Scalar;
    fn sub(self, rhs: &'b Scalar) -> Scalar {
        Scalar((&self.0 + &*GROUP_ORDER - &rhs.0) % &*GROUP_ORDER)
    }
}

impl<'a, 'b> Mul<&'b Scalar> for &'a Scalar {
    type Output = Scalar;
    fn mul(self, rhs: &'b Scalar) -> Scalar {
        Scalar((&self.0 * &rhs.0) % &*GROUP_ORDER)
    }
}
