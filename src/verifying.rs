// -*- mode: rust; -*-
//
// This file is part of ed25519-ristretto.
// Copyright (c) 2017-2019 isis lovecruft
// See LICENSE for licensing information.
//
// Authors:
// - isis agora lovecruft <isis@patternsinthevoid.net>

//! ed25519 public keys and signature verification.

use core::fmt::Debug;

use sha2::{Digest, Sha512};

use crate::constants;
use crate::edwards::{AffinePoint, CompressedEdwardsY};
use crate::errors::CurveError;
use crate::scalar::Scalar;
use crate::signature::Signature;
use crate::signing::{ExpandedSecretKey, SecretKey};
use crate::traits::IsIdentity;

/// The length of an ed25519 public key in bytes.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// An ed25519 public key.
///
/// Holds both the compressed wire form and the decompressed point, so
/// repeated verifications pay for decompression once.
#[derive(Clone, Eq, PartialEq)]
pub struct PublicKey(pub(crate) CompressedEdwardsY, pub(crate) AffinePoint);

impl Debug for PublicKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "PublicKey({:?})", self.0)
    }
}

impl AsRef<[u8]> for PublicKey {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl PublicKey {
    /// Convert this public key to a byte array.
    #[inline]
    pub fn to_bytes(&self) -> [u8; PUBLIC_KEY_LENGTH] {
        self.0.to_bytes()
    }

    /// View this public key as a byte array.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        self.0.as_bytes()
    }

    /// Construct a `PublicKey` from a slice of bytes.
    ///
    /// Fails when the slice is not 32 bytes, when the encoded `y` is
    /// out of range, or when the bytes do not name a curve point.
    #[inline]
    pub fn from_bytes(bytes: &[u8]) -> Result<PublicKey, CurveError> {
        let compressed = CompressedEdwardsY::from_slice(bytes)?;
        let point = compressed.decompress()?;
        Ok(PublicKey(compressed, point))
    }

    /// Verify a signature on a message with this public key.
    ///
    /// The check is the cofactored verification equation
    /// $$
    /// [8](R + [k]A - [s]B) = \mathcal O,
    /// $$
    /// where \\(k = H(R \| A \| M)\\): multiplying by the cofactor
    /// absorbs any small-torsion component of `R` or `A`.  All scalar
    /// multiplications use the variable-time ladder, since every input
    /// here is public.
    ///
    /// # Return
    ///
    /// Returns `Ok(())` if the signature is valid, and
    /// `Err(VerificationFailed)` otherwise.  A `Signature` whose `R`
    /// half does not decode to a curve point is reported the same way:
    /// once a signature value has been constructed, nothing it contains
    /// raises a structural error from here.
    #[allow(non_snake_case)]
    pub fn verify(&self, message: &[u8], signature: &Signature) -> Result<(), CurveError> {
        // An R that names no curve point cannot satisfy the equation.
        let R = match signature.R.decompress() {
            Ok(point) => point,
            Err(_) => return Err(CurveError::VerificationFailed),
        };

        let mut h: Sha512 = Sha512::new();
        h.update(signature.R.as_bytes());
        h.update(self.as_bytes());
        h.update(message);
        let mut hash: [u8; 64] = [0u8; 64];
        hash.copy_from_slice(h.finalize().as_slice());
        let k = Scalar::from_bytes_mod_order_wide(&hash);

        let A = self.1.to_extended();
        let kA = A.mul_biguint_vartime(k.as_biguint());
        let sB = constants::ED25519_BASEPOINT_POINT
            .to_extended()
            .mul_biguint_vartime(signature.s.as_biguint());

        let lhs = (&(&R.to_extended() + &kA) - &sB).mul_by_cofactor();
        if lhs.is_identity() {
            Ok(())
        } else {
            Err(CurveError::VerificationFailed)
        }
    }
}

impl<'a> From<&'a SecretKey> for PublicKey {
    /// Derive this public key from its corresponding `SecretKey`.
    fn from(secret_key: &SecretKey) -> PublicKey {
        let expanded: ExpandedSecretKey = secret_key.into();
        (&expanded).into()
    }
}

impl<'a> From<&'a ExpandedSecretKey> for PublicKey {
    /// Derive this public key from its corresponding `ExpandedSecretKey`.
    fn from(expanded_secret_key: &ExpandedSecretKey) -> PublicKey {
        let point = (&*constants::ED25519_BASEPOINT_POINT * &expanded_secret_key.key).to_affine();
        let compressed = point.compress();
        PublicKey(compressed, point)
    }
}

#[cfg(feature = "serde")]
use serde::de::Visitor;
#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[cfg(feature = "serde")]
impl Serialize for PublicKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_bytes(self.as_bytes())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PublicKeyVisitor;

        impl<'de> Visitor<'de> for PublicKeyVisitor {
            type Value = PublicKey;

            fn expecting(&self, formatter: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                formatter.write_str("An ed25519 public key as 32 bytes.")
            }

            fn visit_bytes<E>(self, bytes: &[u8]) -> Result<PublicKey, E>
            where
                E: serde::de::Error,
            {
                PublicKey::from_bytes(bytes).map_err(serde::de::Error::custom)
            }
        }
        deserializer.deserialize_bytes(PublicKeyVisitor)
    }
}
