// -*- mode: rust; -*-
//
// This file is part of ed25519-ristretto.
// Copyright (c) 2017-2019 isis lovecruft
// See LICENSE for licensing information.
//
// Authors:
// - isis agora lovecruft <isis@patternsinthevoid.net>

//! An ed25519 signature.

use core::fmt::Debug;

use crate::edwards::CompressedEdwardsY;
use crate::errors::CurveError;
use crate::scalar::Scalar;

/// The length of an ed25519 signature in bytes.
pub const SIGNATURE_LENGTH: usize = 64;

/// An ed25519 signature.
///
/// On the wire, this is the compressed nonce commitment `R` followed by
/// the 32-byte little-endian scalar `s`.
#[derive(Clone, Eq, PartialEq)]
#[allow(non_snake_case)]
pub struct Signature {
    /// `R` is an `EdwardsPoint`, formed by using an hash function with
    /// 512-bits output to produce the digest of:
    ///
    /// - the nonce half of the `ExpandedSecretKey`, and
    /// - the message to be signed.
    ///
    /// This digest is then interpreted as a `Scalar` and reduced into an
    /// element in ℤ/lℤ.  The scalar is then multiplied into the distinguished
    /// basepoint to produce `R`, and `EdwardsPoint`.
    pub(crate) R: CompressedEdwardsY,

    /// `s` is a `Scalar`, formed by using an hash function with 512-bits output
    /// to produce the digest of:
    ///
    /// - the `r` portion of this `Signature`,
    /// - the `PublicKey` which should be used to verify this `Signature`, and
    /// - the message to be signed.
    ///
    /// This digest is then interpreted as a `Scalar` and reduced into an
    /// element in ℤ/lℤ.
    pub(crate) s: Scalar,
}

impl Debug for Signature {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Signature( R: {:?}, s: {:?} )", &self.R, &self.s)
    }
}

impl Signature {
    /// Convert this `Signature` to a byte array.
    #[inline]
    pub fn to_bytes(&self) -> [u8; SIGNATURE_LENGTH] {
        let mut signature_bytes: [u8; SIGNATURE_LENGTH] = [0u8; SIGNATURE_LENGTH];

        signature_bytes[..32].copy_from_slice(&self.R.as_bytes()[..]);
        signature_bytes[32..].copy_from_slice(&self.s.to_bytes()[..]);
        signature_bytes
    }

    /// Construct a `Signature` from a slice of bytes.
    ///
    /// # Scalar Malleability Checking
    ///
    /// The scalar half of the signature must lie below the group order;
    /// anything in `[l, 2^256)` is rejected as `OutOfRange`.  This
    /// matches RFC 8032's "0 <= s < l" requirement and forecloses the
    /// classic signature malleability of earlier implementations.
    #[inline]
    pub fn from_bytes(bytes: &[u8]) -> Result<Signature, CurveError> {
        if bytes.len() != SIGNATURE_LENGTH {
            return Err(CurveError::InvalidEncoding("expected 64 bytes"));
        }
        let mut lower: [u8; 32] = [0u8; 32];
        let mut upper: [u8; 32] = [0u8; 32];

        lower.copy_from_slice(&bytes[..32]);
        upper.copy_from_slice(&bytes[32..]);

        let s = Scalar::from_canonical_bytes(upper)?;

        Ok(Signature {
            R: CompressedEdwardsY(lower),
            s,
        })
    }
}

#[cfg(feature = "serde")]
use serde::de::Visitor;
#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[cfg(feature = "serde")]
impl Serialize for Signature {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_bytes(&self.to_bytes()[..])
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SignatureVisitor;

        impl<'de> Visitor<'de> for SignatureVisitor {
            type Value = Signature;

            fn expecting(&self, formatter: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                formatter.write_str("An ed25519 signature as 64 bytes.")
            }

            fn visit_bytes<E>(self, bytes: &[u8]) -> Result<Signature, E>
            where
                E: serde::de::Error,
            {
                Signature::from_bytes(bytes).map_err(serde::de::Error::custom)
            }
        }
        deserializer.deserialize_bytes(SignatureVisitor)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn from_bytes_rejects_wrong_length() {
        assert_eq!(
            Signature::from_bytes(&[0u8; 63]).unwrap_err(),
            CurveError::InvalidEncoding("expected 64 bytes"),
        );
        assert!(Signature::from_bytes(&[0u8; 65]).is_err());
    }

    #[test]
    fn from_bytes_rejects_unreduced_scalar() {
        let mut bytes = [0u8; 64];
        // s = 2^256 - 1 is far above the group order.
        for byte in bytes[32..].iter_mut() {
            *byte = 0xff;
        }
        assert_eq!(
            Signature::from_bytes(&bytes).unwrap_err(),
            CurveError::OutOfRange("scalar must be below the group order"),
        );
    }

    #[test]
    fn byte_roundtrip() {
        let mut bytes = [0u8; 64];
        bytes[0] = 0x58;
        bytes[32] = 0x07;
        let sig = Signature::from_bytes(&bytes).unwrap();
        assert_eq!(sig.to_bytes(), bytes);
    }
}
