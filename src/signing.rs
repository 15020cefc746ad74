// -*- mode: rust; -*-
//
// This file is part of ed25519-ristretto.
// Copyright (c) 2017-2019 isis lovecruft
// See LICENSE for licensing information.
//
// Authors:
// - isis agora lovecruft <isis@patternsinthevoid.net>

//! ed25519 secret key types and signing.

use core::fmt::Debug;

use num_bigint::BigUint;
use num_traits::One;
use rand_core::{CryptoRng, RngCore};
use sha2::{Digest, Sha512};
use zeroize::Zeroize;

use crate::constants;
use crate::encoding;
use crate::errors::CurveError;
use crate::scalar::{Scalar, GROUP_ORDER};
use crate::signature::Signature;
use crate::verifying::PublicKey;

/// The length of an ed25519 secret key in bytes.
pub const SECRET_KEY_LENGTH: usize = 32;

/// The length of a keypair (secret key followed by public key) in bytes.
pub const KEYPAIR_LENGTH: usize = 64;

/// An EdDSA secret key.
///
/// The 32 bytes here are the RFC 8032 *seed*: the actual signing scalar
/// and the nonce prefix are derived from its SHA-512 expansion, see
/// [`ExpandedSecretKey`].
pub struct SecretKey(pub(crate) [u8; SECRET_KEY_LENGTH]);

impl Debug for SecretKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "SecretKey: <elided>")
    }
}

/// Overwrite secret key material with null bytes when it goes out of scope.
impl Drop for SecretKey {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl AsRef<[u8]> for SecretKey {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl SecretKey {
    /// Convert this secret key to a byte array.
    #[inline]
    pub fn to_bytes(&self) -> [u8; SECRET_KEY_LENGTH] {
        self.0
    }

    /// View this secret key as a byte array.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; SECRET_KEY_LENGTH] {
        &self.0
    }

    /// Construct a `SecretKey` from a slice of bytes.
    ///
    /// Fails unless the slice is exactly 32 bytes long.
    #[inline]
    pub fn from_bytes(bytes: &[u8]) -> Result<SecretKey, CurveError> {
        if bytes.len() != SECRET_KEY_LENGTH {
            return Err(CurveError::InvalidEncoding("expected 32 bytes"));
        }
        let mut bits: [u8; 32] = [0u8; 32];
        bits.copy_from_slice(bytes);
        Ok(SecretKey(bits))
    }

    /// Construct a `SecretKey` from a 64-character hex string.
    pub fn from_hex(hex_str: &str) -> Result<SecretKey, CurveError> {
        if hex_str.len() != 2 * SECRET_KEY_LENGTH {
            return Err(CurveError::InvalidEncoding("expected 64 hex characters"));
        }
        let bytes = encoding::decode_hex(hex_str)?;
        SecretKey::from_bytes(&bytes)
    }

    /// Construct a `SecretKey` from a positive integer below \\(2\^{256}\\),
    /// producing its canonical 32-byte little-endian form.
    pub fn from_biguint(n: &BigUint) -> Result<SecretKey, CurveError> {
        if *n < BigUint::one() {
            return Err(CurveError::OutOfRange("secret key integer must be positive"));
        }
        let bytes = encoding::biguint_to_bytes_le_padded(n, SECRET_KEY_LENGTH)
            .map_err(|_| CurveError::OutOfRange("secret key integer must be below 2^256"))?;
        SecretKey::from_bytes(&bytes)
    }

    /// Generate a `SecretKey` by rejection sampling.
    ///
    /// Up to 1024 candidates of 32 random bytes are drawn; a candidate
    /// is accepted iff its little-endian value lies strictly between 1
    /// and the group order.  Exhausting the attempts means the random
    /// source is returning garbage, and fails with `PrngExhausted`.
    pub fn generate<R>(csprng: &mut R) -> Result<SecretKey, CurveError>
    where
        R: CryptoRng + RngCore,
    {
        for _ in 0..1024 {
            let mut bytes = [0u8; SECRET_KEY_LENGTH];
            csprng.fill_bytes(&mut bytes);
            let candidate = encoding::biguint_from_bytes_le(&bytes);
            if candidate > BigUint::one() && candidate < *GROUP_ORDER {
                return Ok(SecretKey(bytes));
            }
        }
        Err(CurveError::PrngExhausted)
    }
}

/// An "expanded" secret key: the two halves of the SHA-512 expansion of
/// a [`SecretKey`].
///
/// The lower half, clamped per RFC 8032 and reduced mod \\(\ell\\), is
/// the signing scalar; the upper half is the nonce prefix feeding the
/// deterministic nonce derivation.
pub struct ExpandedSecretKey {
    pub(crate) key: Scalar,
    pub(crate) nonce: [u8; 32],
}

impl Debug for ExpandedSecretKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "ExpandedSecretKey: <elided>")
    }
}

/// Overwrite secret key material with null bytes when it goes out of scope.
impl Drop for ExpandedSecretKey {
    fn drop(&mut self) {
        self.key = Scalar::zero();
        self.nonce.zeroize();
    }
}

impl<'a> From<&'a SecretKey> for ExpandedSecretKey {
    /// Construct an `ExpandedSecretKey` from a `SecretKey`.
    fn from(secret_key: &'a SecretKey) -> ExpandedSecretKey {
        let mut h: Sha512 = Sha512::new();
        h.update(secret_key.as_bytes());
        let mut hash: [u8; 64] = [0u8; 64];
        hash.copy_from_slice(h.finalize().as_slice());

        let mut lower: [u8; 32] = [0u8; 32];
        let mut upper: [u8; 32] = [0u8; 32];
        lower.copy_from_slice(&hash[00..32]);
        upper.copy_from_slice(&hash[32..64]);

        // RFC 8032 clamping.
        lower[0] &= 248;
        lower[31] &= 127;
        lower[31] |= 64;

        ExpandedSecretKey {
            key: Scalar::from_bytes_mod_order(lower),
            nonce: upper,
        }
    }
}

impl ExpandedSecretKey {
    /// Sign a message with this `ExpandedSecretKey`, per RFC 8032 §5.1.6.
    #[allow(non_snake_case)]
    pub fn sign(&self, message: &[u8], public_key: &PublicKey) -> Signature {
        let mut h: Sha512 = Sha512::new();
        h.update(&self.nonce);
        h.update(message);
        let mut hash: [u8; 64] = [0u8; 64];
        hash.copy_from_slice(h.finalize().as_slice());
        let r = Scalar::from_bytes_mod_order_wide(&hash);

        let R = (&*constants::ED25519_BASEPOINT_POINT * &r)
            .to_affine()
            .compress();

        let mut h: Sha512 = Sha512::new();
        h.update(R.as_bytes());
        h.update(public_key.as_bytes());
        h.update(message);
        let mut hash: [u8; 64] = [0u8; 64];
        hash.copy_from_slice(h.finalize().as_slice());
        let k = Scalar::from_bytes_mod_order_wide(&hash);

        let s = &r + &(&k * &self.key);

        Signature { R, s }
    }
}

/// An ed25519 keypair.
pub struct Keypair {
    /// The secret half of this keypair.
    pub secret: SecretKey,
    /// The public half of this keypair.
    pub public: PublicKey,
}

impl Debug for Keypair {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Keypair( secret: <elided>, public: {:?} )", &self.public)
    }
}

impl Keypair {
    /// Generate an ed25519 keypair.
    pub fn generate<R>(csprng: &mut R) -> Result<Keypair, CurveError>
    where
        R: CryptoRng + RngCore,
    {
        let secret = SecretKey::generate(csprng)?;
        let public = PublicKey::from(&secret);
        Ok(Keypair { secret, public })
    }

    /// Convert this keypair to bytes: the secret key followed by the
    /// public key.
    pub fn to_bytes(&self) -> [u8; KEYPAIR_LENGTH] {
        let mut bytes: [u8; KEYPAIR_LENGTH] = [0u8; KEYPAIR_LENGTH];
        bytes[..SECRET_KEY_LENGTH].copy_from_slice(self.secret.as_bytes());
        bytes[SECRET_KEY_LENGTH..].copy_from_slice(self.public.as_bytes());
        bytes
    }

    /// Construct a `Keypair` from the bytes of a `SecretKey` and
    /// `PublicKey`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Keypair, CurveError> {
        if bytes.len() != KEYPAIR_LENGTH {
            return Err(CurveError::InvalidEncoding("expected 64 bytes"));
        }
        let secret = SecretKey::from_bytes(&bytes[..SECRET_KEY_LENGTH])?;
        let public = PublicKey::from_bytes(&bytes[SECRET_KEY_LENGTH..])?;
        Ok(Keypair { secret, public })
    }

    /// Sign a message with this keypair's secret key.
    pub fn sign(&self, message: &[u8]) -> Signature {
        ExpandedSecretKey::from(&self.secret).sign(message, &self.public)
    }

    /// Verify a signature on a message with this keypair's public key.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> Result<(), CurveError> {
        self.public.verify(message, signature)
    }
}

#[cfg(feature = "serde")]
use serde::de::Visitor;
#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[cfg(feature = "serde")]
impl Serialize for SecretKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_bytes(self.as_bytes())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for SecretKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SecretKeyVisitor;

        impl<'de> Visitor<'de> for SecretKeyVisitor {
            type Value = SecretKey;

            fn expecting(&self, formatter: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                formatter.write_str("An ed25519 secret key as 32 bytes.")
            }

            fn visit_bytes<E>(self, bytes: &[u8]) -> Result<SecretKey, E>
            where
                E: serde::de::Error,
            {
                SecretKey::from_bytes(bytes).map_err(serde::de::Error::custom)
            }
        }
        deserializer.deserialize_bytes(SecretKeyVisitor)
    }
}
