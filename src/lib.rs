// -*- mode: rust; coding: utf-8; -*-
//
// This file is part of ed25519-ristretto.
// Copyright (c) 2016-2021 isis agora lovecruft
// Copyright (c) 2016-2019 Henry de Valence
// See LICENSE for licensing information.
//
// Authors:
// - isis agora lovecruft <isis@patternsinthevoid.net>
// - Henry de Valence <hdevalence@hdevalence.ca>

//! # ed25519-ristretto
//!
//! **Ed25519 signing and verification, together with the Ristretto255
//! prime-order group, over a big-integer field arithmetic backend.**
//!
//! This crate provides:
//!
//! * EdDSA key generation, signing, and verification as specified by
//!   [RFC 8032 §5.1](https://tools.ietf.org/html/rfc8032#section-5.1),
//!   with the *cofactored* verification equation;
//! * group operations on the Edwards form of Curve25519 in affine and
//!   extended coordinates, including a windowed-NAF scalar
//!   multiplication ladder with cached precomputation;
//! * the [Ristretto](https://ristretto.group) encoding, decoding, and
//!   Elligator hash-to-group map, exposing a prime-order group with
//!   canonical encodings over the cofactor-8 curve;
//! * the birational map onto the Montgomery `u`-coordinate used by
//!   X25519.
//!
//! # A note on timing
//!
//! Field and scalar arithmetic are carried out on arbitrary-precision
//! integers, whose running time depends on operand values.  The wNAF
//! ladder retains its balanced structure (a dummy accumulator absorbs
//! zero windows), but this crate does not attempt to be constant-time
//! at the level a fixed-limb backend can, and explicitly variable-time
//! operations are documented as such.  Verification uses only public
//! inputs, so the variable-time ladder is used there by design.

#![warn(missing_docs)]

// Modules for low-level operations directly on field elements and curve points.

pub mod field;
pub mod scalar;

pub mod edwards;
pub mod montgomery;
pub mod ristretto;

// Low-level curve and point constants.

pub mod constants;

// Common traits and miscellaneous utilities.

pub mod errors;
pub mod traits;

mod encoding;

// EdDSA keys and signatures.

mod signature;
mod signing;
mod verifying;

pub use crate::edwards::{AffinePoint, CompressedEdwardsY, EdwardsPoint};
pub use crate::errors::CurveError;
pub use crate::field::FieldElement;
pub use crate::montgomery::MontgomeryPoint;
pub use crate::ristretto::{CompressedRistretto, RistrettoPoint};
pub use crate::scalar::Scalar;
pub use crate::signature::{Signature, SIGNATURE_LENGTH};
pub use crate::signing::{
    ExpandedSecretKey, Keypair, SecretKey, KEYPAIR_LENGTH, SECRET_KEY_LENGTH,
};
pub use crate::verifying::{PublicKey, PUBLIC_KEY_LENGTH};
