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

//! Errors which may occur while parsing keys, points, and signatures to
//! or from wire formats, and while verifying signatures.

use core::fmt;
use core::fmt::Display;

/// Errors raised by this crate.
///
/// Decoding functions distinguish structural failures (wrong length,
/// non-canonical bytes) from mathematical ones (a compressed `y` with no
/// square root on the curve), so callers handling untrusted input can
/// report what actually went wrong.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum CurveError {
    /// Byte or hex input was structurally malformed: wrong length, a
    /// character outside `[0-9a-fA-F]`, or a non-canonical encoding.
    InvalidEncoding(&'static str),
    /// A decoded integer fell outside its required range, e.g. a field
    /// element `>= p` or a signature scalar `>= l`.
    OutOfRange(&'static str),
    /// A compressed point decoded to coordinates with no square root,
    /// i.e. the bytes do not name a curve or group element.
    NotOnCurve,
    /// A caller-supplied value was rejected before any arithmetic ran:
    /// a zero scalar handed to the variable-time ladder, or a window
    /// size the precomputation cannot use.
    InvalidArgument(&'static str),
    /// Rejection sampling failed to find a key below the group order.
    /// This only happens when the random source is broken.
    PrngExhausted,
    /// The signature verification equation was not satisfied.
    VerificationFailed,
}

impl Display for CurveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            CurveError::InvalidEncoding(what) => write!(f, "Invalid encoding: {}", what),
            CurveError::OutOfRange(what) => write!(f, "Value out of range: {}", what),
            CurveError::NotOnCurve => write!(f, "Bytes do not encode a point in the group"),
            CurveError::InvalidArgument(what) => write!(f, "Invalid argument: {}", what),
            CurveError::PrngExhausted => write!(
                f,
                "Could not find a valid private key in 1024 attempts; the RNG is broken"
            ),
            CurveError::VerificationFailed => {
                write!(f, "Verification equation was not satisfied")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CurveError {}
