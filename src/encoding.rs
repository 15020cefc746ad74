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

//! Little-endian conversions between integers and wire bytes.
//!
//! Everything on the wire in this crate is little-endian: field elements,
//! scalars, and the `s` half of a signature.  The helpers here decode and
//! encode `BigUint`s at fixed widths and ingest hex strictly.

use num_bigint::BigUint;
use num_traits::One;

use crate::errors::CurveError;

/// Decode a little-endian byte string of any length.
pub(crate) fn biguint_from_bytes_le(bytes: &[u8]) -> BigUint {
    BigUint::from_bytes_le(bytes)
}

/// Decode 32 little-endian bytes, ignoring bit 255.
///
/// This is the ingestion rule shared by Ristretto decoding and the
/// Elligator map: the high bit of the last byte is cleared before the
/// value is interpreted.
pub(crate) fn biguint_from_bytes_255_le(bytes: &[u8; 32]) -> BigUint {
    let mask = (BigUint::one() << 255u32) - BigUint::one();
    BigUint::from_bytes_le(bytes) & mask
}

/// Encode `n` as exactly `len` little-endian bytes.
///
/// Fails when `n` does not fit in `len` bytes.
pub(crate) fn biguint_to_bytes_le_padded(n: &BigUint, len: usize) -> Result<Vec<u8>, CurveError> {
    let mut bytes = n.to_bytes_le();
    if bytes.len() > len {
        return Err(CurveError::OutOfRange("integer too large for encoding width"));
    }
    bytes.resize(len, 0);
    Ok(bytes)
}

/// Encode a canonically-reduced value as 32 little-endian bytes.
///
/// Callers guarantee `n < 2^256`; field elements and scalars always are.
pub(crate) fn bytes32_le(n: &BigUint) -> [u8; 32] {
    let bytes = n.to_bytes_le();
    debug_assert!(bytes.len() <= 32);
    let mut out = [0u8; 32];
    out[..bytes.len()].copy_from_slice(&bytes);
    out
}

/// Strict hex decoding: even length, `[0-9a-fA-F]` only.
pub(crate) fn decode_hex(s: &str) -> Result<Vec<u8>, CurveError> {
    hex::decode(s).map_err(|_| CurveError::InvalidEncoding("malformed hex string"))
}
