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

//! The birational map from the Edwards form of Curve25519 onto the
//! Montgomery form used by X25519.
//!
//! Only the coordinate conversion is provided; the X25519 function
//! itself, and the Montgomery ladder that would drive it, are out of
//! scope.  The map sends the Edwards point \\((x, y)\\) to the
//! Montgomery \\(u\\)-coordinate
//! $$
//! u = \frac{1 + y}{1 - y}.
//! $$
//! Note that this map is not injective: both \\((x, y)\\) and
//! \\((-x, y)\\) have the same \\(u\\).

use core::fmt::Debug;

use crate::edwards::{AffinePoint, EdwardsPoint};
use crate::errors::CurveError;
use crate::field::FieldElement;

/// A Montgomery `u`-coordinate in its 32-byte little-endian encoding.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct MontgomeryPoint(pub [u8; 32]);

impl Debug for MontgomeryPoint {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "MontgomeryPoint: {:?}", self.as_bytes())
    }
}

impl MontgomeryPoint {
    /// View this `MontgomeryPoint` as an array of bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Copy the bytes of this `MontgomeryPoint`.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0
    }
}

impl AffinePoint {
    /// Convert this point to its Montgomery `u`-coordinate,
    /// \\(u = (1 + y)/(1 - y)\\).
    ///
    /// Fails for the two points with \\(y = 1\\) (the identity), where
    /// the map has a pole.
    pub fn to_montgomery(&self) -> Result<MontgomeryPoint, CurveError> {
        let one = FieldElement::one();
        let u = &(&one + &self.y) * &(&one - &self.y).invert()?;
        Ok(MontgomeryPoint(u.to_bytes()))
    }
}

impl EdwardsPoint {
    /// Convert this point to its Montgomery `u`-coordinate,
    /// \\(u = (Z + Y)/(Z - Y)\\).
    ///
    /// Fails for the identity, where the map has a pole.
    pub fn to_montgomery(&self) -> Result<MontgomeryPoint, CurveError> {
        let u = &(&self.Z + &self.Y) * &(&self.Z - &self.Y).invert()?;
        Ok(MontgomeryPoint(u.to_bytes()))
    }
}
