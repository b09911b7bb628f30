// Copyright (c) 2021-2022 Toposware, Inc.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! This module provides the curve arithmetic helpers this crate
//! requires on top of the `k256` secp256k1 implementation: affine
//! coordinate extraction, quadratic residuosity of base field
//! elements and recovery of a nonce point from its x-coordinate.

use super::error::SignatureError;

use k256::elliptic_curve::point::DecompressPoint;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::{AffinePoint, FieldElement};
use subtle::Choice;

/// Returns the affine coordinates of a point.
///
/// The point must not be the identity, which has no affine
/// representation.
pub(crate) fn decompose(point: &AffinePoint) -> (FieldElement, FieldElement) {
    let encoded = point.to_encoded_point(false);
    let x: Option<FieldElement> = encoded
        .x()
        .and_then(|bytes| FieldElement::from_bytes(bytes).into());
    let y: Option<FieldElement> = encoded
        .y()
        .and_then(|bytes| FieldElement::from_bytes(bytes).into());

    (
        x.expect("the identity point cannot be decomposed"),
        y.expect("the identity point cannot be decomposed"),
    )
}

/// Computes whether the Jacobi symbol of `element` is +1, i.e. whether
/// `element` is a non-zero square in the base field.
pub(crate) fn is_quadratic_residue(element: &FieldElement) -> Choice {
    element.sqrt().is_some() & !element.is_zero()
}

/// Recovers the unique curve point with x-coordinate `x` whose
/// y-coordinate has Jacobi symbol +1.
///
/// The field characteristic is congruent to 3 mod 4, so exactly one of
/// the two y-roots of a valid x-coordinate is a quadratic residue.
pub(crate) fn lift_x(x: &FieldElement) -> Result<AffinePoint, SignatureError> {
    let x_bytes = x.to_bytes();

    let even = Option::<AffinePoint>::from(AffinePoint::decompress(&x_bytes, Choice::from(0u8)))
        .ok_or(SignatureError::RNotOnCurve)?;
    let (_, y) = decompose(&even);
    if bool::from(is_quadratic_residue(&y)) {
        return Ok(even);
    }

    let odd = Option::<AffinePoint>::from(AffinePoint::decompress(&x_bytes, Choice::from(1u8)))
        .ok_or(SignatureError::RNotOnCurve)?;
    let (_, y) = decompose(&odd);
    if bool::from(is_quadratic_residue(&y)) {
        Ok(odd)
    } else {
        Err(SignatureError::YNotQuadraticResidue)
    }
}
