// Copyright (c) 2021-2022 Toposware, Inc.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! This module provides an implementation of batched signature
//! verification through a randomised linear combination of the
//! individual verification equations.

use super::curve;
use super::encoding;
use super::error::SignatureError;
use super::MESSAGE_LENGTH;
use super::{PublicKey, Signature};

use k256::elliptic_curve::Field;
use k256::{NonZeroScalar, ProjectivePoint, Scalar};
use rand_core::{CryptoRng, RngCore};

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// Verifies a batch of signatures with their associated public keys.
///
/// The whole batch is accepted exactly when every individual signature
/// would verify on its own. A failing batch does not reveal which
/// signature is at fault.
///
/// The provided `rng` is the source of the per-equation blinding
/// coefficients and must be unpredictable to whoever produced the
/// signatures, otherwise combinations of invalid signatures could
/// cancel out. The coefficient of the first equation is pinned to one,
/// which saves a scalar multiplication without weakening the check.
pub fn verify_batch(
    signatures: &[Signature],
    public_keys: &[PublicKey],
    messages: &[[u8; MESSAGE_LENGTH]],
    mut rng: impl CryptoRng + RngCore,
) -> Result<(), SignatureError> {
    assert!(
        signatures.len() == public_keys.len(),
        "We should have the same number of signatures than public keys"
    );
    assert!(
        messages.len() == public_keys.len(),
        "We should have the same number of messages than public keys"
    );

    let (scalars, challenges) = batch_coefficients(signatures, public_keys, messages, &mut rng);

    verify_prepared_batch(scalars, challenges, signatures, public_keys)
}

/// Prepares a batch verification of Schnorr signatures.
/// It computes the challenge for each signature and the random scalars
/// blinding each verification equation.
fn batch_coefficients(
    signatures: &[Signature],
    public_keys: &[PublicKey],
    messages: &[[u8; MESSAGE_LENGTH]],
    mut rng: impl CryptoRng + RngCore,
) -> (Vec<Scalar>, Vec<Scalar>) {
    let challenges: Vec<Scalar> = signatures
        .iter()
        .zip(public_keys)
        .zip(messages)
        .map(|((sig, pkey), message)| {
            encoding::challenge(&sig.x.to_bytes(), &pkey.to_bytes(), message)
        })
        .collect();

    let scalars: Vec<Scalar> = (0..signatures.len())
        .map(|i| {
            if i == 0 {
                Scalar::ONE
            } else {
                *NonZeroScalar::random(&mut rng)
            }
        })
        .collect();

    (scalars, challenges)
}

/// Verifies a batch with a set of blinding scalars and challenges.
fn verify_prepared_batch(
    scalars: Vec<Scalar>,
    challenges: Vec<Scalar>,
    signatures: &[Signature],
    public_keys: &[PublicKey],
) -> Result<(), SignatureError> {
    // Compute the linear combination of the blinding scalars with the
    // response scalars. This is used to multiply the curve basepoint.
    let lin_comb: Scalar = signatures
        .iter()
        .map(|sig| sig.s)
        .zip(scalars.iter())
        .map(|(s, a)| *a * s)
        .sum();
    let scaled_basepoint = ProjectivePoint::GENERATOR * lin_comb;

    // Recover each nonce point from its x-coordinate and accumulate
    // the right-hand side Σ a[i].R[i] + Σ a[i]e[i].P[i].
    let mut rhs = ProjectivePoint::IDENTITY;
    for ((sig, pkey), (a, e)) in signatures
        .iter()
        .zip(public_keys)
        .zip(scalars.iter().zip(challenges.iter()))
    {
        let r_point = curve::lift_x(&sig.x)?;
        rhs += ProjectivePoint::from(r_point) * a + ProjectivePoint::from(pkey.0) * (a * e);
    }

    // This differs from a single Schnorr verification, as we check
    // (Σ a[i]s[i]).G == Σ a[i].R[i] + Σ a[i]e[i].P[i]
    if scaled_basepoint == rhs {
        Ok(())
    } else {
        Err(SignatureError::InvalidSignature)
    }
}
