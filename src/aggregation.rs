// Copyright (c) 2021-2022 Toposware, Inc.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! This module provides two non-interactive multi-signer schemes
//! producing ordinary 64-byte signatures.
//!
//! The naive scheme signs under the plain sum of the participants'
//! public keys. It is insecure when an adversary may choose its key as
//! a function of the honest keys (rogue-key attacks) and is retained
//! for compatibility with legacy verifiers only. The MuSig scheme
//! weights every key by a coefficient bound to the whole key set,
//! which defeats rogue-key attacks.
//!
//! Both schemes derive one deterministic nonce per participant and
//! aggregate the nonce points, so the resulting signature commits to
//! every private key without any of them leaving its owner.

use super::curve;
use super::encoding;
use super::error::SignatureError;
use super::signature::deterministic_nonce;
use super::MESSAGE_LENGTH;
use super::{PrivateKey, PublicKey, Signature};

use k256::elliptic_curve::group::Group;
use k256::elliptic_curve::Field;
use k256::{ProjectivePoint, Scalar};
use sha2::{Digest, Sha256};
use subtle::ConditionallySelectable;
use zeroize::Zeroize;

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// Computes a signature over `message` verifiable against the sum of
/// the public keys matching the provided private keys.
///
/// Fails when the key sequence is empty, when any private scalar is
/// zero, or when the keys or nonces cancel out to the identity point.
pub fn naive_key_aggregation(
    private_keys: &[PrivateKey],
    message: &[u8; MESSAGE_LENGTH],
) -> Result<Signature, SignatureError> {
    if private_keys.is_empty() {
        return Err(SignatureError::EmptyKeySet);
    }

    let mut key_scalars = Vec::with_capacity(private_keys.len());
    let mut aggregated_key = ProjectivePoint::IDENTITY;
    for skey in private_keys {
        if bool::from(skey.0.is_zero()) {
            return Err(SignatureError::InvalidPrivateKey);
        }
        aggregated_key += ProjectivePoint::GENERATOR * skey.0;
        key_scalars.push(skey.0);
    }

    let signature = sign_aggregated(private_keys, &key_scalars, aggregated_key, message);
    for scalar in key_scalars.iter_mut() {
        scalar.zeroize();
    }

    signature
}

/// Computes a MuSig signature over `message`, verifiable against the
/// aggregated key X = Σ a[i].X[i] with a[i] = H(L || X[i]) mod n and
/// L = H(X[1] || ... || X[u]).
///
/// The ordering of the participants matters: permuting the keys
/// produces different coefficients and a different aggregated key.
/// Verification is the ordinary single-signature verification against
/// the key returned by [`musig_aggregate_key`].
pub fn musig_non_interactive(
    private_keys: &[PrivateKey],
    message: &[u8; MESSAGE_LENGTH],
) -> Result<Signature, SignatureError> {
    if private_keys.is_empty() {
        return Err(SignatureError::EmptyKeySet);
    }

    let mut encoded_keys = Vec::with_capacity(private_keys.len());
    for skey in private_keys {
        if bool::from(skey.0.is_zero()) {
            return Err(SignatureError::InvalidPrivateKey);
        }
        encoded_keys.push(PublicKey::from(skey).to_bytes());
    }
    let coefficients = musig_coefficients(&encoded_keys);

    let mut key_scalars = Vec::with_capacity(private_keys.len());
    let mut aggregated_key = ProjectivePoint::IDENTITY;
    for (skey, coefficient) in private_keys.iter().zip(&coefficients) {
        let weighted = coefficient * &skey.0;
        aggregated_key += ProjectivePoint::GENERATOR * weighted;
        key_scalars.push(weighted);
    }

    let signature = sign_aggregated(private_keys, &key_scalars, aggregated_key, message);
    for scalar in key_scalars.iter_mut() {
        scalar.zeroize();
    }

    signature
}

/// Computes the MuSig aggregated public key of a sequence of public
/// keys, allowing verifiers to check multi-signatures from the public
/// keys alone.
pub fn musig_aggregate_key(public_keys: &[PublicKey]) -> Result<PublicKey, SignatureError> {
    if public_keys.is_empty() {
        return Err(SignatureError::EmptyKeySet);
    }

    let encoded_keys: Vec<_> = public_keys.iter().map(|pkey| pkey.to_bytes()).collect();
    let coefficients = musig_coefficients(&encoded_keys);

    let aggregated: ProjectivePoint = public_keys
        .iter()
        .zip(&coefficients)
        .map(|(pkey, coefficient)| ProjectivePoint::from(pkey.0) * coefficient)
        .sum();

    if bool::from(aggregated.is_identity()) {
        return Err(SignatureError::PointAtInfinity);
    }

    Ok(PublicKey(aggregated.to_affine()))
}

/// Derives the per-key MuSig coefficients from the encoded public
/// keys.
fn musig_coefficients(encoded_keys: &[[u8; 33]]) -> Vec<Scalar> {
    let mut hasher = Sha256::new();
    for encoded in encoded_keys {
        hasher.update(encoded);
    }
    let key_list_hash = hasher.finalize();

    encoded_keys
        .iter()
        .map(|encoded| encoding::hash_to_scalar(&[key_list_hash.as_slice(), encoded]))
        .collect()
}

/// Produces the aggregate signature once the per-key scalars have been
/// weighted. Every participant contributes a deterministic nonce; the
/// nonce points are summed and each nonce is negated when the
/// y-coordinate of the aggregate nonce point is not a quadratic
/// residue, exactly as in single signing.
fn sign_aggregated(
    private_keys: &[PrivateKey],
    key_scalars: &[Scalar],
    aggregated_key: ProjectivePoint,
    message: &[u8; MESSAGE_LENGTH],
) -> Result<Signature, SignatureError> {
    let mut nonces = Vec::with_capacity(private_keys.len());
    let mut aggregated_nonce = ProjectivePoint::IDENTITY;
    for skey in private_keys {
        let k0 = deterministic_nonce(&skey.0, message)?;
        aggregated_nonce += ProjectivePoint::GENERATOR * k0;
        nonces.push(k0);
    }

    if bool::from(aggregated_nonce.is_identity()) {
        return Err(SignatureError::PointAtInfinity);
    }

    let pkey_bytes = encoding::point_to_bytes(&aggregated_key.to_affine())?;
    let (x, y) = curve::decompose(&aggregated_nonce.to_affine());
    let flip = !curve::is_quadratic_residue(&y);

    let e = encoding::challenge(&x.to_bytes(), &pkey_bytes, message);

    let mut s = Scalar::ZERO;
    for (k0, key_scalar) in nonces.iter_mut().zip(key_scalars.iter()) {
        let k = Scalar::conditional_select(k0, &-*k0, flip);
        s += k + e * key_scalar;
        k0.zeroize();
    }

    Ok(Signature { x, s })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_core::OsRng;

    fn bytes32(hex_str: &str) -> [u8; 32] {
        hex::decode(hex_str).unwrap().try_into().unwrap()
    }

    fn bytes33(hex_str: &str) -> [u8; 33] {
        hex::decode(hex_str).unwrap().try_into().unwrap()
    }

    fn two_signers() -> ([PrivateKey; 2], [u8; MESSAGE_LENGTH]) {
        let skey_1 = PrivateKey::from_bytes(&bytes32(
            "b7e151628aed2a6abf7158809cf4f3c762e7160f38b4da56a784d9045190cfef",
        ))
        .unwrap();
        let skey_2 = PrivateKey::from_bytes(&bytes32(
            "c90fdaa22168c234c4c6628b80dc1cd129024e088a67cc74020bbea63b14e5c7",
        ))
        .unwrap();
        let message = bytes32("243f6a8885a308d313198a2e03707344a4093822299f31d0082efa98ec4e6c89");

        ([skey_1, skey_2], message)
    }

    #[test]
    fn test_naive_aggregation_vector() {
        let (signers, message) = two_signers();

        let signature = naive_key_aggregation(&signers, &message).unwrap();
        assert_eq!(
            hex::encode(signature.to_bytes()),
            "d60d7f81c15d57b04f8f6074de17f1b9eef2e0a9c9b2e93550c15b45d6998dc2\
             4ef5e393b356e7c334f36cee15e0f5f1e9ce06e7911793ddb9bd922d545b7525"
        );

        // The signature verifies against the sum of the public keys.
        let sum_key = PublicKey::from(&PrivateKey::from_scalar(signers[0].0 + signers[1].0));
        assert_eq!(
            hex::encode(sum_key.to_bytes()),
            "03f0a6305d39a34582ba49a78bdf38ced935b3efce1e889d6820103665f35ee45b"
        );
        assert!(signature.verify(&message, &sum_key).is_ok());

        let encoded = PublicKey::from_bytes(&bytes33(
            "03f0a6305d39a34582ba49a78bdf38ced935b3efce1e889d6820103665f35ee45b",
        ))
        .unwrap();
        assert_eq!(encoded, sum_key);
    }

    #[test]
    fn test_musig_aggregation_vector() {
        let (signers, message) = two_signers();

        let signature = musig_non_interactive(&signers, &message).unwrap();
        assert_eq!(
            hex::encode(signature.to_bytes()),
            "d60d7f81c15d57b04f8f6074de17f1b9eef2e0a9c9b2e93550c15b45d6998dc2\
             98fde09fcea69e99b195a371d7a7e879a40474c67e4b63fb2cd5c6b7a3058156"
        );

        let public_keys = [PublicKey::from(&signers[0]), PublicKey::from(&signers[1])];
        let aggregated = musig_aggregate_key(&public_keys).unwrap();
        assert_eq!(
            hex::encode(aggregated.to_bytes()),
            "03a6c519a533b1e8ff578672af695a6f7f8cebb29b7d391e5c5fcfb91dcd597fb8"
        );
        assert!(signature.verify(&message, &aggregated).is_ok());
    }

    #[test]
    fn test_single_signer_naive_aggregation_matches_plain_signing() {
        let mut rng = OsRng;
        let message = [23u8; MESSAGE_LENGTH];

        let skey = PrivateKey::new(&mut rng);
        let aggregated = naive_key_aggregation(&[skey.clone()], &message).unwrap();
        let plain = skey.sign(&message).unwrap();

        assert_eq!(aggregated, plain);
    }

    #[test]
    fn test_musig_ordering_matters() {
        let mut rng = OsRng;

        let skey_1 = PrivateKey::new(&mut rng);
        let skey_2 = PrivateKey::new(&mut rng);
        let pkey_1 = PublicKey::from(&skey_1);
        let pkey_2 = PublicKey::from(&skey_2);

        let forward = musig_aggregate_key(&[pkey_1, pkey_2]).unwrap();
        let backward = musig_aggregate_key(&[pkey_2, pkey_1]).unwrap();
        assert_ne!(forward, backward);

        // Signatures only verify against the key aggregated in the
        // same participant order.
        let message = [200u8; MESSAGE_LENGTH];
        let signature = musig_non_interactive(&[skey_1, skey_2], &message).unwrap();
        assert!(signature.verify(&message, &forward).is_ok());
        assert!(signature.verify(&message, &backward).is_err());
    }

    #[test]
    fn test_aggregation_input_validation() {
        let mut rng = OsRng;
        let message = [0u8; MESSAGE_LENGTH];

        assert_eq!(
            naive_key_aggregation(&[], &message),
            Err(SignatureError::EmptyKeySet)
        );
        assert_eq!(
            musig_non_interactive(&[], &message),
            Err(SignatureError::EmptyKeySet)
        );
        assert_eq!(
            musig_aggregate_key(&[]),
            Err(SignatureError::EmptyKeySet)
        );

        let zero = PrivateKey::from_scalar(Scalar::ZERO);
        let skey = PrivateKey::new(&mut rng);
        assert_eq!(
            naive_key_aggregation(&[skey.clone(), zero.clone()], &message),
            Err(SignatureError::InvalidPrivateKey)
        );
        assert_eq!(
            musig_non_interactive(&[zero, skey], &message),
            Err(SignatureError::InvalidPrivateKey)
        );
    }

    #[test]
    fn test_cancelling_keys_are_rejected() {
        let mut rng = OsRng;
        let message = [0u8; MESSAGE_LENGTH];

        // The two keys sum to zero, so the aggregated key would be
        // the identity point.
        let skey = PrivateKey::new(&mut rng);
        let negated = PrivateKey::from_scalar(-skey.0);
        assert_eq!(
            naive_key_aggregation(&[skey, negated], &message),
            Err(SignatureError::PointAtInfinity)
        );
    }
}
