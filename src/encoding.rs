// Copyright (c) 2021-2022 Toposware, Inc.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! This module provides the fixed-width byte conversions of this
//! crate: the 33-byte compressed point encoding and the hashing of
//! byte strings into scalars.
//!
//! Challenge hashing is a plain SHA-256 over the concatenated
//! arguments, following the historical "bip-schnorr" convention which
//! predates the prefixed-tag construction of BIP-340. Substituting a
//! tagged hash here would make signatures incompatible with the
//! published test vectors.

use super::error::SignatureError;
use super::{MESSAGE_LENGTH, PUBLIC_KEY_LENGTH};

use k256::elliptic_curve::bigint::U256;
use k256::elliptic_curve::ops::Reduce;
use k256::elliptic_curve::point::DecompressPoint;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::{AffinePoint, FieldBytes, Scalar};
use sha2::{Digest, Sha256};
use subtle::Choice;

/// Serializes a point into its 33-byte compressed encoding, made of a
/// parity prefix byte (0x02 for even y, 0x03 for odd y) followed by
/// the big-endian x-coordinate.
///
/// The identity point has no compressed encoding and is rejected.
pub fn point_to_bytes(point: &AffinePoint) -> Result<[u8; PUBLIC_KEY_LENGTH], SignatureError> {
    let encoded = point.to_encoded_point(true);
    if encoded.is_identity() {
        return Err(SignatureError::PointAtInfinity);
    }

    let mut bytes = [0u8; PUBLIC_KEY_LENGTH];
    bytes.copy_from_slice(encoded.as_bytes());

    Ok(bytes)
}

/// Parses a 33-byte compressed encoding into a curve point.
///
/// Rejects a prefix byte other than 0x02 or 0x03, an x-coordinate
/// larger than the field characteristic, and an x-coordinate that is
/// not on the curve.
pub fn bytes_to_point(bytes: &[u8; PUBLIC_KEY_LENGTH]) -> Result<AffinePoint, SignatureError> {
    let y_is_odd = match bytes[0] {
        0x02 => Choice::from(0u8),
        0x03 => Choice::from(1u8),
        _ => return Err(SignatureError::InvalidPublicKey),
    };

    Option::from(AffinePoint::decompress(
        FieldBytes::from_slice(&bytes[1..]),
        y_is_odd,
    ))
    .ok_or(SignatureError::InvalidPublicKey)
}

/// Hashes the concatenation of the provided chunks with SHA-256 and
/// interprets the digest as a big-endian integer reduced mod the curve
/// order.
pub(crate) fn hash_to_scalar(chunks: &[&[u8]]) -> Scalar {
    let mut hasher = Sha256::new();
    for chunk in chunks {
        hasher.update(chunk);
    }

    Scalar::reduce(U256::from_be_slice(&hasher.finalize()))
}

/// Computes the verification challenge e = H(Rx || P || m) mod n.
pub(crate) fn challenge(
    rx: &FieldBytes,
    pkey_bytes: &[u8; PUBLIC_KEY_LENGTH],
    message: &[u8; MESSAGE_LENGTH],
) -> Scalar {
    hash_to_scalar(&[rx.as_slice(), pkey_bytes, message])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PrivateKey, PublicKey};
    use k256::elliptic_curve::point::AffineCoordinates;
    use k256::elliptic_curve::Field;
    use k256::ProjectivePoint;
    use rand_core::OsRng;

    #[test]
    fn test_point_encoding_round_trip() {
        let mut rng = OsRng;

        for _ in 0..20 {
            let pkey = PublicKey::from(&PrivateKey::new(&mut rng));
            let bytes = point_to_bytes(&pkey.0).unwrap();

            assert!(bytes[0] == 0x02 || bytes[0] == 0x03);
            assert_eq!(bytes_to_point(&bytes).unwrap(), pkey.0);
        }
    }

    #[test]
    fn test_identity_has_no_encoding() {
        assert_eq!(
            point_to_bytes(&AffinePoint::IDENTITY),
            Err(SignatureError::PointAtInfinity)
        );
    }

    #[test]
    fn test_invalid_prefix() {
        let mut rng = OsRng;
        let pkey = PublicKey::from(&PrivateKey::new(&mut rng));
        let bytes = point_to_bytes(&pkey.0).unwrap();

        for prefix in [0x00, 0x01, 0x04, 0x05] {
            let mut tampered = bytes;
            tampered[0] = prefix;
            assert_eq!(
                bytes_to_point(&tampered),
                Err(SignatureError::InvalidPublicKey)
            );
        }
    }

    #[test]
    fn test_x_larger_than_field_size() {
        let mut bytes = [0xff; PUBLIC_KEY_LENGTH];
        bytes[0] = 0x02;
        assert_eq!(
            bytes_to_point(&bytes),
            Err(SignatureError::InvalidPublicKey)
        );
    }

    #[test]
    fn test_x_not_on_curve() {
        let mut bytes = [0u8; PUBLIC_KEY_LENGTH];
        bytes[0] = 0x02;
        bytes[1..].copy_from_slice(
            &hex::decode("EEFDEA4CDB677750A420FEE807EACF21EB9898AE79B9768766E4FAA04A2D4A34")
                .unwrap(),
        );
        assert_eq!(
            bytes_to_point(&bytes),
            Err(SignatureError::InvalidPublicKey)
        );
    }

    #[test]
    fn test_hash_to_scalar_is_deterministic() {
        let mut rng = OsRng;
        let scalar = Scalar::random(&mut rng);
        let bytes: [u8; 32] = scalar.to_bytes().into();

        assert_eq!(hash_to_scalar(&[&bytes]), hash_to_scalar(&[&bytes]));
        assert_ne!(hash_to_scalar(&[&bytes]), hash_to_scalar(&[&bytes, &bytes]));
    }

    #[test]
    fn test_challenge_binds_all_inputs() {
        let mut rng = OsRng;

        let pkey = PublicKey::from(&PrivateKey::new(&mut rng));
        let other = PublicKey::from(&PrivateKey::new(&mut rng));
        let rx = (ProjectivePoint::GENERATOR * Scalar::random(&mut rng))
            .to_affine()
            .x();
        let message = [7u8; MESSAGE_LENGTH];

        let e = challenge(&rx, &pkey.to_bytes(), &message);
        assert_eq!(e, challenge(&rx, &pkey.to_bytes(), &message));
        assert_ne!(e, challenge(&rx, &other.to_bytes(), &message));
        assert_ne!(e, challenge(&rx, &pkey.to_bytes(), &[8u8; MESSAGE_LENGTH]));
    }
}
