// Copyright (c) 2021-2022 Toposware, Inc.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! This module provides a Signature struct implementing
//! Schnorr signing and verification over secp256k1.

use super::error::SignatureError;
use super::{curve, encoding};
use super::{KeyPair, PrivateKey, PublicKey};
use super::{
    FIELD_ELEMENT_LENGTH, KEYED_SIGNATURE_LENGTH, MESSAGE_LENGTH, PUBLIC_KEY_LENGTH,
    SIGNATURE_LENGTH,
};

use k256::elliptic_curve::group::Group;
use k256::elliptic_curve::ops::LinearCombination;
use k256::elliptic_curve::{Field, PrimeField};
use k256::{FieldBytes, FieldElement, ProjectivePoint, Scalar};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};
use zeroize::Zeroize;

/// Derives the deterministic nonce k = H(d || m) mod n.
///
/// Signing the same message twice with the same key produces the same
/// nonce, and therefore bitwise identical signatures. A zero nonce is
/// rejected explicitly, although reaching it would require finding a
/// SHA-256 preimage of a multiple of the curve order.
pub(crate) fn deterministic_nonce(
    skey: &Scalar,
    message: &[u8; MESSAGE_LENGTH],
) -> Result<Scalar, SignatureError> {
    let skey_bytes = skey.to_bytes();
    let k = encoding::hash_to_scalar(&[skey_bytes.as_slice(), message]);
    if bool::from(k.is_zero()) {
        return Err(SignatureError::ZeroNonce);
    }

    Ok(k)
}

/// A Schnorr signature not attached to its message.
#[derive(Clone, Copy, Debug)]
pub struct Signature {
    /// The x-coordinate of the nonce point generated during signing
    pub x: FieldElement,
    /// The response scalar, combining the nonce, the challenge
    /// and the private key
    pub s: Scalar,
}

impl ConditionallySelectable for Signature {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Signature {
            x: FieldElement::conditional_select(&a.x, &b.x, choice),
            s: Scalar::conditional_select(&a.s, &b.s, choice),
        }
    }
}

impl Eq for Signature {}

impl PartialEq for Signature {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && bool::from(self.s.ct_eq(&other.s))
    }
}

impl Signature {
    /// Computes a Schnorr signature. This requires to compute the `PublicKey` from
    /// the provided `PrivateKey` internally. For a faster signing, one should prefer
    /// to use `Signature::sign_with_provided_pkey` or `Signature::sign_with_keypair`.
    pub fn sign(
        message: &[u8; MESSAGE_LENGTH],
        skey: &PrivateKey,
    ) -> Result<Self, SignatureError> {
        if bool::from(skey.0.is_zero()) {
            return Err(SignatureError::InvalidPrivateKey);
        }
        let pkey = PublicKey::from(skey);

        Self::sign_with_provided_pkey(message, skey, &pkey)
    }

    /// Computes a Schnorr signature with a provided `PublicKey` for faster signing.
    /// This method does not check that the provided `skey` and `pkey` are matching.
    /// In particular, the resulting signature will be invalid if they don't match.
    pub fn sign_with_provided_pkey(
        message: &[u8; MESSAGE_LENGTH],
        skey: &PrivateKey,
        pkey: &PublicKey,
    ) -> Result<Self, SignatureError> {
        if bool::from(skey.0.is_zero()) {
            return Err(SignatureError::InvalidPrivateKey);
        }

        let mut k0 = deterministic_nonce(&skey.0, message)?;
        let r_point = (ProjectivePoint::GENERATOR * k0).to_affine();
        let (x, y) = curve::decompose(&r_point);

        // Negate the nonce when the y-coordinate of the nonce point is
        // not a quadratic residue, so that verifiers can recover the
        // point from its x-coordinate alone.
        let mut k = Scalar::conditional_select(&-k0, &k0, curve::is_quadratic_residue(&y));

        let e = encoding::challenge(&x.to_bytes(), &pkey.to_bytes(), message);
        let s = k + e * skey.0;

        k0.zeroize();
        k.zeroize();

        Ok(Signature { x, s })
    }

    /// Computes a Schnorr signature with a provided `KeyPair` for faster signing.
    pub fn sign_with_keypair(
        message: &[u8; MESSAGE_LENGTH],
        keypair: &KeyPair,
    ) -> Result<Self, SignatureError> {
        Self::sign_with_provided_pkey(message, &keypair.private_key, &keypair.public_key)
    }

    /// Verifies a Schnorr signature.
    ///
    /// The nonce point is recomputed as R = s.G - e.P and must be a
    /// non-identity point whose y-coordinate is a quadratic residue
    /// and whose x-coordinate matches the signature.
    pub fn verify(
        self,
        message: &[u8; MESSAGE_LENGTH],
        pkey: &PublicKey,
    ) -> Result<(), SignatureError> {
        let e = encoding::challenge(&self.x.to_bytes(), &pkey.to_bytes(), message);

        // Leverage faster double scalar multiplication through
        // Straus-Shamir's trick.
        let r_point = ProjectivePoint::lincomb(
            &ProjectivePoint::GENERATOR,
            &self.s,
            &(-ProjectivePoint::from(pkey.0)),
            &e,
        );

        if bool::from(r_point.is_identity()) {
            return Err(SignatureError::PointAtInfinity);
        }

        let (rx, ry) = curve::decompose(&r_point.to_affine());
        if !bool::from(curve::is_quadratic_residue(&ry)) {
            return Err(SignatureError::YNotQuadraticResidue);
        }

        if rx == self.x {
            Ok(())
        } else {
            Err(SignatureError::InvalidSignature)
        }
    }

    /// Converts this signature to an array of bytes
    pub fn to_bytes(&self) -> [u8; SIGNATURE_LENGTH] {
        let mut output = [0u8; SIGNATURE_LENGTH];
        output[0..FIELD_ELEMENT_LENGTH].copy_from_slice(&self.x.to_bytes());
        output[FIELD_ELEMENT_LENGTH..SIGNATURE_LENGTH].copy_from_slice(&self.s.to_bytes());

        output
    }

    /// Constructs a signature from an array of bytes.
    ///
    /// The first half must encode an integer below the field
    /// characteristic, the second half an integer below the curve
    /// order.
    pub fn from_bytes(bytes: &[u8; SIGNATURE_LENGTH]) -> Result<Self, SignatureError> {
        let x = Option::<FieldElement>::from(FieldElement::from_bytes(FieldBytes::from_slice(
            &bytes[0..FIELD_ELEMENT_LENGTH],
        )))
        .ok_or(SignatureError::RLargerThanField)?;

        let s = Option::<Scalar>::from(Scalar::from_repr(*FieldBytes::from_slice(
            &bytes[FIELD_ELEMENT_LENGTH..SIGNATURE_LENGTH],
        )))
        .ok_or(SignatureError::SLargerThanOrder)?;

        Ok(Signature { x, s })
    }
}

#[cfg(feature = "serialize")]
impl serde::Serialize for Signature {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_bytes().serialize(serializer)
    }
}

#[cfg(feature = "serialize")]
impl<'de> serde::Deserialize<'de> for Signature {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error;

        let bytes = <[u8; SIGNATURE_LENGTH]>::deserialize(deserializer)?;
        Signature::from_bytes(&bytes).map_err(D::Error::custom)
    }
}

/// A Schnorr signature not attached to its message, and the associated
/// signer's public key.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct KeyedSignature {
    /// The public key to verify this signature against
    pub public_key: PublicKey,
    /// The signature
    pub signature: Signature,
}

impl KeyedSignature {
    /// Computes a Schnorr signature bound to the signer's public key.
    pub fn sign(
        message: &[u8; MESSAGE_LENGTH],
        skey: &PrivateKey,
    ) -> Result<Self, SignatureError> {
        if bool::from(skey.0.is_zero()) {
            return Err(SignatureError::InvalidPrivateKey);
        }
        let public_key = PublicKey::from(skey);
        let signature = Signature::sign_with_provided_pkey(message, skey, &public_key)?;

        Ok(KeyedSignature {
            public_key,
            signature,
        })
    }

    /// Computes a Schnorr signature with a provided `PublicKey` for faster signing.
    /// This method does not check that the provided `skey` and `pkey` are matching.
    /// In particular, the resulting signature will be invalid if they don't match.
    pub fn sign_with_provided_pkey(
        message: &[u8; MESSAGE_LENGTH],
        skey: &PrivateKey,
        pkey: &PublicKey,
    ) -> Result<Self, SignatureError> {
        Ok(KeyedSignature {
            public_key: *pkey,
            signature: Signature::sign_with_provided_pkey(message, skey, pkey)?,
        })
    }

    /// Computes a Schnorr signature with a provided `KeyPair` for faster signing.
    pub fn sign_with_keypair(
        message: &[u8; MESSAGE_LENGTH],
        keypair: &KeyPair,
    ) -> Result<Self, SignatureError> {
        Ok(KeyedSignature {
            public_key: keypair.public_key,
            signature: Signature::sign_with_keypair(message, keypair)?,
        })
    }

    /// Verifies a Schnorr signature against its bound public key
    pub fn verify(self, message: &[u8; MESSAGE_LENGTH]) -> Result<(), SignatureError> {
        self.signature.verify(message, &self.public_key)
    }

    /// Converts this signature to an array of bytes
    pub fn to_bytes(&self) -> [u8; KEYED_SIGNATURE_LENGTH] {
        let mut output = [0u8; KEYED_SIGNATURE_LENGTH];
        output[0..PUBLIC_KEY_LENGTH].copy_from_slice(&self.public_key.to_bytes());
        output[PUBLIC_KEY_LENGTH..KEYED_SIGNATURE_LENGTH]
            .copy_from_slice(&self.signature.to_bytes());

        output
    }

    /// Constructs a signature from an array of bytes
    pub fn from_bytes(bytes: &[u8; KEYED_SIGNATURE_LENGTH]) -> Result<Self, SignatureError> {
        let mut array = [0u8; PUBLIC_KEY_LENGTH];
        array.copy_from_slice(&bytes[0..PUBLIC_KEY_LENGTH]);
        let public_key = PublicKey::from_bytes(&array)?;

        let mut array = [0u8; SIGNATURE_LENGTH];
        array.copy_from_slice(&bytes[PUBLIC_KEY_LENGTH..KEYED_SIGNATURE_LENGTH]);
        let signature = Signature::from_bytes(&array)?;

        Ok(KeyedSignature {
            public_key,
            signature,
        })
    }
}
