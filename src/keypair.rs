// Copyright (c) 2021-2022 Toposware, Inc.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! This module provides a `KeyPair` struct
//! combining a `PrivateKey` and an associated `PublicKey`.

use super::error::SignatureError;
use super::{KeyedSignature, Signature};
use super::{PrivateKey, PublicKey};
use super::{KEY_PAIR_LENGTH, MESSAGE_LENGTH};

use k256::elliptic_curve::{Field, PrimeField};
use k256::Scalar;
use rand_core::{CryptoRng, RngCore};
use subtle::CtOption;

impl From<&PrivateKey> for KeyPair {
    /// Creates a key pair from a private key reference.
    ///
    /// If the source or generation method of the private key
    /// is unknown, it is preferable to use the `KeyPair::new`
    /// method instead.
    fn from(private_key: &PrivateKey) -> KeyPair {
        KeyPair {
            private_key: private_key.clone(),
            public_key: private_key.into(),
        }
    }
}

impl From<PrivateKey> for KeyPair {
    /// Creates a key pair from a private key.
    ///
    /// If the source or generation method of the private key
    /// is unknown, it is preferable to use the `KeyPair::new`
    /// method instead.
    fn from(private_key: PrivateKey) -> KeyPair {
        (&private_key).into()
    }
}

/// A KeyPair
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct KeyPair {
    /// A private key
    pub private_key: PrivateKey,
    /// A public key
    pub public_key: PublicKey,
}

impl KeyPair {
    /// Generates a new random key pair
    pub fn new(mut rng: impl CryptoRng + RngCore) -> Self {
        let private_key = PrivateKey::new(&mut rng);
        let public_key = PublicKey::from(&private_key);

        KeyPair {
            private_key,
            public_key,
        }
    }

    /// Computes a Schnorr signature over the provided message
    pub fn sign(&self, message: &[u8; MESSAGE_LENGTH]) -> Result<Signature, SignatureError> {
        Signature::sign_with_keypair(message, self)
    }

    /// Computes a Schnorr signature over the provided message, bound
    /// to this key pair's public key
    pub fn sign_and_bind_pkey(
        &self,
        message: &[u8; MESSAGE_LENGTH],
    ) -> Result<KeyedSignature, SignatureError> {
        KeyedSignature::sign_with_keypair(message, self)
    }

    /// Verifies a signature against a message and this key pair's
    /// public key
    pub fn verify_signature(
        &self,
        signature: &Signature,
        message: &[u8; MESSAGE_LENGTH],
    ) -> Result<(), SignatureError> {
        signature.verify(message, &self.public_key)
    }

    /// Converts this key pair to an array of bytes
    ///
    /// To ensure consistency between the private key and public key
    /// during reconstruction without extra checks, KeyPair serialization
    /// only serializes the private_key part, and reconstructs the public
    /// key when deserializing.
    pub fn to_bytes(&self) -> [u8; KEY_PAIR_LENGTH] {
        self.private_key.to_bytes()
    }

    /// Constructs a key pair from an array of bytes
    pub fn from_bytes(bytes: &[u8; KEY_PAIR_LENGTH]) -> CtOption<Self> {
        Scalar::from_repr((*bytes).into()).and_then(|scalar| {
            let private_key = PrivateKey(scalar);
            let public_key = PublicKey::from(&private_key);
            CtOption::new(
                KeyPair {
                    private_key,
                    public_key,
                },
                !scalar.is_zero(),
            )
        })
    }
}

// Serde Serialize and Deserialize traits are not directly derived
// as we would end up with a serialization twice larger than the
// byte encoding, which skips the public_key component and reconstructs
// it when decoding.
#[cfg(feature = "serialize")]
impl serde::Serialize for KeyPair {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.private_key.serialize(serializer)
    }
}

#[cfg(feature = "serialize")]
impl<'de> serde::Deserialize<'de> for KeyPair {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        PrivateKey::deserialize(deserializer).map(|k| KeyPair::from(&k))
    }
}
