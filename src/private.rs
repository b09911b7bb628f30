// Copyright (c) 2021-2022 Toposware, Inc.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! This module provides a `PrivateKey` wrapping
//! struct around a `Scalar` element.

use super::error::SignatureError;
use super::{KeyPair, KeyedSignature, Signature};
use super::{MESSAGE_LENGTH, PRIVATE_KEY_LENGTH};

use k256::elliptic_curve::{Field, PrimeField};
use k256::{NonZeroScalar, Scalar};
use rand_core::{CryptoRng, RngCore};
use subtle::CtOption;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A private key.
///
/// The wrapped scalar is zeroized when the key goes out of scope.
#[derive(Clone, Debug, Eq, PartialEq, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey(pub(crate) Scalar);

impl From<&KeyPair> for PrivateKey {
    fn from(key_pair: &KeyPair) -> Self {
        key_pair.private_key.clone()
    }
}

impl From<KeyPair> for PrivateKey {
    fn from(key_pair: KeyPair) -> Self {
        key_pair.private_key
    }
}

impl PrivateKey {
    /// Generates a new random private key, uniformly distributed over
    /// the non-zero scalars.
    pub fn new(mut rng: impl CryptoRng + RngCore) -> Self {
        PrivateKey(*NonZeroScalar::random(&mut rng))
    }

    /// Generates a new private key from a provided scalar.
    ///
    /// If the source or generation method of the scalar is
    /// unknown, it is preferable to use the `PrivateKey::new`
    /// method instead.
    pub fn from_scalar(scalar: Scalar) -> Self {
        PrivateKey(scalar)
    }

    /// Converts this private key to an array of bytes
    pub fn to_bytes(&self) -> [u8; PRIVATE_KEY_LENGTH] {
        self.0.to_bytes().into()
    }

    /// Constructs a private key from an array of bytes.
    ///
    /// Rejects non-canonical encodings and the zero scalar.
    pub fn from_bytes(bytes: &[u8; PRIVATE_KEY_LENGTH]) -> CtOption<Self> {
        Scalar::from_repr((*bytes).into())
            .and_then(|s| CtOption::new(PrivateKey(s), !s.is_zero()))
    }

    /// Computes a Schnorr signature over the provided message
    pub fn sign(&self, message: &[u8; MESSAGE_LENGTH]) -> Result<Signature, SignatureError> {
        Signature::sign(message, self)
    }

    /// Computes a Schnorr signature over the provided message, bound
    /// to the matching public key
    pub fn sign_and_bind_pkey(
        &self,
        message: &[u8; MESSAGE_LENGTH],
    ) -> Result<KeyedSignature, SignatureError> {
        KeyedSignature::sign(message, self)
    }
}

#[cfg(feature = "serialize")]
impl serde::Serialize for PrivateKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_bytes().serialize(serializer)
    }
}

#[cfg(feature = "serialize")]
impl<'de> serde::Deserialize<'de> for PrivateKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error;

        let bytes = <[u8; PRIVATE_KEY_LENGTH]>::deserialize(deserializer)?;
        Option::from(PrivateKey::from_bytes(&bytes))
            .ok_or_else(|| D::Error::custom("decompression failed"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_core::OsRng;

    #[test]
    fn test_zeroize() {
        let mut skey = PrivateKey::from_scalar(Scalar::from(42u64));
        skey.zeroize();

        assert_eq!(skey.to_bytes(), [0u8; PRIVATE_KEY_LENGTH]);
    }

    #[test]
    fn test_encoding() {
        assert_eq!(
            PrivateKey::from_scalar(Scalar::ONE).to_bytes(),
            [
                0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
                0, 0, 0, 1
            ]
        );

        // Test random keys encoding
        let mut rng = OsRng;

        for _ in 0..100 {
            let key = PrivateKey::new(&mut rng);
            let bytes = key.to_bytes();

            assert_eq!(key, PrivateKey::from_bytes(&bytes).unwrap());
        }

        // The zero scalar is not a valid private key
        let bytes = [0u8; PRIVATE_KEY_LENGTH];
        assert!(bool::from(PrivateKey::from_bytes(&bytes).is_none()));

        // Non-canonical encodings are rejected
        let bytes = [0xff; PRIVATE_KEY_LENGTH];
        assert!(bool::from(PrivateKey::from_bytes(&bytes).is_none()));
    }

    #[test]
    #[cfg(feature = "serialize")]
    fn test_serde() {
        let mut rng = OsRng;
        let skey = PrivateKey::new(&mut rng);

        let encoded = bincode::serialize(&skey).unwrap();
        let parsed: PrivateKey = bincode::deserialize(&encoded).unwrap();
        assert_eq!(parsed, skey);

        // Check that the encoding is PRIVATE_KEY_LENGTH (32) bytes exactly
        assert_eq!(encoded.len(), PRIVATE_KEY_LENGTH);

        // Check that the encoding itself matches the usual one
        assert_eq!(skey, bincode::deserialize(&skey.to_bytes()).unwrap());

        // Check that invalid encodings fail
        let encoded = bincode::serialize(&PrivateKey::from_scalar(Scalar::ZERO)).unwrap();
        assert!(bincode::deserialize::<PrivateKey>(&encoded).is_err());

        let encoded = bincode::serialize(&skey).unwrap();
        assert!(bincode::deserialize::<PrivateKey>(&encoded[0..PRIVATE_KEY_LENGTH - 1]).is_err());
    }
}
