// Copyright (c) 2021-2022 Toposware, Inc.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! This module provides a `PublicKey` wrapping
//! struct around an `AffinePoint` element.

use super::error::SignatureError;
use super::{encoding, PrivateKey, Signature};
use super::{MESSAGE_LENGTH, PUBLIC_KEY_LENGTH};

use k256::{AffinePoint, ProjectivePoint};

/// A public key
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PublicKey(pub(crate) AffinePoint);

impl From<&PrivateKey> for PublicKey {
    /// Computes a public key from a provided private key.
    ///
    /// The private key must be non-zero, as the identity point
    /// cannot serve as a public key.
    fn from(sk: &PrivateKey) -> PublicKey {
        PublicKey((ProjectivePoint::GENERATOR * sk.0).to_affine())
    }
}

impl From<PrivateKey> for PublicKey {
    fn from(sk: PrivateKey) -> PublicKey {
        (&sk).into()
    }
}

impl PublicKey {
    /// Converts this public key to its 33-byte compressed encoding
    pub fn to_bytes(&self) -> [u8; PUBLIC_KEY_LENGTH] {
        encoding::point_to_bytes(&self.0)
            .expect("public keys cannot wrap the identity point")
    }

    /// Constructs a public key from a 33-byte compressed encoding
    pub fn from_bytes(bytes: &[u8; PUBLIC_KEY_LENGTH]) -> Result<Self, SignatureError> {
        encoding::bytes_to_point(bytes).map(PublicKey)
    }

    /// Verifies a signature against a message and this public key
    pub fn verify_signature(
        &self,
        signature: &Signature,
        message: &[u8; MESSAGE_LENGTH],
    ) -> Result<(), SignatureError> {
        signature.verify(message, self)
    }
}

#[cfg(feature = "serialize")]
impl serde::Serialize for PublicKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_bytes().serialize(serializer)
    }
}

#[cfg(feature = "serialize")]
impl<'de> serde::Deserialize<'de> for PublicKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error;

        let bytes = <[u8; PUBLIC_KEY_LENGTH]>::deserialize(deserializer)?;
        PublicKey::from_bytes(&bytes).map_err(|_| D::Error::custom("decompression failed"))
    }
}
