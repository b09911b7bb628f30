// Copyright (c) 2021-2022 Toposware, Inc.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use core::fmt::{Display, Formatter, Result};

/// Custom error type during signature operations.
///
/// The `Display` strings of the verification variants are stable and
/// part of the public contract of this crate.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SignatureError {
    /// The provided bytes do not encode a point of the curve
    InvalidPublicKey,
    /// The r component of a signature encodes an integer larger than
    /// or equal to the field characteristic
    RLargerThanField,
    /// The s component of a signature encodes an integer larger than
    /// or equal to the curve order
    SLargerThanOrder,
    /// A computed or aggregated point is the identity of the group
    PointAtInfinity,
    /// The y-coordinate of the nonce point is not a quadratic residue
    YNotQuadraticResidue,
    /// The r component of a signature is not the x-coordinate of a
    /// curve point
    RNotOnCurve,
    /// The verification equation does not hold
    InvalidSignature,
    /// A private scalar is zero
    InvalidPrivateKey,
    /// The nonce derived from the private key and the message is zero
    ZeroNonce,
    /// An aggregation operation received an empty sequence of keys
    EmptyKeySet,
}

impl Display for SignatureError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::InvalidPublicKey => write!(f, "public key not on curve"),
            Self::RLargerThanField => write!(f, "r is larger than field size"),
            Self::SLargerThanOrder => write!(f, "s is larger than curve order"),
            Self::PointAtInfinity => write!(f, "point at infinity"),
            Self::YNotQuadraticResidue => write!(f, "y is not a quadratic residue"),
            Self::RNotOnCurve => write!(f, "r is not on the curve"),
            Self::InvalidSignature => write!(f, "signature verification failed"),
            Self::InvalidPrivateKey => {
                write!(f, "private key must be an integer in the range 1..n-1")
            }
            Self::ZeroNonce => write!(f, "derived nonce is zero"),
            Self::EmptyKeySet => write!(f, "key set must contain one or more elements"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SignatureError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PrivateKey, PublicKey, Signature};
    use rand_core::OsRng;

    #[test]
    fn test_display() {
        assert_eq!(
            format!("{}", SignatureError::InvalidPublicKey),
            "public key not on curve"
        );
        assert_eq!(
            format!("{}", SignatureError::RLargerThanField),
            "r is larger than field size"
        );
        assert_eq!(
            format!("{}", SignatureError::SLargerThanOrder),
            "s is larger than curve order"
        );
        assert_eq!(
            format!("{}", SignatureError::PointAtInfinity),
            "point at infinity"
        );
        assert_eq!(
            format!("{}", SignatureError::YNotQuadraticResidue),
            "y is not a quadratic residue"
        );
        assert_eq!(
            format!("{}", SignatureError::RNotOnCurve),
            "r is not on the curve"
        );
        assert_eq!(
            format!("{}", SignatureError::InvalidSignature),
            "signature verification failed"
        );
    }

    #[test]
    fn test_debug() {
        let mut rng = OsRng;

        let skey = PrivateKey::new(&mut rng);
        let pkey = PublicKey::from(&skey);
        let message = [42u8; 32];
        let signature = skey.sign(&message).unwrap();

        let other_message = [43u8; 32];
        assert_eq!(
            format!("{:?}", signature.verify(&other_message, &pkey)),
            "Err(InvalidSignature)"
        );
        assert_eq!(
            format!("{}", signature.verify(&other_message, &pkey).unwrap_err()),
            "signature verification failed"
        );

        // The prefix byte of an encoded public key must be 0x02 or 0x03.
        let mut pkey_bytes = pkey.to_bytes();
        pkey_bytes[0] = 0x04;
        assert_eq!(
            format!("{:?}", PublicKey::from_bytes(&pkey_bytes)),
            "Err(InvalidPublicKey)"
        );
        assert_eq!(
            format!("{}", PublicKey::from_bytes(&pkey_bytes).unwrap_err()),
            "public key not on curve"
        );

        let mut signature_bytes = signature.to_bytes();
        signature_bytes[0..32].copy_from_slice(&[0xff; 32]);
        assert_eq!(
            format!("{}", Signature::from_bytes(&signature_bytes).unwrap_err()),
            "r is larger than field size"
        );

        let mut signature_bytes = signature.to_bytes();
        signature_bytes[32..64].copy_from_slice(&[0xff; 32]);
        assert_eq!(
            format!("{}", Signature::from_bytes(&signature_bytes).unwrap_err()),
            "s is larger than curve order"
        );
    }
}
