// Copyright (c) 2021-2022 Toposware, Inc.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! This crate provides an implementation of BIP-Schnorr signatures
//! over the secp256k1 curve, with deterministic nonce derivation,
//! batched verification and non-interactive key aggregation.
//!
//! Signatures are 64 bytes, the x-coordinate of the nonce point
//! followed by the response scalar. Public keys use the 33-byte
//! compressed encoding. The challenge hash is a plain SHA-256 over
//! the concatenated inputs, following the historical "bip-schnorr"
//! convention rather than the tagged hashes of BIP-340.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(missing_debug_implementations)]
#![deny(missing_docs)]
#![deny(unsafe_code)]
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

mod aggregation;
mod batch;
mod constants;
mod curve;
mod encoding;
mod error;
mod keypair;
mod private;
mod public;
mod signature;

pub use aggregation::{musig_aggregate_key, musig_non_interactive, naive_key_aggregation};
pub use batch::verify_batch;
pub use constants::{
    FIELD_ELEMENT_LENGTH, KEYED_SIGNATURE_LENGTH, KEY_PAIR_LENGTH, MESSAGE_LENGTH,
    PRIVATE_KEY_LENGTH, PUBLIC_KEY_LENGTH, SCALAR_LENGTH, SIGNATURE_LENGTH,
};
pub use error::SignatureError;
pub use keypair::KeyPair;
pub use private::PrivateKey;
pub use public::PublicKey;
pub use signature::{KeyedSignature, Signature};
