// Copyright (c) 2021-2022 Toposware, Inc.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! This module defines all constants used in this crate.

/// Scalar element length in bytes (serialized form)
pub const SCALAR_LENGTH: usize = 32;

/// Private key length in bytes (serialized form)
pub const PRIVATE_KEY_LENGTH: usize = SCALAR_LENGTH;

/// Basefield element length in bytes (serialized form)
pub const FIELD_ELEMENT_LENGTH: usize = 32;

/// Public key length in bytes (serialized form).
/// One parity prefix byte followed by the x-coordinate.
pub const PUBLIC_KEY_LENGTH: usize = FIELD_ELEMENT_LENGTH + 1;

/// Key pair length in bytes (serialized form)
pub const KEY_PAIR_LENGTH: usize = PRIVATE_KEY_LENGTH;

/// Message length in bytes.
/// Messages are opaque 32-byte strings, intended to be a hash
/// of the actual payload.
pub const MESSAGE_LENGTH: usize = 32;

/// Signature length in bytes (serialized form).
/// The x-coordinate of the nonce point followed by the response scalar.
pub const SIGNATURE_LENGTH: usize = FIELD_ELEMENT_LENGTH + SCALAR_LENGTH;

/// Keyed signature length in bytes (serialized form)
pub const KEYED_SIGNATURE_LENGTH: usize = SIGNATURE_LENGTH + PUBLIC_KEY_LENGTH;
