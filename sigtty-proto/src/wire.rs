//! Request framing and response shapes.
//!
//! All fields are raw bytes, not length-prefixed; every exchange has a
//! fixed size known in advance:
//!
//! | Exchange | Request | Response |
//! |---|---|---|
//! | Sign | `0x00` ‖ digest(32) | signature(256) |
//! | Verify | `0x01` ‖ digest(32) ‖ signature(256) | status(1) |

use sha2::{Digest as _, Sha256};

use crate::op::Op;

/// SHA-256 digest length in bytes.
pub const DIGEST_LEN: usize = 32;
/// Device signature length in bytes (RSA-2048 PSS).
pub const SIGNATURE_LEN: usize = 256;
/// Sign request: opcode plus digest.
pub const SIGN_REQUEST_LEN: usize = 1 + DIGEST_LEN;
/// Verify request: opcode plus digest plus signature.
pub const VERIFY_REQUEST_LEN: usize = 1 + DIGEST_LEN + SIGNATURE_LEN;
/// Sign response: the signature, nothing else.
pub const SIGN_RESPONSE_LEN: usize = SIGNATURE_LEN;
/// Verify response: one status byte.
pub const VERIFY_RESPONSE_LEN: usize = 1;

/// Verify status byte: signature accepted.
pub const STATUS_VALID: u8 = 0x01;
/// Verify status byte: signature rejected.
pub const STATUS_INVALID: u8 = 0x00;

/// SHA-256 digest of a message.
pub type Digest = [u8; DIGEST_LEN];
/// Opaque device signature. The client never interprets its contents.
pub type Signature = [u8; SIGNATURE_LEN];

/// Hashes `message` the way the device expects it: SHA-256 over the raw
/// bytes. The digest is the only representation of the message that ever
/// crosses the wire.
#[must_use]
pub fn digest(message: &[u8]) -> Digest {
    Sha256::digest(message).into()
}

/// Builds a sign request frame for `digest`.
#[must_use]
pub fn sign_request(digest: &Digest) -> [u8; SIGN_REQUEST_LEN] {
    let mut frame = [0u8; SIGN_REQUEST_LEN];
    frame[0] = Op::Sign as u8;
    frame[1..].copy_from_slice(digest);
    frame
}

/// Builds a verify request frame for `digest` and `signature`.
#[must_use]
pub fn verify_request(digest: &Digest, signature: &Signature) -> [u8; VERIFY_REQUEST_LEN] {
    let mut frame = [0u8; VERIFY_REQUEST_LEN];
    frame[0] = Op::Verify as u8;
    frame[1..=DIGEST_LEN].copy_from_slice(digest);
    frame[1 + DIGEST_LEN..].copy_from_slice(signature);
    frame
}

/// Decodes a verify status byte.
///
/// Returns `None` for any byte other than [`STATUS_VALID`] and
/// [`STATUS_INVALID`]; the protocol defines no other status values and the
/// caller must treat them as a protocol fault, not guess a boolean.
#[must_use]
pub fn verify_status(byte: u8) -> Option<bool> {
    match byte {
        STATUS_VALID => Some(true),
        STATUS_INVALID => Some(false),
        _ => None,
    }
}
