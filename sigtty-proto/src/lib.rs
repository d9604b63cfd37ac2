//! Wire protocol for the sigtty serial signing device.
//!
//! Requests are a single opcode byte followed by raw fixed-length fields;
//! responses are fixed-length byte strings with no framing of their own.
//! The device hashes nothing itself: the client sends a SHA-256 digest of
//! the message, never the message.

mod op;
mod wire;

pub use op::{Op, UnknownOp};
pub use wire::{
    DIGEST_LEN, Digest, SIGN_REQUEST_LEN, SIGN_RESPONSE_LEN, SIGNATURE_LEN, STATUS_INVALID,
    STATUS_VALID, Signature, VERIFY_REQUEST_LEN, VERIFY_RESPONSE_LEN, digest, sign_request,
    verify_request, verify_status,
};
