//! Protocol client for a serial-attached RSA signing device.
//!
//! `sigtty` speaks a minimal opcode-framed request/response protocol to a
//! signing device behind a character stream (a `/dev/tty*` node, a PTY, or
//! anything else duplex). Two operations exist: sign a message and verify
//! a signature against a message. Messages are hashed locally with SHA-256;
//! only the 32-byte digest crosses the wire.
//!
//! # Quick start
//!
//! ```no_run
//! use std::fs::OpenOptions;
//! use sigtty::{Client, StreamChannel};
//!
//! # fn main() -> sigtty::Result<()> {
//! let device = OpenOptions::new()
//!     .read(true)
//!     .write(true)
//!     .open("/dev/ttyUSB0")?;
//!
//! let mut client = Client::new(StreamChannel::new(device));
//! let signature = client.sign(b"swap wen?")?;
//! assert!(client.verify(b"swap wen?", &signature)?);
//! # Ok(())
//! # }
//! ```
//!
//! The device handle is opened and owned by the caller; the client borrows
//! nothing global and drives exactly one channel for its lifetime.

mod channel;
mod client;
mod error;

pub use channel::{Channel, StreamChannel};
pub use client::Client;
pub use error::{Error, Result};
pub use sigtty_proto::{DIGEST_LEN, Digest, SIGNATURE_LEN, Signature};
