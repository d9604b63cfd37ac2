//! Request/response client for the signing device.

use std::thread;
use std::time::{Duration, Instant};

use sigtty_proto::{SIGN_RESPONSE_LEN, Signature, VERIFY_RESPONSE_LEN};

use crate::channel::Channel;
use crate::error::{Error, Result};

/// Pause between reads that returned no bytes, so a polling channel is not
/// spun on a hot loop.
const POLL_INTERVAL: Duration = Duration::from_millis(1);

/// A client connection to the signing device.
///
/// Owns exactly one [`Channel`] for its lifetime; `&mut self` on every
/// operation keeps the wire protocol's one-exchange-at-a-time invariant
/// without any locking. The wire protocol carries no request identifiers,
/// so interleaved exchanges cannot be disambiguated — callers sharing a
/// client across threads must serialize access themselves.
#[derive(Debug)]
pub struct Client<C> {
    /// The underlying device channel.
    channel: C,
    /// Overall per-response deadline, if configured.
    deadline: Option<Duration>,
}

impl<C: Channel> Client<C> {
    /// Creates a client over an already-opened device channel, with no
    /// response deadline: a stalled device blocks the caller indefinitely.
    pub fn new(channel: C) -> Self {
        Self {
            channel,
            deadline: None,
        }
    }

    /// Creates a client that fails a call with [`Error::Timeout`] when a
    /// full response has not arrived within `deadline`.
    ///
    /// The deadline is checked between reads, so it only bites on channels
    /// that yield transient empty reads (e.g. a serial handle opened with
    /// a read timeout). A channel that blocks forever inside a single
    /// `read` cannot be interrupted at this layer.
    pub fn with_deadline(channel: C, deadline: Duration) -> Self {
        Self {
            channel,
            deadline: Some(deadline),
        }
    }

    /// Unwraps the underlying channel.
    pub fn into_inner(self) -> C {
        self.channel
    }

    /// Asks the device to sign `message`.
    ///
    /// Hashes the message locally, sends the 33-byte sign request, and
    /// reads back the 256-byte signature, accumulating however many reads
    /// the channel needs to deliver it.
    pub fn sign(&mut self, message: &[u8]) -> Result<Signature> {
        let digest = sigtty_proto::digest(message);
        self.channel.write_all(&sigtty_proto::sign_request(&digest))?;
        tracing::debug!(message_len = message.len(), "sign request written");

        let mut signature = [0u8; SIGN_RESPONSE_LEN];
        self.read_response(&mut signature)?;
        tracing::debug!("signature received");
        Ok(signature)
    }

    /// Asks the device whether `signature` is valid for `message`.
    ///
    /// The signature must be exactly 256 bytes; anything else fails with
    /// [`Error::SignatureLength`] before a single byte is written. A
    /// response byte outside `{0x00, 0x01}` is [`Error::InvalidStatus`].
    pub fn verify(&mut self, message: &[u8], signature: &[u8]) -> Result<bool> {
        let signature: &Signature = signature
            .try_into()
            .map_err(|_| Error::SignatureLength(signature.len()))?;

        let digest = sigtty_proto::digest(message);
        self.channel
            .write_all(&sigtty_proto::verify_request(&digest, signature))?;
        tracing::debug!(message_len = message.len(), "verify request written");

        let mut status = [0u8; VERIFY_RESPONSE_LEN];
        self.read_response(&mut status)?;
        sigtty_proto::verify_status(status[0]).ok_or(Error::InvalidStatus(status[0]))
    }

    /// Fills `buf` completely from the channel.
    ///
    /// Responses are fixed length, so this loops over short reads — each
    /// call requests only the bytes still missing — until the buffer is
    /// full. A device that trickles one byte per read is fine; a channel
    /// close mid-response is [`Error::TruncatedResponse`]; a configured
    /// deadline elapsing is [`Error::Timeout`].
    fn read_response(&mut self, buf: &mut [u8]) -> Result<()> {
        let want = buf.len();
        let start = Instant::now();
        let mut got = 0;
        while got < want {
            if let Some(deadline) = self.deadline {
                if start.elapsed() >= deadline {
                    return Err(Error::Timeout(deadline));
                }
            }
            match self.channel.read(&mut buf[got..]) {
                Ok(0) => thread::sleep(POLL_INTERVAL),
                Ok(n) => {
                    got += n;
                    tracing::trace!(got, want, "response bytes accumulated");
                }
                Err(Error::Closed) => return Err(Error::TruncatedResponse { want, got }),
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }
}
