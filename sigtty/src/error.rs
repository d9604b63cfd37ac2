//! Error types for sigtty operations.

use std::time::Duration;

use sigtty_proto::SIGNATURE_LEN;

/// Alias for `Result<T, sigtty::Error>`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by channel and client operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// `verify` was called with a signature that is not exactly
    /// [`SIGNATURE_LEN`] bytes. Detected before any I/O occurs.
    #[error("signature must be {SIGNATURE_LEN} bytes, got {0}")]
    SignatureLength(usize),

    /// The channel failed to accept a write or reported a read fault.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The channel reported end-of-stream: the device side is gone.
    #[error("device stream closed")]
    Closed,

    /// The stream closed before a fixed-length response was fully read.
    #[error("device stream closed with {got} of {want} response bytes read")]
    TruncatedResponse {
        /// Expected response length.
        want: usize,
        /// Bytes actually collected before the close.
        got: usize,
    },

    /// A verify response byte outside the defined `{0x00, 0x01}` set.
    #[error("verify returned undefined status byte {0:#04x}")]
    InvalidStatus(u8),

    /// The configured deadline elapsed before the response completed.
    #[error("device did not respond within {0:?}")]
    Timeout(Duration),
}
