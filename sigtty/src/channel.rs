//! Byte-stream transport to the signing device.
//!
//! The client only ever sees the [`Channel`] trait, so it can be driven
//! against an in-memory fake as easily as a real `/dev/tty*` handle. The
//! trait's read contract differs from [`std::io::Read`] in one deliberate
//! way: `Ok(0)` means "no bytes available right now" and is retryable,
//! while end-of-stream is the distinct fatal [`Error::Closed`].

use std::io::{self, Read, Write};

use crate::error::{Error, Result};

/// A duplex byte stream bound to the device.
///
/// Implementations expose no framing knowledge; they move raw bytes.
pub trait Channel {
    /// Writes the entire buffer, or fails. Partial writes are not
    /// reported upward; implementations loop until flushed.
    fn write_all(&mut self, buf: &[u8]) -> Result<()>;

    /// Reads up to `buf.len()` bytes, returning how many were filled.
    ///
    /// May return fewer bytes than requested. `Ok(0)` signals only that
    /// nothing was available yet, never end-of-stream; a closed stream is
    /// [`Error::Closed`].
    fn read(&mut self, buf: &mut [u8]) -> Result<usize>;
}

/// [`Channel`] adapter over any `Read + Write` handle: an opened serial
/// device node, a PTY, a socket.
///
/// Translates between the two read conventions: `io::Read`'s `Ok(0)`
/// end-of-file becomes [`Error::Closed`], while `WouldBlock`/`TimedOut`
/// faults (a non-blocking handle, or a serial port configured with a read
/// timeout) become transient `Ok(0)` reads the client may retry.
#[derive(Debug)]
pub struct StreamChannel<T> {
    /// The underlying duplex handle.
    stream: T,
}

impl<T> StreamChannel<T> {
    /// Wraps an already-opened duplex handle.
    pub fn new(stream: T) -> Self {
        Self { stream }
    }

    /// Unwraps the underlying handle.
    pub fn into_inner(self) -> T {
        self.stream
    }
}

impl<T: Read + Write> Channel for StreamChannel<T> {
    fn write_all(&mut self, buf: &[u8]) -> Result<()> {
        self.stream.write_all(buf)?;
        self.stream.flush()?;
        Ok(())
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        loop {
            match self.stream.read(buf) {
                Ok(0) => return Err(Error::Closed),
                Ok(n) => return Ok(n),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e)
                    if matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut) =>
                {
                    return Ok(0);
                }
                Err(e) => return Err(Error::Io(e)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// `Read + Write` stub that yields a scripted sequence of results.
    struct Scripted {
        results: Vec<io::Result<Vec<u8>>>,
    }

    impl Read for Scripted {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.results.is_empty() {
                return Ok(0);
            }
            match self.results.remove(0) {
                Ok(bytes) => {
                    buf[..bytes.len()].copy_from_slice(&bytes);
                    Ok(bytes.len())
                }
                Err(e) => Err(e),
            }
        }
    }

    impl Write for Scripted {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn eof_becomes_closed() {
        let mut ch = StreamChannel::new(Scripted { results: vec![] });
        let mut buf = [0u8; 4];
        assert!(matches!(ch.read(&mut buf), Err(Error::Closed)));
    }

    #[test]
    fn would_block_becomes_empty_read() {
        let mut ch = StreamChannel::new(Scripted {
            results: vec![
                Err(io::Error::from(io::ErrorKind::WouldBlock)),
                Ok(vec![0x2a]),
            ],
        });
        let mut buf = [0u8; 4];
        assert_eq!(ch.read(&mut buf).unwrap(), 0);
        assert_eq!(ch.read(&mut buf).unwrap(), 1);
        assert_eq!(buf[0], 0x2a);
    }

    #[test]
    fn interrupted_is_retried_internally() {
        let mut ch = StreamChannel::new(Scripted {
            results: vec![
                Err(io::Error::from(io::ErrorKind::Interrupted)),
                Ok(vec![0x01, 0x02]),
            ],
        });
        let mut buf = [0u8; 4];
        assert_eq!(ch.read(&mut buf).unwrap(), 2);
    }

    #[test]
    fn fatal_io_error_propagates() {
        let mut ch = StreamChannel::new(Scripted {
            results: vec![Err(io::Error::from(io::ErrorKind::BrokenPipe))],
        });
        let mut buf = [0u8; 4];
        assert!(matches!(ch.read(&mut buf), Err(Error::Io(_))));
    }
}
