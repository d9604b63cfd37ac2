//! Operation codes for device requests.

/// Single-byte operation selector at the start of every request.
///
/// The device firmware's message table also reserves `0x02`/`0x03` for
/// owner and address queries, but it never answers them, so they are not
/// part of this protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Op {
    /// Request a signature over a digest.
    Sign = 0x00,
    /// Ask the device to check a signature against a digest.
    Verify = 0x01,
}

/// A byte that does not name a known operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown opcode {0:#04x}")]
pub struct UnknownOp(pub u8);

impl TryFrom<u8> for Op {
    type Error = UnknownOp;

    fn try_from(byte: u8) -> Result<Self, UnknownOp> {
        match byte {
            0x00 => Ok(Self::Sign),
            0x01 => Ok(Self::Verify),
            other => Err(UnknownOp(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_known_ops() {
        assert_eq!(Op::try_from(0x00).unwrap(), Op::Sign);
        assert_eq!(Op::try_from(0x01).unwrap(), Op::Verify);
    }

    #[test]
    fn rejects_reserved_and_garbage() {
        assert_eq!(Op::try_from(0x02), Err(UnknownOp(0x02)));
        assert_eq!(Op::try_from(0x03), Err(UnknownOp(0x03)));
        assert_eq!(Op::try_from(0xff), Err(UnknownOp(0xff)));
    }
}
