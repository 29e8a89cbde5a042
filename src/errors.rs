//! Error kinds returned by the library.

use thiserror::Error;

/// Errors returned by tritrotor operations.
///
/// Every failure surfaces as one of these kinds; no operation retries
/// internally or degrades to a silently wrong numeric result.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum TernaryError {
    /// An integer outside {-1, 0, +1} was offered where a trit is required.
    #[error("invalid trit value {value}, expected -1, 0, or +1")]
    InvalidTritValue {
        /// The offending value.
        value: i64,
    },
    /// A 2-bit code outside {0, 1, 2} was offered at decode time. Code 3 is
    /// reserved and never mapped to a guessed value.
    #[error("invalid trit code {code}, expected 0, 1, or 2")]
    InvalidTritCode {
        /// The offending code.
        code: u8,
    },
    /// Two buffers or a buffer and a requested element count disagree.
    #[error("length mismatch: expected {expected}, got {got}")]
    LengthMismatch {
        /// The length required by the operation.
        expected: usize,
        /// The length actually supplied.
        got: usize,
    },
    /// A support or schedule entry references a position outside `[0, len)`.
    #[error("position {position} out of range for length {len}")]
    PositionOutOfRange {
        /// The offending position.
        position: usize,
        /// The operand length it was checked against.
        len: usize,
    },
    /// A support or schedule entry points at a zero trit. Nonzero-only lists
    /// are part of the calling contract and are checked before any write.
    #[error("support entry {position} holds a zero trit")]
    ZeroTritInSupport {
        /// The offending position.
        position: usize,
    },
}
