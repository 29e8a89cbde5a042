//! Balanced ternary digit and its 2-bit wire codec.
//!
//! # Representation
//!
//! Single trit: {N, Z, P} = {-1, 0, +1}
//! - N (Negative): -1
//! - Z (Zero): 0
//! - P (Positive): +1
//!
//! # Codec
//!
//! Two bits per trit on the wire:
//! - 0 = Z (0)
//! - 1 = P (+1)
//! - 2 = N (-1)
//! - 3 = reserved, rejected at decode
//!
//! The codec is a bijection between {N, Z, P} and {0, 1, 2}; the reserved
//! pattern is never produced by [`Trit::encode`] and never accepted by
//! [`Trit::decode`].

use crate::errors::TernaryError;
use std::fmt;

/// Single balanced ternary digit.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(i8)]
pub enum Trit {
    /// Negative: -1
    N = -1,
    /// Zero: 0
    #[default]
    Z = 0,
    /// Positive: +1
    P = 1,
}

impl fmt::Debug for Trit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trit::N => write!(f, "N"),
            Trit::Z => write!(f, "Z"),
            Trit::P => write!(f, "P"),
        }
    }
}

impl fmt::Display for Trit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trit::N => write!(f, "-"),
            Trit::Z => write!(f, "0"),
            Trit::P => write!(f, "+"),
        }
    }
}

impl Trit {
    /// All possible trit values in order.
    pub const ALL: [Trit; 3] = [Trit::N, Trit::Z, Trit::P];

    /// Convert from an integer, rejecting anything outside {-1, 0, +1}.
    ///
    /// Never clamps: out-of-domain input is a contract violation, not a
    /// rounding opportunity.
    #[inline]
    pub const fn from_value(v: i64) -> Result<Self, TernaryError> {
        match v {
            -1 => Ok(Trit::N),
            0 => Ok(Trit::Z),
            1 => Ok(Trit::P),
            _ => Err(TernaryError::InvalidTritValue { value: v }),
        }
    }

    /// Signed value of the trit.
    #[inline]
    pub const fn value(self) -> i64 {
        self as i8 as i64
    }

    /// Encode to the 2-bit wire code: Z -> 0, P -> 1, N -> 2.
    #[inline]
    pub const fn encode(self) -> u8 {
        match self {
            Trit::Z => 0,
            Trit::P => 1,
            Trit::N => 2,
        }
    }

    /// Decode a 2-bit wire code: 0 -> Z, 1 -> P, 2 -> N.
    ///
    /// Code 3 is reserved and fails with
    /// [`TernaryError::InvalidTritCode`], as does anything wider than two
    /// bits.
    #[inline]
    pub const fn decode(code: u8) -> Result<Self, TernaryError> {
        match code {
            0 => Ok(Trit::Z),
            1 => Ok(Trit::P),
            2 => Ok(Trit::N),
            _ => Err(TernaryError::InvalidTritCode { code }),
        }
    }

    /// Negate: -N = P, -Z = Z, -P = N
    #[inline]
    #[allow(clippy::should_implement_trait)]
    pub const fn neg(self) -> Trit {
        match self {
            Trit::N => Trit::P,
            Trit::Z => Trit::Z,
            Trit::P => Trit::N,
        }
    }

    /// Is zero?
    #[inline]
    pub const fn is_zero(self) -> bool {
        matches!(self, Trit::Z)
    }

    /// Is non-zero?
    #[inline]
    pub const fn is_nonzero(self) -> bool {
        !self.is_zero()
    }

    /// Trit multiplication.
    ///
    /// Truth table:
    /// ```text
    ///   × | N  Z  P
    /// ----+--------
    ///   N | P  Z  N
    ///   Z | Z  Z  Z
    ///   P | N  Z  P
    /// ```
    #[inline]
    #[allow(clippy::should_implement_trait)]
    pub const fn mul(self, other: Trit) -> Trit {
        match (self, other) {
            (Trit::Z, _) | (_, Trit::Z) => Trit::Z,
            (Trit::P, Trit::P) | (Trit::N, Trit::N) => Trit::P,
            (Trit::P, Trit::N) | (Trit::N, Trit::P) => Trit::N,
        }
    }
}

impl std::ops::Neg for Trit {
    type Output = Trit;
    #[inline]
    fn neg(self) -> Trit {
        Trit::neg(self)
    }
}

impl std::ops::Mul for Trit {
    type Output = Trit;
    #[inline]
    fn mul(self, rhs: Trit) -> Trit {
        Trit::mul(self, rhs)
    }
}
