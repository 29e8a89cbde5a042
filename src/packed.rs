//! Packed ternary key: 2 bits per trit, 32 trits per `u64` word.
//!
//! # Layout
//!
//! Lane `i` of a word occupies bits `2i..2i+2`, least significant lane
//! first; word `k` holds trits `32k..32k+32`. The lane codes are the wire
//! codes of [`Trit::encode`]: 0 = Z, 1 = P, 2 = N, 3 reserved. Unused tail
//! lanes of the last word are zero. The layout is stable within a release
//! but private to this crate; treat it as an internal format.
//!
//! # Invariant
//!
//! No stored lane ever holds the reserved pattern. [`PackedTritKey::pack`]
//! cannot produce it and [`PackedTritKey::from_words`] rejects it, so
//! per-element reads on hot paths decode without re-validating.

use crate::errors::TernaryError;
use crate::ternary::Trit;

/// Trits stored per `u64` word.
pub const TRITS_PER_WORD: usize = 32;

/// Even bit of every lane: the P half of the lane code.
const MASK_EVEN_BITS: u64 = 0x5555_5555_5555_5555;

/// A length-tagged, densely packed ternary key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackedTritKey {
    len: usize,
    words: Vec<u64>,
}

impl PackedTritKey {
    #[inline]
    fn word_count_for_len(len: usize) -> usize {
        len.div_ceil(TRITS_PER_WORD)
    }

    #[inline]
    fn last_word_mask(len: usize) -> u64 {
        let lanes_in_last = len % TRITS_PER_WORD;
        if lanes_in_last == 0 {
            !0u64
        } else {
            (1u64 << (lanes_in_last * 2)) - 1
        }
    }

    /// An all-zero key of `len` trits.
    pub fn new_zero(len: usize) -> Self {
        Self {
            len,
            words: vec![0u64; Self::word_count_for_len(len)],
        }
    }

    /// Pack a trit slice, least significant lane first.
    pub fn pack(trits: &[Trit]) -> Self {
        let mut out = Self::new_zero(trits.len());
        for (i, &t) in trits.iter().enumerate() {
            let bit = i * 2;
            out.words[bit / 64] |= (t.encode() as u64) << (bit % 64);
        }
        out
    }

    /// Unpack the first `n` trits.
    ///
    /// Fails with [`TernaryError::LengthMismatch`] before producing any
    /// element if the key holds fewer than `n` trits.
    pub fn unpack(&self, n: usize) -> Result<Vec<Trit>, TernaryError> {
        if n > self.len {
            return Err(TernaryError::LengthMismatch {
                expected: n,
                got: self.len,
            });
        }
        Ok((0..n).map(|i| self.get(i)).collect())
    }

    /// Adopt a raw word buffer as a key of `len` trits.
    ///
    /// This is the one boundary where lane validation happens: the buffer
    /// must hold exactly `ceil(len / 32)` words, no lane may carry the
    /// reserved code 3, and every tail lane past `len` must be zero.
    pub fn from_words(words: Vec<u64>, len: usize) -> Result<Self, TernaryError> {
        let expected_words = Self::word_count_for_len(len);
        if words.len() != expected_words {
            return Err(TernaryError::LengthMismatch {
                expected: expected_words,
                got: words.len(),
            });
        }
        for (word_idx, &w) in words.iter().enumerate() {
            let reserved = w & (w >> 1) & MASK_EVEN_BITS;
            if reserved != 0 {
                return Err(TernaryError::InvalidTritCode { code: 3 });
            }
            if word_idx + 1 == expected_words {
                let tail = w & !Self::last_word_mask(len);
                if tail != 0 {
                    let lane = (tail.trailing_zeros() as usize) / 2;
                    return Err(TernaryError::LengthMismatch {
                        expected: len,
                        got: word_idx * TRITS_PER_WORD + lane + 1,
                    });
                }
            }
        }
        Ok(Self { len, words })
    }

    /// The packed word buffer.
    #[inline]
    pub fn words(&self) -> &[u64] {
        &self.words
    }

    /// Number of trits in the key.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Read the trit at index `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.len()`. The reserved lane pattern cannot occur
    /// here; constructors reject it.
    #[inline]
    pub fn get(&self, i: usize) -> Trit {
        assert!(i < self.len, "trit index {} out of range for {}", i, self.len);
        let bit = i * 2;
        let code = ((self.words[bit / 64] >> (bit % 64)) & 0b11) as u8;
        match code {
            0 => Trit::Z,
            1 => Trit::P,
            2 => Trit::N,
            _ => unreachable!("reserved lane pattern in validated key"),
        }
    }

    /// Write the trit at index `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.len()`.
    #[inline]
    pub fn set(&mut self, i: usize, t: Trit) {
        assert!(i < self.len, "trit index {} out of range for {}", i, self.len);
        let bit = i * 2;
        let word = &mut self.words[bit / 64];
        *word &= !(0b11u64 << (bit % 64));
        *word |= (t.encode() as u64) << (bit % 64);
    }

    /// Count of nonzero trits.
    pub fn hamming_weight(&self) -> usize {
        self.words
            .iter()
            .map(|&w| (((w >> 1) | w) & MASK_EVEN_BITS).count_ones() as usize)
            .sum()
    }

    /// Ordered positions of all nonzero trits.
    ///
    /// Word-wise extraction: a lane is nonzero when either of its bits is
    /// set, so collapsing the odd bit onto the even bit yields one marker
    /// bit per nonzero lane.
    pub fn support(&self) -> Vec<usize> {
        let mut out = Vec::with_capacity(self.hamming_weight());
        for (word_idx, &w) in self.words.iter().enumerate() {
            let mut m = ((w >> 1) | w) & MASK_EVEN_BITS;
            while m != 0 {
                let lane = (m.trailing_zeros() as usize) / 2;
                out.push(word_idx * TRITS_PER_WORD + lane);
                m &= m - 1;
            }
        }
        out
    }
}
