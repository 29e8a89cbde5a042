//! Ternary fused multiply-accumulate without multiplication.
//!
//! Computes `C[i] = A[i] * trit(B[i])` over a dense `i64` operand and a
//! packed ternary operand. A trit can only pass a value through, negate it,
//! or zero it, so every path realizes the product as a 3-way select and no
//! multiply instruction is ever issued.
//!
//! Three execution strategies with identical results:
//! - [`fma_scalar`]: per-index reference path, the baseline every other
//!   path must match bit for bit.
//! - [`fma`]: word-batched path, [`LANE_WIDTH`] trits per key word, sign
//!   masks derived from the lane bits drive a branchless select.
//! - [`fma_sparse`]: visits only caller-supplied nonzero positions, O(w)
//!   work independent of the operand length.
//!
//! Zero-trit contract: the dense paths write 0; the sparse path leaves
//! non-support positions exactly as the caller initialized them, so its
//! result matches the dense paths on a zero-initialized output buffer.
//!
//! Arithmetic is wrapping: negation uses `wrapping_neg`, so `i64::MIN`
//! flows through unchanged instead of panicking.

use crate::errors::TernaryError;
use crate::packed::{PackedTritKey, TRITS_PER_WORD};
use crate::ternary::Trit;
use rayon::prelude::*;

/// Trits processed per batched lane group.
pub const LANE_WIDTH: usize = TRITS_PER_WORD;

/// Elements per rayon task in [`fma_par`]. Must stay a multiple of
/// [`LANE_WIDTH`] so every task starts on a word boundary.
const PAR_CHUNK: usize = 4096;

#[inline]
fn check_operands(a: &[i64], key: &PackedTritKey, out: &[i64]) -> Result<(), TernaryError> {
    if a.len() != key.len() {
        return Err(TernaryError::LengthMismatch {
            expected: key.len(),
            got: a.len(),
        });
    }
    if out.len() != a.len() {
        return Err(TernaryError::LengthMismatch {
            expected: a.len(),
            got: out.len(),
        });
    }
    Ok(())
}

/// Dense scalar path: decode every trit and apply the 3-way select.
///
/// Z writes 0, P copies `a[i]`, N copies the wrapping negation of `a[i]`.
pub fn fma_scalar(a: &[i64], key: &PackedTritKey, out: &mut [i64]) -> Result<(), TernaryError> {
    check_operands(a, key, out)?;
    for (i, slot) in out.iter_mut().enumerate() {
        *slot = match key.get(i) {
            Trit::Z => 0,
            Trit::P => a[i],
            Trit::N => a[i].wrapping_neg(),
        };
    }
    Ok(())
}

/// Batched kernel over word-aligned lanes.
///
/// `base` is the absolute index of `a[0]`/`out[0]` and must be a multiple
/// of [`LANE_WIDTH`]. For each lane the even key bit selects the passthrough
/// value and the odd bit the negated value; the two bits are never both set
/// in a validated key, so widening them into full masks yields the same
/// 3-way select as the scalar path with no branch and no multiply.
fn fma_lanes(a: &[i64], words: &[u64], base: usize, out: &mut [i64]) {
    debug_assert_eq!(base % LANE_WIDTH, 0);
    debug_assert_eq!(a.len(), out.len());
    let first_word = base / LANE_WIDTH;
    for (wi, chunk) in out.chunks_mut(LANE_WIDTH).enumerate() {
        let w = words[first_word + wi];
        let a_chunk = &a[wi * LANE_WIDTH..][..chunk.len()];
        for (lane, (slot, &x)) in chunk.iter_mut().zip(a_chunk).enumerate() {
            let keep = (((w >> (2 * lane)) & 1) as i64).wrapping_neg();
            let flip = (((w >> (2 * lane + 1)) & 1) as i64).wrapping_neg();
            *slot = (x & keep) | (x.wrapping_neg() & flip);
        }
    }
}

/// Dense batched path, bit-identical to [`fma_scalar`] for every input.
pub fn fma(a: &[i64], key: &PackedTritKey, out: &mut [i64]) -> Result<(), TernaryError> {
    check_operands(a, key, out)?;
    fma_lanes(a, key.words(), 0, out);
    Ok(())
}

/// Dense batched path fanned out over rayon workers.
///
/// Each worker owns a disjoint word-aligned output range; operands are read
/// only, so no ordering constraint applies. Bit-identical to [`fma_scalar`].
pub fn fma_par(a: &[i64], key: &PackedTritKey, out: &mut [i64]) -> Result<(), TernaryError> {
    check_operands(a, key, out)?;
    let words = key.words();
    out.par_chunks_mut(PAR_CHUNK)
        .zip(a.par_chunks(PAR_CHUNK))
        .enumerate()
        .for_each(|(ci, (out_chunk, a_chunk))| {
            fma_lanes(a_chunk, words, ci * PAR_CHUNK, out_chunk);
        });
    Ok(())
}

/// Sparse path: touch only the support positions, O(w) work.
///
/// The whole support list is validated (in range, nonzero decoded trit)
/// before the first write, so a rejected call leaves `out` untouched.
/// Positions outside the support are left exactly as the caller
/// initialized them; with a zero-initialized `out` the result equals the
/// dense paths for the same key.
pub fn fma_sparse(
    a: &[i64],
    key: &PackedTritKey,
    support: &[usize],
    out: &mut [i64],
) -> Result<(), TernaryError> {
    check_operands(a, key, out)?;
    for &idx in support {
        if idx >= a.len() {
            return Err(TernaryError::PositionOutOfRange {
                position: idx,
                len: a.len(),
            });
        }
        if key.get(idx).is_zero() {
            return Err(TernaryError::ZeroTritInSupport { position: idx });
        }
    }
    for &idx in support {
        out[idx] = match key.get(idx) {
            Trit::Z => 0,
            Trit::P => a[idx],
            Trit::N => a[idx].wrapping_neg(),
        };
    }
    Ok(())
}
