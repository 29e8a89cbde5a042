//! Key-conditioned negacyclic rotation of a shared accumulator.
//!
//! One blind-rotation launch applies `w` strictly ordered steps to an
//! accumulator polynomial of length `n`, one step per nonzero key position.
//! Each step rotates the whole accumulator by an amount derived from the
//! key trit's sign and the step's rotation sample; wrapping past either
//! boundary of the coefficient vector negates the wrapped value (the ring
//! is Z[X]/(X^n + 1)).
//!
//! Step `k+1` must observe the accumulator exactly as step `k` left it, so
//! steps run sequentially. Within a step the output indices are
//! independent: rayon workers each fill a disjoint contiguous range of the
//! write buffer while every read comes from the read buffer, and the join
//! of the parallel iterator is the barrier that separates the step's
//! writes from the next step's reads. The buffers then swap (ping-pong);
//! the read buffer is never written mid-step, which is what rules out the
//! read-after-write hazard an in-place rotation would have.

use crate::errors::TernaryError;
use crate::packed::PackedTritKey;
use crate::ternary::Trit;
use rayon::prelude::*;
use tracing::{debug, trace};

/// Minimum output indices per cooperative worker chunk. Below this,
/// splitting a step across workers costs more than the rotation itself.
pub const PAR_CHUNK_MIN: usize = 1024;

/// Signed rotation amount for one step, reduced into `[0, n)`.
///
/// Sign convention (fixed protocol detail): a P trit rotates by
/// `-sample`, an N trit by `+sample`. A zero trit has no defined rotation
/// and fails with [`TernaryError::InvalidTritValue`]; `n == 0` leaves no
/// residue class to reduce into and fails with
/// [`TernaryError::LengthMismatch`].
pub fn rotation_amount(trit: Trit, sample: i64, n: usize) -> Result<usize, TernaryError> {
    if n == 0 {
        return Err(TernaryError::LengthMismatch { expected: 1, got: 0 });
    }
    let signed = match trit {
        Trit::P => sample.wrapping_neg(),
        Trit::N => sample,
        Trit::Z => return Err(TernaryError::InvalidTritValue { value: 0 }),
    };
    Ok(signed.rem_euclid(n as i64) as usize)
}

/// Rotate `src` by `amount` positions into the disjoint buffer `dst`.
///
/// `dst[i] = src[(i - amount) mod n]`, negated when the source index
/// wrapped past 0. `amount` is reduced modulo `n` first. Single-owner
/// sequential pass; the cooperative version lives in [`blind_rotate`].
pub fn negacyclic_rotate(src: &[i64], dst: &mut [i64], amount: usize) -> Result<(), TernaryError> {
    if dst.len() != src.len() {
        return Err(TernaryError::LengthMismatch {
            expected: src.len(),
            got: dst.len(),
        });
    }
    let n = src.len();
    if n == 0 {
        return Ok(());
    }
    let amount = amount % n;
    for i in 0..amount {
        dst[i] = src[i + n - amount].wrapping_neg();
    }
    for i in amount..n {
        dst[i] = src[i - amount];
    }
    Ok(())
}

/// One step's rotation, fanned out over cooperative workers.
///
/// Each worker owns a disjoint contiguous range of `dst`; all reads hit
/// `src`. Returning from the parallel iterator is the full barrier: no
/// caller code runs until every worker's writes are complete.
fn rotate_into_par(src: &[i64], dst: &mut [i64], amount: usize, chunk: usize) {
    let n = src.len();
    debug_assert!(amount < n);
    dst.par_chunks_mut(chunk).enumerate().for_each(|(ci, out)| {
        let base = ci * chunk;
        for (k, slot) in out.iter_mut().enumerate() {
            let i = base + k;
            *slot = if i >= amount {
                src[i - amount]
            } else {
                src[i + n - amount].wrapping_neg()
            };
        }
    });
}

/// Apply one blind-rotation launch: `w` ordered negacyclic steps keyed on
/// the packed ternary key.
///
/// `positions` and `samples` pair up one-to-one; entry `k` rotates the
/// accumulator by the sign-conditioned, modulus-reduced amount of
/// `(positions[k], samples[k])` (see [`rotation_amount`]). The whole
/// schedule is validated before the first write: operand lengths must
/// agree, every position must lie in `[0, n)`, and every referenced trit
/// must be nonzero. A rejected call leaves `acc` untouched.
///
/// Working storage is one internally allocated copy of the accumulator;
/// the two buffers ping-pong across steps and the result is copied back
/// into `acc` when the step count is odd.
pub fn blind_rotate(
    acc: &mut [i64],
    key: &PackedTritKey,
    positions: &[usize],
    samples: &[i64],
) -> Result<(), TernaryError> {
    if acc.len() != key.len() {
        return Err(TernaryError::LengthMismatch {
            expected: key.len(),
            got: acc.len(),
        });
    }
    if positions.len() != samples.len() {
        return Err(TernaryError::LengthMismatch {
            expected: positions.len(),
            got: samples.len(),
        });
    }
    let n = acc.len();
    let w = positions.len();
    if w == 0 {
        return Ok(());
    }
    for &pos in positions {
        if pos >= n {
            return Err(TernaryError::PositionOutOfRange { position: pos, len: n });
        }
        if key.get(pos).is_zero() {
            return Err(TernaryError::ZeroTritInSupport { position: pos });
        }
    }

    debug!(n, w, "starting blind rotation");
    let mut scratch = vec![0i64; n];
    let chunk = PAR_CHUNK_MIN.max(n.div_ceil(rayon::current_num_threads().max(1)));

    let mut src: &mut [i64] = acc;
    let mut dst: &mut [i64] = scratch.as_mut_slice();
    for (step, (&pos, &sample)) in positions.iter().zip(samples).enumerate() {
        let amount = rotation_amount(key.get(pos), sample, n)?;
        trace!(step, position = pos, amount, "negacyclic step");
        rotate_into_par(src, dst, amount, chunk);
        std::mem::swap(&mut src, &mut dst);
    }
    // After the final swap the result sits in `src`; for an odd step count
    // that is the scratch buffer, not the caller's.
    if w % 2 == 1 {
        dst.copy_from_slice(src);
    }
    Ok(())
}
