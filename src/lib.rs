//! Tritrotor - Sparse Ternary Blind Rotation Substrate
//!
//! Copyright (c) 2026 Tritrotor Contributors
//! Licensed under MIT License
//!
//! Production Rust implementation of the ternary core of an FHE
//! bootstrapping pipeline: a bit-exact 2-bit trit codec with batched
//! packing, a multiplication-free sparse ternary fused multiply-accumulate,
//! and a cooperatively parallel negacyclic blind rotation step.

pub mod errors;
pub mod fma;
pub mod packed;
pub mod rotation;
pub mod ternary;

// Re-export main types for convenience
pub use errors::TernaryError;
pub use fma::{fma, fma_par, fma_scalar, fma_sparse, LANE_WIDTH};
pub use packed::{PackedTritKey, TRITS_PER_WORD};
pub use rotation::{blind_rotate, negacyclic_rotate, rotation_amount, PAR_CHUNK_MIN};
pub use ternary::Trit;
