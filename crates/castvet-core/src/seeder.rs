//! Deterministic seed derivation.
//!
//! Every generator in this crate draws from a stream produced here. The
//! contract is strict: identical key, identical stream, across processes
//! and runs, for the lifetime of [`SEED_ALGO_VERSION`].
//!
//! Algorithm (versioned): MD5 of the UTF-8 bytes of the key, interpreted
//! as a big-endian `u128`, reduced to the low 64 bits, fed to ChaCha8.
//! ChaCha8 is pinned explicitly (rather than `StdRng`) so the draw stream
//! does not change underneath us when the `rand` crate bumps its default.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Bump this when the digest, the reduction, or the PRNG changes.
/// Streams are only guaranteed identical within one algorithm version.
pub const SEED_ALGO_VERSION: u32 = 1;

/// Derive a stable integer seed from an arbitrary string key.
///
/// Pure function of the key: no process state, no side effects.
pub fn seed_for(key: &str) -> u64 {
    let digest = md5::compute(key.as_bytes());
    let wide = u128::from_be_bytes(digest.0);
    wide as u64
}

/// Initialize a seeded PRNG stream for the given key.
pub fn stream_for(key: &str) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed_for(key))
}
