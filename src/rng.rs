//! Random source helpers.
//!
//! All generation takes an explicit `&mut impl Rng`; there is no process-wide
//! generator. A campaign or batch owns one [`FuzzRng`] seeded through
//! [`seeded`], so a fixed seed replays the exact same sequence.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Generator type used by batches and campaigns.
pub type FuzzRng = StdRng;

/// Build a generator from an optional seed. Without a seed the generator is
/// drawn from OS entropy.
pub fn seeded(seed: Option<u64>) -> FuzzRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Returns `true` with probability `p` (a uniform draw in `[0, 1)` below `p`).
#[inline]
pub fn chance(rng: &mut impl Rng, p: f64) -> bool {
    rng.random::<f64>() < p
}

/// Uniformly select one entry of a non-empty table.
///
/// # Panics
///
/// Panics if `items` is empty; every table in [`crate::tables`] is non-empty.
#[inline]
pub fn pick<'a, T>(rng: &mut impl Rng, items: &'a [T]) -> &'a T {
    &items[rng.random_range(0..items.len())]
}

/// Draw a 32-bit seed for a nested batch.
#[inline]
pub fn sub_seed(rng: &mut impl Rng) -> u64 {
    rng.random_range(0..1u64 << 32)
}

/// `len` uniformly random bytes.
pub fn random_bytes(rng: &mut impl Rng, len: usize) -> Vec<u8> {
    (0..len).map(|_| rng.random::<u8>()).collect()
}

/// `len` characters drawn from an ASCII charset.
pub fn random_string(rng: &mut impl Rng, charset: &[u8], len: usize) -> String {
    (0..len).map(|_| char::from(*pick(rng, charset))).collect()
}
