//! Shuffle selection
//!
//! Shuffle keeps no history: each skip draws a uniformly random slot, and
//! the current slot may be drawn again.

use rand::Rng;

/// Pick a random queue index in `0..len`
///
/// Returns `None` for an empty queue.
pub fn random_index<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Option<usize> {
    (len > 0).then(|| rng.gen_range(0..len))
}
