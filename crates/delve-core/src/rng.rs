//! Random number generator abstraction for determinism.
//!
//! In production, this wraps a real RNG. In tests a seeded or scripted
//! implementation is injected so turn orders and enemy targets are known.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Abstraction over random number generation.
pub trait DeterministicRng: Send + Sync {
    /// Generate a random `u32` in the range `[min, max]` inclusive.
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32;

    /// Generate a random `f64` in `[0.0, 1.0)`.
    fn next_f64(&mut self) -> f64;
}

/// Production RNG seeded from the operating system.
#[derive(Debug)]
pub struct SystemRng(StdRng);

impl SystemRng {
    /// Creates an RNG seeded from OS entropy.
    #[must_use]
    pub fn new() -> Self {
        Self(StdRng::from_os_rng())
    }

    /// Creates an RNG with a fixed seed, for reproducible sessions.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl Default for SystemRng {
    fn default() -> Self {
        Self::new()
    }
}

impl DeterministicRng for SystemRng {
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32 {
        self.0.random_range(min..=max)
    }

    fn next_f64(&mut self) -> f64 {
        self.0.random::<f64>()
    }
}

/// Picks a uniformly random index into a collection of `len` items.
///
/// Returns `None` for an empty collection without consuming randomness.
#[allow(clippy::cast_possible_truncation)]
pub fn pick_index(len: usize, rng: &mut dyn DeterministicRng) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let upper = (len - 1).min(u32::MAX as usize) as u32;
    Some(rng.next_u32_range(0, upper) as usize)
}

/// Shuffles `items` in place (Fisher-Yates), drawing one value per swap.
///
/// Every permutation is equally likely when `rng` is uniform.
#[allow(clippy::cast_possible_truncation)]
pub fn shuffle<T>(items: &mut [T], rng: &mut dyn DeterministicRng) {
    for i in (1..items.len()).rev() {
        let j = rng.next_u32_range(0, i as u32) as usize;
        items.swap(i, j.min(i));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Replays a fixed list of draws.
    struct Draws(Vec<u32>);

    impl DeterministicRng for Draws {
        fn next_u32_range(&mut self, _min: u32, _max: u32) -> u32 {
            self.0.remove(0)
        }

        fn next_f64(&mut self) -> f64 {
            0.0
        }
    }

    #[test]
    fn test_shuffle_with_identity_draws_keeps_order() {
        let mut items = vec!['a', 'b', 'c', 'd'];
        let mut rng = Draws(vec![3, 2, 1]);

        shuffle(&mut items, &mut rng);

        assert_eq!(items, vec!['a', 'b', 'c', 'd']);
        assert!(rng.0.is_empty());
    }

    #[test]
    fn test_shuffle_swaps_drawn_positions() {
        let mut items = vec!['a', 'b', 'c', 'd'];
        let mut rng = Draws(vec![3, 0, 1]);

        shuffle(&mut items, &mut rng);

        assert_eq!(items, vec!['c', 'b', 'a', 'd']);
    }

    #[test]
    fn test_shuffle_of_single_item_draws_nothing() {
        let mut items = vec![1];
        let mut rng = Draws(vec![]);

        shuffle(&mut items, &mut rng);

        assert_eq!(items, vec![1]);
    }

    #[test]
    fn test_pick_index_of_empty_collection_is_none() {
        let mut rng = Draws(vec![]);

        assert_eq!(pick_index(0, &mut rng), None);
    }

    #[test]
    fn test_pick_index_uses_drawn_value() {
        let mut rng = Draws(vec![1]);

        assert_eq!(pick_index(2, &mut rng), Some(1));
    }

    #[test]
    fn test_seeded_system_rng_stays_in_range() {
        let mut rng = SystemRng::seeded(7);

        for _ in 0..100 {
            let value = rng.next_u32_range(2, 5);
            assert!((2..=5).contains(&value));
        }
    }

    #[test]
    fn test_seeded_system_rng_shuffle_is_a_permutation() {
        let mut rng = SystemRng::seeded(42);
        let mut items: Vec<u32> = (0..10).collect();

        shuffle(&mut items, &mut rng);

        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..10).collect::<Vec<_>>());
    }
}
