//! Deterministic shuffling for quiz runs.
//!
//! A run is ordered by repeatedly drawing a random card from the remaining
//! pool. The generator is seeded from `EngineConfig::seed`, and its position
//! can be captured so a restored session continues the same sequence.
//!
//! ```
//! use kanji_deck::core::QuizRng;
//!
//! let mut a = QuizRng::new(42);
//! let mut b = QuizRng::new(42);
//!
//! let cards = vec!["日", "月", "火", "水"];
//! assert_eq!(a.draw_shuffle(&cards), b.draw_shuffle(&cards));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Seeded generator behind every quiz shuffle.
#[derive(Clone, Debug)]
pub struct QuizRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl QuizRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Uniform permutation of `items`.
    ///
    /// Quadratic in the pool size, which a study deck never notices.
    pub fn draw_shuffle<T: Clone>(&mut self, items: &[T]) -> Vec<T> {
        let mut pool = items.to_vec();
        let mut drawn = Vec::with_capacity(pool.len());
        while !pool.is_empty() {
            let index = self.inner.gen_range(0..pool.len());
            drawn.push(pool.remove(index));
        }
        drawn
    }

    /// Capture the seed and stream position.
    #[must_use]
    pub fn state(&self) -> QuizRngState {
        QuizRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    #[must_use]
    pub fn from_state(state: &QuizRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

/// Serializable position of a `QuizRng`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizRngState {
    pub seed: u64,
    /// ChaCha8 word position.
    pub word_pos: u128,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_order() {
        let cards: Vec<u32> = (0..20).collect();
        let mut a = QuizRng::new(42);
        let mut b = QuizRng::new(42);
        for _ in 0..5 {
            assert_eq!(a.draw_shuffle(&cards), b.draw_shuffle(&cards));
        }
    }

    #[test]
    fn test_draw_shuffle_is_permutation() {
        let mut rng = QuizRng::new(42);
        let data: Vec<u32> = (1..=10).collect();

        let mut shuffled = rng.draw_shuffle(&data);
        assert_ne!(shuffled, data);
        shuffled.sort_unstable();
        assert_eq!(shuffled, data);
    }

    #[test]
    fn test_draw_shuffle_empty_and_single() {
        let mut rng = QuizRng::new(7);
        let empty: Vec<u8> = Vec::new();
        assert!(rng.draw_shuffle(&empty).is_empty());
        assert_eq!(rng.draw_shuffle(&["日"]), vec!["日"]);
    }

    #[test]
    fn test_every_card_can_come_first() {
        let mut rng = QuizRng::new(99);
        let data = [0usize, 1, 2, 3];
        let mut seen_first = [false; 4];
        for _ in 0..200 {
            seen_first[rng.draw_shuffle(&data)[0]] = true;
        }
        assert!(seen_first.iter().all(|&s| s));
    }

    #[test]
    fn test_resume_from_state() {
        let cards = ["日", "月", "火", "水", "木"];
        let mut rng = QuizRng::new(3);
        rng.draw_shuffle(&cards);

        let state = rng.state();
        let expected = rng.draw_shuffle(&cards);
        let mut resumed = QuizRng::from_state(&state);
        assert_eq!(resumed.draw_shuffle(&cards), expected);

        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(serde_json::from_str::<QuizRngState>(&json).unwrap(), state);
    }
}
