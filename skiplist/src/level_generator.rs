//! SkipLists use a probabilistic distribution of nodes over the internal
//! levels, whereby the lowest level (level 0) contains all the nodes, and each
//! level `n > 0` will contain a random subset of the nodes on level `n - 1`.
//!
//! Most commonly, a geometric distribution is used whereby the chance that a
//! node occupies level `n` is `p` times the chance of occupying level `n-1`
//! (with `0 < p < 1`).
//!
//! For one-shot construction from a known set of values, `tree_levels` assigns
//! levels deterministically so that the lanes mirror a balanced binary search
//! tree.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use config::Config;

use crate::error::SkipListError;

// ////////////////////////////////////////////////////////////////////////////
// Level Generator
// ////////////////////////////////////////////////////////////////////////////

/// Upon the insertion of a new node in the list, the node is replicated to
/// high levels with a certain probability as determined by a `LevelGenerator`.
///
/// The list computes `limit` from its level ceiling policy and its current
/// height, so a single insertion never adds more than one lane.
pub trait LevelGenerator {
    /// Generate a level count for a new node in the range `[1, limit]`.
    ///
    /// `limit` is always at least 1.  Returning anything outside the range
    /// makes the insertion fail with `SkipListError::InvalidConfiguration`.
    fn random(&mut self, limit: usize) -> usize;
}

/// A level generator which will produce geometrically distributed numbers.
///
/// The probability of generating level count `n + 1` is `p` times the
/// probability of generating `n`, truncated at the limit given by the list.
#[derive(Clone, Debug)]
pub struct GeometricalLevelGenerator {
    p: f64,
    rng: StdRng,
}

impl GeometricalLevelGenerator {
    /// Create a new GeometricalLevelGenerator with `p` as the probability
    /// that a given node is present in the next level.  The generator is
    /// seeded from the OS unless a `seed` is given.
    ///
    /// `p` must be in `(0, 1)`.
    pub fn new(p: f64, seed: Option<u64>) -> Result<Self, SkipListError> {
        if !(p > 0.0 && p < 1.0) {
            return Err(SkipListError::InvalidConfiguration(format!(
                "p must be in (0, 1), got {}",
                p
            )));
        }
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(GeometricalLevelGenerator { p, rng })
    }

    pub fn from_config(config: &Config) -> Result<Self, SkipListError> {
        Self::new(config.probability, config.seed)
    }
}

impl Default for GeometricalLevelGenerator {
    fn default() -> Self {
        GeometricalLevelGenerator {
            p: 0.5,
            rng: StdRng::from_entropy(),
        }
    }
}

impl LevelGenerator for GeometricalLevelGenerator {
    fn random(&mut self, limit: usize) -> usize {
        let mut h = 1;
        let mut x = self.p;
        let f = 1.0 - self.rng.gen::<f64>();
        while x > f && h < limit {
            h += 1;
            x *= self.p;
        }
        h
    }
}

// ////////////////////////////////////////////////////////////////////////////
// Tree-like levels
// ////////////////////////////////////////////////////////////////////////////

/// Level counts for `len` sorted values loaded at once.
///
/// The median of the whole range reaches `top + 1` levels, the medians of the
/// two halves one level less, and so on down to a single level, like the depths
/// of a balanced binary search tree.  Entry `i` is the level count of the `i`-th
/// smallest value.
///
/// # Examples
///
/// ```
/// use skiplist::tree_levels;
///
/// assert_eq!(tree_levels(7, 2), vec![1, 2, 1, 3, 1, 2, 1]);
/// ```
pub fn tree_levels(len: usize, top: usize) -> Vec<usize> {
    let mut levels = vec![1; len];
    assign(&mut levels, top);
    levels
}

fn assign(levels: &mut [usize], value: usize) {
    if levels.is_empty() {
        return;
    }
    let mid = levels.len() / 2;
    levels[mid] = value + 1;
    let below = value.saturating_sub(1);
    let (left, right) = levels.split_at_mut(mid);
    assign(left, below);
    assign(&mut right[1..], below);
}
