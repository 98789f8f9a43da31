//! Caller-owned heuristic memo.
//!
//! Heuristics are pure functions of the state, so their values can be
//! shared between the independent runs of an anytime search, or between
//! separate searches over the same world. The cache is passed in explicitly;
//! the engine holds no process-wide state.

use std::collections::HashMap;
use std::hash::Hash;

/// Memoized heuristic values keyed by state.
#[derive(Debug)]
pub struct HeuristicCache<S> {
    values: HashMap<S, f64>,
    hits: u64,
    misses: u64,
}

impl<S: Clone + Eq + Hash> HeuristicCache<S> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }

    /// Return the cached value for `state`, computing and storing it on a miss.
    pub fn get_or_compute(&mut self, state: &S, compute: impl FnOnce(&S) -> f64) -> f64 {
        if let Some(&h) = self.values.get(state) {
            self.hits += 1;
            return h;
        }
        self.misses += 1;
        let h = compute(state);
        self.values.insert(state.clone(), h);
        h
    }

    #[must_use]
    pub fn hits(&self) -> u64 {
        self.hits
    }

    #[must_use]
    pub fn misses(&self) -> u64 {
        self.misses
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn clear(&mut self) {
        self.values.clear();
        self.hits = 0;
        self.misses = 0;
    }
}

impl<S: Clone + Eq + Hash> Default for HeuristicCache<S> {
    fn default() -> Self {
        Self::new()
    }
}
