//! Closed set for full duplicate checking.

use std::collections::HashMap;
use std::hash::Hash;

/// Best known path cost per state.
///
/// Populated on insertion into the frontier (so the root and every pushed
/// successor has an entry) and consulted on both insertion and pop.
#[derive(Debug)]
pub struct ClosedSet<S> {
    best_g: HashMap<S, f64>,
}

impl<S: Eq + Hash> ClosedSet<S> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            best_g: HashMap::new(),
        }
    }

    /// Best `g` recorded for `state`, if any.
    #[must_use]
    pub fn best_g(&self, state: &S) -> Option<f64> {
        self.best_g.get(state).copied()
    }

    /// Record `g` for `state` unless an equal or cheaper path is already known.
    ///
    /// Returns `true` if the entry was inserted or improved, `false` if the
    /// new path is dominated.
    pub fn offer(&mut self, state: S, g: f64) -> bool {
        match self.best_g.get_mut(&state) {
            Some(known) if *known <= g => false,
            Some(known) => {
                *known = g;
                true
            }
            None => {
                self.best_g.insert(state, g);
                true
            }
        }
    }

    /// Whether a path strictly cheaper than `g` to `state` has been recorded.
    #[must_use]
    pub fn is_dominated(&self, state: &S, g: f64) -> bool {
        self.best_g.get(state).is_some_and(|known| *known < g)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.best_g.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.best_g.is_empty()
    }
}

impl<S: Eq + Hash> Default for ClosedSet<S> {
    fn default() -> Self {
        Self::new()
    }
}
