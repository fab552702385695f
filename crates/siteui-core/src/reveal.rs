#![forbid(unsafe_code)]

//! One-shot reveal-on-scroll.
//!
//! # Invariants
//!
//! 1. An element moves `Observed` → `Visible` at most once.
//! 2. `Visible` is terminal: later samples for the element are ignored and
//!    it is never observed again.
//! 3. Every transition emits exactly one `visible` class effect followed by
//!    one unobserve effect.

use tracing::{debug, trace};

use crate::effect::{Effect, Target, VISIBLE_CLASS};

/// Per-element reveal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RevealState {
    /// Hidden and still watched by the observer.
    Observed,
    /// Revealed and no longer watched.
    Visible,
}

/// One intersection observer entry, reduced to what matters here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntersectionSample {
    /// Position of the element in the revealable set.
    pub index: usize,
    pub is_intersecting: bool,
}

/// The set of revealable elements.
#[derive(Debug, Clone)]
pub struct RevealSet {
    states: Vec<RevealState>,
}

impl RevealSet {
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            states: vec![RevealState::Observed; len],
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    #[must_use]
    pub fn state(&self, index: usize) -> Option<RevealState> {
        self.states.get(index).copied()
    }

    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.states
            .iter()
            .filter(|state| **state == RevealState::Visible)
            .count()
    }

    /// Apply a batch of observer entries.
    pub fn on_intersections(&mut self, samples: &[IntersectionSample]) -> Vec<Effect> {
        let mut effects = Vec::new();
        for sample in samples {
            if !sample.is_intersecting {
                continue;
            }
            match self.states.get(sample.index) {
                Some(RevealState::Observed) => self.reveal(sample.index, &mut effects),
                Some(RevealState::Visible) => {
                    trace!(index = sample.index, "already visible");
                }
                None => {
                    trace!(index = sample.index, len = self.len(), "sample out of range");
                }
            }
        }
        effects
    }

    /// Reveal everything at once. Used when the host has no intersection
    /// observer.
    pub fn reveal_all(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();
        for index in 0..self.states.len() {
            if self.states[index] == RevealState::Observed {
                self.states[index] = RevealState::Visible;
                effects.push(Effect::add_class(Target::Revealable(index), VISIBLE_CLASS));
            }
        }
        debug!(count = effects.len(), "revealed all without observer");
        effects
    }

    fn reveal(&mut self, index: usize, effects: &mut Vec<Effect>) {
        self.states[index] = RevealState::Visible;
        effects.push(Effect::add_class(Target::Revealable(index), VISIBLE_CLASS));
        effects.push(Effect::Unobserve(Target::Revealable(index)));
        trace!(index, "revealed");
    }
}
