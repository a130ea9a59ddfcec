//! Single chokepoint for every probabilistic branch in the engine.
//!
//! All inline "draw once" checks (penalty award, conversion, AI
//! substitution, ladder escalation, objection verdict) go through one
//! injected [`Decider`], so a test can script the exact branch sequence
//! while production runs on a seeded ChaCha stream. Same seed, same match.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub trait Decider {
    /// One draw: `true` with the given probability.
    fn roll(&mut self, probability: f64) -> bool;

    /// Uniform index into `0..options`. Returns 0 when `options` is 0 or 1.
    fn pick(&mut self, options: usize) -> usize;
}

/// Production decider backed by a seeded ChaCha stream.
pub struct SeededDecider {
    rng: ChaCha8Rng,
}

impl SeededDecider {
    pub fn new(seed: u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed) }
    }
}

impl Decider for SeededDecider {
    fn roll(&mut self, probability: f64) -> bool {
        self.rng.gen::<f64>() < probability
    }

    fn pick(&mut self, options: usize) -> usize {
        if options < 2 {
            return 0;
        }
        self.rng.gen_range(0..options)
    }
}

/// Scripted decider for deterministic scenario tests. Outcomes are consumed
/// front to back; an exhausted script answers `false` / `0`.
#[derive(Default)]
pub struct ScriptedDecider {
    rolls: VecDeque<bool>,
    picks: VecDeque<usize>,
}

impl ScriptedDecider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rolls(rolls: impl IntoIterator<Item = bool>) -> Self {
        Self { rolls: rolls.into_iter().collect(), picks: VecDeque::new() }
    }

    pub fn push_roll(&mut self, outcome: bool) {
        self.rolls.push_back(outcome);
    }

    pub fn push_pick(&mut self, index: usize) {
        self.picks.push_back(index);
    }
}

impl Decider for ScriptedDecider {
    fn roll(&mut self, _probability: f64) -> bool {
        self.rolls.pop_front().unwrap_or(false)
    }

    fn pick(&mut self, options: usize) -> usize {
        let index = self.picks.pop_front().unwrap_or(0);
        if options == 0 {
            0
        } else {
            index.min(options - 1)
        }
    }
}
