//! Squad slot arena.
//!
//! A squad is a fixed-size indexed arena: pitch slots 0..11, bench slots
//! 11..18, reserve slots 18 and up. Swapping two slots is the only
//! structural edit the engine ever performs; players are never inserted or
//! removed mid-match.

use serde::{Deserialize, Serialize};

use super::player::Player;
use crate::error::{MatchError, Result};

pub const PITCH_SLOTS: usize = 11;
pub const BENCH_SLOTS: usize = 7;
pub const BENCH_END: usize = PITCH_SLOTS + BENCH_SLOTS;

/// Which team a slot, event, or action belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamSide {
    Home,
    Away,
}

impl TeamSide {
    pub fn opponent(self) -> TeamSide {
        match self {
            TeamSide::Home => TeamSide::Away,
            TeamSide::Away => TeamSide::Home,
        }
    }

    pub fn is_home(self) -> bool {
        self == TeamSide::Home
    }
}

/// Roster zone a slot index falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SquadZone {
    Pitch,
    Bench,
    Reserve,
}

/// One side's roster for the match, indexed by slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Squad {
    pub name: String,
    slots: Vec<Player>,
}

impl Squad {
    /// Build a squad from an ordered roster. The first eleven entries are
    /// the starting lineup, the next seven the bench, the rest reserves.
    pub fn new(name: impl Into<String>, players: Vec<Player>) -> Result<Self> {
        if players.len() < BENCH_END {
            return Err(MatchError::InvalidLineup {
                expected: BENCH_END,
                found: players.len(),
            });
        }
        Ok(Self { name: name.into(), slots: players })
    }

    pub fn zone_of(slot: usize) -> SquadZone {
        if slot < PITCH_SLOTS {
            SquadZone::Pitch
        } else if slot < BENCH_END {
            SquadZone::Bench
        } else {
            SquadZone::Reserve
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn player(&self, slot: usize) -> Option<&Player> {
        self.slots.get(slot)
    }

    /// Locate a player's current slot by roster id.
    pub fn slot_of(&self, player_id: u32) -> Option<usize> {
        self.slots.iter().position(|p| p.id == player_id)
    }

    /// The active eleven.
    pub fn pitch(&self) -> &[Player] {
        &self.slots[..PITCH_SLOTS]
    }

    /// The bench, in slot order.
    pub fn bench(&self) -> &[Player] {
        &self.slots[PITCH_SLOTS..BENCH_END]
    }

    /// Swap two slots. This is the only structural mutation; callers are
    /// responsible for cap and eligibility checks.
    pub(crate) fn swap_slots(&mut self, a: usize, b: usize) {
        self.slots.swap(a, b);
    }
}
