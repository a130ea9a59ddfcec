use serde::{Deserialize, Serialize};

use super::squad::TeamSide;

/// Hard bounds on the possession split; nudges never push a side outside
/// these, and the two sides always sum to exactly 100.
pub const POSSESSION_MIN: u8 = 20;
pub const POSSESSION_MAX: u8 = 80;

/// Per-side counters accumulated during the match.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SideStats {
    pub shots: u16,
    pub shots_on_target: u16,
    pub corners: u8,
    pub fouls: u8,
    pub yellow_cards: u8,
    pub red_cards: u8,
    pub offsides: u8,
}

/// Aggregated statistics for the match.
///
/// Possession lives on the aggregate rather than the per-side blocks so
/// the 100% split has a single owner.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchStats {
    pub possession_home: u8,
    pub possession_away: u8,
    pub home: SideStats,
    pub away: SideStats,
}

impl Default for MatchStats {
    fn default() -> Self {
        Self {
            possession_home: 50,
            possession_away: 50,
            home: SideStats::default(),
            away: SideStats::default(),
        }
    }
}

impl MatchStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn side(&self, side: TeamSide) -> &SideStats {
        match side {
            TeamSide::Home => &self.home,
            TeamSide::Away => &self.away,
        }
    }

    pub fn side_mut(&mut self, side: TeamSide) -> &mut SideStats {
        match side {
            TeamSide::Home => &mut self.home,
            TeamSide::Away => &mut self.away,
        }
    }

    pub fn possession(&self, side: TeamSide) -> u8 {
        match side {
            TeamSide::Home => self.possession_home,
            TeamSide::Away => self.possession_away,
        }
    }

    /// Shift possession one point toward `side`, clamped to the allowed
    /// band. The other side is always the complement to 100.
    pub fn nudge_possession(&mut self, side: TeamSide) {
        let shifted = match side {
            TeamSide::Home => self.possession_home.saturating_add(1),
            TeamSide::Away => self.possession_home.saturating_sub(1),
        };
        self.possession_home = shifted.clamp(POSSESSION_MIN, POSSESSION_MAX);
        self.possession_away = 100 - self.possession_home;
    }
}
