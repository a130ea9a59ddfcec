use serde::{Deserialize, Serialize};

/// Broad positional role of a squad member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[serde(rename_all = "snake_case")]
pub enum Position {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
}

impl Position {
    pub fn is_goalkeeper(&self) -> bool {
        matches!(self, Position::Goalkeeper)
    }

    pub fn is_defender(&self) -> bool {
        matches!(self, Position::Defender)
    }

    pub fn is_midfielder(&self) -> bool {
        matches!(self, Position::Midfielder)
    }

    pub fn is_forward(&self) -> bool {
        matches!(self, Position::Forward)
    }

    /// Two roles count as the same zone for substitution matching.
    pub fn same_zone(&self, other: Position) -> bool {
        *self == other
    }
}

/// Running season totals carried on the roster record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeasonStats {
    pub appearances: u16,
    pub goals: u16,
    pub assists: u16,
}

/// A roster entry. The engine never constructs these during a match and
/// never edits their fields; slots are swapped, records are read.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Player {
    pub id: u32,
    pub name: String,
    pub position: Position,
    /// Overall ability, 1..=99.
    pub skill: u8,
    /// Mood going into the match, 0..=100.
    pub morale: u8,
    /// Physical freshness, 0..=100.
    pub condition: u8,
    pub season_stats: SeasonStats,
}

impl Player {
    /// Ability weighted by how fit the player arrived on match day.
    pub fn effective_skill(&self) -> f32 {
        f32::from(self.skill) * (f32::from(self.condition) / 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_skill_scales_with_condition() {
        let player = Player {
            id: 1,
            name: "Test".to_string(),
            position: Position::Forward,
            skill: 80,
            morale: 70,
            condition: 50,
            season_stats: SeasonStats::default(),
        };
        assert!((player.effective_skill() - 40.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_zone_matching() {
        assert!(Position::Defender.same_zone(Position::Defender));
        assert!(!Position::Defender.same_zone(Position::Forward));
        assert!(Position::Goalkeeper.is_goalkeeper());
    }
}
