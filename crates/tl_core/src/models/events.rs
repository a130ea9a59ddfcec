use serde::{Deserialize, Serialize};

use super::squad::TeamSide;

/// A single entry in the match ledger.
///
/// The log is append-only. A video-review reversal never deletes the
/// original goal record; the record is re-tagged via `var_outcome` and a
/// corrective `Info` entry is appended, so the log replays as a ledger
/// rather than a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchEvent {
    pub minute: u8,
    #[serde(rename = "type")]
    pub event_type: EventType,
    /// Acting side. Engine markers (kick-off, half-time) carry no side.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side: Option<TeamSide>,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scorer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assist: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player_id: Option<u32>,
    /// On a generator candidate: the pre-drawn review verdict flagging the
    /// goal for review. In the stored log: the resolved review tag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub var_outcome: Option<VarOutcome>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    KickOff,
    Goal,
    /// A shot off target or saved wide; counts as a shot only.
    Miss,
    /// A shot kept out by the keeper; attributed to the shooting side.
    Save,
    Corner,
    Foul,
    YellowCard,
    RedCard,
    Offside,
    Injury,
    Substitution,
    HalfTime,
    FullTime,
    /// Narrative entry: review verdicts, sanctions, sideline notes.
    Info,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VarOutcome {
    Confirmed,
    Overturned,
}

impl MatchEvent {
    pub fn goal(
        minute: u8,
        side: TeamSide,
        scorer: impl Into<String>,
        assist: Option<String>,
        player_id: u32,
    ) -> Self {
        let scorer = scorer.into();
        Self {
            minute,
            event_type: EventType::Goal,
            side: Some(side),
            description: format!("Goal! {} finds the net", scorer),
            scorer: Some(scorer),
            assist,
            player_id: Some(player_id),
            var_outcome: None,
        }
    }

    pub fn miss(minute: u8, side: TeamSide, description: impl Into<String>) -> Self {
        Self {
            minute,
            event_type: EventType::Miss,
            side: Some(side),
            description: description.into(),
            scorer: None,
            assist: None,
            player_id: None,
            var_outcome: None,
        }
    }

    pub fn save(minute: u8, shooting_side: TeamSide, description: impl Into<String>) -> Self {
        Self {
            minute,
            event_type: EventType::Save,
            side: Some(shooting_side),
            description: description.into(),
            scorer: None,
            assist: None,
            player_id: None,
            var_outcome: None,
        }
    }

    pub fn corner(minute: u8, side: TeamSide) -> Self {
        Self {
            minute,
            event_type: EventType::Corner,
            side: Some(side),
            description: "Corner".to_string(),
            scorer: None,
            assist: None,
            player_id: None,
            var_outcome: None,
        }
    }

    pub fn foul(minute: u8, side: TeamSide, player: Option<&str>) -> Self {
        let description = match player {
            Some(name) => format!("Foul by {}", name),
            None => "Foul".to_string(),
        };
        Self {
            minute,
            event_type: EventType::Foul,
            side: Some(side),
            description,
            scorer: None,
            assist: None,
            player_id: None,
            var_outcome: None,
        }
    }

    pub fn yellow_card(minute: u8, side: TeamSide, player: impl Into<String>, player_id: Option<u32>) -> Self {
        let player = player.into();
        Self {
            minute,
            event_type: EventType::YellowCard,
            side: Some(side),
            description: format!("Yellow card for {}", player),
            scorer: None,
            assist: None,
            player_id,
            var_outcome: None,
        }
    }

    pub fn red_card(minute: u8, side: TeamSide, player: impl Into<String>, player_id: Option<u32>) -> Self {
        let player = player.into();
        Self {
            minute,
            event_type: EventType::RedCard,
            side: Some(side),
            description: format!("Red card! {} is sent off", player),
            scorer: None,
            assist: None,
            player_id,
            var_outcome: None,
        }
    }

    pub fn offside(minute: u8, side: TeamSide) -> Self {
        Self {
            minute,
            event_type: EventType::Offside,
            side: Some(side),
            description: "Flag up, offside".to_string(),
            scorer: None,
            assist: None,
            player_id: None,
            var_outcome: None,
        }
    }

    pub fn injury(minute: u8, side: TeamSide, player: impl Into<String>, player_id: u32) -> Self {
        let player = player.into();
        Self {
            minute,
            event_type: EventType::Injury,
            side: Some(side),
            description: format!("{} is down injured and cannot continue", player),
            scorer: None,
            assist: None,
            player_id: Some(player_id),
            var_outcome: None,
        }
    }

    pub fn substitution(
        minute: u8,
        side: TeamSide,
        player_out: &str,
        player_in: &str,
    ) -> Self {
        Self {
            minute,
            event_type: EventType::Substitution,
            side: Some(side),
            description: format!("Substitution: {} off, {} on", player_out, player_in),
            scorer: None,
            assist: None,
            player_id: None,
            var_outcome: None,
        }
    }

    pub fn info(minute: u8, side: Option<TeamSide>, description: impl Into<String>) -> Self {
        Self {
            minute,
            event_type: EventType::Info,
            side,
            description: description.into(),
            scorer: None,
            assist: None,
            player_id: None,
            var_outcome: None,
        }
    }

    pub fn marker(minute: u8, event_type: EventType, description: impl Into<String>) -> Self {
        Self {
            minute,
            event_type,
            side: None,
            description: description.into(),
            scorer: None,
            assist: None,
            player_id: None,
            var_outcome: None,
        }
    }

    /// Whether this entry came out of the per-minute generator, as opposed
    /// to being emitted by the engine itself (markers, substitutions,
    /// narrative entries, penalty outcomes).
    pub fn is_generated_type(&self) -> bool {
        matches!(
            self.event_type,
            EventType::Goal
                | EventType::Miss
                | EventType::Save
                | EventType::Corner
                | EventType::Foul
                | EventType::YellowCard
                | EventType::RedCard
                | EventType::Offside
                | EventType::Injury
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goal_constructor_carries_scorer() {
        let event = MatchEvent::goal(30, TeamSide::Home, "Kaya", None, 7);
        assert_eq!(event.event_type, EventType::Goal);
        assert_eq!(event.scorer.as_deref(), Some("Kaya"));
        assert_eq!(event.player_id, Some(7));
        assert!(event.var_outcome.is_none());
    }

    #[test]
    fn test_marker_has_no_side() {
        let event = MatchEvent::marker(45, EventType::HalfTime, "Half-time");
        assert!(event.side.is_none());
        assert!(!event.is_generated_type());
    }

    #[test]
    fn test_serde_round_trip() {
        let event = MatchEvent::yellow_card(61, TeamSide::Away, "Demir", Some(15));
        let json = serde_json::to_string(&event).unwrap();
        let back: MatchEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
        assert!(json.contains("\"yellow_card\""));
    }

    #[test]
    fn test_every_event_type_round_trips() {
        use strum::IntoEnumIterator;
        for event_type in EventType::iter() {
            let json = serde_json::to_string(&event_type).unwrap();
            let back: EventType = serde_json::from_str(&json).unwrap();
            assert_eq!(back, event_type);
        }
    }
}
