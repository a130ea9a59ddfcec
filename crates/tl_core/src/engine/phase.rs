//! Coarse match phase state machine.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPhase {
    FirstHalf,
    HalfTime,
    SecondHalf,
    FullTime,
}

impl MatchPhase {
    /// The clock only advances during open play.
    pub fn is_live(self) -> bool {
        matches!(self, MatchPhase::FirstHalf | MatchPhase::SecondHalf)
    }

    pub fn is_finished(self) -> bool {
        self == MatchPhase::FullTime
    }

    /// Forward-only transition. Phases never repeat and never go back.
    pub fn next(self) -> MatchPhase {
        match self {
            MatchPhase::FirstHalf => MatchPhase::HalfTime,
            MatchPhase::HalfTime => MatchPhase::SecondHalf,
            MatchPhase::SecondHalf => MatchPhase::FullTime,
            MatchPhase::FullTime => MatchPhase::FullTime,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_order_is_forward_only() {
        assert_eq!(MatchPhase::FirstHalf.next(), MatchPhase::HalfTime);
        assert_eq!(MatchPhase::HalfTime.next(), MatchPhase::SecondHalf);
        assert_eq!(MatchPhase::SecondHalf.next(), MatchPhase::FullTime);
        assert_eq!(MatchPhase::FullTime.next(), MatchPhase::FullTime);
    }

    #[test]
    fn test_liveness() {
        assert!(MatchPhase::FirstHalf.is_live());
        assert!(MatchPhase::SecondHalf.is_live());
        assert!(!MatchPhase::HalfTime.is_live());
        assert!(!MatchPhase::FullTime.is_live());
        assert!(MatchPhase::FullTime.is_finished());
    }
}
