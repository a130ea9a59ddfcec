use serde::{Deserialize, Serialize};

use super::events::MatchEvent;
use super::stats::MatchStats;

/// Final payload handed to the surrounding application once the match is
/// confirmed over. This is the engine's only completion signal; the
/// in-match state is discarded after it is produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchSummary {
    pub match_id: String,
    pub home_team: String,
    pub away_team: String,
    pub score_home: u8,
    pub score_away: u8,
    pub stats: MatchStats,
    pub events: Vec<MatchEvent>,
}

impl MatchSummary {
    /// Compact scoreline, e.g. `"Ankara United 2-1 Izmir City"`.
    pub fn scoreline(&self) -> String {
        format!(
            "{} {}-{} {}",
            self.home_team, self.score_home, self.score_away, self.away_team
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scoreline_format() {
        let summary = MatchSummary {
            match_id: "m-1".to_string(),
            home_team: "Ankara United".to_string(),
            away_team: "Izmir City".to_string(),
            score_home: 2,
            score_away: 1,
            stats: MatchStats::new(),
            events: Vec::new(),
        };
        assert_eq!(summary.scoreline(), "Ankara United 2-1 Izmir City");
    }
}
