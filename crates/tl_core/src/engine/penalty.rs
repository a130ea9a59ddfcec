//! Card-triggered penalty resolution.
//!
//! A yellow card can hand the fouled side a penalty. The award chance rises
//! with how much of the ball the fouled side has had; a successful draw
//! suspends the clock behind a `PenaltySequence` overlay, puts the side's
//! best finisher on the spot, and resolves after a fixed delay with a
//! fixed conversion rate. Both outcomes land in the ledger; only a
//! conversion moves the score.

use std::time::{Duration, Instant};

use crate::models::{MatchEvent, TeamSide};

use super::constants::{chance, timing};
use super::suspension::{Overlay, PendingResolution};
use super::MatchEngine;

/// Assist tag marking penalty conversions in the feed.
pub const PENALTY_ASSIST_TAG: &str = "Penalty";

impl MatchEngine {
    /// One draw per yellow card: does the fouled side win a penalty?
    pub(crate) fn maybe_award_penalty(&mut self, carded_side: TeamSide, now: Instant) {
        let fouled = carded_side.opponent();
        let share = self.stats().possession(fouled);
        let award_chance = if share >= chance::PENALTY_DOMINANT_SHARE {
            chance::PENALTY_DOMINANT
        } else if share >= chance::PENALTY_STRONG_SHARE {
            chance::PENALTY_STRONG
        } else {
            chance::PENALTY_BASE
        };

        if !self.decider_mut().roll(award_chance) {
            return;
        }
        let Some((taker_id, taker_name)) = self.best_finisher(fouled) else {
            return;
        };

        self.begin_suspension(
            Overlay::PenaltySequence,
            PendingResolution::PenaltyKick { side: fouled, taker_id, taker_name },
            now,
            Duration::from_millis(timing::PENALTY_SPOT_MS),
        );
    }

    /// Highest-skill member of the active eleven still on their feet.
    fn best_finisher(&self, side: TeamSide) -> Option<(u32, String)> {
        self.squad(side)
            .pitch()
            .iter()
            .filter(|p| !self.is_unavailable(p.id))
            .max_by_key(|p| p.skill)
            .map(|p| (p.id, p.name.clone()))
    }

    /// Delayed continuation: the kick itself.
    pub(crate) fn complete_penalty(
        &mut self,
        side: TeamSide,
        taker_id: u32,
        taker_name: &str,
        now: Instant,
    ) {
        let minute = self.minute();
        if self.decider_mut().roll(chance::PENALTY_CONVERT) {
            self.bump_score(side);
            self.set_last_goal_at(now);
            let mut event = MatchEvent::goal(
                minute,
                side,
                taker_name,
                Some(PENALTY_ASSIST_TAG.to_string()),
                taker_id,
            );
            event.description = format!("Goal! {} converts from the spot", taker_name);
            self.emit_event(event);
            let counters = self.stats.side_mut(side);
            counters.shots += 1;
            counters.shots_on_target += 1;
        } else {
            self.emit_event(MatchEvent::miss(
                minute,
                side,
                format!("{} steps up... kept out by the keeper!", taker_name),
            ));
            self.stats.side_mut(side).shots += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;
    use crate::engine::decision::ScriptedDecider;
    use crate::engine::source::ScriptedEvents;
    use crate::engine::test_fixtures::{engine_with, plan};
    use crate::models::{EventType, MatchEvent};

    fn yellow(minute: u8, side: TeamSide) -> MatchEvent {
        MatchEvent::yellow_card(minute, side, "Demir", Some(104))
    }

    #[test]
    fn test_converted_penalty_scores_and_tags_assist() {
        let source = ScriptedEvents::with_events([(1, yellow(1, TeamSide::Away))]);
        // First roll awards the penalty, second converts it.
        let decider = ScriptedDecider::with_rolls([true, true]);
        let mut engine = engine_with(plan(), source, decider);
        let start = Instant::now();

        engine.tick(start);
        assert_eq!(engine.overlay(), Overlay::PenaltySequence);
        assert_eq!(engine.score(), (0, 0));

        assert!(engine.suspension_due(start + Duration::from_millis(2500)));
        engine.complete_suspension(start + Duration::from_millis(2500));

        assert_eq!(engine.score(), (1, 0));
        assert_eq!(engine.overlay(), Overlay::None);

        let goal = engine.events().iter().find(|e| e.event_type == EventType::Goal).unwrap();
        assert_eq!(goal.assist.as_deref(), Some(PENALTY_ASSIST_TAG));
        // The home side's best finisher takes it.
        assert_eq!(goal.scorer.as_deref(), Some("Home Forward 1"));
        assert_eq!(engine.stats().home.shots, 1);
        assert_eq!(engine.stats().home.shots_on_target, 1);
    }

    #[test]
    fn test_missed_penalty_counts_shot_only() {
        let source = ScriptedEvents::with_events([(1, yellow(1, TeamSide::Away))]);
        let decider = ScriptedDecider::with_rolls([true, false]);
        let mut engine = engine_with(plan(), source, decider);
        let start = Instant::now();

        engine.tick(start);
        engine.complete_suspension(start + Duration::from_millis(2500));

        assert_eq!(engine.score(), (0, 0));
        let last = engine.events().last().unwrap();
        assert_eq!(last.event_type, EventType::Miss);
        assert_eq!(engine.stats().home.shots, 1);
        assert_eq!(engine.stats().home.shots_on_target, 0);
    }

    #[test]
    fn test_failed_award_roll_changes_nothing() {
        let source = ScriptedEvents::with_events([(1, yellow(1, TeamSide::Away))]);
        let decider = ScriptedDecider::with_rolls([false]);
        let mut engine = engine_with(plan(), source, decider);

        engine.tick(Instant::now());
        assert_eq!(engine.overlay(), Overlay::None);
        assert_eq!(engine.score(), (0, 0));
        // The card itself is still logged and counted.
        assert_eq!(engine.stats().away.yellow_cards, 1);
    }
}
