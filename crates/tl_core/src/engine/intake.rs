//! Universal stat accumulation for generator events.
//!
//! Fixed deterministic rules, applied once per intaken event: possession
//! nudges one point toward the acting side (clamped to the 20..80 band),
//! shot-type events bump the shot counters, and discrete events bump their
//! own counter. No randomness lives here; resolvers and the generator own
//! all of it.

use crate::models::{EventType, MatchEvent};

use super::MatchEngine;

impl MatchEngine {
    pub(crate) fn accumulate_stats(&mut self, event: &MatchEvent) {
        if !event.is_generated_type() {
            return;
        }
        let Some(side) = event.side else {
            return;
        };

        self.stats.nudge_possession(side);

        let counters = self.stats.side_mut(side);
        match event.event_type {
            EventType::Goal | EventType::Save => {
                counters.shots += 1;
                counters.shots_on_target += 1;
            }
            EventType::Miss => counters.shots += 1,
            EventType::Corner => counters.corners += 1,
            EventType::Foul => counters.fouls += 1,
            EventType::YellowCard => counters.yellow_cards += 1,
            EventType::RedCard => counters.red_cards += 1,
            EventType::Offside => counters.offsides += 1,
            EventType::Injury => {}
            // Engine-origin entries never reach this path.
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::engine::test_fixtures::scripted_engine;
    use crate::models::TeamSide;

    fn engine() -> MatchEngine {
        scripted_engine(Vec::new(), Vec::new())
    }

    #[test]
    fn test_goal_counts_shot_and_on_target() {
        let mut engine = engine();
        engine.accumulate_stats(&MatchEvent::goal(10, TeamSide::Home, "A", None, 1));
        assert_eq!(engine.stats().home.shots, 1);
        assert_eq!(engine.stats().home.shots_on_target, 1);
        assert_eq!(engine.stats().possession_home, 51);
    }

    #[test]
    fn test_save_attributed_to_shooting_side() {
        let mut engine = engine();
        engine.accumulate_stats(&MatchEvent::save(12, TeamSide::Away, "held"));
        assert_eq!(engine.stats().away.shots, 1);
        assert_eq!(engine.stats().away.shots_on_target, 1);
        assert_eq!(engine.stats().home.shots, 0);
    }

    #[test]
    fn test_miss_counts_shot_only() {
        let mut engine = engine();
        engine.accumulate_stats(&MatchEvent::miss(15, TeamSide::Home, "wide"));
        assert_eq!(engine.stats().home.shots, 1);
        assert_eq!(engine.stats().home.shots_on_target, 0);
    }

    #[test]
    fn test_discrete_counters() {
        let mut engine = engine();
        engine.accumulate_stats(&MatchEvent::corner(20, TeamSide::Home));
        engine.accumulate_stats(&MatchEvent::foul(21, TeamSide::Away, None));
        engine.accumulate_stats(&MatchEvent::yellow_card(22, TeamSide::Away, "B", None));
        engine.accumulate_stats(&MatchEvent::red_card(23, TeamSide::Home, "C", None));
        engine.accumulate_stats(&MatchEvent::offside(24, TeamSide::Away));

        assert_eq!(engine.stats().home.corners, 1);
        assert_eq!(engine.stats().away.fouls, 1);
        assert_eq!(engine.stats().away.yellow_cards, 1);
        assert_eq!(engine.stats().home.red_cards, 1);
        assert_eq!(engine.stats().away.offsides, 1);
    }

    #[test]
    fn test_engine_origin_events_do_not_touch_stats() {
        let mut engine = engine();
        engine.accumulate_stats(&MatchEvent::substitution(30, TeamSide::Home, "Out", "In"));
        engine.accumulate_stats(&MatchEvent::info(31, Some(TeamSide::Home), "note"));
        assert_eq!(engine.stats().possession_home, 50);
        assert_eq!(engine.stats().home, Default::default());
    }

    proptest! {
        /// Possession always splits to exactly 100 no matter what the
        /// generator throws at the accumulator.
        #[test]
        fn prop_possession_always_sums_to_100(sides in proptest::collection::vec(any::<bool>(), 0..300)) {
            let mut engine = engine();
            for (i, home) in sides.into_iter().enumerate() {
                let side = if home { TeamSide::Home } else { TeamSide::Away };
                let event = match i % 4 {
                    0 => MatchEvent::corner(1, side),
                    1 => MatchEvent::foul(1, side, None),
                    2 => MatchEvent::miss(1, side, "wide"),
                    _ => MatchEvent::offside(1, side),
                };
                engine.accumulate_stats(&event);
                prop_assert_eq!(
                    engine.stats().possession_home + engine.stats().possession_away,
                    100
                );
                prop_assert!(engine.stats().possession_home >= 20);
                prop_assert!(engine.stats().possession_home <= 80);
            }
        }
    }
}
