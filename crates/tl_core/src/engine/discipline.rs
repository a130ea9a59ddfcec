//! Manager discipline ladder.
//!
//! Objecting to the referee walks a four-rung sanction ladder. The ladder
//! never steps down during a match, and a red is terminal: it kills the
//! objection action and manual access to the tactics panel for the rest of
//! the game. The one upside of objecting: within a short real-time window
//! of conceding, the protest forces a video review with a real chance of
//! getting the goal chalked off.

use std::time::{Duration, Instant};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{MatchError, Result};
use crate::models::{EventType, MatchEvent, VarOutcome};

use super::constants::{chance, timing};
use super::suspension::{Overlay, PendingResolution};
use super::MatchEngine;

/// Sanction rungs, in escalation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisciplineLevel {
    None,
    Warned,
    Yellow,
    Red,
}

/// Immediate result of an objection that did not force a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectionOutcome {
    /// A review overlay is up; the verdict lands when it resolves.
    ReviewStarted,
    /// The ladder moved.
    Escalated(DisciplineLevel),
    /// The referee waved it away.
    Dismissed,
}

impl MatchEngine {
    /// Sideline protest against the latest decision.
    pub fn object_to_referee(&mut self) -> Result<ObjectionOutcome> {
        self.object_to_referee_at(Instant::now())
    }

    /// Clock-injectable variant for scenario tests; `now` is compared
    /// against the real-world instant of the latest goal.
    pub fn object_to_referee_at(&mut self, now: Instant) -> Result<ObjectionOutcome> {
        if self.discipline() == DisciplineLevel::Red {
            return Err(MatchError::ObjectionUnavailable);
        }
        if self.overlay() != Overlay::None {
            return Err(MatchError::ObjectionUnavailable);
        }

        let last = self.events().last();
        let last_goal_side = last
            .filter(|e| e.event_type == EventType::Goal)
            .and_then(|e| e.side);
        if last_goal_side == Some(self.user_side()) {
            // No complaints about your own goals.
            return Err(MatchError::ObjectionUnavailable);
        }

        let within_window = self
            .last_goal_at()
            .is_some_and(|at| now.duration_since(at) <= Duration::from_millis(timing::OBJECTION_WINDOW_MS));

        if last_goal_side == Some(self.user_side().opponent()) && within_window {
            let verdict = if self.decider_mut().roll(chance::OBJECTION_OVERTURN) {
                VarOutcome::Overturned
            } else {
                VarOutcome::Confirmed
            };
            let event_index = self.events().len() - 1;
            self.begin_suspension(
                Overlay::VarReview,
                PendingResolution::GoalReview { event_index, verdict, from_objection: true },
                now,
                Duration::from_millis(timing::VAR_REVIEW_MS),
            );
            return Ok(ObjectionOutcome::ReviewStarted);
        }

        self.escalate_objection()
    }

    fn escalate_objection(&mut self) -> Result<ObjectionOutcome> {
        let advance = match self.discipline() {
            DisciplineLevel::None => self.decider_mut().roll(chance::LADDER_WARN),
            DisciplineLevel::Warned => self.decider_mut().roll(chance::LADDER_YELLOW),
            DisciplineLevel::Yellow => self.decider_mut().roll(chance::LADDER_RED),
            DisciplineLevel::Red => false,
        };
        if !advance {
            debug!("objection waved away at {:?}", self.discipline());
            return Ok(ObjectionOutcome::Dismissed);
        }
        Ok(ObjectionOutcome::Escalated(self.advance_ladder()))
    }

    /// Move the ladder one rung and log the sanction. A step into red
    /// force-closes a manually opened tactics panel; a pinned forced
    /// substitution stays pinned.
    pub(crate) fn advance_ladder(&mut self) -> DisciplineLevel {
        let next = match self.discipline() {
            DisciplineLevel::None => DisciplineLevel::Warned,
            DisciplineLevel::Warned => DisciplineLevel::Yellow,
            DisciplineLevel::Yellow | DisciplineLevel::Red => DisciplineLevel::Red,
        };
        self.set_discipline(next);

        let minute = self.minute();
        let side = self.user_side();
        match next {
            DisciplineLevel::Warned => {
                self.emit_event(MatchEvent::info(
                    minute,
                    Some(side),
                    "The fourth official has a word with the manager",
                ));
            }
            DisciplineLevel::Yellow => {
                self.emit_event(MatchEvent {
                    minute,
                    event_type: EventType::YellowCard,
                    side: Some(side),
                    description: "The manager is booked for dissent".to_string(),
                    scorer: None,
                    assist: None,
                    player_id: None,
                    var_outcome: None,
                });
            }
            DisciplineLevel::Red => {
                self.emit_event(MatchEvent {
                    minute,
                    event_type: EventType::RedCard,
                    side: Some(side),
                    description: "The manager is sent to the stands".to_string(),
                    scorer: None,
                    assist: None,
                    player_id: None,
                    var_outcome: None,
                });
                if self.overlay() == Overlay::TacticsPanel
                    && self.forced_substitution_target().is_none()
                {
                    self.set_overlay(Overlay::None);
                }
            }
            DisciplineLevel::None => {}
        }
        next
    }

    // =========================================================================
    // Tactics panel access
    // =========================================================================

    /// Open the tactics panel, suspending the clock. Locked out once the
    /// manager has been sent off, and while any other overlay is up.
    pub fn open_tactics(&mut self) -> Result<()> {
        if self.discipline() == DisciplineLevel::Red {
            return Err(MatchError::TacticsLocked);
        }
        if self.overlay() != Overlay::None {
            return Err(MatchError::TacticsLocked);
        }
        self.set_overlay(Overlay::TacticsPanel);
        Ok(())
    }

    /// Close the tactics panel. Refused while a forced substitution is
    /// unresolved; a no-op if the panel is not open.
    pub fn close_tactics(&mut self) -> Result<()> {
        if self.overlay() != Overlay::TacticsPanel {
            return Ok(());
        }
        if self.forced_substitution_target().is_some() {
            return Err(MatchError::TacticsLocked);
        }
        self.set_overlay(Overlay::None);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::decision::ScriptedDecider;
    use crate::engine::source::ScriptedEvents;
    use crate::engine::test_fixtures::{engine_with, plan};
    use crate::models::TeamSide;

    fn opposing_goal(minute: u8) -> MatchEvent {
        MatchEvent::goal(minute, TeamSide::Away, "Vural", None, 109)
    }

    #[test]
    fn test_objection_within_window_forces_review() {
        let source = ScriptedEvents::with_events([(1, opposing_goal(1))]);
        let decider = ScriptedDecider::with_rolls([true]);
        let mut engine = engine_with(plan(), source, decider);
        let kickoff = Instant::now();

        engine.tick(kickoff);
        assert_eq!(engine.score(), (0, 1));

        let outcome = engine
            .object_to_referee_at(kickoff + Duration::from_millis(1900))
            .unwrap();
        assert_eq!(outcome, ObjectionOutcome::ReviewStarted);
        assert_eq!(engine.overlay(), Overlay::VarReview);

        engine.complete_suspension(kickoff + Duration::from_millis(1900 + 3000));
        assert_eq!(engine.score(), (0, 0));
        assert_eq!(engine.discipline(), DisciplineLevel::None);
    }

    #[test]
    fn test_objection_after_window_takes_ladder_path() {
        let source = ScriptedEvents::with_events([(1, opposing_goal(1))]);
        let decider = ScriptedDecider::with_rolls([true]);
        let mut engine = engine_with(plan(), source, decider);
        let kickoff = Instant::now();

        engine.tick(kickoff);

        let outcome = engine
            .object_to_referee_at(kickoff + Duration::from_millis(2100))
            .unwrap();
        assert_eq!(outcome, ObjectionOutcome::Escalated(DisciplineLevel::Warned));
        assert_eq!(engine.overlay(), Overlay::None);
    }

    #[test]
    fn test_rejected_review_advances_ladder() {
        let source = ScriptedEvents::with_events([(1, opposing_goal(1))]);
        // Review verdict roll fails: goal stands, ladder moves.
        let decider = ScriptedDecider::with_rolls([false]);
        let mut engine = engine_with(plan(), source, decider);
        let kickoff = Instant::now();

        engine.tick(kickoff);
        engine.object_to_referee_at(kickoff + Duration::from_millis(500)).unwrap();
        engine.complete_suspension(kickoff + Duration::from_millis(3500));

        assert_eq!(engine.score(), (0, 1));
        assert_eq!(engine.discipline(), DisciplineLevel::Warned);
    }

    #[test]
    fn test_objecting_to_own_goal_is_blocked() {
        let source =
            ScriptedEvents::with_events([(1, MatchEvent::goal(1, TeamSide::Home, "Kaya", None, 9))]);
        let mut engine = engine_with(plan(), source, ScriptedDecider::new());
        let kickoff = Instant::now();

        engine.tick(kickoff);
        let err = engine.object_to_referee_at(kickoff).unwrap_err();
        assert_eq!(err, MatchError::ObjectionUnavailable);
    }

    #[test]
    fn test_ladder_is_monotonic_and_red_is_terminal() {
        let decider = ScriptedDecider::with_rolls([true, true, true]);
        let mut engine = engine_with(plan(), ScriptedEvents::new(), decider);
        let now = Instant::now();
        engine.tick(now);

        assert_eq!(
            engine.object_to_referee_at(now).unwrap(),
            ObjectionOutcome::Escalated(DisciplineLevel::Warned)
        );
        assert_eq!(
            engine.object_to_referee_at(now).unwrap(),
            ObjectionOutcome::Escalated(DisciplineLevel::Yellow)
        );
        assert_eq!(
            engine.object_to_referee_at(now).unwrap(),
            ObjectionOutcome::Escalated(DisciplineLevel::Red)
        );

        // Terminal: every further objection fails, and tactics are locked.
        assert_eq!(engine.object_to_referee_at(now).unwrap_err(), MatchError::ObjectionUnavailable);
        assert_eq!(engine.open_tactics().unwrap_err(), MatchError::TacticsLocked);

        // The sanctions were logged on the user's side.
        let cards: Vec<_> = engine
            .events()
            .iter()
            .filter(|e| {
                matches!(e.event_type, EventType::YellowCard | EventType::RedCard)
                    && e.player_id.is_none()
            })
            .collect();
        assert_eq!(cards.len(), 2);
        // Manager sanctions never count toward team card stats.
        assert_eq!(engine.stats().home.yellow_cards, 0);
        assert_eq!(engine.stats().home.red_cards, 0);
    }

    #[test]
    fn test_dismissed_objection_leaves_ladder_alone() {
        let decider = ScriptedDecider::with_rolls([false]);
        let mut engine = engine_with(plan(), ScriptedEvents::new(), decider);
        let now = Instant::now();
        engine.tick(now);

        assert_eq!(engine.object_to_referee_at(now).unwrap(), ObjectionOutcome::Dismissed);
        assert_eq!(engine.discipline(), DisciplineLevel::None);
    }

    #[test]
    fn test_tactics_panel_open_close() {
        let mut engine = engine_with(plan(), ScriptedEvents::new(), ScriptedDecider::new());

        engine.open_tactics().unwrap();
        assert_eq!(engine.overlay(), Overlay::TacticsPanel);
        // Clock is held while the panel is up.
        assert_eq!(engine.tick(Instant::now()), crate::engine::TickOutcome::Suspended);
        engine.close_tactics().unwrap();
        assert_eq!(engine.overlay(), Overlay::None);
    }
}
