//! Goal scoring and video-review resolution.
//!
//! A goal counts the moment it is scored. If the generator flagged it for
//! review, the clock suspends behind a `VarReview` overlay and the verdict
//! lands after a fixed announce-plus-review delay: either the goal is
//! chalked off (score decremented, original record re-tagged, corrective
//! entry appended) or it stands (confirmation entry appended). The original
//! goal record is never deleted.

use std::time::{Duration, Instant};

use crate::models::{EventType, MatchEvent, VarOutcome};

use super::constants::timing;
use super::suspension::{Overlay, PendingResolution};
use super::MatchEngine;

impl MatchEngine {
    /// First phase: count the goal, and open the review suspension when a
    /// verdict was flagged by the generator.
    pub(crate) fn resolve_goal(
        &mut self,
        event_index: usize,
        verdict: Option<VarOutcome>,
        now: Instant,
    ) {
        let Some(side) = self.events().get(event_index).and_then(|e| e.side) else {
            return;
        };
        self.bump_score(side);
        self.set_last_goal_at(now);

        if let Some(verdict) = verdict {
            self.begin_suspension(
                Overlay::VarReview,
                PendingResolution::GoalReview { event_index, verdict, from_objection: false },
                now,
                Duration::from_millis(timing::VAR_ANNOUNCE_MS + timing::VAR_REVIEW_MS),
            );
        }
    }

    /// Second phase: apply the verdict after the review delay. Runs for
    /// generator-flagged reviews and for reviews forced by a timely
    /// objection; the objection variant also moves the discipline ladder
    /// when the goal stands.
    pub(crate) fn complete_goal_review(
        &mut self,
        event_index: usize,
        verdict: VarOutcome,
        from_objection: bool,
    ) {
        let Some((goal_minute, side)) = self
            .events()
            .get(event_index)
            .filter(|e| e.event_type == EventType::Goal)
            .and_then(|e| e.side.map(|side| (e.minute, side)))
        else {
            return;
        };

        if let Some(event) = self.event_mut(event_index) {
            event.var_outcome = Some(verdict);
        }

        let minute = self.minute();
        match verdict {
            VarOutcome::Overturned => {
                self.drop_score(side);
                self.emit_event(MatchEvent::info(
                    minute,
                    Some(side),
                    format!("No goal: the {}' strike is ruled out on review", goal_minute),
                ));
            }
            VarOutcome::Confirmed => {
                self.emit_event(MatchEvent::info(
                    minute,
                    Some(side),
                    "Review over: the goal stands",
                ));
                if from_objection {
                    self.advance_ladder();
                }
            }
        }
    }
}
