//! Clock suspension protocol.
//!
//! At most one overlay is active at a time, and the clock does not tick
//! while one is up. Timed overlays (video review, penalty sequence) carry a
//! pending resolution with a real-time deadline; the session completes the
//! resolution once the deadline passes. The tactics panel is the one
//! untimed overlay: it is released by user action (or by the forced
//! substitution being satisfied), never by a deadline.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::models::{TeamSide, VarOutcome};

/// The exclusive suspension mode currently blocking the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Overlay {
    None,
    TacticsPanel,
    VarReview,
    PenaltySequence,
}

/// What a timed suspension will do when its deadline passes.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PendingResolution {
    /// A goal under video review. `event_index` addresses the original goal
    /// record in the log; the verdict was drawn before the suspension began.
    GoalReview {
        event_index: usize,
        verdict: VarOutcome,
        from_objection: bool,
    },
    /// A penalty kick about to be taken.
    PenaltyKick {
        side: TeamSide,
        taker_id: u32,
        taker_name: String,
    },
}

#[derive(Debug)]
pub(crate) struct Suspension {
    pub overlay: Overlay,
    pub pending: PendingResolution,
    pub resolve_at: Instant,
}

impl Suspension {
    pub(crate) fn new(
        overlay: Overlay,
        pending: PendingResolution,
        now: Instant,
        delay: Duration,
    ) -> Self {
        Self { overlay, pending, resolve_at: now + delay }
    }

    pub(crate) fn is_due(&self, now: Instant) -> bool {
        now >= self.resolve_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suspension_deadline() {
        let start = Instant::now();
        let suspension = Suspension::new(
            Overlay::VarReview,
            PendingResolution::GoalReview {
                event_index: 0,
                verdict: VarOutcome::Confirmed,
                from_objection: false,
            },
            start,
            Duration::from_millis(3000),
        );

        assert!(!suspension.is_due(start));
        assert!(!suspension.is_due(start + Duration::from_millis(2999)));
        assert!(suspension.is_due(start + Duration::from_millis(3000)));
    }
}
