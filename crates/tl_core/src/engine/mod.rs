//! Live match engine.
//!
//! One [`MatchEngine`] owns the whole in-match state for the lifetime of a
//! match: clock and phase, score, event ledger, statistics, substitution
//! counts, the active overlay, and the sideline discipline ladder. The
//! engine is driven from a single logical thread by periodic clock
//! callbacks; there is no parallelism between resolvers, and a suspending
//! resolver holds the clock until its delayed continuation runs.
//!
//! ## Sub-modules
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | `phase` | Coarse match phase state machine |
//! | `intake` | Universal stat accumulation rules |
//! | `goal_review` | Goal scoring and video-review resolution |
//! | `penalty` | Card-triggered penalty resolution |
//! | `substitutions` | Ledger, injury handling, AI substitutions |
//! | `discipline` | Manager sanction ladder |
//! | `debuff` | Trust-derived read-time performance gate |
//! | `source` | Per-minute event source contract + built-in stub |
//! | `decision` | Injected probability interface |
//! | `suspension` | Overlay and two-phase suspended resolutions |
//! | `session` | Streaming step API wrapping the engine |

pub mod constants;
pub mod debuff;
pub mod decision;
pub mod discipline;
pub mod goal_review;
pub mod intake;
pub mod penalty;
pub mod phase;
pub mod session;
pub mod source;
pub mod substitutions;
pub mod suspension;

#[cfg(test)]
pub(crate) mod test_fixtures;

use std::collections::HashSet;
use std::time::{Duration, Instant};

use log::debug;

use crate::error::Result;
use crate::models::{EventType, MatchEvent, MatchStats, MatchSummary, Squad, TeamSide};

use constants::rules;
use decision::{Decider, SeededDecider};
use discipline::DisciplineLevel;
use phase::MatchPhase;
use source::{BasicEventSource, EventSource, GeneratorInput};
use suspension::{Overlay, PendingResolution, Suspension};

/// Everything needed to start a match. Lineups are supplied by the
/// surrounding game; the engine never constructs players.
pub struct MatchPlan {
    pub home: Squad,
    pub away: Squad,
    /// Which side the human manager controls.
    pub user_side: TeamSide,
    /// Squad trust in the manager, 0..=100. Low trust degrades the user
    /// side's generator inputs (see `debuff`).
    pub manager_trust: u8,
    pub seed: u64,
}

/// Outcome of one clock callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Callback arrived in a phase that does not tick; dropped.
    Ignored,
    /// An overlay holds the clock; nothing advanced.
    Suspended,
    HalfTimeReached,
    FullTimeReached,
    Advanced,
}

pub struct MatchEngine {
    home: Squad,
    away: Squad,
    user_side: TeamSide,
    manager_trust: u8,

    minute: u8,
    phase: MatchPhase,
    score: (u8, u8),
    events: Vec<MatchEvent>,
    stats: MatchStats,
    subs_used: (u8, u8),

    overlay: Overlay,
    suspension: Option<Suspension>,
    forced_sub_target: Option<u32>,
    discipline: DisciplineLevel,
    /// Real-world instant of the latest goal; read only by the objection
    /// timing window, never by game-minute logic.
    last_goal_at: Option<Instant>,

    /// Players out of the match for good: injured or sent off.
    unavailable: HashSet<u32>,
    sent_off: HashSet<u32>,
    /// Players taken off; they keep a bench slot but cannot re-enter.
    substituted_off: HashSet<u32>,
    sabotage_noted: bool,

    decider: Box<dyn Decider>,
    source: Box<dyn EventSource>,
}

impl MatchEngine {
    pub fn new(plan: MatchPlan) -> Self {
        let source = Box::new(BasicEventSource::new(plan.seed));
        let decider = Box::new(SeededDecider::new(plan.seed ^ 0x9E37_79B9_7F4A_7C15));
        Self::with_parts(plan, source, decider)
    }

    /// Assemble an engine from explicit collaborators. This is the seam
    /// scenario tests use to script both the event stream and every
    /// probabilistic branch.
    pub fn with_parts(
        plan: MatchPlan,
        source: Box<dyn EventSource>,
        decider: Box<dyn Decider>,
    ) -> Self {
        Self {
            home: plan.home,
            away: plan.away,
            user_side: plan.user_side,
            manager_trust: plan.manager_trust,
            minute: 0,
            phase: MatchPhase::FirstHalf,
            score: (0, 0),
            events: Vec::new(),
            stats: MatchStats::new(),
            subs_used: (0, 0),
            overlay: Overlay::None,
            suspension: None,
            forced_sub_target: None,
            discipline: DisciplineLevel::None,
            last_goal_at: None,
            unavailable: HashSet::new(),
            sent_off: HashSet::new(),
            substituted_off: HashSet::new(),
            sabotage_noted: false,
            decider,
            source,
        }
    }

    // =========================================================================
    // Clock & phase controller
    // =========================================================================

    /// Advance the virtual clock by one minute and run the minute's intake
    /// and resolver logic. No-op while an overlay holds the clock or the
    /// match is at a break; a callback after full time is dropped.
    pub fn tick(&mut self, now: Instant) -> TickOutcome {
        match self.phase {
            MatchPhase::FullTime => {
                debug!("clock callback after full time ignored");
                return TickOutcome::Ignored;
            }
            MatchPhase::HalfTime => {
                debug!("clock callback during the break ignored");
                return TickOutcome::Ignored;
            }
            MatchPhase::FirstHalf | MatchPhase::SecondHalf => {}
        }
        if self.overlay != Overlay::None {
            return TickOutcome::Suspended;
        }

        self.minute += 1;

        if self.phase == MatchPhase::FirstHalf && self.minute >= rules::HALF_END_MINUTE {
            self.phase = MatchPhase::HalfTime;
            self.emit_event(MatchEvent::marker(self.minute, EventType::HalfTime, "Half-time"));
            return TickOutcome::HalfTimeReached;
        }
        if self.phase == MatchPhase::SecondHalf && self.minute >= rules::REGULATION_END_MINUTE {
            self.phase = MatchPhase::FullTime;
            self.emit_event(MatchEvent::marker(self.minute, EventType::FullTime, "Full-time"));
            return TickOutcome::FullTimeReached;
        }

        self.note_sabotage_if_due();

        let home_snapshot = self.side_snapshot(TeamSide::Home);
        let away_snapshot = self.side_snapshot(TeamSide::Away);
        let input = GeneratorInput {
            minute: self.minute,
            home: &home_snapshot,
            away: &away_snapshot,
            score: self.score,
            events: &self.events,
        };
        let candidate = self.source.next_event(&input);
        if let Some(event) = candidate {
            self.process_generated_event(event, now);
        }

        self.maybe_ai_substitution();

        TickOutcome::Advanced
    }

    /// Resume play after the half-time break. The minute continues from 45;
    /// nothing is reset. Ignored outside the break.
    pub fn resume_second_half(&mut self) {
        if self.phase != MatchPhase::HalfTime {
            debug!("resume_second_half outside the break ignored");
            return;
        }
        self.phase = MatchPhase::SecondHalf;
        self.emit_event(MatchEvent::marker(
            self.minute,
            EventType::KickOff,
            "Second half under way",
        ));
    }

    pub(crate) fn emit_kick_off(&mut self) {
        self.emit_event(MatchEvent::marker(0, EventType::KickOff, "Kick-off"));
    }

    // =========================================================================
    // Event intake
    // =========================================================================

    /// Apply one generator candidate: ledger append, stat accumulation,
    /// resolver dispatch. A flagged goal's verdict is stripped before the
    /// append so the public log never shows an unresolved outcome.
    fn process_generated_event(&mut self, mut event: MatchEvent, now: Instant) {
        let verdict = if event.event_type == EventType::Goal {
            event.var_outcome.take()
        } else {
            None
        };

        self.accumulate_stats(&event);

        let event_type = event.event_type;
        let side = event.side;
        let player_id = event.player_id;
        self.events.push(event);
        let event_index = self.events.len() - 1;

        match event_type {
            EventType::Goal => self.resolve_goal(event_index, verdict, now),
            EventType::YellowCard => {
                if let Some(side) = side {
                    self.maybe_award_penalty(side, now);
                }
            }
            EventType::RedCard => {
                if let Some(id) = player_id {
                    self.unavailable.insert(id);
                    self.sent_off.insert(id);
                }
            }
            EventType::Injury => self.resolve_injury(event_index),
            _ => {}
        }
    }

    pub(crate) fn emit_event(&mut self, event: MatchEvent) {
        debug!("event {:?} at {}'", event.event_type, event.minute);
        self.events.push(event);
    }

    // =========================================================================
    // Suspension protocol
    // =========================================================================

    pub(crate) fn begin_suspension(
        &mut self,
        overlay: Overlay,
        pending: PendingResolution,
        now: Instant,
        delay: Duration,
    ) {
        debug!("clock suspended: {:?}", overlay);
        self.overlay = overlay;
        self.suspension = Some(Suspension::new(overlay, pending, now, delay));
    }

    pub fn suspension_due(&self, now: Instant) -> bool {
        self.suspension.as_ref().is_some_and(|s| s.is_due(now))
    }

    /// Run the delayed continuation of the pending suspension and release
    /// the clock. The tactics panel stays pinned while a forced
    /// substitution is unresolved.
    pub fn complete_suspension(&mut self, now: Instant) {
        let Some(suspension) = self.suspension.take() else {
            return;
        };
        debug!("resolving {:?} suspension", suspension.overlay);
        match suspension.pending {
            PendingResolution::GoalReview { event_index, verdict, from_objection } => {
                self.complete_goal_review(event_index, verdict, from_objection);
            }
            PendingResolution::PenaltyKick { side, taker_id, taker_name } => {
                self.complete_penalty(side, taker_id, &taker_name, now);
            }
        }
        self.restore_overlay();
    }

    pub(crate) fn restore_overlay(&mut self) {
        self.overlay = if self.forced_sub_target.is_some() {
            Overlay::TacticsPanel
        } else {
            Overlay::None
        };
        debug!("clock released, overlay now {:?}", self.overlay);
    }

    // =========================================================================
    // Finalization
    // =========================================================================

    /// Hand the finished match to the surrounding application. Only valid
    /// at full time; the engine should be dropped afterwards.
    pub fn finalize(&self) -> Result<MatchSummary> {
        if self.phase != MatchPhase::FullTime {
            return Err(crate::error::MatchError::MatchNotFinished);
        }
        Ok(MatchSummary {
            match_id: uuid::Uuid::new_v4().to_string(),
            home_team: self.home.name.clone(),
            away_team: self.away.name.clone(),
            score_home: self.score.0,
            score_away: self.score.1,
            stats: self.stats.clone(),
            events: self.events.clone(),
        })
    }

    // =========================================================================
    // Accessors & small shared helpers
    // =========================================================================

    pub fn minute(&self) -> u8 {
        self.minute
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn score(&self) -> (u8, u8) {
        self.score
    }

    pub fn events(&self) -> &[MatchEvent] {
        &self.events
    }

    pub fn stats(&self) -> &MatchStats {
        &self.stats
    }

    pub fn overlay(&self) -> Overlay {
        self.overlay
    }

    pub fn discipline(&self) -> DisciplineLevel {
        self.discipline
    }

    pub fn user_side(&self) -> TeamSide {
        self.user_side
    }

    pub fn forced_substitution_target(&self) -> Option<u32> {
        self.forced_sub_target
    }

    pub fn squad(&self, side: TeamSide) -> &Squad {
        match side {
            TeamSide::Home => &self.home,
            TeamSide::Away => &self.away,
        }
    }

    pub(crate) fn squad_mut(&mut self, side: TeamSide) -> &mut Squad {
        match side {
            TeamSide::Home => &mut self.home,
            TeamSide::Away => &mut self.away,
        }
    }

    pub fn subs_used(&self, side: TeamSide) -> u8 {
        match side {
            TeamSide::Home => self.subs_used.0,
            TeamSide::Away => self.subs_used.1,
        }
    }

    pub(crate) fn bump_subs_used(&mut self, side: TeamSide) {
        match side {
            TeamSide::Home => self.subs_used.0 += 1,
            TeamSide::Away => self.subs_used.1 += 1,
        }
    }

    pub(crate) fn bump_score(&mut self, side: TeamSide) {
        match side {
            TeamSide::Home => self.score.0 += 1,
            TeamSide::Away => self.score.1 += 1,
        }
    }

    pub(crate) fn drop_score(&mut self, side: TeamSide) {
        match side {
            TeamSide::Home => self.score.0 = self.score.0.saturating_sub(1),
            TeamSide::Away => self.score.1 = self.score.1.saturating_sub(1),
        }
    }

    pub(crate) fn is_unavailable(&self, player_id: u32) -> bool {
        self.unavailable.contains(&player_id)
    }

    pub(crate) fn is_sent_off(&self, player_id: u32) -> bool {
        self.sent_off.contains(&player_id)
    }

    pub(crate) fn mark_unavailable(&mut self, player_id: u32) {
        self.unavailable.insert(player_id);
    }

    pub(crate) fn is_substituted_off(&self, player_id: u32) -> bool {
        self.substituted_off.contains(&player_id)
    }

    pub(crate) fn mark_substituted_off(&mut self, player_id: u32) {
        self.substituted_off.insert(player_id);
    }

    pub(crate) fn last_goal_at(&self) -> Option<Instant> {
        self.last_goal_at
    }

    pub(crate) fn set_last_goal_at(&mut self, now: Instant) {
        self.last_goal_at = Some(now);
    }

    pub(crate) fn decider_mut(&mut self) -> &mut dyn Decider {
        self.decider.as_mut()
    }

    pub(crate) fn manager_trust(&self) -> u8 {
        self.manager_trust
    }

    pub(crate) fn set_discipline(&mut self, level: DisciplineLevel) {
        self.discipline = level;
    }

    pub(crate) fn set_forced_sub_target(&mut self, target: Option<u32>) {
        self.forced_sub_target = target;
    }

    pub(crate) fn set_overlay(&mut self, overlay: Overlay) {
        self.overlay = overlay;
    }

    pub(crate) fn sabotage_noted(&self) -> bool {
        self.sabotage_noted
    }

    pub(crate) fn mark_sabotage_noted(&mut self) {
        self.sabotage_noted = true;
    }

    pub(crate) fn event_mut(&mut self, index: usize) -> Option<&mut MatchEvent> {
        self.events.get_mut(index)
    }
}
