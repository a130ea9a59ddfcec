//! Streaming session API.
//!
//! [`LiveMatch`] wraps the engine for tick-by-tick control by a
//! presentation layer: the host calls `step()` on a real-time cadence of
//! `tick_interval()`, forwards user actions between steps, and collects the
//! final summary at full time. All state transitions run on the caller's
//! thread; dropping the session cancels the pending clock and any in-flight
//! suspension with it.

use std::time::{Duration, Instant};

use log::debug;

use crate::error::Result;
use crate::models::{MatchEvent, MatchSummary, TeamSide};

use super::constants::timing;
use super::discipline::ObjectionOutcome;
use super::phase::MatchPhase;
use super::suspension::Overlay;
use super::{MatchEngine, MatchPlan, TickOutcome};

/// Playback speed. Pacing only; game logic is identical at every speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedMultiplier {
    Normal,
    Double,
    Quadruple,
}

impl SpeedMultiplier {
    pub fn factor(self) -> u64 {
        match self {
            SpeedMultiplier::Normal => 1,
            SpeedMultiplier::Double => 2,
            SpeedMultiplier::Quadruple => 4,
        }
    }
}

/// Result of a single session step.
#[derive(Debug, Clone)]
pub enum StepResult {
    /// `kick_off()` has not been called yet.
    NotStarted,
    /// An overlay holds the clock; nothing advanced this step.
    Suspended(Overlay),
    /// A normal step: new ledger entries since the previous step.
    Tick(TickData),
    /// The break. Waiting for `resume_second_half()`.
    HalfTime(HalfTimeData),
    /// Match over. Call `finish()` to collect the summary.
    FullTime(FullTimeData),
}

#[derive(Debug, Clone)]
pub struct TickData {
    pub minute: u8,
    pub score: (u8, u8),
    pub overlay: Overlay,
    pub events: Vec<MatchEvent>,
}

#[derive(Debug, Clone)]
pub struct HalfTimeData {
    pub score: (u8, u8),
    pub possession: (u8, u8),
    pub shots: (u16, u16),
    pub shots_on_target: (u16, u16),
    pub events: Vec<MatchEvent>,
}

#[derive(Debug, Clone)]
pub struct FullTimeData {
    pub score: (u8, u8),
    pub events: Vec<MatchEvent>,
}

pub struct LiveMatch {
    engine: MatchEngine,
    started: bool,
    speed: SpeedMultiplier,
    /// Cursor for incremental per-step event streaming.
    last_event_count: usize,
}

impl LiveMatch {
    pub fn new(plan: MatchPlan) -> Self {
        Self::from_engine(MatchEngine::new(plan))
    }

    /// Wrap a pre-assembled engine (scripted sources, scripted deciders).
    pub fn from_engine(engine: MatchEngine) -> Self {
        Self { engine, started: false, speed: SpeedMultiplier::Normal, last_event_count: 0 }
    }

    /// Read-only view of the underlying state between steps.
    pub fn engine(&self) -> &MatchEngine {
        &self.engine
    }

    pub fn set_speed(&mut self, speed: SpeedMultiplier) {
        self.speed = speed;
    }

    pub fn speed(&self) -> SpeedMultiplier {
        self.speed
    }

    /// Real-time delay the host should wait between `step()` calls.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(timing::BASE_TICK_MS / self.speed.factor())
    }

    /// Start the first half. Ignored if already started.
    pub fn kick_off(&mut self) {
        if self.started {
            debug!("kick_off on a started session ignored");
            return;
        }
        self.started = true;
        self.engine.emit_kick_off();
    }

    pub fn resume_second_half(&mut self) {
        self.engine.resume_second_half();
    }

    /// Drive the session one step using the real clock.
    pub fn step(&mut self) -> StepResult {
        self.step_at(Instant::now())
    }

    /// Clock-injectable variant of [`step`](Self::step) for scenario tests.
    ///
    /// At most one observable action happens per step: completing a due
    /// suspension delivers the resolution's ledger entries and leaves the
    /// clock for the next step.
    pub fn step_at(&mut self, now: Instant) -> StepResult {
        if !self.started {
            return StepResult::NotStarted;
        }

        if self.engine.suspension_due(now) {
            self.engine.complete_suspension(now);
            return StepResult::Tick(self.tick_data());
        }

        match self.engine.phase() {
            MatchPhase::FullTime => return StepResult::FullTime(self.full_time_data()),
            MatchPhase::HalfTime => return StepResult::HalfTime(self.half_time_data()),
            MatchPhase::FirstHalf | MatchPhase::SecondHalf => {}
        }

        if self.engine.overlay() != Overlay::None {
            return StepResult::Suspended(self.engine.overlay());
        }

        match self.engine.tick(now) {
            TickOutcome::HalfTimeReached => StepResult::HalfTime(self.half_time_data()),
            TickOutcome::FullTimeReached => StepResult::FullTime(self.full_time_data()),
            TickOutcome::Suspended => StepResult::Suspended(self.engine.overlay()),
            TickOutcome::Ignored | TickOutcome::Advanced => StepResult::Tick(self.tick_data()),
        }
    }

    // =========================================================================
    // User actions, forwarded between steps
    // =========================================================================

    pub fn request_substitution(
        &mut self,
        side: TeamSide,
        outgoing_id: u32,
        incoming_id: u32,
    ) -> Result<()> {
        self.engine.request_substitution(side, outgoing_id, incoming_id)
    }

    pub fn object_to_referee(&mut self) -> Result<ObjectionOutcome> {
        self.engine.object_to_referee()
    }

    pub fn open_tactics(&mut self) -> Result<()> {
        self.engine.open_tactics()
    }

    pub fn close_tactics(&mut self) -> Result<()> {
        self.engine.close_tactics()
    }

    /// Collect the final summary. Only valid at full time; this is the
    /// session's single completion signal.
    pub fn finish(&self) -> Result<MatchSummary> {
        self.engine.finalize()
    }

    // =========================================================================
    // Step payload builders
    // =========================================================================

    fn drain_new_events(&mut self) -> Vec<MatchEvent> {
        let events = self.engine.events();
        let new = events[self.last_event_count.min(events.len())..].to_vec();
        self.last_event_count = events.len();
        new
    }

    fn tick_data(&mut self) -> TickData {
        TickData {
            minute: self.engine.minute(),
            score: self.engine.score(),
            overlay: self.engine.overlay(),
            events: self.drain_new_events(),
        }
    }

    fn half_time_data(&mut self) -> HalfTimeData {
        let stats = self.engine.stats();
        let (possession, shots, shots_on_target) = (
            (stats.possession_home, stats.possession_away),
            (stats.home.shots, stats.away.shots),
            (stats.home.shots_on_target, stats.away.shots_on_target),
        );
        HalfTimeData {
            score: self.engine.score(),
            possession,
            shots,
            shots_on_target,
            events: self.drain_new_events(),
        }
    }

    fn full_time_data(&mut self) -> FullTimeData {
        FullTimeData { score: self.engine.score(), events: self.drain_new_events() }
    }
}
