//! Per-minute event source contract and the built-in implementations.
//!
//! The engine treats the source as a black box: once per productive tick it
//! hands over the current minute, both side snapshots, the score, and the
//! event log so far, and receives back at most one candidate event. The
//! source must be side-effect-free with respect to match state; every
//! consequence of an event (stats, score, resolvers) is applied by the
//! engine.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::models::{MatchEvent, Position, TeamSide, VarOutcome};

/// Read-only view of one roster entry as the source sees it. Values may be
/// debuffed copies; the persisted roster is never handed out.
#[derive(Debug, Clone)]
pub struct PlayerSnapshot {
    pub id: u32,
    pub name: String,
    pub position: Position,
    pub skill: u8,
    pub morale: u8,
}

/// One side's effective matchday state for a single generator call.
#[derive(Debug, Clone)]
pub struct SideSnapshot {
    pub side: TeamSide,
    /// Mean effective ability of the active eleven.
    pub strength: f32,
    /// The active eleven, pitch order.
    pub players: Vec<PlayerSnapshot>,
}

impl SideSnapshot {
    pub fn average_morale(&self) -> f32 {
        if self.players.is_empty() {
            return 0.0;
        }
        let total: u32 = self.players.iter().map(|p| u32::from(p.morale)).sum();
        total as f32 / self.players.len() as f32
    }
}

/// Everything the source may look at for one minute.
#[derive(Debug)]
pub struct GeneratorInput<'a> {
    pub minute: u8,
    pub home: &'a SideSnapshot,
    pub away: &'a SideSnapshot,
    pub score: (u8, u8),
    pub events: &'a [MatchEvent],
}

/// Black-box event generator. Called at most once per tick; returns at most
/// one event per minute. A goal flagged for video review carries its
/// pre-drawn verdict in `var_outcome`; the engine strips it on intake and
/// applies it only when the review resolves.
pub trait EventSource {
    fn next_event(&mut self, input: &GeneratorInput<'_>) -> Option<MatchEvent>;
}

/// Built-in stub source with a plausible event mix, weighted by relative
/// side strength and morale. Deterministic per seed; its stream is
/// independent of the engine's own decision stream.
pub struct BasicEventSource {
    rng: ChaCha8Rng,
    last_minute: Option<u8>,
}

// Cumulative event mix per minute; the remainder up to 1.0 is a quiet
// minute. Tuned for roughly 25 shots, 10 corners and a handful of cards
// across 90 minutes.
const W_FOUL: f64 = 0.15;
const W_CORNER: f64 = 0.12;
const W_MISS: f64 = 0.08;
const W_SAVE: f64 = 0.07;
const W_OFFSIDE: f64 = 0.04;
const W_GOAL: f64 = 0.045;
const W_YELLOW: f64 = 0.025;
const W_INJURY: f64 = 0.008;
const W_RED: f64 = 0.002;

const REVIEW_FLAG_CHANCE: f64 = 0.22;
const REVIEW_OVERTURN_CHANCE: f64 = 0.35;
const ASSIST_CHANCE: f64 = 0.5;

impl BasicEventSource {
    pub fn new(seed: u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed), last_minute: None }
    }

    fn side_weight(snapshot: &SideSnapshot) -> f64 {
        let morale_factor = 0.8 + 0.004 * f64::from(snapshot.average_morale());
        f64::from(snapshot.strength) * morale_factor
    }

    fn acting_side(&mut self, input: &GeneratorInput<'_>) -> TeamSide {
        let home = Self::side_weight(input.home);
        let away = Self::side_weight(input.away);
        let p_home = if home + away > 0.0 { (home / (home + away)).clamp(0.25, 0.75) } else { 0.5 };
        if self.rng.gen::<f64>() < p_home {
            TeamSide::Home
        } else {
            TeamSide::Away
        }
    }

    fn pick_player<'a>(
        &mut self,
        snapshot: &'a SideSnapshot,
        prefer: impl Fn(&PlayerSnapshot) -> bool,
    ) -> Option<&'a PlayerSnapshot> {
        let preferred: Vec<&PlayerSnapshot> = snapshot.players.iter().filter(|p| prefer(p)).collect();
        let pool: Vec<&PlayerSnapshot> = if preferred.is_empty() {
            snapshot.players.iter().collect()
        } else {
            preferred
        };
        if pool.is_empty() {
            return None;
        }
        let index = self.rng.gen_range(0..pool.len());
        Some(pool[index])
    }

    fn goal_event(&mut self, minute: u8, snapshot: &SideSnapshot) -> Option<MatchEvent> {
        let scorer = self.pick_player(snapshot, |p| p.position.is_forward())?.clone();
        let assist = if self.rng.gen::<f64>() < ASSIST_CHANCE {
            self.pick_player(snapshot, |p| p.id != scorer.id && !p.position.is_goalkeeper())
                .map(|p| p.name.clone())
        } else {
            None
        };

        let mut event = MatchEvent::goal(minute, snapshot.side, scorer.name, assist, scorer.id);
        if self.rng.gen::<f64>() < REVIEW_FLAG_CHANCE {
            let verdict = if self.rng.gen::<f64>() < REVIEW_OVERTURN_CHANCE {
                VarOutcome::Overturned
            } else {
                VarOutcome::Confirmed
            };
            event.var_outcome = Some(verdict);
        }
        Some(event)
    }
}

impl EventSource for BasicEventSource {
    fn next_event(&mut self, input: &GeneratorInput<'_>) -> Option<MatchEvent> {
        // At most one event per minute, even if polled twice.
        if self.last_minute == Some(input.minute) {
            return None;
        }
        self.last_minute = Some(input.minute);

        let draw = self.rng.gen::<f64>();
        let side = self.acting_side(input);
        let snapshot = if side.is_home() { input.home } else { input.away };
        let minute = input.minute;

        let mut threshold = W_FOUL;
        if draw < threshold {
            let player = self.pick_player(snapshot, |p| !p.position.is_goalkeeper());
            return Some(MatchEvent::foul(minute, side, player.map(|p| p.name.as_str())));
        }
        threshold += W_CORNER;
        if draw < threshold {
            return Some(MatchEvent::corner(minute, side));
        }
        threshold += W_MISS;
        if draw < threshold {
            return Some(MatchEvent::miss(minute, side, "Shot drifts wide"));
        }
        threshold += W_SAVE;
        if draw < threshold {
            return Some(MatchEvent::save(minute, side, "Driven low, held by the keeper"));
        }
        threshold += W_OFFSIDE;
        if draw < threshold {
            return Some(MatchEvent::offside(minute, side));
        }
        threshold += W_GOAL;
        if draw < threshold {
            return self.goal_event(minute, snapshot);
        }
        threshold += W_YELLOW;
        if draw < threshold {
            let player = self.pick_player(snapshot, |p| !p.position.is_goalkeeper())?;
            return Some(MatchEvent::yellow_card(minute, side, player.name.clone(), Some(player.id)));
        }
        threshold += W_INJURY;
        if draw < threshold {
            let player = self.pick_player(snapshot, |_| true)?;
            return Some(MatchEvent::injury(minute, side, player.name.clone(), player.id));
        }
        threshold += W_RED;
        if draw < threshold {
            let player = self.pick_player(snapshot, |p| !p.position.is_goalkeeper())?;
            return Some(MatchEvent::red_card(minute, side, player.name.clone(), Some(player.id)));
        }

        None
    }
}

/// Replays a fixed minute-keyed schedule. The workhorse source for
/// scenario tests: push the events you want, in minute order.
#[derive(Default)]
pub struct ScriptedEvents {
    schedule: VecDeque<(u8, MatchEvent)>,
}

impl ScriptedEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, minute: u8, event: MatchEvent) {
        self.schedule.push_back((minute, event));
    }

    pub fn with_events(events: impl IntoIterator<Item = (u8, MatchEvent)>) -> Self {
        Self { schedule: events.into_iter().collect() }
    }
}

impl EventSource for ScriptedEvents {
    fn next_event(&mut self, input: &GeneratorInput<'_>) -> Option<MatchEvent> {
        match self.schedule.front() {
            Some((minute, _)) if *minute == input.minute => {
                self.schedule.pop_front().map(|(_, event)| event)
            }
            _ => None,
        }
    }
}
