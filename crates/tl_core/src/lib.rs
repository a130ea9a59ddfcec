//! # tl_core - Live Football Match Simulation Engine
//!
//! Tick-driven match engine for the Touchline management game. One virtual
//! minute per tick, at most one generated event per minute, deterministic
//! per seed. The engine owns the whole in-match state: clock and phase,
//! score, the append-only event ledger, statistics, substitutions, clock
//! suspensions (video reviews, penalties, the tactics panel), and the
//! manager discipline ladder.
//!
//! ## Quick start
//!
//! ```no_run
//! use tl_core::engine::session::{LiveMatch, StepResult};
//! use tl_core::engine::MatchPlan;
//! # fn squads() -> (tl_core::models::Squad, tl_core::models::Squad) { unimplemented!() }
//!
//! let (home, away) = squads();
//! let mut session = LiveMatch::new(MatchPlan {
//!     home,
//!     away,
//!     user_side: tl_core::models::TeamSide::Home,
//!     manager_trust: 60,
//!     seed: 42,
//! });
//! session.kick_off();
//! loop {
//!     match session.step() {
//!         StepResult::HalfTime(_) => session.resume_second_half(),
//!         StepResult::FullTime(_) => break,
//!         _ => std::thread::sleep(session.tick_interval()),
//!     }
//! }
//! let summary = session.finish().unwrap();
//! println!("{}", summary.scoreline());
//! ```

pub mod engine;
pub mod error;
pub mod models;

pub use engine::decision::{Decider, ScriptedDecider, SeededDecider};
pub use engine::discipline::{DisciplineLevel, ObjectionOutcome};
pub use engine::phase::MatchPhase;
pub use engine::session::{LiveMatch, SpeedMultiplier, StepResult};
pub use engine::source::{BasicEventSource, EventSource, GeneratorInput, ScriptedEvents};
pub use engine::suspension::Overlay;
pub use engine::{MatchEngine, MatchPlan};
pub use error::{MatchError, Result};
pub use models::{
    EventType, MatchEvent, MatchStats, MatchSummary, Player, Position, Squad, TeamSide, VarOutcome,
};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
