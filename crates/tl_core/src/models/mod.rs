//! Data model for the live match engine: roster records, the squad slot
//! arena, the event ledger, statistics, and the final summary payload.

pub mod events;
pub mod player;
pub mod squad;
pub mod stats;
pub mod summary;

pub use events::{EventType, MatchEvent, VarOutcome};
pub use player::{Player, Position, SeasonStats};
pub use squad::{Squad, SquadZone, TeamSide, BENCH_END, BENCH_SLOTS, PITCH_SLOTS};
pub use stats::{MatchStats, SideStats, POSSESSION_MAX, POSSESSION_MIN};
pub use summary::MatchSummary;
