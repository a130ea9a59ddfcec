//! Shared builders for engine tests.

use crate::engine::decision::Decider;
use crate::engine::decision::ScriptedDecider;
use crate::engine::source::{EventSource, ScriptedEvents};
use crate::engine::{MatchEngine, MatchPlan};
use crate::models::{MatchEvent, Player, Position, SeasonStats, Squad, TeamSide};

fn player(id: u32, name: String, position: Position, skill: u8) -> Player {
    Player {
        id,
        name,
        position,
        skill,
        morale: 70,
        condition: 100,
        season_stats: SeasonStats::default(),
    }
}

/// 18-man squad plus optional reserves. Slot layout: GK, 4 defenders,
/// 4 midfielders, 2 forwards; bench GK, 2 defenders, 2 midfielders,
/// 2 forwards. Ids are `id_base + slot`.
pub(crate) fn squad(label: &str, id_base: u32, reserves: usize) -> Squad {
    let shape: [(Position, &str, u8); 18] = [
        (Position::Goalkeeper, "Goalkeeper 1", 70),
        (Position::Defender, "Defender 1", 72),
        (Position::Defender, "Defender 2", 71),
        (Position::Defender, "Defender 3", 70),
        (Position::Defender, "Defender 4", 69),
        (Position::Midfielder, "Midfielder 1", 75),
        (Position::Midfielder, "Midfielder 2", 74),
        (Position::Midfielder, "Midfielder 3", 73),
        (Position::Midfielder, "Midfielder 4", 72),
        (Position::Forward, "Forward 1", 88),
        (Position::Forward, "Forward 2", 82),
        (Position::Goalkeeper, "Goalkeeper 2", 60),
        (Position::Defender, "Defender 5", 65),
        (Position::Defender, "Defender 6", 64),
        (Position::Midfielder, "Midfielder 5", 66),
        (Position::Midfielder, "Midfielder 6", 65),
        (Position::Forward, "Forward 3", 67),
        (Position::Forward, "Forward 4", 66),
    ];

    let mut players: Vec<Player> = shape
        .iter()
        .enumerate()
        .map(|(slot, (position, role, skill))| {
            player(id_base + slot as u32, format!("{} {}", label, role), *position, *skill)
        })
        .collect();
    for extra in 0..reserves {
        let slot = 18 + extra;
        players.push(player(
            id_base + slot as u32,
            format!("{} Reserve {}", label, extra + 1),
            Position::Midfielder,
            50,
        ));
    }

    Squad::new(format!("{} FC", label), players).expect("fixture squad is well-formed")
}

pub(crate) fn plan() -> MatchPlan {
    plan_with_trust(80)
}

pub(crate) fn plan_with_trust(manager_trust: u8) -> MatchPlan {
    MatchPlan {
        home: squad("Home", 1, 0),
        away: squad("Away", 101, 0),
        user_side: TeamSide::Home,
        manager_trust,
        seed: 1,
    }
}

pub(crate) fn plan_with_reserves() -> MatchPlan {
    MatchPlan {
        home: squad("Home", 1, 2),
        away: squad("Away", 101, 0),
        user_side: TeamSide::Home,
        manager_trust: 80,
        seed: 1,
    }
}

pub(crate) fn engine_with(
    plan: MatchPlan,
    source: impl EventSource + 'static,
    decider: impl Decider + 'static,
) -> MatchEngine {
    MatchEngine::with_parts(plan, Box::new(source), Box::new(decider))
}

pub(crate) fn scripted_engine(events: Vec<(u8, MatchEvent)>, rolls: Vec<bool>) -> MatchEngine {
    engine_with(plan(), ScriptedEvents::with_events(events), ScriptedDecider::with_rolls(rolls))
}
