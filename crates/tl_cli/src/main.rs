//! Touchline match runner
//!
//! Runs a full seeded match through the live session API and prints the
//! event feed plus the final statistics table. Useful for eyeballing
//! engine output without a game client attached.

use std::time::{Duration, Instant};

use anyhow::Result;
use clap::{Parser, Subcommand};

use tl_core::engine::session::{LiveMatch, SpeedMultiplier, StepResult};
use tl_core::engine::MatchPlan;
use tl_core::models::{MatchEvent, MatchSummary, Player, Position, SeasonStats, Squad, TeamSide};

#[derive(Parser)]
#[command(name = "tl_cli")]
#[command(about = "Run a Touchline match in the terminal", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate one match and print the feed
    Run {
        /// Match seed (same seed, same match)
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Squad trust in the manager (below 30 the dressing room downs tools)
        #[arg(long, default_value = "60")]
        trust: u8,

        /// Pace the match in real time instead of running it instantly
        #[arg(long, default_value = "false")]
        realtime: bool,

        /// Print the final summary as JSON instead of a table
        #[arg(long, default_value = "false")]
        json: bool,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { seed, trust, realtime, json } => run_match(seed, trust, realtime, json),
    }
}

fn run_match(seed: u64, trust: u8, realtime: bool, json: bool) -> Result<()> {
    let plan = MatchPlan {
        home: demo_squad("Ankara United", 1, &HOME_SURNAMES)?,
        away: demo_squad("Izmir City", 101, &AWAY_SURNAMES)?,
        user_side: TeamSide::Home,
        manager_trust: trust,
        seed,
    };

    let mut session = LiveMatch::new(plan);
    session.set_speed(SpeedMultiplier::Quadruple);
    session.kick_off();

    let mut now = Instant::now();
    loop {
        let result = if realtime {
            std::thread::sleep(session.tick_interval());
            session.step()
        } else {
            // Headless run: drive the injected clock far enough each step
            // that timed suspensions resolve on the next one.
            let result = session.step_at(now);
            now += Duration::from_secs(5);
            result
        };

        match result {
            StepResult::NotStarted => unreachable!("session was kicked off"),
            StepResult::Suspended(overlay) => {
                if realtime {
                    println!("          ... {:?} ...", overlay);
                }
            }
            StepResult::Tick(data) => print_events(&data.events),
            StepResult::HalfTime(data) => {
                print_events(&data.events);
                println!(
                    "-- Half-time: {}-{} (possession {}%-{}%) --",
                    data.score.0, data.score.1, data.possession.0, data.possession.1
                );
                session.resume_second_half();
            }
            StepResult::FullTime(data) => {
                print_events(&data.events);
                break;
            }
        }
    }

    let summary = session.finish()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }
    Ok(())
}

fn print_events(events: &[MatchEvent]) {
    for event in events {
        let side = match event.side {
            Some(TeamSide::Home) => "[H]",
            Some(TeamSide::Away) => "[A]",
            None => "   ",
        };
        println!("{:>3}' {} {}", event.minute, side, event.description);
    }
}

fn print_summary(summary: &MatchSummary) {
    println!();
    println!("=== {} ===", summary.scoreline());
    let stats = &summary.stats;
    println!("{:<18} {:>6} {:>6}", "", summary.home_team, summary.away_team);
    println!("{:<18} {:>6} {:>6}", "Possession %", stats.possession_home, stats.possession_away);
    println!("{:<18} {:>6} {:>6}", "Shots", stats.home.shots, stats.away.shots);
    println!(
        "{:<18} {:>6} {:>6}",
        "On target", stats.home.shots_on_target, stats.away.shots_on_target
    );
    println!("{:<18} {:>6} {:>6}", "Corners", stats.home.corners, stats.away.corners);
    println!("{:<18} {:>6} {:>6}", "Fouls", stats.home.fouls, stats.away.fouls);
    println!("{:<18} {:>6} {:>6}", "Yellow cards", stats.home.yellow_cards, stats.away.yellow_cards);
    println!("{:<18} {:>6} {:>6}", "Red cards", stats.home.red_cards, stats.away.red_cards);
    println!("{:<18} {:>6} {:>6}", "Offsides", stats.home.offsides, stats.away.offsides);
}

const HOME_SURNAMES: [&str; 18] = [
    "Arslan", "Yildiz", "Kaplan", "Celik", "Aydin", "Demir", "Sahin", "Kurt", "Ozturk", "Kaya",
    "Aksoy", "Polat", "Erdem", "Gunes", "Tekin", "Koc", "Aslan", "Duman",
];

const AWAY_SURNAMES: [&str; 18] = [
    "Yilmaz", "Dogan", "Cetin", "Avci", "Bulut", "Ozdemir", "Kara", "Turan", "Keskin", "Vural",
    "Acar", "Sezer", "Bozkurt", "Eren", "Tas", "Sonmez", "Ates", "Uzun",
];

/// Shared shape of the demo rosters: eleven starters, seven on the bench.
const ROSTER_SHAPE: [(Position, u8); 18] = [
    (Position::Goalkeeper, 74),
    (Position::Defender, 72),
    (Position::Defender, 71),
    (Position::Defender, 73),
    (Position::Defender, 69),
    (Position::Midfielder, 76),
    (Position::Midfielder, 74),
    (Position::Midfielder, 72),
    (Position::Midfielder, 75),
    (Position::Forward, 81),
    (Position::Forward, 78),
    (Position::Goalkeeper, 66),
    (Position::Defender, 67),
    (Position::Defender, 65),
    (Position::Midfielder, 68),
    (Position::Midfielder, 66),
    (Position::Forward, 70),
    (Position::Forward, 68),
];

fn demo_squad(name: &str, id_base: u32, surnames: &[&str; 18]) -> Result<Squad> {
    let players = ROSTER_SHAPE
        .iter()
        .zip(surnames.iter())
        .enumerate()
        .map(|(slot, ((position, skill), surname))| Player {
            id: id_base + slot as u32,
            name: surname.to_string(),
            position: *position,
            skill: *skill,
            morale: 70,
            condition: 95,
            season_stats: SeasonStats::default(),
        })
        .collect();

    Ok(Squad::new(name, players)?)
}
