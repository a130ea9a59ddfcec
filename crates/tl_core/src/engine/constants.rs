//! Named constants for the match-day rules and pacing.

/// Real-time pacing. None of these affect game logic; they only set how
/// long the presentation layer waits between clock callbacks and how long
/// a suspended resolution holds the clock.
pub mod timing {
    /// One virtual minute at 1x speed.
    pub const BASE_TICK_MS: u64 = 1000;
    /// Pause before the review decision is announced on a flagged goal.
    pub const VAR_ANNOUNCE_MS: u64 = 1000;
    /// The review itself.
    pub const VAR_REVIEW_MS: u64 = 3000;
    /// Walk-up and run-up for a penalty kick.
    pub const PENALTY_SPOT_MS: u64 = 2500;
    /// How soon after an opposing goal an objection still forces a review.
    pub const OBJECTION_WINDOW_MS: u64 = 2000;
}

pub mod rules {
    pub const MAX_SUBS: u8 = 5;
    pub const HALF_END_MINUTE: u8 = 45;
    pub const REGULATION_END_MINUTE: u8 = 90;
}

/// Probability table for the engine-side draws. Event likelihoods inside
/// the per-minute generator are its own business; these cover only the
/// resolver branches.
pub mod chance {
    /// Penalty awarded off a yellow card, by the fouled side's possession.
    pub const PENALTY_DOMINANT: f64 = 0.14;
    pub const PENALTY_STRONG: f64 = 0.10;
    pub const PENALTY_BASE: f64 = 0.08;
    /// Possession shares gating the table above.
    pub const PENALTY_DOMINANT_SHARE: u8 = 70;
    pub const PENALTY_STRONG_SHARE: u8 = 60;
    /// Conversion rate from the spot.
    pub const PENALTY_CONVERT: f64 = 0.70;
    /// AI substitution draw per second-half tick.
    pub const AI_SUB_PER_TICK: f64 = 0.20;
    /// A timely objection getting the goal chalked off.
    pub const OBJECTION_OVERTURN: f64 = 0.30;
    /// Ladder advance rolls, by current rung.
    pub const LADDER_WARN: f64 = 0.60;
    pub const LADDER_YELLOW: f64 = 0.50;
    pub const LADDER_RED: f64 = 0.35;
}

/// Board-trust gate on the user side's matchday output.
pub mod trust {
    /// Below this, the dressing room has turned on the manager.
    pub const SABOTAGE_THRESHOLD: u8 = 30;
    /// Strength multiplier while the gate is active.
    pub const SABOTAGE_STRENGTH_FACTOR: f32 = 0.75;
    /// Minute at which the one-time narrative note is logged.
    pub const SABOTAGE_NOTICE_MINUTE: u8 = 10;
}
