//! Trust-derived performance gate.
//!
//! When squad trust in the manager has collapsed, the user side's
//! generator inputs are degraded: effective strength takes a fixed
//! multiplier and player morale reads as zero. This is a read-time
//! transform on the per-call snapshot only — the persisted roster is never
//! touched. A one-time narrative entry lands at minute 10 while the gate
//! is active.

use log::debug;

use crate::models::{MatchEvent, TeamSide};

use super::constants::trust;
use super::source::{PlayerSnapshot, SideSnapshot};
use super::MatchEngine;

impl MatchEngine {
    pub(crate) fn debuff_active_for(&self, side: TeamSide) -> bool {
        side == self.user_side() && self.manager_trust() < trust::SABOTAGE_THRESHOLD
    }

    /// Effective view of one side's active eleven for a generator call.
    pub(crate) fn side_snapshot(&self, side: TeamSide) -> SideSnapshot {
        let debuffed = self.debuff_active_for(side);
        let pitch = self.squad(side).pitch();

        let players: Vec<PlayerSnapshot> = pitch
            .iter()
            .map(|p| PlayerSnapshot {
                id: p.id,
                name: p.name.clone(),
                position: p.position,
                skill: p.skill,
                morale: if debuffed { 0 } else { p.morale },
            })
            .collect();

        let mut strength = if pitch.is_empty() {
            0.0
        } else {
            pitch.iter().map(|p| p.effective_skill()).sum::<f32>() / pitch.len() as f32
        };
        if debuffed {
            strength *= trust::SABOTAGE_STRENGTH_FACTOR;
        }

        SideSnapshot { side, strength, players }
    }

    /// Append the dressing-room narrative exactly once, at minute 10, if
    /// the gate is active.
    pub(crate) fn note_sabotage_if_due(&mut self) {
        if self.sabotage_noted() || self.minute() != trust::SABOTAGE_NOTICE_MINUTE {
            return;
        }
        if !self.debuff_active_for(self.user_side()) {
            return;
        }
        self.mark_sabotage_noted();
        debug!("trust gate active, logging dressing-room note");
        let minute = self.minute();
        let side = self.user_side();
        self.emit_event(MatchEvent::info(
            minute,
            Some(side),
            "The players look disinterested; the dressing room has turned on the manager",
        ));
    }
}
