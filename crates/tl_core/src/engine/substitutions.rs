//! Substitution ledger, injury handling, and AI bench management.
//!
//! The ledger is the single gate for lineup edits: pitch↔bench swaps
//! consume one of the five slots per side, same-zone reordering is free,
//! and reserve slots are locked while the match runs. Injuries route
//! through here too — an AI-side injury replaces the player automatically,
//! a user-side injury pins the tactics panel open until the injured player
//! is cleared off the pitch.

use log::{debug, warn};

use crate::error::{MatchError, Result};
use crate::models::{MatchEvent, Position, Squad, SquadZone, TeamSide, PITCH_SLOTS};

use super::constants::{chance, rules};
use super::suspension::Overlay;
use super::MatchEngine;

impl MatchEngine {
    /// User-facing substitution request.
    ///
    /// Fails without mutating anything: `CapacityExceeded` when the side
    /// has burned all five slots, `IneligiblePlayer` when the swap touches
    /// a reserve slot, a sent-off player, an injured incoming player, or a
    /// pairing that is neither a pitch↔bench swap nor a same-zone reorder.
    pub fn request_substitution(
        &mut self,
        side: TeamSide,
        outgoing_id: u32,
        incoming_id: u32,
    ) -> Result<()> {
        let squad = self.squad(side);
        let out_slot = squad
            .slot_of(outgoing_id)
            .ok_or_else(|| ineligible(squad, outgoing_id))?;
        let in_slot = squad
            .slot_of(incoming_id)
            .ok_or_else(|| ineligible(squad, incoming_id))?;

        let out_zone = Squad::zone_of(out_slot);
        let in_zone = Squad::zone_of(in_slot);
        if out_zone == SquadZone::Reserve || in_zone == SquadZone::Reserve {
            return Err(ineligible(squad, outgoing_id));
        }
        if self.is_sent_off(outgoing_id) || self.is_sent_off(incoming_id) {
            return Err(ineligible(squad, outgoing_id));
        }
        if self.is_unavailable(incoming_id) || self.is_substituted_off(incoming_id) {
            return Err(ineligible(squad, incoming_id));
        }

        if out_zone == in_zone {
            // Free reorder, but an injured player cannot be shuffled
            // around; their only move is off the pitch.
            if self.is_unavailable(outgoing_id) {
                return Err(ineligible(squad, outgoing_id));
            }
            self.squad_mut(side).swap_slots(out_slot, in_slot);
            return Ok(());
        }

        if out_zone != SquadZone::Pitch || in_zone != SquadZone::Bench {
            return Err(ineligible(squad, outgoing_id));
        }
        if self.subs_used(side) >= rules::MAX_SUBS {
            return Err(MatchError::CapacityExceeded { side });
        }

        self.execute_substitution(side, out_slot, in_slot);

        if self.forced_substitution_target() == Some(outgoing_id) {
            self.set_forced_sub_target(None);
            if self.overlay() == Overlay::TacticsPanel {
                self.restore_overlay();
            }
        }
        Ok(())
    }

    /// Swap a pitch slot with a bench slot, count it, and log it. Callers
    /// have already cleared cap and eligibility.
    pub(crate) fn execute_substitution(
        &mut self,
        side: TeamSide,
        pitch_slot: usize,
        bench_slot: usize,
    ) {
        let minute = self.minute();
        let squad = self.squad_mut(side);
        let (Some((out_id, out_name)), Some(in_name)) = (
            squad.player(pitch_slot).map(|p| (p.id, p.name.clone())),
            squad.player(bench_slot).map(|p| p.name.clone()),
        ) else {
            return;
        };
        squad.swap_slots(pitch_slot, bench_slot);
        self.mark_substituted_off(out_id);
        self.bump_subs_used(side);
        self.emit_event(MatchEvent::substitution(minute, side, &out_name, &in_name));
    }

    /// Resolver for an intaken injury event.
    pub(crate) fn resolve_injury(&mut self, event_index: usize) {
        let Some((side, player_id)) = self
            .events()
            .get(event_index)
            .and_then(|e| e.side.zip(e.player_id))
        else {
            return;
        };
        self.mark_unavailable(player_id);

        if side == self.user_side() {
            if self.subs_used(side) >= rules::MAX_SUBS {
                warn!("user side out of substitutions, playing on short-handed");
                return;
            }
            self.set_forced_sub_target(Some(player_id));
            self.set_overlay(Overlay::TacticsPanel);
            debug!("forced substitution pending for player {}", player_id);
            return;
        }

        // AI side: replace automatically when a slot is left. The injury
        // stays in the log either way.
        if self.subs_used(side) >= rules::MAX_SUBS {
            return;
        }
        let Some(pitch_slot) = self.squad(side).slot_of(player_id) else {
            return;
        };
        if Squad::zone_of(pitch_slot) != SquadZone::Pitch {
            return;
        }
        let Some(position) = self.squad(side).player(pitch_slot).map(|p| p.position) else {
            return;
        };
        if let Some(bench_slot) = self.find_bench_replacement(side, position) {
            self.execute_substitution(side, pitch_slot, bench_slot);
        }
    }

    /// AI bench management: after the break, one draw per tick while slots
    /// remain, replacing the weakest outfield starter like-for-like.
    pub(crate) fn maybe_ai_substitution(&mut self) {
        if self.minute() <= rules::HALF_END_MINUTE {
            return;
        }
        if self.overlay() != Overlay::None {
            return;
        }
        let side = self.user_side().opponent();
        if self.subs_used(side) >= rules::MAX_SUBS {
            return;
        }
        if !self.decider_mut().roll(chance::AI_SUB_PER_TICK) {
            return;
        }

        let candidate = self
            .squad(side)
            .pitch()
            .iter()
            .enumerate()
            .filter(|(_, p)| !p.position.is_goalkeeper() && !self.is_unavailable(p.id))
            .min_by_key(|(_, p)| p.skill)
            .map(|(slot, p)| (slot, p.position));
        let Some((pitch_slot, position)) = candidate else {
            return;
        };
        if let Some(bench_slot) = self.find_bench_replacement(side, position) {
            self.execute_substitution(side, pitch_slot, bench_slot);
        }
    }

    /// Same-position bench player first, any available bench player as the
    /// fallback. Returns a bench slot index.
    fn find_bench_replacement(&self, side: TeamSide, position: Position) -> Option<usize> {
        let squad = self.squad(side);
        let available =
            |p: &crate::models::Player| !self.is_unavailable(p.id) && !self.is_substituted_off(p.id);

        for (offset, player) in squad.bench().iter().enumerate() {
            if available(player) && player.position.same_zone(position) {
                return Some(PITCH_SLOTS + offset);
            }
        }
        for (offset, player) in squad.bench().iter().enumerate() {
            if available(player) {
                return Some(PITCH_SLOTS + offset);
            }
        }
        None
    }
}

fn ineligible(squad: &Squad, player_id: u32) -> MatchError {
    let name = squad
        .slot_of(player_id)
        .and_then(|slot| squad.player(slot))
        .map(|p| p.name.clone())
        .unwrap_or_else(|| format!("#{}", player_id));
    MatchError::IneligiblePlayer { name }
}
