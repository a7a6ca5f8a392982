//! Time-bounded status-effect ledger
//!
//! At most one entry per effect type, keyed by an absolute expiry in
//! wall-clock seconds. The gameplay flags (`shield`, `unlimited_ammo`,
//! `score_boost`) are owned by the ledger so a flag can never outlive or
//! predate its entry: enable/disable change both together.

use std::collections::BTreeMap;

use super::pickups::{self, PickupKind};
use super::state::RoundStats;
use crate::config::Config;

/// Active status effects and their expiry deadlines
#[derive(Debug, Clone, Default)]
pub struct StatusLedger {
    deadlines: BTreeMap<PickupKind, f64>,
    /// Enemy shots pass through while set; also dims the player sprite
    pub shield: bool,
    /// Player fire ignores the concurrent-shot cap while set
    pub unlimited_ammo: bool,
    /// Member kills score at the configured multiplier while set
    pub score_boost: bool,
}

impl StatusLedger {
    /// Apply an effect, (re)setting its expiry to `now + duration`
    ///
    /// Idempotent: re-enabling an active effect refreshes the deadline
    /// rather than stacking durations. The instantaneous extra-life effect
    /// mutates `stats` directly and never enters the ledger. The on-hit
    /// invulnerability is a short-lived shield and shares its slot.
    pub fn enable(&mut self, kind: PickupKind, now: f64, config: &Config, stats: &mut RoundStats) {
        match kind {
            PickupKind::Shield | PickupKind::Invulnerability => {
                self.shield = true;
                self.deadlines
                    .insert(PickupKind::Shield, now + pickups::duration(kind));
            }
            PickupKind::ExtraLife => {
                if stats.lives < config.lives_cap {
                    stats.lives += 1;
                }
            }
            PickupKind::UnlimitedAmmo => {
                self.unlimited_ammo = true;
                self.deadlines
                    .insert(kind, now + pickups::duration(kind));
            }
            PickupKind::ScoreBoost => {
                self.score_boost = true;
                self.deadlines
                    .insert(kind, now + pickups::duration(kind));
            }
        }
    }

    /// Clear an effect's flag and ledger entry; no-op when absent
    pub fn disable(&mut self, kind: PickupKind) {
        if self.deadlines.remove(&kind).is_none() {
            return;
        }
        match kind {
            PickupKind::Shield => self.shield = false,
            PickupKind::UnlimitedAmmo => self.unlimited_ammo = false,
            PickupKind::ScoreBoost => self.score_boost = false,
            _ => {}
        }
    }

    /// Disable every effect whose expiry has passed; call once per active frame
    pub fn tick(&mut self, now: f64) {
        let expired: Vec<PickupKind> = self
            .deadlines
            .iter()
            .filter(|&(_, &deadline)| now > deadline)
            .map(|(&kind, _)| kind)
            .collect();
        for kind in expired {
            self.disable(kind);
        }
    }

    /// Shift every expiry forward; pause compensation on resume
    pub fn extend_all(&mut self, delta: f64) {
        for deadline in self.deadlines.values_mut() {
            *deadline += delta;
        }
    }

    /// Whether a timed entry for this kind is present
    pub fn is_active(&self, kind: PickupKind) -> bool {
        self.deadlines.contains_key(&kind)
    }

    /// Active timed effects, for the HUD draw query
    pub fn active_kinds(&self) -> impl Iterator<Item = PickupKind> + '_ {
        self.deadlines.keys().copied()
    }

    /// Drop all entries and flags, for round reset
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
