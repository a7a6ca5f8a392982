//! Pickup definitions and weighted random selection
//!
//! The definition table is immutable; availability for the random roll is a
//! plain flag on each entry. Exactly one kind (the on-hit invulnerability)
//! is excluded from drops and only ever granted programmatically.

use rand::Rng;
use rand::seq::IndexedRandom;

/// The closed set of pickup/status-effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PickupKind {
    /// Short shield granted on taking a hit; never dropped by the roll
    Invulnerability,
    UnlimitedAmmo,
    /// Instantaneous: one extra life up to the configured cap
    ExtraLife,
    Shield,
    ScoreBoost,
}

/// One row of the pickup definition table
#[derive(Debug, Clone, Copy)]
pub struct PickupSpec {
    pub kind: PickupKind,
    /// Relative drop weight among droppable entries
    pub weight: f32,
    /// Effect duration in seconds; 0 means instantaneous
    pub duration: f64,
    /// Whether the random roll may select this entry
    pub droppable: bool,
}

/// The static pickup table
pub const TABLE: [PickupSpec; 5] = [
    PickupSpec {
        kind: PickupKind::Invulnerability,
        weight: 0.0,
        duration: 3.0,
        droppable: false,
    },
    PickupSpec {
        kind: PickupKind::UnlimitedAmmo,
        weight: 4.0,
        duration: 5.0,
        droppable: true,
    },
    PickupSpec {
        kind: PickupKind::ExtraLife,
        weight: 1.0,
        duration: 0.0,
        droppable: true,
    },
    PickupSpec {
        kind: PickupKind::Shield,
        weight: 2.0,
        duration: 6.0,
        droppable: true,
    },
    PickupSpec {
        kind: PickupKind::ScoreBoost,
        weight: 2.0,
        duration: 6.0,
        droppable: true,
    },
];

/// Look up a kind's table entry
pub fn spec(kind: PickupKind) -> &'static PickupSpec {
    match kind {
        PickupKind::Invulnerability => &TABLE[0],
        PickupKind::UnlimitedAmmo => &TABLE[1],
        PickupKind::ExtraLife => &TABLE[2],
        PickupKind::Shield => &TABLE[3],
        PickupKind::ScoreBoost => &TABLE[4],
    }
}

/// Effect duration in seconds for a kind
pub fn duration(kind: PickupKind) -> f64 {
    spec(kind).duration
}

/// Single weighted draw over the droppable subset of a table
pub fn weighted_draw<R: Rng>(table: &[PickupSpec], rng: &mut R) -> Option<PickupKind> {
    let droppable: Vec<&PickupSpec> = table.iter().filter(|s| s.droppable).collect();
    droppable
        .choose_weighted(rng, |s| s.weight)
        .ok()
        .map(|s| s.kind)
}

/// Draw one pickup kind from the static table
pub fn random_droppable<R: Rng>(rng: &mut R) -> Option<PickupKind> {
    weighted_draw(&TABLE, rng)
}
