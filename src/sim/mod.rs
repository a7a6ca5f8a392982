//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and
//! deterministic:
//! - One tick per rendered frame, driven by an external fixed-rate clock
//! - Seeded RNG only, owned by the game state
//! - A single fixed collision order per frame
//! - No rendering or platform dependencies

pub mod collision;
pub mod cover;
pub mod effects;
pub mod formation;
pub mod pickups;
pub mod rect;
pub mod state;
pub mod tick;

pub use cover::CoverBlock;
pub use effects::StatusLedger;
pub use formation::{Formation, FormationMember};
pub use pickups::{PickupKind, PickupSpec};
pub use rect::Rect;
pub use state::{
    GameEvent, GamePhase, GameState, Pickup, Player, Projectile, ProjectileSide, RoundStats,
};
pub use tick::{TickInput, tick};
