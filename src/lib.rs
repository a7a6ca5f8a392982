//! Star Siege - a fixed-formation arcade shooter simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, formation, collisions, game state)
//! - `config`: Data-driven tunables supplied at startup
//! - `highscores`: Score history list and its JSON file collaborator
//! - `view`: Draw queries for the rendering collaborator
//!
//! The crate performs no pixel output and reads no raw device state: a
//! driver translates device events into [`sim::TickInput`] intents, calls
//! [`sim::tick`] once per frame with the wall clock, and renders whatever
//! [`view::sprites`] returns.

pub mod config;
pub mod highscores;
pub mod sim;
pub mod view;

pub use config::{Config, Difficulty};
pub use highscores::ScoreHistory;

/// Algorithmic constants (everything else is [`Config`])
pub mod consts {
    /// Blend factor for easing rendered rects toward their logical position.
    /// Cosmetic-feel constant: 5% of the remaining distance per frame.
    pub const EASE_BLEND: f32 = 0.05;

    /// Minimum column spacing as a multiple of member width. Below this the
    /// layout is considered infeasible and the column count shrinks.
    pub const MIN_SPACING_FACTOR: f32 = 1.2;

    /// Divisor for the shrink heuristic: columns = floor(available / (width * 1.33)).
    pub const SHRINK_FACTOR: f32 = 1.33;

    /// Accepted player name length on game over
    pub const NAME_MIN_LEN: usize = 3;
    pub const NAME_MAX_LEN: usize = 10;
}
