//! Game state and core simulation types
//!
//! Everything the simulation mutates lives here, owned by a single
//! [`GameState`]. Subsystems never hold references to each other; the tick
//! passes collaborators as arguments for the duration of a call.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::cover::{self, CoverBlock};
use super::effects::StatusLedger;
use super::formation::Formation;
use super::pickups::PickupKind;
use super::rect::Rect;
use crate::config::{Config, Difficulty};
use crate::highscores::{ScoreHistory, ScoreRecord};

/// Current phase of the round state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Title/menu, waiting for a start intent
    Menu,
    /// Active gameplay
    Playing,
    /// Frozen mid-round; status-effect timers are compensated on resume
    Paused,
    /// Run ended, waiting for a valid name entry
    GameOver,
}

/// Which side fired a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileSide {
    Player,
    Enemy,
}

/// A projectile travelling along the vertical axis
#[derive(Debug, Clone)]
pub struct Projectile {
    pub side: ProjectileSide,
    pub rect: Rect,
    /// -1 travels up (player shots), +1 travels down (enemy shots)
    pub dir: f32,
    pub speed: f32,
    pub alive: bool,
}

impl Projectile {
    /// Player shot, spawned at the firing entity's top-center
    pub fn player_shot(origin: &Rect, config: &Config, speed: f32) -> Self {
        let size = Vec2::new(config.shot_width, config.shot_height);
        Self {
            side: ProjectileSide::Player,
            rect: Rect::from_midtop(Vec2::new(origin.center().x, origin.top()), size),
            dir: -1.0,
            speed,
            alive: true,
        }
    }

    /// Enemy shot, spawned at the shooter's bottom-center
    pub fn enemy_shot(origin: &Rect, config: &Config, speed: f32) -> Self {
        let size = Vec2::new(config.enemy_shot_width, config.enemy_shot_height);
        Self {
            side: ProjectileSide::Enemy,
            rect: Rect::from_midbottom(Vec2::new(origin.center().x, origin.bottom()), size),
            dir: 1.0,
            speed,
            alive: true,
        }
    }

    pub fn advance(&mut self) {
        self.rect.pos.y += self.speed * self.dir;
    }

    /// True once the rect has fully crossed its exit boundary
    pub fn off_field(&self, field_height: f32) -> bool {
        match self.side {
            ProjectileSide::Player => self.rect.bottom() <= 0.0,
            ProjectileSide::Enemy => self.rect.top() >= field_height,
        }
    }
}

/// A falling bonus item
#[derive(Debug, Clone)]
pub struct Pickup {
    pub kind: PickupKind,
    pub rect: Rect,
    pub alive: bool,
}

impl Pickup {
    pub fn new(kind: PickupKind, center: Vec2, config: &Config) -> Self {
        let size = Vec2::splat(config.pickup_size);
        Self {
            kind,
            rect: Rect::from_center(center, size),
            alive: true,
        }
    }

    pub fn advance(&mut self, config: &Config) {
        self.rect.pos.y += config.pickup_speed;
    }

    pub fn off_field(&self, field_height: f32) -> bool {
        self.rect.top() >= field_height
    }
}

/// The player's ship
#[derive(Debug, Clone)]
pub struct Player {
    pub rect: Rect,
    pub moving_left: bool,
    pub moving_right: bool,
}

impl Player {
    /// Player centered at the field's midbottom
    pub fn new(config: &Config) -> Self {
        let size = Vec2::new(config.player_width, config.player_height);
        let midbottom = Vec2::new(config.field_width / 2.0, config.field_height);
        Self {
            rect: Rect::from_midbottom(midbottom, size),
            moving_left: false,
            moving_right: false,
        }
    }

    /// Apply movement intents, clamped to the field
    pub fn advance(&mut self, config: &Config, speed: f32) {
        if self.moving_left && self.rect.left() > 0.0 {
            self.rect.pos.x -= speed;
        }
        if self.moving_right && self.rect.right() < config.field_width {
            self.rect.pos.x += speed;
        }
    }

    /// Recenter and stop, for round start
    pub fn reset(&mut self, config: &Config) {
        *self = Self::new(config);
    }
}

/// Notifications accumulated during a tick, drained by collaborators
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A formation member was destroyed; points already applied to the score
    MemberDestroyed { row: u32, column: u32, points: f64 },
    PickupCollected(PickupKind),
    LifeLost { remaining: u32 },
    LevelStarted(u32),
    GameOver { score: f64 },
    /// A validated name entry appended this record to the history
    ScoreRecorded(ScoreRecord),
    QuitRequested,
}

/// Mutable per-round bookkeeping
#[derive(Debug, Clone)]
pub struct RoundStats {
    pub score: f64,
    pub level: u32,
    pub lives: u32,
    /// Wall-clock second the round started
    pub started_at: f64,
    /// Total seconds spent paused, excluded from the recorded elapsed time
    pub paused_secs: f64,
    /// Name shown in the game-over entry field; edited in place on invalid input
    pub pending_name: String,
}

impl RoundStats {
    pub fn new(config: &Config, now: f64) -> Self {
        Self {
            score: 0.0,
            level: 1,
            lives: config.player_lives,
            started_at: now,
            paused_secs: 0.0,
            pending_name: config.default_player_name.clone(),
        }
    }

    /// Seconds of active play since round start
    pub fn elapsed(&self, now: f64) -> f64 {
        now - (self.started_at + self.paused_secs)
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: Config,
    pub difficulty: Difficulty,
    pub phase: GamePhase,
    pub stats: RoundStats,

    pub player: Player,
    pub formation: Formation,
    pub player_shots: Vec<Projectile>,
    pub enemy_shots: Vec<Projectile>,
    pub cover: Vec<CoverBlock>,
    pub pickups: Vec<Pickup>,
    pub effects: StatusLedger,

    /// Score history in list shape; on-disk encoding is the collaborator's job
    pub history: ScoreHistory,
    /// Per-tick notifications, drained by the driver
    pub events: Vec<GameEvent>,

    /// Absolute deadline of the next enemy shot
    pub next_shot_at: f64,
    /// Wall-clock second the current pause began
    pub paused_at: Option<f64>,

    pub rng: Pcg32,
}

impl GameState {
    /// Build the initial state in the menu phase
    pub fn new(config: Config, seed: u64, now: f64) -> Self {
        let difficulty = Difficulty::new(&config);
        let rng = Pcg32::seed_from_u64(seed);
        let formation = Formation::spawn(&config);
        let cover = cover::generate(&config);
        let stats = RoundStats::new(&config, now);
        let next_shot_at = now + difficulty.shot_interval;

        Self {
            player: Player::new(&config),
            formation,
            player_shots: Vec::new(),
            enemy_shots: Vec::new(),
            cover,
            pickups: Vec::new(),
            effects: StatusLedger::default(),
            history: ScoreHistory::default(),
            events: Vec::new(),
            next_shot_at,
            paused_at: None,
            difficulty,
            phase: GamePhase::Menu,
            stats,
            config,
            rng,
        }
    }

    /// Whether gameplay subsystems advance this frame
    pub fn round_active(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Drain accumulated events, oldest first
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
