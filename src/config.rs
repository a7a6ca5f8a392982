//! Game configuration and per-round difficulty scaling
//!
//! Every tunable lives in one serde-backed [`Config`] handed to the
//! simulation at construction time; subsystems receive it as an argument
//! and never reach into process-wide state. The values that scale with
//! level progression are split off into [`Difficulty`], reset on round
//! start and advanced on every cleared formation.

use serde::{Deserialize, Serialize};

/// All startup tunables for the simulation core
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // === Field ===
    pub field_width: f32,
    pub field_height: f32,

    // === Player ===
    pub player_width: f32,
    pub player_height: f32,
    pub player_speed: f32,
    /// Extra lives at round start (0 means a single hit ends the run)
    pub player_lives: u32,
    /// Cap the extra-life pickup cannot raise lives beyond
    pub lives_cap: u32,
    pub default_player_name: String,

    // === Player shots ===
    pub shot_width: f32,
    pub shot_height: f32,
    pub shot_speed: f32,
    /// Maximum concurrently alive player shots (ignored with unlimited ammo)
    pub shots_allowed: usize,

    // === Formation ===
    pub formation_columns: u32,
    pub formation_rows: u32,
    /// Horizontal field margin the layout is inset by
    pub formation_margin: f32,
    /// Top offset of the first row
    pub formation_top: f32,
    /// Distance from either field edge that triggers a reversal
    pub border_offset: f32,
    /// Vertical shift applied to the whole formation on each reversal
    pub formation_drop: f32,
    pub member_width: f32,
    pub member_height: f32,
    pub member_speed: f32,
    /// Seconds between enemy shots (scaled per level)
    pub shot_interval: f64,
    pub enemy_shot_width: f32,
    pub enemy_shot_height: f32,
    /// Base score per member by row index; rows past the end reuse the last entry
    pub member_points: Vec<f64>,

    // === Cover ===
    pub cover_clusters: u32,
    /// Cluster anchor height above the field floor
    pub cover_offset_y: f32,
    pub cover_rows: u32,
    pub cover_columns: u32,
    pub cover_block_size: f32,
    pub cover_block_gap: f32,

    // === Pickups ===
    pub pickup_size: f32,
    pub pickup_speed: f32,
    /// Probability of a pickup drop per destroyed member
    pub pickup_drop_rate: f32,
    /// Score multiplier while the score-boost effect is active
    pub score_boost_scale: f64,

    // === Level progression ===
    /// Multiplier applied to speeds and the shot interval per level
    pub speedup_scale: f32,
    /// Multiplier applied to member point values per level
    pub score_scale: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            field_width: 1280.0,
            field_height: 800.0,

            player_width: 60.0,
            player_height: 48.0,
            player_speed: 3.0,
            player_lives: 2,
            lives_cap: 3,
            default_player_name: "Player".to_string(),

            shot_width: 3.0,
            shot_height: 15.0,
            shot_speed: 5.0,
            shots_allowed: 3,

            formation_columns: 10,
            formation_rows: 3,
            formation_margin: 30.0,
            formation_top: 50.0,
            border_offset: 10.0,
            formation_drop: 20.0,
            member_width: 58.0,
            member_height: 48.0,
            member_speed: 1.0,
            shot_interval: 5.0,
            enemy_shot_width: 5.0,
            enemy_shot_height: 15.0,
            member_points: vec![70.0, 65.0, 50.0],

            cover_clusters: 3,
            cover_offset_y: 130.0,
            cover_rows: 4,
            cover_columns: 15,
            cover_block_size: 8.0,
            cover_block_gap: 1.0,

            pickup_size: 50.0,
            pickup_speed: 2.0,
            pickup_drop_rate: 0.1,
            score_boost_scale: 1.2,

            speedup_scale: 1.1,
            score_scale: 1.25,
        }
    }
}

/// The level-scaled portion of the configuration
///
/// Reset from [`Config`] on every round start, then advanced once per
/// cleared formation. All factors grow monotonically within a round.
#[derive(Debug, Clone)]
pub struct Difficulty {
    pub player_speed: f32,
    pub shot_speed: f32,
    pub member_speed: f32,
    pub shot_interval: f64,
    pub member_points: Vec<f64>,
}

impl Difficulty {
    /// Level-1 values straight from the config
    pub fn new(config: &Config) -> Self {
        Self {
            player_speed: config.player_speed,
            shot_speed: config.shot_speed,
            member_speed: config.member_speed,
            shot_interval: config.shot_interval,
            member_points: config.member_points.clone(),
        }
    }

    /// Apply one level's worth of scaling
    pub fn advance_level(&mut self, config: &Config) {
        self.player_speed *= config.speedup_scale;
        self.shot_speed *= config.speedup_scale;
        self.member_speed *= config.speedup_scale;
        self.shot_interval *= config.speedup_scale as f64;

        for points in &mut self.member_points {
            *points = (*points * config.score_scale).floor();
        }
    }

    /// Base score for a member of the given row
    pub fn points_for_row(&self, row: u32) -> f64 {
        let idx = (row as usize).min(self.member_points.len().saturating_sub(1));
        self.member_points.get(idx).copied().unwrap_or(0.0)
    }
}
