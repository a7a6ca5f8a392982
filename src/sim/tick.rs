//! Per-frame simulation entry point and the round state machine
//!
//! The driver calls [`tick`] once per rendered frame with the wall clock in
//! seconds. Only the `Playing` phase advances gameplay; pausing freezes all
//! state and shifts every status-effect deadline forward by the paused
//! duration on resume, so buffs never decay while frozen.

use log::info;

use super::collision;
use super::cover;
use super::formation::Formation;
use super::pickups::PickupKind;
use super::state::{GameEvent, GamePhase, GameState, Projectile, RoundStats};
use crate::config::Difficulty;
use crate::consts::{NAME_MAX_LEN, NAME_MIN_LEN};
use crate::highscores::ScoreRecord;

/// Input intents for a single frame
///
/// Translated from raw device events by the input collaborator; the core
/// never reads device state itself.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    /// Fire one player shot (one-shot intent)
    pub fire: bool,
    /// Start a round from the menu
    pub start: bool,
    /// Toggle pause
    pub pause: bool,
    /// Submitted name entry on the game-over screen
    pub confirm_name: Option<String>,
    /// Quit request, surfaced to the driver as an event
    pub quit: bool,
}

/// Advance the simulation by one frame
pub fn tick(state: &mut GameState, input: &TickInput, now: f64) {
    if input.quit {
        state.events.push(GameEvent::QuitRequested);
    }

    // The shot cadence timer is one-shot and re-arms in every phase;
    // actually firing requires an active round.
    if now >= state.next_shot_at {
        state.next_shot_at = now + state.difficulty.shot_interval;
        if state.round_active() {
            fire_enemy_shot(state);
        }
    }

    match state.phase {
        GamePhase::Menu => {
            if input.start {
                start_round(state, now);
            }
        }

        GamePhase::Playing => {
            if input.pause {
                state.paused_at = Some(now);
                state.phase = GamePhase::Paused;
                return;
            }
            advance_play(state, input, now);
        }

        GamePhase::Paused => {
            if input.pause {
                let paused_for = state.paused_at.take().map(|t| now - t).unwrap_or(0.0);
                state.stats.paused_secs += paused_for;
                state.effects.extend_all(paused_for);
                state.phase = GamePhase::Playing;
            }
        }

        GamePhase::GameOver => {
            if let Some(name) = &input.confirm_name {
                confirm_name(state, name, now);
            }
        }
    }
}

/// One frame of active gameplay: advance every subsystem, then resolve
fn advance_play(state: &mut GameState, input: &TickInput, now: f64) {
    state.player.moving_left = input.move_left;
    state.player.moving_right = input.move_right;
    state
        .player
        .advance(&state.config, state.difficulty.player_speed);

    if input.fire {
        fire_player_shot(state);
    }

    state.formation.advance(&state.config, &state.difficulty);

    let field_height = state.config.field_height;
    for shot in state.player_shots.iter_mut() {
        shot.advance();
    }
    state.player_shots.retain(|s| !s.off_field(field_height));
    for shot in state.enemy_shots.iter_mut() {
        shot.advance();
    }
    state.enemy_shots.retain(|s| !s.off_field(field_height));

    for pickup in state.pickups.iter_mut() {
        pickup.advance(&state.config);
    }
    state.pickups.retain(|p| !p.off_field(field_height));

    collision::resolve(state, now);
    state.effects.tick(now);
}

/// Spawn a player shot unless the concurrent cap is reached
fn fire_player_shot(state: &mut GameState) {
    if state.effects.unlimited_ammo || state.player_shots.len() < state.config.shots_allowed {
        let shot = Projectile::player_shot(
            &state.player.rect,
            &state.config,
            state.difficulty.shot_speed,
        );
        state.player_shots.push(shot);
    }
}

/// Spawn an enemy shot from a randomly chosen frontmost member
fn fire_enemy_shot(state: &mut GameState) {
    let shot = state
        .formation
        .choose_shooter(&mut state.rng)
        .map(|shooter| {
            Projectile::enemy_shot(&shooter.rect, &state.config, state.difficulty.shot_speed)
        });
    if let Some(shot) = shot {
        state.enemy_shots.push(shot);
    }
}

/// Menu -> Playing: reset stats and rebuild every gameplay collection
pub(crate) fn start_round(state: &mut GameState, now: f64) {
    state.difficulty = Difficulty::new(&state.config);
    state.stats = RoundStats::new(&state.config, now);
    state.effects.clear();

    state.player.reset(&state.config);
    state.player_shots.clear();
    state.enemy_shots.clear();
    state.pickups.clear();
    state.formation = Formation::spawn(&state.config);
    state.cover = cover::generate(&state.config);

    state.next_shot_at = now + state.difficulty.shot_interval;
    state.paused_at = None;
    state.phase = GamePhase::Playing;
    state.events.push(GameEvent::LevelStarted(1));
    info!("round started");
}

/// Cleared formation: advance difficulty and respawn formation and cover
pub(crate) fn level_up(state: &mut GameState) {
    state.stats.level += 1;
    state.difficulty.advance_level(&state.config);
    state.formation = Formation::spawn(&state.config);
    state.cover = cover::generate(&state.config);
    state.events.push(GameEvent::LevelStarted(state.stats.level));
    info!("level {} started", state.stats.level);
}

/// Apply one enemy hit: costs a life or ends the run, and grants the
/// brief on-hit invulnerability
pub(crate) fn player_hit(state: &mut GameState, now: f64) {
    if state.stats.lives == 0 {
        game_over(state);
        return;
    }
    state.stats.lives -= 1;
    state.events.push(GameEvent::LifeLost {
        remaining: state.stats.lives,
    });
    state.effects.enable(
        PickupKind::Invulnerability,
        now,
        &state.config,
        &mut state.stats,
    );
}

/// Transition to the game-over screen; idempotent within a frame
pub(crate) fn game_over(state: &mut GameState) {
    if state.phase == GamePhase::GameOver {
        return;
    }
    state.phase = GamePhase::GameOver;
    state.events.push(GameEvent::GameOver {
        score: state.stats.score,
    });
    info!(
        "game over at level {} with score {}",
        state.stats.level, state.stats.score
    );
}

/// Validate a submitted name; on success append the score record and
/// return to the menu, otherwise correct the pending name and stay
fn confirm_name(state: &mut GameState, name: &str, now: f64) {
    let len = name.chars().count();

    if (NAME_MIN_LEN..=NAME_MAX_LEN).contains(&len) {
        let elapsed = state.stats.elapsed(now);
        let record = ScoreRecord {
            score: state.stats.score.round() as u64,
            level: state.stats.level,
            elapsed_seconds: (elapsed * 100.0).round() / 100.0,
            name: name.to_string(),
        };
        state.stats.pending_name = name.to_string();
        state.history.add(record.clone());
        state.events.push(GameEvent::ScoreRecorded(record));
        state.phase = GamePhase::Menu;
    } else if len > NAME_MAX_LEN {
        state.stats.pending_name = name.chars().take(NAME_MAX_LEN).collect();
    } else {
        state.stats.pending_name = state.config.default_player_name.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::sim::pickups;

    fn new_state() -> GameState {
        GameState::new(Config::default(), 12345, 0.0)
    }

    fn started_state() -> GameState {
        let mut state = new_state();
        let input = TickInput {
            start: true,
            ..Default::default()
        };
        tick(&mut state, &input, 0.0);
        state
    }

    #[test]
    fn test_menu_start_resets_and_enters_play() {
        let mut state = new_state();
        state.stats.score = 999.0;

        let input = TickInput {
            start: true,
            ..Default::default()
        };
        tick(&mut state, &input, 10.0);

        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.stats.score, 0.0);
        assert_eq!(state.stats.level, 1);
        assert_eq!(state.stats.started_at, 10.0);
        assert!(state.events.contains(&GameEvent::LevelStarted(1)));
    }

    #[test]
    fn test_menu_ignores_gameplay_intents() {
        let mut state = new_state();
        let input = TickInput {
            fire: true,
            move_left: true,
            ..Default::default()
        };
        tick(&mut state, &input, 0.1);
        assert_eq!(state.phase, GamePhase::Menu);
        assert!(state.player_shots.is_empty());
    }

    #[test]
    fn test_pause_freezes_and_resume_compensates() {
        let mut state = started_state();
        state
            .effects
            .enable(pickups::PickupKind::Shield, 1.0, &state.config, &mut state.stats);

        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause, 2.0);
        assert_eq!(state.phase, GamePhase::Paused);

        // A long pause; the shield would have expired at t=7 unpaused
        tick(&mut state, &pause, 42.0);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.stats.paused_secs, 40.0);

        // Deadline shifted by the 40s pause: still active at t=46.9
        let idle = TickInput::default();
        tick(&mut state, &idle, 46.9);
        assert!(state.effects.shield);
        tick(&mut state, &idle, 47.1);
        assert!(!state.effects.shield);
    }

    #[test]
    fn test_paused_gameplay_does_not_advance() {
        let mut state = started_state();
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause, 1.0);

        let targets: Vec<f32> = state.formation.members.iter().map(|m| m.target.x).collect();
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &fire, 1.5);

        assert!(state.player_shots.is_empty());
        let after: Vec<f32> = state.formation.members.iter().map(|m| m.target.x).collect();
        assert_eq!(targets, after);
    }

    #[test]
    fn test_player_fire_respects_the_cap() {
        let mut state = started_state();
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        for i in 0..5 {
            tick(&mut state, &fire, 0.1 + i as f64 * 0.01);
        }
        assert_eq!(state.player_shots.len(), state.config.shots_allowed);
    }

    #[test]
    fn test_unlimited_ammo_bypasses_the_cap() {
        let mut state = started_state();
        state.effects.enable(
            pickups::PickupKind::UnlimitedAmmo,
            0.0,
            &state.config,
            &mut state.stats,
        );
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        for i in 0..6 {
            tick(&mut state, &fire, 0.1 + i as f64 * 0.01);
        }
        assert!(state.player_shots.len() > state.config.shots_allowed);
    }

    #[test]
    fn test_shot_timer_fires_during_play() {
        let mut state = started_state();
        assert!(state.enemy_shots.is_empty());

        let idle = TickInput::default();
        let deadline = state.next_shot_at;
        tick(&mut state, &idle, deadline);

        assert_eq!(state.enemy_shots.len(), 1);
        // Timer re-armed to a later deadline
        assert!(state.next_shot_at > deadline);
    }

    #[test]
    fn test_shot_timer_rearms_but_holds_fire_outside_play() {
        let mut state = new_state();
        let deadline = state.next_shot_at;

        let idle = TickInput::default();
        tick(&mut state, &idle, deadline);

        assert!(state.enemy_shots.is_empty());
        assert!(state.next_shot_at > deadline);
    }

    #[test]
    fn test_enemy_shot_originates_at_a_frontmost_member() {
        let mut state = started_state();
        let idle = TickInput::default();
        let deadline = state.next_shot_at;
        tick(&mut state, &idle, deadline);

        let shot = &state.enemy_shots[0];
        let candidates = state.formation.shooter_candidates();
        let from_frontmost = candidates.iter().any(|&i| {
            let m = &state.formation.members[i];
            (shot.rect.center().x - m.rect.center().x).abs() < m.rect.size.x
        });
        assert!(from_frontmost);
    }

    #[test]
    fn test_short_name_rejected_and_reset_to_default() {
        let mut state = started_state();
        game_over(&mut state);

        let records_before = state.history.records().len();
        let input = TickInput {
            confirm_name: Some("Al".to_string()),
            ..Default::default()
        };
        tick(&mut state, &input, 30.0);

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.history.records().len(), records_before);
        assert_eq!(state.stats.pending_name, "Player");
    }

    #[test]
    fn test_long_name_truncated_not_recorded() {
        let mut state = started_state();
        game_over(&mut state);

        let input = TickInput {
            confirm_name: Some("Bartholomew".to_string()),
            ..Default::default()
        };
        tick(&mut state, &input, 30.0);

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.stats.pending_name, "Bartholome");
        assert!(state.history.records().is_empty());
    }

    #[test]
    fn test_valid_name_appends_one_record() {
        let mut state = started_state();
        state.stats.score = 123.4;
        state.stats.paused_secs = 5.0;
        game_over(&mut state);

        let input = TickInput {
            confirm_name: Some("Alice".to_string()),
            ..Default::default()
        };
        tick(&mut state, &input, 30.0);

        assert_eq!(state.phase, GamePhase::Menu);
        let records = state.history.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Alice");
        assert_eq!(records[0].score, 123);
        assert_eq!(records[0].level, 1);
        assert_eq!(records[0].elapsed_seconds, 25.0);
    }

    #[test]
    fn test_quit_is_surfaced_as_an_event() {
        let mut state = new_state();
        let input = TickInput {
            quit: true,
            ..Default::default()
        };
        tick(&mut state, &input, 0.0);
        assert!(state.events.contains(&GameEvent::QuitRequested));
    }

    #[test]
    fn test_determinism_with_equal_seeds() {
        let mut a = GameState::new(Config::default(), 777, 0.0);
        let mut b = GameState::new(Config::default(), 777, 0.0);

        let start = TickInput {
            start: true,
            ..Default::default()
        };
        let fire = TickInput {
            fire: true,
            move_right: true,
            ..Default::default()
        };
        tick(&mut a, &start, 0.0);
        tick(&mut b, &start, 0.0);
        for i in 0..200 {
            let now = i as f64 / 60.0;
            tick(&mut a, &fire, now);
            tick(&mut b, &fire, now);
        }

        assert_eq!(a.stats.score, b.stats.score);
        assert_eq!(a.enemy_shots.len(), b.enemy_shots.len());
        assert_eq!(a.formation.members.len(), b.formation.members.len());
        assert_eq!(a.player.rect.pos.x, b.player.rect.pos.x);
    }
}
