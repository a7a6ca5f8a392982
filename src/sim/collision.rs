//! Cross-subsystem collision resolution
//!
//! One pipeline per active-play frame, in a fixed total order: each pass
//! must observe the removals of the passes before it, so destructions are
//! applied immediately through `alive` flags and swept at pass boundaries.
//! A pair check on an entity already destroyed earlier in the frame is a
//! defensive no-op, never an error.

use rand::Rng;

use super::pickups;
use super::state::{GameEvent, GameState, Pickup};
use super::tick;

/// Run the full pipeline for this frame
pub fn resolve(state: &mut GameState, now: f64) {
    player_shots_vs_members(state);
    player_shots_vs_enemy_shots(state);
    enemy_shots_vs_player(state, now);
    shots_vs_cover(state);
    members_vs_cover(state);
    pickups_vs_player(state, now);
    player_vs_members(state);
    members_vs_floor(state);
}

/// Pass 1: player shots destroy formation members, awarding points and
/// rolling the pickup drop; clearing the formation triggers a level-up
fn player_shots_vs_members(state: &mut GameState) {
    for shot in state.player_shots.iter_mut() {
        if !shot.alive {
            continue;
        }
        for member in state.formation.members.iter_mut() {
            if !member.alive || !shot.rect.overlaps(&member.rect) {
                continue;
            }
            shot.alive = false;
            member.alive = false;

            let mut points = state.difficulty.points_for_row(member.row);
            if state.effects.score_boost {
                points *= state.config.score_boost_scale;
            }
            state.stats.score += points;
            state.events.push(GameEvent::MemberDestroyed {
                row: member.row,
                column: member.column,
                points,
            });

            if state.rng.random::<f32>() < state.config.pickup_drop_rate {
                if let Some(kind) = pickups::random_droppable(&mut state.rng) {
                    state
                        .pickups
                        .push(Pickup::new(kind, member.rect.center(), &state.config));
                }
            }
            break;
        }
    }

    state.player_shots.retain(|s| s.alive);
    state.formation.sweep();

    if state.formation.is_cleared() {
        state.player_shots.clear();
        state.enemy_shots.clear();
        tick::level_up(state);
    }
}

/// Pass 2: opposing projectiles mutually annihilate
fn player_shots_vs_enemy_shots(state: &mut GameState) {
    for shot in state.player_shots.iter_mut() {
        if !shot.alive {
            continue;
        }
        for enemy_shot in state.enemy_shots.iter_mut() {
            if !enemy_shot.alive || !shot.rect.overlaps(&enemy_shot.rect) {
                continue;
            }
            shot.alive = false;
            enemy_shot.alive = false;
            break;
        }
    }
    state.player_shots.retain(|s| s.alive);
    state.enemy_shots.retain(|s| s.alive);
}

/// Pass 3: enemy shots hit the player unless shielded, in which case they
/// pass through untouched
fn enemy_shots_vs_player(state: &mut GameState, now: f64) {
    if state.effects.shield {
        return;
    }

    let mut hit = false;
    for shot in state.enemy_shots.iter_mut() {
        if shot.alive && shot.rect.overlaps(&state.player.rect) {
            shot.alive = false;
            hit = true;
        }
    }
    state.enemy_shots.retain(|s| s.alive);

    if hit {
        tick::player_hit(state, now);
    }
}

/// Pass 4: projectiles of either side erode cover blocks
fn shots_vs_cover(state: &mut GameState) {
    for shot in state
        .player_shots
        .iter_mut()
        .chain(state.enemy_shots.iter_mut())
    {
        if !shot.alive {
            continue;
        }
        for block in state.cover.iter_mut() {
            if block.alive && shot.rect.overlaps(&block.rect) {
                block.alive = false;
                shot.alive = false;
            }
        }
    }
    state.player_shots.retain(|s| s.alive);
    state.enemy_shots.retain(|s| s.alive);
    state.cover.retain(|b| b.alive);
}

/// Pass 5: members advancing into cover erode it and keep going
fn members_vs_cover(state: &mut GameState) {
    for member in state.formation.members.iter() {
        if !member.alive {
            continue;
        }
        for block in state.cover.iter_mut() {
            if block.alive && member.rect.overlaps(&block.rect) {
                block.alive = false;
            }
        }
    }
    state.cover.retain(|b| b.alive);
}

/// Pass 6: the player collects pickups on contact
fn pickups_vs_player(state: &mut GameState, now: f64) {
    let mut collected = Vec::new();
    for pickup in state.pickups.iter_mut() {
        if pickup.alive && pickup.rect.overlaps(&state.player.rect) {
            pickup.alive = false;
            collected.push(pickup.kind);
        }
    }
    state.pickups.retain(|p| p.alive);

    for kind in collected {
        state
            .effects
            .enable(kind, now, &state.config, &mut state.stats);
        state.events.push(GameEvent::PickupCollected(kind));
    }
}

/// Pass 7: direct body contact with the formation ends the run
fn player_vs_members(state: &mut GameState) {
    let contact = state
        .formation
        .members
        .iter()
        .any(|m| m.alive && m.rect.overlaps(&state.player.rect));
    if contact {
        tick::game_over(state);
    }
}

/// Pass 8: a member reaching the field floor ends the run regardless of lives
fn members_vs_floor(state: &mut GameState) {
    let breached = state
        .formation
        .members
        .iter()
        .any(|m| m.alive && m.rect.bottom() >= state.config.field_height);
    if breached {
        tick::game_over(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::sim::pickups::PickupKind;
    use crate::sim::rect::Rect;
    use crate::sim::state::{GamePhase, Projectile};
    use glam::Vec2;

    /// Minimal in-play state for pipeline tests
    fn playing_state() -> GameState {
        let mut state = GameState::new(Config::default(), 42, 0.0);
        state.phase = GamePhase::Playing;
        state
    }

    fn shot_at(state: &GameState, rect: Rect) -> Projectile {
        let mut shot = Projectile::player_shot(&rect, &state.config, 5.0);
        shot.rect = rect;
        shot
    }

    #[test]
    fn test_kill_awards_row_points_and_despawns_both() {
        let mut state = playing_state();
        state.formation.members.truncate(1);
        let member_rect = state.formation.members[0].rect;
        state.player_shots.push(shot_at(&state, member_rect));
        state.config.pickup_drop_rate = 0.0;

        resolve(&mut state, 0.0);

        // Scenario: lone member destroyed, base points for row 0 awarded,
        // formation cleared, level advanced, projectiles gone
        assert_eq!(state.stats.score, 70.0);
        assert_eq!(state.stats.level, 2);
        assert!(state.player_shots.is_empty());
        assert!(state.enemy_shots.is_empty());
        // Level-up spawned a fresh formation
        assert!(!state.formation.members.is_empty());
    }

    #[test]
    fn test_score_boost_multiplies_points() {
        let mut state = playing_state();
        state.config.pickup_drop_rate = 0.0;
        state
            .effects
            .enable(PickupKind::ScoreBoost, 0.0, &state.config, &mut state.stats);

        state.formation.members.truncate(2);
        let member_rect = state.formation.members[0].rect;
        state.formation.members[1].rect.pos.y += 500.0;
        state.formation.members[1].target.y += 500.0;
        state.player_shots.push(shot_at(&state, member_rect));

        resolve(&mut state, 0.0);
        assert_eq!(state.stats.score, 70.0 * 1.2);
    }

    #[test]
    fn test_one_shot_kills_at_most_one_member() {
        let mut state = playing_state();
        state.config.pickup_drop_rate = 0.0;
        state.formation.members.truncate(3);
        // Stack two members onto the same rect
        let rect = state.formation.members[0].rect;
        state.formation.members[1].rect = rect;
        state.formation.members[2].rect.pos.y += 500.0;
        state.formation.members[2].target.y += 500.0;
        state.player_shots.push(shot_at(&state, rect));

        resolve(&mut state, 0.0);

        assert_eq!(state.stats.score, 70.0);
        assert_eq!(state.formation.members.len(), 2);
    }

    #[test]
    fn test_opposing_shots_annihilate() {
        let mut state = playing_state();
        let rect = Rect::new(Vec2::new(600.0, 400.0), Vec2::new(5.0, 15.0));
        state.player_shots.push(shot_at(&state, rect));
        let mut enemy = Projectile::enemy_shot(&rect, &state.config, 5.0);
        enemy.rect = rect;
        state.enemy_shots.push(enemy);

        player_shots_vs_enemy_shots(&mut state);

        assert!(state.player_shots.is_empty());
        assert!(state.enemy_shots.is_empty());
    }

    #[test]
    fn test_shielded_player_ignores_enemy_shots() {
        let mut state = playing_state();
        state
            .effects
            .enable(PickupKind::Shield, 0.0, &state.config, &mut state.stats);
        let lives = state.stats.lives;

        let mut enemy = Projectile::enemy_shot(&state.player.rect, &state.config, 5.0);
        enemy.rect = state.player.rect;
        state.enemy_shots.push(enemy);

        enemy_shots_vs_player(&mut state, 0.0);

        // Shots pass through untouched and nothing is lost
        assert_eq!(state.enemy_shots.len(), 1);
        assert_eq!(state.stats.lives, lives);
        assert!(state.effects.shield);
    }

    #[test]
    fn test_unshielded_hit_costs_a_life_and_grants_invulnerability() {
        let mut state = playing_state();
        let lives = state.stats.lives;

        let mut enemy = Projectile::enemy_shot(&state.player.rect, &state.config, 5.0);
        enemy.rect = state.player.rect;
        state.enemy_shots.push(enemy);

        enemy_shots_vs_player(&mut state, 0.0);

        assert!(state.enemy_shots.is_empty());
        assert_eq!(state.stats.lives, lives - 1);
        assert!(state.effects.shield);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_hit_with_no_lives_left_ends_the_run() {
        let mut state = playing_state();
        state.stats.lives = 0;

        let mut enemy = Projectile::enemy_shot(&state.player.rect, &state.config, 5.0);
        enemy.rect = state.player.rect;
        state.enemy_shots.push(enemy);

        enemy_shots_vs_player(&mut state, 0.0);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_shots_erode_cover() {
        let mut state = playing_state();
        let block_rect = state.cover[0].rect;
        let blocks_before = state.cover.len();
        state.player_shots.push(shot_at(&state, block_rect));

        shots_vs_cover(&mut state);

        assert!(state.cover.len() < blocks_before);
        assert!(state.player_shots.is_empty());
    }

    #[test]
    fn test_members_erode_cover_and_survive() {
        let mut state = playing_state();
        let block_rect = state.cover[0].rect;
        let blocks_before = state.cover.len();
        state.formation.members[0].rect = block_rect;

        members_vs_cover(&mut state);

        assert_eq!(state.cover.len(), blocks_before - 1);
        assert!(state.formation.members[0].alive);
    }

    #[test]
    fn test_pickup_contact_applies_effect() {
        let mut state = playing_state();
        let pickup = Pickup::new(PickupKind::UnlimitedAmmo, state.player.rect.center(), &state.config);
        state.pickups.push(pickup);

        pickups_vs_player(&mut state, 0.0);

        assert!(state.pickups.is_empty());
        assert!(state.effects.unlimited_ammo);
        assert!(
            state
                .events
                .contains(&GameEvent::PickupCollected(PickupKind::UnlimitedAmmo))
        );
    }

    #[test]
    fn test_body_contact_is_immediate_game_over() {
        let mut state = playing_state();
        state.formation.members[0].rect = state.player.rect;

        player_vs_members(&mut state);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_floor_breach_is_game_over_not_life_loss() {
        let mut state = playing_state();
        assert!(state.stats.lives > 0);
        let lives = state.stats.lives;
        state.formation.members[0].rect.pos.y = state.config.field_height;

        resolve(&mut state, 0.0);

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.stats.lives, lives);
    }
}
