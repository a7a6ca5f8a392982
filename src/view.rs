//! Draw queries for the rendering collaborator
//!
//! The core never blits a pixel; a renderer asks for the current visible
//! rectangles once per frame and maps the kind tags to its own assets.

use crate::sim::{GameState, PickupKind, Rect};

/// What a sprite rectangle represents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteKind {
    Player,
    /// Formation member; the row picks the asset/palette
    Member { row: u32 },
    PlayerShot,
    EnemyShot,
    CoverBlock,
    Pickup(PickupKind),
}

/// One visible rectangle
#[derive(Debug, Clone, Copy)]
pub struct Sprite {
    pub rect: Rect,
    pub kind: SpriteKind,
    /// 255 opaque; the player dims while shielded
    pub alpha: u8,
}

/// The player sprite's alpha for the current shield state
pub fn player_alpha(state: &GameState) -> u8 {
    if state.effects.shield { 128 } else { 255 }
}

/// Active timed effects for the HUD icon row
pub fn hud_effects(state: &GameState) -> Vec<PickupKind> {
    state.effects.active_kinds().collect()
}

/// Every visible gameplay rectangle for this frame
pub fn sprites(state: &GameState) -> Vec<Sprite> {
    let mut sprites = Vec::with_capacity(
        1 + state.formation.members.len()
            + state.player_shots.len()
            + state.enemy_shots.len()
            + state.cover.len()
            + state.pickups.len(),
    );

    sprites.push(Sprite {
        rect: state.player.rect,
        kind: SpriteKind::Player,
        alpha: player_alpha(state),
    });

    for member in state.formation.members.iter().filter(|m| m.alive) {
        sprites.push(Sprite {
            rect: member.rect,
            kind: SpriteKind::Member { row: member.row },
            alpha: 255,
        });
    }
    for shot in &state.player_shots {
        sprites.push(Sprite {
            rect: shot.rect,
            kind: SpriteKind::PlayerShot,
            alpha: 255,
        });
    }
    for shot in &state.enemy_shots {
        sprites.push(Sprite {
            rect: shot.rect,
            kind: SpriteKind::EnemyShot,
            alpha: 255,
        });
    }
    for block in state.cover.iter().filter(|b| b.alive) {
        sprites.push(Sprite {
            rect: block.rect,
            kind: SpriteKind::CoverBlock,
            alpha: 255,
        });
    }
    for pickup in state.pickups.iter().filter(|p| p.alive) {
        sprites.push(Sprite {
            rect: pickup.rect,
            kind: SpriteKind::Pickup(pickup.kind),
            alpha: 255,
        });
    }

    sprites
}
