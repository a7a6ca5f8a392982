//! The enemy formation: grid layout, lockstep movement, edge reversal,
//! and shooter targeting
//!
//! Members march horizontally in lockstep and drop one step whenever any
//! member's logical position reaches a field border. The rendered rect of
//! each member eases toward its logical position; collisions use the eased
//! rect, so the smoothing is cosmetic for movement but real for contact.

use std::collections::BTreeMap;

use glam::Vec2;
use log::warn;
use rand::Rng;
use rand::seq::IndexedRandom;

use super::rect::Rect;
use crate::config::{Config, Difficulty};
use crate::consts::{EASE_BLEND, MIN_SPACING_FACTOR, SHRINK_FACTOR};

/// One enemy within the formation grid
#[derive(Debug, Clone)]
pub struct FormationMember {
    /// Rendered rect, eased toward `target`; used for collision
    pub rect: Rect,
    /// Logical top-left position the rect eases toward
    pub target: Vec2,
    /// Grid row; determines type and point value, higher rows sit lower
    pub row: u32,
    /// Stable identity within the grid, used for targeting
    pub column: u32,
    pub alive: bool,
}

/// The grid of enemies advancing in lockstep
#[derive(Debug, Clone)]
pub struct Formation {
    pub members: Vec<FormationMember>,
    /// +1 marching right, -1 marching left
    pub direction: f32,
}

/// Resolve the usable column count and spacing for a field
///
/// Requested columns are kept when the resulting spacing stays at least
/// 1.2x the member width; otherwise the count shrinks to
/// floor(available / (width * 1.33)), which restores the spacing floor.
pub fn plan_columns(available_width: f32, member_width: f32, requested: u32) -> (u32, f32) {
    let requested = requested.max(1);
    let spacing = available_width / requested as f32;
    if spacing >= member_width * MIN_SPACING_FACTOR {
        return (requested, spacing);
    }

    let columns = ((available_width / (member_width * SHRINK_FACTOR)).floor() as u32).max(1);
    warn!(
        "not enough width for {requested} formation columns, reduced to {columns}"
    );
    (columns, available_width / columns as f32)
}

impl Formation {
    /// Lay out a fresh formation from the configured grid shape
    pub fn spawn(config: &Config) -> Self {
        let member_size = Vec2::new(config.member_width, config.member_height);
        let available = config.field_width - 2.0 * config.formation_margin;
        let (columns, spacing) = plan_columns(available, member_size.x, config.formation_columns);

        let vertical_extent = (config.field_height - config.formation_margin) / 2.0;
        let row_spacing = vertical_extent / config.formation_rows.max(1) as f32;

        let mut members = Vec::with_capacity((columns * config.formation_rows) as usize);
        for row in 0..config.formation_rows {
            for column in 0..columns {
                let center_x = config.formation_margin + spacing * (column as f32 + 0.5);
                let target = Vec2::new(
                    center_x - member_size.x / 2.0,
                    config.formation_top + row_spacing * row as f32,
                );
                members.push(FormationMember {
                    // Rect snaps to the grid at spawn; easing only covers
                    // subsequent movement
                    rect: Rect::new(target, member_size),
                    target,
                    row,
                    column,
                    alive: true,
                });
            }
        }

        Self {
            members,
            direction: 1.0,
        }
    }

    /// Per-frame advance: edge scan, then lockstep movement with easing
    pub fn advance(&mut self, config: &Config, difficulty: &Difficulty) {
        self.check_edges(config);

        for member in self.members.iter_mut().filter(|m| m.alive) {
            member.target.x += difficulty.member_speed * self.direction;
            member.rect.pos = member.rect.pos.lerp(member.target, EASE_BLEND);
        }
    }

    /// Reverse once if any alive member's logical x is within the border
    /// offset of either edge; the first offending member wins
    fn check_edges(&mut self, config: &Config) {
        let tripped = self.members.iter().filter(|m| m.alive).any(|m| {
            m.target.x <= config.border_offset
                || m.target.x + config.member_width >= config.field_width - config.border_offset
        });
        if tripped {
            self.reverse(config);
        }
    }

    /// Flip direction and drop the whole formation one step
    fn reverse(&mut self, config: &Config) {
        for member in &mut self.members {
            member.target.y += config.formation_drop;
        }
        self.direction = -self.direction;
    }

    /// Indices of the eligible shooters: for each column with at least one
    /// alive member, the single alive member with the greatest row
    pub fn shooter_candidates(&self) -> Vec<usize> {
        let mut frontmost: BTreeMap<u32, usize> = BTreeMap::new();
        for (idx, member) in self.members.iter().enumerate() {
            if !member.alive {
                continue;
            }
            match frontmost.get(&member.column) {
                Some(&best) if self.members[best].row >= member.row => {}
                _ => {
                    frontmost.insert(member.column, idx);
                }
            }
        }
        frontmost.into_values().collect()
    }

    /// Pick one shooter uniformly at random from the candidate set
    pub fn choose_shooter<R: Rng>(&self, rng: &mut R) -> Option<&FormationMember> {
        let candidates = self.shooter_candidates();
        candidates.choose(rng).map(|&idx| &self.members[idx])
    }

    /// Whether every member has been destroyed
    pub fn is_cleared(&self) -> bool {
        !self.members.iter().any(|m| m.alive)
    }

    /// Drop destroyed members from the collection
    pub fn sweep(&mut self) {
        self.members.retain(|m| m.alive);
    }
}
