//! Destructible cover clusters
//!
//! A fixed number of block grids evenly spaced above the field floor.
//! Blocks are generated once per cluster and destroyed individually; the
//! clusters are fully rebuilt on round reset and on every level-up.

use glam::Vec2;

use super::rect::Rect;
use crate::config::Config;

/// One destructible block of a cover cluster
#[derive(Debug, Clone)]
pub struct CoverBlock {
    pub rect: Rect,
    pub alive: bool,
}

/// Generate all clusters for a fresh round or level
pub fn generate(config: &Config) -> Vec<CoverBlock> {
    let spacing = config.field_width / (config.cover_clusters + 1) as f32;
    let anchor_y = config.field_height - config.cover_offset_y;

    let mut blocks = Vec::new();
    for i in 1..=config.cover_clusters {
        cluster(config, Vec2::new(spacing * i as f32, anchor_y), &mut blocks);
    }
    blocks
}

/// Generate one block grid centered on `anchor`
fn cluster(config: &Config, anchor: Vec2, blocks: &mut Vec<CoverBlock>) {
    // Odd column count keeps a symmetric center
    let columns = if config.cover_columns.is_multiple_of(2) {
        config.cover_columns.saturating_sub(1)
    } else {
        config.cover_columns
    };

    let pitch = config.cover_block_size + config.cover_block_gap;
    let half_cols = (columns / 2) as i32;
    let half_rows = (config.cover_rows / 2) as i32;
    let size = Vec2::splat(config.cover_block_size);

    for col in 0..columns as i32 {
        for row in 0..config.cover_rows as i32 {
            let center = anchor + Vec2::new((col - half_cols) as f32, (row - half_rows) as f32) * pitch;
            blocks.push(CoverBlock {
                rect: Rect::from_center(center, size),
                alive: true,
            });
        }
    }
}
