//! Axis-aligned rectangle geometry for all entity bounding boxes
//!
//! Positions are sub-pixel f32 so movement and easing stay smooth; `pos` is
//! the top-left corner and y grows downward (screen coordinates).

use glam::Vec2;

/// An axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Top-left corner
    pub pos: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    /// Rect with the given center point
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self {
            pos: center - size / 2.0,
            size,
        }
    }

    /// Rect whose top edge midpoint sits at `midtop`
    pub fn from_midtop(midtop: Vec2, size: Vec2) -> Self {
        Self {
            pos: Vec2::new(midtop.x - size.x / 2.0, midtop.y),
            size,
        }
    }

    /// Rect whose bottom edge midpoint sits at `midbottom`
    pub fn from_midbottom(midbottom: Vec2, size: Vec2) -> Self {
        Self {
            pos: Vec2::new(midbottom.x - size.x / 2.0, midbottom.y - size.y),
            size,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Strict overlap test: touching edges do not count as a collision
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Check if a point is inside the rect (edges inclusive)
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.top()
            && point.y <= self.bottom()
    }
}
