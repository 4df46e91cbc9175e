//! Axis-aligned box colliders
//!
//! A collider stores only its size. Its position comes from the owning
//! entity's Transform, so the box is `[x, x + width) x [y, y + height)`.

use crate::ecs::{Entity, Transform};

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Horizontal extent
    pub width: f32,
    /// Vertical extent
    pub height: f32,
}

impl Rect {
    /// Create a rectangle
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Right edge (exclusive)
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge (exclusive)
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Strict overlap; rectangles that only share an edge do not intersect
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Half-open point containment
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

/// Box collider owned by an entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxCollider {
    /// Owning entity
    pub parent: Entity,
    /// Box width
    pub width: f32,
    /// Box height
    pub height: f32,
}

impl BoxCollider {
    /// Create a collider for `parent`
    pub fn new(parent: Entity, width: f32, height: f32) -> Self {
        Self { parent, width, height }
    }

    /// Size as `(width, height)`
    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    /// World-space box when the parent sits at `at`
    pub fn bounds(&self, at: &Transform) -> Rect {
        Rect::new(at.x, at.y, self.width, self.height)
    }
}
