//! Position component

use crate::ecs::Component;

/// 2D position in framebuffer pixels, y pointing down
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Transform {
    /// Horizontal position
    pub x: f32,
    /// Vertical position
    pub y: f32,
}

impl Transform {
    /// Create a transform at `(x, y)`
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Current position as a tuple
    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    /// Move to an absolute position
    pub fn set_position(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    /// Move by an offset
    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.x += dx;
        self.y += dy;
    }
}

impl Component for Transform {}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_is_origin() {
        assert_eq!(Transform::default().position(), (0.0, 0.0));
    }

    #[test]
    fn test_translate_accumulates() {
        let mut transform = Transform::new(1.5, -2.0);
        transform.translate(0.25, 4.0);
        transform.translate(0.25, 0.0);
        assert_relative_eq!(transform.x, 2.0);
        assert_relative_eq!(transform.y, 2.0);

        transform.set_position(10.0, 20.0);
        assert_eq!(transform.position(), (10.0, 20.0));
    }
}
