//! A single body cell of a snake.

use super::vector::Vector2;
use crate::constants::COLLISION_TOLERANCE;
use serde::Serialize;

/// Anything with a position on the field.
pub trait Positioned {
    fn position(&self) -> Vector2;
}

impl Positioned for Vector2 {
    fn position(&self) -> Vector2 {
        *self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment {
    pub position: Vector2,
    pub is_head: bool,
}

impl Segment {
    pub fn head(position: Vector2) -> Self {
        Self {
            position,
            is_head: true,
        }
    }

    pub fn body(position: Vector2) -> Self {
        Self {
            position,
            is_head: false,
        }
    }

    /// Proximity test shared by food consumption and snake collisions.
    pub fn collides_with<P: Positioned + ?Sized>(&self, other: &P) -> bool {
        self.position.is_near(other.position(), COLLISION_TOLERANCE)
    }
}

impl Positioned for Segment {
    fn position(&self) -> Vector2 {
        self.position
    }
}
