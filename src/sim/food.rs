//! The shared collectible.

use super::segment::Positioned;
use super::vector::Vector2;
use rand::Rng;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Food {
    pub position: Vector2,
}

impl Food {
    /// Food at a random position.
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        Self {
            position: Vector2::random_position(rng),
        }
    }

    pub fn at(position: Vector2) -> Self {
        Self { position }
    }

    /// Move to a new random position. The food is never recreated.
    pub fn relocate<R: Rng>(&mut self, rng: &mut R) {
        self.position.randomize(rng);
    }
}

impl Positioned for Food {
    fn position(&self) -> Vector2 {
        self.position
    }
}
