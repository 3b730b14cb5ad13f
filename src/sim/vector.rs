//! Coordinates and directions on the normalized play field.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Upper bound (exclusive) for randomized coordinates.
const RANDOM_COORD_LIMIT: u32 = 99;

/// A 2D coordinate (or step) in the `[0, 100)` field space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    pub const ZERO: Vector2 = Vector2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Overwrite both components in place.
    pub fn update(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }

    /// Set both components to independent uniform integers in `[0, 99)`.
    pub fn randomize<R: Rng>(&mut self, rng: &mut R) -> &mut Self {
        self.x = f64::from(rng.gen_range(0..RANDOM_COORD_LIMIT));
        self.y = f64::from(rng.gen_range(0..RANDOM_COORD_LIMIT));
        self
    }

    /// A fresh randomized position.
    pub fn random_position<R: Rng>(rng: &mut R) -> Self {
        let mut v = Self::ZERO;
        v.randomize(rng);
        v
    }

    /// One of the four canonical steps, chosen uniformly.
    ///
    /// Index mapping: 0 → (+S.x, 0), 1 → (−S.x, 0), 2 → (0, +S.y), 3 → (0, −S.y).
    pub fn random_direction<R: Rng>(rng: &mut R, step: Vector2) -> Self {
        match rng.gen_range(0..4) {
            0 => Self::new(step.x, 0.0),
            1 => Self::new(-step.x, 0.0),
            2 => Self::new(0.0, step.y),
            _ => Self::new(0.0, -step.y),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Per-axis proximity: both `|Δx|` and `|Δy|` within `tolerance`.
    pub fn is_near(&self, other: Vector2, tolerance: f64) -> bool {
        (self.x - other.x).abs() <= tolerance && (self.y - other.y).abs() <= tolerance
    }
}

impl std::ops::Add for Vector2 {
    type Output = Vector2;

    fn add(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Vector2 {
    type Output = Vector2;

    fn sub(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Logical steering command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// True for Left/Right.
    pub fn is_horizontal(&self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    /// The movement vector for this command given the per-axis step.
    /// Up is negative y (screen coordinates).
    pub fn to_step(&self, step: Vector2) -> Vector2 {
        match self {
            Self::Up => Vector2::new(0.0, -step.y),
            Self::Down => Vector2::new(0.0, step.y),
            Self::Left => Vector2::new(-step.x, 0.0),
            Self::Right => Vector2::new(step.x, 0.0),
        }
    }
}
