//! Read-only views of a match for renderers.

use super::vector::Vector2;
use crate::config::SnakeColor;
use serde::Serialize;

/// One snake as seen by a renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnakeSnapshot {
    pub id: usize,
    pub name: String,
    pub color: SnakeColor,
    /// Head first.
    pub segments: Vec<Vector2>,
    pub alive: bool,
    pub score: u32,
    pub speed: u32,
}

impl SnakeSnapshot {
    /// Scoreboard text: `NAME: SCORE PPT`, or `CRASHED` while down.
    pub fn scoreboard_line(&self) -> String {
        if self.alive {
            format!("{}: {} PPT", self.name, self.score)
        } else {
            "CRASHED".to_string()
        }
    }
}

/// Immutable state of a whole match after an advance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchSnapshot {
    /// Simulated time since match start.
    pub elapsed_ms: u64,
    pub snakes: Vec<SnakeSnapshot>,
    pub food: Vector2,
}

/// Anything that presents match snapshots.
pub trait Renderer {
    type Error;

    fn draw(&mut self, snapshot: &MatchSnapshot) -> Result<(), Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snake(alive: bool) -> SnakeSnapshot {
        SnakeSnapshot {
            id: 0,
            name: "Ada".to_string(),
            color: SnakeColor::Red,
            segments: vec![Vector2::new(1.0, 2.0)],
            alive,
            score: 15,
            speed: 15,
        }
    }

    #[test]
    fn test_scoreboard_line() {
        assert_eq!(snake(true).scoreboard_line(), "Ada: 15 PPT");
        assert_eq!(snake(false).scoreboard_line(), "CRASHED");
    }

    #[test]
    fn test_snapshot_serializes_to_json() {
        let snapshot = MatchSnapshot {
            elapsed_ms: 800,
            snakes: vec![snake(true)],
            food: Vector2::new(3.0, 4.0),
        };
        let json: serde_json::Value = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["elapsed_ms"], 800);
        assert_eq!(json["food"]["x"], 3.0);
        assert_eq!(json["snakes"][0]["name"], "Ada");
        assert_eq!(json["snakes"][0]["color"], "red");
        assert_eq!(json["snakes"][0]["segments"][0]["y"], 2.0);
    }
}
