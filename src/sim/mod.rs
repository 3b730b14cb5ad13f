//! The simulation core: vectors, segments, food, snakes and the match
//! scheduler. Nothing in here knows about terminals or sockets.

pub mod clock;
pub mod controller;
pub mod food;
pub mod segment;
pub mod snake;
pub mod snapshot;
pub mod vector;

pub use clock::TickClock;
pub use controller::{MatchController, MatchEvent};
pub use food::Food;
pub use segment::{Positioned, Segment};
pub use snake::{LifeState, PlayerId, Snake, SnakeRules, Steer};
pub use snapshot::{MatchSnapshot, Renderer, SnakeSnapshot};
pub use vector::{Direction, Vector2};
