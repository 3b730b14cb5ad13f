//! Snake Duel - a two-player snake match on a wrapping field.
//!
//! The simulation lives in [`sim`] and never touches a terminal; the binary
//! drives it through [`sim::MatchController::advance`] and draws snapshots
//! with a [`sim::Renderer`].

pub mod build_info;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod input;
pub mod logging;
pub mod sim;
pub mod ui;
pub mod web;

pub use config::{MatchConfig, PlayerConfig, SnakeColor};
pub use error::{ConfigError, MatchError};
pub use sim::{Direction, MatchController, MatchEvent, MatchSnapshot, PlayerId, Renderer, Vector2};
