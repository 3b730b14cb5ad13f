//! Match configuration: rules, players and key bindings.
//!
//! Stored as JSON. Every field has a default, so a partial file (or none at
//! all) is valid.

use crate::constants::{
    DEFAULT_PLAYER_NAMES, DEFAULT_STEP, FIELD_SIZE, FOOD_PRIZE, MAX_SPEED, PLAYER_COUNT,
    REFERENCE_HEIGHT, REFERENCE_WIDTH, RESPAWN_DELAY_MS, SPEED_INCREMENT,
};
use crate::error::{ConfigError, MatchError};
use crate::sim::snake::SnakeRules;
use crate::sim::vector::{Direction, Vector2};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "config.json";

/// Display color of a snake. The head is drawn in a darker shade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnakeColor {
    Red,
    Blue,
    Green,
    Yellow,
    Magenta,
    Cyan,
}

/// Characters steering one snake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBindings {
    pub up: char,
    pub down: char,
    pub left: char,
    pub right: char,
}

impl KeyBindings {
    /// `w`/`s`/`a`/`d`
    pub fn wasd() -> Self {
        Self {
            up: 'w',
            down: 's',
            left: 'a',
            right: 'd',
        }
    }

    /// Numeric keypad layout: `8`/`5`/`4`/`6`
    pub fn numpad() -> Self {
        Self {
            up: '8',
            down: '5',
            left: '4',
            right: '6',
        }
    }

    pub fn keys(&self) -> [char; 4] {
        [self.up, self.down, self.left, self.right]
    }

    /// Map a typed character to a command. Letters match case-insensitively.
    pub fn direction_for(&self, c: char) -> Option<Direction> {
        let c = c.to_ascii_lowercase();
        if c == self.up.to_ascii_lowercase() {
            Some(Direction::Up)
        } else if c == self.down.to_ascii_lowercase() {
            Some(Direction::Down)
        } else if c == self.left.to_ascii_lowercase() {
            Some(Direction::Left)
        } else if c == self.right.to_ascii_lowercase() {
            Some(Direction::Right)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub name: String,
    pub color: SnakeColor,
    pub keys: KeyBindings,
}

/// Everything needed to build a match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Per-axis movement step.
    pub step: Vector2,
    /// Tick period at zero speed (ms); the speed cap is a tenth of it.
    pub max_speed: u32,
    pub speed_increment: u32,
    /// Score per food eaten.
    pub prize: u32,
    pub respawn_delay_ms: u64,
    pub players: Vec<PlayerConfig>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            step: Vector2::new(DEFAULT_STEP, DEFAULT_STEP),
            max_speed: MAX_SPEED,
            speed_increment: SPEED_INCREMENT,
            prize: FOOD_PRIZE,
            respawn_delay_ms: RESPAWN_DELAY_MS,
            players: vec![
                PlayerConfig {
                    name: DEFAULT_PLAYER_NAMES[0].to_string(),
                    color: SnakeColor::Red,
                    keys: KeyBindings::wasd(),
                },
                PlayerConfig {
                    name: DEFAULT_PLAYER_NAMES[1].to_string(),
                    color: SnakeColor::Blue,
                    keys: KeyBindings::numpad(),
                },
            ],
        }
    }
}

impl MatchConfig {
    /// Check every value the simulation relies on.
    pub fn validate(&self) -> Result<(), MatchError> {
        let invalid = |msg: String| Err(MatchError::Configuration(msg));

        if !self.step.is_finite() || self.step.x <= 0.0 || self.step.y <= 0.0 {
            return invalid(format!(
                "step must be positive and finite, got ({}, {})",
                self.step.x, self.step.y
            ));
        }
        if self.step.x >= FIELD_SIZE || self.step.y >= FIELD_SIZE {
            return invalid(format!(
                "step ({}, {}) must be smaller than the field",
                self.step.x, self.step.y
            ));
        }
        if self.max_speed == 0 {
            return invalid("max_speed must be positive".to_string());
        }
        if self.speed_increment > self.max_speed / 10 {
            return invalid(format!(
                "speed_increment {} exceeds the speed cap {}",
                self.speed_increment,
                self.max_speed / 10
            ));
        }
        if self.players.len() != PLAYER_COUNT {
            return invalid(format!(
                "expected {} players, got {}",
                PLAYER_COUNT,
                self.players.len()
            ));
        }

        let mut seen_keys: Vec<char> = Vec::new();
        for (i, player) in self.players.iter().enumerate() {
            if player.name.trim().is_empty() {
                return invalid(format!("player {} has an empty name", i + 1));
            }
            for key in player.keys.keys() {
                let key = key.to_ascii_lowercase();
                if seen_keys.contains(&key) {
                    return invalid(format!("key '{}' is bound more than once", key));
                }
                seen_keys.push(key);
            }
        }

        Ok(())
    }

    /// Rules shared by every snake.
    pub fn rules(&self) -> SnakeRules {
        SnakeRules {
            step: self.step,
            max_speed: self.max_speed,
            speed_increment: self.speed_increment,
            prize: self.prize,
            respawn_delay_ms: self.respawn_delay_ms,
        }
    }

    /// Replace player names, keeping colors and keys. Blank names keep the configured one.
    pub fn with_player_names<S: AsRef<str>>(mut self, names: &[S]) -> Self {
        for (player, name) in self.players.iter_mut().zip(names) {
            let name = name.as_ref().trim();
            if !name.is_empty() {
                player.name = name.to_string();
            }
        }
        self
    }

    /// Parse and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if given, otherwise the platform config file when it
    /// exists, otherwise defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match default_config_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }
}

/// `<platform config dir>/config.json`, if a home directory can be determined.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "snake-duel").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

/// Derive the per-axis step from a logical display resolution.
///
/// A 1920x1080 surface yields `(1, 2)`; narrower surfaces take larger steps so
/// a tick covers roughly the same physical distance.
pub fn step_from_resolution(width: u32, height: u32) -> Result<Vector2, MatchError> {
    if width == 0 || height == 0 {
        return Err(MatchError::Configuration(format!(
            "resolution must be non-zero, got {}x{}",
            width, height
        )));
    }
    Ok(Vector2::new(
        REFERENCE_WIDTH / f64::from(width),
        2.0 * REFERENCE_HEIGHT / f64::from(height),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = MatchConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.step, Vector2::new(1.0, 1.0));
        assert_eq!(config.max_speed, 400);
        assert_eq!(config.prize, 5);
        assert_eq!(config.players[0].name, "Player1");
        assert_eq!(config.players[1].color, SnakeColor::Blue);
    }

    #[test]
    fn test_rejects_bad_step() {
        for step in [
            Vector2::new(0.0, 1.0),
            Vector2::new(1.0, -1.0),
            Vector2::new(f64::NAN, 1.0),
            Vector2::new(1.0, f64::INFINITY),
            Vector2::new(100.0, 1.0),
        ] {
            let config = MatchConfig {
                step,
                ..Default::default()
            };
            assert!(
                matches!(config.validate(), Err(MatchError::Configuration(_))),
                "step {:?} should be rejected",
                step
            );
        }
    }

    #[test]
    fn test_rejects_zero_speed_cap() {
        let config = MatchConfig {
            max_speed: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(MatchError::Configuration(_))
        ));
    }

    #[test]
    fn test_rejects_increment_above_cap() {
        let config = MatchConfig {
            max_speed: 100,
            speed_increment: 11,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_wrong_player_count() {
        let mut config = MatchConfig::default();
        config.players.pop();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_duplicate_keys() {
        let mut config = MatchConfig::default();
        config.players[1].keys = KeyBindings::wasd();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("bound more than once"));
    }

    #[test]
    fn test_rejects_blank_name() {
        let mut config = MatchConfig::default();
        config.players[0].name = "   ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: MatchConfig =
            serde_json::from_str(r#"{ "max_speed": 300, "step": { "x": 2.0, "y": 1.0 } }"#)
                .unwrap();
        assert_eq!(config.max_speed, 300);
        assert_eq!(config.step, Vector2::new(2.0, 1.0));
        assert_eq!(config.prize, FOOD_PRIZE);
        assert_eq!(config.players.len(), 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_json_round_trip_keeps_players() {
        let config = MatchConfig::default().with_player_names(&["Ada", "Linus"]);
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"color\":\"red\""));
        let back: MatchConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_with_player_names_skips_blank() {
        let config = MatchConfig::default().with_player_names(&["", "Grace"]);
        assert_eq!(config.players[0].name, "Player1");
        assert_eq!(config.players[1].name, "Grace");
    }

    #[test]
    fn test_load_reports_missing_file() {
        let err = MatchConfig::load(Path::new("/nonexistent/snake-duel.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_load_validates_contents() {
        let path = std::env::temp_dir().join(format!(
            "snake-duel-config-test-{}.json",
            std::process::id()
        ));
        fs::write(&path, r#"{ "max_speed": 0 }"#).unwrap();
        let err = MatchConfig::load(&path).unwrap_err();
        fs::remove_file(&path).ok();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_key_bindings_case_insensitive() {
        let keys = KeyBindings::wasd();
        assert_eq!(keys.direction_for('W'), Some(Direction::Up));
        assert_eq!(keys.direction_for('d'), Some(Direction::Right));
        assert_eq!(keys.direction_for('x'), None);
        assert_eq!(KeyBindings::numpad().direction_for('5'), Some(Direction::Down));
    }

    #[test]
    fn test_step_from_resolution() {
        assert_eq!(
            step_from_resolution(1920, 1080).unwrap(),
            Vector2::new(1.0, 2.0)
        );
        assert_eq!(
            step_from_resolution(960, 2160).unwrap(),
            Vector2::new(2.0, 1.0)
        );
        assert!(step_from_resolution(0, 1080).is_err());
    }
}
