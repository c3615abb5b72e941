//! The immutable game configuration record, loadable from TOML.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when a configuration record fails to parse or validate.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("maze size must be at least 1")]
    InvalidMazeSize,

    #[error("room size must be positive, got {0}")]
    InvalidRoomSize(f32),

    #[error("minimum puzzle separation must not be negative, got {0}")]
    NegativeSeparation(f32),

    #[error("base solve time must be positive, got {0}")]
    InvalidSolveTime(f32),

    #[error("max attempts must be at least 1")]
    InvalidMaxAttempts,

    #[error("difficulty factor must be positive, got {0}")]
    InvalidDifficultyFactor(f32),

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Everything the core needs to generate a level and run puzzle sessions,
/// supplied once and treated as immutable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Grid dimension N; the level holds NxN rooms.
    pub maze_size: u32,

    /// World-space footprint of one room, used to map positions to cells.
    pub room_size: f32,

    /// How many puzzle rooms to request per level.
    pub puzzles_per_level: u32,

    /// Minimum pairwise distance between puzzle rooms, in cell units.
    pub min_puzzle_separation: f32,

    /// Solve timer baseline in seconds, before difficulty scaling.
    pub base_solve_time: f32,

    /// Solution attempts granted per puzzle.
    pub max_attempts: u32,

    /// Whether solve time scales with the current level.
    pub adaptive_difficulty: bool,

    /// Difficulty scaling factor applied on top of level progression.
    pub difficulty_factor: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            maze_size: 5,
            room_size: 10.0,
            puzzles_per_level: 3,
            min_puzzle_separation: 15.0,
            base_solve_time: 30.0,
            max_attempts: 3,
            adaptive_difficulty: true,
            difficulty_factor: 1.2,
        }
    }
}

impl GameConfig {
    /// Parse and validate a configuration from TOML text. Absent keys take
    /// their default values.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every field against its allowed range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.maze_size == 0 {
            return Err(ConfigError::InvalidMazeSize);
        }
        if self.room_size <= 0.0 {
            return Err(ConfigError::InvalidRoomSize(self.room_size));
        }
        if self.min_puzzle_separation < 0.0 {
            return Err(ConfigError::NegativeSeparation(self.min_puzzle_separation));
        }
        if self.base_solve_time <= 0.0 {
            return Err(ConfigError::InvalidSolveTime(self.base_solve_time));
        }
        if self.max_attempts == 0 {
            return Err(ConfigError::InvalidMaxAttempts);
        }
        if self.difficulty_factor <= 0.0 {
            return Err(ConfigError::InvalidDifficultyFactor(self.difficulty_factor));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn test_from_toml() {
        let config = GameConfig::from_toml_str(
            r#"
            maze_size = 7
            puzzles_per_level = 4
            min_puzzle_separation = 2.0
            base_solve_time = 45.0
            adaptive_difficulty = false
            "#,
        )
        .unwrap();

        assert_eq!(config.maze_size, 7);
        assert_eq!(config.puzzles_per_level, 4);
        assert!((config.min_puzzle_separation - 2.0).abs() < 0.001);
        assert!((config.base_solve_time - 45.0).abs() < 0.001);
        assert!(!config.adaptive_difficulty);
        // Unspecified keys fall back to defaults.
        assert_eq!(config.max_attempts, 3);
        assert!((config.room_size - 10.0).abs() < 0.001);
    }

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config = GameConfig::from_toml_str("").unwrap();
        assert_eq!(config.maze_size, 5);
        assert_eq!(config.puzzles_per_level, 3);
    }

    #[test]
    fn test_invalid_fields_rejected() {
        assert!(matches!(
            GameConfig::from_toml_str("maze_size = 0"),
            Err(ConfigError::InvalidMazeSize)
        ));
        assert!(matches!(
            GameConfig::from_toml_str("room_size = 0.0"),
            Err(ConfigError::InvalidRoomSize(_))
        ));
        assert!(matches!(
            GameConfig::from_toml_str("min_puzzle_separation = -3.0"),
            Err(ConfigError::NegativeSeparation(_))
        ));
        assert!(matches!(
            GameConfig::from_toml_str("base_solve_time = -1.0"),
            Err(ConfigError::InvalidSolveTime(_))
        ));
        assert!(matches!(
            GameConfig::from_toml_str("max_attempts = 0"),
            Err(ConfigError::InvalidMaxAttempts)
        ));
        assert!(matches!(
            GameConfig::from_toml_str("difficulty_factor = 0.0"),
            Err(ConfigError::InvalidDifficultyFactor(_))
        ));
    }

    #[test]
    fn test_malformed_toml_is_a_parse_error() {
        assert!(matches!(
            GameConfig::from_toml_str("maze_size = \"five\""),
            Err(ConfigError::Parse(_))
        ));
    }
}
