use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Largest accepted grid side, in cells
pub const MAX_GRID_SIDE: usize = 1000;

/// Reasons a [`GameConfig`] cannot be used
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("grid must be at least 1x1, got {width}x{height}")]
    EmptyGrid { width: usize, height: usize },

    #[error("grid sides may not exceed {MAX_GRID_SIDE} cells, got {width}x{height}")]
    GridTooLarge { width: usize, height: usize },

    #[error("snake of length {length} does not fit a grid {width} cells wide")]
    SnakeTooLong { length: usize, width: usize },

    #[error("food count bounds must satisfy 1 <= min <= max, got min={min} max={max}")]
    FoodBounds { min: usize, max: usize },

    #[error("tick interval must be positive")]
    ZeroTick,

    #[error("failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config")]
    Parse(#[from] toml::de::Error),
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// Fewest food items kept on the board
    pub min_food_count: usize,
    /// Most food items kept on the board
    pub max_food_count: usize,
    /// Time between ticks for real-time front ends
    pub tick_interval_ms: u64,
    /// Fixed RNG seed; random when absent
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 20,
            grid_height: 15,
            initial_snake_length: 3,
            min_food_count: 2,
            max_food_count: 3,
            tick_interval_ms: 300,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Create a large grid
    pub fn large() -> Self {
        Self::new(30, 30)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check that a game can be built from this configuration.
    ///
    /// The snake starts centered and extends to the left, so its length may
    /// not exceed `grid_width / 2 + 1`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(ConfigError::EmptyGrid {
                width: self.grid_width,
                height: self.grid_height,
            });
        }

        if self.grid_width > MAX_GRID_SIDE || self.grid_height > MAX_GRID_SIDE {
            return Err(ConfigError::GridTooLarge {
                width: self.grid_width,
                height: self.grid_height,
            });
        }

        let max_length = self.grid_width / 2 + 1;
        if self.initial_snake_length == 0 || self.initial_snake_length > max_length {
            return Err(ConfigError::SnakeTooLong {
                length: self.initial_snake_length,
                width: self.grid_width,
            });
        }

        if self.min_food_count == 0 || self.min_food_count > self.max_food_count {
            return Err(ConfigError::FoodBounds {
                min: self.min_food_count,
                max: self.max_food_count,
            });
        }

        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTick);
        }

        Ok(())
    }

    /// Parse a TOML document; missing keys take their default values
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_width, 20);
        assert_eq!(config.grid_height, 15);
        assert_eq!(config.initial_snake_length, 3);
        assert_eq!((config.min_food_count, config.max_food_count), (2, 3));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(15, 12);
        assert_eq!(config.grid_width, 15);
        assert_eq!(config.grid_height, 12);
        assert!(GameConfig::small().validate().is_ok());
        assert!(GameConfig::large().validate().is_ok());
    }

    #[test]
    fn test_rejects_empty_grid() {
        let config = GameConfig::new(0, 10);
        assert!(matches!(config.validate(), Err(ConfigError::EmptyGrid { .. })));
    }

    #[test]
    fn test_rejects_oversized_grid() {
        assert!(GameConfig::new(MAX_GRID_SIDE, MAX_GRID_SIDE).validate().is_ok());

        let config = GameConfig::new(MAX_GRID_SIDE + 1, 10);
        assert!(matches!(config.validate(), Err(ConfigError::GridTooLarge { .. })));

        let config = GameConfig::new(5_000_000_000, 5_000_000_000);
        assert!(matches!(config.validate(), Err(ConfigError::GridTooLarge { .. })));
    }

    #[test]
    fn test_snake_must_fit() {
        let mut config = GameConfig::new(4, 4);
        config.initial_snake_length = 3;
        assert!(config.validate().is_ok());

        config.initial_snake_length = 4;
        assert!(matches!(config.validate(), Err(ConfigError::SnakeTooLong { .. })));

        config.initial_snake_length = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_food_bounds() {
        let mut config = GameConfig::default();
        config.min_food_count = 4;
        assert!(matches!(config.validate(), Err(ConfigError::FoodBounds { min: 4, max: 3 })));

        config.min_food_count = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_tick_rejected() {
        let mut config = GameConfig::default();
        config.tick_interval_ms = 0;
        assert!(matches!(config.validate(), Err(ConfigError::ZeroTick)));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = GameConfig::from_toml_str("grid_width = 30\nseed = 42\n").unwrap();
        assert_eq!(config.grid_width, 30);
        assert_eq!(config.grid_height, 15);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_malformed_toml() {
        let result = GameConfig::from_toml_str("grid_width = \"wide\"");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "grid_height = 12\nmax_food_count = 5").unwrap();

        let config = GameConfig::from_toml_file(file.path()).unwrap();
        assert_eq!(config.grid_height, 12);
        assert_eq!(config.max_food_count, 5);

        let missing = GameConfig::from_toml_file(Path::new("/nonexistent/snake.toml"));
        assert!(matches!(missing, Err(ConfigError::Read { .. })));
    }
}
