//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! Front ends drive it one tick at a time and draw the snapshots it returns.

pub mod collision;
pub mod config;
pub mod direction;
pub mod engine;
pub mod food;
pub mod position;
pub mod score;
pub mod snake;

// Re-export commonly used types
pub use collision::CollisionKind;
pub use config::{ConfigError, GameConfig, MAX_GRID_SIDE};
pub use direction::Direction;
pub use engine::{GameEngine, GameSnapshot, GameStatus, UpdateResult};
pub use food::{FoodColor, FoodItem, FoodManager};
pub use position::Position;
pub use score::{FOOD_SCORE, ScoreInfo, ScoreTracker};
pub use snake::Snake;
