use serde::{Deserialize, Serialize};

/// Points awarded for each food item eaten
pub const FOOD_SCORE: u32 = 10;

/// Score counters as seen by front ends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreInfo {
    pub current: u32,
    pub high: u32,
    pub food_eaten: u32,
}

/// Running score plus the best score across games
#[derive(Debug, Clone, Default)]
pub struct ScoreTracker {
    current: u32,
    high: u32,
    food_eaten: u32,
}

impl ScoreTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit one food item and return the new current score
    pub fn add_food_score(&mut self) -> u32 {
        self.current += FOOD_SCORE;
        self.food_eaten += 1;
        self.high = self.high.max(self.current);
        self.current
    }

    /// Start a new game; the high score survives
    pub fn reset_current_game(&mut self) {
        self.current = 0;
        self.food_eaten = 0;
    }

    pub fn reset_all(&mut self) {
        *self = Self::default();
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn high(&self) -> u32 {
        self.high
    }

    pub fn food_eaten(&self) -> u32 {
        self.food_eaten
    }

    pub fn info(&self) -> ScoreInfo {
        ScoreInfo {
            current: self.current,
            high: self.high,
            food_eaten: self.food_eaten,
        }
    }
}
