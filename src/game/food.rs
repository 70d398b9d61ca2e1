use rand::{Rng, rngs::StdRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{collision::food_collision, position::Position};

/// Display color of a food item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FoodColor {
    Red,
    Orange,
    Yellow,
    Pink,
    Violet,
}

impl FoodColor {
    pub const ALL: [FoodColor; 5] = [
        FoodColor::Red,
        FoodColor::Orange,
        FoodColor::Yellow,
        FoodColor::Pink,
        FoodColor::Violet,
    ];

    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            FoodColor::Red => (255, 0, 0),
            FoodColor::Orange => (255, 165, 0),
            FoodColor::Yellow => (255, 255, 0),
            FoodColor::Pink => (255, 20, 147),
            FoodColor::Violet => (138, 43, 226),
        }
    }
}

/// A piece of food on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodItem {
    pub position: Position,
    pub color: FoodColor,
}

/// Keeps between `min_count` and `max_count` food items on the board
#[derive(Debug, Clone)]
pub struct FoodManager {
    grid_width: usize,
    grid_height: usize,
    min_count: usize,
    max_count: usize,
    target_count: usize,
    items: Vec<FoodItem>,
    rng: StdRng,
}

impl FoodManager {
    /// Create an empty manager; call [`FoodManager::reset`] to populate it.
    ///
    /// `max_count` below `min_count` is raised to `min_count`.
    pub fn new(
        grid_width: usize,
        grid_height: usize,
        min_count: usize,
        max_count: usize,
        rng: StdRng,
    ) -> Self {
        Self {
            grid_width,
            grid_height,
            min_count,
            max_count: max_count.max(min_count),
            target_count: min_count,
            items: Vec::new(),
            rng,
        }
    }

    /// Clear the board, roll a new target count and fill up to it
    pub fn reset(&mut self, snake_body: &[Position]) {
        self.items.clear();
        self.target_count = self.rng.gen_range(self.min_count..=self.max_count);
        self.update(snake_body);
    }

    /// Spawn items until the target count is met or no free cell is left
    pub fn update(&mut self, snake_body: &[Position]) {
        while self.items.len() < self.target_count {
            if self.spawn(snake_body).is_none() {
                break;
            }
        }
    }

    /// Place one item on a free cell and return it.
    ///
    /// Tries `width * height` random cells, then scans row by row for the
    /// first free one. Returns `None` when every cell is taken.
    pub fn spawn(&mut self, snake_body: &[Position]) -> Option<FoodItem> {
        let position = self
            .random_free_cell(snake_body)
            .or_else(|| self.first_free_cell(snake_body));

        let Some(position) = position else {
            warn!("No free cell left for food");
            return None;
        };

        let color = FoodColor::ALL[self.rng.gen_range(0..FoodColor::ALL.len())];
        let item = FoodItem { position, color };
        self.items.push(item);
        debug!(x = position.x, y = position.y, ?color, "Food spawned");

        Some(item)
    }

    fn random_free_cell(&mut self, snake_body: &[Position]) -> Option<Position> {
        if self.grid_width == 0 || self.grid_height == 0 {
            return None;
        }

        let attempts = self.grid_width.saturating_mul(self.grid_height);
        for _ in 0..attempts {
            let x = self.rng.gen_range(0..self.grid_width) as i32;
            let y = self.rng.gen_range(0..self.grid_height) as i32;
            let pos = Position::new(x, y);

            if self.is_free(pos, snake_body) {
                return Some(pos);
            }
        }

        None
    }

    fn first_free_cell(&self, snake_body: &[Position]) -> Option<Position> {
        (0..self.grid_height as i32)
            .flat_map(|y| (0..self.grid_width as i32).map(move |x| Position::new(x, y)))
            .find(|&pos| self.is_free(pos, snake_body))
    }

    fn is_free(&self, pos: Position, snake_body: &[Position]) -> bool {
        !snake_body.contains(&pos) && !self.is_food_at(pos)
    }

    /// The item under `head`, if any. Does not remove it.
    pub fn check_collision(&self, head: Position) -> Option<FoodItem> {
        self.items
            .iter()
            .copied()
            .find(|item| food_collision(head, item.position))
    }

    /// Remove the item at `position`, returning it
    pub fn remove(&mut self, position: Position) -> Option<FoodItem> {
        let index = self.items.iter().position(|item| item.position == position)?;
        Some(self.items.remove(index))
    }

    pub fn is_food_at(&self, position: Position) -> bool {
        self.items.iter().any(|item| item.position == position)
    }

    pub fn items(&self) -> &[FoodItem] {
        &self.items
    }

    pub fn positions(&self) -> Vec<Position> {
        self.items.iter().map(|item| item.position).collect()
    }

    pub fn target_count(&self) -> usize {
        self.target_count
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
