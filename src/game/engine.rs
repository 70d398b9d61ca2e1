use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{
    collision,
    config::{ConfigError, GameConfig},
    direction::Direction,
    food::{FoodItem, FoodManager},
    position::Position,
    score::{ScoreInfo, ScoreTracker},
    snake::Snake,
};

/// Lifecycle of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Freshly constructed, waiting for [`GameEngine::start_game`]
    Menu,
    Playing,
    Paused,
    GameOver,
}

/// Outcome of a single tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateResult {
    pub collision_occurred: bool,
    pub food_eaten: bool,
    pub game_ended: bool,
    pub current_score: u32,
    pub snake_length: usize,
    pub status: GameStatus,
}

/// Read-only view of everything a front end needs to draw a frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Occupied cells, head first
    pub snake_body: Vec<Position>,
    pub direction: Direction,
    pub food: Vec<FoodItem>,
    pub score: ScoreInfo,
    pub game_over: bool,
    pub paused: bool,
    pub status: GameStatus,
    pub grid_width: usize,
    pub grid_height: usize,
}

impl GameSnapshot {
    pub fn head(&self) -> Option<Position> {
        self.snake_body.first().copied()
    }

    pub fn food_at(&self, pos: Position) -> Option<&FoodItem> {
        self.food.iter().find(|item| item.position == pos)
    }
}

/// The game engine that owns the board and drives the state machine.
///
/// Not synchronised: a single owner must serialise all calls.
pub struct GameEngine {
    config: GameConfig,
    snake: Snake,
    food: FoodManager,
    score: ScoreTracker,
    status: GameStatus,
}

impl GameEngine {
    /// Build an engine in [`GameStatus::Menu`] with a populated board
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let snake = Snake::centered(
            config.grid_width,
            config.grid_height,
            config.initial_snake_length,
        );
        let mut food = FoodManager::new(
            config.grid_width,
            config.grid_height,
            config.min_food_count,
            config.max_food_count,
            rng,
        );
        food.reset(snake.body());

        Ok(Self {
            config,
            snake,
            food,
            score: ScoreTracker::new(),
            status: GameStatus::Menu,
        })
    }

    /// Start a fresh game, keeping the high score
    pub fn start_game(&mut self) {
        self.reset_board();
        self.score.reset_current_game();
        self.status = GameStatus::Playing;

        info!(
            width = self.config.grid_width,
            height = self.config.grid_height,
            food = self.food.len(),
            "Game started"
        );
    }

    /// Forget every score, including the high score, and go back to the menu
    pub fn reset_all(&mut self) {
        self.reset_board();
        self.score.reset_all();
        self.status = GameStatus::Menu;
    }

    fn reset_board(&mut self) {
        self.snake = Snake::centered(
            self.config.grid_width,
            self.config.grid_height,
            self.config.initial_snake_length,
        );
        self.food.reset(self.snake.body());
    }

    pub fn pause_game(&mut self) -> bool {
        if self.status != GameStatus::Playing {
            return false;
        }
        self.status = GameStatus::Paused;
        info!("Game paused");
        true
    }

    pub fn resume_game(&mut self) -> bool {
        if self.status != GameStatus::Paused {
            return false;
        }
        self.status = GameStatus::Playing;
        info!("Game resumed");
        true
    }

    /// Pause when playing, resume when paused
    pub fn toggle_pause(&mut self) -> bool {
        match self.status {
            GameStatus::Playing => self.pause_game(),
            GameStatus::Paused => self.resume_game(),
            GameStatus::Menu | GameStatus::GameOver => false,
        }
    }

    /// Steer the snake. Ignored unless a game is in progress.
    pub fn handle_input(&mut self, direction: Direction) -> bool {
        if self.status != GameStatus::Playing {
            return false;
        }
        self.snake.change_direction(direction)
    }

    /// Advance the simulation by one tick
    pub fn update(&mut self) -> UpdateResult {
        if self.status != GameStatus::Playing {
            return self.update_result(false, false);
        }

        // Growth is armed before moving so the length reported for this tick
        // already includes the food eaten on it
        if self.food.is_food_at(self.snake.next_head()) {
            self.snake.grow();
        }
        self.snake.advance();

        let head = self.snake.head();
        if let Some(kind) = collision::detect(
            head,
            self.snake.body(),
            self.config.grid_width,
            self.config.grid_height,
        ) {
            self.status = GameStatus::GameOver;
            info!(
                ?kind,
                score = self.score.current(),
                length = self.snake.len(),
                "Game over"
            );
            return self.update_result(true, false);
        }

        let food_eaten = match self.food.check_collision(head) {
            Some(item) => {
                let score = self.score.add_food_score();
                self.food.remove(item.position);
                self.food.update(self.snake.body());
                debug!(x = head.x, y = head.y, score, "Food eaten");
                true
            }
            None => false,
        };

        self.update_result(false, food_eaten)
    }

    fn update_result(&self, collision_occurred: bool, food_eaten: bool) -> UpdateResult {
        UpdateResult {
            collision_occurred,
            food_eaten,
            game_ended: collision_occurred,
            current_score: self.score.current(),
            snake_length: self.snake.len(),
            status: self.status,
        }
    }

    /// Full read-only state of the game
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            snake_body: self.snake.body().to_vec(),
            direction: self.snake.direction(),
            food: self.food.items().to_vec(),
            score: self.score.info(),
            game_over: self.is_game_over(),
            paused: self.is_paused(),
            status: self.status,
            grid_width: self.config.grid_width,
            grid_height: self.config.grid_height,
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_playing(&self) -> bool {
        self.status == GameStatus::Playing
    }

    pub fn is_paused(&self) -> bool {
        self.status == GameStatus::Paused
    }

    pub fn is_game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    pub fn score(&self) -> ScoreInfo {
        self.score.info()
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(config: GameConfig) -> GameEngine {
        GameEngine::new(config.with_seed(7)).unwrap()
    }

    fn playing(config: GameConfig) -> GameEngine {
        let mut engine = engine(config);
        engine.start_game();
        engine
    }

    /// Replace the food with a single item at `pos`
    fn place_food(engine: &mut GameEngine, pos: Position) {
        let (width, height) = (engine.config.grid_width, engine.config.grid_height);
        let mut food = FoodManager::new(width, height, 1, 1, StdRng::seed_from_u64(1));

        // Every cell except `pos` is blocked, so the only spawn lands there
        let blocked: Vec<Position> = (0..height as i32)
            .flat_map(|y| (0..width as i32).map(move |x| Position::new(x, y)))
            .filter(|&p| p != pos)
            .collect();
        food.spawn(&blocked);
        engine.food = food;
    }

    #[test]
    fn test_new_engine_waits_in_menu() {
        let mut engine = engine(GameConfig::default());
        let snapshot = engine.snapshot();

        assert_eq!(snapshot.status, GameStatus::Menu);
        assert_eq!(snapshot.snake_body.len(), 3);
        assert!((2..=3).contains(&snapshot.food.len()));

        assert!(!engine.handle_input(Direction::Down));
        let result = engine.update();
        assert!(!result.collision_occurred && !result.food_eaten && !result.game_ended);
        assert_eq!(engine.snapshot(), snapshot);
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(GameEngine::new(GameConfig::new(0, 0)).is_err());
        assert!(GameEngine::new(GameConfig::new(5_000_000_000, 5_000_000_000)).is_err());
    }

    #[test]
    fn test_start_game() {
        let engine = playing(GameConfig::default());
        let snapshot = engine.snapshot();

        assert_eq!(snapshot.status, GameStatus::Playing);
        assert_eq!(snapshot.head(), Some(Position::new(10, 7)));
        assert_eq!(snapshot.direction, Direction::Right);
        assert_eq!(snapshot.score, ScoreInfo::default());
        assert_eq!((snapshot.grid_width, snapshot.grid_height), (20, 15));
        for item in &snapshot.food {
            assert!(!snapshot.snake_body.contains(&item.position));
        }
    }

    #[test]
    fn test_basic_movement() {
        let mut engine = playing(GameConfig::small());
        place_food(&mut engine, Position::new(0, 0));
        let initial_head = engine.snake().head();

        let result = engine.update();

        assert!(!result.game_ended);
        assert!(!result.food_eaten);
        assert_eq!(result.snake_length, 3);
        assert_eq!(engine.snake().head(), initial_head.moved_in_direction(Direction::Right));
    }

    #[test]
    fn test_food_consumption() {
        let mut engine = playing(GameConfig::small());
        let ahead = engine.snake().next_head();
        place_food(&mut engine, ahead);

        let result = engine.update();

        assert!(result.food_eaten);
        assert_eq!(result.current_score, 10);
        assert_eq!(result.snake_length, 4);
        assert_eq!(engine.score(), ScoreInfo { current: 10, high: 10, food_eaten: 1 });
        // Replenished, and not under the snake
        assert_eq!(engine.food.len(), 1);
        assert!(!engine.snake().occupies(engine.food.items()[0].position));
    }

    #[test]
    fn test_wall_collision() {
        let mut engine = playing(GameConfig::small());
        place_food(&mut engine, Position::new(0, 0));

        // Head starts at (5,5) heading right; (9,5) is the last column
        let mut result = engine.update();
        for _ in 0..4 {
            assert!(!result.game_ended);
            result = engine.update();
        }

        assert!(result.collision_occurred);
        assert!(result.game_ended);
        assert_eq!(result.status, GameStatus::GameOver);
        assert!(engine.is_game_over());
    }

    #[test]
    fn test_self_collision() {
        let mut config = GameConfig::small();
        config.initial_snake_length = 5;
        let mut engine = playing(config);
        place_food(&mut engine, Position::new(0, 0));

        engine.handle_input(Direction::Down);
        assert!(!engine.update().game_ended);
        engine.handle_input(Direction::Left);
        assert!(!engine.update().game_ended);
        engine.handle_input(Direction::Up);
        let result = engine.update();

        assert!(result.collision_occurred);
        assert!(engine.is_game_over());
    }

    #[test]
    fn test_prevent_180_degree_turn() {
        let mut engine = playing(GameConfig::small());

        assert!(!engine.handle_input(Direction::Left));
        assert_eq!(engine.snapshot().direction, Direction::Right);
        assert!(engine.handle_input(Direction::Up));
        assert!(engine.handle_input(Direction::Right));
    }

    #[test]
    fn test_game_over_freezes_board() {
        let mut engine = playing(GameConfig::small());
        place_food(&mut engine, Position::new(0, 0));
        while !engine.update().game_ended {}

        let snapshot = engine.snapshot();
        assert!(snapshot.game_over);
        assert!(!engine.handle_input(Direction::Up));
        assert!(!engine.update().game_ended);
        assert_eq!(engine.snapshot(), snapshot);
    }

    #[test]
    fn test_restart_after_game_over_keeps_high_score() {
        let mut engine = playing(GameConfig::small());
        let ahead = engine.snake().next_head();
        place_food(&mut engine, ahead);
        engine.update();
        while !engine.update().game_ended {}
        let high = engine.score().high;
        assert!(high >= 10);

        engine.start_game();
        let snapshot = engine.snapshot();
        assert_eq!(snapshot.status, GameStatus::Playing);
        assert_eq!(snapshot.snake_body.len(), 3);
        assert_eq!(snapshot.score, ScoreInfo { current: 0, high, food_eaten: 0 });

        engine.reset_all();
        assert_eq!(engine.status(), GameStatus::Menu);
        assert_eq!(engine.score(), ScoreInfo::default());
    }

    #[test]
    fn test_pause_and_resume() {
        let mut engine = playing(GameConfig::default());

        assert!(!engine.resume_game());
        assert!(engine.pause_game());
        assert!(engine.is_paused());
        assert!(!engine.pause_game());

        let snapshot = engine.snapshot();
        assert!(snapshot.paused);
        for _ in 0..5 {
            let result = engine.update();
            assert_eq!(result.status, GameStatus::Paused);
        }
        assert!(!engine.handle_input(Direction::Up));
        assert_eq!(engine.snapshot(), snapshot);

        assert!(engine.resume_game());
        assert!(engine.is_playing());
        engine.update();
        assert_ne!(engine.snapshot().snake_body, snapshot.snake_body);
    }

    #[test]
    fn test_toggle_pause() {
        let mut engine = engine(GameConfig::default());
        assert!(!engine.toggle_pause());

        engine.start_game();
        assert!(engine.toggle_pause());
        assert_eq!(engine.status(), GameStatus::Paused);
        assert!(engine.toggle_pause());
        assert_eq!(engine.status(), GameStatus::Playing);
    }

    #[test]
    fn test_snapshot_is_idempotent() {
        let mut engine = playing(GameConfig::default());
        engine.update();

        let first = engine.snapshot();
        let second = engine.snapshot();
        assert_eq!(first, second);
    }

    const SCRIPT: [Direction; 8] = [
        Direction::Right,
        Direction::Right,
        Direction::Down,
        Direction::Down,
        Direction::Left,
        Direction::Left,
        Direction::Up,
        Direction::Up,
    ];

    #[test]
    fn test_scripted_path_eats_food_on_route() {
        let mut engine = playing(GameConfig::new(20, 15));
        // Third move turns down from (12,7) onto (12,8)
        place_food(&mut engine, Position::new(12, 8));

        let mut first_meal = None;
        let mut score = 0;
        for (step, dir) in SCRIPT.into_iter().enumerate() {
            engine.handle_input(dir);
            let result = engine.update();
            assert!(!result.game_ended);

            if result.food_eaten {
                first_meal.get_or_insert(step);
                assert_eq!(result.current_score, score + 10);
                score = result.current_score;
            }
            assert_eq!(result.snake_length, 3 + engine.score().food_eaten as usize);
        }

        assert_eq!(first_meal, Some(2));
        assert_eq!(engine.snake().head(), Position::new(10, 7));
    }

    #[test]
    fn test_scripted_path_length_tracks_food_eaten() {
        for seed in 0..50 {
            let mut engine = GameEngine::new(GameConfig::new(20, 15).with_seed(seed)).unwrap();
            engine.start_game();
            let mut score = 0;

            for dir in SCRIPT {
                engine.handle_input(dir);
                let food_before = engine.snapshot().food;
                let result = engine.update();

                if result.game_ended {
                    assert!(result.collision_occurred);
                    break;
                }

                if result.food_eaten {
                    let head = engine.snake().head();
                    assert!(food_before.iter().any(|item| item.position == head));
                    assert_eq!(result.current_score, score + 10);
                    score = result.current_score;
                } else {
                    assert_eq!(result.current_score, score);
                }

                let eaten = engine.score().food_eaten as usize;
                assert_eq!(result.snake_length, 3 + eaten, "seed {seed}");
            }
        }
    }

    #[test]
    fn test_scripted_path_hits_wall_on_narrow_grid() {
        // Head starts at (2,2) on a 4x4 board, two moves right leave the grid
        let mut config = GameConfig::new(4, 4);
        config.min_food_count = 1;
        config.max_food_count = 1;
        let mut engine = playing(config);
        place_food(&mut engine, Position::new(0, 0));

        engine.handle_input(Direction::Right);
        assert!(!engine.update().game_ended);
        engine.handle_input(Direction::Right);
        let result = engine.update();

        assert!(result.game_ended);
        assert_eq!(result.snake_length, 3);
    }
}
