//! Headless scripted play
//!
//! Replays a fixed list of moves against the engine, one tick per move,
//! and prints what happened. Useful for checking the engine without a
//! terminal UI and for reproducing a run from a seed.
//!
//! # Example
//!
//! ```rust
//! use snake_arcade::game::GameConfig;
//! use snake_arcade::modes::{DemoConfig, DemoMode};
//!
//! let config = DemoConfig::new(GameConfig::default().with_seed(1));
//! let mut demo = DemoMode::new(config).unwrap();
//! let summary = demo.play_game();
//! assert!(summary.moves_played <= 7);
//! ```

use anyhow::{Context, Result};
use tracing::info;

use crate::game::{Direction, GameConfig, GameEngine, GameSnapshot};

/// Move list used when none is given
pub const DEFAULT_SCRIPT: [Direction; 7] = [
    Direction::Right,
    Direction::Right,
    Direction::Down,
    Direction::Left,
    Direction::Left,
    Direction::Up,
    Direction::Right,
];

/// Configuration for demo mode
#[derive(Debug, Clone)]
pub struct DemoConfig {
    /// Number of games to play back to back
    pub games: usize,

    /// Moves fed to the engine, one per tick
    pub script: Vec<Direction>,

    /// Print the final snapshot of the last game as JSON
    pub emit_json: bool,

    /// Game configuration (grid size, food bounds, seed)
    pub game_config: GameConfig,
}

impl DemoConfig {
    pub fn new(game_config: GameConfig) -> Self {
        Self {
            games: 1,
            script: DEFAULT_SCRIPT.to_vec(),
            emit_json: false,
            game_config,
        }
    }
}

/// One move of a scripted game
#[derive(Debug, Clone, PartialEq)]
pub struct MoveReport {
    pub direction: Direction,
    /// False when the move was rejected as a reversal
    pub accepted: bool,
    pub food_eaten: bool,
    pub game_ended: bool,
    pub score: u32,
}

/// Outcome of one scripted game
#[derive(Debug, Clone, PartialEq)]
pub struct GameSummary {
    pub moves: Vec<MoveReport>,
    pub moves_played: usize,
    pub final_score: u32,
    pub snake_length: usize,
    pub game_over: bool,
}

pub struct DemoMode {
    engine: GameEngine,
    config: DemoConfig,
}

impl DemoMode {
    pub fn new(config: DemoConfig) -> Result<Self> {
        let engine =
            GameEngine::new(config.game_config.clone()).context("Invalid game configuration")?;
        Ok(Self { engine, config })
    }

    /// Play every configured game and print a report
    pub fn run(&mut self) -> Result<()> {
        self.print_header();

        for game in 1..=self.config.games {
            let summary = self.play_game();
            self.print_game(game, &summary);
        }

        let score = self.engine.score();
        println!("{}", "=".repeat(50));
        println!("Games played: {}", self.config.games);
        println!("High score: {}", score.high);

        if self.config.emit_json {
            let json = serde_json::to_string_pretty(&self.snapshot())
                .context("Failed to serialize final snapshot")?;
            println!("{json}");
        }

        Ok(())
    }

    /// Start a fresh game and feed it the script until it runs out or the game ends
    pub fn play_game(&mut self) -> GameSummary {
        self.engine.start_game();
        let mut moves = Vec::with_capacity(self.config.script.len());

        for &direction in &self.config.script {
            let accepted = self.engine.handle_input(direction);
            let result = self.engine.update();

            moves.push(MoveReport {
                direction,
                accepted,
                food_eaten: result.food_eaten,
                game_ended: result.game_ended,
                score: result.current_score,
            });

            if result.game_ended {
                break;
            }
        }

        let snapshot = self.engine.snapshot();
        info!(
            score = snapshot.score.current,
            length = snapshot.snake_body.len(),
            game_over = snapshot.game_over,
            "Scripted game finished"
        );

        GameSummary {
            moves_played: moves.len(),
            moves,
            final_score: snapshot.score.current,
            snake_length: snapshot.snake_body.len(),
            game_over: snapshot.game_over,
        }
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.engine.snapshot()
    }

    fn print_header(&self) {
        let snapshot = self.engine.snapshot();
        println!("{}", "=".repeat(50));
        println!("Snake - scripted demo");
        println!("{}", "=".repeat(50));
        println!("Grid: {}x{}", snapshot.grid_width, snapshot.grid_height);
        println!("Games: {}", self.config.games);
        let script: Vec<&str> = self.config.script.iter().map(|d| d.name()).collect();
        println!("Script: {}", script.join(" "));
        println!();
    }

    fn print_game(&self, game: usize, summary: &GameSummary) {
        println!("Game {game}:");
        for (i, report) in summary.moves.iter().enumerate() {
            let mut line = format!("  Move {}: {}", i + 1, report.direction.name());
            if !report.accepted {
                line.push_str(" (ignored, would reverse)");
            }
            if report.food_eaten {
                line.push_str(&format!(" - food eaten, score {}", report.score));
            }
            if report.game_ended {
                line.push_str(" - collision, game over");
            }
            println!("{line}");
        }
        println!(
            "  Final score: {}, length: {}, game over: {}",
            summary.final_score, summary.snake_length, summary.game_over
        );
        println!();
    }
}
