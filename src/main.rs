use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use snake_arcade::game::GameConfig;
use snake_arcade::modes::{DemoConfig, DemoMode, HumanMode};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "snake_arcade")]
#[command(version, about = "Grid Snake game for the terminal")]
struct Cli {
    /// Game mode
    #[arg(long, default_value = "human")]
    mode: Mode,

    /// TOML file with game settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width (overrides the config file)
    #[arg(long)]
    width: Option<usize>,

    /// Grid height (overrides the config file)
    #[arg(long)]
    height: Option<usize>,

    /// Milliseconds between game ticks in human mode
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Seed for food placement, for reproducible games
    #[arg(long)]
    seed: Option<u64>,

    /// Number of scripted games to play in demo mode
    #[arg(long, default_value = "1")]
    games: usize,

    /// Print the final game snapshot as JSON in demo mode
    #[arg(long)]
    json: bool,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Play snake with keyboard controls
    Human,
    /// Replay a scripted move list without a UI
    Demo,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_toml_file(path)
                .with_context(|| format!("Failed to load config from {:?}", path))?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.grid_width = width;
        }
        if let Some(height) = self.height {
            config.grid_height = height;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_interval_ms = tick_ms;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }
}

/// Log to a file in human mode (stderr belongs to the TUI), to stderr otherwise
fn init_logging(mode: &Mode) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match mode {
        Mode::Human => {
            let log_path = std::env::temp_dir().join("snake_arcade.log");
            // No log file, no logging: writing to stderr would corrupt the screen
            if let Ok(file) = std::fs::File::create(&log_path) {
                tracing_subscriber::fmt()
                    .with_env_filter(filter)
                    .with_writer(std::sync::Mutex::new(file))
                    .with_ansi(false)
                    .init();
            }
        }
        Mode::Demo => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .init(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.mode);

    let config = cli.game_config()?;
    tracing::info!(
        width = config.grid_width,
        height = config.grid_height,
        seed = ?config.seed,
        "Configuration loaded"
    );

    match cli.mode {
        Mode::Human => {
            let mut human_mode = HumanMode::new(config)?;
            human_mode.run().await?;
        }
        Mode::Demo => {
            let mut demo_config = DemoConfig::new(config);
            demo_config.games = cli.games;
            demo_config.emit_json = cli.json;

            let mut demo_mode = DemoMode::new(demo_config)?;
            demo_mode.run()?;
        }
    }

    Ok(())
}
