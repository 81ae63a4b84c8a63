use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use snake_arcade::game::{GameConfig, GameEngine, GameMode, GameSession};
use snake_arcade::modes::{PlayMode, WatchMode};
use snake_arcade::scoring::LocalScoreBoard;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "snake_arcade")]
#[command(version, about = "Terminal Snake with walls and pass-through modes")]
struct Cli {
    /// Play yourself, or watch the autoplay demo
    #[arg(long, value_enum, default_value = "play")]
    mode: Mode,

    /// Board topology for the first game
    #[arg(long, value_enum, default_value = "walls")]
    topology: GameMode,

    /// TOML file with game settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid side length (overrides the config file)
    #[arg(long)]
    grid_size: Option<usize>,

    /// Seed for food placement and autoplay, for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (the terminal is taken by the game)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Play snake with keyboard controls
    Play,
    /// Watch the autoplay controller
    Watch,
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };

    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {:?}", path))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

fn load_config(cli: &Cli) -> Result<GameConfig> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {:?}", path))?,
        None => GameConfig::default(),
    };

    if let Some(grid_size) = cli.grid_size {
        config.grid_size = grid_size;
    }

    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.log_file.as_deref())?;

    let config = load_config(&cli)?;
    let engine = match cli.seed {
        Some(seed) => GameEngine::with_seed(config, seed),
        None => GameEngine::new(config),
    }
    .context("Invalid game configuration")?;

    tracing::info!(topology = %cli.topology, seed = ?cli.seed, "Starting snake_arcade");

    let session = GameSession::new(engine, cli.topology);

    match cli.mode {
        Mode::Play => {
            let mut play_mode = PlayMode::new(session, LocalScoreBoard::new());
            play_mode.run().await?;
        }
        Mode::Watch => {
            let mut watch_mode = WatchMode::new(session);
            watch_mode.run().await?;
        }
    }

    Ok(())
}
