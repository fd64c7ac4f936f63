use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use snake_rush::app::SnakeApp;
use snake_rush::config::{self, GameConfig};
use tracing_subscriber::EnvFilter;

/// Terminal snake with timed, multi-colored food.
#[derive(Debug, Parser)]
#[command(name = "snake_rush", version)]
struct Args {
    /// Playfield width in game units.
    #[arg(long, default_value_t = config::DEFAULT_WIDTH)]
    width: i32,
    /// Playfield height in game units.
    #[arg(long, default_value_t = config::DEFAULT_HEIGHT)]
    height: i32,
    /// Edge length of one snake segment or food item. Each one is drawn as a single character,
    /// so the defaults need a 44x35 terminal; use 23 or more to fit an 80x24 one.
    #[arg(long, default_value_t = config::DEFAULT_ITEM_SIZE)]
    item_size: i32,
    /// Maximum number of food items on the field at once.
    #[arg(long, default_value_t = config::DEFAULT_MAX_FOODS)]
    max_foods: usize,
    /// Milliseconds between food spawn attempts.
    #[arg(
        long = "spawn-period-ms",
        value_name = "MILLISECONDS",
        default_value_t = config::DEFAULT_SPAWN_PERIOD.as_millis() as u64,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    spawn_period_ms: u64,
    /// Rendered frames per second.
    #[arg(long, default_value_t = config::DEFAULT_FPS, value_parser = clap::value_parser!(u32).range(1..=240))]
    fps: u32,
    /// Frames between snake moves at the start. Smaller values make the snake faster.
    #[arg(long, default_value_t = config::DEFAULT_INITIAL_SPEED)]
    initial_speed: u32,
    /// Seed for food placement and score bonuses.
    #[arg(long)]
    seed: Option<u64>,
    /// Write logs here instead of stderr.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

impl Args {
    fn to_config(&self) -> GameConfig {
        GameConfig {
            width: self.width,
            height: self.height,
            item_size: self.item_size,
            max_foods: self.max_foods,
            spawn_period: Duration::from_millis(self.spawn_period_ms),
            initial_speed: self.initial_speed,
            frame_interval: Duration::from_secs(1) / self.fps,
            seed: self.seed,
            ..GameConfig::default()
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log_file.as_ref())?;

    let score = SnakeApp::new(args.to_config())?.run()?;
    println!("{}", score);
    Ok(())
}

fn init_tracing(log_file: Option<&PathBuf>) -> Result<()> {
    let builder = tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env());

    match log_file {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("failed to create log file {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    }
    .map_err(anyhow::Error::msg)
    .context("failed to install tracing subscriber")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_subscriber_install_is_reported() {
        assert!(init_tracing(None).is_ok());
        assert!(init_tracing(None).is_err());
    }
}
