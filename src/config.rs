//! Tunables for a single game instance.

use std::ops::Range;
use std::time::Duration;

use thiserror::Error;

use crate::{Coords, GridInt};

pub const DEFAULT_WIDTH: GridInt = 640;
pub const DEFAULT_HEIGHT: GridInt = 480;
pub const DEFAULT_ITEM_SIZE: GridInt = 15;
pub const DEFAULT_MAX_FOODS: usize = 3;
pub const DEFAULT_SPAWN_PERIOD: Duration = Duration::from_secs(3);
pub const DEFAULT_INITIAL_LENGTH: usize = 2;
pub const DEFAULT_INITIAL_SPEED: u32 = 10;
pub const DEFAULT_SPEED_THRESHOLD: u32 = 6;
pub const DEFAULT_FPS: u32 = 60;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("item size must be positive, got {0}")]
    ItemSize(GridInt),
    #[error("playfield {width}x{height} cannot hold a snake of length {needed} cells")]
    PlayfieldTooSmall { width: GridInt, height: GridInt, needed: usize },
    #[error("at least one food item must be allowed on the field")]
    NoFoodCapacity,
    #[error("food lifetime range {min:?}..{max:?} is empty")]
    EmptyLifetime { min: Duration, max: Duration },
    #[error("spawn period must be non-zero")]
    ZeroSpawnPeriod,
    #[error("frame interval must be non-zero")]
    ZeroFrameInterval,
    #[error("initial speed must be at least one frame")]
    ZeroSpeed,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub width: GridInt,
    pub height: GridInt,
    pub item_size: GridInt,
    pub max_foods: usize,
    pub spawn_period: Duration,
    pub food_lifetime: Range<Duration>,
    pub initial_length: usize,
    /// Frames between two simulation steps at game start.
    pub initial_speed: u32,
    /// At or below this speed, eating slows the snake down instead of speeding it up.
    pub speed_threshold: u32,
    pub frame_interval: Duration,
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            item_size: DEFAULT_ITEM_SIZE,
            max_foods: DEFAULT_MAX_FOODS,
            spawn_period: DEFAULT_SPAWN_PERIOD,
            food_lifetime: Duration::from_secs(5)..Duration::from_secs(15),
            initial_length: DEFAULT_INITIAL_LENGTH,
            initial_speed: DEFAULT_INITIAL_SPEED,
            speed_threshold: DEFAULT_SPEED_THRESHOLD,
            frame_interval: Duration::from_secs(1) / DEFAULT_FPS,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.item_size <= 0 {
            return Err(ConfigError::ItemSize(self.item_size));
        }

        // Head plus body laid out along the X axis from the center
        let needed = self.initial_length + 1;
        let (cols, rows) = self.grid_cells();
        if cols < 2 * needed as GridInt || rows < 1 {
            return Err(ConfigError::PlayfieldTooSmall { width: self.width, height: self.height, needed });
        }

        if self.max_foods == 0 {
            return Err(ConfigError::NoFoodCapacity);
        }
        if self.food_lifetime.start >= self.food_lifetime.end {
            return Err(ConfigError::EmptyLifetime { min: self.food_lifetime.start, max: self.food_lifetime.end });
        }
        if self.spawn_period.is_zero() {
            return Err(ConfigError::ZeroSpawnPeriod);
        }
        if self.frame_interval.is_zero() {
            return Err(ConfigError::ZeroFrameInterval);
        }
        if self.initial_speed == 0 {
            return Err(ConfigError::ZeroSpeed);
        }

        Ok(())
    }

    /// Number of whole item-size cells along each axis.
    pub fn grid_cells(&self) -> (GridInt, GridInt) {
        if self.item_size <= 0 {
            return (0, 0);
        }
        (self.width / self.item_size, self.height / self.item_size)
    }

    /// The playfield center snapped down onto the grid.
    pub fn center(&self) -> Coords {
        let snap = |v: GridInt| (v / 2) / self.item_size * self.item_size;
        (snap(self.width), snap(self.height))
    }
}
