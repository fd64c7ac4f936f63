//! Simulation core for a terminal snake game with timed, multi-colored food.
//!
//! The [`game::Game`] aggregate owns the snake, the score and the tick
//! throttle. Food lives in a [`food::FoodRegistry`] shared with a background
//! [`scheduler::FoodSpawner`] thread. Frontends plug in through the
//! [`render::RenderSink`] and [`render::InputSource`] traits.

pub mod app;
pub mod collision;
pub mod color;
pub mod config;
pub mod food;
pub mod game;
pub mod render;
pub mod scheduler;
pub mod score;
pub mod snake;
pub mod term;

pub type GridInt = i32;
pub type Coords = (GridInt, GridInt);

pub use config::{ConfigError, GameConfig};
pub use food::{FoodCategory, FoodItem, FoodRegistry};
pub use game::{Game, StepReport};
pub use snake::{Direction, Segment, Snake};
