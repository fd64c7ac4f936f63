use std::sync::Arc;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::collision::{out_of_bounds, overlaps};
use crate::config::GameConfig;
use crate::food::{FoodItem, FoodRegistry};
use crate::render::{pick_intent, FrameSnapshot};
use crate::scheduler::TickThrottle;
use crate::score::ScoreState;
use crate::snake::{Direction, Snake};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Crash {
    SelfCollision,
    Wall,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Meal {
    pub item: FoodItem,
    pub bonus: u32,
}

/// What happened during one call to [`Game::frame`] or [`Game::step`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepReport {
    pub stepped: bool,
    pub expired: Option<FoodItem>,
    pub eaten: Vec<Meal>,
    pub crash: Option<Crash>,
}

impl StepReport {
    /// Whether the score or the game status changed.
    pub fn is_notable(&self) -> bool {
        !self.eaten.is_empty() || self.crash.is_some()
    }
}

/// One running game: the snake, its score and the tick throttle, plus a
/// handle on the food registry it shares with the spawner.
pub struct Game<R = StdRng> {
    config: GameConfig,
    rng: R,
    foods: Arc<FoodRegistry>,
    snake: Snake,
    score: ScoreState,
    throttle: TickThrottle,
    pending_direction: Option<Direction>,
    game_over: bool,
}

impl Game<StdRng> {
    pub fn new(config: GameConfig, foods: Arc<FoodRegistry>) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Game::with_rng(config, foods, rng)
    }
}

impl<R: Rng> Game<R> {
    pub fn with_rng(config: GameConfig, foods: Arc<FoodRegistry>, rng: R) -> Self {
        let snake = Snake::new(config.center(), config.initial_length, config.item_size);
        let score = ScoreState::new(config.initial_speed, config.speed_threshold);

        Game {
            config,
            rng,
            foods,
            snake,
            score,
            throttle: TickThrottle::new(),
            pending_direction: None,
            game_over: false,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn score(&self) -> &ScoreState {
        &self.score
    }

    pub fn foods(&self) -> &Arc<FoodRegistry> {
        &self.foods
    }

    pub fn is_over(&self) -> bool {
        self.game_over
    }

    /// Swaps in a hand-built snake, e.g. to stage a collision.
    pub fn replace_snake(&mut self, snake: Snake) {
        self.snake = snake;
    }

    /// Queues a direction change for the next step. Reversals are dropped.
    pub fn steer(&mut self, direction: Direction) {
        if let Some(dir) = pick_intent(Some(direction), self.snake.direction()) {
            self.pending_direction = Some(dir);
        }
    }

    /// Called once per rendered frame: samples the frame's presses and runs a
    /// simulation step when the throttle says one is due.
    pub fn frame(&mut self, presses: &[Direction], now: Instant) -> StepReport {
        if self.game_over {
            return StepReport::default();
        }

        if let Some(dir) = pick_intent(presses.iter().copied(), self.snake.direction()) {
            self.pending_direction = Some(dir);
        }

        if self.throttle.frame(self.score.speed()) {
            self.step(now)
        } else {
            StepReport::default()
        }
    }

    /// Runs one simulation step unconditionally, unless the game is over.
    pub fn step(&mut self, now: Instant) -> StepReport {
        if self.game_over {
            return StepReport::default();
        }

        let size = self.config.item_size;
        let mut report = StepReport { stepped: true, ..StepReport::default() };

        report.expired = self.foods.expire_oldest(now);

        if let Some(dir) = self.pending_direction.take() {
            self.snake.set_direction(dir);
        }
        self.snake.move_step(size);

        let head = self.snake.head().position;
        for item in self.foods.consume_at(head, size) {
            let bonus = item.category.draw_bonus(&mut self.rng);
            self.score.record(item.category, bonus);
            self.snake.grow(item.color());

            debug!(
                category = item.category.name(),
                bonus,
                total = self.score.total(),
                speed = self.score.speed(),
                length = self.snake.len(),
                "ate food"
            );
            report.eaten.push(Meal { item, bonus });
        }

        report.crash = self.check_crash();
        if let Some(crash) = report.crash {
            self.game_over = true;
            info!(?crash, x = head.0, y = head.1, score = self.score.total(), length = self.snake.len(), "game over");
        }

        report
    }

    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            width: self.config.width,
            height: self.config.height,
            item_size: self.config.item_size,
            foods: self.foods.snapshot(),
            head: *self.snake.head(),
            head_char: self.snake.head_char(),
            body: self.snake.body().to_vec(),
            score: self.score.clone(),
            game_over: self.game_over,
        }
    }

    ///////////////////////////////////////////////////////////////////////////

    fn check_crash(&self) -> Option<Crash> {
        let size = self.config.item_size;
        let head = self.snake.head().position;

        if self.snake.body().iter().any(|segment| overlaps(segment.position, head, size)) {
            Some(Crash::SelfCollision)
        } else if out_of_bounds(head, size, self.config.width, self.config.height) {
            Some(Crash::Wall)
        } else {
            None
        }
    }
}
