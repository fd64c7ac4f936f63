//! Frame loop tying the game, the food spawner and the terminal together.

use std::sync::Arc;
use std::thread::sleep;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{error, info};

use crate::config::GameConfig;
use crate::food::{FoodCategory, FoodRegistry};
use crate::game::{Crash, Game};
use crate::render::{InputSource, RenderSink};
use crate::scheduler::FoodSpawner;
use crate::score::ScoreState;
use crate::term::TermManager;

const TITLE: &str = "Snake Rush";

pub struct SnakeApp {
    config: GameConfig,
    term: TermManager,
}

impl SnakeApp {
    pub fn new(config: GameConfig) -> Result<Self> {
        config.validate().context("invalid game configuration")?;

        let (cols, rows) = config.grid_cells();
        let term = TermManager::new(cols, rows).context("terminal cannot fit the playfield")?;
        Ok(SnakeApp { config, term })
    }

    /// Takes over the terminal, plays one game until the player quits and
    /// hands back the final score. The terminal is restored on every path.
    pub fn run(mut self) -> Result<ScoreState> {
        self.term.setup().context("failed to set up terminal")?;
        let result = self.play();

        if let Err(err) = self.term.restore() {
            error!(?err, "failed to restore terminal");
        }

        result
    }

    fn play(&mut self) -> Result<ScoreState> {
        let foods = Arc::new(FoodRegistry::new(&self.config));
        FoodSpawner::start(Arc::clone(&foods), self.config.spawn_period, self.config.seed)
            .context("failed to start food spawner")?;

        let mut game = Game::new(self.config.clone(), foods);
        let frame_interval = self.config.frame_interval;

        info!(
            width = self.config.width,
            height = self.config.height,
            item_size = self.config.item_size,
            max_foods = self.config.max_foods,
            speed = self.config.initial_speed,
            "starting game"
        );
        self.term.set_title(TITLE)?;

        loop {
            let frame_start = Instant::now();

            let input = self.term.poll_input().context("failed to read input")?;
            if input.quit {
                break;
            }

            let report = game.frame(&input.directions, frame_start);
            if report.is_notable() {
                self.term.set_title(&format!("{} | {}", TITLE, game.score()))?;
            }

            self.term.draw(&game.snapshot()).context("failed to draw frame")?;

            if let Some(crash) = report.crash {
                self.game_over(crash, game.score())?;
            }

            sleep(frame_interval.saturating_sub(frame_start.elapsed()));
        }

        Ok(game.score().clone())
    }

    fn game_over(&mut self, crash: Crash, score: &ScoreState) -> Result<()> {
        let reason = match crash {
            Crash::SelfCollision => "You bit yourself!",
            Crash::Wall => "You hit the wall!",
        };
        let total = format!("Score: {}", score.total());
        let counts: Vec<String> = FoodCategory::ALL
            .iter()
            .map(|category| format!("{}: {}", category.name(), score.eaten(*category)))
            .collect();

        let mut lines = vec!["Game over!", reason, total.as_str(), ""];
        lines.extend(counts.iter().map(String::as_str));
        lines.extend(["", "Press q or Ctrl+C to quit"]);

        self.term.show_message(&lines)?;
        Ok(())
    }
}
