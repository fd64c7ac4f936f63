use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;
use snake_rush::game::Crash;
use snake_rush::{Direction, FoodCategory, FoodRegistry, Game, GameConfig, Snake};

fn new_game(config: GameConfig) -> Game {
    let foods = Arc::new(FoodRegistry::new(&config));
    Game::with_rng(config, foods, StdRng::seed_from_u64(2024))
}

#[test]
fn frames_drive_steps_and_turns_until_the_wall() {
    let config = GameConfig { initial_speed: 2, ..GameConfig::default() };
    let mut game = new_game(config);
    let now = Instant::now();
    let (x0, y0) = game.snake().head().position;

    // Two frames per step at speed 2
    game.frame(&[], now);
    game.frame(&[], now);
    assert_eq!(game.snake().head().position, (x0 + 15, y0));

    // The turn is sampled on the first frame, applied on the step
    game.frame(&[Direction::Up], now);
    assert_eq!(game.snake().direction(), Direction::Right);
    game.frame(&[], now);
    assert_eq!(game.snake().direction(), Direction::Up);
    assert_eq!(game.snake().head().position, (x0 + 15, y0 - 15));

    let mut frames = 0;
    let crash = loop {
        let report = game.frame(&[], now);
        if let Some(crash) = report.crash {
            break crash;
        }
        frames += 1;
        assert!(frames < 1000, "snake never reached the wall");
    };

    assert_eq!(crash, Crash::Wall);
    assert!(game.snake().head().position.1 < 0);
    assert!(game.is_over());
}

#[test]
fn eating_every_category_counts_and_colors_segments() {
    let mut game = new_game(GameConfig { max_foods: 4, ..GameConfig::default() });
    let now = Instant::now();
    let (x, y) = game.snake().head().position;

    for (i, category) in FoodCategory::ALL.iter().enumerate() {
        game.foods().place((x + 15 * (i as i32 + 1), y), *category, now, Duration::from_secs(60));
    }

    let mut total = 0;
    for category in FoodCategory::ALL {
        let report = game.step(now);
        assert_eq!(report.eaten.len(), 1);
        assert_eq!(report.eaten[0].item.category, category);
        assert!(category.bonus_range().contains(&report.eaten[0].bonus));
        total += report.eaten[0].bonus;
        assert_eq!(game.score().eaten(category), 1);
    }

    assert_eq!(game.score().total(), total);
    assert_eq!(game.snake().len(), 6);
    let colors: Vec<_> = game.snake().body()[2..].iter().map(|s| s.color).collect();
    let expected: Vec<_> = FoodCategory::ALL.iter().map(|c| c.color()).collect();
    assert_eq!(colors, expected);
    assert!(game.foods().is_empty());
}

#[test]
fn overlapping_items_are_eaten_together() {
    let mut game = new_game(GameConfig::default());
    let now = Instant::now();
    let (x, y) = game.snake().head().position;
    game.foods().place((x + 15, y), FoodCategory::Red, now, Duration::from_secs(60));
    game.foods().place((x + 20, y + 5), FoodCategory::Blue, now, Duration::from_secs(60));

    let report = game.step(now);
    assert_eq!(report.eaten.len(), 2);
    assert_eq!(game.snake().len(), 4);
    assert_eq!(game.score().eaten(FoodCategory::Red) + game.score().eaten(FoodCategory::Blue), 2);
}

#[test]
fn running_into_the_body_freezes_the_game() {
    let mut game = new_game(GameConfig::default());
    game.replace_snake(Snake::from_parts(
        (45, 45),
        &[(45, 60), (60, 60), (60, 45), (60, 30), (45, 30), (30, 30)],
        Direction::Left,
    ));
    game.steer(Direction::Down);

    let report = game.step(Instant::now());
    assert_eq!(report.crash, Some(Crash::SelfCollision));

    let frozen = game.snapshot();
    for _ in 0..20 {
        game.frame(&[Direction::Right], Instant::now());
    }
    let after = game.snapshot();
    assert_eq!(after.head, frozen.head);
    assert_eq!(after.body, frozen.body);
    assert_eq!(after.score, frozen.score);
    assert!(after.game_over);
}

#[test]
fn games_are_independent() {
    let mut first = new_game(GameConfig::default());
    let second = new_game(GameConfig::default());

    first.step(Instant::now());
    assert_ne!(first.snake().head().position, second.snake().head().position);
    assert!(!Arc::ptr_eq(first.foods(), second.foods()));
}
