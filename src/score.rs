use std::fmt;

use crate::food::FoodCategory;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoreState {
    eaten: [u32; FoodCategory::ALL.len()],
    total: u32,
    /// Frames between two simulation steps; lower is faster.
    speed: u32,
    speed_threshold: u32,
}

impl ScoreState {
    pub fn new(initial_speed: u32, speed_threshold: u32) -> Self {
        ScoreState { eaten: [0; FoodCategory::ALL.len()], total: 0, speed: initial_speed, speed_threshold }
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn eaten(&self, category: FoodCategory) -> u32 {
        self.eaten[category.index()]
    }

    /// Books one eaten item worth `bonus` points and adjusts the speed.
    pub fn record(&mut self, category: FoodCategory, bonus: u32) {
        self.eaten[category.index()] += 1;
        self.total += bonus;
        self.adjust_speed(bonus);
    }

    /// Fast paces (few frames per step, at or below the threshold) slow down
    /// and slow paces speed up, so the pace swings around the threshold
    /// instead of running away.
    pub fn adjust_speed(&mut self, bonus: u32) {
        self.speed = if self.speed <= self.speed_threshold {
            self.speed + bonus
        } else {
            self.speed.saturating_sub(bonus).max(1)
        };
    }
}

impl fmt::Display for ScoreState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Score: {}", self.total)?;
        for category in FoodCategory::ALL {
            write!(f, " | {}: {}", category.name(), self.eaten(category))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_rises_at_or_below_threshold() {
        let mut score = ScoreState::new(5, 6);
        score.adjust_speed(3);
        assert_eq!(score.speed(), 8);

        let mut score = ScoreState::new(6, 6);
        score.adjust_speed(4);
        assert_eq!(score.speed(), 10);
    }

    #[test]
    fn speed_drops_above_threshold() {
        let mut score = ScoreState::new(20, 6);
        score.adjust_speed(3);
        assert_eq!(score.speed(), 17);
    }

    #[test]
    fn speed_never_reaches_zero() {
        let mut score = ScoreState::new(7, 0);
        score.adjust_speed(4);
        score.adjust_speed(4);
        assert_eq!(score.speed(), 1);
    }

    #[test]
    fn record_counts_per_category() {
        let mut score = ScoreState::new(10, 6);
        score.record(FoodCategory::Red, 4);
        assert_eq!(score.speed(), 6);
        score.record(FoodCategory::Red, 0);
        assert_eq!(score.speed(), 6);
        score.record(FoodCategory::Green, 1);
        assert_eq!(score.speed(), 7);

        assert_eq!(score.eaten(FoodCategory::Red), 2);
        assert_eq!(score.eaten(FoodCategory::Green), 1);
        assert_eq!(score.eaten(FoodCategory::Blue), 0);
        assert_eq!(score.total(), 5);
        assert_eq!(score.speed(), 7);
    }

    #[test]
    fn display_lists_every_category() {
        let mut score = ScoreState::new(10, 6);
        score.record(FoodCategory::White, 2);
        assert_eq!(score.to_string(), "Score: 2 | Red: 0 | Blue: 0 | White: 1 | Green: 0");
    }
}
