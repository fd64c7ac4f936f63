//! Seams between the simulation and whatever draws it or feeds it keys.

use crate::food::FoodItem;
use crate::score::ScoreState;
use crate::snake::{Direction, Segment};
use crate::GridInt;

/// Everything a frontend needs to draw one frame.
#[derive(Clone, Debug)]
pub struct FrameSnapshot {
    pub width: GridInt,
    pub height: GridInt,
    pub item_size: GridInt,
    pub foods: Vec<FoodItem>,
    pub head: Segment,
    pub head_char: char,
    pub body: Vec<Segment>,
    pub score: ScoreState,
    pub game_over: bool,
}

pub trait RenderSink {
    type Error;

    fn draw(&mut self, frame: &FrameSnapshot) -> Result<(), Self::Error>;

    /// Advisory status line, e.g. a window title.
    fn set_title(&mut self, title: &str) -> Result<(), Self::Error>;
}

/// What the player asked for during one frame.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameInput {
    /// Directional presses in the order they arrived.
    pub directions: Vec<Direction>,
    pub quit: bool,
}

pub trait InputSource {
    type Error;

    /// Drains pending input without blocking.
    fn poll_input(&mut self) -> Result<FrameInput, Self::Error>;
}

/// Collapses a frame's worth of directional presses into one intent: the
/// latest press that isn't a straight reversal of `current`.
pub fn pick_intent<I>(presses: I, current: Direction) -> Option<Direction>
where
    I: IntoIterator<Item = Direction>,
{
    presses.into_iter().filter(|dir| *dir != current.opposite()).last()
}

#[cfg(test)]
mod tests {
    use super::*;
    use Direction::*;

    #[test]
    fn last_valid_press_wins() {
        assert_eq!(pick_intent(vec![Up, Down], Right), Some(Down));
        assert_eq!(pick_intent(vec![Up, Left], Right), Some(Up));
        assert_eq!(pick_intent(vec![Left], Right), None);
        assert_eq!(pick_intent(vec![], Right), None);
    }
}
