use crate::color::{body_gradient, Rgb, HEAD_COLOR};
use crate::{Coords, GridInt};
use Direction::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Up,
    Right,
    Down,
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Left => Right,
            Right => Left,
            Up => Down,
            Down => Up,
        }
    }

    /// Offset of one step of `size` units in this direction.
    pub fn offset(self, size: GridInt) -> Coords {
        match self {
            Up => (0, -size),
            Down => (0, size),
            Left => (-size, 0),
            Right => (size, 0),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    pub position: Coords,
    pub color: Rgb,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snake {
    head: Segment,
    // body[0] is the segment right behind the head
    body: Vec<Segment>,
    direction: Direction,
}

impl Snake {
    /// Builds the starting snake: head at `head_pos`, facing right, with
    /// `length` body segments trailing to its left.
    pub fn new(head_pos: Coords, length: usize, item_size: GridInt) -> Self {
        let body = (1..=length)
            .map(|i| Segment {
                position: (head_pos.0 - item_size * i as GridInt, head_pos.1),
                color: body_gradient(i - 1),
            })
            .collect();

        Snake { head: Segment { position: head_pos, color: HEAD_COLOR }, body, direction: Right }
    }

    /// Assembles a snake from explicit parts, mostly useful to set up a scenario.
    pub fn from_parts(head: Coords, body: &[Coords], direction: Direction) -> Self {
        let body = body
            .iter()
            .enumerate()
            .map(|(i, &position)| Segment { position, color: body_gradient(i) })
            .collect();

        Snake { head: Segment { position: head, color: HEAD_COLOR }, body, direction }
    }

    pub fn head(&self) -> &Segment {
        &self.head
    }

    pub fn body(&self) -> &[Segment] {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Every occupied position, head first.
    pub fn positions(&self) -> impl Iterator<Item = Coords> + '_ {
        std::iter::once(self.head.position).chain(self.body.iter().map(|s| s.position))
    }

    /// Moves the head one cell along the current direction and drags each
    /// body segment into the spot its neighbor held before the move.
    pub fn move_step(&mut self, item_size: GridInt) {
        let (dx, dy) = self.direction.offset(item_size);
        let mut prev = self.head.position;
        self.head.position = (prev.0 + dx, prev.1 + dy);

        for segment in self.body.iter_mut() {
            prev = std::mem::replace(&mut segment.position, prev);
        }
    }

    /// Appends a segment on top of the current tail; the next move pulls it out.
    pub fn grow(&mut self, color: Rgb) {
        let position = self.body.last().map_or(self.head.position, |tail| tail.position);
        self.body.push(Segment { position, color });
    }

    /// Changes heading unless the new one would turn the snake back onto itself.
    /// Returns whether the direction was accepted.
    pub fn set_direction(&mut self, new_direction: Direction) -> bool {
        if new_direction == self.direction.opposite() {
            return false;
        }
        self.direction = new_direction;
        true
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn head_char(&self) -> char {
        match self.direction {
            Up => '^',
            Down => 'v',
            Left => '<',
            Right => '>',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZE: GridInt = 15;

    #[test]
    fn starts_with_two_segments_behind_the_head() {
        let snake = Snake::new((315, 240), 2, SIZE);
        assert_eq!(snake.len(), 2);
        assert_eq!(snake.head().position, (315, 240));

        let body: Vec<_> = snake.body().iter().map(|s| s.position).collect();
        assert_eq!(body, vec![(300, 240), (285, 240)]);
        assert!(snake.body()[0].color.r > snake.body()[1].color.r);
    }

    #[test]
    fn straight_moves_translate_rigidly() {
        let mut snake = Snake::new((150, 150), 4, SIZE);
        let before: Vec<_> = snake.positions().collect();

        for n in 1..=5 {
            snake.move_step(SIZE);
            let after: Vec<_> = snake.positions().collect();
            let expected: Vec<_> = before.iter().map(|&(x, y)| (x + n * SIZE, y)).collect();
            assert_eq!(after, expected);
        }
    }

    #[test]
    fn body_follows_previous_positions() {
        let mut snake = Snake::new((150, 150), 3, SIZE);
        snake.set_direction(Up);
        let before: Vec<_> = snake.positions().collect();

        snake.move_step(SIZE);
        let after: Vec<_> = snake.positions().collect();

        assert_eq!(after[0], (150, 135));
        assert_eq!(&after[1..], &before[..3]);
    }

    #[test]
    fn reverse_direction_is_ignored() {
        let mut snake = Snake::new((150, 150), 2, SIZE);
        for (heading, reverse) in [(Right, Left), (Up, Down), (Left, Right), (Down, Up)] {
            assert!(snake.set_direction(heading));
            assert!(!snake.set_direction(reverse));
            assert_eq!(snake.direction(), heading);
        }
    }

    #[test]
    fn grow_adds_segment_at_tail() {
        let mut snake = Snake::new((150, 150), 2, SIZE);
        let tail = snake.body()[1].position;
        let green = Rgb::new(0, 255, 0);

        snake.grow(green);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.body()[2], Segment { position: tail, color: green });

        snake.move_step(SIZE);
        assert_eq!(snake.body()[2].position, tail);
        snake.move_step(SIZE);
        assert_ne!(snake.body()[2].position, snake.body()[1].position);
    }

    #[test]
    fn head_char_tracks_direction() {
        let mut snake = Snake::new((150, 150), 2, SIZE);
        assert_eq!(snake.head_char(), '>');
        snake.set_direction(Down);
        assert_eq!(snake.head_char(), 'v');
    }
}
