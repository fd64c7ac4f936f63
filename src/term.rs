use std::io::{self, stdout, Stdout, Write};
use std::time::Duration;

use crossterm::event::{poll, read, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue, terminal};

use crate::color::Rgb;
use crate::render::{FrameInput, FrameSnapshot, InputSource, RenderSink};
use crate::snake::Direction;
use crate::GridInt;

type TermInt = u16;
type TermCoords = (TermInt, TermInt);

const SNAKE_BODY_CHAR: char = '█';
const FOOD_CHAR: char = 'O';
const DEAD_SNAKE_CHAR: char = 'X';
const BORDER_COLOR: Rgb = Rgb::gray(128);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Cell {
    ch: char,
    color: Option<Rgb>,
}

const BLANK: Cell = Cell { ch: ' ', color: None };

/// Terminal frontend: draws the playfield one character per grid cell and
/// reads arrow/WASD keys.
pub struct TermManager {
    width: TermInt,
    stdout: Stdout,
    // Field size in cells and what is currently on screen for each of them
    cols: TermInt,
    rows: TermInt,
    screen: Vec<Cell>,
    status: String,
    current_msg: Option<Message>,
}

struct Message {
    top_left: TermCoords,
    width: TermInt,
    height: TermInt,
}

impl TermManager {
    /// Prepares a manager for a `cols` x `rows` playfield.
    pub fn new(cols: GridInt, rows: GridInt) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        let cols = TermInt::try_from(cols).map_err(|_| invalid("playfield too wide"))?;
        let rows = TermInt::try_from(rows).map_err(|_| invalid("playfield too tall"))?;
        check_fits((width, height), cols, rows)?;

        let screen = vec![BLANK; cols as usize * rows as usize];
        Ok(TermManager { width, stdout: stdout(), cols, rows, screen, status: String::new(), current_msg: None })
    }

    pub fn setup(&mut self) -> io::Result<()> {
        execute!(self.stdout, EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)?;
        self.clear()?;
        self.draw_borders()
    }

    pub fn restore(&mut self) -> io::Result<()> {
        terminal::disable_raw_mode()?;
        execute!(self.stdout, ResetColor, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)
    }

    pub fn draw_borders(&mut self) -> io::Result<()> {
        let end_x = self.cols + 1;
        let end_y = self.rows + 1;

        queue!(self.stdout, SetForegroundColor(to_color(BORDER_COLOR)))?;
        for x in 0..=end_x {
            let ch = if x == 0 || x == end_x { '+' } else { '-' };
            self.print_raw((x, 0), ch)?;
            self.print_raw((x, end_y), ch)?;
        }

        for y in 1..end_y {
            self.print_raw((0, y), '|')?;
            self.print_raw((end_x, y), '|')?;
        }

        queue!(self.stdout, ResetColor)?;
        self.flush()
    }

    /// Shows a boxed message in the middle of the playfield. The cells it
    /// covers are left alone by [`RenderSink::draw`] until it is hidden.
    pub fn show_message(&mut self, lines: &[&str]) -> io::Result<()> {
        if self.current_msg.is_some() {
            self.hide_message()?;
        }

        let msg_height = (lines.len() + 2) as TermInt;
        let msg_width = (lines.iter().map(|x| x.chars().count()).max().unwrap_or(0) + 2) as TermInt;
        let center = (self.cols / 2 + 1, self.rows / 2 + 1);
        let top_left = (center.0.saturating_sub(msg_width / 2), center.1.saturating_sub(msg_height / 2));

        for y in [top_left.1, top_left.1 + msg_height - 1].iter() {
            for x_diff in 0..msg_width {
                self.print_raw((top_left.0 + x_diff, *y), ' ')?;
            }
        }

        for (i, line) in lines.iter().enumerate() {
            let padded_line = format!("{line: ^width$}", line = line, width = msg_width as usize);
            let y = top_left.1 + i as TermInt + 1;
            for (x_diff, ch) in padded_line.chars().enumerate() {
                self.print_raw((top_left.0 + x_diff as TermInt, y), ch)?;
            }
        }

        self.current_msg = Some(Message::new(msg_width, msg_height, top_left));
        self.flush()
    }

    pub fn hide_message(&mut self) -> io::Result<()> {
        let msg = match self.current_msg.take() {
            Some(msg) => msg,
            None => return Ok(()),
        };

        for y in msg.top_left.1..msg.top_left.1 + msg.height {
            for x in msg.top_left.0..msg.top_left.0 + msg.width {
                match self.field_index((x, y)) {
                    Some(idx) => {
                        let cell = self.screen[idx];
                        self.print_cell((x, y), cell)?;
                    }
                    None => self.print_raw((x, y), ' ')?,
                }
            }
        }

        // The border may have been covered on a cramped field
        self.draw_borders()
    }

    pub fn clear(&mut self) -> io::Result<()> {
        execute!(self.stdout, terminal::Clear(ClearType::All))?;
        self.screen = vec![BLANK; self.cols as usize * self.rows as usize];
        self.status.clear();
        Ok(())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.stdout.flush()
    }

    ///////////////////////////////////////////////////////////////////////////

    /// Builds what the field should look like for `frame`, in the same layout as `self.screen`.
    fn compose(&self, frame: &FrameSnapshot) -> Vec<Cell> {
        let mut next = vec![BLANK; self.screen.len()];
        let mut put = |pos: (GridInt, GridInt), cell: Cell| {
            if let Some(idx) = grid_index(pos, frame.item_size, self.cols, self.rows) {
                next[idx] = cell;
            }
        };

        for food in &frame.foods {
            put(food.position, Cell { ch: FOOD_CHAR, color: Some(food.color()) });
        }

        let body_char = if frame.game_over { DEAD_SNAKE_CHAR } else { SNAKE_BODY_CHAR };
        for segment in frame.body.iter().rev() {
            put(segment.position, Cell { ch: body_char, color: Some(segment.color) });
        }
        put(frame.head.position, Cell { ch: frame.head_char, color: Some(frame.head.color) });

        next
    }

    fn field_index(&self, pos: TermCoords) -> Option<usize> {
        let (x, y) = pos;
        if x == 0 || y == 0 || x > self.cols || y > self.rows {
            return None;
        }
        Some((y - 1) as usize * self.cols as usize + (x - 1) as usize)
    }

    fn covered_by_message(&self, pos: TermCoords) -> bool {
        self.current_msg.as_ref().map_or(false, |msg| msg.contains(pos))
    }

    fn print_cell(&mut self, pos: TermCoords, cell: Cell) -> io::Result<()> {
        match cell.color {
            Some(color) => queue!(
                self.stdout,
                cursor::MoveTo(pos.0, pos.1),
                SetForegroundColor(to_color(color)),
                Print(cell.ch),
                ResetColor
            ),
            None => self.print_raw(pos, cell.ch),
        }
    }

    fn print_raw(&mut self, pos: TermCoords, ch: char) -> io::Result<()> {
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), Print(ch))
    }

    fn print_status(&mut self, text: &str) -> io::Result<()> {
        let y = self.rows + 2;
        let line: String = text.chars().take(self.width as usize).collect();
        queue!(
            self.stdout,
            cursor::MoveTo(0, y),
            terminal::Clear(ClearType::CurrentLine),
            Print(line)
        )
    }
}

impl RenderSink for TermManager {
    type Error = io::Error;

    fn draw(&mut self, frame: &FrameSnapshot) -> io::Result<()> {
        let next = self.compose(frame);

        for idx in 0..next.len() {
            let pos = ((idx % self.cols as usize) as TermInt + 1, (idx / self.cols as usize) as TermInt + 1);
            if next[idx] == self.screen[idx] || self.covered_by_message(pos) {
                continue;
            }
            self.print_cell(pos, next[idx])?;
            self.screen[idx] = next[idx];
        }

        let status = frame.score.to_string();
        if status != self.status {
            self.print_status(&status)?;
            self.status = status;
        }

        self.flush()
    }

    fn set_title(&mut self, title: &str) -> io::Result<()> {
        execute!(self.stdout, terminal::SetTitle(title))
    }
}

impl InputSource for TermManager {
    type Error = io::Error;

    fn poll_input(&mut self) -> io::Result<FrameInput> {
        let mut input = FrameInput::default();

        while poll(Duration::from_millis(0))? {
            if let Event::Key(ev) = read()? {
                if is_quit(&ev) {
                    input.quit = true;
                } else if let Some(dir) = direction_for(ev.code) {
                    input.directions.push(dir);
                }
            }
        }

        Ok(input)
    }
}

impl Message {
    fn new(width: TermInt, height: TermInt, top_left: TermCoords) -> Self {
        Message { width, height, top_left }
    }

    fn contains(&self, pos: TermCoords) -> bool {
        let (x, y) = pos;
        x >= self.top_left.0 && x < self.top_left.0 + self.width && y >= self.top_left.1 && y < self.top_left.1 + self.height
    }
}

/// Maps a top-left anchored position to its cell index on a `cols` x `rows` grid.
fn grid_index(pos: (GridInt, GridInt), item_size: GridInt, cols: TermInt, rows: TermInt) -> Option<usize> {
    if pos.0 < 0 || pos.1 < 0 || item_size <= 0 {
        return None;
    }
    let (col, row) = (pos.0 / item_size, pos.1 / item_size);
    if col >= cols as GridInt || row >= rows as GridInt {
        return None;
    }
    Some(row as usize * cols as usize + col as usize)
}

/// Fails unless a `cols` x `rows` field, its border and the status line fit in `term`.
fn check_fits(term: TermCoords, cols: TermInt, rows: TermInt) -> io::Result<()> {
    let needed = (cols.saturating_add(2), rows.saturating_add(3));
    if needed.0 > term.0 || needed.1 > term.1 {
        return Err(invalid(&format!(
            "terminal is {}x{} but the playfield needs {}x{}; enlarge the terminal or pass a larger --item-size",
            term.0, term.1, needed.0, needed.1
        )));
    }
    Ok(())
}

pub fn direction_for(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Char('w') | KeyCode::Up => Some(Direction::Up),
        KeyCode::Char('a') | KeyCode::Left => Some(Direction::Left),
        KeyCode::Char('s') | KeyCode::Down => Some(Direction::Down),
        KeyCode::Char('d') | KeyCode::Right => Some(Direction::Right),
        _ => None,
    }
}

pub fn is_quit(ev: &KeyEvent) -> bool {
    match ev {
        KeyEvent { code: KeyCode::Char('c'), modifiers, .. } => modifiers.contains(KeyModifiers::CONTROL),
        KeyEvent { code: KeyCode::Char('q'), .. } | KeyEvent { code: KeyCode::Esc, .. } => true,
        _ => false,
    }
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb { r: rgb.r, g: rgb.g, b: rgb.b }
}

fn invalid(msg: &str) -> io::Error {
    io::Error::new(io::ErrorKind::Other, msg.to_string())
}
