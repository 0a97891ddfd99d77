use std::borrow::Cow;
use std::io::{self, Stdout, Write, stdout};
use std::time::Duration;

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind,
        KeyModifiers, MouseButton, MouseEventKind,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};

use common::{Command, Coord, Mode, RenderCell, RenderGrid};

pub const HELP: &str = "n new maze  c clear  b bfs  d dfs  x cancel  click wall  q quit";

const CELL_WIDTH: u16 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Command(Command),
    Redraw,
    Quit,
}

/// What a rendered square looks like on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Wall,
    Open,
    /// Reached by the search at the given step.
    Visited(u32),
    Path,
    Start,
    Goal,
}

impl Glyph {
    pub fn of(cell: &RenderCell, at: Coord, start: Coord, goal: Coord) -> Self {
        if at == start {
            Glyph::Start
        } else if at == goal {
            Glyph::Goal
        } else if cell.wall {
            Glyph::Wall
        } else if cell.backtrack {
            Glyph::Path
        } else if let Some(distance) = cell.distance {
            Glyph::Visited(distance)
        } else {
            Glyph::Open
        }
    }

    // Distances wrap at 100 so every label fits the two-column square.
    fn paint(self) -> (Color, Cow<'static, str>) {
        match self {
            Glyph::Wall => (Color::Grey, "██".into()),
            Glyph::Open => (Color::Reset, "  ".into()),
            Glyph::Visited(distance) => (Color::DarkCyan, format!("{:>2}", distance % 100).into()),
            Glyph::Path => (Color::Yellow, "██".into()),
            Glyph::Start => (Color::Green, "██".into()),
            Glyph::Goal => (Color::Red, "██".into()),
        }
    }
}

pub struct TerminalUi<W: Write> {
    stdout: W,
    is_raw_mode_owner: bool, // True except in tests.
}

impl TerminalUi<Stdout> {
    pub fn new() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture, Hide)?;
        Ok(Self {
            stdout,
            is_raw_mode_owner: true,
        })
    }

    /// Waits up to `timeout` for a key press or click.
    pub fn poll_action(&mut self, timeout: Duration) -> io::Result<Option<Action>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        Ok(self.handle_event(event::read()?))
    }
}

impl<W: Write> TerminalUi<W> {
    pub fn draw(
        &mut self,
        grid: &RenderGrid,
        start: Coord,
        goal: Coord,
        status: &str,
    ) -> io::Result<()> {
        queue!(self.stdout, MoveTo(0, 0))?;

        for (y, row) in grid.rows().enumerate() {
            queue!(self.stdout, MoveTo(0, screen_row(y)))?;
            for (x, cell) in row.iter().enumerate() {
                let (color, text) = Glyph::of(cell, Coord { y, x }, start, goal).paint();
                queue!(self.stdout, SetForegroundColor(color), Print(text))?;
            }
        }

        let below = screen_row(grid.height());
        queue!(
            self.stdout,
            ResetColor,
            MoveTo(0, below),
            Clear(ClearType::CurrentLine),
            Print(status),
            MoveTo(0, below.saturating_add(1)),
            Clear(ClearType::CurrentLine),
            Print(HELP),
        )?;

        self.stdout.flush()
    }

    fn handle_event(&mut self, event: Event) -> Option<Action> {
        match event {
            Event::Key(key_event) => {
                if key_event.kind != KeyEventKind::Press {
                    return None;
                }

                if key_event.modifiers == KeyModifiers::CONTROL {
                    return match key_event.code {
                        KeyCode::Char('c') | KeyCode::Char('d') => Some(Action::Quit),
                        _ => None,
                    };
                }

                match key_event.code {
                    KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
                    KeyCode::Char('n') => Some(Action::Command(Command::NewMaze)),
                    KeyCode::Char('c') => Some(Action::Command(Command::ClearBoard)),
                    KeyCode::Char('b') => Some(Action::Command(Command::Run(Mode::Bfs))),
                    KeyCode::Char('d') => Some(Action::Command(Command::Run(Mode::Dfs))),
                    KeyCode::Char('x') => Some(Action::Command(Command::Cancel)),
                    _ => None,
                }
            }
            Event::Mouse(mouse_event) => match mouse_event.kind {
                MouseEventKind::Down(MouseButton::Left) => {
                    let cell = cell_at(mouse_event.column, mouse_event.row);
                    Some(Action::Command(Command::ToggleWall {
                        y: cell.y,
                        x: cell.x,
                    }))
                }
                _ => None,
            },
            Event::Resize(..) => {
                queue!(self.stdout, Clear(ClearType::All)).ok()?;
                Some(Action::Redraw)
            }
            _ => None,
        }
    }
}

impl<W: Write> Drop for TerminalUi<W> {
    fn drop(&mut self) {
        if self.is_raw_mode_owner {
            // Only restore the terminal if this instance was the one to take it over.
            execute!(self.stdout, ResetColor, Show, DisableMouseCapture, LeaveAlternateScreen).ok();
            terminal::disable_raw_mode().ok();
        }
    }
}

fn screen_row(y: usize) -> u16 {
    u16::try_from(y).unwrap_or(u16::MAX)
}

/// Maps a terminal position to the rendered square drawn there.
pub fn cell_at(column: u16, row: u16) -> Coord {
    Coord {
        y: usize::from(row),
        x: usize::from(column / CELL_WIDTH),
    }
}
