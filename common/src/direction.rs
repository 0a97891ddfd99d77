use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Grid position as (row, column). Used for both logical and rendered grids.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub y: usize,
    pub x: usize,
}

impl Coord {
    pub const fn new(y: usize, x: usize) -> Self {
        Self { y, x }
    }

    /// The neighbor one cell away in `direction`, if it lies inside a grid of
    /// `height` rows and `width` columns.
    pub fn step(self, direction: Direction, height: usize, width: usize) -> Option<Coord> {
        let (dy, dx) = direction.delta();
        let y = self.y.checked_add_signed(dy)?;
        let x = self.x.checked_add_signed(dx)?;

        if y < height && x < width {
            Some(Coord { y, x })
        } else {
            None
        }
    }

    pub fn manhattan(self, other: Coord) -> usize {
        self.y.abs_diff(other.y) + self.x.abs_diff(other.x)
    }
}

// Iteration order (up, down, left, right) is the order in which the search
// expands a cell's passages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Passage flags of a single cell, one per cardinal direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Links {
    pub up: bool,
    pub left: bool,
    pub right: bool,
    pub down: bool,
}

impl Links {
    pub const NONE: Links = Links {
        up: false,
        left: false,
        right: false,
        down: false,
    };

    pub const HORIZONTAL: Links = Links {
        up: false,
        left: true,
        right: true,
        down: false,
    };

    pub const VERTICAL: Links = Links {
        up: true,
        left: false,
        right: false,
        down: true,
    };

    pub fn get(&self, direction: Direction) -> bool {
        match direction {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    pub fn set(&mut self, direction: Direction, open: bool) {
        match direction {
            Direction::Up => self.up = open,
            Direction::Down => self.down = open,
            Direction::Left => self.left = open,
            Direction::Right => self.right = open,
        }
    }

    pub fn toggle(&mut self, direction: Direction) {
        let open = self.get(direction);
        self.set(direction, !open);
    }

    pub fn count(&self) -> usize {
        Direction::ALL
            .iter()
            .filter(|&&direction| self.get(direction))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }
}
