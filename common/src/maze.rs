pub mod maker;

use disjoint::DisjointSetVec;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::direction::{Coord, Direction, Links};

pub use maker::{MazeMaker, Move, SeedPolicy, valid_moves};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogicalCell {
    pub links: Links,
    pub visited: bool, // Set by the generator when the cell leaves the frontier.
}

/// The logical maze: `rows` x `cols` cells and the passages carved between
/// them. Only the generator mutates it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridModel {
    cells: Vec<Vec<LogicalCell>>,
    rows: usize,
    cols: usize,
}

impl GridModel {
    pub fn create(rows: usize, cols: usize) -> Self {
        Self {
            cells: vec![vec![LogicalCell::default(); cols]; rows],
            rows,
            cols,
        }
    }

    /// Creates a grid and carves a perfect maze into it.
    pub fn generate<R: Rng + ?Sized>(
        rows: usize,
        cols: usize,
        policy: SeedPolicy,
        rng: &mut R,
    ) -> Self {
        let grid = MazeMaker::new(GridModel::create(rows, cols), rng, policy).grid;
        info!(
            rows,
            cols,
            passages = grid.passage_count(),
            %policy,
            "maze generated"
        );
        grid
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cell(&self, cell: Coord) -> &LogicalCell {
        &self.cells[cell.y][cell.x]
    }

    pub fn neighbor(&self, cell: Coord, direction: Direction) -> Option<Coord> {
        cell.step(direction, self.rows, self.cols)
    }

    pub fn cells(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.rows).flat_map(move |y| (0..self.cols).map(move |x| Coord { y, x }))
    }

    pub(crate) fn mark_visited(&mut self, cell: Coord) {
        self.cells[cell.y][cell.x].visited = true;
    }

    /// Opens the passage from `cell` toward `direction` on both sides.
    pub(crate) fn carve(&mut self, cell: Coord, direction: Direction) {
        let Some(neighbor) = self.neighbor(cell, direction) else {
            return;
        };
        self.cells[cell.y][cell.x].links.set(direction, true);
        self.cells[neighbor.y][neighbor.x]
            .links
            .set(direction.opposite(), true);
    }

    /// Every carved passage once, as (cell, neighbor to the right or below).
    pub fn passages(&self) -> Vec<(Coord, Coord)> {
        let mut passages = Vec::new();

        for cell in self.cells() {
            for direction in [Direction::Right, Direction::Down] {
                if !self.cell(cell).links.get(direction) {
                    continue;
                }
                if let Some(neighbor) = self.neighbor(cell, direction) {
                    passages.push((cell, neighbor));
                }
            }
        }

        passages
    }

    pub fn passage_count(&self) -> usize {
        self.passages().len()
    }

    pub fn is_symmetric(&self) -> bool {
        self.cells().all(|cell| {
            Direction::ALL.iter().all(|&direction| {
                let open = self.cell(cell).links.get(direction);
                match self.neighbor(cell, direction) {
                    Some(neighbor) => open == self.cell(neighbor).links.get(direction.opposite()),
                    // Nothing may point off the edge of the grid.
                    None => !open,
                }
            })
        })
    }

    /// True if the passages form a spanning tree: symmetric, acyclic and
    /// connecting every cell.
    pub fn is_perfect(&self) -> bool {
        let total = self.rows * self.cols;
        if total == 0 || !self.is_symmetric() {
            return false;
        }

        let passages = self.passages();
        if passages.len() != total - 1 {
            return false;
        }

        let mut sets = DisjointSetVec::from(self.cells().collect::<Vec<_>>());
        for (a, b) in passages {
            let i = self.index(a);
            let j = self.index(b);
            if sets.root_of(i) == sets.root_of(j) {
                return false;
            }
            sets.join(i, j);
        }

        true
    }

    fn index(&self, cell: Coord) -> usize {
        cell.y * self.cols + cell.x
    }
}
