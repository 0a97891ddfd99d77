pub mod algorithms;

use rand::{Rng, seq::SliceRandom};
use strum::{Display, EnumString};

use algorithms::prim::Prim;

use crate::{
    direction::{Coord, Direction},
    maze::GridModel,
};

/// How the first frontier cell is chosen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SeedPolicy {
    #[default]
    Independent, // Row and column drawn separately.
    Diagonal, // One draw reused for row and column.
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Move {
    pub to: Coord,
    pub direction: Direction,
}

pub struct MazeMaker<'a, R: Rng + ?Sized> {
    pub grid: GridModel,
    pub rng: &'a mut R,
    policy: SeedPolicy,
}

impl<'a, R: Rng + ?Sized> MazeMaker<'a, R> {
    pub fn new(grid: GridModel, rng: &'a mut R, policy: SeedPolicy) -> Self {
        let mut maze = MazeMaker { grid, rng, policy };
        maze.prim();
        maze
    }

    fn pick_seed(&mut self) -> Coord {
        let rows = self.grid.rows();
        let cols = self.grid.cols();

        match self.policy {
            SeedPolicy::Independent => Coord {
                y: self.rng.random_range(0..rows),
                x: self.rng.random_range(0..cols),
            },
            SeedPolicy::Diagonal => {
                let i = self.rng.random_range(0..rows);
                // Clamped: with more rows than columns the shared draw can
                // land past the last column.
                Coord {
                    y: i,
                    x: i.min(cols - 1),
                }
            }
        }
    }
}

/// Neighbors of `cell` that may still be carved into, in random order: inside
/// the grid, with no passage of their own yet, and not visited.
///
/// Refusing any neighbor that already has a passage is what keeps the maze
/// free of cycles.
pub fn valid_moves<R: Rng + ?Sized>(cell: Coord, grid: &GridModel, rng: &mut R) -> Vec<Move> {
    let mut directions = Direction::ALL;
    directions.shuffle(rng);

    directions
        .into_iter()
        .filter_map(|direction| {
            let to = grid.neighbor(cell, direction)?;
            let target = grid.cell(to);
            (target.links.is_empty() && !target.visited).then_some(Move { to, direction })
        })
        .collect()
}
