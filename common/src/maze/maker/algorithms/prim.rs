use rand::{Rng, seq::SliceRandom};
use tracing::trace;

use super::super::{MazeMaker, valid_moves};
use crate::{
    constants::PRIORITY_RANGE,
    direction::{Coord, Direction},
};

pub trait Prim {
    fn prim(&mut self);
}

#[derive(Clone, Copy, Debug)]
struct FrontierEntry {
    cell: Coord,
    from: Option<Direction>, // Direction of the passage that brought us here; `None` for the seed.
    priority: u32,
}

impl<R: Rng + ?Sized> Prim for MazeMaker<'_, R> {
    fn prim(&mut self) {
        if self.grid.rows() == 0 || self.grid.cols() == 0 {
            return;
        }

        let seed = self.pick_seed();
        let mut frontier = vec![FrontierEntry {
            cell: seed,
            from: None,
            priority: draw_priority(&mut *self.rng),
        }];

        while !frontier.is_empty() {
            // New entries land at arbitrary priorities, so the whole frontier
            // is re-sorted before every pick.
            frontier.sort_by_key(|entry| entry.priority);
            let entry = frontier.remove(0);

            // Duplicates are expected.
            if self.grid.cell(entry.cell).visited {
                continue;
            }
            self.grid.mark_visited(entry.cell);

            let mut moves = valid_moves(entry.cell, &self.grid, &mut *self.rng);
            moves.shuffle(&mut *self.rng);

            trace!(
                y = entry.cell.y,
                x = entry.cell.x,
                from = ?entry.from,
                carved = moves.len(),
                "frontier cell expanded"
            );

            for step in moves.into_iter().take(4) {
                self.grid.carve(entry.cell, step.direction);
                frontier.push(FrontierEntry {
                    cell: step.to,
                    from: Some(step.direction),
                    priority: draw_priority(&mut *self.rng),
                });
            }
        }
    }
}

fn draw_priority<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    rng.random_range(0..PRIORITY_RANGE)
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::maze::{GridModel, SeedPolicy};

    #[test]
    fn test_prim_mazes_are_spanning_trees() {
        let mut rng = StdRng::seed_from_u64(2024);
        for _ in 0..64 {
            let rows = rng.random_range(1..=12);
            let cols = rng.random_range(1..=12);
            let maze = MazeMaker::new(
                GridModel::create(rows, cols),
                &mut rng,
                SeedPolicy::Independent,
            );
            assert!(maze.grid.is_perfect(), "{rows}x{cols} maze is not perfect");
        }
    }

    #[test]
    fn test_prim_visits_every_cell() {
        let mut rng = StdRng::seed_from_u64(5);
        let maze = MazeMaker::new(GridModel::create(7, 3), &mut rng, SeedPolicy::Diagonal);
        let grid = &maze.grid;
        assert!(grid.cells().all(|cell| grid.cell(cell).visited));
    }

    #[test]
    fn test_prim_single_cell_has_no_passages() {
        let mut rng = StdRng::seed_from_u64(0);
        let maze = MazeMaker::new(GridModel::create(1, 1), &mut rng, SeedPolicy::Independent);
        assert_eq!(maze.grid.passage_count(), 0);
        assert!(maze.grid.is_perfect());
    }

    #[test]
    fn test_prim_empty_grid_is_left_alone() {
        let mut rng = StdRng::seed_from_u64(0);
        let maze = MazeMaker::new(GridModel::create(0, 4), &mut rng, SeedPolicy::Independent);
        assert_eq!(maze.grid.passage_count(), 0);
    }
}
