use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};
use thiserror::Error;

use crate::{
    direction::{Coord, Direction},
    render::RenderGrid,
};

/// Removal discipline of the search frontier.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Mode {
    Bfs, // Oldest entry first.
    Dfs, // Newest entry first.
}

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum TraversalError {
    #[error("goal is unreachable: frontier emptied after {visited} cells")]
    Unreachable { visited: usize },
    #[error("path reconstruction ran out of log entries before reaching the start")]
    BrokenPath,
    #[error("traversal cancelled")]
    Cancelled,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchStep {
    Expanded { cell: Coord, step: u32 },
    Found { cell: Coord, step: u32 },
    Exhausted,
}

/// One breadth-first or depth-first run over a rendered grid, advanced a
/// single frontier entry at a time.
#[derive(Clone, Debug)]
pub struct Search {
    mode: Mode,
    goal: Coord,
    frontier: VecDeque<(Coord, u32)>,
    log: Vec<Coord>,
}

impl Search {
    pub fn new(mode: Mode, start: Coord, goal: Coord) -> Self {
        Self {
            mode,
            goal,
            frontier: VecDeque::from([(start, 1)]),
            log: Vec::new(),
        }
    }

    /// Every cell removed from the frontier so far, in removal order.
    pub fn log(&self) -> &[Coord] {
        &self.log
    }

    pub fn into_log(self) -> Vec<Coord> {
        self.log
    }

    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    pub fn step(&mut self, grid: &mut RenderGrid) -> SearchStep {
        let next = match self.mode {
            Mode::Bfs => self.frontier.pop_front(),
            Mode::Dfs => self.frontier.pop_back(),
        };
        let Some((cell, step)) = next else {
            return SearchStep::Exhausted;
        };

        self.log.push(cell);
        grid.cell_mut(cell).label(step);

        if cell == self.goal {
            return SearchStep::Found { cell, step };
        }

        let links = grid.cell(cell).links;
        for direction in Direction::iter() {
            if !links.get(direction) {
                continue;
            }
            let Some(neighbor) = grid.neighbor(cell, direction) else {
                continue;
            };

            // Marked on insertion so no cell is queued by two branches.
            let target = grid.cell_mut(neighbor);
            if target.wall || target.visited {
                continue;
            }
            target.visited = true;
            self.frontier.push_back((neighbor, step + 1));
        }

        if self.frontier.is_empty() {
            SearchStep::Exhausted
        } else {
            SearchStep::Expanded { cell, step }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use pretty_assertions::assert_eq;
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::maze::{GridModel, SeedPolicy};

    fn corridor_grid() -> RenderGrid {
        let mut maze = GridModel::create(1, 2);
        maze.carve(Coord::new(0, 0), Direction::Right);
        RenderGrid::from_maze(&maze)
    }

    fn run(search: &mut Search, grid: &mut RenderGrid) -> SearchStep {
        loop {
            match search.step(grid) {
                SearchStep::Expanded { .. } => continue,
                other => return other,
            }
        }
    }

    #[test]
    fn bfs_labels_the_minimal_corridor() {
        let mut grid = corridor_grid();
        let mut search = Search::new(Mode::Bfs, Coord::new(1, 1), Coord::new(1, 3));

        let outcome = run(&mut search, &mut grid);

        assert_eq!(
            outcome,
            SearchStep::Found {
                cell: Coord::new(1, 3),
                step: 3
            }
        );
        assert_eq!(grid.cell(Coord::new(1, 1)).distance, Some(1));
        assert_eq!(grid.cell(Coord::new(1, 2)).distance, Some(2));
        assert_eq!(grid.cell(Coord::new(1, 3)).distance, Some(3));
        // The start is queued again by its neighbor; its first label survives.
        assert_eq!(
            search.log(),
            &[
                Coord::new(1, 1),
                Coord::new(1, 2),
                Coord::new(1, 1),
                Coord::new(1, 3)
            ]
        );
    }

    #[test]
    fn dfs_reaches_the_same_goal() {
        let mut grid = corridor_grid();
        let mut search = Search::new(Mode::Dfs, Coord::new(1, 1), Coord::new(1, 3));
        assert!(matches!(
            run(&mut search, &mut grid),
            SearchStep::Found { step: 3, .. }
        ));
    }

    #[test]
    fn isolated_start_is_exhausted_on_the_first_step() {
        let mut grid = RenderGrid::from_maze(&GridModel::create(1, 2));
        let mut search = Search::new(Mode::Bfs, Coord::new(1, 1), Coord::new(1, 3));

        assert_eq!(search.step(&mut grid), SearchStep::Exhausted);
        assert_eq!(search.step(&mut grid), SearchStep::Exhausted);
        assert_eq!(grid.cell(Coord::new(1, 3)).distance, None);
    }

    #[test]
    fn start_equal_to_goal_is_found_immediately() {
        let mut grid = RenderGrid::from_maze(&GridModel::create(1, 1));
        let mut search = Search::new(Mode::Dfs, Coord::new(1, 1), Coord::new(1, 1));
        assert_eq!(
            search.step(&mut grid),
            SearchStep::Found {
                cell: Coord::new(1, 1),
                step: 1
            }
        );
    }

    #[test]
    fn no_cell_is_expanded_twice() {
        let mut rng = StdRng::seed_from_u64(8);
        let maze = GridModel::generate(8, 8, SeedPolicy::Independent, &mut rng);

        for mode in Mode::iter() {
            let mut grid = RenderGrid::from_maze(&maze);
            let start = Coord::new(1, 1);
            let mut search = Search::new(mode, start, Coord::new(15, 15));
            assert!(matches!(
                run(&mut search, &mut grid),
                SearchStep::Found { .. }
            ));

            let mut seen = HashSet::new();
            for &cell in search.log() {
                // The start may come back once through its own neighbor.
                if cell != start {
                    assert!(seen.insert(cell), "{cell:?} expanded twice under {mode}");
                }
                assert!(!grid.cell(cell).wall);
            }
        }
    }

    #[test]
    fn mode_parses_case_insensitively() {
        assert_eq!("bfs".parse::<Mode>(), Ok(Mode::Bfs));
        assert_eq!("DFS".parse::<Mode>(), Ok(Mode::Dfs));
        assert!("astar".parse::<Mode>().is_err());
        assert_eq!(Mode::Bfs.to_string(), "bfs");
    }
}
