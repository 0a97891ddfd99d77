use crate::{direction::Coord, render::RenderGrid};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BacktrackStep {
    Accepted(Coord),
    Discarded(Coord),
    Complete,
    Exhausted,
}

/// Walks a search's visitation log backwards from the goal, keeping each
/// entry that touches the last kept one. Entries from abandoned branches
/// never touch the path and fall away.
#[derive(Clone, Debug)]
pub struct Backtrack {
    log: Vec<Coord>,
    reference: Coord,
    start: Coord,
    path: Vec<Coord>,
}

impl Backtrack {
    pub fn new(log: Vec<Coord>, goal: Coord, start: Coord) -> Self {
        Self {
            log,
            reference: goal,
            start,
            path: Vec::new(),
        }
    }

    /// Accepted cells so far, goal first.
    pub fn path(&self) -> &[Coord] {
        &self.path
    }

    pub fn into_path(self) -> Vec<Coord> {
        self.path
    }

    pub fn remaining(&self) -> usize {
        self.log.len()
    }

    pub fn step(&mut self, grid: &mut RenderGrid) -> BacktrackStep {
        let Some(cell) = self.log.pop() else {
            return BacktrackStep::Exhausted;
        };

        if cell.manhattan(self.reference) > 1 {
            return BacktrackStep::Discarded(cell);
        }

        grid.cell_mut(cell).backtrack = true;
        self.reference = cell;
        self.path.push(cell);

        if cell == self.start {
            BacktrackStep::Complete
        } else {
            BacktrackStep::Accepted(cell)
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{direction::Direction, maze::GridModel};

    fn corridor_grid() -> RenderGrid {
        let mut maze = GridModel::create(1, 2);
        maze.carve(Coord::new(0, 0), Direction::Right);
        RenderGrid::from_maze(&maze)
    }

    #[test]
    fn corridor_log_reduces_to_the_straight_path() {
        let mut grid = corridor_grid();
        let log = vec![
            Coord::new(1, 1),
            Coord::new(1, 2),
            Coord::new(1, 1),
            Coord::new(1, 3),
        ];
        let mut backtrack = Backtrack::new(log, Coord::new(1, 3), Coord::new(1, 1));

        assert_eq!(
            backtrack.step(&mut grid),
            BacktrackStep::Accepted(Coord::new(1, 3))
        );
        assert_eq!(
            backtrack.step(&mut grid),
            BacktrackStep::Discarded(Coord::new(1, 1))
        );
        assert_eq!(
            backtrack.step(&mut grid),
            BacktrackStep::Accepted(Coord::new(1, 2))
        );
        assert_eq!(backtrack.step(&mut grid), BacktrackStep::Complete);

        assert_eq!(
            backtrack.path(),
            &[Coord::new(1, 3), Coord::new(1, 2), Coord::new(1, 1)]
        );
        assert_eq!(
            grid.backtracked(),
            vec![Coord::new(1, 1), Coord::new(1, 2), Coord::new(1, 3)]
        );
    }

    #[test]
    fn discarded_entries_keep_the_reference() {
        let mut grid = RenderGrid::blank(5, 5);
        let log = vec![
            Coord::new(1, 1),
            Coord::new(1, 2),
            Coord::new(3, 3), // Unrelated branch.
            Coord::new(1, 3),
        ];
        let mut backtrack = Backtrack::new(log, Coord::new(1, 3), Coord::new(1, 1));

        let steps: Vec<BacktrackStep> = (0..4).map(|_| backtrack.step(&mut grid)).collect();
        assert_eq!(
            steps,
            vec![
                BacktrackStep::Accepted(Coord::new(1, 3)),
                BacktrackStep::Discarded(Coord::new(3, 3)),
                BacktrackStep::Accepted(Coord::new(1, 2)),
                BacktrackStep::Complete,
            ]
        );
        assert!(!grid.cell(Coord::new(3, 3)).backtrack);
    }

    #[test]
    fn log_without_the_start_is_exhausted() {
        let mut grid = RenderGrid::blank(3, 5);
        let log = vec![Coord::new(1, 3)];
        let mut backtrack = Backtrack::new(log, Coord::new(1, 3), Coord::new(1, 1));

        assert_eq!(
            backtrack.step(&mut grid),
            BacktrackStep::Accepted(Coord::new(1, 3))
        );
        assert_eq!(backtrack.remaining(), 0);
        assert_eq!(backtrack.step(&mut grid), BacktrackStep::Exhausted);
    }
}
