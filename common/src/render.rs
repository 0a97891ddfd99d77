use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    direction::{Coord, Direction, Links},
    maze::GridModel,
};

/// One square of the rendered grid, the grid that is both drawn and searched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderCell {
    pub wall: bool,
    pub visited: bool,
    /// Search step at which the cell was first reached.
    pub distance: Option<u32>,
    pub backtrack: bool,
    pub links: Links,
}

impl Default for RenderCell {
    fn default() -> Self {
        Self {
            wall: true,
            visited: false,
            distance: None,
            backtrack: false,
            links: Links::NONE,
        }
    }
}

impl RenderCell {
    pub fn open(links: Links) -> Self {
        Self {
            wall: false,
            links,
            ..Self::default()
        }
    }

    /// Labels the cell with `step` unless it already carries a label.
    /// Returns whether the label was written.
    pub fn label(&mut self, step: u32) -> bool {
        if self.distance.is_some() {
            return false;
        }
        self.distance = Some(step);
        true
    }

    /// Drops everything a traversal wrote, keeping the wall and its links.
    pub fn clear_marks(&mut self) {
        self.visited = false;
        self.distance = None;
        self.backtrack = false;
    }
}

/// The double-resolution grid: logical cell (j, i) sits at (2j+1, 2i+1), the
/// squares between logical cells are corridors or walls, and every square at
/// an even row and even column is a permanent wall.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderGrid {
    cells: Vec<Vec<RenderCell>>,
    height: usize,
    width: usize,
}

impl RenderGrid {
    pub fn blank(height: usize, width: usize) -> Self {
        Self {
            cells: vec![vec![RenderCell::default(); width]; height],
            height,
            width,
        }
    }

    pub fn from_maze(maze: &GridModel) -> Self {
        let mut grid = RenderGrid::blank(2 * maze.rows() + 1, 2 * maze.cols() + 1);

        for cell in maze.cells() {
            let Coord { y: j, x: i } = cell;
            let logical = maze.cell(cell);

            grid.cells[2 * j + 1][2 * i + 1] = RenderCell::open(logical.links);

            if i > 0 {
                let west = maze.cell(Coord { y: j, x: i - 1 });
                if west.links.right && logical.links.left {
                    grid.cells[2 * j + 1][2 * i] = RenderCell::open(Links::HORIZONTAL);
                }
            }

            if j > 0 {
                let north = maze.cell(Coord { y: j - 1, x: i });
                if north.links.down && logical.links.up {
                    grid.cells[2 * j][2 * i + 1] = RenderCell::open(Links::VERTICAL);
                }
            }
        }

        grid
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn in_bounds(&self, cell: Coord) -> bool {
        cell.y < self.height && cell.x < self.width
    }

    pub fn cell(&self, cell: Coord) -> &RenderCell {
        &self.cells[cell.y][cell.x]
    }

    pub(crate) fn cell_mut(&mut self, cell: Coord) -> &mut RenderCell {
        &mut self.cells[cell.y][cell.x]
    }

    pub fn neighbor(&self, cell: Coord, direction: Direction) -> Option<Coord> {
        cell.step(direction, self.height, self.width)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[RenderCell]> + '_ {
        self.cells.iter().map(Vec::as_slice)
    }

    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Coord { y, x }))
    }

    pub fn is_symmetric(&self) -> bool {
        self.coords().all(|cell| {
            Direction::ALL.iter().all(|&direction| {
                match self.neighbor(cell, direction) {
                    Some(neighbor) => {
                        self.cell(cell).links.get(direction)
                            == self.cell(neighbor).links.get(direction.opposite())
                    }
                    None => true, // Flags pointing off the grid have no mirror to disagree with.
                }
            })
        })
    }

    /// Cells marked as part of the revealed path, in row-major order.
    pub fn backtracked(&self) -> Vec<Coord> {
        self.coords()
            .filter(|&cell| self.cell(cell).backtrack)
            .collect()
    }

    pub fn log(&self) -> String {
        self.cells
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| {
                        if cell.wall {
                            "██"
                        } else if cell.backtrack {
                            "()"
                        } else if cell.distance.is_some() {
                            "··"
                        } else {
                            "  "
                        }
                    })
                    .collect::<String>()
            })
            .collect::<Vec<String>>()
            .join("\n")
    }
}

impl fmt::Display for RenderGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.log())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::maze::SeedPolicy;

    fn corridor_maze() -> GridModel {
        let mut maze = GridModel::create(1, 2);
        maze.carve(Coord::new(0, 0), Direction::Right);
        maze
    }

    #[test]
    fn minimal_corridor_renders_three_by_five() {
        let grid = RenderGrid::from_maze(&corridor_maze());
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.width(), 5);

        let open: Vec<Coord> = grid.coords().filter(|&c| !grid.cell(c).wall).collect();
        assert_eq!(
            open,
            vec![Coord::new(1, 1), Coord::new(1, 2), Coord::new(1, 3)]
        );
        assert_eq!(grid.cell(Coord::new(1, 2)).links, Links::HORIZONTAL);
        assert!(grid.cell(Coord::new(1, 1)).links.right);
        assert!(!grid.cell(Coord::new(1, 1)).links.left);
        assert!(grid.is_symmetric());
    }

    #[test]
    fn unconnected_cells_keep_the_wall_between_them() {
        let grid = RenderGrid::from_maze(&GridModel::create(2, 2));
        assert!(grid.cell(Coord::new(1, 2)).wall);
        assert!(grid.cell(Coord::new(2, 1)).wall);
        assert!(!grid.cell(Coord::new(1, 1)).wall);
        assert!(!grid.cell(Coord::new(3, 3)).wall);
    }

    #[test]
    fn derived_grid_matches_the_maze() {
        let mut rng = StdRng::seed_from_u64(17);
        let maze = GridModel::generate(6, 12, SeedPolicy::Independent, &mut rng);
        let grid = RenderGrid::from_maze(&maze);

        assert_eq!(grid.height(), 13);
        assert_eq!(grid.width(), 25);
        assert!(grid.is_symmetric());

        let mut corridors = 0;
        for cell in grid.coords() {
            let rendered = grid.cell(cell);
            let (even_y, even_x) = (cell.y % 2 == 0, cell.x % 2 == 0);

            if even_y && even_x {
                assert!(rendered.wall, "intersection {cell:?} should be a wall");
            } else if !even_y && !even_x {
                assert!(!rendered.wall);
                assert_eq!(rendered.links, maze.cell(Coord::new(cell.y / 2, cell.x / 2)).links);
            } else if !rendered.wall {
                corridors += 1;
            }

            assert_eq!(rendered.distance, None);
            assert!(!rendered.visited && !rendered.backtrack);
        }

        assert_eq!(corridors, maze.passage_count());
    }

    #[test]
    fn label_keeps_the_first_step() {
        let mut cell = RenderCell::open(Links::NONE);
        assert!(cell.label(4));
        assert!(!cell.label(2));
        assert_eq!(cell.distance, Some(4));
    }

    #[test]
    fn clearing_marks_keeps_walls_and_links() {
        let mut cell = RenderCell::open(Links {
            up: true,
            ..Links::NONE
        });
        cell.visited = true;
        cell.label(3);
        cell.backtrack = true;

        cell.clear_marks();
        assert_eq!(
            cell,
            RenderCell::open(Links {
                up: true,
                ..Links::NONE
            })
        );
    }

    #[test]
    fn log_draws_walls_and_openings() {
        let grid = RenderGrid::from_maze(&corridor_maze());
        let expected = [
            "██████████",
            "██      ██",
            "██████████",
        ]
        .join("\n");
        assert_eq!(grid.to_string(), expected);
    }
}
