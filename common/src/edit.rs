use strum::IntoEnumIterator;

use crate::{
    direction::{Coord, Direction, Links},
    render::{RenderCell, RenderGrid},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditOutcome {
    Toggled { wall: bool },
    Protected, // Start or goal.
    OutOfBounds,
    Busy, // A traversal is running.
    Locked, // A traversal has finished and the board has not been reset.
}

/// Flips `cell` between wall and open, inverting every passage flag between
/// it and its in-bounds neighbors on both sides.
///
/// Flags are inverted rather than derived from the new wall state, so a cell
/// whose neighbors were already out of step with it can end up a wall with
/// open flags. The search never enters wall cells, so such flags are inert.
pub fn toggle_wall(grid: &mut RenderGrid, cell: Coord, protected: &[Coord]) -> EditOutcome {
    if !grid.in_bounds(cell) {
        return EditOutcome::OutOfBounds;
    }
    if protected.contains(&cell) {
        return EditOutcome::Protected;
    }

    let target = grid.cell_mut(cell);
    target.wall = !target.wall;
    let wall = target.wall;

    for direction in Direction::iter() {
        let Some(neighbor) = grid.neighbor(cell, direction) else {
            continue;
        };
        grid.cell_mut(cell).links.toggle(direction);
        grid.cell_mut(neighbor).links.toggle(direction.opposite());
    }

    EditOutcome::Toggled { wall }
}

/// Opens every interior cell and links it to all of its neighbors, leaving
/// the outer ring of walls in place. Border cells lose any traversal marks
/// but keep their wall state.
pub fn empty_board(grid: &mut RenderGrid) {
    let height = grid.height();
    let width = grid.width();
    if height < 3 || width < 3 {
        return;
    }

    for cell in grid.coords().collect::<Vec<_>>() {
        if cell.y == 0 || cell.x == 0 || cell.y == height - 1 || cell.x == width - 1 {
            grid.cell_mut(cell).clear_marks();
        }
    }

    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let cell = Coord { y, x };
            *grid.cell_mut(cell) = RenderCell::open(Links::NONE);

            for direction in Direction::iter() {
                let Some(neighbor) = grid.neighbor(cell, direction) else {
                    continue;
                };
                grid.cell_mut(cell).links.set(direction, true);
                grid.cell_mut(neighbor).links.set(direction.opposite(), true);
            }
        }
    }
}
