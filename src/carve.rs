use crate::grid::{Cell, Grid};
use std::fmt;
use std::ops::RangeInclusive;
use thiserror::Error;

/// Map edge an entrance is cut into. North is the high-`y` edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::North => "north",
            Direction::East => "east",
            Direction::South => "south",
            Direction::West => "west",
        };
        f.write_str(name)
    }
}

/// Size of an entrance cut
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entrance {
    /// Half-span along the edge; the cut covers `centre - width ..= centre + width`
    pub width: usize,
    /// How far the cut reaches in from the edge
    pub depth: usize,
}

/// A rejected entrance cut. The grid is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntranceError {
    #[error("{direction} entrance exceeds permitted size (width {width}, depth {depth}), please select lower values")]
    TooLarge {
        direction: Direction,
        width: usize,
        depth: usize,
    },
    #[error("{direction} entrance of width {width} does not fit around the edge centre {centre} (edge length {edge})")]
    OutOfBounds {
        direction: Direction,
        width: usize,
        centre: usize,
        edge: usize,
    },
}

/// Force the outermost ring of cells to wall
pub fn seal_boundary(grid: &mut Grid) {
    let (width, height) = (grid.width(), grid.height());
    for x in 0..width {
        for y in 0..height {
            if x == 0 || x == width - 1 || y == 0 || y == height - 1 {
                grid.set(x, y, Cell::Wall);
            }
        }
    }
}

/// Rectangle of cells (inclusive on both ends) cleared by a carve
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub xs: RangeInclusive<usize>,
    pub ys: RangeInclusive<usize>,
}

impl Span {
    pub fn contains(&self, x: usize, y: usize) -> bool {
        self.xs.contains(&x) && self.ys.contains(&y)
    }
}

/// Work out which cells an entrance would clear, without touching the grid
///
/// North and South are checked against `width < grid width` and
/// `depth < grid height`; East and West against `width < grid height` and
/// `depth < grid width`. The centred span must also stay inside the grid.
///
/// # Arguments
/// * `grid` - Grid the entrance will be cut into (only its size is read)
/// * `direction` - Edge to cut into
/// * `entrance` - Half-span along the edge and depth inward
///
/// # Returns
/// * `Result<Span, EntranceError>` - Cells to clear, or why the cut was refused
pub fn entrance_span(
    grid: &Grid,
    direction: Direction,
    entrance: Entrance,
) -> Result<Span, EntranceError> {
    let (grid_w, grid_h) = (grid.width(), grid.height());
    let Entrance { width, depth } = entrance;

    // Size check; East/West compare against the swapped axes
    let too_large = match direction {
        Direction::North | Direction::South => width >= grid_w || depth >= grid_h,
        Direction::East | Direction::West => width >= grid_h || depth >= grid_w,
    };
    if too_large {
        return Err(EntranceError::TooLarge { direction, width, depth });
    }

    // Centre the span on the edge it runs along
    let edge = match direction {
        Direction::North | Direction::South => grid_w,
        Direction::East | Direction::West => grid_h,
    };
    let centre = edge / 2;

    // Both ends of centre - width ..= centre + width must be real cells
    if width > centre || centre + width >= edge {
        return Err(EntranceError::OutOfBounds {
            direction,
            width,
            centre,
            edge,
        });
    }
    let along = (centre - width)..=(centre + width);

    // Inward extent: the far edge takes the last `depth` cells, the near
    // edge `0..=depth`. An empty far range (depth 0) is expressed as 1..=0
    let inward = |len: usize, from_far_edge: bool| -> RangeInclusive<usize> {
        if from_far_edge {
            if depth == 0 { 1..=0 } else { (len - depth)..=(len - 1) }
        } else {
            0..=depth
        }
    };

    // North and East are the far edges
    let span = match direction {
        Direction::North => Span { xs: along, ys: inward(grid_h, true) },
        Direction::South => Span { xs: along, ys: inward(grid_h, false) },
        Direction::East => Span { xs: inward(grid_w, true), ys: along },
        Direction::West => Span { xs: inward(grid_w, false), ys: along },
    };
    Ok(span)
}

/// Clear an entrance on one edge of the grid
///
/// Either every cell in the span is opened or, on error, nothing changes.
pub fn carve_entrance(
    grid: &mut Grid,
    direction: Direction,
    entrance: Entrance,
) -> Result<(), EntranceError> {
    let span = entrance_span(grid, direction, entrance)?;
    for x in span.xs.clone() {
        for y in span.ys.clone() {
            grid.set(x, y, Cell::Open);
        }
    }
    Ok(())
}
