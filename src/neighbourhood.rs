use crate::grid::Grid;
use glam::IVec2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Neighbourhood shape used when counting walls around a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Neighbourhood {
    /// West and south-side neighbours only, `(x-1, y)` and `(x, y-1)`
    VonNeumann,
    /// The 8 cells within Chebyshev distance 1
    Moore,
    /// The 24 cells within Chebyshev distance 2
    MooreExtended,
}

impl fmt::Display for Neighbourhood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Neighbourhood::VonNeumann => "von-neumann",
            Neighbourhood::Moore => "moore",
            Neighbourhood::MooreExtended => "moore-extended",
        };
        f.write_str(name)
    }
}

// Two one-dimensional sweeps over `x-1..=x` and `y-1..=y` with the centre skipped.
// The second sweep reads `(x, y-1)`, not the transposed `[y-1, y]` cell.
const VON_NEUMANN_OFFSETS: [IVec2; 2] = [IVec2::new(-1, 0), IVec2::new(0, -1)];

/// Independent on/off switches for each neighbourhood
///
/// When more than one is set the first in the order von Neumann, Moore,
/// extended Moore wins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NeighbourhoodFlags {
    pub von_neumann: bool,
    pub moore: bool,
    pub moore_extended: bool,
}

impl NeighbourhoodFlags {
    pub fn any(&self) -> bool {
        self.von_neumann || self.moore || self.moore_extended
    }

    /// The neighbourhood that takes effect, if any
    pub fn select(&self) -> Option<Neighbourhood> {
        if self.von_neumann {
            Some(Neighbourhood::VonNeumann)
        } else if self.moore {
            Some(Neighbourhood::Moore)
        } else if self.moore_extended {
            Some(Neighbourhood::MooreExtended)
        } else {
            None
        }
    }
}

fn square_count(grid: &Grid, centre: IVec2, radius: i32) -> u32 {
    let mut walls = 0;
    for dx in -radius..=radius {
        for dy in -radius..=radius {
            if dx == 0 && dy == 0 {
                continue;
            }
            walls += grid.wall_value(centre + IVec2::new(dx, dy));
        }
    }
    walls
}

/// Count walls around `(x, y)`, excluding the cell itself
///
/// Positions outside the grid count as one wall each.
pub fn count_walls(grid: &Grid, x: usize, y: usize, mode: Neighbourhood) -> u32 {
    let centre = IVec2::new(x as i32, y as i32);
    match mode {
        Neighbourhood::VonNeumann => VON_NEUMANN_OFFSETS
            .iter()
            .map(|&offset| grid.wall_value(centre + offset))
            .sum(),
        Neighbourhood::Moore => square_count(grid, centre, 1),
        Neighbourhood::MooreExtended => square_count(grid, centre, 2),
    }
}
