use crate::grid::{Cell, Grid};
use crate::neighbourhood::{Neighbourhood, count_walls};
use serde::{Deserialize, Serialize};

/// Birth/death thresholds for one smoothing pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rules {
    pub wall_threshold: u32,
    pub space_threshold: u32,
}

impl Rules {
    /// New state for a cell with `walls` wall neighbours, `None` to leave it
    ///
    /// Von Neumann needs strictly more than the wall threshold, the Moore
    /// variants only need to reach it.
    pub fn apply(&self, mode: Neighbourhood, walls: u32) -> Option<Cell> {
        let becomes_wall = match mode {
            Neighbourhood::VonNeumann => walls > self.wall_threshold,
            Neighbourhood::Moore | Neighbourhood::MooreExtended => walls >= self.wall_threshold,
        };
        if becomes_wall {
            Some(Cell::Wall)
        } else if walls <= self.space_threshold {
            Some(Cell::Open)
        } else {
            None
        }
    }
}

/// How writes within a single pass are made visible
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PassMode {
    /// Write each cell as soon as it is decided; later cells in the same
    /// pass see the new value. Cells are visited `x` outer, `y` inner.
    #[default]
    InPlace,
    /// Decide every cell from the grid as it was when the pass started
    Buffered,
}

/// Run one smoothing pass over the whole grid
pub fn step(grid: &mut Grid, mode: Neighbourhood, rules: Rules, pass_mode: PassMode) {
    match pass_mode {
        PassMode::InPlace => {
            for x in 0..grid.width() {
                for y in 0..grid.height() {
                    let walls = count_walls(grid, x, y, mode);
                    if let Some(cell) = rules.apply(mode, walls) {
                        grid.set(x, y, cell);
                    }
                }
            }
        }
        PassMode::Buffered => {
            let snapshot = grid.clone();
            for x in 0..grid.width() {
                for y in 0..grid.height() {
                    let walls = count_walls(&snapshot, x, y, mode);
                    if let Some(cell) = rules.apply(mode, walls) {
                        grid.set(x, y, cell);
                    }
                }
            }
        }
    }
}

/// Outcome of a smoothing run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Passes that ran
    pub applied: usize,
    /// Passes skipped because no neighbourhood was selected
    pub skipped: usize,
}

/// Run `iterations` passes
///
/// With no neighbourhood every pass is skipped and the grid is unchanged.
/// `on_skip` is called with the zero-based index of each skipped pass.
pub fn run(
    grid: &mut Grid,
    mode: Option<Neighbourhood>,
    rules: Rules,
    iterations: usize,
    pass_mode: PassMode,
    mut on_skip: impl FnMut(usize),
) -> RunSummary {
    let mut summary = RunSummary { applied: 0, skipped: 0 };
    for pass in 0..iterations {
        match mode {
            Some(mode) => {
                step(grid, mode, rules, pass_mode);
                summary.applied += 1;
            }
            None => {
                on_skip(pass);
                summary.skipped += 1;
            }
        }
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules(wall: u32, space: u32) -> Rules {
        Rules { wall_threshold: wall, space_threshold: space }
    }

    #[test]
    fn test_von_neumann_uses_strict_threshold() {
        let r = rules(1, 0);
        assert_eq!(r.apply(Neighbourhood::VonNeumann, 1), None);
        assert_eq!(r.apply(Neighbourhood::VonNeumann, 2), Some(Cell::Wall));
        assert_eq!(r.apply(Neighbourhood::VonNeumann, 0), Some(Cell::Open));
    }

    #[test]
    fn test_moore_uses_inclusive_threshold() {
        let r = rules(5, 3);
        assert_eq!(r.apply(Neighbourhood::Moore, 5), Some(Cell::Wall));
        assert_eq!(r.apply(Neighbourhood::MooreExtended, 5), Some(Cell::Wall));
        assert_eq!(r.apply(Neighbourhood::Moore, 4), None);
        assert_eq!(r.apply(Neighbourhood::Moore, 3), Some(Cell::Open));
    }

    #[test]
    fn test_wall_rule_checked_first() {
        // Overlapping thresholds: the wall rule wins
        let r = rules(2, 8);
        assert_eq!(r.apply(Neighbourhood::Moore, 4), Some(Cell::Wall));
        assert_eq!(r.apply(Neighbourhood::Moore, 1), Some(Cell::Open));
    }

    #[test]
    fn test_all_wall_grid_stays_wall() {
        let mut grid = Grid::new(10, 10, Cell::Wall);
        step(&mut grid, Neighbourhood::Moore, rules(8, 8), PassMode::InPlace);
        assert_eq!(grid.count(Cell::Wall), 100);
    }

    #[test]
    fn test_zero_iterations_leaves_grid() {
        let mut grid = Grid::new(6, 6, Cell::Open);
        grid.set(2, 2, Cell::Wall);
        let before = grid.clone();
        let summary = run(&mut grid, Some(Neighbourhood::Moore), rules(1, 0), 0, PassMode::InPlace, |_| {});
        assert_eq!(grid, before);
        assert_eq!(summary, RunSummary { applied: 0, skipped: 0 });
    }

    #[test]
    fn test_no_neighbourhood_skips_every_pass() {
        let mut grid = Grid::new(6, 6, Cell::Open);
        grid.set(3, 3, Cell::Wall);
        let before = grid.clone();
        let mut skipped = Vec::new();
        let summary = run(&mut grid, None, rules(1, 0), 3, PassMode::InPlace, |pass| skipped.push(pass));
        assert_eq!(grid, before, "Skipped passes must not mutate the grid");
        assert_eq!(skipped, vec![0, 1, 2]);
        assert_eq!(summary.skipped, 3);
    }

    #[test]
    fn test_in_place_differs_from_buffered() {
        // Von Neumann on a 3x1 strip with threshold 1: (x-1, y) and the
        // off-grid (x, -1) are sampled.
        let mut grid = Grid::new(3, 1, Cell::Open);
        let mut buffered = grid.clone();
        let r = rules(1, 0);
        step(&mut grid, Neighbourhood::VonNeumann, r, PassMode::InPlace);
        step(&mut buffered, Neighbourhood::VonNeumann, r, PassMode::Buffered);

        // (0,0): west off-grid + south off-grid = 2 > 1 -> wall in both
        // (1,0): in place sees the new wall at (0,0) -> 2 -> wall;
        //        buffered sees open (0,0) -> 1 -> unchanged open
        assert_eq!(grid.get(1, 0), Some(Cell::Wall));
        assert_eq!(buffered.get(1, 0), Some(Cell::Open));
        assert_eq!(grid.count(Cell::Wall), 3);
        assert_eq!(buffered.count(Cell::Wall), 1);
    }

    #[test]
    fn test_in_place_visits_columns_first() {
        // Only (2, 0) starts as wall. (0, 1) sees 3 off-grid cells plus the
        // fresh wall at (0, 0): 4 walls, so it stays open. Visiting rows
        // first would also have walled (1, 0) by then, giving 5.
        let mut grid = Grid::new(3, 3, Cell::Open);
        grid.set(2, 0, Cell::Wall);
        step(&mut grid, Neighbourhood::Moore, rules(5, 3), PassMode::InPlace);

        assert_eq!(grid.get(0, 1), Some(Cell::Open));
        assert_eq!(grid.to_string(), "#.#\n..#\n###\n");
    }
}
