use crate::grid::{Cell, Grid};
use rand::Rng;

/// Stamp every cell wall or open from the RNG stream
///
/// One draw in `0..100` per cell, visited column by column (`x` outer,
/// `y` inner). A cell becomes a wall when its draw is below `fill_percent`,
/// so 0 gives an all-open grid and 100 an all-wall grid.
pub fn random_fill<R: Rng>(grid: &mut Grid, rng: &mut R, fill_percent: u32) {
    for x in 0..grid.width() {
        for y in 0..grid.height() {
            let roll: u32 = rng.gen_range(0..100);
            let cell = if roll < fill_percent { Cell::Wall } else { Cell::Open };
            grid.set(x, y, cell);
        }
    }
}
