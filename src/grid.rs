use glam::IVec2;
use std::fmt;

/// State of a single map cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Cell {
    #[default]
    Open = 0,
    Wall = 1,
}

impl Cell {
    /// Numeric value of the cell (0 for open, 1 for wall)
    pub fn value(self) -> u32 {
        self as u32
    }

    pub fn is_wall(self) -> bool {
        self == Cell::Wall
    }
}

/// Dense 2D occupancy grid
///
/// Cells are addressed by `(x, y)` with `x` in `0..width` and `y` in
/// `0..height`. The dimensions are fixed at allocation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Allocate a grid with every cell set to `fill`
    pub fn new(width: usize, height: usize, fill: Cell) -> Self {
        Grid {
            width,
            height,
            cells: vec![fill; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Get the cell at `(x, y)`, or `None` when outside the grid
    pub fn get(&self, x: usize, y: usize) -> Option<Cell> {
        if x < self.width && y < self.height {
            Some(self.cells[self.index(x, y)])
        } else {
            None
        }
    }

    /// Set the cell at `(x, y)`. Writes outside the grid are ignored.
    pub fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if x < self.width && y < self.height {
            let idx = self.index(x, y);
            self.cells[idx] = cell;
        }
    }

    /// Check whether a signed position lies inside the grid
    pub fn contains(&self, pos: IVec2) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    /// Wall contribution of a signed position: off-grid positions count as wall
    pub fn wall_value(&self, pos: IVec2) -> u32 {
        if self.contains(pos) {
            self.cells[self.index(pos.x as usize, pos.y as usize)].value()
        } else {
            1
        }
    }

    /// Number of cells equal to `cell`
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    /// Row-major view of the cells, row 0 first
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Cells of one row, west to east
    pub fn row(&self, y: usize) -> &[Cell] {
        let start = y * self.width;
        &self.cells[start..start + self.width]
    }
}

impl fmt::Display for Grid {
    /// Render with the northernmost row first, `#` for wall and `.` for open
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (0..self.height).rev() {
            for cell in self.row(y) {
                let c = if cell.is_wall() { '#' } else { '.' };
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_dimensions() {
        let grid = Grid::new(7, 3, Cell::Open);
        assert_eq!(grid.width(), 7);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.cells().len(), 21);
        assert_eq!(grid.count(Cell::Open), 21);
    }

    #[test]
    fn test_get_and_set() {
        let mut grid = Grid::new(4, 4, Cell::Open);
        grid.set(2, 3, Cell::Wall);
        assert_eq!(grid.get(2, 3), Some(Cell::Wall));
        assert_eq!(grid.get(3, 2), Some(Cell::Open));
        assert_eq!(grid.get(4, 0), None, "x past the edge should be None");

        // Out of range writes are dropped
        grid.set(10, 10, Cell::Wall);
        assert_eq!(grid.count(Cell::Wall), 1);
    }

    #[test]
    fn test_off_grid_counts_as_wall() {
        let grid = Grid::new(3, 3, Cell::Open);
        assert_eq!(grid.wall_value(IVec2::new(-1, 0)), 1);
        assert_eq!(grid.wall_value(IVec2::new(0, 3)), 1);
        assert_eq!(grid.wall_value(IVec2::new(1, 1)), 0);
    }

    #[test]
    fn test_display_puts_north_first() {
        let mut grid = Grid::new(2, 2, Cell::Open);
        grid.set(0, 1, Cell::Wall);
        assert_eq!(grid.to_string(), "#.\n..\n");
    }

    #[test]
    fn test_degenerate_grid() {
        let grid = Grid::new(1, 1, Cell::Wall);
        assert_eq!(grid.count(Cell::Wall), 1);
        assert_eq!(grid.row(0), &[Cell::Wall]);
    }
}
