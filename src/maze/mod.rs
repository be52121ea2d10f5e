pub mod grid;
pub mod pixel;

use std::sync::mpsc::SyncSender;

pub use grid::{Grid, GridEvent};
pub use pixel::Pixel;

/// Pixels from one wall line to the next: a 9-pixel cell interior plus the
/// shared wall line.
const CELL_SPAN: u16 = 10;

/// Pixel bitmap of the maze, plus the mapping from cell ids to pixel
/// regions. Cells are numbered row-major in [0, side²); cell interiors are
/// 9×9 blocks separated by single-pixel wall lines, so the bitmap is
/// (10·side + 1) pixels square.
pub struct Maze {
    grid: Grid,
    side: u8,
}

impl Maze {
    /// Creates a new maze with all inter-cell walls closed.
    /// `sender`, when given, receives every subsequent pixel change.
    pub fn new(side: u8, sender: Option<SyncSender<GridEvent>>) -> Self {
        let grid_size = side as u16 * CELL_SPAN + 1;
        let mut maze = Maze {
            grid: Grid::new(grid_size, Pixel::Open, sender),
            side,
        };
        // Wall lattice: every pixel row and column at a multiple of 10
        for line in (0..grid_size).step_by(CELL_SPAN as usize) {
            for k in 0..grid_size {
                maze.grid.set((k, line), Pixel::Wall);
                maze.grid.set((line, k), Pixel::Wall);
            }
        }
        maze
    }

    /// Number of cells along each edge.
    pub fn side(&self) -> u8 {
        self.side
    }

    /// Total number of cells in the maze.
    pub fn num_cells(&self) -> u16 {
        self.side as u16 * self.side as u16
    }

    /// Pixel dimension of the (square) bitmap.
    pub fn grid_size(&self) -> u16 {
        self.grid.size()
    }

    /// Read-only view of the bitmap, row-major, for rendering.
    pub fn snapshot(&self) -> &[Pixel] {
        self.grid.data()
    }

    /// Stops publishing pixel changes over the event channel.
    pub fn detach_events(&mut self) {
        self.grid.detach_events();
    }

    /// Row and column of a cell id.
    ///
    /// # Panics
    /// If `cell` is out of bounds.
    pub fn cell_position(&self, cell: u16) -> (u16, u16) {
        if cell >= self.num_cells() {
            panic!("cell id {} is out of bounds", cell);
        }
        (cell / self.side as u16, cell % self.side as u16)
    }

    /// Carves the wall between two grid-adjacent cells by opening the
    /// 9-pixel run on their shared border. The order of `i` and `j` does
    /// not matter.
    ///
    /// # Returns
    /// `true` if at least one wall pixel was opened, `false` if the run
    /// was already fully open (carving twice is a pixel-wise no-op)
    ///
    /// # Panics
    /// * If either cell id is out of bounds
    /// * If the cells are not grid-adjacent
    pub fn remove_wall(&mut self, i: u16, j: u16) -> bool {
        let mut opened = false;
        for coord in self.border_run(i, j) {
            opened |= self.grid.set(coord, Pixel::Open);
        }
        opened
    }

    /// Checks whether the full border run between two grid-adjacent cells
    /// is open. Panics on the same preconditions as [`Maze::remove_wall`].
    pub fn is_open_between(&self, i: u16, j: u16) -> bool {
        self.border_run(i, j)
            .into_iter()
            .all(|coord| self.grid[coord] == Pixel::Open)
    }

    /// Pixel coordinates of the 9-pixel border run shared by two adjacent
    /// cells. Normalizes the pair (smaller id first) so the arithmetic is
    /// direction-independent.
    fn border_run(&self, i: u16, j: u16) -> [(u16, u16); 9] {
        let (i, j) = if i <= j { (i, j) } else { (j, i) };
        let n = self.side as u16;
        if j >= self.num_cells() {
            panic!("cell id {} is out of bounds", j);
        }
        let (row, col) = (i / n, i % n);
        let mut run = [(0u16, 0u16); 9];
        if j - i == n {
            // Vertically adjacent: the wall runs along the bottom edge of cell i
            let y = row * CELL_SPAN + CELL_SPAN;
            for (k, coord) in run.iter_mut().enumerate() {
                *coord = (col * CELL_SPAN + 1 + k as u16, y);
            }
        } else if j - i == 1 && j / n == row {
            // Horizontally adjacent: the wall runs along the right edge of cell i
            let x = col * CELL_SPAN + CELL_SPAN;
            for (k, coord) in run.iter_mut().enumerate() {
                *coord = (x, row * CELL_SPAN + 1 + k as u16);
            }
        } else {
            panic!("cells {} and {} are not grid-adjacent", i, j);
        }
        run
    }
}

impl std::ops::Index<(u16, u16)> for Maze {
    type Output = Pixel;

    fn index(&self, index: (u16, u16)) -> &Self::Output {
        &self.grid[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lattice_construction() {
        let maze = Maze::new(2, None);
        assert_eq!(maze.grid_size(), 21);
        assert_eq!(maze.num_cells(), 4);
        assert_eq!(maze.snapshot().len(), 21 * 21);
        for k in 0..21 {
            // Wall lines at multiples of 10, in both directions
            assert_eq!(maze[(k, 0)], Pixel::Wall);
            assert_eq!(maze[(k, 10)], Pixel::Wall);
            assert_eq!(maze[(k, 20)], Pixel::Wall);
            assert_eq!(maze[(0, k)], Pixel::Wall);
            assert_eq!(maze[(10, k)], Pixel::Wall);
            assert_eq!(maze[(20, k)], Pixel::Wall);
        }
        // Cell interiors are open
        assert_eq!(maze[(1, 1)], Pixel::Open);
        assert_eq!(maze[(9, 9)], Pixel::Open);
        assert_eq!(maze[(15, 15)], Pixel::Open);
    }

    #[test]
    fn test_cell_position() {
        let maze = Maze::new(3, None);
        assert_eq!(maze.cell_position(0), (0, 0));
        assert_eq!(maze.cell_position(5), (1, 2));
        assert_eq!(maze.cell_position(8), (2, 2));
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_cell_position_out_of_bounds() {
        let maze = Maze::new(2, None);
        maze.cell_position(4);
    }

    #[test]
    fn test_remove_wall_horizontal() {
        let mut maze = Maze::new(2, None);
        assert!(!maze.is_open_between(0, 1));
        assert!(maze.remove_wall(0, 1));
        // Exactly the 9 pixels between the two interiors are open
        for y in 1..=9 {
            assert_eq!(maze[(10, y)], Pixel::Open);
        }
        assert_eq!(maze[(10, 0)], Pixel::Wall);
        assert_eq!(maze[(10, 10)], Pixel::Wall);
        assert!(maze.is_open_between(0, 1));
        // Carving the same wall again is a no-op
        assert!(!maze.remove_wall(0, 1));
    }

    #[test]
    fn test_remove_wall_vertical() {
        let mut maze = Maze::new(2, None);
        assert!(maze.remove_wall(1, 3));
        for x in 11..=19 {
            assert_eq!(maze[(x, 10)], Pixel::Open);
        }
        assert_eq!(maze[(10, 10)], Pixel::Wall);
        assert_eq!(maze[(20, 10)], Pixel::Wall);
        assert!(maze.is_open_between(1, 3));
        // The other walls are untouched
        assert!(!maze.is_open_between(0, 1));
        assert!(!maze.is_open_between(0, 2));
        assert!(!maze.is_open_between(2, 3));
    }

    #[test]
    fn test_remove_wall_normalizes_order() {
        let mut maze = Maze::new(2, None);
        assert!(maze.remove_wall(2, 0));
        assert!(maze.is_open_between(0, 2));
        assert!(!maze.remove_wall(0, 2));
    }

    #[test]
    #[should_panic(expected = "not grid-adjacent")]
    fn test_remove_wall_diagonal_pair() {
        let mut maze = Maze::new(2, None);
        maze.remove_wall(0, 3);
    }

    #[test]
    #[should_panic(expected = "not grid-adjacent")]
    fn test_remove_wall_across_row_boundary() {
        // Cells 1 and 2 differ by one but sit on different rows
        let mut maze = Maze::new(2, None);
        maze.remove_wall(1, 2);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_remove_wall_out_of_bounds() {
        let mut maze = Maze::new(2, None);
        maze.remove_wall(3, 4);
    }
}
