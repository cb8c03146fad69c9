pub mod cell;

pub use cell::{Cell, Direction, Walls};

use crate::error::MazeError;

/// A rectangular maze: a `cols x rows` field of cells with per-cell wall
/// flags.
///
/// Walls are only mutable through `&mut Grid` (generation and decoding);
/// once a grid is handed to a solver by shared reference it is read-only,
/// so arbitrarily many searches may run over the same grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    walls: Box<[Walls]>,
    cols: u16,
    rows: u16,
}

impl Grid {
    /// Creates a grid with every wall up. Fails if either dimension is zero.
    pub fn new(cols: u16, rows: u16) -> Result<Self, MazeError> {
        if cols == 0 || rows == 0 {
            return Err(MazeError::InvalidArgument(format!(
                "grid dimensions must be at least 1x1, got {}x{}",
                cols, rows
            )));
        }
        let walls = vec![Walls::SOLID; cols as usize * rows as usize].into_boxed_slice();
        Ok(Grid { walls, cols, rows })
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// The search entry cell, always the top-left corner.
    pub fn start(&self) -> Cell {
        Cell::new(0, 0)
    }

    /// The search target cell, always the bottom-right corner.
    pub fn goal(&self) -> Cell {
        Cell::new(self.cols - 1, self.rows - 1)
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.x < self.cols && cell.y < self.rows
    }

    fn ravel_index(&self, cell: Cell) -> usize {
        // Overflow-safe since cols and rows are u16 (assuming usize is at least 32 bits)
        cell.y as usize * self.cols as usize + cell.x as usize
    }

    /// Wall flags of a cell. Panics if the cell is out of bounds.
    pub fn walls(&self, cell: Cell) -> Walls {
        assert!(self.contains(cell), "cell {} is out of bounds", cell);
        self.walls[self.ravel_index(cell)]
    }

    pub(crate) fn set_walls(&mut self, cell: Cell, walls: Walls) {
        let idx = self.ravel_index(cell);
        self.walls[idx] = walls;
    }

    /// The grid-adjacent cell in direction `dir`, wall or no wall.
    /// `None` when it would fall off the grid.
    pub fn adjacent(&self, cell: Cell, dir: Direction) -> Option<Cell> {
        let next = match dir {
            Direction::Left => Cell::new(cell.x.checked_sub(1)?, cell.y),
            Direction::Right => Cell::new(cell.x.checked_add(1)?, cell.y),
            Direction::Up => Cell::new(cell.x, cell.y.checked_sub(1)?),
            Direction::Down => Cell::new(cell.x, cell.y.checked_add(1)?),
        };
        self.contains(next).then_some(next)
    }

    /// Wall-open neighbors of a cell, in the fixed left, right, up, down
    /// order. Search determinism relies on this order.
    pub fn neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        let walls = self.walls(cell);
        Direction::ALL
            .into_iter()
            .filter(move |&dir| !walls.is_solid(dir))
            .filter_map(move |dir| self.adjacent(cell, dir))
    }

    /// Whether a wall separates two grid-adjacent cells.
    /// Fails when `a` and `b` are not grid-adjacent.
    pub fn wall_between(&self, a: Cell, b: Cell) -> Result<bool, MazeError> {
        let dir = self.adjacency(a, b)?;
        Ok(self.walls(a).is_solid(dir))
    }

    /// Knocks down the wall between two grid-adjacent cells, clearing both
    /// facing flags so the symmetry invariant holds by construction.
    /// Removing an already-open wall is a no-op.
    pub fn open_between(&mut self, a: Cell, b: Cell) -> Result<(), MazeError> {
        let dir = self.adjacency(a, b)?;
        let mut walls_a = self.walls(a);
        walls_a.set(dir, false);
        self.set_walls(a, walls_a);
        let mut walls_b = self.walls(b);
        walls_b.set(dir.opposite(), false);
        self.set_walls(b, walls_b);
        Ok(())
    }

    fn adjacency(&self, a: Cell, b: Cell) -> Result<Direction, MazeError> {
        if !self.contains(a) || !self.contains(b) {
            return Err(MazeError::InvalidArgument(format!(
                "cells {} and {} must both be inside the {}x{} grid",
                a, b, self.cols, self.rows
            )));
        }
        a.direction_to(b).ok_or_else(|| {
            MazeError::InvalidArgument(format!("cells {} and {} are not grid-adjacent", a, b))
        })
    }

    /// All cells in row-major order (y outer, x inner). The persisted
    /// encoding walks cells in exactly this order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.rows).flat_map(move |y| (0..self.cols).map(move |x| Cell::new(x, y)))
    }

    pub fn cell_count(&self) -> usize {
        self.cols as usize * self.rows as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_dimensions() {
        assert!(matches!(
            Grid::new(0, 5),
            Err(MazeError::InvalidArgument(_))
        ));
        assert!(matches!(
            Grid::new(5, 0),
            Err(MazeError::InvalidArgument(_))
        ));
        assert!(Grid::new(1, 1).is_ok());
    }

    #[test]
    fn new_grid_is_fully_walled() {
        let grid = Grid::new(3, 3).unwrap();
        assert!(grid.cells().all(|c| grid.walls(c) == Walls::SOLID));
        assert_eq!(grid.neighbors(Cell::new(1, 1)).count(), 0);
    }

    #[test]
    fn open_between_clears_both_sides() {
        let mut grid = Grid::new(3, 3).unwrap();
        let a = Cell::new(1, 1);
        let b = Cell::new(2, 1);
        grid.open_between(a, b).unwrap();
        assert!(!grid.wall_between(a, b).unwrap());
        assert!(!grid.wall_between(b, a).unwrap());
        assert!(!grid.walls(a).right);
        assert!(!grid.walls(b).left);
        // Opening an already-open wall is a no-op
        grid.open_between(a, b).unwrap();
        assert!(!grid.wall_between(a, b).unwrap());
    }

    #[test]
    fn wall_between_rejects_non_adjacent_cells() {
        let grid = Grid::new(4, 4).unwrap();
        assert!(matches!(
            grid.wall_between(Cell::new(0, 0), Cell::new(2, 0)),
            Err(MazeError::InvalidArgument(_))
        ));
        assert!(matches!(
            grid.wall_between(Cell::new(0, 0), Cell::new(1, 1)),
            Err(MazeError::InvalidArgument(_))
        ));
        assert!(matches!(
            grid.wall_between(Cell::new(0, 0), Cell::new(0, 0)),
            Err(MazeError::InvalidArgument(_))
        ));
    }

    #[test]
    fn wall_between_rejects_out_of_bounds_cells() {
        let grid = Grid::new(2, 2).unwrap();
        assert!(matches!(
            grid.wall_between(Cell::new(1, 1), Cell::new(2, 1)),
            Err(MazeError::InvalidArgument(_))
        ));
    }

    #[test]
    fn neighbors_follow_fixed_order() {
        let mut grid = Grid::new(3, 3).unwrap();
        let center = Cell::new(1, 1);
        for dir in Direction::ALL {
            let next = grid.adjacent(center, dir).unwrap();
            grid.open_between(center, next).unwrap();
        }
        let neighbors: Vec<Cell> = grid.neighbors(center).collect();
        // Left, right, up, down
        assert_eq!(
            neighbors,
            vec![
                Cell::new(0, 1),
                Cell::new(2, 1),
                Cell::new(1, 0),
                Cell::new(1, 2),
            ]
        );
    }

    #[test]
    fn corner_cells_have_no_out_of_bounds_neighbors() {
        let mut grid = Grid::new(2, 2).unwrap();
        grid.open_between(Cell::new(0, 0), Cell::new(1, 0)).unwrap();
        grid.open_between(Cell::new(0, 0), Cell::new(0, 1)).unwrap();
        let neighbors: Vec<Cell> = grid.neighbors(Cell::new(0, 0)).collect();
        assert_eq!(neighbors, vec![Cell::new(1, 0), Cell::new(0, 1)]);
    }
}
