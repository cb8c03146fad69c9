use std::fmt;

/// A cell coordinate in the maze.
///
/// Cells are small value types: two cells are equal iff their coordinates
/// match. Search state keeps cells as map keys and set members, so equality
/// and hashing go through `(x, y)` only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub x: u16,
    pub y: u16,
}

impl Cell {
    pub const fn new(x: u16, y: u16) -> Self {
        Cell { x, y }
    }

    /// Manhattan distance to another cell.
    pub fn manhattan(self, other: Cell) -> u64 {
        self.x.abs_diff(other.x) as u64 + self.y.abs_diff(other.y) as u64
    }

    /// Whether `other` is grid-adjacent (Manhattan distance exactly 1).
    pub fn is_adjacent(self, other: Cell) -> bool {
        self.manhattan(other) == 1
    }

    /// The direction pointing from `self` toward a grid-adjacent `other`,
    /// or `None` if the two cells are not grid-adjacent.
    pub fn direction_to(self, other: Cell) -> Option<Direction> {
        if !self.is_adjacent(other) {
            return None;
        }
        let dir = if other.x < self.x {
            Direction::Left
        } else if other.x > self.x {
            Direction::Right
        } else if other.y < self.y {
            Direction::Up
        } else {
            Direction::Down
        };
        Some(dir)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The four cardinal directions a passage can face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Fixed scan order for neighbor enumeration. Every search breaks ties by
    /// discovery order, so this order must never change.
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }
}

/// Wall flags of a single cell. A solid flag means the passage in that
/// direction is blocked.
///
/// The grid keeps these symmetric: whenever the wall between two adjacent
/// cells is removed, both facing flags are cleared together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Walls {
    pub top: bool,
    pub bottom: bool,
    pub left: bool,
    pub right: bool,
}

impl Walls {
    /// All four walls up.
    pub const SOLID: Walls = Walls {
        top: true,
        bottom: true,
        left: true,
        right: true,
    };

    /// Whether the wall facing `dir` is solid.
    pub fn is_solid(self, dir: Direction) -> bool {
        match dir {
            Direction::Left => self.left,
            Direction::Right => self.right,
            Direction::Up => self.top,
            Direction::Down => self.bottom,
        }
    }

    /// Set the wall facing `dir`.
    pub fn set(&mut self, dir: Direction, solid: bool) {
        match dir {
            Direction::Left => self.left = solid,
            Direction::Right => self.right = solid,
            Direction::Up => self.top = solid,
            Direction::Down => self.bottom = solid,
        }
    }
}

impl Default for Walls {
    fn default() -> Self {
        Walls::SOLID
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_equality_is_by_coordinates() {
        assert_eq!(Cell::new(2, 3), Cell::new(2, 3));
        assert_ne!(Cell::new(2, 3), Cell::new(3, 2));
    }

    #[test]
    fn direction_to_adjacent_cells() {
        let c = Cell::new(1, 1);
        assert_eq!(c.direction_to(Cell::new(0, 1)), Some(Direction::Left));
        assert_eq!(c.direction_to(Cell::new(2, 1)), Some(Direction::Right));
        assert_eq!(c.direction_to(Cell::new(1, 0)), Some(Direction::Up));
        assert_eq!(c.direction_to(Cell::new(1, 2)), Some(Direction::Down));
        // Diagonal and distant cells are not adjacent
        assert_eq!(c.direction_to(Cell::new(2, 2)), None);
        assert_eq!(c.direction_to(Cell::new(1, 1)), None);
        assert_eq!(c.direction_to(Cell::new(1, 5)), None);
    }

    #[test]
    fn walls_set_and_query() {
        let mut walls = Walls::SOLID;
        assert!(Direction::ALL.iter().all(|&d| walls.is_solid(d)));
        walls.set(Direction::Up, false);
        assert!(!walls.is_solid(Direction::Up));
        assert!(walls.is_solid(Direction::Down));
    }
}
