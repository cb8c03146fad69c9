//! Flat persisted encoding for grids.
//!
//! A grid is stored as a little-endian header `cols: u16, rows: u16`
//! followed by one record per cell in row-major order (`y` outer, `x`
//! inner): `x: u16, y: u16, mask: u8`. The mask packs the four wall flags
//! (bit 0 = top, bit 1 = bottom, bit 2 = left, bit 3 = right); the high
//! four bits are reserved and must be zero.
//!
//! Decoding validates structure and the wall-symmetry invariant and rejects
//! anything malformed outright — a symmetry violation signals a writer bug
//! and is never silently repaired.

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::error::MazeError;
use crate::maze::{Cell, Direction, Grid, Walls};

const MASK_TOP: u8 = 1;
const MASK_BOTTOM: u8 = 1 << 1;
const MASK_LEFT: u8 = 1 << 2;
const MASK_RIGHT: u8 = 1 << 3;
const MASK_RESERVED: u8 = !(MASK_TOP | MASK_BOTTOM | MASK_LEFT | MASK_RIGHT);

/// Record size in bytes: x, y, wall mask.
const RECORD_LEN: usize = 5;
/// Header size in bytes: cols, rows.
const HEADER_LEN: usize = 4;

fn pack(walls: Walls) -> u8 {
    let mut mask = 0;
    if walls.top {
        mask |= MASK_TOP;
    }
    if walls.bottom {
        mask |= MASK_BOTTOM;
    }
    if walls.left {
        mask |= MASK_LEFT;
    }
    if walls.right {
        mask |= MASK_RIGHT;
    }
    mask
}

fn unpack(mask: u8) -> Walls {
    Walls {
        top: mask & MASK_TOP != 0,
        bottom: mask & MASK_BOTTOM != 0,
        left: mask & MASK_LEFT != 0,
        right: mask & MASK_RIGHT != 0,
    }
}

/// Serializes a grid into the flat record format.
pub fn encode(grid: &Grid) -> Vec<u8> {
    let mut buf = Vec::with_capacity(HEADER_LEN + grid.cell_count() * RECORD_LEN);
    // Writing into a Vec cannot fail
    buf.write_u16::<LittleEndian>(grid.cols()).expect("vec write");
    buf.write_u16::<LittleEndian>(grid.rows()).expect("vec write");
    for cell in grid.cells() {
        buf.write_u16::<LittleEndian>(cell.x).expect("vec write");
        buf.write_u16::<LittleEndian>(cell.y).expect("vec write");
        buf.write_u8(pack(grid.walls(cell))).expect("vec write");
    }
    buf
}

/// Deserializes a grid from the flat record format, validating structure
/// and the wall-symmetry invariant. Never yields a partially-initialized
/// grid: any defect fails the whole decode.
pub fn decode(bytes: &[u8]) -> Result<Grid, MazeError> {
    let mut reader = bytes;
    let truncated = |_| MazeError::CorruptMazeData("unexpected end of input".into());

    let cols = reader.read_u16::<LittleEndian>().map_err(truncated)?;
    let rows = reader.read_u16::<LittleEndian>().map_err(truncated)?;
    let mut grid = Grid::new(cols, rows).map_err(|e| {
        MazeError::CorruptMazeData(format!("invalid header dimensions: {}", e))
    })?;

    for y in 0..rows {
        for x in 0..cols {
            let record_x = reader.read_u16::<LittleEndian>().map_err(truncated)?;
            let record_y = reader.read_u16::<LittleEndian>().map_err(truncated)?;
            let mask = reader.read_u8().map_err(truncated)?;

            if (record_x, record_y) != (x, y) {
                return Err(MazeError::CorruptMazeData(format!(
                    "record out of row-major order: expected ({}, {}), found ({}, {})",
                    x, y, record_x, record_y
                )));
            }
            if mask & MASK_RESERVED != 0 {
                return Err(MazeError::CorruptMazeData(format!(
                    "reserved wall-mask bits set at ({}, {}): {:#04x}",
                    x, y, mask
                )));
            }
            grid.set_walls(Cell::new(x, y), unpack(mask));
        }
    }

    if !reader.is_empty() {
        return Err(MazeError::CorruptMazeData(format!(
            "{} trailing byte(s) after the last cell record",
            reader.len()
        )));
    }

    verify_symmetry(&grid)?;
    Ok(grid)
}

/// Checks that no decoded passage is one-way: each cell's right/bottom wall
/// flag must agree with the neighbor's facing flag.
fn verify_symmetry(grid: &Grid) -> Result<(), MazeError> {
    for cell in grid.cells() {
        for dir in [Direction::Right, Direction::Down] {
            let Some(neighbor) = grid.adjacent(cell, dir) else {
                continue;
            };
            if grid.walls(cell).is_solid(dir) != grid.walls(neighbor).is_solid(dir.opposite()) {
                return Err(MazeError::CorruptMazeData(format!(
                    "asymmetric wall between {} and {}",
                    cell, neighbor
                )));
            }
        }
    }
    Ok(())
}
