use std::io::{Stdout, Write};

use crossterm::{
    cursor, queue,
    style::{self, Color, StyledContent, Stylize},
    terminal,
};
use unicode_truncate::UnicodeTruncateStr;

use mazewalk::maze::{Cell, Direction, Grid};

/// What a canvas position is showing. Each tile prints as two characters so
/// cells come out roughly square in a terminal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tile {
    Wall,
    Floor,
    Start,
    Goal,
    /// Frontier cell discovered but not finalized.
    Open,
    /// Frontier cell finalized by the search.
    Closed,
    /// Cell on the final route.
    Route,
    Player,
    /// Cell the player already walked through.
    Trail,
}

impl Tile {
    /// Width of one tile when rendered, in character columns.
    pub const WIDTH: u16 = 2;

    fn styled(self) -> StyledContent<&'static str> {
        match self {
            Tile::Wall => "██".with(Color::DarkGrey),
            Tile::Floor => "  ".with(Color::Reset),
            Tile::Start => "St".with(Color::Green).bold(),
            Tile::Goal => "Go".with(Color::Red).bold(),
            Tile::Open => "░░".with(Color::Blue),
            Tile::Closed => "▒▒".with(Color::Yellow),
            Tile::Route => "◆ ".with(Color::Cyan),
            Tile::Player => "@ ".with(Color::Magenta).bold(),
            Tile::Trail => "· ".with(Color::DarkMagenta),
        }
    }
}

/// Draws a wall-flag grid on the terminal.
///
/// A `cols x rows` maze maps onto a `(2*cols+1) x (2*rows+1)` canvas the way
/// the classic character-maze layout does: odd/odd positions are cell
/// centers, the positions between them show whether the shared wall is up.
pub struct MazeCanvas {
    cols: u16,
    rows: u16,
}

impl MazeCanvas {
    pub fn new(grid: &Grid) -> Self {
        MazeCanvas {
            cols: grid.cols(),
            rows: grid.rows(),
        }
    }

    /// Maximum maze dimensions that fit a terminal of the given size.
    pub fn max_maze_size(term_cols: u16, term_rows: u16) -> (u16, u16) {
        let fit = |available: u16| ((available.saturating_sub(1)) / 2).max(1);
        (fit(term_cols / Tile::WIDTH), fit(term_rows))
    }

    /// Whether a grid's canvas fits a terminal of the given size. The canvas
    /// arithmetic is `u16`, so grids past the displayable size must be
    /// rejected before any drawing happens.
    pub fn fits_terminal(grid: &Grid, term_cols: u16, term_rows: u16) -> bool {
        let (max_cols, max_rows) = Self::max_maze_size(term_cols, term_rows);
        grid.cols() <= max_cols && grid.rows() <= max_rows
    }

    /// Full redraw of walls, floors, and the start/goal markers.
    pub fn draw_grid(&self, stdout: &mut Stdout, grid: &Grid) -> std::io::Result<()> {
        for canvas_y in 0..self.rows * 2 + 1 {
            queue!(stdout, cursor::MoveTo(0, canvas_y))?;
            for canvas_x in 0..self.cols * 2 + 1 {
                let tile = self.tile_at(grid, canvas_x, canvas_y);
                queue!(stdout, style::PrintStyledContent(tile.styled()))?;
            }
        }
        self.draw_cell(stdout, grid.start(), Tile::Start)?;
        self.draw_cell(stdout, grid.goal(), Tile::Goal)?;
        stdout.flush()
    }

    fn tile_at(&self, grid: &Grid, canvas_x: u16, canvas_y: u16) -> Tile {
        let x_odd = canvas_x % 2 == 1;
        let y_odd = canvas_y % 2 == 1;
        match (x_odd, y_odd) {
            // Cell center
            (true, true) => Tile::Floor,
            // Corner post, always solid
            (false, false) => Tile::Wall,
            // Vertical wall between horizontally adjacent cells
            (false, true) => {
                if canvas_x == 0 || canvas_x == self.cols * 2 {
                    return Tile::Wall;
                }
                let right = Cell::new(canvas_x / 2, canvas_y / 2);
                if grid.walls(right).is_solid(Direction::Left) {
                    Tile::Wall
                } else {
                    Tile::Floor
                }
            }
            // Horizontal wall between vertically adjacent cells
            (true, false) => {
                if canvas_y == 0 || canvas_y == self.rows * 2 {
                    return Tile::Wall;
                }
                let below = Cell::new(canvas_x / 2, canvas_y / 2);
                if grid.walls(below).is_solid(Direction::Up) {
                    Tile::Wall
                } else {
                    Tile::Floor
                }
            }
        }
    }

    /// Overlay a marker on a single cell center.
    pub fn draw_cell(&self, stdout: &mut Stdout, cell: Cell, tile: Tile) -> std::io::Result<()> {
        queue!(
            stdout,
            cursor::MoveTo((cell.x * 2 + 1) * Tile::WIDTH, cell.y * 2 + 1),
            style::PrintStyledContent(tile.styled())
        )
    }

    /// Overlay a marker on many cells, skipping the start and goal so their
    /// markers stay visible.
    pub fn draw_cells<'a>(
        &self,
        stdout: &mut Stdout,
        grid: &Grid,
        cells: impl Iterator<Item = &'a Cell>,
        tile: Tile,
    ) -> std::io::Result<()> {
        for &cell in cells {
            if cell == grid.start() || cell == grid.goal() {
                continue;
            }
            self.draw_cell(stdout, cell, tile)?;
        }
        stdout.flush()
    }

    /// Paint a route: each path cell plus the open wall gaps between
    /// consecutive cells, so the route reads as a continuous line.
    pub fn draw_path(
        &self,
        stdout: &mut Stdout,
        grid: &Grid,
        path: &[Cell],
    ) -> std::io::Result<()> {
        self.draw_cells(stdout, grid, path.iter(), Tile::Route)?;
        for pair in path.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            // Midpoint between the two cell centers on the canvas
            queue!(
                stdout,
                cursor::MoveTo((a.x + b.x + 1) * Tile::WIDTH, a.y + b.y + 1),
                style::PrintStyledContent(Tile::Route.styled())
            )?;
        }
        stdout.flush()
    }

    /// Print a status message on the line below the canvas, truncated to the
    /// terminal width. `None` clears the line.
    pub fn status(
        &self,
        stdout: &mut Stdout,
        message: Option<StyledContent<String>>,
    ) -> std::io::Result<()> {
        let status_row = self.rows * 2 + 1;
        queue!(
            stdout,
            cursor::MoveTo(0, status_row),
            terminal::Clear(terminal::ClearType::CurrentLine)
        )?;
        if let Some(message) = message {
            let width = terminal::size().map(|(w, _)| w).unwrap_or(u16::MAX);
            queue!(
                stdout,
                style::PrintStyledContent(truncate_to_width(&message, width as usize))
            )?;
        }
        stdout.flush()
    }
}

/// Truncate a status message to the terminal width, keeping its full style
/// (color and attributes) intact.
fn truncate_to_width(message: &StyledContent<String>, width: usize) -> StyledContent<String> {
    let (truncated, _) = message.content().unicode_truncate(width);
    StyledContent::new(*message.style(), truncated.to_string())
}
