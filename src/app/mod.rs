mod render;

use std::io::{Stdout, Write};
use std::time::Duration;

use crossterm::{
    ExecutableCommand, QueueableCommand, cursor,
    event::{self, KeyCode},
    execute, queue,
    style::{self, Attribute, Color, Stylize},
    terminal::{self, ClearType},
};
use rand::{Rng, SeedableRng, rngs::StdRng};

use mazewalk::{
    Solver, Step, StepwiseSearch, find_all_paths, generate,
    maze::{Direction, Grid},
    score, solve, storage,
};
use render::{MazeCanvas, Tile};

/// Delay between stepwise-search frames.
const STEP_FRAME_DELAY: Duration = Duration::from_millis(25);
/// Enumeration is exponential; refuse to run it past this many cells.
const MAX_ENUMERATION_CELLS: usize = 64;
/// File the save/load menu entries use.
const SAVE_FILE: &str = "mazewalk.maze";

#[derive(Debug, Clone, Copy, PartialEq)]
enum MenuAction {
    WatchAStar,
    SolveUniformCost,
    SolveAStar,
    CountRoutes,
    Play,
    Save,
    Load,
    NewMaze,
    Exit,
}

impl std::fmt::Display for MenuAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MenuAction::WatchAStar => write!(f, "Watch A* search step by step"),
            MenuAction::SolveUniformCost => write!(f, "Solve with Uniform-Cost Search (BFS)"),
            MenuAction::SolveAStar => write!(f, "Solve with A* Search"),
            MenuAction::CountRoutes => write!(f, "Count all simple routes"),
            MenuAction::Play => write!(f, "Play: walk the maze yourself"),
            MenuAction::Save => write!(f, "Save maze to file"),
            MenuAction::Load => write!(f, "Load maze from file"),
            MenuAction::NewMaze => write!(f, "Generate a new maze"),
            MenuAction::Exit => write!(f, "Exit"),
        }
    }
}

const MENU: [MenuAction; 9] = [
    MenuAction::WatchAStar,
    MenuAction::SolveUniformCost,
    MenuAction::SolveAStar,
    MenuAction::CountRoutes,
    MenuAction::Play,
    MenuAction::Save,
    MenuAction::Load,
    MenuAction::NewMaze,
    MenuAction::Exit,
];

/// Set a panic hook to restore terminal state on panic, so the terminal is
/// not left in raw mode or the alternate screen
fn set_panic_hook() {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal(&mut std::io::stdout()); // ignore any errors as we are already failing
        hook(panic_info);
    }));
}

/// Setup terminal in raw mode and enter alternate screen
pub fn setup_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
    terminal::enable_raw_mode()?;
    set_panic_hook();
    queue!(
        stdout,
        terminal::EnterAlternateScreen,
        terminal::Clear(ClearType::All),
        cursor::Hide,
        cursor::MoveTo(0, 0)
    )?;
    stdout.flush()
}

/// Restore terminal to original state
pub fn restore_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
    queue!(stdout, terminal::LeaveAlternateScreen, cursor::Show)?;
    stdout.flush()?;
    terminal::disable_raw_mode()
}

/// Main application loop: ask for maze parameters, then serve the action
/// menu until the user exits.
pub fn run(stdout: &mut Stdout) -> std::io::Result<()> {
    let Some((cols, rows)) = ask_maze_dimensions(stdout)? else {
        return Ok(());
    };
    let Some(seed) = ask_seed(stdout)? else {
        return Ok(());
    };
    let Some(extra_passages) = ask_extra_passages(stdout)? else {
        return Ok(());
    };

    let mut grid = match generate(cols, rows, seed, extra_passages) {
        Ok(grid) => grid,
        Err(e) => {
            // Dimensions were validated already, so this should not happen
            tracing::error!("[app] generation failed: {}", e);
            return Ok(());
        }
    };
    tracing::info!(
        "[app] generated {}x{} maze (seed {}, {} extra passages)",
        cols,
        rows,
        seed,
        extra_passages
    );

    loop {
        execute!(stdout, terminal::Clear(ClearType::All), cursor::MoveTo(0, 0))?;
        let action = match select_from_menu(
            stdout,
            "Pick an action (use arrow keys and Enter, or Esc to exit):",
            &MENU,
        )? {
            Some(action) => action,
            None => return Ok(()),
        };
        tracing::debug!("[app] selected action: {:?}", action);

        execute!(stdout, terminal::Clear(ClearType::All), cursor::MoveTo(0, 0))?;
        let canvas = MazeCanvas::new(&grid);
        match action {
            MenuAction::WatchAStar => watch_astar(stdout, &canvas, &grid)?,
            MenuAction::SolveUniformCost => solve_and_show(stdout, &canvas, &grid, Solver::UniformCost)?,
            MenuAction::SolveAStar => solve_and_show(stdout, &canvas, &grid, Solver::AStar)?,
            MenuAction::CountRoutes => count_routes(stdout, &canvas, &grid)?,
            MenuAction::Play => play(stdout, &canvas, &grid)?,
            MenuAction::Save => {
                canvas.draw_grid(stdout, &grid)?;
                let message = match std::fs::write(SAVE_FILE, storage::encode(&grid)) {
                    Ok(()) => format!("Maze saved to {}", SAVE_FILE).with(Color::Green),
                    Err(e) => format!("Save failed: {}", e).with(Color::Red),
                };
                canvas.status(stdout, Some(message))?;
                wait_for_key(&[KeyCode::Enter, KeyCode::Esc])?;
            }
            MenuAction::Load => {
                let message = match load_maze() {
                    // A decoded maze can be arbitrarily large; only accept
                    // what the canvas can actually display
                    Ok(loaded) => {
                        let (term_cols, term_rows) = terminal::size()?;
                        if MazeCanvas::fits_terminal(&loaded, term_cols, term_rows.saturating_sub(2))
                        {
                            grid = loaded;
                            format!("Maze loaded from {}", SAVE_FILE).with(Color::Green)
                        } else {
                            format!(
                                "Loaded maze is {}x{}, too large for this terminal.",
                                loaded.cols(),
                                loaded.rows()
                            )
                            .with(Color::Red)
                        }
                    }
                    Err(e) => format!("Load failed: {}", e).with(Color::Red),
                };
                let canvas = MazeCanvas::new(&grid);
                canvas.draw_grid(stdout, &grid)?;
                canvas.status(stdout, Some(message))?;
                wait_for_key(&[KeyCode::Enter, KeyCode::Esc])?;
            }
            MenuAction::NewMaze => {
                // Fresh layout, same dimensions and passage count
                let new_seed = rand::rng().random();
                if let Ok(new_grid) = generate(cols, rows, new_seed, extra_passages) {
                    grid = new_grid;
                    tracing::info!("[app] regenerated maze with seed {}", new_seed);
                }
            }
            MenuAction::Exit => return Ok(()),
        }
    }
}

fn load_maze() -> Result<Grid, String> {
    let bytes = std::fs::read(SAVE_FILE).map_err(|e| e.to_string())?;
    storage::decode(&bytes).map_err(|e| e.to_string())
}

/// Drive the stepwise A* search one expansion per frame, painting the open
/// and closed sets as they evolve. Esc cancels mid-search.
fn watch_astar(stdout: &mut Stdout, canvas: &MazeCanvas, grid: &Grid) -> std::io::Result<()> {
    canvas.draw_grid(stdout, grid)?;
    canvas.status(
        stdout,
        Some("Watching A*: open ░░, closed ▒▒. Esc to cancel.".to_string().with(Color::Cyan)),
    )?;

    let mut search = StepwiseSearch::new(grid);
    loop {
        match search.step() {
            Step::InProgress(frontier) => {
                canvas.draw_cells(stdout, grid, frontier.closed.iter(), Tile::Closed)?;
                canvas.draw_cells(stdout, grid, frontier.open.iter(), Tile::Open)?;
            }
            Step::Found(path) => {
                canvas.draw_path(stdout, grid, &path)?;
                canvas.status(
                    stdout,
                    Some(
                        format!("Path found: {} cells. Press Enter to continue.", path.len())
                            .with(Color::Green)
                            .bold(),
                    ),
                )?;
                break;
            }
            Step::Exhausted => {
                canvas.status(
                    stdout,
                    Some("No path exists. Press Enter to continue.".to_string().with(Color::Red)),
                )?;
                break;
            }
        }
        // Esc cancels the animation
        if event::poll(STEP_FRAME_DELAY)?
            && let event::Event::Key(key) = event::read()?
            && key.kind == event::KeyEventKind::Press
            && key.code == KeyCode::Esc
        {
            return Ok(());
        }
    }
    wait_for_key(&[KeyCode::Enter, KeyCode::Esc])?;
    Ok(())
}

/// One-shot solve: paint the expanded set, then the route on top.
fn solve_and_show(
    stdout: &mut Stdout,
    canvas: &MazeCanvas,
    grid: &Grid,
    solver: Solver,
) -> std::io::Result<()> {
    canvas.draw_grid(stdout, grid)?;
    let solution = solve(grid, solver);
    canvas.draw_cells(stdout, grid, solution.expanded.iter(), Tile::Closed)?;
    let message = if solution.path.is_empty() {
        format!("{}: no path exists.", solver).with(Color::Red)
    } else {
        canvas.draw_path(stdout, grid, &solution.path)?;
        format!(
            "{}: path of {} cells, {} cells expanded.",
            solver,
            solution.path.len(),
            solution.expanded.len()
        )
        .with(Color::Green)
    };
    canvas.status(stdout, Some(message))?;
    wait_for_key(&[KeyCode::Enter, KeyCode::Esc])?;
    Ok(())
}

/// Exhaustive route count, refused on grids large enough to blow up.
fn count_routes(stdout: &mut Stdout, canvas: &MazeCanvas, grid: &Grid) -> std::io::Result<()> {
    canvas.draw_grid(stdout, grid)?;
    let message = if grid.cell_count() > MAX_ENUMERATION_CELLS {
        format!(
            "Grid too large to enumerate (max {} cells).",
            MAX_ENUMERATION_CELLS
        )
        .with(Color::Yellow)
    } else {
        let paths = find_all_paths(grid);
        if let Some(shortest) = paths.iter().min_by_key(|p| p.len()) {
            canvas.draw_path(stdout, grid, shortest)?;
        }
        format!("{} simple route(s) from start to goal.", paths.len()).with(Color::Green)
    };
    canvas.status(stdout, Some(message))?;
    wait_for_key(&[KeyCode::Enter, KeyCode::Esc])?;
    Ok(())
}

/// Let the user walk the maze with the arrow keys. Reaching the goal scores
/// the walked path against the uniform-cost optimal route.
fn play(stdout: &mut Stdout, canvas: &MazeCanvas, grid: &Grid) -> std::io::Result<()> {
    canvas.draw_grid(stdout, grid)?;
    canvas.status(
        stdout,
        Some("Arrow keys to move, Esc to give up.".to_string().with(Color::Cyan)),
    )?;

    let mut current = grid.start();
    let mut walked = vec![current];
    canvas.draw_cell(stdout, current, Tile::Player)?;
    stdout.flush()?;

    loop {
        let event::Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != event::KeyEventKind::Press {
            continue;
        }
        let dir = match key.code {
            KeyCode::Esc => return Ok(()),
            KeyCode::Left => Direction::Left,
            KeyCode::Right => Direction::Right,
            KeyCode::Up => Direction::Up,
            KeyCode::Down => Direction::Down,
            _ => continue,
        };

        // A move is legal when the wall toward `dir` is open and the
        // neighbor exists
        if grid.walls(current).is_solid(dir) {
            continue;
        }
        let Some(next) = grid.adjacent(current, dir) else {
            continue;
        };

        let trail = if current == grid.start() { Tile::Start } else { Tile::Trail };
        canvas.draw_cell(stdout, current, trail)?;
        current = next;
        canvas.draw_cell(stdout, current, Tile::Player)?;
        stdout.flush()?;
        // Record each cell the first time it is entered
        if !walked.contains(&current) {
            walked.push(current);
        }

        if current == grid.goal() {
            let reference = solve(grid, Solver::UniformCost).path;
            let message = match score(&walked, &reference) {
                Ok(points) => format!(
                    "You reached the goal! Your score: {}/10. Press Enter to continue.",
                    points
                )
                .with(Color::Green)
                .bold(),
                Err(e) => format!("Could not score the walk: {}", e).with(Color::Red),
            };
            tracing::info!("[play] goal reached after {} cells", walked.len());
            canvas.status(stdout, Some(message))?;
            wait_for_key(&[KeyCode::Enter, KeyCode::Esc])?;
            return Ok(());
        }
    }
}

/// Block until one of the given keys is pressed
fn wait_for_key(codes: &[KeyCode]) -> std::io::Result<()> {
    loop {
        if let event::Event::Key(event::KeyEvent { code, kind, .. }) = event::read()?
            && kind == event::KeyEventKind::Press
            && codes.contains(&code)
        {
            return Ok(());
        }
    }
}

/// Get user input with real-time validation and feedback
/// Returns None if user cancels input with Esc
fn prompt_with_validation<F, T>(
    stdout: &mut Stdout,
    prompt: &str,
    validate: F,
) -> std::io::Result<Option<T>>
where
    F: Fn(&str) -> Result<T, String>,
{
    // Save cursor position so we can restore / redraw
    queue!(stdout, cursor::Hide, cursor::SavePosition)?;
    stdout.flush()?;

    let mut input = String::new();

    let value = loop {
        // Re-render prompt line
        queue!(
            stdout,
            cursor::RestorePosition,
            terminal::Clear(ClearType::FromCursorDown)
        )?;
        stdout.queue(style::PrintStyledContent(
            prompt.with(Color::Cyan).attribute(Attribute::Bold),
        ))?;

        // Color the input by validity
        let validation_result = validate(input.trim());
        let input_color = if validation_result.is_ok() {
            Color::Green
        } else {
            Color::Red
        };
        queue!(
            stdout,
            style::SetForegroundColor(input_color),
            style::Print(&input),
            style::ResetColor,
            style::Print(" \r\n")
        )?;
        if let Err(msg) = &validation_result {
            stdout.queue(style::PrintStyledContent(
                msg.clone().with(Color::DarkGrey).attribute(Attribute::Dim),
            ))?;
        }
        stdout.flush()?;

        if let event::Event::Key(event::KeyEvent { code, kind, .. }) = event::read()? {
            match code {
                KeyCode::Enter => {
                    if let Ok(value) = validate(input.trim()) {
                        break Some(value);
                    }
                }
                KeyCode::Char(c) if kind == event::KeyEventKind::Press => {
                    if !c.is_whitespace() && !c.is_control() {
                        input.push(c);
                    }
                }
                KeyCode::Backspace => {
                    input.pop();
                }
                KeyCode::Esc => break None,
                _ => {}
            }
        }
    };

    // Cleanup
    queue!(
        stdout,
        cursor::RestorePosition,
        terminal::Clear(ClearType::FromCursorDown),
        cursor::Show
    )?;
    stdout.flush()?;
    Ok(value)
}

/// Ask for maze dimensions bounded by what the terminal can display.
/// Returns None if the user cancels with Esc.
fn ask_maze_dimensions(stdout: &mut Stdout) -> std::io::Result<Option<(u16, u16)>> {
    stdout.execute(style::PrintStyledContent(
        "Enter maze dimensions, or press Esc to exit. Blank uses the largest \
size the terminal fits.\r\n"
            .with(Color::Blue),
    ))?;

    let validate = |s: &str, is_width: bool| {
        let max_size = match terminal::size() {
            Ok((term_cols, term_rows)) => {
                // Reserve a line below the canvas for status messages
                let (max_cols, max_rows) =
                    MazeCanvas::max_maze_size(term_cols, term_rows.saturating_sub(2));
                if is_width { max_cols } else { max_rows }
            }
            Err(_) => u16::MAX,
        };
        if s.is_empty() {
            return Ok(max_size);
        }
        let error_msg = format!("Please enter a number between 1 and {}.", max_size);
        s.parse::<u16>()
            .map_err(|_| error_msg.clone())
            .and_then(|n| {
                if (1..=max_size).contains(&n) {
                    Ok(n)
                } else {
                    Err(error_msg)
                }
            })
    };

    let Some(cols) = prompt_with_validation(stdout, "Width: ", |s| validate(s, true))? else {
        return Ok(None);
    };
    stdout.execute(style::PrintStyledContent(
        format!("Width set to {}\r\n", cols).with(Color::Green),
    ))?;

    let Some(rows) = prompt_with_validation(stdout, "Height: ", |s| validate(s, false))? else {
        return Ok(None);
    };
    stdout.execute(style::PrintStyledContent(
        format!("Height set to {}\r\n", rows).with(Color::Green),
    ))?;

    Ok(Some((cols, rows)))
}

/// Ask for the generation seed; blank draws one from the OS.
fn ask_seed(stdout: &mut Stdout) -> std::io::Result<Option<u64>> {
    prompt_with_validation(stdout, "Seed (blank for random): ", |s| {
        if s.is_empty() {
            Ok(StdRng::from_os_rng().random())
        } else {
            s.parse::<u64>()
                .map_err(|_| "Please enter a non-negative integer seed.".to_string())
        }
    })
}

/// Ask how many extra passages to punch through the spanning tree.
fn ask_extra_passages(stdout: &mut Stdout) -> std::io::Result<Option<usize>> {
    prompt_with_validation(stdout, "Extra passages (blank for 10): ", |s| {
        if s.is_empty() {
            Ok(10)
        } else {
            s.parse::<usize>()
                .map_err(|_| "Please enter a non-negative integer.".to_string())
        }
    })
}

/// Present a menu of options and let the user pick one with the arrow keys.
/// Returns None if the user cancels with Esc.
fn select_from_menu<T: std::fmt::Display + Copy>(
    stdout: &mut Stdout,
    prompt: &str,
    options: &[T],
) -> std::io::Result<Option<T>> {
    if options.is_empty() {
        return Ok(None);
    }

    queue!(stdout, cursor::Hide, cursor::SavePosition)?;
    let mut selected = 0;

    let choice = loop {
        queue!(
            stdout,
            cursor::RestorePosition,
            terminal::Clear(ClearType::FromCursorDown)
        )?;
        stdout.queue(style::PrintStyledContent(prompt.with(Color::Yellow)))?;

        for (i, option) in options.iter().enumerate() {
            if i == selected {
                stdout.queue(style::SetAttribute(Attribute::Reverse))?;
            }
            stdout.queue(style::Print(format!("\r\n{}", option)))?;
            if i == selected {
                stdout.queue(style::SetAttribute(Attribute::NoReverse))?;
            }
        }
        stdout.queue(style::Print("\r\n"))?;
        stdout.flush()?;

        if let event::Event::Key(event::KeyEvent { code, kind, .. }) = event::read()? {
            if kind != event::KeyEventKind::Press {
                continue;
            }
            match code {
                KeyCode::Up => {
                    selected = match selected {
                        0 => options.len() - 1,
                        _ => selected - 1,
                    };
                }
                KeyCode::Down => {
                    selected = if selected >= options.len() - 1 {
                        0
                    } else {
                        selected + 1
                    };
                }
                KeyCode::Enter => break Some(options[selected]),
                KeyCode::Esc => break None,
                _ => {}
            }
        }
    };

    queue!(
        stdout,
        cursor::RestorePosition,
        terminal::Clear(ClearType::FromCursorDown),
        cursor::Show
    )?;
    stdout.flush()?;
    Ok(choice)
}
