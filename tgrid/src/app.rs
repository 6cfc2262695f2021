use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use cgrid::{
    algorithms::{self, AStar, CarveStep, Connectivity, DfsCarver, Maze, Random, SearchStep},
    dims::Dims,
    grid::{text, Grid, GridError},
    paint::Solved,
};
use log::{info, warn};
use ron::ser::PrettyConfig;
use thiserror::Error;

use crate::{
    renderer::{Animation, Renderer},
    settings::{Settings, SettingsError},
};

/// How many path coordinates the report lists.
const SHOWN_COORDS: usize = 10;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Terminal or file error: {0}")]
    Io(#[from] io::Error),
    #[error("Invalid maze: {0}")]
    Grid(#[from] GridError),
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),
    #[error("Failed to parse maze file: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("Failed to serialize maze: {0}")]
    RonSer(#[from] ron::Error),
    #[error("Logger already set: {0}")]
    Logger(#[from] log::SetLoggerError),
}

/// Everything a single run needs besides the settings.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub width: i32,
    pub height: i32,
    pub seed: Option<u64>,
    pub input: Option<PathBuf>,
    pub save: Option<PathBuf>,
    pub animate: bool,
    pub color: bool,
}

impl RunOptions {
    /// Options with the size and seed taken from `settings`.
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            width: settings.get_width(),
            height: settings.get_height(),
            seed: settings.get_seed(),
            color: settings.get_color(),
            ..Default::default()
        }
    }
}

/// Outcome of a run, `seed` and `connectivity` are only known for generated mazes.
#[derive(Debug, Clone)]
pub struct Report {
    pub grid: Grid,
    pub seed: Option<u64>,
    pub connectivity: Option<Connectivity>,
    pub generation: Duration,
    pub solving: Duration,
    pub path: Vec<Dims>,
    pub expanded: usize,
}

impl Report {
    pub fn is_solved(&self) -> bool {
        !self.path.is_empty()
    }

    pub fn write_summary(&self, out: &mut impl Write) -> io::Result<()> {
        if let Some(seed) = self.seed {
            writeln!(out, "Seed: {}", seed)?;
        }
        if let Some(connectivity) = self.connectivity {
            writeln!(out, "End cell: {}", describe_connectivity(connectivity))?;
        }
        writeln!(
            out,
            "Maze generation completed in {:.4} seconds",
            self.generation.as_secs_f64()
        )?;
        writeln!(
            out,
            "Maze solving completed in {:.4} seconds ({} cells expanded)",
            self.solving.as_secs_f64(),
            self.expanded
        )?;

        if self.is_solved() {
            writeln!(out, "Solution found! Path length: {}", self.path.len())?;
            writeln!(out, "Path coordinates: {}", format_coords(&self.path))?;
        } else {
            writeln!(out, "No solution found!")?;
        }
        Ok(())
    }
}

fn describe_connectivity(connectivity: Connectivity) -> String {
    match connectivity {
        Connectivity::Visited => "reached while carving".to_string(),
        Connectivity::Repaired { via: Dims(x, y) } => format!("joined through ({}, {})", x, y),
        Connectivity::Touching => "next to a corridor".to_string(),
        Connectivity::Unreachable => "unreachable".to_string(),
    }
}

pub fn format_coords(path: &[Dims]) -> String {
    let shown = path
        .iter()
        .take(SHOWN_COORDS)
        .map(|Dims(x, y)| format!("({}, {})", x, y))
        .collect::<Vec<_>>()
        .join(", ");

    if path.len() > SHOWN_COORDS {
        format!("[{}]...", shown)
    } else {
        format!("[{}]", shown)
    }
}

fn is_ron(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("ron"))
}

/// Reads a maze, as RON for `.ron` files and as text otherwise.
pub fn load_grid(path: &Path) -> Result<Grid, AppError> {
    let content = fs::read_to_string(path)?;
    if is_ron(path) {
        Ok(ron::from_str(&content)?)
    } else {
        Ok(text::parse(&content)?)
    }
}

pub fn save_grid(path: &Path, grid: &Grid) -> Result<(), AppError> {
    let content = if is_ron(path) {
        ron::ser::to_string_pretty(grid, PrettyConfig::default())?
    } else {
        text::render(grid, None)
    };
    fs::write(path, content)?;
    Ok(())
}

struct Frames<'a, 'w, W: Write> {
    animation: Animation<'w, W>,
    renderer: &'a Renderer,
    steps: usize,
}

fn carve_animated<W: Write>(
    grid: Grid,
    rng: &mut Random,
    frames: &mut Frames<'_, '_, W>,
) -> io::Result<(Maze, Duration)> {
    let mut carver = DfsCarver::new(grid);
    let mut busy = Duration::ZERO;

    loop {
        let started = Instant::now();
        let mut finished = None;
        for _ in 0..frames.steps {
            if let CarveStep::Finished(connectivity) = carver.advance(rng) {
                finished = Some(connectivity);
                break;
            }
        }
        busy += started.elapsed();
        frames.animation.show(frames.renderer, &carver)?;

        if let Some(connectivity) = finished {
            let maze = Maze {
                grid: carver.into_grid(),
                connectivity,
            };
            return Ok((maze, busy));
        }
    }
}

fn solve_animated<W: Write>(
    grid: &Grid,
    frames: &mut Frames<'_, '_, W>,
) -> io::Result<(Vec<Dims>, usize, Duration)> {
    let mut search = AStar::new(grid);
    let mut busy = Duration::ZERO;

    while !search.is_finished() {
        let started = Instant::now();
        for _ in 0..frames.steps {
            if let SearchStep::Found | SearchStep::Exhausted = search.advance() {
                break;
            }
        }
        busy += started.elapsed();
        frames.animation.show(frames.renderer, &search)?;
    }

    let expanded = search.expanded();
    Ok((search.into_path(), expanded, busy))
}

fn solve_timed(grid: &Grid) -> (Vec<Dims>, usize, Duration) {
    let started = Instant::now();
    let mut search = AStar::new(grid);
    search.run();
    let elapsed = started.elapsed();
    let expanded = search.expanded();
    (search.into_path(), expanded, elapsed)
}

/// Generates (or loads), saves and solves a maze, then prints it along with a summary.
pub fn run<W: Write>(settings: &Settings, opts: &RunOptions, out: &mut W) -> Result<Report, AppError> {
    let renderer = Renderer::new(settings.get_palette(), opts.color);

    let report = {
        let mut frames = if opts.animate {
            Some(Frames {
                animation: Animation::new(
                    &mut *out,
                    Duration::from_millis(settings.get_frame_delay_ms()),
                )?,
                renderer: &renderer,
                steps: settings.get_steps_per_frame(),
            })
        } else {
            None
        };

        let (grid, seed, connectivity, generation) = match &opts.input {
            Some(path) => {
                let started = Instant::now();
                let grid = load_grid(path)?;
                info!("Loaded {}x{} maze from {:?}", grid.width(), grid.height(), path);
                (grid, None, None, started.elapsed())
            }
            None => {
                let (seed, mut rng) = algorithms::seeded(opts.seed);
                info!("Generating {}x{} maze with seed {}", opts.width, opts.height, seed);

                let grid = Grid::new(opts.width, opts.height)?;
                let (maze, generation) = match frames.as_mut() {
                    Some(frames) => carve_animated(grid, &mut rng, frames)?,
                    None => {
                        let started = Instant::now();
                        let maze = algorithms::carve(grid, &mut rng);
                        (maze, started.elapsed())
                    }
                };

                if !maze.is_connected() {
                    warn!("End cell can't be reached from the start");
                }
                (maze.grid, Some(seed), Some(maze.connectivity), generation)
            }
        };

        if let Some(path) = &opts.save {
            save_grid(path, &grid)?;
            info!("Saved maze to {:?}", path);
        }

        let (path, expanded, solving) = match frames.as_mut() {
            Some(frames) => solve_animated(&grid, frames)?,
            None => solve_timed(&grid),
        };

        if let Some(frames) = frames.as_mut() {
            frames.animation.show(&renderer, &Solved::new(&grid, &path))?;
        }

        Report {
            grid,
            seed,
            connectivity,
            generation,
            solving,
            path,
            expanded,
        }
    };

    if !opts.animate {
        renderer.draw(&Solved::new(&report.grid, &report.path), out)?;
    }
    report.write_summary(out)?;
    out.flush()?;

    Ok(report)
}
