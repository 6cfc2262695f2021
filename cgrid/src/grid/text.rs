//! Console form of a grid: `#` is a wall, a space is a path and `.` marks the solution.

use std::fmt;

use hashbrown::HashSet;

use super::{Grid, GridError, Tile};
use crate::{array::Array2D, dims::Dims};

pub const WALL_CHAR: char = '#';
pub const PATH_CHAR: char = ' ';
pub const SOLUTION_CHAR: char = '.';

pub fn render(grid: &Grid, path: Option<&[Dims]>) -> String {
    let on_path: HashSet<Dims> = path.unwrap_or_default().iter().copied().collect();

    let Dims(width, height) = grid.size();
    let mut out = String::with_capacity(((width + 1) * height) as usize);
    for pos in Dims::iter_fill(Dims::ZERO, grid.size()) {
        out.push(if on_path.contains(&pos) {
            SOLUTION_CHAR
        } else if grid.is_wall(pos) {
            WALL_CHAR
        } else {
            PATH_CHAR
        });

        if pos.0 == width - 1 {
            out.push('\n');
        }
    }
    out
}

/// Parses the output of [`render`]. Solution marks are read as plain path.
pub fn parse(s: &str) -> Result<Grid, GridError> {
    let lines: Vec<&str> = s.lines().collect();
    let width = lines.first().map(|l| l.chars().count()).unwrap_or(0);

    let mut tiles = Array2D::new(Tile::Wall, width, lines.len());
    for (y, line) in lines.iter().enumerate() {
        let len = line.chars().count();
        if len != width {
            return Err(GridError::Parse {
                line: y + 1,
                reason: format!("expected {} characters, found {}", width, len),
            });
        }

        for (x, c) in line.chars().enumerate() {
            tiles[Dims(x as i32, y as i32)] = match c {
                WALL_CHAR => Tile::Wall,
                PATH_CHAR | SOLUTION_CHAR => Tile::Path,
                other => {
                    return Err(GridError::Parse {
                        line: y + 1,
                        reason: format!("unexpected character {:?}", other),
                    })
                }
            };
        }
    }

    Grid::from_tiles(tiles)
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(self, None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_walls_and_solution() {
        let mut grid = Grid::new(5, 3).unwrap();
        grid.remove_wall_between(Dims(1, 1), Dims(3, 1)).unwrap();

        assert_eq!(grid.to_string(), "#####\n#   #\n#####\n");
        assert_eq!(
            render(&grid, Some(&[Dims(1, 1), Dims(2, 1)])),
            "#####\n#.. #\n#####\n"
        );
    }

    #[test]
    fn parse_rendered() {
        let text = "#####\n#.  #\n# # #\n#   #\n#####\n";
        let grid = parse(text).unwrap();

        assert_eq!(grid.size(), Dims(5, 5));
        assert!(grid.is_path(Dims(1, 1)));
        assert!(grid.is_wall(Dims(2, 2)));
        assert!(grid.mask().is_full());
        assert_eq!(parse(&grid.to_string()).unwrap(), grid);
    }

    #[test]
    fn parse_errors() {
        assert_eq!(
            parse("###\n##\n###\n"),
            Err(GridError::Parse {
                line: 2,
                reason: "expected 3 characters, found 2".into()
            })
        );
        assert!(matches!(
            parse("###\n#x#\n###\n"),
            Err(GridError::Parse { line: 2, .. })
        ));
        assert_eq!(
            parse("##\n##\n"),
            Err(GridError::InvalidSize {
                width: 2,
                height: 2
            })
        );
        assert!(matches!(parse(""), Err(GridError::InvalidSize { .. })));
    }
}
