pub mod astar;
pub mod depth_first_search;
pub mod flood;

use log::debug;
use rand::{thread_rng, Rng, SeedableRng as _};

use crate::{
    dims::Dims,
    grid::{CellMask, Grid, GridError},
};
pub use astar::{AStar, SearchStep};
pub use depth_first_search::{CarveStep, Connectivity, DfsCarver};

/// Random number generator used for anything, where determinism is required.
pub type Random = rand_xoshiro::Xoshiro256StarStar;

/// Seeds [`Random`], picking a fresh seed when none is given. Returns the seed used.
pub fn seeded(seed: Option<u64>) -> (u64, Random) {
    let seed = seed.unwrap_or_else(|| thread_rng().gen());
    (seed, Random::seed_from_u64(seed))
}

/// Carved grid together with the state of its end cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    pub grid: Grid,
    pub connectivity: Connectivity,
}

impl Maze {
    pub fn is_connected(&self) -> bool {
        self.connectivity.is_connected()
    }
}

pub fn generate<R: Rng + ?Sized>(width: i32, height: i32, rng: &mut R) -> Result<Maze, GridError> {
    Ok(carve(Grid::new(width, height)?, rng))
}

/// Same as [`generate`], but masked out cells are left as walls.
pub fn generate_masked<R: Rng + ?Sized>(mask: CellMask, rng: &mut R) -> Result<Maze, GridError> {
    Ok(carve(Grid::with_mask(mask)?, rng))
}

/// Carves a prepared grid to completion.
pub fn carve<R: Rng + ?Sized>(grid: Grid, rng: &mut R) -> Maze {
    let mut carver = DfsCarver::new(grid);
    let connectivity = carver.run(rng);
    Maze {
        grid: carver.into_grid(),
        connectivity,
    }
}

/// Shortest path from start to end, empty if there is none.
pub fn solve(grid: &Grid) -> Vec<Dims> {
    let mut search = AStar::new(grid);
    search.run();
    debug!("solve expanded {} cells", search.expanded());
    search.into_path()
}

#[cfg(test)]
mod tests {
    use rand::rngs::mock::StepRng;

    use super::*;

    const SIZES: [(i32, i32); 9] = [
        (3, 3),
        (3, 4),
        (4, 4),
        (5, 5),
        (6, 9),
        (15, 11),
        (21, 21),
        (31, 17),
        (40, 30),
    ];

    #[test]
    fn invalid_size() {
        let mut rng = Random::seed_from_u64(0);
        assert_eq!(
            generate(2, 10, &mut rng),
            Err(GridError::InvalidSize {
                width: 2,
                height: 10
            })
        );
        assert!(generate(10, 0, &mut rng).is_err());
        assert!(generate(-5, 5, &mut rng).is_err());
    }

    #[test]
    fn generated_mazes_are_connected() {
        for (width, height) in SIZES {
            for seed in 0..32 {
                let maze = generate(width, height, &mut Random::seed_from_u64(seed)).unwrap();
                let grid = &maze.grid;

                assert!(maze.is_connected(), "{}x{} seed {}", width, height, seed);
                assert!(grid.is_path(grid.start()));
                assert!(grid.is_path(grid.end()));
                assert!(flood::is_reachable(grid, grid.start(), grid.end()));
            }
        }
    }

    #[test]
    fn every_lattice_cell_is_carved() {
        for (width, height) in SIZES {
            let maze = generate(width, height, &mut Random::seed_from_u64(3)).unwrap();
            let dist = flood::distances(&maze.grid, maze.grid.start());

            for y in (1..height).step_by(2) {
                for x in (1..width).step_by(2) {
                    let pos = Dims(x, y);
                    assert!(maze.grid.is_path(pos), "{:?} in {}x{}", pos, width, height);
                    assert!(dist[pos].is_some(), "{:?} in {}x{}", pos, width, height);
                }
            }
        }
    }

    #[test]
    fn solution_is_shortest() {
        for (width, height) in SIZES {
            for seed in 0..16 {
                let maze = generate(width, height, &mut Random::seed_from_u64(seed)).unwrap();
                let grid = &maze.grid;
                let path = solve(grid);

                assert_eq!(path.first(), Some(&grid.start()));
                assert_eq!(path.last(), Some(&grid.end()));
                assert!(path.iter().all(|&pos| grid.is_path(pos)));
                assert!(path.windows(2).all(|w| w[0].manhattan(w[1]) == 1));
                assert_eq!(
                    Some(path.len() as u32 - 1),
                    flood::shortest_distance(grid, grid.start(), grid.end())
                );
            }
        }
    }

    #[test]
    fn same_seed_same_maze() {
        let (seed, mut rng) = seeded(None);
        let first = generate(25, 19, &mut rng).unwrap();
        let (_, mut rng) = seeded(Some(seed));
        let second = generate(25, 19, &mut rng).unwrap();

        assert_eq!(first, second);
        assert_eq!(solve(&first.grid), solve(&second.grid));
    }

    #[test]
    fn first_pick_scenario() {
        let maze = generate(5, 5, &mut StepRng::new(0, 0)).unwrap();

        assert_eq!(maze.grid.to_string(), "#####\n#   #\n# # #\n# # #\n#####\n");
        assert_eq!(
            maze.connectivity,
            Connectivity::Repaired { via: Dims(3, 1) }
        );

        let path = solve(&maze.grid);
        assert_eq!(path.len() - 1, 4);
        assert_eq!(
            flood::shortest_distance(&maze.grid, Dims(1, 1), Dims(3, 3)),
            Some(4)
        );
    }

    #[test]
    fn minimal_scenario() {
        let maze = generate(3, 3, &mut Random::seed_from_u64(0)).unwrap();

        assert_eq!(maze.grid.start(), maze.grid.end());
        assert_eq!(maze.connectivity, Connectivity::Visited);
        assert_eq!(solve(&maze.grid), vec![Dims(1, 1)]);
    }

    #[test]
    fn unreachable_end_scenario() {
        let mut mask = CellMask::new(9, 9);
        mask.disable_rect(Dims(5, 5), Dims(9, 9));
        mask[Dims(7, 7)] = true;

        let maze = generate_masked(mask, &mut Random::seed_from_u64(11)).unwrap();

        assert_eq!(maze.connectivity, Connectivity::Unreachable);
        assert!(!maze.is_connected());
        assert!(solve(&maze.grid).is_empty());
    }
}
