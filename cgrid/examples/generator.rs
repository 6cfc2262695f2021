use std::env;

use cgrid::{
    algorithms::{flood, generate, seeded, solve},
    grid::text,
};

fn main() {
    let args = env::args()
        .skip(1)
        .take(3)
        .map(|s| s.parse())
        .collect::<Result<Vec<i64>, _>>()
        .expect("Expected integers");

    assert!(
        args.len() == 2 || args.len() == 3,
        "Expected width, height and optionally a seed"
    );

    let input_seed = args.get(2).map(|&seed| seed as u64);
    let (seed, mut rng) = seeded(input_seed);
    if input_seed.is_none() {
        println!("Seed: {}", seed);
    }

    let maze = generate(args[0] as i32, args[1] as i32, &mut rng).expect("Invalid maze size");
    let path = solve(&maze.grid);
    let grid = &maze.grid;

    print!("{}", text::render(grid, Some(&path)));
    println!("End: {:?}", maze.connectivity);
    println!(
        "Path: {} cells, shortest possible: {:?} steps",
        path.len(),
        flood::shortest_distance(grid, grid.start(), grid.end())
    );
}
