use grid_astar::{Grid, SearchEngine, SearchOutcome};
use std::ops::ControlFlow;

// In this example a path is found on a 6x6 grid with shape
//  ______
// |S.....|
// |.####.|
// |.#..#.|
// |.#E.#.|
// |.##.#.|
// |......|
//  ______
// where
// - # marks an obstacle
// - S marks the start
// - E marks the end
//
// Every expansion prints the grid, with frontier cells as 'o', visited cells as 'x' and finally
// the path as '*'. Run with RUST_LOG=info to see the search summary.

fn main() {
    env_logger::init();
    let mut grid = Grid::parse(
        "
        S.....
        .####.
        .#..#.
        .#E.#.
        .##.#.
        ......
        ",
    )
    .expect("layout is a valid square grid");
    grid.refresh_adjacency();
    let start = grid.start().expect("layout has a start");
    let end = grid.end().expect("layout has an end");

    let mut step = 0;
    let outcome = SearchEngine::new()
        .run(&mut grid, start, end, |g: &Grid| {
            step += 1;
            println!("Step {step}:\n{g}");
            ControlFlow::Continue(())
        })
        .expect("start and end are distinct cells of the grid");

    match outcome {
        SearchOutcome::Succeeded(path) => {
            println!("Path of {} moves:", path.len());
            for p in path {
                println!("({}, {})", p.x, p.y);
            }
        }
        SearchOutcome::Exhausted => println!("No path"),
        SearchOutcome::Cancelled => println!("Cancelled"),
    }
}
