use error_chain::bail;
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::cells::{CompassPrimary, Passage};
use crate::errors::*;
use crate::grid::Grid;
use crate::units::{Height, Width};

/// Generate a perfect maze of `width * height` cells from an entropy drawn seed.
///
/// Fails with `InvalidArgument` if either dimension is not positive.
pub fn generate_maze(width: i32, height: i32) -> Result<Grid> {
    validate_dimensions(width, height)?;
    let seed = rand::thread_rng().gen::<u64>();
    debug!(seed, "drew maze seed from entropy");
    generate_maze_with_seed(width, height, seed)
}

/// Generate a perfect maze of `width * height` cells.
///
/// The same `(width, height, seed)` always carves the same passages, in the same order.
pub fn generate_maze_with_seed(width: i32, height: i32, seed: u64) -> Result<Grid> {
    let (w, h) = validate_dimensions(width, height)?;
    debug!(width = w.0, height = h.0, seed, "generating maze");

    let mut grid = Grid::new(w, h)?;
    // One generator per maze, seeded once: reseeding mid-walk repeats the same draws.
    let mut rng = XorShiftRng::seed_from_u64(seed);
    recursive_backtracker(&mut grid, &mut rng);

    debug!(passages = grid.passages_count(), "maze generated");
    Ok(grid)
}

/// Apply the recursive backtracker maze generation algorithm to a grid.
///
/// A randomised depth first walk from (0, 0): while the cell on top of the stack has unvisited
/// neighbours, carve a passage into one picked at random and step into it. When it has none,
/// pop it and carry on from the cell beneath. Every cell gets visited exactly once, so the
/// carved passages form a spanning tree of the grid - a perfect maze.
///
/// Any previous carving on the grid is discarded first.
pub fn recursive_backtracker<R: Rng>(grid: &mut Grid, rng: &mut R) {
    grid.reset();
    if grid.size() == 0 {
        return;
    }

    // Grid index 0 is (0, 0)
    let mut stack = Vec::with_capacity(grid.size());
    grid.cell_at_index_mut(0).visited = true;
    stack.push(0usize);

    let mut backtracks = 0usize;
    while let Some(&current_index) = stack.last() {

        // Present and unvisited neighbours only, in N, E, S, W slot order
        let unvisited: SmallVec<[(usize, CompassPrimary); 4]> = {
            let current = grid.cell_at_index(current_index);
            CompassPrimary::ALL.iter()
                .filter_map(|dir| current.neighbour(*dir).map(|index| (index, *dir)))
                .filter(|&(index, _)| !grid.cell_at_index(index).visited())
                .collect()
        };

        if unvisited.is_empty() {
            stack.pop();
            backtracks += 1;
            continue;
        }

        let (next_index, direction) = unvisited[rng.gen_range(0..unvisited.len())];
        let to = grid.cell_at_index(next_index).position();
        grid.cell_at_index_mut(current_index).passages.push(Passage { to, direction });
        grid.cell_at_index_mut(next_index).visited = true;
        stack.push(next_index);
    }

    trace!(backtracks, "recursive backtracker finished");
}

/// Positive dimensions only. Whether the grid fits in memory is checked when it is allocated.
fn validate_dimensions(width: i32, height: i32) -> Result<(Width, Height)> {
    if width <= 0 || height <= 0 {
        bail!(ErrorKind::InvalidArgument(format!("maze dimensions must be positive, got {} x {}",
                                                 width, height)));
    }
    Ok((Width(width as usize), Height(height as usize)))
}
