//! **mazes** generates seeded perfect mazes over rectangular grids with the recursive
//! backtracker algorithm.
//!
//! ```
//! use mazes::{cells::{CompassPrimary, Coordinate}, generators};
//!
//! let maze = generators::generate_maze_with_seed(4, 3, 42).unwrap();
//! assert_eq!(maze.passages_count(), 4 * 3 - 1);
//! let walls = maze.walls(Coordinate::new(0, 0)).unwrap();
//! assert!(walls.at(CompassPrimary::South) && walls.at(CompassPrimary::West));
//! ```

pub mod cells;
pub mod errors;
pub mod generators;
pub mod grid;
pub mod grid_displays;
pub mod pathing;
pub mod units;
mod utils;
