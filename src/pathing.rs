use itertools::Itertools;
use smallvec::SmallVec;

use crate::cells::Coordinate;
use crate::grid::Grid;
use crate::utils;
use crate::utils::FnvHashMap;

/// Step counts from one start cell to every cell reachable from it through passages.
#[derive(Debug, Clone)]
pub struct Distances {
    start_coordinate: Coordinate,
    distances: FnvHashMap<Coordinate, u32>,
    max_distance: u32,
}

impl Distances {
    /// Flood fill outwards from `start_coordinate`. None if the start is not on the grid.
    pub fn new(grid: &Grid, start_coordinate: Coordinate) -> Option<Distances> {

        if !grid.is_valid_coordinate(start_coordinate) {
            return None;
        }

        let mut max = 0;
        let mut distances = utils::fnv_hashmap(grid.size());
        distances.insert(start_coordinate, 0);

        // No weights on the passages, every step is one from the previous cell, so the first
        // distance recorded for a cell is already the shortest. The distances map doubles as
        // the visited set.
        let mut frontier = vec![start_coordinate];
        while !frontier.is_empty() {

            let mut new_frontier = vec![];
            for cell_coord in &frontier {

                let distance_to_cell = distances[cell_coord];
                if distance_to_cell > max {
                    max = distance_to_cell;
                }

                // Links only fail for invalid coordinates and every frontier cell is on the grid
                let links = grid.links(*cell_coord).unwrap_or_default();
                for link_coordinate in &links {
                    if !distances.contains_key(link_coordinate) {
                        distances.insert(*link_coordinate, distance_to_cell + 1);
                        new_frontier.push(*link_coordinate);
                    }
                }
            }
            frontier = new_frontier;
        }

        Some(Distances {
            start_coordinate,
            distances,
            max_distance: max,
        })
    }

    #[inline(always)]
    pub fn start(&self) -> Coordinate {
        self.start_coordinate
    }

    #[inline(always)]
    pub fn max(&self) -> u32 {
        self.max_distance
    }

    #[inline(always)]
    pub fn distance_from_start_to(&self, coord: Coordinate) -> Option<u32> {
        self.distances.get(&coord).cloned()
    }

    /// How many cells, the start included, can be reached from the start.
    #[inline]
    pub fn reachable_count(&self) -> usize {
        self.distances.len()
    }

    /// The cells at the maximum distance, in coordinate order.
    pub fn furthest_points_on_grid(&self) -> SmallVec<[Coordinate; 8]> {
        let furthest_distance = self.max();
        self.distances.iter()
            .filter(|&(_, distance)| *distance == furthest_distance)
            .map(|(coord, _)| *coord)
            .sorted()
            .collect()
    }
}

/// Walk back from `end_point` to the start of `distances_from_start`, always stepping to a linked
/// neighbour one closer. None if `end_point` is unreachable.
pub fn shortest_path(grid: &Grid,
                     distances_from_start: &Distances,
                     end_point: Coordinate)
                     -> Option<Vec<Coordinate>> {

    let mut current_distance = distances_from_start.distance_from_start_to(end_point)?;
    let start = distances_from_start.start();
    let mut current_coord = end_point;
    let mut path = vec![end_point];

    while current_coord != start {
        let closer = grid.links(current_coord)?
            .iter()
            .cloned()
            .find(|coord| {
                distances_from_start.distance_from_start_to(*coord) == Some(current_distance - 1)
            })?;

        current_coord = closer;
        current_distance -= 1;
        path.push(current_coord);
    }

    path.reverse();
    Some(path)
}

/// Works only as long as we are looking at a perfect maze, otherwise you get back some arbitrary path.
pub fn longest_path(grid: &Grid) -> Option<Vec<Coordinate>> {
    // The start of the longest path is just the point furthest away from an arbitrary initial point
    let first_distances = Distances::new(grid, Coordinate::new(0, 0))?;
    let long_path_start_coordinate = *first_distances.furthest_points_on_grid().first()?;

    let distances_from_start = Distances::new(grid, long_path_start_coordinate)?;
    let end_point = *distances_from_start.furthest_points_on_grid().first()?;

    shortest_path(grid, &distances_from_start, end_point)
}

#[cfg(test)]
mod tests {

    use quickcheck::{quickcheck, TestResult};

    use super::*;
    use crate::generators::generate_maze_with_seed;
    use crate::units::{Height, Width};

    static OUT_OF_GRID_COORDINATE: Coordinate = Coordinate {
        x: u32::MAX,
        y: u32::MAX,
    };

    fn gc(x: u32, y: u32) -> Coordinate {
        Coordinate::new(x, y)
    }

    #[test]
    fn distances_construction_requires_valid_start_coordinate() {
        let g = Grid::new(Width(3), Height(3)).unwrap();
        assert!(Distances::new(&g, OUT_OF_GRID_COORDINATE).is_none());
    }

    #[test]
    fn start() {
        let g = Grid::new(Width(3), Height(3)).unwrap();
        let start_coordinate = gc(1, 1);
        let distances = Distances::new(&g, start_coordinate).unwrap();
        assert_eq!(start_coordinate, distances.start());
    }

    #[test]
    fn distances_to_unreachable_cells_is_none() {
        let g = Grid::new(Width(3), Height(3)).unwrap();
        let start_coordinate = gc(0, 0);
        let distances = Distances::new(&g, start_coordinate).unwrap();
        for coord in g.iter() {
            let d = distances.distance_from_start_to(coord);
            if coord != start_coordinate {
                assert!(d.is_none());
            } else {
                assert_eq!(d, Some(0));
            }
        }
        assert_eq!(distances.reachable_count(), 1);
        assert_eq!(distances.max(), 0);
        assert_eq!(distances.distance_from_start_to(OUT_OF_GRID_COORDINATE), None);
    }

    #[test]
    fn every_cell_of_a_maze_is_reachable_from_origin() {
        let g = generate_maze_with_seed(12, 9, 31).unwrap();
        let distances = Distances::new(&g, gc(0, 0)).unwrap();
        assert_eq!(distances.reachable_count(), g.size());
        for coord in g.iter() {
            assert!(distances.distance_from_start_to(coord).is_some());
        }
    }

    #[test]
    fn corridor_distances() {
        let g = generate_maze_with_seed(5, 1, 8).unwrap();
        let distances = Distances::new(&g, gc(0, 0)).unwrap();
        for x in 0..5 {
            assert_eq!(distances.distance_from_start_to(gc(x, 0)), Some(x));
        }
        assert_eq!(distances.max(), 4);
        assert_eq!(&*distances.furthest_points_on_grid(), &[gc(4, 0)]);
    }

    #[test]
    fn shortest_path_in_corridor() {
        let g = generate_maze_with_seed(1, 4, 8).unwrap();
        let distances = Distances::new(&g, gc(0, 3)).unwrap();
        let path = shortest_path(&g, &distances, gc(0, 0)).unwrap();
        assert_eq!(path, vec![gc(0, 3), gc(0, 2), gc(0, 1), gc(0, 0)]);
    }

    #[test]
    fn shortest_path_to_unreachable_cell_is_none() {
        let g = Grid::new(Width(2), Height(2)).unwrap();
        let distances = Distances::new(&g, gc(0, 0)).unwrap();
        assert_eq!(shortest_path(&g, &distances, gc(1, 1)), None);
        assert_eq!(shortest_path(&g, &distances, gc(0, 0)), Some(vec![gc(0, 0)]));
    }

    #[test]
    fn longest_path_of_single_cell() {
        let g = generate_maze_with_seed(1, 1, 8).unwrap();
        assert_eq!(longest_path(&g), Some(vec![gc(0, 0)]));
    }

    #[test]
    fn quickcheck_shortest_paths_step_through_passages() {
        fn prop(w: u8, h: u8, seed: u64) -> TestResult {
            let (w, h) = (i32::from(w % 12), i32::from(h % 12));
            if w == 0 || h == 0 {
                return TestResult::discard();
            }
            let g = generate_maze_with_seed(w, h, seed).unwrap();
            let path = match longest_path(&g) {
                Some(path) => path,
                None => return TestResult::failed(),
            };
            let steps_linked = path.windows(2).all(|pair| g.is_linked(pair[0], pair[1]));
            let no_repeats = path.iter().sorted().dedup().count() == path.len();
            TestResult::from_bool(steps_linked && no_repeats)
        }
        quickcheck(prop as fn(u8, u8, u64) -> TestResult);
    }
}
