use std::fmt;

use crate::cells::{CompassPrimary, Coordinate, MazeCell};
use crate::grid::{CoordinateSmallVec, Grid};
use crate::units::{ColumnsCount, RowsCount};
use crate::pathing::Distances;
use crate::utils::FnvHashSet;

pub trait GridDisplay {
    /// Render the contents of a grid cell as text.
    /// The String should be 3 glyphs long, padded if required.
    fn render_cell_body(&self, _: Coordinate) -> String {
        String::from("   ")
    }
}

impl GridDisplay for Distances {
    fn render_cell_body(&self, coord: Coordinate) -> String {
        if let Some(d) = self.distance_from_start_to(coord) {
            // centre align, padding 3, lowercase hexadecimal
            format!("{:^3x}", d)
        } else {
            String::from("   ")
        }
    }
}

#[derive(Debug)]
pub struct PathDisplay {
    on_path_coordinates: FnvHashSet<Coordinate>,
}
impl PathDisplay {
    pub fn new(path: &[Coordinate]) -> Self {
        PathDisplay { on_path_coordinates: path.iter().cloned().collect() }
    }
}
impl GridDisplay for PathDisplay {
    fn render_cell_body(&self, coord: Coordinate) -> String {
        if self.on_path_coordinates.contains(&coord) {
            String::from(" . ")
        } else {
            String::from("   ")
        }
    }
}

#[derive(Debug)]
pub struct StartEndPointsDisplay {
    start_coordinates: CoordinateSmallVec,
    end_coordinates: CoordinateSmallVec,
}
impl StartEndPointsDisplay {
    pub fn new(starts: CoordinateSmallVec, ends: CoordinateSmallVec) -> StartEndPointsDisplay {
        StartEndPointsDisplay {
            start_coordinates: starts,
            end_coordinates: ends,
        }
    }
}
impl GridDisplay for StartEndPointsDisplay {
    fn render_cell_body(&self, coord: Coordinate) -> String {
        if self.start_coordinates.contains(&coord) {
            String::from(" S ")
        } else if self.end_coordinates.contains(&coord) {
            String::from(" E ")
        } else {
            String::from("   ")
        }
    }
}

/// Which sides of a cell need a wall built: every side without a passage, grid boundary included.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Default)]
pub struct Walls {
    pub north: bool,
    pub east: bool,
    pub south: bool,
    pub west: bool,
}

impl Walls {
    pub fn at(&self, dir: CompassPrimary) -> bool {
        match dir {
            CompassPrimary::North => self.north,
            CompassPrimary::East => self.east,
            CompassPrimary::South => self.south,
            CompassPrimary::West => self.west,
        }
    }

    pub fn count(&self) -> usize {
        CompassPrimary::ALL.iter().filter(|dir| self.at(**dir)).count()
    }
}

impl Grid {
    /// The walls around a cell, checking passages carved from either side. None for an invalid coordinate.
    pub fn walls(&self, coord: Coordinate) -> Option<Walls> {
        if !self.is_valid_coordinate(coord) {
            return None;
        }
        Some(Walls {
            north: !self.is_open(coord, CompassPrimary::North),
            east: !self.is_open(coord, CompassPrimary::East),
            south: !self.is_open(coord, CompassPrimary::South),
            west: !self.is_open(coord, CompassPrimary::West),
        })
    }
}

// North (largest y) is drawn at the top.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        const WALL_L: &str = "╴";
        const WALL_R: &str = "╶";
        const WALL_U: &str = "╵";
        const WALL_D: &str = "╷";
        const WALL_LR_3: &str = "───";
        const WALL_LR: &str = "─";
        const WALL_UD: &str = "│";
        const WALL_LD: &str = "┐";
        const WALL_RU: &str = "└";
        const WALL_LU: &str = "┘";
        const WALL_RD: &str = "┌";
        const WALL_LRU: &str = "┴";
        const WALL_LRD: &str = "┬";
        const WALL_LRUD: &str = "┼";
        const WALL_RUD: &str = "├";
        const WALL_LUD: &str = "┤";
        let default_cell_body = String::from("   ");

        let ColumnsCount(columns_count) = self.columns();
        let RowsCount(rows_count) = self.rows();
        let mut rows_north_first: Vec<&[MazeCell]> = self.iter_row().collect();
        rows_north_first.reverse();

        // Start by special case rendering the text for the north most boundary
        let mut output = String::from(WALL_RD);
        let top_row = rows_north_first.first().cloned().unwrap_or_default();
        for (index, cell) in top_row.iter().enumerate() {
            output.push_str(WALL_LR_3);
            if self.is_open(cell.position(), CompassPrimary::East) {
                output.push_str(WALL_LR);
            } else if index == columns_count - 1 {
                output.push_str(WALL_LD);
            } else {
                output.push_str(WALL_LRD);
            }
        }
        output.push('\n');

        for (index_row, row) in rows_north_first.iter().enumerate() {

            let is_last_row = index_row == rows_count - 1;

            // The northern boundary of a row is drawn by the row above it, so each row only
            // renders the cell bodies, their eastern sides and their southern sides.
            let mut row_middle_section_render = String::from(WALL_UD);
            let mut row_bottom_section_render = String::new();

            for (index_column, cell) in row.iter().enumerate() {
                let cell_coord = cell.position();
                let is_first_column = index_column == 0;
                let is_last_column = index_column == columns_count - 1;
                let east_open = self.is_open(cell_coord, CompassPrimary::East);
                let south_open = self.is_open(cell_coord, CompassPrimary::South);

                match *self.grid_display() {
                    Some(ref displayer) => row_middle_section_render.push_str(&displayer.render_cell_body(cell_coord)),
                    None => row_middle_section_render.push_str(&default_cell_body),
                }
                row_middle_section_render.push_str(if east_open { " " } else { WALL_UD });

                if is_first_column {
                    row_bottom_section_render = if is_last_row {
                        String::from(WALL_RU)
                    } else if south_open {
                        String::from(WALL_UD)
                    } else {
                        String::from(WALL_RUD)
                    };
                }
                row_bottom_section_render.push_str(if south_open { "   " } else { WALL_LR_3 });

                let corner = match (is_last_row, is_last_column) {
                    (true, true) => WALL_LU,
                    (true, false) => if east_open { WALL_LR } else { WALL_LRU },
                    (false, true) => if south_open { WALL_UD } else { WALL_LUD },
                    (false, false) => {
                        let access_se_from_east =
                            self.neighbour_at_direction(cell_coord, CompassPrimary::East)
                                .map_or(false, |c| self.is_open(c, CompassPrimary::South));
                        let access_se_from_south =
                            self.neighbour_at_direction(cell_coord, CompassPrimary::South)
                                .map_or(false, |c| self.is_open(c, CompassPrimary::East));
                        let show_right_section = !access_se_from_east;
                        let show_down_section = !access_se_from_south;
                        let show_up_section = !east_open;
                        let show_left_section = !south_open;

                        match (show_left_section,
                               show_right_section,
                               show_up_section,
                               show_down_section) {
                            (true, true, true, true) => WALL_LRUD,
                            (true, true, true, false) => WALL_LRU,
                            (true, true, false, true) => WALL_LRD,
                            (true, false, true, true) => WALL_LUD,
                            (false, true, true, true) => WALL_RUD,
                            (true, true, false, false) => WALL_LR,
                            (false, false, true, true) => WALL_UD,
                            (false, true, true, false) => WALL_RU,
                            (true, false, false, true) => WALL_LD,
                            (true, false, true, false) => WALL_LU,
                            (false, true, false, true) => WALL_RD,
                            (true, false, false, false) => WALL_L,
                            (false, true, false, false) => WALL_R,
                            (false, false, true, false) => WALL_U,
                            (false, false, false, true) => WALL_D,
                            _ => " ",
                        }
                    }
                };
                row_bottom_section_render.push_str(corner);
            }

            output.push_str(&row_middle_section_render);
            output.push('\n');
            output.push_str(&row_bottom_section_render);
            output.push('\n');
        }

        write!(f, "{}", output)
    }
}

#[cfg(test)]
mod tests {

    use std::sync::Arc;

    use smallvec::smallvec;

    use super::*;
    use crate::generators::generate_maze_with_seed;

    fn gc(x: u32, y: u32) -> Coordinate {
        Coordinate::new(x, y)
    }

    #[test]
    fn single_cell_is_walled_in() {
        let g = generate_maze_with_seed(1, 1, 0).unwrap();
        let walls = g.walls(gc(0, 0)).unwrap();
        assert_eq!(walls, Walls { north: true, east: true, south: true, west: true });
        assert_eq!(walls.count(), 4);
        assert_eq!(g.walls(gc(1, 0)), None);
        assert_eq!(format!("{}", g), "┌───┐\n│   │\n└───┘\n");
    }

    #[test]
    fn two_cell_row_render() {
        let g = generate_maze_with_seed(2, 1, 0).unwrap();
        assert_eq!(format!("{}", g), "┌───────┐\n│       │\n└───────┘\n");
        assert!(!g.walls(gc(0, 0)).unwrap().east);
        assert!(!g.walls(gc(1, 0)).unwrap().west);
    }

    #[test]
    fn two_cell_column_render_has_no_middle_wall() {
        let g = generate_maze_with_seed(1, 2, 0).unwrap();
        assert_eq!(format!("{}", g), "┌───┐\n│   │\n│   │\n│   │\n└───┘\n");
    }

    #[test]
    fn two_by_two_render_joins_corners() {
        let g = generate_maze_with_seed(2, 2, 42).unwrap();
        let expected = "┌───────┐\n\
                        │       │\n\
                        │   ╷   │\n\
                        │   │   │\n\
                        └───┴───┘\n";
        assert_eq!(format!("{}", g), expected);
    }

    #[test]
    fn walls_agree_between_neighbours() {
        let g = generate_maze_with_seed(8, 6, 77).unwrap();
        for coord in g.iter() {
            let walls = g.walls(coord).unwrap();
            for dir in CompassPrimary::ALL.iter() {
                match g.neighbour_at_direction(coord, *dir) {
                    Some(neighbour) => {
                        let theirs = g.walls(neighbour).unwrap();
                        assert_eq!(walls.at(*dir), theirs.at(dir.opposite()));
                    }
                    None => assert!(walls.at(*dir)),
                }
            }
        }
    }

    #[test]
    fn open_sides_count_matches_passages() {
        let g = generate_maze_with_seed(6, 6, 5).unwrap();
        let open_sides: usize = g.iter()
            .map(|coord| 4 - g.walls(coord).unwrap().count())
            .sum();
        // each passage opens one side on both of its cells
        assert_eq!(open_sides, 2 * g.passages_count());
    }

    #[test]
    fn render_has_expected_shape() {
        let g = generate_maze_with_seed(5, 3, 9).unwrap();
        let text = format!("{}", g);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2 * 3 + 1);
        assert!(lines.iter().all(|line| line.chars().count() == 4 * 5 + 1));
    }

    #[test]
    fn cell_body_displays() {
        let path = PathDisplay::new(&[gc(0, 0), gc(1, 0)]);
        assert_eq!(path.render_cell_body(gc(1, 0)), " . ");
        assert_eq!(path.render_cell_body(gc(2, 0)), "   ");

        let ends = StartEndPointsDisplay::new(smallvec![gc(0, 0)], smallvec![gc(3, 3)]);
        assert_eq!(ends.render_cell_body(gc(0, 0)), " S ");
        assert_eq!(ends.render_cell_body(gc(3, 3)), " E ");
        assert_eq!(ends.render_cell_body(gc(1, 1)), "   ");
    }

    #[test]
    fn rendering_uses_the_grid_display() {
        let mut g = generate_maze_with_seed(1, 1, 0).unwrap();
        let ends = StartEndPointsDisplay::new(smallvec![gc(0, 0)], smallvec![]);
        g.set_grid_display(Some(Arc::new(ends)));
        assert_eq!(format!("{}", g), "┌───┐\n│ S │\n└───┘\n");
    }
}
