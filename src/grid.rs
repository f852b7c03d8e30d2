use std::fmt;
use std::mem;
use std::sync::Arc;
use std::slice;

use error_chain::bail;
use petgraph::graph::{NodeIndex, UnGraph};
use smallvec::SmallVec;

use crate::cells::{CompassPrimary, Coordinate, MazeCell, Passage};
use crate::errors::*;
use crate::grid_displays::GridDisplay;
use crate::units::{ColumnsCount, EdgesCount, Height, NodesCount, RowsCount, Width};

pub type CoordinateSmallVec = SmallVec<[Coordinate; 4]>;

/// A rectangular grid of maze cells.
///
/// All cells live in one row-major `Vec`; adjacency between cells is expressed as
/// indices into that `Vec`, so marking a cell visited or carving from it is seen
/// through every link to it.
#[derive(Clone)]
pub struct Grid {
    cells: Vec<MazeCell>,
    width: usize,
    height: usize,
    grid_display: Option<Arc<dyn GridDisplay + Send + Sync>>,
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Grid :: width: {:?}, height: {:?}, passages: {:?}",
               self.width, self.height, self.passages_count())
    }
}

impl Grid {
    /// Allocates every cell and links each to its in-bounds neighbours. No passages are carved.
    ///
    /// Fails with `InvalidArgument` for an empty grid or one too large to allocate.
    pub(crate) fn new(width: Width, height: Height) -> Result<Grid> {
        let (Width(w), Height(h)) = (width, height);
        if w == 0 || h == 0 {
            bail!(ErrorKind::InvalidArgument(format!("maze dimensions must be positive, got {} x {}",
                                                     w, h)));
        }
        let too_large = || ErrorKind::InvalidArgument(format!("maze of {} x {} cells is too large", w, h));

        let cells_count = w.checked_mul(h).ok_or_else(too_large)?;
        let bytes = cells_count.checked_mul(mem::size_of::<MazeCell>()).ok_or_else(too_large)?;
        if bytes > isize::MAX as usize || w > u32::MAX as usize || h > u32::MAX as usize {
            bail!(too_large());
        }

        let mut cells = Vec::new();
        cells.try_reserve_exact(cells_count).map_err(|_| too_large())?;
        for index in 0..cells_count {
            let position = Coordinate::new((index % w) as u32, (index / w) as u32);
            let mut neighbours = [None; 4];
            for dir in CompassPrimary::ALL.iter() {
                neighbours[dir.slot()] = position.offset(*dir)
                    .and_then(|c| index_of(c, w, h));
            }
            cells.push(MazeCell::new(position, neighbours));
        }

        Ok(Grid {
            cells,
            width: w,
            height: h,
            grid_display: None,
        })
    }

    #[inline]
    pub fn set_grid_display(&mut self, grid_display: Option<Arc<dyn GridDisplay + Send + Sync>>) {
        self.grid_display = grid_display;
    }

    #[inline]
    pub fn grid_display(&self) -> &Option<Arc<dyn GridDisplay + Send + Sync>> {
        &self.grid_display
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn rows(&self) -> RowsCount {
        RowsCount(self.height)
    }

    #[inline]
    pub fn columns(&self) -> ColumnsCount {
        ColumnsCount(self.width)
    }

    /// (cells, passages) of a perfect maze over this grid.
    pub fn graph_size(&self) -> (NodesCount, EdgesCount) {
        let nodes = self.size();
        (NodesCount(nodes), EdgesCount(nodes.saturating_sub(1)))
    }

    pub fn passages_count(&self) -> usize {
        self.cells.iter().map(|cell| cell.passages().len()).sum()
    }

    #[inline]
    pub fn cells(&self) -> &[MazeCell] {
        &self.cells
    }

    #[inline]
    pub fn cell(&self, coord: Coordinate) -> Option<&MazeCell> {
        self.coordinate_to_index(coord).map(|index| &self.cells[index])
    }

    #[inline]
    pub(crate) fn cell_at_index(&self, index: usize) -> &MazeCell {
        &self.cells[index]
    }

    #[inline]
    pub(crate) fn cell_at_index_mut(&mut self, index: usize) -> &mut MazeCell {
        &mut self.cells[index]
    }

    /// Forget all carving so the grid can be carved again.
    pub(crate) fn reset(&mut self) {
        for cell in &mut self.cells {
            cell.visited = false;
            cell.passages.clear();
        }
    }

    /// Is the grid coordinate valid for this grid - within the grid's dimensions
    #[inline]
    pub fn is_valid_coordinate(&self, coord: Coordinate) -> bool {
        (coord.x as usize) < self.width && (coord.y as usize) < self.height
    }

    /// Convert a grid coordinate to a one dimensional index in the range 0...grid.size().
    /// Returns None if the grid coordinate is invalid.
    #[inline]
    pub fn coordinate_to_index(&self, coord: Coordinate) -> Option<usize> {
        index_of(coord, self.width, self.height)
    }

    #[inline]
    pub fn index_to_coordinate(&self, index: usize) -> Option<Coordinate> {
        self.cells.get(index).map(MazeCell::position)
    }

    pub fn neighbour_at_direction(&self, coord: Coordinate, dir: CompassPrimary) -> Option<Coordinate> {
        self.cell(coord)
            .and_then(|cell| cell.neighbour(dir))
            .map(|index| self.cells[index].position())
    }

    /// Cells to the North, East, South or West of `coord`, not necessarily joined by a passage.
    pub fn neighbours(&self, coord: Coordinate) -> CoordinateSmallVec {
        CompassPrimary::ALL.iter()
            .filter_map(|dir| self.neighbour_at_direction(coord, *dir))
            .collect()
    }

    /// Did the cell at `coord` itself carve a passage in `dir`?
    pub fn passage_at(&self, coord: Coordinate, dir: CompassPrimary) -> bool {
        self.cell(coord).map_or(false, |cell| cell.has_passage(dir))
    }

    /// Is there a passage between `coord` and its neighbour in `dir`, whichever side carved it?
    pub fn is_open(&self, coord: Coordinate, dir: CompassPrimary) -> bool {
        if self.passage_at(coord, dir) {
            return true;
        }
        self.neighbour_at_direction(coord, dir)
            .map_or(false, |neighbour| self.passage_at(neighbour, dir.opposite()))
    }

    /// Are two cells in the grid joined by a passage? The argument order does not matter.
    pub fn is_linked(&self, a: Coordinate, b: Coordinate) -> bool {
        CompassPrimary::ALL.iter()
            .any(|dir| self.neighbour_at_direction(a, *dir) == Some(b) && self.is_open(a, *dir))
    }

    /// Cells joined to `coord` by a passage in either direction. None for an invalid coordinate.
    pub fn links(&self, coord: Coordinate) -> Option<CoordinateSmallVec> {
        if !self.is_valid_coordinate(coord) {
            return None;
        }
        let linked = CompassPrimary::ALL.iter()
            .filter(|dir| self.is_open(coord, **dir))
            .filter_map(|dir| self.neighbour_at_direction(coord, *dir))
            .collect();
        Some(linked)
    }

    /// Row-major iteration over every coordinate, starting at (0, 0).
    pub fn iter(&self) -> CellIter {
        CellIter { cells: self.cells.iter() }
    }

    /// Rows of cells, from y = 0 upwards.
    pub fn iter_row(&self) -> impl Iterator<Item = &[MazeCell]> + '_ {
        self.cells.chunks(self.width)
    }

    /// Every carved passage as (carving cell, passage), in grid order.
    pub fn iter_passages(&self) -> impl Iterator<Item = (Coordinate, Passage)> + '_ {
        self.cells.iter()
            .flat_map(|cell| cell.passages().iter().map(move |p| (cell.position(), *p)))
    }

    /// The carved passages as an undirected petgraph graph. Node `i` is the cell at grid index `i`.
    pub fn passage_graph(&self) -> UnGraph<Coordinate, CompassPrimary> {
        let (NodesCount(nodes), EdgesCount(edges)) = self.graph_size();
        let mut graph = UnGraph::with_capacity(nodes, edges);
        for cell in &self.cells {
            graph.add_node(cell.position());
        }
        for (from, passage) in self.iter_passages() {
            if let (Some(a), Some(b)) = (self.coordinate_to_index(from),
                                         self.coordinate_to_index(passage.to)) {
                graph.add_edge(NodeIndex::new(a), NodeIndex::new(b), passage.direction);
            }
        }
        graph
    }
}

#[inline]
fn index_of(coord: Coordinate, width: usize, height: usize) -> Option<usize> {
    let (x, y) = (coord.x as usize, coord.y as usize);
    if x < width && y < height {
        Some(y * width + x)
    } else {
        None
    }
}

#[derive(Clone, Debug)]
pub struct CellIter<'a> {
    cells: slice::Iter<'a, MazeCell>,
}

impl<'a> Iterator for CellIter<'a> {
    type Item = Coordinate;

    fn next(&mut self) -> Option<Self::Item> {
        self.cells.next().map(MazeCell::position)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.cells.size_hint()
    }
}
impl<'a> ExactSizeIterator for CellIter<'a> {} // default impl using size_hint()
