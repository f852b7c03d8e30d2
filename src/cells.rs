use smallvec::SmallVec;
use std::fmt;

/// Position of a cell in the grid. `x` grows East, `y` grows North.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct Coordinate {
    pub x: u32,
    pub y: u32,
}

impl Coordinate {
    pub fn new(x: u32, y: u32) -> Coordinate {
        Coordinate { x, y }
    }

    /// Creates a new `Coordinate` offset 1 cell away in the given direction.
    /// Returns None if the offset is not representable (below zero).
    /// Upper grid bounds are not checked here.
    pub fn offset(self, dir: CompassPrimary) -> Option<Coordinate> {
        let (x, y) = (self.x, self.y);
        match dir {
            CompassPrimary::North => y.checked_add(1).map(|y| Coordinate { x, y }),
            CompassPrimary::East => x.checked_add(1).map(|x| Coordinate { x, y }),
            CompassPrimary::South => y.checked_sub(1).map(|y| Coordinate { x, y }),
            CompassPrimary::West => x.checked_sub(1).map(|x| Coordinate { x, y }),
        }
    }
}

impl From<(u32, u32)> for Coordinate {
    fn from(x_y_pair: (u32, u32)) -> Coordinate {
        Coordinate::new(x_y_pair.0, x_y_pair.1)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The four grid directions. The declaration order is the neighbour slot order of a `MazeCell`.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub enum CompassPrimary {
    North,
    East,
    South,
    West,
}

impl CompassPrimary {
    pub const ALL: [CompassPrimary; 4] = [CompassPrimary::North,
                                          CompassPrimary::East,
                                          CompassPrimary::South,
                                          CompassPrimary::West];

    #[inline]
    pub fn slot(self) -> usize {
        match self {
            CompassPrimary::North => 0,
            CompassPrimary::East => 1,
            CompassPrimary::South => 2,
            CompassPrimary::West => 3,
        }
    }

    #[inline]
    pub fn from_slot(slot: usize) -> Option<CompassPrimary> {
        CompassPrimary::ALL.get(slot).cloned()
    }

    #[inline]
    pub fn opposite(self) -> CompassPrimary {
        match self {
            CompassPrimary::North => CompassPrimary::South,
            CompassPrimary::East => CompassPrimary::West,
            CompassPrimary::South => CompassPrimary::North,
            CompassPrimary::West => CompassPrimary::East,
        }
    }
}

/// A carved connection, recorded once on the cell that carved it.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Passage {
    pub to: Coordinate,
    pub direction: CompassPrimary,
}

pub type PassageSmallVec = SmallVec<[Passage; 4]>;

#[derive(Clone, Debug)]
pub struct MazeCell {
    position: Coordinate,
    // Arena indices into the owning grid, slot order N, E, S, W
    neighbours: [Option<usize>; 4],
    pub(crate) visited: bool,
    pub(crate) passages: PassageSmallVec,
}

impl MazeCell {
    pub(crate) fn new(position: Coordinate, neighbours: [Option<usize>; 4]) -> MazeCell {
        MazeCell {
            position,
            neighbours,
            visited: false,
            passages: PassageSmallVec::new(),
        }
    }

    #[inline]
    pub fn position(&self) -> Coordinate {
        self.position
    }

    /// Grid index of the structurally adjacent cell in `dir`, carved or not.
    #[inline]
    pub fn neighbour(&self, dir: CompassPrimary) -> Option<usize> {
        self.neighbours[dir.slot()]
    }

    #[inline]
    pub fn neighbours(&self) -> &[Option<usize>; 4] {
        &self.neighbours
    }

    #[inline]
    pub fn visited(&self) -> bool {
        self.visited
    }

    /// Passages carved *from* this cell, in carve order.
    #[inline]
    pub fn passages(&self) -> &[Passage] {
        &self.passages
    }

    pub fn has_passage(&self, dir: CompassPrimary) -> bool {
        self.passages.iter().any(|p| p.direction == dir)
    }
}
