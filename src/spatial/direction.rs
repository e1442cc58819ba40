//! Compass directions and neighbor offsets for adjacency probes

/// One of the eight compass neighbors of a grid cell, or the cell itself
///
/// Offsets use image coordinates: x grows rightward, y grows downward,
/// so `North` points toward smaller y values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// The neutral direction with no displacement
    None,
    /// One cell up
    North,
    /// One cell up and right
    NorthEast,
    /// One cell right
    East,
    /// One cell down and right
    SouthEast,
    /// One cell down
    South,
    /// One cell down and left
    SouthWest,
    /// One cell left
    West,
    /// One cell up and left
    NorthWest,
}

/// The eight compass directions in fixed scan order
pub const COMPASS: [Direction; 8] = [
    Direction::North,
    Direction::NorthEast,
    Direction::East,
    Direction::SouthEast,
    Direction::South,
    Direction::SouthWest,
    Direction::West,
    Direction::NorthWest,
];

impl Direction {
    /// Integer displacement as `[dx, dy]` with components in {-1, 0, 1}
    pub const fn offset(self) -> [i32; 2] {
        match self {
            Self::None => [0, 0],
            Self::North => [0, -1],
            Self::NorthEast => [1, -1],
            Self::East => [1, 0],
            Self::SouthEast => [1, 1],
            Self::South => [0, 1],
            Self::SouthWest => [-1, 1],
            Self::West => [-1, 0],
            Self::NorthWest => [-1, -1],
        }
    }

    /// Dense index into eight-entry directional tables
    ///
    /// The direction set is closed, so directional weights are stored in a
    /// fixed-size array rather than a nested map. Returns `None` for the
    /// neutral direction, which never carries a weight.
    pub const fn index(self) -> Option<usize> {
        match self {
            Self::None => None,
            Self::North => Some(0),
            Self::NorthEast => Some(1),
            Self::East => Some(2),
            Self::SouthEast => Some(3),
            Self::South => Some(4),
            Self::SouthWest => Some(5),
            Self::West => Some(6),
            Self::NorthWest => Some(7),
        }
    }

    /// Apply this direction's displacement to a position
    pub const fn step(self, position: [i32; 2]) -> [i32; 2] {
        let offset = self.offset();
        [position[0] + offset[0], position[1] + offset[1]]
    }
}
