//! Edge and direction model shared by tiles, the world grid and road walks.

use serde::{Deserialize, Serialize};

/// What a tile shows along one of its four sides
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeType {
    City,
    Grass,
    Road,
}

impl EdgeType {
    /// Parse a catalog edge code character (`c`, `g` or `r`)
    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'c' => Some(EdgeType::City),
            'g' => Some(EdgeType::Grass),
            'r' => Some(EdgeType::Road),
            _ => None,
        }
    }

    pub fn code(&self) -> char {
        match self {
            EdgeType::City => 'c',
            EdgeType::Grass => 'g',
            EdgeType::Road => 'r',
        }
    }
}

/// Cardinal directions, in the North-East-South-West order used by edge codes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// All four directions in NESW order
    pub const ALL: [Direction; 4] = [Direction::North, Direction::East, Direction::South, Direction::West];

    /// Get the opposite direction
    pub fn opposite(&self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// Next direction going clockwise (N -> E -> S -> W -> N)
    pub fn clockwise(&self) -> Self {
        match self {
            Direction::North => Direction::East,
            Direction::East => Direction::South,
            Direction::South => Direction::West,
            Direction::West => Direction::North,
        }
    }

    /// Apply `clockwise` `steps` times (taken mod 4)
    pub fn clockwise_by(&self, steps: u8) -> Self {
        let mut dir = *self;
        for _ in 0..(steps % 4) {
            dir = dir.clockwise();
        }
        dir
    }

    /// Grid offset (d_row, d_col). Rows grow southwards, columns eastwards.
    pub fn offset(&self) -> (i32, i32) {
        match self {
            Direction::North => (-1, 0),
            Direction::East => (0, 1),
            Direction::South => (1, 0),
            Direction::West => (0, -1),
        }
    }

    /// Cell one step from (row, col) in this direction, or `None` past the
    /// edge of the `i32` grid
    pub fn step(&self, row: i32, col: i32) -> Option<(i32, i32)> {
        let (dr, dc) = self.offset();
        Some((row.checked_add(dr)?, col.checked_add(dc)?))
    }

    /// Position of this direction in NESW order, used to index edge arrays
    pub fn index(&self) -> usize {
        match self {
            Direction::North => 0,
            Direction::East => 1,
            Direction::South => 2,
            Direction::West => 3,
        }
    }
}
