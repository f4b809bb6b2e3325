//! Tile instances: four directional edges plus rotation state.
//!
//! A tile owns its edge array outright. The only way the edges change is
//! `rotate`, which the placement engine calls once a candidate has been
//! chosen. Candidate search uses `matches_rotated` so hypothetical rotations
//! never touch the stored edges.

use serde::{Deserialize, Serialize};

use crate::catalog::TileTemplate;
use crate::edges::{Direction, EdgeType};

/// Errors raised by tile operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TileError {
    /// Rotation steps outside 0..=3
    InvalidRotation(u8),
}

impl std::fmt::Display for TileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TileError::InvalidRotation(turns) => {
                write!(f, "Invalid rotation: {} (expected 0-3 quarter turns)", turns)
            }
        }
    }
}

impl std::error::Error for TileError {}

/// Count the Road edges in an NESW edge array
pub fn road_edge_count(edges: &[EdgeType; 4]) -> usize {
    edges.iter().filter(|e| **e == EdgeType::Road).count()
}

/// Terminus/junction classification: 1, 3 or 4 road edges end a road,
/// exactly 2 pass it through. Tuned for the classic tile set.
pub fn is_road_end(edges: &[EdgeType; 4]) -> bool {
    matches!(road_edge_count(edges), 1 | 3 | 4)
}

/// A concrete tile, created by the deck builder from a template
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tile {
    image: String,
    /// Current edges in NESW order (already rotated)
    edges: [EdgeType; 4],
    /// Clockwise quarter turns applied so far, mod 4
    rotation: u8,
    has_two_cities: bool,
    has_road_end: bool,
}

impl Tile {
    /// Create an unrotated tile
    pub fn new(image: impl Into<String>, edges: [EdgeType; 4], has_two_cities: bool) -> Self {
        Self {
            image: image.into(),
            edges,
            rotation: 0,
            has_two_cities,
            has_road_end: is_road_end(&edges),
        }
    }

    pub fn from_template(template: &TileTemplate) -> Self {
        Self {
            image: template.image.clone(),
            edges: template.edges,
            rotation: 0,
            has_two_cities: template.has_two_cities,
            has_road_end: template.has_road_end(),
        }
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    /// Quarter turns applied, for renderers
    pub fn rotation(&self) -> u8 {
        self.rotation
    }

    pub fn has_two_cities(&self) -> bool {
        self.has_two_cities
    }

    pub fn has_road_end(&self) -> bool {
        self.has_road_end
    }

    /// Current edge on the given side
    pub fn edge(&self, direction: Direction) -> EdgeType {
        self.edges[direction.index()]
    }

    /// Current edges in NESW order
    pub fn edges(&self) -> [EdgeType; 4] {
        self.edges
    }

    pub fn road_edge_count(&self) -> usize {
        road_edge_count(&self.edges)
    }

    pub fn has_road(&self) -> bool {
        self.road_edge_count() > 0
    }

    /// Edge that would face `direction` if the tile were rotated `rotation`
    /// more quarter turns clockwise.
    pub fn edge_rotated(&self, direction: Direction, rotation: u8) -> EdgeType {
        // Undo the hypothetical turn to find which stored edge would end up here
        self.edge(direction.clockwise_by((4 - rotation % 4) % 4))
    }

    /// Rotate clockwise by `turns` quarter turns.
    ///
    /// One step moves North to East, East to South, South to West and West
    /// to North.
    pub fn rotate(&mut self, turns: u8) -> Result<(), TileError> {
        if turns > 3 {
            return Err(TileError::InvalidRotation(turns));
        }
        if turns == 0 {
            return Ok(());
        }

        self.edges.rotate_right(turns as usize);
        self.rotation = (self.rotation + turns) % 4;
        Ok(())
    }

    /// Does this tile connect to `neighbor`, which lies in `direction`?
    pub fn matches(&self, direction: Direction, neighbor: &Tile) -> bool {
        self.edge(direction) == neighbor.edge(direction.opposite())
    }

    /// Same as `matches`, but evaluated as if the tile had been rotated
    /// `rotation` quarter turns first.
    pub fn matches_rotated(&self, direction: Direction, rotation: u8, neighbor: &Tile) -> bool {
        self.edge_rotated(direction, rotation) == neighbor.edge(direction.opposite())
    }

    /// Serializable snapshot for renderers and exports
    pub fn to_record(&self) -> TileRecord {
        TileRecord {
            image: self.image.clone(),
            rotation: self.rotation,
            north: self.edge(Direction::North),
            east: self.edge(Direction::East),
            south: self.edge(Direction::South),
            west: self.edge(Direction::West),
            has_two_cities: self.has_two_cities,
        }
    }
}

/// Serialized form of a placed tile
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileRecord {
    pub image: String,
    pub rotation: u8,
    pub north: EdgeType,
    pub east: EdgeType,
    pub south: EdgeType,
    pub west: EdgeType,
    pub has_two_cities: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edges::EdgeType::{City as C, Grass as G, Road as R};

    fn sample() -> Tile {
        // city north, road east and south, grass west
        Tile::new("city1rse.png", [C, R, R, G], false)
    }

    #[test]
    fn test_single_rotation_remaps_edges() {
        let mut tile = sample();
        tile.rotate(1).unwrap();
        assert_eq!(tile.edge(Direction::East), C);
        assert_eq!(tile.edge(Direction::South), R);
        assert_eq!(tile.edge(Direction::West), R);
        assert_eq!(tile.edge(Direction::North), G);
        assert_eq!(tile.rotation(), 1);
    }

    #[test]
    fn test_four_turns_restore_edges() {
        let original = sample();
        for grouping in [[1u8, 3].to_vec(), vec![2, 2], vec![1, 1, 1, 1], vec![3, 1]] {
            let mut tile = original.clone();
            for turns in grouping {
                tile.rotate(turns).unwrap();
            }
            assert_eq!(tile.edges(), original.edges());
            assert_eq!(tile.rotation(), 0);
        }
    }

    #[test]
    fn test_zero_rotation_is_noop() {
        let mut tile = sample();
        tile.rotate(0).unwrap();
        assert_eq!(tile, sample());
    }

    #[test]
    fn test_invalid_rotation_rejected() {
        let mut tile = sample();
        assert_eq!(tile.rotate(4), Err(TileError::InvalidRotation(4)));
        assert_eq!(tile.rotate(200), Err(TileError::InvalidRotation(200)));
        assert_eq!(tile, sample());
    }

    #[test]
    fn test_edge_rotated_agrees_with_rotate() {
        let original = sample();
        for turns in 0..4u8 {
            let mut rotated = original.clone();
            rotated.rotate(turns).unwrap();
            for dir in Direction::ALL {
                assert_eq!(original.edge_rotated(dir, turns), rotated.edge(dir));
            }
        }
    }

    #[test]
    fn test_matches_uses_opposite_edge() {
        let tile = sample();
        let road_west = Tile::new("road2ns.png", [G, G, G, R], false);
        // tile's east edge (road) meets the neighbor's west edge (road)
        assert!(tile.matches(Direction::East, &road_west));
        assert!(!tile.matches(Direction::South, &road_west));
        // after a half turn the tile's west edge is road
        assert!(tile.matches_rotated(Direction::West, 2, &Tile::new("x", [G, R, G, G], false)));
    }

    #[test]
    fn test_road_end_classification() {
        assert!(Tile::new("a", [R, G, G, G], false).has_road_end());
        assert!(!Tile::new("b", [R, G, R, G], false).has_road_end());
        assert!(Tile::new("c", [G, R, R, R], false).has_road_end());
        assert!(Tile::new("d", [R, R, R, R], false).has_road_end());
        assert!(!Tile::new("e", [G, G, G, G], false).has_road_end());
    }

    #[test]
    fn test_record_carries_current_edges() {
        let mut tile = sample();
        tile.rotate(2).unwrap();
        let record = tile.to_record();
        assert_eq!(record.north, R);
        assert_eq!(record.south, C);
        assert_eq!(record.rotation, 2);
        assert_eq!(record.image, "city1rse.png");
    }
}
