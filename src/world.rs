//! World container: sparse placed-tile storage plus its bounding box.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::edges::Direction;
use crate::tile::Tile;

/// Errors raised by world mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorldError {
    /// Tried to place onto a coordinate that already holds a tile
    OccupiedCell { row: i32, col: i32 },
}

impl std::fmt::Display for WorldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorldError::OccupiedCell { row, col } => {
                write!(f, "Cell ({}, {}) is already occupied", row, col)
            }
        }
    }
}

impl std::error::Error for WorldError {}

/// Minimal rectangle containing every placed coordinate (inclusive bounds)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_row: i32,
    pub max_row: i32,
    pub min_col: i32,
    pub max_col: i32,
}

impl BoundingBox {
    pub fn point(row: i32, col: i32) -> Self {
        Self { min_row: row, max_row: row, min_col: col, max_col: col }
    }

    /// Grow to include (row, col)
    pub fn include(&mut self, row: i32, col: i32) {
        self.min_row = self.min_row.min(row);
        self.max_row = self.max_row.max(row);
        self.min_col = self.min_col.min(col);
        self.max_col = self.max_col.max(col);
    }

    /// Box grown by `margin` cells on every side, clamped to the `i32` grid
    pub fn expanded(&self, margin: i32) -> Self {
        Self {
            min_row: self.min_row.saturating_sub(margin),
            max_row: self.max_row.saturating_add(margin),
            min_col: self.min_col.saturating_sub(margin),
            max_col: self.max_col.saturating_add(margin),
        }
    }

    pub fn rows(&self) -> usize {
        (self.max_row as i64 - self.min_row as i64 + 1) as usize
    }

    pub fn cols(&self) -> usize {
        (self.max_col as i64 - self.min_col as i64 + 1) as usize
    }
}

/// Placed tiles keyed by (row, col)
#[derive(Clone, Debug, Default)]
pub struct World {
    tiles: HashMap<(i32, i32), Tile>,
    bounds: Option<BoundingBox>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a tile, growing the bounding box
    pub fn place(&mut self, row: i32, col: i32, tile: Tile) -> Result<(), WorldError> {
        if self.tiles.contains_key(&(row, col)) {
            return Err(WorldError::OccupiedCell { row, col });
        }
        self.tiles.insert((row, col), tile);

        match self.bounds.as_mut() {
            Some(bounds) => bounds.include(row, col),
            None => self.bounds = Some(BoundingBox::point(row, col)),
        }
        Ok(())
    }

    pub fn get(&self, row: i32, col: i32) -> Option<&Tile> {
        self.tiles.get(&(row, col))
    }

    pub fn contains(&self, row: i32, col: i32) -> bool {
        self.tiles.contains_key(&(row, col))
    }

    /// Tile adjacent to (row, col) in `direction`, if any. Cells past the
    /// edge of the grid are always empty.
    pub fn neighbor(&self, row: i32, col: i32, direction: Direction) -> Option<&Tile> {
        let (row, col) = direction.step(row, col)?;
        self.get(row, col)
    }

    /// Current bounding box, `None` until the first placement
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        self.bounds
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Placed tiles in row-major order
    pub fn iter(&self) -> impl Iterator<Item = ((i32, i32), &Tile)> {
        let mut coords: Vec<_> = self.tiles.keys().copied().collect();
        coords.sort_unstable();
        coords.into_iter().map(move |pos| (pos, &self.tiles[&pos]))
    }
}
