//! JSON export of a finished world for renderers and other tools.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::tile::TileRecord;
use crate::world::{BoundingBox, World};

/// Errors that can occur while exporting
#[derive(Debug)]
pub enum ExportError {
    Io(std::io::Error),
    Serialization(String),
}

impl std::fmt::Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportError::Io(e) => write!(f, "IO error: {}", e),
            ExportError::Serialization(e) => write!(f, "Serialization error: {}", e),
        }
    }
}

impl std::error::Error for ExportError {}

impl From<std::io::Error> for ExportError {
    fn from(e: std::io::Error) -> Self {
        ExportError::Io(e)
    }
}

/// One placed tile and where it sits
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedTile {
    pub row: i32,
    pub col: i32,
    #[serde(flatten)]
    pub tile: TileRecord,
}

/// Everything a renderer needs: the bounds and the placed tiles
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldExport {
    /// Seed the world was generated from, when known
    pub seed: Option<u64>,
    pub bounds: Option<BoundingBox>,
    pub tiles: Vec<PlacedTile>,
}

impl WorldExport {
    pub fn from_world(world: &World, seed: Option<u64>) -> Self {
        let tiles = world
            .iter()
            .map(|((row, col), tile)| PlacedTile { row, col, tile: tile.to_record() })
            .collect();

        Self {
            seed,
            bounds: world.bounding_box(),
            tiles,
        }
    }

    pub fn to_json(&self) -> Result<String, ExportError> {
        serde_json::to_string_pretty(self).map_err(|e| ExportError::Serialization(e.to_string()))
    }

    pub fn write_to(&self, path: &Path) -> Result<(), ExportError> {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, self).map_err(|e| ExportError::Serialization(e.to_string()))
    }
}

/// Export a world straight to a JSON file
pub fn export_world_json(world: &World, seed: Option<u64>, path: &Path) -> Result<(), ExportError> {
    WorldExport::from_world(world, seed).write_to(path)
}
