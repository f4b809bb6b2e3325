//! Tile-laying map generator library
//!
//! Builds a shuffled deck from an edge-typed tile catalog and lays it out on
//! an unbounded grid so that every touching edge agrees. Re-exports modules
//! for use by binaries and tools.

pub mod catalog;
pub mod deck;
pub mod edges;
pub mod export;
pub mod placement;
pub mod roads;
pub mod tile;
pub mod world;

pub use catalog::{Catalog, CatalogError, TileTemplate};
pub use deck::Deck;
pub use edges::{Direction, EdgeType};
pub use placement::{generate_from_catalog, generate_world, GenerationError, GenerationReport, PlacementConfig};
pub use tile::{Tile, TileError};
pub use world::{BoundingBox, World, WorldError};
