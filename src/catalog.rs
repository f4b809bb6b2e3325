//! Tile template catalog.
//!
//! The catalog is static configuration: which tiles exist, how many of each,
//! and which one starts the map. The classic 72-tile set is embedded in the
//! binary via `include_str!`; callers can load another catalog from a JSON
//! file with the same layout.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::edges::{Direction, EdgeType};
use crate::tile;

const DEFAULT_CATALOG_JSON: &str = include_str!("../data/defaults/catalog.json");

/// Errors found while loading or validating a catalog
#[derive(Debug)]
pub enum CatalogError {
    /// Catalog has no templates at all
    Empty,
    /// No template has the start role
    NoStartTile,
    /// More than one template has the start role
    MultipleStartTiles(usize),
    /// A template declares zero instances
    ZeroMultiplicity(String),
    /// Edge code is not four characters over {r, g, c}
    InvalidEdgeCode { image: String, code: String },
    /// Catalog file could not be read
    Io(std::io::Error),
    /// Catalog file is not valid catalog JSON
    Parse(String),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::Empty => write!(f, "Catalog contains no tiles"),
            CatalogError::NoStartTile => write!(f, "Catalog has no start tile"),
            CatalogError::MultipleStartTiles(n) => {
                write!(f, "Catalog has {} start tiles, expected exactly one", n)
            }
            CatalogError::ZeroMultiplicity(image) => {
                write!(f, "Tile {} has a count of zero", image)
            }
            CatalogError::InvalidEdgeCode { image, code } => {
                write!(f, "Tile {} has invalid edge code {:?}", image, code)
            }
            CatalogError::Io(e) => write!(f, "IO error: {}", e),
            CatalogError::Parse(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for CatalogError {}

impl From<std::io::Error> for CatalogError {
    fn from(e: std::io::Error) -> Self {
        CatalogError::Io(e)
    }
}

/// Role of a template within the deck
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileRole {
    #[default]
    #[serde(alias = "reg")]
    Regular,
    Start,
}

/// One catalog entry as written in the JSON file
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub image: String,
    pub count: u32,
    #[serde(default)]
    pub role: TileRole,
    /// Edge code in NESW order, e.g. "crgr"
    pub edges: String,
    #[serde(default)]
    pub two_cities: bool,
}

#[derive(Debug, Serialize, Deserialize)]
struct CatalogFile {
    tiles: Vec<CatalogRecord>,
}

/// Parse a four-character NESW edge code
pub fn parse_edge_code(code: &str) -> Option<[EdgeType; 4]> {
    let mut chars = code.chars();
    let mut edges = [EdgeType::Grass; 4];
    for dir in Direction::ALL {
        edges[dir.index()] = EdgeType::from_code(chars.next()?)?;
    }
    if chars.next().is_some() {
        return None;
    }
    Some(edges)
}

/// Static, unrotated tile definition
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileTemplate {
    pub image: String,
    /// Edges in NESW order as authored
    pub edges: [EdgeType; 4],
    /// How many instances go into the deck
    pub count: u32,
    pub is_start: bool,
    pub has_two_cities: bool,
}

impl TileTemplate {
    pub fn new(image: impl Into<String>, edges: [EdgeType; 4], count: u32) -> Self {
        Self {
            image: image.into(),
            edges,
            count,
            is_start: false,
            has_two_cities: false,
        }
    }

    /// Mark as the start template
    pub fn start(mut self) -> Self {
        self.is_start = true;
        self
    }

    pub fn with_two_cities(mut self) -> Self {
        self.has_two_cities = true;
        self
    }

    pub fn has_road_end(&self) -> bool {
        tile::is_road_end(&self.edges)
    }

    /// Edge code in NESW order, the inverse of `parse_edge_code`
    pub fn edge_code(&self) -> String {
        self.edges.iter().map(|e| e.code()).collect()
    }

    pub fn to_record(&self) -> CatalogRecord {
        CatalogRecord {
            image: self.image.clone(),
            count: self.count,
            role: if self.is_start { TileRole::Start } else { TileRole::Regular },
            edges: self.edge_code(),
            two_cities: self.has_two_cities,
        }
    }

    fn from_record(record: CatalogRecord) -> Result<Self, CatalogError> {
        if record.count == 0 {
            return Err(CatalogError::ZeroMultiplicity(record.image));
        }
        let edges = match parse_edge_code(&record.edges) {
            Some(edges) => edges,
            None => {
                return Err(CatalogError::InvalidEdgeCode {
                    image: record.image,
                    code: record.edges,
                })
            }
        };

        Ok(Self {
            image: record.image,
            edges,
            count: record.count,
            is_start: record.role == TileRole::Start,
            has_two_cities: record.two_cities,
        })
    }
}

/// A validated catalog: non-empty, positive counts, exactly one start template
#[derive(Clone, Debug)]
pub struct Catalog {
    templates: Vec<TileTemplate>,
}

impl Catalog {
    /// Validate a list of templates
    pub fn new(templates: Vec<TileTemplate>) -> Result<Self, CatalogError> {
        if templates.is_empty() {
            return Err(CatalogError::Empty);
        }
        if let Some(t) = templates.iter().find(|t| t.count == 0) {
            return Err(CatalogError::ZeroMultiplicity(t.image.clone()));
        }
        match templates.iter().filter(|t| t.is_start).count() {
            0 => return Err(CatalogError::NoStartTile),
            1 => {}
            n => return Err(CatalogError::MultipleStartTiles(n)),
        }

        Ok(Self { templates })
    }

    /// Build from raw file records
    pub fn from_records(records: Vec<CatalogRecord>) -> Result<Self, CatalogError> {
        let templates = records
            .into_iter()
            .map(TileTemplate::from_record)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(templates)
    }

    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile =
            serde_json::from_str(json).map_err(|e| CatalogError::Parse(e.to_string()))?;
        Self::from_records(file.tiles)
    }

    /// Load a catalog JSON file
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Catalog JSON in the same layout `from_json_str` reads
    pub fn to_json(&self) -> Result<String, CatalogError> {
        let file = CatalogFile {
            tiles: self.templates.iter().map(TileTemplate::to_record).collect(),
        };
        serde_json::to_string_pretty(&file).map_err(|e| CatalogError::Parse(e.to_string()))
    }

    /// Write the catalog to a JSON file that `load` accepts
    pub fn save(&self, path: &Path) -> Result<(), CatalogError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// The embedded classic tile set
    pub fn defaults() -> Self {
        Self::from_json_str(DEFAULT_CATALOG_JSON).expect("Failed to parse embedded catalog.json")
    }

    pub fn templates(&self) -> &[TileTemplate] {
        &self.templates
    }

    pub fn start_template(&self) -> &TileTemplate {
        // Validated in `new`
        &self.templates[self.templates.iter().position(|t| t.is_start).unwrap_or(0)]
    }

    /// Total number of tile instances across all templates
    pub fn total_tiles(&self) -> usize {
        self.templates.iter().map(|t| t.count as usize).sum()
    }
}
