//! Placement engine.
//!
//! Tiles are laid in deck order. For each tile every empty cell in the
//! bounding box grown by one is tried in all four rotations; a
//! (cell, rotation) pair is a candidate when it touches at least one placed
//! tile and every touching edge agrees. One candidate is picked uniformly at
//! random. Tiles with no candidate are discarded for good.

use std::time::{Duration, Instant};

use log::{debug, info};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::catalog::Catalog;
use crate::deck::Deck;
use crate::edges::Direction;
use crate::tile::{Tile, TileError};
use crate::world::{World, WorldError};

/// Errors that abort generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// Deck has no start tile to seed the world with
    EmptyDeck,
    World(WorldError),
    Tile(TileError),
}

impl std::fmt::Display for GenerationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerationError::EmptyDeck => write!(f, "Deck is empty"),
            GenerationError::World(e) => write!(f, "World error: {}", e),
            GenerationError::Tile(e) => write!(f, "Tile error: {}", e),
        }
    }
}

impl std::error::Error for GenerationError {}

impl From<WorldError> for GenerationError {
    fn from(e: WorldError) -> Self {
        GenerationError::World(e)
    }
}

impl From<TileError> for GenerationError {
    fn from(e: TileError) -> Self {
        GenerationError::Tile(e)
    }
}

/// Generation settings
#[derive(Clone, Debug)]
pub struct PlacementConfig {
    /// Where the start tile goes
    pub origin: (i32, i32),
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self { origin: (0, 0) }
    }
}

/// A legal spot for one tile
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlacementCandidate {
    pub row: i32,
    pub col: i32,
    /// Clockwise quarter turns to apply before placing
    pub rotation: u8,
    /// Number of placed neighbors this placement connects to
    pub match_count: usize,
}

/// Outcome of a generation run
#[derive(Clone, Debug, Default)]
pub struct GenerationReport {
    pub deck_size: usize,
    /// Tiles placed, start tile included
    pub placed: usize,
    /// Images of tiles that found no legal spot, in deck order
    pub discarded: Vec<String>,
    pub elapsed: Duration,
}

impl GenerationReport {
    pub fn discarded_count(&self) -> usize {
        self.discarded.len()
    }

    /// Fraction of the deck that made it onto the map
    pub fn placement_rate(&self) -> f64 {
        if self.deck_size == 0 {
            return 0.0;
        }
        self.placed as f64 / self.deck_size as f64
    }
}

/// Score `tile` at (row, col) under `rotation`.
/// Returns the match count when the placement is legal.
pub fn evaluate_placement(world: &World, tile: &Tile, row: i32, col: i32, rotation: u8) -> Option<usize> {
    let mut matches = 0;
    let mut mismatches = 0;

    for dir in Direction::ALL {
        if let Some(neighbor) = world.neighbor(row, col, dir) {
            if tile.matches_rotated(dir, rotation, neighbor) {
                matches += 1;
            } else {
                mismatches += 1;
            }
        }
    }

    if matches > 0 && mismatches == 0 {
        Some(matches)
    } else {
        None
    }
}

/// All legal (cell, rotation) pairs for `tile`, in row-major then rotation order
pub fn find_candidates(world: &World, tile: &Tile) -> Vec<PlacementCandidate> {
    let mut candidates = Vec::new();
    let search = match world.bounding_box() {
        Some(bounds) => bounds.expanded(1),
        None => return candidates,
    };

    for row in search.min_row..=search.max_row {
        for col in search.min_col..=search.max_col {
            if world.contains(row, col) {
                continue;
            }
            for rotation in 0..4u8 {
                if let Some(match_count) = evaluate_placement(world, tile, row, col, rotation) {
                    candidates.push(PlacementCandidate { row, col, rotation, match_count });
                }
            }
        }
    }

    candidates
}

/// Try to place one tile. Returns the chosen candidate, or `None` if the
/// tile had nowhere to go and was dropped.
pub fn place_tile<R: Rng>(
    world: &mut World,
    mut tile: Tile,
    rng: &mut R,
) -> Result<Option<PlacementCandidate>, GenerationError> {
    let candidates = find_candidates(world, &tile);
    let chosen = match candidates.choose(rng) {
        Some(c) => *c,
        None => {
            debug!("Discarding {}: no legal placement", tile.image());
            return Ok(None);
        }
    };

    tile.rotate(chosen.rotation)?;
    debug!(
        "Placing {} at ({}, {}) rotation {} ({} of {} candidates)",
        tile.image(),
        chosen.row,
        chosen.col,
        chosen.rotation,
        chosen.match_count,
        candidates.len()
    );
    world.place(chosen.row, chosen.col, tile)?;

    Ok(Some(chosen))
}

/// Lay out a whole deck: start tile at the configured origin, then every
/// other tile in order.
pub fn generate_world<R: Rng>(
    deck: Deck,
    config: &PlacementConfig,
    rng: &mut R,
) -> Result<(World, GenerationReport), GenerationError> {
    let start_time = Instant::now();
    let deck_size = deck.len();
    let mut tiles = deck.into_tiles().into_iter();

    let start = tiles.next().ok_or(GenerationError::EmptyDeck)?;
    let mut world = World::new();
    let (origin_row, origin_col) = config.origin;
    world.place(origin_row, origin_col, start)?;

    let mut report = GenerationReport {
        deck_size,
        placed: 1,
        ..Default::default()
    };

    for tile in tiles {
        let image = tile.image().to_string();
        match place_tile(&mut world, tile, rng)? {
            Some(_) => report.placed += 1,
            None => report.discarded.push(image),
        }
    }

    report.elapsed = start_time.elapsed();
    info!(
        "Placed {} of {} tiles ({} discarded) in {:?}",
        report.placed,
        report.deck_size,
        report.discarded_count(),
        report.elapsed
    );

    Ok((world, report))
}

/// Build a deck from `catalog` and lay it out, drawing all randomness from `rng`
pub fn generate_from_catalog<R: Rng>(
    catalog: &Catalog,
    config: &PlacementConfig,
    rng: &mut R,
) -> Result<(World, GenerationReport), GenerationError> {
    let deck = Deck::build(catalog, rng);
    generate_world(deck, config, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use crate::edges::EdgeType::{City as C, Grass as G, Road as R};

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(1)
    }

    #[test]
    fn test_empty_world_has_no_candidates() {
        let world = World::new();
        assert!(find_candidates(&world, &Tile::new("a", [G; 4], false)).is_empty());
    }

    #[test]
    fn test_only_half_turn_south_fits() {
        // Start shows road only on its south side; the new tile has road only on
        // its south side, so it must go below the start turned upside down.
        let mut world = World::new();
        world.place(0, 0, Tile::new("start", [C, C, R, C], false)).unwrap();
        let tile = Tile::new("end", [G, G, R, G], false);

        let candidates = find_candidates(&world, &tile);
        assert_eq!(
            candidates,
            vec![PlacementCandidate { row: 1, col: 0, rotation: 2, match_count: 1 }]
        );

        let placed = place_tile(&mut world, tile, &mut rng()).unwrap().unwrap();
        assert_eq!((placed.row, placed.col, placed.rotation), (1, 0, 2));
        let tile = world.get(1, 0).unwrap();
        assert_eq!(tile.edge(Direction::North), R);
        assert_eq!(tile.rotation(), 2);
    }

    #[test]
    fn test_quarter_turn_direction() {
        // Road on the east side must end up facing north: three clockwise turns
        let mut world = World::new();
        world.place(0, 0, Tile::new("start", [C, C, R, C], false)).unwrap();
        let tile = Tile::new("end", [G, R, G, G], false);

        let candidates = find_candidates(&world, &tile);
        assert_eq!(
            candidates,
            vec![PlacementCandidate { row: 1, col: 0, rotation: 3, match_count: 1 }]
        );
    }

    #[test]
    fn test_unrotated_fit_to_the_north() {
        let mut world = World::new();
        world.place(0, 0, Tile::new("start", [R, C, C, C], false)).unwrap();
        let tile = Tile::new("end", [G, G, R, G], false);
        let candidates = find_candidates(&world, &tile);
        assert_eq!(
            candidates,
            vec![PlacementCandidate { row: -1, col: 0, rotation: 0, match_count: 1 }]
        );
    }

    #[test]
    fn test_mismatch_anywhere_rejects() {
        // Cell (0, 1) touches a road to the west and a city to the south
        let mut world = World::new();
        world.place(0, 0, Tile::new("a", [G, R, G, G], false)).unwrap();
        world.place(1, 1, Tile::new("b", [C, G, G, G], false)).unwrap();

        let grass = Tile::new("cloister", [G; 4], false);
        assert_eq!(evaluate_placement(&world, &grass, 0, 1, 0), None);

        let road_city = Tile::new("city1rw", [G, G, C, R], false);
        assert_eq!(evaluate_placement(&world, &road_city, 0, 1, 0), Some(2));
        assert_eq!(evaluate_placement(&world, &road_city, 0, 1, 1), None);
    }

    #[test]
    fn test_isolated_cells_are_not_candidates() {
        let mut world = World::new();
        world.place(0, 0, Tile::new("a", [G; 4], false)).unwrap();
        let grass = Tile::new("b", [G; 4], false);
        let candidates = find_candidates(&world, &grass);
        // four orthogonal neighbors, four rotations each; corners never qualify
        assert_eq!(candidates.len(), 16);
        assert!(candidates.iter().all(|c| c.row.abs() + c.col.abs() == 1));
    }

    #[test]
    fn test_unplaceable_tile_is_discarded() {
        // Start is all grass; the last tile is all city and can never touch it
        let deck = Deck::from_tiles(vec![
            Tile::new("grass", [G; 4], false),
            Tile::new("grass", [G; 4], false),
            Tile::new("grass", [G; 4], false),
            Tile::new("city4", [C; 4], false),
        ]);
        let (world, report) = generate_world(deck, &PlacementConfig::default(), &mut rng()).unwrap();

        assert_eq!(report.deck_size, 4);
        assert_eq!(report.placed, 3);
        assert_eq!(report.discarded, vec!["city4".to_string()]);
        assert_eq!(world.len(), 3);
        assert!(world.iter().all(|(_, t)| t.image() == "grass"));
    }

    #[test]
    fn test_discarded_tile_is_not_retried() {
        // city4 cannot touch the grass start, so it is dropped. The next tile
        // turns its city edge outwards, opening a spot city4 would now fit.
        let deck = Deck::from_tiles(vec![
            Tile::new("grass", [G; 4], false),
            Tile::new("city4", [C; 4], false),
            Tile::new("city1", [C, G, G, G], false),
        ]);
        for seed in 0..8 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let (world, report) = generate_world(deck.clone(), &PlacementConfig::default(), &mut rng).unwrap();

            assert_eq!(report.placed, 2);
            assert_eq!(report.discarded, vec!["city4".to_string()]);
            assert!(world.iter().all(|(_, t)| t.image() != "city4"));
            assert!(!find_candidates(&world, &Tile::new("city4", [C; 4], false)).is_empty());
        }
    }

    #[test]
    fn test_start_at_grid_corner() {
        let deck = Deck::from_tiles(vec![
            Tile::new("start", [G; 4], false),
            Tile::new("a", [G; 4], false),
            Tile::new("b", [G; 4], false),
        ]);
        let config = PlacementConfig { origin: (i32::MAX, i32::MIN) };
        let (world, report) = generate_world(deck, &config, &mut rng()).unwrap();

        assert_eq!(report.placed, 3);
        let bounds = world.bounding_box().unwrap();
        assert_eq!((bounds.max_row, bounds.min_col), (i32::MAX, i32::MIN));
    }

    #[test]
    fn test_origin_config() {
        let deck = Deck::from_tiles(vec![Tile::new("s", [G; 4], false)]);
        let config = PlacementConfig { origin: (72, 72) };
        let (world, report) = generate_world(deck, &config, &mut rng()).unwrap();
        assert_eq!(report.placed, 1);
        assert!(world.get(72, 72).is_some());
    }

    #[test]
    fn test_empty_deck_is_an_error() {
        let result = generate_world(Deck::from_tiles(Vec::new()), &PlacementConfig::default(), &mut rng());
        assert!(matches!(result, Err(GenerationError::EmptyDeck)));
    }

    #[test]
    fn test_default_catalog_edges_agree() {
        let catalog = Catalog::defaults();
        let mut rng = ChaCha8Rng::seed_from_u64(2024);
        let (world, report) = generate_from_catalog(&catalog, &PlacementConfig::default(), &mut rng).unwrap();

        assert_eq!(report.deck_size, 72);
        assert_eq!(report.placed + report.discarded_count(), 72);
        assert_eq!(world.len(), report.placed);

        for ((row, col), tile) in world.iter() {
            for dir in [Direction::East, Direction::South] {
                if let Some(neighbor) = world.neighbor(row, col, dir) {
                    assert!(tile.matches(dir, neighbor), "edge clash at ({}, {}) {:?}", row, col, dir);
                }
            }
        }
    }

    #[test]
    fn test_seed_reproduces_world() {
        let catalog = Catalog::defaults();
        let config = PlacementConfig::default();
        let (a, _) = generate_from_catalog(&catalog, &config, &mut ChaCha8Rng::seed_from_u64(5)).unwrap();
        let (b, _) = generate_from_catalog(&catalog, &config, &mut ChaCha8Rng::seed_from_u64(5)).unwrap();

        let a: Vec<_> = a.iter().map(|(pos, t)| (pos, t.clone())).collect();
        let b: Vec<_> = b.iter().map(|(pos, t)| (pos, t.clone())).collect();
        assert_eq!(a, b);
    }
}
