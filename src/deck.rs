//! Deck building: expand the catalog into shuffled tile instances.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::catalog::Catalog;
use crate::tile::Tile;

/// Ordered tiles to place. Index 0 is always a start tile.
#[derive(Clone, Debug)]
pub struct Deck {
    tiles: Vec<Tile>,
}

impl Deck {
    /// Build a deck from a validated catalog.
    ///
    /// Start template instances are expanded last so the final instance is
    /// a start tile; it is popped off, the rest are shuffled and the start
    /// tile goes back on top.
    pub fn build<R: Rng>(catalog: &Catalog, rng: &mut R) -> Self {
        let mut templates: Vec<_> = catalog.templates().iter().collect();
        // Stable, so regular templates keep catalog order
        templates.sort_by_key(|t| t.is_start);

        let mut tiles = Vec::with_capacity(catalog.total_tiles());
        for template in templates {
            for _ in 0..template.count {
                tiles.push(Tile::from_template(template));
            }
        }

        let mut deck = match tiles.pop() {
            Some(start) => vec![start],
            None => return Self { tiles },
        };
        tiles.shuffle(rng);
        deck.extend(tiles);

        Self { tiles: deck }
    }

    /// Wrap an explicit tile order, for fixed scenarios.
    /// The first tile is treated as the start tile.
    pub fn from_tiles(tiles: Vec<Tile>) -> Self {
        Self { tiles }
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn into_tiles(self) -> Vec<Tile> {
        self.tiles
    }
}
