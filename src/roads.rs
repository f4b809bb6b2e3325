//! Road length measurement over the placed grid.
//!
//! A walk counts tiles along a connected road. Through tiles (exactly two
//! road edges) pass the walk on; termini and junctions stop it. Every walk
//! carries the set of cells it has already counted, so closed loops of
//! through tiles terminate.

use std::collections::HashSet;

use crate::edges::{Direction, EdgeType};
use crate::world::World;

/// Length of the road run entered at (row, col).
///
/// `incoming` is the side of this cell the walk arrived through; the walk
/// does not go back out that way. Pass `None` to start in the middle of a
/// road and walk in every direction.
pub fn road_length(world: &World, row: i32, col: i32, incoming: Option<Direction>) -> usize {
    let mut visited = HashSet::new();
    walk(world, row, col, incoming, &mut visited)
}

fn walk(
    world: &World,
    row: i32,
    col: i32,
    incoming: Option<Direction>,
    visited: &mut HashSet<(i32, i32)>,
) -> usize {
    let tile = match world.get(row, col) {
        Some(t) if t.has_road() => t,
        _ => return 0,
    };
    // Already counted on this walk
    if !visited.insert((row, col)) {
        return 0;
    }

    let mut total = 1;
    if tile.has_road_end() {
        return total;
    }

    for dir in Direction::ALL {
        if tile.edge(dir) != EdgeType::Road || Some(dir) == incoming {
            continue;
        }
        if let Some((next_row, next_col)) = dir.step(row, col) {
            total += walk(world, next_row, next_col, Some(dir.opposite()), visited);
        }
    }

    total
}

/// Lengths of the roads leaving a terminus or junction at (row, col), one
/// entry per road edge in NESW order. Each length counts the terminus.
///
/// Returns an empty list for empty cells, roadless tiles and through tiles.
pub fn road_lengths_from(world: &World, row: i32, col: i32) -> Vec<usize> {
    let tile = match world.get(row, col) {
        Some(t) if t.has_road() && t.has_road_end() => t,
        _ => return Vec::new(),
    };

    let mut lengths = Vec::new();
    for dir in Direction::ALL {
        if tile.edge(dir) != EdgeType::Road {
            continue;
        }
        let mut visited = HashSet::new();
        visited.insert((row, col));
        let beyond = match dir.step(row, col) {
            Some((next_row, next_col)) => walk(world, next_row, next_col, Some(dir.opposite()), &mut visited),
            None => 0,
        };
        lengths.push(1 + beyond);
    }

    lengths
}

/// Summary of the roads on a finished map
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoadSummary {
    /// Tiles with at least one road edge
    pub road_tiles: usize,
    /// Termini and junctions
    pub road_ends: usize,
    /// Longest single road, in tiles
    pub longest: usize,
}

/// Measure every road on the map
pub fn summarize_roads(world: &World) -> RoadSummary {
    let mut summary = RoadSummary::default();

    for ((row, col), tile) in world.iter() {
        if !tile.has_road() {
            continue;
        }
        summary.road_tiles += 1;

        let longest_here = if tile.has_road_end() {
            summary.road_ends += 1;
            road_lengths_from(world, row, col).into_iter().max().unwrap_or(0)
        } else {
            // Covers loops, which have no terminus to start from
            road_length(world, row, col, None)
        };
        summary.longest = summary.longest.max(longest_here);
    }

    summary
}
