//! Profiling tool: how many tiles get placed, and how fast, across many seeds

use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use tile_layer::{
    catalog::Catalog,
    deck::Deck,
    placement::{self, PlacementConfig},
    roads,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let runs = 200u64;
    let first_seed = 1337u64;

    let catalog = Catalog::defaults();
    let config = PlacementConfig::default();

    println!("=== Placement Profiling ===");
    println!("Catalog: {} templates, {} tiles", catalog.templates().len(), catalog.total_tiles());
    println!("Runs: {} (seeds {}..{})", runs, first_seed, first_seed + runs);
    println!();

    let mut deck_time = Duration::ZERO;
    let mut placement_time = Duration::ZERO;
    let mut road_time = Duration::ZERO;
    let mut placed_total = 0usize;
    let mut worst_placed = usize::MAX;
    let mut full_decks = 0usize;
    let mut longest_road = 0usize;
    let mut largest_area = 0usize;

    for seed in first_seed..first_seed + runs {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let start = Instant::now();
        let deck = Deck::build(&catalog, &mut rng);
        deck_time += start.elapsed();

        let start = Instant::now();
        let (world, report) = placement::generate_world(deck, &config, &mut rng)?;
        placement_time += start.elapsed();

        let start = Instant::now();
        let summary = roads::summarize_roads(&world);
        road_time += start.elapsed();

        placed_total += report.placed;
        worst_placed = worst_placed.min(report.placed);
        if report.discarded.is_empty() {
            full_decks += 1;
        }
        longest_road = longest_road.max(summary.longest);
        if let Some(bounds) = world.bounding_box() {
            largest_area = largest_area.max(bounds.rows() * bounds.cols());
        }
    }

    let deck_size = catalog.total_tiles();
    println!("Average placed:   {:.1} / {}", placed_total as f64 / runs as f64, deck_size);
    println!("Worst run:        {} / {}", worst_placed, deck_size);
    println!("Complete decks:   {} of {} runs", full_decks, runs);
    println!("Longest road:     {} tiles", longest_road);
    println!("Largest bounds:   {} cells", largest_area);

    // Summary
    let total = deck_time + placement_time + road_time;
    println!("\n=== Timing ===");
    println!("Deck building: {:>8.2}% ({:?})", 100.0 * deck_time.as_secs_f64() / total.as_secs_f64(), deck_time);
    println!("Placement:     {:>8.2}% ({:?})", 100.0 * placement_time.as_secs_f64() / total.as_secs_f64(), placement_time);
    println!("Road walks:    {:>8.2}% ({:?})", 100.0 * road_time.as_secs_f64() / total.as_secs_f64(), road_time);
    println!("Per run:       {:?}", total / runs as u32);

    Ok(())
}
