use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use tile_layer::catalog::Catalog;
use tile_layer::export;
use tile_layer::placement::{self, PlacementConfig};
use tile_layer::roads;

#[derive(Parser, Debug)]
#[command(name = "tile_layer")]
#[command(about = "Generate tile-laying maps where every touching edge agrees")]
struct Args {
    /// Random seed (uses random seed if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Catalog JSON file (default: built-in classic tile set)
    #[arg(short, long)]
    catalog: Option<PathBuf>,

    /// Write the catalog in use to a JSON file (a starting point for custom sets)
    #[arg(long)]
    save_catalog: Option<PathBuf>,

    /// Export the finished world as JSON (e.g., "world.json")
    #[arg(short, long)]
    export: Option<PathBuf>,

    /// Row of the start tile
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    origin_row: i32,

    /// Column of the start tile
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    origin_col: i32,

    /// Report road statistics
    #[arg(long)]
    roads: bool,

    /// Log every placement (same as RUST_LOG=debug)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    // Initialize RNG
    let seed = args.seed.unwrap_or_else(|| rand::random());
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    println!("Generating map with seed: {}", seed);

    let catalog = match &args.catalog {
        Some(path) => {
            println!("Loading catalog from {}", path.display());
            Catalog::load(path)?
        }
        None => Catalog::defaults(),
    };
    println!(
        "Catalog: {} templates, {} tiles (start: {})",
        catalog.templates().len(),
        catalog.total_tiles(),
        catalog.start_template().image
    );

    if let Some(ref path) = args.save_catalog {
        catalog.save(path)?;
        println!("Saved catalog to {}", path.display());
    }

    let config = PlacementConfig {
        origin: (args.origin_row, args.origin_col),
    };
    let (world, report) = placement::generate_from_catalog(&catalog, &config, &mut rng)?;

    println!(
        "Placed {} of {} tiles in {:?} ({:.1}%)",
        report.placed,
        report.deck_size,
        report.elapsed,
        100.0 * report.placement_rate()
    );
    if !report.discarded.is_empty() {
        println!("Discarded: {}", report.discarded.join(", "));
    }
    if let Some(bounds) = world.bounding_box() {
        println!(
            "Bounds: rows {}..={}, cols {}..={} ({}x{})",
            bounds.min_row,
            bounds.max_row,
            bounds.min_col,
            bounds.max_col,
            bounds.rows(),
            bounds.cols()
        );
    }

    if args.roads {
        let summary = roads::summarize_roads(&world);
        println!(
            "Roads: {} road tiles, {} ends/junctions, longest road {} tiles",
            summary.road_tiles, summary.road_ends, summary.longest
        );
    }

    if let Some(ref path) = args.export {
        export::export_world_json(&world, Some(seed), path)?;
        println!("Exported world to {}", path.display());
    }

    Ok(())
}
