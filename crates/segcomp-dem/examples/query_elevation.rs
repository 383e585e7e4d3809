//! Example: Query elevation from a directory of SRTM tiles.
//!
//! Usage: cargo run --example query_elevation -- <lat> <lon> [tiles_dir]

use segcomp_dem::{Sampling, TileKey, TileStore};
use std::env;
use std::time::Instant;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        eprintln!("Usage: {} <lat> <lon> [tiles_dir]", args[0]);
        eprintln!("Example: {} 51.0543 3.7174 ./tiles", args[0]);
        std::process::exit(1);
    }

    let lat: f64 = args[1].parse().expect("Invalid latitude");
    let lon: f64 = args[2].parse().expect("Invalid longitude");
    let tiles_dir = args.get(3).map(|s| s.as_str()).unwrap_or("tiles");

    println!("Indexing tiles from {}...", tiles_dir);
    let store = TileStore::open(tiles_dir).expect("Failed to index tiles directory");
    println!("Indexed {} tiles", store.stats().indexed);

    if let Some(bounds) = store.total_bounds() {
        println!(
            "Coverage: lat {:.0}° to {:.0}°, lon {:.0}° to {:.0}°",
            bounds.min_lat, bounds.max_lat, bounds.min_lon, bounds.max_lon
        );
    }

    println!(
        "\nQuerying elevation at ({}, {}) in tile {}...",
        lat,
        lon,
        TileKey::from_coord(lat, lon)
    );
    let query_start = Instant::now();

    match store.get_elevation(lat, lon) {
        Ok(elevation) => {
            println!(
                "Elevation (nearest): {:.2} meters (loaded in {:.3}s)",
                elevation,
                query_start.elapsed().as_secs_f64()
            );
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }

    // Second query hits the cached tile
    let store = store.with_sampling(Sampling::Bilinear);
    let query_start = Instant::now();
    if let Ok(interpolated) = store.get_elevation(lat, lon) {
        println!(
            "Elevation (bilinear): {:.2} meters (cached: {:.6}s)",
            interpolated,
            query_start.elapsed().as_secs_f64()
        );
    }
}
