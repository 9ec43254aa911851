//! Basic usage example for worldarea-core
//!
//! This example demonstrates how to:
//! - Load the bundled world dataset
//! - Drop a feature by name
//! - Compute equal-area statistics and rank countries
//! - Classify areas into quantile bins

use worldarea_core::export::{centroids, top_n};
use worldarea_core::{exclude_by_name, with_area, FeatureCollection, Quantiles, Result};

fn main() -> Result<()> {
    println!("=== worldarea-core Basic Usage Example ===\n");

    println!("Loading bundled dataset...");
    let world = FeatureCollection::load_bundled()?;
    let stats = world.stats();
    println!(
        "✓ {} features, {} polygons, {} vertices ({})\n",
        stats.features, stats.polygons, stats.vertices, world.crs
    );

    println!("--- Example 1: Drop Antarctica ---");
    let filtered = exclude_by_name(&world, "Antarctica");
    println!("Retained: {} of {}\n", filtered.len(), world.len());

    println!("--- Example 2: Top 5 by area (EPSG:6933) ---");
    let measured = with_area(&filtered)?;
    for (i, row) in top_n(&measured, 5)?.iter().enumerate() {
        println!("{}. {:<20} {:<15} {:>14.1} km²", i + 1, row.name, row.continent, row.area_km2);
    }
    println!();

    println!("--- Example 3: Quantile classes ---");
    let areas: Vec<f64> = measured.iter().filter_map(|f| f.area_km2()).collect();
    let q = Quantiles::classify(&areas, 5);
    for (label, count) in q.legend_labels().iter().zip(q.counts()) {
        println!("[{label}] {count} countries");
    }
    println!();

    println!("--- Example 4: Centroids ---");
    for c in centroids(&filtered)?.iter().take(5) {
        println!("{} at ({:.2}, {:.2})", c.popup(), c.lat(), c.lon());
    }

    Ok(())
}
