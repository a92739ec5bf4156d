use catalog::CatalogIndex;
use std::path::Path;
use std::time::Instant;

fn main() {
    let data_dir = Path::new("data");

    println!("Loading sake catalog...\n");

    let start = Instant::now();
    let index = CatalogIndex::load_from_files(data_dir)
        .expect("Failed to load catalog");
    let elapsed = start.elapsed();

    let (sake, breweries, tastings) = index.counts();

    println!("\n=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Sake: {}", sake);
    println!("Breweries: {}", breweries);
    println!("Tasting records: {}", tastings);
    println!("\nPerformance: {:.0} records/second",
             (sake + breweries + tastings) as f64 / elapsed.as_secs_f64());
}
