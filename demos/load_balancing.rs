//! Example comparing home-bucket insertion with load-balanced insertion.
//!
//! Run with: cargo run --example load_balancing

use stockkit::prelude::*;

const SCRIPT: &str = "\
8
add 1 3 rivets 40 2
add 1 13 screws 35 4
add 1 23 washers 50 1
add 1 33 dowels 12 6
add 1 43 pins 18 3
purchase 2 23 10
restock 33 8
delete 43
";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    println!("=== Load Balancing ===\n");

    // Same ids through both insertion paths: every id hashes to bucket 0.
    let entries: Vec<StockEntry> = (0..8)
        .map(|n| StockEntry::new(1, n * 10, format!("bin-{n}"), 10, n))
        .collect();

    println!("1. add_product: everything lands in bucket 0");
    let mut primary = Warehouse::new();
    for entry in entries.iter().cloned() {
        let insertion =
            primary.add_product(entry.id, entry.name, entry.stock, entry.day, entry.demand);
        if let Some(evicted) = insertion.evicted {
            println!("   evicted id {}", evicted.id());
        }
    }
    println!("   stored {} of {}", primary.len(), entries.len());
    println!();

    println!("2. better_add_product: overflow spills into siblings");
    let balanced = Warehouse::from_entries(DemandRecency, entries.iter().cloned());
    for (index, bucket) in balanced.buckets().iter().enumerate() {
        if !bucket.is_empty() {
            println!("   bucket {index}: {bucket}");
        }
    }
    println!("   stored {} of {}", balanced.len(), entries.len());
    println!();

    println!("3. Command script");
    let mut warehouse = Warehouse::new();
    match parse_commands(SCRIPT) {
        Ok(commands) => {
            for (command, outcome) in commands.clone().into_iter().zip(warehouse.apply_all(commands)) {
                println!("   {command:?} -> {outcome:?}");
            }
        },
        Err(err) => eprintln!("   bad script: {err}"),
    }
    println!("\n{warehouse}");
}
