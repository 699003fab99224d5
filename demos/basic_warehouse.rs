//! Example walking through the primary warehouse operations.
//!
//! Run with: cargo run --example basic_warehouse
//! Set `RUST_LOG=stockkit=debug` to see eviction events.

use stockkit::prelude::*;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    println!("=== Warehouse Basics ===\n");

    let mut warehouse = Warehouse::new();

    // Example 1: Fill bucket 0
    println!("1. Fill bucket 0 (ids 0, 10, 20, 30, 40)");
    for (demand, id) in [0u64, 10, 20, 30, 40].into_iter().enumerate() {
        warehouse.add_product(id, format!("widget-{id}"), 20, 1, demand as u64 + 1);
    }
    println!("   bucket 0: {}", warehouse.bucket(0).unwrap());
    println!();

    // Example 2: A sixth item evicts the least popular
    println!("2. Add id 50 to the full bucket");
    let insertion = warehouse.add_product(50, "widget-50", 20, 1, 9);
    if let Some(evicted) = &insertion.evicted {
        println!("   evicted {evicted}");
    }
    println!("   bucket 0: {}", warehouse.bucket(0).unwrap());
    println!();

    // Example 3: Restock and purchase
    println!("3. Restock id 20 and sell some units");
    warehouse.restock_product(20, 5);
    match warehouse.purchase_product(20, 4, 10) {
        Outcome::Applied => println!("   sold 10 units of id 20"),
        other => println!("   purchase failed: {other:?}"),
    }
    match warehouse.purchase_product(20, 4, 100) {
        Outcome::InsufficientStock {
            requested,
            available,
        } => println!("   cannot sell {requested}, only {available} left"),
        other => println!("   unexpected: {other:?}"),
    }
    println!("   id 20 is now {}", warehouse.get(20).unwrap());
    println!();

    // Example 4: Delete
    println!("4. Delete id 30");
    if let Some(removed) = warehouse.delete_product(30) {
        println!("   removed {removed}");
    }
    println!();

    println!("Final warehouse:\n{warehouse}");
    if let Err(err) = warehouse.check_invariants() {
        eprintln!("invariant violated: {err}");
    }
}
