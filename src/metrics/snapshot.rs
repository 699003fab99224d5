#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WarehouseMetricsSnapshot {
    pub insert_calls: u64,
    pub home_inserts: u64,
    pub sibling_inserts: u64, // placed outside the home bucket by better_add_product
    pub evictions: u64,
    pub replacements: u64, // inserts that displaced a record with the same id
    pub restock_calls: u64,
    pub delete_calls: u64,
    pub purchase_calls: u64,
    pub purchase_applied: u64,
    pub purchase_rejected: u64, // insufficient stock
    pub lookup_misses: u64,
    pub clears: u64,

    // gauges captured at snapshot time
    pub len: usize,
    pub capacity: usize,
    pub bucket_lens: Vec<usize>,
}
