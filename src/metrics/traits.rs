//! # Metrics Trait Hierarchy
//!
//! Recording, snapshotting and export are split into small traits so the
//! warehouse only ever *writes* counters; readers and exporters live
//! elsewhere.
//!
//! ```text
//!   ┌──────────────────────────────┐
//!   │   WarehouseMetricsRecorder   │   written by Warehouse operations
//!   └──────────────┬───────────────┘
//!                  │
//!     ┌────────────┴─────────────────────────────┐
//!     ▼                                          ▼
//!   ┌──────────────────────────────┐    ┌──────────────────────────────┐
//!   │ MetricsSnapshotProvider<S>   │    │ MetricsExporter<S>           │
//!   │ (bench/test)                 │    │ (production monitoring)      │
//!   └──────────────────────────────┘    └──────────────────────────────┘
//! ```

/// Counters written by warehouse operations.
pub trait WarehouseMetricsRecorder {
    fn record_insert_call(&mut self);
    fn record_home_insert(&mut self);
    fn record_sibling_insert(&mut self);
    fn record_eviction(&mut self);
    fn record_replacement(&mut self);
    fn record_restock_call(&mut self);
    fn record_delete_call(&mut self);
    fn record_purchase_call(&mut self);
    fn record_purchase_applied(&mut self);
    fn record_purchase_rejected(&mut self);
    fn record_lookup_miss(&mut self);
    fn record_clear(&mut self);
}

/// Snapshot provider for bench/testing.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Export/publish metrics to production monitoring backends.
pub trait MetricsExporter<S> {
    fn export(&self, snapshot: &S);
}
