//! Operation counters for a [`Warehouse`](crate::store::Warehouse).
//!
//! Compiled only with the `metrics` cargo feature.

pub mod exporter;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;
