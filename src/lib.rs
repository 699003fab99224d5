//! stockkit: a bucketed inventory warehouse that keeps each bucket as a
//! bounded min-heap of items ordered by popularity.
//!
//! See `DESIGN.md` for internal architecture and invariants.

pub mod builder;
pub mod command;
pub mod ds;
pub mod error;
pub mod item;
pub mod policy;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
pub mod store;
pub mod traits;
