//! The bucketed warehouse and the values its operations return.

pub mod outcome;
pub mod warehouse;

pub use outcome::{Insertion, Outcome};
pub use warehouse::Warehouse;
