//! Bundled popularity scoring policies.
//!
//! | Policy              | Score                                              |
//! |---------------------|----------------------------------------------------|
//! | [`DemandRecency`]   | `demand + last_purchase_day` (default)             |
//! | [`DemandOnly`]      | `demand`                                           |
//! | [`WeightedRecency`] | `demand * demand_weight + day * recency_weight`    |
//!
//! All arithmetic saturates at `u64::MAX`.

pub mod demand_only;
pub mod demand_recency;
pub mod weighted;

pub use demand_only::DemandOnly;
pub use demand_recency::DemandRecency;
pub use weighted::WeightedRecency;
