//! Warehouse configuration.
//!
//! A warehouse is shaped by two numbers: how many buckets it has and how
//! many items each bucket may hold. Both default to the classic layout of
//! ten buckets of five items. The scoring policy is supplied at build time.
//!
//! ## Example
//!
//! ```rust
//! use stockkit::builder::WarehouseBuilder;
//! use stockkit::policy::DemandRecency;
//!
//! let warehouse = WarehouseBuilder::new()
//!     .buckets(4)
//!     .bucket_capacity(3)
//!     .try_build(DemandRecency)
//!     .unwrap();
//! assert_eq!(warehouse.bucket_count(), 4);
//! assert_eq!(warehouse.capacity(), 12);
//! ```

use crate::error::ConfigError;
use crate::store::Warehouse;
use crate::traits::PopularityPolicy;

/// Number of buckets in a default warehouse.
pub const DEFAULT_BUCKETS: usize = 10;

/// Items per bucket in a default warehouse.
pub const DEFAULT_BUCKET_CAPACITY: usize = 5;

/// Builder for [`Warehouse`] instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WarehouseBuilder {
    buckets: usize,
    bucket_capacity: usize,
}

impl WarehouseBuilder {
    /// Starts from the default 10 × 5 layout.
    pub fn new() -> Self {
        Self {
            buckets: DEFAULT_BUCKETS,
            bucket_capacity: DEFAULT_BUCKET_CAPACITY,
        }
    }

    /// Sets the number of buckets.
    pub fn buckets(mut self, buckets: usize) -> Self {
        self.buckets = buckets;
        self
    }

    /// Sets the per-bucket capacity.
    pub fn bucket_capacity(mut self, capacity: usize) -> Self {
        self.bucket_capacity = capacity;
        self
    }

    /// Builds a warehouse scored by `policy`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the bucket count or bucket capacity is
    /// zero.
    pub fn try_build<P: PopularityPolicy>(self, policy: P) -> Result<Warehouse<P>, ConfigError> {
        if self.buckets == 0 {
            return Err(ConfigError::new("bucket count must be greater than zero"));
        }
        if self.bucket_capacity == 0 {
            return Err(ConfigError::new(
                "bucket capacity must be greater than zero",
            ));
        }
        Ok(Warehouse::from_parts(
            self.buckets,
            self.bucket_capacity,
            policy,
        ))
    }

    /// Builds a warehouse scored by `policy`.
    ///
    /// # Panics
    ///
    /// Panics if the configuration is invalid. See
    /// [`try_build`](Self::try_build).
    pub fn build<P: PopularityPolicy>(self, policy: P) -> Warehouse<P> {
        match self.try_build(policy) {
            Ok(warehouse) => warehouse,
            Err(e) => panic!("{}", e),
        }
    }
}

impl Default for WarehouseBuilder {
    fn default() -> Self {
        Self::new()
    }
}
