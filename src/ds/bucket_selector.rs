//! Home-bucket routing and sibling probe order.
//!
//! Maps an item id to its home bucket with `id mod N` and enumerates the
//! siblings the load-balancing insert probes when the home bucket is full.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bucket Selection Flow                            │
//! │                                                                         │
//! │   Item id: 23                                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │   ┌───────────────────────────────────────────────────────────────┐     │
//! │   │  BucketSelector { buckets: 10 }                               │     │
//! │   │                                                               │     │
//! │   │  home_bucket(23)  = 23 % 10 = 3                               │     │
//! │   │  probe_order(3)   = 4, 5, 6, 7, 8, 9, 0, 1, 2                 │     │
//! │   └───────────────────────────────────────────────────────────────┘     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │   ┌────┬────┬────┬────┬────┬────┬────┬────┬────┬────┐                   │
//! │   │ B0 │ B1 │ B2 │ B3 │ B4 │ B5 │ B6 │ B7 │ B8 │ B9 │                   │
//! │   └────┴────┴────┴─▲──┴─▲──┴────┴────┴────┴────┴────┘                   │
//! │                  home  first sibling                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example Usage
//!
//! ```
//! use stockkit::ds::BucketSelector;
//!
//! let selector = BucketSelector::new(10);
//! assert_eq!(selector.home_bucket(23), 3);
//!
//! let probes: Vec<usize> = selector.probe_order(8).collect();
//! assert_eq!(probes, vec![9, 0, 1, 2, 3, 4, 5, 6, 7]);
//! ```

/// Deterministic id-to-bucket mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BucketSelector {
    buckets: usize,
}

impl BucketSelector {
    /// Creates a selector over `buckets` buckets.
    ///
    /// The bucket count is clamped to at least 1.
    ///
    /// ```
    /// use stockkit::ds::BucketSelector;
    ///
    /// assert_eq!(BucketSelector::new(0).bucket_count(), 1);
    /// ```
    pub fn new(buckets: usize) -> Self {
        Self {
            buckets: buckets.max(1),
        }
    }

    /// Returns the number of buckets.
    pub fn bucket_count(&self) -> usize {
        self.buckets
    }

    /// Maps an id to its home bucket, `id mod buckets`.
    pub fn home_bucket(&self, id: u64) -> usize {
        (id % self.buckets as u64) as usize
    }

    /// Every bucket other than `home`, in the order `home + 1, home + 2, …`
    /// wrapping around.
    pub fn probe_order(&self, home: usize) -> impl Iterator<Item = usize> + use<> {
        let buckets = self.buckets;
        (1..buckets).map(move |step| (home + step) % buckets)
    }

    /// `home` followed by [`probe_order`](Self::probe_order); the order in
    /// which lookups search for an id.
    pub fn search_order(&self, home: usize) -> impl Iterator<Item = usize> + use<> {
        std::iter::once(home).chain(self.probe_order(home))
    }
}

impl Default for BucketSelector {
    /// Ten buckets.
    fn default() -> Self {
        Self::new(crate::builder::DEFAULT_BUCKETS)
    }
}
