//! # Bucketed Warehouse
//!
//! A fixed table of [`Bucket`]s, each a bounded min-heap ordered by
//! popularity. Items are routed to their *home bucket* by `id mod N`. A
//! full bucket makes room for a new item by evicting its least popular
//! member.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────────┐
//!   │                          Warehouse<P>                                    │
//!   │                                                                          │
//!   │   selector: BucketSelector (id mod 10)       policy: P                   │
//!   │                                                                          │
//!   │   ┌────────┬────────┬────────┬────────┬─────┬────────┐                   │
//!   │   │  B0    │  B1    │  B2    │  B3    │ ... │  B9    │  capacity 5 each  │
//!   │   ├────────┼────────┼────────┼────────┼─────┼────────┤                   │
//!   │   │ (root) │ (root) │        │ (root) │     │ (root) │  ← least popular  │
//!   │   │  ...   │  ...   │        │  ...   │     │  ...   │                   │
//!   │   └────────┴────────┴────────┴────────┴─────┴────────┘                   │
//!   └──────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Insertion Policies
//!
//! ```text
//!   add_product(id = 23)                   better_add_product(id = 23)
//!   ════════════════════                   ═══════════════════════════
//!   home = 23 % 10 = 3                     home = 3
//!   B3 full?                               B3 has room?  → add_product
//!     yes → scan B3 for min popularity     else probe B4, B5, …, B2
//!           swap(min, last)                  first with room → append + swim
//!           remove_last()                  all ten full?   → add_product
//!           repair at min's position                           (evicts in B3)
//!   append to B3, swim(last)
//! ```
//!
//! ## Lookups
//!
//! `restock_product`, `delete_product`, `purchase_product` and `get` search
//! the home bucket first and then the sibling probe order, so items that
//! `better_add_product` placed away from home stay reachable. Items placed
//! by `add_product` are always found on the first probe.
//!
//! ## Purchase
//!
//! A purchase moves stock into demand and stamps the purchase day. Because
//! popularity changes, the item is removed from its bucket and re-inserted
//! through `add_product`: the same record, moved, not copied. If the item
//! lived outside its home bucket and the home bucket is full, the
//! re-insert evicts from the home bucket.
//!
//! ## Core Operations
//!
//! | Method                     | Complexity | Description                        |
//! |----------------------------|------------|------------------------------------|
//! | `add_product`              | O(c)       | Evict-if-full, append, swim        |
//! | `better_add_product`       | O(N + c)   | Prefer any bucket with room        |
//! | `restock_product`          | O(N·c)     | Stock += amount, no reordering     |
//! | `delete_product`           | O(N·c)     | Remove, repair both directions     |
//! | `purchase_product`         | O(N·c)     | Mutate, remove, re-add             |
//! | `get` / `contains`         | O(N·c)     | Home bucket first, then siblings   |
//! | `check_invariants`         | O(N·c)     | Heap order, capacity, unique ids   |
//!
//! `N` is the bucket count, `c` the bucket capacity (both small constants).
//!
//! ## Thread Safety
//!
//! `Warehouse` is single-threaded. Wrap it in a `Mutex` for shared use.
//!
//! ## Example Usage
//!
//! ```
//! use stockkit::store::{Outcome, Warehouse};
//!
//! let mut warehouse = Warehouse::new();
//! warehouse.add_product(12, "hinge", 40, 1, 2);
//! warehouse.add_product(22, "latch", 10, 1, 5);
//!
//! assert_eq!(warehouse.purchase_product(12, 3, 5), Outcome::Applied);
//! assert_eq!(warehouse.get(12).unwrap().stock(), 35);
//!
//! assert_eq!(
//!     warehouse.purchase_product(22, 3, 99),
//!     Outcome::InsufficientStock { requested: 99, available: 10 }
//! );
//! assert_eq!(warehouse.restock_product(99, 1), Outcome::NotFound);
//! ```

use std::fmt;

use rustc_hash::FxHashSet;
use tracing::{debug, trace};

use crate::builder::{DEFAULT_BUCKET_CAPACITY, DEFAULT_BUCKETS};
use crate::command::Command;
use crate::ds::{Bucket, BucketSelector};
use crate::error::InvariantError;
use crate::item::{Item, StockEntry};
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::WarehouseMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::WarehouseMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{MetricsSnapshotProvider, WarehouseMetricsRecorder};
use crate::policy::DemandRecency;
use crate::store::outcome::{Insertion, Outcome};
use crate::traits::PopularityPolicy;

/// Fixed table of bounded popularity heaps.
///
/// See module-level documentation for details.
#[derive(Debug, Clone)]
pub struct Warehouse<P = DemandRecency> {
    buckets: Vec<Bucket>,
    selector: BucketSelector,
    bucket_capacity: usize,
    policy: P,
    #[cfg(feature = "metrics")]
    metrics: WarehouseMetrics,
}

impl Warehouse<DemandRecency> {
    /// Creates an empty 10 × 5 warehouse scored by [`DemandRecency`].
    ///
    /// # Examples
    /// ```
    /// use stockkit::store::Warehouse;
    ///
    /// let warehouse = Warehouse::new();
    /// assert_eq!(warehouse.bucket_count(), 10);
    /// assert_eq!(warehouse.bucket_capacity(), 5);
    /// assert!(warehouse.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::with_policy(DemandRecency)
    }
}

impl Default for Warehouse<DemandRecency> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: PopularityPolicy> Warehouse<P> {
    /// Creates an empty 10 × 5 warehouse scored by `policy`.
    ///
    /// Use [`WarehouseBuilder`](crate::builder::WarehouseBuilder) for other
    /// layouts.
    pub fn with_policy(policy: P) -> Self {
        Self::from_parts(DEFAULT_BUCKETS, DEFAULT_BUCKET_CAPACITY, policy)
    }

    /// Bucket count and capacity are clamped to at least 1.
    pub(crate) fn from_parts(buckets: usize, bucket_capacity: usize, policy: P) -> Self {
        let selector = BucketSelector::new(buckets);
        let bucket_capacity = bucket_capacity.max(1);
        Warehouse {
            buckets: (0..selector.bucket_count())
                .map(|_| Bucket::new(bucket_capacity))
                .collect(),
            selector,
            bucket_capacity,
            policy,
            #[cfg(feature = "metrics")]
            metrics: WarehouseMetrics::default(),
        }
    }

    /// Builds a warehouse by applying
    /// [`better_add_product`](Self::better_add_product) to each entry in
    /// order.
    ///
    /// # Examples
    /// ```
    /// use stockkit::item::StockEntry;
    /// use stockkit::policy::DemandOnly;
    /// use stockkit::store::Warehouse;
    ///
    /// let entries = (0..6).map(|n| StockEntry::new(1, n * 10, "crate", 1, n));
    /// let warehouse = Warehouse::from_entries(DemandOnly, entries);
    ///
    /// // Six ids hash to bucket 0; the sixth spills into bucket 1.
    /// assert_eq!(warehouse.len(), 6);
    /// assert_eq!(warehouse.bucket(1).unwrap().len(), 1);
    /// ```
    pub fn from_entries<I>(policy: P, entries: I) -> Self
    where
        I: IntoIterator<Item = StockEntry>,
    {
        let mut warehouse = Self::with_policy(policy);
        warehouse.extend_entries(entries);
        warehouse
    }

    /// Number of buckets.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Items each bucket may hold.
    pub fn bucket_capacity(&self) -> usize {
        self.bucket_capacity
    }

    /// Total capacity across all buckets.
    pub fn capacity(&self) -> usize {
        self.buckets.len() * self.bucket_capacity
    }

    /// Number of stored items.
    pub fn len(&self) -> usize {
        self.buckets.iter().map(Bucket::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Bucket::is_empty)
    }

    /// The scoring policy.
    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Bucket at `index`, if in range.
    pub fn bucket(&self, index: usize) -> Option<&Bucket> {
        self.buckets.get(index)
    }

    /// All buckets in index order.
    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    /// Home bucket for `id`.
    pub fn home_bucket(&self, id: u64) -> usize {
        self.selector.home_bucket(id)
    }

    /// Bucket currently holding `id`, if stored.
    pub fn bucket_of(&self, id: u64) -> Option<usize> {
        self.locate(id).map(|(bucket, _)| bucket)
    }

    /// Returns the item with the given id.
    pub fn get(&self, id: u64) -> Option<&Item> {
        let (bucket, pos) = self.locate(id)?;
        self.buckets[bucket].get(pos).ok()
    }

    pub fn contains(&self, id: u64) -> bool {
        self.locate(id).is_some()
    }

    /// Every stored item, bucket by bucket in heap-array order.
    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.buckets.iter().flat_map(Bucket::iter)
    }

    /// Removes every item.
    pub fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();

        for bucket in &mut self.buckets {
            bucket.clear();
        }
    }

    /// Inserts a new item into its home bucket, evicting the home bucket's
    /// least popular item first if the bucket is full.
    ///
    /// An existing record with the same id is removed first and returned in
    /// [`Insertion::replaced`].
    pub fn add_product(
        &mut self,
        id: u64,
        name: impl Into<String>,
        stock: u64,
        day: u32,
        demand: u64,
    ) -> Insertion {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        let replaced = self.take_existing(id);
        let mut insertion = self.insert_home(Item::new(id, name, stock, day, demand));
        insertion.replaced = replaced;
        insertion
    }

    /// Inserts a new item, preferring free space anywhere over eviction.
    ///
    /// If the home bucket has room this is [`add_product`](Self::add_product).
    /// Otherwise the siblings `home + 1, home + 2, …` (wrapping) are probed
    /// and the item is placed in the first one with room. Only when every
    /// bucket is full does it fall back to evicting from the home bucket.
    ///
    /// # Examples
    /// ```
    /// use stockkit::store::Warehouse;
    ///
    /// let mut warehouse = Warehouse::new();
    /// for id in [0, 10, 20, 30, 40] {
    ///     warehouse.add_product(id, "bin", 1, 0, 1);
    /// }
    /// let placed = warehouse.better_add_product(50, "bin", 1, 0, 1);
    /// assert_eq!(placed.bucket, 1);
    /// assert!(placed.evicted.is_none());
    /// assert_eq!(warehouse.len(), 6);
    /// ```
    pub fn better_add_product(
        &mut self,
        id: u64,
        name: impl Into<String>,
        stock: u64,
        day: u32,
        demand: u64,
    ) -> Insertion {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        let replaced = self.take_existing(id);
        let item = Item::new(id, name, stock, day, demand);
        let home = self.selector.home_bucket(id);

        let target = if self.buckets[home].is_full() {
            self.selector
                .probe_order(home)
                .find(|&index| !self.buckets[index].is_full())
        } else {
            Some(home)
        };

        let mut insertion = match target {
            Some(index) if index != home => {
                debug!(
                    id,
                    home,
                    bucket = index,
                    "home bucket full, placed item in sibling"
                );
                #[cfg(feature = "metrics")]
                self.metrics.record_sibling_insert();

                self.place(index, item);
                Insertion {
                    bucket: index,
                    evicted: None,
                    replaced: None,
                }
            },
            _ => self.insert_home(item),
        };
        insertion.replaced = replaced;
        insertion
    }

    /// Adds `amount` units of stock. Popularity is unaffected, so the item
    /// keeps its heap position.
    pub fn restock_product(&mut self, id: u64, amount: u64) -> Outcome {
        #[cfg(feature = "metrics")]
        self.metrics.record_restock_call();

        let Some((bucket, pos)) = self.locate_mut_tracked(id) else {
            return Outcome::NotFound;
        };
        match self.buckets[bucket].get_mut(pos) {
            Ok(item) => {
                item.add_stock(amount);
                trace!(id, amount, stock = item.stock(), "restocked item");
                Outcome::Applied
            },
            Err(_) => Outcome::NotFound,
        }
    }

    /// Removes the item with the given id and returns it.
    ///
    /// The bucket's last item fills the vacated position and is repaired in
    /// whichever direction it violates heap order.
    pub fn delete_product(&mut self, id: u64) -> Option<Item> {
        #[cfg(feature = "metrics")]
        self.metrics.record_delete_call();

        let (bucket, pos) = self.locate_mut_tracked(id)?;
        let removed = self.buckets[bucket].remove_at(pos, &self.policy);
        trace!(id, bucket, "deleted item");
        Some(removed)
    }

    /// Sells `amount` units on `day`.
    ///
    /// With enough stock: stock falls by `amount`, demand rises by
    /// `amount`, the purchase day is recorded and the item is re-inserted
    /// through [`add_product`](Self::add_product). With too little stock
    /// nothing changes and [`Outcome::InsufficientStock`] is returned.
    pub fn purchase_product(&mut self, id: u64, day: u32, amount: u64) -> Outcome {
        #[cfg(feature = "metrics")]
        self.metrics.record_purchase_call();

        let Some((bucket, pos)) = self.locate_mut_tracked(id) else {
            return Outcome::NotFound;
        };
        let available = match self.buckets[bucket].get(pos) {
            Ok(item) => item.stock(),
            Err(_) => return Outcome::NotFound,
        };
        if available < amount {
            debug!(
                id,
                requested = amount,
                available,
                "purchase rejected: insufficient stock"
            );
            #[cfg(feature = "metrics")]
            self.metrics.record_purchase_rejected();
            return Outcome::InsufficientStock {
                requested: amount,
                available,
            };
        }

        let mut item = self.buckets[bucket].remove_at(pos, &self.policy);
        item.record_purchase(day, amount);
        trace!(id, day, amount, demand = item.demand(), "purchase applied");
        self.insert_home(item);

        #[cfg(feature = "metrics")]
        self.metrics.record_purchase_applied();
        Outcome::Applied
    }

    /// Applies one command through the matching operation.
    pub fn apply(&mut self, command: Command) -> Outcome {
        match command {
            Command::Add {
                day,
                id,
                name,
                stock,
                demand,
            } => {
                self.add_product(id, name, stock, day, demand);
                Outcome::Applied
            },
            Command::Restock { id, amount } => self.restock_product(id, amount),
            Command::Delete { id } => match self.delete_product(id) {
                Some(_) => Outcome::Applied,
                None => Outcome::NotFound,
            },
            Command::Purchase { day, id, amount } => self.purchase_product(id, day, amount),
        }
    }

    /// Applies commands in order, returning one outcome per command.
    pub fn apply_all<I>(&mut self, commands: I) -> Vec<Outcome>
    where
        I: IntoIterator<Item = Command>,
    {
        commands
            .into_iter()
            .map(|command| self.apply(command))
            .collect()
    }

    /// Verifies bucket capacity, heap order in every bucket, and that no id
    /// is stored twice.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.buckets.len() != self.selector.bucket_count() {
            return Err(InvariantError::new(format!(
                "{} buckets allocated, selector routes to {}",
                self.buckets.len(),
                self.selector.bucket_count()
            )));
        }

        let mut seen = FxHashSet::default();
        for (index, bucket) in self.buckets.iter().enumerate() {
            if bucket.capacity() != self.bucket_capacity {
                return Err(InvariantError::new(format!(
                    "bucket {} has capacity {}, expected {}",
                    index,
                    bucket.capacity(),
                    self.bucket_capacity
                )));
            }
            bucket
                .check_invariants(&self.policy)
                .map_err(|e| InvariantError::new(format!("bucket {}: {}", index, e)))?;
            for item in bucket {
                if !seen.insert(item.id()) {
                    return Err(InvariantError::new(format!(
                        "id {} stored more than once (seen again in bucket {})",
                        item.id(),
                        index
                    )));
                }
            }
        }
        Ok(())
    }

    fn extend_entries<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = StockEntry>,
    {
        for entry in entries {
            self.better_add_product(entry.id, entry.name, entry.stock, entry.day, entry.demand);
        }
    }

    /// Finds `(bucket, position)` for `id`, home bucket first.
    fn locate(&self, id: u64) -> Option<(usize, usize)> {
        let home = self.selector.home_bucket(id);
        self.selector
            .search_order(home)
            .find_map(|index| self.buckets[index].position_of(id).map(|pos| (index, pos)))
    }

    /// [`locate`](Self::locate) for mutating operations; counts misses.
    fn locate_mut_tracked(&mut self, id: u64) -> Option<(usize, usize)> {
        let found = self.locate(id);
        if found.is_none() {
            trace!(id, "id not stored");
            #[cfg(feature = "metrics")]
            self.metrics.record_lookup_miss();
        }
        found
    }

    /// Removes an existing record with `id` so re-adding it keeps ids
    /// unique.
    fn take_existing(&mut self, id: u64) -> Option<Item> {
        let (bucket, pos) = self.locate(id)?;
        let previous = self.buckets[bucket].remove_at(pos, &self.policy);
        debug!(id, bucket, "replacing existing record");
        #[cfg(feature = "metrics")]
        self.metrics.record_replacement();
        Some(previous)
    }

    /// Primary insertion: evict-if-full, append, swim, all in the home
    /// bucket.
    fn insert_home(&mut self, item: Item) -> Insertion {
        let home = self.selector.home_bucket(item.id());
        let evicted = self.evict_if_needed(home);
        #[cfg(feature = "metrics")]
        self.metrics.record_home_insert();
        self.place(home, item);
        Insertion {
            bucket: home,
            evicted,
            replaced: None,
        }
    }

    /// Removes the least popular item of a full bucket.
    ///
    /// Scans every position for the minimum (first occurrence on ties),
    /// swaps it with the last position, drops it and repairs the heap.
    fn evict_if_needed(&mut self, index: usize) -> Option<Item> {
        let policy = &self.policy;
        let bucket = &mut self.buckets[index];
        if !bucket.is_full() {
            return None;
        }
        let pos = bucket.min_position(policy)?;
        let victim = bucket.remove_at(pos, policy);
        debug!(
            bucket = index,
            id = victim.id(),
            popularity = ?policy.popularity(&victim),
            "evicted least popular item"
        );
        #[cfg(feature = "metrics")]
        self.metrics.record_eviction();
        Some(victim)
    }

    /// Appends to a bucket known to have room and swims the item into place.
    fn place(&mut self, index: usize, item: Item) {
        if let Err(err) = self.buckets[index].insert(item, &self.policy) {
            // Callers evict or probe for room first.
            unreachable!("bucket {index}: {err}");
        }
    }
}

impl<P: PopularityPolicy> Extend<StockEntry> for Warehouse<P> {
    /// Applies [`better_add_product`](Warehouse::better_add_product) to
    /// each entry in order.
    fn extend<I: IntoIterator<Item = StockEntry>>(&mut self, entries: I) {
        self.extend_entries(entries);
    }
}

impl FromIterator<StockEntry> for Warehouse<DemandRecency> {
    fn from_iter<I: IntoIterator<Item = StockEntry>>(entries: I) -> Self {
        Self::from_entries(DemandRecency, entries)
    }
}

impl<P> fmt::Display for Warehouse<P> {
    /// One tab-indented line per bucket, items in heap-array order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[")?;
        for bucket in &self.buckets {
            writeln!(f, "\t{bucket}")?;
        }
        write!(f, "]")
    }
}

#[cfg(feature = "metrics")]
impl<P: PopularityPolicy> Warehouse<P> {
    pub fn metrics_snapshot(&self) -> WarehouseMetricsSnapshot {
        WarehouseMetricsSnapshot {
            insert_calls: self.metrics.insert_calls,
            home_inserts: self.metrics.home_inserts,
            sibling_inserts: self.metrics.sibling_inserts,
            evictions: self.metrics.evictions,
            replacements: self.metrics.replacements,
            restock_calls: self.metrics.restock_calls,
            delete_calls: self.metrics.delete_calls,
            purchase_calls: self.metrics.purchase_calls,
            purchase_applied: self.metrics.purchase_applied,
            purchase_rejected: self.metrics.purchase_rejected,
            lookup_misses: self.metrics.lookup_misses,
            clears: self.metrics.clears,
            len: self.len(),
            capacity: self.capacity(),
            bucket_lens: self.buckets.iter().map(Bucket::len).collect(),
        }
    }
}

#[cfg(feature = "metrics")]
impl<P: PopularityPolicy> MetricsSnapshotProvider<WarehouseMetricsSnapshot> for Warehouse<P> {
    fn snapshot(&self) -> WarehouseMetricsSnapshot {
        self.metrics_snapshot()
    }
}

// ==============================================
// WAREHOUSE TESTS
// ==============================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::WarehouseBuilder;
    use crate::policy::DemandOnly;

    fn ids_in(warehouse: &Warehouse<impl PopularityPolicy>, bucket: usize) -> Vec<u64> {
        let mut ids: Vec<u64> = warehouse.bucket(bucket).unwrap().iter().map(Item::id).collect();
        ids.sort_unstable();
        ids
    }

    fn fill_bucket_zero(warehouse: &mut Warehouse<DemandOnly>) {
        for (id, demand) in [(0, 5), (10, 1), (20, 4), (30, 2), (40, 3)] {
            warehouse.add_product(id, format!("p{id}"), 10, 0, demand);
        }
    }

    #[test]
    fn add_routes_to_home_bucket() {
        let mut warehouse = Warehouse::new();
        let insertion = warehouse.add_product(37, "clamp", 4, 2, 1);
        assert_eq!(insertion.bucket, 7);
        assert_eq!(warehouse.bucket_of(37), Some(7));
        assert_eq!(warehouse.len(), 1);
        warehouse.check_invariants().unwrap();
    }

    #[test]
    fn add_evicts_least_popular_when_full() {
        let mut warehouse = Warehouse::with_policy(DemandOnly);
        fill_bucket_zero(&mut warehouse);
        assert_eq!(warehouse.bucket(0).unwrap().len(), 5);

        let insertion = warehouse.add_product(50, "p50", 10, 0, 9);
        assert_eq!(insertion.evicted.as_ref().map(Item::id), Some(10));
        assert_eq!(ids_in(&warehouse, 0), vec![0, 20, 30, 40, 50]);
        warehouse.check_invariants().unwrap();
    }

    #[test]
    fn add_evicts_before_placing_newcomer() {
        // Eviction happens before the newcomer is compared with anything.
        let mut warehouse = Warehouse::with_policy(DemandOnly);
        fill_bucket_zero(&mut warehouse);
        let insertion = warehouse.add_product(60, "p60", 10, 0, 0);
        assert_eq!(insertion.evicted.unwrap().id(), 10);
        assert_eq!(warehouse.bucket(0).unwrap().get(1).unwrap().id(), 60);
    }

    #[test]
    fn add_replaces_existing_id() {
        let mut warehouse = Warehouse::with_policy(DemandOnly);
        warehouse.add_product(4, "old", 1, 0, 1);
        let insertion = warehouse.add_product(4, "new", 2, 0, 2);
        assert_eq!(insertion.replaced.unwrap().name(), "old");
        assert_eq!(warehouse.len(), 1);
        assert_eq!(warehouse.get(4).unwrap().name(), "new");
        warehouse.check_invariants().unwrap();
    }

    #[test]
    fn restock_updates_stock_in_place() {
        let mut warehouse = Warehouse::with_policy(DemandOnly);
        fill_bucket_zero(&mut warehouse);
        let before: Vec<u64> = warehouse.bucket(0).unwrap().iter().map(Item::id).collect();

        assert_eq!(warehouse.restock_product(20, 7), Outcome::Applied);
        assert_eq!(warehouse.get(20).unwrap().stock(), 17);

        let after: Vec<u64> = warehouse.bucket(0).unwrap().iter().map(Item::id).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn restock_missing_id_is_noop() {
        let mut warehouse = Warehouse::new();
        warehouse.add_product(1, "a", 1, 0, 0);
        assert_eq!(warehouse.restock_product(11, 5), Outcome::NotFound);
        assert_eq!(warehouse.get(1).unwrap().stock(), 1);
    }

    #[test]
    fn delete_removes_and_keeps_heap() {
        let mut warehouse = Warehouse::with_policy(DemandOnly);
        fill_bucket_zero(&mut warehouse);

        let removed = warehouse.delete_product(30).unwrap();
        assert_eq!(removed.id(), 30);
        assert!(!warehouse.contains(30));
        assert_eq!(warehouse.len(), 4);
        warehouse.check_invariants().unwrap();

        assert_eq!(warehouse.delete_product(30), None);
    }

    #[test]
    fn delete_every_position_keeps_heap() {
        for victim in [0u64, 10, 20, 30, 40] {
            let mut warehouse = Warehouse::with_policy(DemandOnly);
            fill_bucket_zero(&mut warehouse);
            warehouse.delete_product(victim).unwrap();
            warehouse.check_invariants().unwrap();
            assert_eq!(warehouse.len(), 4);
        }
    }

    #[test]
    fn purchase_moves_stock_into_demand() {
        let mut warehouse = Warehouse::new();
        warehouse.add_product(3, "saw", 10, 1, 2);

        assert_eq!(warehouse.purchase_product(3, 6, 4), Outcome::Applied);
        let item = warehouse.get(3).unwrap();
        assert_eq!(item.stock(), 6);
        assert_eq!(item.demand(), 6);
        assert_eq!(item.last_purchase_day(), 6);
        assert_eq!(item.updated_day(), 6);
        assert_eq!(warehouse.bucket_of(3), Some(3));
    }

    #[test]
    fn purchase_exact_stock_is_allowed() {
        let mut warehouse = Warehouse::new();
        warehouse.add_product(3, "saw", 4, 1, 0);
        assert_eq!(warehouse.purchase_product(3, 2, 4), Outcome::Applied);
        assert_eq!(warehouse.get(3).unwrap().stock(), 0);
    }

    #[test]
    fn purchase_insufficient_stock_changes_nothing() {
        let mut warehouse = Warehouse::with_policy(DemandOnly);
        fill_bucket_zero(&mut warehouse);
        let before = warehouse.clone();

        assert_eq!(
            warehouse.purchase_product(20, 9, 11),
            Outcome::InsufficientStock {
                requested: 11,
                available: 10
            }
        );
        assert_eq!(warehouse.to_string(), before.to_string());
    }

    #[test]
    fn purchase_missing_id_is_noop() {
        let mut warehouse = Warehouse::new();
        assert_eq!(warehouse.purchase_product(5, 1, 1), Outcome::NotFound);
        assert!(warehouse.is_empty());
    }

    #[test]
    fn purchase_reorders_by_new_popularity() {
        let mut warehouse = Warehouse::with_policy(DemandOnly);
        fill_bucket_zero(&mut warehouse);
        assert_eq!(warehouse.bucket(0).unwrap().get(1).unwrap().id(), 10);

        // Demand 1 -> 9 pushes id 10 away from the root.
        warehouse.purchase_product(10, 1, 8);
        assert_eq!(warehouse.bucket(0).unwrap().get(1).unwrap().id(), 30);
        warehouse.check_invariants().unwrap();
    }

    #[test]
    fn purchase_of_spilled_item_returns_it_home() {
        let mut warehouse = Warehouse::with_policy(DemandOnly);
        fill_bucket_zero(&mut warehouse);
        warehouse.better_add_product(50, "p50", 10, 0, 7);
        assert_eq!(warehouse.bucket_of(50), Some(1));

        // Re-insert goes through the primary policy: bucket 0 is full, so
        // its least popular item (id 10) is evicted.
        assert_eq!(warehouse.purchase_product(50, 2, 1), Outcome::Applied);
        assert_eq!(warehouse.bucket_of(50), Some(0));
        assert!(!warehouse.contains(10));
        assert_eq!(warehouse.len(), 5);
        warehouse.check_invariants().unwrap();
    }

    #[test]
    fn better_add_uses_home_when_room() {
        let mut warehouse = Warehouse::new();
        let insertion = warehouse.better_add_product(14, "x", 1, 0, 0);
        assert_eq!(insertion.bucket, 4);
        assert!(insertion.evicted.is_none());
    }

    #[test]
    fn better_add_skips_full_siblings() {
        let mut warehouse = Warehouse::with_policy(DemandOnly);
        for bucket in [8u64, 9] {
            for n in 0..5 {
                warehouse.add_product(bucket + 10 * n, "f", 1, 0, n);
            }
        }
        let insertion = warehouse.better_add_product(58, "late", 1, 0, 0);
        assert_eq!(insertion.bucket, 0);
        assert!(insertion.evicted.is_none());
        assert_eq!(warehouse.get(58).unwrap().name(), "late");
    }

    #[test]
    fn better_add_evicts_only_when_everything_full() {
        let mut warehouse = Warehouse::with_policy(DemandOnly);
        for id in 0..50u64 {
            let insertion = warehouse.better_add_product(id, "f", 1, 0, id);
            assert!(insertion.evicted.is_none());
        }
        assert_eq!(warehouse.len(), 50);

        let insertion = warehouse.better_add_product(53, "last", 1, 0, 100);
        assert_eq!(insertion.bucket, 3);
        assert_eq!(insertion.evicted.unwrap().id(), 3);
        assert_eq!(warehouse.len(), 50);
        warehouse.check_invariants().unwrap();
    }

    #[test]
    fn spilled_items_are_reachable() {
        let mut warehouse = Warehouse::with_policy(DemandOnly);
        fill_bucket_zero(&mut warehouse);
        warehouse.better_add_product(50, "p50", 3, 0, 7);

        assert_eq!(warehouse.restock_product(50, 2), Outcome::Applied);
        assert_eq!(warehouse.get(50).unwrap().stock(), 5);
        assert_eq!(warehouse.delete_product(50).map(|it| it.id()), Some(50));
        assert!(warehouse.bucket(1).unwrap().is_empty());
    }

    #[test]
    fn apply_routes_commands() {
        let mut warehouse = Warehouse::new();
        let outcomes = warehouse.apply_all(vec![
            Command::Add {
                day: 1,
                id: 5,
                name: "rope".into(),
                stock: 3,
                demand: 0,
            },
            Command::Restock { id: 5, amount: 2 },
            Command::Purchase {
                day: 2,
                id: 5,
                amount: 9,
            },
            Command::Purchase {
                day: 2,
                id: 5,
                amount: 5,
            },
            Command::Delete { id: 5 },
            Command::Delete { id: 5 },
        ]);
        assert_eq!(
            outcomes,
            vec![
                Outcome::Applied,
                Outcome::Applied,
                Outcome::InsufficientStock {
                    requested: 9,
                    available: 5
                },
                Outcome::Applied,
                Outcome::Applied,
                Outcome::NotFound,
            ]
        );
        assert!(warehouse.is_empty());
    }

    #[test]
    fn from_iterator_applies_better_add() {
        let warehouse: Warehouse = (0..7)
            .map(|n| StockEntry::new(n as u32, n * 10, "crate", 1, n))
            .collect();
        assert_eq!(warehouse.len(), 7);
        assert_eq!(warehouse.bucket(0).unwrap().len(), 5);
        assert_eq!(warehouse.bucket(1).unwrap().len(), 2);
        warehouse.check_invariants().unwrap();
    }

    #[test]
    fn extend_appends_entries() {
        let mut warehouse = Warehouse::with_policy(DemandOnly);
        warehouse.extend([StockEntry::new(0, 1, "a", 1, 1), StockEntry::new(0, 2, "b", 1, 1)]);
        assert!(warehouse.contains(1));
        assert!(warehouse.contains(2));
    }

    #[test]
    fn display_lists_every_bucket() {
        let mut warehouse = WarehouseBuilder::new().buckets(3).build(DemandOnly);
        warehouse.add_product(1, "a", 2, 0, 1);
        assert_eq!(
            warehouse.to_string(),
            "[\n\t[]\n\t[(1: a, stock 2, demand 1, last purchase day 0)]\n\t[]\n]"
        );
    }

    #[test]
    fn clear_empties_all_buckets() {
        let mut warehouse = Warehouse::new();
        for id in 0..20 {
            warehouse.add_product(id, "x", 1, 0, 0);
        }
        warehouse.clear();
        assert!(warehouse.is_empty());
        assert_eq!(warehouse.iter().count(), 0);
    }

    #[test]
    fn check_invariants_detects_duplicates() {
        let mut warehouse = Warehouse::with_policy(DemandOnly);
        warehouse.add_product(1, "a", 1, 0, 1);
        warehouse.buckets[2]
            .insert(Item::new(1, "dup", 1, 0, 1), &DemandOnly)
            .unwrap();
        let err = warehouse.check_invariants().unwrap_err();
        assert!(err.message().contains("id 1 stored more than once"));
    }

    #[cfg(feature = "metrics")]
    #[test]
    fn metrics_count_operations() {
        let mut warehouse = Warehouse::with_policy(DemandOnly);
        fill_bucket_zero(&mut warehouse);
        warehouse.better_add_product(50, "s", 1, 0, 0);
        warehouse.add_product(60, "e", 1, 0, 9);
        warehouse.purchase_product(20, 1, 99);
        warehouse.restock_product(77, 1);

        let snapshot = warehouse.metrics_snapshot();
        assert_eq!(snapshot.insert_calls, 7);
        assert_eq!(snapshot.sibling_inserts, 1);
        assert_eq!(snapshot.evictions, 1);
        assert_eq!(snapshot.purchase_rejected, 1);
        assert_eq!(snapshot.lookup_misses, 1);
        assert_eq!(snapshot.len, 6);
        assert_eq!(snapshot.bucket_lens[0], 5);
        assert_eq!(snapshot.bucket_lens[1], 1);
    }
}
