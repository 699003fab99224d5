//! # Popularity Scoring Capability
//!
//! Buckets are min-heaps ordered by an item's *popularity*. The formula is
//! not part of the warehouse: it is injected as a [`PopularityPolicy`] and
//! threaded through every heap primitive that compares two items.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────┐
//!   │                      Warehouse<P>                                │
//!   │                                                                  │
//!   │   policy: P ──────────────┐                                      │
//!   │                           │ &P                                   │
//!   │   buckets: [Bucket; N]    ▼                                      │
//!   │     ├── sink(i, &P)      P::popularity(&Item) -> P::Score        │
//!   │     ├── swim(i, &P)                                              │
//!   │     ├── min_position(&P)                                         │
//!   │     └── check_invariants(&P)                                     │
//!   └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Implementations
//!
//! | Implementor                                     | Score                         |
//! |-------------------------------------------------|-------------------------------|
//! | [`DemandRecency`](crate::policy::DemandRecency) | `demand + last_purchase_day`  |
//! | [`DemandOnly`](crate::policy::DemandOnly)       | `demand`                      |
//! | [`WeightedRecency`](crate::policy::WeightedRecency) | weighted sum              |
//! | any `Fn(&Item) -> S` where `S: Ord + Copy`      | whatever the closure returns  |
//!
//! ## Contract
//!
//! - Scores must be a pure function of the item's fields. The warehouse
//!   assumes a stored item's score only changes when the warehouse itself
//!   mutates the item.
//! - Lower scores are evicted first.
//!
//! ## Example
//!
//! ```
//! use stockkit::item::Item;
//! use stockkit::store::Warehouse;
//!
//! // Rank purely by remaining stock: items with little stock left go first.
//! let mut warehouse = Warehouse::with_policy(|item: &Item| item.stock());
//! warehouse.add_product(1, "a", 3, 0, 0);
//! warehouse.add_product(11, "b", 1, 0, 0);
//! assert_eq!(warehouse.bucket(1).unwrap().get(1).unwrap().id(), 11);
//! ```

use std::fmt::Debug;

use crate::item::Item;

/// Derives the heap ordering key for an [`Item`].
pub trait PopularityPolicy {
    /// Comparable score; smaller means less popular.
    type Score: Ord + Copy + Debug;

    /// Scores `item`.
    fn popularity(&self, item: &Item) -> Self::Score;
}

impl<F, S> PopularityPolicy for F
where
    F: Fn(&Item) -> S,
    S: Ord + Copy + Debug,
{
    type Score = S;

    #[inline]
    fn popularity(&self, item: &Item) -> S {
        self(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score_with<P: PopularityPolicy>(policy: &P, item: &Item) -> P::Score {
        policy.popularity(item)
    }

    #[test]
    fn closures_are_policies() {
        let by_stock = |item: &Item| item.stock();
        let item = Item::new(1, "x", 9, 0, 0);
        assert_eq!(score_with(&by_stock, &item), 9);
    }

    #[test]
    fn closure_scores_may_be_tuples() {
        let by_demand_then_id = |item: &Item| (item.demand(), item.id());
        let a = Item::new(1, "a", 0, 0, 5);
        let b = Item::new(2, "b", 0, 0, 5);
        assert!(score_with(&by_demand_then_id, &a) < score_with(&by_demand_then_id, &b));
    }
}
