//! Default popularity: demand plus the day of the last purchase.
//!
//! Both terms grow over the life of a product. A product nobody buys keeps
//! its old `last_purchase_day` while newer or recently bought products pull
//! ahead of it, so stale stock drifts toward the root of its bucket and is
//! evicted first.
//!
//! ```text
//!   item            demand  last_purchase_day  popularity
//!   ─────────────── ──────  ─────────────────  ──────────
//!   (10: bolts)        4           2                6      ← root, evicted first
//!   (20: nuts)         1           9               10
//!   (30: gears)        7           8               15
//! ```

use crate::item::Item;
use crate::traits::PopularityPolicy;

/// `demand + last_purchase_day`.
///
/// # Example
///
/// ```
/// use stockkit::item::Item;
/// use stockkit::policy::DemandRecency;
/// use stockkit::traits::PopularityPolicy;
///
/// let item = Item::new(1, "bolts", 10, 2, 4);
/// assert_eq!(DemandRecency.popularity(&item), 6);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DemandRecency;

impl PopularityPolicy for DemandRecency {
    type Score = u64;

    #[inline]
    fn popularity(&self, item: &Item) -> u64 {
        item.demand()
            .saturating_add(u64::from(item.last_purchase_day()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recent_purchase_outranks_equal_demand() {
        let stale = Item::new(1, "a", 1, 2, 5);
        let fresh = Item::new(2, "b", 1, 6, 5);
        assert!(DemandRecency.popularity(&stale) < DemandRecency.popularity(&fresh));
    }

    #[test]
    fn higher_demand_outranks_same_day() {
        let low = Item::new(1, "a", 1, 3, 1);
        let high = Item::new(2, "b", 1, 3, 2);
        assert!(DemandRecency.popularity(&low) < DemandRecency.popularity(&high));
    }

    #[test]
    fn score_saturates() {
        let item = Item::new(1, "a", 0, u32::MAX, u64::MAX);
        assert_eq!(DemandRecency.popularity(&item), u64::MAX);
    }
}
