//! Weighted blend of demand and recency.

use crate::error::ConfigError;
use crate::item::Item;
use crate::traits::PopularityPolicy;

/// `demand * demand_weight + last_purchase_day * recency_weight`.
///
/// [`DemandRecency`](super::DemandRecency) is the `(1, 1)` case.
///
/// # Example
///
/// ```
/// use stockkit::item::Item;
/// use stockkit::policy::WeightedRecency;
/// use stockkit::traits::PopularityPolicy;
///
/// let policy = WeightedRecency::try_new(2, 1).unwrap();
/// let item = Item::new(1, "crate", 5, 10, 3);
/// assert_eq!(policy.popularity(&item), 2 * 3 + 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightedRecency {
    demand_weight: u64,
    recency_weight: u64,
}

impl WeightedRecency {
    /// Creates a policy, rejecting the degenerate all-zero weighting.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if both weights are zero, since every item
    /// would then score the same.
    pub fn try_new(demand_weight: u64, recency_weight: u64) -> Result<Self, ConfigError> {
        if demand_weight == 0 && recency_weight == 0 {
            return Err(ConfigError::new(
                "at least one of demand_weight and recency_weight must be non-zero",
            ));
        }
        Ok(Self {
            demand_weight,
            recency_weight,
        })
    }

    pub fn demand_weight(&self) -> u64 {
        self.demand_weight
    }

    pub fn recency_weight(&self) -> u64 {
        self.recency_weight
    }
}

impl PopularityPolicy for WeightedRecency {
    type Score = u64;

    #[inline]
    fn popularity(&self, item: &Item) -> u64 {
        item.demand()
            .saturating_mul(self.demand_weight)
            .saturating_add(u64::from(item.last_purchase_day()).saturating_mul(self.recency_weight))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::DemandRecency;

    #[test]
    fn rejects_all_zero_weights() {
        assert!(WeightedRecency::try_new(0, 0).is_err());
        assert!(WeightedRecency::try_new(0, 1).is_ok());
        assert!(WeightedRecency::try_new(1, 0).is_ok());
    }

    #[test]
    fn unit_weights_match_demand_recency() {
        let policy = WeightedRecency::try_new(1, 1).unwrap();
        for (day, demand) in [(0, 0), (3, 9), (17, 2)] {
            let item = Item::new(1, "x", 0, day, demand);
            assert_eq!(policy.popularity(&item), DemandRecency.popularity(&item));
        }
    }

    #[test]
    fn demand_heavy_weighting_reorders_items() {
        let policy = WeightedRecency::try_new(10, 1).unwrap();
        let busy_but_old = Item::new(1, "a", 0, 1, 5);
        let quiet_but_new = Item::new(2, "b", 0, 20, 1);
        assert!(policy.popularity(&quiet_but_new) < policy.popularity(&busy_but_old));
        assert!(DemandRecency.popularity(&busy_but_old) < DemandRecency.popularity(&quiet_but_new));
    }
}
