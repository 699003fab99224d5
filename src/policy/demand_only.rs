use crate::item::Item;
use crate::traits::PopularityPolicy;

/// Ranks items by accumulated demand alone; recency is ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DemandOnly;

impl PopularityPolicy for DemandOnly {
    type Score = u64;

    #[inline]
    fn popularity(&self, item: &Item) -> u64 {
        item.demand()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ignores_purchase_day() {
        let old = Item::new(1, "a", 1, 0, 3);
        let new = Item::new(2, "b", 1, 100, 3);
        assert_eq!(DemandOnly.popularity(&old), DemandOnly.popularity(&new));
    }
}
