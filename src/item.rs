//! Item records stored in warehouse buckets.
//!
//! An [`Item`] is created on insertion, mutated in place by restock and
//! purchase, and destroyed by deletion or eviction. Items are moved between
//! buckets, never cloned by the warehouse.
//!
//! [`StockEntry`] is the `(day, id, name, stock, demand)` tuple accepted by
//! bulk construction.

use std::fmt;

/// A single product record.
///
/// `updated_day` is the day the record was created or last re-inserted by a
/// purchase. `last_purchase_day` feeds the popularity score of
/// [`DemandRecency`](crate::policy::DemandRecency).
///
/// # Example
///
/// ```
/// use stockkit::item::Item;
///
/// let item = Item::new(42, "lamp", 10, 3, 7);
/// assert_eq!(item.id(), 42);
/// assert_eq!(item.stock(), 10);
/// assert_eq!(item.last_purchase_day(), 3);
/// assert_eq!(item.demand(), 7);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    id: u64,
    name: String,
    stock: u64,
    updated_day: u32,
    demand: u64,
    last_purchase_day: u32,
}

impl Item {
    /// Creates a record stocked on `day`; both day fields start at `day`.
    pub fn new(id: u64, name: impl Into<String>, stock: u64, day: u32, demand: u64) -> Self {
        Self {
            id,
            name: name.into(),
            stock,
            updated_day: day,
            demand,
            last_purchase_day: day,
        }
    }

    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn stock(&self) -> u64 {
        self.stock
    }

    /// Day the record was created or last re-inserted.
    #[inline]
    pub fn updated_day(&self) -> u32 {
        self.updated_day
    }

    #[inline]
    pub fn demand(&self) -> u64 {
        self.demand
    }

    #[inline]
    pub fn last_purchase_day(&self) -> u32 {
        self.last_purchase_day
    }

    /// Increases stock by `amount`. Stock is not part of the ordering key.
    pub(crate) fn add_stock(&mut self, amount: u64) {
        self.stock = self.stock.saturating_add(amount);
    }

    /// Applies a purchase of `amount` units on `day`.
    ///
    /// Callers must check `amount <= stock` first.
    pub(crate) fn record_purchase(&mut self, day: u32, amount: u64) {
        debug_assert!(amount <= self.stock);
        self.stock -= amount;
        self.demand = self.demand.saturating_add(amount);
        self.last_purchase_day = day;
        self.updated_day = day;
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}: {}, stock {}, demand {}, last purchase day {})",
            self.id, self.name, self.stock, self.demand, self.last_purchase_day
        )
    }
}

/// One row of a bulk stock list: `(day, id, name, stock, demand)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockEntry {
    pub day: u32,
    pub id: u64,
    pub name: String,
    pub stock: u64,
    pub demand: u64,
}

impl StockEntry {
    pub fn new(day: u32, id: u64, name: impl Into<String>, stock: u64, demand: u64) -> Self {
        Self {
            day,
            id,
            name: name.into(),
            stock,
            demand,
        }
    }
}

impl From<StockEntry> for Item {
    fn from(entry: StockEntry) -> Self {
        Item::new(entry.id, entry.name, entry.stock, entry.day, entry.demand)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_item_sets_both_days() {
        let item = Item::new(7, "bolt", 4, 12, 1);
        assert_eq!(item.updated_day(), 12);
        assert_eq!(item.last_purchase_day(), 12);
        assert_eq!(item.name(), "bolt");
    }

    #[test]
    fn add_stock_saturates() {
        let mut item = Item::new(1, "nut", u64::MAX - 1, 0, 0);
        item.add_stock(10);
        assert_eq!(item.stock(), u64::MAX);
    }

    #[test]
    fn record_purchase_moves_stock_into_demand() {
        let mut item = Item::new(1, "nut", 10, 2, 3);
        item.record_purchase(9, 4);
        assert_eq!(item.stock(), 6);
        assert_eq!(item.demand(), 7);
        assert_eq!(item.last_purchase_day(), 9);
        assert_eq!(item.updated_day(), 9);
    }

    #[test]
    fn display_lists_fields() {
        let item = Item::new(30, "gear", 5, 1, 2);
        assert_eq!(
            item.to_string(),
            "(30: gear, stock 5, demand 2, last purchase day 1)"
        );
    }

    #[test]
    fn stock_entry_converts_into_item() {
        let entry = StockEntry::new(3, 14, "spring", 8, 6);
        let item: Item = entry.into();
        assert_eq!(item, Item::new(14, "spring", 8, 3, 6));
    }
}
