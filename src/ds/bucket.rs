//! Fixed-capacity, array-backed binary min-heap of items.
//!
//! A [`Bucket`] holds at most `capacity` [`Item`]s ordered by popularity,
//! least popular at the root. Positions are **1-indexed**, matching the
//! classic array heap arithmetic:
//!
//! ```text
//!   position:    1     2     3     4     5
//!              ┌─────┬─────┬─────┬─────┬─────┐
//!   items:     │  3  │  6  │  4  │  9  │  7  │   (popularity shown)
//!              └─────┴─────┴─────┴─────┴─────┘
//!
//!                         (1) 3
//!                        /     \
//!                    (2) 6     (3) 4
//!                    /   \
//!                (4) 9   (5) 7
//!
//!   parent(i) = i / 2        children(i) = 2i, 2i + 1
//!   invariant: popularity(parent(i)) <= popularity(i) for every i > 1
//! ```
//!
//! ## Primitives
//!
//! The bucket exposes the raw heap primitives; the
//! [`Warehouse`](crate::store::Warehouse) sequences them. `append` does
//! *not* restore heap order on its own: callers follow it with `swim`.
//!
//! | Method          | Description                                        | Complexity |
//! |-----------------|----------------------------------------------------|------------|
//! | `get(i)`        | Item at position `i`                               | O(1)       |
//! | `append(item)`  | Place at `len + 1`; fails when full                | O(1)       |
//! | `swap(i, j)`    | Exchange two positions                             | O(1)       |
//! | `remove_last()` | Drop the last position                             | O(1)       |
//! | `sink(i, p)`    | Restore order downward from `i`                    | O(log n)   |
//! | `swim(i, p)`    | Restore order upward from `i`                      | O(log n)   |
//! | `insert(item,p)`| `append` + `swim`                                  | O(log n)   |
//! | `remove_at(i,p)`| Swap with last, drop it, repair both directions    | O(log n)   |
//! | `position_of`   | Linear scan by id                                  | O(n)       |
//! | `min_position`  | Linear scan for the least popular position         | O(n)       |
//!
//! Heap positions outside `[1, len]` are contract violations: [`get`] reports
//! them as [`HeapIndexError`], the mutating primitives panic.
//!
//! [`get`]: Bucket::get
//!
//! ## Example
//!
//! ```
//! use stockkit::ds::Bucket;
//! use stockkit::item::Item;
//! use stockkit::policy::DemandOnly;
//!
//! let mut bucket = Bucket::new(5);
//! for (id, demand) in [(0, 6), (10, 3), (20, 9)] {
//!     bucket.insert(Item::new(id, "widget", 1, 0, demand), &DemandOnly).unwrap();
//! }
//! assert_eq!(bucket.get(1).unwrap().id(), 10);
//! assert!(bucket.get(4).is_err());
//! ```

use std::fmt;

use crate::error::{CapacityError, HeapIndexError, InvariantError};
use crate::item::Item;
use crate::traits::PopularityPolicy;

/// Bounded min-heap of [`Item`]s keyed by a [`PopularityPolicy`].
///
/// The policy is not stored: every comparing primitive borrows it, so the
/// owning warehouse stays the single source of the scoring formula.
#[derive(Debug, Clone)]
pub struct Bucket {
    items: Vec<Item>,
    capacity: usize,
}

impl Bucket {
    /// Creates an empty bucket holding at most `capacity` items.
    pub fn new(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Maximum number of items.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Current number of items (`size` in heap terms).
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns `true` when no further item can be appended.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    /// Returns the item at 1-indexed heap position `pos`.
    ///
    /// # Errors
    ///
    /// Returns [`HeapIndexError`] if `pos` is outside `[1, len]`.
    pub fn get(&self, pos: usize) -> Result<&Item, HeapIndexError> {
        let slot = self.slot(pos)?;
        Ok(&self.items[slot])
    }

    /// Mutable access to the item at `pos`.
    ///
    /// Mutations must leave the item's popularity unchanged or be followed
    /// by a repair of its position.
    pub(crate) fn get_mut(&mut self, pos: usize) -> Result<&mut Item, HeapIndexError> {
        let slot = self.slot(pos)?;
        Ok(&mut self.items[slot])
    }

    /// Places `item` at position `len + 1` without restoring heap order.
    ///
    /// # Errors
    ///
    /// Returns [`CapacityError`] carrying `item` back if the bucket is full.
    pub fn append(&mut self, item: Item) -> Result<(), CapacityError<Item>> {
        if self.is_full() {
            return Err(CapacityError::new(item, self.capacity));
        }
        self.items.push(item);
        Ok(())
    }

    /// Exchanges the items at positions `i` and `j`.
    ///
    /// # Panics
    ///
    /// Panics if either position is outside `[1, len]`.
    pub fn swap(&mut self, i: usize, j: usize) {
        let a = self.expect_slot(i);
        let b = self.expect_slot(j);
        self.items.swap(a, b);
    }

    /// Removes and returns the item at the last position.
    pub fn remove_last(&mut self) -> Option<Item> {
        self.items.pop()
    }

    /// Moves the item at `pos` down until neither child is less popular.
    ///
    /// The less popular child is chosen, the left one on ties. A position
    /// past the end is accepted and left alone, which covers repairing the
    /// slot vacated by removing the last item. Returns the final position.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is 0.
    pub fn sink<P: PopularityPolicy>(&mut self, pos: usize, policy: &P) -> usize {
        assert!(pos >= 1, "heap positions start at 1");
        let len = self.items.len();
        let mut k = pos;
        while 2 * k <= len {
            let mut child = 2 * k;
            if child < len && self.score(child + 1, policy) < self.score(child, policy) {
                child += 1;
            }
            if self.score(child, policy) >= self.score(k, policy) {
                break;
            }
            self.items.swap(k - 1, child - 1);
            k = child;
        }
        k
    }

    /// Moves the item at `pos` up while its parent is more popular.
    ///
    /// A position past the end is left alone. Returns the final position.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is 0.
    pub fn swim<P: PopularityPolicy>(&mut self, pos: usize, policy: &P) -> usize {
        assert!(pos >= 1, "heap positions start at 1");
        if pos > self.items.len() {
            return pos;
        }
        let mut k = pos;
        while k > 1 && self.score(k / 2, policy) > self.score(k, policy) {
            self.items.swap(k / 2 - 1, k - 1);
            k /= 2;
        }
        k
    }

    /// Appends `item` and swims it into place. Returns its final position.
    ///
    /// # Errors
    ///
    /// Returns [`CapacityError`] carrying `item` back if the bucket is full.
    pub fn insert<P: PopularityPolicy>(
        &mut self,
        item: Item,
        policy: &P,
    ) -> Result<usize, CapacityError<Item>> {
        self.append(item)?;
        let last = self.items.len();
        Ok(self.swim(last, policy))
    }

    /// Removes the item at `pos`, keeping the heap valid.
    ///
    /// The last item moves into the vacated position and is sunk, then
    /// swum if it did not move down: it may be out of order in either
    /// direction relative to its new neighbours.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is outside `[1, len]`.
    pub fn remove_at<P: PopularityPolicy>(&mut self, pos: usize, policy: &P) -> Item {
        let slot = self.expect_slot(pos);
        let removed = self.items.swap_remove(slot);
        if pos <= self.items.len() && self.sink(pos, policy) == pos {
            self.swim(pos, policy);
        }
        removed
    }

    /// Position of the item with the given id, by linear scan.
    pub fn position_of(&self, id: u64) -> Option<usize> {
        self.items
            .iter()
            .position(|item| item.id() == id)
            .map(|slot| slot + 1)
    }

    /// Position of the least popular item, by linear scan.
    ///
    /// Ties go to the first position in scan order. In a valid heap this is
    /// always the root.
    pub fn min_position<P: PopularityPolicy>(&self, policy: &P) -> Option<usize> {
        let mut best: Option<(usize, P::Score)> = None;
        for (slot, item) in self.items.iter().enumerate() {
            let score = policy.popularity(item);
            match best {
                Some((_, best_score)) if best_score <= score => {},
                _ => best = Some((slot + 1, score)),
            }
        }
        best.map(|(pos, _)| pos)
    }

    /// Items in heap-array order (position 1 first).
    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    /// Items in heap-array order as a slice; index `0` is position 1.
    pub fn as_slice(&self) -> &[Item] {
        &self.items
    }

    /// Removes every item.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Verifies the capacity bound and heap order.
    pub fn check_invariants<P: PopularityPolicy>(&self, policy: &P) -> Result<(), InvariantError> {
        if self.items.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "bucket holds {} items, capacity is {}",
                self.items.len(),
                self.capacity
            )));
        }
        for pos in 2..=self.items.len() {
            let parent = self.score(pos / 2, policy);
            let child = self.score(pos, policy);
            if parent > child {
                return Err(InvariantError::new(format!(
                    "heap order violated: position {} ({:?}) is above position {} ({:?})",
                    pos / 2,
                    parent,
                    pos,
                    child
                )));
            }
        }
        Ok(())
    }

    #[inline]
    fn score<P: PopularityPolicy>(&self, pos: usize, policy: &P) -> P::Score {
        policy.popularity(&self.items[pos - 1])
    }

    #[inline]
    fn slot(&self, pos: usize) -> Result<usize, HeapIndexError> {
        if pos == 0 || pos > self.items.len() {
            Err(HeapIndexError::new(pos, self.items.len()))
        } else {
            Ok(pos - 1)
        }
    }

    #[inline]
    #[track_caller]
    fn expect_slot(&self, pos: usize) -> usize {
        match self.slot(pos) {
            Ok(slot) => slot,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<'a> IntoIterator for &'a Bucket {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (slot, item) in self.items.iter().enumerate() {
            if slot > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{item}")?;
        }
        f.write_str("]")
    }
}
