use crate::item::Item;

/// Result of a restock, delete or purchase.
///
/// Missing ids and short stock are ordinary business conditions: the
/// operation leaves the warehouse untouched and says why. Callers that do
/// not care may ignore the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The operation mutated the warehouse.
    Applied,
    /// No item with the requested id is stored.
    NotFound,
    /// A purchase asked for more units than are in stock.
    InsufficientStock { requested: u64, available: u64 },
}

impl Outcome {
    /// Returns `true` if the warehouse was mutated.
    #[inline]
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied)
    }
}

/// Where an inserted item landed and what it displaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insertion {
    /// Bucket now holding the new item.
    pub bucket: usize,
    /// Least popular item removed to make room, if the bucket was full.
    pub evicted: Option<Item>,
    /// Previous record with the same id, removed before inserting.
    pub replaced: Option<Item>,
}

impl Insertion {
    /// Returns `true` if an unrelated item was evicted.
    #[inline]
    pub fn evicted_any(&self) -> bool {
        self.evicted.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_applied_is_applied() {
        assert!(Outcome::Applied.is_applied());
        assert!(!Outcome::NotFound.is_applied());
        assert!(
            !Outcome::InsufficientStock {
                requested: 3,
                available: 1
            }
            .is_applied()
        );
    }

    #[test]
    fn evicted_any_reflects_eviction() {
        let quiet = Insertion {
            bucket: 2,
            evicted: None,
            replaced: None,
        };
        assert!(!quiet.evicted_any());

        let loud = Insertion {
            evicted: Some(Item::new(12, "x", 0, 0, 0)),
            ..quiet
        };
        assert!(loud.evicted_any());
    }
}
