//! Error types for the stockkit library.
//!
//! ## Key Components
//!
//! - [`InvariantError`]: Returned when a bucket heap or the warehouse as a
//!   whole violates one of its structural invariants (`check_invariants`).
//! - [`ConfigError`]: Returned when warehouse configuration parameters are
//!   invalid (e.g. zero buckets, zero bucket capacity, all-zero weights).
//! - [`HeapIndexError`]: Returned when a 1-indexed heap position falls
//!   outside `[1, len]`.
//! - [`CapacityError`]: Returned when appending to a full bucket. Hands the
//!   rejected item back to the caller.
//! - [`ParseError`]: Returned when a command script or stock list cannot be
//!   parsed.
//!
//! Business conditions (unknown id, insufficient stock) are *not* errors;
//! they are reported through [`Outcome`](crate::store::Outcome).
//!
//! ## Example Usage
//!
//! ```
//! use stockkit::builder::WarehouseBuilder;
//! use stockkit::error::ConfigError;
//! use stockkit::policy::DemandRecency;
//!
//! let bad = WarehouseBuilder::new().buckets(0).try_build(DemandRecency);
//! let err: ConfigError = bad.unwrap_err();
//! assert!(err.to_string().contains("bucket count"));
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal warehouse invariants are violated.
///
/// Produced by [`Bucket::check_invariants`](crate::ds::Bucket::check_invariants)
/// and [`Warehouse::check_invariants`](crate::store::Warehouse::check_invariants).
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when warehouse configuration parameters are invalid.
///
/// Produced by [`WarehouseBuilder::try_build`](crate::builder::WarehouseBuilder::try_build)
/// and [`WeightedRecency::try_new`](crate::policy::WeightedRecency::try_new).
///
/// # Example
///
/// ```
/// use stockkit::policy::WeightedRecency;
///
/// let err = WeightedRecency::try_new(0, 0).unwrap_err();
/// assert!(err.to_string().contains("weight"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// HeapIndexError
// ---------------------------------------------------------------------------

/// Error returned when a heap position is outside `[1, len]`.
///
/// Heap positions are 1-indexed: position 1 is the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeapIndexError {
    index: usize,
    len: usize,
}

impl HeapIndexError {
    #[inline]
    pub(crate) fn new(index: usize, len: usize) -> Self {
        Self { index, len }
    }

    /// The rejected position.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// The bucket length at the time of the access.
    #[inline]
    pub fn bucket_len(&self) -> usize {
        self.len
    }
}

impl fmt::Display for HeapIndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.len == 0 {
            write!(f, "heap position {} out of range: bucket is empty", self.index)
        } else {
            write!(
                f,
                "heap position {} out of range 1..={}",
                self.index, self.len
            )
        }
    }
}

impl std::error::Error for HeapIndexError {}

// ---------------------------------------------------------------------------
// CapacityError
// ---------------------------------------------------------------------------

/// Error returned when appending to a bucket that is already full.
///
/// The rejected value is returned intact so the caller can evict and retry.
#[derive(Clone, PartialEq, Eq)]
pub struct CapacityError<T> {
    element: T,
    capacity: usize,
}

impl<T> CapacityError<T> {
    #[inline]
    pub(crate) fn new(element: T, capacity: usize) -> Self {
        Self { element, capacity }
    }

    /// Capacity of the bucket that rejected the value.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Recovers the rejected value.
    #[inline]
    pub fn into_inner(self) -> T {
        self.element
    }
}

impl<T> fmt::Debug for CapacityError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapacityError")
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

impl<T> fmt::Display for CapacityError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bucket is full (capacity {})", self.capacity)
    }
}

impl<T> std::error::Error for CapacityError<T> {}

// ---------------------------------------------------------------------------
// ParseError
// ---------------------------------------------------------------------------

/// What went wrong while parsing a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The input had no record-count header.
    MissingCount,
    /// The header promised more records than the input contains.
    MissingRecords { expected: usize, found: usize },
    /// A record line was empty.
    EmptyRecord,
    /// The leading tag is not one of `add`, `restock`, `delete`, `purchase`.
    UnknownCommand(String),
    /// A record had the wrong number of fields.
    FieldCount { expected: usize, found: usize },
    /// A numeric field could not be parsed.
    InvalidNumber { field: &'static str, value: String },
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorKind::MissingCount => f.write_str("missing record count"),
            ParseErrorKind::MissingRecords { expected, found } => {
                write!(f, "expected {expected} records, found {found}")
            },
            ParseErrorKind::EmptyRecord => f.write_str("empty record"),
            ParseErrorKind::UnknownCommand(tag) => write!(f, "unknown command `{tag}`"),
            ParseErrorKind::FieldCount { expected, found } => {
                write!(f, "expected {expected} fields, found {found}")
            },
            ParseErrorKind::InvalidNumber { field, value } => {
                write!(f, "invalid {field} `{value}`")
            },
        }
    }
}

/// Error returned when a command script or stock list cannot be parsed.
///
/// `line` is 1-based; a single-line parse via `FromStr` reports line 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    line: usize,
    kind: ParseErrorKind,
}

impl ParseError {
    #[inline]
    pub(crate) fn new(line: usize, kind: ParseErrorKind) -> Self {
        Self { line, kind }
    }

    #[inline]
    pub(crate) fn at_line(mut self, line: usize) -> Self {
        self.line = line;
        self
    }

    /// Line the error was found on.
    #[inline]
    pub fn line(&self) -> usize {
        self.line
    }

    /// The failure category.
    #[inline]
    pub fn kind(&self) -> &ParseErrorKind {
        &self.kind
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.kind)
    }
}

impl std::error::Error for ParseError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
