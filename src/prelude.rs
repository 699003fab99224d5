pub use crate::builder::WarehouseBuilder;
pub use crate::command::{Command, parse_commands, parse_stock_list};
pub use crate::ds::{Bucket, BucketSelector};
pub use crate::error::{ConfigError, InvariantError, ParseError, ParseErrorKind};
pub use crate::item::{Item, StockEntry};
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::WarehouseMetricsSnapshot;
pub use crate::policy::{DemandOnly, DemandRecency, WeightedRecency};
pub use crate::store::{Insertion, Outcome, Warehouse};
pub use crate::traits::PopularityPolicy;
