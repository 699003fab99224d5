pub mod bucket;
pub mod bucket_selector;

pub use bucket::Bucket;
pub use bucket_selector::BucketSelector;
