//! Lists the objects under a prefix of an S3 bucket together with their public URLs

#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    dead_code
)]

/// Paginated bucket listing
pub mod bucket;

/// Object listing API abstraction over S3
pub mod listing;

/// Configuration and error types
pub mod types;

pub use bucket::{list_objects, BucketLister};
pub use common_types::{public_object_url, ObjectRecord};
pub use types::{ListerConfig, ListerError, ListerResult, LogFormat, DEFAULT_REGION};
