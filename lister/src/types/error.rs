//! Error types for listing operations

use aws_sdk_s3::{error::SdkError, operation::list_objects_v2::ListObjectsV2Error};
use thiserror::Error;

/// Boxed error carried by a failed service request
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Result type for listing operations
pub type ListerResult<T> = Result<T, ListerError>;

/// Errors that can occur while listing a bucket
#[derive(Error, Debug)]
pub enum ListerError {
    /// The storage service rejected or failed a request (network, auth, malformed request)
    #[error("S3 service request failed: {0}")]
    ServiceRequestFailure(#[source] BoxError),

    /// Invalid input provided by the caller
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<SdkError<ListObjectsV2Error>> for ListerError {
    fn from(error: SdkError<ListObjectsV2Error>) -> Self {
        Self::ServiceRequestFailure(Box::new(error))
    }
}
