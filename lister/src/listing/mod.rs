//! Object listing API
//!
//! [`ObjectListingApi`] fetches a single page of a "list objects under prefix"
//! request. The pagination loop lives in [`crate::bucket::BucketLister`].

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;

use aws_sdk_s3::Client as S3Client;
use tracing::error;

use crate::types::ListerResult;

/// One page of a listing response
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListPage {
    /// Object keys in the order returned by the service
    pub keys: Vec<String>,
    /// Whether more pages follow this one
    pub is_truncated: bool,
    /// Marker to send with the request for the next page
    pub next_continuation_token: Option<String>,
}

impl ListPage {
    /// Final page holding `keys`
    #[must_use]
    pub fn last<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            is_truncated: false,
            next_continuation_token: None,
        }
    }

    /// Truncated page holding `keys`, continued by `next_continuation_token`
    #[must_use]
    pub fn truncated<I, S>(keys: I, next_continuation_token: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            is_truncated: true,
            next_continuation_token: Some(next_continuation_token.into()),
        }
    }
}

/// Trait for a paginated object listing service
#[async_trait::async_trait]
pub trait ObjectListingApi: Send + Sync {
    /// Fetches one page of the keys in `bucket` starting with `prefix`.
    ///
    /// `continuation_token` is `None` for the first page and the previous
    /// page's `next_continuation_token` afterwards.
    async fn list_page(
        &self,
        bucket: &str,
        prefix: &str,
        continuation_token: Option<&str>,
    ) -> ListerResult<ListPage>;
}

/// Lists through S3 `ListObjectsV2`
#[async_trait::async_trait]
impl ObjectListingApi for S3Client {
    async fn list_page(
        &self,
        bucket: &str,
        prefix: &str,
        continuation_token: Option<&str>,
    ) -> ListerResult<ListPage> {
        let output = self
            .list_objects_v2()
            .bucket(bucket)
            .prefix(prefix)
            .set_continuation_token(continuation_token.map(ToString::to_string))
            .send()
            .await
            .map_err(|e| {
                error!("Failed to list objects in bucket {}: {}", bucket, e);
                e
            })?;

        Ok(ListPage {
            keys: output
                .contents()
                .iter()
                .filter_map(|object| object.key().map(ToString::to_string))
                .collect(),
            is_truncated: output.is_truncated().unwrap_or(false),
            next_continuation_token: output.next_continuation_token().map(ToString::to_string),
        })
    }
}
