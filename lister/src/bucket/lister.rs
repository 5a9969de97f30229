//! Paginated bucket listing

use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;
use common_types::ObjectRecord;
use tracing::{debug, info, warn};

use crate::listing::ObjectListingApi;
use crate::types::{ListerConfig, ListerError, ListerResult, DEFAULT_REGION};

/// Lists the objects of a bucket and builds their public URLs
pub struct BucketLister {
    api: Arc<dyn ObjectListingApi>,
    region: String,
}

impl BucketLister {
    /// Creates a new bucket lister
    ///
    /// # Arguments
    ///
    /// * `api` - Listing service to page through
    /// * `region` - Region of the buckets, used to build object URLs
    #[must_use]
    pub fn new(api: Arc<dyn ObjectListingApi>, region: impl Into<String>) -> Self {
        Self {
            api,
            region: region.into(),
        }
    }

    /// Creates a lister backed by an S3 client built from `config`
    ///
    /// # Errors
    ///
    /// Returns `ListerError::ConfigError` if the credentials are incomplete
    pub async fn from_config(config: &ListerConfig) -> ListerResult<Self> {
        let s3_client = S3Client::from_conf(config.s3_client_config().await?);

        info!(
            "Initialized S3 client for region: {} (endpoint override: {})",
            config.region,
            config.endpoint_url.as_deref().unwrap_or("none")
        );

        Ok(Self::new(Arc::new(s3_client), config.region.clone()))
    }

    /// Region used to build object URLs
    #[must_use]
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Lists every object in `bucket` whose key starts with `prefix`
    ///
    /// Folder placeholder markers (keys ending in `/`) are skipped. Records keep
    /// the order in which the service returned them.
    ///
    /// # Arguments
    ///
    /// * `bucket` - Bucket name, must not be empty
    /// * `prefix` - Key prefix to filter on, empty for every object
    ///
    /// # Errors
    ///
    /// Returns `ListerError::InvalidInput` if `bucket` is empty
    /// Returns `ListerError::ServiceRequestFailure` if any page request fails,
    /// discarding the records gathered from earlier pages
    pub async fn list_objects(
        &self,
        bucket: &str,
        prefix: &str,
    ) -> ListerResult<Vec<ObjectRecord>> {
        if bucket.trim().is_empty() {
            return Err(ListerError::InvalidInput(
                "bucket name must not be empty".to_string(),
            ));
        }

        info!("Listing objects in bucket {} with prefix {}", bucket, prefix);

        let mut objects = Vec::new();
        let mut continuation_token: Option<String> = None;
        let mut pages = 0_usize;

        loop {
            let page = self
                .api
                .list_page(bucket, prefix, continuation_token.as_deref())
                .await?;
            pages += 1;

            debug!(
                "Fetched page {} of bucket {}: {} keys, truncated: {}",
                pages,
                bucket,
                page.keys.len(),
                page.is_truncated
            );

            objects.extend(
                page.keys
                    .into_iter()
                    .filter(|key| !is_folder_marker(key))
                    .map(|key| ObjectRecord::new(bucket, &self.region, key)),
            );

            match (page.is_truncated, page.next_continuation_token) {
                (true, Some(token)) => continuation_token = Some(token),
                (true, None) => {
                    warn!(
                        "Bucket {} reported more pages without a continuation token, stopping",
                        bucket
                    );
                    break;
                }
                (false, _) => break,
            }
        }

        info!(
            "Found {} objects in bucket {} with prefix {}",
            objects.len(),
            bucket,
            prefix
        );

        Ok(objects)
    }
}

/// Lists `bucket` under `prefix` with credentials and endpoint read from the environment
///
/// The bucket is assumed to live in `region`, or in [`DEFAULT_REGION`] when
/// none is given; `AWS_REGION` is ignored here.
///
/// # Errors
///
/// Returns `ListerError::ConfigError` if the credentials in the environment are incomplete
/// Returns `ListerError::InvalidInput` if `bucket` is empty
/// Returns `ListerError::ServiceRequestFailure` if the service fails
pub async fn list_objects(
    bucket: &str,
    prefix: &str,
    region: Option<&str>,
) -> ListerResult<Vec<ObjectRecord>> {
    let config = list_objects_config(region);

    BucketLister::from_config(&config)
        .await?
        .list_objects(bucket, prefix)
        .await
}

/// Environment configuration pinned to `region`, falling back to [`DEFAULT_REGION`]
fn list_objects_config(region: Option<&str>) -> ListerConfig {
    ListerConfig::from_env().with_region(region.unwrap_or(DEFAULT_REGION))
}

/// Keys ending in `/` are console-created folder placeholders, not content
fn is_folder_marker(key: &str) -> bool {
    key.ends_with('/')
}
