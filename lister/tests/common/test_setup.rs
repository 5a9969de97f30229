use std::sync::Arc;

use lister::listing::mock::MockObjectListingApi;
use lister::{BucketLister, ObjectRecord};

pub const TEST_REGION: &str = "eu-west-1";

/// Setup tracing for tests
pub fn setup_test_env() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init()
        .ok();
}

/// Lister wired to an in-memory listing service
pub struct TestContext {
    pub lister: BucketLister,
    pub api: Arc<MockObjectListingApi>,
}

impl TestContext {
    pub fn new(api: MockObjectListingApi) -> Self {
        setup_test_env();

        let api = Arc::new(api);
        let lister = BucketLister::new(api.clone(), TEST_REGION);

        Self { lister, api }
    }

    /// Context over a bucket holding `keys`, served `page_size` keys at a time
    pub fn with_objects(keys: &[&str], page_size: usize) -> Self {
        Self::new(MockObjectListingApi::with_objects(
            keys.iter().copied(),
            page_size,
        ))
    }
}

pub fn keys_of(objects: &[ObjectRecord]) -> Vec<&str> {
    objects.iter().map(|object| object.key.as_str()).collect()
}
