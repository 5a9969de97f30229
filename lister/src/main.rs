use std::env;

use anyhow::Context;
use lister::{BucketLister, ListerConfig, LogFormat};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout only carries the JSON result
    match LogFormat::from_env() {
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(EnvFilter::from_default_env())
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Pretty => {
            fmt()
                .with_env_filter(EnvFilter::from_default_env())
                .with_writer(std::io::stderr)
                .init();
        }
    }

    let bucket =
        env::var("S3_BUCKET_NAME").context("S3_BUCKET_NAME environment variable is not set")?;
    let prefix = env::var("S3_PREFIX").unwrap_or_default();

    let config = ListerConfig::from_env();
    let lister = BucketLister::from_config(&config).await?;
    let objects = lister.list_objects(&bucket, &prefix).await?;

    println!("{}", serde_json::to_string_pretty(&objects)?);

    Ok(())
}
