//! Listing configuration
//!
//! Everything the lister needs from the process environment is read once into
//! [`ListerConfig`], which is then passed explicitly to the lister.

use std::env;
use std::fmt;

use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_sdk_s3::config::Credentials;

use super::{ListerError, ListerResult};

/// Region used when none is configured
pub const DEFAULT_REGION: &str = "eu-west-1";

const CREDENTIALS_PROVIDER_NAME: &str = "bucket-lister";

/// Connection settings for the object storage service
#[derive(Clone, PartialEq, Eq)]
pub struct ListerConfig {
    /// AWS region of the bucket, also used to build object URLs
    pub region: String,
    /// Explicit access key id
    pub access_key_id: Option<String>,
    /// Explicit secret access key
    pub secret_access_key: Option<String>,
    /// Session token for temporary credentials
    pub session_token: Option<String>,
    /// Endpoint override for S3-compatible services (e.g. `LocalStack`)
    pub endpoint_url: Option<String>,
}

impl Default for ListerConfig {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            access_key_id: None,
            secret_access_key: None,
            session_token: None,
            endpoint_url: None,
        }
    }
}

impl fmt::Debug for ListerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListerConfig")
            .field("region", &self.region)
            .field("access_key_id", &self.access_key_id)
            .field(
                "secret_access_key",
                &self.secret_access_key.as_ref().map(|_| "<redacted>"),
            )
            .field(
                "session_token",
                &self.session_token.as_ref().map(|_| "<redacted>"),
            )
            .field("endpoint_url", &self.endpoint_url)
            .finish()
    }
}

impl ListerConfig {
    /// Reads the configuration from `AWS_REGION`, `AWS_ACCESS_KEY_ID`,
    /// `AWS_SECRET_ACCESS_KEY`, `AWS_SESSION_TOKEN` and `AWS_ENDPOINT_URL`.
    ///
    /// Unset or blank variables are treated as absent.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            region: non_empty_var("AWS_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string()),
            access_key_id: non_empty_var("AWS_ACCESS_KEY_ID"),
            secret_access_key: non_empty_var("AWS_SECRET_ACCESS_KEY"),
            session_token: non_empty_var("AWS_SESSION_TOKEN"),
            endpoint_url: non_empty_var("AWS_ENDPOINT_URL"),
        }
    }

    /// Sets the region
    #[must_use]
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// Sets explicit credentials
    #[must_use]
    pub fn with_credentials(
        mut self,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
    ) -> Self {
        self.access_key_id = Some(access_key_id.into());
        self.secret_access_key = Some(secret_access_key.into());
        self
    }

    /// Sets the session token used with explicit credentials
    #[must_use]
    pub fn with_session_token(mut self, session_token: impl Into<String>) -> Self {
        self.session_token = Some(session_token.into());
        self
    }

    /// Sets a custom endpoint
    #[must_use]
    pub fn with_endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.endpoint_url = Some(endpoint_url.into());
        self
    }

    /// Static credentials built from the explicit keys, if any.
    ///
    /// Returns `Ok(None)` when no keys are configured, in which case the SDK
    /// default provider chain applies.
    ///
    /// # Errors
    ///
    /// Returns `ListerError::ConfigError` if only one of the two keys is set
    pub fn credentials(&self) -> ListerResult<Option<Credentials>> {
        match (&self.access_key_id, &self.secret_access_key) {
            (Some(access_key_id), Some(secret_access_key)) => Ok(Some(Credentials::new(
                access_key_id,
                secret_access_key,
                self.session_token.clone(),
                None,
                CREDENTIALS_PROVIDER_NAME,
            ))),
            (None, None) => Ok(None),
            _ => Err(ListerError::ConfigError(
                "AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY must be set together".to_string(),
            )),
        }
    }

    /// Shared AWS configuration for this listing setup
    ///
    /// # Errors
    ///
    /// Returns `ListerError::ConfigError` if the credentials are incomplete
    pub async fn sdk_config(&self) -> ListerResult<SdkConfig> {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(self.region.clone()));

        if let Some(credentials) = self.credentials()? {
            loader = loader.credentials_provider(credentials);
        }

        if let Some(endpoint_url) = &self.endpoint_url {
            loader = loader.endpoint_url(endpoint_url);
        }

        Ok(loader.load().await)
    }

    /// AWS S3 service configuration
    ///
    /// # Errors
    ///
    /// Returns `ListerError::ConfigError` if the credentials are incomplete
    pub async fn s3_client_config(&self) -> ListerResult<aws_sdk_s3::Config> {
        let sdk_config = self.sdk_config().await?;
        let mut builder = aws_sdk_s3::config::Builder::from(&sdk_config);

        // Custom endpoints rarely support virtual-hosted-style addressing
        if self.endpoint_url.is_some() {
            builder.set_force_path_style(Some(true));
        }

        Ok(builder.build())
    }
}

/// Output format of the binary's log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human readable lines
    Pretty,
    /// One JSON object per line
    Json,
}

impl LogFormat {
    /// Reads `LOG_FORMAT`; `json` selects JSON output, anything else the default
    #[must_use]
    pub fn from_env() -> Self {
        match env::var("LOG_FORMAT")
            .unwrap_or_default()
            .trim()
            .to_lowercase()
            .as_str()
        {
            "json" => Self::Json,
            _ => Self::Pretty,
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
