use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// An object found by a bucket listing, with its public URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ObjectRecord {
    /// Object key within the bucket
    pub key: String,
    /// Public virtual-hosted-style HTTPS URL of the object
    pub url: String,
}

impl ObjectRecord {
    /// Builds a record for `key`, deriving the URL from `bucket` and `region`
    #[must_use]
    pub fn new(bucket: &str, region: &str, key: impl Into<String>) -> Self {
        let key = key.into();
        let url = public_object_url(bucket, region, &key);
        Self { key, url }
    }
}

/// Public URL of an object: `https://{bucket}.s3.{region}.amazonaws.com/{key}`.
///
/// The key is used verbatim, without percent-encoding.
#[must_use]
pub fn public_object_url(bucket: &str, region: &str, key: &str) -> String {
    format!("https://{bucket}.s3.{region}.amazonaws.com/{key}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_object_url() {
        assert_eq!(
            public_object_url("demo", "eu-west-1", "photos/a.jpg"),
            "https://demo.s3.eu-west-1.amazonaws.com/photos/a.jpg"
        );
        // Keys are not escaped
        assert_eq!(
            public_object_url("demo", "us-east-1", "my photos/a+b.jpg"),
            "https://demo.s3.us-east-1.amazonaws.com/my photos/a+b.jpg"
        );
    }

    #[test]
    fn test_object_record_serializes_key_and_url() {
        let record = ObjectRecord::new("demo", "eu-west-1", "photos/a.jpg");
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "key": "photos/a.jpg",
                "url": "https://demo.s3.eu-west-1.amazonaws.com/photos/a.jpg"
            })
        );

        let parsed: ObjectRecord = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn test_object_record_schema_requires_both_fields() {
        let schema = serde_json::to_value(schemars::schema_for!(ObjectRecord)).unwrap();

        assert!(schema["properties"]["key"].is_object());
        assert!(schema["properties"]["url"].is_object());

        let required = schema["required"].as_array().unwrap();
        assert!(required.contains(&serde_json::json!("key")));
        assert!(required.contains(&serde_json::json!("url")));
    }
}
