use crate::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Payload serialization capability consumed by the publish pipeline.
pub trait PayloadSerializer: Send + Sync {
    fn serialize<T: Serialize>(&self, value: &T) -> Result<String>;

    fn deserialize<T: DeserializeOwned>(&self, raw: &str) -> Result<T>;
}

/// JSON serializer backed by `serde_json`.
pub struct JsonSerializer;

impl PayloadSerializer for JsonSerializer {
    fn serialize<T: Serialize>(&self, value: &T) -> Result<String> {
        serde_json::to_string(value).map_err(Into::into)
    }

    fn deserialize<T: DeserializeOwned>(&self, raw: &str) -> Result<T> {
        serde_json::from_str(raw).map_err(Into::into)
    }
}
