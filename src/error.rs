//! Error types and result handling for worktrack-kafka.
//!
//! This module defines the main error type [`Error`] and a convenience
//! [`Result`] type alias used throughout the crate.
//!
//! Callers of [`KafkaPublisher::publish`](crate::KafkaPublisher::publish) only
//! ever observe [`Error::Publish`]; the original failure (serialization,
//! header validation, disposed resource, broker error) is attached as its
//! source and is meant for diagnostics, not for branching.
//!
//! # Example
//!
//! ```rust
//! use worktrack_kafka::{Error, Result};
//!
//! fn check_endpoint(endpoint: &str) -> Result<()> {
//!     if endpoint.trim().is_empty() {
//!         return Err(Error::Config("bootstrap_servers is required".to_string()));
//!     }
//!     Ok(())
//! }
//!
//! match check_endpoint("") {
//!     Ok(()) => println!("Valid"),
//!     Err(Error::Config(msg)) => eprintln!("Configuration error: {}", msg),
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use thiserror::Error;

/// The main error type for worktrack-kafka operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error: a malformed or unparseable configuration field.
    ///
    /// Raised at validation, configuration-build, or factory-construction
    /// time; never mid-publish.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Kafka client or producer error.
    #[error("Kafka error: {0}")]
    Kafka(#[from] rdkafka::error::KafkaError),

    /// JSON serialization error when encoding payloads.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A merged message header failed validation before wire encoding.
    #[error("Invalid message header: {0}")]
    Header(String),

    /// Operation attempted on a factory or publisher after disposal.
    #[error("{0} has been disposed")]
    Disposed(&'static str),

    /// A publish call failed.
    ///
    /// The only error surfaced to callers of `publish`; carries the topic,
    /// the message key, and the original failure as its source.
    #[error("Failed to publish message to topic '{topic}' with key '{key}'")]
    Publish {
        /// Topic the message was destined for.
        topic: String,
        /// Key of the message that failed.
        key: String,
        /// The underlying failure.
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Wraps any failure from the publish pipeline into [`Error::Publish`].
    pub(crate) fn publish(topic: &str, key: &str, source: Error) -> Self {
        Error::Publish {
            topic: topic.to_string(),
            key: key.to_string(),
            source: Box::new(source),
        }
    }
}

/// A convenient Result type alias for worktrack-kafka operations.
pub type Result<T> = std::result::Result<T, Error>;
