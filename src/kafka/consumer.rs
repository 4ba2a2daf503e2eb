use super::client_config;
use crate::config::KafkaOptions;
use crate::{Error, Result};
use rdkafka::consumer::StreamConsumer;
use rdkafka::ClientConfig;
use std::sync::atomic::{AtomicBool, Ordering};

/// Creates caller-owned consumer handles from a configuration built once at
/// construction.
///
/// Unlike [`ProducerFactory`](super::ProducerFactory), no handle is created
/// eagerly: every [`create_consumer`](Self::create_consumer) call builds a
/// brand-new [`StreamConsumer`] that the caller owns and drops independently.
/// Disposing the factory only stops it from issuing new consumers.
pub struct ConsumerFactory {
    config: ClientConfig,
    disposed: AtomicBool,
}

impl ConsumerFactory {
    pub fn new(options: &KafkaOptions) -> Result<Self> {
        if options.bootstrap_servers.trim().is_empty() {
            return Err(Error::Config("bootstrap_servers is required".to_string()));
        }

        Ok(Self {
            config: client_config::consumer_config(options)?,
            disposed: AtomicBool::new(false),
        })
    }

    /// Builds a new consumer handle. Each call returns a distinct instance.
    pub fn create_consumer(&self) -> Result<StreamConsumer> {
        if self.disposed.load(Ordering::Acquire) {
            return Err(Error::Disposed("consumer factory"));
        }
        Ok(self.config.create()?)
    }

    /// Marks the factory disposed. Idempotent; previously issued consumers
    /// are caller-owned and unaffected.
    pub fn dispose(&self) {
        self.disposed.store(true, Ordering::Release);
    }
}
