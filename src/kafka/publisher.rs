//! The publish pipeline: serialize, merge headers, dispatch, interpret the
//! delivery outcome, translate failures.
//!
//! The orchestration skeleton is fixed; the broker-specific dispatch step is
//! the [`MessageDispatch`] capability and the payload encoding is the
//! [`PayloadSerializer`](super::PayloadSerializer) capability. Every
//! implementation therefore applies identical header-merge and logging
//! semantics.

use super::producer::{KafkaDispatch, ProducerFactory};
use super::serializer::{JsonSerializer, PayloadSerializer};
use crate::config::KafkaOptions;
use crate::{Error, Result};
use async_trait::async_trait;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

/// The broker's report on whether a dispatched message was durably placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryStatus {
    Persisted,
    PossiblyPersisted,
    NotPersisted,
}

impl fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = match self {
            DeliveryStatus::Persisted => "Persisted",
            DeliveryStatus::PossiblyPersisted => "PossiblyPersisted",
            DeliveryStatus::NotPersisted => "NotPersisted",
        };
        f.write_str(status)
    }
}

/// Outcome of a single dispatch, consumed only for logging.
#[derive(Debug, Clone)]
pub struct Delivery {
    pub topic: String,
    pub partition: i32,
    pub offset: i64,
    pub status: DeliveryStatus,
}

/// A fully encoded message handed to the dispatch step: key, serialized
/// payload bytes, and wire-encoded headers.
#[derive(Debug, Clone)]
pub struct OutboundMessage {
    pub topic: String,
    pub key: String,
    pub payload: Vec<u8>,
    pub headers: Vec<(String, Vec<u8>)>,
}

/// Broker-specific dispatch step of the publish pipeline.
#[async_trait]
pub trait MessageDispatch: Send + Sync {
    /// Dispatches one message and suspends until the broker acknowledges it
    /// or the send fails.
    async fn dispatch(&self, message: OutboundMessage) -> Result<Delivery>;
}

/// Publishes application payloads to Kafka topics.
///
/// Safe to share across tasks: concurrent `publish` calls dispatch
/// concurrently and the underlying client performs its own batching. The
/// publisher performs no retries of its own; send retries, if any, happen
/// inside librdkafka per `message_send_max_retries`.
pub struct KafkaPublisher<S = JsonSerializer> {
    dispatch: Arc<dyn MessageDispatch>,
    serializer: S,
    default_headers: HashMap<String, String>,
    factory: Option<Arc<ProducerFactory>>,
    disposed: AtomicBool,
}

impl KafkaPublisher<JsonSerializer> {
    /// Creates a publisher owning its producer factory, with JSON payload
    /// serialization.
    pub fn new(options: &KafkaOptions) -> Result<Self> {
        let factory = Arc::new(ProducerFactory::new(options)?);
        let dispatch = Arc::new(KafkaDispatch::new(Arc::clone(&factory)));

        Ok(Self {
            dispatch,
            serializer: JsonSerializer,
            default_headers: options.default_headers.clone(),
            factory: Some(factory),
            disposed: AtomicBool::new(false),
        })
    }
}

impl<S: PayloadSerializer> KafkaPublisher<S> {
    /// Creates a publisher from explicit capabilities. The dispatch step and
    /// serializer are supplied by the caller; nothing is owned beyond them,
    /// so `dispose` only gates this publisher.
    pub fn from_parts(
        dispatch: Arc<dyn MessageDispatch>,
        serializer: S,
        default_headers: HashMap<String, String>,
    ) -> Self {
        Self {
            dispatch,
            serializer,
            default_headers,
            factory: None,
            disposed: AtomicBool::new(false),
        }
    }

    /// Publishes `payload` to `topic` under `key`.
    ///
    /// Default headers from the configuration are merged with `headers`,
    /// call-supplied values winning on key collision. The call suspends at
    /// the single dispatch until the broker acknowledges per the configured
    /// `acks` level; dropping the returned future abandons the wait (the
    /// client decides whether the send itself is still in flight).
    ///
    /// Any failure (serialization, header validation, disposed resources,
    /// broker dispatch) surfaces as [`Error::Publish`] carrying the topic,
    /// the key, and the original cause.
    pub async fn publish<T: Serialize>(
        &self,
        topic: &str,
        key: &str,
        payload: &T,
        headers: Option<&HashMap<String, String>>,
    ) -> Result<()> {
        self.publish_inner(topic, key, payload, headers)
            .await
            .map_err(|e| Error::publish(topic, key, e))
    }

    async fn publish_inner<T: Serialize>(
        &self,
        topic: &str,
        key: &str,
        payload: &T,
        headers: Option<&HashMap<String, String>>,
    ) -> Result<()> {
        if self.disposed.load(Ordering::Acquire) {
            return Err(Error::Disposed("publisher"));
        }

        let serialized = self.serializer.serialize(payload)?;
        let merged_headers = merge_headers(&self.default_headers, headers)?;

        let delivery = self
            .dispatch
            .dispatch(OutboundMessage {
                topic: topic.to_string(),
                key: key.to_string(),
                payload: serialized.into_bytes(),
                headers: merged_headers,
            })
            .await?;

        if delivery.status != DeliveryStatus::Persisted {
            warn!(
                topic = %delivery.topic,
                partition = delivery.partition,
                offset = delivery.offset,
                status = %delivery.status,
                key = %key,
                "message delivery status is not persisted"
            );
        } else {
            debug!(
                topic = %delivery.topic,
                partition = delivery.partition,
                offset = delivery.offset,
                status = %delivery.status,
                key = %key,
                "message delivered to Kafka"
            );
        }

        Ok(())
    }

    /// Disposes the publisher and, when it owns one, its producer factory.
    /// Idempotent; the factory is released exactly once.
    pub fn dispose(&self) {
        if self.disposed.swap(true, Ordering::AcqRel) {
            return;
        }
        if let Some(factory) = &self.factory {
            factory.dispose();
        }
    }
}

/// Merges default headers with call-supplied headers (call values win) and
/// encodes values to wire bytes. Fails before any dispatch if a merged key
/// is blank; values are non-null by construction.
fn merge_headers(
    defaults: &HashMap<String, String>,
    call: Option<&HashMap<String, String>>,
) -> Result<Vec<(String, Vec<u8>)>> {
    let mut merged = defaults.clone();
    if let Some(call) = call {
        for (name, value) in call {
            merged.insert(name.clone(), value.clone());
        }
    }

    merged
        .into_iter()
        .map(|(name, value)| {
            if name.trim().is_empty() {
                return Err(Error::Header(
                    "header keys must not be blank".to_string(),
                ));
            }
            Ok((name, value.into_bytes()))
        })
        .collect()
}
