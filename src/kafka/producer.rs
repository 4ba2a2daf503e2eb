use super::client_config;
use super::publisher::{Delivery, DeliveryStatus, MessageDispatch, OutboundMessage};
use crate::config::KafkaOptions;
use crate::{Error, Result};
use async_trait::async_trait;
use rdkafka::message::{Header, OwnedHeaders};
use rdkafka::producer::{FutureProducer, FutureRecord};
use rdkafka::util::Timeout;
use std::sync::{Arc, PoisonError, RwLock};

enum State {
    Ready(Arc<FutureProducer>),
    Disposed,
}

/// Owns the single producer handle for a publisher lifetime.
///
/// Construction validates the endpoint, builds the producer configuration,
/// and eagerly creates the handle. Every [`producer`](Self::producer) call
/// returns the same handle until [`dispose`](Self::dispose); afterwards all
/// calls fail with [`Error::Disposed`]. The state lives behind an `RwLock`,
/// so a dispose racing an in-flight call observes either the ready or the
/// disposed state, never a torn handle.
pub struct ProducerFactory {
    state: RwLock<State>,
}

impl ProducerFactory {
    pub fn new(options: &KafkaOptions) -> Result<Self> {
        if options.bootstrap_servers.trim().is_empty() {
            return Err(Error::Config("bootstrap_servers is required".to_string()));
        }
        let producer: FutureProducer = client_config::producer_config(options)?.create()?;

        Ok(Self {
            state: RwLock::new(State::Ready(Arc::new(producer))),
        })
    }

    /// Returns the factory's producer handle.
    pub fn producer(&self) -> Result<Arc<FutureProducer>> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        match &*state {
            State::Ready(producer) => Ok(Arc::clone(producer)),
            State::Disposed => Err(Error::Disposed("producer factory")),
        }
    }

    /// Releases the producer handle. Idempotent.
    ///
    /// In-flight publishes holding a handle reference complete normally;
    /// the underlying client is released once the last reference drops.
    pub fn dispose(&self) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        *state = State::Disposed;
    }
}

/// Broker dispatch step backed by an rdkafka [`FutureProducer`].
///
/// Obtains the current handle from the factory on every call, so a disposed
/// factory fails the dispatch before any record is built.
pub struct KafkaDispatch {
    factory: Arc<ProducerFactory>,
}

impl KafkaDispatch {
    pub fn new(factory: Arc<ProducerFactory>) -> Self {
        Self { factory }
    }
}

#[async_trait]
impl MessageDispatch for KafkaDispatch {
    async fn dispatch(&self, message: OutboundMessage) -> Result<Delivery> {
        let producer = self.factory.producer()?;
        let OutboundMessage {
            topic,
            key,
            payload,
            headers,
        } = message;

        let mut wire_headers = OwnedHeaders::new();
        for (name, value) in &headers {
            wire_headers = wire_headers.insert(Header {
                key: name.as_str(),
                value: Some(value.as_slice()),
            });
        }

        let record = FutureRecord::to(&topic)
            .key(&key)
            .payload(&payload)
            .headers(wire_headers);

        let (partition, offset) = producer
            .send(record, Timeout::Never)
            .await
            .map_err(|(e, _)| Error::Kafka(e))?;

        // The future producer does not expose librdkafka's per-message
        // persistence status; an acknowledged send is reported as persisted
        // and failures surface as errors above.
        Ok(Delivery {
            topic,
            partition,
            offset,
            status: DeliveryStatus::Persisted,
        })
    }
}
