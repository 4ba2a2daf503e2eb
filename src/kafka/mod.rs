pub mod client_config;
pub mod consumer;
pub mod producer;
pub mod publisher;
pub mod security;
pub mod serializer;


pub use consumer::ConsumerFactory;
pub use producer::{KafkaDispatch, ProducerFactory};
pub use publisher::{Delivery, DeliveryStatus, KafkaPublisher, MessageDispatch, OutboundMessage};
pub use security::{OffsetReset, SaslMechanism, SecurityProtocol};
pub use serializer::{JsonSerializer, PayloadSerializer};
