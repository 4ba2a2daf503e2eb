pub mod config;
pub mod error;

pub mod kafka;

pub use config::{KafkaOptions, SecurityOptions};
pub use error::{Error, Result};
pub use kafka::{ConsumerFactory, JsonSerializer, KafkaPublisher, ProducerFactory};
