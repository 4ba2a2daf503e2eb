use crate::kafka::security;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Kafka connection, reliability, and consumer settings.
///
/// Constructed once, from a file/environment source or in code, and treated
/// as immutable afterwards.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct KafkaOptions {
    /// Broker endpoints, `host:port[,host:port...]`. Required.
    pub bootstrap_servers: String,
    #[serde(default = "default_client_id")]
    pub client_id: String,
    #[serde(default = "default_enable_idempotence")]
    pub enable_idempotence: bool,
    /// Required broker acknowledgment count: "all", "0", "1", ...
    #[serde(default = "default_acks")]
    pub acks: String,
    /// Socket timeout for acknowledged sends, in seconds.
    #[serde(default = "default_acks_timeout_secs")]
    pub acks_timeout_secs: u64,
    #[serde(default = "default_message_send_max_retries")]
    pub message_send_max_retries: u32,
    /// Batching delay before send, in milliseconds.
    #[serde(default = "default_linger_ms")]
    pub linger_ms: u32,
    /// Consumer group id; falls back to `client_id` when blank.
    #[serde(default)]
    pub group_id: String,
    /// Offset policy when no committed offset exists: earliest, latest, error.
    #[serde(default = "default_auto_offset_reset")]
    pub auto_offset_reset: String,
    #[serde(default = "default_session_timeout_secs")]
    pub session_timeout_secs: u64,
    /// Headers merged into every published message.
    #[serde(default)]
    pub default_headers: HashMap<String, String>,
    #[serde(default)]
    pub security: SecurityOptions,
}

/// Transport security and SASL settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SecurityOptions {
    /// Security protocol name. "PLAINTEXT" (any case) means no security
    /// settings are applied at all.
    #[serde(default = "default_security_protocol")]
    pub security_protocol: String,
    /// SASL mechanism name; blank disables SASL entirely.
    #[serde(default)]
    pub sasl_mechanism: String,
    #[serde(default)]
    pub sasl_username: String,
    #[serde(default)]
    pub sasl_password: String,
}

impl KafkaOptions {
    /// Loads options from a configuration file, with `WORKTRACK_KAFKA_*`
    /// environment variables taking precedence over file values.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(
                config::Environment::with_prefix("WORKTRACK_KAFKA")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(|e| Error::Config(e.to_string()))?;

        settings
            .try_deserialize()
            .map_err(|e| Error::Config(e.to_string()))
    }

    /// Pre-flight configuration check, intended to run at application startup
    /// before any client is constructed.
    ///
    /// The first failing field wins; the returned [`Error::Config`] names the
    /// offending value and, for enum-like fields, lists the valid values. The
    /// same parse routines back the producer and consumer configuration
    /// builders, so a configuration that validates here also builds.
    pub fn validate(&self) -> Result<()> {
        if self.bootstrap_servers.trim().is_empty() {
            return Err(Error::Config("bootstrap_servers is required".to_string()));
        }

        security::parse_offset_reset(&self.auto_offset_reset)?;
        security::parse_security_protocol(&self.security.security_protocol)?;
        security::parse_sasl_mechanism(&self.security.sasl_mechanism)?;

        Ok(())
    }
}

impl Default for KafkaOptions {
    fn default() -> Self {
        Self {
            bootstrap_servers: String::new(),
            client_id: default_client_id(),
            enable_idempotence: default_enable_idempotence(),
            acks: default_acks(),
            acks_timeout_secs: default_acks_timeout_secs(),
            message_send_max_retries: default_message_send_max_retries(),
            linger_ms: default_linger_ms(),
            group_id: String::new(),
            auto_offset_reset: default_auto_offset_reset(),
            session_timeout_secs: default_session_timeout_secs(),
            default_headers: HashMap::new(),
            security: SecurityOptions::default(),
        }
    }
}

impl Default for SecurityOptions {
    fn default() -> Self {
        Self {
            security_protocol: default_security_protocol(),
            sasl_mechanism: String::new(),
            sasl_username: String::new(),
            sasl_password: String::new(),
        }
    }
}

fn default_client_id() -> String {
    "worktrack-kafka-producer".to_string()
}

fn default_enable_idempotence() -> bool {
    true
}

fn default_acks() -> String {
    "all".to_string()
}

fn default_acks_timeout_secs() -> u64 {
    30
}

fn default_message_send_max_retries() -> u32 {
    3
}

fn default_linger_ms() -> u32 {
    5
}

fn default_auto_offset_reset() -> String {
    "earliest".to_string()
}

fn default_session_timeout_secs() -> u64 {
    30
}

fn default_security_protocol() -> String {
    "PLAINTEXT".to_string()
}
