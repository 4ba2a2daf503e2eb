use super::security::{parse_sasl_mechanism, parse_security_protocol, parse_offset_reset};
use crate::config::{KafkaOptions, SecurityOptions};
use crate::Result;
use rdkafka::ClientConfig;

/// Builds the producer-side client configuration from [`KafkaOptions`].
///
/// Fails with `Error::Config` if any security field is unparseable; no
/// partial configuration is returned.
pub fn producer_config(options: &KafkaOptions) -> Result<ClientConfig> {
    let mut config = ClientConfig::new();
    config
        .set("bootstrap.servers", &options.bootstrap_servers)
        .set("client.id", &options.client_id)
        .set("enable.idempotence", options.enable_idempotence.to_string())
        .set("acks", &options.acks)
        .set(
            "message.send.max.retries",
            options.message_send_max_retries.to_string(),
        )
        .set("linger.ms", options.linger_ms.to_string())
        // socket timeout is derived from the acknowledgment timeout
        .set(
            "socket.timeout.ms",
            (options.acks_timeout_secs * 1000).to_string(),
        );
    apply_security(&mut config, &options.security)?;
    Ok(config)
}

/// Builds the consumer-side client configuration from [`KafkaOptions`].
///
/// The group id falls back to the client id when blank. Auto-commit is
/// always enabled and partition-EOF notifications always disabled.
pub fn consumer_config(options: &KafkaOptions) -> Result<ClientConfig> {
    let group_id = if options.group_id.trim().is_empty() {
        &options.client_id
    } else {
        &options.group_id
    };
    let offset_reset = parse_offset_reset(&options.auto_offset_reset)?;

    let mut config = ClientConfig::new();
    config
        .set("bootstrap.servers", &options.bootstrap_servers)
        .set("group.id", group_id)
        .set("client.id", &options.client_id)
        .set("auto.offset.reset", offset_reset.as_str())
        .set(
            "session.timeout.ms",
            (options.session_timeout_secs * 1000).to_string(),
        )
        .set("enable.auto.commit", "true")
        .set("enable.partition.eof", "false");
    apply_security(&mut config, &options.security)?;
    Ok(config)
}

fn apply_security(config: &mut ClientConfig, security: &SecurityOptions) -> Result<()> {
    if let Some(protocol) = parse_security_protocol(&security.security_protocol)? {
        config.set("security.protocol", protocol.as_str());
    }

    if let Some(mechanism) = parse_sasl_mechanism(&security.sasl_mechanism)? {
        config
            .set("sasl.mechanism", mechanism.as_str())
            .set("sasl.username", &security.sasl_username)
            .set("sasl.password", &security.sasl_password);
    }

    Ok(())
}
