//! Programmatic and file-based configuration tests: documented defaults,
//! the pre-flight validator, and file loading.

use std::io::Write;
use worktrack_kafka::{Error, KafkaOptions};

fn valid_options() -> KafkaOptions {
    KafkaOptions {
        bootstrap_servers: "localhost:9092".to_string(),
        ..KafkaOptions::default()
    }
}

#[test]
fn defaults_match_documented_values() {
    let options = KafkaOptions::default();

    assert_eq!(options.bootstrap_servers, "");
    assert_eq!(options.client_id, "worktrack-kafka-producer");
    assert!(options.enable_idempotence);
    assert_eq!(options.acks, "all");
    assert_eq!(options.acks_timeout_secs, 30);
    assert_eq!(options.message_send_max_retries, 3);
    assert_eq!(options.linger_ms, 5);
    assert_eq!(options.group_id, "");
    assert_eq!(options.auto_offset_reset, "earliest");
    assert_eq!(options.session_timeout_secs, 30);
    assert!(options.default_headers.is_empty());
    assert_eq!(options.security.security_protocol, "PLAINTEXT");
    assert_eq!(options.security.sasl_mechanism, "");
}

#[test]
fn validate_accepts_valid_options() {
    valid_options().validate().expect("valid options");
}

#[test]
fn validate_requires_bootstrap_servers() {
    let options = KafkaOptions::default();

    let err = options.validate().unwrap_err();
    assert!(matches!(err, Error::Config(_)));
    assert!(err.to_string().contains("bootstrap_servers"));
}

#[test]
fn validate_rejects_blank_bootstrap_servers() {
    let options = KafkaOptions {
        bootstrap_servers: "   ".to_string(),
        ..KafkaOptions::default()
    };

    assert!(options.validate().is_err());
}

#[test]
fn validate_rejects_unknown_offset_reset() {
    let mut options = valid_options();
    options.auto_offset_reset = "sometimes".to_string();

    let err = options.validate().unwrap_err();
    let message = err.to_string();
    assert!(message.contains("auto_offset_reset"));
    assert!(message.contains("'sometimes'"));
    assert!(message.contains("earliest"));
}

#[test]
fn validate_rejects_unknown_security_protocol() {
    let mut options = valid_options();
    options.security.security_protocol = "BOGUS".to_string();

    let err = options.validate().unwrap_err();
    let message = err.to_string();
    assert!(matches!(err, Error::Config(_)));
    assert!(message.contains("security_protocol"));
    assert!(message.contains("'BOGUS'"));
    assert!(message.contains("SASL_SSL"));
}

#[test]
fn validate_rejects_unknown_sasl_mechanism() {
    let mut options = valid_options();
    options.security.sasl_mechanism = "NTLM".to_string();

    let err = options.validate().unwrap_err();
    let message = err.to_string();
    assert!(message.contains("sasl_mechanism"));
    assert!(message.contains("'NTLM'"));
}

#[test]
fn validate_accepts_case_insensitive_enum_values() {
    let mut options = valid_options();
    options.auto_offset_reset = "LATEST".to_string();
    options.security.security_protocol = "sasl_ssl".to_string();
    options.security.sasl_mechanism = "scram-sha-256".to_string();

    options.validate().expect("case-insensitive values");
}

#[test]
fn validate_accepts_blank_enum_fields() {
    let mut options = valid_options();
    options.auto_offset_reset = String::new();
    options.security.security_protocol = String::new();
    options.security.sasl_mechanism = String::new();

    options.validate().expect("blank fields fall back to defaults");
}

#[test]
fn from_file_loads_options_and_applies_defaults() {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("temp file");
    file.write_all(
        br#"
bootstrap_servers = "broker-1:9092,broker-2:9092"
linger_ms = 20

[default_headers]
source = "worktrack"

[security]
security_protocol = "SASL_SSL"
sasl_mechanism = "SCRAM-SHA-256"
sasl_username = "svc-worktrack"
sasl_password = "secret"
"#,
    )
    .expect("write config");

    let options = KafkaOptions::from_file(file.path()).expect("load config");

    assert_eq!(options.bootstrap_servers, "broker-1:9092,broker-2:9092");
    assert_eq!(options.linger_ms, 20);
    assert_eq!(options.default_headers["source"], "worktrack");
    assert_eq!(options.security.security_protocol, "SASL_SSL");
    assert_eq!(options.security.sasl_mechanism, "SCRAM-SHA-256");

    // untouched fields keep their documented defaults
    assert_eq!(options.client_id, "worktrack-kafka-producer");
    assert_eq!(options.acks, "all");
    assert_eq!(options.auto_offset_reset, "earliest");

    options.validate().expect("loaded config validates");
}

#[test]
fn from_file_reports_malformed_config() {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("temp file");
    file.write_all(b"bootstrap_servers = [not valid toml")
        .expect("write config");

    let err = KafkaOptions::from_file(file.path()).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}
