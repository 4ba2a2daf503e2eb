//! Mapping of string-typed security settings onto librdkafka's closed
//! variant sets.
//!
//! All three parse routines are pure and deterministic, share one
//! case-insensitive lookup, and are used identically by the configuration
//! builders and by [`KafkaOptions::validate`](crate::KafkaOptions::validate).

use crate::{Error, Result};

/// Transport security mode, `security.protocol`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecurityProtocol {
    Plaintext,
    Ssl,
    SaslPlaintext,
    SaslSsl,
}

impl SecurityProtocol {
    /// Canonical librdkafka property value.
    pub fn as_str(&self) -> &'static str {
        match self {
            SecurityProtocol::Plaintext => "PLAINTEXT",
            SecurityProtocol::Ssl => "SSL",
            SecurityProtocol::SaslPlaintext => "SASL_PLAINTEXT",
            SecurityProtocol::SaslSsl => "SASL_SSL",
        }
    }
}

/// SASL authentication mechanism, `sasl.mechanism`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaslMechanism {
    Plain,
    ScramSha256,
    ScramSha512,
    Gssapi,
    OauthBearer,
}

impl SaslMechanism {
    /// Canonical librdkafka property value.
    pub fn as_str(&self) -> &'static str {
        match self {
            SaslMechanism::Plain => "PLAIN",
            SaslMechanism::ScramSha256 => "SCRAM-SHA-256",
            SaslMechanism::ScramSha512 => "SCRAM-SHA-512",
            SaslMechanism::Gssapi => "GSSAPI",
            SaslMechanism::OauthBearer => "OAUTHBEARER",
        }
    }
}

/// Consumer start position when no committed offset exists,
/// `auto.offset.reset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetReset {
    Earliest,
    Latest,
    Error,
}

impl OffsetReset {
    /// Canonical librdkafka property value.
    pub fn as_str(&self) -> &'static str {
        match self {
            OffsetReset::Earliest => "earliest",
            OffsetReset::Latest => "latest",
            OffsetReset::Error => "error",
        }
    }
}

const SECURITY_PROTOCOLS: &[(&str, SecurityProtocol)] = &[
    ("PLAINTEXT", SecurityProtocol::Plaintext),
    ("SSL", SecurityProtocol::Ssl),
    ("SASL_PLAINTEXT", SecurityProtocol::SaslPlaintext),
    ("SASL_SSL", SecurityProtocol::SaslSsl),
];

const SASL_MECHANISMS: &[(&str, SaslMechanism)] = &[
    ("PLAIN", SaslMechanism::Plain),
    ("SCRAM-SHA-256", SaslMechanism::ScramSha256),
    ("SCRAM-SHA-512", SaslMechanism::ScramSha512),
    ("GSSAPI", SaslMechanism::Gssapi),
    ("OAUTHBEARER", SaslMechanism::OauthBearer),
];

const OFFSET_RESETS: &[(&str, OffsetReset)] = &[
    ("earliest", OffsetReset::Earliest),
    ("latest", OffsetReset::Latest),
    ("error", OffsetReset::Error),
];

/// Parses a security protocol name.
///
/// Blank and "PLAINTEXT" (any case) mean no security is applied and yield
/// `None`, leaving the client configuration untouched.
pub fn parse_security_protocol(value: &str) -> Result<Option<SecurityProtocol>> {
    let value = value.trim();
    if value.is_empty() || value.eq_ignore_ascii_case("PLAINTEXT") {
        return Ok(None);
    }
    parse_variant("security_protocol", value, SECURITY_PROTOCOLS).map(Some)
}

/// Parses a SASL mechanism name. Blank means SASL is disabled.
pub fn parse_sasl_mechanism(value: &str) -> Result<Option<SaslMechanism>> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    parse_variant("sasl_mechanism", value, SASL_MECHANISMS).map(Some)
}

/// Parses an offset-reset policy name. Blank defaults to `Earliest`.
pub fn parse_offset_reset(value: &str) -> Result<OffsetReset> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(OffsetReset::Earliest);
    }
    parse_variant("auto_offset_reset", value, OFFSET_RESETS)
}

fn parse_variant<T: Copy>(field: &str, value: &str, variants: &[(&str, T)]) -> Result<T> {
    variants
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(value))
        .map(|(_, variant)| *variant)
        .ok_or_else(|| {
            let valid = variants
                .iter()
                .map(|(name, _)| *name)
                .collect::<Vec<_>>()
                .join(", ");
            Error::Config(format!(
                "invalid {field}: '{value}'. Valid values: {valid}"
            ))
        })
}
