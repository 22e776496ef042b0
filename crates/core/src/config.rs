//! Server runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the API layer, so
//! request handling never reads process-wide environment variables. The parsing functions take
//! the raw values rather than reading the environment themselves, which keeps them testable.

use crate::constants::DEFAULT_REST_ADDR;
use crate::{DiagnosisError, DiagnosisResult};
use std::net::SocketAddr;

/// Server configuration resolved at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    rest_addr: SocketAddr,
    cors_permissive: bool,
}

impl ServerConfig {
    pub fn new(rest_addr: SocketAddr, cors_permissive: bool) -> Self {
        Self {
            rest_addr,
            cors_permissive,
        }
    }

    /// Build a `ServerConfig` from the raw `ENDO_REST_ADDR` and `ENDO_CORS_PERMISSIVE` values.
    ///
    /// Missing or blank values fall back to the defaults (`0.0.0.0:3000`, permissive CORS).
    ///
    /// # Errors
    ///
    /// Returns [`DiagnosisError::InvalidInput`] if the address does not parse or the CORS flag
    /// is not a recognised boolean.
    pub fn from_env_values(
        addr: Option<String>,
        cors_permissive: Option<String>,
    ) -> DiagnosisResult<Self> {
        let rest_addr = rest_addr_from_env_value(addr)?;
        let cors_permissive = cors_permissive_from_env_value(cors_permissive)?;
        Ok(Self::new(rest_addr, cors_permissive))
    }

    pub fn rest_addr(&self) -> SocketAddr {
        self.rest_addr
    }

    pub fn cors_permissive(&self) -> bool {
        self.cors_permissive
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_REST_ADDR, true)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse the REST bind address from an optional string value.
pub fn rest_addr_from_env_value(value: Option<String>) -> DiagnosisResult<SocketAddr> {
    let Some(value) = non_blank(value) else {
        return Ok(DEFAULT_REST_ADDR);
    };
    value.parse().map_err(|e| {
        DiagnosisError::InvalidInput(format!("ENDO_REST_ADDR '{value}' is not a socket address: {e}"))
    })
}

/// Parse the CORS flag. Accepts `true/false`, `1/0`, `yes/no` and `on/off`, case-insensitively.
pub fn cors_permissive_from_env_value(value: Option<String>) -> DiagnosisResult<bool> {
    let Some(value) = non_blank(value) else {
        return Ok(true);
    };

    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(DiagnosisError::InvalidInput(format!(
            "ENDO_CORS_PERMISSIVE '{value}' is not a boolean"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_unset_or_blank() {
        let cfg = ServerConfig::from_env_values(None, Some("  ".into())).expect("defaults");
        assert_eq!(cfg, ServerConfig::default());
        assert_eq!(cfg.rest_addr(), DEFAULT_REST_ADDR);
        assert!(cfg.cors_permissive());
    }

    #[test]
    fn default_address_is_all_interfaces_on_3000() {
        assert_eq!(ServerConfig::default().rest_addr().to_string(), "0.0.0.0:3000");
        assert_eq!(
            ServerConfig::from_env_values(None, None).expect("defaults"),
            ServerConfig::default()
        );
    }

    #[test]
    fn parses_explicit_values() {
        let cfg = ServerConfig::from_env_values(Some("127.0.0.1:8080".into()), Some("Off".into()))
            .expect("explicit values");
        assert_eq!(cfg.rest_addr().port(), 8080);
        assert!(!cfg.cors_permissive());
    }

    #[test]
    fn rejects_bad_address() {
        let err = ServerConfig::from_env_values(Some("localhost".into()), None)
            .expect_err("hostname without port should be rejected");
        assert!(matches!(err, DiagnosisError::InvalidInput(_)));
    }

    #[test]
    fn rejects_bad_cors_flag() {
        let err = cors_permissive_from_env_value(Some("sometimes".into()))
            .expect_err("not a boolean");
        assert!(matches!(err, DiagnosisError::InvalidInput(_)));
    }
}
