// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names, default values, and the
//! typed configuration loaded from the environment at startup. A `.env` file
//! in the working directory is honoured (loaded in `main.rs`).
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `COBO_API_SECRET` | Hex-encoded Ed25519 API private key | Required |
//! | `COBO_ENV` | `sandbox`, `development` or `production` | `development` |
//! | `COBO_API_BASE_URL` | Override of the Cobo API base URL | Derived from `COBO_ENV` |
//! | `COBO_REQUEST_TIMEOUT_SECS` | Outbound request timeout | `15` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8000` |
//! | `TLS_CERT_PATH` / `TLS_KEY_PATH` | PEM files enabling HTTPS | Unset (plain HTTP) |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::{fmt, net::SocketAddr, path::PathBuf, str::FromStr, time::Duration};

use tracing::warn;

pub const COBO_API_SECRET_ENV: &str = "COBO_API_SECRET";
pub const COBO_ENVIRONMENT_ENV: &str = "COBO_ENV";
pub const COBO_API_BASE_URL_ENV: &str = "COBO_API_BASE_URL";
pub const COBO_REQUEST_TIMEOUT_ENV: &str = "COBO_REQUEST_TIMEOUT_SECS";
pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const TLS_CERT_PATH_ENV: &str = "TLS_CERT_PATH";
pub const TLS_KEY_PATH_ENV: &str = "TLS_KEY_PATH";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

const SANDBOX_BASE_URL: &str = "https://api.sandbox.cobo.com/v2";
const DEVELOPMENT_BASE_URL: &str = "https://api.dev.cobo.com/v2";
const PRODUCTION_BASE_URL: &str = "https://api.cobo.com/v2";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value {value:?}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Cobo deployment the gateway talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoboEnvironment {
    Sandbox,
    Development,
    Production,
}

impl CoboEnvironment {
    pub fn as_str(&self) -> &'static str {
        match self {
            CoboEnvironment::Sandbox => "sandbox",
            CoboEnvironment::Development => "development",
            CoboEnvironment::Production => "production",
        }
    }

    /// Versioned API root for this environment.
    pub fn base_url(&self) -> &'static str {
        match self {
            CoboEnvironment::Sandbox => SANDBOX_BASE_URL,
            CoboEnvironment::Development => DEVELOPMENT_BASE_URL,
            CoboEnvironment::Production => PRODUCTION_BASE_URL,
        }
    }

    /// Parse a `COBO_ENV` value. Anything unrecognised targets production.
    pub fn resolve(raw: &str) -> Self {
        raw.parse().unwrap_or_else(|_| {
            warn!(
                value = %raw,
                "Unrecognised COBO_ENV, falling back to production"
            );
            CoboEnvironment::Production
        })
    }
}

impl FromStr for CoboEnvironment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Exact, case-sensitive names only.
        match s {
            "sandbox" => Ok(CoboEnvironment::Sandbox),
            "development" => Ok(CoboEnvironment::Development),
            "production" => Ok(CoboEnvironment::Production),
            other => Err(format!("unknown environment {other}")),
        }
    }
}

impl fmt::Display for CoboEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output format for the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    pub fn from_env() -> Self {
        Self::parse(env_optional(LOG_FORMAT_ENV).as_deref())
    }

    fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::to_ascii_lowercase).as_deref() {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

/// Settings for the outbound Cobo client.
#[derive(Clone)]
pub struct CoboConfig {
    pub environment: CoboEnvironment,
    pub base_url: String,
    pub api_secret: String,
    pub timeout: Duration,
}

impl fmt::Debug for CoboConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoboConfig")
            .field("environment", &self.environment)
            .field("base_url", &self.base_url)
            .field("api_secret", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsPaths {
    pub cert: PathBuf,
    pub key: PathBuf,
}

/// Full process configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub tls: Option<TlsPaths>,
    pub cobo: CoboConfig,
}

impl Config {
    /// Load configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_optional)
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_secret = get(COBO_API_SECRET_ENV).ok_or(ConfigError::Missing(COBO_API_SECRET_ENV))?;

        let environment = get(COBO_ENVIRONMENT_ENV)
            .map(|raw| CoboEnvironment::resolve(&raw))
            .unwrap_or(CoboEnvironment::Development);

        let base_url = get(COBO_API_BASE_URL_ENV)
            .unwrap_or_else(|| environment.base_url().to_string());

        let timeout_secs = match get(COBO_REQUEST_TIMEOUT_ENV) {
            Some(raw) => parse_positive(COBO_REQUEST_TIMEOUT_ENV, &raw)?,
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        let host = get(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match get(PORT_ENV) {
            Some(raw) => raw.parse::<u16>().map_err(|e| ConfigError::Invalid {
                name: PORT_ENV,
                value: raw.clone(),
                reason: e.to_string(),
            })?,
            None => DEFAULT_PORT,
        };

        let tls = match (get(TLS_CERT_PATH_ENV), get(TLS_KEY_PATH_ENV)) {
            (Some(cert), Some(key)) => Some(TlsPaths {
                cert: PathBuf::from(cert),
                key: PathBuf::from(key),
            }),
            (None, None) => None,
            (Some(_), None) => return Err(ConfigError::Missing(TLS_KEY_PATH_ENV)),
            (None, Some(_)) => return Err(ConfigError::Missing(TLS_CERT_PATH_ENV)),
        };

        Ok(Self {
            host,
            port,
            tls,
            cobo: CoboConfig {
                environment,
                base_url,
                api_secret,
                timeout: Duration::from_secs(timeout_secs),
            },
        })
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = format!("{}:{}", self.host, self.port);
        raw.parse().map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
            name: HOST_ENV,
            value: raw.clone(),
            reason: e.to_string(),
        })
    }
}

fn parse_positive(name: &'static str, raw: &str) -> Result<u64, ConfigError> {
    match raw.parse::<u64>() {
        Ok(value) if value > 0 => Ok(value),
        Ok(_) => Err(ConfigError::Invalid {
            name,
            value: raw.to_string(),
            reason: "must be greater than zero".to_string(),
        }),
        Err(e) => Err(ConfigError::Invalid {
            name,
            value: raw.to_string(),
            reason: e.to_string(),
        }),
    }
}

fn env_optional(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
