// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Cobo WaaS 2 API client.
//!
//! A single [`CoboClient`] is built at startup and shared by all handlers.
//! Operations live in `wallets.rs` and `transactions.rs`; each one signs a
//! request, sends it, and returns the vendor JSON untouched.

use std::collections::BTreeMap;

use chrono::Utc;
use reqwest::{header::CONTENT_TYPE, Client, Method};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, info};
use url::{form_urlencoded, Url};

use crate::config::CoboConfig;

pub mod signing;
pub mod transactions;
pub mod types;
pub mod wallets;

use signing::{RequestSigner, API_KEY_HEADER, NONCE_HEADER, SIGNATURE_HEADER};

pub use transactions::{ContractCallRequest, MessageSignRequest, TransferRequest};

#[derive(Debug, thiserror::Error)]
pub enum CoboError {
    #[error("Cobo client configuration is invalid: {0}")]
    Config(String),

    #[error("Cobo API key is invalid: {0}")]
    InvalidKey(String),

    #[error("Cobo request could not be encoded: {0}")]
    Encode(String),

    #[error("Cobo request failed: {0}")]
    Request(String),

    #[error("Cobo API returned {status}: {message}")]
    Api {
        status: u16,
        error_code: Option<i64>,
        error_id: Option<String>,
        message: String,
    },

    #[error("Cobo response was invalid: {0}")]
    InvalidResponse(String),
}

/// Error body returned by the Cobo API on non-2xx responses.
#[derive(Debug, Deserialize)]
struct VendorErrorBody {
    #[serde(default)]
    error_code: Option<i64>,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    error_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CoboClient {
    base_url: Url,
    signer: RequestSigner,
    http: Client,
}

impl CoboClient {
    pub fn new(config: &CoboConfig) -> Result<Self, CoboError> {
        let signer = RequestSigner::from_hex(&config.api_secret)?;
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| CoboError::Config(format!("invalid base URL {}: {e}", config.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(CoboError::Config(format!(
                "base URL {} cannot carry a path",
                config.base_url
            )));
        }

        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| CoboError::Request(format!("failed to build HTTP client: {e}")))?;

        info!(
            environment = %config.environment,
            host = %base_url,
            api_key = %signer.api_key(),
            "Cobo WaaS client configured"
        );

        Ok(Self {
            base_url,
            signer,
            http,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn api_key(&self) -> &str {
        self.signer.api_key()
    }

    pub(crate) async fn get_json<Q>(
        &self,
        operation: &'static str,
        segments: &[&str],
        query: &Q,
    ) -> Result<Value, CoboError>
    where
        Q: Serialize + ?Sized,
    {
        let query = encode_query(query)?;
        self.call(operation, Method::GET, segments, query, String::new())
            .await
    }

    pub(crate) async fn post_json<B>(
        &self,
        operation: &'static str,
        segments: &[&str],
        body: &B,
    ) -> Result<Value, CoboError>
    where
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_string(body)
            .map_err(|e| CoboError::Encode(format!("serialize body failed: {e}")))?;
        self.call(operation, Method::POST, segments, String::new(), body)
            .await
    }

    async fn call(
        &self,
        operation: &'static str,
        method: Method,
        segments: &[&str],
        query: String,
        body: String,
    ) -> Result<Value, CoboError> {
        match self.send(operation, method, segments, query, body).await {
            Ok(value) => Ok(value),
            Err(e) => {
                error!(operation, error = %e, "Cobo WaaS call failed");
                Err(e)
            }
        }
    }

    async fn send(
        &self,
        operation: &'static str,
        method: Method,
        segments: &[&str],
        query: String,
        body: String,
    ) -> Result<Value, CoboError> {
        let mut url = self.endpoint(segments)?;
        if !query.is_empty() {
            url.set_query(Some(&query));
        }
        let path = url.path().to_string();

        let nonce = Utc::now().timestamp_millis().to_string();
        let signature = self
            .signer
            .sign(method.as_str(), &path, &nonce, &query, &body);

        info!(operation, method = %method, path = %path, "Calling Cobo WaaS");
        if !body.is_empty() {
            debug!(operation, body = %body, "Cobo WaaS request body");
        }

        let mut request = self
            .http
            .request(method.clone(), url)
            .header(API_KEY_HEADER, self.signer.api_key())
            .header(NONCE_HEADER, &nonce)
            .header(SIGNATURE_HEADER, signature);
        if !body.is_empty() {
            request = request.header(CONTENT_TYPE, "application/json").body(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| CoboError::Request(format!("{method} {path} failed: {e}")))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| CoboError::Request(format!("{method} {path} body read failed: {e}")))?;

        if !status.is_success() {
            return Err(api_error(status.as_u16(), status.canonical_reason(), &text));
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&text).map_err(|e| {
            CoboError::InvalidResponse(format!("{method} {path} invalid JSON: {e}"))
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, CoboError> {
        // `url` drops dot segments instead of encoding them.
        if let Some(bad) = segments.iter().find(|s| matches!(**s, "" | "." | "..")) {
            return Err(CoboError::Encode(format!("invalid path segment {bad:?}")));
        }
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| CoboError::Config("base URL cannot carry a path".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    #[cfg(test)]
    pub(crate) fn for_tests(base_url: &str, secret: &str) -> Self {
        let config = CoboConfig {
            environment: crate::config::CoboEnvironment::Sandbox,
            base_url: base_url.to_string(),
            api_secret: secret.to_string(),
            timeout: std::time::Duration::from_secs(5),
        };
        Self::new(&config).expect("test client should build")
    }
}

/// Map a non-2xx vendor response onto [`CoboError::Api`].
fn api_error(status: u16, reason: Option<&str>, body: &str) -> CoboError {
    let parsed = serde_json::from_str::<VendorErrorBody>(body).ok();
    let (error_code, error_id, vendor_message) = match parsed {
        Some(b) => (b.error_code, b.error_id, b.error_message),
        None => (None, None, None),
    };

    let message = vendor_message
        .filter(|m| !m.trim().is_empty())
        .or_else(|| Some(body.trim().to_string()).filter(|b| !b.is_empty()))
        .or_else(|| reason.map(str::to_string))
        .unwrap_or_else(|| "unknown error".to_string());

    CoboError::Api {
        status,
        error_code,
        error_id,
        message,
    }
}

/// Encode a parameter struct as a query string.
///
/// Keys are emitted in sorted order and `null` values are dropped, so the
/// same parameters always produce the same (signed) string.
pub fn encode_query<Q>(params: &Q) -> Result<String, CoboError>
where
    Q: Serialize + ?Sized,
{
    let value = serde_json::to_value(params)
        .map_err(|e| CoboError::Encode(format!("serialize query failed: {e}")))?;

    let map = match value {
        Value::Object(map) => map,
        Value::Null => return Ok(String::new()),
        other => {
            return Err(CoboError::Encode(format!(
                "query parameters must be an object, got {other}"
            )))
        }
    };

    let mut pairs = BTreeMap::new();
    for (key, value) in map {
        let rendered = match value {
            Value::Null => continue,
            Value::String(s) => s,
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            Value::Array(_) | Value::Object(_) => {
                return Err(CoboError::Encode(format!(
                    "query parameter {key} must be a scalar"
                )))
            }
        };
        pairs.insert(key, rendered);
    }

    Ok(form_urlencoded::Serializer::new(String::new())
        .extend_pairs(&pairs)
        .finish())
}
