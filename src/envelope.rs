// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Success envelope wrapping every vendor result.
//!
//! - Vendor object with a `data` key (paginated lists):
//!   `{"status": "success", "data": [...], "pagination": {...}}`
//! - Anything else: `{"status": "success", "data": <result>}`

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{Map, Value};
use utoipa::ToSchema;

pub const SUCCESS: &str = "success";

#[derive(Debug, Clone, PartialEq)]
pub struct Envelope(Value);

/// Documentation-only shape of a success response.
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct SuccessEnvelope {
    /// Always `success`
    #[schema(example = "success")]
    status: String,
    /// Vendor payload
    #[schema(value_type = Object)]
    data: Value,
}

impl Envelope {
    pub fn success(result: Value) -> Self {
        let body = match result {
            Value::Object(fields) if fields.contains_key("data") => {
                let mut body = Map::new();
                body.insert("status".to_string(), Value::String(SUCCESS.to_string()));
                body.extend(fields);
                body
            }
            other => {
                let mut body = Map::new();
                body.insert("status".to_string(), Value::String(SUCCESS.to_string()));
                body.insert("data".to_string(), other);
                body
            }
        };
        Self(Value::Object(body))
    }

    pub fn into_inner(self) -> Value {
        self.0
    }
}

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self.0)).into_response()
    }
}
