// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::body::Bytes;
use serde_json::Value;

use crate::{
    envelope::{Envelope, SuccessEnvelope},
    error::{ApiError, ErrorEnvelope},
    webhook,
};

/// Receive a Cobo event callback.
///
/// Any JSON document is accepted and acknowledged. Events are logged but not
/// acted on.
#[utoipa::path(
    post,
    path = "/api/webhook",
    tag = "Webhook",
    request_body(content = Object, description = "Cobo event payload"),
    responses(
        (status = 200, description = "Event acknowledged", body = SuccessEnvelope),
        (status = 422, description = "Body is not JSON", body = ErrorEnvelope)
    )
)]
pub async fn receive_webhook(body: Bytes) -> Result<Envelope, ApiError> {
    let payload: Value = serde_json::from_slice(&body)
        .map_err(|e| ApiError::unprocessable(format!("webhook body is not valid JSON: {e}")))?;
    webhook::dispatch(&payload);
    Ok(Envelope::success(Value::Null))
}
