// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Cobo webhook event dispatch.
//!
//! Events are classified by their `type` field and logged. No event triggers
//! any action yet.

use serde_json::Value;
use tracing::{debug, info};

pub const TRANSACTION_CREATED: &str = "transaction.created";
pub const TRANSACTION_CONFIRMED: &str = "transaction.confirmed";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookEvent {
    TransactionCreated,
    TransactionConfirmed,
    /// Unrecognised or missing event type (empty string when absent).
    Other(String),
}

impl WebhookEvent {
    pub fn from_payload(payload: &Value) -> Self {
        match payload.get("type").and_then(Value::as_str) {
            Some(TRANSACTION_CREATED) => WebhookEvent::TransactionCreated,
            Some(TRANSACTION_CONFIRMED) => WebhookEvent::TransactionConfirmed,
            Some(other) => WebhookEvent::Other(other.to_string()),
            None => WebhookEvent::Other(String::new()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            WebhookEvent::TransactionCreated => TRANSACTION_CREATED,
            WebhookEvent::TransactionConfirmed => TRANSACTION_CONFIRMED,
            WebhookEvent::Other(raw) => raw,
        }
    }
}

/// Classify and log a webhook delivery.
pub fn dispatch(payload: &Value) -> WebhookEvent {
    let event = WebhookEvent::from_payload(payload);
    info!(event_type = %event.as_str(), "Handling webhook event");
    debug!(payload = %payload, "Webhook payload");

    match &event {
        WebhookEvent::TransactionCreated | WebhookEvent::TransactionConfirmed => {
            debug!(event_type = %event.as_str(), "No action registered for transaction event");
        }
        WebhookEvent::Other(_) => {
            debug!(event_type = %event.as_str(), "Ignoring unrecognised webhook event");
        }
    }

    event
}
