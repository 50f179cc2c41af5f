// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Cobo WaaS Gateway - REST facade over the Cobo Wallet-as-a-Service 2 API
//!
//! Every endpoint validates its input, signs and forwards one call to Cobo,
//! and answers with a uniform `{"status": ...}` JSON envelope. The service
//! keeps no state of its own beyond the shared API client.
//!
//! ## Modules
//!
//! - `api` - HTTP handlers and router (Axum)
//! - `config` - Environment-driven configuration
//! - `providers::cobo` - Signed Cobo WaaS 2 client
//! - `webhook` - Cobo event classification

pub mod api;
pub mod config;
pub mod envelope;
pub mod error;
pub mod logging;
pub mod models;
pub mod providers;
pub mod state;
pub mod webhook;

#[cfg(test)]
mod test_support;
