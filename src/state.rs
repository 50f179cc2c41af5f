// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::{config::CoboEnvironment, providers::cobo::CoboClient};

/// Shared handler state. The Cobo client is created once and reused.
#[derive(Clone)]
pub struct AppState {
    pub cobo: Arc<CoboClient>,
    pub environment: CoboEnvironment,
}

impl AppState {
    pub fn new(cobo: CoboClient, environment: CoboEnvironment) -> Self {
        Self {
            cobo: Arc::new(cobo),
            environment,
        }
    }
}
