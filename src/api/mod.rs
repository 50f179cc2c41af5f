// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    body::Body,
    http::Request,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    envelope::SuccessEnvelope,
    error::ErrorEnvelope,
    models::{
        CreateAddressRequest, CreateContractCallRequest, CreateMessageSignRequest,
        CreateTransferRequest, DepositAddressRequest, WalletSubtype, WalletType, WithdrawRequest,
    },
    state::AppState,
};

pub mod extract;
pub mod health;
pub mod transactions;
pub mod wallets;
pub mod webhook;

pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health))
        .route("/wallets", get(wallets::list_wallets))
        .route("/wallets/chains", get(wallets::list_supported_chains))
        .route("/wallets/tokens", get(wallets::list_supported_tokens))
        .route(
            "/wallets/check_address_validity",
            get(wallets::check_address_validity),
        )
        .route("/wallets/{wallet_id}", get(wallets::get_wallet))
        .route(
            "/wallets/{wallet_id}/balance",
            get(wallets::get_wallet_balance),
        )
        .route(
            "/wallets/{wallet_id}/transactions",
            get(wallets::get_wallet_transactions),
        )
        .route(
            "/wallets/{wallet_id}/addresses",
            get(wallets::list_wallet_addresses).post(wallets::create_wallet_address),
        )
        .route(
            "/wallets/{wallet_id}/deposit",
            post(wallets::deposit_to_wallet),
        )
        .route(
            "/wallets/{wallet_id}/withdraw",
            post(wallets::withdraw_from_wallet),
        )
        .route("/transactions", get(transactions::list_transactions))
        .route(
            "/transactions/transfer",
            post(transactions::create_transfer),
        )
        .route(
            "/transactions/contract_call",
            post(transactions::create_contract_call),
        )
        .route(
            "/transactions/message_sign",
            post(transactions::create_message_sign),
        )
        .route(
            "/transactions/{transaction_id}",
            get(transactions::get_transaction),
        )
        .route("/webhook", post(webhook::receive_webhook))
        .with_state(state.clone());

    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health))
        .with_state(state)
        .nest("/api", api_routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(
                    TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                        let request_id = request
                            .headers()
                            .get("x-request-id")
                            .and_then(|v| v.to_str().ok())
                            .unwrap_or_default();
                        tracing::info_span!(
                            "http_request",
                            method = %request.method(),
                            uri = %request.uri(),
                            request_id = %request_id,
                        )
                    }),
                )
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(CorsLayer::permissive()),
        )
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Cobo WaaS 2 Gateway",
        description = "REST gateway over the Cobo Wallet-as-a-Service 2.0 API"
    ),
    paths(
        health::root,
        health::health,
        wallets::list_wallets,
        wallets::get_wallet,
        wallets::get_wallet_balance,
        wallets::get_wallet_transactions,
        wallets::list_wallet_addresses,
        wallets::create_wallet_address,
        wallets::deposit_to_wallet,
        wallets::withdraw_from_wallet,
        wallets::list_supported_chains,
        wallets::list_supported_tokens,
        wallets::check_address_validity,
        transactions::list_transactions,
        transactions::get_transaction,
        transactions::create_transfer,
        transactions::create_contract_call,
        transactions::create_message_sign,
        webhook::receive_webhook
    ),
    components(
        schemas(
            SuccessEnvelope,
            ErrorEnvelope,
            WalletType,
            WalletSubtype,
            CreateAddressRequest,
            DepositAddressRequest,
            WithdrawRequest,
            CreateTransferRequest,
            CreateContractCallRequest,
            CreateMessageSignRequest,
            health::WelcomeResponse,
            health::HealthResponse
        )
    ),
    tags(
        (name = "Health", description = "Liveness and service info"),
        (name = "Wallets", description = "Wallets, balances and addresses"),
        (name = "Transactions", description = "Transaction queries and submission"),
        (name = "Webhook", description = "Cobo event callbacks")
    )
)]
pub struct ApiDoc;
