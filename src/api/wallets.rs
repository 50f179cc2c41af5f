// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Wallet API endpoints.
//!
//! Each handler validates its input, makes one Cobo call and wraps the
//! result in the success envelope. Deposit and withdraw are convenience
//! shapes over address creation and transfer creation.

use axum::extract::{Path, State};
use tracing::info;
use uuid::Uuid;

use super::extract::{ApiJson, ApiQuery};
use crate::{
    envelope::{Envelope, SuccessEnvelope},
    error::{ApiError, ErrorEnvelope},
    models::{
        check_path_id, AddressValidityQuery, CreateAddressRequest, DepositAddressRequest,
        ListAddressesQuery, ListWalletsQuery, SupportedChainsQuery, SupportedTokensQuery, Validate,
        WalletBalanceQuery, WalletTransactionsQuery, WithdrawRequest,
    },
    providers::cobo::TransferRequest,
    state::AppState,
};

/// List wallets in the organisation.
#[utoipa::path(
    get,
    path = "/api/wallets",
    tag = "Wallets",
    params(ListWalletsQuery),
    responses(
        (status = 200, description = "Page of wallets", body = SuccessEnvelope),
        (status = 422, description = "Invalid filters", body = ErrorEnvelope),
        (status = 500, description = "Cobo request failed", body = ErrorEnvelope)
    )
)]
pub async fn list_wallets(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ListWalletsQuery>,
) -> Result<Envelope, ApiError> {
    query.validate()?;
    let result = state.cobo.list_wallets(&query).await?;
    Ok(Envelope::success(result))
}

#[utoipa::path(
    get,
    path = "/api/wallets/{wallet_id}",
    tag = "Wallets",
    params(("wallet_id" = String, Path, description = "Cobo wallet ID")),
    responses(
        (status = 200, description = "Wallet details", body = SuccessEnvelope),
        (status = 422, description = "Invalid ID", body = ErrorEnvelope),
        (status = 500, description = "Cobo request failed", body = ErrorEnvelope)
    )
)]
pub async fn get_wallet(
    State(state): State<AppState>,
    Path(wallet_id): Path<String>,
) -> Result<Envelope, ApiError> {
    check_path_id("wallet_id", &wallet_id)?;
    let result = state.cobo.get_wallet_by_id(&wallet_id).await?;
    Ok(Envelope::success(result))
}

/// Token balances held by a wallet.
#[utoipa::path(
    get,
    path = "/api/wallets/{wallet_id}/balance",
    tag = "Wallets",
    params(
        ("wallet_id" = String, Path, description = "Cobo wallet ID"),
        WalletBalanceQuery
    ),
    responses(
        (status = 200, description = "Page of token balances", body = SuccessEnvelope),
        (status = 422, description = "Invalid filters", body = ErrorEnvelope),
        (status = 500, description = "Cobo request failed", body = ErrorEnvelope)
    )
)]
pub async fn get_wallet_balance(
    State(state): State<AppState>,
    Path(wallet_id): Path<String>,
    ApiQuery(query): ApiQuery<WalletBalanceQuery>,
) -> Result<Envelope, ApiError> {
    check_path_id("wallet_id", &wallet_id)?;
    query.validate()?;
    let result = state.cobo.get_wallet_balance(&wallet_id, &query).await?;
    Ok(Envelope::success(result))
}

/// Transactions involving a wallet.
#[utoipa::path(
    get,
    path = "/api/wallets/{wallet_id}/transactions",
    tag = "Wallets",
    params(
        ("wallet_id" = String, Path, description = "Cobo wallet ID"),
        WalletTransactionsQuery
    ),
    responses(
        (status = 200, description = "Page of transactions", body = SuccessEnvelope),
        (status = 422, description = "Invalid filters", body = ErrorEnvelope),
        (status = 500, description = "Cobo request failed", body = ErrorEnvelope)
    )
)]
pub async fn get_wallet_transactions(
    State(state): State<AppState>,
    Path(wallet_id): Path<String>,
    ApiQuery(query): ApiQuery<WalletTransactionsQuery>,
) -> Result<Envelope, ApiError> {
    check_path_id("wallet_id", &wallet_id)?;
    query.validate()?;
    let result = state
        .cobo
        .get_wallet_transactions(&wallet_id, &query)
        .await?;
    Ok(Envelope::success(result))
}

#[utoipa::path(
    get,
    path = "/api/wallets/{wallet_id}/addresses",
    tag = "Wallets",
    params(
        ("wallet_id" = String, Path, description = "Cobo wallet ID"),
        ListAddressesQuery
    ),
    responses(
        (status = 200, description = "Page of addresses", body = SuccessEnvelope),
        (status = 422, description = "Invalid filters", body = ErrorEnvelope),
        (status = 500, description = "Cobo request failed", body = ErrorEnvelope)
    )
)]
pub async fn list_wallet_addresses(
    State(state): State<AppState>,
    Path(wallet_id): Path<String>,
    ApiQuery(query): ApiQuery<ListAddressesQuery>,
) -> Result<Envelope, ApiError> {
    check_path_id("wallet_id", &wallet_id)?;
    query.validate()?;
    let result = state.cobo.list_wallet_addresses(&wallet_id, &query).await?;
    Ok(Envelope::success(result))
}

/// Generate one or more addresses on a chain.
#[utoipa::path(
    post,
    path = "/api/wallets/{wallet_id}/addresses",
    tag = "Wallets",
    params(("wallet_id" = String, Path, description = "Cobo wallet ID")),
    request_body = CreateAddressRequest,
    responses(
        (status = 200, description = "Created addresses", body = SuccessEnvelope),
        (status = 422, description = "Invalid request", body = ErrorEnvelope),
        (status = 500, description = "Cobo request failed", body = ErrorEnvelope)
    )
)]
pub async fn create_wallet_address(
    State(state): State<AppState>,
    Path(wallet_id): Path<String>,
    ApiJson(request): ApiJson<CreateAddressRequest>,
) -> Result<Envelope, ApiError> {
    check_path_id("wallet_id", &wallet_id)?;
    request.validate()?;
    info!(
        wallet_id = %wallet_id,
        chain_id = %request.chain_id,
        count = request.count,
        "Creating wallet addresses"
    );
    let result = state.cobo.create_address(&wallet_id, &request).await?;
    Ok(Envelope::success(result))
}

/// Generate a single deposit address.
#[utoipa::path(
    post,
    path = "/api/wallets/{wallet_id}/deposit",
    tag = "Wallets",
    params(("wallet_id" = String, Path, description = "Cobo wallet ID")),
    request_body = DepositAddressRequest,
    responses(
        (status = 200, description = "Deposit address", body = SuccessEnvelope),
        (status = 422, description = "Invalid request", body = ErrorEnvelope),
        (status = 500, description = "Cobo request failed", body = ErrorEnvelope)
    )
)]
pub async fn deposit_to_wallet(
    State(state): State<AppState>,
    Path(wallet_id): Path<String>,
    ApiJson(request): ApiJson<DepositAddressRequest>,
) -> Result<Envelope, ApiError> {
    check_path_id("wallet_id", &wallet_id)?;
    request.validate()?;
    let request = CreateAddressRequest::from(request);
    info!(wallet_id = %wallet_id, chain_id = %request.chain_id, "Creating deposit address");
    let result = state.cobo.create_address(&wallet_id, &request).await?;
    Ok(Envelope::success(result))
}

/// Send tokens from a wallet to an external address.
///
/// A `request_id` is generated when the caller omits one, so retries that
/// need idempotency must supply their own.
#[utoipa::path(
    post,
    path = "/api/wallets/{wallet_id}/withdraw",
    tag = "Wallets",
    params(("wallet_id" = String, Path, description = "Cobo wallet ID")),
    request_body = WithdrawRequest,
    responses(
        (status = 200, description = "Transfer submitted", body = SuccessEnvelope),
        (status = 422, description = "Invalid request", body = ErrorEnvelope),
        (status = 500, description = "Cobo request failed", body = ErrorEnvelope)
    )
)]
pub async fn withdraw_from_wallet(
    State(state): State<AppState>,
    Path(wallet_id): Path<String>,
    ApiJson(request): ApiJson<WithdrawRequest>,
) -> Result<Envelope, ApiError> {
    check_path_id("wallet_id", &wallet_id)?;
    request.validate()?;
    let request_id = request
        .request_id
        .clone()
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    info!(
        wallet_id = %wallet_id,
        request_id = %request_id,
        token_id = %request.token,
        "Submitting withdrawal"
    );

    let transfer = TransferRequest {
        request_id: &request_id,
        source_type: None,
        source_wallet_id: &wallet_id,
        source_address: request.source_address.as_deref(),
        token_id: &request.token,
        destination_address: &request.address,
        amount: &request.amount,
        memo: request.memo.as_deref(),
        utxo_outputs: None,
        fee_rate: None,
        max_fee: request.fee_amount.as_deref(),
        fee_token_id: request.fee_token.as_deref(),
        force_external: request.force_external,
        force_internal: request.force_internal,
        note: None,
        extra_parameters: None,
    };
    let result = state.cobo.create_transfer_transaction(transfer).await?;
    Ok(Envelope::success(result))
}

/// Chains available to a wallet type.
#[utoipa::path(
    get,
    path = "/api/wallets/chains",
    tag = "Wallets",
    params(SupportedChainsQuery),
    responses(
        (status = 200, description = "Page of chains", body = SuccessEnvelope),
        (status = 422, description = "Invalid filters", body = ErrorEnvelope),
        (status = 500, description = "Cobo request failed", body = ErrorEnvelope)
    )
)]
pub async fn list_supported_chains(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<SupportedChainsQuery>,
) -> Result<Envelope, ApiError> {
    query.validate()?;
    let result = state.cobo.list_supported_chains(&query).await?;
    Ok(Envelope::success(result))
}

/// Tokens available to a wallet type.
#[utoipa::path(
    get,
    path = "/api/wallets/tokens",
    tag = "Wallets",
    params(SupportedTokensQuery),
    responses(
        (status = 200, description = "Page of tokens", body = SuccessEnvelope),
        (status = 422, description = "Invalid filters", body = ErrorEnvelope),
        (status = 500, description = "Cobo request failed", body = ErrorEnvelope)
    )
)]
pub async fn list_supported_tokens(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<SupportedTokensQuery>,
) -> Result<Envelope, ApiError> {
    query.validate()?;
    let result = state.cobo.list_supported_tokens(&query).await?;
    Ok(Envelope::success(result))
}

#[utoipa::path(
    get,
    path = "/api/wallets/check_address_validity",
    tag = "Wallets",
    params(AddressValidityQuery),
    responses(
        (status = 200, description = "Validity result", body = SuccessEnvelope),
        (status = 422, description = "Missing chain or address", body = ErrorEnvelope),
        (status = 500, description = "Cobo request failed", body = ErrorEnvelope)
    )
)]
pub async fn check_address_validity(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<AddressValidityQuery>,
) -> Result<Envelope, ApiError> {
    query.validate()?;
    let result = state.cobo.check_address_validity(&query).await?;
    Ok(Envelope::success(result))
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    use crate::test_support::{get, post_json, send, StubCobo};

    #[tokio::test]
    async fn list_wallets_forwards_filters_and_spreads_page() {
        let stub = StubCobo::spawn().await;
        let (status, body) = send(
            stub.app(),
            get("/api/wallets?wallet_type=MPC&wallet_subtype=Org-Controlled&limit=5"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "success");
        assert_eq!(body["data"][0]["path"], "/v2/wallets");
        assert_eq!(body["pagination"]["after"], "cursor-2");

        let request = stub.last_request();
        assert_eq!(request.method, Method::GET);
        assert_eq!(request.path, "/v2/wallets");
        assert_eq!(
            request.query,
            "limit=5&wallet_subtype=Org-Controlled&wallet_type=MPC"
        );
        request.assert_signed();
    }

    #[tokio::test]
    async fn list_wallets_applies_default_limit() {
        let stub = StubCobo::spawn().await;
        let (status, _) = send(stub.app(), get("/api/wallets")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(stub.last_request().query, "limit=10");
    }

    #[tokio::test]
    async fn out_of_range_limit_is_rejected_before_calling_cobo() {
        let stub = StubCobo::spawn().await;

        for uri in ["/api/wallets?limit=51", "/api/wallets?limit=0"] {
            let (status, body) = send(stub.app(), get(uri)).await;
            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{uri}");
            assert_eq!(body["status"], "error");
            assert!(body["message"].as_str().unwrap().contains("limit"));
        }
        assert!(stub.requests().is_empty());
    }

    #[tokio::test]
    async fn unknown_wallet_type_is_rejected() {
        let stub = StubCobo::spawn().await;
        let (status, body) = send(stub.app(), get("/api/wallets?wallet_type=Paper")).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["status"], "error");
        assert!(stub.requests().is_empty());
    }

    #[tokio::test]
    async fn single_wallet_is_wrapped_in_data() {
        let stub = StubCobo::spawn().await;
        let (status, body) = send(stub.app(), get("/api/wallets/w-1")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "status": "success",
                "data": { "id": "w-1", "path": "/v2/wallets/w-1" }
            })
        );
        assert_eq!(stub.last_request().query, "");
    }

    #[tokio::test]
    async fn static_wallet_routes_are_not_treated_as_ids() {
        let stub = StubCobo::spawn().await;

        send(stub.app(), get("/api/wallets/chains?wallet_type=Custodial")).await;
        let request = stub.last_request();
        assert_eq!(request.path, "/v2/wallets/chains");
        assert_eq!(request.query, "limit=10&wallet_type=Custodial");

        send(stub.app(), get("/api/wallets/tokens?chain_ids=ETH")).await;
        assert_eq!(stub.last_request().path, "/v2/wallets/tokens");
    }

    #[tokio::test]
    async fn balance_reads_wallet_tokens() {
        let stub = StubCobo::spawn().await;
        let (status, _) = send(
            stub.app(),
            get("/api/wallets/w-1/balance?token_ids=ETH_USDT"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let request = stub.last_request();
        assert_eq!(request.path, "/v2/wallets/w-1/tokens");
        assert_eq!(request.query, "limit=10&token_ids=ETH_USDT");
    }

    #[tokio::test]
    async fn wallet_transactions_pin_wallet_ids() {
        let stub = StubCobo::spawn().await;
        send(
            stub.app(),
            get("/api/wallets/w-1/transactions?statuses=Completed&limit=20"),
        )
        .await;

        let request = stub.last_request();
        assert_eq!(request.path, "/v2/transactions");
        assert_eq!(request.query, "limit=20&statuses=Completed&wallet_ids=w-1");
    }

    #[tokio::test]
    async fn create_address_posts_chain_and_count() {
        let stub = StubCobo::spawn().await;
        let (status, body) = send(
            stub.app(),
            post_json("/api/wallets/w-1/addresses", json!({ "chain_id": "ETH", "count": 2 })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"][0]["address"], "0xnew");

        let request = stub.last_request();
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.path, "/v2/wallets/w-1/addresses");
        assert_eq!(request.body_json(), json!({ "chain_id": "ETH", "count": 2 }));
        request.assert_signed();
    }

    #[tokio::test]
    async fn create_address_requires_chain_and_bounded_count() {
        let stub = StubCobo::spawn().await;

        let (status, _) = send(
            stub.app(),
            post_json("/api/wallets/w-1/addresses", json!({ "count": 2 })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (status, body) = send(
            stub.app(),
            post_json("/api/wallets/w-1/addresses", json!({ "chain_id": "ETH", "count": 51 })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["message"], "count must be between 1 and 50, got 51");

        assert!(stub.requests().is_empty());
    }

    #[tokio::test]
    async fn deposit_creates_one_address() {
        let stub = StubCobo::spawn().await;
        let (status, _) = send(
            stub.app(),
            post_json("/api/wallets/w-1/deposit", json!({ "chain_id": "BTC" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let request = stub.last_request();
        assert_eq!(request.path, "/v2/wallets/w-1/addresses");
        assert_eq!(request.body_json(), json!({ "chain_id": "BTC", "count": 1 }));
    }

    #[tokio::test]
    async fn withdraw_submits_transfer_with_generated_request_id() {
        let stub = StubCobo::spawn().await;
        let (status, body) = send(
            stub.app(),
            post_json(
                "/api/wallets/w-1/withdraw",
                json!({
                    "amount": 0.5,
                    "token": "ETH_USDT",
                    "address": "0xto",
                    "fee_amount": "0.01",
                    "fee_token": "ETH"
                }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["transaction_id"], "tx-1");

        let request = stub.last_request();
        assert_eq!(request.path, "/v2/transactions/transfer");
        let sent = request.body_json();
        assert!(uuid::Uuid::parse_str(sent["request_id"].as_str().unwrap()).is_ok());
        assert_eq!(sent["source"]["wallet_id"], "w-1");
        assert_eq!(sent["source"]["source_type"], "Org-Controlled");
        assert_eq!(sent["token_id"], "ETH_USDT");
        assert_eq!(
            sent["destination"]["account_output"],
            json!({ "address": "0xto", "amount": "0.5" })
        );
        assert_eq!(
            sent["fee"],
            json!({ "fee_type": "Fixed", "max_fee_amount": "0.01", "token_id": "ETH" })
        );
        request.assert_signed();
    }

    #[tokio::test]
    async fn withdraw_keeps_caller_request_id() {
        let stub = StubCobo::spawn().await;
        send(
            stub.app(),
            post_json(
                "/api/wallets/w-1/withdraw",
                json!({ "amount": "1", "token": "ETH", "address": "0xto", "request_id": "mine" }),
            ),
        )
        .await;

        assert_eq!(stub.last_request().body_json()["request_id"], "mine");
    }

    #[tokio::test]
    async fn withdraw_sends_exponent_amounts_as_plain_decimals() {
        let stub = StubCobo::spawn().await;

        for (amount, expected) in [
            (json!(1e-8), "0.00000001"),
            (json!(1e21), "1000000000000000000000"),
        ] {
            let (status, _) = send(
                stub.app(),
                post_json(
                    "/api/wallets/w-1/withdraw",
                    json!({ "amount": amount, "token": "BTC", "address": "bc1to" }),
                ),
            )
            .await;

            assert_eq!(status, StatusCode::OK);
            let sent = stub.last_request().body_json();
            assert_eq!(sent["destination"]["account_output"]["amount"], expected);
        }
    }

    #[tokio::test]
    async fn withdraw_leaves_amount_checks_to_cobo() {
        let stub = StubCobo::spawn().await;
        let (status, _) = send(
            stub.app(),
            post_json(
                "/api/wallets/w-1/withdraw",
                json!({ "amount": "0", "token": "ETH", "address": "0xto" }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            stub.last_request().body_json()["destination"]["account_output"]["amount"],
            "0"
        );
    }

    #[tokio::test]
    async fn dot_segment_wallet_ids_are_rejected() {
        let stub = StubCobo::spawn().await;

        for uri in [
            "/api/wallets/%2E%2E/balance",
            "/api/wallets/%2E%2E",
            "/api/wallets/%2E/transactions",
            "/api/wallets/%2e%2e/addresses",
        ] {
            let (status, body) = send(stub.app(), get(uri)).await;
            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{uri}");
            assert_eq!(body["status"], "error");
        }

        let (status, _) = send(
            stub.app(),
            post_json(
                "/api/wallets/%2E%2E/withdraw",
                json!({ "amount": "1", "token": "ETH", "address": "0xto" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        assert!(stub.requests().is_empty());
    }

    #[tokio::test]
    async fn address_validity_requires_both_parameters() {
        let stub = StubCobo::spawn().await;

        let (status, _) = send(
            stub.app(),
            get("/api/wallets/check_address_validity?chain_id=ETH"),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(stub.requests().is_empty());

        let (status, body) = send(
            stub.app(),
            get("/api/wallets/check_address_validity?chain_id=ETH&address=0xabc"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], json!({ "validity": true }));
        assert_eq!(stub.last_request().query, "address=0xabc&chain_id=ETH");
    }

    #[tokio::test]
    async fn cobo_errors_become_error_envelope() {
        let stub = StubCobo::spawn().await;
        let (status, body) = send(stub.app(), get("/api/wallets/missing")).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({
                "status": "error",
                "message": "Cobo API returned 404: Wallet not found"
            })
        );
    }
}
