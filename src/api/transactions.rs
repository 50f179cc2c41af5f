// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Transaction API endpoints.

use axum::extract::{Path, State};
use tracing::info;

use super::extract::{ApiJson, ApiQuery};
use crate::{
    envelope::{Envelope, SuccessEnvelope},
    error::{ApiError, ErrorEnvelope},
    models::{
        check_path_id, CreateContractCallRequest, CreateMessageSignRequest,
        CreateTransferRequest, ListTransactionsQuery, Validate,
    },
    providers::cobo::{ContractCallRequest, MessageSignRequest, TransferRequest},
    state::AppState,
};

/// List transactions across the organisation.
#[utoipa::path(
    get,
    path = "/api/transactions",
    tag = "Transactions",
    params(ListTransactionsQuery),
    responses(
        (status = 200, description = "Page of transactions", body = SuccessEnvelope),
        (status = 422, description = "Invalid filters", body = ErrorEnvelope),
        (status = 500, description = "Cobo request failed", body = ErrorEnvelope)
    )
)]
pub async fn list_transactions(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ListTransactionsQuery>,
) -> Result<Envelope, ApiError> {
    query.validate()?;
    let result = state.cobo.list_transactions(&query).await?;
    Ok(Envelope::success(result))
}

#[utoipa::path(
    get,
    path = "/api/transactions/{transaction_id}",
    tag = "Transactions",
    params(("transaction_id" = String, Path, description = "Cobo transaction ID")),
    responses(
        (status = 200, description = "Transaction details", body = SuccessEnvelope),
        (status = 422, description = "Invalid ID", body = ErrorEnvelope),
        (status = 500, description = "Cobo request failed", body = ErrorEnvelope)
    )
)]
pub async fn get_transaction(
    State(state): State<AppState>,
    Path(transaction_id): Path<String>,
) -> Result<Envelope, ApiError> {
    check_path_id("transaction_id", &transaction_id)?;
    let result = state.cobo.get_transaction_by_id(&transaction_id).await?;
    Ok(Envelope::success(result))
}

/// Submit a token transfer.
#[utoipa::path(
    post,
    path = "/api/transactions/transfer",
    tag = "Transactions",
    request_body = CreateTransferRequest,
    responses(
        (status = 200, description = "Transfer submitted", body = SuccessEnvelope),
        (status = 422, description = "Invalid request", body = ErrorEnvelope),
        (status = 500, description = "Cobo request failed", body = ErrorEnvelope)
    )
)]
pub async fn create_transfer(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateTransferRequest>,
) -> Result<Envelope, ApiError> {
    request.validate()?;
    info!(
        request_id = %request.request_id,
        wallet_id = %request.source_wallet_id,
        token_id = %request.token_id,
        "Submitting transfer"
    );

    let transfer = TransferRequest {
        request_id: &request.request_id,
        source_type: request.source_type.as_deref(),
        source_wallet_id: &request.source_wallet_id,
        source_address: Some(request.source_address.as_str()).filter(|a| !a.is_empty()),
        token_id: &request.token_id,
        destination_address: &request.destination_address,
        amount: &request.amount,
        memo: request.memo.as_deref(),
        utxo_outputs: request.utxo_outputs.as_deref(),
        fee_rate: request.fee_rate.as_deref(),
        max_fee: request.max_fee.as_deref(),
        fee_token_id: None,
        force_external: None,
        force_internal: None,
        note: request.note.as_deref(),
        extra_parameters: request.extra_parameters.as_ref(),
    };
    let result = state.cobo.create_transfer_transaction(transfer).await?;
    Ok(Envelope::success(result))
}

/// Submit a smart contract call.
#[utoipa::path(
    post,
    path = "/api/transactions/contract_call",
    tag = "Transactions",
    request_body = CreateContractCallRequest,
    responses(
        (status = 200, description = "Contract call submitted", body = SuccessEnvelope),
        (status = 422, description = "Invalid request", body = ErrorEnvelope),
        (status = 500, description = "Cobo request failed", body = ErrorEnvelope)
    )
)]
pub async fn create_contract_call(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateContractCallRequest>,
) -> Result<Envelope, ApiError> {
    request.validate()?;
    info!(
        request_id = %request.request_id,
        wallet_id = %request.source_wallet_id,
        chain_id = %request.chain_id,
        "Submitting contract call"
    );

    let call = ContractCallRequest {
        request_id: &request.request_id,
        chain_id: &request.chain_id,
        source_type: request.source_type.as_deref(),
        source_wallet_id: &request.source_wallet_id,
        source_address: &request.source_address,
        contract_address: &request.destination_address,
        value: &request.amount,
        calldata: &request.calldata,
        fee_rate: request.fee_rate.as_deref(),
        max_fee: request.max_fee.as_deref(),
        gas_limit: request.gas_limit,
        note: request.note.as_deref(),
        extra_parameters: request.extra_parameters.as_ref(),
    };
    let result = state.cobo.create_contract_call_transaction(call).await?;
    Ok(Envelope::success(result))
}

/// Request a message signature.
#[utoipa::path(
    post,
    path = "/api/transactions/message_sign",
    tag = "Transactions",
    request_body = CreateMessageSignRequest,
    responses(
        (status = 200, description = "Signature request submitted", body = SuccessEnvelope),
        (status = 422, description = "Invalid request", body = ErrorEnvelope),
        (status = 500, description = "Cobo request failed", body = ErrorEnvelope)
    )
)]
pub async fn create_message_sign(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateMessageSignRequest>,
) -> Result<Envelope, ApiError> {
    request.validate()?;
    info!(
        request_id = %request.request_id,
        wallet_id = %request.source_wallet_id,
        "Submitting message signature"
    );

    let sign = MessageSignRequest {
        request_id: &request.request_id,
        chain_id: request.chain_id.as_deref(),
        source_type: request.source_type.as_deref(),
        source_wallet_id: &request.source_wallet_id,
        source_address: &request.source_address,
        message: &request.message,
        note: request.note.as_deref(),
        extra_parameters: request.extra_parameters.as_ref(),
    };
    let result = state.cobo.create_message_sign_transaction(sign).await?;
    Ok(Envelope::success(result))
}
