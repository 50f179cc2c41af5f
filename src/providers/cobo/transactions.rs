// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Transaction queries and transaction creation.

use serde_json::{Map, Value};

use super::{
    types::{
        with_extra_parameters, AccountOutput, ContractCallBody, ContractDestination,
        MessageSignBody, MessageSignDestination, TransactionFee, TransactionSource, TransferBody,
        TransferDestination, ADDRESS_DESTINATION, CONTRACT_DESTINATION, DEFAULT_SOURCE_TYPE,
        EIP191_DESTINATION,
    },
    CoboClient, CoboError,
};
use crate::models::ListTransactionsQuery;

/// Token transfer to a single address.
pub struct TransferRequest<'a> {
    pub request_id: &'a str,
    pub source_type: Option<&'a str>,
    pub source_wallet_id: &'a str,
    pub source_address: Option<&'a str>,
    pub token_id: &'a str,
    pub destination_address: &'a str,
    pub amount: &'a str,
    pub memo: Option<&'a str>,
    pub utxo_outputs: Option<&'a [Map<String, Value>]>,
    pub fee_rate: Option<&'a str>,
    pub max_fee: Option<&'a str>,
    pub fee_token_id: Option<&'a str>,
    pub force_external: Option<bool>,
    pub force_internal: Option<bool>,
    pub note: Option<&'a str>,
    pub extra_parameters: Option<&'a Map<String, Value>>,
}

pub struct ContractCallRequest<'a> {
    pub request_id: &'a str,
    pub chain_id: &'a str,
    pub source_type: Option<&'a str>,
    pub source_wallet_id: &'a str,
    pub source_address: &'a str,
    pub contract_address: &'a str,
    pub value: &'a str,
    pub calldata: &'a str,
    pub fee_rate: Option<&'a str>,
    pub max_fee: Option<&'a str>,
    pub gas_limit: Option<u64>,
    pub note: Option<&'a str>,
    pub extra_parameters: Option<&'a Map<String, Value>>,
}

pub struct MessageSignRequest<'a> {
    pub request_id: &'a str,
    pub chain_id: Option<&'a str>,
    pub source_type: Option<&'a str>,
    pub source_wallet_id: &'a str,
    pub source_address: &'a str,
    pub message: &'a str,
    pub note: Option<&'a str>,
    pub extra_parameters: Option<&'a Map<String, Value>>,
}

impl TransferRequest<'_> {
    fn body(&self) -> Result<Value, CoboError> {
        let body = TransferBody {
            request_id: self.request_id,
            source: TransactionSource {
                source_type: self.source_type.unwrap_or(DEFAULT_SOURCE_TYPE),
                wallet_id: self.source_wallet_id,
                address: self.source_address,
            },
            token_id: self.token_id,
            destination: TransferDestination {
                destination_type: ADDRESS_DESTINATION,
                account_output: AccountOutput {
                    address: self.destination_address,
                    amount: self.amount,
                    memo: self.memo,
                },
                utxo_outputs: self.utxo_outputs,
            },
            fee: TransactionFee::fixed(self.fee_rate, self.max_fee, self.fee_token_id, None),
            description: self.note,
            force_external: self.force_external,
            force_internal: self.force_internal,
        };
        encode_body(&body, self.extra_parameters)
    }
}

impl ContractCallRequest<'_> {
    fn body(&self) -> Result<Value, CoboError> {
        let body = ContractCallBody {
            request_id: self.request_id,
            chain_id: self.chain_id,
            source: TransactionSource {
                source_type: self.source_type.unwrap_or(DEFAULT_SOURCE_TYPE),
                wallet_id: self.source_wallet_id,
                address: Some(self.source_address),
            },
            destination: ContractDestination {
                destination_type: CONTRACT_DESTINATION,
                address: self.contract_address,
                value: self.value,
                calldata: self.calldata,
            },
            fee: TransactionFee::fixed(self.fee_rate, self.max_fee, None, self.gas_limit),
            description: self.note,
        };
        encode_body(&body, self.extra_parameters)
    }
}

impl MessageSignRequest<'_> {
    fn body(&self) -> Result<Value, CoboError> {
        let body = MessageSignBody {
            request_id: self.request_id,
            chain_id: self.chain_id,
            source: TransactionSource {
                source_type: self.source_type.unwrap_or(DEFAULT_SOURCE_TYPE),
                wallet_id: self.source_wallet_id,
                address: Some(self.source_address),
            },
            destination: MessageSignDestination {
                destination_type: EIP191_DESTINATION,
                message: self.message,
            },
            description: self.note,
        };
        encode_body(&body, self.extra_parameters)
    }
}

fn encode_body<T: serde::Serialize>(
    body: &T,
    extra: Option<&Map<String, Value>>,
) -> Result<Value, CoboError> {
    with_extra_parameters(body, extra)
        .map_err(|e| CoboError::Encode(format!("serialize body failed: {e}")))
}

impl CoboClient {
    pub async fn list_transactions(
        &self,
        query: &ListTransactionsQuery,
    ) -> Result<Value, CoboError> {
        self.get_json("list_transactions", &["transactions"], query)
            .await
    }

    pub async fn get_transaction_by_id(&self, transaction_id: &str) -> Result<Value, CoboError> {
        self.get_json(
            "get_transaction_by_id",
            &["transactions", transaction_id],
            &(),
        )
        .await
    }

    pub async fn create_transfer_transaction(
        &self,
        request: TransferRequest<'_>,
    ) -> Result<Value, CoboError> {
        let body = request.body()?;
        self.post_json(
            "create_transfer_transaction",
            &["transactions", "transfer"],
            &body,
        )
        .await
    }

    pub async fn create_contract_call_transaction(
        &self,
        request: ContractCallRequest<'_>,
    ) -> Result<Value, CoboError> {
        let body = request.body()?;
        self.post_json(
            "create_contract_call_transaction",
            &["transactions", "contract_call"],
            &body,
        )
        .await
    }

    pub async fn create_message_sign_transaction(
        &self,
        request: MessageSignRequest<'_>,
    ) -> Result<Value, CoboError> {
        let body = request.body()?;
        self.post_json(
            "create_message_sign_transaction",
            &["transactions", "message_sign"],
            &body,
        )
        .await
    }
}
