// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Request body shapes sent to the Cobo WaaS 2 API.

use serde::Serialize;
use serde_json::{Map, Value};

pub const DEFAULT_SOURCE_TYPE: &str = "Org-Controlled";
pub const FIXED_FEE_TYPE: &str = "Fixed";
pub const ADDRESS_DESTINATION: &str = "Address";
pub const CONTRACT_DESTINATION: &str = "EVM_Contract";
pub const EIP191_DESTINATION: &str = "EVM_EIP_191_Signature";

#[derive(Debug, Serialize)]
pub struct CreateAddressBody<'a> {
    pub chain_id: &'a str,
    pub count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding: Option<&'a str>,
}

#[derive(Debug, Serialize)]
pub struct TransactionSource<'a> {
    pub source_type: &'a str,
    pub wallet_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<&'a str>,
}

#[derive(Debug, Serialize)]
pub struct TransactionFee<'a> {
    pub fee_type: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee_rate: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_fee_amount: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas_limit: Option<u64>,
}

impl<'a> TransactionFee<'a> {
    /// Fixed fee block, or `None` when no fee field was supplied.
    pub fn fixed(
        fee_rate: Option<&'a str>,
        max_fee_amount: Option<&'a str>,
        token_id: Option<&'a str>,
        gas_limit: Option<u64>,
    ) -> Option<Self> {
        if fee_rate.is_none() && max_fee_amount.is_none() && token_id.is_none() && gas_limit.is_none()
        {
            return None;
        }
        Some(Self {
            fee_type: FIXED_FEE_TYPE,
            fee_rate,
            max_fee_amount,
            token_id,
            gas_limit,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct AccountOutput<'a> {
    pub address: &'a str,
    pub amount: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo: Option<&'a str>,
}

#[derive(Debug, Serialize)]
pub struct TransferDestination<'a> {
    pub destination_type: &'static str,
    pub account_output: AccountOutput<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utxo_outputs: Option<&'a [Map<String, Value>]>,
}

#[derive(Debug, Serialize)]
pub struct TransferBody<'a> {
    pub request_id: &'a str,
    pub source: TransactionSource<'a>,
    pub token_id: &'a str,
    pub destination: TransferDestination<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee: Option<TransactionFee<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force_external: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force_internal: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct ContractDestination<'a> {
    pub destination_type: &'static str,
    pub address: &'a str,
    pub value: &'a str,
    pub calldata: &'a str,
}

#[derive(Debug, Serialize)]
pub struct ContractCallBody<'a> {
    pub request_id: &'a str,
    pub chain_id: &'a str,
    pub source: TransactionSource<'a>,
    pub destination: ContractDestination<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee: Option<TransactionFee<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
}

#[derive(Debug, Serialize)]
pub struct MessageSignDestination<'a> {
    pub destination_type: &'static str,
    pub message: &'a str,
}

#[derive(Debug, Serialize)]
pub struct MessageSignBody<'a> {
    pub request_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<&'a str>,
    pub source: TransactionSource<'a>,
    pub destination: MessageSignDestination<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
}

/// Serialize `body` and overlay caller-supplied top-level fields.
///
/// Extra parameters replace generated fields of the same name.
pub fn with_extra_parameters<T: Serialize>(
    body: &T,
    extra: Option<&Map<String, Value>>,
) -> Result<Value, serde_json::Error> {
    let mut value = serde_json::to_value(body)?;
    if let (Value::Object(target), Some(extra)) = (&mut value, extra) {
        for (key, field) in extra {
            target.insert(key.clone(), field.clone());
        }
    }
    Ok(value)
}
