// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Query parameter and request body types accepted by the gateway. Query
//! structs serialize straight into the Cobo query string, so their field
//! names are the vendor's parameter names.
//!
//! ## Pagination
//!
//! Every list endpoint takes `limit` (1..=50, default 10) plus the opaque
//! `before` / `after` cursors returned by Cobo.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};
use utoipa::{IntoParams, ToSchema};

pub const DEFAULT_PAGE_LIMIT: u32 = 10;
pub const MAX_PAGE_LIMIT: u32 = 50;
pub const DEFAULT_ADDRESS_COUNT: u32 = 1;
pub const MAX_ADDRESS_COUNT: u32 = 50;

fn default_limit() -> u32 {
    DEFAULT_PAGE_LIMIT
}

fn default_count() -> u32 {
    DEFAULT_ADDRESS_COUNT
}

// =============================================================================
// Validation
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ValidationError(pub String);

/// Checks performed on a request after deserialization.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

fn check_range(name: &str, value: u32, max: u32) -> Result<(), ValidationError> {
    if value == 0 || value > max {
        return Err(ValidationError(format!(
            "{name} must be between 1 and {max}, got {value}"
        )));
    }
    Ok(())
}

fn check_limit(limit: u32) -> Result<(), ValidationError> {
    check_range("limit", limit, MAX_PAGE_LIMIT)
}

fn check_required(name: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError(format!("{name} is required")));
    }
    Ok(())
}

/// Reject path IDs that URL normalisation would collapse into another route.
pub fn check_path_id(name: &str, value: &str) -> Result<(), ValidationError> {
    if matches!(value, "" | "." | "..") {
        return Err(ValidationError(format!(
            "{name} is not a valid identifier: {value:?}"
        )));
    }
    Ok(())
}

// =============================================================================
// Amounts
// =============================================================================

/// Render a JSON number in plain decimal notation.
///
/// `serde_json` prints very small or very large floats with an exponent
/// (`1e-8`, `1e+21`); Cobo expects positional digits.
fn plain_decimal(number: &Number) -> String {
    let raw = number.to_string();
    let parsed = if raw.contains(['e', 'E']) {
        Decimal::from_scientific(&raw)
    } else {
        Decimal::from_str(&raw)
    };
    parsed.map(|d| d.normalize().to_string()).unwrap_or(raw)
}

/// Accept an amount given either as a JSON string or a JSON number.
fn amount_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s.trim().to_string()),
        Value::Number(n) => Ok(plain_decimal(&n)),
        other => Err(serde::de::Error::custom(format!(
            "expected a decimal string or number, got {other}"
        ))),
    }
}

fn optional_amount_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.trim().to_string())),
        Some(Value::Number(n)) => Ok(Some(plain_decimal(&n))),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected a decimal string or number, got {other}"
        ))),
    }
}

// =============================================================================
// Wallet Enums
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum WalletType {
    Custodial,
    #[serde(rename = "MPC")]
    Mpc,
    SmartContract,
    Exchange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum WalletSubtype {
    Asset,
    Web3,
    Main,
    Sub,
    #[serde(rename = "Org-Controlled")]
    OrgControlled,
    #[serde(rename = "User-Controlled")]
    UserControlled,
    #[serde(rename = "Safe{Wallet}")]
    SafeWallet,
}

// =============================================================================
// Wallet Queries
// =============================================================================

/// Filters for listing wallets.
#[derive(Debug, Clone, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListWalletsQuery {
    pub wallet_type: Option<WalletType>,
    pub wallet_subtype: Option<WalletSubtype>,
    pub project_id: Option<String>,
    pub vault_id: Option<String>,
    /// Page size (1-50)
    #[serde(default = "default_limit")]
    #[param(default = 10, minimum = 1, maximum = 50)]
    pub limit: u32,
    pub before: Option<String>,
    pub after: Option<String>,
}

impl Validate for ListWalletsQuery {
    fn validate(&self) -> Result<(), ValidationError> {
        check_limit(self.limit)
    }
}

/// Token balance listing for one wallet.
#[derive(Debug, Clone, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct WalletBalanceQuery {
    /// Comma-separated token IDs
    pub token_ids: Option<String>,
    #[serde(default = "default_limit")]
    #[param(default = 10, minimum = 1, maximum = 50)]
    pub limit: u32,
    pub before: Option<String>,
    pub after: Option<String>,
}

impl Validate for WalletBalanceQuery {
    fn validate(&self) -> Result<(), ValidationError> {
        check_limit(self.limit)
    }
}

/// Transaction history filters scoped to one wallet.
#[derive(Debug, Clone, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct WalletTransactionsQuery {
    pub types: Option<String>,
    pub statuses: Option<String>,
    pub chain_ids: Option<String>,
    pub token_ids: Option<String>,
    /// Unix time in milliseconds
    pub min_created_timestamp: Option<i64>,
    /// Unix time in milliseconds
    pub max_created_timestamp: Option<i64>,
    #[serde(default = "default_limit")]
    #[param(default = 10, minimum = 1, maximum = 50)]
    pub limit: u32,
    pub before: Option<String>,
    pub after: Option<String>,
}

impl Validate for WalletTransactionsQuery {
    fn validate(&self) -> Result<(), ValidationError> {
        check_limit(self.limit)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListAddressesQuery {
    pub chain_ids: Option<String>,
    pub addresses: Option<String>,
    #[serde(default = "default_limit")]
    #[param(default = 10, minimum = 1, maximum = 50)]
    pub limit: u32,
    pub before: Option<String>,
    pub after: Option<String>,
}

impl Validate for ListAddressesQuery {
    fn validate(&self) -> Result<(), ValidationError> {
        check_limit(self.limit)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SupportedChainsQuery {
    pub wallet_type: Option<WalletType>,
    pub wallet_subtype: Option<WalletSubtype>,
    pub chain_ids: Option<String>,
    pub token_list_id: Option<String>,
    #[serde(default = "default_limit")]
    #[param(default = 10, minimum = 1, maximum = 50)]
    pub limit: u32,
    pub before: Option<String>,
    pub after: Option<String>,
}

impl Validate for SupportedChainsQuery {
    fn validate(&self) -> Result<(), ValidationError> {
        check_limit(self.limit)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SupportedTokensQuery {
    pub wallet_type: Option<WalletType>,
    pub wallet_subtype: Option<WalletSubtype>,
    pub chain_ids: Option<String>,
    pub token_ids: Option<String>,
    #[serde(default = "default_limit")]
    #[param(default = 10, minimum = 1, maximum = 50)]
    pub limit: u32,
    pub before: Option<String>,
    pub after: Option<String>,
}

impl Validate for SupportedTokensQuery {
    fn validate(&self) -> Result<(), ValidationError> {
        check_limit(self.limit)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AddressValidityQuery {
    pub chain_id: String,
    pub address: String,
}

impl Validate for AddressValidityQuery {
    fn validate(&self) -> Result<(), ValidationError> {
        check_required("chain_id", &self.chain_id)?;
        check_required("address", &self.address)
    }
}

// =============================================================================
// Transaction Queries
// =============================================================================

/// Organisation-wide transaction filters.
#[derive(Debug, Clone, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListTransactionsQuery {
    pub request_id: Option<String>,
    pub cobo_ids: Option<String>,
    pub transaction_ids: Option<String>,
    pub transaction_hashes: Option<String>,
    pub types: Option<String>,
    pub statuses: Option<String>,
    pub wallet_ids: Option<String>,
    pub chain_ids: Option<String>,
    pub token_ids: Option<String>,
    pub asset_ids: Option<String>,
    pub vault_id: Option<String>,
    pub project_id: Option<String>,
    pub min_created_timestamp: Option<i64>,
    pub max_created_timestamp: Option<i64>,
    #[serde(default = "default_limit")]
    #[param(default = 10, minimum = 1, maximum = 50)]
    pub limit: u32,
    pub before: Option<String>,
    pub after: Option<String>,
}

impl Validate for ListTransactionsQuery {
    fn validate(&self) -> Result<(), ValidationError> {
        check_limit(self.limit)
    }
}

// =============================================================================
// Address Requests
// =============================================================================

/// Request to generate new addresses in a wallet.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateAddressRequest {
    pub chain_id: String,
    /// Number of addresses to create (1-50)
    #[serde(default = "default_count")]
    #[schema(default = 1, minimum = 1, maximum = 50)]
    pub count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,
}

impl Validate for CreateAddressRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        check_required("chain_id", &self.chain_id)?;
        check_range("count", self.count, MAX_ADDRESS_COUNT)
    }
}

/// Request a single deposit address on a chain.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct DepositAddressRequest {
    pub chain_id: String,
    pub encoding: Option<String>,
}

impl Validate for DepositAddressRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        check_required("chain_id", &self.chain_id)
    }
}

impl From<DepositAddressRequest> for CreateAddressRequest {
    fn from(request: DepositAddressRequest) -> Self {
        Self {
            chain_id: request.chain_id,
            count: 1,
            encoding: request.encoding,
        }
    }
}

// =============================================================================
// Transaction Requests
// =============================================================================

/// Simplified withdrawal from a wallet to an external address.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct WithdrawRequest {
    /// Amount as a decimal string or number
    #[serde(deserialize_with = "amount_string")]
    #[schema(value_type = String, example = "0.5")]
    pub amount: String,
    /// Cobo token ID, e.g. `ETH_USDT`
    pub token: String,
    /// Destination address
    pub address: String,
    /// Idempotency key; generated when omitted
    #[serde(default)]
    pub request_id: Option<String>,
    /// Source address within the wallet (MPC wallets)
    #[serde(default)]
    pub source_address: Option<String>,
    #[serde(default)]
    pub memo: Option<String>,
    #[serde(default, deserialize_with = "optional_amount_string")]
    #[schema(value_type = Option<String>)]
    pub fee_amount: Option<String>,
    #[serde(default)]
    pub fee_token: Option<String>,
    #[serde(default)]
    pub force_external: Option<bool>,
    #[serde(default)]
    pub force_internal: Option<bool>,
}

impl Validate for WithdrawRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        check_required("amount", &self.amount)?;
        check_required("token", &self.token)?;
        check_required("address", &self.address)
    }
}

/// Token transfer from a wallet address.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateTransferRequest {
    pub request_id: String,
    pub source_wallet_id: String,
    pub source_address: String,
    pub destination_address: String,
    pub token_id: String,
    #[serde(deserialize_with = "amount_string")]
    #[schema(value_type = String, example = "1.25")]
    pub amount: String,
    /// Wallet source type; `Org-Controlled` when omitted
    #[serde(default)]
    pub source_type: Option<String>,
    #[serde(default)]
    pub fee_rate: Option<String>,
    #[serde(default)]
    pub max_fee: Option<String>,
    /// UTXO outputs for multi-output BTC-style transfers
    #[serde(default)]
    #[schema(value_type = Option<Vec<Object>>)]
    pub utxo_outputs: Option<Vec<Map<String, Value>>>,
    #[serde(default)]
    pub memo: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    /// Extra fields merged into the Cobo request body
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub extra_parameters: Option<Map<String, Value>>,
}

impl Validate for CreateTransferRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        check_required("request_id", &self.request_id)?;
        check_required("source_wallet_id", &self.source_wallet_id)?;
        check_required("destination_address", &self.destination_address)?;
        check_required("token_id", &self.token_id)?;
        check_required("amount", &self.amount)
    }
}

/// Smart contract call from a wallet address.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateContractCallRequest {
    pub request_id: String,
    pub source_wallet_id: String,
    pub source_address: String,
    /// Contract address
    pub destination_address: String,
    /// Chain the contract lives on
    #[serde(alias = "token_id")]
    pub chain_id: String,
    /// Native value sent with the call
    #[serde(default = "zero_amount", deserialize_with = "amount_string")]
    #[schema(value_type = String, example = "0")]
    pub amount: String,
    /// Hex-encoded call data
    pub calldata: String,
    #[serde(default)]
    pub source_type: Option<String>,
    #[serde(default)]
    pub fee_rate: Option<String>,
    #[serde(default)]
    pub max_fee: Option<String>,
    #[serde(default)]
    pub gas_limit: Option<u64>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub extra_parameters: Option<Map<String, Value>>,
}

fn zero_amount() -> String {
    "0".to_string()
}

impl Validate for CreateContractCallRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        check_required("request_id", &self.request_id)?;
        check_required("source_wallet_id", &self.source_wallet_id)?;
        check_required("source_address", &self.source_address)?;
        check_required("destination_address", &self.destination_address)?;
        check_required("chain_id", &self.chain_id)?;
        check_required("calldata", &self.calldata)
    }
}

/// Message signature request.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateMessageSignRequest {
    pub request_id: String,
    pub source_wallet_id: String,
    pub source_address: String,
    pub message: String,
    #[serde(default)]
    pub chain_id: Option<String>,
    #[serde(default)]
    pub source_type: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub extra_parameters: Option<Map<String, Value>>,
}

impl Validate for CreateMessageSignRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        check_required("request_id", &self.request_id)?;
        check_required("source_wallet_id", &self.source_wallet_id)?;
        check_required("source_address", &self.source_address)?;
        check_required("message", &self.message)
    }
}
