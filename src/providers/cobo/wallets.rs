// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Wallet and address operations.

use serde::Serialize;
use serde_json::Value;

use super::{types::CreateAddressBody, CoboClient, CoboError};
use crate::models::{
    AddressValidityQuery, CreateAddressRequest, ListAddressesQuery, ListWalletsQuery,
    SupportedChainsQuery, SupportedTokensQuery, WalletBalanceQuery, WalletTransactionsQuery,
};

/// Wallet transaction filters with the wallet pinned as `wallet_ids`.
#[derive(Serialize)]
struct WalletScopedTransactions<'a> {
    wallet_ids: &'a str,
    #[serde(flatten)]
    filters: &'a WalletTransactionsQuery,
}

impl CoboClient {
    pub async fn list_wallets(&self, query: &ListWalletsQuery) -> Result<Value, CoboError> {
        self.get_json("list_wallets", &["wallets"], query).await
    }

    pub async fn get_wallet_by_id(&self, wallet_id: &str) -> Result<Value, CoboError> {
        self.get_json("get_wallet_by_id", &["wallets", wallet_id], &())
            .await
    }

    pub async fn get_wallet_balance(
        &self,
        wallet_id: &str,
        query: &WalletBalanceQuery,
    ) -> Result<Value, CoboError> {
        self.get_json(
            "list_token_balances_for_wallet",
            &["wallets", wallet_id, "tokens"],
            query,
        )
        .await
    }

    pub async fn get_wallet_transactions(
        &self,
        wallet_id: &str,
        query: &WalletTransactionsQuery,
    ) -> Result<Value, CoboError> {
        let params = WalletScopedTransactions {
            wallet_ids: wallet_id,
            filters: query,
        };
        self.get_json("list_transactions", &["transactions"], &params)
            .await
    }

    pub async fn create_address(
        &self,
        wallet_id: &str,
        request: &CreateAddressRequest,
    ) -> Result<Value, CoboError> {
        let body = CreateAddressBody {
            chain_id: &request.chain_id,
            count: request.count,
            encoding: request.encoding.as_deref(),
        };
        self.post_json("create_address", &["wallets", wallet_id, "addresses"], &body)
            .await
    }

    pub async fn list_wallet_addresses(
        &self,
        wallet_id: &str,
        query: &ListAddressesQuery,
    ) -> Result<Value, CoboError> {
        self.get_json(
            "list_addresses",
            &["wallets", wallet_id, "addresses"],
            query,
        )
        .await
    }

    pub async fn list_supported_chains(
        &self,
        query: &SupportedChainsQuery,
    ) -> Result<Value, CoboError> {
        self.get_json("list_supported_chains", &["wallets", "chains"], query)
            .await
    }

    pub async fn list_supported_tokens(
        &self,
        query: &SupportedTokensQuery,
    ) -> Result<Value, CoboError> {
        self.get_json("list_supported_tokens", &["wallets", "tokens"], query)
            .await
    }

    pub async fn check_address_validity(
        &self,
        query: &AddressValidityQuery,
    ) -> Result<Value, CoboError> {
        self.get_json(
            "check_address_validity",
            &["wallets", "check_address_validity"],
            query,
        )
        .await
    }
}
