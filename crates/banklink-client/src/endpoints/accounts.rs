//! Account endpoints

use banklink_core::Account;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{ApiOperation, ApiResult};
use crate::transport::{decode, HttpTransport};

pub const ACCOUNTS_PATH: &str = "/accounts";
pub const DEPOSIT_PATH: &str = "/accounts/deposit";
pub const WITHDRAW_PATH: &str = "/accounts/withdraw";
pub const TRANSFER_PATH: &str = "/accounts/transfer";

/// Body of deposit and withdraw calls
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountAmountRequest {
    pub account_id: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub from_account_id: String,
    pub to_account_id: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

/// Both sides of a completed transfer, as the backend now holds them
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferResponse {
    pub from_account: Account,
    pub to_account: Account,
}

pub(crate) async fn fetch_accounts(
    transport: &HttpTransport,
) -> ApiResult<BTreeMap<String, Account>> {
    let response = transport
        .get(ApiOperation::FetchAccounts, ACCOUNTS_PATH)
        .await?;
    decode(ApiOperation::FetchAccounts, response)
}

pub(crate) async fn deposit(
    transport: &HttpTransport,
    request: &AccountAmountRequest,
) -> ApiResult<Account> {
    let response = transport
        .post_json(ApiOperation::Deposit, DEPOSIT_PATH, request)
        .await?;
    decode(ApiOperation::Deposit, response)
}

pub(crate) async fn withdraw(
    transport: &HttpTransport,
    request: &AccountAmountRequest,
) -> ApiResult<Account> {
    let response = transport
        .post_json(ApiOperation::Withdraw, WITHDRAW_PATH, request)
        .await?;
    decode(ApiOperation::Withdraw, response)
}

pub(crate) async fn transfer(
    transport: &HttpTransport,
    request: &TransferRequest,
) -> ApiResult<TransferResponse> {
    let response = transport
        .post_json(ApiOperation::Transfer, TRANSFER_PATH, request)
        .await?;
    decode(ApiOperation::Transfer, response)
}
