//! Core data models mirrored from the backend

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::types::TransactionKind;

/// Bank account snapshot as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Account identifier when the payload carries one (e.g., "ACC001")
    #[serde(default, alias = "accountId", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display name (e.g., "Cheque Account")
    #[serde(alias = "accountName")]
    pub name: String,
    /// Account holder's name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub holder: Option<String>,
    /// Balance as asserted by the backend
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
    /// History in chronological order
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

impl Account {
    /// Most recent transaction, if any
    pub fn latest_transaction(&self) -> Option<&Transaction> {
        self.transactions.last()
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    /// Holder name, or `fallback` when the backend sent none
    pub fn holder_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.holder
            .as_deref()
            .filter(|h| !h.trim().is_empty())
            .unwrap_or(fallback)
    }
}

/// Single balance-affecting event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Calendar date of the transaction
    #[serde(alias = "transactionDate", with = "calendar_date")]
    pub date: NaiveDate,
    /// Type label
    #[serde(rename = "type", alias = "transactionType")]
    pub kind: TransactionKind,
    /// Signed amount: positive credits, negative debits
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    /// Balance after this transaction
    #[serde(alias = "balanceAfter", with = "rust_decimal::serde::float")]
    pub balance: Decimal,
    /// Recipient account for outgoing transfers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_account: Option<String>,
    /// Source account for incoming transfers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_account: Option<String>,
}

impl Transaction {
    /// The other account of a transfer
    pub fn counterparty(&self) -> Option<&str> {
        self.to_account
            .as_deref()
            .or(self.from_account.as_deref())
    }

    pub fn is_credit(&self) -> bool {
        self.amount.is_sign_positive() && !self.amount.is_zero()
    }
}

/// Profile of the logged-in user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub surname: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<serde_json::Value>,
    /// Account summaries attached to login responses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accounts: Option<BTreeMap<String, AccountSummary>>,
}

impl User {
    /// Best available human-readable name
    pub fn display_name(&self) -> String {
        if let Some(full) = self.full_name.as_deref().filter(|n| !n.trim().is_empty()) {
            return full.to_string();
        }
        let joined = format!("{} {}", self.name, self.surname);
        let joined = joined.trim();
        if joined.is_empty() {
            self.email.clone()
        } else {
            joined.to_string()
        }
    }
}

/// Name and balance pair attached to a user profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountSummary {
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
}

/// Dates arrive either as `YYYY-MM-DD` or as a full local timestamp
mod calendar_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let day = raw.get(..10).unwrap_or(&raw);
        NaiveDate::parse_from_str(day, FORMAT).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_account_from_backend_json() {
        let account: Account = serde_json::from_value(json!({
            "name": "Cheque Account",
            "holder": "Thandi Nkosi",
            "balance": 1250.50,
            "transactions": [
                {"date": "2024-06-01", "type": "Opening Balance", "amount": 1000.00, "balance": 1000.00},
                {"date": "2024-06-02", "type": "Deposit", "amount": 250.50, "balance": 1250.50}
            ]
        }))
        .unwrap();

        assert_eq!(account.name, "Cheque Account");
        assert_eq!(account.balance, Decimal::new(125050, 2));
        assert_eq!(account.transaction_count(), 2);
        assert_eq!(account.latest_transaction().unwrap().kind, TransactionKind::Deposit);
        assert_eq!(account.holder_or("Bank-Link User"), "Thandi Nkosi");
    }

    #[test]
    fn test_account_accepts_backend_field_names() {
        let account: Account = serde_json::from_value(json!({
            "accountId": "SAV001",
            "accountName": "Savings Account",
            "balance": 10,
            "transactions": [
                {"transactionDate": "2024-06-01T09:30:00", "transactionType": "TRANSFER_OUT",
                 "amount": -5, "balanceAfter": 10, "toAccount": "ACC001"}
            ]
        }))
        .unwrap();

        assert_eq!(account.id.as_deref(), Some("SAV001"));
        assert_eq!(account.name, "Savings Account");
        assert_eq!(account.holder_or("Bank-Link User"), "Bank-Link User");
        let tx = &account.transactions[0];
        assert_eq!(tx.date, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(tx.kind, TransactionKind::TransferOut);
        assert_eq!(tx.counterparty(), Some("ACC001"));
        assert!(!tx.is_credit());
    }

    #[test]
    fn test_transaction_serializes_type_field() {
        let tx = Transaction {
            date: NaiveDate::from_ymd_opt(2024, 6, 2).unwrap(),
            kind: TransactionKind::TransferIn,
            amount: Decimal::new(100, 0),
            balance: Decimal::new(1100, 0),
            to_account: None,
            from_account: Some("ACC001".to_string()),
        };
        let value = serde_json::to_value(&tx).unwrap();
        assert_eq!(value["type"], "Transfer In");
        assert_eq!(value["date"], "2024-06-02");
        assert_eq!(value["fromAccount"], "ACC001");
        assert!(value.get("toAccount").is_none());
    }

    #[test]
    fn test_invalid_date_is_rejected() {
        let result: Result<Transaction, _> = serde_json::from_value(json!({
            "date": "yesterday", "type": "Deposit", "amount": 1, "balance": 1
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_user_display_name() {
        let user: User = serde_json::from_value(json!({
            "id": 7,
            "name": "Thandi",
            "surname": "Nkosi",
            "email": "thandi@example.com",
            "accounts": {"ACC001": {"name": "Cheque Account", "balance": 1000.0}}
        }))
        .unwrap();
        assert_eq!(user.display_name(), "Thandi Nkosi");
        assert_eq!(user.accounts.unwrap()["ACC001"].name, "Cheque Account");

        let user = User {
            full_name: Some("T. Nkosi".to_string()),
            ..serde_json::from_value(json!({"email": "t@example.com"})).unwrap()
        };
        assert_eq!(user.display_name(), "T. Nkosi");
    }
}
