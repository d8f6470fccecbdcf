//! Basic types shared by the models and controllers

use serde::{Deserialize, Serialize};

/// Transaction type label.
///
/// The backend uses a small open set of labels; anything unrecognised is
/// kept verbatim so it can still be displayed and exported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
    TransferIn,
    TransferOut,
    OpeningBalance,
    Other(String),
}

impl TransactionKind {
    /// Display label, e.g. "Transfer In"
    pub fn label(&self) -> &str {
        match self {
            TransactionKind::Deposit => "Deposit",
            TransactionKind::Withdrawal => "Withdrawal",
            TransactionKind::TransferIn => "Transfer In",
            TransactionKind::TransferOut => "Transfer Out",
            TransactionKind::OpeningBalance => "Opening Balance",
            TransactionKind::Other(label) => label,
        }
    }

    /// True for kinds that add money to the account
    pub fn is_credit(&self) -> bool {
        matches!(
            self,
            TransactionKind::Deposit | TransactionKind::TransferIn | TransactionKind::OpeningBalance
        )
    }
}

impl From<String> for TransactionKind {
    fn from(label: String) -> Self {
        // Accepts both "Transfer In" and the backend's TRANSFER_IN spelling
        let normalized: String = label
            .trim()
            .chars()
            .map(|c| if c == '_' || c == '-' { ' ' } else { c.to_ascii_lowercase() })
            .collect();
        match normalized.as_str() {
            "deposit" => TransactionKind::Deposit,
            "withdrawal" | "withdraw" => TransactionKind::Withdrawal,
            "transfer in" => TransactionKind::TransferIn,
            "transfer out" => TransactionKind::TransferOut,
            "opening balance" => TransactionKind::OpeningBalance,
            _ => TransactionKind::Other(label),
        }
    }
}

impl From<TransactionKind> for String {
    fn from(kind: TransactionKind) -> Self {
        match kind {
            TransactionKind::Other(label) => label,
            known => known.label().to_string(),
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Balance-changing operation a user can submit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoneyOperation {
    Deposit,
    Withdrawal,
    Transfer,
}

impl MoneyOperation {
    /// Lower-case noun used in generic failure messages
    pub fn noun(&self) -> &'static str {
        match self {
            MoneyOperation::Deposit => "deposit",
            MoneyOperation::Withdrawal => "withdrawal",
            MoneyOperation::Transfer => "transfer",
        }
    }
}

impl std::fmt::Display for MoneyOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MoneyOperation::Deposit => write!(f, "Deposit"),
            MoneyOperation::Withdrawal => write!(f, "Withdrawal"),
            MoneyOperation::Transfer => write!(f, "Transfer"),
        }
    }
}
