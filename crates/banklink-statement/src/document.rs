//! Format-independent statement content

use banklink_config::StatementFormat;
use banklink_core::{Account, User};
use banklink_utils::CurrencyFormat;
use chrono::NaiveDate;

/// Date format used on statements and in file names
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Column headings shared by the PDF table and the CSV body
pub const COLUMNS: [&str; 4] = ["Date", "Transaction Type", "Amount", "Balance"];

/// One table row, already formatted for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementRow {
    pub date: String,
    pub kind: String,
    pub amount: String,
    pub balance: String,
}

impl StatementRow {
    pub fn cells(&self) -> [&str; 4] {
        [&self.date, &self.kind, &self.amount, &self.balance]
    }
}

/// Everything a renderer needs, detached from the cache
#[derive(Debug, Clone, PartialEq)]
pub struct StatementDocument {
    pub title: String,
    pub account_id: String,
    pub account_name: String,
    pub holder: String,
    pub generated_on: NaiveDate,
    pub rows: Vec<StatementRow>,
    pub ending_balance: String,
}

impl StatementDocument {
    pub fn build(
        title: &str,
        account_id: &str,
        account: &Account,
        holder: String,
        generated_on: NaiveDate,
        currency: &CurrencyFormat,
    ) -> Self {
        let rows = account
            .transactions
            .iter()
            .map(|tx| StatementRow {
                date: tx.date.format(DATE_FORMAT).to_string(),
                kind: tx.kind.to_string(),
                amount: currency.format(&tx.amount),
                balance: currency.format(&tx.balance),
            })
            .collect();

        Self {
            title: title.to_string(),
            account_id: account_id.to_string(),
            account_name: account.name.clone(),
            holder,
            generated_on,
            rows,
            ending_balance: currency.format(&account.balance),
        }
    }

    pub fn total_transactions(&self) -> usize {
        self.rows.len()
    }

    pub fn generated_on_text(&self) -> String {
        self.generated_on.format(DATE_FORMAT).to_string()
    }

    /// `<name> (<id>)`
    pub fn account_label(&self) -> String {
        format!("{} ({})", self.account_name, self.account_id)
    }

    pub fn file_name(&self, format: StatementFormat) -> String {
        statement_file_name(&self.account_id, self.generated_on, format)
    }
}

/// `Bank-Statement-<id>-<YYYY-MM-DD>.<ext>`
pub fn statement_file_name(account_id: &str, date: NaiveDate, format: StatementFormat) -> String {
    format!(
        "Bank-Statement-{}-{}.{}",
        account_id,
        date.format(DATE_FORMAT),
        format.extension()
    )
}

/// Account holder, then the session user's name, then `fallback`
pub fn resolve_holder(account: &Account, user: Option<&User>, fallback: &str) -> String {
    if let Some(holder) = account.holder.as_deref().filter(|h| !h.trim().is_empty()) {
        return holder.to_string();
    }
    user.map(User::display_name)
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string())
}
