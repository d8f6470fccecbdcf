//! Dashboard rendering from the account cache

use banklink_core::AccountCache;
use banklink_utils::CurrencyFormat;
use std::fmt::Write as _;

/// Anything that shows balances; refreshed after every cache change
pub trait DashboardView: Send + Sync {
    fn refresh(&self, cache: &AccountCache);
}

/// Plain-text dashboard for the terminal
#[derive(Debug, Clone)]
pub struct ConsoleDashboard {
    currency: CurrencyFormat,
    /// Number of latest transactions listed under each account
    recent: usize,
}

impl ConsoleDashboard {
    pub fn new(currency: CurrencyFormat, recent: usize) -> Self {
        Self { currency, recent }
    }

    pub fn render(&self, cache: &AccountCache) -> String {
        if cache.is_empty() {
            return "No accounts.\n".to_string();
        }

        let mut out = String::new();
        for (id, account) in cache.iter() {
            let _ = writeln!(
                out,
                "{:<10} {:<24} {:>14}",
                id,
                account.name,
                self.currency.format(&account.balance)
            );
            let skip = account.transactions.len().saturating_sub(self.recent);
            for tx in account.transactions.iter().skip(skip).rev() {
                let _ = writeln!(
                    out,
                    "    {}  {:<18} {:>12}",
                    tx.date.format("%Y-%m-%d"),
                    tx.kind.label(),
                    self.currency.format(&tx.amount)
                );
            }
        }
        out
    }
}

impl Default for ConsoleDashboard {
    fn default() -> Self {
        Self::new(CurrencyFormat::default(), 3)
    }
}

impl DashboardView for ConsoleDashboard {
    fn refresh(&self, cache: &AccountCache) {
        print!("{}", self.render(cache));
    }
}
