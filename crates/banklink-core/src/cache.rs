//! In-memory account state cache
//!
//! The cache mirrors what the backend last reported. It is rebuilt wholesale
//! when accounts are fetched and patched entry by entry from mutation
//! responses. Entries are always replaced whole; balances are never merged or
//! recomputed locally.

use std::collections::BTreeMap;

use crate::error::{CoreError, CoreResult};
use crate::models::Account;

/// Mapping from account identifier to the latest server snapshot
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccountCache {
    accounts: BTreeMap<String, Account>,
}

impl AccountCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the entire mapping
    pub fn replace_all<I>(&mut self, accounts: I)
    where
        I: IntoIterator<Item = (String, Account)>,
    {
        self.accounts = accounts.into_iter().collect();
        log::debug!("Account cache rebuilt with {} accounts", self.accounts.len());
    }

    /// Overwrite a single entry, returning the previous snapshot
    pub fn replace_one(&mut self, id: &str, account: Account) -> Option<Account> {
        log::debug!("Account cache entry {} replaced", id);
        self.accounts.insert(id.to_string(), account)
    }

    /// Overwrite both sides of a transfer in one step.
    ///
    /// When both ids are equal the `to` snapshot wins, matching the order
    /// the backend applies a self-transfer.
    pub fn replace_pair(&mut self, from_id: &str, from: Account, to_id: &str, to: Account) {
        self.accounts.insert(from_id.to_string(), from);
        self.accounts.insert(to_id.to_string(), to);
        log::debug!("Account cache entries {} and {} replaced", from_id, to_id);
    }

    /// Look up an account; unknown ids are an error
    pub fn get(&self, id: &str) -> CoreResult<&Account> {
        self.accounts
            .get(id)
            .ok_or_else(|| CoreError::AccountNotFound { id: id.to_string() })
    }

    pub fn contains(&self, id: &str) -> bool {
        self.accounts.contains_key(id)
    }

    /// Account identifiers in sorted order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.accounts.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Account)> {
        self.accounts.iter().map(|(id, account)| (id.as_str(), account))
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}
