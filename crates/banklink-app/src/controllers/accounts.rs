//! Page-load account fetch

use banklink_core::{AccountCache, CoreError};

use super::ControllerContext;
use crate::forms::SubmitOutcome;

pub const LOAD_FAILED_MESSAGE: &str = "Failed to load accounts. Please try again.";
pub const LOGIN_REQUIRED_MESSAGE: &str = "Please log in to continue.";

/// Rebuilds the cache from the backend
#[derive(Debug, Default)]
pub struct AccountsLoader;

impl AccountsLoader {
    /// Fetch every account; on failure the cache keeps its previous contents
    pub async fn load(&self, ctx: &ControllerContext, cache: &mut AccountCache) -> SubmitOutcome {
        match ctx.session.require_login() {
            Ok(Some(user)) => log::debug!("Loading accounts for {}", user.email),
            Ok(None) => log::debug!("Loading accounts without a cached profile"),
            Err(CoreError::Unauthorized) => {
                log::warn!("Dashboard requested without a session");
                ctx.notify_error(LOGIN_REQUIRED_MESSAGE);
                return SubmitOutcome::Failed(LOGIN_REQUIRED_MESSAGE.to_string());
            }
            // The flag is set; only the profile is unreadable
            Err(e) => log::warn!("{}", e.to_details()),
        }

        match ctx.api.fetch_accounts().await {
            Ok(accounts) => {
                let count = accounts.len();
                cache.replace_all(accounts);
                ctx.view.refresh(cache);
                log::info!("Loaded {} accounts", count);
                SubmitOutcome::Succeeded(format!("Loaded {} accounts", count))
            }
            Err(e) => {
                log::error!("Error fetching accounts: {}", e);
                ctx.notify_error(LOAD_FAILED_MESSAGE);
                SubmitOutcome::Failed(LOAD_FAILED_MESSAGE.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Harness;
    use banklink_core::session::{CURRENT_USER_KEY, LOGGED_IN_KEY};
    use banklink_core::{LocalStore, MemoryStore, SessionStore};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_load_replaces_cache_and_refreshes() {
        let h = Harness::logged_in();
        let mut cache = AccountCache::new();
        let outcome = AccountsLoader.load(&h.ctx, &mut cache).await;

        assert!(outcome.is_success());
        assert_eq!(cache.len(), 2);
        assert_eq!(h.view.refreshes(), 1);
        assert!(h.notifier.toasts().is_empty());
    }

    #[tokio::test]
    async fn test_failure_keeps_cache_and_toasts() {
        let h = Harness::logged_in();
        let mut cache = h.loaded_cache().await;
        h.bank.set_offline(true);

        let outcome = AccountsLoader.load(&h.ctx, &mut cache).await;
        assert_eq!(outcome, SubmitOutcome::Failed(LOAD_FAILED_MESSAGE.to_string()));
        assert_eq!(cache.len(), 2);
        assert_eq!(h.notifier.last_toast().unwrap().message, LOAD_FAILED_MESSAGE);
    }

    #[tokio::test]
    async fn test_requires_session() {
        let h = Harness::logged_out();
        let mut cache = AccountCache::new();
        let outcome = AccountsLoader.load(&h.ctx, &mut cache).await;

        assert_eq!(outcome.message(), LOGIN_REQUIRED_MESSAGE);
        assert_eq!(h.bank.calls(), 0);
        assert!(cache.is_empty());
        assert_eq!(h.notifier.last_toast().unwrap().message, LOGIN_REQUIRED_MESSAGE);
    }

    #[tokio::test]
    async fn test_corrupt_profile_still_loads() {
        let store = Arc::new(MemoryStore::new());
        store.set_item(LOGGED_IN_KEY, "true").unwrap();
        store.set_item(CURRENT_USER_KEY, "{not json").unwrap();
        let mut h = Harness::logged_out();
        h.ctx.session = SessionStore::new(store);

        let mut cache = AccountCache::new();
        let outcome = AccountsLoader.load(&h.ctx, &mut cache).await;
        assert!(outcome.is_success());
        assert_eq!(cache.len(), 2);
    }
}
