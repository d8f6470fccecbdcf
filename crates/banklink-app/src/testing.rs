//! In-memory doubles shared by the controller tests

use async_trait::async_trait;
use banklink_client::{
    ApiError, ApiOperation, ApiResult, BankApi, LoginRequest, RegisterRequest, TransferRequest,
    TransferResponse,
};
use banklink_core::{Account, AccountCache, SessionStore, Transaction, TransactionKind, User};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::controllers::{AccountsLoader, ControllerContext};
use crate::forms::FormKind;
use crate::notify::{Notification, Notifier};
use crate::view::DashboardView;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
}

fn opening(name: &str, holder: Option<&str>, balance: i64) -> Account {
    let balance = Decimal::new(balance, 0);
    Account {
        id: None,
        name: name.to_string(),
        holder: holder.map(str::to_string),
        balance,
        transactions: vec![Transaction {
            date: day(1),
            kind: TransactionKind::OpeningBalance,
            amount: balance,
            balance,
            to_account: None,
            from_account: None,
        }],
    }
}

fn rejected(operation: ApiOperation, message: &str) -> ApiError {
    ApiError::Rejected {
        operation,
        status: 400,
        message: message.to_string(),
    }
}

pub fn thandi() -> User {
    User {
        id: Some(1),
        name: "Thandi".to_string(),
        surname: "Nkosi".to_string(),
        full_name: None,
        email: "thandi@example.com".to_string(),
        id_number: Some("9001015009087".to_string()),
        created_at: None,
        accounts: None,
    }
}

/// Backend double with a tiny ledger of its own
pub struct MockBank {
    accounts: Mutex<BTreeMap<String, Account>>,
    calls: AtomicUsize,
    offline: AtomicBool,
    timing_out: AtomicBool,
}

impl MockBank {
    pub fn new() -> Self {
        let mut accounts = BTreeMap::new();
        accounts.insert("ACC001".to_string(), opening("Cheque Account", None, 1000));
        accounts.insert("SAV001".to_string(), opening("Savings Account", Some("Thandi Nkosi"), 5000));
        Self {
            accounts: Mutex::new(accounts),
            calls: AtomicUsize::new(0),
            offline: AtomicBool::new(false),
            timing_out: AtomicBool::new(false),
        }
    }

    /// Number of calls that reached the backend
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn set_timing_out(&self, timing_out: bool) {
        self.timing_out.store(timing_out, Ordering::SeqCst);
    }

    fn enter(&self, operation: ApiOperation) -> ApiResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.offline.load(Ordering::SeqCst) {
            return Err(ApiError::Transport {
                operation,
                reason: "connection refused".to_string(),
            });
        }
        if self.timing_out.load(Ordering::SeqCst) {
            return Err(ApiError::Timeout {
                operation,
                timeout: Duration::from_secs(30),
            });
        }
        Ok(())
    }

    fn post(account: &mut Account, kind: TransactionKind, amount: Decimal, counterparty: Option<&str>) {
        account.balance += amount;
        let (to_account, from_account) = match kind {
            TransactionKind::TransferOut => (counterparty.map(str::to_string), None),
            TransactionKind::TransferIn => (None, counterparty.map(str::to_string)),
            _ => (None, None),
        };
        account.transactions.push(Transaction {
            date: day(3),
            kind,
            amount,
            balance: account.balance,
            to_account,
            from_account,
        });
    }
}

#[async_trait]
impl BankApi for MockBank {
    async fn login(&self, request: &LoginRequest) -> ApiResult<User> {
        self.enter(ApiOperation::Login)?;
        if request.email == "thandi@example.com" && request.password == "secret" {
            Ok(thandi())
        } else {
            Err(rejected(ApiOperation::Login, "Invalid email or password"))
        }
    }

    async fn register(&self, request: &RegisterRequest) -> ApiResult<User> {
        self.enter(ApiOperation::Register)?;
        if request.email == "thandi@example.com" {
            return Err(ApiError::Rejected {
                operation: ApiOperation::Register,
                status: 200,
                message: "Email already registered!".to_string(),
            });
        }
        Ok(User {
            id: Some(2),
            name: request.name.clone(),
            surname: request.surname.clone(),
            full_name: None,
            email: request.email.clone(),
            id_number: Some(request.id_number.clone()),
            created_at: None,
            accounts: None,
        })
    }

    async fn fetch_accounts(&self) -> ApiResult<BTreeMap<String, Account>> {
        self.enter(ApiOperation::FetchAccounts)?;
        Ok(self.accounts.lock().unwrap().clone())
    }

    async fn deposit(&self, account_id: &str, amount: Decimal) -> ApiResult<Account> {
        self.enter(ApiOperation::Deposit)?;
        let mut accounts = self.accounts.lock().unwrap();
        let account = accounts
            .get_mut(account_id)
            .ok_or_else(|| rejected(ApiOperation::Deposit, "Account not found."))?;
        Self::post(account, TransactionKind::Deposit, amount, None);
        Ok(account.clone())
    }

    async fn withdraw(&self, account_id: &str, amount: Decimal) -> ApiResult<Account> {
        self.enter(ApiOperation::Withdraw)?;
        let mut accounts = self.accounts.lock().unwrap();
        let account = accounts
            .get_mut(account_id)
            .ok_or_else(|| rejected(ApiOperation::Withdraw, "Account not found."))?;
        if account.balance < amount {
            return Err(rejected(ApiOperation::Withdraw, "Insufficient funds"));
        }
        Self::post(account, TransactionKind::Withdrawal, -amount, None);
        Ok(account.clone())
    }

    async fn transfer(&self, request: &TransferRequest) -> ApiResult<TransferResponse> {
        self.enter(ApiOperation::Transfer)?;
        let failed = || rejected(ApiOperation::Transfer, "Transfer failed. Check accounts and balance.");
        let mut accounts = self.accounts.lock().unwrap();
        if !accounts.contains_key(&request.to_account_id) {
            return Err(failed());
        }

        let from = accounts.get_mut(&request.from_account_id).ok_or_else(failed)?;
        if from.balance < request.amount {
            return Err(failed());
        }
        Self::post(from, TransactionKind::TransferOut, -request.amount, Some(&request.to_account_id));
        let from_account = from.clone();

        let to = accounts.get_mut(&request.to_account_id).ok_or_else(failed)?;
        Self::post(to, TransactionKind::TransferIn, request.amount, Some(&request.from_account_id));
        let to_account = to.clone();

        Ok(TransferResponse {
            from_account,
            to_account,
        })
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    toasts: Mutex<Vec<Notification>>,
    inline: Mutex<Vec<(FormKind, String)>>,
}

impl RecordingNotifier {
    pub fn toasts(&self) -> Vec<Notification> {
        self.toasts.lock().unwrap().clone()
    }

    pub fn last_toast(&self) -> Option<Notification> {
        self.toasts.lock().unwrap().last().cloned()
    }

    pub fn inline_errors(&self) -> Vec<(FormKind, String)> {
        self.inline.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn toast(&self, notification: Notification) {
        self.toasts.lock().unwrap().push(notification);
    }

    fn inline_error(&self, form: FormKind, message: &str) {
        self.inline.lock().unwrap().push((form, message.to_string()));
    }
}

#[derive(Default)]
pub struct RecordingView {
    refreshes: AtomicUsize,
}

impl RecordingView {
    pub fn refreshes(&self) -> usize {
        self.refreshes.load(Ordering::SeqCst)
    }
}

impl DashboardView for RecordingView {
    fn refresh(&self, _cache: &AccountCache) {
        self.refreshes.fetch_add(1, Ordering::SeqCst);
    }
}

/// Context wired to the doubles above
pub struct Harness {
    pub bank: Arc<MockBank>,
    pub notifier: Arc<RecordingNotifier>,
    pub view: Arc<RecordingView>,
    pub ctx: ControllerContext,
}

impl Harness {
    pub fn logged_out() -> Self {
        let bank = Arc::new(MockBank::new());
        let notifier = Arc::new(RecordingNotifier::default());
        let view = Arc::new(RecordingView::default());
        let ctx = ControllerContext::new(
            bank.clone(),
            notifier.clone(),
            view.clone(),
            SessionStore::in_memory(),
        );
        Self {
            bank,
            notifier,
            view,
            ctx,
        }
    }

    pub fn logged_in() -> Self {
        let harness = Self::logged_out();
        harness.ctx.session.begin(&thandi()).unwrap();
        harness
    }

    /// Cache as it looks after the dashboard loaded
    pub async fn loaded_cache(&self) -> AccountCache {
        let mut cache = AccountCache::new();
        assert!(AccountsLoader.load(&self.ctx, &mut cache).await.is_success());
        cache
    }
}
