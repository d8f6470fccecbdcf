//! One client session: the account cache plus the controllers acting on it

use banklink_config::{Config, StatementFormat};
use banklink_core::AccountCache;
use chrono::NaiveDate;

use crate::controllers::{
    AccountsLoader, AmountController, ControllerContext, LoginController, LogoutController,
    RegisterController, StatementController, TransferController,
};
use crate::forms::{AmountForm, LoginForm, RegisterForm, SubmitOutcome, TransferForm};

/// Owns the cache and lends it to one controller at a time.
///
/// Form controllers live as long as the app, so a form that failed keeps
/// its entered values until the next submission or a success resets it.
pub struct BankApp {
    ctx: ControllerContext,
    cache: AccountCache,
    login: LoginController,
    register: RegisterController,
    deposit: AmountController,
    withdrawal: AmountController,
    transfer: TransferController,
    statements: StatementController,
}

impl BankApp {
    pub fn new(ctx: ControllerContext, statements: StatementController) -> Self {
        Self {
            ctx,
            cache: AccountCache::new(),
            login: LoginController::default(),
            register: RegisterController::default(),
            deposit: AmountController::deposit(AmountForm::default()),
            withdrawal: AmountController::withdraw(AmountForm::default()),
            transfer: TransferController::default(),
            statements,
        }
    }

    pub fn from_config(ctx: ControllerContext, config: &Config) -> Self {
        Self::new(ctx.with_config(config), StatementController::from_config(config))
    }

    pub fn context(&self) -> &ControllerContext {
        &self.ctx
    }

    pub fn cache(&self) -> &AccountCache {
        &self.cache
    }

    pub fn login_form(&self) -> &LoginForm {
        &self.login.form
    }

    pub fn register_form(&self) -> &RegisterForm {
        &self.register.form
    }

    pub fn deposit_form(&self) -> &AmountForm {
        &self.deposit.form
    }

    pub fn withdraw_form(&self) -> &AmountForm {
        &self.withdrawal.form
    }

    pub fn transfer_form(&self) -> &TransferForm {
        &self.transfer.form
    }

    pub async fn login(&mut self, form: LoginForm) -> SubmitOutcome {
        self.login.form = form;
        self.login.submit(&self.ctx).await
    }

    pub async fn register(&mut self, form: RegisterForm) -> SubmitOutcome {
        self.register.form = form;
        self.register.submit(&self.ctx).await
    }

    pub fn logout(&mut self) -> SubmitOutcome {
        let outcome = LogoutController.logout(&self.ctx);
        if outcome.is_success() {
            self.cache = AccountCache::new();
        }
        outcome
    }

    /// Page load: gate on the session, then rebuild the cache
    pub async fn open_dashboard(&mut self) -> SubmitOutcome {
        AccountsLoader.load(&self.ctx, &mut self.cache).await
    }

    pub async fn deposit(&mut self, form: AmountForm) -> SubmitOutcome {
        self.deposit.form = form;
        self.deposit.submit(&self.ctx, &mut self.cache).await
    }

    pub async fn withdraw(&mut self, form: AmountForm) -> SubmitOutcome {
        self.withdrawal.form = form;
        self.withdrawal.submit(&self.ctx, &mut self.cache).await
    }

    pub async fn transfer(&mut self, form: TransferForm) -> SubmitOutcome {
        self.transfer.form = form;
        self.transfer.submit(&self.ctx, &mut self.cache).await
    }

    pub async fn download_statement(
        &self,
        account_id: &str,
        format: Option<StatementFormat>,
        today: NaiveDate,
    ) -> SubmitOutcome {
        self.statements
            .download(&self.ctx, &self.cache, account_id, format, today)
            .await
    }
}
