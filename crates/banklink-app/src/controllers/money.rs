//! Deposit, withdrawal and transfer forms

use banklink_client::TransferRequest;
use banklink_core::validation::parse_positive_amount;
use banklink_core::{AccountCache, MoneyOperation};

use super::ControllerContext;
use crate::forms::{AmountForm, FormPhase, PhaseTracker, SubmitOutcome, TransferForm};

pub const SELECTED_ACCOUNT_NOT_FOUND: &str = "Selected account not found.";
pub const SOURCE_ACCOUNT_NOT_FOUND: &str = "Source account not found.";

/// Deposit or withdrawal against one account
#[derive(Debug)]
pub struct AmountController {
    operation: MoneyOperation,
    pub form: AmountForm,
    phases: PhaseTracker,
}

impl AmountController {
    pub fn deposit(form: AmountForm) -> Self {
        Self::new(MoneyOperation::Deposit, form)
    }

    pub fn withdraw(form: AmountForm) -> Self {
        Self::new(MoneyOperation::Withdrawal, form)
    }

    fn new(operation: MoneyOperation, form: AmountForm) -> Self {
        Self {
            operation,
            form,
            phases: PhaseTracker::default(),
        }
    }

    pub fn operation(&self) -> MoneyOperation {
        self.operation
    }

    pub fn phases(&self) -> &PhaseTracker {
        &self.phases
    }

    fn invalid(&mut self, ctx: &ControllerContext, message: String) -> SubmitOutcome {
        ctx.notify_error(message.clone());
        self.phases.finish(FormPhase::Invalid);
        SubmitOutcome::Invalid(message)
    }

    pub async fn submit(&mut self, ctx: &ControllerContext, cache: &mut AccountCache) -> SubmitOutcome {
        self.phases.enter(FormPhase::Validating);

        let amount = match parse_positive_amount(self.operation, &self.form.amount) {
            Ok(amount) => amount,
            Err(e) => return self.invalid(ctx, e.to_string()),
        };
        let account_id = self.form.account_id.trim().to_string();
        if !cache.contains(&account_id) {
            return self.invalid(ctx, SELECTED_ACCOUNT_NOT_FOUND.to_string());
        }

        self.phases.enter(FormPhase::Submitting);
        let result = match self.operation {
            MoneyOperation::Withdrawal => ctx.api.withdraw(&account_id, amount).await,
            _ => ctx.api.deposit(&account_id, amount).await,
        };

        match result {
            Ok(account) => {
                let amount_text = ctx.currency.format(&amount);
                let message = match self.operation {
                    MoneyOperation::Withdrawal => {
                        format!("Successfully withdrew {} from {}", amount_text, account.name)
                    }
                    _ => format!("Successfully deposited {} to {}", amount_text, account.name),
                };
                cache.replace_one(&account_id, account);
                ctx.view.refresh(cache);
                ctx.notify_success(message.clone());
                log::info!("{} of {} on {} completed", self.operation, amount, account_id);

                self.form.reset();
                self.phases.finish(FormPhase::Succeeded);
                SubmitOutcome::Succeeded(message)
            }
            Err(e) => {
                log::error!("{} error: {}", self.operation, e);
                let message = e.user_message();
                ctx.notify_error(message.clone());
                self.phases.finish(FormPhase::Failed);
                SubmitOutcome::Failed(message)
            }
        }
    }
}

/// Transfer between two accounts; only the source is checked locally
#[derive(Debug, Default)]
pub struct TransferController {
    pub form: TransferForm,
    phases: PhaseTracker,
}

impl TransferController {
    pub fn new(form: TransferForm) -> Self {
        Self {
            form,
            phases: PhaseTracker::default(),
        }
    }

    pub fn phases(&self) -> &PhaseTracker {
        &self.phases
    }

    fn invalid(&mut self, ctx: &ControllerContext, message: String) -> SubmitOutcome {
        ctx.notify_error(message.clone());
        self.phases.finish(FormPhase::Invalid);
        SubmitOutcome::Invalid(message)
    }

    pub async fn submit(&mut self, ctx: &ControllerContext, cache: &mut AccountCache) -> SubmitOutcome {
        self.phases.enter(FormPhase::Validating);

        let amount = match parse_positive_amount(MoneyOperation::Transfer, &self.form.amount) {
            Ok(amount) => amount,
            Err(e) => return self.invalid(ctx, e.to_string()),
        };
        let request = TransferRequest {
            from_account_id: self.form.from_account_id.trim().to_string(),
            to_account_id: self.form.to_account_id.trim().to_string(),
            amount,
        };
        if !cache.contains(&request.from_account_id) {
            return self.invalid(ctx, SOURCE_ACCOUNT_NOT_FOUND.to_string());
        }
        if request.from_account_id == request.to_account_id {
            log::debug!("Transfer to the same account {}, left to the backend", request.to_account_id);
        }

        self.phases.enter(FormPhase::Submitting);
        match ctx.api.transfer(&request).await {
            Ok(response) => {
                let message = format!(
                    "Successfully transferred {} to account {}",
                    ctx.currency.format(&amount),
                    request.to_account_id
                );
                cache.replace_pair(
                    &request.from_account_id,
                    response.from_account,
                    &request.to_account_id,
                    response.to_account,
                );
                ctx.view.refresh(cache);
                ctx.notify_success(message.clone());
                log::info!(
                    "Transfer of {} from {} to {} completed",
                    amount,
                    request.from_account_id,
                    request.to_account_id
                );

                self.form.reset();
                self.phases.finish(FormPhase::Succeeded);
                SubmitOutcome::Succeeded(message)
            }
            Err(e) => {
                log::error!("Transfer error: {}", e);
                let message = e.user_message();
                ctx.notify_error(message.clone());
                self.phases.finish(FormPhase::Failed);
                SubmitOutcome::Failed(message)
            }
        }
    }
}
