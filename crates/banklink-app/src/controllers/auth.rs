//! Login and registration; failures are shown inline on the form

use banklink_client::{ApiError, LoginRequest, RegisterRequest};
use banklink_core::validation::validate_registration;
use banklink_core::User;

use super::ControllerContext;
use crate::forms::{FormKind, FormPhase, LoginForm, PhaseTracker, RegisterForm, SubmitOutcome};

/// Store the profile and report success, or surface a storage failure inline
fn start_session(ctx: &ControllerContext, form: FormKind, user: &User) -> Result<String, String> {
    match ctx.session.begin(user) {
        Ok(()) => Ok(format!("Welcome, {}", user.display_name())),
        Err(e) => {
            log::error!("Could not store session: {}", e);
            let message = e.to_string();
            ctx.notifier.inline_error(form, &message);
            Err(message)
        }
    }
}

fn inline_failure(ctx: &ControllerContext, form: FormKind, error: &ApiError) -> String {
    let message = error.user_message();
    ctx.notifier.inline_error(form, &message);
    message
}

#[derive(Debug, Default)]
pub struct LoginController {
    pub form: LoginForm,
    phases: PhaseTracker,
}

impl LoginController {
    pub fn new(form: LoginForm) -> Self {
        Self {
            form,
            phases: PhaseTracker::default(),
        }
    }

    pub fn phases(&self) -> &PhaseTracker {
        &self.phases
    }

    pub async fn submit(&mut self, ctx: &ControllerContext) -> SubmitOutcome {
        self.phases.enter(FormPhase::Validating);
        self.phases.enter(FormPhase::Submitting);

        let request = LoginRequest {
            email: self.form.email.trim().to_string(),
            password: self.form.password.clone(),
        };
        let user = match ctx.api.login(&request).await {
            Ok(user) => user,
            Err(e) => {
                log::warn!("Login failed for {}: {}", request.email, e);
                let message = inline_failure(ctx, FormKind::Login, &e);
                self.phases.finish(FormPhase::Failed);
                return SubmitOutcome::Failed(message);
            }
        };

        match start_session(ctx, FormKind::Login, &user) {
            Ok(message) => {
                self.form.reset();
                self.phases.finish(FormPhase::Succeeded);
                SubmitOutcome::Succeeded(message)
            }
            Err(message) => {
                self.phases.finish(FormPhase::Failed);
                SubmitOutcome::Failed(message)
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct RegisterController {
    pub form: RegisterForm,
    phases: PhaseTracker,
}

impl RegisterController {
    pub fn new(form: RegisterForm) -> Self {
        Self {
            form,
            phases: PhaseTracker::default(),
        }
    }

    pub fn phases(&self) -> &PhaseTracker {
        &self.phases
    }

    pub async fn submit(&mut self, ctx: &ControllerContext) -> SubmitOutcome {
        self.phases.enter(FormPhase::Validating);
        let form = &self.form;
        if let Err(e) = validate_registration(&form.password, &form.confirm_password, &form.id_number) {
            let message = e.to_string();
            ctx.notifier.inline_error(FormKind::Register, &message);
            self.phases.finish(FormPhase::Invalid);
            return SubmitOutcome::Invalid(message);
        }

        self.phases.enter(FormPhase::Submitting);
        let request = RegisterRequest {
            name: form.name.trim().to_string(),
            surname: form.surname.trim().to_string(),
            id_number: form.id_number.clone(),
            email: form.email.trim().to_string(),
            password: form.password.clone(),
        };
        let user = match ctx.api.register(&request).await {
            Ok(user) => user,
            Err(e) => {
                log::warn!("Registration failed for {}: {}", request.email, e);
                let message = inline_failure(ctx, FormKind::Register, &e);
                self.phases.finish(FormPhase::Failed);
                return SubmitOutcome::Failed(message);
            }
        };

        match start_session(ctx, FormKind::Register, &user) {
            Ok(message) => {
                self.form.reset();
                self.phases.finish(FormPhase::Succeeded);
                SubmitOutcome::Succeeded(message)
            }
            Err(message) => {
                self.phases.finish(FormPhase::Failed);
                SubmitOutcome::Failed(message)
            }
        }
    }
}
