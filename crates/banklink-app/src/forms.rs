//! Form state and the per-submission phase machine

use std::fmt;

/// Form a message belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormKind {
    Login,
    Register,
    Deposit,
    Withdraw,
    Transfer,
    Statement,
}

impl fmt::Display for FormKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormKind::Login => write!(f, "login"),
            FormKind::Register => write!(f, "register"),
            FormKind::Deposit => write!(f, "deposit"),
            FormKind::Withdraw => write!(f, "withdraw"),
            FormKind::Transfer => write!(f, "transfer"),
            FormKind::Statement => write!(f, "statement"),
        }
    }
}

#[derive(Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginForm")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub name: String,
    pub surname: String,
    pub id_number: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterForm {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl fmt::Debug for RegisterForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterForm")
            .field("name", &self.name)
            .field("surname", &self.surname)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Deposit and withdraw share one shape
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AmountForm {
    pub account_id: String,
    /// Raw text as typed
    pub amount: String,
}

impl AmountForm {
    pub fn new(account_id: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            amount: amount.into(),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferForm {
    pub from_account_id: String,
    pub to_account_id: String,
    pub amount: String,
}

impl TransferForm {
    pub fn new(
        from_account_id: impl Into<String>,
        to_account_id: impl Into<String>,
        amount: impl Into<String>,
    ) -> Self {
        Self {
            from_account_id: from_account_id.into(),
            to_account_id: to_account_id.into(),
            amount: amount.into(),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Where a submission currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Idle,
    Validating,
    Invalid,
    Submitting,
    Succeeded,
    Failed,
}

/// Current phase plus every phase entered since the last `clear_history`
#[derive(Debug, Clone)]
pub struct PhaseTracker {
    current: FormPhase,
    history: Vec<FormPhase>,
}

impl Default for PhaseTracker {
    fn default() -> Self {
        Self {
            current: FormPhase::Idle,
            history: vec![FormPhase::Idle],
        }
    }
}

impl PhaseTracker {
    pub fn enter(&mut self, phase: FormPhase) {
        log::trace!("{:?} -> {:?}", self.current, phase);
        self.current = phase;
        self.history.push(phase);
    }

    pub fn phase(&self) -> FormPhase {
        self.current
    }

    pub fn history(&self) -> &[FormPhase] {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history = vec![self.current];
    }

    /// Enter a terminal phase and fall back to idle
    pub fn finish(&mut self, terminal: FormPhase) {
        self.enter(terminal);
        self.enter(FormPhase::Idle);
    }
}

/// Result of one submission, carrying the message the user saw
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Rejected locally, nothing was sent
    Invalid(String),
    /// Sent and refused, or not delivered
    Failed(String),
    Succeeded(String),
}

impl SubmitOutcome {
    pub fn message(&self) -> &str {
        match self {
            SubmitOutcome::Invalid(m) | SubmitOutcome::Failed(m) | SubmitOutcome::Succeeded(m) => m,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SubmitOutcome::Succeeded(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_history() {
        let mut phases = PhaseTracker::default();
        phases.enter(FormPhase::Validating);
        phases.finish(FormPhase::Invalid);
        assert_eq!(phases.phase(), FormPhase::Idle);
        assert_eq!(
            phases.history(),
            &[FormPhase::Idle, FormPhase::Validating, FormPhase::Invalid, FormPhase::Idle]
        );
        phases.clear_history();
        assert_eq!(phases.history(), &[FormPhase::Idle]);
    }

    #[test]
    fn test_reset_clears_fields() {
        let mut form = TransferForm::new("ACC001", "SAV001", "100");
        form.reset();
        assert_eq!(form, TransferForm::default());
    }

    #[test]
    fn test_passwords_stay_out_of_debug_output() {
        let form = LoginForm {
            email: "thandi@example.com".to_string(),
            password: "hunter2".to_string(),
        };
        assert!(!format!("{:?}", form).contains("hunter2"));
    }
}
