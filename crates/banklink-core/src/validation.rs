//! Client-side input checks run before any request is sent.
//!
//! These mirror, and never replace, the backend's own validation. Balance
//! sufficiency is deliberately absent: the cached balance may be stale, so
//! the backend's answer is the only one that counts.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::types::MoneyOperation;

/// Required length of a national ID number
pub const ID_NUMBER_LENGTH: usize = 13;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{operation} amount must be positive.")]
    NonPositiveAmount { operation: MoneyOperation },

    #[error("Passwords do not match!")]
    PasswordMismatch,

    #[error("Please enter a valid 13-digit ID number")]
    InvalidIdNumber,
}

/// Parse a submitted amount, rejecting anything that is not a positive number
pub fn parse_positive_amount(
    operation: MoneyOperation,
    input: &str,
) -> Result<Decimal, ValidationError> {
    let trimmed = input.trim();
    let parsed = trimmed
        .parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok();

    match parsed {
        Some(amount) if amount > Decimal::ZERO => Ok(amount),
        _ => Err(ValidationError::NonPositiveAmount { operation }),
    }
}

/// Exactly thirteen ASCII digits
pub fn is_valid_id_number(id_number: &str) -> bool {
    id_number.len() == ID_NUMBER_LENGTH && id_number.bytes().all(|b| b.is_ascii_digit())
}

/// Registration checks, in the order the user sees them
pub fn validate_registration(
    password: &str,
    confirm_password: &str,
    id_number: &str,
) -> Result<(), ValidationError> {
    if password != confirm_password {
        return Err(ValidationError::PasswordMismatch);
    }
    if !is_valid_id_number(id_number) {
        return Err(ValidationError::InvalidIdNumber);
    }
    Ok(())
}
