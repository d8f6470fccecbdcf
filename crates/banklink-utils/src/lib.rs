//! Utility functions and helpers
//!
//! Currency formatting lives here so the dashboard, notifications and both
//! statement exporters render amounts identically.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Symbol prefixed to every rendered amount by default
pub const DEFAULT_CURRENCY_SYMBOL: &str = "R";

/// Decimal places rendered by default
pub const DEFAULT_DECIMAL_PLACES: u32 = 2;

/// Anything that may or may not hold a monetary amount.
///
/// Conversions never fail loudly: values that are absent, `NaN`, infinite
/// or not numeric yield `None` and format as zero.
pub trait MoneyValue {
    /// Numeric value, ignoring a leading `symbol` on textual input
    fn to_amount(&self, symbol: &str) -> Option<Decimal>;
}

impl MoneyValue for Decimal {
    fn to_amount(&self, _symbol: &str) -> Option<Decimal> {
        Some(*self)
    }
}

impl MoneyValue for f64 {
    fn to_amount(&self, _symbol: &str) -> Option<Decimal> {
        if self.is_finite() {
            Decimal::from_f64(*self)
        } else {
            None
        }
    }
}

impl MoneyValue for i64 {
    fn to_amount(&self, _symbol: &str) -> Option<Decimal> {
        Some(Decimal::from(*self))
    }
}

impl MoneyValue for i32 {
    fn to_amount(&self, _symbol: &str) -> Option<Decimal> {
        Some(Decimal::from(*self))
    }
}

impl MoneyValue for str {
    fn to_amount(&self, symbol: &str) -> Option<Decimal> {
        parse_amount_text(self, symbol)
    }
}

impl MoneyValue for String {
    fn to_amount(&self, symbol: &str) -> Option<Decimal> {
        parse_amount_text(self, symbol)
    }
}

impl<T: MoneyValue> MoneyValue for Option<T> {
    fn to_amount(&self, symbol: &str) -> Option<Decimal> {
        self.as_ref().and_then(|value| value.to_amount(symbol))
    }
}

impl<T: MoneyValue + ?Sized> MoneyValue for &T {
    fn to_amount(&self, symbol: &str) -> Option<Decimal> {
        (**self).to_amount(symbol)
    }
}

impl MoneyValue for serde_json::Value {
    fn to_amount(&self, symbol: &str) -> Option<Decimal> {
        match self {
            serde_json::Value::Number(n) => parse_amount_text(&n.to_string(), symbol),
            serde_json::Value::String(s) => parse_amount_text(s, symbol),
            _ => None,
        }
    }
}

/// Parse a user- or server-supplied amount string.
///
/// Accepts plain decimals (`"12.5"`), scientific notation (`"1e3"`) and
/// text already prefixed with `symbol` (`"R12.50"`).
pub fn parse_amount_text(text: &str, symbol: &str) -> Option<Decimal> {
    let trimmed = text.trim();
    let unprefixed = if symbol.is_empty() {
        trimmed
    } else {
        trimmed.strip_prefix(symbol).unwrap_or(trimmed).trim_start()
    };
    if unprefixed.is_empty() {
        return None;
    }

    Decimal::from_str(unprefixed)
        .or_else(|_| Decimal::from_scientific(unprefixed))
        .ok()
}

/// Currency rendering rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyFormat {
    pub symbol: String,
    pub decimal_places: u32,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self {
            symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            decimal_places: DEFAULT_DECIMAL_PLACES,
        }
    }
}

impl CurrencyFormat {
    pub fn new(symbol: impl Into<String>, decimal_places: u32) -> Self {
        Self {
            symbol: symbol.into(),
            decimal_places,
        }
    }

    /// Render an amount; anything non-numeric renders as zero
    pub fn format<T: MoneyValue + ?Sized>(&self, amount: &T) -> String {
        let value = amount.to_amount(&self.symbol).unwrap_or(Decimal::ZERO);
        let mut rounded =
            value.round_dp_with_strategy(self.decimal_places, RoundingStrategy::MidpointAwayFromZero);
        if rounded.is_zero() {
            rounded.set_sign_positive(true);
        }
        format!(
            "{}{:.*}",
            self.symbol,
            self.decimal_places as usize,
            rounded
        )
    }
}

/// Render an amount with the default `R` symbol and two decimals
pub fn format_currency<T: MoneyValue + ?Sized>(amount: &T) -> String {
    CurrencyFormat::default().format(amount)
}
