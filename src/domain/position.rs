//! Supplied and borrowed asset positions.

use super::interest::{compute_balance, simple_yearly_interest};

#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub symbol: String,
    pub amount: f64,
    /// USD value: amount × unit price at the time of the action.
    pub value: f64,
    /// Annual percentage rate (supply APY or borrow APR).
    pub rate: f64,
    /// Interest earned (supplied) or owed (borrowed) so far.
    pub accrued: f64,
}

impl Position {
    pub fn new(symbol: impl Into<String>, amount: f64, unit_price: f64, rate: f64) -> Self {
        Position {
            symbol: symbol.into(),
            amount,
            value: amount * unit_price,
            rate,
            accrued: 0.0,
        }
    }

    /// Fold `other` into this position: amounts and values add up, the rate
    /// becomes the latest one, accrued interest is kept.
    pub fn merged_with(&self, other: &Position) -> Position {
        Position {
            symbol: self.symbol.clone(),
            amount: self.amount + other.amount,
            value: self.value + other.value,
            rate: other.rate,
            accrued: self.accrued,
        }
    }

    pub fn yearly_interest(&self) -> f64 {
        simple_yearly_interest(self.value, self.rate)
    }

    /// Interest on `value` after `days` of daily compounding, excluding
    /// what has already accrued.
    pub fn projected_interest(&self, days: u32) -> f64 {
        compute_balance(self.value, Some(self.rate), days) - self.value
    }
}
