//! Daily-compounded interest growth and balance series.
//!
//! Rates are annual percentages (`4.5` means 4.5%). An absent or non-finite
//! rate is treated as 0%: the balance stays at the principal instead of the
//! calculation failing.

use serde::Serialize;

use super::rates::RateQuote;
use super::token::Direction;

const DAYS_PER_YEAR: f64 = 365.0;

/// One point of a balance-growth series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub day: u32,
    pub label: String,
    pub balance: f64,
}

/// Balance after `days` of daily compounding at `annual_rate_pct`.
pub fn compute_balance(principal: f64, annual_rate_pct: Option<f64>, days: u32) -> f64 {
    let rate = match annual_rate_pct {
        Some(r) if r.is_finite() => r,
        _ => return principal,
    };
    if days == 0 {
        return principal;
    }
    let daily_rate = rate / 100.0 / DAYS_PER_YEAR;
    principal * (1.0 + daily_rate).powf(f64::from(days))
}

/// Balance for every day from 0 through `days` inclusive.
pub fn build_series(principal: f64, annual_rate_pct: Option<f64>, days: u32) -> Vec<SeriesPoint> {
    (0..=days)
        .map(|day| SeriesPoint {
            day,
            label: format!("Day {}", day),
            balance: compute_balance(principal, annual_rate_pct, day),
        })
        .collect()
}

/// Convert a raw rate string into a rate.
///
/// The provider sentinels `--` and `Error`, blanks, and anything that is not
/// a finite number yield `None`.
pub fn parse_rate(raw: &str) -> Option<f64> {
    let trimmed = raw.trim().trim_end_matches('%').trim();
    if trimmed.is_empty() || trimmed == "--" || trimmed.eq_ignore_ascii_case("error") {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|r| r.is_finite())
}

/// Non-compounded interest over one year.
pub fn simple_yearly_interest(amount: f64, annual_rate_pct: f64) -> f64 {
    amount * (annual_rate_pct / 100.0)
}

/// Result of a single amount/days projection for one token.
#[derive(Debug, Clone, PartialEq)]
pub struct Forecast {
    pub symbol: String,
    pub direction: Direction,
    pub principal: f64,
    pub days: u32,
    pub rate: RateQuote,
    pub final_balance: f64,
    pub series: Vec<SeriesPoint>,
}

impl Forecast {
    pub fn compute(
        symbol: &str,
        direction: Direction,
        principal: f64,
        days: u32,
        rate: RateQuote,
    ) -> Self {
        let series = build_series(principal, Some(rate.percent), days);
        let final_balance = series
            .last()
            .map(|p| p.balance)
            .unwrap_or(principal);
        Forecast {
            symbol: symbol.to_string(),
            direction,
            principal,
            days,
            rate,
            final_balance,
            series,
        }
    }

    /// Interest earned (supply) or owed (borrow) over the period.
    pub fn interest(&self) -> f64 {
        self.final_balance - self.principal
    }
}
