//! Simulated lending portfolio: supplied and borrowed positions with
//! derived totals.
//!
//! A [`Portfolio`] is an immutable snapshot. [`Portfolio::record_supply`] and
//! [`Portfolio::record_borrow`] return the next snapshot with every derived
//! field recomputed from the full position maps.

use std::collections::BTreeMap;
use std::fmt;

use super::position::Position;

/// Share of supplied value that counts as borrowing capacity.
pub const COLLATERAL_FACTOR: f64 = 0.75;

/// Health factor reported when nothing is borrowed. Displayed as "∞".
pub const HEALTH_FACTOR_SENTINEL: f64 = 999.0;

pub fn health_factor(total_supplied: f64, total_borrowed: f64) -> f64 {
    if total_borrowed > 0.0 {
        (total_supplied * COLLATERAL_FACTOR) / total_borrowed
    } else {
        HEALTH_FACTOR_SENTINEL
    }
}

pub fn format_health_factor(factor: f64) -> String {
    if factor >= HEALTH_FACTOR_SENTINEL {
        "∞".to_string()
    } else {
        format!("{:.2}", factor)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthStatus {
    Healthy,
    Caution,
    AtRisk,
}

impl HealthStatus {
    pub fn from_factor(factor: f64) -> Self {
        if factor > 2.0 {
            HealthStatus::Healthy
        } else if factor > 1.5 {
            HealthStatus::Caution
        } else {
            HealthStatus::AtRisk
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HealthStatus::Healthy => write!(f, "healthy"),
            HealthStatus::Caution => write!(f, "caution"),
            HealthStatus::AtRisk => write!(f, "at risk"),
        }
    }
}

/// A supplied symbol's share of total supplied value.
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationSlice {
    pub symbol: String,
    pub value: f64,
    pub share: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Portfolio {
    supplied: BTreeMap<String, Position>,
    borrowed: BTreeMap<String, Position>,
    total_supplied: f64,
    total_borrowed: f64,
    net_worth: f64,
    health_factor: f64,
}

impl Default for Portfolio {
    fn default() -> Self {
        Self::new()
    }
}

impl Portfolio {
    pub fn new() -> Self {
        Portfolio {
            supplied: BTreeMap::new(),
            borrowed: BTreeMap::new(),
            total_supplied: 0.0,
            total_borrowed: 0.0,
            net_worth: 0.0,
            health_factor: HEALTH_FACTOR_SENTINEL,
        }
    }

    pub fn record_supply(&self, position: Position) -> Portfolio {
        let mut supplied = self.supplied.clone();
        merge_into(&mut supplied, position);
        Portfolio::from_maps(supplied, self.borrowed.clone())
    }

    pub fn record_borrow(&self, position: Position) -> Portfolio {
        let mut borrowed = self.borrowed.clone();
        merge_into(&mut borrowed, position);
        Portfolio::from_maps(self.supplied.clone(), borrowed)
    }

    fn from_maps(
        supplied: BTreeMap<String, Position>,
        borrowed: BTreeMap<String, Position>,
    ) -> Portfolio {
        let total_supplied: f64 = supplied.values().map(|p| p.value).sum();
        let total_borrowed: f64 = borrowed.values().map(|p| p.value).sum();
        let portfolio = Portfolio {
            supplied,
            borrowed,
            total_supplied,
            total_borrowed,
            net_worth: total_supplied - total_borrowed,
            health_factor: health_factor(total_supplied, total_borrowed),
        };
        tracing::debug!(
            total_supplied,
            total_borrowed,
            health_factor = portfolio.health_factor,
            "portfolio recomputed"
        );
        portfolio
    }

    pub fn supplied(&self) -> impl Iterator<Item = &Position> {
        self.supplied.values()
    }

    pub fn borrowed(&self) -> impl Iterator<Item = &Position> {
        self.borrowed.values()
    }

    pub fn get_supplied(&self, symbol: &str) -> Option<&Position> {
        self.supplied.get(symbol)
    }

    pub fn get_borrowed(&self, symbol: &str) -> Option<&Position> {
        self.borrowed.get(symbol)
    }

    pub fn supplied_count(&self) -> usize {
        self.supplied.len()
    }

    pub fn borrowed_count(&self) -> usize {
        self.borrowed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.supplied.is_empty() && self.borrowed.is_empty()
    }

    pub fn total_supplied(&self) -> f64 {
        self.total_supplied
    }

    pub fn total_borrowed(&self) -> f64 {
        self.total_borrowed
    }

    pub fn net_worth(&self) -> f64 {
        self.net_worth
    }

    pub fn health_factor(&self) -> f64 {
        self.health_factor
    }

    pub fn health_status(&self) -> HealthStatus {
        HealthStatus::from_factor(self.health_factor)
    }

    pub fn allocation(&self) -> Vec<AllocationSlice> {
        self.supplied
            .values()
            .map(|p| AllocationSlice {
                symbol: p.symbol.clone(),
                value: p.value,
                share: if self.total_supplied > 0.0 {
                    p.value / self.total_supplied
                } else {
                    0.0
                },
            })
            .collect()
    }

    /// Interest earned on supplied positions after `days`, including
    /// interest already accrued.
    pub fn projected_earnings(&self, days: u32) -> f64 {
        self.supplied
            .values()
            .map(|p| p.accrued + p.projected_interest(days))
            .sum()
    }

    /// Interest owed on borrowed positions after `days`, including interest
    /// already accrued.
    pub fn projected_interest_owed(&self, days: u32) -> f64 {
        self.borrowed
            .values()
            .map(|p| p.accrued + p.projected_interest(days))
            .sum()
    }
}

fn merge_into(positions: &mut BTreeMap<String, Position>, position: Position) {
    let merged = match positions.get(&position.symbol) {
        Some(existing) => existing.merged_with(&position),
        None => position,
    };
    positions.insert(merged.symbol.clone(), merged);
}
