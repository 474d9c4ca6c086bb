//! Simulated user session: validates supply/borrow actions, prices them via
//! the market port and folds them into a [`Portfolio`].

use serde::Deserialize;

use super::error::LendsimError;
use super::portfolio::Portfolio;
use super::position::Position;
use super::rates::resolve_rate;
use super::token::{find_token, Direction};
use crate::ports::market_port::MarketPort;

/// One simulated supply or borrow action.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Action {
    pub direction: Direction,
    pub symbol: String,
    pub amount: f64,
}

#[derive(Debug)]
pub struct SkippedAction {
    /// Zero-based position of the action in the input.
    pub index: usize,
    pub action: Action,
    pub error: LendsimError,
}

#[derive(Debug)]
pub struct SessionOutcome {
    pub portfolio: Portfolio,
    pub applied: usize,
    pub skipped: Vec<SkippedAction>,
}

/// Apply one action to `portfolio`, returning the next snapshot.
pub fn apply_action(
    portfolio: &Portfolio,
    action: &Action,
    market: &dyn MarketPort,
) -> Result<Portfolio, LendsimError> {
    let token = find_token(&action.symbol).ok_or_else(|| LendsimError::UnknownToken {
        symbol: action.symbol.clone(),
    })?;

    if !action.amount.is_finite() || action.amount <= 0.0 {
        return Err(LendsimError::InvalidAmount {
            symbol: token.symbol.to_string(),
            amount: action.amount,
        });
    }

    let unit_price = market
        .unit_price(token.symbol)
        .filter(|p| p.is_finite() && *p >= 0.0)
        .unwrap_or(token.unit_price);
    let rate = resolve_rate(market, token, action.direction);
    let position = Position::new(token.symbol, action.amount, unit_price, rate.percent);

    tracing::info!(
        direction = %action.direction,
        symbol = token.symbol,
        amount = action.amount,
        value = position.value,
        rate = rate.percent,
        "recording action"
    );

    Ok(match action.direction {
        Direction::Supply => portfolio.record_supply(position),
        Direction::Borrow => portfolio.record_borrow(position),
    })
}

/// Fold `actions` into a fresh portfolio. Invalid actions are skipped and
/// reported in the outcome.
pub fn run_session(actions: &[Action], market: &dyn MarketPort) -> SessionOutcome {
    let mut portfolio = Portfolio::new();
    let mut applied = 0;
    let mut skipped = Vec::new();

    for (index, action) in actions.iter().enumerate() {
        match apply_action(&portfolio, action, market) {
            Ok(next) => {
                portfolio = next;
                applied += 1;
            }
            Err(error) => {
                tracing::warn!(index, error = %error, "skipping action");
                skipped.push(SkippedAction {
                    index,
                    action: action.clone(),
                    error,
                });
            }
        }
    }

    SessionOutcome {
        portfolio,
        applied,
        skipped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct TableMarket {
        rates: HashMap<(&'static str, Direction), f64>,
        prices: HashMap<&'static str, f64>,
    }

    impl TableMarket {
        fn new() -> Self {
            Self {
                rates: HashMap::new(),
                prices: HashMap::new(),
            }
        }
    }

    impl MarketPort for TableMarket {
        fn rate(&self, symbol: &str, direction: Direction) -> Result<f64, LendsimError> {
            self.rates
                .iter()
                .find(|((s, d), _)| *s == symbol && *d == direction)
                .map(|(_, r)| *r)
                .ok_or_else(|| LendsimError::RateUnavailable {
                    symbol: symbol.to_string(),
                    direction,
                    reason: "not set".into(),
                })
        }

        fn unit_price(&self, symbol: &str) -> Option<f64> {
            self.prices.get(symbol).copied()
        }
    }

    fn action(direction: Direction, symbol: &str, amount: f64) -> Action {
        Action {
            direction,
            symbol: symbol.to_string(),
            amount,
        }
    }

    #[test]
    fn apply_supply_uses_market_price_and_rate() {
        let mut market = TableMarket::new();
        market.rates.insert(("ETH", Direction::Supply), 2.1);
        market.prices.insert("ETH", 2000.0);

        let portfolio = apply_action(
            &Portfolio::new(),
            &action(Direction::Supply, "eth", 2.0),
            &market,
        )
        .unwrap();

        let pos = portfolio.get_supplied("ETH").unwrap();
        assert_eq!(pos.value, 4000.0);
        assert_eq!(pos.rate, 2.1);
    }

    #[test]
    fn apply_borrow_falls_back_to_catalog() {
        let market = TableMarket::new();
        let portfolio = apply_action(
            &Portfolio::new(),
            &action(Direction::Borrow, "DAI", 100.0),
            &market,
        )
        .unwrap();

        let pos = portfolio.get_borrowed("DAI").unwrap();
        assert_eq!(pos.value, 100.0);
        assert_eq!(pos.rate, 4.25);
    }

    #[test]
    fn apply_rejects_unknown_token() {
        let err = apply_action(
            &Portfolio::new(),
            &action(Direction::Supply, "DOGE", 1.0),
            &TableMarket::new(),
        )
        .unwrap_err();
        assert!(matches!(err, LendsimError::UnknownToken { symbol } if symbol == "DOGE"));
    }

    #[test]
    fn apply_rejects_non_positive_amount() {
        for amount in [0.0, -5.0, f64::NAN] {
            let err = apply_action(
                &Portfolio::new(),
                &action(Direction::Supply, "DAI", amount),
                &TableMarket::new(),
            )
            .unwrap_err();
            assert!(matches!(err, LendsimError::InvalidAmount { .. }));
        }
    }

    #[test]
    fn session_skips_invalid_actions() {
        let actions = vec![
            action(Direction::Supply, "DAI", 100.0),
            action(Direction::Supply, "XYZ", 10.0),
            action(Direction::Supply, "DAI", 50.0),
            action(Direction::Borrow, "USDC", 0.0),
        ];
        let outcome = run_session(&actions, &TableMarket::new());

        assert_eq!(outcome.applied, 2);
        assert_eq!(outcome.skipped.len(), 2);
        assert_eq!(outcome.skipped[0].index, 1);
        assert_eq!(outcome.skipped[1].index, 3);
        assert_eq!(outcome.portfolio.total_supplied(), 150.0);
        assert_eq!(outcome.portfolio.borrowed_count(), 0);
    }

    #[test]
    fn empty_session() {
        let outcome = run_session(&[], &TableMarket::new());
        assert!(outcome.portfolio.is_empty());
        assert_eq!(outcome.applied, 0);
    }
}
