//! Rate resolution with fallback.
//!
//! The market port is tried first. Any failure (missing value, provider
//! sentinel, non-finite number) falls back to the token's catalog rate so a
//! forecast or a simulated action never fails for lack of a rate.

use std::fmt;

use super::token::{Direction, Token};
use crate::ports::market_port::MarketPort;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateSource {
    /// Supplied by the market port.
    Configured,
    /// Catalog fallback after the market port failed.
    Fallback,
    /// Given explicitly by the caller.
    Override,
}

impl fmt::Display for RateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RateSource::Configured => write!(f, "configured"),
            RateSource::Fallback => write!(f, "fallback"),
            RateSource::Override => write!(f, "override"),
        }
    }
}

/// An annual percentage rate together with where it came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateQuote {
    pub percent: f64,
    pub source: RateSource,
}

impl RateQuote {
    /// Caller-supplied rate. A non-finite value is recorded as 0%, the rate
    /// the interest engine applies to it.
    pub fn overridden(percent: f64) -> Self {
        RateQuote {
            percent: if percent.is_finite() { percent } else { 0.0 },
            source: RateSource::Override,
        }
    }
}

pub fn resolve_rate(market: &dyn MarketPort, token: &Token, direction: Direction) -> RateQuote {
    match market.rate(token.symbol, direction) {
        Ok(percent) if percent.is_finite() => {
            tracing::debug!(symbol = token.symbol, %direction, percent, "rate resolved");
            RateQuote {
                percent,
                source: RateSource::Configured,
            }
        }
        Ok(percent) => {
            tracing::warn!(
                symbol = token.symbol,
                %direction,
                percent,
                "non-finite rate, using fallback"
            );
            fallback_quote(token, direction)
        }
        Err(e) => {
            tracing::warn!(symbol = token.symbol, %direction, error = %e, "using fallback rate");
            fallback_quote(token, direction)
        }
    }
}

fn fallback_quote(token: &Token, direction: Direction) -> RateQuote {
    RateQuote {
        percent: token.fallback_rate(direction),
        source: RateSource::Fallback,
    }
}
