//! Configuration validation.
//!
//! Checks the market and forecast sections before any command uses them.
//! Rate sentinels ("--", "Error") are accepted: they mean the rate is
//! unavailable and the catalog fallback applies.

use super::error::LendsimError;
use super::interest::parse_rate;
use super::token::{Direction, SUPPORTED_TOKENS};
use crate::ports::config_port::ConfigPort;

pub fn validate_market_config(config: &dyn ConfigPort) -> Result<(), LendsimError> {
    validate_rates(config, Direction::Supply)?;
    validate_rates(config, Direction::Borrow)?;
    validate_prices(config)?;
    Ok(())
}

pub fn validate_forecast_config(config: &dyn ConfigPort) -> Result<(), LendsimError> {
    validate_direction(config)?;
    validate_days(config)?;
    Ok(())
}

fn validate_rates(config: &dyn ConfigPort, direction: Direction) -> Result<(), LendsimError> {
    let section = direction.rate_section();
    for token in SUPPORTED_TOKENS.iter() {
        let key = token.symbol.to_lowercase();
        let Some(raw) = config.get_string(section, &key) else {
            continue;
        };
        if is_rate_sentinel(&raw) {
            continue;
        }
        match parse_rate(&raw) {
            Some(rate) if rate >= 0.0 => {}
            Some(_) => {
                return Err(LendsimError::ConfigInvalid {
                    section: section.to_string(),
                    key,
                    reason: "rate must be non-negative".to_string(),
                });
            }
            None => {
                return Err(LendsimError::ConfigInvalid {
                    section: section.to_string(),
                    key,
                    reason: format!("'{}' is not a number", raw),
                });
            }
        }
    }
    Ok(())
}

fn is_rate_sentinel(raw: &str) -> bool {
    let trimmed = raw.trim();
    trimmed == "--" || trimmed.eq_ignore_ascii_case("error")
}

fn validate_prices(config: &dyn ConfigPort) -> Result<(), LendsimError> {
    for token in SUPPORTED_TOKENS.iter() {
        let key = token.symbol.to_lowercase();
        let Some(raw) = config.get_string("prices", &key) else {
            continue;
        };
        match raw.trim().parse::<f64>() {
            Ok(price) if price.is_finite() && price >= 0.0 => {}
            _ => {
                return Err(LendsimError::ConfigInvalid {
                    section: "prices".to_string(),
                    key,
                    reason: "price must be a non-negative number".to_string(),
                });
            }
        }
    }
    Ok(())
}

fn validate_direction(config: &dyn ConfigPort) -> Result<(), LendsimError> {
    match config.get_string("forecast", "direction") {
        None => Ok(()),
        Some(s) => s
            .parse::<Direction>()
            .map(|_| ())
            .map_err(|reason| LendsimError::ConfigInvalid {
                section: "forecast".to_string(),
                key: "direction".to_string(),
                reason,
            }),
    }
}

fn validate_days(config: &dyn ConfigPort) -> Result<(), LendsimError> {
    let Some(raw) = config.get_string("forecast", "days") else {
        return Ok(());
    };
    match raw.trim().parse::<i64>() {
        Ok(days) if (0..=i64::from(u32::MAX)).contains(&days) => Ok(()),
        _ => Err(LendsimError::ConfigInvalid {
            section: "forecast".to_string(),
            key: "days".to_string(),
            reason: "days must be a non-negative integer".to_string(),
        }),
    }
}
