//! Market data read from configuration.
//!
//! Rates live in `[supply_rates]` / `[borrow_rates]` and prices in
//! `[prices]`, keyed by lowercase token symbol. A missing key, the provider
//! sentinels `--` / `Error`, or a non-numeric value make the rate
//! unavailable; callers then fall back to catalog rates.

use crate::domain::error::LendsimError;
use crate::domain::interest::parse_rate;
use crate::domain::token::Direction;
use crate::ports::config_port::ConfigPort;
use crate::ports::market_port::MarketPort;

pub struct ConfigMarketAdapter<'a> {
    config: &'a dyn ConfigPort,
}

impl<'a> ConfigMarketAdapter<'a> {
    pub fn new(config: &'a dyn ConfigPort) -> Self {
        Self { config }
    }
}

impl MarketPort for ConfigMarketAdapter<'_> {
    fn rate(&self, symbol: &str, direction: Direction) -> Result<f64, LendsimError> {
        let section = direction.rate_section();
        let key = symbol.to_lowercase();
        let raw = self
            .config
            .get_string(section, &key)
            .ok_or_else(|| LendsimError::RateUnavailable {
                symbol: symbol.to_string(),
                direction,
                reason: format!("no [{}] {} entry", section, key),
            })?;
        parse_rate(&raw).ok_or_else(|| LendsimError::RateUnavailable {
            symbol: symbol.to_string(),
            direction,
            reason: format!("value is \"{}\"", raw),
        })
    }

    fn unit_price(&self, symbol: &str) -> Option<f64> {
        self.config
            .get_string("prices", &symbol.to_lowercase())
            .and_then(|raw| raw.trim().parse::<f64>().ok())
            .filter(|p| p.is_finite() && *p >= 0.0)
    }
}
