#![allow(dead_code)]

use lendsim::domain::error::LendsimError;
use lendsim::domain::session::Action;
use lendsim::domain::token::Direction;
use lendsim::ports::market_port::MarketPort;
use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Write;
use std::process::ExitCode;

/// In-memory market port. Unset rates are unavailable, unset prices fall
/// through to the catalog. Every rate lookup is recorded.
pub struct MockMarketPort {
    pub rates: HashMap<(String, Direction), f64>,
    pub prices: HashMap<String, f64>,
    pub lookups: RefCell<Vec<(String, Direction)>>,
}

impl MockMarketPort {
    pub fn new() -> Self {
        Self {
            rates: HashMap::new(),
            prices: HashMap::new(),
            lookups: RefCell::new(Vec::new()),
        }
    }

    pub fn with_rate(mut self, symbol: &str, direction: Direction, rate: f64) -> Self {
        self.rates.insert((symbol.to_string(), direction), rate);
        self
    }

    pub fn with_price(mut self, symbol: &str, price: f64) -> Self {
        self.prices.insert(symbol.to_string(), price);
        self
    }

    pub fn lookup_count(&self) -> usize {
        self.lookups.borrow().len()
    }
}

impl MarketPort for MockMarketPort {
    fn rate(&self, symbol: &str, direction: Direction) -> Result<f64, LendsimError> {
        self.lookups
            .borrow_mut()
            .push((symbol.to_string(), direction));
        self.rates
            .get(&(symbol.to_string(), direction))
            .copied()
            .ok_or_else(|| LendsimError::RateUnavailable {
                symbol: symbol.to_string(),
                direction,
                reason: "not quoted".into(),
            })
    }

    fn unit_price(&self, symbol: &str) -> Option<f64> {
        self.prices.get(symbol).copied()
    }
}

pub fn supply(symbol: &str, amount: f64) -> Action {
    Action {
        direction: Direction::Supply,
        symbol: symbol.to_string(),
        amount,
    }
}

pub fn borrow(symbol: &str, amount: f64) -> Action {
    Action {
        direction: Direction::Borrow,
        symbol: symbol.to_string(),
        amount,
    }
}

pub fn write_temp_file(content: &str, suffix: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

pub const MARKET_INI: &str = r#"
[supply_rates]
dai = 4.5
usdc = 3.2
eth = --

[borrow_rates]
dai = 5.1
usdc = Error
eth = 3.9

[prices]
eth = 2000

[forecast]
direction = supply
days = 365
"#;

/// ExitCode has no PartialEq; compare the debug form.
pub fn assert_exit(code: ExitCode, expected: u8) {
    assert_eq!(format!("{code:?}"), format!("{:?}", ExitCode::from(expected)));
}
