//! Supported token catalog and position direction.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Catalog supply rate shared by every token.
pub const DEFAULT_SUPPLY_RATE: f64 = 2.5;

/// Deserialised through [`FromStr`], so CSV input accepts the same
/// case-insensitive aliases as the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Direction {
    Supply,
    Borrow,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Supply => "supply",
            Direction::Borrow => "borrow",
        }
    }

    /// Section of the market config holding rates for this direction.
    pub fn rate_section(&self) -> &'static str {
        match self {
            Direction::Supply => "supply_rates",
            Direction::Borrow => "borrow_rates",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "supply" | "lend" | "lending" => Ok(Direction::Supply),
            "borrow" | "borrowing" => Ok(Direction::Borrow),
            other => Err(format!(
                "unknown direction '{other}' (expected supply or borrow)"
            )),
        }
    }
}

impl TryFrom<String> for Direction {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Static description of a supported token.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token {
    pub symbol: &'static str,
    pub name: &'static str,
    /// Mock USD price used when the market has no price configured.
    pub unit_price: f64,
    pub fallback_supply_rate: f64,
    pub fallback_borrow_rate: f64,
}

impl Token {
    pub fn fallback_rate(&self, direction: Direction) -> f64 {
        match direction {
            Direction::Supply => self.fallback_supply_rate,
            Direction::Borrow => self.fallback_borrow_rate,
        }
    }
}

pub const SUPPORTED_TOKENS: [Token; 3] = [
    Token {
        symbol: "DAI",
        name: "Dai Stablecoin",
        unit_price: 1.0,
        fallback_supply_rate: DEFAULT_SUPPLY_RATE,
        fallback_borrow_rate: 4.25,
    },
    Token {
        symbol: "USDC",
        name: "USD Coin",
        unit_price: 1.0,
        fallback_supply_rate: DEFAULT_SUPPLY_RATE,
        fallback_borrow_rate: 4.15,
    },
    Token {
        symbol: "ETH",
        name: "Ethereum",
        unit_price: 2100.0,
        fallback_supply_rate: DEFAULT_SUPPLY_RATE,
        fallback_borrow_rate: 3.85,
    },
];

/// Look up a token by symbol, ignoring case and surrounding whitespace.
pub fn find_token(symbol: &str) -> Option<&'static Token> {
    let wanted = symbol.trim();
    SUPPORTED_TOKENS
        .iter()
        .find(|t| t.symbol.eq_ignore_ascii_case(wanted))
}
