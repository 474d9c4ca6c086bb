//! Market data port: interest rates and unit prices per token.

use crate::domain::error::LendsimError;
use crate::domain::token::Direction;

pub trait MarketPort {
    /// Annual percentage rate for `symbol` in the given direction.
    fn rate(&self, symbol: &str, direction: Direction) -> Result<f64, LendsimError>;

    /// USD price of one unit of `symbol`.
    fn unit_price(&self, symbol: &str) -> Option<f64>;
}
