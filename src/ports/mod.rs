//! Port traits (hexagonal boundaries) implemented by [`crate::adapters`].

pub mod config_port;
pub mod market_port;
pub mod report_port;
