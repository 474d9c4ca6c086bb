//! Core domain types and logic.

pub mod interest;
pub mod token;
pub mod rates;
pub mod position;
pub mod portfolio;
pub mod session;
pub mod config_validation;
pub mod error;
